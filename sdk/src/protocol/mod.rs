// Copyright 2021 Cargill Incorporated
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Record schemas stored on the ledger.
//!
//! Records are serialized as JSON objects with stable, field-tagged names. Encoding is
//! deterministic: decoding a record and encoding it again yields the same bytes, so a record can
//! be handed from one party to the next without drifting.

pub mod fulfillment;
pub mod purchase_order;

use std::error::Error as StdError;
use std::fmt;

/// Decodes a native record from its ledger representation.
pub trait FromBytes<T>: Sized {
    fn from_bytes(bytes: &[u8]) -> Result<T, ProtocolError>;
}

/// Encodes a native record into its ledger representation.
pub trait IntoBytes: Sized {
    fn into_bytes(self) -> Result<Vec<u8>, ProtocolError>;
}

#[derive(Debug)]
pub enum ProtocolError {
    SerializationError(String),
    DeserializationError(String),
}

impl StdError for ProtocolError {}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ProtocolError::SerializationError(ref s) => write!(f, "Serialization error: {}", s),
            ProtocolError::DeserializationError(ref s) => {
                write!(f, "Deserialization error: {}", s)
            }
        }
    }
}

/// Returned if a required field is not present when a record is built from its builder
#[derive(Debug, PartialEq)]
pub enum BuildError {
    MissingField(String),
}

impl StdError for BuildError {}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            BuildError::MissingField(ref s) => write!(f, "missing field \"{}\"", s),
        }
    }
}
