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

use std::error::Error;
use std::fmt;

use crate::error::{InternalError, InvalidArgumentError};
use crate::identity::IdentityError;
use crate::ledger::LedgerStoreError;

pub const STATUS_OK: u32 = 200;
pub const STATUS_BAD_REQUEST: u32 = 400;
pub const STATUS_UNAUTHENTICATED: u32 = 401;
pub const STATUS_FORBIDDEN: u32 = 403;
pub const STATUS_NOT_FOUND: u32 = 404;
pub const STATUS_CONFLICT: u32 = 409;
pub const STATUS_INTERNAL_ERROR: u32 = 500;

/// Failure of a single chaincode invocation.
///
/// Every variant maps to a status code carried back to the submitting client; no variant
/// leaves a ledger write behind.
#[derive(Debug)]
pub enum ChaincodeError {
    /// Wrong arity, malformed numbers or dates, bad identifiers
    Validation(InvalidArgumentError),
    /// The caller's role may not perform the operation
    Authorization(String),
    /// The creator certificate could not be turned into an identity
    Identity(IdentityError),
    NotFound(String),
    AlreadyExists(String),
    /// The record changed underneath the invocation, or the status transition is not allowed
    Conflict(String),
    Store(InternalError),
    Internal(InternalError),
    UnknownFunction(String),
}

impl ChaincodeError {
    pub fn status(&self) -> u32 {
        match self {
            ChaincodeError::Validation(_) => STATUS_BAD_REQUEST,
            ChaincodeError::Identity(_) => STATUS_UNAUTHENTICATED,
            ChaincodeError::Authorization(_) | ChaincodeError::UnknownFunction(_) => {
                STATUS_FORBIDDEN
            }
            ChaincodeError::NotFound(_) => STATUS_NOT_FOUND,
            ChaincodeError::AlreadyExists(_) | ChaincodeError::Conflict(_) => STATUS_CONFLICT,
            ChaincodeError::Store(_) | ChaincodeError::Internal(_) => STATUS_INTERNAL_ERROR,
        }
    }

    /// Shorthand for a validation failure on a named argument.
    pub fn invalid_argument(argument: &str, message: &str) -> Self {
        ChaincodeError::Validation(InvalidArgumentError::new(
            argument.to_string(),
            message.to_string(),
        ))
    }

    /// Validation failure for an argument list of the wrong length.
    pub fn arity(expected: &str, found: usize) -> Self {
        ChaincodeError::invalid_argument(
            "args",
            &format!(
                "incorrect number of arguments, expecting {}, found {}",
                expected, found
            ),
        )
    }
}

impl Error for ChaincodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ChaincodeError::Validation(err) => Some(err),
            ChaincodeError::Identity(err) => Some(err),
            ChaincodeError::Store(err) | ChaincodeError::Internal(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for ChaincodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChaincodeError::Validation(err) => write!(f, "Invalid argument: {}", err),
            ChaincodeError::Authorization(msg) => write!(f, "Not authorized: {}", msg),
            ChaincodeError::Identity(err) => write!(f, "Unable to identify caller: {}", err),
            ChaincodeError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ChaincodeError::AlreadyExists(msg) => write!(f, "Already exists: {}", msg),
            ChaincodeError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ChaincodeError::Store(err) => write!(f, "Ledger failure: {}", err),
            ChaincodeError::Internal(err) => write!(f, "{}", err),
            ChaincodeError::UnknownFunction(name) => {
                write!(f, "unknown function name: {}", name)
            }
        }
    }
}

impl From<InvalidArgumentError> for ChaincodeError {
    fn from(err: InvalidArgumentError) -> Self {
        ChaincodeError::Validation(err)
    }
}

impl From<IdentityError> for ChaincodeError {
    fn from(err: IdentityError) -> Self {
        ChaincodeError::Identity(err)
    }
}

impl From<LedgerStoreError> for ChaincodeError {
    fn from(err: LedgerStoreError) -> Self {
        match err {
            LedgerStoreError::Conflict(key) => ChaincodeError::Conflict(format!(
                "ledger key {} was modified concurrently",
                key
            )),
            LedgerStoreError::InternalError(err) => ChaincodeError::Store(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(ChaincodeError::arity("2", 1).status(), 400);
        assert_eq!(
            ChaincodeError::Identity(IdentityError::MissingPemBlock).status(),
            401
        );
        assert_eq!(ChaincodeError::Authorization("x".into()).status(), 403);
        assert_eq!(ChaincodeError::UnknownFunction("x".into()).status(), 403);
        assert_eq!(ChaincodeError::NotFound("x".into()).status(), 404);
        assert_eq!(ChaincodeError::AlreadyExists("x".into()).status(), 409);
        assert_eq!(
            ChaincodeError::Store(InternalError::with_message("x".into())).status(),
            500
        );
    }

    #[test]
    fn ledger_conflict_becomes_conflict() {
        let err = ChaincodeError::from(LedgerStoreError::Conflict("PO100".into()));
        match err {
            ChaincodeError::Conflict(msg) => assert!(msg.contains("PO100")),
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[test]
    fn unknown_function_display() {
        assert_eq!(
            ChaincodeError::UnknownFunction("frobnicate".into()).to_string(),
            "unknown function name: frobnicate"
        );
    }
}
