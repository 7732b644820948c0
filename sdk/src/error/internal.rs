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

//! Module containing InternalError implementation.

use std::error;
use std::fmt;

struct Source {
    prefix: String,
    source: Box<dyn error::Error>,
}

/// An error which is returned for reasons internal to the function.
///
/// Produced when a stored record cannot be decoded, a record cannot be encoded, or the ledger
/// store fails for a reason the caller cannot act on.
pub struct InternalError {
    message: Option<String>,
    source: Option<Source>,
}

impl InternalError {
    /// Constructs a new `InternalError` from a specified source error and prefix string.
    ///
    /// `Display` renders as `format!("{}: {}", prefix, source)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use walx_sdk::error::InternalError;
    ///
    /// let json_err = serde_json::from_slice::<u32>(b"not json").unwrap_err();
    /// let err = InternalError::from_source_with_prefix(
    ///     Box::new(json_err),
    ///     "Cannot decode purchase order".to_string(),
    /// );
    /// assert!(err.to_string().starts_with("Cannot decode purchase order: "));
    /// ```
    pub fn from_source_with_prefix(source: Box<dyn error::Error>, prefix: String) -> Self {
        Self {
            message: None,
            source: Some(Source {
                prefix,
                source,
            }),
        }
    }

    /// Constructs a new `InternalError` with a specified message string.
    pub fn with_message(message: String) -> Self {
        Self {
            message: Some(message),
            source: None,
        }
    }
}

impl error::Error for InternalError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.source {
            Some(s) => Some(s.source.as_ref()),
            None => None,
        }
    }
}

impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.message {
            Some(m) => write!(f, "{}", m),
            None => match &self.source {
                Some(s) => write!(f, "{}: {}", s.prefix, s.source),
                None => write!(f, "{}", std::any::type_name::<InternalError>()),
            },
        }
    }
}

impl fmt::Debug for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const TYPE_NAME: &str = "InternalError";

        match (&self.message, &self.source) {
            (Some(m), _) => write!(f, "{} {{ message: {:?} }}", TYPE_NAME, m),
            (None, Some(Source { prefix, source })) => write!(
                f,
                "{} {{ prefix: {:?}, source: {:?} }}",
                TYPE_NAME, prefix, source
            ),
            (None, None) => write!(f, "{}", TYPE_NAME),
        }
    }
}
