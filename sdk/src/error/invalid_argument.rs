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

//! Module containing InvalidArgumentError implementation.

use std::error;
use std::fmt;

/// An error returned when an invocation argument does not conform to the expected format.
///
/// Chaincode arguments arrive as positional strings; this error names the logical field that
/// failed so the caller can tell which position to fix.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidArgumentError {
    argument: String,
    message: String,
}

impl InvalidArgumentError {
    /// Constructs a new `InvalidArgumentError` with a specified argument and message string.
    ///
    /// The message should not repeat the argument name; `Display` combines both.
    ///
    /// # Examples
    ///
    /// ```
    /// use walx_sdk::error::InvalidArgumentError;
    ///
    /// let err = InvalidArgumentError::new("gtin".to_string(), "must not be empty".to_string());
    /// assert_eq!(format!("{}", err), "must not be empty (gtin)");
    /// ```
    pub fn new(argument: String, message: String) -> Self {
        Self { argument, message }
    }

    /// Returns the name of the invalid argument.
    pub fn argument(&self) -> &str {
        &self.argument
    }

    /// Returns the explanation of why the argument is invalid.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl error::Error for InvalidArgumentError {}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", &self.message, &self.argument)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_argument() {
        let err = InvalidArgumentError::new(
            "sustainability".to_string(),
            "expecting an integer value".to_string(),
        );
        assert_eq!(
            format!("{}", err),
            "expecting an integer value (sustainability)"
        );
        assert_eq!(err.argument(), "sustainability");
        assert_eq!(err.message(), "expecting an integer value");
    }
}
