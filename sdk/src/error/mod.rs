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

//! Basic errors shared by the ledger, record and chaincode modules.
//!
//! These errors are used by themselves or as the payload of a richer error `enum`, such as
//! `ChaincodeError`.
//!
//! # Examples
//!
//! ```
//! use walx_sdk::error::InvalidArgumentError;
//!
//! fn parse_quantity(value: &str) -> Result<i64, InvalidArgumentError> {
//!     value.parse().map_err(|_| {
//!         InvalidArgumentError::new(
//!             "quantity".to_string(),
//!             "expecting an integer value".to_string(),
//!         )
//!     })
//! }
//!
//! assert!(parse_quantity("10").is_ok());
//! assert_eq!(
//!     parse_quantity("ten").unwrap_err().to_string(),
//!     "expecting an integer value (quantity)"
//! );
//! ```

mod internal;
mod invalid_argument;

pub use internal::InternalError;
pub use invalid_argument::InvalidArgumentError;
