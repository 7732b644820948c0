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

//! Provides the functions that compute ledger keys.
//!
//! Records are filed under their own identifier. A composite key joins two identifiers with
//! [`COMPOSITE_KEY_SEPARATOR`] and is only used by the auditor lookups. Identifiers are restricted
//! to ASCII letters, digits, `-`, `_` and `.`; the separator is outside that alphabet, so a
//! composite key can never equal a single-party key. [`HEALTH_CHECK`] is answered by the query
//! gateway before any lookup, so it is never accepted as a record identifier.

use crate::error::InvalidArgumentError;

pub const COMPOSITE_KEY_SEPARATOR: char = '@';

/// The query argument answered as a liveness check without touching identity or the ledger.
pub const HEALTH_CHECK: &str = "health";

/// Checks that `value` is a non-empty identifier drawn from the key alphabet.
pub fn validate_identifier(argument: &str, value: &str) -> Result<(), InvalidArgumentError> {
    if value.is_empty() {
        return Err(InvalidArgumentError::new(
            argument.to_string(),
            "must not be empty".to_string(),
        ));
    }

    if let Some(c) = value.chars().find(|c| !is_identifier_char(*c)) {
        return Err(InvalidArgumentError::new(
            argument.to_string(),
            format!(
                "contains '{}', identifiers may only contain ASCII letters, digits, '-', '_' and '.'",
                c
            ),
        ));
    }

    Ok(())
}

/// Checks that `value` can name a record filed under a single-party key.
///
/// Beyond [`validate_identifier`], the health check argument is refused so a stored record can
/// never be shadowed by the liveness answer.
pub fn validate_record_key(argument: &str, value: &str) -> Result<(), InvalidArgumentError> {
    validate_identifier(argument, value)?;

    if value == HEALTH_CHECK {
        return Err(InvalidArgumentError::new(
            argument.to_string(),
            format!("'{}' is reserved", HEALTH_CHECK),
        ));
    }

    Ok(())
}

/// Computes the key a purchase order is stored at.
pub fn compute_purchase_order_key(po_number: &str) -> Result<String, InvalidArgumentError> {
    validate_record_key("po_number", po_number)?;
    Ok(po_number.to_string())
}

/// Computes the key an order fulfillment is stored at.
pub fn compute_fulfillment_key(order_number: &str) -> Result<String, InvalidArgumentError> {
    validate_record_key("order_number", order_number)?;
    Ok(order_number.to_string())
}

/// Computes the key of a record filed under a pair of identities, e.g. `PO100@banker1`.
pub fn compute_composite_key(first: &str, second: &str) -> Result<String, InvalidArgumentError> {
    validate_identifier("first_key_component", first)?;
    validate_identifier("second_key_component", second)?;

    Ok(format!("{}{}{}", first, COMPOSITE_KEY_SEPARATOR, second))
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_party_keys_are_the_identifier() {
        assert_eq!(compute_purchase_order_key("PO100").unwrap(), "PO100");
        assert_eq!(compute_fulfillment_key("ORD-7_a.1").unwrap(), "ORD-7_a.1");
    }

    #[test]
    fn test_composite_key() {
        assert_eq!(compute_composite_key("PO100", "bank1").unwrap(), "PO100@bank1");
    }

    #[test]
    fn test_separator_is_rejected_in_identifiers() {
        let err = compute_purchase_order_key("PO100@bank1").unwrap_err();
        assert_eq!(err.argument(), "po_number");

        assert!(compute_composite_key("PO@100", "bank1").is_err());
        assert!(compute_composite_key("PO100", "bank@1").is_err());
    }

    #[test]
    fn test_empty_and_non_ascii_identifiers_are_rejected() {
        assert!(compute_fulfillment_key("").is_err());
        assert!(compute_fulfillment_key("ORD 1").is_err());
        assert!(compute_fulfillment_key("ORDé").is_err());
        assert!(compute_composite_key("", "bank1").is_err());
    }

    #[test]
    fn test_health_check_is_not_a_record_identifier() {
        let err = compute_purchase_order_key(HEALTH_CHECK).unwrap_err();
        assert_eq!(err.argument(), "po_number");

        let err = compute_fulfillment_key(HEALTH_CHECK).unwrap_err();
        assert_eq!(err.argument(), "order_number");

        assert_eq!(compute_purchase_order_key("Health").unwrap(), "Health");
        assert!(compute_composite_key(HEALTH_CHECK, "bank1").is_ok());
    }
}
