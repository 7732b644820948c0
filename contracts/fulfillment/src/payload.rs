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

use chrono::{DateTime, FixedOffset};
use walx_sdk::addressing::validate_record_key;
use walx_sdk::chaincode::ChaincodeError;

const CREATE_FULFILLMENT_ARGS: usize = 9;
const UPDATE_FULFILLMENT_ARGS: usize = 6;

/// Arguments of `createfulfilment`.
#[derive(Debug, PartialEq)]
pub struct CreateFulfillmentPayload {
    order_number: String,
    gtin: String,
    quantity: i64,
    supplier_name: String,
    status: String,
    current_location: String,
    next_location: String,
    next_location_eta: DateTime<FixedOffset>,
    ownership: String,
}

impl CreateFulfillmentPayload {
    /// Parses order number, gtin, quantity, supplier name, status, current location, next
    /// location, next location ETA and ownership. Arguments past the ninth are ignored.
    pub fn from_args(args: &[String]) -> Result<Self, ChaincodeError> {
        if args.len() < CREATE_FULFILLMENT_ARGS {
            return Err(ChaincodeError::arity("at least 9", args.len()));
        }

        if args.len() > CREATE_FULFILLMENT_ARGS {
            warn!(
                "Ignoring {} extra createfulfilment arguments",
                args.len() - CREATE_FULFILLMENT_ARGS
            );
        }

        validate_record_key("order_number", &args[0])?;
        require_value("gtin", &args[1])?;
        require_value("status", &args[4])?;

        Ok(Self {
            order_number: args[0].clone(),
            gtin: args[1].clone(),
            quantity: parse_integer("quantity", &args[2])?,
            supplier_name: args[3].clone(),
            status: args[4].clone(),
            current_location: args[5].clone(),
            next_location: args[6].clone(),
            next_location_eta: parse_timestamp("next_location_eta", &args[7])?,
            ownership: args[8].clone(),
        })
    }

    pub fn order_number(&self) -> &str {
        &self.order_number
    }

    pub fn gtin(&self) -> &str {
        &self.gtin
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn supplier_name(&self) -> &str {
        &self.supplier_name
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn current_location(&self) -> &str {
        &self.current_location
    }

    pub fn next_location(&self) -> &str {
        &self.next_location
    }

    pub fn next_location_eta(&self) -> &DateTime<FixedOffset> {
        &self.next_location_eta
    }

    pub fn ownership(&self) -> &str {
        &self.ownership
    }
}

/// Arguments of `updatefulfilment`: order number, status, current location, next location,
/// next location ETA and ownership.
#[derive(Debug, PartialEq)]
pub struct UpdateFulfillmentPayload {
    order_number: String,
    status: String,
    current_location: String,
    next_location: String,
    next_location_eta: DateTime<FixedOffset>,
    ownership: String,
}

impl UpdateFulfillmentPayload {
    pub fn from_args(args: &[String]) -> Result<Self, ChaincodeError> {
        if args.len() != UPDATE_FULFILLMENT_ARGS {
            return Err(ChaincodeError::arity("6", args.len()));
        }

        validate_record_key("order_number", &args[0])?;
        require_value("status", &args[1])?;

        Ok(Self {
            order_number: args[0].clone(),
            status: args[1].clone(),
            current_location: args[2].clone(),
            next_location: args[3].clone(),
            next_location_eta: parse_timestamp("next_location_eta", &args[4])?,
            ownership: args[5].clone(),
        })
    }

    pub fn order_number(&self) -> &str {
        &self.order_number
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn current_location(&self) -> &str {
        &self.current_location
    }

    pub fn next_location(&self) -> &str {
        &self.next_location
    }

    pub fn next_location_eta(&self) -> &DateTime<FixedOffset> {
        &self.next_location_eta
    }

    pub fn ownership(&self) -> &str {
        &self.ownership
    }
}

fn require_value(field: &str, value: &str) -> Result<(), ChaincodeError> {
    if value.is_empty() {
        return Err(ChaincodeError::invalid_argument(
            field,
            &format!("`{}` must not be empty", field),
        ));
    }
    Ok(())
}

fn parse_integer(field: &str, value: &str) -> Result<i64, ChaincodeError> {
    value.parse::<i64>().map_err(|err| {
        ChaincodeError::invalid_argument(
            field,
            &format!("`{}` must be an integer, found '{}': {}", field, value, err),
        )
    })
}

fn parse_timestamp(field: &str, value: &str) -> Result<DateTime<FixedOffset>, ChaincodeError> {
    DateTime::parse_from_rfc3339(value).map_err(|err| {
        ChaincodeError::invalid_argument(
            field,
            &format!(
                "`{}` must be an RFC 3339 timestamp, found '{}': {}",
                field, value, err
            ),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn create_args() -> Vec<String> {
        args(&[
            "ORD1",
            "GTIN1",
            "40",
            "Acme Farms",
            "Packed",
            "Bentonville",
            "Dallas",
            "2021-02-01T09:00:00-06:00",
            "Acme Farms",
        ])
    }

    #[test]
    fn test_create_fulfillment() {
        let payload =
            CreateFulfillmentPayload::from_args(&create_args()).expect("Unable to parse payload");

        assert_eq!(payload.order_number(), "ORD1");
        assert_eq!(payload.gtin(), "GTIN1");
        assert_eq!(payload.quantity(), 40);
        assert_eq!(payload.supplier_name(), "Acme Farms");
        assert_eq!(payload.status(), "Packed");
        assert_eq!(payload.current_location(), "Bentonville");
        assert_eq!(payload.next_location(), "Dallas");
        assert_eq!(
            payload.next_location_eta().to_rfc3339(),
            "2021-02-01T09:00:00-06:00"
        );
        assert_eq!(payload.ownership(), "Acme Farms");
    }

    #[test]
    fn test_create_fulfillment_ignores_extra_args() {
        let mut values = create_args();
        values.push("extra".to_string());

        let payload =
            CreateFulfillmentPayload::from_args(&values).expect("Unable to parse payload");
        assert_eq!(payload.ownership(), "Acme Farms");
    }

    #[test]
    fn test_create_fulfillment_validation() {
        match CreateFulfillmentPayload::from_args(&create_args()[..8]) {
            Err(ChaincodeError::Validation(err)) => assert_eq!(err.argument(), "args"),
            other => panic!("expected validation error, got {:?}", other),
        }

        let cases = vec![
            (2, "forty", "quantity"),
            (7, "Feb 1st", "next_location_eta"),
            (4, "", "status"),
            (0, "ORD@1", "order_number"),
            (0, "health", "order_number"),
            (2, " 40", "quantity"),
        ];
        for (index, value, field) in cases {
            let mut values = create_args();
            values[index] = value.to_string();
            match CreateFulfillmentPayload::from_args(&values) {
                Err(ChaincodeError::Validation(err)) => assert_eq!(err.argument(), field),
                other => panic!("expected validation error on {}, got {:?}", field, other),
            }
        }
    }

    #[test]
    fn test_update_fulfillment() {
        let payload = UpdateFulfillmentPayload::from_args(&args(&[
            "ORD1",
            "InTransit",
            "Dallas",
            "Houston",
            "2021-02-02T15:30:00Z",
            "Carrier Co",
        ]))
        .expect("Unable to parse payload");

        assert_eq!(payload.order_number(), "ORD1");
        assert_eq!(payload.status(), "InTransit");
        assert_eq!(payload.current_location(), "Dallas");
        assert_eq!(payload.next_location(), "Houston");
        assert_eq!(
            payload.next_location_eta().to_rfc3339(),
            "2021-02-02T15:30:00+00:00"
        );
        assert_eq!(payload.ownership(), "Carrier Co");

        assert!(UpdateFulfillmentPayload::from_args(&args(&["ORD1", "InTransit"])).is_err());
        assert!(UpdateFulfillmentPayload::from_args(&args(&[
            "ORD1", "InTransit", "Dallas", "Houston", "tomorrow", "Carrier Co",
        ]))
        .is_err());
    }
}
