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

//! Protocol structs for Order Fulfillment state

use chrono::{DateTime, FixedOffset};

use super::{BuildError, FromBytes, IntoBytes, ProtocolError};

/// Native representation of an order fulfillment.
///
/// `order_number`, `gtin`, `quantity` and `supplier_name` are fixed at creation; the status,
/// locations, ETA and ownership advance as custody of the goods moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderFulfillment {
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

impl OrderFulfillment {
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

    pub fn into_builder(self) -> OrderFulfillmentBuilder {
        OrderFulfillmentBuilder::new()
            .with_order_number(self.order_number)
            .with_gtin(self.gtin)
            .with_quantity(self.quantity)
            .with_supplier_name(self.supplier_name)
            .with_status(self.status)
            .with_current_location(self.current_location)
            .with_next_location(self.next_location)
            .with_next_location_eta(self.next_location_eta)
            .with_ownership(self.ownership)
    }
}

impl FromBytes<OrderFulfillment> for OrderFulfillment {
    fn from_bytes(bytes: &[u8]) -> Result<OrderFulfillment, ProtocolError> {
        serde_json::from_slice(bytes).map_err(|err| {
            ProtocolError::DeserializationError(format!(
                "Unable to get OrderFulfillment from bytes: {}",
                err
            ))
        })
    }
}

impl IntoBytes for OrderFulfillment {
    fn into_bytes(self) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(&self).map_err(|err| {
            ProtocolError::SerializationError(format!(
                "Unable to get bytes from OrderFulfillment: {}",
                err
            ))
        })
    }
}

/// Builder used to create an `OrderFulfillment`
#[derive(Default, Clone, PartialEq)]
pub struct OrderFulfillmentBuilder {
    order_number: Option<String>,
    gtin: Option<String>,
    quantity: Option<i64>,
    supplier_name: Option<String>,
    status: Option<String>,
    current_location: Option<String>,
    next_location: Option<String>,
    next_location_eta: Option<DateTime<FixedOffset>>,
    ownership: Option<String>,
}

impl OrderFulfillmentBuilder {
    pub fn new() -> Self {
        OrderFulfillmentBuilder::default()
    }

    pub fn with_order_number(mut self, order_number: String) -> Self {
        self.order_number = Some(order_number);
        self
    }

    pub fn with_gtin(mut self, gtin: String) -> Self {
        self.gtin = Some(gtin);
        self
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_supplier_name(mut self, supplier_name: String) -> Self {
        self.supplier_name = Some(supplier_name);
        self
    }

    pub fn with_status(mut self, status: String) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_current_location(mut self, current_location: String) -> Self {
        self.current_location = Some(current_location);
        self
    }

    pub fn with_next_location(mut self, next_location: String) -> Self {
        self.next_location = Some(next_location);
        self
    }

    pub fn with_next_location_eta(mut self, next_location_eta: DateTime<FixedOffset>) -> Self {
        self.next_location_eta = Some(next_location_eta);
        self
    }

    pub fn with_ownership(mut self, ownership: String) -> Self {
        self.ownership = Some(ownership);
        self
    }

    pub fn build(self) -> Result<OrderFulfillment, BuildError> {
        let order_number = self.order_number.ok_or_else(|| {
            BuildError::MissingField("'order_number' field is required".to_string())
        })?;

        let gtin = self
            .gtin
            .ok_or_else(|| BuildError::MissingField("'gtin' field is required".to_string()))?;

        let quantity = self
            .quantity
            .ok_or_else(|| BuildError::MissingField("'quantity' field is required".to_string()))?;

        let supplier_name = self.supplier_name.ok_or_else(|| {
            BuildError::MissingField("'supplier_name' field is required".to_string())
        })?;

        let status = self
            .status
            .ok_or_else(|| BuildError::MissingField("'status' field is required".to_string()))?;

        let current_location = self.current_location.ok_or_else(|| {
            BuildError::MissingField("'current_location' field is required".to_string())
        })?;

        let next_location = self.next_location.ok_or_else(|| {
            BuildError::MissingField("'next_location' field is required".to_string())
        })?;

        let next_location_eta = self.next_location_eta.ok_or_else(|| {
            BuildError::MissingField("'next_location_eta' field is required".to_string())
        })?;

        let ownership = self
            .ownership
            .ok_or_else(|| BuildError::MissingField("'ownership' field is required".to_string()))?;

        Ok(OrderFulfillment {
            order_number,
            gtin,
            quantity,
            supplier_name,
            status,
            current_location,
            next_location,
            next_location_eta,
            ownership,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn make_fulfillment() -> OrderFulfillment {
        OrderFulfillmentBuilder::new()
            .with_order_number("PO100".to_string())
            .with_gtin("GTIN1".to_string())
            .with_quantity(10)
            .with_supplier_name("Acme Farms".to_string())
            .with_status("Packed".to_string())
            .with_current_location("Plant 4".to_string())
            .with_next_location("DC Bentonville".to_string())
            .with_next_location_eta(
                DateTime::parse_from_rfc3339("2021-03-06T17:00:00+02:00")
                    .expect("Unable to parse eta"),
            )
            .with_ownership("Acme".to_string())
            .build()
            .expect("Unable to build fulfillment")
    }

    #[test]
    fn test_field_tags() {
        let bytes = make_fulfillment()
            .into_bytes()
            .expect("Unable to encode fulfillment");
        let value: serde_json::Value =
            serde_json::from_slice(&bytes).expect("Unable to read json");

        assert_eq!(value["order_number"], "PO100");
        assert_eq!(value["supplier_name"], "Acme Farms");
        assert_eq!(value["current_location"], "Plant 4");
        assert_eq!(value["next_location"], "DC Bentonville");
        assert_eq!(value["next_location_eta"], "2021-03-06T17:00:00+02:00");
        assert_eq!(value["ownership"], "Acme");
    }

    #[test]
    fn test_decode_encode_is_byte_identical() {
        let bytes = make_fulfillment()
            .into_bytes()
            .expect("Unable to encode fulfillment");

        let decoded = OrderFulfillment::from_bytes(&bytes).expect("Unable to decode");
        assert_eq!(decoded, make_fulfillment());

        let reencoded = decoded.into_bytes().expect("Unable to encode fulfillment");
        assert_eq!(bytes, reencoded);
    }

    #[test]
    fn test_builder_round_trip() {
        assert_eq!(
            make_fulfillment().into_builder().build(),
            Ok(make_fulfillment())
        );
    }
}
