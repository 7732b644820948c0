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

//! Protocol structs for Purchase Order state

use chrono::{DateTime, FixedOffset};

use super::{BuildError, FromBytes, IntoBytes, ProtocolError};

/// Native representation of a purchase order.
///
/// Everything except `status` is fixed when the order is placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    po_number: String,
    po_date: DateTime<FixedOffset>,
    gtin: String,
    quantity: i64,
    quality: i64,
    #[serde(rename = "time")]
    time_factor: i64,
    sustainability: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cost: Option<i64>,
    status: String,
}

impl PurchaseOrder {
    pub fn po_number(&self) -> &str {
        &self.po_number
    }

    pub fn po_date(&self) -> &DateTime<FixedOffset> {
        &self.po_date
    }

    pub fn gtin(&self) -> &str {
        &self.gtin
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn quality(&self) -> i64 {
        self.quality
    }

    pub fn time_factor(&self) -> i64 {
        self.time_factor
    }

    pub fn sustainability(&self) -> i64 {
        self.sustainability
    }

    pub fn cost(&self) -> Option<i64> {
        self.cost
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns a copy of this order carrying `status`; no other field can be changed.
    pub fn with_status(self, status: &str) -> Self {
        PurchaseOrder {
            status: status.to_string(),
            ..self
        }
    }

    pub fn into_builder(self) -> PurchaseOrderBuilder {
        let builder = PurchaseOrderBuilder::new()
            .with_po_number(self.po_number)
            .with_po_date(self.po_date)
            .with_gtin(self.gtin)
            .with_quantity(self.quantity)
            .with_quality(self.quality)
            .with_time_factor(self.time_factor)
            .with_sustainability(self.sustainability)
            .with_status(self.status);

        match self.cost {
            Some(cost) => builder.with_cost(cost),
            None => builder,
        }
    }
}

impl FromBytes<PurchaseOrder> for PurchaseOrder {
    fn from_bytes(bytes: &[u8]) -> Result<PurchaseOrder, ProtocolError> {
        serde_json::from_slice(bytes).map_err(|err| {
            ProtocolError::DeserializationError(format!(
                "Unable to get PurchaseOrder from bytes: {}",
                err
            ))
        })
    }
}

impl IntoBytes for PurchaseOrder {
    fn into_bytes(self) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(&self).map_err(|err| {
            ProtocolError::SerializationError(format!(
                "Unable to get bytes from PurchaseOrder: {}",
                err
            ))
        })
    }
}

/// Builder used to create a `PurchaseOrder`
#[derive(Default, Clone, PartialEq)]
pub struct PurchaseOrderBuilder {
    po_number: Option<String>,
    po_date: Option<DateTime<FixedOffset>>,
    gtin: Option<String>,
    quantity: Option<i64>,
    quality: Option<i64>,
    time_factor: Option<i64>,
    sustainability: Option<i64>,
    cost: Option<i64>,
    status: Option<String>,
}

impl PurchaseOrderBuilder {
    pub fn new() -> Self {
        PurchaseOrderBuilder::default()
    }

    pub fn with_po_number(mut self, po_number: String) -> Self {
        self.po_number = Some(po_number);
        self
    }

    pub fn with_po_date(mut self, po_date: DateTime<FixedOffset>) -> Self {
        self.po_date = Some(po_date);
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

    pub fn with_quality(mut self, quality: i64) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn with_time_factor(mut self, time_factor: i64) -> Self {
        self.time_factor = Some(time_factor);
        self
    }

    pub fn with_sustainability(mut self, sustainability: i64) -> Self {
        self.sustainability = Some(sustainability);
        self
    }

    pub fn with_cost(mut self, cost: i64) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn with_status(mut self, status: String) -> Self {
        self.status = Some(status);
        self
    }

    pub fn build(self) -> Result<PurchaseOrder, BuildError> {
        let po_number = self
            .po_number
            .ok_or_else(|| BuildError::MissingField("'po_number' field is required".to_string()))?;

        let po_date = self
            .po_date
            .ok_or_else(|| BuildError::MissingField("'po_date' field is required".to_string()))?;

        let gtin = self
            .gtin
            .ok_or_else(|| BuildError::MissingField("'gtin' field is required".to_string()))?;

        let quantity = self
            .quantity
            .ok_or_else(|| BuildError::MissingField("'quantity' field is required".to_string()))?;

        let quality = self
            .quality
            .ok_or_else(|| BuildError::MissingField("'quality' field is required".to_string()))?;

        let time_factor = self.time_factor.ok_or_else(|| {
            BuildError::MissingField("'time_factor' field is required".to_string())
        })?;

        let sustainability = self.sustainability.ok_or_else(|| {
            BuildError::MissingField("'sustainability' field is required".to_string())
        })?;

        let status = self
            .status
            .ok_or_else(|| BuildError::MissingField("'status' field is required".to_string()))?;

        Ok(PurchaseOrder {
            po_number,
            po_date,
            gtin,
            quantity,
            quality,
            time_factor,
            sustainability,
            cost: self.cost,
            status,
        })
    }
}
