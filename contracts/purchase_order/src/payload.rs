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

use walx_sdk::addressing::validate_record_key;
use walx_sdk::chaincode::ChaincodeError;

/// Arguments of `placeorder`: po number, gtin, quantity, quality, time factor, sustainability
/// and an optional cost.
#[derive(Debug, PartialEq)]
pub struct PlaceOrderPayload {
    po_number: String,
    gtin: String,
    quantity: i64,
    quality: i64,
    time_factor: i64,
    sustainability: i64,
    cost: Option<i64>,
}

impl PlaceOrderPayload {
    pub fn from_args(args: &[String]) -> Result<Self, ChaincodeError> {
        if args.len() != 6 && args.len() != 7 {
            return Err(ChaincodeError::arity("6 or 7", args.len()));
        }

        validate_record_key("po_number", &args[0])?;

        if args[1].is_empty() {
            return Err(ChaincodeError::invalid_argument(
                "gtin",
                "`gtin` is required to place an order",
            ));
        }

        Ok(Self {
            po_number: args[0].clone(),
            gtin: args[1].clone(),
            quantity: parse_integer("quantity", &args[2])?,
            quality: parse_integer("quality", &args[3])?,
            time_factor: parse_integer("time", &args[4])?,
            sustainability: parse_integer("sustainability", &args[5])?,
            cost: match args.get(6) {
                Some(cost) => Some(parse_integer("cost", cost)?),
                None => None,
            },
        })
    }

    pub fn po_number(&self) -> &str {
        &self.po_number
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
}

/// Arguments of `acceptorder` and `receivedorder`: po number and the new status.
#[derive(Debug, PartialEq)]
pub struct StatusUpdatePayload {
    po_number: String,
    status: String,
}

impl StatusUpdatePayload {
    pub fn from_args(args: &[String]) -> Result<Self, ChaincodeError> {
        if args.len() != 2 {
            return Err(ChaincodeError::arity("2", args.len()));
        }

        validate_record_key("po_number", &args[0])?;

        if args[1].is_empty() {
            return Err(ChaincodeError::invalid_argument(
                "status",
                "`status` is required to update an order",
            ));
        }

        Ok(Self {
            po_number: args[0].clone(),
            status: args[1].clone(),
        })
    }

    pub fn po_number(&self) -> &str {
        &self.po_number
    }

    pub fn status(&self) -> &str {
        &self.status
    }
}

fn parse_integer(field: &str, value: &str) -> Result<i64, ChaincodeError> {
    value.parse::<i64>().map_err(|err| {
        ChaincodeError::invalid_argument(
            field,
            &format!("`{}` must be an integer, found '{}': {}", field, value, err),
        )
    })
}
