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

use walx_sdk::{
    addressing::compute_fulfillment_key,
    chaincode::ChaincodeError,
    error::InternalError,
    ledger::{LedgerStore, VersionedRecord},
    protocol::{fulfillment::OrderFulfillment, FromBytes, IntoBytes},
};

pub struct FulfillmentState<'a> {
    store: &'a dyn LedgerStore,
}

impl<'a> FulfillmentState<'a> {
    pub fn new(store: &'a dyn LedgerStore) -> Self {
        Self { store }
    }

    pub fn get_fulfillment(
        &self,
        order_number: &str,
    ) -> Result<Option<VersionedRecord<OrderFulfillment>>, ChaincodeError> {
        let key = compute_fulfillment_key(order_number)?;
        match self.store.get_state(&key)? {
            Some(packed) => {
                let fulfillment = OrderFulfillment::from_bytes(&packed).map_err(|err| {
                    ChaincodeError::Internal(InternalError::with_message(format!(
                        "Cannot deserialize fulfillment {}: {}",
                        order_number, err
                    )))
                })?;
                Ok(Some(VersionedRecord::new(fulfillment, packed)))
            }
            None => Ok(None),
        }
    }

    /// Writes a new fulfillment, failing if its key is already occupied.
    pub fn create_fulfillment(&self, fulfillment: OrderFulfillment) -> Result<(), ChaincodeError> {
        let key = compute_fulfillment_key(fulfillment.order_number())?;
        if self.store.get_state(&key)?.is_some() {
            return Err(ChaincodeError::AlreadyExists(format!(
                "Fulfillment for order {} already exists",
                fulfillment.order_number()
            )));
        }

        let serialized = serialize(fulfillment)?;
        self.store.swap_state(&key, None, &serialized)?;
        Ok(())
    }

    pub fn update_fulfillment(
        &self,
        current: &VersionedRecord<OrderFulfillment>,
        updated: OrderFulfillment,
    ) -> Result<(), ChaincodeError> {
        let key = compute_fulfillment_key(updated.order_number())?;
        let serialized = serialize(updated)?;
        self.store
            .swap_state(&key, Some(current.bytes()), &serialized)?;
        Ok(())
    }
}

fn serialize(fulfillment: OrderFulfillment) -> Result<Vec<u8>, ChaincodeError> {
    let order_number = fulfillment.order_number().to_string();
    fulfillment.into_bytes().map_err(|err| {
        ChaincodeError::Internal(InternalError::with_message(format!(
            "Cannot serialize fulfillment {}: {}",
            order_number, err
        )))
    })
}
