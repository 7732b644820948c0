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
    addressing::compute_purchase_order_key,
    chaincode::ChaincodeError,
    error::InternalError,
    ledger::{LedgerStore, VersionedRecord},
    protocol::{purchase_order::PurchaseOrder, FromBytes, IntoBytes},
};

pub struct PurchaseOrderState<'a> {
    store: &'a dyn LedgerStore,
}

impl<'a> PurchaseOrderState<'a> {
    pub fn new(store: &'a dyn LedgerStore) -> Self {
        Self { store }
    }

    pub fn get_purchase_order(
        &self,
        po_number: &str,
    ) -> Result<Option<VersionedRecord<PurchaseOrder>>, ChaincodeError> {
        let key = compute_purchase_order_key(po_number)?;
        if let Some(packed) = self.store.get_state(&key)? {
            let purchase_order = PurchaseOrder::from_bytes(&packed).map_err(|err| {
                ChaincodeError::Internal(InternalError::with_message(format!(
                    "Cannot deserialize purchase order {}: {}",
                    po_number, err
                )))
            })?;
            Ok(Some(VersionedRecord::new(purchase_order, packed)))
        } else {
            Ok(None)
        }
    }

    /// Writes a new purchase order, failing if its key is already occupied.
    pub fn create_purchase_order(
        &self,
        purchase_order: PurchaseOrder,
    ) -> Result<(), ChaincodeError> {
        let key = compute_purchase_order_key(purchase_order.po_number())?;
        if self.store.get_state(&key)?.is_some() {
            return Err(ChaincodeError::AlreadyExists(format!(
                "Purchase order {} already exists",
                purchase_order.po_number()
            )));
        }

        let serialized = serialize(purchase_order)?;
        self.store.swap_state(&key, None, &serialized)?;
        Ok(())
    }

    /// Replaces `current` with `updated`, failing if the stored bytes changed since `current`
    /// was read.
    pub fn update_purchase_order(
        &self,
        current: &VersionedRecord<PurchaseOrder>,
        updated: PurchaseOrder,
    ) -> Result<(), ChaincodeError> {
        let key = compute_purchase_order_key(updated.po_number())?;
        let serialized = serialize(updated)?;
        self.store
            .swap_state(&key, Some(current.bytes()), &serialized)?;
        Ok(())
    }
}

fn serialize(purchase_order: PurchaseOrder) -> Result<Vec<u8>, ChaincodeError> {
    let po_number = purchase_order.po_number().to_string();
    purchase_order.into_bytes().map_err(|err| {
        ChaincodeError::Internal(InternalError::with_message(format!(
            "Cannot serialize purchase order {}: {}",
            po_number, err
        )))
    })
}
