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
    chaincode::{Chaincode, ChaincodeError, InvocationContext, QueryGateway},
    error::InternalError,
    identity::{Caller, Role},
    protocol::fulfillment::OrderFulfillmentBuilder,
};

use crate::payload::{CreateFulfillmentPayload, UpdateFulfillmentPayload};
use crate::permissions::{role_permissions, Permission};
use crate::state::FulfillmentState;

pub const FULFILLMENT_CHAINCODE_NAME: &str = "walx_fulfillment";

/// Roles allowed to read fulfillments by order number.
const FULFILLMENT_READERS: &[Role] = &[Role::Supplier, Role::Customer];

pub struct FulfillmentChaincode {
    name: String,
    query_gateway: QueryGateway,
}

impl Default for FulfillmentChaincode {
    fn default() -> Self {
        Self::new()
    }
}

impl FulfillmentChaincode {
    pub fn new() -> Self {
        Self {
            name: FULFILLMENT_CHAINCODE_NAME.to_string(),
            query_gateway: QueryGateway::new(FULFILLMENT_READERS),
        }
    }
}

impl Chaincode for FulfillmentChaincode {
    fn name(&self) -> &str {
        &self.name
    }

    fn invoke(&self, context: &InvocationContext) -> Result<Option<Vec<u8>>, ChaincodeError> {
        match context.function() {
            "createfulfilment" => create_fulfillment(context).map(|_| None),
            "updatefulfilment" => update_fulfillment(context).map(|_| None),
            "query" => self.query_gateway.query(context),
            name => Err(ChaincodeError::UnknownFunction(name.to_string())),
        }
    }
}

fn create_fulfillment(context: &InvocationContext) -> Result<(), ChaincodeError> {
    let caller = context.caller()?;
    check_permission(&caller, Permission::CanCreateFulfillment)?;

    let payload = CreateFulfillmentPayload::from_args(context.args())?;

    let fulfillment = OrderFulfillmentBuilder::new()
        .with_order_number(payload.order_number().to_string())
        .with_gtin(payload.gtin().to_string())
        .with_quantity(payload.quantity())
        .with_supplier_name(payload.supplier_name().to_string())
        .with_status(payload.status().to_string())
        .with_current_location(payload.current_location().to_string())
        .with_next_location(payload.next_location().to_string())
        .with_next_location_eta(*payload.next_location_eta())
        .with_ownership(payload.ownership().to_string())
        .build()
        .map_err(|err| {
            ChaincodeError::Internal(InternalError::from_source_with_prefix(
                Box::new(err),
                "Cannot build fulfillment".to_string(),
            ))
        })?;

    debug!("[{}] Fulfillment {:?}", context.tx_id(), fulfillment);

    FulfillmentState::new(context.store()).create_fulfillment(fulfillment)?;

    info!(
        "[{}] Fulfillment for order {} created by {}",
        context.tx_id(),
        payload.order_number(),
        caller.principal()
    );

    Ok(())
}

fn update_fulfillment(context: &InvocationContext) -> Result<(), ChaincodeError> {
    let caller = context.caller()?;
    check_permission(&caller, Permission::CanUpdateFulfillment)?;

    let payload = UpdateFulfillmentPayload::from_args(context.args())?;

    let state = FulfillmentState::new(context.store());
    let current = state
        .get_fulfillment(payload.order_number())?
        .ok_or_else(|| {
            ChaincodeError::NotFound(format!(
                "Fulfillment for order {} does not exist",
                payload.order_number()
            ))
        })?;

    let updated = current
        .record()
        .clone()
        .into_builder()
        .with_status(payload.status().to_string())
        .with_current_location(payload.current_location().to_string())
        .with_next_location(payload.next_location().to_string())
        .with_next_location_eta(*payload.next_location_eta())
        .with_ownership(payload.ownership().to_string())
        .build()
        .map_err(|err| {
            ChaincodeError::Internal(InternalError::from_source_with_prefix(
                Box::new(err),
                "Cannot build fulfillment".to_string(),
            ))
        })?;

    state.update_fulfillment(&current, updated)?;

    info!(
        "[{}] Fulfillment for order {} moved from {} to {} by {}",
        context.tx_id(),
        payload.order_number(),
        current.record().status(),
        payload.status(),
        caller.principal()
    );

    Ok(())
}

fn check_permission(caller: &Caller, permission: Permission) -> Result<(), ChaincodeError> {
    if !role_permissions(caller.role()).contains(&permission) {
        return Err(ChaincodeError::Authorization(format!(
            "{} organization {} does not have permission {}",
            caller.role(),
            caller.organization_tag(),
            permission
        )));
    }

    if caller.principal().is_empty() {
        return Err(ChaincodeError::Authorization(format!(
            "caller certificate from {} names no principal",
            caller.organization_tag()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;

    use pretty_assertions::assert_eq;
    use walx_sdk::{
        chaincode::{execute, execute_init, Invocation, Response},
        config::{ChaincodeConfig, ChaincodeConfigBuilder},
        identity::test_support::{creator_for, make_certificate},
        ledger::{LedgerStore, LedgerStoreError, MemoryLedgerStore},
        protocol::{fulfillment::OrderFulfillment, FromBytes},
    };

    const CREATE_ARGS: &[&str] = &[
        "ORD1",
        "GTIN1",
        "40",
        "Acme Farms",
        "Packed",
        "Bentonville",
        "Dallas",
        "2021-02-01T09:00:00-06:00",
        "Acme Farms",
    ];

    const UPDATE_ARGS: &[&str] = &[
        "ORD1",
        "InTransit",
        "Dallas",
        "Houston",
        "2021-02-02T15:30:00-06:00",
        "Carrier Co",
    ];

    fn config() -> ChaincodeConfig {
        ChaincodeConfigBuilder::default()
            .build()
            .expect("Unable to build configuration")
    }

    fn customer() -> Vec<u8> {
        creator_for("alice", "customer.walx.com")
    }

    fn supplier() -> Vec<u8> {
        creator_for("sam", "supplier.walx.com")
    }

    fn platform() -> Vec<u8> {
        creator_for("walt", "walx.com")
    }

    fn banker() -> Vec<u8> {
        creator_for("bob", "banker.walx.com")
    }

    fn invoke(
        store: &dyn LedgerStore,
        function: &str,
        args: &[&str],
        creator: Vec<u8>,
    ) -> Response {
        let invocation = Invocation::new(
            function,
            args.iter().map(|arg| arg.to_string()).collect(),
            creator,
        )
        .with_tx_id("tx-1");
        execute(&FulfillmentChaincode::new(), &invocation, store, &config())
    }

    fn stored_fulfillment(store: &dyn LedgerStore, order_number: &str) -> OrderFulfillment {
        let bytes = store
            .get_state(order_number)
            .expect("Unable to read store")
            .expect("Fulfillment not stored");
        OrderFulfillment::from_bytes(&bytes).expect("Unable to decode fulfillment")
    }

    #[test]
    fn test_create_and_query() {
        let store = MemoryLedgerStore::new();

        let response = invoke(&store, "createfulfilment", CREATE_ARGS, platform());
        assert_eq!(response.status(), 200, "{:?}", response.message());

        let fulfillment = stored_fulfillment(&store, "ORD1");
        assert_eq!(fulfillment.order_number(), "ORD1");
        assert_eq!(fulfillment.gtin(), "GTIN1");
        assert_eq!(fulfillment.quantity(), 40);
        assert_eq!(fulfillment.supplier_name(), "Acme Farms");
        assert_eq!(fulfillment.status(), "Packed");
        assert_eq!(fulfillment.current_location(), "Bentonville");
        assert_eq!(fulfillment.next_location(), "Dallas");
        assert_eq!(
            fulfillment.next_location_eta().to_rfc3339(),
            "2021-02-01T09:00:00-06:00"
        );
        assert_eq!(fulfillment.ownership(), "Acme Farms");

        let stored = store
            .get_state("ORD1")
            .expect("Unable to read store")
            .expect("Fulfillment not stored");
        for creator in vec![supplier(), customer()] {
            let response = invoke(&store, "query", &["ORD1"], creator);
            assert_eq!(response.status(), 200);
            assert_eq!(response.payload(), Some(stored.as_slice()));
        }

        let response = invoke(&store, "query", &["ORD1"], platform());
        assert_eq!(response.status(), 403);
    }

    #[test]
    fn test_create_requires_platform() {
        let store = MemoryLedgerStore::new();

        for creator in vec![customer(), supplier(), banker()] {
            let response = invoke(&store, "createfulfilment", CREATE_ARGS, creator);
            assert_eq!(response.status(), 403);
        }

        let anonymous =
            make_certificate(None, Some("walx.com")).expect("Unable to make certificate");
        let response = invoke(&store, "createfulfilment", CREATE_ARGS, anonymous);
        assert_eq!(response.status(), 403);

        assert!(store.is_empty().expect("Unable to read store"));
    }

    #[test]
    fn test_create_validation() {
        let store = MemoryLedgerStore::new();

        let response = invoke(&store, "createfulfilment", &CREATE_ARGS[..6], platform());
        assert_eq!(response.status(), 400);

        let mut args = CREATE_ARGS.to_vec();
        args[7] = "02/01/2021 9am";
        let response = invoke(&store, "createfulfilment", &args, platform());
        assert_eq!(response.status(), 400);
        let message = response.message().expect("missing message");
        assert!(message.contains("next_location_eta"), "{}", message);

        assert!(store.is_empty().expect("Unable to read store"));
    }

    #[test]
    fn test_health_check_cannot_name_a_fulfillment() {
        let store = MemoryLedgerStore::new();

        let mut args = CREATE_ARGS.to_vec();
        args[0] = "health";
        let response = invoke(&store, "createfulfilment", &args, platform());
        assert_eq!(response.status(), 400);
        let message = response.message().expect("missing message");
        assert!(message.contains("order_number"), "{}", message);

        assert!(store.is_empty().expect("Unable to read store"));
    }

    #[test]
    fn test_create_does_not_overwrite() {
        let store = MemoryLedgerStore::new();

        let response = invoke(&store, "createfulfilment", CREATE_ARGS, platform());
        assert_eq!(response.status(), 200);
        let before = store.get_state("ORD1").expect("Unable to read store");

        let response = invoke(&store, "createfulfilment", CREATE_ARGS, platform());
        assert_eq!(response.status(), 409);
        assert_eq!(store.get_state("ORD1").expect("Unable to read store"), before);
    }

    #[test]
    fn test_update() {
        let store = MemoryLedgerStore::new();
        invoke(&store, "createfulfilment", CREATE_ARGS, platform());
        let created = stored_fulfillment(&store, "ORD1");

        let response = invoke(&store, "updatefulfilment", UPDATE_ARGS, supplier());
        assert_eq!(response.status(), 200, "{:?}", response.message());

        let updated = stored_fulfillment(&store, "ORD1");
        assert_eq!(updated.order_number(), created.order_number());
        assert_eq!(updated.gtin(), created.gtin());
        assert_eq!(updated.quantity(), created.quantity());
        assert_eq!(updated.supplier_name(), created.supplier_name());
        assert_eq!(updated.status(), "InTransit");
        assert_eq!(updated.current_location(), "Dallas");
        assert_eq!(updated.next_location(), "Houston");
        assert_eq!(
            updated.next_location_eta().to_rfc3339(),
            "2021-02-02T15:30:00-06:00"
        );
        assert_eq!(updated.ownership(), "Carrier Co");
    }

    #[test]
    fn test_update_requires_supplier() {
        let store = MemoryLedgerStore::new();
        invoke(&store, "createfulfilment", CREATE_ARGS, platform());
        let before = store.get_state("ORD1").expect("Unable to read store");

        for creator in vec![platform(), customer(), banker()] {
            let response = invoke(&store, "updatefulfilment", UPDATE_ARGS, creator);
            assert_eq!(response.status(), 403);
        }

        assert_eq!(store.get_state("ORD1").expect("Unable to read store"), before);
    }

    #[test]
    fn test_update_missing_or_malformed() {
        let store = MemoryLedgerStore::new();

        let response = invoke(&store, "updatefulfilment", UPDATE_ARGS, supplier());
        assert_eq!(response.status(), 404);

        let response = invoke(&store, "updatefulfilment", &UPDATE_ARGS[..5], supplier());
        assert_eq!(response.status(), 400);

        assert!(store.is_empty().expect("Unable to read store"));
    }

    #[test]
    fn test_banker_query() {
        let store = MemoryLedgerStore::new();
        store
            .put_state("ACME@ORD1", b"{\"audit\":true}")
            .expect("Unable to seed store");

        let response = invoke(&store, "query", &["ACME", "ORD1"], banker());
        assert_eq!(response.status(), 200);
        assert_eq!(response.payload(), Some(&b"{\"audit\":true}"[..]));

        let response = invoke(&store, "query", &["ACME", "ORD1"], supplier());
        assert_eq!(response.status(), 400);

        let response = invoke(&store, "query", &["health"], vec![]);
        assert_eq!(response.status(), 200);
    }

    #[test]
    fn test_malformed_certificate() {
        let store = MemoryLedgerStore::new();

        let response = invoke(&store, "createfulfilment", CREATE_ARGS, b"no pem here".to_vec());
        assert_eq!(response.status(), 401);

        let response = invoke(&store, "updatefulfilment", UPDATE_ARGS, b"-----".to_vec());
        assert_eq!(response.status(), 401);

        assert!(store.is_empty().expect("Unable to read store"));
    }

    #[test]
    fn test_init_and_unknown_function() {
        let store = MemoryLedgerStore::new();

        let invocation = Invocation::new("init", vec![], vec![]);
        let response = execute_init(&FulfillmentChaincode::new(), &invocation, &store, &config());
        assert!(response.is_success());
        assert!(store.is_empty().expect("Unable to read store"));

        let response = invoke(&store, "updatefulfillment", UPDATE_ARGS, supplier());
        assert_eq!(response.status(), 403);
        assert_eq!(
            response.message(),
            Some("unknown function name: updatefulfillment")
        );
    }

    /// Overwrites a record right after it is first read, as a competing transaction would.
    struct RacingStore {
        inner: MemoryLedgerStore,
        raced: Cell<bool>,
    }

    impl LedgerStore for RacingStore {
        fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerStoreError> {
            let value = self.inner.get_state(key)?;
            if value.is_some() && !self.raced.get() {
                self.raced.set(true);
                self.inner.put_state(key, b"concurrent")?;
            }
            Ok(value)
        }

        fn put_state(&self, key: &str, value: &[u8]) -> Result<(), LedgerStoreError> {
            self.inner.put_state(key, value)
        }

        fn swap_state(
            &self,
            key: &str,
            expected: Option<&[u8]>,
            value: &[u8],
        ) -> Result<(), LedgerStoreError> {
            self.inner.swap_state(key, expected, value)
        }
    }

    #[test]
    fn test_concurrent_update_is_a_conflict() {
        let inner = MemoryLedgerStore::new();
        let response = invoke(&inner, "createfulfilment", CREATE_ARGS, platform());
        assert_eq!(response.status(), 200);

        let store = RacingStore {
            inner: inner.clone(),
            raced: Cell::new(false),
        };

        let response = invoke(&store, "updatefulfilment", UPDATE_ARGS, supplier());
        assert_eq!(response.status(), 409);
        assert_eq!(
            inner.get_state("ORD1").expect("Unable to read store"),
            Some(b"concurrent".to_vec())
        );
    }
}
