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
    protocol::purchase_order::PurchaseOrderBuilder,
    workflow::{StatusMode, Workflow, WorkflowState},
};

use crate::payload::{PlaceOrderPayload, StatusUpdatePayload};
use crate::permissions::{permission_alias, Permission};
use crate::state::PurchaseOrderState;
use crate::workflow::{order_workflow, OrderStatus};

pub const PURCHASE_ORDER_CHAINCODE_NAME: &str = "walx_purchase_order";

/// Roles allowed to read purchase orders by po number.
const PURCHASE_ORDER_READERS: &[Role] = &[Role::Platform, Role::Customer];

pub struct PurchaseOrderChaincode {
    name: String,
    workflow: Workflow,
    query_gateway: QueryGateway,
}

impl Default for PurchaseOrderChaincode {
    fn default() -> Self {
        Self::new()
    }
}

impl PurchaseOrderChaincode {
    pub fn new() -> Self {
        Self {
            name: PURCHASE_ORDER_CHAINCODE_NAME.to_string(),
            workflow: order_workflow(),
            query_gateway: QueryGateway::new(PURCHASE_ORDER_READERS),
        }
    }

    fn place_order(&self, context: &InvocationContext) -> Result<(), ChaincodeError> {
        let caller = context.require_role(&[Role::Customer], "place orders")?;
        let payload = PlaceOrderPayload::from_args(context.args())?;

        let create_state = self.workflow_state(self.workflow.starting_state())?;
        check_permission_with_workflow(
            &caller,
            &Permission::CanPlaceOrder.to_string(),
            create_state,
            &OrderStatus::Applied.to_string(),
        )?;

        let builder = PurchaseOrderBuilder::new()
            .with_po_number(payload.po_number().to_string())
            .with_po_date(context.local_timestamp())
            .with_gtin(payload.gtin().to_string())
            .with_quantity(payload.quantity())
            .with_quality(payload.quality())
            .with_time_factor(payload.time_factor())
            .with_sustainability(payload.sustainability())
            .with_status(OrderStatus::Applied.to_string());
        let builder = match payload.cost() {
            Some(cost) => builder.with_cost(cost),
            None => builder,
        };
        let purchase_order = builder.build().map_err(|err| {
            ChaincodeError::Internal(InternalError::from_source_with_prefix(
                Box::new(err),
                "Cannot build purchase order".to_string(),
            ))
        })?;

        debug!("[{}] Purchase order {:?}", context.tx_id(), purchase_order);

        PurchaseOrderState::new(context.store()).create_purchase_order(purchase_order)?;

        info!(
            "[{}] Purchase order {} placed by {}",
            context.tx_id(),
            payload.po_number(),
            caller.principal()
        );

        Ok(())
    }

    fn accept_order(&self, context: &InvocationContext) -> Result<(), ChaincodeError> {
        self.update_status(
            context,
            Role::Supplier,
            Permission::CanAcceptOrder,
            "accept orders",
        )
    }

    fn received_order(&self, context: &InvocationContext) -> Result<(), ChaincodeError> {
        self.update_status(
            context,
            Role::Customer,
            Permission::CanReceiveOrder,
            "receive orders",
        )
    }

    fn update_status(
        &self,
        context: &InvocationContext,
        role: Role,
        permission: Permission,
        action: &str,
    ) -> Result<(), ChaincodeError> {
        let caller = context.require_role(&[role], action)?;
        let payload = StatusUpdatePayload::from_args(context.args())?;

        let state = PurchaseOrderState::new(context.store());
        let current = state
            .get_purchase_order(payload.po_number())?
            .ok_or_else(|| {
                ChaincodeError::NotFound(format!(
                    "Purchase order {} does not exist",
                    payload.po_number()
                ))
            })?;

        if context.config().status_mode() == StatusMode::Strict {
            let new_status = payload
                .status()
                .parse::<OrderStatus>()
                .map_err(|msg| ChaincodeError::invalid_argument("status", &msg))?;
            let workflow_state = self.workflow_state(current.record().status())?;
            check_permission_with_workflow(
                &caller,
                &permission.to_string(),
                workflow_state,
                &new_status.to_string(),
            )?;
        }

        let updated = current.record().clone().with_status(payload.status());
        state.update_purchase_order(&current, updated)?;

        info!(
            "[{}] Purchase order {} moved from {} to {} by {}",
            context.tx_id(),
            payload.po_number(),
            current.record().status(),
            payload.status(),
            caller.principal()
        );

        Ok(())
    }

    fn workflow_state(&self, name: &str) -> Result<&WorkflowState, ChaincodeError> {
        self.workflow.state(name).ok_or_else(|| {
            ChaincodeError::Conflict(format!(
                "Purchase order status {} is not part of the order workflow",
                name
            ))
        })
    }
}

impl Chaincode for PurchaseOrderChaincode {
    fn name(&self) -> &str {
        &self.name
    }

    fn invoke(&self, context: &InvocationContext) -> Result<Option<Vec<u8>>, ChaincodeError> {
        match context.function() {
            "placeorder" => self.place_order(context).map(|_| None),
            "acceptorder" => self.accept_order(context).map(|_| None),
            "receivedorder" => self.received_order(context).map(|_| None),
            "query" => self.query_gateway.query(context),
            name => Err(ChaincodeError::UnknownFunction(name.to_string())),
        }
    }
}

/// Checks that the caller's workflow alias holds `permission` in `workflow_state` and may move
/// the order to `desired_state`.
fn check_permission_with_workflow(
    caller: &Caller,
    permission: &str,
    workflow_state: &WorkflowState,
    desired_state: &str,
) -> Result<(), ChaincodeError> {
    let alias = permission_alias(caller.role()).ok_or_else(|| {
        ChaincodeError::Authorization(format!(
            "{} organization {} takes no part in the order workflow",
            caller.role(),
            caller.organization_tag()
        ))
    })?;

    let permissions = workflow_state.expand_permissions(&[alias.to_string()]);

    if !permissions.contains(&permission.to_string()) {
        return Err(ChaincodeError::Conflict(format!(
            "{} does not have permission {} while the order is {}",
            caller.principal(),
            permission,
            workflow_state.name()
        )));
    }

    if let Some(transition) = Permission::can_transition(desired_state) {
        if !permissions.contains(&transition.to_string()) {
            return Err(ChaincodeError::Conflict(format!(
                "{} does not have permission {} while the order is {}",
                caller.principal(),
                transition,
                workflow_state.name()
            )));
        }
    }

    if !workflow_state.can_transition(desired_state, alias) {
        return Err(ChaincodeError::Conflict(format!(
            "Cannot transition order from {} to {}",
            workflow_state.name(),
            desired_state
        )));
    }

    Ok(())
}
