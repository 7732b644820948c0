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

use std::fmt;
use std::str::FromStr;

use walx_sdk::workflow::{PermissionAlias, Workflow, WorkflowStateBuilder};

use crate::permissions::{Permission, CUSTOMER_ALIAS, SUPPLIER_ALIAS};

/// Pseudo state a purchase order is in before it is placed.
pub const CREATE_STATE: &str = "create";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderStatus {
    Applied,
    Accepted,
    Rejected,
    Received,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            OrderStatus::Applied => write!(f, "Applied"),
            OrderStatus::Accepted => write!(f, "Accepted"),
            OrderStatus::Rejected => write!(f, "Rejected"),
            OrderStatus::Received => write!(f, "Received"),
        }
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Applied" => Ok(OrderStatus::Applied),
            "Accepted" => Ok(OrderStatus::Accepted),
            "Rejected" => Ok(OrderStatus::Rejected),
            "Received" => Ok(OrderStatus::Received),
            _ => Err(format!(
                "unknown order status '{}', expected one of Applied, Accepted, Rejected, Received",
                s
            )),
        }
    }
}

pub fn order_workflow() -> Workflow {
    let create = {
        let mut customer = PermissionAlias::new(CUSTOMER_ALIAS);
        customer.add_permission(&Permission::CanPlaceOrder.to_string());
        customer.add_transition(&OrderStatus::Applied.to_string());

        let supplier = PermissionAlias::new(SUPPLIER_ALIAS);

        WorkflowStateBuilder::new(CREATE_STATE)
            .add_transition(&OrderStatus::Applied.to_string())
            .add_permission_alias(customer)
            .add_permission_alias(supplier)
            .build()
    };

    let applied = {
        let customer = PermissionAlias::new(CUSTOMER_ALIAS);

        let mut supplier = PermissionAlias::new(SUPPLIER_ALIAS);
        supplier.add_permission(&Permission::CanAcceptOrder.to_string());
        supplier.add_permission(&Permission::CanTransitionAccepted.to_string());
        supplier.add_permission(&Permission::CanTransitionRejected.to_string());
        supplier.add_transition(&OrderStatus::Accepted.to_string());
        supplier.add_transition(&OrderStatus::Rejected.to_string());

        WorkflowStateBuilder::new(&OrderStatus::Applied.to_string())
            .add_transition(&OrderStatus::Accepted.to_string())
            .add_transition(&OrderStatus::Rejected.to_string())
            .add_permission_alias(customer)
            .add_permission_alias(supplier)
            .build()
    };

    let accepted = {
        let mut customer = PermissionAlias::new(CUSTOMER_ALIAS);
        customer.add_permission(&Permission::CanReceiveOrder.to_string());
        customer.add_permission(&Permission::CanTransitionReceived.to_string());
        customer.add_transition(&OrderStatus::Received.to_string());

        let supplier = PermissionAlias::new(SUPPLIER_ALIAS);

        WorkflowStateBuilder::new(&OrderStatus::Accepted.to_string())
            .add_transition(&OrderStatus::Received.to_string())
            .add_permission_alias(customer)
            .add_permission_alias(supplier)
            .build()
    };

    let rejected = WorkflowStateBuilder::new(&OrderStatus::Rejected.to_string())
        .add_permission_alias(PermissionAlias::new(CUSTOMER_ALIAS))
        .add_permission_alias(PermissionAlias::new(SUPPLIER_ALIAS))
        .build();

    let received = WorkflowStateBuilder::new(&OrderStatus::Received.to_string())
        .add_permission_alias(PermissionAlias::new(CUSTOMER_ALIAS))
        .add_permission_alias(PermissionAlias::new(SUPPLIER_ALIAS))
        .build();

    Workflow::new(
        vec![create, applied, accepted, rejected, received],
        CREATE_STATE,
    )
}
