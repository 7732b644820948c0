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

use walx_sdk::identity::Role;

pub enum Permission {
    CanPlaceOrder,
    CanAcceptOrder,
    CanReceiveOrder,
    CanTransitionAccepted,
    CanTransitionRejected,
    CanTransitionReceived,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Permission::CanPlaceOrder => write!(f, "can-place-order"),
            Permission::CanAcceptOrder => write!(f, "can-accept-order"),
            Permission::CanReceiveOrder => write!(f, "can-receive-order"),
            Permission::CanTransitionAccepted => write!(f, "can-transition-accepted"),
            Permission::CanTransitionRejected => write!(f, "can-transition-rejected"),
            Permission::CanTransitionReceived => write!(f, "can-transition-received"),
        }
    }
}

impl Permission {
    /// Get the relevant permission for transitioning to a workflow state
    pub fn can_transition(to_status: &str) -> Option<Permission> {
        match to_status {
            "Accepted" => Some(Permission::CanTransitionAccepted),
            "Rejected" => Some(Permission::CanTransitionRejected),
            "Received" => Some(Permission::CanTransitionReceived),
            _ => None,
        }
    }
}

pub const CUSTOMER_ALIAS: &str = "po::customer";
pub const SUPPLIER_ALIAS: &str = "po::supplier";

/// The workflow alias a role acts under, if the role takes part in the order workflow.
pub fn permission_alias(role: Role) -> Option<&'static str> {
    match role {
        Role::Customer => Some(CUSTOMER_ALIAS),
        Role::Supplier => Some(SUPPLIER_ALIAS),
        Role::Platform | Role::Banker => None,
    }
}
