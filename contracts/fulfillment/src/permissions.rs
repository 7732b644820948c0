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

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Permission {
    CanCreateFulfillment,
    CanUpdateFulfillment,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Permission::CanCreateFulfillment => write!(f, "can-create-fulfillment"),
            Permission::CanUpdateFulfillment => write!(f, "can-update-fulfillment"),
        }
    }
}

/// Permissions granted to each organization role by the fulfillment chaincode.
pub fn role_permissions(role: Role) -> &'static [Permission] {
    match role {
        Role::Platform => &[Permission::CanCreateFulfillment],
        Role::Supplier => &[Permission::CanUpdateFulfillment],
        Role::Customer | Role::Banker => &[],
    }
}
