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

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::Identity;

/// The parties that take part in the order lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Places purchase orders and confirms their receipt
    Customer,
    /// Accepts purchase orders and advances fulfillments
    Supplier,
    /// The platform operator, creates fulfillments
    Platform,
    /// Auditor with cross-party, composite key lookups
    Banker,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Role::Customer => write!(f, "customer"),
            Role::Supplier => write!(f, "supplier"),
            Role::Platform => write!(f, "platform"),
            Role::Banker => write!(f, "banker"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "supplier" => Ok(Role::Supplier),
            "platform" => Ok(Role::Platform),
            "banker" => Ok(Role::Banker),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// Maps organization tags found in caller certificates to roles.
#[derive(Debug, Clone, PartialEq)]
pub struct OrganizationDirectory {
    roles: BTreeMap<String, Role>,
}

impl OrganizationDirectory {
    /// An empty directory; every organization is unrecognized.
    pub fn empty() -> Self {
        Self {
            roles: BTreeMap::new(),
        }
    }

    pub fn with_organization(mut self, tag: &str, role: Role) -> Self {
        self.roles.insert(tag.to_string(), role);
        self
    }

    pub fn role(&self, tag: &str) -> Option<Role> {
        self.roles.get(tag).copied()
    }

    pub fn organizations(&self) -> impl Iterator<Item = (&str, Role)> {
        self.roles.iter().map(|(tag, role)| (tag.as_str(), *role))
    }
}

impl Default for OrganizationDirectory {
    fn default() -> Self {
        Self::empty()
            .with_organization("customer", Role::Customer)
            .with_organization("wmtx", Role::Supplier)
            .with_organization("supplier", Role::Supplier)
            .with_organization("walx", Role::Platform)
            .with_organization("banker", Role::Banker)
    }
}

/// A resolved identity whose organization has been recognized.
#[derive(Debug, Clone, PartialEq)]
pub struct Caller {
    identity: Identity,
    role: Role,
}

impl Caller {
    pub fn new(identity: Identity, role: Role) -> Self {
        Self { identity, role }
    }

    pub fn principal(&self) -> &str {
        self.identity.principal()
    }

    pub fn organization_tag(&self) -> &str {
        self.identity.organization_tag()
    }

    pub fn role(&self) -> Role {
        self.role
    }
}
