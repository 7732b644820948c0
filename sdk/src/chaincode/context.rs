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

use chrono::{DateTime, FixedOffset, Offset};

use crate::config::ChaincodeConfig;
use crate::identity::{resolve_identity, Caller, Role};
use crate::ledger::LedgerStore;

use super::{ChaincodeError, Invocation};

/// Everything an operation may look at while it runs: the invocation, the ledger view and the
/// chaincode configuration.
pub struct InvocationContext<'a> {
    invocation: &'a Invocation,
    store: &'a dyn LedgerStore,
    config: &'a ChaincodeConfig,
}

impl<'a> InvocationContext<'a> {
    pub fn new(
        invocation: &'a Invocation,
        store: &'a dyn LedgerStore,
        config: &'a ChaincodeConfig,
    ) -> Self {
        Self {
            invocation,
            store,
            config,
        }
    }

    pub fn function(&self) -> &str {
        self.invocation.function()
    }

    pub fn args(&self) -> &[String] {
        self.invocation.args()
    }

    pub fn tx_id(&self) -> &str {
        self.invocation.tx_id()
    }

    pub fn store(&self) -> &dyn LedgerStore {
        self.store
    }

    pub fn config(&self) -> &ChaincodeConfig {
        self.config
    }

    /// Resolves the creator of the invocation and looks its organization tag up in the
    /// configured directory.
    pub fn caller(&self) -> Result<Caller, ChaincodeError> {
        let identity = resolve_identity(self.invocation.creator())?;
        let role = self
            .config
            .organizations()
            .role(identity.organization_tag())
            .ok_or_else(|| {
                ChaincodeError::Authorization(format!(
                    "organization {} is not recognized",
                    identity.organization_tag()
                ))
            })?;

        debug!(
            "[{}] caller {} ({}) acting as {}",
            self.tx_id(),
            identity.principal(),
            identity.organization(),
            role
        );

        Ok(Caller::new(identity, role))
    }

    /// Resolves the caller and requires it to hold one of `roles` and name a principal.
    pub fn require_role(&self, roles: &[Role], action: &str) -> Result<Caller, ChaincodeError> {
        let caller = self.caller()?;

        if !roles.contains(&caller.role()) {
            return Err(ChaincodeError::Authorization(format!(
                "{} organization {} cannot {}",
                caller.role(),
                caller.organization_tag(),
                action
            )));
        }

        if caller.principal().is_empty() {
            return Err(ChaincodeError::Authorization(format!(
                "caller certificate from {} names no principal",
                caller.organization_tag()
            )));
        }

        Ok(caller)
    }

    /// The invocation timestamp expressed in the configured time zone.
    pub fn local_timestamp(&self) -> DateTime<FixedOffset> {
        let local = self
            .invocation
            .timestamp()
            .with_timezone(&self.config.time_zone());
        let offset = local.offset().fix();
        local.with_timezone(&offset)
    }
}
