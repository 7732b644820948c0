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

//! The invocation surface shared by every chaincode.
//!
//! A host runtime turns each submitted transaction into an [`Invocation`] and runs it with
//! [`execute`] against its ledger view. The chaincode sees only an [`InvocationContext`] and
//! answers with a payload or a [`ChaincodeError`]; [`execute`] folds either into a
//! [`Response`] whose status follows HTTP conventions.

mod context;
mod error;
mod query;

use chrono::{DateTime, Utc};

use crate::config::ChaincodeConfig;
use crate::ledger::LedgerStore;

pub use context::InvocationContext;
pub use error::{
    ChaincodeError, STATUS_BAD_REQUEST, STATUS_CONFLICT, STATUS_FORBIDDEN,
    STATUS_INTERNAL_ERROR, STATUS_NOT_FOUND, STATUS_OK, STATUS_UNAUTHENTICATED,
};
pub use query::{QueryGateway, HEALTH_CHECK};

/// One call into a chaincode: a function name, its positional string arguments and the
/// serialized identity of whoever submitted it.
#[derive(Debug, Clone)]
pub struct Invocation {
    function: String,
    args: Vec<String>,
    creator: Vec<u8>,
    tx_id: String,
    timestamp: DateTime<Utc>,
}

impl Invocation {
    /// Creates an invocation stamped with the current time and an empty transaction id.
    pub fn new(function: &str, args: Vec<String>, creator: Vec<u8>) -> Self {
        Self {
            function: function.to_string(),
            args,
            creator,
            tx_id: String::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_tx_id(mut self, tx_id: &str) -> Self {
        self.tx_id = tx_id.to_string();
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn creator(&self) -> &[u8] {
        &self.creator
    }

    pub fn tx_id(&self) -> &str {
        &self.tx_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// The outcome handed back to the host runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    status: u32,
    message: Option<String>,
    payload: Option<Vec<u8>>,
}

impl Response {
    pub fn success(payload: Option<Vec<u8>>) -> Self {
        Self {
            status: STATUS_OK,
            message: None,
            payload,
        }
    }

    pub fn error(err: &ChaincodeError) -> Self {
        Self {
            status: err.status(),
            message: Some(err.to_string()),
            payload: None,
        }
    }

    pub fn status(&self) -> u32 {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn payload(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }
}

impl From<Result<Option<Vec<u8>>, ChaincodeError>> for Response {
    fn from(result: Result<Option<Vec<u8>>, ChaincodeError>) -> Self {
        match result {
            Ok(payload) => Response::success(payload),
            Err(err) => Response::error(&err),
        }
    }
}

pub trait Chaincode {
    /// Name used in log lines, e.g. `walx_purchase_order`.
    fn name(&self) -> &str;

    /// Called once when the chaincode is instantiated. Nothing is written by default.
    fn init(&self, context: &InvocationContext) -> Result<Option<Vec<u8>>, ChaincodeError> {
        debug!("[{}] {} initialized", context.tx_id(), self.name());
        Ok(None)
    }

    /// Routes the invocation to the operation named by its function.
    fn invoke(&self, context: &InvocationContext) -> Result<Option<Vec<u8>>, ChaincodeError>;
}

/// Runs `invocation` through `chaincode` and converts the outcome to a response.
pub fn execute(
    chaincode: &dyn Chaincode,
    invocation: &Invocation,
    store: &dyn LedgerStore,
    config: &ChaincodeConfig,
) -> Response {
    let context = InvocationContext::new(invocation, store, config);
    debug!(
        "[{}] {} invoking {} with {:?}",
        invocation.tx_id(),
        chaincode.name(),
        invocation.function(),
        invocation.args()
    );
    let result = chaincode.invoke(&context);
    log_outcome(chaincode, invocation, &result);
    result.into()
}

/// Runs the instantiation hook of `chaincode`.
pub fn execute_init(
    chaincode: &dyn Chaincode,
    invocation: &Invocation,
    store: &dyn LedgerStore,
    config: &ChaincodeConfig,
) -> Response {
    let context = InvocationContext::new(invocation, store, config);
    let result = chaincode.init(&context);
    log_outcome(chaincode, invocation, &result);
    result.into()
}

fn log_outcome(
    chaincode: &dyn Chaincode,
    invocation: &Invocation,
    result: &Result<Option<Vec<u8>>, ChaincodeError>,
) {
    match result {
        Ok(_) => info!(
            "[{}] {} {} succeeded",
            invocation.tx_id(),
            chaincode.name(),
            invocation.function()
        ),
        Err(err) if err.status() == STATUS_INTERNAL_ERROR => error!(
            "[{}] {} {} failed: {}",
            invocation.tx_id(),
            chaincode.name(),
            invocation.function(),
            err
        ),
        Err(err) => info!(
            "[{}] {} {} rejected: {}",
            invocation.tx_id(),
            chaincode.name(),
            invocation.function(),
            err
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::ChaincodeConfigBuilder;
    use crate::ledger::MemoryLedgerStore;

    struct EchoChaincode;

    impl Chaincode for EchoChaincode {
        fn name(&self) -> &str {
            "echo"
        }

        fn invoke(&self, context: &InvocationContext) -> Result<Option<Vec<u8>>, ChaincodeError> {
            match context.function() {
                "echo" => Ok(Some(context.args().join(" ").into_bytes())),
                name => Err(ChaincodeError::UnknownFunction(name.to_string())),
            }
        }
    }

    #[test]
    fn execute_success_and_failure() {
        let config = ChaincodeConfigBuilder::default()
            .build()
            .expect("Unable to build configuration");
        let store = MemoryLedgerStore::new();

        let response = execute(
            &EchoChaincode,
            &Invocation::new("echo", vec!["a".into(), "b".into()], vec![]),
            &store,
            &config,
        );
        assert!(response.is_success());
        assert_eq!(response.payload(), Some(&b"a b"[..]));
        assert_eq!(response.message(), None);

        let response = execute(
            &EchoChaincode,
            &Invocation::new("shout", vec![], vec![]),
            &store,
            &config,
        );
        assert_eq!(response.status(), STATUS_FORBIDDEN);
        assert_eq!(response.message(), Some("unknown function name: shout"));
        assert_eq!(response.payload(), None);
    }

    #[test]
    fn default_init_writes_nothing() {
        let config = ChaincodeConfigBuilder::default()
            .build()
            .expect("Unable to build configuration");
        let store = MemoryLedgerStore::new();

        let response = execute_init(
            &EchoChaincode,
            &Invocation::new("init", vec![], vec![]),
            &store,
            &config,
        );
        assert!(response.is_success());
        assert!(store.is_empty().expect("Unable to read store"));
    }
}
