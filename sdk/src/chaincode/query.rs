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

pub use crate::addressing::HEALTH_CHECK;

use crate::addressing::{compute_composite_key, validate_identifier};
use crate::identity::Role;

use super::{ChaincodeError, InvocationContext};

/// Read access to a chaincode's records.
///
/// Roles listed as readers fetch a record by its single key. A banker instead names two key
/// components and reads the record stored under the composite key `first@second`; single keys
/// never contain `@`, so composite records stay out of reach of plain readers.
pub struct QueryGateway {
    readers: Vec<Role>,
}

impl QueryGateway {
    pub fn new(readers: &[Role]) -> Self {
        Self {
            readers: readers.to_vec(),
        }
    }

    pub fn query(&self, context: &InvocationContext) -> Result<Option<Vec<u8>>, ChaincodeError> {
        let args = context.args();

        if args.len() == 1 && args[0] == HEALTH_CHECK {
            info!("[{}] Health status Ok", context.tx_id());
            return Ok(None);
        }

        if args.is_empty() {
            return Err(ChaincodeError::arity("at least 1", 0));
        }

        let caller = context.caller()?;
        if caller.principal().is_empty() {
            return Err(ChaincodeError::Authorization(format!(
                "caller certificate from {} names no principal",
                caller.organization_tag()
            )));
        }

        let key = if caller.role() == Role::Banker {
            if args.len() != 2 {
                return Err(ChaincodeError::arity("2", args.len()));
            }
            compute_composite_key(&args[0], &args[1])?
        } else if self.readers.contains(&caller.role()) {
            if args.len() != 1 {
                return Err(ChaincodeError::arity("1", args.len()));
            }
            validate_identifier("key", &args[0])?;
            args[0].clone()
        } else {
            return Err(ChaincodeError::Authorization(format!(
                "{} organization {} cannot query",
                caller.role(),
                caller.organization_tag()
            )));
        };

        debug!("[{}] {} queried {}", context.tx_id(), caller.principal(), key);

        Ok(context.store().get_state(&key)?)
    }
}
