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

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::InternalError;

use super::{LedgerStore, LedgerStoreError};

/// An in-memory ledger; clones share the same state.
#[derive(Clone, Default)]
pub struct MemoryLedgerStore {
    inner: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        MemoryLedgerStore {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Number of keys holding a value.
    pub fn len(&self) -> Result<usize, LedgerStoreError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, LedgerStoreError> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<HashMap<String, Vec<u8>>>, LedgerStoreError> {
        self.inner.lock().map_err(|_| {
            LedgerStoreError::InternalError(InternalError::with_message(
                "Cannot access ledger state: mutex lock poisoned".to_string(),
            ))
        })
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerStoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn put_state(&self, key: &str, value: &[u8]) -> Result<(), LedgerStoreError> {
        self.lock()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn swap_state(
        &self,
        key: &str,
        expected: Option<&[u8]>,
        value: &[u8],
    ) -> Result<(), LedgerStoreError> {
        let mut inner = self.lock()?;
        if inner.get(key).map(Vec::as_slice) != expected {
            return Err(LedgerStoreError::Conflict(key.to_string()));
        }
        inner.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
