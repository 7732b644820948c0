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

//! Access to the replicated, key-addressed ledger.
//!
//! The ledger itself (consensus, replication and durability) belongs to the host runtime. A
//! chaincode only sees a key-value view with read-your-writes consistency inside one
//! invocation. Every read-modify-write goes through [`LedgerStore::swap_state`] with the bytes
//! that were read, so a record changed by a concurrent invocation surfaces as
//! [`LedgerStoreError::Conflict`] instead of being overwritten.

mod file;
mod memory;

use std::error::Error;
use std::fmt;

use crate::error::InternalError;

pub use file::FileLedgerStore;
pub use memory::MemoryLedgerStore;

pub trait LedgerStore {
    /// Returns the bytes stored at `key`, or `None` if nothing is stored there.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerStoreError>;

    /// Stores `value` at `key` unconditionally.
    fn put_state(&self, key: &str, value: &[u8]) -> Result<(), LedgerStoreError>;

    /// Stores `value` at `key` only if the current value equals `expected`; `None` means the
    /// key must be vacant.
    ///
    /// The default implementation reads and then writes; stores that can perform the check and
    /// the write atomically should override it.
    fn swap_state(
        &self,
        key: &str,
        expected: Option<&[u8]>,
        value: &[u8],
    ) -> Result<(), LedgerStoreError> {
        let current = self.get_state(key)?;
        if current.as_deref() != expected {
            return Err(LedgerStoreError::Conflict(key.to_string()));
        }
        self.put_state(key, value)
    }
}

#[derive(Debug)]
pub enum LedgerStoreError {
    /// The value at the key changed between the read and the write
    Conflict(String),
    /// The underlying store failed
    InternalError(InternalError),
}

impl Error for LedgerStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LedgerStoreError::Conflict(_) => None,
            LedgerStoreError::InternalError(err) => Some(err),
        }
    }
}

impl fmt::Display for LedgerStoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LedgerStoreError::Conflict(key) => {
                write!(f, "Concurrent modification of ledger key {}", key)
            }
            LedgerStoreError::InternalError(err) => write!(f, "{}", err),
        }
    }
}

impl From<InternalError> for LedgerStoreError {
    fn from(err: InternalError) -> Self {
        LedgerStoreError::InternalError(err)
    }
}

/// A record decoded from the ledger, kept with the exact bytes it was read from so the
/// subsequent write can be conditioned on them.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionedRecord<T> {
    record: T,
    bytes: Vec<u8>,
}

impl<T> VersionedRecord<T> {
    pub fn new(record: T, bytes: Vec<u8>) -> Self {
        Self { record, bytes }
    }

    pub fn record(&self) -> &T {
        &self.record
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Store relying on the default `swap_state`
    #[derive(Default)]
    struct PlainStore {
        state: RefCell<HashMap<String, Vec<u8>>>,
    }

    impl LedgerStore for PlainStore {
        fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerStoreError> {
            Ok(self.state.borrow().get(key).cloned())
        }

        fn put_state(&self, key: &str, value: &[u8]) -> Result<(), LedgerStoreError> {
            self.state
                .borrow_mut()
                .insert(key.to_string(), value.to_vec());
            Ok(())
        }
    }

    #[test]
    fn test_default_swap_state() {
        let store = PlainStore::default();

        store
            .swap_state("PO1", None, b"one")
            .expect("Unable to create PO1");
        assert!(matches!(
            store.swap_state("PO1", None, b"two"),
            Err(LedgerStoreError::Conflict(_))
        ));
        assert!(matches!(
            store.swap_state("PO1", Some(&b"stale"[..]), b"two"),
            Err(LedgerStoreError::Conflict(_))
        ));

        store
            .swap_state("PO1", Some(&b"one"[..]), b"two")
            .expect("Unable to update PO1");
        assert_eq!(store.get_state("PO1").unwrap(), Some(b"two".to_vec()));
    }
}
