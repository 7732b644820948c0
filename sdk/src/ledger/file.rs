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
use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::sync::{Mutex, MutexGuard};

use atomicwrites::{AllowOverwrite, AtomicFile};

use crate::error::InternalError;

use super::{LedgerStore, LedgerStoreError};

/// A ledger kept in a local YAML file, mapping each key to its base64 encoded value.
///
/// Used to run invocations outside of a host runtime. The whole file is rewritten atomically on
/// every write.
pub struct FileLedgerStore {
    file: AtomicFile,
    state: Mutex<BTreeMap<String, String>>,
}

impl FileLedgerStore {
    /// Opens the ledger at `path`; a missing file is an empty ledger, any other failure to open it
    /// is an error.
    pub fn open<P: Into<String>>(path: P) -> Result<Self, LedgerStoreError> {
        let file = AtomicFile::new(path.into(), AllowOverwrite);

        let state = match File::open(file.path()) {
            Ok(mut f) => {
                let mut contents = String::new();
                f.read_to_string(&mut contents).map_err(|err| {
                    InternalError::from_source_with_prefix(
                        Box::new(err),
                        "Couldn't read ledger file".to_string(),
                    )
                })?;

                if contents.trim().is_empty() {
                    BTreeMap::new()
                } else {
                    serde_yaml::from_str(&contents).map_err(|err| {
                        InternalError::from_source_with_prefix(
                            Box::new(err),
                            "Couldn't parse ledger file".to_string(),
                        )
                    })?
                }
            }
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                return Err(LedgerStoreError::InternalError(
                    InternalError::from_source_with_prefix(
                        Box::new(err),
                        "Couldn't open ledger file".to_string(),
                    ),
                ))
            }
        };

        Ok(Self {
            file,
            state: Mutex::new(state),
        })
    }

    fn lock(&self) -> Result<MutexGuard<BTreeMap<String, String>>, LedgerStoreError> {
        self.state.lock().map_err(|_| {
            LedgerStoreError::InternalError(InternalError::with_message(
                "Cannot access ledger state: mutex lock poisoned".to_string(),
            ))
        })
    }

    fn persist(&self, state: &BTreeMap<String, String>) -> Result<(), LedgerStoreError> {
        let contents = serde_yaml::to_string(state).map_err(|err| {
            InternalError::from_source_with_prefix(
                Box::new(err),
                "Couldn't serialize ledger".to_string(),
            )
        })?;

        self.file
            .write(|f| f.write_all(contents.as_bytes()))
            .map_err(|err| {
                LedgerStoreError::InternalError(InternalError::from_source_with_prefix(
                    Box::new(err),
                    "Ledger file write failed".to_string(),
                ))
            })
    }
}

impl LedgerStore for FileLedgerStore {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerStoreError> {
        match self.lock()?.get(key) {
            Some(encoded) => base64::decode(encoded).map(Some).map_err(|err| {
                LedgerStoreError::InternalError(InternalError::from_source_with_prefix(
                    Box::new(err),
                    format!("Ledger file holds an invalid value for {}", key),
                ))
            }),
            None => Ok(None),
        }
    }

    fn put_state(&self, key: &str, value: &[u8]) -> Result<(), LedgerStoreError> {
        let mut state = self.lock()?;
        state.insert(key.to_string(), base64::encode(value));
        self.persist(&state)
    }

    fn swap_state(
        &self,
        key: &str,
        expected: Option<&[u8]>,
        value: &[u8],
    ) -> Result<(), LedgerStoreError> {
        let mut state = self.lock()?;
        let expected = expected.map(base64::encode);
        if state.get(key) != expected.as_ref() {
            return Err(LedgerStoreError::Conflict(key.to_string()));
        }
        state.insert(key.to_string(), base64::encode(value));
        self.persist(&state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempdir::TempDir;

    fn ledger_path(temp_dir: &TempDir) -> String {
        temp_dir
            .path()
            .join("ledger.yaml")
            .to_str()
            .expect("Unable to get ledger path")
            .to_string()
    }

    #[test]
    fn test_missing_file_is_empty_ledger() {
        let temp_dir = TempDir::new("test_missing_file").expect("Unable to create temp dir");

        let store = FileLedgerStore::open(ledger_path(&temp_dir)).expect("Unable to open ledger");

        assert_eq!(store.get_state("PO100").unwrap(), None);
    }

    #[test]
    fn test_writes_survive_reopen() {
        let temp_dir = TempDir::new("test_reopen").expect("Unable to create temp dir");
        let path = ledger_path(&temp_dir);

        {
            let store = FileLedgerStore::open(path.clone()).expect("Unable to open ledger");
            store
                .put_state("PO100", b"{\"status\":\"Applied\"}")
                .expect("Unable to put state");
            store
                .swap_state("PO101", None, &[0, 159, 146, 150])
                .expect("Unable to create state");
        }

        let store = FileLedgerStore::open(path).expect("Unable to reopen ledger");
        assert_eq!(
            store.get_state("PO100").unwrap(),
            Some(b"{\"status\":\"Applied\"}".to_vec())
        );
        assert_eq!(
            store.get_state("PO101").unwrap(),
            Some(vec![0, 159, 146, 150])
        );
    }

    #[test]
    fn test_swap_state_conflict() {
        let temp_dir = TempDir::new("test_conflict").expect("Unable to create temp dir");
        let store = FileLedgerStore::open(ledger_path(&temp_dir)).expect("Unable to open ledger");

        store.put_state("PO100", b"v1").unwrap();

        assert!(matches!(
            store.swap_state("PO100", None, b"v2"),
            Err(LedgerStoreError::Conflict(_))
        ));
        store
            .swap_state("PO100", Some(&b"v1"[..]), b"v2")
            .expect("Unable to swap state");
        assert_eq!(store.get_state("PO100").unwrap(), Some(b"v2".to_vec()));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new("test_corrupt").expect("Unable to create temp dir");
        let path = ledger_path(&temp_dir);
        File::create(&path)
            .and_then(|mut f| f.write_all(b"- not\n- a map\n"))
            .expect("Unable to write ledger file");

        assert!(FileLedgerStore::open(path).is_err());
    }

    #[test]
    fn test_unopenable_file_is_an_error() {
        let temp_dir = TempDir::new("test_unopenable").expect("Unable to create temp dir");
        let parent = ledger_path(&temp_dir);
        File::create(&parent).expect("Unable to create ledger file");

        // a regular file cannot hold a child entry, whatever the caller's privileges
        let path = format!("{}/nested.yaml", parent);

        assert!(matches!(
            FileLedgerStore::open(path),
            Err(LedgerStoreError::InternalError(_))
        ));
    }
}
