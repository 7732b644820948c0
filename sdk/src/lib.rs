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

//! Shared building blocks for the WALX order and fulfillment chaincodes.
//!
//! Each chaincode invocation is handed a caller certificate, a function name and positional
//! arguments. The modules in this crate turn the certificate into an authorizable caller, map
//! logical record identifiers to ledger keys, define the record schemas written to the ledger
//! and provide the runtime that routes one invocation and converts its outcome into a response.

#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate log;

pub mod addressing;
pub mod chaincode;
pub mod config;
pub mod error;
pub mod identity;
pub mod ledger;
pub mod protocol;
pub mod workflow;
