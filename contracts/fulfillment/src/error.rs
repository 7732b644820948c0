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

use std::error::Error;
use std::fmt;
use std::io;

use walx_sdk::config::ConfigurationError;
use walx_sdk::ledger::LedgerStoreError;

#[derive(Debug)]
pub enum CliError {
    LoggingInitializationError(Box<flexi_logger::FlexiLoggerError>),
    ConfigurationError(Box<ConfigurationError>),
    LedgerError(LedgerStoreError),
    IoError(String, io::Error),
    /// The chaincode answered with a failure response
    InvocationFailed { status: u32, message: String },
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CliError::LoggingInitializationError(err) => Some(err),
            CliError::ConfigurationError(err) => Some(err),
            CliError::LedgerError(err) => Some(err),
            CliError::IoError(_, err) => Some(err),
            CliError::InvocationFailed { .. } => None,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CliError::LoggingInitializationError(e) => {
                write!(f, "Logging initialization error: {}", e)
            }
            CliError::ConfigurationError(e) => write!(f, "Configuration error: {}", e),
            CliError::LedgerError(e) => write!(f, "Ledger error: {}", e),
            CliError::IoError(context, e) => write!(f, "{}: {}", context, e),
            CliError::InvocationFailed { status, message } => write!(f, "{} ({})", message, status),
        }
    }
}

impl From<flexi_logger::FlexiLoggerError> for CliError {
    fn from(err: flexi_logger::FlexiLoggerError) -> Self {
        CliError::LoggingInitializationError(Box::new(err))
    }
}

impl From<ConfigurationError> for CliError {
    fn from(err: ConfigurationError) -> Self {
        CliError::ConfigurationError(Box::new(err))
    }
}

impl From<LedgerStoreError> for CliError {
    fn from(err: LedgerStoreError) -> Self {
        CliError::LedgerError(err)
    }
}
