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

#[macro_use]
extern crate log;

mod error;
mod handler;
mod payload;
mod permissions;
mod state;
mod workflow;

use std::fs;
use std::io::{self, Write};

use chrono::Utc;
use clap::{App, Arg};
use flexi_logger::{LogSpecBuilder, Logger};
use walx_sdk::chaincode::{execute, execute_init, Invocation};
use walx_sdk::config::ChaincodeConfigBuilder;
use walx_sdk::ledger::FileLedgerStore;

use crate::error::CliError;
use crate::handler::PurchaseOrderChaincode;

const APP_NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn run() -> Result<(), CliError> {
    let matches = App::new(APP_NAME)
        .version(VERSION)
        .author("Cargill Incorporated")
        .about("Runs one invocation of the WALX purchase order chaincode against a local ledger")
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Log verbosely"),
        )
        .arg(
            Arg::with_name("state")
                .short("s")
                .long("state")
                .takes_value(true)
                .help("Ledger state file, created if missing"),
        )
        .arg(
            Arg::with_name("creator")
                .short("c")
                .long("creator")
                .takes_value(true)
                .help("File holding the caller certificate"),
        )
        .arg(
            Arg::with_name("tx_id")
                .long("tx-id")
                .takes_value(true)
                .help("Transaction id used in log lines"),
        )
        .arg(
            Arg::with_name("time_zone")
                .long("time-zone")
                .takes_value(true)
                .help("Time zone purchase order dates are stamped in"),
        )
        .arg(
            Arg::with_name("status_mode")
                .long("status-mode")
                .takes_value(true)
                .possible_values(&["strict", "loose"])
                .help("How order status changes are validated"),
        )
        .arg(
            Arg::with_name("organization")
                .long("org")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .help("Additional organization mapping, as tag=role"),
        )
        .arg(
            Arg::with_name("function")
                .required(true)
                .help("Chaincode function to invoke, or init"),
        )
        .arg(
            Arg::with_name("args")
                .multiple(true)
                .help("Function arguments"),
        )
        .get_matches();

    let log_level = match matches.occurrences_of("verbose") {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let mut log_spec_builder = LogSpecBuilder::new();
    log_spec_builder.default(log_level);

    Logger::with(log_spec_builder.build()).start()?;

    let config = ChaincodeConfigBuilder::default()
        .with_time_zone(matches.value_of("time_zone"))
        .with_status_mode(matches.value_of("status_mode"))
        .with_organization_mappings(
            matches
                .values_of("organization")
                .map(|values| values.collect::<Vec<_>>())
                .unwrap_or_default(),
        )
        .build()?;

    let store = FileLedgerStore::open(
        matches
            .value_of("state")
            .unwrap_or("walx-purchase-order-state.yaml"),
    )?;

    let creator = match matches.value_of("creator") {
        Some(path) => fs::read(path)
            .map_err(|err| CliError::IoError(format!("Unable to read {}", path), err))?,
        None => vec![],
    };

    let function = matches.value_of("function").unwrap_or_default();
    let args: Vec<String> = matches
        .values_of("args")
        .map(|values| values.map(String::from).collect())
        .unwrap_or_default();
    let tx_id = matches
        .value_of("tx_id")
        .map(String::from)
        .unwrap_or_else(|| Utc::now().format("%Y%m%d%H%M%S%f").to_string());

    let invocation = Invocation::new(function, args, creator).with_tx_id(&tx_id);
    let chaincode = PurchaseOrderChaincode::new();

    let response = if function == "init" {
        execute_init(&chaincode, &invocation, &store, &config)
    } else {
        execute(&chaincode, &invocation, &store, &config)
    };

    if !response.is_success() {
        return Err(CliError::InvocationFailed {
            status: response.status(),
            message: response.message().unwrap_or_default().to_string(),
        });
    }

    if let Some(payload) = response.payload() {
        let mut stdout = io::stdout();
        stdout
            .write_all(payload)
            .and_then(|_| stdout.write_all(b"\n"))
            .map_err(|err| CliError::IoError("Unable to write payload".to_string(), err))?;
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
