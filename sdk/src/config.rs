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

//! Chaincode configuration.

use std::error::Error;
use std::fmt;

use chrono_tz::Tz;

use crate::identity::{OrganizationDirectory, Role};
use crate::workflow::StatusMode;

/// Civil time zone purchase order dates are stamped in unless configured otherwise.
pub const DEFAULT_TIME_ZONE: &str = "America/Chicago";

pub struct ChaincodeConfig {
    time_zone: Tz,
    status_mode: StatusMode,
    organizations: OrganizationDirectory,
}

impl ChaincodeConfig {
    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    pub fn status_mode(&self) -> StatusMode {
        self.status_mode
    }

    pub fn organizations(&self) -> &OrganizationDirectory {
        &self.organizations
    }
}

pub struct ChaincodeConfigBuilder {
    time_zone: Option<String>,
    status_mode: Option<String>,
    organizations: Option<OrganizationDirectory>,
    organization_mappings: Vec<String>,
}

impl Default for ChaincodeConfigBuilder {
    fn default() -> Self {
        Self {
            time_zone: Some(DEFAULT_TIME_ZONE.to_owned()),
            status_mode: Some(StatusMode::default().to_string()),
            organizations: Some(OrganizationDirectory::default()),
            organization_mappings: vec![],
        }
    }
}

impl ChaincodeConfigBuilder {
    /// Overrides the time zone when `time_zone` is set, e.g. from an optional command line value.
    pub fn with_time_zone(mut self, time_zone: Option<&str>) -> Self {
        if let Some(time_zone) = time_zone {
            self.time_zone = Some(time_zone.to_owned());
        }
        self
    }

    pub fn with_status_mode(mut self, status_mode: Option<&str>) -> Self {
        if let Some(status_mode) = status_mode {
            self.status_mode = Some(status_mode.to_owned());
        }
        self
    }

    /// Adds `tag=role` mappings on top of the organization directory.
    pub fn with_organization_mappings<I, S>(mut self, mappings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.organization_mappings
            .extend(mappings.into_iter().map(Into::into));
        self
    }

    pub fn build(mut self) -> Result<ChaincodeConfig, ConfigurationError> {
        let time_zone = self
            .time_zone
            .take()
            .ok_or_else(|| ConfigurationError::MissingValue("time_zone".to_owned()))?
            .parse::<Tz>()
            .map_err(|err| ConfigurationError::InvalidValue {
                name: "time_zone".to_owned(),
                message: err.to_string(),
            })?;

        let status_mode = self
            .status_mode
            .take()
            .ok_or_else(|| ConfigurationError::MissingValue("status_mode".to_owned()))?
            .parse::<StatusMode>()
            .map_err(|message| ConfigurationError::InvalidValue {
                name: "status_mode".to_owned(),
                message,
            })?;

        let mut organizations = self
            .organizations
            .take()
            .ok_or_else(|| ConfigurationError::MissingValue("organizations".to_owned()))?;

        for mapping in &self.organization_mappings {
            let (tag, role) = parse_organization_mapping(mapping)?;
            organizations = organizations.with_organization(tag, role);
        }

        Ok(ChaincodeConfig {
            time_zone,
            status_mode,
            organizations,
        })
    }
}

fn parse_organization_mapping(mapping: &str) -> Result<(&str, Role), ConfigurationError> {
    let invalid = |message: String| ConfigurationError::InvalidValue {
        name: "organization".to_owned(),
        message,
    };

    let mut parts = mapping.splitn(2, '=');
    let tag = parts.next().unwrap_or("").trim();
    let role = parts
        .next()
        .ok_or_else(|| invalid(format!("expected tag=role, found '{}'", mapping)))?
        .trim();

    if tag.is_empty() {
        return Err(invalid(format!("empty organization tag in '{}'", mapping)));
    }

    Ok((tag, role.parse::<Role>().map_err(invalid)?))
}

#[derive(Debug, PartialEq)]
pub enum ConfigurationError {
    MissingValue(String),
    InvalidValue { name: String, message: String },
}

impl Error for ConfigurationError {}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigurationError::MissingValue(config_field_name) => {
                write!(f, "Missing configuration for {}", config_field_name)
            }
            ConfigurationError::InvalidValue { name, message } => {
                write!(f, "Invalid configuration for {}: {}", name, message)
            }
        }
    }
}
