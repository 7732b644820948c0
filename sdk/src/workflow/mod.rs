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

//! Generic status workflows.
//!
//! A [`Workflow`] is a set of named states. Each state lists the states reachable from it and the
//! permission aliases that may take each transition. Contracts define their concrete workflow on
//! top of these primitives.

mod state;

use std::fmt;
use std::str::FromStr;

pub use state::{PermissionAlias, WorkflowState, WorkflowStateBuilder};

pub struct Workflow {
    states: Vec<WorkflowState>,
    starting_state: String,
}

impl Workflow {
    pub fn new(states: Vec<WorkflowState>, starting_state: &str) -> Self {
        Self {
            states,
            starting_state: starting_state.to_string(),
        }
    }

    pub fn state(&self, name: &str) -> Option<&WorkflowState> {
        self.states.iter().find(|state| state.name() == name)
    }

    pub fn starting_state(&self) -> &str {
        &self.starting_state
    }
}

/// How strictly status changes are checked against a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMode {
    /// Only transitions listed in the workflow are accepted
    Strict,
    /// Any non-empty status is accepted from an authorized caller
    Loose,
}

impl Default for StatusMode {
    fn default() -> Self {
        StatusMode::Strict
    }
}

impl fmt::Display for StatusMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            StatusMode::Strict => write!(f, "strict"),
            StatusMode::Loose => write!(f, "loose"),
        }
    }
}

impl FromStr for StatusMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(StatusMode::Strict),
            "loose" => Ok(StatusMode::Loose),
            _ => Err(format!("Unknown status mode: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_workflow() -> Workflow {
        let mut seller = PermissionAlias::new("po::seller");
        seller.add_permission("can-confirm");
        seller.add_transition("confirmed");

        let issued = WorkflowStateBuilder::new("issued")
            .add_transition("confirmed")
            .add_permission_alias(seller)
            .build();
        let confirmed = WorkflowStateBuilder::new("confirmed").build();

        Workflow::new(vec![issued, confirmed], "issued")
    }

    #[test]
    fn test_permission_alias() {
        let mut alias = PermissionAlias::new("po::seller");
        alias.add_permission("can-confirm");
        alias.add_transition("confirmed");

        assert_eq!("po::seller", alias.name());
        assert_eq!(&["can-confirm".to_string()], alias.permissions());
        assert_eq!(&["confirmed".to_string()], alias.transitions());
    }

    #[test]
    fn test_workflow_state_transitions() {
        let workflow = make_workflow();
        let issued = workflow.state("issued").expect("Missing issued state");

        assert!(issued.can_transition("confirmed", "po::seller"));
        assert!(!issued.can_transition("confirmed", "po::buyer"));
        assert!(!issued.can_transition("issued", "po::seller"));
        assert_eq!(
            vec!["can-confirm".to_string()],
            issued.expand_permissions(&["po::seller".to_string()])
        );
    }

    #[test]
    fn test_terminal_state() {
        let workflow = make_workflow();
        let confirmed = workflow.state("confirmed").expect("Missing confirmed state");

        assert!(confirmed.transitions().is_empty());
        assert!(!confirmed.can_transition("issued", "po::seller"));
        assert!(workflow.state("closed").is_none());
        assert_eq!(workflow.starting_state(), "issued");
    }

    #[test]
    fn test_status_mode() {
        assert_eq!(StatusMode::default(), StatusMode::Strict);
        assert_eq!("loose".parse::<StatusMode>(), Ok(StatusMode::Loose));
        assert_eq!(StatusMode::Strict.to_string(), "strict");
        assert!("lenient".parse::<StatusMode>().is_err());
    }
}
