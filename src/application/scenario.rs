//! Scenario files: a hierarchy plus the leads to distribute, in TOML.
//!
//! ```toml
//! hierarchy = "0{Blake|Sociopath}0{Ricky|Clueless}1{Dave|Loser}"
//!
//! [[leads]]
//! name = "Acme"
//! value = 2000000
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::Lead;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Hierarchy in the legacy format; falls back to the configured default
    pub hierarchy: Option<String>,
    /// Leads in assignment order
    #[serde(default)]
    pub leads: Vec<Lead>,
}

impl Scenario {
    /// Parse scenario content; `path` is only used for error messages.
    pub fn parse(content: &str, path: &Path) -> ApplicationResult<Self> {
        toml::from_str(content).map_err(|e| ApplicationError::Scenario {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
