//! Lead assignment service
//!
//! Builds a hierarchy and hands it an ordered list of leads, one at a time.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt, Scenario};
use crate::config::Settings;
use crate::domain::{DomainError, Hierarchy, HierarchyBuilder, Lead};
use crate::infrastructure::traits::FileSystem;

/// What happened to a single lead.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadOutcome {
    pub lead: Lead,
    /// Rep that took the lead, None if nobody could
    pub rep: Option<String>,
    /// Risk added by this assignment (0.0 when unassigned)
    pub risk: f64,
}

/// Result of distributing a batch of leads.
#[derive(Debug)]
pub struct AssignmentReport {
    pub hierarchy: Hierarchy,
    pub outcomes: Vec<LeadOutcome>,
}

impl AssignmentReport {
    pub fn total_risk(&self) -> f64 {
        self.hierarchy.total_risk()
    }

    pub fn unassigned(&self) -> impl Iterator<Item = &LeadOutcome> {
        self.outcomes.iter().filter(|o| o.rep.is_none())
    }
}

/// Service for distributing leads over a sales hierarchy.
pub struct AssignmentService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
    builder: HierarchyBuilder,
}

impl AssignmentService {
    /// Create a new assignment service.
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self {
            fs,
            settings,
            builder: HierarchyBuilder::new(),
        }
    }

    /// Pick the explicit hierarchy spec, else the configured default.
    pub fn resolve_hierarchy<'a>(
        &'a self,
        explicit: Option<&'a str>,
    ) -> ApplicationResult<&'a str> {
        explicit
            .or(self.settings.hierarchy.as_deref())
            .ok_or(ApplicationError::MissingHierarchy)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn build(&self, spec: &str) -> ApplicationResult<Hierarchy> {
        Ok(self.builder.build(spec)?)
    }

    /// Build `spec` and assign `leads` in order.
    ///
    /// With `skip_unassignable` set, leads nobody can take are recorded and
    /// skipped; otherwise the first one aborts the run.
    #[instrument(level = "debug", skip(self, leads), fields(leads = leads.len()))]
    pub fn assign(&self, spec: &str, leads: Vec<Lead>) -> ApplicationResult<AssignmentReport> {
        let mut hierarchy = self.build(spec)?;
        let mut outcomes = Vec::with_capacity(leads.len());

        for lead in leads {
            match hierarchy.assign(lead.clone()) {
                Ok(assignment) => {
                    debug!("{} -> {} (risk {})", lead, assignment.rep, assignment.risk);
                    outcomes.push(LeadOutcome {
                        lead,
                        rep: Some(assignment.rep),
                        risk: assignment.risk,
                    });
                }
                Err(DomainError::NoAvailableRep { .. }) if self.settings.skip_unassignable => {
                    warn!("no available rep for {}, skipping", lead);
                    outcomes.push(LeadOutcome {
                        lead,
                        rep: None,
                        risk: 0.0,
                    });
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(AssignmentReport {
            hierarchy,
            outcomes,
        })
    }

    /// Read and parse a scenario file.
    pub fn load_scenario(&self, path: &Path) -> ApplicationResult<Scenario> {
        debug!("load_scenario: {}", path.display());
        if !self.fs.is_file(path) {
            return Err(ApplicationError::ScenarioNotFound(path.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read scenario", path)?;
        Scenario::parse(&content, path)
    }

    /// Run a scenario file; `hierarchy` overrides the one in the file.
    #[instrument(level = "debug", skip(self))]
    pub fn run_scenario(
        &self,
        path: &Path,
        hierarchy: Option<&str>,
    ) -> ApplicationResult<AssignmentReport> {
        let Scenario {
            hierarchy: file_hierarchy,
            leads,
        } = self.load_scenario(path)?;
        let spec = self.resolve_hierarchy(hierarchy.or(file_hierarchy.as_deref()))?;
        self.assign(spec, leads)
    }
}
