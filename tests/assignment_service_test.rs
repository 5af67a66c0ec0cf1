//! Tests for AssignmentService

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use salestree::application::services::AssignmentService;
use salestree::application::ApplicationError;
use salestree::config::Settings;
use salestree::domain::{DomainError, Lead};
use salestree::infrastructure::di::ServiceContainer;
use salestree::infrastructure::traits::{FileSystem, RealFileSystem};
use salestree::util::testing;

const GOLDEN: &str =
    "0{Blake|Sociopath}0{Ricky|Clueless}1{Dave|Loser}0{Shelley|Clueless}1{Williamson|Loser}";

/// In-memory filesystem keyed by path.
#[derive(Default)]
struct MemFs {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl MemFs {
    fn with_file(path: &str, content: &str) -> Self {
        let fs = Self::default();
        fs.files
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), content.to_string());
        fs
    }
}

impl FileSystem for MemFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "missing"))
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.exists(path)
    }

    fn ensure_parent(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }
}

fn service(fs: impl FileSystem + 'static, settings: Settings) -> AssignmentService {
    testing::init_test_setup();
    AssignmentService::new(Arc::new(fs), Arc::new(settings))
}

fn lead(name: &str, value: f64) -> Lead {
    Lead::new(name, value).unwrap()
}

// ============================================================
// assign
// ============================================================

#[test]
fn given_unassignable_lead_when_not_skipping_then_run_aborts() {
    // Arrange
    let svc = service(MemFs::default(), Settings::default());
    let leads = vec![lead("ok", 10.0), lead("second", 10.0)];

    // Act
    let result = svc.assign("0{Solo|Loser}", leads);

    // Assert
    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::NoAvailableRep { .. }))
    ));
}

#[test]
fn given_unassignable_lead_when_skipping_then_recorded_and_run_continues() {
    // Arrange
    let settings = Settings {
        skip_unassignable: true,
        ..Default::default()
    };
    let svc = service(MemFs::default(), settings);
    let leads = vec![
        lead("tiny", 10.0),
        lead("midsize", 500_000.0),
        lead("whale", 3_000_000.0),
    ];

    // Act
    let report = svc.assign("0{Boss|Sociopath}0{Temp|Loser}", leads).unwrap();

    // Assert
    let reps: Vec<_> = report.outcomes.iter().map(|o| o.rep.as_deref()).collect();
    assert_eq!(reps, vec![Some("Temp"), None, Some("Boss")]);
    let unassigned: Vec<_> = report.unassigned().map(|o| o.lead.name()).collect();
    assert_eq!(unassigned, vec!["midsize"]);
    let expected = 10.0 * (1.0 - 0.02) + 3_000_000.0 * (1.0 - 0.85);
    assert!((report.total_risk() - expected).abs() < 1e-6);
}

#[test]
fn given_outcomes_then_risks_add_up_to_total() {
    let svc = service(MemFs::default(), Settings::default());
    let leads = vec![lead("a", 1_000_000.0), lead("b", 250.0), lead("c", 9.5)];

    let report = svc.assign(GOLDEN, leads).unwrap();

    let sum: f64 = report.outcomes.iter().map(|o| o.risk).sum();
    assert!((report.total_risk() - sum).abs() < 1e-9);
}

#[test]
fn given_malformed_hierarchy_when_assigning_then_domain_error() {
    let svc = service(MemFs::default(), Settings::default());

    let result = svc.assign("nothing to see", vec![lead("a", 1.0)]);

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::Parse(_)))
    ));
}

// ============================================================
// resolve_hierarchy
// ============================================================

#[test]
fn given_no_explicit_and_no_default_when_resolving_then_missing_hierarchy() {
    let svc = service(MemFs::default(), Settings::default());
    assert!(matches!(
        svc.resolve_hierarchy(None),
        Err(ApplicationError::MissingHierarchy)
    ));
}

#[test]
fn given_explicit_and_default_when_resolving_then_explicit_wins() {
    let settings = Settings {
        hierarchy: Some("0{Default|Loser}".into()),
        ..Default::default()
    };
    let svc = service(MemFs::default(), settings);

    assert_eq!(svc.resolve_hierarchy(Some("0{Mine|Loser}")).unwrap(), "0{Mine|Loser}");
    assert_eq!(svc.resolve_hierarchy(None).unwrap(), "0{Default|Loser}");
}

// ============================================================
// run_scenario
// ============================================================

#[test]
fn given_scenario_in_memory_when_running_then_assigns_all_leads() {
    // Arrange
    let content = format!(
        "hierarchy = \"{}\"\n\n[[leads]]\nname = \"Acme\"\nvalue = 2000000\n\n[[leads]]\nname = \"Bolt\"\nvalue = 100\n",
        GOLDEN
    );
    let svc = service(MemFs::with_file("/q3.toml", &content), Settings::default());

    // Act
    let report = svc.run_scenario(Path::new("/q3.toml"), None).unwrap();

    // Assert
    let reps: Vec<_> = report
        .outcomes
        .iter()
        .map(|o| o.rep.clone().unwrap())
        .collect();
    assert_eq!(reps, vec!["Blake", "Ricky"]);
}

#[test]
fn given_scenario_without_hierarchy_when_running_then_uses_configured_default() {
    let settings = Settings {
        hierarchy: Some("0{Fallback|Clueless}".into()),
        ..Default::default()
    };
    let content = "[[leads]]\nname = \"Acme\"\nvalue = 1\n";
    let svc = service(MemFs::with_file("/s.toml", content), settings);

    let report = svc.run_scenario(Path::new("/s.toml"), None).unwrap();

    assert_eq!(report.outcomes[0].rep.as_deref(), Some("Fallback"));
}

#[test]
fn given_override_when_running_scenario_then_override_beats_file() {
    let content = "hierarchy = \"0{FromFile|Loser}\"\n[[leads]]\nname = \"a\"\nvalue = 1\n";
    let svc = service(MemFs::with_file("/s.toml", content), Settings::default());

    let report = svc
        .run_scenario(Path::new("/s.toml"), Some("0{FromArg|Loser}"))
        .unwrap();

    assert_eq!(report.outcomes[0].rep.as_deref(), Some("FromArg"));
}

#[test]
fn given_missing_scenario_when_running_then_not_found() {
    let svc = service(MemFs::default(), Settings::default());

    let result = svc.run_scenario(Path::new("/nope.toml"), None);

    assert!(matches!(result, Err(ApplicationError::ScenarioNotFound(p)) if p == Path::new("/nope.toml")));
}

#[test]
fn given_scenario_with_unknown_field_when_running_then_scenario_error() {
    let content = "hierarchy = \"0{A|Loser}\"\nbudget = 3\n";
    let svc = service(MemFs::with_file("/s.toml", content), Settings::default());

    let result = svc.run_scenario(Path::new("/s.toml"), None);

    assert!(matches!(result, Err(ApplicationError::Scenario { .. })));
}

#[test]
fn given_scenario_with_unknown_variant_when_running_then_domain_error() {
    let content = "hierarchy = \"0{A|Loser}0{B|Intern}\"\n";
    let svc = service(MemFs::with_file("/s.toml", content), Settings::default());

    let result = svc.run_scenario(Path::new("/s.toml"), None);

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::UnknownVariant(v))) if v == "Intern"
    ));
}

#[test]
fn given_scenario_on_disk_when_running_through_container_then_reads_real_file() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("scenario.toml");
    std::fs::write(
        &path,
        "hierarchy = \"0{Boss|Sociopath}0{Ann|Clueless}\"\n[[leads]]\nname = \"Acme\"\nvalue = 10\n",
    )
    .unwrap();
    let container = ServiceContainer::with_deps(Settings::default(), Arc::new(RealFileSystem));

    // Act
    let report = container
        .assignment_service()
        .run_scenario(&path, None)
        .unwrap();

    // Assert
    assert_eq!(report.outcomes[0].rep.as_deref(), Some("Ann"));
    assert_eq!(report.hierarchy.len(), 2);
}
