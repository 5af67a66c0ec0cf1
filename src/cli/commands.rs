//! Command dispatch: each subcommand maps onto an application service call.

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::services::{AssignmentReport, LeadOutcome};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{Lead, TreeNodeConvert};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::FileSystem;
use crate::infrastructure::InfraError;
use crate::util::path::expand_path;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see `salestree --help`".to_string(),
        ));
    };

    match command {
        // needs no settings, so it works even with a broken config
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Commands::Tree { spec } => cmd_tree(&load_container(cli)?, spec.as_deref()),
        Commands::Assign { hierarchy, leads } => {
            cmd_assign(&load_container(cli)?, hierarchy.as_deref(), leads)
        }
        Commands::Run {
            scenario,
            hierarchy,
        } => cmd_run(&load_container(cli)?, scenario, hierarchy.as_deref()),
        Commands::Config { command } => cmd_config(&load_container(cli)?, command),
    }
}

fn load_container(cli: &Cli) -> CliResult<ServiceContainer> {
    let explicit = cli.config.as_deref().map(|p| expand_path(&p.to_string_lossy()));
    let settings = Settings::load(explicit.as_deref())?;
    debug!("settings: {:?}", settings);
    Ok(ServiceContainer::new(settings))
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, spec: Option<&str>) -> CliResult<()> {
    let service = container.assignment_service();
    let spec = service.resolve_hierarchy(spec)?;
    let hierarchy = service.build(spec)?;

    output::header(&format!(
        "{} salespeople, depth {}",
        hierarchy.len(),
        hierarchy.depth()
    ));
    output::info(&hierarchy.to_tree_string());
    output::detail(&hierarchy);
    Ok(())
}

#[instrument(skip(container, leads))]
fn cmd_assign(
    container: &ServiceContainer,
    hierarchy: Option<&str>,
    leads: &[Lead],
) -> CliResult<()> {
    let service = container.assignment_service();
    let spec = service.resolve_hierarchy(hierarchy)?;
    let report = service.assign(spec, leads.to_vec())?;
    print_report(&report, container.settings.precision);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_run(
    container: &ServiceContainer,
    scenario: &str,
    hierarchy: Option<&str>,
) -> CliResult<()> {
    let path = expand_path(scenario);
    let report = container
        .assignment_service()
        .run_scenario(&path, hierarchy)?;
    print_report(&report, container.settings.precision);
    Ok(())
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            let path = global_config_path()
                .ok_or_else(|| CliError::Usage("cannot determine config directory".into()))?;
            output::info(&path.display());
            Ok(())
        }
        ConfigCommands::Init { force } => {
            let path = global_config_path()
                .ok_or_else(|| CliError::Usage("cannot determine config directory".into()))?;
            init_config(container.fs.as_ref(), &path, *force)?;
            output::action("Created", &path.display());
            Ok(())
        }
    }
}

fn init_config(fs: &dyn FileSystem, path: &Path, force: bool) -> CliResult<()> {
    if fs.exists(path) && !force {
        return Err(CliError::InvalidArgs(format!(
            "{} exists, use --force to overwrite",
            path.display()
        )));
    }
    let content = Settings::default().to_toml()?;
    fs.ensure_parent(path)
        .and_then(|_| fs.write(path, &content))
        .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
    Ok(())
}

fn format_outcome(outcome: &LeadOutcome, precision: usize) -> String {
    match &outcome.rep {
        Some(rep) => format!(
            "{} -> {} (risk {:.*})",
            outcome.lead, rep, precision, outcome.risk
        ),
        None => format!("{} -> no available rep", outcome.lead),
    }
}

fn print_report(report: &AssignmentReport, precision: usize) {
    for outcome in &report.outcomes {
        let line = format_outcome(outcome, precision);
        match outcome.rep {
            Some(_) => output::success(&line),
            None => output::failure(&line),
        }
    }

    let unassigned = report.unassigned().map(|o| o.lead.name()).join(", ");
    if !unassigned.is_empty() {
        output::warning(&format!("unassigned: {}", unassigned));
    }

    output::info(&report.hierarchy.to_tree_string());
    output::action(
        "Total risk",
        &format!("{:.*}", precision, report.total_risk()),
    );
}
