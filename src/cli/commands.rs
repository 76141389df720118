//! Command handlers
//!
//! `run` resolves settings and builds the service container once; each
//! handler then calls one service and renders the result to `out`.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::cli::args::{
    AccountCommands, AccountSourceCommands, BalanceCommands, Cli, Commands, ConfigCommands,
    DepositCommands, PaymentCommands, SandboxCommands, SourceCommands, TransferCommands,
};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::render::{render_collection, render_resource};
use crate::config::{
    default_config_file, expand_path, search_paths, Settings, CONFIG_EXTENSIONS,
};
use crate::domain::{
    BankAccountType, FundingSourceRequest, PageFilters, Resource, TransferFilters,
};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Run the parsed command line, writing all regular output to `out`.
pub fn run(cli: &Cli, out: &mut dyn Write) -> CliResult<()> {
    if let Commands::Completion { shell } = &cli.command {
        return completion(*shell, out);
    }

    if let Commands::Config { command } = &cli.command {
        return config_command(cli, None, command, out);
    }

    let container = ServiceContainer::new(load_settings(cli)?)?;
    execute_command(cli, &container, out)
}

/// Layered settings with command-line flags applied last.
pub fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let settings = Settings::load(cli.config.as_deref())?.with_overrides(&cli.overrides())?;
    debug!(
        "environment: {}, base url: {}",
        settings.environment,
        settings.base_url()
    );
    Ok(settings)
}

/// Dispatch a command against an existing container.
pub fn execute_command(
    cli: &Cli,
    container: &ServiceContainer,
    out: &mut dyn Write,
) -> CliResult<()> {
    match &cli.command {
        Commands::Account { command } => account_command(container, command, out),
        Commands::Source { command } => source_command(container, command, out),
        Commands::Sandbox { command } => sandbox_command(container, command, out),
        Commands::Config { command } => {
            config_command(cli, Some(container.settings.as_ref()), command, out)
        }
        Commands::Completion { shell } => completion(*shell, out),
    }
}

// ============================================================
// Account commands
// ============================================================

#[instrument(skip(container, out))]
fn account_command(
    container: &ServiceContainer,
    command: &AccountCommands,
    out: &mut dyn Write,
) -> CliResult<()> {
    let accounts = &container.accounts;
    match command {
        AccountCommands::Retrieve => {
            let account = accounts.retrieve()?;
            render_resource(out, &Resource::from(account))?;
        }
        AccountCommands::Source { command } => match command {
            AccountSourceCommands::Create {
                routing_number,
                account_number,
                account_type,
                name,
            } => {
                let request = FundingSourceRequest {
                    routing_number: Some(routing_number.clone()),
                    account_number: Some(account_number.clone()),
                    bank_account_type: Some(account_type.parse::<BankAccountType>()?),
                    name: Some(name.clone()),
                };
                let source = accounts.create_funding_source(&request)?;
                render_resource(out, &Resource::from(source))?;
            }
            AccountSourceCommands::List { removed } => {
                let sources = accounts.list_funding_sources(*removed)?;
                render_collection(out, &sources)?;
            }
        },
        AccountCommands::Transfer {
            command: TransferCommands::List(args),
        } => {
            let transfers = accounts.list_transfers(&TransferFilters::from(args))?;
            render_collection(out, &transfers)?;
        }
        AccountCommands::Payment {
            command: PaymentCommands::List(args),
        } => {
            let payments = accounts.list_mass_payments(&PageFilters::from(args))?;
            render_collection(out, &payments)?;
        }
    }
    Ok(())
}

// ============================================================
// Funding source commands
// ============================================================

#[instrument(skip(container, out))]
fn source_command(
    container: &ServiceContainer,
    command: &SourceCommands,
    out: &mut dyn Write,
) -> CliResult<()> {
    let sources = &container.sources;
    match command {
        SourceCommands::Retrieve { id } => {
            render_resource(out, &Resource::from(sources.retrieve(id)?))?;
        }
        SourceCommands::Update {
            id,
            account_number,
            account_type,
            name,
            routing_number,
        } => {
            let request = FundingSourceRequest {
                routing_number: routing_number.clone(),
                account_number: account_number.clone(),
                bank_account_type: account_type
                    .as_deref()
                    .map(str::parse::<BankAccountType>)
                    .transpose()?,
                name: name.clone(),
            };
            if request.is_empty() {
                return Err(CliError::InvalidArgs(
                    "nothing to update; give --account-number, --account-type, --name or --routing-number"
                        .into(),
                ));
            }
            render_resource(out, &Resource::from(sources.update(id, &request)?))?;
        }
        SourceCommands::Remove { ids } => {
            for id in ids {
                output::action(out, "Removing funding source", id)?;
                sources.remove(id)?;
            }
            output::success(out, &format!("Removed {} funding source(s)", ids.len()))?;
        }
        SourceCommands::Balance {
            command: BalanceCommands::Retrieve { id },
        } => {
            render_resource(out, &Resource::from(sources.balance(id)?))?;
        }
        SourceCommands::Deposit { command } => match command {
            DepositCommands::Initiate { id } => {
                let deposits = sources.initiate_micro_deposits(id)?;
                render_resource(out, &Resource::from(deposits))?;
            }
            DepositCommands::Retrieve { id } => {
                let deposits = sources.retrieve_micro_deposits(id)?;
                render_resource(out, &Resource::from(deposits))?;
            }
            DepositCommands::Verify {
                id,
                amount1,
                amount2,
                currency,
            } => {
                sources.verify_micro_deposits(id, amount1, amount2, currency)?;
                output::success(out, &format!("Verified funding source {id}"))?;
            }
        },
    }
    Ok(())
}

// ============================================================
// Sandbox commands
// ============================================================

#[instrument(skip(container, out))]
fn sandbox_command(
    container: &ServiceContainer,
    command: &SandboxCommands,
    out: &mut dyn Write,
) -> CliResult<()> {
    match command {
        SandboxCommands::Simulations => {
            container.sandbox.simulate()?;
            output::success(out, "Processed sandbox simulations")?;
        }
    }
    Ok(())
}

// ============================================================
// Config and completion
// ============================================================

/// Only `show` needs resolved settings; they are loaded here when not supplied.
#[instrument(skip(cli, settings, out))]
fn config_command(
    cli: &Cli,
    settings: Option<&Settings>,
    command: &ConfigCommands,
    out: &mut dyn Write,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => match settings {
            Some(settings) => render_resource(out, settings)?,
            None => render_resource(out, &load_settings(cli)?)?,
        },
        ConfigCommands::Path => {
            for path in config_candidates(cli.config.as_deref()) {
                if path.exists() {
                    output::success(out, &path.display())?;
                } else {
                    output::info(out, &format!("  {}", path.display()))?;
                }
            }
        }
        ConfigCommands::Init { force } => {
            let target = match &cli.config {
                Some(path) => expand_path(path),
                None => default_config_file().ok_or_else(|| {
                    CliError::InvalidArgs(
                        "cannot determine home directory; use --config FILE".into(),
                    )
                })?,
            };
            init_config(&target, *force)?;
            output::success(out, &format!("Created {}", target.display()))?;
        }
    }
    Ok(())
}

/// Files that may feed the settings, lowest precedence first.
fn config_candidates(explicit: Option<&Path>) -> Vec<PathBuf> {
    match explicit {
        Some(path) => vec![expand_path(path)],
        None => search_paths()
            .iter()
            .flat_map(|base| {
                CONFIG_EXTENSIONS
                    .iter()
                    .map(move |ext| PathBuf::from(format!("{}.{ext}", base.display())))
            })
            .collect(),
    }
}

fn init_config(target: &Path, force: bool) -> CliResult<()> {
    if target.exists() && !force {
        return Err(CliError::InvalidArgs(format!(
            "{} already exists; use --force to overwrite",
            target.display()
        )));
    }
    std::fs::write(target, Settings::template())
        .map_err(|e| InfraError::io(format!("write {}", target.display()), e))?;
    Ok(())
}

fn completion(shell: Shell, out: &mut dyn Write) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
    Ok(())
}
