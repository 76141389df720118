//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

use crate::config::Overrides;
use crate::domain::{PageFilters, TransferFilters};

/// Command-line client for the Dwolla payments API
#[derive(Parser, Debug)]
#[command(name = "dwolla")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (replaces ~/.dwolla.* and ./.dwolla.*)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// API key
    #[arg(short, long, global = true)]
    pub key: Option<String>,

    /// API secret
    #[arg(short, long, global = true)]
    pub secret: Option<String>,

    /// API environment: production or sandbox
    #[arg(short, long, global = true)]
    pub environment: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Flag values that override config files and environment variables.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            api_key: self.key.clone(),
            api_secret: self.secret.clone(),
            environment: self.environment.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Account operations
    Account {
        #[command(subcommand)]
        command: AccountCommands,
    },

    /// Funding source operations
    Source {
        #[command(subcommand)]
        command: SourceCommands,
    },

    /// Sandbox operations
    Sandbox {
        #[command(subcommand)]
        command: SandboxCommands,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum AccountCommands {
    /// Show the authorized account
    Retrieve,

    /// Account funding sources
    Source {
        #[command(subcommand)]
        command: AccountSourceCommands,
    },

    /// Account transfers
    Transfer {
        #[command(subcommand)]
        command: TransferCommands,
    },

    /// Account mass payments
    Payment {
        #[command(subcommand)]
        command: PaymentCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum AccountSourceCommands {
    /// Register a bank funding source
    Create {
        #[arg(long)]
        routing_number: String,
        #[arg(long)]
        account_number: String,
        /// checking or savings
        #[arg(long)]
        account_type: String,
        #[arg(long)]
        name: String,
    },

    /// List funding sources
    List {
        /// Include removed funding sources
        #[arg(short, long)]
        removed: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum TransferCommands {
    /// Search transfers
    List(TransferListArgs),
}

#[derive(Args, Debug, Default)]
pub struct TransferListArgs {
    #[arg(long)]
    pub correlation_id: Option<String>,
    #[arg(long, default_value_t = 25)]
    pub limit: u32,
    #[arg(long, default_value_t = 0)]
    pub offset: u32,
    /// Search term matched against names and emails
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub start_amount: Option<String>,
    #[arg(long)]
    pub end_amount: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub start_date: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub end_date: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
}

impl From<&TransferListArgs> for TransferFilters {
    fn from(args: &TransferListArgs) -> Self {
        TransferFilters {
            correlation_id: args.correlation_id.clone(),
            end_amount: args.end_amount.clone(),
            end_date: args.end_date.clone(),
            limit: args.limit,
            offset: args.offset,
            search: args.search.clone(),
            start_amount: args.start_amount.clone(),
            start_date: args.start_date.clone(),
            status: args.status.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum PaymentCommands {
    /// List mass payments
    List(PaymentListArgs),
}

#[derive(Args, Debug, Default)]
pub struct PaymentListArgs {
    #[arg(long)]
    pub correlation_id: Option<String>,
    #[arg(long, default_value_t = 25)]
    pub limit: u32,
    #[arg(long, default_value_t = 0)]
    pub offset: u32,
}

impl From<&PaymentListArgs> for PageFilters {
    fn from(args: &PaymentListArgs) -> Self {
        PageFilters {
            correlation_id: args.correlation_id.clone(),
            limit: args.limit,
            offset: args.offset,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum SourceCommands {
    /// Show a funding source
    Retrieve { id: String },

    /// Change a funding source; only given fields are sent
    Update {
        id: String,
        #[arg(long)]
        account_number: Option<String>,
        /// checking or savings
        #[arg(long)]
        account_type: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        routing_number: Option<String>,
    },

    /// Remove funding sources
    Remove {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Funding source balance
    Balance {
        #[command(subcommand)]
        command: BalanceCommands,
    },

    /// Micro-deposit verification
    Deposit {
        #[command(subcommand)]
        command: DepositCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum BalanceCommands {
    /// Show the balance of a funding source
    Retrieve { id: String },
}

#[derive(Subcommand, Debug)]
pub enum DepositCommands {
    /// Send two micro-deposits to the funding source
    Initiate { id: String },

    /// Show micro-deposit status
    Retrieve { id: String },

    /// Verify the funding source with the deposited amounts
    Verify {
        id: String,
        #[arg(long)]
        amount1: String,
        #[arg(long)]
        amount2: String,
        #[arg(long, default_value = "USD")]
        currency: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum SandboxCommands {
    /// Process pending sandbox transfers
    Simulations,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings (secrets masked)
    Show,

    /// Show config search paths
    Path,

    /// Create config template
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
