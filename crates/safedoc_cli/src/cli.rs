//! Command-line surface of the `safedoc` binary.

use clap::{ArgGroup, Args, Parser, Subcommand};
use safedoc_core::default_log_level;
use std::path::PathBuf;
use uuid::Uuid;

/// safedoc - safety forms and risk maps backed by a local SQLite file
#[derive(Debug, Parser)]
#[command(name = "safedoc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Document database file
    #[arg(long, global = true, env = "SAFEDOC_DB", default_value = "safedoc.sqlite3")]
    pub db: PathBuf,

    /// Directory for rotating log files; logging stays off when unset
    #[arg(long, global = true, env = "SAFEDOC_LOG_DIR", value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error); defaults by build mode
    #[arg(long, global = true, env = "SAFEDOC_LOG_LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Requested log level, or the build-mode default when unset.
    pub fn effective_log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(default_log_level())
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check core linkage
    Ping,
    /// Print the core version
    Version,
    /// List predefined risks with their quadrants
    Risks,
    /// Manage registered employees
    #[command(subcommand)]
    Employee(EmployeeCommand),
    /// Manage emergency field risk analyses
    #[command(subcommand)]
    Emergency(EmergencyCommand),
    /// Count stored documents per collection
    Summary,
    /// Render a stored form to a text file
    Export(ExportArgs),
}

#[derive(Debug, Subcommand)]
pub enum EmployeeCommand {
    /// Register an employee
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        registration: String,
        #[arg(long)]
        role: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long)]
        email: Option<String>,
    },
    /// List employees in registration order
    List,
    /// Remove an employee
    Remove { id: Uuid },
}

#[derive(Debug, Subcommand)]
pub enum EmergencyCommand {
    /// Create and store a new analysis
    New {
        #[arg(long)]
        date: String,
        #[arg(long)]
        time: String,
        /// 360° walk-around analysis text
        #[arg(long)]
        analysis: String,
        #[arg(long, default_value = "")]
        tag: String,
        #[arg(long, default_value = "")]
        om: String,
    },
    /// Select or clear one risk and reconcile both risk maps
    Toggle(ToggleArgs),
    /// Sign an employee onto the analysis team
    Sign { id: Uuid, employee: Uuid },
    /// Print one analysis
    Show { id: Uuid },
    /// List stored analyses
    List,
    /// Delete one analysis
    Delete { id: Uuid },
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("state").required(true).args(["on", "off"])))]
pub struct ToggleArgs {
    pub id: Uuid,
    pub risk: u32,
    /// Mark the risk as identified
    #[arg(long)]
    pub on: bool,
    /// Clear the risk
    #[arg(long)]
    pub off: bool,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Collection id, e.g. emergency_analyses
    pub collection: String,
    pub id: Uuid,
    /// Output directory
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
}
