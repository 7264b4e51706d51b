use crate::app::commands::Format;
use crate::config::toml_config::PlannerConfig;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "course-planner")]
#[command(about = "Browse a course catalog and its prerequisites")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Course file to load at startup
    #[arg(short, long)]
    pub file: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print every course in id order
    List {
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print one course with its prerequisites
    Show {
        id: String,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

impl CliConfig {
    /// `--file` wins over the configuration file.
    pub fn catalog_path(&self, file_config: &PlannerConfig) -> Option<String> {
        self.file
            .clone()
            .or_else(|| file_config.catalog_path().map(str::to_string))
    }
}
