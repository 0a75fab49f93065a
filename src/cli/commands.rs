use clap::{Parser, Subcommand};

/// `iris-recall` - inspect and maintain the retained message history.
#[derive(Parser, Debug)]
#[command(name = "iris-recall")]
#[command(version = "0.1.0")]
#[command(about = "Operator tools for the message history cache.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one eviction sweep with the configured retention policy
    Sweep,

    /// Print retained records for a channel, newest first
    List {
        /// Channel to list
        #[arg(short, long)]
        channel: String,

        /// Only records from this user
        #[arg(short, long)]
        user: Option<String>,

        /// Maximum number of records to print
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Delete every retained record
    Purge,
}
