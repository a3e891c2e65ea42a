use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "duely", about = "Track recurring and one-off bills per month")]
pub struct Cli {
    /// Directory holding bills.json and settings.json
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show bills for the current and next month (or one chosen month)
    List {
        /// A specific month, as YYYY-MM
        #[arg(long)]
        month: Option<String>,
        /// Show paid bills even when the hide-paid setting is on
        #[arg(long)]
        all: bool,
    },
    /// Add a bill template
    Add {
        title: String,
        /// Amount, exact decimal; comma decimal separator accepted
        amount: String,
        /// Repeat monthly on this day (1-31)
        #[arg(long, conflicts_with = "date")]
        day: Option<u32>,
        /// One-off bill due on this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// Currency code; defaults to the configured currency
        #[arg(long)]
        currency: Option<String>,
    },
    /// Mark a bill paid for a month
    Pay {
        /// Template id (or unique id prefix) or exact title
        template: String,
        /// Month to mark, as YYYY-MM; defaults to the current month
        #[arg(long)]
        month: Option<String>,
    },
    /// Mark a bill unpaid for a month
    Unpay {
        template: String,
        #[arg(long)]
        month: Option<String>,
    },
    /// Remove a template and all of its paid-status records
    Remove { template: String },
    /// Report whether any unpaid bill is due soon (exit code 1 when urgent)
    Alert,
    /// Show current settings
    Settings,
    /// Change settings
    Set {
        #[arg(long)]
        hide_paid: Option<bool>,
        #[arg(long)]
        alert_days: Option<u32>,
        /// Days of dated backups to keep (0 keeps everything)
        #[arg(long)]
        retention: Option<u32>,
        #[arg(long)]
        currency: Option<String>,
    },
    /// List dated backups of the data file
    Backups,
}
