use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "qada", version, author, about = "Track missed prayers and pay them back with makeup plans")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Missed prayer ledger
    Missed {
        #[command(subcommand)]
        action: MissedCommands,
    },
    /// Makeup plans
    Plan {
        #[command(subcommand)]
        action: PlanCommands,
    },
    /// Show makeup progress for a time range
    Progress {
        /// daily, weekly, monthly, yearly or all
        #[arg(long)]
        range: Option<String>,
        /// Only count progress on or after this date (YYYY-MM-DD)
        #[arg(long, conflicts_with = "range")]
        since: Option<String>,
    },
    /// Missed prayers and the active plan at a glance
    Overview,
    /// Print the saved state as JSON to stdout
    Export,
}

#[derive(Subcommand, Debug)]
pub enum MissedCommands {
    /// Record missed prayers
    Add {
        /// Prayer name (fajr, dhuhr, asr, maghrib, isha)
        prayer: String,
        /// How many units were missed
        amount: u32,
        /// days, weeks, months or years
        #[arg(long)]
        unit: Option<String>,
    },
    /// Mark missed prayers as made up (also logs progress)
    Complete {
        /// Prayer name
        prayer: String,
        /// Number of prayers made up
        #[arg(long)]
        count: Option<u32>,
    },
    /// Show outstanding missed prayers
    List,
}

#[derive(Subcommand, Debug)]
pub enum PlanCommands {
    /// Create a plan from your missed prayers
    Create {
        /// Plan name
        name: String,
        /// Comma separated prayers, e.g. fajr,isha
        #[arg(long)]
        prayers: String,
        /// with-current, specific-only or any-time
        #[arg(long)]
        strategy: Option<String>,
        /// each-prayer, daily or none
        #[arg(long)]
        notify: Option<String>,
    },
    /// List plans
    List,
    /// Make a plan the active one
    Activate {
        /// Plan id or unique prefix
        id: String,
    },
    /// Mark prayers in a plan as completed
    Complete {
        /// Prayer name
        prayer: String,
        /// Plan id or prefix (defaults to the active plan)
        #[arg(long)]
        plan: Option<String>,
        /// Number of prayers completed
        #[arg(long, default_value = "1")]
        count: u32,
    },
    /// Delete a plan
    Delete {
        /// Plan id or unique prefix
        id: String,
    },
}
