use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "garbage-reminder", version, about = "Which garbage bins go out this week")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which bins go out this week
    Week {
        /// Date to check instead of today (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Home screen: this week's bins and the reminder; schedules the weekly reminder
    Home,
    /// Reminder time and day
    Reminder {
        #[command(subcommand)]
        action: commands::reminder::ReminderAction,
    },
    /// Reminder habit analysis
    Habit {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render the home-screen widget
    Widget {
        /// Number of hourly timeline entries
        #[arg(long, default_value_t = garbage_reminder_core::widget::DEFAULT_TIMELINE_HOURS)]
        hours: u32,
        /// Print the timeline as JSON
        #[arg(long)]
        json: bool,
    },
    /// Pending notifications and permission
    Notify {
        #[command(subcommand)]
        action: commands::notify::NotifyAction,
    },
    /// Lock-screen live activity
    Activity {
        #[command(subcommand)]
        action: commands::activity::ActivityAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Week { date, json } => commands::week::run(date, json),
        Commands::Home => commands::home::run(),
        Commands::Reminder { action } => commands::reminder::run(action),
        Commands::Habit { json } => commands::habit::run(json),
        Commands::Widget { hours, json } => commands::widget::run(hours, json),
        Commands::Notify { action } => commands::notify::run(action),
        Commands::Activity { action } => commands::activity::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
