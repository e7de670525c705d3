use chrono::{Local, Utc};
use clap::Subcommand;
use garbage_reminder_core::{ActivityStore, Config, ContentState, LiveActivity};

#[derive(Subcommand)]
pub enum ActivityAction {
    /// Start a live activity showing this week's bins
    Start,
    /// Refresh the running activity with this week's bins
    Update,
    /// End the running activity
    End,
    /// Print the lock screen view
    Show {
        /// Print the activity as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: ActivityAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = ActivityStore::open()?;
    let lang = config.ui.language;
    let label = config.bin_label_for(Local::now().date_naive());

    match action {
        ActivityAction::Start => {
            let activity = LiveActivity::start_for_week(label, lang, Utc::now());
            store.save(&activity)?;
            println!("{}", activity.render_lock_screen());
        }
        ActivityAction::Update => {
            let mut activity = store.current()?;
            activity.update(ContentState::for_week(label, lang), Utc::now())?;
            store.save(&activity)?;
            println!("{}", activity.render_lock_screen());
        }
        ActivityAction::End => {
            let mut activity = store.current()?;
            activity.end(Utc::now())?;
            store.save(&activity)?;
            println!("live activity ended");
        }
        ActivityAction::Show { json } => {
            let activity = store.current()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&activity)?);
            } else if activity.is_active() {
                println!("{}", activity.render_lock_screen());
            } else {
                println!("live activity ended");
            }
        }
    }
    Ok(())
}
