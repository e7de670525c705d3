use clap::{Subcommand, ValueEnum};
use garbage_reminder_core::{Authorization, FileNotificationCenter, NotificationCenter};

#[derive(Subcommand)]
pub enum NotifyAction {
    /// List pending notifications as JSON
    List,
    /// Remove all pending notifications
    Clear,
    /// Record the notification permission answer
    Permission {
        #[arg(value_enum)]
        answer: PermissionAnswer,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PermissionAnswer {
    Grant,
    Deny,
}

pub fn run(action: NotifyAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut center = FileNotificationCenter::open()?;

    match action {
        NotifyAction::List => {
            println!("{}", serde_json::to_string_pretty(&center.pending())?);
        }
        NotifyAction::Clear => {
            center.remove_all()?;
            println!("pending notifications cleared");
        }
        NotifyAction::Permission { answer } => {
            let authorization = match answer {
                PermissionAnswer::Grant => Authorization::Authorized,
                PermissionAnswer::Deny => Authorization::Denied,
            };
            center.set_authorization(authorization)?;
            println!("{}", serde_json::to_string(&authorization)?);
        }
    }
    Ok(())
}
