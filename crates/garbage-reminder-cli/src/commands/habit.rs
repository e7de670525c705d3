use garbage_reminder_core::habit::{bucket_counts, most_common_bucket, Suggestion};
use garbage_reminder_core::Config;
use serde::Serialize;

use super::local_hhmm;

#[derive(Serialize)]
struct Bucket {
    start: i64,
    local_time: String,
    count: usize,
}

#[derive(Serialize)]
struct HabitReport {
    entries: usize,
    buckets: Vec<Bucket>,
    most_common: Option<i64>,
    suggestion: Option<Suggestion>,
}

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let log = config.habit_log();

    let buckets: Vec<Bucket> = bucket_counts(log.entries())
        .into_iter()
        .map(|(start, count)| Bucket {
            start,
            local_time: local_hhmm(start),
            count,
        })
        .collect();
    let report = HabitReport {
        entries: log.len(),
        most_common: (!log.is_empty()).then(|| most_common_bucket(log.entries(), config.reminder.time)),
        suggestion: config.suggestion(),
        buckets,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} saved reminder times", report.entries);
    for bucket in &report.buckets {
        println!("  {}  {}", bucket.local_time, "#".repeat(bucket.count));
    }
    match report.suggestion {
        Some(s) => println!("suggested: {} ({} saves nearby)", local_hhmm(s.reminder_time), s.supporting_entries),
        None => println!("no suggestion yet"),
    }
    Ok(())
}
