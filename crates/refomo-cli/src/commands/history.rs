use clap::Subcommand;
use refomo_core::SessionRecord;
use uuid::Uuid;

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List all sessions, newest first, grouped by day
    List {
        /// Emit the raw records as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Print one record as JSON
    Show { id: String },
    /// Edit a stored record in place
    Edit {
        id: String,
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        focus_level: Option<u8>,
        #[arg(long)]
        goal: Option<String>,
        #[arg(long)]
        reflection: Option<String>,
        #[arg(long)]
        memo: Option<String>,
    },
    /// Delete a stored record
    Delete { id: String },
}

fn parse_id(id: &str) -> Result<Uuid, Box<dyn std::error::Error>> {
    Ok(Uuid::parse_str(id)?)
}

fn summary(record: &SessionRecord) -> String {
    let planned_min = record.planned_duration / 60;
    let actual = match record.actual_duration {
        Some(secs) => format!("{}m", secs / 60),
        None => "in progress".to_string(),
    };
    let mut line = format!("{planned_min}m planned, {actual}");
    if let Some(level) = record.focus_level {
        line.push_str(&format!(", focus {level}/5"));
    }
    if let Some(goal) = &record.goal {
        line.push_str(&format!("  goal: {goal}"));
    }
    line
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let coordinator = super::open_coordinator()?;

    match action {
        HistoryAction::List { json } => {
            let records = coordinator.history();
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
                return Ok(());
            }
            if records.is_empty() {
                println!("No sessions recorded yet");
                return Ok(());
            }
            let mut current_day = None;
            for record in &records {
                let day = record.start_time.date_naive();
                if current_day != Some(day) {
                    println!("{}", day.format("%Y-%m-%d"));
                    current_day = Some(day);
                }
                println!(
                    "  {}  {}  {}",
                    record.id,
                    record.start_time.format("%H:%M"),
                    summary(record)
                );
            }
        }
        HistoryAction::Show { id } => {
            let id = parse_id(&id)?;
            match coordinator.record(id) {
                Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
                None => return Err(format!("no record with id {id}").into()),
            }
        }
        HistoryAction::Edit {
            id,
            focus_level,
            goal,
            reflection,
            memo,
        } => {
            let id = parse_id(&id)?;
            let Some(mut record) = coordinator.record(id) else {
                return Err(format!("no record with id {id}").into());
            };
            if let Some(level) = focus_level {
                record.focus_level = Some(level);
            }
            if let Some(goal) = goal {
                record.goal = Some(goal);
            }
            if let Some(reflection) = reflection {
                record.reflection = Some(reflection);
            }
            if let Some(memo) = memo {
                record.memo = Some(memo);
            }
            coordinator.update_record(record.clone());
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        HistoryAction::Delete { id } => {
            let id = parse_id(&id)?;
            coordinator.delete_record(id);
            println!("Deleted {id}");
        }
    }

    Ok(())
}
