use clap::Subcommand;
use refomo_core::TimerState;

#[derive(Subcommand)]
pub enum RecordAction {
    /// Persist the in-progress memo now (creates or updates the partial
    /// record)
    Autosave {
        /// Set the memo text before saving
        #[arg(long)]
        memo: Option<String>,
    },
    /// Finalize the completed session into a record
    Save {
        /// Focus level 1-5
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5), default_value = "3")]
        focus_level: u8,
        /// Override the session goal
        #[arg(long)]
        goal: Option<String>,
        #[arg(long)]
        reflection: Option<String>,
        /// Override the autosaved memo
        #[arg(long)]
        memo: Option<String>,
    },
    /// Discard the completed session without writing a record
    Skip,
}

pub fn run(action: RecordAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut coordinator = super::open_coordinator()?;

    match action {
        RecordAction::Autosave { memo } => {
            if let Some(text) = memo {
                coordinator.engine_mut().set_memo(text);
            }
            coordinator.save_memo_record();
            match coordinator.engine().record_id() {
                Some(id) => println!("Memo saved to record {id}"),
                None => println!("Nothing to save: memo is empty"),
            }
        }
        RecordAction::Save {
            focus_level,
            goal,
            reflection,
            memo,
        } => {
            if coordinator.engine().state() != TimerState::Completed {
                return Err("no completed session to record".into());
            }
            coordinator.complete_session();
            coordinator.review_mut().focus_level = focus_level;
            if let Some(goal) = goal {
                coordinator.review_mut().goal = goal;
            }
            if let Some(reflection) = reflection {
                coordinator.review_mut().reflection = reflection;
            }
            if let Some(memo) = memo {
                coordinator.review_mut().memo = memo;
            }
            coordinator.save_record();
            coordinator.finish_session();
            println!("Record saved");
        }
        RecordAction::Skip => {
            if coordinator.engine().state() != TimerState::Completed {
                return Err("no completed session to skip".into());
            }
            coordinator.skip_record();
            coordinator.finish_session();
            println!("Review skipped");
        }
    }

    super::save_engine(coordinator.engine())
}
