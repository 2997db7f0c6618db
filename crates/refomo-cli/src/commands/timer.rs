use clap::Subcommand;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start a session from the idle dial
    Start {
        /// Override the dial before starting (1-60)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=60))]
        minutes: Option<u32>,
    },
    /// One action for the main button: start, pause, resume, or flip the
    /// overtime pause
    Toggle,
    /// Pause the countdown (or the overtime count)
    Pause,
    /// Resume the countdown (or the overtime count)
    Resume,
    /// Advance the timer by one-second heartbeats
    Tick {
        /// Number of ticks to apply
        #[arg(long, default_value = "1")]
        count: u32,
    },
    /// Move the idle dial by pointer angle in degrees
    Select {
        /// Angle in degrees; negative values wrap
        #[arg(long, allow_hyphen_values = true)]
        angle: f64,
    },
    /// Set the session goal text
    Goal { text: String },
    /// Set the in-progress memo text (persist it with `record autosave`)
    Memo { text: String },
    /// Print current timer state as JSON
    Status,
    /// Reset to idle, discarding the session
    Reset,
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut coordinator = super::open_coordinator()?;

    match action {
        TimerAction::Start { minutes } => {
            if let Some(m) = minutes {
                coordinator.engine_mut().set_selected_minutes(m);
            }
            match coordinator.engine_mut().start() {
                Some(event) => super::print_event(&event)?,
                None => super::print_event(&coordinator.engine().snapshot())?,
            }
        }
        TimerAction::Toggle => match coordinator.engine_mut().toggle() {
            Some(event) => super::print_event(&event)?,
            None => super::print_event(&coordinator.engine().snapshot())?,
        },
        TimerAction::Pause => match coordinator.engine_mut().pause() {
            Some(event) => super::print_event(&event)?,
            None => super::print_event(&coordinator.engine().snapshot())?,
        },
        TimerAction::Resume => match coordinator.engine_mut().resume() {
            Some(event) => super::print_event(&event)?,
            None => super::print_event(&coordinator.engine().snapshot())?,
        },
        TimerAction::Tick { count } => {
            for _ in 0..count {
                // Edge events (finished, breath phase, break timeout)
                // surface even when many ticks are applied at once.
                if let Some(event) = coordinator.engine_mut().tick() {
                    super::print_event(&event)?;
                }
            }
            super::print_event(&coordinator.engine().snapshot())?;
        }
        TimerAction::Select { angle } => {
            match coordinator.engine_mut().select_minutes_by_angle(angle) {
                Some(event) => super::print_event(&event)?,
                None => super::print_event(&coordinator.engine().snapshot())?,
            }
        }
        TimerAction::Goal { text } => {
            coordinator.engine_mut().set_goal(text);
            super::print_event(&coordinator.engine().snapshot())?;
        }
        TimerAction::Memo { text } => {
            coordinator.engine_mut().set_memo(text);
            super::print_event(&coordinator.engine().snapshot())?;
        }
        TimerAction::Status => {
            super::print_event(&coordinator.engine().snapshot())?;
        }
        TimerAction::Reset => {
            if let Some(event) = coordinator.engine_mut().reset() {
                super::print_event(&event)?;
            }
        }
    }

    super::save_engine(coordinator.engine())
}
