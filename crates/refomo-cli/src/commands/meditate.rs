use clap::Subcommand;

#[derive(Subcommand)]
pub enum MeditateAction {
    /// Begin a 64-second breathing break (running or paused session only)
    Start,
    /// End the breathing break early, crediting only elapsed time
    Skip,
    /// Print the current breath phase and countdown
    Status,
}

pub fn run(action: MeditateAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut coordinator = super::open_coordinator()?;

    match action {
        MeditateAction::Start => match coordinator.engine_mut().start_meditation() {
            Some(event) => super::print_event(&event)?,
            None => super::print_event(&coordinator.engine().snapshot())?,
        },
        MeditateAction::Skip => match coordinator.engine_mut().skip_meditation() {
            Some(event) => super::print_event(&event)?,
            None => super::print_event(&coordinator.engine().snapshot())?,
        },
        MeditateAction::Status => {
            super::print_event(&coordinator.engine().snapshot())?;
        }
    }

    super::save_engine(coordinator.engine())
}
