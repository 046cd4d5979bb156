use clap::Subcommand;
use claritycoach_core::{Config, Database, Event};

use super::{apply_timer_limits, load_session, save_session};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start (or restart) a focus timer
    Start {
        /// Duration in minutes; defaults to timer.default_minutes
        minutes: Option<u32>,
    },
    /// Pause a running timer
    Pause,
    /// Resume a paused timer
    Resume,
    /// Stop and reset the timer
    Stop,
    /// Print the current timer state as JSON
    Status,
}

fn print_event(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(event)?);
    Ok(())
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open()?;
    let mut ctx = load_session(&db);
    apply_timer_limits(&mut ctx, &config);
    let timer = &mut ctx.timer;

    match action {
        TimerAction::Start { minutes } => {
            let event = timer.start(minutes.unwrap_or(config.timer.default_minutes));
            print_event(&event)?;
        }
        TimerAction::Pause | TimerAction::Resume | TimerAction::Stop => {
            let event = match action {
                TimerAction::Pause => timer.pause(),
                TimerAction::Resume => timer.resume(),
                _ => timer.stop(),
            };
            match event {
                Some(e) => print_event(&e)?,
                // No-op transition: report where the timer is instead.
                None => print_event(&timer.snapshot())?,
            }
        }
        TimerAction::Status => {
            let completed = timer.reconcile();
            print_event(&timer.snapshot())?;
            if let Some(event) = completed {
                print_event(&event)?;
            }
        }
    }

    save_session(&db, &ctx)?;
    Ok(())
}
