use chrono::{Local, Utc};
use clap::Subcommand;
use claritycoach_core::journal::{current_streak, entry_dates, streak_pill, tag_hints, weekly_summary, JournalStore};
use claritycoach_core::{Config, Database};

#[derive(Subcommand)]
pub enum JournalAction {
    /// Add an entry; surrounding whitespace is trimmed
    Add {
        /// Entry text; multiple words are joined with spaces
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// List recent entries, newest first
    List {
        #[arg(long, default_value = "20")]
        limit: usize,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the current daily streak
    Streak,
    /// Summarize the last seven days
    Summary,
}

pub fn run(action: JournalAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut db = Database::open()?;

    match action {
        JournalAction::Add { text } => {
            let text = text.join(" ");
            let text = text.trim();
            if text.is_empty() {
                return Err("journal text is empty".into());
            }
            let entry = db.append(text)?;
            println!("saved entry #{}", entry.id);
        }
        JournalAction::List { limit, json } => {
            let entries = db.list(limit)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if entries.is_empty() {
                println!("no journal entries yet");
            } else {
                for entry in &entries {
                    let when = entry.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M");
                    let tags = tag_hints(&entry.text);
                    if tags.is_empty() {
                        println!("{when}  {}", entry.text);
                    } else {
                        println!("{when}  {}  [{}]", entry.text, tags.join(", "));
                    }
                }
            }
        }
        JournalAction::Streak => {
            let entries = db.list(config.journal.streak_window)?;
            let streak = current_streak(entry_dates(&entries, &Local), Local::now().date_naive());
            println!("{}", streak_pill(streak));
        }
        JournalAction::Summary => {
            let entries = db.list(config.journal.summary_limit)?;
            println!("{}", weekly_summary(&entries, Utc::now(), &Local));
        }
    }
    Ok(())
}
