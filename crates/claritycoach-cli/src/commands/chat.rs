use std::path::Path;

use chrono::Local;
use clap::Args;
use claritycoach_core::journal::{current_streak, entry_dates, streak_pill, JournalStore};
use claritycoach_core::{Config, Database, Dialog, DialogConfig, KnowledgeBase, SessionContext, Turn};

use super::{apply_timer_limits, load_session, save_session};

#[derive(Args)]
pub struct ChatArgs {
    /// Message text; multiple words are joined with spaces
    pub text: Vec<String>,
    /// Forget the pending offer, timer, and history before this turn
    #[arg(long)]
    pub reset: bool,
    /// Print the full reply as JSON
    #[arg(long)]
    pub json: bool,
}

fn build_dialog(config: &Config) -> Dialog {
    let dialog = Dialog::new(DialogConfig::from(config));
    match config.fallback.knowledge_base.as_deref() {
        Some(path) => dialog.with_fallback(Box::new(KnowledgeBase::load_or_empty(Path::new(path)))),
        None => dialog,
    }
}

pub fn run(args: ChatArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut db = Database::open()?;
    let mut ctx = if args.reset {
        SessionContext::new()
    } else {
        load_session(&db)
    };
    apply_timer_limits(&mut ctx, &config);

    let dialog = build_dialog(&config);
    let text = args.text.join(" ");
    let (ctx, reply) = dialog.handle_turn(ctx, &Turn::new(text.as_str()), &mut db)?;
    db.log_turn(&text, &reply.intent_tag(), reply.escalated)?;
    save_session(&db, &ctx)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reply)?);
        return Ok(());
    }

    println!("{}", reply.text);
    let entries = db.list(config.journal.streak_window)?;
    let streak = current_streak(entry_dates(&entries, &Local), Local::now().date_naive());
    println!();
    println!("[{}]", streak_pill(streak));
    Ok(())
}
