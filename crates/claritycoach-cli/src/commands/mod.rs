pub mod chat;
pub mod classify;
pub mod config;
pub mod journal;
pub mod timer;

use claritycoach_core::{Config, Database, SessionContext};

const SESSION_KEY: &str = "chat_session";

/// The single CLI session, restored from the kv table.
///
/// An unreadable stored session starts over rather than failing the command.
pub fn load_session(db: &Database) -> SessionContext {
    if let Ok(Some(json)) = db.kv_get(SESSION_KEY) {
        match serde_json::from_str::<SessionContext>(&json) {
            Ok(ctx) => return ctx,
            Err(e) => tracing::warn!(error = %e, "discarding unreadable chat session"),
        }
    }
    SessionContext::new()
}

pub fn save_session(db: &Database, ctx: &SessionContext) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(ctx)?;
    db.kv_set(SESSION_KEY, &json)?;
    Ok(())
}

/// Configured timer ceiling applied to the session timer.
pub fn apply_timer_limits(ctx: &mut SessionContext, config: &Config) {
    ctx.timer.set_max_minutes(config.timer.max_minutes);
}
