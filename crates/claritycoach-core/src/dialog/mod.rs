//! Multi-turn dialogue: offer sub-dialogue, reply composition, and the turn
//! router that ties them to the timer and journal.

mod action;
pub mod composer;
mod context;
mod engine;
pub mod offer;
mod session;

pub use action::Action;
pub use composer::{compose, offer_prompt, rewrite_kindly, Composition};
pub use context::{ChatMessage, Role, SessionContext};
pub use engine::{Classification, Dialog, DialogConfig, Route, Turn, TurnReply, JOURNAL_SAVED_TEXT};
pub use offer::{OfferState, OfferStep};
pub use session::SessionRegistry;
