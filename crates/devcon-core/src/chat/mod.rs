//! Chat domain module.
//!
//! - `turn`: immutable conversation turns and id minting
//! - `log`: the ordered `MessageLog`
//! - `history`: the bounded `HistoryWindow` forwarded to the backend
//! - `availability`: the probe's tri-state `SessionAvailability`
//! - `memory`: the optional `UserMemory` record

mod availability;
mod history;
mod log;
mod memory;
mod turn;

pub use availability::SessionAvailability;
pub use history::{DEFAULT_HISTORY_WINDOW, HistoryEntry, HistoryWindow};
pub use log::MessageLog;
pub use memory::{UserMemory, detect_user_name};
pub use turn::{
    ChatTurn, TurnIdGenerator, TurnRole, TurnTag, WELCOME_MESSAGE, WELCOME_TURN_ID,
    truncate_to_millis,
};
