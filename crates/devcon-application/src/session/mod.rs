//! Chat session services.
//!
//! A session owns one message log and one availability signal for as long
//! as the chat view is mounted.

mod controller;
mod probe;
mod state;

pub use controller::{
    APOLOGY_MESSAGE, DEGRADED_MODE_MESSAGE, SessionController, SessionDeps,
};
pub use probe::BackendProbe;
pub use state::{SessionState, SessionView};
