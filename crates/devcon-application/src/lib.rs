pub mod presentation;
pub mod session;

pub use presentation::{PresentationAdapter, RenderFrame, RenderedTurn, Speaker, TurnBody};
pub use session::{BackendProbe, SessionController, SessionDeps, SessionState, SessionView};
