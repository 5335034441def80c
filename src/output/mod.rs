pub mod columns;
pub mod display;
mod session;

pub use columns::resolve_width;
pub use session::{new_session_id, Session, SessionRecorder};
