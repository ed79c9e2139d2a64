mod event;
mod normalize;
mod raw;

pub use event::{EventKind, PbpEvent};
pub use normalize::normalize_game;
pub use raw::{RawPlay, action_type, msg_type};
