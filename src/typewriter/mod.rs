//! Typewriter pagination engine.
//!
//! Reveals a [`Message`] one character at a time inside a [`TextBox`],
//! wrapping words at the box edge. The box halts for the player's advance
//! action at line breaks, at the end of the message, and whenever it is full
//! of text the player has not acknowledged yet. Advancing grants scroll
//! credit; the box then scrolls up a pixel per step to make room for new
//! lines while keeping the most recent screenful visible.
//!
//! All suspension lives in the box's [`BoxPhase`] and counters: every call
//! returns to the host, and the next call resumes from that state.

mod compose;
mod paginate;
mod process;
mod state;

pub use compose::{compose_line, LineEnd};
pub use paginate::{paginate, Pagination};
pub use process::{process_text_box, SPEED_UP_STEP};
pub use state::{BoxPhase, Message, OversizedWords, TextBox, SCROLL_STEP};
