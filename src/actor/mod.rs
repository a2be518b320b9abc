//! Background threads: input polling and terminal-size watching.
//!
//! Both follow the same shape: a dedicated `std::thread` with an
//! `AtomicBool` shutdown flag, signaled on drop and joinable explicitly.
//! The input actor reports through a crossbeam channel; the resize watcher
//! owns its whole resize-and-redraw cycle via a callback instead, so the
//! cycle runs entirely on the poller thread.

mod input;
mod messages;
mod resize;

pub use input::InputActor;
pub use messages::{InputEvent, KeyCode, KeyEvent, KeyModifiers};
pub use resize::{ResizeWatcher, DEFAULT_POLL_INTERVAL};
