//! Runtime module - headless message loop
//!
//! Commands that wait (debounce timers, delayed clicks) are handed to a
//! timer thread that sends their message back over an mpsc channel once due;
//! the loop feeds those messages through `update`.

mod app;
mod timers;

pub use app::Runtime;
pub use timers::TimerThread;
