//! Debugging tools for nvcombine push buffers

pub mod pushbuf_debugger;

pub use pushbuf_debugger::{CommandEntry, PushBufDebugger};
