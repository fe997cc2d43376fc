//! Core types for nvcombine
//!
//! This crate provides the error types, configuration, and logging
//! infrastructure shared by the NV04 translator, the push buffer debugger
//! and the dump tool.

pub mod config;
pub mod error;
pub mod logging;

pub use config::Config;
pub use error::{CombinerError, NvError, PushBufError, Result};
