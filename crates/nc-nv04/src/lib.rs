//! NV04 texture environment translation for nvcombine
//!
//! The NV04 "multitexture triangle" object has two texture units, each
//! followed by a fixed four-input register combiner. This crate turns
//! GL texture environment combine state into the combiner words those
//! units expect and writes them to a push buffer.

pub mod combiner;
pub mod format;
pub mod gl;
pub mod methods;
pub mod pushbuf;
pub mod state;
pub mod texenv;

pub use combiner::{synthesize, CombinerRequest, CombinerWord};
pub use pushbuf::{CommandBuffer, PushBuffer};
pub use state::{Context, Engine, TexUnitState};
pub use texenv::{emit_tex_env, emit_tex_envs, TexEnvOutcome};
