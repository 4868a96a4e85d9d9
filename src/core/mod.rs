//! Core application primitives (scheduler, runtime)

pub mod runtime;
pub mod scheduler;

pub use runtime::*;
pub use scheduler::*;
