//! Core library for `careful-rm`, the safe rm wrapper.
//!
//! The engine classifies requested paths, runs confirmation gates before
//! bulk or recursive deletes, and can route paths to a per-mountpoint trash
//! directory instead of deleting them. The delete and move primitives, the
//! desktop-trash integration and the interactive prompt are all injected,
//! so the decision logic stays pure given a [`Config`].

pub mod classify;
pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod mount;
pub mod output;
pub mod platform;
pub mod policy;
pub mod prompt;
pub mod trash;
pub mod ui;

pub use classify::{Classified, PathKind};
pub use config::{Config, RecycleMode};
pub use errors::{AbortReason, CarefulRmError, Result};
pub use platform::Platform;
pub use trash::{TRASHINFO_TIME_FORMAT, TrashTarget};
