//! # Refomo Core Library
//!
//! Core logic for the Refomo focus timer: the session state machine, the
//! flat-file record store, and the coordinator that glues them. The GUI
//! (and the bundled CLI) are thin shells over this crate - they render
//! state and forward actions, nothing more.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a tick-driven state machine; the host calls
//!   `tick()` once per second while a session or breathing break is live
//! - **Record Store**: one pretty-printed JSON file of session records,
//!   whole-file read-modify-write, never fatal on I/O failure
//! - **Session Coordinator**: memo autosave and the post-session review,
//!   the only two paths that write session records
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: session state machine with the breathing sub-state
//! - [`RecordStore`]: JSON-file persistence for [`SessionRecord`]s
//! - [`SessionCoordinator`]: autosave/review glue over engine and store
//! - [`Config`]: TOML application configuration

pub mod error;
pub mod events;
pub mod session;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, StorageError};
pub use events::Event;
pub use session::{ReviewForm, SessionCoordinator};
pub use storage::{Config, RecordStore, SessionRecord};
pub use timer::{BreathPhase, Meditation, PendingRecord, TimerEngine, TimerState};
