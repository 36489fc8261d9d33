//! Photostamp Batch Pipeline
//!
//! Orchestrates one batch run:
//!
//! ```text
//! Init ─► Cleared ─► Enumerated ─► Dispatched ─► Joined ─► Packaged ─► Done
//!  │         │            │              │           │          │
//!  │   sweep target   list source   one task per   await all   photos.zip
//!  │                  (sorted)      photo          handles
//! ```
//!
//! Any failure before dispatch stops the run. Once workers are dispatched,
//! every one of them runs to completion; failures are aggregated and the
//! archive is only written when all photos were stamped.

pub mod packager;
pub mod runner;
pub mod workspace;

pub use packager::package;
pub use runner::*;
pub use workspace::{clear_target, enumerate_inputs};
