//! Photostamp Sequence Model
//!
//! Defines the data contracts of a batch run:
//! - **Timestamps:** parsing the start time and formatting the overlay text
//! - **Sequencer:** random, monotonically increasing timestamps per photo
//! - **Batch:** input files, timestamp assignments, and output naming
//!
//! Nothing in this crate touches the filesystem; randomness is always
//! supplied by the caller so runs can be reproduced from a seed.

pub mod batch;
pub mod naming;
pub mod sequencer;
pub mod timestamp;

pub use batch::*;
pub use naming::*;
pub use sequencer::*;
pub use timestamp::*;
