// SPDX-License-Identifier: GPL-3.0-only

//! Capture engine
//!
//! Sequencing (countdown, multi-shot accumulation) lives in [`sequence`];
//! turning a live camera frame into a still lives in [`snapshot`]. The
//! booth's event loop drives both.

pub mod sequence;
pub mod snapshot;

pub use sequence::{CaptureSequence, SequenceStep};
