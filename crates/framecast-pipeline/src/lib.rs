//! Framecast Pipeline - Frame transform and streaming discipline
//!
//! This crate holds the per-frame work: nearest-neighbor decimation with
//! BGRX-to-BGR repacking, count-based frame admission, and the controller
//! that wires both to a capture callback and a stream sink.

pub mod controller;
pub mod decimator;
pub mod gate;

pub use controller::{PipelineController, PipelineMonitor};
pub use decimator::FrameDecimator;
pub use gate::RateGate;
