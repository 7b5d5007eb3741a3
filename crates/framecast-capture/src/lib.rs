//! Framecast Capture - The capture subsystem boundary
//!
//! This crate defines the contract the pipeline consumes frames through:
//! a device is opened by its backend constructor, delivers frames through a
//! registered callback on its own context, and guarantees on stop that no
//! callback is in flight or will start again. The synthetic backend drives
//! the pipeline without hardware, for demos and tests.

pub mod synthetic;

pub use synthetic::SyntheticCapture;

use framecast_core::{RawFrame, Result};
use std::ops::ControlFlow;

/// Per-frame delivery callback
///
/// Invoked once per captured frame, serialized (no two invocations run
/// concurrently). The frame view is valid only for the duration of the
/// call. Returning `Break` ends delivery from inside the callback context.
pub type FrameCallback = Box<dyn FnMut(RawFrame<'_>) -> ControlFlow<()> + Send>;

/// A capture device delivering frames to a registered callback
///
/// Opening a device is each backend's constructor; closing happens on drop.
pub trait CaptureDevice {
    /// Begin frame delivery to `callback`
    ///
    /// Fails if delivery is already running.
    fn start_delivery(&mut self, callback: FrameCallback) -> Result<()>;

    /// Stop frame delivery
    ///
    /// Barrier contract: must not return until no callback is in flight and
    /// no further callback will start. Teardown of resources the callback
    /// touches is only safe after this returns.
    fn stop_delivery(&mut self) -> Result<()>;
}
