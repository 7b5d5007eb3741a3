//! Sink trait for packed frame delivery

use crate::error::Result;
use crate::frame::PackedFrame;

/// Destination for packed frames
///
/// One `send` per admitted frame; the sink transmits the frame's bytes in
/// order and reports transport failure instead of swallowing it. There is
/// exactly one writer and one reader of the packed buffer per cycle, so the
/// sink may borrow the frame for the duration of the call only.
pub trait FrameSink {
    fn send(&mut self, frame: &PackedFrame) -> Result<()>;
}
