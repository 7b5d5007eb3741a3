//! Framecast Core - Shared types and wire definitions
//!
//! This crate provides the foundational types used across all Framecast
//! components: frame views, the packed output buffer, configuration, the
//! error taxonomy, and the sink trait.

pub mod config;
pub mod error;
pub mod frame;
pub mod sink;

pub use config::{DownscaleConfig, Quality, StreamConfig};
pub use error::{Error, Result};
pub use frame::{PackedFrame, PixelFormat, RawFrame};
pub use sink::FrameSink;
