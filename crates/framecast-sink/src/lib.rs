//! Framecast Sink - Persistent outbound stream connection
//!
//! One long-lived TCP connection to a fixed remote endpoint, with Nagle's
//! algorithm disabled for per-frame latency. The wire format is bare: each
//! admitted frame is exactly `target_width * target_height * 3` bytes of
//! row-major BGR, no header, no delimiter; the receiver knows the
//! dimensions out of band.

pub mod tcp;

pub use tcp::TcpSink;
