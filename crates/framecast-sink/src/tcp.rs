//! Blocking TCP frame sink

use framecast_core::{Error, FrameSink, PackedFrame, Result, StreamConfig};
use std::io::Write;
use std::net::TcpStream;
use tracing::{debug, info};

/// Stream sink over a single persistent TCP connection
///
/// Writes are synchronous and unbuffered; one `send` per frame, blocking
/// on the transport's own defaults with no timeout, no retry, and no
/// reconnect. Once a send fails the connection is unusable and the
/// pipeline must be restarted.
#[derive(Debug)]
pub struct TcpSink {
    stream: TcpStream,
    endpoint: String,
    frames_sent: u64,
}

impl TcpSink {
    /// Resolve the endpoint, connect, and disable send-coalescing
    ///
    /// A failure here is startup-fatal by design; nothing is retried.
    pub fn connect(config: &StreamConfig) -> Result<Self> {
        let endpoint = config.endpoint();
        info!("Connecting to {}...", endpoint);

        let stream = TcpStream::connect(&endpoint).map_err(|e| Error::Connection {
            endpoint: endpoint.clone(),
            message: e.to_string(),
        })?;

        // TCP_NODELAY: trade packet count for per-frame latency
        stream.set_nodelay(true).map_err(|e| Error::Connection {
            endpoint: endpoint.clone(),
            message: format!("Failed to disable send-coalescing: {}", e),
        })?;

        info!("Connected to {}", endpoint);

        Ok(Self {
            stream,
            endpoint,
            frames_sent: 0,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn frames_sent(&self) -> u64 {
        self.frames_sent
    }
}

impl FrameSink for TcpSink {
    /// Transmit one packed frame, surfacing short or failed writes
    fn send(&mut self, frame: &PackedFrame) -> Result<()> {
        self.stream
            .write_all(frame.as_bytes())
            .map_err(|e| Error::ConnectionLost(format!("{}: {}", self.endpoint, e)))?;

        self.frames_sent += 1;
        debug!(
            "Sent frame {} ({} bytes) to {}",
            self.frames_sent,
            frame.len(),
            self.endpoint
        );
        Ok(())
    }
}

impl Drop for TcpSink {
    fn drop(&mut self) {
        let _ = self.stream.shutdown(std::net::Shutdown::Both);
        debug!(
            "Closed connection to {} after {} frames",
            self.endpoint, self.frames_sent
        );
    }
}
