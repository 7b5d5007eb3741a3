//! Framecast - Low-bandwidth remote camera preview
//!
//! Ingests raw BGRX frames from a capture source, decimates each one to a
//! small packed BGR layout, and forwards the result over a persistent TCP
//! connection with minimal added latency. This binary is the producer half
//! of the preview link; the receiver reassembles frames from the raw byte
//! stream using out-of-band dimensions.

use anyhow::Result;
use clap::Parser;
use framecast_capture::{CaptureDevice, SyntheticCapture};
use framecast_core::{DownscaleConfig, PackedFrame, Quality, StreamConfig};
use framecast_pipeline::{PipelineController, RateGate};
use framecast_sink::TcpSink;
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

// Compiled-in defaults; every flag below exists to override one of them.
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 12345;
const DEFAULT_SOURCE_WIDTH: u32 = 2304;
const DEFAULT_SOURCE_HEIGHT: u32 = 1296;
const DEFAULT_ADMIT_INTERVAL: u32 = 2;
const DEFAULT_CAPTURE_FPS: u32 = 30;

/// Framecast - stream a decimated camera preview to a remote consumer
#[derive(Parser, Debug)]
#[command(name = "framecast")]
#[command(version, about, long_about = None)]
struct Args {
    /// Remote endpoint host
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Remote endpoint port
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Quality preset: high-quality, balanced, high-speed, extreme-speed
    #[arg(short, long, default_value = "balanced")]
    quality: String,

    /// Explicit stride factor, overriding the quality preset
    #[arg(long)]
    stride: Option<u32>,

    /// Capture source width in pixels
    #[arg(long, default_value_t = DEFAULT_SOURCE_WIDTH)]
    source_width: u32,

    /// Capture source height in pixels
    #[arg(long, default_value_t = DEFAULT_SOURCE_HEIGHT)]
    source_height: u32,

    /// Forward every Nth delivered frame
    #[arg(long, default_value_t = DEFAULT_ADMIT_INTERVAL)]
    admit_every: u32,

    /// Synthetic capture frame rate
    #[arg(long, default_value_t = DEFAULT_CAPTURE_FPS)]
    fps: u32,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .with_env_filter(EnvFilter::from_default_env().add_directive(log_level.into()))
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    info!("Framecast v{}", env!("CARGO_PKG_VERSION"));

    let quality: Quality = args.quality.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let stride = args.stride.unwrap_or_else(|| quality.stride_factor());

    let downscale = DownscaleConfig::from_source(args.source_width, args.source_height, stride)?;
    info!(
        "Downscaling {}x{} -> {}x{} (stride {}), forwarding every {} frame(s)",
        args.source_width,
        args.source_height,
        downscale.target_width,
        downscale.target_height,
        stride,
        args.admit_every
    );

    // Startup order: buffer, connection, capture device, delivery. Every
    // failure here is fatal and unwinds whatever came before it.
    let packed = PackedFrame::new(&downscale)?;
    let sink = TcpSink::connect(&StreamConfig::new(args.host, args.port))?;
    let mut capture = SyntheticCapture::open(args.source_width, args.source_height, args.fps)?;

    let controller =
        PipelineController::new(downscale, packed, sink, RateGate::new(args.admit_every))?;
    let monitor = controller.monitor();
    capture.start_delivery(controller.into_callback())?;

    info!("Streaming... press Ctrl-C to stop");

    tokio::select! {
        _ = tokio::signal::ctrl_c() => info!("Shutting down..."),
        _ = monitor.failed() => warn!("Pipeline failed, shutting down..."),
    }

    // Delivery must be fully stopped before the callback-owned buffer and
    // connection are released; stop_delivery joins the delivery thread, so
    // both are already dropped when it returns. The device closes on drop.
    capture.stop_delivery()?;
    drop(capture);

    if let Some(err) = monitor.take_failure() {
        return Err(err.into());
    }

    info!("Goodbye!");
    Ok(())
}
