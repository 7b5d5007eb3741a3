//! Synthetic capture source
//!
//! Produces BGRX frames of a fixed resolution at a fixed cadence on a
//! dedicated delivery thread, with a deterministic moving-gradient pattern.
//! Stands in for a hardware capture backend in demos and tests.

use crate::{CaptureDevice, FrameCallback};
use framecast_core::{Error, PixelFormat, RawFrame, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Thread-driven synthetic capture device
pub struct SyntheticCapture {
    width: u32,
    height: u32,
    interval: Duration,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl SyntheticCapture {
    /// Open a synthetic device producing `width` x `height` BGRX frames at `fps`
    pub fn open(width: u32, height: u32, fps: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::DeviceOpen(format!(
                "Invalid synthetic resolution {}x{}",
                width, height
            )));
        }
        if fps == 0 {
            return Err(Error::DeviceOpen("Frame rate must be nonzero".to_string()));
        }

        info!("Synthetic capture opened: {}x{} @ {} fps", width, height, fps);

        Ok(Self {
            width,
            height,
            interval: Duration::from_secs(1) / fps,
            running: Arc::new(AtomicBool::new(false)),
            worker: None,
        })
    }

    /// Fill `buf` with the gradient pattern for frame number `tick`
    fn render(buf: &mut [u8], width: u32, height: u32, tick: u64) {
        let shift = tick as u32;
        let mut idx = 0;
        for y in 0..height {
            for x in 0..width {
                buf[idx] = ((x + shift) & 0xFF) as u8; // blue
                buf[idx + 1] = ((y + shift) & 0xFF) as u8; // green
                buf[idx + 2] = (((x + y) / 2) & 0xFF) as u8; // red
                buf[idx + 3] = 0; // unused
                idx += 4;
            }
        }
    }
}

impl CaptureDevice for SyntheticCapture {
    fn start_delivery(&mut self, mut callback: FrameCallback) -> Result<()> {
        if self.worker.is_some() {
            return Err(Error::DeliveryStart(
                "Delivery is already running".to_string(),
            ));
        }

        let (width, height, interval) = (self.width, self.height, self.interval);
        let running = Arc::clone(&self.running);
        running.store(true, Ordering::SeqCst);

        let worker = std::thread::Builder::new()
            .name("framecast-capture".to_string())
            .spawn(move || {
                // One frame buffer, reused for every delivery
                let mut buf = vec![0u8; width as usize * height as usize * 4];
                let mut tick: u64 = 0;

                while running.load(Ordering::SeqCst) {
                    Self::render(&mut buf, width, height, tick);
                    tick += 1;

                    let frame = match RawFrame::new(&buf, width, height, PixelFormat::Bgrx8888) {
                        Ok(frame) => frame,
                        Err(e) => {
                            warn!("Synthetic frame rejected: {}", e);
                            break;
                        }
                    };

                    if callback(frame).is_break() {
                        debug!("Delivery callback requested stop");
                        break;
                    }

                    std::thread::sleep(interval);
                }

                debug!("Synthetic delivery thread exiting after {} frames", tick);
            })
            .map_err(|e| Error::DeliveryStart(e.to_string()))?;

        self.worker = Some(worker);
        Ok(())
    }

    fn stop_delivery(&mut self) -> Result<()> {
        self.running.store(false, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            // Joining the delivery thread is the no-further-callbacks barrier
            worker
                .join()
                .map_err(|_| Error::DeliveryStop("Delivery thread panicked".to_string()))?;
        }
        Ok(())
    }
}

impl Drop for SyntheticCapture {
    fn drop(&mut self) {
        if let Err(e) = self.stop_delivery() {
            warn!("Capture teardown error: {}", e);
        }
        debug!("Synthetic capture closed");
    }
}
