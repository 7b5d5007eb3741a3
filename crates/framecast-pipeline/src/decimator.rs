//! Nearest-neighbor frame decimation with BGRX-to-BGR repacking
//!
//! Downsampling by stride selection, no averaging or filtering. Dropping
//! the unused 4th channel removes a quarter of the data at equal
//! resolution; the stride removes the rest. This is a deliberate
//! speed-over-quality tradeoff for the preview link.

use framecast_core::{DownscaleConfig, Error, PackedFrame, PixelFormat, RawFrame, Result};

/// Pure per-frame transform: stride-sampled downscale plus channel drop
///
/// For each output pixel (x, y) the source pixel sampled is at
/// (x * stride, y * stride); its blue, green, red bytes are copied and the
/// unused channel is discarded. Output is row-major, no padding.
#[derive(Debug, Clone, Copy)]
pub struct FrameDecimator {
    config: DownscaleConfig,
}

impl FrameDecimator {
    pub fn new(config: DownscaleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DownscaleConfig {
        &self.config
    }

    /// Decimate `raw` into `out`, overwriting its previous contents
    ///
    /// Validates the source format and the sampling precondition before
    /// touching pixel data; writes exactly `target_width * target_height * 3`
    /// bytes and performs no allocation.
    pub fn transform(&self, raw: &RawFrame<'_>, out: &mut PackedFrame) -> Result<()> {
        if raw.format() != PixelFormat::Bgrx8888 {
            return Err(Error::UnsupportedFormat(raw.format().to_string()));
        }
        self.config.check_source(raw.width(), raw.height())?;

        let stride = self.config.stride_factor as usize;
        let src_row = raw.width() as usize * 4;
        let src = raw.data();
        let dst = out.as_mut_bytes();

        let mut di = 0;
        for y in 0..self.config.target_height as usize {
            let row = y * stride * src_row;
            for x in 0..self.config.target_width as usize {
                let si = row + x * stride * 4;
                dst[di] = src[si]; // blue
                dst[di + 1] = src[si + 1]; // green
                dst[di + 2] = src[si + 2]; // red
                di += 3;
            }
        }

        Ok(())
    }
}
