//! Frame representations for the transform pipeline
//!
//! This module provides the borrowed source-frame view handed out by the
//! capture subsystem and the owned, reusable packed output buffer.

use crate::config::DownscaleConfig;
use crate::error::{Error, Result};

/// Pixel encoding tag carried by a captured frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 4 bytes per pixel: blue, green, red, unused
    Bgrx8888,
    /// 3 bytes per pixel: blue, green, red
    Bgr888,
}

impl PixelFormat {
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelFormat::Bgrx8888 => 4,
            PixelFormat::Bgr888 => 3,
        }
    }
}

impl std::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PixelFormat::Bgrx8888 => write!(f, "BGRX8888"),
            PixelFormat::Bgr888 => write!(f, "BGR888"),
        }
    }
}

/// Borrowed view of one captured frame
///
/// The pixel data belongs to the capture subsystem and is valid only for
/// the duration of the delivery callback; the view is never stored.
#[derive(Clone, Copy)]
pub struct RawFrame<'a> {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: &'a [u8],
}

impl<'a> RawFrame<'a> {
    /// Create a checked view over captured pixel data
    ///
    /// Fails if the buffer cannot hold `width * height` pixels of the
    /// declared format.
    pub fn new(data: &'a [u8], width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        let expected = width as usize * height as usize * format.bytes_per_pixel();
        if data.len() < expected {
            return Err(Error::BufferTooShort {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Raw pixel data, row-major, no padding between rows
    pub fn data(&self) -> &'a [u8] {
        self.data
    }
}

impl std::fmt::Debug for RawFrame<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .field("size", &self.data.len())
            .finish()
    }
}

/// The single packed output buffer, reused across all cycles
///
/// Fixed size `target_width * target_height * 3` bytes: row-major BGR with
/// no padding and no header. Allocated once at startup and mutated in place
/// by the decimator each admitted cycle.
pub struct PackedFrame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PackedFrame {
    /// Allocate the output buffer for a downscale configuration
    pub fn new(config: &DownscaleConfig) -> Result<Self> {
        let len = config.packed_len();
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| Error::Allocation(len))?;
        data.resize(len, 0);
        Ok(Self {
            width: config.target_width,
            height: config.target_height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total size in bytes, always `width * height * 3`
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl std::fmt::Debug for PackedFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackedFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("size", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_frame_accepts_exact_buffer() {
        let data = vec![0u8; 8 * 6 * 4];
        let frame = RawFrame::new(&data, 8, 6, PixelFormat::Bgrx8888).unwrap();
        assert_eq!(frame.width(), 8);
        assert_eq!(frame.height(), 6);
        assert_eq!(frame.format(), PixelFormat::Bgrx8888);
    }

    #[test]
    fn raw_frame_rejects_short_buffer() {
        let data = vec![0u8; 8 * 6 * 4 - 1];
        let err = RawFrame::new(&data, 8, 6, PixelFormat::Bgrx8888).unwrap_err();
        match err {
            Error::BufferTooShort { expected, actual } => {
                assert_eq!(expected, 8 * 6 * 4);
                assert_eq!(actual, 8 * 6 * 4 - 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn packed_frame_size_follows_config() {
        let config = DownscaleConfig::new(192, 108, 12).unwrap();
        let packed = PackedFrame::new(&config).unwrap();
        assert_eq!(packed.len(), 192 * 108 * 3);
        assert_eq!(packed.width(), 192);
        assert_eq!(packed.height(), 108);
    }
}
