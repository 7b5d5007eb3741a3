//! Configuration types for Framecast

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Named quality presets mapping to stride factors
///
/// For a 2304x1296 capture source the presets come out to:
///
/// | Preset        | Stride | Output    |
/// |---------------|--------|-----------|
/// | high-quality  | 8      | 288 x 162 |
/// | balanced      | 12     | 192 x 108 |
/// | high-speed    | 18     | 128 x 72  |
/// | extreme-speed | 24     | 96 x 54   |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Quality {
    HighQuality,
    #[default]
    Balanced,
    HighSpeed,
    ExtremeSpeed,
}

impl Quality {
    pub fn stride_factor(&self) -> u32 {
        match self {
            Quality::HighQuality => 8,
            Quality::Balanced => 12,
            Quality::HighSpeed => 18,
            Quality::ExtremeSpeed => 24,
        }
    }
}

impl std::str::FromStr for Quality {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high-quality" | "high" => Ok(Quality::HighQuality),
            "balanced" => Ok(Quality::Balanced),
            "high-speed" | "fast" => Ok(Quality::HighSpeed),
            "extreme-speed" | "extreme" => Ok(Quality::ExtremeSpeed),
            _ => Err(format!(
                "Invalid quality: {}. Use: high-quality, balanced, high-speed, extreme-speed",
                s
            )),
        }
    }
}

/// Downscale geometry: output dimensions and the sampling stride
///
/// The stride factor is the spacing, in source pixels, between consecutive
/// sampled pixels along each axis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DownscaleConfig {
    /// Output width in pixels
    pub target_width: u32,
    /// Output height in pixels
    pub target_height: u32,
    /// Sampling step in source pixels per output pixel
    pub stride_factor: u32,
}

impl DownscaleConfig {
    /// Create a configuration with explicit output dimensions
    pub fn new(target_width: u32, target_height: u32, stride_factor: u32) -> Result<Self> {
        if target_width == 0 || target_height == 0 {
            return Err(Error::Config(format!(
                "Output dimensions must be nonzero, got {}x{}",
                target_width, target_height
            )));
        }
        if stride_factor == 0 {
            return Err(Error::Config("Stride factor must be nonzero".to_string()));
        }
        Ok(Self {
            target_width,
            target_height,
            stride_factor,
        })
    }

    /// Derive output dimensions from the source resolution and a stride
    pub fn from_source(source_width: u32, source_height: u32, stride_factor: u32) -> Result<Self> {
        if stride_factor == 0 {
            return Err(Error::Config("Stride factor must be nonzero".to_string()));
        }
        Self::new(
            source_width / stride_factor,
            source_height / stride_factor,
            stride_factor,
        )
    }

    /// Check that a source frame is large enough to sample from
    ///
    /// Every sampled coordinate must fall inside the source frame:
    /// `target * stride_factor` must not exceed the source dimension.
    pub fn check_source(&self, width: u32, height: u32) -> Result<()> {
        let need_w = self.target_width as u64 * self.stride_factor as u64;
        let need_h = self.target_height as u64 * self.stride_factor as u64;
        if need_w > width as u64 || need_h > height as u64 {
            return Err(Error::SourceTooSmall {
                width,
                height,
                target_width: self.target_width,
                target_height: self.target_height,
                stride_factor: self.stride_factor,
            });
        }
        Ok(())
    }

    /// Size in bytes of one packed output frame
    pub fn packed_len(&self) -> usize {
        self.target_width as usize * self.target_height as usize * 3
    }
}

/// The fixed remote endpoint the packed stream is sent to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Remote host name or address
    pub host: String,
    /// Remote TCP port
    pub port: u16,
}

impl StreamConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Endpoint in `host:port` form for address resolution
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
