//! Relay configuration

/// Relay tuning options
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Output width frames are normalized to before re-emission
    pub target_width: u32,

    /// JPEG quality for re-encoded frames (1-100)
    pub jpeg_quality: u8,

    /// Default single-stream feed frequency in Hz (overridable per request)
    pub default_feed_hz: u32,

    /// Mix feed frequency in Hz
    pub mix_hz: u32,

    /// Maximum accepted feed frequency in Hz
    pub max_feed_hz: u32,

    /// Multipart boundary token for the single-stream feed
    pub boundary: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            target_width: 680,
            jpeg_quality: 90,
            default_feed_hz: 15,
            mix_hz: 15,
            max_feed_hz: 30,
            boundary: "frame".to_string(),
        }
    }
}

impl RelayConfig {
    /// Set the normalization width
    pub fn target_width(mut self, width: u32) -> Self {
        self.target_width = width.max(1);
        self
    }

    /// Set the JPEG quality
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Set the default single-stream feed frequency
    pub fn default_feed_hz(mut self, hz: u32) -> Self {
        self.default_feed_hz = hz.max(1);
        self
    }

    /// Set the mix feed frequency
    pub fn mix_hz(mut self, hz: u32) -> Self {
        self.mix_hz = hz.max(1);
        self
    }

    /// Clamp a requested feed frequency to the accepted range
    pub fn clamp_hz(&self, hz: u32) -> u32 {
        hz.clamp(1, self.max_feed_hz)
    }

    /// Content type advertised by the single-stream feed
    pub fn mixed_replace_content_type(&self) -> String {
        format!("multipart/x-mixed-replace;boundary={}", self.boundary)
    }
}
