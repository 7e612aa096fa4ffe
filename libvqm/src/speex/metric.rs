use serde::{Deserialize, Serialize};

use super::tables::{frame_size_for_mode, mode_for_quality, quality_for_mode};
use crate::core::{MetricError, VqResult};

/// IP (20) + UDP (8) + RTP (12) header bytes per packet
pub const IP_UDP_RTP_HEADER_BYTES: u32 = 20 + 8 + 12;

/// Narrowband speex emits one frame every 20 ms
pub const FRAMES_PER_SECOND: f64 = 50.0;

/// Frames bundled per packet when the caller has no preference
pub const DEFAULT_FRAMES_PER_PACKET: u32 = 1;

/// what a [`SpeexMetric`] is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeexSetting {
    /// encoder quality knob, 0-10
    Quality(u8),
    /// codec submode, 1-8
    Mode(u8),
}

/// Speex quality, submode and frame size, resolved once at construction
///
/// ```
/// use libvqm::SpeexMetric;
///
/// let m = SpeexMetric::with_mode(5).unwrap();
/// assert_eq!(m.quality(), 8);
/// assert_eq!(m.size(), 300);
/// assert_eq!(m.bandwidth(2).unwrap(), 23000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SpeexMetric {
    quality: u8,
    mode: u8,
    size: u32,
}

impl SpeexMetric {
    /// resolve a setting through the static tables
    pub fn new(setting: SpeexSetting) -> VqResult<Self> {
        let (quality, mode) = match setting {
            SpeexSetting::Quality(quality) => (quality, mode_for_quality(quality)?),
            SpeexSetting::Mode(mode) => (quality_for_mode(mode)?, mode),
        };
        let size = frame_size_for_mode(mode)?;

        tracing::debug!(?setting, quality, mode, size, "resolved speex setting");
        Ok(SpeexMetric {
            quality,
            mode,
            size,
        })
    }

    /// build from two optional inputs, exactly one of which must be set
    pub fn from_options(quality: Option<u8>, mode: Option<u8>) -> VqResult<Self> {
        match (quality, mode) {
            (None, None) => Err(MetricError::invalid(
                "Speex quality or mode must be set up",
            )),
            (Some(_), Some(_)) => Err(MetricError::invalid(
                "You must set up just one option: quality or mode",
            )),
            (Some(q), None) => Self::new(SpeexSetting::Quality(q)),
            (None, Some(m)) => Self::new(SpeexSetting::Mode(m)),
        }
    }

    pub fn with_quality(quality: u8) -> VqResult<Self> {
        Self::new(SpeexSetting::Quality(quality))
    }

    pub fn with_mode(mode: u8) -> VqResult<Self> {
        Self::new(SpeexSetting::Mode(mode))
    }

    /// encoder quality, 0-10
    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// codec submode
    pub fn mode(&self) -> u8 {
        self.mode
    }

    /// bits per encoded frame
    pub fn size(&self) -> u32 {
        self.size
    }

    /// codec payload rate in bits per second, no packet headers
    pub fn bitrate(&self) -> u32 {
        self.size * FRAMES_PER_SECOND as u32
    }

    /// Bandwidth (bits per second) to carry this stream over RTP/UDP/IP
    ///
    /// # Arguments
    /// * `fpp` - frames per packet, at least 1
    ///
    /// # Returns
    /// `floor(50 / fpp * (size * fpp + 320))`
    pub fn bandwidth(&self, fpp: u32) -> VqResult<u64> {
        if fpp == 0 {
            return Err(MetricError::invalid(
                "frames per packet must be at least 1",
            ));
        }
        let header_bits = IP_UDP_RTP_HEADER_BYTES * 8;
        let packet_bits = self.size as f64 * fpp as f64 + header_bits as f64;
        let packets_per_second = FRAMES_PER_SECOND / fpp as f64;
        Ok((packets_per_second * packet_bits) as u64)
    }
}

impl TryFrom<SpeexSetting> for SpeexMetric {
    type Error = MetricError;

    fn try_from(setting: SpeexSetting) -> VqResult<Self> {
        SpeexMetric::new(setting)
    }
}
