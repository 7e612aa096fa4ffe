//! speex codec bookkeeping
//!
//! maps the encoder quality knob to the codec submode and frame size, and
//! from there to the network bandwidth of an RTP stream
mod metric;
pub mod tables;

pub use metric::{
    SpeexMetric, SpeexSetting, DEFAULT_FRAMES_PER_PACKET, FRAMES_PER_SECOND,
    IP_UDP_RTP_HEADER_BYTES,
};
pub use tables::{
    frame_size_for_mode, mode_for_quality, quality_for_mode, MAX_QUALITY, MODE_TO_QUALITY,
    MODE_TO_SIZE, QUALITY_TO_MODE,
};

#[cfg(test)]
mod tests;
