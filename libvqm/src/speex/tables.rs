//! static speex narrowband tables
//!
//! quality (0-10) picks a submode, the submode fixes the frame size

use crate::core::{LookupTable, MetricError, VqResult};

/// Highest encoder quality setting
pub const MAX_QUALITY: u8 = 10;

/// Submode selected by each quality setting, indexed by quality
//                                    0  1  2  3  4  5  6  7  8  9  10
pub const QUALITY_TO_MODE: [u8; 11] = [1, 8, 2, 3, 3, 4, 4, 5, 5, 6, 7];

/// Quality reported for a submode (mode 3 resolves to quality 4)
pub const MODE_TO_QUALITY: [(u8, u8); 8] = [
    (1, 0),
    (8, 1),
    (2, 2),
    (3, 4),
    (4, 6),
    (5, 8),
    (6, 9),
    (7, 10),
];

/// Bits per 20 ms frame for each submode. Mode 8 has no entry.
pub const MODE_TO_SIZE: [(u8, u32); 7] = [
    (1, 43),
    (2, 119),
    (3, 160),
    (4, 220),
    (5, 300),
    (6, 364),
    (7, 492),
];

/// submode for a quality setting
pub fn mode_for_quality(quality: u8) -> VqResult<u8> {
    QUALITY_TO_MODE
        .get(quality as usize)
        .copied()
        .ok_or_else(|| MetricError::lookup(LookupTable::QualityToMode, quality))
}

/// quality setting for a submode
pub fn quality_for_mode(mode: u8) -> VqResult<u8> {
    lookup(&MODE_TO_QUALITY, mode).ok_or_else(|| MetricError::lookup(LookupTable::ModeToQuality, mode))
}

/// frame size in bits for a submode
pub fn frame_size_for_mode(mode: u8) -> VqResult<u32> {
    lookup(&MODE_TO_SIZE, mode).ok_or_else(|| MetricError::lookup(LookupTable::ModeToSize, mode))
}

fn lookup<V: Copy>(table: &[(u8, V)], key: u8) -> Option<V> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}
