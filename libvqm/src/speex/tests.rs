//! Internal speex tests

use super::*;
use crate::core::LookupTable;
use crate::MetricError;

#[test]
fn test_quality_zero_selects_mode_one() {
    let m = SpeexMetric::with_quality(0).unwrap();
    assert_eq!(m.mode(), 1);
    assert_eq!(m.size(), 43);
}

#[test]
fn test_mode_three_reports_quality_four() {
    let m = SpeexMetric::with_mode(3).unwrap();
    assert_eq!(m.quality(), 4);
    assert_eq!(m.size(), 160);
}

#[test]
fn test_quality_past_table_end() {
    let err = SpeexMetric::with_quality(MAX_QUALITY + 1).unwrap_err();
    assert_eq!(
        err,
        MetricError::LookupFailure {
            table: LookupTable::QualityToMode,
            key: 11
        }
    );
}

#[test]
fn test_bitrate_is_size_times_frame_rate() {
    let m = SpeexMetric::with_mode(5).unwrap();
    assert_eq!(m.bitrate(), 15000);
}

#[test]
fn test_size_table_matches_mode_table() {
    // every sized mode is reachable from some quality
    for (mode, _) in MODE_TO_SIZE {
        assert!(QUALITY_TO_MODE.contains(&mode));
    }
}
