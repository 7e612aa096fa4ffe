use libvqm::speex::{MODE_TO_SIZE, QUALITY_TO_MODE};
use libvqm::{
    frame_size_for_mode, mode_for_quality, quality_for_mode, LookupTable, MetricError,
    SpeexMetric, SpeexSetting,
};

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_quality_seven() {
    let m = SpeexMetric::with_quality(7).unwrap();
    assert_eq!(m.quality(), 7);
    assert_eq!(m.mode(), 5);
    assert_eq!(m.size(), 300);
}

#[test]
fn test_mode_five() {
    let m = SpeexMetric::with_mode(5).unwrap();
    assert_eq!(m.mode(), 5);
    assert_eq!(m.quality(), 8);
    assert_eq!(m.size(), 300);
}

#[test]
fn test_setting_and_options_agree() {
    let from_setting = SpeexMetric::new(SpeexSetting::Quality(9)).unwrap();
    let from_options = SpeexMetric::from_options(Some(9), None).unwrap();
    assert_eq!(from_setting, from_options);

    let from_try: SpeexMetric = SpeexSetting::Mode(6).try_into().unwrap();
    assert_eq!(from_try, SpeexMetric::from_options(None, Some(6)).unwrap());
}

#[test]
fn test_neither_quality_nor_mode() {
    let err = SpeexMetric::from_options(None, None).unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn test_both_quality_and_mode() {
    let err = SpeexMetric::from_options(Some(7), Some(5)).unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(err.to_string().contains("just one option"));
}

// ============================================================================
// Table lookups
// ============================================================================

#[test]
fn test_every_quality_maps_through_table() {
    for q in 0..=10u8 {
        let mode = mode_for_quality(q).unwrap();
        assert_eq!(mode, QUALITY_TO_MODE[q as usize]);

        if mode == 8 {
            continue;
        }
        let from_quality = SpeexMetric::with_quality(q).unwrap();
        assert_eq!(from_quality.mode(), mode);

        let from_mode = SpeexMetric::with_mode(mode).unwrap();
        let expected = MODE_TO_SIZE.iter().find(|(m, _)| *m == mode).unwrap().1;
        assert_eq!(from_mode.size(), expected);
        assert_eq!(from_quality.size(), expected);
    }
}

#[test]
fn test_mode_to_quality_is_not_a_true_inverse() {
    // quality 3 and 4 both select mode 3, mode 3 reports 4
    assert_eq!(mode_for_quality(3).unwrap(), 3);
    assert_eq!(quality_for_mode(3).unwrap(), 4);
    assert_eq!(SpeexMetric::with_quality(3).unwrap().quality(), 3);
    assert_eq!(SpeexMetric::with_mode(3).unwrap().quality(), 4);
}

#[test]
fn test_mode_eight_has_no_frame_size() {
    assert_eq!(quality_for_mode(8).unwrap(), 1);
    assert_eq!(
        SpeexMetric::with_mode(8).unwrap_err(),
        MetricError::LookupFailure {
            table: LookupTable::ModeToSize,
            key: 8
        }
    );
    // quality 1 resolves to mode 8 and hits the same gap
    let err = SpeexMetric::with_quality(1).unwrap_err();
    assert!(err.is_lookup_failure());
    assert_eq!(frame_size_for_mode(8).unwrap_err(), err);
}

#[test]
fn test_unknown_mode() {
    for mode in [0u8, 9, 255] {
        assert_eq!(
            SpeexMetric::with_mode(mode).unwrap_err(),
            MetricError::LookupFailure {
                table: LookupTable::ModeToQuality,
                key: mode as i64
            }
        );
    }
}

#[test]
fn test_quality_out_of_range() {
    let err = SpeexMetric::from_options(Some(11), None).unwrap_err();
    assert!(err.is_lookup_failure());
    assert!(SpeexMetric::with_quality(200).is_err());
}

#[test]
fn test_error_messages_name_the_table() {
    let err = SpeexMetric::with_mode(8).unwrap_err();
    assert_eq!(err.to_string(), "No entry for 8 in the mode-to-size table");
}

#[test]
fn test_serializes_resolved_fields() {
    let m = SpeexMetric::with_quality(10).unwrap();
    let json = serde_json::to_value(m).unwrap();
    assert_eq!(json["quality"], 10);
    assert_eq!(json["mode"], 7);
    assert_eq!(json["size"], 492);
}
