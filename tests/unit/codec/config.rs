use super::*;

#[test]
fn default_config_is_valid() {
    let cfg = CodecConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.tolerance, 150);
    assert_eq!(cfg.framing, Framing::LengthPrefixed);
}

#[test]
fn partial_json_fills_defaults() {
    let cfg = CodecConfig::from_json_str(
        r#"{ "geometry": { "width": 64, "height": 32, "block_size": 4 }, "framing": "raw" }"#,
    )
    .unwrap();
    assert_eq!(cfg.geometry.cell_count(), 16 * 8);
    assert_eq!(cfg.framing, Framing::Raw);
    assert_eq!(cfg.tolerance, 150);
    assert!(!cfg.strict);
}

#[test]
fn invalid_values_fail_at_load() {
    assert!(CodecConfig::from_json_str(r#"{ "tolerance": 255 }"#).is_err());
    assert!(
        CodecConfig::from_json_str(
            r#"{ "geometry": { "width": 4, "height": 4, "block_size": 8 } }"#
        )
        .is_err()
    );
    assert!(CodecConfig::from_json_str(r#"{ "colour": 1 }"#).is_err());
}

#[test]
fn config_round_trips_through_json() {
    let cfg = CodecConfig {
        strict: true,
        ..CodecConfig::default()
    };
    let text = serde_json::to_string(&cfg).unwrap();
    assert_eq!(CodecConfig::from_json_str(&text).unwrap(), cfg);
}

#[test]
fn partial_geometry_fills_defaults() {
    let cfg = CodecConfig::from_json_str(r#"{ "geometry": { "block_size": 4 } }"#).unwrap();
    assert_eq!(
        cfg.geometry,
        GridGeometry {
            width: 1920,
            height: 1080,
            block_size: 4,
        }
    );
    assert!(CodecConfig::from_json_str(r#"{ "geometry": { "depth": 4 } }"#).is_err());
}
