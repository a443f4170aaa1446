use super::*;
use serde_json::json;

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: ColorDef = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, ColorDef::rgb(255, 0, 0));

    let c: ColorDef = serde_json::from_value(json!("0000ff80")).unwrap();
    assert_eq!(c.rgba8(), Rgba8::rgba(0, 0, 255, 0x80));
}

#[test]
fn parses_rgba_object_and_array() {
    let c: ColorDef = serde_json::from_value(json!({"r": 1.0, "g": 0.5, "b": 0.0})).unwrap();
    assert_eq!(c.rgba8(), Rgba8::rgba(255, 128, 0, 255));

    let c: ColorDef = serde_json::from_value(json!([0.0, 0.0, 1.0, 0.0])).unwrap();
    assert_eq!(c.rgba8(), Rgba8::rgba(0, 0, 255, 0));

    assert!(serde_json::from_value::<ColorDef>(json!([0.0, 1.0])).is_err());
}

#[test]
fn rejects_malformed_hex() {
    assert!(serde_json::from_value::<ColorDef>(json!("#fff")).is_err());
    assert!(serde_json::from_value::<ColorDef>(json!("#gg0000")).is_err());
    assert!("#80808".parse::<ColorDef>().is_err());
}

#[test]
fn serializes_as_hex() {
    assert_eq!(
        serde_json::to_value(ColorDef::rgb(128, 128, 128)).unwrap(),
        json!("#808080")
    );
    assert_eq!(
        serde_json::to_value(ColorDef(Rgba8::rgba(255, 255, 255, 0x66))).unwrap(),
        json!("#FFFFFF66")
    );
}
