use super::*;
use serde_json::json;

#[test]
fn test_convert_int() {
    assert_eq!(convert("42", PrimitiveKind::Int).unwrap(), ArgValue::Int(42));
    assert_eq!(convert("-7", PrimitiveKind::Int).unwrap(), ArgValue::Int(-7));
}

#[test]
fn test_surrounding_whitespace_is_rejected() {
    for (raw, kind) in [
        (" 42", PrimitiveKind::Int),
        ("42 ", PrimitiveKind::Long),
        (" 1.5", PrimitiveKind::Double),
        ("true ", PrimitiveKind::Boolean),
    ] {
        let err = convert(raw, kind).unwrap_err();
        assert_eq!(err.raw(), raw);
    }
}

#[test]
fn test_convert_int_rejects_text() {
    let err = convert("abc", PrimitiveKind::Int).unwrap_err();
    assert_eq!(err.raw(), "abc");
    assert_eq!(err.kind(), PrimitiveKind::Int);
    assert!(err.to_string().contains("'abc'"));
    assert!(err.to_string().contains("int"));
}

#[test]
fn test_convert_boolean() {
    assert_eq!(convert("true", PrimitiveKind::Boolean).unwrap(), ArgValue::Bool(true));
    assert_eq!(convert("False", PrimitiveKind::Boolean).unwrap(), ArgValue::Bool(false));
    assert!(convert("yes", PrimitiveKind::Boolean).is_err());
    assert!(convert("", PrimitiveKind::Boolean).is_err());
}

#[test]
fn test_convert_narrow_integers_check_range() {
    assert_eq!(convert("127", PrimitiveKind::Byte).unwrap(), ArgValue::Byte(127));
    assert!(convert("128", PrimitiveKind::Byte).is_err());
    assert_eq!(convert("-32768", PrimitiveKind::Short).unwrap(), ArgValue::Short(-32768));
    assert!(convert("40000", PrimitiveKind::Short).is_err());
    assert!(convert("3000000000", PrimitiveKind::Int).is_err());
    assert_eq!(
        convert("3000000000", PrimitiveKind::Long).unwrap(),
        ArgValue::Long(3_000_000_000)
    );
}

#[test]
fn test_convert_floating_point() {
    assert_eq!(convert("1.5", PrimitiveKind::Float).unwrap(), ArgValue::Float(1.5));
    assert_eq!(convert("2.25", PrimitiveKind::Double).unwrap(), ArgValue::Double(2.25));
    assert!(convert("1.5.2", PrimitiveKind::Double).is_err());
}

#[test]
fn test_convert_string_passes_through() {
    assert_eq!(
        convert(" hello ", PrimitiveKind::String).unwrap(),
        ArgValue::Str(" hello ".into())
    );
}

#[test]
fn test_convert_json() {
    let value = convert(r#"{"name":"bob"}"#, PrimitiveKind::Json).unwrap();
    assert_eq!(value.as_json(), Some(&json!({"name": "bob"})));
    assert!(convert("{", PrimitiveKind::Json).is_err());
}

#[test]
fn test_kind_names_round_trip() {
    for kind in [
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::Short,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
        PrimitiveKind::String,
        PrimitiveKind::Json,
    ] {
        assert_eq!(kind.to_string().parse::<PrimitiveKind>().unwrap(), kind);
    }
    assert_eq!("Integer".parse::<PrimitiveKind>().unwrap(), PrimitiveKind::Int);
    assert!("char".parse::<PrimitiveKind>().is_err());
}

#[test]
fn test_kind_deserializes_from_lowercase() {
    let kind: PrimitiveKind = serde_json::from_str("\"double\"").unwrap();
    assert_eq!(kind, PrimitiveKind::Double);
}

#[test]
fn test_arg_value_accessors() {
    assert_eq!(ArgValue::Short(3).as_i64(), Some(3));
    assert_eq!(ArgValue::Float(0.5).as_f64(), Some(0.5));
    assert_eq!(ArgValue::Str("x".into()).as_str(), Some("x"));
    assert!(ArgValue::Null.is_null());
    assert_eq!(ArgValue::Int(1).as_bool(), None);
}

#[test]
fn test_arg_value_serializes_untagged() {
    let args = vec![ArgValue::Int(5), ArgValue::Str("hi".into()), ArgValue::Null];
    assert_eq!(serde_json::to_value(&args).unwrap(), json!([5, "hi", null]));
}
