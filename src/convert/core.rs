use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declared type of a handler parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
    /// Structured value, only meaningful for body-sourced parameters
    Json,
}

impl PrimitiveKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::String => "string",
            PrimitiveKind::Json => "json",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrimitiveKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "boolean" | "bool" => Ok(PrimitiveKind::Boolean),
            "byte" => Ok(PrimitiveKind::Byte),
            "short" => Ok(PrimitiveKind::Short),
            "int" | "integer" => Ok(PrimitiveKind::Int),
            "long" => Ok(PrimitiveKind::Long),
            "float" => Ok(PrimitiveKind::Float),
            "double" => Ok(PrimitiveKind::Double),
            "string" => Ok(PrimitiveKind::String),
            "json" => Ok(PrimitiveKind::Json),
            other => Err(format!("unknown parameter kind '{other}'")),
        }
    }
}

/// A converted handler argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArgValue {
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(String),
    Json(Value),
    /// An optional external parameter that was absent
    Null,
}

impl ArgValue {
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Widen any integer variant to `i64`.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            ArgValue::Byte(v) => Some(i64::from(v)),
            ArgValue::Short(v) => Some(i64::from(v)),
            ArgValue::Int(v) => Some(i64::from(v)),
            ArgValue::Long(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            ArgValue::Float(v) => Some(f64::from(v)),
            ArgValue::Double(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            ArgValue::Bool(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ArgValue::Json(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, ArgValue::Null)
    }
}

/// Raw text could not be parsed into the declared kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionError {
    raw: String,
    kind: PrimitiveKind,
    reason: String,
}

impl ConversionError {
    pub fn new(raw: impl Into<String>, kind: PrimitiveKind, reason: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            kind,
            reason: reason.into(),
        }
    }

    /// The offending input text.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot convert '{}' to {}: {}",
            self.raw, self.kind, self.reason
        )
    }
}

impl std::error::Error for ConversionError {}

fn parse<T>(raw: &str, kind: PrimitiveKind) -> Result<T, ConversionError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| ConversionError::new(raw, kind, e.to_string()))
}

fn parse_bool(raw: &str) -> Result<bool, ConversionError> {
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ConversionError::new(
            raw,
            PrimitiveKind::Boolean,
            "expected 'true' or 'false'",
        ))
    }
}

/// Convert `raw` into a value of `kind`.
///
/// Text is parsed exactly as given, so surrounding whitespace is an error for
/// numeric and boolean kinds. `String` passes the text through untouched and
/// `Json` parses it as a JSON document.
pub fn convert(raw: &str, kind: PrimitiveKind) -> Result<ArgValue, ConversionError> {
    Ok(match kind {
        PrimitiveKind::Boolean => ArgValue::Bool(parse_bool(raw)?),
        PrimitiveKind::Byte => ArgValue::Byte(parse(raw, kind)?),
        PrimitiveKind::Short => ArgValue::Short(parse(raw, kind)?),
        PrimitiveKind::Int => ArgValue::Int(parse(raw, kind)?),
        PrimitiveKind::Long => ArgValue::Long(parse(raw, kind)?),
        PrimitiveKind::Float => ArgValue::Float(parse(raw, kind)?),
        PrimitiveKind::Double => ArgValue::Double(parse(raw, kind)?),
        PrimitiveKind::String => ArgValue::Str(raw.to_string()),
        PrimitiveKind::Json => ArgValue::Json(
            serde_json::from_str(raw).map_err(|e| ConversionError::new(raw, kind, e.to_string()))?,
        ),
    })
}
