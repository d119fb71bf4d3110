//! Literal values carried by filter expressions.
//!
//! A [`Value`] is what a comparison's right-hand side reduces to once the
//! value evaluator has folded constants, computed thunks, and conversion
//! wrappers. Every variant knows two textual forms: the unquoted verbatim
//! form ([`Display`](std::fmt::Display), used when a constant passes through
//! as a raw filter fragment) and the quoted/typed form
//! ([`Value::to_filter_literal`], used on the right side of a comparison).

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, FixedOffset, SecondsFormat, Utc};
use uuid::Uuid;

/// A literal value in a filter expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Boolean literal, rendered bare as `true`/`false`.
    Bool(bool),
    /// Signed integer literal.
    Int(i64),
    /// Unsigned integer literal.
    UInt(u64),
    /// Floating point literal. Rendered in plain decimal notation.
    Float(f64),
    /// String literal. Quoted but NOT escaped: a value containing a single
    /// quote produces a malformed filter (preserved wire behavior).
    String(String),
    /// GUID literal, rendered in lower-case hyphenated round-trip form.
    Guid(Uuid),
    /// UTC timestamp, rendered RFC 3339 with a `Z` suffix.
    DateTime(DateTime<Utc>),
    /// Offset-aware timestamp, rendered RFC 3339 preserving its offset.
    DateTimeOffset(DateTime<FixedOffset>),
    /// Duration literal, rendered in `[-][d.]hh:mm:ss[.fffffff]` form.
    Duration(Duration),
}

impl Value {
    /// Renders the value as a comparison right-hand literal.
    ///
    /// Strings, GUIDs, timestamps, and durations are single-quoted; booleans
    /// and numbers are bare.
    ///
    /// # Examples
    ///
    /// ```
    /// use search_filter_rs::Value;
    ///
    /// assert_eq!(Value::Bool(true).to_filter_literal(), "true");
    /// assert_eq!(Value::Int(42).to_filter_literal(), "42");
    /// assert_eq!(Value::from("Foo").to_filter_literal(), "'Foo'");
    /// ```
    pub fn to_filter_literal(&self) -> String {
        match self {
            Value::Bool(_) | Value::Int(_) | Value::UInt(_) | Value::Float(_) => self.to_string(),
            _ => format!("'{self}'"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::UInt(u) => write!(f, "{u}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => f.write_str(s),
            Value::Guid(g) => write!(f, "{g}"),
            Value::DateTime(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Value::DateTimeOffset(dt) => {
                f.write_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, false))
            }
            Value::Duration(d) => f.write_str(&format_duration(*d)),
        }
    }
}

/// Formats a duration in round-trip `[-][d.]hh:mm:ss[.fffffff]` form.
///
/// The fractional part is expressed in 100ns ticks and only emitted when
/// non-zero, so reformatting a parsed value is idempotent.
fn format_duration(d: Duration) -> String {
    let negative = d < Duration::zero();
    let d = if negative { -d } else { d };

    let total_seconds = d.num_seconds();
    let days = total_seconds / 86_400;
    let hours = (total_seconds / 3_600) % 24;
    let minutes = (total_seconds / 60) % 60;
    let seconds = total_seconds % 60;
    let ticks = d.subsec_nanos() / 100;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if days > 0 {
        out.push_str(&format!("{days}."));
    }
    out.push_str(&format!("{hours:02}:{minutes:02}:{seconds:02}"));
    if ticks > 0 {
        out.push_str(&format!(".{ticks:07}"));
    }
    out
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::UInt(value.into())
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::UInt(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Uuid> for Value {
    fn from(value: Uuid) -> Self {
        Value::Guid(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::DateTime(value)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Value::DateTimeOffset(value)
    }
}

impl From<Duration> for Value {
    fn from(value: Duration) -> Self {
        Value::Duration(value)
    }
}

/// A bound zero-argument computation captured as data.
///
/// The predicate tree is built as data rather than introspected from opaque
/// closures, so late-bound right-hand values (zero-argument method calls,
/// constructors over constant arguments) enter the tree as an explicit thunk
/// the value evaluator invokes during constant folding.
#[derive(Clone)]
pub struct Thunk(Arc<dyn Fn() -> Value + Send + Sync>);

impl Thunk {
    /// Wraps a zero-argument computation.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Thunk(Arc::new(f))
    }

    /// Invokes the computation, producing its literal value.
    pub fn invoke(&self) -> Value {
        (self.0)()
    }
}

impl fmt::Debug for Thunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Thunk(..)")
    }
}

impl PartialEq for Thunk {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
