use std::{fmt, str::FromStr};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};

use crate::error::{ModelError, ModelResult};

const NANOSECOND: u64 = 1;
const MICROSECOND: u64 = 1_000 * NANOSECOND;
const MILLISECOND: u64 = 1_000 * MICROSECOND;
const SECOND: u64 = 1_000 * MILLISECOND;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

/// Magnitude of `i64::MIN`; the largest value a negative duration may carry.
const MAX_MAGNITUDE: u64 = 1 << 63;

/// Elapsed time with nanosecond precision.
///
/// Reads two wire encodings:
/// - an integer number of nanoseconds (`300000000`),
/// - a duration string with unit suffixes (`"300ms"`, `"1.5h"`, `"2h45m"`).
///
/// Always writes the canonical string form (`"1h30m0s"`), so integer input is
/// not preserved byte-for-byte, only by value.
///
/// Negative values are allowed and kept as given.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration {
    nanos: i64,
}

impl Duration {
    /// Zero-length duration, written as `"0s"`.
    pub const ZERO: Duration = Duration { nanos: 0 };

    /// Create a duration from signed nanoseconds.
    pub const fn from_nanos(nanos: i64) -> Self {
        Self { nanos }
    }

    /// Create a duration from whole milliseconds.
    pub const fn from_millis(ms: i64) -> Self {
        Self::from_nanos(ms * MILLISECOND as i64)
    }

    /// Create a duration from whole seconds.
    pub const fn from_secs(secs: i64) -> Self {
        Self::from_nanos(secs * SECOND as i64)
    }

    /// Create a duration from whole minutes.
    pub const fn from_mins(mins: i64) -> Self {
        Self::from_nanos(mins * MINUTE as i64)
    }

    /// Create a duration from whole hours.
    pub const fn from_hours(hours: i64) -> Self {
        Self::from_nanos(hours * HOUR as i64)
    }

    /// Signed nanoseconds.
    pub const fn as_nanos(&self) -> i64 {
        self.nanos
    }

    /// Check if the duration is zero.
    pub const fn is_zero(&self) -> bool {
        self.nanos == 0
    }

    /// Check if the duration is below zero.
    pub const fn is_negative(&self) -> bool {
        self.nanos < 0
    }

    /// Parse a duration string such as `"1h30m"`, `"-5m"` or `"0"`.
    ///
    /// Accepted grammar: `[-+]?([0-9]*(\.[0-9]*)?unit)+` where `unit` is one of
    /// `ns`, `us`, `µs`, `μs`, `ms`, `s`, `m`, `h`. A bare `0` needs no unit.
    pub fn parse(s: &str) -> ModelResult<Self> {
        parse_duration(s)
            .map(Self::from_nanos)
            .map_err(|reason| ModelError::MalformedDuration {
                raw: s.to_string(),
                reason,
            })
    }

    /// Decode a raw JSON fragment holding either encoding.
    ///
    /// Tries integer nanoseconds first, then a JSON string in duration syntax.
    /// Anything else is a [`ModelError::MalformedDuration`] naming the input.
    ///
    /// ```
    /// use plumber_model::Duration;
    ///
    /// let a = Duration::from_wire("300000000").unwrap();
    /// let b = Duration::from_wire(r#""300ms""#).unwrap();
    /// assert_eq!(a, b);
    /// assert_eq!(a.to_string(), "300ms");
    /// ```
    pub fn from_wire(raw: &str) -> ModelResult<Self> {
        if let Ok(nanos) = serde_json::from_str::<i64>(raw) {
            return Ok(Self::from_nanos(nanos));
        }
        match serde_json::from_str::<String>(raw) {
            Ok(s) => Self::parse(&s),
            Err(_) => Err(ModelError::MalformedDuration {
                raw: raw.to_string(),
                reason: "expected integer nanoseconds or a duration string".into(),
            }),
        }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let u = self.nanos.unsigned_abs();
        if u == 0 {
            return f.write_str("0s");
        }
        if self.nanos < 0 {
            f.write_str("-")?;
        }

        if u < SECOND {
            let (unit, prec) = match u {
                u if u < MICROSECOND => ("ns", 0),
                u if u < MILLISECOND => ("µs", 3),
                _ => ("ms", 6),
            };
            let (int, frac) = split_frac(u, prec);
            return write!(f, "{int}{frac}{unit}");
        }

        let (secs, frac) = split_frac(u, 9);
        let hours = secs / 3600;
        let mins = (secs / 60) % 60;
        if hours > 0 {
            write!(f, "{hours}h{mins}m")?;
        } else if mins > 0 {
            write!(f, "{mins}m")?;
        }
        write!(f, "{}{frac}s", secs % 60)
    }
}

/// Split `v` into `v / 10^prec` and the trimmed decimal fraction (`".5"`, or empty).
fn split_frac(v: u64, prec: u32) -> (u64, String) {
    let pow = 10u64.pow(prec);
    let frac = v % pow;
    if frac == 0 {
        return (v / pow, String::new());
    }
    let digits = format!("{:0width$}", frac, width = prec as usize);
    (v / pow, format!(".{}", digits.trim_end_matches('0')))
}

impl FromStr for Duration {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        Self::parse(s)
    }
}

fn unit_scale(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(NANOSECOND),
        "us" | "µs" | "μs" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}

fn parse_duration(input: &str) -> Result<i64, String> {
    let (neg, mut s) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if s == "0" {
        return Ok(0);
    }
    if s.is_empty() {
        return Err("empty duration".into());
    }

    let mut total: u64 = 0;
    while !s.is_empty() {
        let first = s.as_bytes()[0];
        if !(first == b'.' || first.is_ascii_digit()) {
            return Err(format!("unexpected character {:?}", s.chars().next().unwrap_or_default()));
        }

        let int_len = leading_digits(s);
        let mut value: u64 = 0;
        for b in s[..int_len].bytes() {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(u64::from(b - b'0')))
                .ok_or_else(|| "value out of range".to_string())?;
        }
        s = &s[int_len..];

        // Fraction digits past u64 precision are consumed but ignored.
        let mut frac: u64 = 0;
        let mut scale: f64 = 1.0;
        let mut frac_len = 0;
        if let Some(rest) = s.strip_prefix('.') {
            frac_len = leading_digits(rest);
            let mut overflow = false;
            for b in rest[..frac_len].bytes() {
                if overflow {
                    continue;
                }
                match frac.checked_mul(10).and_then(|v| v.checked_add(u64::from(b - b'0'))) {
                    Some(v) => {
                        frac = v;
                        scale *= 10.0;
                    }
                    None => overflow = true,
                }
            }
            s = &rest[frac_len..];
        }
        if int_len == 0 && frac_len == 0 {
            return Err("missing digits before unit".into());
        }

        let unit_len = s
            .bytes()
            .position(|b| b == b'.' || b.is_ascii_digit())
            .unwrap_or(s.len());
        if unit_len == 0 {
            return Err("missing unit".into());
        }
        let unit = &s[..unit_len];
        s = &s[unit_len..];
        let scale_ns = unit_scale(unit).ok_or_else(|| format!("unknown unit {unit:?}"))?;

        if value > MAX_MAGNITUDE / scale_ns {
            return Err("value out of range".into());
        }
        value *= scale_ns;
        if frac > 0 {
            value += (frac as f64 * (scale_ns as f64 / scale)) as u64;
            if value > MAX_MAGNITUDE {
                return Err("value out of range".into());
            }
        }
        total = total
            .checked_add(value)
            .filter(|t| *t <= MAX_MAGNITUDE)
            .ok_or_else(|| "value out of range".to_string())?;
    }

    if neg {
        // MAX_MAGNITUDE itself maps to i64::MIN.
        return Ok((total as i64).wrapping_neg());
    }
    i64::try_from(total).map_err(|_| "value out of range".to_string())
}

fn leading_digits(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

impl Serialize for Duration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

struct DurationVisitor;

impl<'de> Visitor<'de> for DurationVisitor {
    type Value = Duration;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("integer nanoseconds or a duration string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Duration, E> {
        Ok(Duration::from_nanos(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Duration, E> {
        i64::try_from(v)
            .map(Duration::from_nanos)
            .map_err(|_| E::custom(malformed(v, "value out of range")))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Duration, E> {
        Err(E::custom(malformed(v, "nanoseconds must be an integer")))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Duration, E> {
        Err(E::custom(malformed(v, "expected integer nanoseconds or a duration string")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Duration, E> {
        Duration::parse(v).map_err(E::custom)
    }
}

fn malformed(raw: impl fmt::Display, reason: &str) -> ModelError {
    ModelError::MalformedDuration {
        raw: raw.to_string(),
        reason: reason.to_string(),
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DurationVisitor)
    }
}

impl TryFrom<Duration> for std::time::Duration {
    type Error = ModelError;
    fn try_from(d: Duration) -> ModelResult<Self> {
        u64::try_from(d.nanos)
            .map(std::time::Duration::from_nanos)
            .map_err(|_| ModelError::Invalid(format!("negative duration {d} has no std equivalent")))
    }
}

impl TryFrom<std::time::Duration> for Duration {
    type Error = ModelError;
    fn try_from(d: std::time::Duration) -> ModelResult<Self> {
        i64::try_from(d.as_nanos())
            .map(Duration::from_nanos)
            .map_err(|_| ModelError::Invalid(format!("{d:?} exceeds the representable range")))
    }
}

#[cfg(feature = "schema")]
impl schemars::JsonSchema for Duration {
    fn schema_name() -> std::borrow::Cow<'static, str> {
        "Duration".into()
    }

    fn json_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "description": "Integer nanoseconds or a duration string such as \"1h30m\".",
            "type": ["integer", "string"]
        })
    }
}
