//! Literal scalar codecs
//!
//! One [`Literal`] holds exactly one decoded scalar of a declared
//! [`LiteralKind`]. Parsing is candidate-based: [`Literal::parse`] returns
//! `None` when the wire value is not of the requested kind, which merely
//! disqualifies that candidate — it is never an error by itself.
//!
//! Concrete codecs:
//! - date-times: RFC 3339 via `chrono`
//! - durations: `PnYnMnDTnHnMnS` wire syntax over `chrono::Duration`
//! - media types: `mime`
//! - IRIs: `oxiri` (absolute IRIs only)

use crate::schema::LiteralKind;
use chrono::{DateTime, Duration, FixedOffset};
use mime::Mime;
use oxiri::Iri;
use serde_json::{json, Number, Value};

const NANOS_PER_SEC: i64 = 1_000_000_000;
const SECS_PER_DAY: i64 = 86_400;

/// A decoded literal scalar value
///
/// Exactly one kind is populated; the variant itself is the proof.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Plain string
    String(String),
    /// Language-taggable string (tags live in the sibling language map)
    LangString(String),
    /// RFC 3339 date-time with offset
    DateTime(DateTime<FixedOffset>),
    /// Signed duration
    Duration(Duration),
    /// IEEE 754 floating point
    Float(f64),
    /// Parsed media type
    MediaType(Mime),
    /// Absolute IRI used as a value
    Iri(String),
}

impl Literal {
    /// Try to parse `raw` as the given literal kind.
    ///
    /// Returns `None` when the value is not of that kind; the caller
    /// falls through to its next candidate.
    pub fn parse(kind: LiteralKind, raw: &Value) -> Option<Literal> {
        match kind {
            LiteralKind::String => raw.as_str().map(|s| Literal::String(s.to_string())),
            LiteralKind::LangString => raw.as_str().map(|s| Literal::LangString(s.to_string())),
            LiteralKind::DateTime => {
                let s = raw.as_str()?;
                DateTime::parse_from_rfc3339(s).ok().map(Literal::DateTime)
            }
            LiteralKind::Duration => {
                let s = raw.as_str()?;
                parse_duration(s).map(Literal::Duration)
            }
            LiteralKind::Float => raw.as_f64().map(Literal::Float),
            LiteralKind::MediaType => {
                let s = raw.as_str()?;
                s.parse::<Mime>().ok().map(Literal::MediaType)
            }
            LiteralKind::Iri => {
                let s = raw.as_str()?;
                Iri::parse(s.to_string()).ok().map(|iri| Literal::Iri(iri.into_inner()))
            }
        }
    }

    /// Format this literal back to its wire value.
    ///
    /// A non-finite float has no JSON representation and formats to
    /// `null`; such a value can only be built programmatically, never by
    /// [`parse`](Self::parse), which only sees JSON numbers.
    pub fn format(&self) -> Value {
        match self {
            Literal::String(s) | Literal::LangString(s) | Literal::Iri(s) => json!(s),
            Literal::DateTime(dt) => json!(dt.to_rfc3339()),
            Literal::Duration(d) => json!(format_duration(*d)),
            // Non-finite floats have no JSON representation
            Literal::Float(f) => Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null),
            Literal::MediaType(m) => json!(m.to_string()),
        }
    }

    /// The kind of this literal
    pub fn kind(&self) -> LiteralKind {
        match self {
            Literal::String(_) => LiteralKind::String,
            Literal::LangString(_) => LiteralKind::LangString,
            Literal::DateTime(_) => LiteralKind::DateTime,
            Literal::Duration(_) => LiteralKind::Duration,
            Literal::Float(_) => LiteralKind::Float,
            Literal::MediaType(_) => LiteralKind::MediaType,
            Literal::Iri(_) => LiteralKind::Iri,
        }
    }

    /// Get the string content if this is a plain or language-taggable string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::String(s) | Literal::LangString(s) => Some(s),
            _ => None,
        }
    }

    /// Get the date-time if this is a date-time literal
    pub fn as_date_time(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Literal::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    /// Get the duration if this is a duration literal
    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Literal::Duration(d) => Some(*d),
            _ => None,
        }
    }

    /// Get the float if this is a float literal
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Literal::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get the media type if this is a media-type literal
    pub fn as_media_type(&self) -> Option<&Mime> {
        match self {
            Literal::MediaType(m) => Some(m),
            _ => None,
        }
    }

    /// Get the IRI string if this is an IRI literal
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Literal::Iri(s) => Some(s),
            _ => None,
        }
    }
}

/// Parse the `[-]PnYnMnDTnHnMnS` duration wire syntax.
///
/// Years and months are normalized to 365 and 30 days respectively, so
/// parsing the formatted output of [`format_duration`] is stable.
fn parse_duration(s: &str) -> Option<Duration> {
    let (negative, rest) = match s.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, s),
    };
    let rest = rest.strip_prefix('P')?;
    if rest.is_empty() {
        return None;
    }

    let (date_part, time_part) = match rest.split_once('T') {
        Some((_, t)) if t.is_empty() => return None,
        Some((d, t)) => (d, t),
        None => (rest, ""),
    };

    let mut secs: i64 = 0;
    let mut nanos: i64 = 0;
    let mut components = 0usize;

    let mut add = |count: i64, unit: i64| -> Option<()> {
        secs = secs.checked_add(count.checked_mul(unit)?)?;
        Some(())
    };

    // Date components: digits followed by Y, M or D, each at most once,
    // in that order.
    let mut start = 0usize;
    let mut last_slot = None;
    for (i, c) in date_part.char_indices() {
        if c.is_ascii_digit() {
            continue;
        }
        let count: i64 = date_part[start..i].parse().ok()?;
        let (slot, unit) = match c {
            'Y' => (0, 365 * SECS_PER_DAY),
            'M' => (1, 30 * SECS_PER_DAY),
            'D' => (2, SECS_PER_DAY),
            _ => return None,
        };
        if last_slot.is_some_and(|prev| prev >= slot) {
            return None;
        }
        last_slot = Some(slot);
        add(count, unit)?;
        components += 1;
        start = i + 1;
    }
    if start != date_part.len() {
        // trailing digits with no designator
        return None;
    }

    // Time components: digits (seconds may be fractional) followed by
    // H, M or S, each at most once, in that order.
    start = 0;
    last_slot = None;
    for (i, c) in time_part.char_indices() {
        if c.is_ascii_digit() || c == '.' {
            continue;
        }
        let body = &time_part[start..i];
        let slot = match c {
            'H' => 0,
            'M' => 1,
            'S' => 2,
            _ => return None,
        };
        if last_slot.is_some_and(|prev| prev >= slot) {
            return None;
        }
        last_slot = Some(slot);
        match c {
            'H' => add(body.parse().ok()?, 3600)?,
            'M' => add(body.parse().ok()?, 60)?,
            'S' => {
                let (whole, frac) = match body.split_once('.') {
                    Some((w, f)) => (w, f),
                    None => (body, ""),
                };
                add(whole.parse().ok()?, 1)?;
                if !frac.is_empty() {
                    if frac.len() > 9 || !frac.bytes().all(|b| b.is_ascii_digit()) {
                        return None;
                    }
                    let scale = 10i64.pow(9 - frac.len() as u32);
                    nanos = frac.parse::<i64>().ok()? * scale;
                }
            }
            _ => return None,
        }
        components += 1;
        start = i + 1;
    }
    if start != time_part.len() {
        return None;
    }

    if components == 0 {
        return None;
    }

    let total = Duration::try_seconds(secs)?.checked_add(&Duration::nanoseconds(nanos))?;
    if negative {
        Some(-total)
    } else {
        Some(total)
    }
}

/// Format a duration in canonical `[-]PnDTnHnMnS` form.
///
/// Zero formats as `PT0S`.
fn format_duration(d: Duration) -> String {
    let negative = d < Duration::zero();
    let d = if negative { -d } else { d };

    let mut secs = d.num_seconds();
    let nanos = d.subsec_nanos();

    let days = secs / SECS_PER_DAY;
    secs %= SECS_PER_DAY;
    let hours = secs / 3600;
    secs %= 3600;
    let minutes = secs / 60;
    secs %= 60;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push('P');
    if days > 0 {
        out.push_str(&format!("{days}D"));
    }
    if hours > 0 || minutes > 0 || secs > 0 || nanos != 0 || days == 0 {
        out.push('T');
        if hours > 0 {
            out.push_str(&format!("{hours}H"));
        }
        if minutes > 0 {
            out.push_str(&format!("{minutes}M"));
        }
        if nanos != 0 {
            let frac = format!("{:09}", nanos.abs());
            out.push_str(&format!("{secs}.{}S", frac.trim_end_matches('0')));
        } else if secs > 0 || (days == 0 && hours == 0 && minutes == 0) {
            out.push_str(&format!("{secs}S"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_parse() {
        let lit = Literal::parse(LiteralKind::String, &json!("hello"));
        assert_eq!(lit, Some(Literal::String("hello".to_string())));
        assert_eq!(Literal::parse(LiteralKind::String, &json!(42)), None);
    }

    #[test]
    fn test_date_time_roundtrip() {
        let raw = json!("2024-03-01T12:30:00+02:00");
        let lit = Literal::parse(LiteralKind::DateTime, &raw).unwrap();
        let back = lit.format();
        assert_eq!(Literal::parse(LiteralKind::DateTime, &back), Some(lit));
    }

    #[test]
    fn test_date_time_rejects_garbage() {
        assert_eq!(Literal::parse(LiteralKind::DateTime, &json!("yesterday")), None);
        assert_eq!(Literal::parse(LiteralKind::DateTime, &json!("2024-13-99T00:00:00Z")), None);
    }

    #[test]
    fn test_duration_forms() {
        assert_eq!(parse_duration("PT5S"), Some(Duration::seconds(5)));
        assert_eq!(parse_duration("PT1H30M"), Some(Duration::seconds(5400)));
        assert_eq!(
            parse_duration("P2DT3H"),
            Some(Duration::seconds(2 * 86_400 + 3 * 3600))
        );
        assert_eq!(parse_duration("P1Y"), Some(Duration::seconds(365 * 86_400)));
        assert_eq!(parse_duration("-PT2S"), Some(Duration::seconds(-2)));
        assert_eq!(
            parse_duration("PT0.5S"),
            Some(Duration::milliseconds(500))
        );
    }

    #[test]
    fn test_duration_rejects_garbage() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("P"), None);
        assert_eq!(parse_duration("PT"), None);
        assert_eq!(parse_duration("5S"), None);
        assert_eq!(parse_duration("P5"), None);
        assert_eq!(parse_duration("PT5X"), None);
    }

    #[test]
    fn test_duration_rejects_misordered_components() {
        // Each designator at most once, in Y-M-D / H-M-S order.
        assert_eq!(parse_duration("PT5M3H"), None);
        assert_eq!(parse_duration("PT1H1H"), None);
        assert_eq!(parse_duration("PT2S1M"), None);
        assert_eq!(parse_duration("P1D1Y"), None);
        assert_eq!(parse_duration("P1Y1Y"), None);
    }

    #[test]
    fn test_duration_format_roundtrip() {
        for s in ["PT0S", "PT5S", "P2DT3H", "PT1H30M", "-PT2S", "PT0.5S"] {
            let d = parse_duration(s).unwrap();
            assert_eq!(parse_duration(&format_duration(d)), Some(d), "via {s}");
        }
        assert_eq!(format_duration(Duration::zero()), "PT0S");
    }

    #[test]
    fn test_media_type() {
        let lit = Literal::parse(LiteralKind::MediaType, &json!("text/html; charset=utf-8")).unwrap();
        assert!(lit.as_media_type().is_some());
        assert_eq!(Literal::parse(LiteralKind::MediaType, &json!("not a mime")), None);
    }

    #[test]
    fn test_iri_rejects_relative() {
        assert!(Literal::parse(LiteralKind::Iri, &json!("https://example.com/a")).is_some());
        assert_eq!(Literal::parse(LiteralKind::Iri, &json!("/relative/path")), None);
    }

    #[test]
    fn test_float() {
        assert_eq!(Literal::parse(LiteralKind::Float, &json!(4.5)), Some(Literal::Float(4.5)));
        assert_eq!(Literal::parse(LiteralKind::Float, &json!(3)), Some(Literal::Float(3.0)));
        assert_eq!(Literal::parse(LiteralKind::Float, &json!("4.5")), None);
        assert_eq!(Literal::Float(4.5).format(), json!(4.5));
    }

    #[test]
    fn test_float_non_finite_format() {
        // Only reachable programmatically; parse never yields these.
        assert_eq!(Literal::Float(f64::INFINITY).format(), Value::Null);
        assert_eq!(Literal::Float(f64::NEG_INFINITY).format(), Value::Null);
        assert_eq!(Literal::Float(f64::NAN).format(), Value::Null);
    }
}
