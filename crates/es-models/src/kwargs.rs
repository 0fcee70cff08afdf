//! Keyword arguments of a model descriptor.
//!
//! Values are typed by trial-parsing against [`COERCIONS`] in order: integer,
//! real, boolean, and finally the literal string. The inference is one-way:
//! there is no quoting, so a value that looks numeric always becomes a number,
//! and values cannot contain `,` or `=`. Integer literals outside the `i64`
//! range are rejected by [`Kwargs::parse`] rather than widened to a real.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use crate::error::{ModelError, ModelResult, ResolutionError, ResolutionResult};

/// Type of a keyword value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KwKind {
    Integer,
    Real,
    Boolean,
    String,
}

/// A typed keyword value.
#[derive(Debug, Clone, PartialEq)]
pub enum KwValue {
    Integer(i64),
    Real(f64),
    Boolean(bool),
    String(String),
}

impl KwValue {
    pub fn kind(&self) -> KwKind {
        match self {
            Self::Integer(_) => KwKind::Integer,
            Self::Real(_) => KwKind::Real,
            Self::Boolean(_) => KwKind::Boolean,
            Self::String(_) => KwKind::String,
        }
    }
}

type Coercion = (KwKind, fn(&str) -> Option<KwValue>);

/// Inference order for keyword values; the first entry that accepts wins.
pub const COERCIONS: [Coercion; 4] = [
    (KwKind::Integer, try_integer),
    (KwKind::Real, try_real),
    (KwKind::Boolean, try_boolean),
    (KwKind::String, keep_string),
];

fn try_integer(raw: &str) -> Option<KwValue> {
    raw.parse::<i64>().ok().map(KwValue::Integer)
}

fn try_real(raw: &str) -> Option<KwValue> {
    raw.parse::<f64>().ok().map(KwValue::Real)
}

fn try_boolean(raw: &str) -> Option<KwValue> {
    match raw.to_ascii_lowercase().as_str() {
        "true" => Some(KwValue::Boolean(true)),
        "false" => Some(KwValue::Boolean(false)),
        _ => None,
    }
}

fn keep_string(raw: &str) -> Option<KwValue> {
    Some(KwValue::String(raw.to_string()))
}

/// Infer the type of a single keyword value.
pub fn coerce_value(raw: &str) -> KwValue {
    let raw = raw.trim();
    COERCIONS
        .iter()
        .find_map(|(_, coerce)| coerce(raw))
        .unwrap_or_else(|| KwValue::String(raw.to_string()))
}

/// Optional sign followed by decimal digits only.
fn is_integer_literal(raw: &str) -> bool {
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Keyword mapping passed to a model constructor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Kwargs(BTreeMap<String, KwValue>);

impl Kwargs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `k1=v1,k2=v2` block taken from descriptor `spec`.
    ///
    /// A block that is empty after trimming means "no keywords".
    pub fn parse(block: &str, spec: &str) -> ResolutionResult<Self> {
        let mut kwargs = Self::new();
        if block.trim().is_empty() {
            return Ok(kwargs);
        }

        for segment in block.split(',') {
            let malformed = |reason| ResolutionError::MalformedKeyword {
                segment: segment.to_string(),
                spec: spec.to_string(),
                reason,
            };

            let trimmed = segment.trim();
            if trimmed.is_empty() {
                return Err(malformed("empty segment"));
            }
            let mut parts = trimmed.split('=');
            let (Some(name), Some(raw), None) = (parts.next(), parts.next(), parts.next()) else {
                return Err(malformed("expected exactly one '='"));
            };
            let name = name.trim();
            if name.is_empty() {
                return Err(malformed("empty keyword name"));
            }
            if kwargs.0.contains_key(name) {
                return Err(ResolutionError::DuplicateKeyword {
                    name: name.to_string(),
                    spec: spec.to_string(),
                });
            }
            if is_integer_literal(raw.trim()) && raw.trim().parse::<i64>().is_err() {
                return Err(malformed("integer out of range"));
            }
            kwargs.insert(name, coerce_value(raw));
        }

        Ok(kwargs)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: KwValue) -> Option<KwValue> {
        self.0.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&KwValue> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, KwValue> {
        self.0.iter()
    }

    fn remove(&mut self, name: &str) -> Option<KwValue> {
        self.0.remove(name)
    }
}

/// Typed, consuming access to a constructor's keywords.
///
/// Each accessor removes the keyword it reads; [`KwargReader::finish`] then
/// rejects whatever was left, so misspelled keywords never fall back to a default.
pub struct KwargReader {
    model: &'static str,
    remaining: Kwargs,
}

impl KwargReader {
    pub fn new(model: &'static str, kwargs: Kwargs) -> Self {
        Self {
            model,
            remaining: kwargs,
        }
    }

    pub fn model(&self) -> &'static str {
        self.model
    }

    pub fn integer(&mut self, name: &'static str, default: i64) -> ModelResult<i64> {
        match self.remaining.remove(name) {
            None => Ok(default),
            Some(KwValue::Integer(v)) => Ok(v),
            Some(other) => Err(self.mismatch(name, KwKind::Integer, &other)),
        }
    }

    /// Read a non-negative integer as a size or count.
    pub fn count(&mut self, name: &'static str, default: usize) -> ModelResult<usize> {
        let value = self.integer(name, default as i64)?;
        usize::try_from(value).map_err(|_| ModelError::OutOfRange {
            model: self.model,
            name,
            reason: format!("must be non-negative, got {value}"),
        })
    }

    /// Read a real value. Integer values are widened.
    pub fn real(&mut self, name: &'static str, default: f64) -> ModelResult<f64> {
        match self.remaining.remove(name) {
            None => Ok(default),
            Some(KwValue::Real(v)) => Ok(v),
            Some(KwValue::Integer(v)) => Ok(v as f64),
            Some(other) => Err(self.mismatch(name, KwKind::Real, &other)),
        }
    }

    pub fn boolean(&mut self, name: &'static str, default: bool) -> ModelResult<bool> {
        match self.remaining.remove(name) {
            None => Ok(default),
            Some(KwValue::Boolean(v)) => Ok(v),
            Some(other) => Err(self.mismatch(name, KwKind::Boolean, &other)),
        }
    }

    pub fn finish(self) -> ModelResult<()> {
        match self.remaining.iter().next() {
            None => Ok(()),
            Some((name, _)) => Err(ModelError::UnknownKeyword {
                model: self.model,
                name: name.clone(),
            }),
        }
    }

    fn mismatch(&self, name: &'static str, expected: KwKind, found: &KwValue) -> ModelError {
        ModelError::TypeMismatch {
            model: self.model,
            name,
            expected,
            found: found.kind(),
            value: found.to_string(),
        }
    }
}

impl fmt::Display for KwKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => write!(f, "integer"),
            Self::Real => write!(f, "real"),
            Self::Boolean => write!(f, "boolean"),
            Self::String => write!(f, "string"),
        }
    }
}

impl fmt::Display for KwValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v:?}"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coercion_priority() {
        assert_eq!(coerce_value("32"), KwValue::Integer(32));
        assert_eq!(coerce_value("-7"), KwValue::Integer(-7));
        assert_eq!(coerce_value("-4.0"), KwValue::Real(-4.0));
        assert_eq!(coerce_value("1e3"), KwValue::Real(1000.0));
        assert_eq!(coerce_value("TRUE"), KwValue::Boolean(true));
        assert_eq!(coerce_value(" False "), KwValue::Boolean(false));
        assert_eq!(coerce_value("open"), KwValue::String("open".into()));
    }

    #[test]
    fn numeric_looking_strings_cannot_stay_strings() {
        assert_eq!(coerce_value("007"), KwValue::Integer(7));
    }

    #[test]
    fn parse_block() {
        let kwargs = Kwargs::parse(" N = 32 ,V0=-4.0, flag=true", "ns.Cls:...").unwrap();
        assert_eq!(kwargs.len(), 3);
        assert_eq!(kwargs.get("N"), Some(&KwValue::Integer(32)));
        assert_eq!(kwargs.get("V0"), Some(&KwValue::Real(-4.0)));
        assert_eq!(kwargs.get("flag"), Some(&KwValue::Boolean(true)));
    }

    #[test]
    fn oversized_integers_are_rejected() {
        let err = Kwargs::parse("N=99999999999999999999", "ns.Cls:N=99999999999999999999")
            .unwrap_err();
        assert_eq!(
            err,
            ResolutionError::MalformedKeyword {
                segment: "N=99999999999999999999".into(),
                spec: "ns.Cls:N=99999999999999999999".into(),
                reason: "integer out of range",
            }
        );

        let kwargs = Kwargs::parse("a=-9223372036854775808,b=1e20", "ns.Cls").unwrap();
        assert_eq!(kwargs.get("a"), Some(&KwValue::Integer(i64::MIN)));
        assert_eq!(kwargs.get("b"), Some(&KwValue::Real(1e20)));
    }

    #[test]
    fn blank_block_means_no_keywords() {
        assert!(Kwargs::parse("  ", "ns.Cls:").unwrap().is_empty());
    }

    #[test]
    fn malformed_segments() {
        for block in ["N=32,bad", "N=32,,V0=1", "N=32,a=b=c", "=5", "N=32,"] {
            let err = Kwargs::parse(block, "ns.Cls").unwrap_err();
            assert!(
                matches!(err, ResolutionError::MalformedKeyword { .. }),
                "{block} should be malformed, got {err:?}"
            );
        }
    }

    #[test]
    fn duplicate_keyword() {
        let err = Kwargs::parse("N=1,N=2", "ns.Cls:N=1,N=2").unwrap_err();
        assert_eq!(
            err,
            ResolutionError::DuplicateKeyword {
                name: "N".into(),
                spec: "ns.Cls:N=1,N=2".into(),
            }
        );
    }

    #[test]
    fn reader_enforces_types_and_leftovers() {
        let kwargs = Kwargs::parse("N=8,mass=2,flag=yes", "m.M").unwrap();
        let mut reader = KwargReader::new("m.M", kwargs);
        assert_eq!(reader.count("N", 4).unwrap(), 8);
        assert_eq!(reader.real("mass", 1.0).unwrap(), 2.0);
        assert_eq!(reader.real("omega", 1.5).unwrap(), 1.5);
        let err = reader.boolean("flag", false).unwrap_err();
        assert!(matches!(
            err,
            ModelError::TypeMismatch {
                expected: KwKind::Boolean,
                found: KwKind::String,
                ..
            }
        ));
        assert!(reader.finish().is_ok());

        let kwargs = Kwargs::parse("Nn=8", "m.M").unwrap();
        let mut reader = KwargReader::new("m.M", kwargs);
        assert_eq!(reader.count("N", 4).unwrap(), 4);
        assert_eq!(
            reader.finish().unwrap_err(),
            ModelError::UnknownKeyword {
                model: "m.M",
                name: "Nn".into(),
            }
        );
    }

    #[test]
    fn negative_count_is_out_of_range() {
        let kwargs = Kwargs::parse("N=-3", "m.M").unwrap();
        let mut reader = KwargReader::new("m.M", kwargs);
        assert!(matches!(
            reader.count("N", 4).unwrap_err(),
            ModelError::OutOfRange { name: "N", .. }
        ));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn integers_stay_integers(n in any::<i64>()) {
                prop_assert_eq!(coerce_value(&n.to_string()), KwValue::Integer(n));
            }

            #[test]
            fn finite_reals_round_trip(x in any::<f64>().prop_filter("finite", |x| x.is_finite())) {
                // `{:?}` always carries a '.' or an exponent, so it never reads as an integer.
                prop_assert_eq!(coerce_value(&format!("{x:?}")), KwValue::Real(x));
            }

            #[test]
            fn words_fall_through_to_strings(raw in "[a-zA-Z_][a-zA-Z0-9_]{0,8}") {
                prop_assume!(raw.parse::<f64>().is_err());
                prop_assume!(!raw.eq_ignore_ascii_case("true") && !raw.eq_ignore_ascii_case("false"));
                prop_assert_eq!(coerce_value(&raw), KwValue::String(raw.clone()));
            }
        }
    }
}
