//! Parameter spec grammar.
//!
//! The form is chosen by looking at the structure of the string (a `:` marks
//! a range, otherwise a `,` marks a list), never by trying each form in turn.

use std::fmt;

use es_core::ensure_finite;

use crate::error::{ParseError, ParseResult};
use crate::sequence::ParameterSequence;

/// Largest point count a range may ask for.
pub const MAX_POINTS: usize = 10_000_000;

/// Spacing of the points of a range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Spacing {
    /// Uniformly spaced points
    Linear,
    /// `min + t^exp * (max - min)` for evenly spaced `t` in `[0, 1]`
    Power(f64),
}

impl Spacing {
    fn from_exponent(exponent: f64) -> Self {
        if exponent == 1.0 {
            Self::Linear
        } else {
            Self::Power(exponent)
        }
    }

    pub fn exponent(self) -> f64 {
        match self {
            Self::Linear => 1.0,
            Self::Power(exp) => exp,
        }
    }
}

/// `"<min>,<max>:<len>[,<exp>]"`
#[derive(Debug, Clone, PartialEq)]
pub struct RangeDefinition {
    pub min: f64,
    pub max: f64,
    pub num_points: usize,
    pub spacing: Spacing,
}

impl RangeDefinition {
    /// Generate all points in the range.
    ///
    /// Points are convex combinations of the endpoints, so far-apart finite
    /// endpoints never overflow the way `min + t * (max - min)` would.
    pub fn generate_points(&self) -> Vec<f64> {
        if self.num_points <= 1 {
            return vec![self.min];
        }

        let last = self.num_points - 1;
        let mut points = Vec::with_capacity(self.num_points);

        for i in 0..self.num_points {
            let t = i as f64 / last as f64;
            let s = match self.spacing {
                Spacing::Linear => t,
                Spacing::Power(exp) => t.powf(exp),
            };
            points.push(self.min * (1.0 - s) + self.max * s);
        }

        // Ensure exact endpoints
        points[0] = self.min;
        points[last] = self.max;
        points
    }
}

/// A parsed parameter spec.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterSpec {
    Single(f64),
    List(Vec<f64>),
    Range(RangeDefinition),
}

impl ParameterSpec {
    pub fn parse(spec: &str) -> ParseResult<Self> {
        let trimmed = spec.trim();
        if trimmed.is_empty() {
            return Err(ParseError::Empty);
        }

        if trimmed.contains(':') {
            parse_range(trimmed).map(Self::Range)
        } else if trimmed.contains(',') {
            trimmed
                .split(',')
                .map(|token| parse_real(token, trimmed))
                .collect::<ParseResult<Vec<_>>>()
                .map(Self::List)
        } else {
            parse_real(trimmed, trimmed).map(Self::Single)
        }
    }

    pub fn expand(&self) -> ParameterSequence {
        let values = match self {
            Self::Single(v) => vec![*v],
            Self::List(values) => values.clone(),
            Self::Range(range) => range.generate_points(),
        };
        ParameterSequence::new(values)
    }
}

fn parse_range(spec: &str) -> ParseResult<RangeDefinition> {
    let mut halves = spec.split(':');
    let (Some(bounds), Some(shape), None) = (halves.next(), halves.next(), halves.next()) else {
        return Err(ParseError::Malformed {
            spec: spec.to_string(),
            reason: "a range contains exactly one ':'",
        });
    };

    let bounds: Vec<&str> = bounds.split(',').collect();
    let [min, max] = bounds.as_slice() else {
        return Err(ParseError::Malformed {
            spec: spec.to_string(),
            reason: "a range needs '<min>,<max>' before ':'",
        });
    };
    let min = parse_real(min, spec)?;
    let max = parse_real(max, spec)?;

    let shape: Vec<&str> = shape.split(',').collect();
    let (len_token, exp_token) = match shape.as_slice() {
        [len] => (*len, None),
        [len, exp] => (*len, Some(*exp)),
        _ => {
            return Err(ParseError::Malformed {
                spec: spec.to_string(),
                reason: "a range needs '<len>' or '<len>,<exp>' after ':'",
            });
        }
    };

    let len_token = len_token.trim();
    let num_points = match len_token.parse::<usize>() {
        Ok(n) if (1..=MAX_POINTS).contains(&n) => n,
        _ => {
            return Err(ParseError::InvalidLength {
                token: len_token.to_string(),
                spec: spec.to_string(),
            });
        }
    };

    let exponent = match exp_token {
        None => 1.0,
        Some(token) => {
            let token = token.trim();
            match token.parse::<f64>() {
                Ok(exp) if exp.is_finite() && exp > 0.0 => exp,
                _ => {
                    return Err(ParseError::InvalidExponent {
                        token: token.to_string(),
                        spec: spec.to_string(),
                    });
                }
            }
        }
    };

    Ok(RangeDefinition {
        min,
        max,
        num_points,
        spacing: Spacing::from_exponent(exponent),
    })
}

fn parse_real(token: &str, spec: &str) -> ParseResult<f64> {
    let token = token.trim();
    let value = token.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
        token: token.to_string(),
        spec: spec.to_string(),
    })?;
    ensure_finite(value, "parameter").map_err(|_| ParseError::NonFinite {
        token: token.to_string(),
        spec: spec.to_string(),
    })
}

impl fmt::Display for Spacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::Power(exp) => write!(f, "Power(exp={exp})"),
        }
    }
}

impl fmt::Display for ParameterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(v) => write!(f, "Single {v}"),
            Self::List(values) => write!(f, "List of {} values", values.len()),
            Self::Range(range) => write!(
                f,
                "Range from {} to {} ({} points, {})",
                range.min, range.max, range.num_points, range.spacing
            ),
        }
    }
}
