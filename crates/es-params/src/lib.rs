//! es-params: parameter range description language.
//!
//! Expands compact strings into explicit parameter sequences:
//!
//! - `"1.5"`                  single value
//! - `"1.0,2.0,3.0"`          explicit list, kept in the given order
//! - `"5.0,20.0:20"`          `len` evenly spaced points from min to max
//! - `"5.0,20.0:20,2.0"`      same endpoints, power-law spacing with exponent 2

pub mod error;
pub mod sequence;
pub mod spec;

pub use error::{ParseError, ParseResult};
pub use sequence::ParameterSequence;
pub use spec::{MAX_POINTS, ParameterSpec, RangeDefinition, Spacing};

/// Parse `spec` and generate its parameter values.
///
/// Every generated value is finite, or the spec is rejected.
pub fn expand(spec: &str) -> ParseResult<ParameterSequence> {
    let parsed = ParameterSpec::parse(spec)?;
    let sequence = parsed.expand();
    if let Some(bad) = sequence.iter().find(|v| !v.is_finite()) {
        return Err(ParseError::NonFinite {
            token: bad.to_string(),
            spec: spec.trim().to_string(),
        });
    }
    tracing::debug!(spec = %parsed, points = sequence.len(), "expanded parameter spec");
    Ok(sequence)
}
