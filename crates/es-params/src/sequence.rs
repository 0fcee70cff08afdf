//! Expanded parameter sequence.

use std::fmt;
use std::ops::Deref;

/// Ordered, non-empty sequence of parameter values.
///
/// Only produced by the expander; there is no way to mutate it afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSequence(Vec<f64>);

impl ParameterSequence {
    pub(crate) fn new(values: Vec<f64>) -> Self {
        debug_assert!(!values.is_empty(), "parameter sequences are never empty");
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }
}

impl Deref for ParameterSequence {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl AsRef<[f64]> for ParameterSequence {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a ParameterSequence {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ParameterSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}
