use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Sequence not ascending for {what} at position {position}: {previous} > {current}")]
    NotAscending {
        what: &'static str,
        position: usize,
        previous: f64,
        current: f64,
    },
}
