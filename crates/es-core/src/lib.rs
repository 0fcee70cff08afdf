//! es-core: shared foundation for eigsweep.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers + amplitude type)
//! - error (shared error type)

pub mod error;
pub mod numeric;

pub use error::{CoreError, CoreResult};
pub use numeric::*;
