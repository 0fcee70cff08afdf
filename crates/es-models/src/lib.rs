//! es-models: model descriptors, the model registry and the built-in models.
//!
//! A model descriptor is a string of the form `namespace.Class:kw1=v1,kw2=v2`.
//! [`resolve`] parses it, looks the class up in a [`ModelRegistry`], coerces the
//! keyword values and constructs the model.

pub mod error;
pub mod gaussian;
pub mod hamiltonian;
pub mod harmonic;
pub mod kwargs;
pub mod lattice;
pub mod model;
pub mod registry;
pub mod resolve;

pub use error::{ModelError, ModelResult, ResolutionError, ResolutionResult};
pub use kwargs::{KwKind, KwValue, KwargReader, Kwargs, coerce_value};
pub use model::{EigenModel, Eigenpairs};
pub use registry::{KeywordDoc, ModelEntry, ModelFactory, ModelRegistry};
pub use resolve::{ModelDescriptor, resolve};
