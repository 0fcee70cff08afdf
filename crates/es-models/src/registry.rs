//! Model registry: namespace → class name → factory.
//!
//! The registry is built once at start-up and only read afterwards.

use std::collections::BTreeMap;

use crate::error::ModelResult;
use crate::kwargs::{KwKind, Kwargs};
use crate::model::EigenModel;
use crate::{gaussian, harmonic, lattice};

/// Constructor of a registered model.
pub type ModelFactory = fn(Kwargs) -> ModelResult<Box<dyn EigenModel>>;

/// Documentation of one constructor keyword, for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordDoc {
    pub name: &'static str,
    pub kind: KwKind,
    pub default: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct ModelEntry {
    pub namespace: &'static str,
    pub class_name: &'static str,
    pub summary: &'static str,
    pub keywords: &'static [KeywordDoc],
    pub factory: ModelFactory,
}

impl ModelEntry {
    /// `namespace.ClassName`
    pub fn type_path(&self) -> String {
        format!("{}.{}", self.namespace, self.class_name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    namespaces: BTreeMap<&'static str, BTreeMap<&'static str, ModelEntry>>,
}

impl ModelRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry of the models shipped with eigsweep.
    pub fn builtin() -> Self {
        [gaussian::entry(), harmonic::entry(), lattice::entry()]
            .into_iter()
            .fold(Self::empty(), Self::with_entry)
    }

    /// Add `entry`, replacing any entry with the same namespace and class.
    pub fn with_entry(mut self, entry: ModelEntry) -> Self {
        self.namespaces
            .entry(entry.namespace)
            .or_default()
            .insert(entry.class_name, entry);
        self
    }

    pub fn lookup(&self, namespace: &str, class_name: &str) -> Option<&ModelEntry> {
        self.namespaces.get(namespace)?.get(class_name)
    }

    /// All entries, ordered by namespace then class name.
    pub fn entries(&self) -> impl Iterator<Item = &ModelEntry> {
        self.namespaces.values().flat_map(|classes| classes.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn type_paths_are_unique() {
        let registry = ModelRegistry::builtin();
        let mut seen = HashSet::new();
        for entry in registry.entries() {
            assert!(
                seen.insert(entry.type_path()),
                "duplicate model: {}",
                entry.type_path()
            );
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn builtin_models_construct_with_defaults() {
        for entry in ModelRegistry::builtin().entries() {
            let model = (entry.factory)(Kwargs::new())
                .unwrap_or_else(|e| panic!("{} failed with defaults: {e}", entry.type_path()));
            assert_eq!(model.name(), entry.type_path());
            assert!(model.dimension() >= 2);
        }
    }

    #[test]
    fn documented_keywords_are_accepted() {
        for entry in ModelRegistry::builtin().entries() {
            let mut kwargs = Kwargs::new();
            for doc in entry.keywords {
                kwargs.insert(doc.name, crate::kwargs::coerce_value(doc.default));
            }
            assert!(
                (entry.factory)(kwargs).is_ok(),
                "{} rejected its documented defaults",
                entry.type_path()
            );
        }
    }

    #[test]
    fn lookup_is_two_level() {
        let registry = ModelRegistry::builtin();
        assert!(registry.lookup("gaussian", "Gaussian1d").is_some());
        assert!(registry.lookup("gaussian", "Oscillator1d").is_none());
        assert!(registry.lookup("missing", "Gaussian1d").is_none());
    }
}
