//! Model catalog listing.

use es_models::ModelRegistry;

/// One registered model, for listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSummary {
    pub type_path: String,
    pub summary: String,
    /// `name (kind, default value)` per keyword.
    pub keywords: Vec<String>,
}

/// Summaries of every model in `registry`, ordered by type path.
pub fn list_models(registry: &ModelRegistry) -> Vec<ModelSummary> {
    registry
        .entries()
        .map(|entry| ModelSummary {
            type_path: entry.type_path(),
            summary: entry.summary.to_string(),
            keywords: entry
                .keywords
                .iter()
                .map(|kw| format!("{} ({}, default {})", kw.name, kw.kind, kw.default))
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_models_are_listed() {
        let models = list_models(&ModelRegistry::builtin());
        let paths: Vec<&str> = models.iter().map(|m| m.type_path.as_str()).collect();
        assert!(paths.contains(&"gaussian.Gaussian1d"));
        assert!(paths.contains(&"harmonic.Oscillator1d"));
        assert!(paths.contains(&"lattice.FluxRing"));

        let gaussian = models
            .iter()
            .find(|m| m.type_path == "gaussian.Gaussian1d")
            .unwrap();
        assert!(gaussian.keywords.iter().any(|k| k.starts_with("V0 (")));
    }
}
