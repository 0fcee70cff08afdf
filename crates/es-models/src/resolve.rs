//! Model descriptor parsing and resolution.

use tracing::debug;

use crate::error::{ResolutionError, ResolutionResult};
use crate::kwargs::Kwargs;
use crate::model::EigenModel;
use crate::registry::ModelRegistry;

/// A parsed `namespace.Class:kw=v,...` descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDescriptor {
    /// The part before the first `:`, as written.
    pub type_path: String,
    pub namespace: String,
    pub class_name: String,
    pub kwargs: Kwargs,
}

impl ModelDescriptor {
    pub fn parse(spec: &str) -> ResolutionResult<Self> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Err(ResolutionError::Empty);
        }

        let (type_path, block) = match spec.split_once(':') {
            Some((path, block)) => (path.trim(), Some(block)),
            None => (spec, None),
        };
        let kwargs = match block {
            Some(block) => Kwargs::parse(block, spec)?,
            None => Kwargs::new(),
        };

        // A path without '.' has no class name and can never be found.
        let (namespace, class_name) = type_path.split_once('.').unwrap_or((type_path, ""));

        Ok(Self {
            type_path: type_path.to_string(),
            namespace: namespace.trim().to_string(),
            class_name: class_name.trim().to_string(),
            kwargs,
        })
    }
}

/// Resolve `spec` against `registry` and construct the model.
///
/// Keywords are parsed completely before any constructor runs.
pub fn resolve(spec: &str, registry: &ModelRegistry) -> ResolutionResult<Box<dyn EigenModel>> {
    let descriptor = ModelDescriptor::parse(spec)?;
    let entry = registry
        .lookup(&descriptor.namespace, &descriptor.class_name)
        .ok_or_else(|| ResolutionError::NotFound {
            path: descriptor.type_path.clone(),
        })?;

    debug!(
        model = %descriptor.type_path,
        keywords = descriptor.kwargs.len(),
        "constructing model"
    );
    let model = (entry.factory)(descriptor.kwargs).map_err(|source| ResolutionError::Construction {
        path: descriptor.type_path.clone(),
        source,
    })?;
    debug!(model = model.name(), dimension = model.dimension(), "model ready");
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kwargs::KwValue;

    #[test]
    fn parse_descriptor() {
        let d = ModelDescriptor::parse("ns.Cls:N=32,V0=-4.0,flag=true").unwrap();
        assert_eq!(d.type_path, "ns.Cls");
        assert_eq!(d.namespace, "ns");
        assert_eq!(d.class_name, "Cls");
        assert_eq!(d.kwargs.get("N"), Some(&KwValue::Integer(32)));
        assert_eq!(d.kwargs.get("V0"), Some(&KwValue::Real(-4.0)));
        assert_eq!(d.kwargs.get("flag"), Some(&KwValue::Boolean(true)));
    }

    #[test]
    fn parse_without_keywords() {
        let d = ModelDescriptor::parse(" gaussian.Gaussian1d ").unwrap();
        assert_eq!(d.type_path, "gaussian.Gaussian1d");
        assert!(d.kwargs.is_empty());
    }

    #[test]
    fn only_first_colon_and_dot_split() {
        let d = ModelDescriptor::parse("a.b.c:label=x:y").unwrap();
        assert_eq!(d.namespace, "a");
        assert_eq!(d.class_name, "b.c");
        assert_eq!(d.kwargs.get("label"), Some(&KwValue::String("x:y".into())));
    }

    #[test]
    fn empty_descriptor() {
        assert_eq!(ModelDescriptor::parse("  ").unwrap_err(), ResolutionError::Empty);
    }

    #[test]
    fn resolved_models_are_debuggable() {
        let model = resolve("harmonic.Oscillator1d:N=8", &ModelRegistry::builtin()).unwrap();
        let shown = format!("{model:?}");
        assert!(shown.contains("Oscillator1d"), "{shown}");
        assert!(shown.contains("grid_points: 8"), "{shown}");
    }
}
