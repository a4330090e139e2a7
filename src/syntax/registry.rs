use super::{SyntaxDefinition, SyntaxId};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone)]
pub struct SyntaxRegistry {
    syntaxes: HashMap<SyntaxId, Arc<dyn SyntaxDefinition>>,
}

impl SyntaxRegistry {
    pub fn new() -> Self {
        Self {
            syntaxes: HashMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(super::JavaScriptSyntax));
        registry.register(Arc::new(super::PythonSyntax));
        registry.register(Arc::new(super::RubySyntax));
        registry.register(Arc::new(super::PhpSyntax));
        registry.register(Arc::new(super::GoSyntax));
        registry.register(Arc::new(super::JavaSyntax));
        registry.register(Arc::new(super::KotlinSyntax));
        registry.register(Arc::new(super::DotNetSyntax));
        registry.register(Arc::new(super::CocoaSyntax));
        registry.register(Arc::new(super::DartSyntax));
        registry.register(Arc::new(super::RustSyntax));
        registry.register(Arc::new(super::ElixirSyntax));
        registry
    }

    pub fn register(&mut self, syntax: Arc<dyn SyntaxDefinition>) {
        self.syntaxes.insert(syntax.id(), syntax);
    }

    pub fn get(&self, id: SyntaxId) -> Option<&dyn SyntaxDefinition> {
        self.syntaxes.get(&id).map(|s| s.as_ref())
    }

    /// Registered syntaxes in declaration order of [`SyntaxId`]
    pub fn all(&self) -> Vec<&dyn SyntaxDefinition> {
        SyntaxId::all_variants()
            .iter()
            .filter_map(|id| self.get(*id))
            .collect()
    }

    pub fn detect_by_extension(&self, extension: &str) -> Option<SyntaxId> {
        let extension = extension.trim_start_matches('.').to_lowercase();
        self.all()
            .into_iter()
            .find(|syntax| syntax.extensions().iter().any(|e| *e == extension))
            .map(|syntax| syntax.id())
    }

    pub fn len(&self) -> usize {
        self.syntaxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.syntaxes.is_empty()
    }
}

impl Default for SyntaxRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_with_defaults_covers_every_id() {
        let registry = SyntaxRegistry::with_defaults();
        assert_eq!(registry.len(), SyntaxId::all_variants().len());
        for id in SyntaxId::all_variants() {
            let syntax = registry.get(*id).expect("registered");
            assert_eq!(syntax.id(), *id);
        }
    }

    #[test]
    fn test_detect_by_extension() {
        let registry = SyntaxRegistry::with_defaults();
        assert_eq!(registry.detect_by_extension("py"), Some(SyntaxId::Python));
        assert_eq!(registry.detect_by_extension(".TS"), Some(SyntaxId::JavaScript));
        assert_eq!(registry.detect_by_extension("exs"), Some(SyntaxId::Elixir));
        assert_eq!(registry.detect_by_extension("kts"), Some(SyntaxId::Kotlin));
        assert_eq!(registry.detect_by_extension("xml"), None);
    }

    #[test]
    fn test_empty_registry() {
        let registry = SyntaxRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get(SyntaxId::Go).is_none());
        assert!(registry.all().is_empty());
    }
}
