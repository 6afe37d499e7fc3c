//! Named transforms for configuration-driven columns.
//!
//! A view file cannot hold closures, so its columns name a transform
//! (`render = "age"`) and the registry turns that name, plus any arguments,
//! into a [`CellRenderer`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::builtin::{self, BuiltinOptions};
use crate::column::RenderRef;
use crate::renderer::CellRenderer;

/// Builds a renderer from the arguments given in the view file.
pub type RendererFactory = Arc<dyn Fn(&[String]) -> CellRenderer + Send + Sync>;

#[derive(Clone, Default)]
pub struct RendererRegistry {
    factories: BTreeMap<String, RendererFactory>,
}

impl RendererRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the dashboard built-ins.
    pub fn builtin() -> Self {
        Self::builtin_with(BuiltinOptions::default())
    }

    pub fn builtin_with(options: BuiltinOptions) -> Self {
        let mut registry = Self::new();
        builtin::register_all(&mut registry, options);
        registry
    }

    /// Register a factory under `name`, replacing any previous one.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&[String]) -> CellRenderer + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
    }

    /// Register a renderer that takes no arguments under its own name.
    pub fn register_renderer(&mut self, renderer: CellRenderer) {
        let name = renderer.name().to_string();
        self.register(name, move |_| renderer.clone());
    }

    pub fn build(&self, reference: &RenderRef) -> Option<CellRenderer> {
        self.factories
            .get(reference.name().trim())
            .map(|factory| factory(reference.args()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}

impl fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
