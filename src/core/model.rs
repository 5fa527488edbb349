//! Intermediate (per file) and output (merged) typing models.
//!
//! Extractors produce one [`ModuleMap`] per file. The merge engine folds any
//! number of them into an [`OutputModel`], which the serializer renders.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key of a scope inside a [`ModuleMap`].
///
/// Everything outside a `dom-module` definition lives in the default scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScopeKey {
    Default,
    Named(String),
}

impl ScopeKey {
    pub fn named(name: impl Into<String>) -> Self {
        ScopeKey::Named(name.into())
    }

    pub fn is_default(&self) -> bool {
        matches!(self, ScopeKey::Default)
    }
}

/// Ids and classes collected for one scope of one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialScope {
    /// `#id` -> element type. Later assignments overwrite earlier ones.
    pub ids: BTreeMap<String, String>,
    /// One `(class, element type)` pair per occurrence, duplicates included.
    pub classes: Vec<(String, String)>,
}

/// Per-file intermediate model: scope key -> collected ids and classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMap {
    scopes: BTreeMap<ScopeKey, PartialScope>,
}

impl Default for ModuleMap {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleMap {
    /// Create a map holding only the (empty) default scope.
    pub fn new() -> Self {
        let mut scopes = BTreeMap::new();
        scopes.insert(ScopeKey::Default, PartialScope::default());
        Self { scopes }
    }

    pub fn scope(&self, key: &ScopeKey) -> Option<&PartialScope> {
        self.scopes.get(key)
    }

    pub fn default_scope(&self) -> Option<&PartialScope> {
        self.scopes.get(&ScopeKey::Default)
    }

    pub fn named_scope(&self, name: &str) -> Option<&PartialScope> {
        self.scopes.get(&ScopeKey::Named(name.to_string()))
    }

    /// Get a scope, creating it empty on first reference.
    pub fn scope_mut(&mut self, key: &ScopeKey) -> &mut PartialScope {
        self.scopes.entry(key.clone()).or_default()
    }

    /// Replace a scope with a fresh empty one.
    pub fn reset_scope(&mut self, key: &ScopeKey) {
        self.scopes.insert(key.clone(), PartialScope::default());
    }

    /// Record `#id` with its element type, overwriting an earlier occurrence.
    pub fn record_id(&mut self, key: &ScopeKey, id: &str, element_type: impl Into<String>) {
        self.scope_mut(key)
            .ids
            .insert(format!("#{}", id), element_type.into());
    }

    /// Record every whitespace separated class in `class_attr` for one element.
    pub fn record_classes(&mut self, key: &ScopeKey, class_attr: &str, element_type: &str) {
        let scope = self.scope_mut(key);
        for class_name in class_attr.split_whitespace() {
            scope
                .classes
                .push((class_name.to_string(), element_type.to_string()));
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ScopeKey, &PartialScope)> {
        self.scopes.iter()
    }

    /// Number of scopes, the default scope included.
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes
            .values()
            .all(|scope| scope.ids.is_empty() && scope.classes.is_empty())
    }
}

/// Merged typings, ready for serialization.
///
/// All maps are `BTreeMap`s so keys always come out sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputModel {
    /// `#id`, `.class` and module name -> type expression.
    pub selectors: BTreeMap<String, String>,
    /// Module name -> (id -> element type).
    pub modules: BTreeMap<String, BTreeMap<String, String>>,
    /// id -> element type.
    pub ids: BTreeMap<String, String>,
    /// class -> union of element types.
    pub classes: BTreeMap<String, String>,
    /// Module name -> element type of the module's own tag.
    pub tags: BTreeMap<String, String>,
}

impl OutputModel {
    /// Render the model as declaration file text.
    pub fn to_declarations(&self, export: bool) -> String {
        crate::core::render::render(self, export)
    }
}
