//! Tag event recorder shared by the HTML and Pug extractors.

use crate::core::{
    extract::ScopeMode,
    model::{ModuleMap, ScopeKey},
    parsers::html::{Attributes, TagHandler},
    tag_type::{TEMPLATE_TAG, resolve_tag_type},
};

/// Tag opening a named scope.
pub const DOM_MODULE_TAG: &str = "dom-module";

/// Attribute overriding the resolved element type.
pub const ELEMENT_TYPE_ATTR: &str = "data-element-type";

/// Records ids and classes from tag events into a [`ModuleMap`].
///
/// In [`ScopeMode::Single`] a `dom-module` replaces the current scope and its
/// close resets to the default scope, so a definition nested in another one
/// sends the rest of the outer definition to the default scope. In
/// [`ScopeMode::Nested`] the outer scope is restored instead.
pub struct ScopeRecorder {
    map: ModuleMap,
    mode: ScopeMode,
    current: ScopeKey,
    /// Scopes to restore when the open `dom-module`s close (nested mode only).
    outer: Vec<ScopeKey>,
}

impl ScopeRecorder {
    pub fn new(mode: ScopeMode) -> Self {
        Self {
            map: ModuleMap::new(),
            mode,
            current: ScopeKey::Default,
            outer: Vec::new(),
        }
    }

    pub fn finish(self) -> ModuleMap {
        self.map
    }

    fn open_module(&mut self, attributes: &Attributes) {
        let next = match non_empty(attributes, "id") {
            Some(id) => {
                let key = ScopeKey::named(id);
                self.map.reset_scope(&key);
                key
            }
            // Without an id there is nothing to scope to.
            None => self.current.clone(),
        };
        let previous = std::mem::replace(&mut self.current, next);
        if self.mode == ScopeMode::Nested {
            self.outer.push(previous);
        }
    }

    fn close_module(&mut self) {
        self.current = match self.mode {
            ScopeMode::Single => ScopeKey::Default,
            ScopeMode::Nested => self.outer.pop().unwrap_or(ScopeKey::Default),
        };
    }
}

impl TagHandler for ScopeRecorder {
    fn on_open_tag(&mut self, name: &str, attributes: &Attributes) {
        if name == DOM_MODULE_TAG {
            self.open_module(attributes);
            return;
        }

        let element_type = non_empty(attributes, ELEMENT_TYPE_ATTR);

        if let Some(id) = non_empty(attributes, "id") {
            let id_type = match element_type {
                Some(ty) => ty.to_string(),
                None if name == TEMPLATE_TAG => {
                    resolve_tag_type(non_empty(attributes, "is"), &[])
                }
                None => resolve_tag_type(Some(name), &[]),
            };
            self.map.record_id(&self.current, id, id_type);
        }

        if let Some(class_attr) = non_empty(attributes, "class") {
            let class_type = element_type
                .map(str::to_string)
                .unwrap_or_else(|| resolve_tag_type(Some(name), &[]));
            self.map
                .record_classes(&self.current, class_attr, &class_type);
        }
    }

    fn on_close_tag(&mut self, name: &str) {
        if name == DOM_MODULE_TAG {
            self.close_module();
        }
    }
}

fn non_empty<'a>(attributes: &'a Attributes, name: &str) -> Option<&'a str> {
    attributes
        .get(name)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}
