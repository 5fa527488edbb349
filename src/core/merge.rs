//! Merge per-file module maps into output models.
//!
//! Three topologies:
//! - [`merge_flat`]: every file into one model;
//! - [`merge_modules`]: one model per input file;
//! - [`merge_file`]: one model from a single file's map.
//!
//! Duplicate ids resolve to the last write (files are visited in path order);
//! class types are unioned.

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

use crate::core::{
    model::{ModuleMap, OutputModel, ScopeKey},
    tag_type::resolve_tag_type,
};

/// Per-file extraction results keyed by path, in path order.
pub type FileTypings = BTreeMap<String, Arc<ModuleMap>>;

#[derive(Debug, Default)]
struct TypingsCollector {
    model: OutputModel,
    class_types: BTreeMap<String, BTreeSet<String>>,
}

impl TypingsCollector {
    fn add(&mut self, map: &ModuleMap) {
        for (key, scope) in map.iter() {
            match key {
                ScopeKey::Default => {
                    for (selector, element_type) in &scope.ids {
                        self.model
                            .ids
                            .insert(strip_selector(selector).to_string(), element_type.clone());
                        self.model
                            .selectors
                            .insert(selector.clone(), element_type.clone());
                    }
                }
                ScopeKey::Named(name) => {
                    let ids = scope
                        .ids
                        .iter()
                        .map(|(selector, ty)| (strip_selector(selector).to_string(), ty.clone()))
                        .collect();
                    self.model.modules.insert(name.clone(), ids);

                    let tag = resolve_tag_type(Some(name), &[]);
                    self.model.selectors.insert(name.clone(), tag.clone());
                    self.model.tags.insert(name.clone(), tag);
                }
            }

            for (class_name, element_type) in &scope.classes {
                self.class_types
                    .entry(class_name.clone())
                    .or_default()
                    .insert(element_type.clone());
            }
        }
    }

    fn finish(mut self) -> OutputModel {
        for (class_name, types) in self.class_types {
            let union = types.into_iter().collect::<Vec<_>>().join("|");
            self.model
                .selectors
                .insert(format!(".{}", class_name), union.clone());
            self.model.classes.insert(class_name, union);
        }
        self.model
    }
}

fn strip_selector(selector: &str) -> &str {
    selector.strip_prefix('#').unwrap_or(selector)
}

/// Combine every file into one model.
pub fn merge_flat(files: &FileTypings) -> OutputModel {
    let mut collector = TypingsCollector::default();
    for map in files.values() {
        collector.add(map);
    }
    collector.finish()
}

/// One model per file, keyed like the input.
pub fn merge_modules(files: &FileTypings) -> BTreeMap<String, OutputModel> {
    files
        .iter()
        .map(|(path, map)| (path.clone(), merge_file(map)))
        .collect()
}

/// The model of a single file's map.
pub fn merge_file(map: &ModuleMap) -> OutputModel {
    let mut collector = TypingsCollector::default();
    collector.add(map);
    collector.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::render;
    use pretty_assertions::assert_eq;

    fn file(build: impl FnOnce(&mut ModuleMap)) -> Arc<ModuleMap> {
        let mut map = ModuleMap::new();
        build(&mut map);
        Arc::new(map)
    }

    fn sample() -> FileTypings {
        let mut files = FileTypings::new();
        files.insert(
            "a.html".to_string(),
            file(|m| {
                m.record_id(&ScopeKey::Default, "x", "HTMLDivElement");
                m.record_classes(&ScopeKey::Default, "fancy", "HTMLDivElement");
            }),
        );
        files.insert(
            "b.html".to_string(),
            file(|m| {
                m.record_id(&ScopeKey::Default, "x", "HTMLSpanElement");
                m.record_classes(&ScopeKey::Default, "fancy plain", "HTMLSpanElement");
                m.record_classes(&ScopeKey::Default, "fancy", "HTMLDivElement");
                let module = ScopeKey::named("my-el");
                m.record_id(&module, "header", "HTMLHeadingElement");
                m.record_classes(&module, "fancy", "HTMLHeadingElement");
            }),
        );
        files
    }

    #[test]
    fn test_merge_flat() {
        let model = merge_flat(&sample());

        assert_eq!(model.ids["x"], "HTMLSpanElement");
        assert_eq!(
            model.classes["fancy"],
            "HTMLDivElement|HTMLHeadingElement|HTMLSpanElement"
        );
        assert_eq!(model.classes["plain"], "HTMLSpanElement");
        assert_eq!(model.modules["my-el"]["header"], "HTMLHeadingElement");
        assert_eq!(model.tags["my-el"], "MyElElement");
        assert_eq!(
            model.selectors.keys().collect::<Vec<_>>(),
            vec!["#x", ".fancy", ".plain", "my-el"]
        );
    }

    #[test]
    fn test_named_scope_ids_stay_in_module() {
        let model = merge_flat(&sample());
        assert!(!model.ids.contains_key("header"));
        assert!(!model.selectors.contains_key("#header"));
    }

    #[test]
    fn test_merge_modules_is_per_file() {
        let models = merge_modules(&sample());
        assert_eq!(models.len(), 2);
        assert_eq!(models["a.html"].ids["x"], "HTMLDivElement");
        assert_eq!(models["a.html"].classes["fancy"], "HTMLDivElement");
        assert!(models["a.html"].modules.is_empty());
        assert_eq!(models["b.html"].ids["x"], "HTMLSpanElement");
        assert_eq!(models["b.html"], merge_file(&sample()["b.html"]));
    }

    #[test]
    fn test_empty_module_still_gets_tag() {
        let mut files = FileTypings::new();
        files.insert(
            "c.html".to_string(),
            file(|m| {
                m.scope_mut(&ScopeKey::named("x-empty"));
            }),
        );
        let model = merge_flat(&files);
        assert!(model.modules["x-empty"].is_empty());
        assert_eq!(model.tags["x-empty"], "XEmptyElement");
    }

    #[test]
    fn test_deterministic_output() {
        let first = render(&merge_flat(&sample()), false);
        let second = render(&merge_flat(&sample()), false);
        assert_eq!(first, second);
    }

    /// `sample()` built in reverse: files inserted last to first and every
    /// file's records made in a different order.
    fn sample_reordered() -> FileTypings {
        let mut files = FileTypings::new();
        files.insert(
            "b.html".to_string(),
            file(|m| {
                let module = ScopeKey::named("my-el");
                m.record_classes(&module, "fancy", "HTMLHeadingElement");
                m.record_id(&module, "header", "HTMLHeadingElement");
                m.record_classes(&ScopeKey::Default, "fancy", "HTMLDivElement");
                m.record_classes(&ScopeKey::Default, "plain fancy", "HTMLSpanElement");
                m.record_id(&ScopeKey::Default, "x", "HTMLSpanElement");
            }),
        );
        files.insert(
            "a.html".to_string(),
            file(|m| {
                m.record_classes(&ScopeKey::Default, "fancy", "HTMLDivElement");
                m.record_id(&ScopeKey::Default, "x", "HTMLDivElement");
            }),
        );
        files
    }

    #[test]
    fn test_per_file_output_ignores_record_order() {
        let rendered = |files: &FileTypings| {
            merge_modules(files)
                .iter()
                .map(|(path, model)| (path.clone(), render(model, true)))
                .collect::<Vec<_>>()
        };
        assert_eq!(rendered(&sample()), rendered(&sample_reordered()));

        let original = sample();
        let reordered = sample_reordered();
        assert_eq!(
            render(&merge_file(&original["b.html"]), false),
            render(&merge_file(&reordered["b.html"]), false)
        );
        assert_eq!(
            render(&merge_flat(&original), false),
            render(&merge_flat(&reordered), false)
        );
    }
}
