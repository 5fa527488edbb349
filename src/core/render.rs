//! Declaration file rendering.
//!
//! Output is fully determined by the [`OutputModel`]: keys come out in
//! `BTreeMap` order and formatting has no options besides `export`.

use std::{collections::BTreeMap, fmt::Write};

use crate::core::model::OutputModel;

const EMPTY_BODY: &str = "{ }";

/// A value that can appear in a rendered interface body.
trait BodyValue {
    fn render_value(&self, depth: usize) -> String;
}

impl BodyValue for String {
    fn render_value(&self, _depth: usize) -> String {
        self.clone()
    }
}

impl<V: BodyValue> BodyValue for BTreeMap<String, V> {
    fn render_value(&self, depth: usize) -> String {
        render_body(self, depth + 1)
    }
}

/// Render `map` as an interface body whose entries sit at `depth` tabs.
fn render_body<V: BodyValue>(map: &BTreeMap<String, V>, depth: usize) -> String {
    if map.is_empty() {
        return EMPTY_BODY.to_string();
    }

    let indent = "\t".repeat(depth);
    let mut out = String::from("{\n");
    for (key, value) in map {
        let _ = writeln!(out, "{}{}: {};", indent, quoted(key), value.render_value(depth));
    }
    out.push_str(&"\t".repeat(depth.saturating_sub(1)));
    out.push('}');
    out
}

/// `key` as a double-quoted string literal, escaped.
fn quoted(key: &str) -> String {
    serde_json::to_string(key).unwrap_or_else(|_| format!("\"{}\"", key))
}

/// Render the declaration file for `model`.
///
/// With `export`, every interface is exported and standalone type aliases of
/// the five maps are appended.
pub fn render(model: &OutputModel, export: bool) -> String {
    let prefix = if export { "export " } else { "" };
    let selectors = render_body(&model.selectors, 1);
    let ids = render_body(&model.ids, 1);
    let classes = render_body(&model.classes, 1);
    let modules = render_body(&model.modules, 1);
    let tags = render_body(&model.tags, 1);

    let mut out = String::new();
    for (name, body) in [
        ("SelectorMap", &selectors),
        ("IDMap", &ids),
        ("ClassMap", &classes),
        ("ModuleMap", &modules),
        ("TagMap", &tags),
    ] {
        let _ = write!(out, "{}interface {} {}\n\n", prefix, name, body);
    }

    let _ = write!(
        out,
        "{prefix}interface NodeSelector {{\n\
         \tquerySelector<T extends keyof SelectorMap>(selector: T): SelectorMap[T];\n\
         \tquerySelectorAll<T extends keyof SelectorMap>(selector: T): SelectorMap[T][];\n\
         }}\n\
         \n\
         {prefix}interface Document {{\n\
         \tgetElementById<T extends keyof IDMap>(elementId: T): IDMap[T];\n\
         \tgetElementsByClassName<T extends keyof ClassMap>(classNames: string): HTMLCollectionOf<ClassMap[T]>;\n\
         \tgetElementsByTagName<T extends keyof TagMap>(tagName: T): NodeListOf<TagMap[T]>;\n\
         }}\n"
    );

    if export {
        out.push_str("\nexport type ModuleIDs<T extends keyof ModuleMap> = ModuleMap[T];\n");
        for (name, body) in [
            ("SelectorMapType", &selectors),
            ("IDMapType", &ids),
            ("ClassMapType", &classes),
            ("ModuleMapType", &modules),
            ("TagMapType", &tags),
        ] {
            let _ = write!(out, "\nexport type {} = {}\n", name, body);
        }
    }

    out
}
