//! JSX/TSX extraction.
//!
//! Walks the swc AST; `dom-module` elements scope their subtree exactly, so
//! nested definitions need no special handling.

use swc_common::Spanned;
use swc_ecma_ast::{
    Expr, JSXAttrName, JSXAttrOrSpread, JSXAttrValue, JSXElement, JSXElementName, Lit, ObjectLit,
    Prop, PropName, PropOrSpread,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::{
    error::ExtractError,
    extract::{
        Extract, SourceFile,
        markup::{DOM_MODULE_TAG, ELEMENT_TYPE_ATTR},
    },
    model::{ModuleMap, ScopeKey},
    parsers::jsx::{ParsedModule, parse_jsx_source},
    tag_type::{TEMPLATE_TAG, resolve_tag_type},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct JsxExtractor;

impl JsxExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extract for JsxExtractor {
    fn extract(&mut self, source: SourceFile<'_>) -> Result<ModuleMap, ExtractError> {
        let parsed = parse_jsx_source(source.content.to_string(), &source.display_path())?;

        let mut visitor = JsxVisitor {
            parsed: &parsed,
            map: ModuleMap::new(),
            scope: ScopeKey::Default,
        };
        parsed.module.visit_with(&mut visitor);
        Ok(visitor.map)
    }
}

struct JsxVisitor<'a> {
    parsed: &'a ParsedModule,
    map: ModuleMap,
    scope: ScopeKey,
}

impl JsxVisitor<'_> {
    fn element_name(&self, name: &JSXElementName) -> String {
        match name {
            JSXElementName::Ident(ident) => ident.sym.to_string(),
            JSXElementName::JSXNamespacedName(ns) => format!("{}:{}", ns.ns.sym, ns.name.sym),
            member => self.parsed.snippet(member.span()).unwrap_or_default(),
        }
    }
}

impl Visit for JsxVisitor<'_> {
    fn visit_jsx_element(&mut self, node: &JSXElement) {
        let opening = &node.opening;
        let name = self.element_name(&opening.name);
        let attributes = ElementAttributes::from_jsx(&opening.attrs);

        if name == DOM_MODULE_TAG
            && let Some(id) = &attributes.id
        {
            let key = ScopeKey::named(id.clone());
            self.map.scope_mut(&key);
            let outer = std::mem::replace(&mut self.scope, key);
            node.visit_children_with(self);
            self.scope = outer;
            return;
        }

        let type_args: Vec<String> = opening
            .type_args
            .as_ref()
            .map(|args| {
                args.params
                    .iter()
                    .filter_map(|param| self.parsed.snippet(param.span()))
                    .collect()
            })
            .unwrap_or_default();

        record_element(&mut self.map, &self.scope, &name, &type_args, &attributes);
        node.visit_children_with(self);
    }
}

/// The attributes extraction cares about, from JSX or an object literal.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ElementAttributes {
    pub id: Option<String>,
    /// Raw class attribute values, each still whitespace separated.
    pub classes: Vec<String>,
    pub element_type: Option<String>,
}

impl ElementAttributes {
    pub fn set(&mut self, name: &str, value: &str) {
        if value.is_empty() {
            return;
        }
        match name {
            "id" => self.id = Some(value.to_string()),
            "class" | "className" => self.classes.push(value.to_string()),
            ELEMENT_TYPE_ATTR => self.element_type = Some(value.to_string()),
            _ => {}
        }
    }

    /// Read the string valued `key: value` properties of an object literal.
    pub fn read_object(&mut self, object: &ObjectLit) {
        for prop in &object.props {
            if let PropOrSpread::Prop(prop) = prop
                && let Prop::KeyValue(kv) = &**prop
                && let Some(key) = prop_name(&kv.key)
                && let Expr::Lit(Lit::Str(s)) = &*kv.value
                && let Some(value) = s.value.as_str()
            {
                self.set(&key, value);
            }
        }
    }

    fn from_jsx(attrs: &[JSXAttrOrSpread]) -> Self {
        let mut attributes = Self::default();
        for attr in attrs {
            match attr {
                JSXAttrOrSpread::JSXAttr(attr) => {
                    let name = match &attr.name {
                        JSXAttrName::Ident(ident) => ident.sym.to_string(),
                        JSXAttrName::JSXNamespacedName(ns) => {
                            format!("{}:{}", ns.ns.sym, ns.name.sym)
                        }
                    };
                    if let Some(JSXAttrValue::Str(s)) = &attr.value
                        && let Some(value) = s.value.as_str()
                    {
                        attributes.set(&name, value);
                    }
                }
                JSXAttrOrSpread::SpreadElement(spread) => {
                    if let Expr::Object(object) = &*spread.expr {
                        attributes.read_object(object);
                    }
                }
            }
        }
        attributes
    }
}

fn prop_name(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(s) => s.value.as_str().map(|s| s.to_string()),
        _ => None,
    }
}

/// Record one element's id and classes under `scope`.
///
/// Templates type their id from the id itself; `dom-module` never records an
/// id of its own.
pub(crate) fn record_element(
    map: &mut ModuleMap,
    scope: &ScopeKey,
    tag: &str,
    type_args: &[String],
    attributes: &ElementAttributes,
) {
    let element_type = attributes
        .element_type
        .clone()
        .unwrap_or_else(|| resolve_tag_type(Some(tag), type_args));

    if let Some(id) = &attributes.id {
        if tag == TEMPLATE_TAG {
            let id_type = attributes
                .element_type
                .clone()
                .unwrap_or_else(|| resolve_tag_type(Some(id), &[]));
            map.record_id(scope, id, id_type);
        } else if tag != DOM_MODULE_TAG {
            map.record_id(scope, id, element_type.clone());
        }
    }

    for class_attr in &attributes.classes {
        map.record_classes(scope, class_attr, &element_type);
    }
}
