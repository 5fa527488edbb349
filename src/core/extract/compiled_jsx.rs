//! Extraction from JSX compiled to factory calls, e.g.
//! `React.createElement("div", { id: "x" }, ...)`.

use colored::Colorize;
use swc_ecma_ast::{CallExpr, Callee, Expr, ExprOrSpread, Lit, MemberProp, ObjectLit};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::{
    error::ExtractError,
    extract::{
        Extract, SourceFile,
        jsx::{ElementAttributes, record_element},
        markup::DOM_MODULE_TAG,
    },
    model::{ModuleMap, ScopeKey},
    parsers::jsx::{FatalError, parse_compiled_source},
};

#[derive(Debug, Clone)]
pub struct CompiledJsxExtractor {
    factory: String,
}

impl CompiledJsxExtractor {
    pub fn new(factory: impl Into<String>) -> Self {
        Self {
            factory: factory.into(),
        }
    }
}

impl Extract for CompiledJsxExtractor {
    fn extract(&mut self, source: SourceFile<'_>) -> Result<ModuleMap, ExtractError> {
        let path = source.display_path();
        let result = parse_compiled_source(source.content.to_string(), &path);
        if let Some(fatal) = &result.fatal {
            eprintln!("{} {}", "warning:".bold().yellow(), recovery_warning(&path, fatal));
        }
        let Some(parsed) = result.parsed else {
            return Ok(ModuleMap::new());
        };

        let mut visitor = FactoryCallVisitor {
            factory: &self.factory,
            map: ModuleMap::new(),
            modules: Vec::new(),
        };
        parsed.module.visit_with(&mut visitor);
        Ok(visitor.map)
    }
}

/// Names the file and where parsing gave up.
fn recovery_warning(path: &str, fatal: &FatalError) -> String {
    format!(
        "{}: parsing stopped at {}; only calls before it were read",
        path, fatal
    )
}

struct FactoryCallVisitor<'a> {
    factory: &'a str,
    map: ModuleMap,
    /// Enclosing `dom-module` calls, innermost last.
    modules: Vec<ScopeKey>,
}

impl FactoryCallVisitor<'_> {
    /// Tag or component name when `call` is a factory call.
    fn element_tag(&self, call: &CallExpr) -> Option<String> {
        let Callee::Expr(callee) = &call.callee else {
            return None;
        };
        if dotted_name(callee)? != self.factory {
            return None;
        }

        let first = call.args.first().filter(|arg| arg.spread.is_none())?;
        match &*first.expr {
            Expr::Lit(Lit::Str(s)) => s.value.as_str().map(|s| s.to_string()),
            Expr::Ident(ident) if ident.sym.starts_with(|c: char| c.is_ascii_uppercase()) => {
                Some(ident.sym.to_string())
            }
            _ => None,
        }
    }
}

impl Visit for FactoryCallVisitor<'_> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        let Some(tag) = self.element_tag(node) else {
            node.visit_children_with(self);
            return;
        };

        let attributes = node
            .args
            .get(1)
            .map(read_attributes)
            .unwrap_or_default();

        let opens_module = tag == DOM_MODULE_TAG && attributes.id.is_some();
        if let Some(id) = attributes.id.as_ref().filter(|_| opens_module) {
            self.modules.push(ScopeKey::named(id.clone()));
        }

        let scope = self.modules.last().cloned().unwrap_or(ScopeKey::Default);
        self.map.scope_mut(&scope);
        record_element(&mut self.map, &scope, &tag, &[], &attributes);

        node.visit_children_with(self);

        if opens_module {
            self.modules.pop();
        }
    }
}

/// `a.b.c` for identifier/member chains; `None` once anything is computed.
fn dotted_name(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        Expr::Member(member) => {
            let MemberProp::Ident(prop) = &member.prop else {
                return None;
            };
            Some(format!("{}.{}", dotted_name(&member.obj)?, prop.sym))
        }
        _ => None,
    }
}

/// Read attributes from every object literal in the props argument, so
/// wrappers like `Object.assign({}, { id: "x" })` still count.
fn read_attributes(arg: &ExprOrSpread) -> ElementAttributes {
    let mut collector = ObjectCollector::default();
    arg.expr.visit_with(&mut collector);
    collector.attributes
}

#[derive(Default)]
struct ObjectCollector {
    attributes: ElementAttributes,
}

impl Visit for ObjectCollector {
    fn visit_object_lit(&mut self, node: &ObjectLit) {
        self.attributes.read_object(node);
        node.visit_children_with(self);
    }
}
