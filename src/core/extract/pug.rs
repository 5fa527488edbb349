//! Pug/Jade extraction.
//!
//! Includes are inlined first, then mixin definitions are collected from the
//! whole tree and calls are expanded while walking, so a mixin can be used
//! before (or in another file than) its definition.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::core::{
    error::ExtractError,
    extract::{Extract, ScopeMode, SourceFile, markup::ScopeRecorder},
    model::ModuleMap,
    parsers::{
        html::{Attributes, TagHandler},
        pug::{Attribute, AttributeValue, Block, Node, parse_pug},
    },
    source::SourceReader,
};

const PUG_EXTENSION: &str = "pug";
const JADE_EXTENSION: &str = "jade";

pub struct PugExtractor {
    scope_mode: ScopeMode,
    reader: Arc<dyn SourceReader>,
    /// Resolved include path -> fully inlined template.
    includes: HashMap<PathBuf, Block>,
}

impl PugExtractor {
    pub fn new(scope_mode: ScopeMode, reader: Arc<dyn SourceReader>) -> Self {
        Self {
            scope_mode,
            reader,
            includes: HashMap::new(),
        }
    }

    /// Number of distinct include files parsed so far.
    pub fn cached_includes(&self) -> usize {
        self.includes.len()
    }

    /// Replace every `include` in `block` with the included template.
    ///
    /// `active` holds the files currently being inlined, to catch cycles.
    fn inline_includes(
        &mut self,
        block: &mut Block,
        base: Option<&Path>,
        active: &mut Vec<PathBuf>,
    ) -> Result<(), ExtractError> {
        for node in block.nodes.iter_mut() {
            if let Node::Include { path, line } = node {
                let included = self.load_include(path, *line, base, active)?;
                *node = Node::Block(included);
                continue;
            }
            for child in node.blocks_mut() {
                self.inline_includes(child, base, active)?;
            }
        }
        Ok(())
    }

    fn load_include(
        &mut self,
        include: &str,
        line: usize,
        base: Option<&Path>,
        active: &mut Vec<PathBuf>,
    ) -> Result<Block, ExtractError> {
        let base = base.ok_or_else(|| ExtractError::MissingBasePath {
            include: include.to_string(),
            line,
        })?;
        let target = resolve_include_path(base, include);

        if !is_pug_file(&target) {
            // Raw includes (css, html, markdown, ...) carry no tags.
            return Ok(Block::default());
        }
        if active.contains(&target) {
            return Err(ExtractError::IncludeCycle { path: target });
        }
        if let Some(cached) = self.includes.get(&target) {
            return Ok(cached.clone());
        }

        let content =
            self.reader
                .read_to_string(&target)
                .map_err(|source| ExtractError::Io {
                    path: target.clone(),
                    source,
                })?;
        let mut parsed = parse_pug(&content).map_err(|e| ExtractError::Parse {
            path: target.display().to_string(),
            message: e.to_string(),
        })?;

        active.push(target.clone());
        let inlined = self.inline_includes(&mut parsed, Some(&target), active);
        active.pop();
        inlined?;

        self.includes.insert(target, parsed.clone());
        Ok(parsed)
    }
}

impl Extract for PugExtractor {
    fn extract(&mut self, source: SourceFile<'_>) -> Result<ModuleMap, ExtractError> {
        let mut block = parse_pug(source.content).map_err(|e| ExtractError::Parse {
            path: source.display_path(),
            message: e.to_string(),
        })?;

        let mut active: Vec<PathBuf> = source.path.map(Path::to_path_buf).into_iter().collect();
        self.inline_includes(&mut block, source.path, &mut active)?;

        let mut mixins = HashMap::new();
        collect_mixins(&mut block, &mut mixins);

        let mut walker = Walker {
            recorder: ScopeRecorder::new(self.scope_mode),
            mixins: &mixins,
            expanding: Vec::new(),
        };
        walker.walk_block(&block);
        Ok(walker.recorder.finish())
    }
}

fn resolve_include_path(base: &Path, include: &str) -> PathBuf {
    let include = Path::new(include);
    let mut target = if include.is_absolute() {
        include.to_path_buf()
    } else {
        base.parent()
            .map(|dir| dir.join(include))
            .unwrap_or_else(|| include.to_path_buf())
    };
    if target.extension().is_none() {
        target.set_extension(PUG_EXTENSION);
    }
    target
}

fn is_pug_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(PUG_EXTENSION | JADE_EXTENSION)
    )
}

/// Move every mixin definition out of the tree. A later definition of the
/// same name replaces an earlier one.
fn collect_mixins(block: &mut Block, mixins: &mut HashMap<String, Block>) {
    for node in block.nodes.iter_mut() {
        if let Node::MixinDefinition { name, block: body } = node {
            let name = std::mem::take(name);
            let mut body = std::mem::take(body);
            *node = Node::Block(Block::default());
            collect_mixins(&mut body, mixins);
            mixins.insert(name, body);
            continue;
        }
        for child in node.blocks_mut() {
            collect_mixins(child, mixins);
        }
    }
}

struct Walker<'m> {
    recorder: ScopeRecorder,
    mixins: &'m HashMap<String, Block>,
    /// Mixins being expanded right now; a mixin never expands inside itself.
    expanding: Vec<&'m str>,
}

impl<'m> Walker<'m> {
    fn walk_block(&mut self, block: &Block) {
        for node in &block.nodes {
            self.walk_node(node);
        }
    }

    fn walk_node(&mut self, node: &Node) {
        match node {
            Node::Tag(tag) => {
                let attributes = tag_attributes(&tag.attributes);
                self.recorder.on_open_tag(&tag.name, &attributes);
                self.walk_block(&tag.block);
                self.recorder.on_close_tag(&tag.name);
            }
            Node::MixinCall { name, block, .. } => {
                let mixins = self.mixins;
                match mixins.get_key_value(name.as_str()) {
                    Some((name, body)) => {
                        if self.expanding.contains(&name.as_str()) {
                            return;
                        }
                        self.expanding.push(name.as_str());
                        self.walk_block(body);
                        self.expanding.pop();
                    }
                    None => self.walk_block(block),
                }
            }
            other => {
                for block in other.blocks() {
                    self.walk_block(block);
                }
            }
        }
    }
}

/// Literal attributes as a name -> value map; classes from shorthands and
/// `class=` attributes are joined with spaces.
fn tag_attributes(attributes: &[Attribute]) -> Attributes {
    let mut map = Attributes::new();
    let mut classes: Vec<&str> = Vec::new();

    for attribute in attributes {
        let AttributeValue::Literal(value) = &attribute.value else {
            continue;
        };
        if attribute.name == "class" {
            classes.push(value);
        } else {
            map.insert(attribute.name.clone(), value.clone());
        }
    }

    if !classes.is_empty() {
        map.insert("class".to_string(), classes.join(" "));
    }
    map
}
