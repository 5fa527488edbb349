use crate::core::{
    error::ExtractError,
    extract::{Extract, ScopeMode, SourceFile, markup::ScopeRecorder},
    model::ModuleMap,
    parsers::html::parse_html,
};

/// Extracts typings from HTML markup. Never fails.
#[derive(Debug, Clone, Default)]
pub struct HtmlExtractor {
    scope_mode: ScopeMode,
}

impl HtmlExtractor {
    pub fn new(scope_mode: ScopeMode) -> Self {
        Self { scope_mode }
    }
}

impl Extract for HtmlExtractor {
    fn extract(&mut self, source: SourceFile<'_>) -> Result<ModuleMap, ExtractError> {
        let mut recorder = ScopeRecorder::new(self.scope_mode);
        parse_html(source.content, &mut recorder);
        Ok(recorder.finish())
    }
}
