use std::{fmt, sync::Arc};

use swc_common::{
    FileName, GLOBALS, Globals, SourceMap, SourceMapper, Span, Spanned,
    comments::SingleThreadedComments,
};
use swc_ecma_ast::Module;
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax, error::Error};

use crate::core::error::ExtractError;

/// Reparses attempted after a fatal error in compiled output.
const MAX_RECOVERY_ATTEMPTS: usize = 64;

pub struct ParsedModule {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
}

impl ParsedModule {
    /// Source text covered by `span`, if it maps back into the file.
    pub fn snippet(&self, span: Span) -> Option<String> {
        self.source_map.span_to_snippet(span).ok()
    }
}

/// A syntax error the parser could not get past.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FatalError {
    pub line: usize,
    /// Byte offset into the parsed code.
    pub offset: usize,
    pub message: String,
}

impl fmt::Display for FatalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Outcome of parsing compiled output.
pub struct TolerantParse {
    /// Everything that parsed, possibly cut short before `fatal`.
    pub parsed: Option<ParsedModule>,
    pub fatal: Option<FatalError>,
}

/// Parse JSX/TSX source into an AST.
///
/// Both `.jsx` and `.tsx` go through the TSX grammar. Any parse error is fatal.
pub fn parse_jsx_source(code: String, file_path: &str) -> Result<ParsedModule, ExtractError> {
    let syntax = Syntax::Typescript(TsSyntax {
        tsx: true,
        ..Default::default()
    });

    parse_with(syntax, code, file_path, false).map_err(|fatal| ExtractError::Parse {
        path: file_path.to_string(),
        message: fatal.to_string(),
    })
}

/// Parse plain JavaScript, ignoring every error the parser can recover from.
///
/// After a fatal error the code is cut back to the last statement boundary
/// before it and parsed again, so the statements ahead of the error survive.
pub fn parse_compiled_source(code: String, file_path: &str) -> TolerantParse {
    let syntax = Syntax::Es(EsSyntax::default());
    let mut code = code;
    let mut fatal: Option<FatalError> = None;

    for _ in 0..MAX_RECOVERY_ATTEMPTS {
        let error = match parse_with(syntax, code.clone(), file_path, true) {
            Ok(parsed) => {
                return TolerantParse {
                    parsed: Some(parsed),
                    fatal,
                };
            }
            Err(error) => error,
        };
        let boundary = statement_boundary(&code, error.offset);
        fatal.get_or_insert(error);
        match boundary {
            Some(end) => code.truncate(end),
            None => break,
        }
    }

    TolerantParse {
        parsed: None,
        fatal,
    }
}

/// End of the last `;` or line terminated statement that starts before
/// `offset`. Always shorter than `code`.
fn statement_boundary(code: &str, offset: usize) -> Option<usize> {
    let end = offset.min(code.len().saturating_sub(1));
    code.get(..end)?.rfind([';', '\n']).map(|index| index + 1)
}

fn parse_with(
    syntax: Syntax,
    code: String,
    file_path: &str,
    tolerant: bool,
) -> Result<ParsedModule, FatalError> {
    let source_map: Arc<SourceMap> = Default::default();

    // Wrap in GLOBALS.set() for thread safety
    GLOBALS.set(&Globals::new(), || {
        let source_file =
            source_map.new_source_file(FileName::Real(file_path.into()).into(), code);
        let fatal = |error: Error| {
            let lo = error.span().lo;
            FatalError {
                line: source_map.lookup_char_pos(lo).line,
                offset: lo.0.saturating_sub(source_file.start_pos.0) as usize,
                message: error.kind().msg().into_owned(),
            }
        };

        let comments = SingleThreadedComments::default();
        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), Some(&comments));

        let module = parser.parse_module().map_err(fatal)?;
        let recovered = parser.take_errors();
        if let Some(error) = recovered.into_iter().next().filter(|_| !tolerant) {
            return Err(fatal(error));
        }

        Ok(ParsedModule {
            module,
            source_map: source_map.clone(),
        })
    })
}
