//! Source parsers.
//!
//! - `html`: lenient tag tokenizer
//! - `pug`: indentation based Pug/Jade parser
//! - `jsx`: JSX/TSX and plain JavaScript (uses swc for AST generation)

pub mod html;
pub mod jsx;
pub mod pug;
