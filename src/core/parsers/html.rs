//! HTML tag events on top of the `html5gum` tokenizer.
//!
//! Produces the open/close tag stream the markup extractor needs. It never
//! fails: malformed markup is tokenized on a best effort basis, and elements
//! left open are closed when their parent closes or the input ends.

use std::collections::HashMap;

use html5gum::{DefaultEmitter, HtmlString, Token, Tokenizer};

pub type Attributes = HashMap<String, String>;

/// Receiver of tag events.
pub trait TagHandler {
    fn on_open_tag(&mut self, name: &str, attributes: &Attributes);
    fn on_close_tag(&mut self, name: &str);
}

/// Elements that never have content and close immediately.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "br", "col", "command", "embed", "frame", "hr", "img", "input",
    "isindex", "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Tokenize `content` and report every tag to `handler`.
pub fn parse_html<H: TagHandler + ?Sized>(content: &str, handler: &mut H) {
    let mut emitter = DefaultEmitter::default();
    // Script, style and friends hold raw text, not markup.
    emitter.switch_states(true);

    let mut open: Vec<String> = Vec::new();
    for token in Tokenizer::new_with_emitter(content, emitter).infallible() {
        match token {
            Token::StartTag(tag) => {
                let name = to_string(&tag.name);
                let attributes: Attributes = tag
                    .attributes
                    .iter()
                    .map(|(key, value)| (to_string(key), to_string(value)))
                    .collect();

                handler.on_open_tag(&name, &attributes);
                if tag.self_closing || VOID_ELEMENTS.contains(&name.as_str()) {
                    handler.on_close_tag(&name);
                } else {
                    open.push(name);
                }
            }
            Token::EndTag(tag) => {
                let name = to_string(&tag.name);
                // Stray closing tags are ignored.
                if let Some(index) = open.iter().rposition(|o| *o == name) {
                    for closed in open.drain(index..).rev() {
                        handler.on_close_tag(&closed);
                    }
                }
            }
            _ => {}
        }
    }

    while let Some(name) = open.pop() {
        handler.on_close_tag(&name);
    }
}

fn to_string(value: &HtmlString) -> String {
    String::from_utf8_lossy(value).into_owned()
}
