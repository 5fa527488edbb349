//! Pug (Jade) template parser.
//!
//! Builds a block tree from indentation. Only the structure the extractor walks
//! is modeled in detail (tags, attributes, conditionals, includes, mixins);
//! expressions, text and filters are kept as opaque nodes.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static TAG_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w(?:[-:\w]*\w)?").unwrap());
static ID_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#([\w-]+)").unwrap());
static CLASS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\.([_a-z0-9\-]*[_a-z][_a-z0-9\-]*)").unwrap());
static MIXIN_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-\w]+").unwrap());
static KEYWORD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(if|unless|else if|else|each|for|while|case|when|default|block append|block prepend|block|append|prepend|mixin|include|extends|extend|doctype)\b",
    )
    .unwrap()
});

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

impl ParseError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub nodes: Vec<Node>,
}

impl Block {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Tag(Tag),
    Conditional(Conditional),
    Include {
        path: String,
        line: usize,
    },
    MixinDefinition {
        name: String,
        block: Block,
    },
    MixinCall {
        name: String,
        attributes: Vec<Attribute>,
        block: Block,
    },
    Each {
        block: Block,
        alternate: Option<Block>,
    },
    While {
        block: Block,
    },
    Case {
        block: Block,
    },
    When {
        block: Block,
    },
    NamedBlock {
        name: String,
        block: Block,
    },
    Code {
        block: Block,
    },
    Text,
    Comment,
    Doctype,
    Extends {
        path: String,
    },
    Block(Block),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    /// Shorthand `#id`/`.class` first, then the parenthesized list, in order.
    pub attributes: Vec<Attribute>,
    pub block: Block,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: AttributeValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// A quoted string literal, unescaped.
    Literal(String),
    /// Any other JavaScript expression, verbatim.
    Expression(String),
    /// Attribute without a value.
    Boolean,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conditional {
    pub consequent: Block,
    pub alternate: Option<Alternate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alternate {
    /// `else if`
    Conditional(Box<Conditional>),
    /// `else`
    Block(Block),
}

impl Node {
    /// Blocks nested directly in this node, every conditional branch included.
    pub fn blocks(&self) -> Vec<&Block> {
        match self {
            Node::Tag(tag) => vec![&tag.block],
            Node::Conditional(conditional) => conditional.branches(),
            Node::Each { block, alternate } => {
                let mut blocks = vec![block];
                blocks.extend(alternate.as_ref());
                blocks
            }
            Node::MixinDefinition { block, .. }
            | Node::MixinCall { block, .. }
            | Node::While { block }
            | Node::Case { block }
            | Node::When { block }
            | Node::NamedBlock { block, .. }
            | Node::Code { block }
            | Node::Block(block) => vec![block],
            Node::Include { .. }
            | Node::Text
            | Node::Comment
            | Node::Doctype
            | Node::Extends { .. } => Vec::new(),
        }
    }

    pub fn blocks_mut(&mut self) -> Vec<&mut Block> {
        match self {
            Node::Tag(tag) => vec![&mut tag.block],
            Node::Conditional(conditional) => conditional.branches_mut(),
            Node::Each { block, alternate } => {
                let mut blocks = vec![block];
                blocks.extend(alternate.as_mut());
                blocks
            }
            Node::MixinDefinition { block, .. }
            | Node::MixinCall { block, .. }
            | Node::While { block }
            | Node::Case { block }
            | Node::When { block }
            | Node::NamedBlock { block, .. }
            | Node::Code { block }
            | Node::Block(block) => vec![block],
            Node::Include { .. }
            | Node::Text
            | Node::Comment
            | Node::Doctype
            | Node::Extends { .. } => Vec::new(),
        }
    }
}

impl Conditional {
    /// Consequent followed by every `else if`/`else` branch.
    pub fn branches(&self) -> Vec<&Block> {
        let mut branches = vec![&self.consequent];
        match &self.alternate {
            Some(Alternate::Conditional(next)) => branches.extend(next.branches()),
            Some(Alternate::Block(block)) => branches.push(block),
            None => {}
        }
        branches
    }

    pub fn branches_mut(&mut self) -> Vec<&mut Block> {
        let mut branches = vec![&mut self.consequent];
        match &mut self.alternate {
            Some(Alternate::Conditional(next)) => branches.extend(next.branches_mut()),
            Some(Alternate::Block(block)) => branches.push(block),
            None => {}
        }
        branches
    }

    /// The last conditional of an `else if` chain that can still take an alternate.
    fn open_tail(&mut self) -> Option<&mut Conditional> {
        if self.alternate.is_none() {
            return Some(self);
        }
        match &mut self.alternate {
            Some(Alternate::Conditional(next)) => next.open_tail(),
            _ => None,
        }
    }
}

/// Parse a whole template.
pub fn parse_pug(content: &str) -> Result<Block> {
    let lines = split_lines(content)?;
    let mut parser = Parser { lines, pos: 0 };
    let block = parser.parse_block(None)?;
    if let Some(line) = parser.peek() {
        return Err(ParseError::new(line.number, "Inconsistent indentation"));
    }
    Ok(block)
}

#[derive(Debug)]
struct Line<'a> {
    number: usize,
    indent: usize,
    text: &'a str,
}

fn split_lines(content: &str) -> Result<Vec<Line<'_>>> {
    let mut lines = Vec::new();
    for (index, raw) in content.lines().enumerate() {
        let text = raw.trim_start();
        let leading = &raw[..raw.len() - text.len()];
        let text = text.trim_end();
        if text.is_empty() {
            continue;
        }
        if leading.contains(' ') && leading.contains('\t') {
            return Err(ParseError::new(
                index + 1,
                "Invalid indentation, you can use tabs or spaces but not both",
            ));
        }
        lines.push(Line {
            number: index + 1,
            indent: leading.chars().count(),
            text,
        });
    }
    Ok(lines)
}

/// What a parsed line expects from the more indented lines below it.
enum Children {
    Block,
    Raw,
    /// Plain text that may interpolate tags.
    Text,
    None,
}

struct Parser<'a> {
    lines: Vec<Line<'a>>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Line<'a>> {
        self.lines.get(self.pos)
    }

    /// Parse the lines indented deeper than `parent`.
    fn parse_block(&mut self, parent: Option<usize>) -> Result<Block> {
        let mut nodes: Vec<Node> = Vec::new();
        let Some(first) = self.peek() else {
            return Ok(Block::default());
        };
        let level = first.indent;
        if parent.is_some_and(|p| level <= p) {
            return Ok(Block::default());
        }

        while let Some(line) = self.peek() {
            if line.indent < level {
                if parent.is_some_and(|p| line.indent > p) {
                    return Err(ParseError::new(line.number, "Inconsistent indentation"));
                }
                break;
            }
            if line.indent > level {
                return Err(ParseError::new(line.number, "Unexpected indentation"));
            }

            let number = line.number;
            let text = line.text;
            self.pos += 1;

            if let Some(rest) = strip_keyword(text, "else") {
                self.attach_else(&mut nodes, rest, number, level)?;
                continue;
            }

            let (mut node, children) = self.parse_line(text, number)?;
            self.fill_children(&mut node, children, level)?;
            nodes.push(node);
        }

        Ok(Block::new(nodes))
    }

    fn fill_children(&mut self, node: &mut Node, children: Children, indent: usize) -> Result<()> {
        match children {
            Children::Raw => self.skip_raw(indent),
            Children::Text => {
                let mut tags = Vec::new();
                while let Some(line) = self.peek().filter(|line| line.indent > indent) {
                    let (number, text) = (line.number, line.text);
                    self.pos += 1;
                    tags.extend(self.interpolated_tags(text, number)?);
                }
                if let Some(target) = child_block(node) {
                    target.nodes.extend(tags);
                }
            }
            Children::Block => {
                let block = self.parse_block(Some(indent))?;
                if let Some(target) = child_block(node) {
                    target.nodes.extend(block.nodes);
                }
            }
            Children::None => {
                if let Some(next) = self.peek()
                    && next.indent > indent
                {
                    return Err(ParseError::new(next.number, "Unexpected indentation"));
                }
            }
        }
        Ok(())
    }

    fn skip_raw(&mut self, indent: usize) {
        while self.peek().is_some_and(|line| line.indent > indent) {
            self.pos += 1;
        }
    }

    fn attach_else(
        &mut self,
        nodes: &mut [Node],
        rest: &str,
        number: usize,
        level: usize,
    ) -> Result<()> {
        let rest = rest.trim();
        let chained = strip_keyword(rest, "if").map(str::trim);

        match nodes.last_mut() {
            Some(Node::Conditional(conditional)) => {
                let Some(tail) = conditional.open_tail() else {
                    return Err(ParseError::new(number, "Unexpected else"));
                };
                let block = self.parse_block(Some(level))?;
                tail.alternate = Some(match chained {
                    Some(_) => Alternate::Conditional(Box::new(Conditional {
                        consequent: block,
                        alternate: None,
                    })),
                    None => Alternate::Block(block),
                });
                Ok(())
            }
            Some(Node::Each { alternate, .. }) if alternate.is_none() && chained.is_none() => {
                *alternate = Some(self.parse_block(Some(level))?);
                Ok(())
            }
            _ => Err(ParseError::new(number, "Unexpected else")),
        }
    }

    fn parse_line(&mut self, text: &str, number: usize) -> Result<(Node, Children)> {
        if text.starts_with("//") {
            return Ok((Node::Comment, Children::Raw));
        }
        if let Some(piped) = text.strip_prefix('|') {
            return Ok((self.text_node(piped, number)?, Children::None));
        }
        if text.starts_with('<') || text.starts_with("#[") || text.starts_with("#{") {
            return Ok((self.text_node(text, number)?, Children::None));
        }
        if text.starts_with(':') {
            // Filter; its body is raw text.
            return Ok((Node::Text, Children::Raw));
        }
        if let Some(code) = text.strip_prefix('-') {
            // A bare `-` opens a block of unbuffered JavaScript.
            let children = if code.trim().is_empty() {
                Children::Raw
            } else {
                Children::Block
            };
            return Ok((Node::Code { block: Block::default() }, children));
        }
        if text.starts_with('=') || text.starts_with("!=") {
            return Ok((Node::Code { block: Block::default() }, Children::None));
        }
        if let Some(rest) = text.strip_prefix('+') {
            return self.parse_mixin_call(rest.trim_start(), number);
        }

        if let Some(keyword) = KEYWORD_REGEX.find(text) {
            let rest = text[keyword.end()..].trim();
            return self.parse_keyword(keyword.as_str(), rest, number);
        }

        if text.starts_with(['#', '.']) || TAG_NAME_REGEX.is_match(text) {
            return self.parse_tag(text, number);
        }

        Err(ParseError::new(
            number,
            format!("Unexpected text \"{}\"", text),
        ))
    }

    fn parse_keyword(&mut self, keyword: &str, rest: &str, number: usize) -> Result<(Node, Children)> {
        let node = match keyword {
            "if" | "unless" => Node::Conditional(Conditional {
                consequent: Block::default(),
                alternate: None,
            }),
            "each" | "for" => Node::Each {
                block: Block::default(),
                alternate: None,
            },
            "while" => Node::While {
                block: Block::default(),
            },
            "case" => Node::Case {
                block: Block::default(),
            },
            "when" | "default" => {
                let mut block = Block::default();
                if let Some(expansion) = rest.find(": ").map(|i| rest[i + 2..].trim()) {
                    let (inline, _) = self.parse_line(expansion, number)?;
                    block.nodes.push(inline);
                }
                Node::When { block }
            }
            "block" | "block append" | "block prepend" | "append" | "prepend" => {
                Node::NamedBlock {
                    name: rest.to_string(),
                    block: Block::default(),
                }
            }
            "mixin" => {
                let name = MIXIN_NAME_REGEX
                    .find(rest)
                    .map(|m| m.as_str().to_string())
                    .ok_or_else(|| ParseError::new(number, "Mixin definition needs a name"))?;
                Node::MixinDefinition {
                    name,
                    block: Block::default(),
                }
            }
            "include" => {
                // `include:filter path`
                let path = match rest.strip_prefix(':') {
                    Some(filtered) => filtered
                        .split_once(char::is_whitespace)
                        .map(|(_, p)| p.trim())
                        .unwrap_or_default(),
                    None => rest,
                };
                if path.is_empty() {
                    return Err(ParseError::new(number, "Missing path for include"));
                }
                return Ok((
                    Node::Include {
                        path: path.to_string(),
                        line: number,
                    },
                    Children::None,
                ));
            }
            "extends" | "extend" => {
                return Ok((
                    Node::Extends {
                        path: rest.to_string(),
                    },
                    Children::None,
                ));
            }
            "doctype" => return Ok((Node::Doctype, Children::None)),
            _ => return Err(ParseError::new(number, format!("Unexpected \"{}\"", keyword))),
        };
        Ok((node, Children::Block))
    }

    fn parse_mixin_call(&mut self, text: &str, number: usize) -> Result<(Node, Children)> {
        let name = MIXIN_NAME_REGEX
            .find(text)
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| ParseError::new(number, "Mixin call needs a name"))?;
        let mut head = text[name.len()..].to_string();

        let mut attributes = Vec::new();
        if head.starts_with('(') {
            // Arguments are not substituted, only skipped.
            let (_, end) = self.scan_parens(&mut head, number)?;
            head.drain(..end);
        }
        if head.starts_with('(') {
            let (inner, end) = self.scan_parens(&mut head, number)?;
            attributes = parse_attribute_list(&inner);
            head.drain(..end);
        }

        let mut node = Node::MixinCall {
            name,
            attributes,
            block: Block::default(),
        };
        if let Some(expansion) = head.trim_start().strip_prefix(':') {
            self.push_expansion(&mut node, expansion.trim(), number)?;
        }
        Ok((node, Children::Block))
    }

    fn parse_tag(&mut self, text: &str, number: usize) -> Result<(Node, Children)> {
        let mut head = text.to_string();
        let explicit = TAG_NAME_REGEX.find(&head).map(|m| m.as_str().to_string());
        if let Some(name) = &explicit {
            head.drain(..name.len());
        }
        // `#id` and `.class` alone imply a div.
        let name = explicit.unwrap_or_else(|| "div".to_string());

        let mut attributes = Vec::new();
        loop {
            if let Some(caps) = ID_REGEX.captures(&head) {
                attributes.push(literal("id", &caps[1]));
                let len = caps[0].len();
                head.drain(..len);
            } else if let Some(caps) = CLASS_REGEX.captures(&head) {
                attributes.push(literal("class", &caps[1]));
                let len = caps[0].len();
                head.drain(..len);
            } else if head.starts_with('(') {
                let (inner, end) = self.scan_parens(&mut head, number)?;
                attributes.extend(parse_attribute_list(&inner));
                head.drain(..end);
            } else if let Some(rest) = head.strip_prefix("&attributes") {
                let mut rest = rest.to_string();
                if !rest.starts_with('(') {
                    return Err(ParseError::new(number, "&attributes needs an argument"));
                }
                let (_, end) = self.scan_parens(&mut rest, number)?;
                rest.drain(..end);
                head = rest;
            } else {
                break;
            }
        }

        let tail = head.strip_prefix('/').unwrap_or(head.as_str());
        let mut node = Node::Tag(Tag {
            name,
            attributes,
            block: Block::default(),
        });

        if tail == "." {
            return Ok((node, Children::Text));
        }
        if let Some(expansion) = tail.strip_prefix(':') {
            self.push_expansion(&mut node, expansion.trim(), number)?;
            return Ok((node, Children::Block));
        }
        if tail.starts_with(char::is_whitespace) {
            let tags = self.interpolated_tags(tail, number)?;
            if let Some(block) = child_block(&mut node) {
                block.nodes.extend(tags);
            }
            return Ok((node, Children::Block));
        }
        if tail.is_empty() || tail.starts_with('=') || tail.starts_with("!=") {
            return Ok((node, Children::Block));
        }

        Err(ParseError::new(
            number,
            format!("Unexpected text \"{}\"", tail),
        ))
    }

    fn text_node(&mut self, text: &str, number: usize) -> Result<Node> {
        let tags = self.interpolated_tags(text, number)?;
        Ok(if tags.is_empty() {
            Node::Text
        } else {
            Node::Block(Block::new(tags))
        })
    }

    /// Tags interpolated into text with `#[tag ...]`; `\#[` is literal.
    fn interpolated_tags(&mut self, text: &str, number: usize) -> Result<Vec<Node>> {
        let mut tags = Vec::new();
        let mut rest = text;
        while let Some(start) = rest.find("#[") {
            if rest[..start].ends_with('\\') {
                rest = &rest[start + 2..];
                continue;
            }
            let group = &rest[start + 1..];
            let Some(end) = matching_bracket(group, ']') else {
                return Err(ParseError::new(
                    number,
                    "End of line was reached with no closing bracket for interpolation",
                ));
            };
            let (tag, _) = self.parse_line(group[1..end].trim(), number)?;
            tags.push(tag);
            rest = &group[end + 1..];
        }
        Ok(tags)
    }

    /// Block expansion (`li: a(href="/")`) puts the inline line inside `node`.
    fn push_expansion(&mut self, node: &mut Node, expansion: &str, number: usize) -> Result<()> {
        if expansion.is_empty() {
            return Err(ParseError::new(number, "Missing tag after block expansion"));
        }
        let (inline, _) = self.parse_line(expansion, number)?;
        if let Some(block) = child_block(node) {
            block.nodes.push(inline);
        }
        Ok(())
    }

    /// Scan a parenthesized group at the start of `head`, pulling continuation
    /// lines in when it spans several lines. Returns the inner text and the
    /// byte offset just past the closing paren.
    fn scan_parens(&mut self, head: &mut String, number: usize) -> Result<(String, usize)> {
        loop {
            if let Some(end) = matching_bracket(head, ')') {
                return Ok((head[1..end].to_string(), end + 1));
            }
            match self.lines.get(self.pos) {
                Some(next) => {
                    head.push('\n');
                    head.push_str(next.text);
                    self.pos += 1;
                }
                None => {
                    return Err(ParseError::new(
                        number,
                        "The end of the string was reached with no closing bracket found",
                    ));
                }
            }
        }
    }
}

/// The block indented children go into.
fn child_block(node: &mut Node) -> Option<&mut Block> {
    node.blocks_mut().into_iter().next()
}

fn strip_keyword<'t>(text: &'t str, keyword: &str) -> Option<&'t str> {
    let rest = text.strip_prefix(keyword)?;
    if rest.is_empty() || rest.starts_with(|c: char| c.is_whitespace() || c == ':') {
        Some(rest)
    } else {
        None
    }
}

fn literal(name: &str, value: &str) -> Attribute {
    Attribute {
        name: name.to_string(),
        value: AttributeValue::Literal(value.to_string()),
    }
}

/// Index of the `close` bracket matching the one at index 0, honoring quotes
/// and nesting.
fn matching_bracket(text: &str, close: char) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (index, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' | '`' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return (c == close).then_some(index);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split the inside of `( ... )` into attributes.
fn parse_attribute_list(inner: &str) -> Vec<Attribute> {
    let chars: Vec<(usize, char)> = inner.char_indices().collect();
    let mut attributes = Vec::new();
    let mut i = 0;

    let skip = |i: &mut usize, pred: &dyn Fn(char) -> bool| {
        while *i < chars.len() && pred(chars[*i].1) {
            *i += 1;
        }
    };

    while i < chars.len() {
        skip(&mut i, &|c| c.is_whitespace() || c == ',');
        if i >= chars.len() {
            break;
        }

        let name = if matches!(chars[i].1, '"' | '\'') {
            let quote = chars[i].1;
            let start = i + 1;
            i += 1;
            skip(&mut i, &|c| c != quote);
            let name = slice(inner, &chars, start, i);
            i = (i + 1).min(chars.len());
            name
        } else {
            let start = i;
            skip(&mut i, &|c| !c.is_whitespace() && !matches!(c, '=' | '!' | ','));
            slice(inner, &chars, start, i)
        };

        let mut lookahead = i;
        skip(&mut lookahead, &|c| c.is_whitespace());
        let has_value = match chars.get(lookahead).map(|&(_, c)| c) {
            Some('=') => {
                i = lookahead + 1;
                true
            }
            Some('!') if chars.get(lookahead + 1).map(|&(_, c)| c) == Some('=') => {
                i = lookahead + 2;
                true
            }
            _ => false,
        };

        if !has_value {
            if name.is_empty() {
                i += 1;
            } else {
                attributes.push(Attribute {
                    name,
                    value: AttributeValue::Boolean,
                });
            }
            continue;
        }

        skip(&mut i, &|c| c.is_whitespace());
        let start = i;
        i = value_end(&chars, i);
        let raw = slice(inner, &chars, start, i);
        let raw = raw.trim();
        let value = match string_literal(raw) {
            Some(literal) => AttributeValue::Literal(literal),
            None => AttributeValue::Expression(raw.to_string()),
        };
        if !name.is_empty() {
            attributes.push(Attribute { name, value });
        }
    }

    attributes
}

fn slice(text: &str, chars: &[(usize, char)], start: usize, end: usize) -> String {
    let from = chars.get(start).map_or(text.len(), |&(b, _)| b);
    let to = chars.get(end).map_or(text.len(), |&(b, _)| b);
    text[from..to].to_string()
}

/// End of an attribute value: a top level comma, or top level whitespace that
/// is not part of a binary expression.
fn value_end(chars: &[(usize, char)], mut i: usize) -> usize {
    const OPERATORS: &[char] = &[
        '+', '-', '*', '/', '%', '?', ':', '&', '|', '<', '>', '=', '!', '.',
    ];
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    while i < chars.len() {
        let c = chars[i].1;
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            i += 1;
            continue;
        }
        match c {
            '"' | '\'' | '`' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => return i,
            c if c.is_whitespace() && depth == 0 => {
                let previous = chars[..i].iter().rev().map(|&(_, c)| c).find(|c| !c.is_whitespace());
                let next = chars[i..].iter().map(|&(_, c)| c).find(|c| !c.is_whitespace());
                let continues = previous.is_some_and(|p| OPERATORS.contains(&p))
                    || next.is_some_and(|n| OPERATORS.contains(&n));
                if !continues {
                    return i;
                }
            }
            _ => {}
        }
        i += 1;
    }
    i
}

/// The unescaped content of `raw` if it is exactly one quoted string literal.
fn string_literal(raw: &str) -> Option<String> {
    let mut chars = raw.chars();
    let quote = chars.next().filter(|c| matches!(c, '"' | '\'' | '`'))?;

    let mut value = String::new();
    let mut escaped = false;
    let mut closed = false;
    for c in chars.by_ref() {
        if escaped {
            value.push(match c {
                'n' => '\n',
                't' => '\t',
                'r' => '\r',
                other => other,
            });
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            closed = true;
            break;
        } else {
            value.push(c);
        }
    }

    let interpolated = quote == '`' && value.contains("${");
    (closed && chars.next().is_none() && !interpolated).then_some(value)
}
