//! Custom path templates for [`KeyPath::format`].
//!
//! # Placeholders
//!
//! - `{path}` / `{dot}`, `{posix}`, `{python}`, `{bracket}`, `{jsonpath}`,
//!   `{xpath}`, `{jmespath}` - the whole path in that notation
//! - `{root}`, `{leaf}` - first and last segment values
//! - `{depth}` - number of segments
//! - `{parts}` - the values as a list, e.g. `[users, 0, name]`
//! - `{join:SEP}` - the values joined with `SEP`
//! - `{each:ITEM|SEP}` - `ITEM` rendered once per segment and joined with
//!   `SEP` (optional). Inside `ITEM`, `%v` is the value, `%i` the position,
//!   `%k` the kind (`attribute`/`index`), and `%%` a literal `%`.
//!
//! `{{` and `}}` produce literal braces. Anything that is not a recognized
//! placeholder, including an unterminated `{`, is copied through unchanged.
//!
//! # Examples
//!
//! ```
//! use keyof::KeyPath;
//!
//! let path = KeyPath::of(|u| u.attr("metadata").item("prefs").item("theme")).unwrap();
//! assert_eq!(path.format("{root} -> {leaf}"), "metadata -> theme");
//! assert_eq!(path.format("{depth} segments: {dot}"), "3 segments: metadata.prefs.theme");
//! assert_eq!(path.format("{join:::}"), "metadata::prefs::theme");
//! assert_eq!(path.format("{each:<%v>}"), "<metadata><prefs><theme>");
//! ```

use super::ast::Segment;
use super::path::KeyPath;
use super::render::Format;

/// A parsed template, reusable across paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pieces: Vec<Piece>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Whole(Format),
    Root,
    Leaf,
    Depth,
    Parts,
    Join(String),
    Each { item: String, sep: String },
}

impl Template {
    /// Parses a template. Never fails: unrecognized input is kept literally.
    pub fn parse(template: &str) -> Self {
        TemplateParser::new(template).parse()
    }

    /// Renders the template for `path`.
    pub fn render(&self, path: &KeyPath) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => out.push_str(text),
                Piece::Whole(format) => out.push_str(&path.render(*format)),
                Piece::Root => out.push_str(&path.root().to_string()),
                Piece::Leaf => out.push_str(&path.leaf().to_string()),
                Piece::Depth => out.push_str(&path.depth().to_string()),
                Piece::Parts => {
                    let parts: Vec<String> = path.parts().map(|p| p.to_string()).collect();
                    out.push('[');
                    out.push_str(&parts.join(", "));
                    out.push(']');
                }
                Piece::Join(sep) => {
                    let parts: Vec<String> = path.parts().map(|p| p.to_string()).collect();
                    out.push_str(&parts.join(sep));
                }
                Piece::Each { item, sep } => {
                    let rendered: Vec<String> = path
                        .segments()
                        .iter()
                        .enumerate()
                        .map(|(i, segment)| expand_item(item, i, segment))
                        .collect();
                    out.push_str(&rendered.join(sep));
                }
            }
        }
        out
    }
}

/// Expands `%v`, `%i`, `%k` and `%%` for one segment.
fn expand_item(item: &str, position: usize, segment: &Segment) -> String {
    let mut out = String::new();
    let mut chars = item.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }
        match chars.peek() {
            Some('v') => out.push_str(&segment.value().to_string()),
            Some('i') => out.push_str(&position.to_string()),
            Some('k') => out.push_str(segment.kind().as_str()),
            Some('%') => out.push('%'),
            _ => {
                out.push('%');
                continue;
            }
        }
        chars.next();
    }
    out
}

struct TemplateParser<'a> {
    input: &'a str,
    position: usize,
    literal: String,
    pieces: Vec<Piece>,
}

impl<'a> TemplateParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            literal: String::new(),
            pieces: Vec::new(),
        }
    }

    fn parse(mut self) -> Template {
        while let Some(ch) = self.next() {
            match ch {
                '{' if self.peek() == Some('{') => {
                    self.next();
                    self.literal.push('{');
                }
                '}' if self.peek() == Some('}') => {
                    self.next();
                    self.literal.push('}');
                }
                '{' => self.parse_placeholder(),
                other => self.literal.push(other),
            }
        }
        self.flush();
        Template {
            pieces: self.pieces,
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Returns the next character and advances position.
    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    fn flush(&mut self) {
        if !self.literal.is_empty() {
            let text = std::mem::take(&mut self.literal);
            self.pieces.push(Piece::Literal(text));
        }
    }

    /// Parses the body of a `{...}` placeholder; the opening brace is consumed.
    fn parse_placeholder(&mut self) {
        let rest = &self.input[self.position..];
        let Some(end) = rest.find('}') else {
            // Unterminated: keep the brace and let the rest read as literal.
            self.literal.push('{');
            return;
        };
        let body = &rest[..end];
        match placeholder(body) {
            Some(piece) => {
                self.flush();
                self.pieces.push(piece);
            }
            None => {
                self.literal.push('{');
                self.literal.push_str(body);
                self.literal.push('}');
            }
        }
        self.position += end + 1;
    }
}

fn placeholder(body: &str) -> Option<Piece> {
    if let Some(sep) = body.strip_prefix("join:") {
        return Some(Piece::Join(sep.to_string()));
    }
    if let Some(spec) = body.strip_prefix("each:") {
        let (item, sep) = spec.split_once('|').unwrap_or((spec, ""));
        return Some(Piece::Each {
            item: item.to_string(),
            sep: sep.to_string(),
        });
    }
    let piece = match body.trim() {
        "path" | "dot" => Piece::Whole(Format::Dot),
        "posix" => Piece::Whole(Format::Posix),
        "python" => Piece::Whole(Format::Python),
        "bracket" => Piece::Whole(Format::Bracket),
        "jsonpath" => Piece::Whole(Format::JsonPath),
        "xpath" => Piece::Whole(Format::XPath),
        "jmespath" => Piece::Whole(Format::JmesPath),
        "root" => Piece::Root,
        "leaf" => Piece::Leaf,
        "depth" => Piece::Depth,
        "parts" => Piece::Parts,
        "sep" => Piece::Join(".".to_string()),
        _ => return None,
    };
    Some(piece)
}

impl KeyPath {
    /// Renders the path through a custom template; see [`Template`] for the
    /// placeholder syntax.
    pub fn format(&self, template: &str) -> String {
        Template::parse(template).render(self)
    }
}
