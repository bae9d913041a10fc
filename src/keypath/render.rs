//! Textual notations for key paths.
//!
//! Every renderer is a total function of the segment sequence. In the
//! default (plain) mode values are written verbatim, which is what most
//! consumers expect for ordinary identifiers and keys. With
//! [`RenderConfig::strict`] set, values that collide with a notation's own
//! syntax are escaped or quoted:
//!
//! | Format     | Strict mode                                                  |
//! |------------|--------------------------------------------------------------|
//! | dot        | `\.` and `\\` inside values                                  |
//! | posix      | `\/` and `\\` inside values                                  |
//! | xpath      | `\/` and `\\` inside values                                  |
//! | jsonpath   | `['key']` for non-identifier keys, `[n]` for positions       |
//! | jmespath   | `"key"` for non-identifier keys, `[n]` for positions         |
//! | python     | `['name']` for non-identifier attribute names                |
//! | bracket    | always quoted; quote and backslash are always escaped        |

use super::ast::{is_identifier, Key, Segment, SegmentKind};
use super::path::{join_values, KeyPath};
use crate::config::RenderConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A textual path notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// `address.city`
    #[default]
    Dot,
    /// `address/city`
    Posix,
    /// `address.city`, `users[0]['name']`
    Python,
    /// `['address']['city']`
    Bracket,
    /// `$.address.city`
    JsonPath,
    /// `/address/city`
    XPath,
    /// `address.city`
    JmesPath,
}

impl Format {
    pub const ALL: [Format; 7] = [
        Format::Dot,
        Format::Posix,
        Format::Python,
        Format::Bracket,
        Format::JsonPath,
        Format::XPath,
        Format::JmesPath,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Format::Dot => "dot",
            Format::Posix => "posix",
            Format::Python => "python",
            Format::Bracket => "bracket",
            Format::JsonPath => "jsonpath",
            Format::XPath => "xpath",
            Format::JmesPath => "jmespath",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown format name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown path format '{0}' (expected one of: dot, posix, python, bracket, jsonpath, xpath, jmespath)")]
pub struct UnknownFormat(pub String);

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Format::ALL
            .into_iter()
            .find(|f| f.name() == wanted)
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}

impl KeyPath {
    /// `address.city`: parts joined with `.`. Same as `to_string()`.
    pub fn to_dot(&self) -> String {
        self.dot().to_string()
    }

    /// `address/city`: parts joined with `/`.
    pub fn to_posix(&self) -> String {
        join_values(self.segments(), "/")
    }

    /// `address.city` / `users[0]['name']`: attribute access with dots,
    /// item access with brackets.
    pub fn to_python(&self) -> String {
        self.render(Format::Python)
    }

    /// `['address']['city']`; integer positions are left unquoted (`[0]`).
    pub fn to_bracket(&self) -> String {
        self.render(Format::Bracket)
    }

    /// `$.address.city`
    pub fn to_jsonpath(&self) -> String {
        format!("$.{}", self.dot())
    }

    /// `/address/city`
    pub fn to_xpath(&self) -> String {
        format!("/{}", self.to_posix())
    }

    /// `address.city`: JMESPath-compatible dot notation.
    pub fn to_jmespath(&self) -> String {
        self.to_dot()
    }

    /// Renders with the default [`RenderConfig`].
    pub fn render(&self, format: Format) -> String {
        self.render_with(format, &RenderConfig::default())
    }

    /// Renders in the config's `default_format`.
    pub fn render_default(&self, config: &RenderConfig) -> String {
        self.render_with(config.default_format, config)
    }

    pub fn render_with(&self, format: Format, config: &RenderConfig) -> String {
        let segments = self.segments();
        let strict = config.strict;
        match format {
            Format::Dot if strict => join_escaped(segments, '.'),
            Format::Dot => self.to_dot(),
            Format::Posix if strict => join_escaped(segments, '/'),
            Format::Posix => self.to_posix(),
            Format::XPath if strict => format!("/{}", join_escaped(segments, '/')),
            Format::XPath => self.to_xpath(),
            Format::JsonPath if strict => render_jsonpath_strict(segments, config),
            Format::JsonPath => format!("{}.{}", config.jsonpath_root, self.dot()),
            Format::JmesPath if strict => render_jmespath_strict(segments),
            Format::JmesPath => self.to_jmespath(),
            Format::Bracket => segments
                .iter()
                .map(|s| bracket(s.value(), config.quote))
                .collect(),
            Format::Python => render_python(segments, config),
        }
    }
}

/// `[0]` for positions, `['key']` otherwise.
fn bracket(value: &Key, quote: char) -> String {
    match value {
        Key::Int(i) => format!("[{}]", i),
        Key::Str(s) => format!("[{}]", quoted(s, quote)),
    }
}

/// Wraps `value` in `quote`, escaping the quote character and backslashes.
pub(crate) fn quoted(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for ch in value.chars() {
        if ch == quote || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push(quote);
    out
}

fn escape_delimiter(value: &Key, delimiter: char) -> String {
    let raw = value.to_string();
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch == delimiter || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

fn join_escaped(segments: &[Segment], delimiter: char) -> String {
    segments
        .iter()
        .map(|s| escape_delimiter(s.value(), delimiter))
        .collect::<Vec<_>>()
        .join(&delimiter.to_string())
}

fn render_jsonpath_strict(segments: &[Segment], config: &RenderConfig) -> String {
    let mut out = config.jsonpath_root.clone();
    for segment in segments {
        match segment.value() {
            Key::Str(s) if is_identifier(s) => {
                out.push('.');
                out.push_str(s);
            }
            other => out.push_str(&bracket(other, config.quote)),
        }
    }
    out
}

fn render_jmespath_strict(segments: &[Segment]) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        match segment.value() {
            Key::Int(n) => out.push_str(&format!("[{}]", n)),
            Key::Str(s) => {
                if i > 0 {
                    out.push('.');
                }
                if is_identifier(s) {
                    out.push_str(s);
                } else {
                    out.push_str(&quoted(s, '"'));
                }
            }
        }
    }
    out
}

fn render_python(segments: &[Segment], config: &RenderConfig) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        match (segment.kind(), segment.value()) {
            (SegmentKind::Attribute, Key::Str(name)) if !config.strict || is_identifier(name) => {
                if i > 0 {
                    out.push('.');
                }
                out.push_str(name);
            }
            (_, value) => out.push_str(&bracket(value, config.quote)),
        }
    }
    out
}
