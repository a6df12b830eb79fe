//! Structural marker selectors
//!
//! Controllers locate page regions by markers such as `.modal`,
//! `#section--1` or `img[data-src]`. Only compound selectors are supported:
//! an optional tag followed by any number of `#id`, `.class` and
//! `[attr]` / `[attr=value]` parts. Combinators are not needed.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A single attribute condition inside `[...]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrMatch {
    pub name: String,
    pub value: Option<String>,
}

/// A parsed compound selector
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrMatch>,
    source: String,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self> {
        let source = input.trim();
        if source.is_empty() {
            return Err(Error::selector(input, "empty selector"));
        }

        let mut selector = Selector {
            source: source.to_string(),
            ..Default::default()
        };
        let chars: Vec<char> = source.chars().collect();
        let mut pos = 0;

        if chars[0] == '*' {
            pos = 1;
        } else if is_ident_char(chars[0]) {
            let tag = read_ident(&chars, &mut pos);
            selector.tag = Some(tag.to_ascii_lowercase());
        }

        while pos < chars.len() {
            match chars[pos] {
                '#' => {
                    pos += 1;
                    let id = read_ident(&chars, &mut pos);
                    if id.is_empty() {
                        return Err(Error::selector(source, "empty id"));
                    }
                    selector.id = Some(id);
                }
                '.' => {
                    pos += 1;
                    let class = read_ident(&chars, &mut pos);
                    if class.is_empty() {
                        return Err(Error::selector(source, "empty class"));
                    }
                    selector.classes.push(class);
                }
                '[' => {
                    pos += 1;
                    selector.attrs.push(read_attr(source, &chars, &mut pos)?);
                }
                c if c.is_whitespace() || c == '>' || c == '+' || c == '~' => {
                    return Err(Error::selector(source, "combinators are not supported"));
                }
                c => {
                    return Err(Error::selector(
                        source,
                        format!("unexpected character '{}'", c),
                    ));
                }
            }
        }

        Ok(selector)
    }

    /// Selector source text as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Selector matching any element carrying `class`
    pub fn class(class: &str) -> Self {
        Self {
            classes: vec![class.to_string()],
            source: format!(".{}", class),
            ..Default::default()
        }
    }
}

impl FromStr for Selector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Selector::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn read_ident(chars: &[char], pos: &mut usize) -> String {
    let start = *pos;
    while *pos < chars.len() && is_ident_char(chars[*pos]) {
        *pos += 1;
    }
    chars[start..*pos].iter().collect()
}

fn read_attr(source: &str, chars: &[char], pos: &mut usize) -> Result<AttrMatch> {
    let name = read_ident(chars, pos);
    if name.is_empty() {
        return Err(Error::selector(source, "empty attribute name"));
    }

    let value = match chars.get(*pos) {
        Some(']') => None,
        Some('=') => {
            *pos += 1;
            Some(read_attr_value(source, chars, pos)?)
        }
        _ => return Err(Error::selector(source, "unterminated attribute")),
    };

    if chars.get(*pos) != Some(&']') {
        return Err(Error::selector(source, "unterminated attribute"));
    }
    *pos += 1;

    Ok(AttrMatch { name, value })
}

fn read_attr_value(source: &str, chars: &[char], pos: &mut usize) -> Result<String> {
    match chars.get(*pos) {
        Some(&quote) if quote == '"' || quote == '\'' => {
            *pos += 1;
            let start = *pos;
            while *pos < chars.len() && chars[*pos] != quote {
                *pos += 1;
            }
            if *pos >= chars.len() {
                return Err(Error::selector(source, "unterminated string"));
            }
            let value = chars[start..*pos].iter().collect();
            *pos += 1;
            Ok(value)
        }
        _ => Ok(read_ident(chars, pos)),
    }
}
