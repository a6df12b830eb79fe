//! Line commands accepted by the headless runner
//!
//! One command per line; blank lines and `#` comments are skipped.
//!
//! ```text
//! click .nav__link@2
//! key Escape
//! scroll 1200
//! settle
//! dump
//! ```

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use pagekit_core::prelude::*;
use pagekit_core::{Document, Key, NodeId, Selector};

/// `<selector>` or `<selector>@<index>`
static TARGET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<selector>[^@\s]+)(?:@(?P<index>\d+))?$")
        .expect("Target regex pattern is valid")
});

/// An element addressed by selector, picking the n-th match in document order
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub selector: Selector,
    pub index: usize,
}

impl Target {
    /// Resolve to a connected element handle
    pub fn resolve(&self, document: &Document) -> Result<NodeId> {
        let matches = document.query_all(&self.selector);
        matches.get(self.index).copied().ok_or_else(|| {
            Error::command(format!(
                "no element matches '{}' at index {} ({} found)",
                self.selector,
                self.index,
                matches.len()
            ))
        })
    }
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let caps = TARGET_PATTERN
            .captures(s)
            .ok_or_else(|| Error::command(format!("invalid target '{}'", s)))?;

        let selector = Selector::parse(&caps["selector"])?;
        let index = match caps.name("index") {
            Some(index) => index
                .as_str()
                .parse()
                .map_err(|_| Error::command(format!("invalid index in '{}'", s)))?,
            None => 0,
        };

        Ok(Self { selector, index })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Click(Target),
    Hover(Target),
    Unhover(Target),
    Load(Target),
    Key(Key),
    Scroll(f64),
    ScrollBy(f64),
    Resize { width: f64, height: f64 },
    /// Process queued animation frames and image loads until the page is at rest
    Settle,
    /// Print a state snapshot
    Dump,
    Quit,
}

/// Parse one input line. Returns `None` for blank lines and comments.
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut parts = line.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    let command = match (name, args.as_slice()) {
        ("click", [target]) => Command::Click(target.parse()?),
        ("hover", [target]) => Command::Hover(target.parse()?),
        ("unhover", [target]) => Command::Unhover(target.parse()?),
        ("load", [target]) => Command::Load(target.parse()?),
        ("key", [key]) => Command::Key(key.parse()?),
        ("scroll", [y]) => Command::Scroll(number(y)?),
        ("scroll-by", [dy]) => Command::ScrollBy(number(dy)?),
        ("resize", [width, height]) => Command::Resize {
            width: number(width)?,
            height: number(height)?,
        },
        ("settle", []) => Command::Settle,
        ("dump", []) => Command::Dump,
        ("q" | "quit", []) => Command::Quit,
        (
            "click" | "hover" | "unhover" | "load" | "key" | "scroll" | "scroll-by" | "resize"
            | "settle" | "dump" | "quit",
            _,
        ) => {
            return Err(Error::command(format!(
                "wrong number of arguments for '{}'",
                name
            )))
        }
        _ => return Err(Error::command(format!("unknown command '{}'", name))),
    };

    Ok(Some(command))
}

fn number(s: &str) -> Result<f64> {
    match s.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(Error::command(format!("'{}' is not a number", s))),
    }
}
