//! Pattern compilation and matching.
//!
//! # Responsibilities
//! - Anchor a route pattern at both ends and compile it case-insensitively
//! - Reject `\K` (match-start reset) before it reaches the engine
//! - Evaluate a path and expose positional and named captures
//!
//! # Design Decisions
//! - The compiled matcher is immutable; every match returns its own
//!   [`PatternMatch`] so concurrent callers never share capture state
//! - Capture slices borrow the matched path, nothing is copied
//! - Named captures are enumerated by group index, never alphabetically

use regex::{CaptureLocations, CaptureNames, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::CompileError;

/// Engine limits applied when compiling a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MatcherOptions {
    /// Upper bound on the compiled program size, in bytes.
    pub size_limit: usize,

    /// Upper bound on the lazy DFA cache, in bytes.
    pub dfa_size_limit: usize,
}

impl Default for MatcherOptions {
    fn default() -> Self {
        Self {
            size_limit: 10 * (1 << 20),
            dfa_size_limit: 2 * (1 << 20),
        }
    }
}

/// Anchor a pattern the way it is stored on a route.
pub(crate) fn anchor(pattern: &str) -> String {
    format!("^{}$", pattern)
}

/// One compiled, anchored, case-insensitive route pattern.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    regex: Regex,
}

impl PatternMatcher {
    /// Compile `pattern` with default engine limits.
    pub fn compile(pattern: &str) -> Result<Self, CompileError> {
        Self::compile_with(pattern, &MatcherOptions::default())
    }

    /// Compile `pattern` with explicit engine limits.
    pub fn compile_with(pattern: &str, options: &MatcherOptions) -> Result<Self, CompileError> {
        if let Some(pos) = pattern.find("\\K") {
            // +1 for the leading anchor
            return Err(CompileError::new("\\K is not allowed", Some(pos + 1)));
        }

        let anchored = anchor(pattern);
        let regex = RegexBuilder::new(&anchored)
            .case_insensitive(true)
            .size_limit(options.size_limit)
            .dfa_size_limit(options.dfa_size_limit)
            .build()
            .map_err(|e| diagnose(&anchored, e))?;

        Ok(Self { regex })
    }

    /// The anchored pattern text.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// The underlying engine handle.
    pub fn as_regex(&self) -> &Regex {
        &self.regex
    }

    /// Number of capture groups, including the implicit whole-match group.
    pub fn group_count(&self) -> usize {
        self.regex.captures_len()
    }

    /// Evaluate `path` against the pattern.
    pub fn find<'h>(&self, path: &'h str) -> Option<PatternMatch<'h>> {
        let mut locations = self.regex.capture_locations();
        self.regex.captures_read(&mut locations, path)?;

        // Highest participating group + 1, so trailing unset groups are dropped.
        let count = (0..locations.len())
            .rev()
            .find(|&i| locations.get(i).is_some())
            .map_or(0, |i| i + 1);

        Some(PatternMatch {
            haystack: path,
            locations,
            count,
        })
    }

    /// Captured substrings for groups `1..count` of a match.
    pub fn segments<'a>(&self, m: &'a PatternMatch<'_>) -> Segments<'a> {
        m.segments()
    }

    /// `(name, value)` pairs for every named group, in group-index order.
    pub fn vars<'a>(&'a self, m: &'a PatternMatch<'_>) -> Vars<'a> {
        Vars {
            names: self.regex.capture_names().enumerate(),
            haystack: m.haystack,
            locations: &m.locations,
        }
    }
}

/// Turn an engine failure into a message plus offset.
///
/// The `regex` error only carries preformatted text, so the syntax is
/// re-parsed to recover the span of the first problem.
fn diagnose(anchored: &str, err: regex::Error) -> CompileError {
    let parsed = regex_syntax::ParserBuilder::new()
        .case_insensitive(true)
        .build()
        .parse(anchored);

    match parsed {
        Err(regex_syntax::Error::Parse(e)) => {
            CompileError::new(e.kind().to_string(), Some(e.span().start.offset))
        }
        Err(regex_syntax::Error::Translate(e)) => {
            CompileError::new(e.kind().to_string(), Some(e.span().start.offset))
        }
        _ => CompileError::new(err.to_string(), None),
    }
}

/// A successful match of one path against one pattern.
#[derive(Debug, Clone)]
pub struct PatternMatch<'h> {
    haystack: &'h str,
    locations: CaptureLocations,
    count: usize,
}

impl<'h> PatternMatch<'h> {
    /// The path that was matched.
    pub fn path(&self) -> &'h str {
        self.haystack
    }

    /// One more than the highest participating capture group.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Byte span of group `index` in the path, if it participated.
    pub fn span(&self, index: usize) -> Option<(usize, usize)> {
        self.locations.get(index)
    }

    /// Substring captured by group `index`; `None` if it did not participate.
    pub fn get(&self, index: usize) -> Option<&'h str> {
        self.locations
            .get(index)
            .map(|(start, end)| &self.haystack[start..end])
    }

    /// Captured substrings for groups `1..count`.
    pub fn segments(&self) -> Segments<'_> {
        Segments {
            haystack: self.haystack,
            locations: &self.locations,
            next: 1,
            end: self.count,
        }
    }
}

/// Iterator over positional captures. Clone it to restart.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    haystack: &'a str,
    locations: &'a CaptureLocations,
    next: usize,
    end: usize,
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let index = self.next;
        self.next += 1;
        Some(slice(self.haystack, self.locations, index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end.saturating_sub(self.next);
        (n, Some(n))
    }
}

impl ExactSizeIterator for Segments<'_> {}

/// Iterator over named captures in group-index order. Clone it to restart.
#[derive(Debug, Clone)]
pub struct Vars<'a> {
    names: std::iter::Enumerate<CaptureNames<'a>>,
    haystack: &'a str,
    locations: &'a CaptureLocations,
}

impl<'a> Iterator for Vars<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        for (index, name) in self.names.by_ref() {
            if let Some(name) = name {
                return Some((name, slice(self.haystack, self.locations, index)));
            }
        }
        None
    }
}

// Unset groups read as empty.
fn slice<'a>(haystack: &'a str, locations: &CaptureLocations, index: usize) -> &'a str {
    locations
        .get(index)
        .map_or("", |(start, end)| &haystack[start..end])
}
