//! Ordered section model
//!
//! A document is a flat list of [`Segment`]s: an optional unheaded preamble
//! followed by `## `-headed sections. Parsing is tolerant: content without
//! a well-formed marker is retained as opaque text so that hand-edited
//! files survive a parse/serialize cycle without loss.

use indexmap::IndexMap;
use serde::Serialize;

/// How incoming section text combines with an existing section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Overwrite the section body; create the section if absent
    Replace,
    /// Concatenate to the existing body; behaves as `Replace` if absent
    Append,
}

/// One parsed unit: a headed section, or the unheaded preamble
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    heading: Option<String>,
    body: String,
}

impl Segment {
    /// Heading text as written, `None` for the preamble
    #[inline]
    #[must_use]
    pub fn heading(&self) -> Option<&str> {
        self.heading.as_deref()
    }

    /// Section body with outer blank lines trimmed
    #[inline]
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Lookup key derived from the heading, `None` for the preamble
    #[inline]
    #[must_use]
    pub fn key(&self) -> Option<String> {
        self.heading.as_deref().map(section_key)
    }
}

/// Derive a section lookup key from a heading
///
/// Lowercases and joins alphanumeric runs with single dashes, so
/// `"Implementation Plan"` and `"implementation-plan"` address the same
/// section.
#[must_use]
pub fn section_key(heading: &str) -> String {
    let mut key = String::new();
    let mut pending_gap = false;
    for ch in heading.trim().chars() {
        if ch.is_alphanumeric() {
            if pending_gap && !key.is_empty() {
                key.push('-');
            }
            pending_gap = false;
            key.extend(ch.to_lowercase());
        } else {
            pending_gap = true;
        }
    }
    key
}

/// Ordered collection of named sections over markdown text
///
/// Invariants:
/// - segment order is insertion order and survives merges;
/// - serialization joins segments with exactly one blank line;
/// - `parse(serialize(d))` reproduces `d`'s keys, order and bodies.
///
/// Section bodies are opaque. A body that itself contains a top-level `## `
/// line outside a code fence will split on the next parse; callers own that
/// content and the format makes no attempt to escape it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SectionDocument {
    segments: Vec<Segment>,
}

impl SectionDocument {
    /// Empty document
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse markdown text into ordered segments
    ///
    /// Splits on `## ` markers at fence depth zero; markers inside fenced
    /// code blocks are body text. Leading unheaded content becomes the
    /// preamble. Malformed or absent markers are not errors.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut segments: Vec<Segment> = Vec::new();
        let mut heading: Option<String> = None;
        let mut lines: Vec<&str> = Vec::new();
        let mut in_fence = false;

        for line in text.lines() {
            if !in_fence {
                if let Some(h) = marker_heading(line) {
                    flush(&mut segments, heading.take(), &lines);
                    lines.clear();
                    heading = Some(h.to_string());
                    continue;
                }
            }
            if is_fence_delimiter(line) {
                in_fence = !in_fence;
            }
            lines.push(line);
        }
        flush(&mut segments, heading, &lines);

        Self { segments }
    }

    /// Merge section text under `heading`
    ///
    /// Matches an existing section by [`section_key`] (first match wins when
    /// a hand-edited file carries duplicates); otherwise appends a new
    /// section at the end with `heading` as written. Existing segment order
    /// is never disturbed.
    pub fn merge(&mut self, heading: &str, text: &str, mode: MergeMode) {
        let key = section_key(heading);
        let incoming = trim_blank_edges(text).to_string();

        if let Some(seg) = self
            .segments
            .iter_mut()
            .find(|s| s.key().as_deref() == Some(key.as_str()))
        {
            match mode {
                MergeMode::Replace => seg.body = incoming,
                MergeMode::Append => {
                    if seg.body.is_empty() {
                        seg.body = incoming;
                    } else if !incoming.is_empty() {
                        seg.body.push_str("\n\n");
                        seg.body.push_str(&incoming);
                    }
                }
            }
        } else {
            self.segments.push(Segment {
                heading: Some(heading.trim().to_string()),
                body: incoming,
            });
        }
    }

    /// Set or replace the unheaded preamble
    ///
    /// Empty text removes an existing preamble rather than storing an empty
    /// segment, keeping serialization canonical.
    pub fn set_preamble(&mut self, text: &str) {
        let body = trim_blank_edges(text).to_string();
        if body.is_empty() {
            if matches!(self.segments.first(), Some(s) if s.heading.is_none()) {
                self.segments.remove(0);
            }
            return;
        }
        match self.segments.first_mut() {
            Some(seg) if seg.heading.is_none() => seg.body = body,
            _ => self.segments.insert(0, Segment { heading: None, body }),
        }
    }

    /// Serialize segments in order
    ///
    /// Each headed section is written as its marker line, a blank line, then
    /// the body; adjacent segments are separated by exactly one blank line
    /// regardless of stored trailing whitespace. Idempotent:
    /// `serialize(parse(serialize(d))) == serialize(d)`.
    #[must_use]
    pub fn serialize(&self) -> String {
        if self.segments.is_empty() {
            return String::new();
        }
        let parts: Vec<String> = self
            .segments
            .iter()
            .map(|seg| match (&seg.heading, seg.body.is_empty()) {
                (Some(h), true) => format!("## {h}"),
                (Some(h), false) => format!("## {h}\n\n{}", seg.body),
                (None, _) => seg.body.clone(),
            })
            .collect();
        let mut out = parts.join("\n\n");
        out.push('\n');
        out
    }

    /// Body of the section addressed by `key`, if present
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = section_key(key);
        self.segments
            .iter()
            .find(|s| s.key().as_deref() == Some(key.as_str()))
            .map(Segment::body)
    }

    /// Preamble body, if the document has unheaded leading content
    #[must_use]
    pub fn preamble(&self) -> Option<&str> {
        match self.segments.first() {
            Some(seg) if seg.heading.is_none() => Some(seg.body()),
            _ => None,
        }
    }

    /// Keys of headed sections, in document order
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.segments.iter().filter_map(Segment::key).collect()
    }

    /// All segments, in document order
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Headed sections as an ordered key → body map
    #[must_use]
    pub fn to_map(&self) -> IndexMap<String, String> {
        self.segments
            .iter()
            .filter_map(|s| s.key().map(|k| (k, s.body.clone())))
            .collect()
    }

    /// Whether the document has no segments at all
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments, preamble included
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }
}

/// Heading text of a section marker line, if `line` is one
fn marker_heading(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("## ")?;
    let heading = rest.trim();
    if heading.is_empty() {
        None
    } else {
        Some(heading)
    }
}

/// Fenced code block delimiter (``` or ~~~, possibly indented)
fn is_fence_delimiter(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

fn flush(segments: &mut Vec<Segment>, heading: Option<String>, lines: &[&str]) {
    let body = trim_blank_edges(&lines.join("\n")).to_string();
    if heading.is_some() || !body.is_empty() {
        segments.push(Segment { heading, body });
    }
}

/// Strip leading blank lines and all trailing whitespace
///
/// Indentation of the first content line is preserved.
fn trim_blank_edges(text: &str) -> &str {
    let mut rest = text.trim_end();
    loop {
        match rest.split_once('\n') {
            Some((first, tail)) if first.trim().is_empty() => rest = tail,
            _ => break,
        }
    }
    if rest.trim().is_empty() {
        ""
    } else {
        rest
    }
}
