//! Blank-line normalization for rendered markdown
//!
//! Rendered section text arrives from the templating engine with uneven
//! spacing: collapsed prose, leftover control-flow tags, generated lists.
//! [`normalize`] settles it into the paragraph-per-blank-line convention
//! markdown renderers expect, without touching the template syntax it does
//! not control.

use once_cell::sync::Lazy;
use regex::Regex;

/// Whole-line `{% ... %}` control tag (for/endfor, if/elif/else/endif, ...)
static CONTROL_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\{%.*%\}\s*$").expect("control tag pattern"));

/// Whole-line block helper: `{{#each items}}`, `{{/each}}`, `{{else}}`
static BLOCK_HELPER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\{\{\s*(?:[#/][A-Za-z_][\w.]*[^}]*|else)\s*\}\}\s*$")
        .expect("block helper pattern")
});

/// List item whose entire visible content is one variable placeholder
static VARIABLE_ITEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[-*+]\s*\{\{\s*[A-Za-z_][\w.]*\s*\}\}\s*$").expect("variable item pattern")
});

/// Whether a line must stay visually compact with its neighbors
///
/// True for templating control tags and for list items that render one
/// variable each; spreading those apart would break generated loops and
/// lists.
#[must_use]
pub fn is_control_line(line: &str) -> bool {
    CONTROL_TAG.is_match(line) || BLOCK_HELPER.is_match(line) || VARIABLE_ITEM.is_match(line)
}

/// Normalize blank-line spacing in rendered text
///
/// Collapses any run of two or more blank lines to exactly one, then inserts
/// a blank line between adjacent non-blank lines unless either line is a
/// control line (see [`is_control_line`]). Lines already next to a blank
/// line are left untouched.
///
/// Pure and total: idempotent for all input, and the empty string maps to
/// itself. Callers that require non-empty content should check before
/// calling.
#[must_use]
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut out: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if matches!(out.last(), Some(last) if last.is_empty()) {
                continue;
            }
            out.push("");
        } else {
            if let Some(last) = out.last() {
                if !last.is_empty() && !is_control_line(last) && !is_control_line(line) {
                    out.push("");
                }
            }
            out.push(line);
        }
    }

    let mut result = out.join("\n");
    if text.ends_with('\n') {
        result.push('\n');
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn collapses_blank_runs_to_one() {
        assert_eq!(normalize("a\n\n\n\nb\n"), "a\n\nb\n");
    }

    #[test]
    fn separates_adjacent_prose_lines() {
        assert_eq!(normalize("first paragraph\nsecond paragraph\n"), "first paragraph\n\nsecond paragraph\n");
    }

    #[test]
    fn existing_single_blank_is_untouched() {
        assert_eq!(normalize("a\n\nb\n"), "a\n\nb\n");
    }

    #[test]
    fn control_tags_stay_compact() {
        let block = "{% for item in items %}\n- {{ item }}\n{% endfor %}\n";
        assert_eq!(normalize(block), block);
    }

    #[test]
    fn conditional_branches_stay_compact() {
        let block = "{% if urgent %}\nEscalate now.\n{% elif stale %}\nClose it.\n{% else %}\nQueue it.\n{% endif %}\n";
        assert_eq!(normalize(block), block);
    }

    #[test]
    fn block_helpers_stay_compact() {
        let block = "{{#each steps}}\n- {{ step }}\n{{/each}}\n";
        assert_eq!(normalize(block), block);
    }

    #[test]
    fn variable_only_items_stay_compact() {
        let list = "- {{ first }}\n- {{ second }}\n- {{ third }}\n";
        assert_eq!(normalize(list), list);
    }

    #[test]
    fn literal_list_items_are_spread_apart() {
        assert_eq!(normalize("- one\n- two\n"), "- one\n\n- two\n");
    }

    #[test]
    fn prose_next_to_control_is_not_separated() {
        let text = "Steps below.\n{% for s in steps %}\n- {{ s }}\n{% endfor %}\nDone.\n";
        assert_eq!(normalize(text), text);
    }

    #[test]
    fn empty_input_maps_to_itself() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn idempotent_on_mixed_content() {
        let text = "intro\nmore intro\n\n\n{% if a %}\n- {{ a }}\n{% endif %}\ntail\n";
        let once = normalize(text);
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn inline_placeholder_in_prose_is_not_a_control_line() {
        assert!(!is_control_line("deploy {{ service }} to prod"));
        assert!(!is_control_line("- {{ item }} with trailing words"));
        assert!(is_control_line("  - {{ item }}  "));
        assert!(is_control_line("{%- for x in xs -%}"));
    }
}
