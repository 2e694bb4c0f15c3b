//! Property suites for the document laws: round-trip stability of the
//! section model and idempotence/control-preservation of the normalizer.

use proptest::prelude::*;
use scribe_document::{is_control_line, normalize, SectionDocument};

fn prose_line() -> impl Strategy<Value = String> {
    "[a-z][a-z ]{0,24}".prop_map(|s| s.trim_end().to_string())
}

fn control_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("{% for item in items %}".to_string()),
        Just("{% endfor %}".to_string()),
        Just("{% if cond %}".to_string()),
        Just("{% elif other %}".to_string()),
        Just("{% else %}".to_string()),
        Just("{% endif %}".to_string()),
        Just("- {{ item }}".to_string()),
        Just("* {{ value }}".to_string()),
        Just("{{#each rows}}".to_string()),
        Just("{{/each}}".to_string()),
    ]
}

fn heading() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,8}( [A-Za-z][a-z]{0,8})?"
}

fn body_lines() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![prose_line(), control_line(), Just(String::new())],
        0..6,
    )
}

fn document_text() -> impl Strategy<Value = String> {
    (
        body_lines(),
        prop::collection::vec((heading(), body_lines()), 0..5),
    )
        .prop_map(|(preamble, sections)| {
            let mut text = preamble.join("\n");
            for (heading, lines) in sections {
                text.push_str("\n## ");
                text.push_str(&heading);
                text.push('\n');
                text.push_str(&lines.join("\n"));
            }
            text.push('\n');
            text
        })
}

proptest! {
    /// parse ∘ serialize reproduces the parsed document exactly:
    /// same keys, same order, same bodies.
    #[test]
    fn parse_serialize_round_trip(text in document_text()) {
        let doc = SectionDocument::parse(&text);
        let reparsed = SectionDocument::parse(&doc.serialize());
        prop_assert_eq!(reparsed, doc);
    }

    /// serialize is a fixed point after one parse/serialize cycle.
    #[test]
    fn serialize_is_canonical(text in document_text()) {
        let once = SectionDocument::parse(&text).serialize();
        let twice = SectionDocument::parse(&once).serialize();
        prop_assert_eq!(twice, once);
    }

    /// normalize(normalize(x)) == normalize(x) for arbitrary line soup.
    #[test]
    fn normalize_is_idempotent(lines in prop::collection::vec(
        prop_oneof![prose_line(), control_line(), Just(String::new())],
        0..30,
    )) {
        let text = lines.join("\n");
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    /// normalize never introduces a blank line adjacent to a control line.
    /// Inputs carry no blank lines, so every blank in the output was
    /// inserted by normalize.
    #[test]
    fn inserted_blanks_never_touch_control_lines(lines in prop::collection::vec(
        prop_oneof![prose_line(), control_line()],
        0..30,
    )) {
        let lines: Vec<String> =
            lines.into_iter().filter(|l| !l.trim().is_empty()).collect();
        let text = lines.join("\n");
        let out = normalize(&text);
        let out_lines: Vec<&str> = out.lines().collect();
        for (i, line) in out_lines.iter().enumerate() {
            if line.trim().is_empty() {
                let before = out_lines.get(i.wrapping_sub(1));
                let after = out_lines.get(i + 1);
                prop_assert!(!before.is_some_and(|l| is_control_line(l)));
                prop_assert!(!after.is_some_and(|l| is_control_line(l)));
            }
        }
    }

    /// Collapsing leaves no run of two blank lines anywhere.
    #[test]
    fn no_blank_runs_survive(lines in prop::collection::vec(
        prop_oneof![prose_line(), Just(String::new())],
        0..30,
    )) {
        let text = lines.join("\n");
        let out = normalize(&text);
        prop_assert!(!out.contains("\n\n\n"));
    }
}
