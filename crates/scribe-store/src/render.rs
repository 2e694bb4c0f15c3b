//! Rendering seam
//!
//! The templating engine lives outside this crate. Operations hand it a
//! kind, a section key, and the submitted data; whatever comes back is
//! treated as opaque markdown (possibly still carrying control-flow markup,
//! which the formatter preserves).

use serde_json::{Map, Value};

/// Section key under which an artifact's leading, unheaded content is
/// rendered
pub const PREAMBLE_SECTION: &str = "preamble";

/// External template renderer
///
/// `data` is the submitted field data plus an `id` entry injected by the
/// store once the artifact's id is known, so templates can address it.
pub trait SectionRenderer {
    /// Render one section of one kind
    fn render(&self, kind: &str, section: &str, data: &Map<String, Value>) -> String;
}

impl<F> SectionRenderer for F
where
    F: Fn(&str, &str, &Map<String, Value>) -> String,
{
    fn render(&self, kind: &str, section: &str, data: &Map<String, Value>) -> String {
        self(kind, section, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn closures_implement_the_renderer_seam() {
        let renderer =
            |kind: &str, section: &str, _data: &Map<String, Value>| format!("{kind}/{section}");
        let data = json!({}).as_object().cloned().unwrap();
        assert_eq!(renderer.render("ticket", "plan", &data), "ticket/plan");
    }
}
