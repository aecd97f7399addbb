//! Scene and segue extraction from `.storyboard` files.
//!
//! Storyboards are Interface Builder XML documents, but the generators need
//! only three facts from them: whether the storyboard declares an initial
//! view controller, which scenes carry a `storyboardIdentifier`, and which
//! segues carry an `identifier`. This module scans for exactly those
//! attributes rather than parsing the document model.
//!
//! Identifiers are returned in document order with XML entities decoded;
//! the scanner dedups and sorts downstream.

/// What a storyboard exposes to generated code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryboardGraph {
    /// Set when the document element names an `initialViewController`.
    pub has_initial_scene: bool,
    /// `storyboardIdentifier` attribute values, document order.
    pub scene_identifiers: Vec<String>,
    /// `identifier` attribute values of `<segue>` tags, document order.
    pub segue_identifiers: Vec<String>,
}

/// Extract the scene graph facts from storyboard XML text.
pub fn parse(content: &str) -> StoryboardGraph {
    StoryboardGraph {
        has_initial_scene: !attribute_values(content, "initialViewController").is_empty(),
        scene_identifiers: attribute_values(content, "storyboardIdentifier"),
        segue_identifiers: segue_identifiers(content),
    }
}

/// All values of `name="…"` attributes anywhere in the document.
fn attribute_values(content: &str, name: &str) -> Vec<String> {
    let needle = format!("{name}=\"");
    let mut values = Vec::new();
    let mut rest = content;

    while let Some(pos) = rest.find(&needle) {
        // Reject longer attribute names that merely end with ours
        // (e.g. `restorationIdentifier` when scanning for `identifier`).
        let preceded_ok = pos == 0
            || rest[..pos]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_whitespace() || c == '<');
        let after = &rest[pos + needle.len()..];
        match after.find('"') {
            Some(end) => {
                if preceded_ok {
                    values.push(decode_entities(&after[..end]));
                }
                rest = &after[end + 1..];
            }
            None => break,
        }
    }

    values
}

/// `identifier` values scoped to `<segue` tags only.
fn segue_identifiers(content: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut rest = content;

    while let Some(pos) = rest.find("<segue") {
        let tag_start = &rest[pos..];
        let tag_end = tag_start.find('>').unwrap_or(tag_start.len());
        let tag = &tag_start[..tag_end];
        values.extend(attribute_values(tag, "identifier"));
        rest = &tag_start[tag_end..];
        if rest.is_empty() {
            break;
        }
        rest = &rest[1..];
    }

    values
}

/// Decode the five predefined XML entities.
fn decode_entities(value: &str) -> String {
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
