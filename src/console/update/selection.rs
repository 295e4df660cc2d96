//! console/update/selection.rs
//! TagSelection: which semantic tags this run looks at.

use anyhow::Result;

use super::super::terminal::Terminal;
use super::super::view;
use crate::core::types::SemanticTag;

/// Keep every valid registry key, in the order typed, once.
pub(crate) fn parse_selection(input: &str) -> Vec<SemanticTag> {
    let mut out = Vec::new();
    for tag in input.split_whitespace().filter_map(SemanticTag::from_key) {
        if !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

/// Show the menu and ask until at least one tag is picked.
pub(crate) fn select_tags(term: &mut dyn Terminal) -> Result<Vec<SemanticTag>> {
    view::tag_menu(term);

    loop {
        let input = term.prompt("\nYour selection: ")?;
        let tags = parse_selection(&input);
        if !tags.is_empty() {
            let labels: Vec<&str> = tags.iter().map(|t| t.label()).collect();
            term.say(&format!("\nSelected fields: {}", labels.join(", ")));
            return Ok(tags);
        }
        term.say("Error: No valid tags selected. Please try again.");
    }
}
