//! Rendering of lookup results as chat markup.

use dictionary_source::{DefinitionResult, Sense};
use tracing::debug;

/// Render senses as a nested ordered list.
///
/// Only the first definition of a sense is shown. A sense without any
/// definition is skipped together with its examples and subsenses.
pub fn format_senses(senses: &[Sense]) -> String {
    if senses.is_empty() {
        return String::new();
    }

    let mut out = String::from("<ol>");
    for sense in senses {
        let Some(definition) = sense.definitions.first() else {
            debug!(
                "Weird sense encountered: {}",
                serde_json::to_string_pretty(sense).unwrap_or_default()
            );
            continue;
        };

        out.push_str("<li>");
        out.push_str(definition);
        if !sense.examples.is_empty() {
            out.push_str("<br/>");
            for example in &sense.examples {
                out.push_str(&format!("<blockquote><em>{}</em></blockquote>", example));
            }
        }
        out.push_str(&format_senses(&sense.subsenses));
        out.push_str("</li>");
    }
    out.push_str("</ol>");
    out
}

/// Render a full lookup result: headword heading, then one block per entry.
pub fn format_definition(result: &DefinitionResult) -> String {
    let mut out = format!("### {}\n", result.headword);
    for entry in &result.entries {
        out.push_str("***\n");
        out.push_str(&format!("**{}**\n", entry.category));
        out.push_str(&format_senses(&entry.senses));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dictionary_source::Entry;
    use tracing_test::traced_test;

    #[test]
    fn test_empty_senses_render_nothing() {
        assert_eq!(format_senses(&[]), "");
    }

    #[test]
    fn test_sense_without_definitions_keeps_list() {
        let sense = Sense {
            definitions: vec![],
            examples: vec!["ignored".into()],
            subsenses: vec![Sense::defined("also ignored")],
        };
        assert_eq!(format_senses(&[sense]), "<ol></ol>");
    }

    #[traced_test]
    #[test]
    fn test_sense_without_definitions_is_logged() {
        let sense = Sense {
            definitions: vec![],
            examples: vec!["a stray example".into()],
            subsenses: vec![],
        };
        assert_eq!(format_senses(&[Sense::defined("kept"), sense]), "<ol><li>kept</li></ol>");

        assert!(logs_contain("Weird sense encountered"));
    }

    #[test]
    fn test_single_definition() {
        assert_eq!(
            format_senses(&[Sense::defined("a feline")]),
            "<ol><li>a feline</li></ol>"
        );
    }

    #[test]
    fn test_only_first_definition_rendered() {
        let sense = Sense {
            definitions: vec!["first".into(), "second".into()],
            ..Sense::default()
        };
        let out = format_senses(&[sense]);
        assert_eq!(out, "<ol><li>first</li></ol>");
        assert!(!out.contains("second"));
    }

    #[test]
    fn test_examples_in_order() {
        let sense = Sense::defined("run")
            .with_example("one")
            .with_example("two");
        assert_eq!(
            format_senses(&[sense]),
            "<ol><li>run<br/><blockquote><em>one</em></blockquote><blockquote><em>two</em></blockquote></li></ol>"
        );
    }

    #[test]
    fn test_nested_subsenses() {
        let sense = Sense::defined("outer")
            .with_example("ex")
            .with_subsense(Sense::defined("inner"));
        assert_eq!(
            format_senses(&[sense]),
            "<ol><li>outer<br/><blockquote><em>ex</em></blockquote><ol><li>inner</li></ol></li></ol>"
        );
    }

    #[test]
    fn test_definitionless_branch_is_dropped() {
        let orphan_parent = Sense::default().with_subsense(Sense::defined("unreachable"));
        let sibling = Sense::defined("visible");

        let out = format_senses(&[orphan_parent, sibling]);
        assert_eq!(out, "<ol><li>visible</li></ol>");
        assert!(!out.contains("unreachable"));
    }

    #[test]
    fn test_definitionless_subsense_leaves_empty_list() {
        let sense = Sense::defined("outer").with_subsense(Sense::default());
        assert_eq!(format_senses(&[sense]), "<ol><li>outer<ol></ol></li></ol>");
    }

    #[test]
    fn test_definition_heading_only_without_entries() {
        let result = DefinitionResult::new("cat", vec![]);
        assert_eq!(format_definition(&result), "### cat\n");
    }

    #[test]
    fn test_definition_cat() {
        let result = DefinitionResult::new(
            "cat",
            vec![Entry::new(
                "noun",
                vec![Sense::defined("a small domesticated carnivorous mammal")
                    .with_example("the cat sat on the mat")],
            )],
        );

        assert_eq!(
            format_definition(&result),
            "### cat\n***\n**noun**\n<ol><li>a small domesticated carnivorous mammal<br/><blockquote><em>the cat sat on the mat</em></blockquote></li></ol>\n"
        );
    }

    #[test]
    fn test_definition_entries_keep_order() {
        let result = DefinitionResult::new(
            "run",
            vec![
                Entry::new("verb", vec![Sense::defined("move fast")]),
                Entry::new("noun", vec![]),
                Entry::new("verb", vec![Sense::defined("operate")]),
            ],
        );

        let out = format_definition(&result);
        assert_eq!(out.matches("### ").count(), 1);
        assert_eq!(out.matches("***\n").count(), 3);
        assert_eq!(
            out,
            "### run\n***\n**verb**\n<ol><li>move fast</li></ol>\n***\n**noun**\n\n***\n**verb**\n<ol><li>operate</li></ol>\n"
        );
    }
}
