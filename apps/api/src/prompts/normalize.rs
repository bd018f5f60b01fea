//! Flattening applied to the processed completion before it becomes the
//! envelope's user message.

/// Trims, turns each `\n` into a space, then collapses each non-overlapping
/// pair of spaces into one.
///
/// Single pass, not a whitespace normalizer: four spaces become two, and a
/// `\n` next to a space becomes two spaces that the second step folds.
pub fn flatten_content(content: &str) -> String {
    content.trim().replace('\n', " ").replace("  ", " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newlines_become_spaces() {
        assert_eq!(flatten_content("line one\nline two"), "line one line two");
    }

    #[test]
    fn test_trims_outer_whitespace() {
        assert_eq!(flatten_content("\n  {\"summary\": \"x\"}  \n"), "{\"summary\": \"x\"}");
    }

    #[test]
    fn test_double_space_collapses_once() {
        assert_eq!(flatten_content("a  b"), "a b");
    }

    #[test]
    fn test_four_spaces_collapse_to_two() {
        assert_eq!(flatten_content("a    b"), "a  b");
    }

    #[test]
    fn test_three_spaces_collapse_to_two() {
        assert_eq!(flatten_content("a   b"), "a  b");
    }

    #[test]
    fn test_indented_json_lines() {
        let raw = "{\n  \"summary\": \"Login page\",\n  \"requirements\": []\n}";
        assert_eq!(
            flatten_content(raw),
            "{  \"summary\": \"Login page\",  \"requirements\": [] }"
        );
    }

    #[test]
    fn test_idempotent_on_flat_text() {
        let once = flatten_content("already flat text with single spaces");
        assert_eq!(flatten_content(&once), once);
    }

    #[test]
    fn test_carriage_returns_are_kept() {
        assert_eq!(flatten_content("a\r\nb"), "a\r b");
    }
}
