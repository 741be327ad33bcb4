use crate::llm::prompts;
use crate::llm::SourceDocument;

/// Maximum number of characters of file content forwarded to the model.
pub const MAX_FILE_CHARS: usize = 10_000;

/// Ordered prompt segments sent as a single user turn.
pub struct PromptParts {
    pub parts: Vec<String>,
}

/// Two-part prompt: the fixed diff-format preamble, then the literal diff.
/// No size limit is applied; arbitrarily large diffs go through whole.
pub fn diff_summary_prompt(diff: &str) -> PromptParts {
    PromptParts {
        parts: vec![
            prompts::DIFF_SUMMARY.to_owned(),
            format!("Please summarise the following diff file:\n\n{diff}"),
        ],
    }
}

/// Single-part onboarding prompt for a source file. Content beyond
/// MAX_FILE_CHARS is dropped; the path appears only as prompt text.
pub fn file_summary_prompt(doc: &SourceDocument) -> PromptParts {
    let code = truncate_chars(&doc.content, MAX_FILE_CHARS);

    let part = format!(
        "{intro}\n\
         You are onboarding a junior software engineer and explaining to them the purpose of the {source} file.\n\n\
         Here is the code\n\
         ---\n\
         {code}\n\
         ---\n\n\
         Give a summary no more than 100 words of the code above.",
        intro = prompts::FILE_ONBOARDING,
        source = doc.source,
        code = code,
    );

    PromptParts { parts: vec![part] }
}

/// First `max` characters of `s`, never splitting a code point.
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(content: &str, source: &str) -> SourceDocument {
        SourceDocument {
            content: content.to_string(),
            source: source.to_string(),
        }
    }

    #[test]
    fn diff_prompt_is_preamble_then_literal_diff() {
        let diff = "diff --git a/x b/x\n+added line";
        let p = diff_summary_prompt(diff);

        assert_eq!(p.parts.len(), 2);
        assert_eq!(p.parts[0], prompts::DIFF_SUMMARY);
        assert!(p.parts[1].starts_with("Please summarise the following diff file:"));
        assert!(p.parts[1].ends_with(diff));
    }

    #[test]
    fn file_prompt_names_path_and_content() {
        let p = file_summary_prompt(&doc("short file", "a.ts"));

        assert_eq!(p.parts.len(), 1);
        assert!(p.parts[0].contains("a.ts"));
        assert!(p.parts[0].contains("short file"));
    }

    #[test]
    fn content_at_the_limit_is_used_in_full() {
        let content = "x".repeat(MAX_FILE_CHARS);
        let p = file_summary_prompt(&doc(&content, "big.rs"));
        assert!(p.parts[0].contains(&content));
    }

    #[test]
    fn long_content_truncates_to_exactly_the_limit() {
        let content = format!("{}{}", "a".repeat(MAX_FILE_CHARS), "OVERFLOW");
        let p = file_summary_prompt(&doc(&content, "big.rs"));

        assert!(p.parts[0].contains(&"a".repeat(MAX_FILE_CHARS)));
        assert!(!p.parts[0].contains("OVERFLOW"));
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        let s = "é".repeat(6);
        assert_eq!(truncate_chars(&s, 4), "éééé");
        assert_eq!(truncate_chars(&s, 6), s);
        assert_eq!(truncate_chars(&s, 10), s);
    }
}
