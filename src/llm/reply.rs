use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::models::{Category, Finding};

static BLOCK_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*{0,2}Response\*{0,2}:").expect("valid block start regex"));

static BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)^\*{0,2}Response\*{0,2}:\*{0,2}\s*["“](.*)["”]\s*\*{0,2}Category\*{0,2}:\*{0,2}\s*([23])\b.*?\*{0,2}Reason\*{0,2}:\*{0,2}\s*(.*?)(?:\n[ \t]*\n|---|\z)"#,
    )
    .expect("valid block regex")
});

/// Parse one classifier reply into findings, in reply order
///
/// The reply is made of repeated blocks:
///
/// ```text
/// Response: "<quoted excerpt>"
/// Category: <2|3>
/// Reason: <free text>
/// ```
///
/// A reason ends at a blank line, a `---` separator, or the end of the reply.
/// The reply is cut at every `Response:` label before matching, so a block
/// that does not match the grammar is skipped on its own.
pub fn parse_reply(reply: &str) -> Vec<Finding> {
    let starts: Vec<usize> = BLOCK_START.find_iter(reply).map(|m| m.start()).collect();
    let mut findings = Vec::with_capacity(starts.len());

    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(reply.len());
        let chunk = &reply[start..end];

        match parse_block(chunk) {
            Some(finding) => findings.push(finding),
            None => debug!("Skipping malformed reply block: {:?}", preview(chunk)),
        }
    }

    findings
}

fn parse_block(chunk: &str) -> Option<Finding> {
    let caps = BLOCK.captures(chunk)?;

    let excerpt = caps.get(1)?.as_str().trim();
    let code: u8 = caps.get(2)?.as_str().parse().ok()?;
    let category = Category::try_from(code).ok()?;
    let reason = caps.get(3)?.as_str().trim();

    if excerpt.is_empty() {
        return None;
    }

    Some(Finding::new(excerpt, category, reason))
}

fn preview(chunk: &str) -> String {
    chunk.chars().take(80).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_blocks() {
        let reply = r#"---
Response: "We don't break that out. It's something we look at holistically."
Category: 3
Reason: Refuses to give the segment margin the analyst asked for.

---
Response: "We feel good about the trajectory."
Category: 2
Reason: Generic confidence with no figures."#;

        let findings = parse_reply(reply);

        assert_eq!(findings.len(), 2);
        assert_eq!(
            findings[0].excerpt,
            "We don't break that out. It's something we look at holistically."
        );
        assert_eq!(findings[0].category, Category::Clearly);
        assert_eq!(
            findings[0].reason,
            "Refuses to give the segment margin the analyst asked for."
        );
        assert_eq!(findings[1].category, Category::Somewhat);
        assert_eq!(findings[1].reason, "Generic confidence with no figures.");
    }

    #[test]
    fn test_malformed_block_missing_category_is_dropped() {
        let reply = r#"Response: "First excerpt."
Category: 2
Reason: First reason.

Response: "Second excerpt without a category."
Reason: This block is malformed.

Response: "Third excerpt."
Category: 3
Reason: Third reason."#;

        let findings = parse_reply(reply);

        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].excerpt, "First excerpt.");
        assert_eq!(findings[1].excerpt, "Third excerpt.");
        assert_eq!(findings[1].category, Category::Clearly);
    }

    #[test]
    fn test_reason_stops_at_separator() {
        let reply = "Response: \"A.\" Category: 2 Reason: short reason---Response: \"B.\" Category: 3 Reason: other";
        let findings = parse_reply(reply);

        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].reason, "short reason");
        assert_eq!(findings[1].reason, "other");
    }

    #[test]
    fn test_reason_stops_at_blank_line() {
        let reply = "Response: \"A.\"\nCategory: 2\nReason: first line\n\nTrailing commentary from the model.";
        let findings = parse_reply(reply);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].reason, "first line");
    }

    #[test]
    fn test_invalid_category_is_dropped() {
        let reply = "Response: \"A.\"\nCategory: 1\nReason: not on the rubric";
        assert!(parse_reply(reply).is_empty());
    }

    #[test]
    fn test_tolerates_formatting_drift() {
        let reply = "**Response:** “We'll see how it plays out.”\n**Category:** 3 (clearly evasive)\n**Reason:** Declines to forecast.";
        let findings = parse_reply(reply);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].excerpt, "We'll see how it plays out.");
        assert_eq!(findings[0].category, Category::Clearly);
        assert_eq!(findings[0].reason, "Declines to forecast.");
    }

    #[test]
    fn test_excerpt_may_contain_quotes() {
        let reply = "Response: \"We call it \"disciplined growth\" internally.\"\nCategory: 2\nReason: Label instead of numbers.";
        let findings = parse_reply(reply);

        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].excerpt,
            "We call it \"disciplined growth\" internally."
        );
    }

    #[test]
    fn test_no_blocks() {
        assert!(parse_reply("None of the statements are evasive.").is_empty());
        assert!(parse_reply("").is_empty());
    }
}
