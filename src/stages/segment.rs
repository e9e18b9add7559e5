use std::sync::LazyLock;

use regex::Regex;

use crate::models::SpeakerTurn;

/// Minimum trimmed length (exclusive) for a line to count as a speaker turn
pub const MIN_TURN_CHARS: usize = 15;

/// Speaker roles that are not company management
pub const EXCLUDED_ROLES: [&str; 6] = [
    "operator",
    "analyst",
    "moderator",
    "host",
    "coordinator",
    "caller",
];

static EXCLUDED_ROLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b({})\b", EXCLUDED_ROLES.join("|")))
        .expect("valid excluded role regex")
});

/// Split a raw transcript into management-only speaker turns
///
/// A line is a turn when it contains `:` and its trimmed length exceeds
/// `MIN_TURN_CHARS`. Turns whose label (the text before the first `:`)
/// names an excluded role are dropped. Output follows input line order.
pub fn segment_transcript(content: &str) -> Vec<SpeakerTurn> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| is_candidate(line))
        .filter_map(|line| {
            let (label, text) = line.split_once(':')?;
            if is_excluded_label(label) {
                None
            } else {
                Some(SpeakerTurn::new(label.trim(), text.trim()))
            }
        })
        .collect()
}

/// Whether a trimmed line qualifies as a candidate turn
pub fn is_candidate(line: &str) -> bool {
    line.contains(':') && line.chars().count() > MIN_TURN_CHARS
}

/// Whether a speaker label names a non-management role
pub fn is_excluded_label(label: &str) -> bool {
    EXCLUDED_ROLE.is_match(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSCRIPT: &str = "\
Operator: Good day and welcome to the second quarter earnings call.
Kelly Ortberg: Thanks, everyone, for joining us this morning.
Brian West: Revenue was $16.9 billion for the quarter.
Ron Epstein - Analyst: Can you talk about the 737 production rate?
Kelly Ortberg: We're not going to get into a specific rate today.
MODERATOR: Next question please, from the line of Sheila.
Short: line
No separator on this reasonably long line at all
   Brian West:    We continue to expect positive free cash flow.   
Conference Host: Please go ahead with your question.";

    #[test]
    fn test_segment_keeps_management_only() {
        let turns = segment_transcript(TRANSCRIPT);
        let labels: Vec<&str> = turns.iter().map(|t| t.speaker_label.as_str()).collect();

        assert_eq!(
            labels,
            vec!["Kelly Ortberg", "Brian West", "Kelly Ortberg", "Brian West"]
        );
        assert_eq!(turns[3].text, "We continue to expect positive free cash flow.");
    }

    #[test]
    fn test_segment_count_matches_predicate() {
        let candidates: Vec<&str> = TRANSCRIPT
            .lines()
            .map(str::trim)
            .filter(|l| is_candidate(l))
            .collect();
        let excluded = candidates
            .iter()
            .filter(|l| is_excluded_label(l.split(':').next().unwrap_or("")))
            .count();

        assert_eq!(
            segment_transcript(TRANSCRIPT).len(),
            candidates.len() - excluded
        );
    }

    #[test]
    fn test_length_threshold_is_exclusive() {
        // exactly 15 characters after trimming
        assert!(!is_candidate("CEO: abcdefghij"));
        assert!(is_candidate("CEO: abcdefghijk"));
    }

    #[test]
    fn test_role_match_is_whole_word_and_case_insensitive() {
        assert!(is_excluded_label("OPERATOR"));
        assert!(is_excluded_label("Jane Roe, Analyst, Morgan Stanley"));
        assert!(!is_excluded_label("Hostetler"));
        assert!(!is_excluded_label("Chief Operating Officer"));
    }

    #[test]
    fn test_only_first_colon_splits() {
        let turns = segment_transcript("CFO: Margins were 12.5% at 10:30 on the day.");
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].speaker_label, "CFO");
        assert_eq!(turns[0].text, "Margins were 12.5% at 10:30 on the day.");
    }

    #[test]
    fn test_empty_transcript() {
        assert!(segment_transcript("").is_empty());
        assert!(segment_transcript("Operator: Welcome to the call everyone.").is_empty());
    }
}
