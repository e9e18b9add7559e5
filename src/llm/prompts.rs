use crate::models::SpeakerTurn;

/// System role for batch classification requests
pub const SYSTEM_PROMPT: &str = "You are an expert earnings call analyst.";

/// Fixed rubric for evasiveness detection
///
/// The output format section must stay in step with the grammar in `reply.rs`.
pub const EVASIVENESS_RUBRIC: &str = r#"You are a forensic analyst specializing in executive communication.

Below are statements made by company management during an earnings call. Each statement may respond to a question from an analyst.

Your task is to identify **only those speaker turns that show evasiveness**. For each speaker turn, carefully read the full text and evaluate whether the speaker is:

1. Avoiding or refusing to answer a direct question
2. Providing vague or overly generalized statements without specifics
3. Shifting blame, deflecting responsibility, or overstating confidence without justification
4. Contradicting earlier disclosed facts or using ambiguous qualifiers

For each evasive case, return:
---
Response: The **most relevant 2-3 consecutive sentences** that reflect the evasiveness (not random fragments)
Category:
- 2 = Somewhat evasive - vague or generic but at least partially addresses the topic
- 3 = Clearly evasive - refuses to answer, contradicts info, or uses avoidance tactics
Reason: A **specific and concise explanation** of why the excerpt is evasive. Mention what information was avoided, what ambiguity exists, or what signals a lack of transparency.

Output format should be:
---
Response: "..."
Category: 2
Reason: ...

If no part of the speaker turn is evasive, skip it."#;

/// Build the user prompt for one batch of management turns
pub fn build_batch_prompt(turns: &[SpeakerTurn]) -> String {
    let mut prompt = String::with_capacity(EVASIVENESS_RUBRIC.len() + turns.len() * 200);

    prompt.push_str(EVASIVENESS_RUBRIC);
    prompt.push_str("\n\nStatements:\n");

    for (i, turn) in turns.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", i + 1, turn.render()));
    }

    prompt
}

/// Build the prompt asking the model for a company's ticker
pub fn build_ticker_prompt(company_name: &str) -> String {
    format!(
        "What is the FMP-compatible ticker for this company: '{}'? Return only the ticker symbol.",
        company_name
    )
}
