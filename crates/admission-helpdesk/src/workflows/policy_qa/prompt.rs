pub const INSTRUCTION: &str =
    "Using the following academic eligibility criteria document, answer the user's question.";
pub const POLICY_HEADER: &str = "=== Academic Eligibility Criteria ===";
pub const QUESTION_HEADER: &str = "=== User's Question ===";

/// Single-turn prompt: instruction, policy text, then the question.
pub fn build_prompt(policy_text: &str, question: &str) -> String {
    format!("{INSTRUCTION}\n\n{POLICY_HEADER}\n{policy_text}\n\n{QUESTION_HEADER}\n{question}")
}
