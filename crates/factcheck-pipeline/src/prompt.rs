//! Prompts for the generation and verification models

use factcheck_domain::{ChatMessage, Claim};

/// Tag wrapping each generated claim
pub const FACT_TAG: &str = "fact";

/// Tag wrapping the verification verdict
pub const RESULT_TAG: &str = "result";

const VERIFICATION_INSTRUCTIONS: &str = "You are a fact checker. Verify if the following fact is true.
At the end of your response you must respond with ONLY this exact XML format:
<result>true</result>
or
<result>false</result>
No other text, explanation, or formatting is allowed.";

/// System and user messages asking for `count` tagged facts about `topic`
pub fn generation_messages(topic: &str, count: usize) -> Vec<ChatMessage> {
    let system = format!(
        "Generate exactly {count} interesting facts about {topic}.
Format each fact on a new line with a simple XML tag like this:
<{FACT_TAG}>First interesting fact here</{FACT_TAG}>
<{FACT_TAG}>Second interesting fact here</{FACT_TAG}>
<{FACT_TAG}>Third interesting fact here</{FACT_TAG}>
Only include the facts with tags, one per line, nothing else."
    );

    vec![
        ChatMessage::system(system),
        ChatMessage::user(generation_request(topic, count)),
    ]
}

/// User message of a generation request
pub fn generation_request(topic: &str, count: usize) -> String {
    format!("List {} facts about {}", count, topic)
}

/// System and user messages asking for a boolean verdict on `claim`
pub fn verification_messages(claim: &Claim) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(VERIFICATION_INSTRUCTIONS),
        ChatMessage::user(verification_request(claim)),
    ]
}

/// User message of a verification request
pub fn verification_request(claim: &Claim) -> String {
    format!("Verify this fact: {}", claim)
}
