//! Instructions sent to the semantic classification backend.

/// Eligibility policy. The backend applies it; nothing here is computed locally.
pub const SYSTEM_MESSAGE: &str = "\
You are a strict classifier of image prompts written in social media comments.
ELIGIBLE: describes a drawable scene with a subject and at least one visual detail. May contain a few emojis.
NOT_ELIGIBLE: reactions, compliments, emoji-only or emoji-dominant comments, engagement bait, vague or meta comments.
Respond ONLY with valid JSON. No extra text.";

/// Builds the user message for a batch of `texts`, numbered from 1.
///
/// Texts are embedded as JSON string literals so quotes and newlines inside a
/// comment cannot break the numbering.
pub fn build_user_message<S: AsRef<str>>(texts: &[S]) -> String {
    let n = texts.len();
    let mut msg = String::from("Classify the following texts:\n\n");
    for (i, t) in texts.iter().enumerate() {
        let quoted = serde_json::to_string(t.as_ref()).unwrap_or_else(|_| String::from("\"\""));
        msg.push_str(&format!("{}. {}\n", i + 1, quoted));
    }
    msg.push_str(&format!(
        "\nRules:\n\
         - Return ONLY valid JSON (no markdown, no extra text)\n\
         - The JSON must have exactly {n} items in \"results\"\n\
         - There must be one result per input line, with the same index (1..{n}), in input order\n\
         Return this JSON schema:\n\
         {{\"results\": [{{\"index\": 1, \"eligible\": true, \"reason\": \"short reason\"}}]}}\n"
    ));
    msg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_inputs_from_one_and_states_count() {
        let msg = build_user_message(&["a fox in a hat", "say \"hi\"\nplease"]);
        assert!(msg.contains("1. \"a fox in a hat\"\n"));
        assert!(msg.contains("2. \"say \\\"hi\\\"\\nplease\"\n"));
        assert!(msg.contains("exactly 2 items"));
        assert!(msg.contains("(1..2)"));
        assert!(!msg.contains("3. "));
    }
}
