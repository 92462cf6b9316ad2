//! Extraction prompt.
//!
//! [`build_prompt`] is a pure function of the question and the context block:
//! the same inputs always produce the same bytes.

/// Build the extraction prompt for `question` over `context`.
///
/// The instructions come first (task, extraction rules, output shape) and
/// the context block is appended verbatim at the end.
pub fn build_prompt(question: &str, context: &str) -> String {
    let mut prompt = String::with_capacity(context.len() + 1024);

    prompt.push_str("You are a technical assistant for vehicle repair manuals. ");
    prompt.push_str(&format!(
        "Extract ALL specifications for: '{}'.\n\n",
        question
    ));

    prompt.push_str("CRITICAL INSTRUCTIONS:\n");
    prompt.push_str(
        "1. Torque tables: values follow the pattern Nm -> lb-ft -> lb-in, in that order.\n",
    );
    prompt.push_str(
        "2. Fluids and parts: if no unit exists (for example a part number), set \"unit\" to null. Never omit or guess it.\n",
    );
    prompt.push_str(
        "3. General: extract EVERY row in the context, do not drop any. Clean up values so \"value\" holds numbers only for torque (no unit suffix).\n\n",
    );

    prompt.push_str("Output JSON only, as a single object with one key \"specs\":\n");
    prompt.push_str(
        "{ \"specs\": [ { \"component\": \"...\", \"spec_type\": \"...\", \"value\": \"...\", \"unit\": \"...\" } ] }\n",
    );
    prompt.push_str("If nothing matches, return { \"specs\": [] }\n\n");

    prompt.push_str("Context:\n");
    prompt.push_str(context);
    prompt.push('\n');

    prompt
}
