// Prompt fragments sent to the completion endpoint.
// Instruction builders live in prompts::instructions; these are the fixed parts.

/// User message for the processing call. Replace `{raw_text}` before sending.
pub const PROCESSING_USER_TEMPLATE: &str =
    "make this raw text into a more concise, well-structured version of json format:\n\n{raw_text}";

pub fn processing_user_message(raw_text: &str) -> String {
    PROCESSING_USER_TEMPLATE.replace("{raw_text}", raw_text)
}
