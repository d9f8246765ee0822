//! LLM prompts for the summarization pipeline.
//!
//! Every template pins the answer to the target language and forbids
//! meta-reasoning markup; the sanitizer removes whatever slips through.
//! Content placeholders are substituted last so text from the document can
//! never be mistaken for a placeholder.

use sha2::{Digest, Sha256};

/// System message shared by every stage.
pub const SYSTEM_PROMPT: &str = r#"You are a {language}-speaking text processing assistant.
Write every answer in {language} only; do not use any other language.
Use ONLY the material given to you.
IMPORTANT: do not use <think>, <reasoning> or any other meta-reasoning tags.
Do not explain your thoughts. Just give the answer in {language}."#;

/// First-pass summary of one chunk.
pub const LEAF_PROMPT: &str = r#"Summarize this fragment of text in {language} in 5-6 sentences, covering the plot, key events, characters, dialogue and themes.
Fragment: {chunk}

The summary must be concise but keep the plot, key ideas, events and characters.
Level of detail: {level} (1 is the most detailed, higher is more general).
ANSWER ONLY IN {language}, without an introduction or conclusion.
DO NOT use <think>, <reasoning> or other meta-reasoning tags.
Use only the text of the fragment above."#;

/// Rewrite of a draft that drifted out of the target language.
pub const CORRECTION_PROMPT: &str = r#"Rewrite this summary in {language}:
Original summary: {summary}

Rewrite it in pure {language} without words from any other language.
Write 5-6 sentences about the plot, events and characters.
{language} only!"#;

/// Reduction of a small group of summaries into one.
pub const COLLAPSE_PROMPT: &str = r#"Based ONLY on these summaries, write a more general summary in {language}.
Summaries: {summaries}

The summary must combine the plot and key ideas while keeping the sequence of events.
Level of detail: {level}.
ANSWER ONLY IN {language}, in 5-8 sentences.
DO NOT use <think>, <reasoning> or other meta-reasoning tags."#;

/// Narrative stitching of several summaries.
pub const COMBINE_PROMPT: &str = r#"Join the following {language} texts from the Context into one continuous, coherent narrative in {language}.
Keep the order of the texts as the order of events.
Make the output roughly as long as the combined input texts.
Do not add anything that cannot be derived from the Context.
DO NOT use <think>, <reasoning> or other meta-reasoning tags.
Just give the connected text in {language}.
Context:

{context}"#;

/// Reader-facing synthesis of the top summary.
pub const OVERVIEW_PROMPT: &str = r#"Based ONLY on this hierarchical summary, write a complete overview of 10-20 sentences in {language}.
Hierarchical summary: {summary}

The overview must cover the plot, the main themes, the key characters and the turning points.
A reader of the overview must understand the plot, its twists and the key characters.
ANSWER ONLY IN {language}.
DO NOT use <think>, <reasoning> or other meta-reasoning tags."#;

/// Format the shared system prompt.
pub fn format_system_prompt(language: &str) -> String {
    SYSTEM_PROMPT.replace("{language}", language)
}

/// Format the leaf prompt for one chunk.
pub fn format_leaf_prompt(language: &str, level: u32, chunk: &str) -> String {
    LEAF_PROMPT
        .replace("{language}", language)
        .replace("{level}", &level.to_string())
        .replace("{chunk}", chunk)
}

/// Format the correction prompt around a rejected draft.
pub fn format_correction_prompt(language: &str, summary: &str) -> String {
    CORRECTION_PROMPT
        .replace("{language}", language)
        .replace("{summary}", summary)
}

/// Format the collapse prompt; summaries are separated by blank lines.
pub fn format_collapse_prompt(language: &str, level: u32, summaries: &[&str]) -> String {
    COLLAPSE_PROMPT
        .replace("{language}", language)
        .replace("{level}", &level.to_string())
        .replace("{summaries}", &summaries.join("\n\n"))
}

/// Format the combine prompt; texts are separated by blank lines.
pub fn format_combine_prompt(language: &str, texts: &[&str]) -> String {
    COMBINE_PROMPT
        .replace("{language}", language)
        .replace("{context}", &texts.join("\n\n"))
}

/// Format the overview prompt.
pub fn format_overview_prompt(language: &str, summary: &str) -> String {
    OVERVIEW_PROMPT
        .replace("{language}", language)
        .replace("{summary}", summary)
}

/// Fingerprint of every template.
///
/// Stored in reports so runs made with different prompts can be told apart.
pub fn prompt_fingerprint() -> String {
    let mut hasher = Sha256::new();
    for template in [
        SYSTEM_PROMPT,
        LEAF_PROMPT,
        CORRECTION_PROMPT,
        COLLAPSE_PROMPT,
        COMBINE_PROMPT,
        OVERVIEW_PROMPT,
    ] {
        hasher.update(template.as_bytes());
        hasher.update([0u8]);
    }
    format!("{:x}", hasher.finalize())
}
