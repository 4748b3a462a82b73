use anyhow::Result;
use serde_json::{Map, Value};

use super::types::StyleProfile;
use crate::llm::LlmClient;
use crate::llm::json::parse_json_answer;

const SYSTEM_PROMPT: &str = r#"
You describe the writing style of a text so that a rewrite can preserve it.
Describe these attributes with a short word or phrase each:
tone, formality, lexical_diversity, sentence_structure, perspective, vocabulary.
Respond only with a flat JSON object mapping each attribute name to its description, for example:
{"tone": "neutral", "formality": "informal", "lexical_diversity": "moderate", "sentence_structure": "short declarative sentences", "perspective": "first person", "vocabulary": "everyday"}
"#;

fn user_prompt(text: &str) -> String {
    format!("Describe the writing style of the following text.\n\nText: {text}")
}

pub async fn retrieve_style_instruction(client: &LlmClient, text: &str) -> Result<StyleProfile> {
    let output = client.complete(SYSTEM_PROMPT, &user_prompt(text)).await?;
    let object: Map<String, Value> = parse_json_answer(&output)?;
    Ok(StyleProfile::from_json_object(object))
}
