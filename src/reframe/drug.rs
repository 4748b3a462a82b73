use anyhow::Result;

use super::types::DrugClassification;
use crate::llm::LlmClient;
use crate::llm::json::parse_json_answer;

const SYSTEM_PROMPT: &str = r#"
You classify whether a text discusses drugs or substance use.
This includes illicit drugs, misuse of prescription medication, alcohol or drug addiction, and recovery.
Respond only with a JSON object of the form:
{"is_drug_related": true or false, "explanation": "<one short sentence>"}
"#;

fn user_prompt(text: &str) -> String {
    format!("Classify the following text.\n\nText: {text}")
}

pub async fn classify_drug_content(client: &LlmClient, text: &str) -> Result<DrugClassification> {
    let output = client.complete(SYSTEM_PROMPT, &user_prompt(text)).await?;
    let mut classification: DrugClassification = parse_json_answer(&output)?;
    classification.explanation = classification.explanation.trim().to_string();
    Ok(classification)
}
