use anyhow::{Result, ensure};
use serde::Deserialize;

use super::types::EmotionDetection;
use crate::llm::LlmClient;
use crate::llm::json::parse_json_answer;

const SYSTEM_PROMPT: &str = r#"
You identify the dominant emotion expressed in a text.
Use one of: joy, sadness, anger, fear, surprise, disgust, trust, anticipation, neutral.
Respond only with a JSON object of the form:
{"emotion": "<emotion>", "confidence": <number between 0 and 1>, "explanation": "<one short sentence>"}
"#;

#[derive(Deserialize)]
struct RawEmotion {
    emotion: String,
    confidence: f64,
    #[serde(default)]
    explanation: String,
}

fn user_prompt(text: &str) -> String {
    format!("Identify the dominant emotion in the following text.\n\nText: {text}")
}

fn into_detection(raw: RawEmotion) -> Result<EmotionDetection> {
    let emotion = raw.emotion.trim().to_lowercase();
    ensure!(!emotion.is_empty(), "Model returned no emotion label");
    ensure!(
        (0.0..=1.0).contains(&raw.confidence),
        "Emotion confidence {} is outside 0..=1",
        raw.confidence
    );

    Ok(EmotionDetection {
        emotion,
        confidence: raw.confidence,
        explanation: raw.explanation.trim().to_string(),
    })
}

pub async fn detect_emotion(client: &LlmClient, text: &str) -> Result<EmotionDetection> {
    let output = client.complete(SYSTEM_PROMPT, &user_prompt(text)).await?;
    let raw: RawEmotion = parse_json_answer(&output)?;
    into_detection(raw)
}
