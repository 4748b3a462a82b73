use anyhow::{Result, bail};

use super::types::StyleProfile;
use crate::llm::LlmClient;

const SYSTEM_PROMPT: &str = r#"
You rewrite text to remove stigmatizing language about people who use drugs.
Replace labels such as "addict" or "junkie" with person-first language, and remove stereotypes or "us versus them" framing.
Keep the original meaning, facts and length as close as possible, and match the described writing style.
If the text contains nothing stigmatizing, return it unchanged.
Return only the rewritten text, without quotes or commentary.
"#;

fn user_prompt(text: &str, explanation: &str, style: &StyleProfile) -> String {
    let mut prompt = String::from("Rewrite the text below.\n\n");
    if !explanation.trim().is_empty() {
        prompt.push_str(&format!("Why it needs rewriting: {}\n", explanation.trim()));
    }
    if !style.is_empty() {
        prompt.push_str("Writing style to keep:\n");
        for (attribute, value) in style.iter() {
            prompt.push_str(&format!("- {attribute}: {value}\n"));
        }
    }
    prompt.push_str(&format!("\nText: {text}"));
    prompt
}

/// Strips one pair of surrounding quotes some models add despite instructions.
fn clean_rewrite(output: &str) -> &str {
    let trimmed = output.trim();
    for (open, close) in [('"', '"'), ('\u{201c}', '\u{201d}')] {
        if let Some(inner) = trimmed
            .strip_prefix(open)
            .and_then(|rest| rest.strip_suffix(close))
            && !inner.contains(open)
        {
            return inner.trim();
        }
    }
    trimmed
}

pub async fn rewrite_text(
    client: &LlmClient,
    text: &str,
    explanation: &str,
    style: &StyleProfile,
) -> Result<String> {
    let output = client
        .complete(SYSTEM_PROMPT, &user_prompt(text, explanation, style))
        .await?;
    let rewritten = clean_rewrite(&output);
    if rewritten.is_empty() {
        bail!("Model returned an empty rewrite. LLM output: {output}");
    }
    Ok(rewritten.to_string())
}
