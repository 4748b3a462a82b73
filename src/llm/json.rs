use anyhow::{Result, anyhow};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;

static FENCED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?:json|JSON)?\s*(.*?)\s*```").unwrap());

/// Parses a JSON answer out of model output.
///
/// Tries the trimmed text, then each fenced code block, then the outermost
/// `{...}` span.
pub fn parse_json_answer<T: DeserializeOwned>(output: &str) -> Result<T> {
    let trimmed = output.trim();

    let fenced = FENCED_RE
        .captures_iter(trimmed)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()));
    let braced = match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => Some(&trimmed[start..=end]),
        _ => None,
    };

    let mut last_error = None;
    for candidate in std::iter::once(trimmed).chain(fenced).chain(braced) {
        match serde_json::from_str(candidate) {
            Ok(value) => return Ok(value),
            Err(err) => last_error = Some(err),
        }
    }

    let reason = last_error
        .map(|err| err.to_string())
        .unwrap_or_else(|| "empty output".to_string());
    Err(anyhow!(
        "Model output was not the expected JSON ({reason}). LLM output: {output}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Answer {
        label: bool,
    }

    #[test]
    fn parses_bare_json() {
        let answer: Answer = parse_json_answer(r#" {"label": true} "#).unwrap();
        assert_eq!(answer, Answer { label: true });
    }

    #[test]
    fn parses_fenced_json() {
        let output = "Here you go:\n```json\n{\"label\": false}\n```\nLet me know.";
        let answer: Answer = parse_json_answer(output).unwrap();
        assert_eq!(answer, Answer { label: false });
    }

    #[test]
    fn parses_json_embedded_in_prose() {
        let output = "Sure! The answer is {\"label\": true} based on the text.";
        let answer: Answer = parse_json_answer(output).unwrap();
        assert_eq!(answer, Answer { label: true });
    }

    #[test]
    fn skips_fenced_blocks_that_do_not_match() {
        let output = "```\nnot json\n```\n```json\n{\"label\": true}\n```";
        let answer: Answer = parse_json_answer(output).unwrap();
        assert_eq!(answer, Answer { label: true });
    }

    #[test]
    fn error_carries_raw_output() {
        let err = parse_json_answer::<Answer>("I cannot answer that.").unwrap_err();
        assert!(err.to_string().contains("I cannot answer that."));
    }

    #[test]
    fn wrong_shape_is_an_error() {
        assert!(parse_json_answer::<Answer>(r#"{"label": "maybe"}"#).is_err());
    }
}
