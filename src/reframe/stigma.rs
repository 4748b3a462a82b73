use anyhow::{Context, Result};
use serde::Deserialize;

use super::types::{StigmaAnalysis, StigmaCategory};
use crate::llm::LlmClient;
use crate::llm::json::parse_json_answer;

const SYSTEM_PROMPT: &str = r#"
You detect stigmatizing language about people who use drugs or live with a substance use disorder.
Stigma takes one of four forms:
- Labeling: derogatory or identity-defining labels such as "addict", "junkie" or "abuser".
- Stereotyping: generalizations that people who use drugs are dangerous, weak or immoral.
- Separation: language that sets people who use drugs apart as "them" versus "us".
- Discrimination: language endorsing unfair treatment or exclusion.
Person-first, clinical language (for example "person with a substance use disorder") is not stigmatizing.
Respond only with a JSON object of the form:
{"is_stigmatizing": true or false, "category": "Labeling" | "Stereotyping" | "Separation" | "Discrimination" | null, "explanation": "<one short sentence>"}
"#;

#[derive(Deserialize)]
struct RawStigmaAnalysis {
    is_stigmatizing: bool,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    explanation: String,
}

fn user_prompt(text: &str) -> String {
    format!("Analyze the following text for stigmatizing language.\n\nText: {text}")
}

/// First recognized category of a possibly compound answer such as
/// `"Labeling, Stereotyping"`.
fn parse_category(name: &str) -> Result<StigmaCategory> {
    name.split([',', '/', '|', ';', '&'])
        .find_map(|part| part.parse::<StigmaCategory>().ok())
        .map_or_else(|| name.parse::<StigmaCategory>(), Ok)
}

fn into_analysis(raw: RawStigmaAnalysis) -> Result<StigmaAnalysis> {
    let category = match raw.category.as_deref().map(str::trim) {
        Some("") | None => None,
        Some(_) if !raw.is_stigmatizing => None,
        Some(name) => Some(
            parse_category(name)
                .with_context(|| format!("Unexpected stigma analysis: {}", raw.explanation))?,
        ),
    };

    Ok(StigmaAnalysis {
        is_stigmatizing: raw.is_stigmatizing,
        category,
        explanation: raw.explanation.trim().to_string(),
    })
}

pub async fn analyze_stigma(client: &LlmClient, text: &str) -> Result<StigmaAnalysis> {
    let output = client.complete(SYSTEM_PROMPT, &user_prompt(text)).await?;
    let raw: RawStigmaAnalysis = parse_json_answer(&output)?;
    into_analysis(raw).with_context(|| format!("LLM output: {output}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(is_stigmatizing: bool, category: Option<&str>) -> RawStigmaAnalysis {
        RawStigmaAnalysis {
            is_stigmatizing,
            category: category.map(str::to_string),
            explanation: " because ".to_string(),
        }
    }

    #[test]
    fn category_is_parsed_when_stigmatizing() {
        let analysis = into_analysis(raw(true, Some("stereotyping"))).unwrap();
        assert_eq!(analysis.category, Some(StigmaCategory::Stereotyping));
        assert_eq!(analysis.explanation, "because");
    }

    #[test]
    fn category_dropped_when_not_stigmatizing() {
        let analysis = into_analysis(raw(false, Some("Labeling"))).unwrap();
        assert_eq!(analysis.category, None);
    }

    #[test]
    fn blank_category_is_none() {
        let analysis = into_analysis(raw(true, Some("  "))).unwrap();
        assert_eq!(analysis.category, None);
    }

    #[test]
    fn compound_category_takes_first_known() {
        let analysis = into_analysis(raw(true, Some("Labeling, Stereotyping"))).unwrap();
        assert_eq!(analysis.category, Some(StigmaCategory::Labeling));

        let analysis = into_analysis(raw(true, Some("Shaming / Separation"))).unwrap();
        assert_eq!(analysis.category, Some(StigmaCategory::Separation));
    }

    #[test]
    fn unknown_category_is_an_error() {
        assert!(into_analysis(raw(true, Some("Shaming, Blaming"))).is_err());
        assert!(into_analysis(raw(true, Some("Shaming"))).is_err());
    }
}
