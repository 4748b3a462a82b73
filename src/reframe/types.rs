use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DrugClassification {
    pub is_drug_related: bool,
    #[serde(default)]
    pub explanation: String,
}

impl fmt::Display for DrugClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.is_drug_related {
            "drug-related"
        } else {
            "not drug-related"
        };
        write!(f, "{label}")?;
        if !self.explanation.is_empty() {
            write!(f, " ({})", self.explanation)?;
        }
        Ok(())
    }
}

/// Mechanisms by which language stigmatizes people who use drugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StigmaCategory {
    Labeling,
    Stereotyping,
    Separation,
    Discrimination,
}

impl StigmaCategory {
    pub fn name(self) -> &'static str {
        match self {
            StigmaCategory::Labeling => "Labeling",
            StigmaCategory::Stereotyping => "Stereotyping",
            StigmaCategory::Separation => "Separation",
            StigmaCategory::Discrimination => "Discrimination",
        }
    }
}

impl fmt::Display for StigmaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StigmaCategory {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "labeling" | "labelling" => Ok(StigmaCategory::Labeling),
            "stereotyping" => Ok(StigmaCategory::Stereotyping),
            "separation" => Ok(StigmaCategory::Separation),
            "discrimination" => Ok(StigmaCategory::Discrimination),
            other => bail!("Unknown stigma category '{other}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StigmaAnalysis {
    pub is_stigmatizing: bool,
    pub category: Option<StigmaCategory>,
    pub explanation: String,
}

impl StigmaAnalysis {
    /// The `"<Category>: <explanation>"` form `rewrite_text` expects.
    pub fn rewrite_explanation(&self) -> String {
        match self.category {
            Some(category) => format!("{category}: {}", self.explanation),
            None => self.explanation.clone(),
        }
    }
}

impl fmt::Display for StigmaAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_stigmatizing {
            write!(f, "not stigmatizing")?;
        } else {
            write!(f, "stigmatizing")?;
            if let Some(category) = self.category {
                write!(f, " [{category}]")?;
            }
        }
        if !self.explanation.is_empty() {
            write!(f, " ({})", self.explanation)?;
        }
        Ok(())
    }
}

/// Style attributes of a text, such as `tone` or `lexical_diversity`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleProfile(BTreeMap<String, String>);

impl StyleProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, attribute: impl Into<String>, value: impl Into<String>) {
        self.0.insert(attribute.into(), value.into());
    }

    pub fn get(&self, attribute: &str) -> Option<&str> {
        self.0.get(attribute).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Builds a profile from a JSON object, keeping non-string values in JSON form.
    pub fn from_json_object(object: serde_json::Map<String, Value>) -> Self {
        object
            .into_iter()
            .map(|(attribute, value)| {
                let value = match value {
                    Value::String(text) => text.trim().to_string(),
                    other => other.to_string(),
                };
                (attribute, value)
            })
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for StyleProfile
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl fmt::Display for StyleProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        write!(f, "{{{}}}", pairs.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmotionDetection {
    pub emotion: String,
    pub confidence: f64,
    pub explanation: String,
}

impl fmt::Display for EmotionDetection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2})", self.emotion, self.confidence)?;
        if !self.explanation.is_empty() {
            write!(f, ": {}", self.explanation)?;
        }
        Ok(())
    }
}
