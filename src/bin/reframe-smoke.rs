//! Runs each Reframe operation once against OpenAI and prints what comes back.

use std::path::Path;

use anyhow::{Result, anyhow};

use reframe::Reframe;
use reframe::llm::secrets::{DEFAULT_SECRETS_FILE, read_secrets_file};
use reframe::llm::{ApiKey, ClientSettings, ClientType};
use reframe::reframe::StyleProfile;

const SMOKE_KEY_FIELD: &str = "OPENAI_API_KEY_SR";
const TEST_TEXT: &str = "this is for testing";
const SAMPLE_EXPLANATION: &str = "Labeling: Contains stigmatizing labels";

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{:?}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = Path::new(DEFAULT_SECRETS_FILE);
    let secrets = read_secrets_file(path)?
        .ok_or_else(|| anyhow!("{} not found", path.display()))?;
    let api_key = secrets
        .get(SMOKE_KEY_FIELD)
        .ok_or_else(|| anyhow!("{SMOKE_KEY_FIELD} missing from {}", path.display()))?;

    let reframe = Reframe::new(
        ApiKey::new(api_key),
        None,
        ClientType::OpenAi,
        &ClientSettings::default(),
    )?;

    let result = reframe.classify_drug_content(TEST_TEXT).await?;
    println!("Drug classification result: {result}");

    let stigma_result = reframe.analyze_stigma(TEST_TEXT).await?;
    println!("Stigma analysis result: {stigma_result}");

    let style_result = reframe.retrieve_style_instruction(TEST_TEXT).await?;
    println!("Style analysis result: {style_result}");

    let sample_style: StyleProfile = [("tone", "neutral"), ("lexical_diversity", "moderate")]
        .into_iter()
        .collect();
    let rewrite_result = reframe
        .rewrite_text(TEST_TEXT, SAMPLE_EXPLANATION, &sample_style)
        .await?;
    println!("Rewrite result: {rewrite_result}");

    Ok(())
}
