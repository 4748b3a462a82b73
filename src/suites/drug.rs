use anyhow::{Result, ensure};

use super::{print_input, print_result};
use crate::reframe::Reframe;

const DRUG_SAMPLE: &str = "I've been using heroin every day for the past year and can't stop.";
const NEUTRAL_SAMPLE: &str = "The weather was sunny today, so we had a picnic in the park.";

pub async fn run(reframe: &Reframe) -> Result<()> {
    print_input(DRUG_SAMPLE);
    let result = reframe.classify_drug_content(DRUG_SAMPLE).await?;
    print_result("Drug classification", &result);
    ensure!(
        result.is_drug_related,
        "Expected drug-related text to be classified as drug-related: {result}"
    );

    print_input(NEUTRAL_SAMPLE);
    let result = reframe.classify_drug_content(NEUTRAL_SAMPLE).await?;
    print_result("Drug classification", &result);
    ensure!(
        !result.is_drug_related,
        "Expected neutral text not to be classified as drug-related: {result}"
    );

    Ok(())
}
