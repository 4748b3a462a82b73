use anyhow::{Result, ensure};

use super::{print_input, print_result};
use crate::reframe::Reframe;

const STIGMATIZING_SAMPLE: &str = "He's just a junkie, those addicts never change.";
const PERSON_FIRST_SAMPLE: &str =
    "She is a person with a substance use disorder who is receiving treatment.";

pub async fn run(reframe: &Reframe) -> Result<()> {
    print_input(STIGMATIZING_SAMPLE);
    let result = reframe.analyze_stigma(STIGMATIZING_SAMPLE).await?;
    print_result("Stigma analysis", &result);
    ensure!(
        result.is_stigmatizing,
        "Expected stigmatizing text to be flagged: {result}"
    );
    ensure!(
        result.category.is_some(),
        "Expected a stigma category for flagged text: {result}"
    );

    print_input(PERSON_FIRST_SAMPLE);
    let result = reframe.analyze_stigma(PERSON_FIRST_SAMPLE).await?;
    print_result("Stigma analysis", &result);
    ensure!(
        !result.is_stigmatizing,
        "Expected person-first text not to be flagged: {result}"
    );

    Ok(())
}
