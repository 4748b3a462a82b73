use anyhow::{Result, ensure};

use super::{print_input, print_result};
use crate::reframe::Reframe;

const SAMPLE: &str = "My neighbor is a crackhead and everyone knows addicts like him are dangerous.";

pub async fn run(reframe: &Reframe) -> Result<()> {
    print_input(SAMPLE);
    let analysis = reframe.analyze_stigma(SAMPLE).await?;
    print_result("Stigma analysis", &analysis);
    let style = reframe.retrieve_style_instruction(SAMPLE).await?;
    print_result("Style analysis", &style);

    let rewritten = reframe
        .rewrite_text(SAMPLE, &analysis.rewrite_explanation(), &style)
        .await?;
    print_result("Rewrite", &rewritten);
    ensure!(
        rewritten.trim() != SAMPLE,
        "Expected the rewrite to differ from the original text"
    );
    Ok(())
}
