use anyhow::{Result, ensure};

use super::{print_input, print_result};
use crate::reframe::Reframe;

const SAMPLE: &str = "Honestly, I never thought I'd be writing this, but here we are. \
    Three years sober next week, and some days it still feels brand new.";

pub async fn run(reframe: &Reframe) -> Result<()> {
    print_input(SAMPLE);
    let profile = reframe.retrieve_style_instruction(SAMPLE).await?;
    print_result("Style analysis", &profile);
    ensure!(!profile.is_empty(), "Expected a non-empty style profile");
    Ok(())
}
