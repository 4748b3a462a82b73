use anyhow::{Result, ensure};

use super::{print_input, print_result};
use crate::reframe::Reframe;

const SAMPLE: &str = "I just got the job offer I've been dreaming about, I can't stop smiling!";

pub async fn run(reframe: &Reframe) -> Result<()> {
    print_input(SAMPLE);
    let detection = reframe.detect_emotion(SAMPLE).await?;
    print_result("Emotion detection", &detection);
    ensure!(
        detection.confidence > 0.0,
        "Expected a positive confidence for a clearly emotional text: {detection}"
    );
    Ok(())
}
