//! Live test routines and the sequencer that runs them.
//!
//! Each routine issues real LLM calls through [`Reframe`] and fails with an
//! error when the model's answer does not hold up.

pub mod analysis;
pub mod drug;
pub mod emotion;
pub mod rewriter;
pub mod stigma;

use std::fmt;
use std::future::Future;

use anyhow::Result;
use clap::ValueEnum;

use crate::config::RunConfig;
use crate::palette::Palette;
use crate::reframe::Reframe;
use crate::utils::{rule, strip_controls_and_escapes};

const BANNER_WIDTH: usize = 80;
const SECTION_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suite {
    Drug,
    Stigma,
    Analysis,
    Rewriter,
    Emotion,
}

impl Suite {
    /// Order in which `all` runs the suites.
    pub const ORDER: [Suite; 5] = [
        Suite::Drug,
        Suite::Stigma,
        Suite::Analysis,
        Suite::Rewriter,
        Suite::Emotion,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Suite::Drug => "drug",
            Suite::Stigma => "stigma",
            Suite::Analysis => "analysis",
            Suite::Rewriter => "rewriter",
            Suite::Emotion => "emotion",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Suite::Drug => "Drug Classification Test",
            Suite::Stigma => "Stigma Classification Test",
            Suite::Analysis => "Text Analysis Test",
            Suite::Rewriter => "Text Rewriting Test",
            Suite::Emotion => "Emotion Detection Test",
        }
    }
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TestSelection {
    #[default]
    All,
    Drug,
    Stigma,
    Analysis,
    Rewriter,
    Emotion,
}

impl TestSelection {
    /// The single suite selected, or `None` for `all`.
    pub fn suite(self) -> Option<Suite> {
        match self {
            TestSelection::All => None,
            TestSelection::Drug => Some(Suite::Drug),
            TestSelection::Stigma => Some(Suite::Stigma),
            TestSelection::Analysis => Some(Suite::Analysis),
            TestSelection::Rewriter => Some(Suite::Rewriter),
            TestSelection::Emotion => Some(Suite::Emotion),
        }
    }
}

/// Executes one suite. The sequencer only decides which suites run and in what order.
pub trait SuiteRunner {
    fn run(&mut self, suite: Suite, config: &RunConfig) -> impl Future<Output = Result<()>>;
}

/// Runs suites against the configured provider.
#[derive(Debug, Default)]
pub struct LiveRunner;

impl SuiteRunner for LiveRunner {
    async fn run(&mut self, suite: Suite, config: &RunConfig) -> Result<()> {
        let reframe = config.reframe()?;
        run_suite(suite, &reframe).await
    }
}

pub async fn run_suite(suite: Suite, reframe: &Reframe) -> Result<()> {
    match suite {
        Suite::Drug => drug::run(reframe).await,
        Suite::Stigma => stigma::run(reframe).await,
        Suite::Analysis => analysis::run(reframe).await,
        Suite::Rewriter => rewriter::run(reframe).await,
        Suite::Emotion => emotion::run(reframe).await,
    }
}

pub async fn run_selection<R: SuiteRunner>(
    selection: TestSelection,
    config: &RunConfig,
    runner: &mut R,
) -> Result<()> {
    match selection.suite() {
        Some(suite) => runner.run(suite, config).await,
        None => run_all(config, runner).await,
    }
}

pub async fn run_all<R: SuiteRunner>(config: &RunConfig, runner: &mut R) -> Result<()> {
    println!("{}", header_banner(config));

    for (index, suite) in Suite::ORDER.into_iter().enumerate() {
        println!("{}", section_banner(index + 1, suite));
        runner.run(suite, config).await?;
        println!("{}", Palette::paint(Palette::SUCCESS, format!("{suite} passed")));
    }

    println!("{}", footer_banner());
    Ok(())
}

pub fn header_banner(config: &RunConfig) -> String {
    let line = rule('=', BANNER_WIDTH);
    format!(
        "{line}\nRUNNING ALL REFRAME TESTS\nModel: {}\nClient type: {}\n{line}",
        config.model_label(),
        config.client_type
    )
}

pub fn section_banner(index: usize, suite: Suite) -> String {
    format!("\n{index}. {}\n{}", suite.title(), rule('-', SECTION_WIDTH))
}

pub fn footer_banner() -> String {
    let line = rule('=', BANNER_WIDTH);
    format!("\n{line}\nALL TESTS COMPLETED\n{line}")
}

fn print_input(text: &str) {
    println!("{} {text}", Palette::dim("Input:"));
}

/// Model output is printed with control characters and escapes removed.
fn print_result(label: &str, value: &impl fmt::Display) {
    println!(
        "{} {}",
        Palette::paint(Palette::INFO, format!("{label}:")),
        strip_controls_and_escapes(&value.to_string())
    );
}
