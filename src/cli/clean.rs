use clap::Args;
use serde::Serialize;

use super::CliContext;
use crate::domain::{CleanerOptions, TextCleaner};

#[derive(Args, Clone)]
pub struct CleanArgs {
    /// Text to clean
    pub text: String,

    /// Keep punctuation
    #[arg(long)]
    pub keep_punctuation: bool,

    /// Keep letter case
    #[arg(long)]
    pub keep_case: bool,
}

#[derive(Debug, Serialize)]
struct CleanOutput {
    cleaned: String,
    tokens: Vec<String>,
    word_count: usize,
}

pub fn run(ctx: &CliContext, args: CleanArgs) -> anyhow::Result<()> {
    let cleaner = TextCleaner::with_options(CleanerOptions {
        lowercase: !args.keep_case,
        strip_punctuation: !args.keep_punctuation,
    });

    let tokens = cleaner.tokenize(&args.text);
    let output = CleanOutput {
        cleaned: cleaner.clean_text(&args.text),
        word_count: tokens.len(),
        tokens,
    };

    ctx.emit(&output, || {
        format!("{}\n({} words)", output.cleaned, output.word_count)
    })
}
