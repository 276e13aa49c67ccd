use anyhow::{Context, Result};
use bpe_subword::{Tokenizer, TrainingProgress};
use clap::{ArgAction, Parser};
use env_logger::Env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const EOW_PLACEHOLDER: &str = "_";
const PROGRESS_INTERVAL: usize = 100;

#[derive(Parser, Debug)]
#[command(author, version, about = "Learn a BPE subword vocabulary and tokenize sentences with it", long_about = None)]
struct Args {
    /// Text corpus to learn the vocabulary from
    corpus_file: PathBuf,

    /// Increase log verbosity (-v, -vv)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

/// `Some("<percent>%, ...")` every `PROGRESS_INTERVAL` merges.
fn progress_line(iteration: usize, target: usize) -> Option<String> {
    if iteration % PROGRESS_INTERVAL != 0 {
        return None;
    }
    let percentage = iteration as f64 / target as f64 * 100.0;
    Some(format!("{:?}%, ...", percentage))
}

fn print_progress(progress: &TrainingProgress<'_>) {
    if let Some(line) = progress_line(progress.iteration, progress.target) {
        print!("{}", line);
        if let Err(err) = io::stdout().flush() {
            log::warn!("Failed to flush progress output: {}", err);
        }
    }
}

/// Prints `message` and reads one line. `None` on end of input.
fn prompt(input: &mut impl BufRead, message: &str) -> Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn display(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .map(|token| Tokenizer::display_token(token, EOW_PLACEHOLDER))
        .collect()
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_filter())).init();
    let corpus_file = args.corpus_file;

    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!("Learning token vocabulary from: {}", corpus_file.display());
    let num_tokens: usize = prompt(&mut input, "\nEnter number of tokens to learn (k) = ")?
        .context("no vocabulary size given")?
        .parse()
        .context("vocabulary size must be a non-negative integer")?;

    let corpus = std::fs::read_to_string(&corpus_file)
        .with_context(|| format!("Failed to read corpus file: {:?}", corpus_file))?;

    print!("\nLearning tokens: ...");
    io::stdout().flush()?;
    let tokenizer = Tokenizer::train_with_progress(&corpus, num_tokens, print_progress)?;
    println!("\nVocabulary length = {}\n", tokenizer.vocab_size());

    let show = prompt(&mut input, "Want to display the learned token vocabulary? [Y/N]: ")?;
    if show.is_some_and(|answer| answer.eq_ignore_ascii_case("y")) {
        let tokens: Vec<String> = tokenizer.vocabulary().iter().map(|s| s.to_string()).collect();
        println!("\nVOCABULARY:\n\n{:?}\n", display(&tokens));
    }

    loop {
        println!("\n-----------");
        let Some(sentence) = prompt(&mut input, "Tokenize sentence => ")? else {
            break;
        };
        let tokens = tokenizer.segment(&sentence);
        println!("\nTokens =>\n{:?}", display(&tokens));
        println!("-----------\n");
    }
    Ok(())
}
