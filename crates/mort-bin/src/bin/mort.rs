use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;
use mort::scanner::lexeme_sets::c_tokens::CTokens;
use mort::nfa::PositionedReader;
use mort::scanner::{DefinitionTable, ScanError, Scanner, Token};

/// Tokenise a C source file and print one token per line.
#[derive(Parser)]
#[command(name = "mort")]
#[command(about = "Lazy NFA-driven C tokenizer")]
struct Args {
    /// Source file to scan
    #[arg(default_value = "input.txt")]
    input: PathBuf,

    /// Drop whitespace and newline tokens
    #[arg(short, long)]
    significant: bool,

    /// Name reported for the source instead of its canonical path
    #[arg(long)]
    display_name: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let file = File::open(&args.input)
        .with_context(|| format!("failed to open {}", args.input.display()))?;
    let source = match args.display_name {
        Some(name) => name,
        None => args
            .input
            .canonicalize()
            .with_context(|| format!("failed to resolve {}", args.input.display()))?
            .display()
            .to_string(),
    };

    let table = DefinitionTable::<CTokens>::from_lexeme_set();
    info!("compiled {} token definitions", table.len());

    let stream = PositionedReader::new(BufReader::new(file))
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let scanner = Scanner::new(stream, &table, &source);

    let mut out = BufWriter::new(io::stdout().lock());
    let count = if args.significant {
        print_tokens(scanner.significant(), &mut out, &source)?
    } else {
        print_tokens(scanner, &mut out, &source)?
    };
    out.flush()?;

    info!("{}: {} tokens", source, count);
    Ok(())
}

fn print_tokens(
    tokens: impl Iterator<Item = Result<Token<CTokens>, ScanError>>,
    out: &mut impl Write,
    source: &str,
) -> anyhow::Result<usize> {
    let mut count = 0;
    for token in tokens {
        let token = token.with_context(|| format!("failed to tokenize {}", source))?;
        writeln!(out, "{}", token)?;
        count += 1;
    }
    Ok(count)
}
