//! `felangkit` — a thin command-line front end over the library, mirroring
//! the shape of a typical front-end CLI: a `check` subcommand that runs the
//! full pipeline and prints diagnostics, and a `tokens` subcommand for
//! inspecting the tokenizer in isolation.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use felangkit::formatter::format_report;
use felangkit::{parse_with_analysis, ErrorReportingProfile, ParseOptions};
use felangkit_parser::{tokenize, TokenizerFlags};

#[derive(Parser)]
#[command(name = "felangkit", version, about = "Tokenizer, parser, and semantic analyzer for the FE pseudo-language")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Tokenize, parse, and semantically analyze a source file, printing
    /// any diagnostics. Exits with status 1 if analysis did not succeed.
    Check {
        path: PathBuf,
        /// Use the `strict` error-reporting profile (verbose, unused-symbol
        /// correlation, effectively unbounded error count).
        #[arg(long)]
        strict: bool,
        /// Use the `fast` profile (small error cap, no deduplication).
        #[arg(long, conflicts_with = "strict")]
        fast: bool,
    },
    /// Print the token stream for a source file, one token per line.
    Tokens {
        path: PathBuf,
        /// Include trivia tokens (whitespace, comments, newlines).
        #[arg(long)]
        keep_trivia: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive("felangkit=info".parse().unwrap()))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Check { path, strict, fast } => run_check(&path, strict, fast),
        Command::Tokens { path, keep_trivia } => run_tokens(&path, keep_trivia),
    }
}

fn run_check(path: &PathBuf, strict: bool, fast: bool) -> ExitCode {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: could not read {}: {err}", path.display());
            return ExitCode::FAILURE;
        }
    };

    let profile = if strict {
        ErrorReportingProfile::Strict
    } else if fast {
        ErrorReportingProfile::Fast
    } else {
        ErrorReportingProfile::Default
    };
    let options = ParseOptions::default().with_profile(profile);

    let analyzed = parse_with_analysis(&source, options);
    let all_diagnostics: Vec<_> =
        analyzed.diagnostics.errors.iter().chain(&analyzed.diagnostics.warnings).cloned().collect();

    if !all_diagnostics.is_empty() {
        print!("{}", format_report(&all_diagnostics, Some(&analyzed.symbols)));
    }

    if analyzed.is_successful() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run_tokens(path: &PathBuf, keep_trivia: bool) -> ExitCode {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: could not read {}: {err}", path.display());
            return ExitCode::FAILURE;
        }
    };

    let flags = TokenizerFlags { keep_trivia, normalize_unicode: true };
    let (tokens, diagnostics) = tokenize(&source, flags);
    for token in &tokens {
        println!("{:>4}:{:<4} {:<16} {:?}", token.position.line, token.position.column, token.kind.to_string(), token.lexeme);
    }
    for diagnostic in &diagnostics {
        eprintln!("{diagnostic}");
    }

    ExitCode::SUCCESS
}
