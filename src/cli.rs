//! The esc Command-Line Interface.
//!
//! Reads files, hands their contents to the library, and renders results.
//! None of this is needed to use the lexer or parser as a library.

use std::fs;
use std::path::Path;
use std::process;

use clap::Parser;
use miette::{miette, IntoDiagnostic, WrapErr};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use crate::cli::args::{Command, EscArgs};
use crate::context::Context;
use crate::errors::print_error;
use crate::syntax::{lex, parse_source};

pub mod args;
pub mod output;

/// File extension `check` looks for.
pub const SOURCE_EXTENSION: &str = "esc";

/// The main entry point for the CLI.
pub fn run() {
    let args = EscArgs::parse();
    init_tracing(args.verbose);

    let result = match args.command {
        Command::Tokens { file, json } => handle_tokens(&file, json),
        Command::Ast { file, json } => handle_ast(&file, json),
        Command::Format { file } => handle_format(&file),
        Command::Check { path } => handle_check(&path),
    };

    if let Err(report) = result {
        eprintln!("{report:?}");
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_directive = match verbose {
        0 => "warn",
        1 => "esc=debug",
        _ => "esc=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load(path: &Path) -> miette::Result<Context> {
    let source = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    Ok(Context::from_file(path.display().to_string(), source))
}

fn handle_tokens(path: &Path, json: bool) -> miette::Result<()> {
    let mut ctx = load(path)?;
    let tokens = lex(&mut ctx)?;
    if json {
        output::print_json(&output::token_records(&ctx, &tokens)).into_diagnostic()
    } else {
        output::print_tokens(&ctx, &tokens).into_diagnostic()
    }
}

fn handle_ast(path: &Path, json: bool) -> miette::Result<()> {
    let mut ctx = load(path)?;
    let root = parse_source(&mut ctx)?;
    if json {
        let dump = output::AstDump {
            root: &root,
            locations: ctx.locations().map(|(_, loc)| loc).collect(),
        };
        output::print_json(&dump).into_diagnostic()
    } else {
        output::print_tree(&ctx, &root).into_diagnostic()
    }
}

fn handle_format(path: &Path) -> miette::Result<()> {
    let mut ctx = load(path)?;
    let root = parse_source(&mut ctx)?;
    println!("{}", root.get());
    Ok(())
}

/// Parses every source file under `path`, printing a diagnostic for each
/// failure rather than stopping at the first.
fn handle_check(path: &Path) -> miette::Result<()> {
    let files = discover_sources(path)?;
    info!(count = files.len(), root = %path.display(), "checking sources");

    let mut failed = 0;
    for file in &files {
        let mut ctx = load(file)?;
        match parse_source(&mut ctx) {
            Ok(_) => debug!(file = %file.display(), "ok"),
            Err(err) => {
                failed += 1;
                print_error(err);
            }
        }
    }

    let summary = format!("{} checked, {} failed", files.len(), failed);
    output::print_summary(failed == 0, &summary).into_diagnostic()?;
    if failed > 0 {
        return Err(miette!("{} of {} files failed to parse", failed, files.len()));
    }
    Ok(())
}

/// A single file is returned as-is; directories are walked for
/// `.esc` files in sorted order.
pub fn discover_sources(path: &Path) -> miette::Result<Vec<std::path::PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to walk {}", path.display()))?;
        let is_source = entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == SOURCE_EXTENSION);
        if is_source {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
