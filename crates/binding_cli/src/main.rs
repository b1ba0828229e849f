//! bindc: command-line front end for the binding expression parser.
//!
//! Usage:
//!   bindc [options] [expression...]
//!
//! Parses each expression (or each line of `--file`) and reports the
//! diagnostics, optionally with the token stream and the syntax tree.

mod diagnostic;

use binding_ast::{collect_diagnostics, Expression, Token, TreePrinter};
use binding_core::text::LineMap;
use binding_diagnostics::{Diagnostic, DiagnosticCollection};
use binding_options::{BindingConfig, ConfigError, OutputFormat, ParseMode, CONFIG_FILE_NAME};
use clap::Parser as ClapParser;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser, Debug)]
#[command(name = "bindc", about = "Parse and check binding expressions", version)]
struct Cli {
    /// Binding expressions to parse.
    #[arg(value_name = "EXPRESSION")]
    exprs: Vec<String>,

    /// Read expressions from a file, one per line.
    #[arg(short = 'f', long = "file")]
    file: Option<PathBuf>,

    /// Entry point used for every input.
    #[arg(short = 'm', long, value_enum)]
    mode: Option<Mode>,

    /// Path to bindingconfig.json.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Print the syntax tree.
    #[arg(long)]
    tree: bool,

    /// Print the token stream.
    #[arg(long)]
    tokens: bool,

    /// Output format.
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Pretty-print JSON output.
    #[arg(long)]
    pretty: bool,

    /// Render diagnostics with source snippets.
    #[arg(long)]
    fancy: bool,

    /// Parse inputs in parallel on N threads.
    #[arg(short = 'j', long = "jobs")]
    jobs: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Mode {
    Expression,
    Multi,
    TypeName,
    DirectiveValue,
}

impl From<Mode> for ParseMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Expression => ParseMode::Expression,
            Mode::Multi => ParseMode::MultiExpression,
            Mode::TypeName => ParseMode::DirectiveTypeName,
            Mode::DirectiveValue => ParseMode::DirectiveValue,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to start worker threads: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("failed to write JSON output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no input expressions given")]
    NoInput,
}

// ANSI color codes
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";
const GRAY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// One binding source to parse.
struct Input {
    name: String,
    source: String,
}

struct Outcome {
    input: Input,
    expr: Expression,
    tokens: Vec<Token>,
    diagnostics: DiagnosticCollection,
}

#[derive(Serialize)]
struct TokenRecord<'a> {
    kind: String,
    text: &'a str,
    pos: u32,
}

#[derive(Serialize)]
struct Report<'a> {
    name: &'a str,
    source: &'a str,
    kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tokens: Option<Vec<TokenRecord<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tree: Option<String>,
    diagnostics: &'a [Diagnostic],
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            print_error(&e.to_string());
            process::exit(1);
        }
    }
}

fn init_logging(verbose: u8) {
    let default_directive = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<i32, CliError> {
    let start = Instant::now();
    let config = resolve_config(cli)?;
    let inputs = resolve_inputs(cli)?;
    if inputs.is_empty() {
        return Err(CliError::NoInput);
    }
    tracing::info!(inputs = inputs.len(), mode = ?config.parser.mode, "parsing");

    let outcomes = parse_all(inputs, &config, cli.jobs)?;

    match config.output.format {
        OutputFormat::Json => print_json(&outcomes, &config)?,
        OutputFormat::Text => print_text(&outcomes, &config, cli.fancy),
    }

    let error_count: usize = outcomes.iter().map(|o| o.diagnostics.error_count()).sum();
    let use_color = atty_is_terminal();
    tracing::debug!(elapsed = ?start.elapsed(), error_count, "done");

    if error_count > 0 {
        if config.output.format == OutputFormat::Text {
            let plural = if error_count == 1 { "" } else { "s" };
            if use_color {
                eprintln!("\n{}Found {} error{}.{}", RED, error_count, plural, RESET);
            } else {
                eprintln!("\nFound {} error{}.", error_count, plural);
            }
        }
        return Ok(2);
    }

    if use_color && config.output.format == OutputFormat::Text {
        eprintln!(
            "{}Parsed {} input{} in {:.2}s.{}",
            GRAY,
            outcomes.len(),
            if outcomes.len() == 1 { "" } else { "s" },
            start.elapsed().as_secs_f64(),
            RESET
        );
    }
    Ok(0)
}

/// Load the configuration file and apply command-line overrides.
fn resolve_config(cli: &Cli) -> Result<BindingConfig, CliError> {
    let mut config = match cli.config {
        Some(ref path) => binding_options::parse_config_file(path)?,
        None if Path::new(CONFIG_FILE_NAME).exists() => {
            binding_options::parse_config_file(CONFIG_FILE_NAME)?
        }
        None => BindingConfig::default(),
    };

    // CLI options override the config file
    if let Some(mode) = cli.mode {
        config.parser.mode = mode.into();
    }
    if let Some(format) = cli.format {
        config.output.format = match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        };
    }
    if cli.tree { config.output.tree = true; }
    if cli.tokens { config.output.tokens = true; }
    if cli.pretty { config.output.pretty = true; }

    Ok(config)
}

fn resolve_inputs(cli: &Cli) -> Result<Vec<Input>, CliError> {
    let mut inputs: Vec<Input> = cli
        .exprs
        .iter()
        .enumerate()
        .map(|(i, source)| Input {
            name: format!("<arg {}>", i + 1),
            source: source.clone(),
        })
        .collect();

    if let Some(ref path) = cli.file {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.clone(),
            source,
        })?;
        inputs.extend(
            text.lines()
                .enumerate()
                .filter(|(_, line)| !line.trim().is_empty())
                .map(|(i, line)| Input {
                    name: format!("{}:{}", path.display(), i + 1),
                    source: line.to_string(),
                }),
        );
    }

    Ok(inputs)
}

/// Parse every input, in parallel, keeping the input order.
fn parse_all(
    inputs: Vec<Input>,
    config: &BindingConfig,
    jobs: Option<usize>,
) -> Result<Vec<Outcome>, CliError> {
    let want_tokens = config.output.tokens;
    let parse = move || {
        inputs
            .into_par_iter()
            .map(|input| parse_input(input, config, want_tokens))
            .collect::<Vec<_>>()
    };

    match jobs {
        Some(n) => {
            let pool = rayon::ThreadPoolBuilder::new().num_threads(n).build()?;
            Ok(pool.install(parse))
        }
        None => Ok(parse()),
    }
}

fn parse_input(input: Input, config: &BindingConfig, want_tokens: bool) -> Outcome {
    let expr = binding_parser::parse_with_options(&input.source, &config.parser);
    let tokens = if want_tokens {
        binding_scanner::tokenize(&input.source)
    } else {
        Vec::new()
    };
    let mut diagnostics = DiagnosticCollection::new();
    for diag in collect_diagnostics(&expr).into_diagnostics() {
        diagnostics.add(diag.with_file(input.name.clone()));
    }
    diagnostics.sort();
    tracing::trace!(name = %input.name, diagnostics = diagnostics.len(), "parsed input");
    Outcome {
        input,
        expr,
        tokens,
        diagnostics,
    }
}

fn print_text(outcomes: &[Outcome], config: &BindingConfig, fancy: bool) {
    let use_color = atty_is_terminal();
    let show_header = config.output.tree || config.output.tokens || outcomes.len() > 1;

    for outcome in outcomes {
        if show_header {
            if use_color {
                println!("{}{}{}: {}", CYAN, outcome.input.name, RESET, outcome.input.source);
            } else {
                println!("{}: {}", outcome.input.name, outcome.input.source);
            }
        }
        if config.output.tokens {
            for token in &outcome.tokens {
                println!("  {:<24} {:>4} {:?}", token.kind.to_string(), token.pos, token.text);
            }
        }
        if config.output.tree {
            print!("{}", TreePrinter::new().print(&outcome.expr));
        }

        let line_map = LineMap::new(&outcome.input.source);
        for diag in outcome.diagnostics.iter() {
            if fancy {
                let report = diagnostic::ParseDiagnostic::from_binding_diagnostic(
                    diag,
                    &outcome.input.name,
                    &outcome.input.source,
                );
                eprintln!("{:?}", miette::Report::new(report));
            } else {
                print_diagnostic(diag, &line_map, use_color);
            }
        }
    }
}

fn print_json(outcomes: &[Outcome], config: &BindingConfig) -> Result<(), CliError> {
    let reports: Vec<Report<'_>> = outcomes
        .iter()
        .map(|outcome| Report {
            name: &outcome.input.name,
            source: &outcome.input.source,
            kind: outcome.expr.kind().to_string(),
            tokens: config.output.tokens.then(|| {
                outcome
                    .tokens
                    .iter()
                    .map(|t| TokenRecord {
                        kind: t.kind.to_string(),
                        text: &t.text,
                        pos: t.pos,
                    })
                    .collect()
            }),
            tree: config
                .output
                .tree
                .then(|| TreePrinter::new().print(&outcome.expr)),
            diagnostics: outcome.diagnostics.diagnostics(),
        })
        .collect();

    let json = if config.output.pretty {
        serde_json::to_string_pretty(&reports)?
    } else {
        serde_json::to_string(&reports)?
    };
    println!("{}", json);
    Ok(())
}

fn print_diagnostic(diag: &Diagnostic, line_map: &LineMap, use_color: bool) {
    let file = diag.file.as_deref().unwrap_or("<input>");
    let location = diag.span.map(|span| {
        let lc = line_map.line_and_column_of(span.start);
        format!("({},{})", lc.line + 1, lc.character + 1)
    });
    let location = location.unwrap_or_default();

    if use_color {
        eprintln!(
            "{}{}{}{}: {}{}{}{} {}BND{}{}: {}",
            CYAN, file, RESET, location,
            BOLD, RED, diag.category, RESET,
            CYAN, diag.code, RESET,
            diag.message_text
        );
    } else {
        eprintln!("{}{}: {} BND{}: {}", file, location, diag.category, diag.code, diag.message_text);
    }
}

fn print_error(msg: &str) {
    if atty_is_terminal() {
        eprintln!("{}{}error{}: {}", BOLD, RED, RESET, msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

fn atty_is_terminal() -> bool {
    #[cfg(unix)]
    {
        unsafe { libc::isatty(2) != 0 }
    }
    #[cfg(not(unix))]
    {
        true
    }
}
