// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Command-line interface for chatexport.
//!
//! This binary provides the `chatexport` command for converting a plain-text
//! chat transcript into a filtered, redacted JSON document.

use chatexport::export::{self, ExportOptions};
use chatexport::filter::FilterOptions;
use chatexport::parser;
use lexopt::prelude::*;
use snafu::{OptionExt, ensure, prelude::*};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Where to write the encoded document.
#[derive(Clone)]
enum OutputTarget {
    /// Write to the given file.
    File(PathBuf),
    /// Write to stdout.
    Stdout,
}

#[allow(clippy::struct_excessive_bools)]
struct Cli {
    input: PathBuf,
    output: OutputTarget,
    filter_user: Option<String>,
    filter_keyword: Option<String>,
    blacklist: Vec<String>,
    report: bool,
    pretty: bool,
    force: bool,
    verbose: bool,
    quiet: bool,
}

#[derive(Debug, Snafu)]
enum Error {
    #[snafu(display("failed to parse arguments: {source}"))]
    ParseArgs { source: lexopt::Error },

    #[snafu(display("missing required argument: <{name}>"))]
    MissingArgument { name: &'static str },

    #[snafu(display("failed to read {}: {source}", path.display()))]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("failed to parse {}: {source}", path.display()))]
    ParseFile {
        path: PathBuf,
        source: parser::ParseError,
    },

    #[snafu(display("failed to encode output: {source}"))]
    Encode { source: export::EncodeError },

    #[snafu(display("{} already exists, use --force to overwrite", path.display()))]
    OutputExists { path: PathBuf },

    #[snafu(display("failed to write {}: {source}", path.display()))]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn print_help() {
    println!(
        "\
{name} {version}
Convert a plain-text chat transcript to JSON

Usage: {name} [OPTIONS] <INPUT> <OUTPUT>

Arguments:
  <INPUT>   Transcript file (first line is the conversation name)
  <OUTPUT>  JSON output file, or - for stdout

Filtering:
  -u, --filter-user <ID>       Keep only messages sent by ID
  -k, --filter-keyword <WORD>  Keep only messages containing WORD
  -b, --blacklist <WORDS>      Comma-separated words to redact (repeatable)
  -r, --report                 Include per-sender activity counts

Other options:
      --pretty                 Pretty-print the JSON output
  -f, --force                  Overwrite an existing output file
  -v, --verbose                Show debug logging
  -q, --quiet                  Only show warnings and errors
  -h, --help                   Print help
  -V, --version                Print version",
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
    );
}

fn parse_args() -> Result<Cli, Error> {
    // Show help if no arguments provided
    if std::env::args().len() == 1 {
        print_help();
        std::process::exit(0);
    }

    let mut positional: Vec<PathBuf> = Vec::new();
    let mut filter_user = None;
    let mut filter_keyword = None;
    let mut blacklist = Vec::new();
    let mut report = false;
    let mut pretty = false;
    let mut force = false;
    let mut verbose = false;
    let mut quiet = false;

    let mut parser = lexopt::Parser::from_env();
    while let Some(arg) = parser.next().context(ParseArgsSnafu)? {
        match arg {
            Short('u') | Long("filter-user") => {
                filter_user = Some(string_value(&mut parser)?);
            }
            Short('k') | Long("filter-keyword") => {
                filter_keyword = Some(string_value(&mut parser)?);
            }
            Short('b') | Long("blacklist") => {
                let words = string_value(&mut parser)?;
                blacklist.extend(
                    words
                        .split(',')
                        .map(str::trim)
                        .filter(|w| !w.is_empty())
                        .map(str::to_owned),
                );
            }
            Short('r') | Long("report") => report = true,
            Long("pretty") => pretty = true,
            Short('f') | Long("force") => force = true,
            Short('v') | Long("verbose") => verbose = true,
            Short('q') | Long("quiet") => quiet = true,
            Short('h') | Long("help") => {
                print_help();
                std::process::exit(0);
            }
            Short('V') | Long("version") => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            Value(val) => positional.push(val.into()),
            _ => return Err(arg.unexpected()).context(ParseArgsSnafu),
        }
    }

    let mut positional = positional.into_iter();
    let input = positional
        .next()
        .context(MissingArgumentSnafu { name: "INPUT" })?;
    let output = positional
        .next()
        .context(MissingArgumentSnafu { name: "OUTPUT" })?;
    if let Some(extra) = positional.next() {
        return Err(lexopt::Error::UnexpectedArgument(extra.into_os_string())).context(ParseArgsSnafu);
    }

    let output = if output == Path::new("-") {
        OutputTarget::Stdout
    } else {
        OutputTarget::File(output)
    };

    Ok(Cli {
        input,
        output,
        filter_user,
        filter_keyword,
        blacklist,
        report,
        pretty,
        force,
        verbose,
        quiet,
    })
}

fn string_value(parser: &mut lexopt::Parser) -> Result<String, Error> {
    parser
        .value()
        .and_then(|v| v.string())
        .context(ParseArgsSnafu)
}

fn init_logging(cli: &Cli) {
    let fallback = if cli.quiet {
        "warn"
    } else if cli.verbose {
        "chatexport=debug,info"
    } else {
        "chatexport=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Creates export options from CLI arguments.
fn make_export_options(cli: &Cli) -> ExportOptions {
    ExportOptions {
        filters: FilterOptions {
            sender: cli.filter_user.clone(),
            keyword: cli.filter_keyword.clone(),
            blacklist: cli.blacklist.clone(),
        },
        report_activity: cli.report,
    }
}

#[snafu::report]
fn main() -> Result<(), Error> {
    let cli = parse_args()?;
    init_logging(&cli);

    if let OutputTarget::File(path) = &cli.output {
        ensure!(cli.force || !path.exists(), OutputExistsSnafu { path });
    }

    let json = run(&cli)?;

    match &cli.output {
        OutputTarget::Stdout => println!("{json}"),
        OutputTarget::File(path) => {
            std::fs::write(path, &json).context(WriteFileSnafu { path })?;
            info!("Exported {} to {}", cli.input.display(), path.display());
        }
    }

    Ok(())
}

/// Reads, parses, filters, and encodes the input. Nothing is written here,
/// so a failure leaves no output behind.
fn run(cli: &Cli) -> Result<String, Error> {
    let input = &cli.input;
    let text = std::fs::read_to_string(input).context(ReadFileSnafu { path: input })?;
    let conversation = parser::parse_transcript(&text).context(ParseFileSnafu { path: input })?;

    let doc = export::export(conversation, &make_export_options(cli));
    info!(
        messages = doc.messages.len(),
        "exporting conversation {:?}", doc.name
    );

    export::to_json(&doc, cli.pretty).context(EncodeSnafu)
}
