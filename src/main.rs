//! Titlecasing CLI - checks and fixes heading capitalization in
//! documentation sources.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use rayon::prelude::*;
use similar::TextDiff;
use titlecasing::config::Config;
use titlecasing::{
    CapitalizationType, Diagnostic, DocumentKind, Mode, Outcome, TitleCaser, process_document,
};
use walkdir::WalkDir;

/// Checks that navigation titles and page headings follow a capitalization
/// style, keeping listed terms in their fixed casing.
#[derive(Parser, Debug)]
#[command(name = "titlecasing")]
#[command(version, about, long_about = None)]
struct Args {
    /// Files or directories to check. Markdown (.md), HTML (.html) and
    /// mkdocs.yml navigation are recognized.
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Report mismatches (warn) or rewrite them (fix).
    #[arg(short, long)]
    mode: Option<Mode>,

    /// Capitalization rule: title or first_letter.
    #[arg(long)]
    capitalization_type: Option<CapitalizationType>,

    /// Exception list, one term per line.
    #[arg(long, value_name = "FILE")]
    ignore_file: Option<PathBuf>,

    /// Configuration file (default: discover .title-casing.toml).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Read input from stdin.
    #[arg(long)]
    stdin: bool,

    /// Format of stdin input.
    #[arg(long, value_enum, default_value = "markdown")]
    stdin_format: StdinFormat,

    /// In fix mode, print a diff instead of writing files.
    #[arg(long)]
    diff: bool,

    /// Suppress all log output.
    #[arg(short, long)]
    quiet: bool,

    /// Increase verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StdinFormat {
    Markdown,
    Html,
    Nav,
}

impl From<StdinFormat> for DocumentKind {
    fn from(format: StdinFormat) -> Self {
        match format {
            StdinFormat::Markdown => DocumentKind::Markdown,
            StdinFormat::Html => DocumentKind::Html,
            StdinFormat::Nav => DocumentKind::Nav,
        }
    }
}

/// Result of processing one file.
struct FileReport {
    path: PathBuf,
    diagnostics: Vec<Diagnostic>,
    /// Diff or fixed navigation to print to stdout.
    stdout: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args);

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    log::debug!("configuration: {:?}", config);

    let caser = match config.title_caser() {
        Ok(caser) => caser,
        Err(e) => {
            eprintln!("Error loading exception list: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.stdin || (args.paths.is_empty() && config.include.is_empty()) {
        return run_stdin(&args, &caser, config.mode);
    }

    let files = if args.paths.is_empty() {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        match config.collect_files(&cwd) {
            Ok(files) => files,
            Err(e) => {
                eprintln!("Error collecting files: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        expand_paths(&args.paths)
    };
    if files.is_empty() {
        log::info!("no files to check");
        return ExitCode::SUCCESS;
    }

    run_files(&args, &files, &caser, config.mode)
}

fn init_logging(args: &Args) {
    if args.quiet {
        return;
    }
    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn load_config(args: &Args) -> Result<Config, titlecasing::config::ConfigError> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            match Config::discover(&cwd)? {
                Some((path, config)) => {
                    log::info!("using configuration {}", path.display());
                    config
                }
                None => Config::default(),
            }
        }
    };
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(capitalization_type) = args.capitalization_type {
        config.capitalization_type = capitalization_type;
    }
    if let Some(ignore_file) = &args.ignore_file {
        config.ignore_definition_file = ignore_file.clone();
    }
    Ok(config)
}

/// Expand directories into the recognized documents they contain.
fn expand_paths(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.extend(
                WalkDir::new(path)
                    .sort_by_file_name()
                    .into_iter()
                    .filter_map(Result::ok)
                    .filter(|entry| entry.file_type().is_file())
                    .map(|entry| entry.into_path())
                    .filter(|path| DocumentKind::from_path(path).is_some()),
            );
        } else {
            files.push(path.clone());
        }
    }
    files
}

fn run_stdin(args: &Args, caser: &TitleCaser, mode: Mode) -> ExitCode {
    let mut input = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input) {
        eprintln!("Error reading stdin: {}", e);
        return ExitCode::FAILURE;
    }

    match process_document(&input, args.stdin_format.into(), caser, mode, None) {
        Ok(Outcome::Diagnostics(diagnostics)) => {
            if report(&diagnostics) {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Ok(Outcome::Fixed(output)) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error processing stdin: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_files(args: &Args, files: &[PathBuf], caser: &TitleCaser, mode: Mode) -> ExitCode {
    let results: Vec<Result<FileReport, String>> = files
        .par_iter()
        .map(|path| process_file(path, caser, mode, args.diff))
        .collect();

    let mut diagnostics = Vec::new();
    let mut failed = false;
    for result in results {
        match result {
            Ok(file_report) => {
                log::debug!("processed {}", file_report.path.display());
                if let Some(stdout) = file_report.stdout {
                    print!("{}", stdout);
                }
                diagnostics.extend(file_report.diagnostics);
            }
            Err(e) => {
                eprintln!("{}", e);
                failed = true;
            }
        }
    }

    if report(&diagnostics) || failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn process_file(
    path: &Path,
    caser: &TitleCaser,
    mode: Mode,
    diff: bool,
) -> Result<FileReport, String> {
    let kind = DocumentKind::from_path(path)
        .ok_or_else(|| format!("Error processing {}: unrecognized file type", path.display()))?;
    let input = fs::read_to_string(path)
        .map_err(|e| format!("Error reading {}: {}", path.display(), e))?;
    let location = path.display().to_string();

    let outcome = process_document(&input, kind, caser, mode, Some(&location))
        .map_err(|e| format!("Error processing {}: {}", path.display(), e))?;

    let mut file_report = FileReport {
        path: path.to_path_buf(),
        diagnostics: Vec::new(),
        stdout: None,
    };
    match outcome {
        Outcome::Diagnostics(diagnostics) => file_report.diagnostics = diagnostics,
        Outcome::Fixed(output) if kind == DocumentKind::Nav => file_report.stdout = Some(output),
        Outcome::Fixed(output) if input == output => {}
        Outcome::Fixed(output) if diff => {
            let diff = TextDiff::from_lines(&input, &output)
                .unified_diff()
                .header(&location, &location)
                .to_string();
            file_report.stdout = Some(diff);
        }
        Outcome::Fixed(output) => {
            fs::write(path, &output)
                .map_err(|e| format!("Error writing {}: {}", path.display(), e))?;
            log::info!("fixed {}", path.display());
        }
    }
    Ok(file_report)
}

/// Log every diagnostic; returns whether there was any.
fn report(diagnostics: &[Diagnostic]) -> bool {
    for diagnostic in diagnostics {
        log::warn!("{}", diagnostic);
    }
    !diagnostics.is_empty()
}
