use std::env;
use std::error::Error as StdError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use plag_check_core::{
    DirectoryProject, Error, LanguageRegistry, ProjectSource, ScanOptions,
    compare_project_files, compare_token_streams, scan_project, tokenize_source,
};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

mod args;
mod json;
mod path;
mod text;

use args::{Command, CompareArgs, ScanArgs, TokensArgs, parse_args, print_help};
use json::{JsonComparison, map_scan, write_json};
use path::{extension_of, project_id, resolve_path};
use text::{format_comparison, format_scan, format_scan_stats, format_token_columns};

type CliResult<T> = Result<T, Box<dyn StdError>>;

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("plag_check=info"));
    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("Error: {message}\n");
            print_help();
            std::process::exit(2);
        }
    };

    init_logging();

    let result = match &command {
        Command::Help => {
            print_help();
            Ok(0)
        }
        Command::Version => {
            println!("plag-check {}", env!("CARGO_PKG_VERSION"));
            Ok(0)
        }
        Command::Scan(args) => run_scan(args),
        Command::Compare(args) => run_compare(args),
        Command::Tokens(args) => run_tokens(args),
    };

    match result {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}

fn open_project(root: &Path, options: &ScanOptions) -> CliResult<DirectoryProject> {
    let root = resolve_path(root)?;
    Ok(DirectoryProject::open(project_id(&root), root, options)?)
}

fn run_scan(args: &ScanArgs) -> CliResult<i32> {
    let registry = LanguageRegistry::new();
    let project = open_project(&args.project, &args.options)?;

    let mut unopened = Vec::new();
    let mut others = Vec::with_capacity(args.others.len());
    for root in &args.others {
        match open_project(root, &args.options) {
            Ok(other) => others.push(other),
            Err(err) => {
                warn!(project = %root.display(), "cannot open project: {err}");
                unopened.push(root.to_string_lossy().into_owned());
            }
        }
    }
    debug!(
        project = project.id(),
        others = others.len(),
        threshold = args.options.threshold,
        "starting scan"
    );

    let others: Vec<&dyn ProjectSource> = others.iter().map(|p| p as &dyn ProjectSource).collect();
    let mut scan = scan_project(&registry, &project, &others, &args.options)?;
    for id in unopened {
        if !scan.failures.contains(&id) {
            scan.failures.push(id);
        }
    }

    let has_failures = !scan.failures.is_empty();
    if args.json {
        write_json(&map_scan(scan, args.stats))?;
    } else {
        print!("{}", format_scan(&scan));
        if args.stats {
            eprint!("{}", format_scan_stats(&scan.stats));
        }
    }

    Ok(if args.strict && has_failures { 1 } else { 0 })
}

fn run_compare(args: &CompareArgs) -> CliResult<i32> {
    let registry = LanguageRegistry::new();
    let options = ScanOptions::default();
    let first = open_project(&args.first_project, &options)?;
    let second = open_project(&args.second_project, &options)?;

    let rendered = compare_project_files(
        &registry,
        &first,
        &args.first_file,
        &second,
        &args.second_file,
        &args.options,
    )?;

    if args.json {
        write_json(&JsonComparison::from(rendered))?;
    } else {
        let first_label = format!("[{}] {}", first.title(), args.first_file);
        let second_label = format!("[{}] {}", second.title(), args.second_file);
        print!("{}", format_comparison(&first_label, &second_label, &rendered));
    }
    Ok(0)
}

fn read_source(path: &Path) -> CliResult<String> {
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(text)
}

fn run_tokens(args: &TokensArgs) -> CliResult<i32> {
    let registry = LanguageRegistry::new();
    let first_path: PathBuf = resolve_path(&args.first_file)?;
    let second_path: PathBuf = resolve_path(&args.second_file)?;
    let ext = extension_of(&first_path);

    let language = registry
        .resolve_extension(ext)
        .ok_or_else(|| Error::UnsupportedFile {
            path: first_path.display().to_string(),
        })?;
    if registry.resolve_extension(extension_of(&second_path)) != Some(language) {
        return Err(Error::LanguageMismatch {
            first: first_path.display().to_string(),
            second: second_path.display().to_string(),
        }
        .into());
    }

    let first_source = read_source(&first_path)?;
    let second_source = read_source(&second_path)?;
    let tokenize = args.options.tokenize;
    let first_tokens = tokenize_source(&registry, &first_source, ext, tokenize)?.unwrap_or_default();
    let second_tokens =
        tokenize_source(&registry, &second_source, ext, tokenize)?.unwrap_or_default();
    debug!(
        language = language.name(),
        first_tokens = first_tokens.len(),
        second_tokens = second_tokens.len(),
        "tokenized sources"
    );

    let comparison = compare_token_streams(
        &first_tokens,
        &second_tokens,
        &first_source,
        &second_source,
        args.options.marker,
    );
    let rendered = comparison.render(
        &first_source,
        &second_source,
        args.options.marker,
        &args.options.render,
    );

    print!("{}", format_token_columns(&first_tokens, &second_tokens));
    println!();
    print!(
        "{}",
        format_comparison(
            &first_path.display().to_string(),
            &second_path.display().to_string(),
            &rendered,
        )
    );
    Ok(0)
}
