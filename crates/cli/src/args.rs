use std::path::PathBuf;

use plag_check_core::{
    CompareOptions, MIN_THRESHOLD, Marker, RenderOptions, ScanOptions, TokenizeOptions,
};

const HELP_TEXT: &str = concat!(
    "plag-check (token-level plagiarism detection for Python / JavaScript projects)\n",
    "\n",
    "Usage:\n",
    "  plag-check scan [options] <project> <other-project ...>\n",
    "  plag-check compare [options] <project-a> <file-a> <project-b> <file-b>\n",
    "  plag-check tokens [options] <file-a> <file-b>\n",
    "\n",
    "Tokenizer options (all commands):\n",
    "  --all-nodes             Keep named and anonymous nodes (default: named only)\n",
    "  --anonymous-only        Keep anonymous nodes only\n",
    "  --child-only            Keep only the deepest node of each first-child chain\n",
    "\n",
    "Scan options:\n",
    "  --threshold <f>         Report pairs at or above this ratio: 0.3..1 (default: 0.3)\n",
    "  --max-file-size <n>     Skip files larger than n bytes (default: 10485760)\n",
    "  --ignore-dir <name>     Add an ignored directory name (repeatable)\n",
    "  --no-gitignore          Do not respect .gitignore rules\n",
    "  --json                  Output JSON\n",
    "  --stats                 Include scan stats (JSON) or print to stderr\n",
    "  --strict                Exit non-zero if any project could not be compared\n",
    "\n",
    "Compare / tokens options:\n",
    "  --start-tokens <s>      Opening delimiter of a matched run (default: {)\n",
    "  --end-tokens <s>        Closing delimiter of a matched run (default: })\n",
    "  --color                 Highlight matched runs with ANSI colors\n",
    "  --html                  HTML-escape the rendered sources\n",
    "  --marker <c>            ASCII character used to mark matches (default: @)\n",
    "  --json                  Output JSON (compare only)\n",
    "\n",
    "  -V, --version           Show version\n",
    "  -h, --help              Show help\n",
    "\n",
    "Notes:\n",
    "  - Logging goes to stderr; set RUST_LOG (e.g. RUST_LOG=plag_check=debug) to tune it\n",
    "\n",
    "Examples:\n",
    "  plag-check scan --threshold 0.8 submissions/alice submissions/bob submissions/carol\n",
    "  plag-check compare --color submissions/alice main.py submissions/bob solution.py\n",
    "  plag-check tokens --child-only a.js b.js\n",
    "\n"
);

pub(crate) const COLOR_START: &str = "\x1b[94m";
pub(crate) const COLOR_END: &str = "\x1b[0m";

pub(crate) fn print_help() {
    print!("{HELP_TEXT}");
}

#[derive(Debug, Clone)]
pub(crate) enum Command {
    Help,
    Version,
    Scan(ScanArgs),
    Compare(CompareArgs),
    Tokens(TokensArgs),
}

#[derive(Debug, Clone)]
pub(crate) struct ScanArgs {
    pub(crate) json: bool,
    pub(crate) stats: bool,
    pub(crate) strict: bool,
    pub(crate) project: PathBuf,
    pub(crate) others: Vec<PathBuf>,
    pub(crate) options: ScanOptions,
}

#[derive(Debug, Clone)]
pub(crate) struct CompareArgs {
    pub(crate) json: bool,
    pub(crate) first_project: PathBuf,
    pub(crate) first_file: String,
    pub(crate) second_project: PathBuf,
    pub(crate) second_file: String,
    pub(crate) options: CompareOptions,
}

#[derive(Debug, Clone)]
pub(crate) struct TokensArgs {
    pub(crate) first_file: PathBuf,
    pub(crate) second_file: PathBuf,
    pub(crate) options: CompareOptions,
}

fn parse_u64(name: &str, raw: &str) -> Result<u64, String> {
    raw.parse::<u64>()
        .map_err(|_| format!("{name} must be an integer"))
}

fn parse_threshold(raw: &str) -> Result<f64, String> {
    let value = raw
        .parse::<f64>()
        .map_err(|_| "--threshold must be a number".to_string())?;
    if !value.is_finite() || !(MIN_THRESHOLD..=1.0).contains(&value) {
        return Err(format!("--threshold must be {MIN_THRESHOLD}..1"));
    }
    Ok(value)
}

fn parse_marker(raw: &str) -> Result<Marker, String> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Marker::new(ch).map_err(|err| err.to_string()),
        _ => Err("--marker must be a single character".to_string()),
    }
}

fn value<'a>(argv: &'a [String], i: usize, name: &str) -> Result<&'a str, String> {
    argv.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| format!("{name} requires a value"))
}

/// Tokenizer flags every command understands.
#[derive(Debug, Default)]
struct TokenizeFlags {
    all_nodes: bool,
    anonymous_only: bool,
    child_only: bool,
}

impl TokenizeFlags {
    fn accept(&mut self, arg: &str) -> bool {
        match arg {
            "--all-nodes" => self.all_nodes = true,
            "--anonymous-only" => self.anonymous_only = true,
            "--child-only" => self.child_only = true,
            _ => return false,
        }
        true
    }

    fn finish(self) -> Result<TokenizeOptions, String> {
        if self.all_nodes && self.anonymous_only {
            return Err("--all-nodes conflicts with --anonymous-only".to_string());
        }
        let is_named = if self.all_nodes {
            None
        } else if self.anonymous_only {
            Some(false)
        } else {
            Some(true)
        };
        Ok(TokenizeOptions {
            child_only: self.child_only,
            is_named,
        })
    }
}

/// Rendering flags shared by `compare` and `tokens`.
#[derive(Debug, Default)]
struct RenderFlags {
    start_tokens: Option<String>,
    end_tokens: Option<String>,
    color: bool,
    html: bool,
    marker: Option<Marker>,
}

impl RenderFlags {
    /// Returns how many arguments were consumed, 0 when `argv[i]` is not a render flag.
    fn accept(&mut self, argv: &[String], i: usize) -> Result<usize, String> {
        match argv[i].as_str() {
            "--start-tokens" => {
                self.start_tokens = Some(value(argv, i, "--start-tokens")?.to_string());
                Ok(2)
            }
            "--end-tokens" => {
                self.end_tokens = Some(value(argv, i, "--end-tokens")?.to_string());
                Ok(2)
            }
            "--marker" => {
                self.marker = Some(parse_marker(value(argv, i, "--marker")?)?);
                Ok(2)
            }
            "--color" => {
                self.color = true;
                Ok(1)
            }
            "--html" => {
                self.html = true;
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    fn finish(self, tokenize: TokenizeOptions) -> CompareOptions {
        let defaults = RenderOptions::default();
        let (default_start, default_end) = if self.color {
            (COLOR_START.to_string(), COLOR_END.to_string())
        } else {
            (defaults.start_tokens, defaults.end_tokens)
        };
        CompareOptions {
            tokenize,
            marker: self.marker.unwrap_or_default(),
            render: RenderOptions {
                start_tokens: self.start_tokens.unwrap_or(default_start),
                end_tokens: self.end_tokens.unwrap_or(default_end),
                html_encoded: self.html,
            },
        }
    }
}

pub(crate) fn parse_args(argv: &[String]) -> Result<Command, String> {
    let Some(first) = argv.first() else {
        return Ok(Command::Help);
    };
    let rest = &argv[1..];
    match first.as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "-V" | "--version" => Ok(Command::Version),
        "scan" => parse_scan(rest),
        "compare" => parse_compare(rest),
        "tokens" => parse_tokens(rest),
        other if other.starts_with('-') => Err(format!("Unknown option: {other}")),
        other => Err(format!("Unknown command: {other}")),
    }
}

fn is_help(arg: &str) -> bool {
    arg == "-h" || arg == "--help"
}

fn parse_scan(argv: &[String]) -> Result<Command, String> {
    let mut positional: Vec<PathBuf> = Vec::new();
    let mut ignore_dirs: Vec<String> = Vec::new();
    let mut tokenize = TokenizeFlags::default();
    let mut json = false;
    let mut stats = false;
    let mut strict = false;
    let mut respect_gitignore = true;
    let mut threshold: Option<f64> = None;
    let mut max_file_size: Option<u64> = None;

    let mut i = 0;
    while i < argv.len() {
        let arg = &argv[i];
        if arg == "--" {
            positional.extend(argv[(i + 1)..].iter().map(PathBuf::from));
            break;
        }
        if is_help(arg) {
            return Ok(Command::Help);
        }
        if tokenize.accept(arg) {
            i += 1;
            continue;
        }
        match arg.as_str() {
            "--json" => json = true,
            "--stats" => stats = true,
            "--strict" => strict = true,
            "--no-gitignore" => respect_gitignore = false,
            "--gitignore" => respect_gitignore = true,
            "--threshold" => {
                threshold = Some(parse_threshold(value(argv, i, "--threshold")?)?);
                i += 1;
            }
            "--max-file-size" => {
                let raw = value(argv, i, "--max-file-size")?;
                max_file_size = Some(parse_u64("--max-file-size", raw)?);
                i += 1;
            }
            "--ignore-dir" => {
                ignore_dirs.push(value(argv, i, "--ignore-dir")?.to_string());
                i += 1;
            }
            _ if arg.starts_with('-') => return Err(format!("Unknown option: {arg}")),
            _ => positional.push(PathBuf::from(arg)),
        }
        i += 1;
    }

    if positional.len() < 2 {
        return Err("scan requires a project and at least one other project".to_string());
    }
    let project = positional.remove(0);

    let mut options = ScanOptions {
        tokenize: tokenize.finish()?,
        respect_gitignore,
        ..ScanOptions::default()
    };
    if let Some(threshold) = threshold {
        options.threshold = threshold;
    }
    if let Some(max_file_size) = max_file_size {
        options.max_file_size = Some(max_file_size);
    }
    options.ignore_dirs.extend(ignore_dirs);

    Ok(Command::Scan(ScanArgs {
        json,
        stats,
        strict,
        project,
        others: positional,
        options,
    }))
}

fn parse_compare(argv: &[String]) -> Result<Command, String> {
    let mut positional: Vec<String> = Vec::new();
    let mut tokenize = TokenizeFlags::default();
    let mut render = RenderFlags::default();
    let mut json = false;

    let mut i = 0;
    while i < argv.len() {
        let arg = &argv[i];
        if arg == "--" {
            positional.extend(argv[(i + 1)..].iter().cloned());
            break;
        }
        if is_help(arg) {
            return Ok(Command::Help);
        }
        if tokenize.accept(arg) {
            i += 1;
            continue;
        }
        let consumed = render.accept(argv, i)?;
        if consumed > 0 {
            i += consumed;
            continue;
        }
        if arg == "--json" {
            json = true;
        } else if arg.starts_with('-') {
            return Err(format!("Unknown option: {arg}"));
        } else {
            positional.push(arg.clone());
        }
        i += 1;
    }

    let [first_project, first_file, second_project, second_file]: [String; 4] = positional
        .try_into()
        .map_err(|_| "compare requires <project-a> <file-a> <project-b> <file-b>".to_string())?;

    Ok(Command::Compare(CompareArgs {
        json,
        first_project: PathBuf::from(first_project),
        first_file,
        second_project: PathBuf::from(second_project),
        second_file,
        options: render.finish(tokenize.finish()?),
    }))
}

fn parse_tokens(argv: &[String]) -> Result<Command, String> {
    let mut positional: Vec<PathBuf> = Vec::new();
    let mut tokenize = TokenizeFlags::default();
    let mut render = RenderFlags::default();

    let mut i = 0;
    while i < argv.len() {
        let arg = &argv[i];
        if arg == "--" {
            positional.extend(argv[(i + 1)..].iter().map(PathBuf::from));
            break;
        }
        if is_help(arg) {
            return Ok(Command::Help);
        }
        if tokenize.accept(arg) {
            i += 1;
            continue;
        }
        let consumed = render.accept(argv, i)?;
        if consumed > 0 {
            i += consumed;
            continue;
        }
        if arg.starts_with('-') {
            return Err(format!("Unknown option: {arg}"));
        }
        positional.push(PathBuf::from(arg));
        i += 1;
    }

    let [first_file, second_file]: [PathBuf; 2] = positional
        .try_into()
        .map_err(|_| "tokens requires <file-a> <file-b>".to_string())?;

    Ok(Command::Tokens(TokensArgs {
        first_file,
        second_file,
        options: render.finish(tokenize.finish()?),
    }))
}
