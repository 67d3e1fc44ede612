use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, warn};

use crate::align::align;
use crate::error::{Error, Result};
use crate::language::{LanguageRegistry, SupportedLanguage};
use crate::token::Token;
use crate::tokenize::tokenize;
use crate::types::{FileMatch, FileReport, ProjectScan, ScanOptions, ScanStats, TokenizeOptions};

mod read;
mod walker;


/// Where a project's files come from: a directory, an extracted archive, a blob store...
pub trait ProjectSource {
    fn id(&self) -> &str;
    fn title(&self) -> &str;
    /// Relative `/`-separated paths of every file in the project.
    fn list_files(&self) -> Result<Vec<String>>;
    fn read_text(&self, path: &str) -> Result<String>;
}

/// A project stored as a directory tree.
#[derive(Debug, Clone)]
pub struct DirectoryProject {
    id: String,
    title: String,
    root: PathBuf,
    ignore_dirs: HashSet<String>,
    max_file_size: Option<u64>,
    respect_gitignore: bool,
}

impl DirectoryProject {
    /// Opens `root` as a project identified by `id`; the title is the directory name.
    pub fn open(
        id: impl Into<String>,
        root: impl Into<PathBuf>,
        options: &ScanOptions,
    ) -> Result<Self> {
        let id = id.into();
        let root = root.into();
        let meta =
            fs::metadata(&root).map_err(|err| Error::io(root.display().to_string(), err))?;
        if !meta.is_dir() {
            return Err(Error::NotADirectory(root.display().to_string()));
        }
        Ok(Self {
            title: project_title(&root, &id),
            id,
            root,
            ignore_dirs: options.ignore_dirs.clone(),
            max_file_size: options.max_file_size,
            respect_gitignore: options.respect_gitignore,
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ProjectSource for DirectoryProject {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn list_files(&self) -> Result<Vec<String>> {
        walker::list_project_files(&self.root, &self.ignore_dirs, self.respect_gitignore)
    }

    fn read_text(&self, path: &str) -> Result<String> {
        if !is_safe_relative_path(path) {
            return Err(Error::FileNotFound {
                path: path.to_string(),
            });
        }
        read::read_text_file(&self.root.join(path), path, self.max_file_size)
    }
}

fn project_title(root: &Path, id: &str) -> String {
    root.file_name()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| id.to_string())
}

pub(crate) fn make_rel_path(root: &Path, abs_path: &Path) -> String {
    match abs_path.strip_prefix(root) {
        Ok(rel) => rel.to_string_lossy().replace('\\', "/"),
        Err(_) => abs_path.to_string_lossy().replace('\\', "/"),
    }
}

fn is_safe_relative_path(raw: &str) -> bool {
    if raw.is_empty() {
        return false;
    }
    let path = Path::new(raw);
    if path.is_absolute() {
        return false;
    }
    path.components()
        .all(|component| matches!(component, Component::Normal(_)))
}

#[derive(Debug)]
struct TokenizedFile {
    path: String,
    language: SupportedLanguage,
    tokens: Vec<Token>,
}

struct LoadedProject<'a> {
    source: &'a dyn ProjectSource,
    files: Vec<TokenizedFile>,
}

enum Loaded {
    Unsupported,
    Empty,
    File(TokenizedFile),
}

fn load_file(
    registry: &LanguageRegistry,
    project: &dyn ProjectSource,
    path: &str,
    options: TokenizeOptions,
) -> Result<Loaded> {
    let Some(language) = registry.resolve_path(path) else {
        return Ok(Loaded::Unsupported);
    };
    let text = project.read_text(path)?;
    if text.is_empty() {
        return Ok(Loaded::Empty);
    }
    let tree = registry.parse_as(&text, language)?;
    let tokens = tokenize(&mut tree.walk(), options);
    // Empty streams would score 1.0 against each other.
    if tokens.is_empty() {
        return Ok(Loaded::Empty);
    }
    Ok(Loaded::File(TokenizedFile {
        path: path.to_string(),
        language,
        tokens,
    }))
}

fn record_failure(failures: &mut Vec<String>, project: &dyn ProjectSource) {
    if !failures.iter().any(|id| id == project.id()) {
        failures.push(project.id().to_string());
    }
}

fn load_project<'a>(
    registry: &LanguageRegistry,
    project: &'a dyn ProjectSource,
    options: &ScanOptions,
    stats: &mut ScanStats,
    failures: &mut Vec<String>,
) -> LoadedProject<'a> {
    let mut loaded = LoadedProject {
        source: project,
        files: Vec::new(),
    };
    let paths = match project.list_files() {
        Ok(paths) => paths,
        Err(err) => {
            warn!(project = project.id(), "cannot list project files: {err}");
            record_failure(failures, project);
            return loaded;
        }
    };

    for path in paths {
        stats.candidate_files = stats.candidate_files.saturating_add(1);
        match load_file(registry, project, &path, options.tokenize) {
            Ok(Loaded::Unsupported) => {
                stats.skipped_unsupported = stats.skipped_unsupported.saturating_add(1);
            }
            Ok(Loaded::Empty) => {
                stats.skipped_empty = stats.skipped_empty.saturating_add(1);
            }
            Ok(Loaded::File(file)) => loaded.files.push(file),
            Err(err) => {
                warn!(project = project.id(), file = %path, "skipping file: {err}");
                stats.failed_files = stats.failed_files.saturating_add(1);
                record_failure(failures, project);
            }
        }
    }
    loaded
}

/// Compares every supported file of `project` against the files of `others` and reports
/// the pairs whose ratio reaches `options.threshold`.
///
/// Problems with the other projects never abort the scan: their ids are collected in
/// `failures` and the remaining files are still compared. Files that are empty, or yield no
/// tokens under `options.tokenize`, are never compared.
pub fn scan_project(
    registry: &LanguageRegistry,
    project: &dyn ProjectSource,
    others: &[&dyn ProjectSource],
    options: &ScanOptions,
) -> Result<ProjectScan> {
    options.validate()?;

    let mut stats = ScanStats::default();
    let mut failures = Vec::new();

    let paths = project.list_files()?;
    let loaded: Vec<LoadedProject<'_>> = others
        .iter()
        .filter(|other| other.id() != project.id())
        .map(|other| load_project(registry, *other, options, &mut stats, &mut failures))
        .collect();

    let mut files = Vec::new();
    for path in paths {
        stats.candidate_files = stats.candidate_files.saturating_add(1);
        let file = match load_file(registry, project, &path, options.tokenize) {
            Ok(Loaded::Unsupported) => {
                stats.skipped_unsupported = stats.skipped_unsupported.saturating_add(1);
                continue;
            }
            Ok(Loaded::Empty) => {
                stats.skipped_empty = stats.skipped_empty.saturating_add(1);
                files.push(FileReport {
                    file: path,
                    ratio: 0.0,
                    matches: Vec::new(),
                    failures: failures.clone(),
                });
                continue;
            }
            Ok(Loaded::File(file)) => file,
            Err(err) => {
                warn!(project = project.id(), file = %path, "skipping file: {err}");
                stats.failed_files = stats.failed_files.saturating_add(1);
                let mut file_failures = failures.clone();
                record_failure(&mut file_failures, project);
                files.push(FileReport {
                    file: path,
                    ratio: 0.0,
                    matches: Vec::new(),
                    failures: file_failures,
                });
                continue;
            }
        };
        files.push(compare_file(&file, &loaded, options, &mut stats, &failures));
    }

    let mut all_failures = failures;
    for report in &files {
        for id in &report.failures {
            if !all_failures.contains(id) {
                all_failures.push(id.clone());
            }
        }
    }

    info!(
        project = project.id(),
        files = files.len(),
        compared_pairs = stats.compared_pairs,
        failures = all_failures.len(),
        "plagiarism scan finished"
    );

    Ok(ProjectScan {
        files,
        failures: all_failures,
        stats,
    })
}

fn compare_file(
    file: &TokenizedFile,
    others: &[LoadedProject<'_>],
    options: &ScanOptions,
    stats: &mut ScanStats,
    failures: &[String],
) -> FileReport {
    let mut matches = Vec::new();
    for other in others {
        for other_file in &other.files {
            if other_file.language != file.language {
                continue;
            }
            stats.compared_pairs = stats.compared_pairs.saturating_add(1);
            let ratio = align(&file.tokens, &other_file.tokens).ratio;
            debug!(
                file = %file.path,
                other_project = other.source.id(),
                other_file = %other_file.path,
                ratio,
                "compared files"
            );
            if ratio < options.threshold {
                continue;
            }
            matches.push(FileMatch {
                project: other.source.id().to_string(),
                project_title: other.source.title().to_string(),
                file: other_file.path.clone(),
                ratio,
            });
        }
    }

    matches.sort_by(|a, b| {
        b.ratio
            .partial_cmp(&a.ratio)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.project.cmp(&b.project))
            .then_with(|| a.file.cmp(&b.file))
    });

    let ratio = if matches.is_empty() {
        0.0
    } else {
        matches.iter().map(|m| m.ratio).sum::<f64>() / matches.len() as f64
    };

    FileReport {
        file: file.path.clone(),
        ratio,
        matches,
        failures: failures.to_vec(),
    }
}
