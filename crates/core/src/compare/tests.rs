use super::*;

use crate::types::TokenizeOptions;

struct MemoryProject {
    id: &'static str,
    files: Vec<(&'static str, &'static str)>,
}

impl ProjectSource for MemoryProject {
    fn id(&self) -> &str {
        self.id
    }

    fn title(&self) -> &str {
        self.id
    }

    fn list_files(&self) -> Result<Vec<String>> {
        Ok(self.files.iter().map(|(p, _)| p.to_string()).collect())
    }

    fn read_text(&self, path: &str) -> Result<String> {
        self.files
            .iter()
            .find(|(p, _)| *p == path)
            .map(|(_, text)| text.to_string())
            .ok_or_else(|| Error::FileNotFound {
                path: path.to_string(),
            })
    }
}

fn leaves() -> CompareOptions {
    CompareOptions {
        tokenize: TokenizeOptions {
            child_only: true,
            is_named: None,
        },
        ..CompareOptions::default()
    }
}

#[test]
fn identical_sources_are_fully_marked() -> Result<()> {
    let registry = LanguageRegistry::new();
    let options = CompareOptions::default();
    let comparison = compare_sources(&registry, "x = 1", "x = 1", "py", &options)?
        .expect("python is supported");

    assert_eq!(comparison.ratio, 1.0);
    assert_eq!(comparison.blocks.len(), 1);
    let rendered = comparison.render("x = 1", "x = 1", options.marker, &options.render);
    assert_eq!(rendered.first_file, "{x = 1}");
    assert_eq!(rendered.second_file, "{x = 1}");
    Ok(())
}

#[test]
fn reordered_functions_still_match() -> Result<()> {
    let first = "def add(a, b):\n    return a + b\n\n\ndef sub(a, b):\n    return a - b\n";
    let second = "def sub(x, y):\n    return x - y\n\n\ndef add(x, y):\n    return x + y\n";
    let registry = LanguageRegistry::new();
    let comparison = compare_sources(&registry, first, second, ".py", &CompareOptions::default())?
        .expect("python is supported");
    assert!(comparison.ratio > 0.8, "ratio = {}", comparison.ratio);
    Ok(())
}

#[test]
fn leaf_tokens_mark_only_their_own_bytes() -> Result<()> {
    let registry = LanguageRegistry::new();
    let options = leaves();
    let comparison =
        compare_sources(&registry, "x = 1", "y = 2", "py", &options)?.expect("python is supported");

    assert_eq!(comparison.ratio, 1.0);
    assert_eq!(comparison.first.as_bytes(), b"@ @ @");
    let rendered = comparison.render("x = 1", "y = 2", options.marker, &options.render);
    assert_eq!(rendered.first_file, "{x} {=} {1}");
    assert_eq!(rendered.second_file, "{y} {=} {2}");
    Ok(())
}

#[test]
fn marked_sources_keep_their_length() -> Result<()> {
    let first = "const total = items.reduce((a, b) => a + b, 0);\nconsole.log('é', total);\n";
    let second = "let sum = 0;\nfor (const v of values) { sum += v; }\nconsole.log(sum);\n";
    let registry = LanguageRegistry::new();
    let comparison =
        compare_sources(&registry, first, second, "js", &leaves())?.expect("js is supported");

    assert_eq!(comparison.first.len(), first.len());
    assert_eq!(comparison.second.len(), second.len());
    assert!((0.0..=1.0).contains(&comparison.ratio));

    let plain = RenderOptions {
        start_tokens: String::new(),
        end_tokens: String::new(),
        html_encoded: false,
    };
    let rendered = comparison.render(first, second, Marker::default(), &plain);
    assert_eq!(rendered.first_file, first);
    assert_eq!(rendered.second_file, second);
    Ok(())
}

#[test]
fn unsupported_extension_yields_none() -> Result<()> {
    let registry = LanguageRegistry::new();
    let comparison = compare_sources(&registry, "class A {}", "class B {}", "java", &leaves())?;
    assert!(comparison.is_none());
    Ok(())
}

#[test]
fn project_files_are_compared_and_rendered() -> Result<()> {
    let registry = LanguageRegistry::new();
    let first = MemoryProject {
        id: "p1",
        files: vec![("a.py", "x = 1")],
    };
    let second = MemoryProject {
        id: "p2",
        files: vec![("b.py", "x = 1")],
    };
    let options = CompareOptions {
        render: RenderOptions {
            start_tokens: "<b>".to_string(),
            end_tokens: "</b>".to_string(),
            html_encoded: true,
        },
        ..CompareOptions::default()
    };

    let rendered = compare_project_files(&registry, &first, "a.py", &second, "b.py", &options)?;
    assert_eq!(rendered.ratio, 1.0);
    assert_eq!(rendered.first_file, "<b>x = 1</b>");
    assert_eq!(rendered.second_file, "<b>x = 1</b>");
    Ok(())
}

#[test]
fn project_file_comparison_rejects_bad_requests() {
    let registry = LanguageRegistry::new();
    let first = MemoryProject {
        id: "p1",
        files: vec![("a.py", "x = 1"), ("notes.txt", "x")],
    };
    let second = MemoryProject {
        id: "p2",
        files: vec![("b.py", "x = 1"), ("b.js", "x = 1;")],
    };
    let options = CompareOptions::default();

    assert!(matches!(
        compare_project_files(&registry, &first, "a.py", &first, "a.py", &options),
        Err(Error::SameProject(id)) if id == "p1"
    ));
    assert!(matches!(
        compare_project_files(&registry, &first, "notes.txt", &second, "b.py", &options),
        Err(Error::UnsupportedFile { path }) if path == "notes.txt"
    ));
    assert!(matches!(
        compare_project_files(&registry, &first, "a.py", &second, "b.js", &options),
        Err(Error::LanguageMismatch { .. })
    ));
    assert!(matches!(
        compare_project_files(&registry, &first, "a.py", &second, "missing.py", &options),
        Err(Error::FileNotFound { .. })
    ));
}
