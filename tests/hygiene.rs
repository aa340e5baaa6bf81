//! Hygiene: source-tree budgets for panics and swallowed results.
//!
//! Scans `src/` (excluding `*_test.rs`) for patterns that can crash the page
//! or hide a failure. Budgets only go down. The `let _ =` and `.ok()` budgets
//! cover DOM writes whose failure has no recovery and optional lookups that
//! degrade to a no-op.

use std::fs;
use std::path::Path;

struct Budget {
    pattern: &'static str,
    max: usize,
    why: &'static str,
}

const BUDGETS: &[Budget] = &[
    Budget {
        pattern: ".unwrap()",
        max: 0,
        why: "panics abort the whole page script",
    },
    Budget {
        pattern: ".expect(",
        max: 0,
        why: "panics abort the whole page script",
    },
    Budget {
        pattern: "panic!(",
        max: 0,
        why: "panics abort the whole page script",
    },
    Budget {
        pattern: "unreachable!(",
        max: 0,
        why: "panics abort the whole page script",
    },
    Budget {
        pattern: "todo!(",
        max: 0,
        why: "stubs must not ship",
    },
    Budget {
        pattern: "unimplemented!(",
        max: 0,
        why: "stubs must not ship",
    },
    Budget {
        pattern: "let _ =",
        max: 11,
        why: "discarded results need a reason",
    },
    Budget {
        pattern: ".ok()",
        max: 10,
        why: "discarded errors need a reason",
    },
    Budget {
        pattern: "#[allow(dead_code)]",
        max: 0,
        why: "delete unused code instead",
    },
];

struct SourceFile {
    path: String,
    content: String,
}

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

#[test]
fn source_tree_is_found() {
    assert!(!source_files().is_empty(), "run from the crate root");
}

#[test]
fn budgets_hold() {
    let files = source_files();
    let mut failures = Vec::new();
    for budget in BUDGETS {
        let found = hits(&files, budget.pattern);
        let count: usize = found.iter().map(|(_, c)| c).sum();
        if count > budget.max {
            let detail = found
                .iter()
                .map(|(path, c)| format!("    {path}: {c}"))
                .collect::<Vec<_>>()
                .join("\n");
            failures.push(format!(
                "{} budget exceeded ({}): found {count}, max {}\n{detail}",
                budget.pattern, budget.why, budget.max
            ));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}
