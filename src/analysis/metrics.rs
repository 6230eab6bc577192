// src/analysis/metrics.rs
//! Text-level size and complexity heuristics.
//!
//! Nothing here builds a syntax tree. Decision points are counted from
//! keywords and operators, nesting from brace depth, which is enough to rank
//! files against each other.

use regex::Regex;
use std::sync::LazyLock;

static BRANCH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(if|elif|for|while|case|catch|match)\b|&&|\|\||\s\?\s")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});

static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(import\b|use\s+[\w:{]|from\s+[\w.]+\s+import\b)|\brequire\(")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});

static EXPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(export\b|module\.exports\b|pub\s+(fn|struct|enum|trait|mod|const|type|use)\b)")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});

static STATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\buse(State|Reducer)\s*[<(]").unwrap_or_else(|_| panic!("Invalid Regex"))
});

/// Nesting beyond this depth adds one complexity point per level.
const FREE_NESTING: usize = 3;

#[must_use]
pub fn count_lines(content: &str) -> usize {
    content.lines().count()
}

/// Heuristic cyclomatic complexity: `1 + decision points + excess nesting`.
#[must_use]
pub fn complexity(content: &str) -> usize {
    let decisions: usize = code_lines(content)
        .map(|line| BRANCH_RE.find_iter(line).count())
        .sum();
    1 + decisions + max_brace_depth(content).saturating_sub(FREE_NESTING)
}

/// Deepest `{`/`(`-free brace nesting seen in the file.
#[must_use]
pub fn max_brace_depth(content: &str) -> usize {
    let mut depth = 0usize;
    let mut max = 0usize;
    for line in code_lines(content) {
        for ch in line.chars() {
            match ch {
                '{' => {
                    depth += 1;
                    max = max.max(depth);
                }
                '}' => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
    }
    max
}

#[must_use]
pub fn count_imports(content: &str) -> usize {
    content.lines().filter(|l| IMPORT_RE.is_match(l)).count()
}

#[must_use]
pub fn count_exports(content: &str) -> usize {
    content.lines().filter(|l| EXPORT_RE.is_match(l)).count()
}

/// Number of `useState`/`useReducer` calls.
#[must_use]
pub fn count_state_hooks(content: &str) -> usize {
    STATE_RE.find_iter(content).count()
}

/// `171 − 5.2·ln(volume) − 0.23·complexity − 16.2·ln(lines)`, clamped to `[0, 100]`,
/// with `volume = lines · log2(max(complexity, 1))`.
///
/// Logarithm arguments are floored at 1 so empty or branch-free files score
/// high instead of producing infinities.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn maintainability_index(lines: usize, complexity: usize) -> f64 {
    let lines_f = lines as f64;
    let complexity_f = complexity.max(1) as f64;
    let volume = lines_f * complexity_f.log2();
    let raw = 171.0 - 5.2 * volume.max(1.0).ln() - 0.23 * complexity_f - 16.2 * lines_f.max(1.0).ln();
    raw.clamp(0.0, 100.0)
}

fn code_lines(content: &str) -> impl Iterator<Item = &str> {
    content.lines().filter(|line| {
        let t = line.trim_start();
        !(t.starts_with("//") || t.starts_with("/*") || t.starts_with('*') || t.starts_with('#'))
    })
}
