// src/analysis/components.rs
//! Structural estimates for component and page files.

use crate::config::ThresholdConfig;
use crate::types::{ComponentMetrics, FileMetrics};
use regex::Regex;
use std::sync::LazyLock;

static COMPONENT_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:export\s+)?(?:default\s+)?(?:function|class|const)\s+([A-Z]\w*)")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});

static PROPS_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)(?:interface|type)\s+\w*Props\w*\s*=?\s*\{(.*?)\}")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});

static DESTRUCTURED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\(\s*\{([^}]*)\}\s*(?::[^)]*)?\)").unwrap_or_else(|_| panic!("Invalid Regex"))
});

static STATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\buse(State|Reducer)\s*[<(]|\bthis\.state\s*=").unwrap_or_else(|_| panic!("Invalid Regex"))
});

static EFFECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\buse(Layout|Insertion)?Effect\s*\(|\bcomponentDid(Mount|Update)\b")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});

static RENDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.map\(|&&\s*[(<]|\s\?\s*[(<]|\s:\s*[(<]").unwrap_or_else(|_| panic!("Invalid Regex"))
});

static BOUNDARY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bErrorBoundary\b|\bcomponentDidCatch\b|\bgetDerivedStateFromError\b")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});

/// Derives [`ComponentMetrics`] from component/page files. Stateless across files.
pub struct ComponentAnalyzer<'a> {
    thresholds: &'a ThresholdConfig,
}

impl<'a> ComponentAnalyzer<'a> {
    #[must_use]
    pub fn new(thresholds: &'a ThresholdConfig) -> Self {
        Self { thresholds }
    }

    /// Returns `None` for categories that carry no structural unit.
    #[must_use]
    pub fn analyze(&self, metrics: &FileMetrics, content: &str) -> Option<ComponentMetrics> {
        if !metrics.category.has_structure() {
            return None;
        }

        let threshold = self.thresholds.for_category(metrics.category);
        Some(ComponentMetrics {
            name: component_name(metrics, content),
            owning_file: metrics.path.clone(),
            props_count: count_props(content),
            state_variable_count: STATE_RE.find_iter(content).count(),
            effect_count: EFFECT_RE.find_iter(content).count(),
            render_complexity: RENDER_RE.find_iter(content).count(),
            has_error_boundary: BOUNDARY_RE.is_match(content),
            is_oversized: metrics.line_count > threshold,
        })
    }
}

fn component_name(metrics: &FileMetrics, content: &str) -> String {
    COMPONENT_NAME_RE
        .captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| {
            metrics
                .path
                .file_stem()
                .map_or_else(|| "Anonymous".to_string(), |s| s.to_string_lossy().into_owned())
        })
}

/// Fields of a `*Props` type when one is declared, else the first destructured
/// parameter list.
fn count_props(content: &str) -> usize {
    if let Some(block) = PROPS_BLOCK_RE.captures(content).and_then(|c| c.get(1)) {
        return block
            .as_str()
            .split([';', '\n', ','])
            .filter(|field| field.contains(':'))
            .count();
    }
    DESTRUCTURED_RE
        .captures(content)
        .and_then(|c| c.get(1))
        .map_or(0, |inner| {
            inner
                .as_str()
                .split(',')
                .filter(|p| !p.trim().is_empty())
                .count()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileCategory;
    use std::collections::BTreeSet;
    use std::path::PathBuf;

    fn file(path: &str, category: FileCategory, lines: usize) -> FileMetrics {
        FileMetrics {
            path: PathBuf::from(path),
            line_count: lines,
            complexity_score: 1,
            maintainability_index: 80.0,
            imports: 0,
            exports: 1,
            state_hooks: 0,
            category,
            issues: BTreeSet::new(),
        }
    }

    const PROFILE: &str = r"
interface ProfileProps {
  user: User;
  onSave: (u: User) => void;
  readOnly?: boolean;
}

export function Profile({ user, onSave, readOnly }: ProfileProps) {
  const [draft, setDraft] = useState(user);
  const [saving, setSaving] = useState(false);
  useEffect(() => { setDraft(user); }, [user]);
  return (
    <div>
      {saving && <Spinner />}
      {draft.tags.map(t => <Tag key={t} />)}
      {readOnly ? <span /> : <button />}
    </div>
  );
}
";

    #[test]
    fn estimates_structure() {
        let thresholds = ThresholdConfig::default();
        let analyzer = ComponentAnalyzer::new(&thresholds);
        let m = analyzer
            .analyze(&file("src/Profile.tsx", FileCategory::Component, 20), PROFILE)
            .unwrap();
        assert_eq!(m.name, "Profile");
        assert_eq!(m.props_count, 3);
        assert_eq!(m.state_variable_count, 2);
        assert_eq!(m.effect_count, 1);
        assert_eq!(m.render_complexity, 4);
        assert!(!m.has_error_boundary);
        assert!(!m.is_oversized);
    }

    #[test]
    fn destructured_props_without_interface() {
        let code = "const Row = ({ id, label, onClick }) => <li onClick={onClick}>{label}</li>;";
        assert_eq!(count_props(code), 3);
    }

    #[test]
    fn detects_error_boundary_and_oversize() {
        let thresholds = ThresholdConfig::default();
        let analyzer = ComponentAnalyzer::new(&thresholds);
        let code = "export default function Shell() { return <ErrorBoundary><Outlet /></ErrorBoundary>; }";
        let m = analyzer
            .analyze(&file("src/pages/Shell.tsx", FileCategory::Page, 301), code)
            .unwrap();
        assert!(m.has_error_boundary);
        assert!(m.is_oversized);
    }

    #[test]
    fn non_structural_categories_skipped() {
        let thresholds = ThresholdConfig::default();
        let analyzer = ComponentAnalyzer::new(&thresholds);
        assert!(analyzer
            .analyze(&file("src/useAuth.ts", FileCategory::Hook, 10), "")
            .is_none());
    }

    #[test]
    fn falls_back_to_file_stem() {
        let thresholds = ThresholdConfig::default();
        let analyzer = ComponentAnalyzer::new(&thresholds);
        let m = analyzer
            .analyze(&file("src/widget.tsx", FileCategory::Component, 3), "export default () => null;")
            .unwrap();
        assert_eq!(m.name, "widget");
    }
}
