use std::fmt::Write as _;

use colored::{ColoredString, Colorize};
use similar::{ChangeTag, TextDiff};

use fieldcmp_types::{ComparisonResult, DiffKind, Difference, Value};

use crate::error::ReportResult;
use crate::reporter::Reporter;

/// Longest string (in chars) that still gets an inline character diff.
const INLINE_DIFF_LIMIT: usize = 200;

/// Multi-line report for terminals, one block per difference.
#[derive(Clone, Debug, Default)]
pub struct TextReporter {
    color: bool,
}

impl TextReporter {
    /// Plain output without ANSI escapes.
    pub fn plain() -> Self {
        Self { color: false }
    }

    /// Output colored with ANSI escapes.
    pub fn colored() -> Self {
        Self { color: true }
    }

    fn paint(&self, text: &str, style: fn(&str) -> ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn kind_label(&self, kind: DiffKind) -> String {
        let style: fn(&str) -> ColoredString = match kind {
            DiffKind::ExtraLeft | DiffKind::ExtraRight => |s| s.yellow(),
            DiffKind::ValueDiff => |s| s.red(),
            DiffKind::TypeDiff => |s| s.magenta(),
            DiffKind::CustomDiff => |s| s.cyan(),
        };
        self.paint(kind.as_str(), style)
    }

    fn render_difference(&self, out: &mut String, n: usize, diff: &Difference) {
        let path = diff.path().map(|p| p.to_string()).unwrap_or_default();
        let path = if path.is_empty() { "<root>".to_string() } else { path };
        let _ = writeln!(
            out,
            "[{}] {} {}",
            n,
            self.kind_label(diff.kind),
            self.paint(&path, |s| s.bold())
        );

        if let (Some(l), Some(r)) = (&diff.left_path, &diff.right_path) {
            if l != r {
                let _ = writeln!(out, "    paths: {l} <-> {r}");
            }
        }
        if let Some(value) = &diff.left_value {
            let ty = diff.left_type.as_ref().map(|t| t.to_string()).unwrap_or_default();
            let _ = writeln!(out, "    left:  {}  ({})", value, self.paint(&ty, |s| s.dimmed()));
        }
        if let Some(value) = &diff.right_value {
            let ty = diff.right_type.as_ref().map(|t| t.to_string()).unwrap_or_default();
            let _ = writeln!(out, "    right: {}  ({})", value, self.paint(&ty, |s| s.dimmed()));
        }
        if diff.kind == DiffKind::ValueDiff {
            if let (Some(Value::Str(a)), Some(Value::Str(b))) = (&diff.left_value, &diff.right_value) {
                if a.chars().count() <= INLINE_DIFF_LIMIT && b.chars().count() <= INLINE_DIFF_LIMIT {
                    let _ = writeln!(out, "    diff:  {}", self.inline_diff(a, b));
                }
            }
        }
        if !diff.array_indices.is_empty() {
            let crumbs: Vec<String> = diff.array_indices.iter().map(|i| i.to_string()).collect();
            let _ = writeln!(out, "    in:    {}", crumbs.join(" > "));
        }
        let _ = writeln!(out, "    {}", diff.message);
    }

    /// Character-level diff of two strings: removals as `[-x-]`, insertions
    /// as `{+x+}`.
    fn inline_diff(&self, old: &str, new: &str) -> String {
        let diff = TextDiff::from_chars(old, new);
        let mut out = String::new();
        let mut run = String::new();
        let mut run_tag = ChangeTag::Equal;

        for change in diff.iter_all_changes() {
            if change.tag() != run_tag && !run.is_empty() {
                out.push_str(&self.render_run(run_tag, &run));
                run.clear();
            }
            run_tag = change.tag();
            run.push_str(change.value());
        }
        if !run.is_empty() {
            out.push_str(&self.render_run(run_tag, &run));
        }
        out
    }

    fn render_run(&self, tag: ChangeTag, text: &str) -> String {
        match tag {
            ChangeTag::Equal => text.to_string(),
            ChangeTag::Delete => self.paint(&format!("[-{text}-]"), |s| s.red()),
            ChangeTag::Insert => self.paint(&format!("{{+{text}+}}"), |s| s.green()),
        }
    }
}

impl Reporter for TextReporter {
    fn render(&self, result: &ComparisonResult) -> ReportResult<String> {
        let mut out = String::new();
        let _ = writeln!(out, "=== {} ===", self.paint(&result.case_name, |s| s.bold()));

        if !result.has_diff {
            let _ = writeln!(out, "{} no differences", self.paint("✓", |s| s.green().bold()));
            return Ok(out);
        }

        let counts: Vec<String> = [
            DiffKind::ExtraLeft,
            DiffKind::ExtraRight,
            DiffKind::ValueDiff,
            DiffKind::TypeDiff,
            DiffKind::CustomDiff,
        ]
        .into_iter()
        .filter_map(|kind| {
            let n = result.count(kind);
            (n > 0).then(|| format!("{n} {kind}"))
        })
        .collect();
        let _ = writeln!(
            out,
            "{} {} difference(s): {}",
            self.paint("✗", |s| s.red().bold()),
            result.len(),
            counts.join(", ")
        );

        for (i, diff) in result.differences.iter().enumerate() {
            out.push('\n');
            self.render_difference(&mut out, i + 1, diff);
        }
        Ok(out)
    }
}
