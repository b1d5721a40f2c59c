//! Non-fatal consistency checks over a loaded index.
//!
//! Loading only rejects structurally broken data. The checks here report
//! ordering and labelling problems that a search widget tolerates but that
//! usually point at a generator bug.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::record::IndexRecord;
use super::store::SearchIndexStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LintKind {
    /// A page title reappears after another page started.
    PageNotContiguous,
    /// Records of one page run point at different paths.
    MixedPagePaths,
    /// Category is neither `page` nor `section`.
    UnknownCategory,
    /// A `section` record with an empty title.
    UntitledSection,
}

impl fmt::Display for LintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PageNotContiguous => "page-not-contiguous",
            Self::MixedPagePaths => "mixed-page-paths",
            Self::UnknownCategory => "unknown-category",
            Self::UntitledSection => "untitled-section",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintIssue {
    /// Position of the offending record.
    pub record: usize,
    pub kind: LintKind,
    pub message: String,
}

impl fmt::Display for LintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} [{}] {}", self.record, self.kind, self.message)
    }
}

/// Run every check, returning issues ordered by record position.
pub fn lint(store: &SearchIndexStore) -> Vec<LintIssue> {
    let mut issues = Vec::new();

    // first group start per page title
    let mut seen_pages: IndexMap<&str, usize> = IndexMap::new();
    for group in store.pages() {
        if let Some(&first) = seen_pages.get(group.title) {
            issues.push(LintIssue {
                record: group.start,
                kind: LintKind::PageNotContiguous,
                message: format!(
                    "page '{}' continues here after starting at record #{first}",
                    group.title
                ),
            });
        } else {
            seen_pages.insert(group.title, group.start);
        }

        if let Some(first) = group.records.first() {
            let expected = first.path();
            for (offset, record) in group.records.iter().enumerate() {
                if record.path() != expected {
                    issues.push(LintIssue {
                        record: group.start + offset,
                        kind: LintKind::MixedPagePaths,
                        message: format!(
                            "page '{}' points at '{}' but started at '{expected}'",
                            group.title,
                            record.path()
                        ),
                    });
                }
            }
        }
    }

    for (position, record) in store.all().enumerate() {
        check_record(position, record, &mut issues);
    }

    issues.sort_by_key(|issue| issue.record);
    tracing::debug!(target: "lint", "{} issues in {} records", issues.len(), store.len());
    issues
}

fn check_record(position: usize, record: &IndexRecord, issues: &mut Vec<LintIssue>) {
    if !record.category.is_known() {
        issues.push(LintIssue {
            record: position,
            kind: LintKind::UnknownCategory,
            message: format!("unknown category '{}'", record.category),
        });
    }
    if record.is_section() && record.title.is_empty() {
        issues.push(LintIssue {
            record: position,
            kind: LintKind::UntitledSection,
            message: format!("section at '{}' has no title", record.location),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(records: Vec<IndexRecord>) -> SearchIndexStore {
        SearchIndexStore::from_records(records)
    }

    #[test]
    fn test_clean_index_has_no_issues() {
        let store = store(vec![
            IndexRecord::new("pf.html#Filter", "Filter", "Filter", "", "section"),
            IndexRecord::new("pf.html", "Filter", "Filter", "Text.", "page"),
            IndexRecord::new("index.html", "Home", "Home", "", "page"),
        ]);
        assert!(lint(&store).is_empty());
    }

    #[test]
    fn test_split_page_is_reported() {
        let store = store(vec![
            IndexRecord::new("a.html", "A", "A", "", "page"),
            IndexRecord::new("b.html", "B", "B", "", "page"),
            IndexRecord::new("a.html", "A", "A", "late", "page"),
        ]);
        let issues = lint(&store);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, LintKind::PageNotContiguous);
        assert_eq!(issues[0].record, 2);
        assert!(issues[0].message.contains("#0"));
    }

    #[test]
    fn test_mixed_paths_and_labels() {
        let store = store(vec![
            IndexRecord::new("a.html", "A", "A", "", "page"),
            IndexRecord::new("other.html#X", "A", "", "", "section"),
            IndexRecord::new("a.html", "A", "A", "", "docstring"),
        ]);
        let kinds: Vec<_> = lint(&store).into_iter().map(|i| (i.record, i.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                (1, LintKind::MixedPagePaths),
                (1, LintKind::UntitledSection),
                (2, LintKind::UnknownCategory),
            ]
        );
    }

    #[test]
    fn test_issue_display() {
        let issue = LintIssue {
            record: 4,
            kind: LintKind::UntitledSection,
            message: "section at 'a.html#x' has no title".to_string(),
        };
        assert_eq!(
            issue.to_string(),
            "#4 [untitled-section] section at 'a.html#x' has no title"
        );
    }
}
