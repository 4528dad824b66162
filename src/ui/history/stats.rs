use super::types::{DiffEntry, DiffKind};
use similar::{ChangeTag, TextDiff};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DiffStats {
    pub added_lines: usize,
    pub removed_lines: usize,
    pub modified_lines: usize,
    /// Characters inserted across all entries
    pub added_chars: usize,
    /// Characters deleted across all entries
    pub removed_chars: usize,
}

impl DiffStats {
    pub fn is_empty(&self) -> bool {
        self.added_lines + self.removed_lines + self.modified_lines == 0
    }

    /// Line count per kind, in summary order
    pub fn line_counts(&self) -> [(DiffKind, usize); 3] {
        [
            (DiffKind::Added, self.added_lines),
            (DiffKind::Removed, self.removed_lines),
            (DiffKind::Modified, self.modified_lines),
        ]
    }
}

/// Count entries per kind plus character-level statistics
pub fn calculate_stats(entries: &[DiffEntry]) -> DiffStats {
    let mut stats = DiffStats::default();

    for entry in entries {
        match entry.kind {
            DiffKind::Added => stats.added_lines += 1,
            DiffKind::Removed => stats.removed_lines += 1,
            DiffKind::Modified => stats.modified_lines += 1,
        }

        let diff = TextDiff::from_chars(&entry.old_line, &entry.new_line);
        for change in diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Insert => stats.added_chars += change.value().chars().count(),
                ChangeTag::Delete => stats.removed_chars += change.value().chars().count(),
                ChangeTag::Equal => {}
            }
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::history::diff::line_diff;

    #[test]
    fn stats_counting_english() {
        let stats = calculate_stats(&line_diff("hello cat\nsame", "hello dog\nsame\nextra"));
        assert_eq!(stats.modified_lines, 1);
        assert_eq!(stats.added_lines, 1);
        assert_eq!(stats.removed_lines, 0);
        // "cat" -> "dog" plus the new "extra" line
        assert_eq!(stats.removed_chars, 3);
        assert_eq!(stats.added_chars, 3 + 5);
    }

    #[test]
    fn stats_counting_chinese() {
        let stats = calculate_stats(&line_diff("我爱你", "我不爱你"));
        assert_eq!(stats.modified_lines, 1);
        assert_eq!(stats.added_chars, 1);
        assert_eq!(stats.removed_chars, 0);
    }

    #[test]
    fn summary_lists_every_kind() {
        let stats = calculate_stats(&line_diff("a\nb\nc", "a\nX"));
        assert_eq!(
            stats.line_counts(),
            [
                (DiffKind::Added, 0),
                (DiffKind::Removed, 1),
                (DiffKind::Modified, 1)
            ]
        );
        assert_eq!(stats.line_counts()[2].0.label(), "Modified");
    }

    #[test]
    fn no_entries_no_stats() {
        let stats = calculate_stats(&[]);
        assert!(stats.is_empty());
        assert_eq!(stats, DiffStats::default());
    }
}
