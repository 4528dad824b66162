use super::types::{DiffEntry, DiffKind, InlineSpan};
use similar::{ChangeTag, TextDiff};

/// Compare two contents line by line, by position.
///
/// Lines are aligned on their index, not on content: inserting a line in
/// the middle shows every following line as `Modified` rather than as an
/// `Added`/`Removed` pair. A missing line on the shorter side counts as an
/// empty line, so the result never has more entries than the longer side
/// has lines, and it is empty exactly when both sides match line for line.
pub fn line_diff(old: &str, new: &str) -> Vec<DiffEntry> {
    let old_lines: Vec<&str> = old.split('\n').collect();
    let new_lines: Vec<&str> = new.split('\n').collect();
    let max_lines = old_lines.len().max(new_lines.len());

    let mut diff = Vec::new();
    for i in 0..max_lines {
        let old_line = old_lines.get(i).copied().unwrap_or("");
        let new_line = new_lines.get(i).copied().unwrap_or("");

        if old_line == new_line {
            continue;
        }

        let kind = if old_line.is_empty() {
            DiffKind::Added
        } else if new_line.is_empty() {
            DiffKind::Removed
        } else {
            DiffKind::Modified
        };

        diff.push(DiffEntry {
            line_number: i + 1,
            old_line: old_line.to_string(),
            new_line: new_line.to_string(),
            kind,
        });
    }

    diff
}

/// Character-level changes between the two sides of a modified line
/// (char granularity reads better than words for CJK text)
pub fn inline_changes(old_line: &str, new_line: &str) -> Vec<InlineSpan> {
    let diff = TextDiff::from_chars(old_line, new_line);
    let mut spans: Vec<InlineSpan> = Vec::new();

    for change in diff.iter_all_changes() {
        let text = change.value();
        // merge consecutive chars with the same tag
        let merged = match (change.tag(), spans.last_mut()) {
            (ChangeTag::Equal, Some(InlineSpan::Same(s)))
            | (ChangeTag::Delete, Some(InlineSpan::Deleted(s)))
            | (ChangeTag::Insert, Some(InlineSpan::Inserted(s))) => {
                s.push_str(text);
                true
            }
            _ => false,
        };
        if !merged {
            spans.push(match change.tag() {
                ChangeTag::Equal => InlineSpan::Same(text.to_string()),
                ChangeTag::Delete => InlineSpan::Deleted(text.to_string()),
                ChangeTag::Insert => InlineSpan::Inserted(text.to_string()),
            });
        }
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(line_number: usize, old: &str, new: &str, kind: DiffKind) -> DiffEntry {
        DiffEntry {
            line_number,
            old_line: old.to_string(),
            new_line: new.to_string(),
            kind,
        }
    }

    #[test]
    fn identical_contents_have_no_entries() {
        for content in ["", "a", "a\nb\nc", "\n\n", "  indented\n\ttab"] {
            assert!(line_diff(content, content).is_empty(), "{content:?}");
        }
    }

    #[test]
    fn modified_middle_line() {
        assert_eq!(
            line_diff("a\nb\nc", "a\nX\nc"),
            vec![entry(2, "b", "X", DiffKind::Modified)]
        );
    }

    #[test]
    fn appended_line_is_added() {
        assert_eq!(
            line_diff("a\nb", "a\nb\nc"),
            vec![entry(3, "", "c", DiffKind::Added)]
        );
    }

    #[test]
    fn truncated_line_is_removed() {
        assert_eq!(
            line_diff("a\nb\nc", "a"),
            vec![
                entry(2, "b", "", DiffKind::Removed),
                entry(3, "c", "", DiffKind::Removed),
            ]
        );
    }

    #[test]
    fn insertion_shifts_following_lines_into_modified() {
        let diff = line_diff("a\nb\nc", "a\nnew\nb\nc");
        assert_eq!(
            diff,
            vec![
                entry(2, "b", "new", DiffKind::Modified),
                entry(3, "c", "b", DiffKind::Modified),
                entry(4, "", "c", DiffKind::Added),
            ]
        );
    }

    #[test]
    fn kind_depends_only_on_which_side_is_empty() {
        // blank line filled in reads as an addition even mid-file
        let diff = line_diff("a\n\nc", "a\nb\nc");
        assert_eq!(diff, vec![entry(2, "", "b", DiffKind::Added)]);

        let diff = line_diff("a\nb\nc", "a\n\nc");
        assert_eq!(diff, vec![entry(2, "b", "", DiffKind::Removed)]);
    }

    #[test]
    fn empty_versus_content() {
        assert_eq!(
            line_diff("", "x\ny"),
            vec![entry(1, "", "x", DiffKind::Added), entry(2, "", "y", DiffKind::Added)]
        );
        assert_eq!(line_diff("x", ""), vec![entry(1, "x", "", DiffKind::Removed)]);
    }

    #[test]
    fn length_is_bounded_and_order_ascending() {
        let old = "one\ntwo\nthree\nfour";
        let new = "uno\ntwo\n\nfour\nfive\nsix";
        let diff = line_diff(old, new);
        let max = old.split('\n').count().max(new.split('\n').count());
        assert!(diff.len() <= max);
        assert!(diff.windows(2).all(|w| w[0].line_number < w[1].line_number));
        assert!(diff.iter().all(|e| e.old_line != e.new_line));
    }

    #[test]
    fn carriage_returns_are_content() {
        let diff = line_diff("a\r\nb", "a\nb");
        assert_eq!(diff, vec![entry(1, "a\r", "a", DiffKind::Modified)]);
    }

    #[test]
    fn inline_changes_merge_runs() {
        let spans = inline_changes("hello cat", "hello dog");
        assert_eq!(spans.first(), Some(&InlineSpan::Same("hello ".to_string())));
        let deleted: String = spans
            .iter()
            .filter_map(|s| match s {
                InlineSpan::Deleted(t) => Some(t.as_str()),
                _ => None,
            })
            .collect();
        let inserted: String = spans
            .iter()
            .filter_map(|s| match s {
                InlineSpan::Inserted(t) => Some(t.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(deleted, "cat");
        assert_eq!(inserted, "dog");
    }

    #[test]
    fn inline_changes_cjk() {
        let spans = inline_changes("我爱你", "我不爱你");
        assert_eq!(
            spans,
            vec![
                InlineSpan::Same("我".to_string()),
                InlineSpan::Inserted("不".to_string()),
                InlineSpan::Same("爱你".to_string()),
            ]
        );
    }
}
