use std::fmt;

/// How a single line differs between two versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffKind {
    Added,
    Removed,
    Modified,
}

impl DiffKind {
    pub fn label(self) -> &'static str {
        match self {
            DiffKind::Added => "Added",
            DiffKind::Removed => "Removed",
            DiffKind::Modified => "Modified",
        }
    }
}

impl fmt::Display for DiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One divergent line. Derived on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    /// 1-based
    pub line_number: usize,
    pub old_line: String,
    pub new_line: String,
    pub kind: DiffKind,
}

/// Which side of a comparison a version was picked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareSlot {
    First,
    Second,
}

impl CompareSlot {
    pub fn label(self) -> &'static str {
        match self {
            CompareSlot::First => "V1",
            CompareSlot::Second => "V2",
        }
    }
}

/// A run of characters inside a modified line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineSpan {
    Same(String),
    Deleted(String),
    Inserted(String),
}
