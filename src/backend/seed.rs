//! Data written into a fresh local catalog.

use crate::models::{NoteDraft, NoteType};

pub const FOLDERS: [(&str, &str); 4] = [
    ("personal", "Personal"),
    ("work", "Work"),
    ("projects", "Projects"),
    ("learning", "Learning"),
];

pub const TAGS: [(&str, &str); 12] = [
    ("important", "bg-red-500"),
    ("javascript", "bg-yellow-500"),
    ("python", "bg-green-500"),
    ("react", "bg-blue-500"),
    ("idea", "bg-purple-500"),
    ("todo", "bg-orange-500"),
    ("backend", "bg-indigo-500"),
    ("frontend", "bg-pink-500"),
    ("algorithms", "bg-cyan-500"),
    ("projects", "bg-teal-500"),
    ("mobile", "bg-rose-500"),
    ("database", "bg-violet-500"),
];

/// A sample note and the later contents it goes through
pub struct SampleNote {
    pub draft: NoteDraft,
    pub edits: Vec<&'static str>,
}

pub fn sample_notes() -> Vec<SampleNote> {
    vec![
        SampleNote {
            draft: NoteDraft {
                title: "React environment setup".to_string(),
                content: "// Initial React setup\nnpm install react-router-dom".to_string(),
                note_type: NoteType::Code,
                folder_id: Some("work".to_string()),
                tag_names: tags(&["react", "frontend", "important"]),
            },
            edits: vec![
                "// Main dependencies\n\
                 npm install react-router-dom axios\n\
                 npm install -D tailwindcss\n\
                 \n\
                 // Tailwind configuration\n\
                 npx tailwindcss init",
                "// Main dependencies\n\
                 npm install react-router-dom axios\n\
                 npm install -D tailwindcss\n\
                 \n\
                 // Tailwind configuration\n\
                 npx tailwindcss init\n\
                 \n\
                 // Component layout\n\
                 src/\n  components/\n    ui/\n    pages/\n  services/\n  utils/",
            ],
        },
        SampleNote {
            draft: NoteDraft {
                title: "Weekly shopping list".to_string(),
                content: "• Fruit:\n  - Apples (2kg)\n  - Bananas (1kg)\n\n\
                          • Vegetables:\n  - Tomatoes\n  - Lettuce\n  - Carrots\n\n\
                          • Dairy:\n  - Milk (2L)\n  - Greek yogurt"
                    .to_string(),
                note_type: NoteType::List,
                folder_id: Some("personal".to_string()),
                tag_names: tags(&["todo"]),
            },
            edits: Vec::new(),
        },
        SampleNote {
            draft: NoteDraft {
                title: "Binary search in Python".to_string(),
                content: "def binary_search(items, target):\n    lo, hi = 0, len(items) - 1\n    \
                          while lo <= hi:\n        mid = (lo + hi) // 2\n        \
                          if items[mid] == target:\n            return mid\n        \
                          if items[mid] < target:\n            lo = mid + 1\n        \
                          else:\n            hi = mid - 1\n    return -1"
                    .to_string(),
                note_type: NoteType::Code,
                folder_id: Some("learning".to_string()),
                tag_names: tags(&["python", "algorithms"]),
            },
            edits: Vec::new(),
        },
        SampleNote {
            draft: NoteDraft {
                title: "App ideas".to_string(),
                content: "A habit tracker that syncs with the calendar.\n\
                          A recipe planner that builds the shopping list."
                    .to_string(),
                note_type: NoteType::Text,
                folder_id: None,
                tag_names: tags(&["idea"]),
            },
            edits: Vec::new(),
        },
    ]
}

fn tags(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}
