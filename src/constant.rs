// Window size constants
pub const DEFAULT_WINDOW_WIDTH: f32 = 1100.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 720.0;
pub const DEFAULT_WINDOW_TITLE: &str = "Notes Dashboard";

/// Application name and metadata constants
pub const APP_QUALIFIER: &str = "com";
pub const APP_ORGANIZATION: &str = "NotesDashboard";
pub const APP_NAME: &str = "Notes Dashboard";

/// Environment variable that switches the app to the REST backend
pub const API_URL_ENV: &str = "NOTES_API_URL";

/// App related Magic Numbers
pub const MAX_RECENT_NOTES: usize = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const HOME_RECENT_LIMIT: usize = 6;
pub const PREVIEW_CHARS: usize = 100;
pub const MAX_LISTED_TAGS: usize = 3;

/// Change descriptions written into code note history
pub const INITIAL_VERSION_CHANGES: &str = "Initial version";
pub const CONTENT_EDITED_CHANGES: &str = "Content edited";

/// Display format for version and note timestamps (local time)
pub const TIMESTAMP_FMT: &str = "%d/%m/%Y %H:%M:%S";
pub const DATE_FMT: &str = "%d/%m/%Y";
