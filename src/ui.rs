pub mod dashboard;
pub mod editor;
pub mod font;
pub mod history;
pub mod home;
pub mod note_dialog;
pub mod note_list;
pub mod sidebar;
pub mod title_bar;
pub mod viewport;
pub mod widgets;
