pub mod blog;
pub mod history;
pub mod resume;
