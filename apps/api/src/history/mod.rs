// Tailoring history: one row per tailored resume, relational store only.

pub mod handlers;
pub mod store;
