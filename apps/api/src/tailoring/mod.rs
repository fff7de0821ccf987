// Resume tailoring: deterministic, keyword-driven rewrite of a resume against a job description.
// No model calls here; the same input always yields the same output.

pub mod handlers;
pub mod skills;
pub mod tailor;
