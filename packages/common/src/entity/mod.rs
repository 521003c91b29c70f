pub mod contest;
pub mod language;
pub mod problem;
pub mod problem_contest;
pub mod problem_language;
pub mod problem_statistics;
pub mod problem_tag;
pub mod tag;
