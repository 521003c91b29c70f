pub mod contest;
pub mod problem;
pub mod tag;
