pub mod creation;
pub mod merge;
