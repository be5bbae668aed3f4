//! Storage-backed implementations of the repository traits.

pub mod seaorm;
