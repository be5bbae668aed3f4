//! Ambient helpers shared by the binaries and test harnesses.

pub mod utils;
