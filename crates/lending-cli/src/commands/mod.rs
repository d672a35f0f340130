pub mod penalty;
pub mod quote;
pub mod schedule;
