pub mod candidate;
pub mod interview;
pub mod statistics;
pub mod user;
