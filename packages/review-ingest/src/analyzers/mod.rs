//! Analysis collaborators.

pub mod command;

pub use command::CommandAnalyzer;
