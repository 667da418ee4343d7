//! Core trait abstractions for the ingestion library.
//!
//! These traits are the seams where applications plug in HTTP transport,
//! the Play Store collaborator, dataset storage, and downstream analysis.

pub mod analyzer;
pub mod page_source;
pub mod play_source;
pub mod sink;
