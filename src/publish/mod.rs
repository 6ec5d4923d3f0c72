//! Publishing backends and file selection
//!
//! This module owns the concrete side of the publish seam: expanding
//! include patterns into file sets and committing them onto the hosting
//! branch through git.

pub mod file_set;
pub mod git_publisher;

// Re-export main types for convenience
pub use file_set::FileSet;
pub use git_publisher::GitPagesPublisher;
