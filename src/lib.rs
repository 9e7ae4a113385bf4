//! Release notes from forge milestones.
//!
//! Builds markdown release notes from the closed issues of a GitHub or
//! GitLab milestone and resolves which issues and pull requests are linked
//! to one another.
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod forge;
pub mod linked;
pub mod notes;
pub mod version;

pub use error::{NotesError, Result};
pub use forge::factory::ForgeFactory;
pub use linked::{LinkStrategy, resolve_linked_issues};
pub use notes::build_release_notes;

#[cfg(test)]
pub mod test_helpers;
