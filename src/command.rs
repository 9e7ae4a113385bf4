//! Command execution for milestone-notes.
//!
//! Each subcommand takes an already constructed forge and the loaded
//! configuration, runs its workflow and writes the result to stdout or to
//! the requested file.
use log::*;
use std::path::Path;
use tokio::fs;

use crate::Result;

/// Release notes for a single milestone.
pub mod create;

/// Markdown export of every published release.
pub mod export;

/// Repository label synchronization.
pub mod labels;

/// Linked issue listing.
pub mod linked;

/// Print `content` or write it to `out_file`, creating parent directories
/// as needed.
pub async fn write_output(out_file: Option<&str>, content: &str) -> Result<()> {
    let Some(out_file) = out_file else {
        println!("{content}");
        return Ok(());
    };

    let file_path = Path::new(out_file);

    if let Some(parent) = file_path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).await?;
    }

    info!("writing output to: {}", file_path.display());
    fs::write(file_path, content).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_output_creating_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nested/out/notes.md");

        write_output(file.to_str(), "# notes").await.unwrap();

        let written = std::fs::read_to_string(&file).unwrap();
        assert_eq!(written, "# notes");
    }
}
