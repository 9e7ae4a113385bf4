//! Create command implementation.
use log::*;

use crate::{
    Result, command::write_output, config::Config, forge::traits::Forge,
    notes::build_release_notes,
};

/// Build release notes for `milestone` and print or save them.
pub async fn execute(
    forge: &dyn Forge,
    config: &Config,
    milestone: &str,
    out_file: Option<&str>,
) -> Result<()> {
    let notes = build_release_notes(forge, milestone, config).await?;
    info!("created release notes for milestone {milestone}");
    write_output(out_file, &notes).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        NotesError,
        forge::traits::MockForge,
        test_helpers::{
            create_test_issue, create_test_milestone, create_test_remote_config,
        },
    };

    #[tokio::test]
    async fn writes_notes_to_file() {
        let mut forge = MockForge::new();
        forge
            .expect_remote_config()
            .returning(create_test_remote_config);
        forge
            .expect_list_milestones()
            .returning(|_| Ok(vec![create_test_milestone(1, "1.0.0")]));
        forge
            .expect_list_issues()
            .returning(|_, _| Ok(vec![create_test_issue(4, &["Bug"])]));

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("notes.md");

        execute(&forge, &Config::default(), "1.0.0", file.to_str())
            .await
            .unwrap();

        let written = std::fs::read_to_string(&file).unwrap();
        assert!(written.contains("__Bug__"));
        assert!(written.contains("[__#4__]"));
    }

    #[tokio::test]
    async fn does_not_write_failed_builds() {
        let mut forge = MockForge::new();
        forge
            .expect_list_milestones()
            .returning(|_| Ok(vec![]));

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("notes.md");

        let result =
            execute(&forge, &Config::default(), "1.0.0", file.to_str()).await;

        assert!(matches!(result, Err(NotesError::NotFound(_))));
        assert!(!file.exists());
    }
}
