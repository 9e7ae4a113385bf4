//! CLI argument parsing and forge platform configuration.
use clap::{Parser, Subcommand};
use git_url_parse::GitUrl;
use secrecy::SecretString;
use std::env;

use crate::{
    Result,
    config::DEFAULT_CONFIG_FILE,
    error::NotesError,
    forge::config::{Remote, RemoteConfig, web_root},
};

/// Global CLI arguments for forge configuration and debugging.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, default_value = "", global = true)]
    /// GitHub repository URL (https://github.com/owner/repo).
    pub github_repo: String,

    #[arg(long, default_value = "", global = true)]
    /// GitHub personal access token. Falls back to GITHUB_TOKEN env var.
    pub github_token: String,

    #[arg(long, default_value = "", global = true)]
    /// GitLab repository URL. Supports GitLab.com and self-hosted instances.
    pub gitlab_repo: String,

    #[arg(long, default_value = "", global = true)]
    /// GitLab personal access token. Falls back to GITLAB_TOKEN env var.
    pub gitlab_token: String,

    #[arg(long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    /// Path to the notes configuration file.
    pub config: String,

    #[arg(long, default_value_t = false, global = true)]
    /// Log label changes instead of applying them.
    pub dry_run: bool,

    #[arg(long, default_value_t = false, global = true)]
    /// Enable debug logging.
    pub debug: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Release note subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Build release notes for a milestone.
    Create {
        #[arg(long, short)]
        /// Milestone title, matched exactly.
        milestone: String,

        #[arg(long, short)]
        /// Write the notes to this file instead of stdout.
        output: Option<String>,
    },

    /// List the issues and pull requests linked to an issue or pull request.
    Linked {
        #[arg(long, short)]
        /// Issue or pull request number.
        number: u64,

        #[arg(long, default_value_t = false)]
        /// Report every active link instead of only the most recent one.
        all_links: bool,

        #[arg(long, default_value_t = false)]
        /// Include the comment count of each linked issue.
        comments: bool,
    },

    /// Replace the repository labels with the configured label set.
    Labels,

    /// Export every published release into one markdown document.
    Export {
        #[arg(long, default_value_t = false)]
        /// Leave prereleases out of the export.
        skip_prereleases: bool,

        #[arg(long, short)]
        /// Write the export to this file instead of stdout.
        output: Option<String>,
    },
}

/// Url layout differences between supported forges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ForgeKind {
    Github,
    Gitlab,
}

impl ForgeKind {
    fn name(&self) -> &'static str {
        match self {
            ForgeKind::Github => "github",
            ForgeKind::Gitlab => "gitlab",
        }
    }

    fn token_env_var(&self) -> &'static str {
        match self {
            ForgeKind::Github => "GITHUB_TOKEN",
            ForgeKind::Gitlab => "GITLAB_TOKEN",
        }
    }

    /// Segment GitLab places between the project path and its web pages.
    fn web_separator(&self) -> &'static str {
        match self {
            ForgeKind::Github => "",
            ForgeKind::Gitlab => "/-",
        }
    }
}

impl Args {
    /// Configure remote repository connection from CLI arguments.
    pub fn get_remote(&self) -> Result<Remote> {
        if !self.github_repo.is_empty() {
            let config = get_remote_config(
                ForgeKind::Github,
                &self.github_repo,
                &self.github_token,
                self.dry_run,
            )?;
            return Ok(Remote::Github(config));
        }

        if !self.gitlab_repo.is_empty() {
            let config = get_remote_config(
                ForgeKind::Gitlab,
                &self.gitlab_repo,
                &self.gitlab_token,
                self.dry_run,
            )?;
            return Ok(Remote::Gitlab(config));
        }

        Err(NotesError::InvalidArgs(
            "must configure a remote with --github-repo or --gitlab-repo"
                .into(),
        ))
    }
}

/// Validate repository URL uses HTTP or HTTPS scheme.
fn validate_scheme(scheme: git_url_parse::Scheme) -> Result<()> {
    match scheme {
        git_url_parse::Scheme::Http => Ok(()),
        git_url_parse::Scheme::Https => Ok(()),
        _ => Err(NotesError::InvalidArgs(
            "only http and https schemes are supported for repo urls".into(),
        )),
    }
}

/// Configure a remote with URL parsing and token resolution.
fn get_remote_config(
    kind: ForgeKind,
    repo: &str,
    token: &str,
    dry_run: bool,
) -> Result<RemoteConfig> {
    let parsed = GitUrl::parse(repo)?;

    validate_scheme(parsed.scheme)?;

    let mut token = token.to_string();

    if token.is_empty()
        && let Some(parsed_token) = parsed.token.clone()
    {
        token = parsed_token;
    }

    if token.is_empty()
        && let Ok(env_var_token) = env::var(kind.token_env_var())
    {
        token = env_var_token;
    }

    if token.is_empty() {
        return Err(NotesError::InvalidArgs(format!(
            "must set {} token",
            kind.name()
        )));
    }

    let host = parsed.host.clone().ok_or_else(|| {
        NotesError::InvalidArgs(format!(
            "unable to parse host from {} repo",
            kind.name()
        ))
    })?;

    let owner = parsed.owner.clone().ok_or_else(|| {
        NotesError::InvalidArgs(format!(
            "unable to parse owner from {} repo",
            kind.name()
        ))
    })?;

    let project_path = parsed
        .path
        .trim_start_matches('/')
        .trim_end_matches(".git")
        .to_string();

    if project_path.is_empty() {
        return Err(NotesError::InvalidArgs(format!(
            "failed to process project path of {} repo",
            kind.name()
        )));
    }

    let repo_web_url = format!(
        "{}/{}{}",
        web_root(&parsed, &host),
        project_path,
        kind.web_separator()
    );

    let remote_config = RemoteConfig::builder()
        .host(host)
        .port(parsed.port)
        .scheme(parsed.scheme.to_string())
        .owner(owner)
        .repo(parsed.name.clone())
        .path(project_path)
        .token(SecretString::from(token))
        .commit_link_base_url(format!("{repo_web_url}/commits"))
        .compare_link_base_url(format!("{repo_web_url}/compare"))
        .dry_run(dry_run)
        .build()
        .map_err(|e| NotesError::InvalidArgs(e.to_string()))?;

    Ok(remote_config)
}

#[cfg(test)]
mod tests {
    //! Unit tests for CLI argument parsing and remote configuration.
    use super::*;

    fn args(github_repo: &str, gitlab_repo: &str) -> Args {
        Args {
            github_repo: github_repo.into(),
            github_token: "github_token".into(),
            gitlab_repo: gitlab_repo.into(),
            gitlab_token: "gitlab_token".into(),
            config: DEFAULT_CONFIG_FILE.into(),
            dry_run: false,
            debug: true,
            command: Command::Labels,
        }
    }

    /// Test GitHub remote configuration from CLI arguments.
    #[test]
    fn gets_github_remote() {
        let remote = args("https://github.com/github_owner/github_repo", "")
            .get_remote()
            .unwrap();

        let Remote::Github(config) = remote else {
            panic!("expected github remote");
        };

        assert_eq!(config.owner, "github_owner");
        assert_eq!(config.repo, "github_repo");
        assert_eq!(
            config.compare_link_base_url,
            "https://github.com/github_owner/github_repo/compare"
        );
        assert_eq!(
            config.commit_link_base_url,
            "https://github.com/github_owner/github_repo/commits"
        );
    }

    /// Test GitLab remote configuration from CLI arguments.
    #[test]
    fn gets_gitlab_remote() {
        let remote = args("", "https://gitlab.com/gitlab_owner/gitlab_repo")
            .get_remote()
            .unwrap();

        let Remote::Gitlab(config) = remote else {
            panic!("expected gitlab remote");
        };

        assert_eq!(config.path, "gitlab_owner/gitlab_repo");
        assert_eq!(
            config.compare_link_base_url,
            "https://gitlab.com/gitlab_owner/gitlab_repo/-/compare"
        );
    }

    #[test]
    fn passes_dry_run_to_remote() {
        let mut cli_config = args("https://github.com/owner/repo", "");
        cli_config.dry_run = true;

        let Remote::Github(config) = cli_config.get_remote().unwrap() else {
            panic!("expected github remote");
        };

        assert!(config.dry_run);
    }

    /// Test that only HTTP and HTTPS schemes are supported for repository URLs.
    #[test]
    fn only_supports_http_and_https_schemes() {
        let result = args("git@github.com:github_owner/github_repo", "")
            .get_remote();

        assert!(matches!(result, Err(NotesError::InvalidArgs(_))));
    }

    #[test]
    fn requires_a_remote() {
        let result = args("", "").get_remote();
        assert!(matches!(result, Err(NotesError::InvalidArgs(_))));
    }

    #[test]
    fn parses_create_subcommand() {
        let parsed = Args::try_parse_from([
            "milestone-notes",
            "--github-repo",
            "https://github.com/owner/repo",
            "create",
            "--milestone",
            "1.0.0",
        ])
        .unwrap();

        assert_eq!(
            parsed.command,
            Command::Create {
                milestone: "1.0.0".into(),
                output: None,
            }
        );
        assert_eq!(parsed.config, DEFAULT_CONFIG_FILE);
    }

    #[test]
    fn parses_linked_subcommand_flags() {
        let parsed = Args::try_parse_from([
            "milestone-notes",
            "linked",
            "--number",
            "43",
            "--all-links",
        ])
        .unwrap();

        assert_eq!(
            parsed.command,
            Command::Linked {
                number: 43,
                all_links: true,
                comments: false,
            }
        );
    }
}
