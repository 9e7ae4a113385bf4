//! Export command implementation.
use chrono::format::{Item, StrftimeItems};
use log::*;

use crate::{
    Result,
    command::write_output,
    config::{Config, ExportConfig},
    error::NotesError,
    forge::{traits::Forge, types::Release},
};

/// Render `releases` in the given order as one markdown document.
pub fn render_releases(
    releases: &[Release],
    config: &ExportConfig,
) -> Result<String> {
    let date_format = &config.created_date_format;

    if config.include_created_date_in_title
        && StrftimeItems::new(date_format).any(|i| matches!(i, Item::Error))
    {
        return Err(NotesError::invalid_config(format!(
            "invalid created_date_format: {date_format}"
        )));
    }

    let sections = releases
        .iter()
        .map(|release| {
            let mut title = if release.name.is_empty() {
                release.tag_name.clone()
            } else {
                release.name.clone()
            };

            if config.include_created_date_in_title {
                let date = release.created_at.format(date_format);
                title = format!("{title} ({date})");
            }

            let body = release.body.trim();

            if body.is_empty() {
                format!("## {title}")
            } else {
                format!("## {title}\n\n{body}")
            }
        })
        .collect::<Vec<_>>();

    Ok(format!("{}\n", sections.join("\n\n")))
}

/// Export every release, newest first.
pub async fn execute(
    forge: &dyn Forge,
    config: &Config,
    skip_prereleases: bool,
    out_file: Option<&str>,
) -> Result<()> {
    let releases = forge.list_releases(skip_prereleases).await?;

    if releases.is_empty() {
        warn!("no releases found to export");
    }

    let document = render_releases(&releases, &config.export)?;
    info!("exported {} releases", releases.len());

    write_output(out_file, &document).await
}
