//! Labels command implementation.
use log::*;

use crate::{
    Result,
    config::{Config, LabelConfig},
    forge::{traits::Forge, types::Label},
};

impl From<&LabelConfig> for Label {
    fn from(label: &LabelConfig) -> Self {
        Label {
            name: label.name.clone(),
            color: label.color.trim_start_matches('#').to_string(),
            description: label.description.clone(),
        }
    }
}

/// Delete every existing repository label, then create the configured set.
pub async fn execute(forge: &dyn Forge, config: &Config) -> Result<()> {
    let existing = forge.list_labels().await?;

    info!("removing {} existing labels", existing.len());

    for label in existing.iter() {
        debug!("deleting label {}", label.name);
        forge.delete_label(&label.name).await?;
    }

    info!("creating {} configured labels", config.labels.len());

    for label in config.labels.iter() {
        let created = forge.create_label(&Label::from(label)).await?;
        debug!("created label {} (#{})", created.name, created.color);
    }

    Ok(())
}
