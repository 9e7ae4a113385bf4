//! Factory for creating forge implementations based on configuration.
use tokio_util::sync::CancellationToken;

use crate::{
    Result,
    forge::{
        config::{Remote, RemoteConfig},
        github::Github,
        gitlab::Gitlab,
        traits::Forge,
    },
};

/// Factory for creating forge implementations.
pub struct ForgeFactory;

impl ForgeFactory {
    /// Create a forge for the given remote. Every request it issues is
    /// abandoned once `cancel` fires.
    pub fn create(
        remote: &Remote,
        cancel: CancellationToken,
    ) -> Result<Box<dyn Forge>> {
        match remote {
            Remote::Github(config) => Self::create_github(config, cancel),
            Remote::Gitlab(config) => Self::create_gitlab(config, cancel),
        }
    }

    fn create_github(
        config: &RemoteConfig,
        cancel: CancellationToken,
    ) -> Result<Box<dyn Forge>> {
        Ok(Box::new(Github::new(config.clone(), cancel)?))
    }

    fn create_gitlab(
        config: &RemoteConfig,
        cancel: CancellationToken,
    ) -> Result<Box<dyn Forge>> {
        Ok(Box::new(Gitlab::new(config.clone(), cancel)?))
    }
}
