use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chem_client::LabClient;
use chem_config::{LabConfig, LeaderboardBackend};
use chem_store::JsonlStore;
use chem_workflow::Controller;

use crate::backend::Backend;
use crate::cli::GlobalFlags;
use crate::editor::MolFileEditor;

pub type LabController = Controller<MolFileEditor, LabClient, Backend>;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: LabConfig,
    pub client: LabClient,
    pub backend: Backend,
}

impl AppContext {
    pub fn init(config: LabConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let client = LabClient::with_options(
            config.api.base_url_trimmed(),
            Duration::from_secs(config.api.timeout_secs),
            &config.api.user_agent,
        )
        .context("failed to build HTTP client")?;

        let backend = if flags.local || config.leaderboard.backend == LeaderboardBackend::Local {
            Backend::Local(Arc::new(JsonlStore::new(&config.leaderboard.store_path)))
        } else {
            Backend::Remote(client.clone())
        };
        tracing::debug!(backend = %backend.describe(), "leaderboard backend selected");

        Ok(Self {
            config,
            client,
            backend,
        })
    }

    /// A fresh workflow over `editor`, sharing this context's collaborators.
    #[must_use]
    pub fn controller(&self, editor: MolFileEditor) -> LabController {
        Controller::new(editor, self.client.clone(), self.backend.clone())
    }

    /// Notation preview width for tables, or `None` for full notation.
    #[must_use]
    pub const fn preview_len(&self, full: bool) -> Option<usize> {
        if full {
            None
        } else {
            Some(self.config.leaderboard.preview_len)
        }
    }
}
