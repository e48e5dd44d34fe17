//! Leaderboard persistence chosen at startup: the HTTP backend or a local
//! JSONL file.

use std::sync::Arc;

use chem_client::{ClientError, LabClient};
use chem_core::entities::CompoundEntry;
use chem_core::traits::LeaderboardStore;
use chem_store::{JsonlStore, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error(transparent)]
    Remote(#[from] ClientError),
    #[error(transparent)]
    Local(#[from] StoreError),
}

#[derive(Debug, Clone)]
pub enum Backend {
    Remote(LabClient),
    Local(Arc<JsonlStore>),
}

impl Backend {
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Remote(client) => client.base_url().to_string(),
            Self::Local(store) => store.path().display().to_string(),
        }
    }
}

impl LeaderboardStore for Backend {
    type Error = BackendError;

    async fn append(&self, entry: &CompoundEntry) -> Result<(), BackendError> {
        match self {
            Self::Remote(client) => Ok(client.append(entry).await?),
            Self::Local(store) => Ok(store.append(entry).await?),
        }
    }

    async fn list_all(&self) -> Result<Vec<CompoundEntry>, BackendError> {
        match self {
            Self::Remote(client) => Ok(client.list_all().await?),
            Self::Local(store) => Ok(store.list_all().await?),
        }
    }
}
