use crate::services::storage::FileStore;
use crate::services::tokens::TokenLifetimes;
use crate::{Config, Database};
use anyhow::Result;

pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub files: FileStore,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(config: Config, db: Database) -> Result<Self> {
        let max_upload_bytes = config.media.max_upload_bytes()?;
        let files = FileStore::new(&config.media.upload_dir, max_upload_bytes);

        Ok(Self {
            config,
            db,
            files,
            max_upload_bytes,
        })
    }

    pub fn jwt_secret(&self) -> &str {
        &self.config.auth.jwt_secret
    }

    pub fn token_lifetimes(&self) -> TokenLifetimes {
        TokenLifetimes::new(
            self.config.auth.access_token_minutes,
            self.config.auth.refresh_token_days,
        )
    }
}
