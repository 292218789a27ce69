//! Application state management

use std::sync::Arc;

use crate::{
    config::Config,
    error::Result,
    repository::PetRepository,
    store::{self, SurrealClient},
};

/// Application state shared across handlers
///
/// Carries the configuration and the store client. Handlers obtain a
/// [`PetRepository`] from it instead of reaching for a process-global
/// connection.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    store: Arc<SurrealClient>,
}

impl AppState {
    /// Create a new builder for AppState
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::new()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the store client
    pub fn store(&self) -> &SurrealClient {
        &self.store
    }

    /// Get a repository over the pets table
    pub fn pets(&self) -> PetRepository {
        PetRepository::new(Arc::clone(&self.store))
    }
}

/// Builder for [`AppState`]
///
/// Connecting the store and bootstrapping its schema happen in `build`, so a
/// constructed state is always ready to serve.
#[derive(Default)]
pub struct AppStateBuilder {
    config: Option<Config>,
}

impl AppStateBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Connect the store, initialize the schema, and build the state
    pub async fn build(self) -> Result<AppState> {
        let config = self.config.unwrap_or_default();

        let client = store::create_client(&config.store).await?;
        store::init_schema(&client, &config.store).await?;

        Ok(AppState {
            config: Arc::new(config),
            store: Arc::new(client),
        })
    }
}
