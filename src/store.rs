//! SurrealDB connection management and schema bootstrap
//!
//! Supports runtime protocol selection via URL scheme:
//! - `ws://` / `wss://` - WebSocket connections
//! - `http://` / `https://` - HTTP connections
//! - `mem://` - In-memory database (for testing)

use std::time::Duration;

use crate::{
    config::StoreConfig,
    error::{Error, Result},
};

/// SurrealDB client type alias using the `Any` engine for runtime protocol selection
pub type SurrealClient = surrealdb::Surreal<surrealdb::engine::any::Any>;

/// Create a SurrealDB client with retry logic
///
/// Retries connection attempts with exponential backoff based on the
/// configuration.
pub(crate) async fn create_client(config: &StoreConfig) -> Result<SurrealClient> {
    let mut attempt = 0;
    let base_delay = Duration::from_secs(config.retry_delay_secs);

    loop {
        match try_create_client(config).await {
            Ok(client) => {
                if attempt > 0 {
                    tracing::info!(
                        "Store connection established after {} attempt(s)",
                        attempt + 1
                    );
                } else {
                    tracing::info!(
                        "Store connected: url={}, ns={}, db={}",
                        sanitize_url(&config.url),
                        config.namespace,
                        config.database
                    );
                }
                return Ok(client);
            }
            Err(e) => {
                attempt += 1;

                if attempt > config.max_retries {
                    tracing::error!(
                        "Failed to connect to store after {} attempts: {}",
                        config.max_retries + 1,
                        e
                    );
                    return Err(e);
                }

                let delay_multiplier = 2_u32.pow(attempt.saturating_sub(1));
                let delay = base_delay * delay_multiplier;

                tracing::warn!(
                    "Store connection attempt {} failed: {}. Retrying in {:?}...",
                    attempt,
                    e,
                    delay
                );

                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Attempt to create a SurrealDB client (single try)
async fn try_create_client(config: &StoreConfig) -> Result<SurrealClient> {
    let url_safe = sanitize_url(&config.url);
    tracing::debug!("Connecting to store: {}", url_safe);

    // Connect using the any engine (protocol determined by URL scheme)
    let client = surrealdb::engine::any::connect(config.url.as_str()).await.map_err(|e| {
        Error::Internal(format!(
            "Failed to connect to store at '{}' ({}): {}",
            url_safe,
            categorize_store_error(&e),
            e
        ))
    })?;

    // Authenticate if credentials are provided
    if let (Some(username), Some(password)) = (config.username.as_deref(), config.password.as_deref()) {
        client
            .signin(surrealdb::opt::auth::Root { username, password })
            .await
            .map_err(|e| {
                Error::Internal(format!(
                    "Failed to authenticate with store at '{}' ({}): {}",
                    url_safe,
                    categorize_store_error(&e),
                    e
                ))
            })?;
    }

    // Select namespace and database
    client
        .use_ns(config.namespace.as_str())
        .use_db(config.database.as_str())
        .await
        .map_err(|e| {
            Error::Internal(format!(
                "Failed to select namespace '{}' / database '{}' on store at '{}': {}",
                config.namespace, config.database, url_safe, e
            ))
        })?;

    Ok(client)
}

/// Initialize the pets table schema
///
/// All statements are idempotent (`IF NOT EXISTS`), so this runs on every
/// startup. The `pet_uid` index backs the by-UID lookups; it becomes UNIQUE
/// when `enforce_unique_uid` is set so the engine itself rejects duplicates.
pub(crate) async fn init_schema(client: &SurrealClient, config: &StoreConfig) -> Result<()> {
    let unique = if config.enforce_unique_uid {
        " UNIQUE"
    } else {
        ""
    };

    let ddl = format!(
        r#"
        DEFINE TABLE IF NOT EXISTS pets SCHEMAFULL;

        DEFINE FIELD IF NOT EXISTS pet_name ON pets TYPE string;
        DEFINE FIELD IF NOT EXISTS pet_type ON pets TYPE string;
        DEFINE FIELD IF NOT EXISTS pet_uid ON pets TYPE string;
        DEFINE FIELD IF NOT EXISTS age ON pets TYPE int ASSERT $value >= 0;
        DEFINE FIELD IF NOT EXISTS vaccination_status ON pets TYPE bool;
        DEFINE FIELD IF NOT EXISTS availability_status ON pets TYPE bool;

        DEFINE INDEX IF NOT EXISTS idx_pets_uid ON pets FIELDS pet_uid{unique};
        "#
    );

    client
        .query(ddl)
        .await
        .map_err(|e| Error::Internal(format!("Failed to initialize pets schema: {}", e)))?
        .check()
        .map_err(|e| Error::Internal(format!("Pets schema statement failed: {}", e)))?;

    tracing::debug!(
        "Pets schema initialized (unique uid index: {})",
        config.enforce_unique_uid
    );

    Ok(())
}

/// Sanitize connection URL for safe logging (remove credentials if present)
pub fn sanitize_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(scheme_end) = url.find("://") {
            let scheme = &url[..=scheme_end + 2];
            let after_at = &url[at_pos..];
            return format!("{}***{}", scheme, after_at);
        }
    }
    url.to_string()
}

/// Categorize store error for better user guidance
fn categorize_store_error(err: &surrealdb::Error) -> &'static str {
    let err_str = err.to_string().to_lowercase();

    if err_str.contains("auth") || err_str.contains("credentials") || err_str.contains("signin") {
        "authentication error - check your credentials"
    } else if err_str.contains("connect")
        || err_str.contains("network")
        || err_str.contains("dns")
        || err_str.contains("refused")
    {
        "network connection error - check connectivity"
    } else if err_str.contains("permission")
        || err_str.contains("denied")
        || err_str.contains("not allowed")
    {
        "permission error - check database permissions"
    } else if err_str.contains("timeout") {
        "connection timeout - database may be overloaded"
    } else {
        "connection error"
    }
}
