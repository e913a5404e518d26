use ::mongodb::{Client, bson::doc, options::ClientOptions};
use std::time::Duration;
use tracing::{info, instrument};

use super::MongoConfig;
use crate::common::{DatabaseError, DatabaseResult};

/// Build a client from `config` and verify the deployment answers a `ping`.
///
/// The driver connects lazily, so the ping is what surfaces a bad URL or an
/// unreachable cluster. There is no retry: callers treat failure as fatal.
///
/// ```ignore
/// use database::mongodb::{MongoConfig, connect_from_config};
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "shows");
/// let client = connect_from_config(&config).await?;
/// ```
#[instrument(skip_all, fields(url = %config.redacted_url(), database = %config.database))]
pub async fn connect_from_config(config: &MongoConfig) -> DatabaseResult<Client> {
    info!("Connecting to MongoDB");

    let mut options = ClientOptions::parse(&config.url).await?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    let client = Client::with_options(options)?;

    ping(&client, &config.database).await?;

    info!("Successfully connected to MongoDB");
    Ok(client)
}

/// Connect to `url` with default pool settings and the `default` database
pub async fn connect(url: &str) -> DatabaseResult<Client> {
    connect_from_config(&MongoConfig::new(url)).await
}

/// Run `{ ping: 1 }` against `database`; any error or a non-`ok` reply fails.
pub async fn ping(client: &Client, database: &str) -> DatabaseResult<()> {
    let reply = client
        .database(database)
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    let ok = reply
        .get("ok")
        .and_then(|value| match value {
            ::mongodb::bson::Bson::Double(v) => Some(*v),
            ::mongodb::bson::Bson::Int32(v) => Some(f64::from(*v)),
            ::mongodb::bson::Bson::Int64(v) => Some(*v as f64),
            _ => None,
        })
        .unwrap_or_default();

    if ok == 1.0 {
        Ok(())
    } else {
        Err(DatabaseError::ConnectionFailed(format!(
            "cluster ping returned {reply}"
        )))
    }
}
