use core_config::{AppInfo, FromEnv, app_info, env_or_default, server::ServerConfig};
use database::mongodb::MongoConfig;
use domain_shows::DEFAULT_COLLECTION;

pub use core_config::Environment;

/// Application configuration, composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Collection holding show documents (`SHOWS_COLLECTION`)
    pub shows_collection: String,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let app = app_info!();
        let mut mongodb = MongoConfig::from_env()?;
        if mongodb.app_name.is_none() {
            mongodb = mongodb.with_app_name(app.name);
        }
        let server = ServerConfig::from_env()?;

        Ok(Self {
            app,
            mongodb,
            server,
            environment,
            shows_collection: env_or_default("SHOWS_COLLECTION", DEFAULT_COLLECTION),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MONGO_VARS: [(&str, Option<&str>); 2] = [
        ("MONGODB_URL", Some("mongodb://localhost:27017")),
        ("MONGODB_DATABASE", Some("wotb")),
    ];

    #[test]
    fn test_config_defaults() {
        temp_env::with_vars(
            [
                MONGO_VARS[0],
                MONGO_VARS[1],
                ("SHOWS_COLLECTION", None),
                ("MONGODB_APP_NAME", None),
                ("APP_ENV", None),
                ("PORT", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.shows_collection, "wotb_shows");
                assert_eq!(config.mongodb.database(), "wotb");
                assert_eq!(config.mongodb.app_name.as_deref(), Some("shows_api"));
                assert_eq!(config.environment, Environment::Development);
                assert_eq!(config.server.port, 8080);
            },
        );
    }

    #[test]
    fn test_config_custom_collection_and_app_name() {
        temp_env::with_vars(
            [
                MONGO_VARS[0],
                MONGO_VARS[1],
                ("SHOWS_COLLECTION", Some("shows_staging")),
                ("MONGODB_APP_NAME", Some("wotb-backend")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.shows_collection, "shows_staging");
                assert_eq!(config.mongodb.app_name.as_deref(), Some("wotb-backend"));
            },
        );
    }

    #[test]
    fn test_config_requires_mongo_url() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", None),
                ("MONGO_URL", None),
                ("MONGODB_DATABASE", Some("wotb")),
            ],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("MONGODB_URL"));
            },
        );
    }
}
