//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. User config: `~/.config/nosograph/config.toml` (XDG) or platform config dir
//! 2. Project config: `nosograph.toml` in the working directory
//! 3. Environment variables: `NOSOGRAPH_*`, nested keys split on `__`
//!    (e.g. `NOSOGRAPH_NEO4J__URI`)
//! 4. `NEO4J_PASSWORD`, kept for deployments that already export it
//!
//! Every key has a default, so running without any config file connects to a
//! local Neo4j and serves on `127.0.0.1:8080`.
//!
//! ```toml
//! [neo4j]
//! uri = "bolt://db.internal:7687"
//! user = "neo4j"
//! password = "secret"
//!
//! [server]
//! port = 9000
//! static_dir = "/srv/nosograph/static"
//!
//! [graph]
//! default_limit = 250
//! ```

use std::ops::Deref;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub neo4j: Neo4jConfig,
    pub server: ServerConfig,
    pub graph: GraphConfig,
}

/// Neo4j connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Neo4jConfig {
    /// Bolt URI of the server.
    pub uri: String,
    pub user: String,
    /// Password; an empty password is sent when unset.
    pub password: Option<String>,
    /// Database name. The server default database is used when unset.
    pub database: Option<String>,
    /// Upper bound of the driver's connection pool.
    pub max_connections: usize,
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: None,
            database: None,
            max_connections: 16,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding `index.html` and the visualization assets.
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            static_dir: PathBuf::from("static"),
        }
    }
}

/// Graph assembly settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Parent groups returned by `/graph` when no `limit` is given.
    pub default_limit: u32,
    /// Largest `limit` a caller may request.
    pub max_limit: u32,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            default_limit: 100,
            max_limit: 10_000,
        }
    }
}

impl Config {
    /// Load config with layered resolution (defaults → user → project → env).
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// The figment used by [`Config::load`].
    pub fn figment() -> Figment {
        Self::layered(Self::user_config_path())
    }

    /// Layered figment reading the user config from `user_config`.
    fn layered(user_config: PathBuf) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            // Layer 1: User config (lowest priority)
            .merge(Toml::file(user_config))
            // Layer 2: Project config
            .merge(Toml::file("nosograph.toml"))
            // Layer 3: Environment variables
            .merge(Env::prefixed("NOSOGRAPH_").split("__"))
            // Layer 4: Legacy password variable (highest priority)
            .merge(
                Env::raw()
                    .only(&["NEO4J_PASSWORD"])
                    .map(|_| "neo4j.password".into()),
            )
    }

    /// User config path: ~/.config/nosograph/config.toml (XDG) or platform config dir.
    fn user_config_path() -> PathBuf {
        // Prefer XDG config location (~/.config) on all platforms
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home.join(".config").join("nosograph").join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        dirs::config_dir()
            .map(|p| p.join("nosograph").join("config.toml"))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn load_in(jail: &Jail) -> figment::Result<Config> {
        Config::layered(jail.directory().join("user.toml")).extract()
    }

    #[test]
    fn test_defaults_without_sources() {
        Jail::expect_with(|jail| {
            let config = load_in(jail)?;
            assert_eq!(config.neo4j.uri, "bolt://localhost:7687");
            assert_eq!(config.neo4j.user, "neo4j");
            assert_eq!(config.neo4j.password, None);
            assert_eq!(config.server.port, 8080);
            assert_eq!(config.graph.default_limit, 100);
            assert_eq!(config.graph.max_limit, 10_000);
            Ok(())
        });
    }

    #[test]
    fn test_project_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "nosograph.toml",
                r#"
                [neo4j]
                uri = "bolt://db:7687"

                [graph]
                default_limit = 25
                "#,
            )?;

            let config = load_in(jail)?;
            assert_eq!(config.neo4j.uri, "bolt://db:7687");
            assert_eq!(config.neo4j.user, "neo4j");
            assert_eq!(config.graph.default_limit, 25);
            assert_eq!(config.graph.max_limit, 10_000);
            Ok(())
        });
    }

    #[test]
    fn test_project_file_overrides_user_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "user.toml",
                "[neo4j]\nuser = \"reader\"\nuri = \"bolt://home:7687\"\n",
            )?;
            jail.create_file("nosograph.toml", "[neo4j]\nuri = \"bolt://db:7687\"\n")?;

            let config = load_in(jail)?;
            assert_eq!(config.neo4j.user, "reader");
            assert_eq!(config.neo4j.uri, "bolt://db:7687");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("nosograph.toml", "[server]\nport = 9000\n")?;
            jail.set_env("NOSOGRAPH_SERVER__PORT", "9100");
            jail.set_env("NOSOGRAPH_SERVER__STATIC_DIR", "/srv/static");

            let config = load_in(jail)?;
            assert_eq!(config.server.port, 9100);
            assert_eq!(config.server.static_dir, PathBuf::from("/srv/static"));
            Ok(())
        });
    }

    #[test]
    fn test_legacy_password_variable() {
        Jail::expect_with(|jail| {
            jail.set_env("NEO4J_PASSWORD", "hunter2");

            let config = load_in(jail)?;
            assert_eq!(config.neo4j.password.as_deref(), Some("hunter2"));
            Ok(())
        });
    }

    #[test]
    fn test_invalid_value_is_error() {
        Jail::expect_with(|jail| {
            jail.create_file("nosograph.toml", "[server]\nport = \"high\"\n")?;
            assert!(load_in(jail).is_err());
            Ok(())
        });
    }
}
