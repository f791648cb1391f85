//! Render configuration.

use crate::dialect::{Dialect, GenericDialect, PostgresDialect, SqliteDialect};
use crate::error::{SqlError, SqlResult};
use crate::params::ParamStyle;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Which built-in dialect a [`Renderer`](crate::Renderer) uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "lowercase")]
pub enum DialectConfig {
    #[default]
    Generic,
    Postgres,
    Sqlite {
        /// Element count above which `IN` lists are inlined.
        #[serde(default = "default_in_max_values")]
        in_max_values: usize,
    },
}

fn default_in_max_values() -> usize {
    SqliteDialect::DEFAULT_IN_MAX_VALUES
}

impl DialectConfig {
    /// SQLite with the default `IN` limit.
    pub fn sqlite() -> Self {
        DialectConfig::Sqlite {
            in_max_values: default_in_max_values(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DialectConfig::Generic => "generic",
            DialectConfig::Postgres => "postgres",
            DialectConfig::Sqlite { .. } => "sqlite",
        }
    }

    pub fn validate(&self) -> SqlResult<()> {
        match self {
            DialectConfig::Sqlite { in_max_values: 0 } => {
                Err(SqlError::validation("sqlite in_max_values must be at least 1"))
            }
            _ => Ok(()),
        }
    }

    /// Instantiate the dialect.
    pub fn build(&self) -> Arc<dyn Dialect> {
        match *self {
            DialectConfig::Generic => Arc::new(GenericDialect),
            DialectConfig::Postgres => Arc::new(PostgresDialect),
            DialectConfig::Sqlite { in_max_values } => {
                Arc::new(SqliteDialect::new().with_in_max_values(in_max_values))
            }
        }
    }
}

impl FromStr for DialectConfig {
    type Err = SqlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generic" => Ok(DialectConfig::Generic),
            "postgres" | "postgresql" => Ok(DialectConfig::Postgres),
            "sqlite" => Ok(DialectConfig::sqlite()),
            other => Err(SqlError::InvalidDialect(other.to_string())),
        }
    }
}

/// Settings for a [`Renderer`](crate::Renderer).
///
/// Deserializes from partial input; missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Placeholder style of the parameter sink.
    pub param_style: ParamStyle,
    /// Dialect used for dialect-sensitive operations.
    pub dialect: DialectConfig,
    /// Emit a `tracing` event per rendered statement (requires the `tracing` feature).
    pub log_sql: bool,
    /// Truncate logged SQL to this many bytes. `None` logs it whole.
    pub max_logged_sql_length: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            param_style: ParamStyle::Qmark,
            dialect: DialectConfig::Generic,
            log_sql: false,
            max_logged_sql_length: Some(200),
        }
    }
}

impl RenderConfig {
    /// Create a configuration with defaults (`?` placeholders, generic dialect, no logging).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_param_style(mut self, style: ParamStyle) -> Self {
        self.param_style = style;
        self
    }

    pub fn with_dialect(mut self, dialect: DialectConfig) -> Self {
        self.dialect = dialect;
        self
    }

    /// Enable or disable SQL logging.
    pub fn with_sql_logging(mut self, enabled: bool) -> Self {
        self.log_sql = enabled;
        self
    }

    /// Set the logged SQL length limit; `None` disables truncation.
    pub fn with_max_logged_sql_length(mut self, len: Option<usize>) -> Self {
        self.max_logged_sql_length = len;
        self
    }

    pub fn validate(&self) -> SqlResult<()> {
        self.dialect.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RenderConfig::new();
        assert_eq!(config.param_style, ParamStyle::Qmark);
        assert_eq!(config.dialect, DialectConfig::Generic);
        assert!(!config.log_sql);
        assert_eq!(config.max_logged_sql_length, Some(200));
    }

    #[test]
    fn deserializes_partial_json() {
        let config: RenderConfig =
            serde_json::from_str(r#"{"param_style": "dollar", "dialect": {"name": "postgres"}}"#)
                .unwrap();
        assert_eq!(config.param_style, ParamStyle::Dollar);
        assert_eq!(config.dialect, DialectConfig::Postgres);
        assert_eq!(config.max_logged_sql_length, Some(200));

        let config: RenderConfig = serde_json::from_str(r#"{"dialect": {"name": "sqlite"}}"#).unwrap();
        assert_eq!(config.dialect, DialectConfig::Sqlite { in_max_values: 10 });
    }

    #[test]
    fn round_trips_through_json() {
        let config = RenderConfig::new()
            .with_param_style(ParamStyle::PyFormat)
            .with_dialect(DialectConfig::Sqlite { in_max_values: 3 })
            .with_sql_logging(true)
            .with_max_logged_sql_length(None);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<RenderConfig>(&json).unwrap(), config);
    }

    #[test]
    fn dialect_names_parse() {
        assert_eq!("Postgres".parse::<DialectConfig>().unwrap(), DialectConfig::Postgres);
        assert_eq!("sqlite".parse::<DialectConfig>().unwrap().name(), "sqlite");
        assert!(matches!(
            "oracle".parse::<DialectConfig>(),
            Err(SqlError::InvalidDialect(name)) if name == "oracle"
        ));
    }

    #[test]
    fn build_matches_config() {
        for config in [DialectConfig::Generic, DialectConfig::Postgres, DialectConfig::sqlite()] {
            assert_eq!(config.build().name(), config.name());
        }
    }

    #[test]
    fn zero_in_limit_is_rejected() {
        let config = RenderConfig::new().with_dialect(DialectConfig::Sqlite { in_max_values: 0 });
        assert!(matches!(config.validate(), Err(SqlError::Validation(_))));
        assert!(RenderConfig::new().validate().is_ok());
    }
}
