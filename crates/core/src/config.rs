use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::ApplicationError;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub catalogue: CatalogueConfig,
    pub checkout: CheckoutConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct CatalogueConfig {
    /// Catalogue the bot sells from.
    pub id: String,
    /// Heading printed above the selections in the price list.
    pub preamble: String,
}

#[derive(Clone, Debug)]
pub struct CheckoutConfig {
    pub host_url: String,
    pub merchant_id: String,
    pub merchant_key: SecretString,
    pub return_url: Option<String>,
    pub cancel_url: Option<String>,
    pub notify_url: Option<String>,
    pub item_name_prefix: String,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub database_url: Option<String>,
    pub log_level: Option<String>,
    pub catalogue_id: Option<String>,
    pub checkout_host_url: Option<String>,
    pub checkout_merchant_id: Option<String>,
    pub checkout_merchant_key: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl From<ConfigError> for ApplicationError {
    fn from(value: ConfigError) -> Self {
        Self::Configuration(value.to_string())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "sqlite://menubot.db".to_string(),
                max_connections: 5,
                timeout_secs: 30,
            },
            catalogue: CatalogueConfig {
                id: "Pig".to_string(),
                preamble: "Flying Rasta price list:".to_string(),
            },
            checkout: CheckoutConfig {
                host_url: "https://sandbox.payfast.co.za/eng/process".to_string(),
                merchant_id: String::new(),
                merchant_key: String::new().into(),
                return_url: None,
                cancel_url: None,
                notify_url: None,
                item_name_prefix: "Order".to_string(),
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("menubot.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(database) = patch.database {
            if let Some(url) = database.url {
                self.database.url = url;
            }
            if let Some(max_connections) = database.max_connections {
                self.database.max_connections = max_connections;
            }
            if let Some(timeout_secs) = database.timeout_secs {
                self.database.timeout_secs = timeout_secs;
            }
        }

        if let Some(catalogue) = patch.catalogue {
            if let Some(id) = catalogue.id {
                self.catalogue.id = id;
            }
            if let Some(preamble) = catalogue.preamble {
                self.catalogue.preamble = preamble;
            }
        }

        if let Some(checkout) = patch.checkout {
            if let Some(host_url) = checkout.host_url {
                self.checkout.host_url = host_url;
            }
            if let Some(merchant_id) = checkout.merchant_id {
                self.checkout.merchant_id = merchant_id;
            }
            if let Some(merchant_key) = checkout.merchant_key {
                self.checkout.merchant_key = merchant_key.into();
            }
            if let Some(return_url) = checkout.return_url {
                self.checkout.return_url = Some(return_url);
            }
            if let Some(cancel_url) = checkout.cancel_url {
                self.checkout.cancel_url = Some(cancel_url);
            }
            if let Some(notify_url) = checkout.notify_url {
                self.checkout.notify_url = Some(notify_url);
            }
            if let Some(item_name_prefix) = checkout.item_name_prefix {
                self.checkout.item_name_prefix = item_name_prefix;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("MENUBOT_DATABASE_URL") {
            self.database.url = value;
        }
        if let Some(value) = read_env("MENUBOT_DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = parse_u32("MENUBOT_DATABASE_MAX_CONNECTIONS", &value)?;
        }
        if let Some(value) = read_env("MENUBOT_DATABASE_TIMEOUT_SECS") {
            self.database.timeout_secs = parse_u64("MENUBOT_DATABASE_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("MENUBOT_CATALOGUE_ID") {
            self.catalogue.id = value;
        }
        if let Some(value) = read_env("MENUBOT_CATALOGUE_PREAMBLE") {
            self.catalogue.preamble = value;
        }

        if let Some(value) = read_env("MENUBOT_CHECKOUT_HOST_URL") {
            self.checkout.host_url = value;
        }
        if let Some(value) = read_env("MENUBOT_CHECKOUT_MERCHANT_ID") {
            self.checkout.merchant_id = value;
        }
        if let Some(value) = read_env("MENUBOT_CHECKOUT_MERCHANT_KEY") {
            self.checkout.merchant_key = value.into();
        }
        if let Some(value) = read_env("MENUBOT_CHECKOUT_RETURN_URL") {
            self.checkout.return_url = Some(value);
        }
        if let Some(value) = read_env("MENUBOT_CHECKOUT_CANCEL_URL") {
            self.checkout.cancel_url = Some(value);
        }
        if let Some(value) = read_env("MENUBOT_CHECKOUT_NOTIFY_URL") {
            self.checkout.notify_url = Some(value);
        }
        if let Some(value) = read_env("MENUBOT_CHECKOUT_ITEM_NAME_PREFIX") {
            self.checkout.item_name_prefix = value;
        }

        let log_level =
            read_env("MENUBOT_LOGGING_LEVEL").or_else(|| read_env("MENUBOT_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("MENUBOT_LOGGING_FORMAT").or_else(|| read_env("MENUBOT_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(database_url) = overrides.database_url {
            self.database.url = database_url;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(catalogue_id) = overrides.catalogue_id {
            self.catalogue.id = catalogue_id;
        }
        if let Some(host_url) = overrides.checkout_host_url {
            self.checkout.host_url = host_url;
        }
        if let Some(merchant_id) = overrides.checkout_merchant_id {
            self.checkout.merchant_id = merchant_id;
        }
        if let Some(merchant_key) = overrides.checkout_merchant_key {
            self.checkout.merchant_key = merchant_key.into();
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_database(&self.database)?;
        validate_catalogue(&self.catalogue)?;
        validate_checkout(&self.checkout)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("menubot.toml"), PathBuf::from("config/menubot.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

/// Replaces every `${VAR}` with the value of the environment variable `VAR`.
fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after.find('}').ok_or(ConfigError::UnterminatedInterpolation)?;
        let key = &after[..end];
        let value = env::var(key)
            .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.to_string() })?;
        output.push_str(&value);
        rest = &after[end + 1..];
    }

    output.push_str(rest);
    Ok(output)
}

fn validate_database(database: &DatabaseConfig) -> Result<(), ConfigError> {
    let url = database.url.trim();
    let sqlite_url =
        url.starts_with("sqlite://") || url.starts_with("sqlite::") || url == ":memory:";
    if !sqlite_url {
        return Err(ConfigError::Validation(
            "database.url must be a sqlite URL (`sqlite://...`, `sqlite::...`, or `:memory:`)"
                .to_string(),
        ));
    }

    if database.max_connections == 0 {
        return Err(ConfigError::Validation(
            "database.max_connections must be greater than zero".to_string(),
        ));
    }

    if database.timeout_secs == 0 || database.timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "database.timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    Ok(())
}

fn validate_catalogue(catalogue: &CatalogueConfig) -> Result<(), ConfigError> {
    if catalogue.id.trim().is_empty() {
        return Err(ConfigError::Validation("catalogue.id must not be empty".to_string()));
    }
    Ok(())
}

fn validate_checkout(checkout: &CheckoutConfig) -> Result<(), ConfigError> {
    require_http_url("checkout.host_url", &checkout.host_url)?;

    if checkout.merchant_id.trim().is_empty() {
        return Err(ConfigError::Validation(
            "checkout.merchant_id is required (MENUBOT_CHECKOUT_MERCHANT_ID)".to_string(),
        ));
    }
    if checkout.merchant_key.expose_secret().trim().is_empty() {
        return Err(ConfigError::Validation(
            "checkout.merchant_key is required (MENUBOT_CHECKOUT_MERCHANT_KEY)".to_string(),
        ));
    }

    for (key, value) in [
        ("checkout.return_url", &checkout.return_url),
        ("checkout.cancel_url", &checkout.cancel_url),
        ("checkout.notify_url", &checkout.notify_url),
    ] {
        if let Some(value) = value {
            require_http_url(key, value)?;
        }
    }

    Ok(())
}

fn require_http_url(key: &str, value: &str) -> Result<(), ConfigError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!("{key} must start with http:// or https://")))
    }
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse::<u32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    database: Option<DatabasePatch>,
    catalogue: Option<CataloguePatch>,
    checkout: Option<CheckoutPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct DatabasePatch {
    url: Option<String>,
    max_connections: Option<u32>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct CataloguePatch {
    id: Option<String>,
    preamble: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct CheckoutPatch {
    host_url: Option<String>,
    merchant_id: Option<String>,
    merchant_key: Option<String>,
    return_url: Option<String>,
    cancel_url: Option<String>,
    notify_url: Option<String>,
    item_name_prefix: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io;
    use std::sync::{Mutex, OnceLock};

    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    const MERCHANT_VARS: [&str; 2] = ["MENUBOT_CHECKOUT_MERCHANT_ID", "MENUBOT_CHECKOUT_MERCHANT_KEY"];

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    fn set_merchant() {
        env::set_var("MENUBOT_CHECKOUT_MERCHANT_ID", "10000100");
        env::set_var("MENUBOT_CHECKOUT_MERCHANT_KEY", "46f0cd694581a");
    }

    fn ensure(condition: bool, message: &'static str) -> Result<(), String> {
        if condition {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    #[test]
    fn file_load_supports_env_interpolation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TEST_MENUBOT_MERCHANT_ID", "10000100");
        env::set_var("TEST_MENUBOT_MERCHANT_KEY", "key-from-env");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("menubot.toml");
            fs::write(
                &path,
                r#"
[checkout]
merchant_id = "${TEST_MENUBOT_MERCHANT_ID}"
merchant_key = "${TEST_MENUBOT_MERCHANT_KEY}"
notify_url = "https://bot.example.com/notify"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config =
                AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                    .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.checkout.merchant_id == "10000100", "merchant id should be interpolated")?;
            ensure(
                config.checkout.merchant_key.expose_secret() == "key-from-env",
                "merchant key should be interpolated",
            )?;
            ensure(
                config.checkout.notify_url.as_deref() == Some("https://bot.example.com/notify"),
                "notify url should be read from the file",
            )?;
            Ok(())
        })();

        clear_vars(&["TEST_MENUBOT_MERCHANT_ID", "TEST_MENUBOT_MERCHANT_KEY"]);
        result
    }

    #[test]
    fn missing_interpolation_variable_is_reported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let path = dir.path().join("menubot.toml");
        fs::write(&path, "[catalogue]\nid = \"${MENUBOT_TEST_UNSET_CATALOGUE}\"\n")
            .map_err(|err| err.to_string())?;

        match AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() }) {
            Err(ConfigError::MissingEnvInterpolation { var }) => ensure(
                var == "MENUBOT_TEST_UNSET_CATALOGUE",
                "error should name the missing variable",
            ),
            Err(other) => Err(format!("unexpected error: {other}")),
            Ok(_) => Err("expected interpolation failure".to_string()),
        }
    }

    #[test]
    fn logging_env_aliases_are_supported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        set_merchant();
        env::set_var("MENUBOT_LOG_LEVEL", "warn");
        env::set_var("MENUBOT_LOG_FORMAT", "json");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.logging.level == "warn", "warning log level should be set from env var")?;
            ensure(
                matches!(config.logging.format, LogFormat::Json),
                "json logging format should be set from env var",
            )?;
            Ok(())
        })();

        clear_vars(&MERCHANT_VARS);
        clear_vars(&["MENUBOT_LOG_LEVEL", "MENUBOT_LOG_FORMAT"]);
        result
    }

    #[test]
    fn precedence_defaults_file_env_overrides() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        set_merchant();
        env::set_var("MENUBOT_DATABASE_URL", "sqlite://from-env.db");
        env::set_var("MENUBOT_CATALOGUE_ID", "Goat");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("menubot.toml");
            fs::write(
                &path,
                r#"
[database]
url = "sqlite://from-file.db"

[catalogue]
id = "Sheep"
preamble = "Farm stall:"

[checkout]
item_name_prefix = "Farm order"

[logging]
level = "warn"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    database_url: Some("sqlite://from-override.db".to_string()),
                    log_level: Some("debug".to_string()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.database.url == "sqlite://from-override.db",
                "override database url should win",
            )?;
            ensure(config.logging.level == "debug", "overridden log level should be debug")?;
            ensure(config.catalogue.id == "Goat", "env catalogue id should win over the file")?;
            ensure(config.catalogue.preamble == "Farm stall:", "file preamble should be kept")?;
            ensure(
                config.checkout.item_name_prefix == "Farm order",
                "file item name prefix should be kept",
            )?;
            Ok(())
        })();

        clear_vars(&MERCHANT_VARS);
        clear_vars(&["MENUBOT_DATABASE_URL", "MENUBOT_CATALOGUE_ID"]);
        result
    }

    #[test]
    fn validation_requires_merchant_credentials() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(&MERCHANT_VARS);

        match AppConfig::load(LoadOptions::default()) {
            Err(ConfigError::Validation(message)) => ensure(
                message.contains("checkout.merchant_id"),
                "validation error should name the missing merchant id",
            ),
            Err(other) => Err(format!("unexpected error: {other}")),
            Ok(_) => Err("expected validation failure but config load succeeded".to_string()),
        }
    }

    #[test]
    fn validation_rejects_non_http_callback_urls() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        set_merchant();
        env::set_var("MENUBOT_CHECKOUT_RETURN_URL", "bot.example.com/done");

        let result = match AppConfig::load(LoadOptions::default()) {
            Err(ConfigError::Validation(message)) => ensure(
                message.contains("checkout.return_url"),
                "validation error should name the return url",
            ),
            Err(other) => Err(format!("unexpected error: {other}")),
            Ok(_) => Err("expected validation failure but config load succeeded".to_string()),
        };

        clear_vars(&MERCHANT_VARS);
        clear_vars(&["MENUBOT_CHECKOUT_RETURN_URL"]);
        result
    }

    #[test]
    fn invalid_numeric_env_override_is_rejected() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        set_merchant();
        env::set_var("MENUBOT_DATABASE_MAX_CONNECTIONS", "many");

        let result = match AppConfig::load(LoadOptions::default()) {
            Err(ConfigError::InvalidEnvOverride { key, value }) => ensure(
                key == "MENUBOT_DATABASE_MAX_CONNECTIONS" && value == "many",
                "error should carry the offending key and value",
            ),
            Err(other) => Err(format!("unexpected error: {other}")),
            Ok(_) => Err("expected env override failure".to_string()),
        };

        clear_vars(&MERCHANT_VARS);
        clear_vars(&["MENUBOT_DATABASE_MAX_CONNECTIONS"]);
        result
    }

    #[test]
    fn require_file_reports_missing_path() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let path = dir.path().join("absent.toml");

        match AppConfig::load(LoadOptions {
            config_path: Some(path.clone()),
            require_file: true,
            ..LoadOptions::default()
        }) {
            Err(ConfigError::MissingConfigFile(missing)) => {
                ensure(missing == path, "error should carry the requested path")
            }
            Err(other) => Err(format!("unexpected error: {other}")),
            Ok(_) => Err("expected missing file error".to_string()),
        }
    }

    #[test]
    fn config_errors_surface_as_configuration_failures() {
        let error = crate::errors::ApplicationError::from(ConfigError::Validation(
            "catalogue.id must not be empty".to_string(),
        ));
        assert!(matches!(error, crate::errors::ApplicationError::Configuration(message)
            if message.contains("catalogue.id")));
    }
}
