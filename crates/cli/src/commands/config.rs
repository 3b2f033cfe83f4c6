use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use menubot_core::config::{AppConfig, LoadOptions};
use secrecy::ExposeSecret;
use toml::Value;

const UNSET: &str = "<unset>";

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    for field in effective_values(&config) {
        let source = field_source(
            field.key_path,
            field.env_keys,
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        );
        lines.push(render_line(field.key_path, &field.value, source));
    }

    lines.join("\n")
}

struct ReportedField {
    key_path: &'static str,
    value: String,
    env_keys: &'static [&'static str],
}

fn field(key_path: &'static str, value: String, env_keys: &'static [&'static str]) -> ReportedField {
    ReportedField { key_path, value, env_keys }
}

/// Every reported field with its rendered value and the env keys that can set it.
fn effective_values(config: &AppConfig) -> Vec<ReportedField> {
    let checkout = &config.checkout;
    let optional = |value: &Option<String>| value.clone().unwrap_or_else(|| UNSET.to_string());

    vec![
        field("database.url", config.database.url.clone(), &["MENUBOT_DATABASE_URL"]),
        field(
            "database.max_connections",
            config.database.max_connections.to_string(),
            &["MENUBOT_DATABASE_MAX_CONNECTIONS"],
        ),
        field(
            "database.timeout_secs",
            config.database.timeout_secs.to_string(),
            &["MENUBOT_DATABASE_TIMEOUT_SECS"],
        ),
        field("catalogue.id", config.catalogue.id.clone(), &["MENUBOT_CATALOGUE_ID"]),
        field("catalogue.preamble", config.catalogue.preamble.clone(), &["MENUBOT_CATALOGUE_PREAMBLE"]),
        field("checkout.host_url", checkout.host_url.clone(), &["MENUBOT_CHECKOUT_HOST_URL"]),
        field("checkout.merchant_id", checkout.merchant_id.clone(), &["MENUBOT_CHECKOUT_MERCHANT_ID"]),
        field(
            "checkout.merchant_key",
            redact_secret(checkout.merchant_key.expose_secret()),
            &["MENUBOT_CHECKOUT_MERCHANT_KEY"],
        ),
        field("checkout.return_url", optional(&checkout.return_url), &["MENUBOT_CHECKOUT_RETURN_URL"]),
        field("checkout.cancel_url", optional(&checkout.cancel_url), &["MENUBOT_CHECKOUT_CANCEL_URL"]),
        field("checkout.notify_url", optional(&checkout.notify_url), &["MENUBOT_CHECKOUT_NOTIFY_URL"]),
        field(
            "checkout.item_name_prefix",
            checkout.item_name_prefix.clone(),
            &["MENUBOT_CHECKOUT_ITEM_NAME_PREFIX"],
        ),
        field(
            "logging.level",
            config.logging.level.clone(),
            &["MENUBOT_LOGGING_LEVEL", "MENUBOT_LOG_LEVEL"],
        ),
        field(
            "logging.format",
            format!("{:?}", config.logging.format),
            &["MENUBOT_LOGGING_FORMAT", "MENUBOT_LOG_FORMAT"],
        ),
    ]
}

fn detect_config_path() -> Option<PathBuf> {
    ["menubot.toml", "config/menubot.toml"].into_iter().map(PathBuf::from).find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

/// Keeps the first two characters so operators can tell keys apart.
fn redact_secret(secret: &str) -> String {
    let trimmed = secret.trim();
    if trimmed.is_empty() {
        return "<empty>".to_string();
    }

    let visible = trimmed.chars().take(2).collect::<String>();
    format!("{visible}***")
}

#[cfg(test)]
mod tests {
    use super::{contains_path, redact_secret};

    #[test]
    fn secrets_are_redacted_to_a_short_prefix() {
        assert_eq!(redact_secret("46f0cd694581a"), "46***");
        assert_eq!(redact_secret("  "), "<empty>");
    }

    #[test]
    fn nested_key_paths_are_found_in_toml() {
        let doc = "[checkout]\nmerchant_id = \"10000100\"\n".parse::<toml::Value>().expect("toml");

        assert!(contains_path(&doc, "checkout.merchant_id"));
        assert!(!contains_path(&doc, "checkout.merchant_key"));
        assert!(!contains_path(&doc, "logging.level"));
    }
}
