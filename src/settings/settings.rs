use anyhow::{Result, anyhow};
use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub http: Http,
    pub log: Log,
    pub storage: Storage,
    #[serde(default)]
    pub catalog: Catalog,
}

#[derive(Debug, Deserialize)]
pub struct Http {
    pub address: String,
    #[serde(default)]
    pub tls: Option<Tls>,
}

#[derive(Debug, Deserialize)]
pub struct Tls {
    pub cert_path: String,
    pub key_path: String,
}

#[derive(Debug, Deserialize)]
pub struct Log {
    pub filter: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
    pub backend: String, // "memory"
}

#[derive(Debug, Deserialize)]
pub struct Catalog {
    #[serde(default = "default_popular_count")]
    pub popular_default_count: i64,
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog {
            popular_default_count: default_popular_count(),
        }
    }
}

fn default_popular_count() -> i64 {
    10
}

#[cfg(debug_assertions)]
const SETTINGS_PATH: &str = "settings/dev.toml";
#[cfg(not(debug_assertions))]
const SETTINGS_PATH: &str = "settings/release.toml";

const ENV_PREFIX: &str = "FILMORATE";

pub fn parse_settings(path: Option<&str>) -> Result<Settings> {
    let path = path.unwrap_or(SETTINGS_PATH);
    build(Config::builder().add_source(File::with_name(path)))
}

/// Environment variables such as `FILMORATE__HTTP__ADDRESS` win over the file.
fn build(builder: ConfigBuilder<DefaultState>) -> Result<Settings> {
    let settings: Settings = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        )
        .build()
        .map_err(|e| anyhow!(e))?
        .try_deserialize()
        .map_err(|e| anyhow!(e))?;

    Ok(settings)
}

impl Settings {
    pub fn apply_cli(&mut self, cli: &super::Cli) {
        if let Some(address) = &cli.address {
            self.http.address = address.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Cli, Parser};
    use config::FileFormat;

    fn from_toml(toml: &str) -> Result<Settings> {
        build(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    #[test]
    fn parses_full_file() {
        let settings = from_toml(
            r#"
[http]
address = "0.0.0.0:8443"
[http.tls]
cert_path = "certs/cert.pem"
key_path = "certs/key.pem"

[log]
filter = "debug"

[storage]
backend = "memory"

[catalog]
popular_default_count = 3
"#,
        )
        .unwrap();

        assert_eq!(settings.http.address, "0.0.0.0:8443");
        let tls = settings.http.tls.unwrap();
        assert_eq!(tls.cert_path, "certs/cert.pem");
        assert_eq!(settings.log.filter, "debug");
        assert_eq!(settings.storage.backend, "memory");
        assert_eq!(settings.catalog.popular_default_count, 3);
    }

    #[test]
    fn optional_sections_have_defaults() {
        let settings = from_toml(
            r#"
[http]
address = "127.0.0.1:8080"
[log]
filter = "info"
[storage]
backend = "memory"
"#,
        )
        .unwrap();

        assert!(settings.http.tls.is_none());
        assert_eq!(settings.catalog.popular_default_count, 10);
    }

    #[test]
    fn missing_required_section_fails() {
        assert!(from_toml("[log]\nfilter = \"info\"\n").is_err());
        assert!(parse_settings(Some("settings/does-not-exist")).is_err());
    }

    #[test]
    fn cli_address_overrides_file() {
        let mut settings = from_toml(
            "[http]\naddress = \"127.0.0.1:8080\"\n[log]\nfilter = \"info\"\n[storage]\nbackend = \"memory\"\n",
        )
        .unwrap();
        let cli = Cli::parse_from(["filmorate", "--address", "127.0.0.1:9090"]);

        settings.apply_cli(&cli);
        assert_eq!(settings.http.address, "127.0.0.1:9090");
    }
}
