//! Loader for service configuration with YAML + environment overlays.
//!
//! Sources are merged lowest to highest: built-in defaults, YAML (file or
//! inline string), then `ISG_`-prefixed environment variables using `__` for
//! nesting (`ISG_SERVER__LISTEN=127.0.0.1:8080`). `${VAR}` placeholders in
//! string values are expanded after merging.
use config::{Config, ConfigError, Environment, File, FileFormat};
use isg_common::DeviceTable;
use isg_common::observability::{LogConfig, LogFormat};
use serde::Deserialize;
use serde_json::Value;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;
const ENV_PREFIX: &str = "ISG";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Source(#[from] ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IsgConfig {
    pub device: DeviceConfig,
    pub server: ServerConfig,
    pub log: LogSettings,
    pub table: DeviceTable,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Host or `host:port` of the ISG. The first CLI argument takes precedence.
    pub host: Option<String>,
    pub timeout_secs: u64,
    pub retries: usize,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            host: None,
            timeout_secs: 15,
            retries: 0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:5432".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub app_name: Option<String>,
    pub dir: Option<PathBuf>,
    pub format: LogFormat,
    pub stderr: bool,
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            app_name: None,
            dir: None,
            format: LogFormat::Text,
            stderr: true,
            filter: "info".into(),
        }
    }
}

impl LogSettings {
    pub fn to_log_config(&self) -> LogConfig {
        let defaults = LogConfig::default();
        LogConfig {
            app_name: self.app_name.clone().unwrap_or(defaults.app_name),
            log_dir: self.dir.clone(),
            emit_stderr: self.stderr,
            format: self.format,
            default_filter: self.filter.clone(),
        }
    }
}

impl IsgConfig {
    /// Base URL of the device web interface for `host`.
    ///
    /// ```
    /// assert_eq!(isg_config::IsgConfig::base_url("192.168.1.126"), "http://192.168.1.126/");
    /// ```
    pub fn base_url(host: &str) -> String {
        format!("http://{host}/")
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, LoadError> {
        self.server
            .listen
            .parse()
            .map_err(|e| LoadError::Invalid(format!("server.listen '{}': {e}", self.server.listen)))
    }

    fn validate(&self) -> Result<(), LoadError> {
        if self.device.timeout_secs == 0 {
            return Err(LoadError::Invalid("device.timeout_secs must be positive".into()));
        }
        if let Some(host) = &self.device.host {
            if host.trim().is_empty() || host.contains('/') {
                return Err(LoadError::Invalid(format!("device.host '{host}' is not a host")));
            }
        }
        self.listen_addr().map(|_| ())
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Default config location: `$XDG_CONFIG_HOME/isg/isg.yaml` (or platform equivalent).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("isg").join("isg.yaml"))
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct IsgConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for IsgConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl IsgConfigLoader {
    /// Start from built-in defaults; `ISG_` env overrides are applied at [`load`](Self::load).
    ///
    /// ```
    /// use isg_config::IsgConfigLoader;
    ///
    /// let config = IsgConfigLoader::new()
    ///     .with_yaml_str("device:\n  host: '10.0.0.7'")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.device.host.as_deref(), Some("10.0.0.7"));
    /// assert_eq!(config.server.listen, "0.0.0.0:5432");
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Like [`with_file`](Self::with_file) but a missing file is skipped.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use isg_config::IsgConfigLoader;
    ///
    /// let cfg = IsgConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// table:
    ///   pages:
    ///     cooling: "?s=4,9"
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.table.pages.cooling, "?s=4,9");
    /// assert_eq!(cfg.table.pages.heating, "?s=4,0");
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly typed config.
    pub fn load(self) -> Result<IsgConfig, LoadError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: IsgConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;
        typed.validate()?;

        Ok(typed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expands_simple_string() {
        temp_env::with_var("ISG_TEST_HOST", Some("10.1.1.1"), || {
            let mut v = json!("http://${ISG_TEST_HOST}/");
            expand_env_in_value(&mut v);
            assert_eq!(v, json!("http://10.1.1.1/"));
        });
    }

    #[test]
    fn expands_in_array_and_object() {
        temp_env::with_vars([("CITY", Some("Winston")), ("STATE", Some("NC"))], || {
            let mut v = json!([
                "hello-$CITY",
                { "loc": "${CITY}-${STATE}" },
                42,
                true,
                null
            ]);
            expand_env_in_value(&mut v);
            assert_eq!(
                v,
                json!(["hello-Winston", { "loc": "Winston-NC" }, 42, true, null])
            );
        });
    }

    #[test]
    fn expands_recursively_across_env_values() {
        temp_env::with_vars(
            [
                ("BAZ", Some("qux")),
                ("BAR", Some("mid-${BAZ}")),
                ("FOO", Some("start-${BAR}-end")),
            ],
            || {
                let mut v = json!("X=${FOO}");
                expand_env_in_value(&mut v);
                assert_eq!(v, json!("X=start-mid-qux-end"));
            },
        );
    }

    #[test]
    fn stops_on_cycles() {
        temp_env::with_vars([("A", Some("${B}")), ("B", Some("${A}"))], || {
            let mut v = json!("x=${A}-y");
            expand_env_in_value(&mut v);
            let s = v.as_str().unwrap();
            assert!(s.starts_with("x=") && s.ends_with("-y"));
            assert!(s.contains("${"));
        });
    }

    #[test]
    fn unknown_vars_are_left_as_is() {
        let mut v = json!("hi-${DOES_NOT_EXIST}");
        expand_env_in_value(&mut v);
        assert_eq!(v, json!("hi-${DOES_NOT_EXIST}"));
    }

    #[test]
    fn log_settings_fill_app_name() {
        let log = LogSettings::default().to_log_config();
        assert_eq!(log.app_name, "isg-api");
        assert!(log.emit_stderr);
        assert_eq!(log.default_filter, "info");
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut cfg = IsgConfig::default();
        cfg.device.timeout_secs = 0;
        assert!(matches!(cfg.validate(), Err(LoadError::Invalid(_))));
    }

    #[test]
    fn rejects_host_with_path() {
        let mut cfg = IsgConfig::default();
        cfg.device.host = Some("10.0.0.1/isg".into());
        assert!(matches!(cfg.validate(), Err(LoadError::Invalid(_))));
    }
}
