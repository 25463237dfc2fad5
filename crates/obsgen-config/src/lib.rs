//! `obsgen.toml` loading.
//!
//! Every key is optional; missing sections fall back to the defaults the
//! marker declarations ship with.

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error as ThisError;

/// Default file name looked up next to the manifest.
pub const CONFIG_FILE_NAME: &str = "obsgen.toml";

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config `{path}`: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

///
/// ObsgenConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ObsgenConfig {
    pub naming: NamingConfig,
    pub markers: MarkerConfig,
    pub reactive: ReactiveConfig,
}

impl ObsgenConfig {
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml(&source)
    }

    /// Load `path` when it exists, otherwise the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.naming.validate()?;
        self.markers.validate()?;
        self.reactive.validate()
    }
}

///
/// NamingConfig
///
/// Generated type names are `{prefix}{Name}{suffix}`. Suffixes must not be
/// suffixes of one another, which keeps the three name families disjoint.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamingConfig {
    pub prefix: String,
    pub instance_suffix: String,
    pub static_suffix: String,
    pub container_suffix: String,
    pub source_field: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            prefix: "Rx".to_string(),
            instance_suffix: "Events".to_string(),
            static_suffix: "Statics".to_string(),
            container_suffix: "Nested".to_string(),
            source_field: "_source".to_string(),
        }
    }
}

impl NamingConfig {
    #[must_use]
    pub fn instance_wrapper(&self, name: &str) -> String {
        format!("{}{name}{}", self.prefix, self.instance_suffix)
    }

    #[must_use]
    pub fn static_wrapper(&self, name: &str) -> String {
        format!("{}{name}{}", self.prefix, self.static_suffix)
    }

    #[must_use]
    pub fn container(&self, name: &str) -> String {
        format!("{}{name}{}", self.prefix, self.container_suffix)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.prefix.is_empty() {
            check_identifier("naming.prefix", &self.prefix)?;
        }
        check_identifier("naming.source_field", &self.source_field)?;

        let suffixes = [
            ("naming.instance_suffix", &self.instance_suffix),
            ("naming.static_suffix", &self.static_suffix),
            ("naming.container_suffix", &self.container_suffix),
        ];

        for (key, suffix) in suffixes {
            if suffix.is_empty() || !suffix.chars().all(|c| c == '_' || c.is_alphanumeric()) {
                return Err(ConfigError::Invalid(format!(
                    "{key} `{suffix}` must be a non-empty identifier fragment"
                )));
            }
        }

        for (i, (key_a, a)) in suffixes.iter().enumerate() {
            for (key_b, b) in &suffixes[i + 1..] {
                if a.ends_with(b.as_str()) || b.ends_with(a.as_str()) {
                    return Err(ConfigError::Invalid(format!(
                        "{key_a} `{a}` and {key_b} `{b}` overlap; neither may end with the other"
                    )));
                }
            }
        }

        Ok(())
    }
}

///
/// MarkerConfig
/// Names of the declarations the host scans for requests.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkerConfig {
    pub namespace: String,
    pub extensions_class: String,
    pub static_attribute: String,
    pub null_events: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            namespace: "ObservableEvents".to_string(),
            extensions_class: "ObservableGeneratorExtensions".to_string(),
            static_attribute: "GenerateStaticEventObservablesAttribute".to_string(),
            null_events: "NullEvents".to_string(),
        }
    }
}

impl MarkerConfig {
    /// Metadata name of the extension class, e.g. `ObservableEvents.ObservableGeneratorExtensions`.
    #[must_use]
    pub fn extensions_type(&self) -> String {
        format!("{}.{}", self.namespace, self.extensions_class)
    }

    #[must_use]
    pub fn static_attribute_type(&self) -> String {
        format!("{}.{}", self.namespace, self.static_attribute)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.namespace.is_empty() || !self.namespace.split('.').all(is_identifier) {
            return Err(ConfigError::Invalid(format!(
                "markers.namespace `{}` is not a namespace",
                self.namespace
            )));
        }
        check_identifier("markers.extensions_class", &self.extensions_class)?;
        check_identifier("markers.static_attribute", &self.static_attribute)?;
        check_identifier("markers.null_events", &self.null_events)
    }
}

///
/// ReactiveConfig
/// Fully qualified names of the push-stream library the wrappers target.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReactiveConfig {
    pub observable: String,
    pub from_event: String,
    pub unit: String,
}

impl Default for ReactiveConfig {
    fn default() -> Self {
        Self {
            observable: "global::System.IObservable".to_string(),
            from_event: "global::System.Reactive.Linq.Observable.FromEvent".to_string(),
            unit: "global::System.Reactive.Unit".to_string(),
        }
    }
}

impl ReactiveConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("reactive.observable", &self.observable),
            ("reactive.from_event", &self.from_event),
            ("reactive.unit", &self.unit),
        ] {
            let path = value.strip_prefix("global::").unwrap_or(value);
            if !path.split('.').all(is_identifier) {
                return Err(ConfigError::Invalid(format!(
                    "{key} `{value}` is not a qualified name"
                )));
            }
        }

        Ok(())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();

    matches!(chars.next(), Some(c) if c == '_' || c.is_alphabetic())
        && chars.all(|c| c == '_' || c.is_alphanumeric())
}

fn check_identifier(key: &str, value: &str) -> Result<(), ConfigError> {
    if is_identifier(value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{key} `{value}` is not an identifier"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        ObsgenConfig::default()
            .validate()
            .expect("defaults must validate");
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config = ObsgenConfig::from_toml("").expect("empty config parses");

        assert_eq!(config, ObsgenConfig::default());
        assert_eq!(config.naming.instance_wrapper("Widget"), "RxWidgetEvents");
        assert_eq!(config.naming.static_wrapper("Widget"), "RxWidgetStatics");
        assert_eq!(config.naming.container("Outer"), "RxOuterNested");
    }

    #[test]
    fn partial_sections_override_defaults() {
        let config = ObsgenConfig::from_toml(
            r#"
            [naming]
            prefix = ""
            instance_suffix = "Observables"

            [markers]
            namespace = "My.Events"
            "#,
        )
        .expect("config parses");

        assert_eq!(config.naming.instance_wrapper("Widget"), "WidgetObservables");
        assert_eq!(config.naming.static_suffix, "Statics");
        assert_eq!(
            config.markers.extensions_type(),
            "My.Events.ObservableGeneratorExtensions"
        );
    }

    #[test]
    fn overlapping_suffixes_are_rejected() {
        let err = ObsgenConfig::from_toml(
            r#"
            [naming]
            instance_suffix = "Events"
            static_suffix = "StaticEvents"
            "#,
        )
        .expect_err("overlap must fail");

        assert!(err.to_string().contains("overlap"), "got: {err}");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            ObsgenConfig::from_toml("[naming]\nsufix = \"X\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn reactive_names_must_be_qualified() {
        let err = ObsgenConfig::from_toml("[reactive]\nunit = \"global::Rx.<Unit>\"")
            .expect_err("bad name must fail");

        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
