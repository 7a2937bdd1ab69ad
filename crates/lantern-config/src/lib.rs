use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use lantern_core::{ConsentSettings, CoreError, SiteMetadata};
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "lantern";
const CONFIG_FILENAME: &str = "config.toml";

/// Settings read once at startup and shared by reference afterwards.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub site: SiteMetadata,
    pub consent: ConsentSettings,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid [site] section: {0}")]
    InvalidSite(#[source] CoreError),
    #[error("invalid [consent] section: {0}")]
    InvalidConsent(#[source] CoreError),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    site: Option<SiteFile>,
    consent: Option<ConsentFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SiteFile {
    app_name: Option<String>,
    public_url: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConsentFile {
    enabled: Option<bool>,
    message: Option<String>,
    policy_url: Option<String>,
    accept_label: Option<String>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let defaults = AppConfig::default();

    let site = match parsed.site {
        Some(site) => SiteMetadata::new(
            site.app_name
                .as_deref()
                .unwrap_or(defaults.site.app_name()),
            site.public_url
                .as_deref()
                .unwrap_or(defaults.site.public_url().as_str()),
            site.description
                .as_deref()
                .unwrap_or(defaults.site.description()),
        )
        .map_err(ConfigError::InvalidSite)?,
        None => defaults.site,
    };

    let consent = match parsed.consent {
        Some(consent) => ConsentSettings::new(
            consent.enabled.unwrap_or(defaults.consent.enabled),
            consent
                .message
                .as_deref()
                .unwrap_or(defaults.consent.message()),
            consent.policy_url.as_deref(),
            consent
                .accept_label
                .as_deref()
                .unwrap_or(defaults.consent.accept_label()),
        )
        .map_err(ConfigError::InvalidConsent)?,
        None => defaults.consent,
    };

    Ok(AppConfig { site, consent })
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{load_at_path, merge_config, ConfigError, ConfigFile, ConsentFile, SiteFile};
    use lantern_core::CoreError;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn restrict_permissions(path: &Path) {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path).expect("metadata").permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms).expect("chmod");
        }
    }

    #[test]
    fn merge_config_applies_values() {
        let parsed = ConfigFile {
            site: Some(SiteFile {
                app_name: Some("Beacon".to_string()),
                public_url: Some("https://beacon.example.com".to_string()),
                description: None,
            }),
            consent: Some(ConsentFile {
                enabled: Some(false),
                message: None,
                policy_url: Some("https://beacon.example.com/privacy".to_string()),
                accept_label: Some("Fine".to_string()),
            }),
        };
        let merged = merge_config(parsed).expect("merge");
        assert_eq!(merged.site.app_name(), "Beacon");
        assert_eq!(
            merged.site.public_url().as_str(),
            "https://beacon.example.com/"
        );
        assert_eq!(
            merged.site.description(),
            lantern_core::site::DEFAULT_DESCRIPTION
        );
        assert!(!merged.consent.enabled);
        assert_eq!(merged.consent.accept_label(), "Fine");
        assert!(merged.consent.policy_url().is_some());
    }

    #[test]
    fn merge_config_without_sections_uses_defaults() {
        let merged = merge_config(ConfigFile::default()).expect("merge");
        assert_eq!(merged.site.app_name(), "Lantern");
        assert!(merged.consent.enabled);
    }

    #[test]
    fn merge_config_rejects_blank_app_name() {
        let parsed = ConfigFile {
            site: Some(SiteFile {
                app_name: Some(" ".to_string()),
                ..SiteFile::default()
            }),
            consent: None,
        };
        let err = merge_config(parsed).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidSite(CoreError::EmptyAppName)
        ));
    }

    #[test]
    fn load_at_path_requires_file_when_requested() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load_at_path(&missing, true).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("config file not found"));
        assert!(load_at_path(&missing, false).expect("optional").is_none());
    }

    #[test]
    fn load_at_path_parses_toml() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[site]\napp_name = \"Beacon\"\npublic_url = \"https://beacon.example.com\"\n\
             [consent]\nmessage = \"Cookies keep you signed in.\"\n",
        )
        .expect("write config");
        restrict_permissions(&path);

        let config = load_at_path(&path, true).expect("load").expect("config");
        assert_eq!(config.site.app_name(), "Beacon");
        assert_eq!(config.consent.message(), "Cookies keep you signed in.");
    }

    #[test]
    fn load_at_path_rejects_unknown_keys() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "[site]\nfavicon = \"x.ico\"\n").expect("write config");
        restrict_permissions(&path);

        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn load_at_path_rejects_world_readable_file() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "").expect("write config");
        let mut perms = fs::metadata(&path).expect("metadata").permissions();
        perms.set_mode(0o644);
        fs::set_permissions(&path, perms).expect("chmod");

        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::InsecurePermissions(_)));
    }
}
