use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{AssembleError, Result};

/// Pod package variant. Each variant maps to a static pod configuration
/// document shipped in `assets/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageVariant {
    Full,
    Training,
}

impl PackageVariant {
    pub const ALL: [PackageVariant; 2] = [PackageVariant::Full, PackageVariant::Training];

    /// Repo-relative path of this variant's pod configuration document.
    pub fn pod_config_path(self) -> &'static str {
        match self {
            PackageVariant::Full => "assets/ort-c.config.json",
            PackageVariant::Training => "assets/ort-training-c.config.json",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PackageVariant::Full => "Full",
            PackageVariant::Training => "Training",
        }
    }
}

impl fmt::Display for PackageVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PackageVariant {
    type Err = AssembleError;

    fn from_str(s: &str) -> Result<Self> {
        PackageVariant::ALL
            .iter()
            .find(|variant| variant.name() == s)
            .copied()
            .ok_or_else(|| AssembleError::InvalidVariant(s.to_string()))
    }
}

/// Static pod configuration document for one package variant.
#[derive(Debug, Deserialize)]
pub struct PodConfig {
    pub name: String,
    pub summary: String,
    pub description: String,
}

/// Per-platform values produced by the upstream framework build.
#[derive(Debug, Deserialize)]
pub struct PlatformInfo {
    #[serde(rename = "APPLE_DEPLOYMENT_TARGET")]
    pub deployment_target: Option<String>,
    #[serde(rename = "WEAK_FRAMEWORK")]
    pub weak_framework: Option<String>,
}

/// Build-produced framework metadata, keyed by platform name
/// (e.g. "iphoneos", "iphonesimulator", "macosx").
#[derive(Debug)]
pub struct FrameworkInfo {
    path: PathBuf,
    platforms: IndexMap<String, PlatformInfo>,
}

impl FrameworkInfo {
    pub fn load(path: &Path) -> Result<FrameworkInfo> {
        let platforms = load_json_config(path)?;
        Ok(FrameworkInfo {
            path: path.to_path_buf(),
            platforms,
        })
    }

    /// Deployment target of a platform that must be present.
    pub fn deployment_target(&self, platform: &str) -> Result<&str> {
        let info = self.platform(platform)?;
        info.deployment_target
            .as_deref()
            .ok_or_else(|| self.missing_key(platform, "APPLE_DEPLOYMENT_TARGET"))
    }

    /// Deployment target of an optional platform; empty when the platform
    /// entry or the field is absent.
    pub fn deployment_target_or_empty(&self, platform: &str) -> &str {
        self.platforms
            .get(platform)
            .and_then(|info| info.deployment_target.as_deref())
            .unwrap_or("")
    }

    pub fn weak_framework(&self, platform: &str) -> Result<&str> {
        let info = self.platform(platform)?;
        info.weak_framework
            .as_deref()
            .ok_or_else(|| self.missing_key(platform, "WEAK_FRAMEWORK"))
    }

    fn platform(&self, platform: &str) -> Result<&PlatformInfo> {
        self.platforms.get(platform).ok_or_else(|| AssembleError::MissingKey {
            path: self.path.clone(),
            key: platform.to_string(),
        })
    }

    fn missing_key(&self, platform: &str, field: &str) -> AssembleError {
        AssembleError::MissingKey {
            path: self.path.clone(),
            key: format!("{}.{}", platform, field),
        }
    }
}

/// Load a JSON configuration document from disk.
pub fn load_json_config<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|source| AssembleError::PathNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| AssembleError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn info_from(json: &str) -> FrameworkInfo {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("framework_info.json");
        fs::write(&path, json).unwrap();
        FrameworkInfo::load(&path).unwrap()
    }

    #[test]
    fn variant_parses_known_names() {
        assert_eq!("Full".parse::<PackageVariant>().unwrap(), PackageVariant::Full);
        assert_eq!(
            "Training".parse::<PackageVariant>().unwrap(),
            PackageVariant::Training
        );
    }

    #[test]
    fn variant_rejects_unknown_names() {
        let err = "Mobile".parse::<PackageVariant>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Mobile"), "unexpected message: {}", message);
        assert!(message.contains("Full, Training"), "unexpected message: {}", message);
    }

    #[test]
    fn variants_map_to_distinct_config_files() {
        assert_ne!(
            PackageVariant::Full.pod_config_path(),
            PackageVariant::Training.pod_config_path()
        );
    }

    #[test]
    fn pod_config_requires_all_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pod.config.json");
        fs::write(&path, r#"{"name": "ort-c", "summary": "a pod"}"#).unwrap();

        let err = load_json_config::<PodConfig>(&path).unwrap_err();
        match err {
            AssembleError::ConfigParse { source, .. } => {
                assert!(source.to_string().contains("description"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn missing_config_file_is_path_not_found() {
        let err = load_json_config::<PodConfig>(Path::new("/nonexistent/pod.config.json"))
            .unwrap_err();
        assert!(matches!(err, AssembleError::PathNotFound { .. }));
    }

    #[test]
    fn deployment_target_reads_platform_entry() {
        let info = info_from(
            r#"{"iphonesimulator": {"APPLE_DEPLOYMENT_TARGET": "13.0", "WEAK_FRAMEWORK": "CoreML"}}"#,
        );
        assert_eq!(info.deployment_target("iphonesimulator").unwrap(), "13.0");
        assert_eq!(info.weak_framework("iphonesimulator").unwrap(), "CoreML");
    }

    #[test]
    fn missing_platform_entry_names_the_key() {
        let info = info_from(r#"{"macosx": {"APPLE_DEPLOYMENT_TARGET": "11.0"}}"#);
        match info.deployment_target("iphonesimulator").unwrap_err() {
            AssembleError::MissingKey { key, .. } => assert_eq!(key, "iphonesimulator"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn missing_field_names_platform_and_field() {
        let info = info_from(r#"{"iphonesimulator": {"APPLE_DEPLOYMENT_TARGET": "13.0"}}"#);
        match info.weak_framework("iphonesimulator").unwrap_err() {
            AssembleError::MissingKey { key, .. } => {
                assert_eq!(key, "iphonesimulator.WEAK_FRAMEWORK")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn optional_platform_defaults_to_empty() {
        let info = info_from(
            r#"{"iphonesimulator": {"APPLE_DEPLOYMENT_TARGET": "13.0", "WEAK_FRAMEWORK": "NO"}}"#,
        );
        assert_eq!(info.deployment_target_or_empty("macosx"), "");
        assert_eq!(info.deployment_target_or_empty("iphonesimulator"), "13.0");
    }

    #[test]
    fn unknown_platform_fields_are_ignored() {
        let info = info_from(
            r#"{"iphonesimulator": {"APPLE_DEPLOYMENT_TARGET": "13.0", "WEAK_FRAMEWORK": "NO", "EXTRA": 1}}"#,
        );
        assert_eq!(info.deployment_target("iphonesimulator").unwrap(), "13.0");
    }
}
