//! Assembles the files for the C/C++ pod package in a staging directory,
//! ready for `pod lib lint` and zipping up for distribution.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::config::{load_json_config, FrameworkInfo, PackageVariant, PodConfig};
use crate::error::{AssembleError, Result};
use crate::stage::{copy_dir_merge, copy_repo_relative_to_dir};
use crate::template::gen_file_from_template;

const PODSPEC_TEMPLATE: &str = "assets/c.podspec.template";
const LICENSE_FILE: &str = "LICENSE";

/// Inputs of one assembly run.
#[derive(Debug)]
pub struct AssembleArgs {
    pub staging_dir: PathBuf,
    pub pod_version: String,
    pub framework_info_file: PathBuf,
    pub public_headers_dir: PathBuf,
    pub framework_dir: PathBuf,
    pub variant: PackageVariant,
}

/// Name and podspec path of an assembled pod package.
#[derive(Debug)]
pub struct AssembledPod {
    pub name: String,
    pub podspec: PathBuf,
}

/// Stage the framework, headers, and license under `args.staging_dir` and
/// render the podspec next to them.
pub fn assemble_c_pod_package(repo_root: &Path, args: &AssembleArgs) -> Result<AssembledPod> {
    let staging_dir = absolutize(&args.staging_dir)?;
    let framework_info_file = resolve_required(&args.framework_info_file)?;
    let public_headers_dir = resolve_required(&args.public_headers_dir)?;
    let framework_dir = resolve_required(&args.framework_dir)?;

    let framework_info = FrameworkInfo::load(&framework_info_file)?;
    let pod_config: PodConfig = load_json_config(&repo_root.join(args.variant.pod_config_path()))?;

    log::info!(
        "Assembling files in staging directory: {}",
        staging_dir.display()
    );
    if staging_dir.exists() {
        log::warn!("Staging directory already exists: {}", staging_dir.display());
    }

    let framework_name = base_name(&framework_dir)?;
    let headers_name = base_name(&public_headers_dir)?;

    copy_dir_merge(&framework_dir, &staging_dir.join(&framework_name))?;
    copy_dir_merge(&public_headers_dir, &staging_dir.join(&headers_name))?;
    copy_repo_relative_to_dir(repo_root, &[LICENSE_FILE], &staging_dir)?;

    let mut substitutions = IndexMap::new();
    substitutions.insert("DESCRIPTION".to_string(), pod_config.description.clone());
    // The "iphoneos" and "iphonesimulator" slices share a deployment target.
    substitutions.insert(
        "IOS_DEPLOYMENT_TARGET".to_string(),
        framework_info.deployment_target("iphonesimulator")?.to_string(),
    );
    substitutions.insert(
        "MACOSX_DEPLOYMENT_TARGET".to_string(),
        framework_info.deployment_target_or_empty("macosx").to_string(),
    );
    substitutions.insert("LICENSE_FILE".to_string(), LICENSE_FILE.to_string());
    substitutions.insert("NAME".to_string(), pod_config.name.clone());
    substitutions.insert("ORT_C_FRAMEWORK".to_string(), framework_name);
    substitutions.insert("ORT_C_HEADERS_DIR".to_string(), headers_name);
    substitutions.insert("SUMMARY".to_string(), pod_config.summary.clone());
    substitutions.insert("VERSION".to_string(), args.pod_version.clone());
    substitutions.insert(
        "WEAK_FRAMEWORK".to_string(),
        framework_info.weak_framework("iphonesimulator")?.to_string(),
    );

    let podspec = staging_dir.join(format!("{}.podspec", pod_config.name));
    gen_file_from_template(&repo_root.join(PODSPEC_TEMPLATE), &podspec, &substitutions)?;

    Ok(AssembledPod {
        name: pod_config.name,
        podspec,
    })
}

fn resolve_required(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).map_err(|source| AssembleError::PathNotFound {
        path: path.to_path_buf(),
        source,
    })
}

/// Make a path absolute without requiring it to exist yet.
fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return resolve_required(path);
    }
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(env::current_dir()?.join(path))
}

fn base_name(path: &Path) -> Result<String> {
    let name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("no base name for {}", path.display()),
        )
    })?;
    Ok(name.to_string_lossy().into_owned())
}
