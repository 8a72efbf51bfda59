use std::path::PathBuf;
use std::process::exit;

use gumdrop::Options;

use crate::assemble::{assemble_c_pod_package, AssembleArgs};
use crate::config::PackageVariant;

const DEFAULT_STAGING_DIR: &str = "./c-staging";

#[derive(Debug, Options)]
pub struct Args {
    #[options(help = "show help information")]
    help: bool,

    #[options(
        no_short,
        meta = "PATH",
        help = "path to the staging directory for the C/C++ pod files"
    )]
    staging_dir: Option<PathBuf>,

    #[options(no_short, meta = "VERSION", help = "C/C++ pod version")]
    pod_version: Option<String>,

    #[options(
        no_short,
        meta = "PATH",
        help = "path to the framework_info.json file generated by the framework build"
    )]
    framework_info_file: Option<PathBuf>,

    #[options(
        no_short,
        meta = "PATH",
        help = "path to the public headers directory to include in the pod"
    )]
    public_headers_dir: Option<PathBuf>,

    #[options(
        no_short,
        meta = "PATH",
        help = "path to the ORT framework directory to include in the pod"
    )]
    framework_dir: Option<PathBuf>,

    #[options(
        no_short,
        meta = "VARIANT",
        help = "pod package variant, one of: Full, Training"
    )]
    variant: Option<PackageVariant>,
}

fn print_help() {
    println!("assemble-c-pod -- assemble the files for the C/C++ pod package in a staging directory");
    println!();
    println!("The staging directory can be validated (e.g. with `pod lib lint`) and then");
    println!("zipped up to create a package for release.");
    println!();
    println!("Usage: assemble-c-pod [OPTIONS]");
    println!();
    println!("{}", Args::usage());
}

fn parse_args_or_exit(args: &[&str]) -> Args {
    let args = Args::parse_args_default(args).unwrap_or_else(|e| {
        eprintln!("assemble-c-pod: {}", e);
        exit(2);
    });

    if args.help_requested() {
        print_help();
        exit(0);
    }

    args
}

fn require<T>(value: Option<T>, option: &str) -> T {
    value.unwrap_or_else(|| {
        eprintln!("assemble-c-pod: missing required option: {}", option);
        exit(2);
    })
}

pub(crate) fn run(args: Vec<String>) {
    log::trace!("Args: {:?}", args);

    let args = parse_args_or_exit(&args.iter().map(|x| &**x).collect::<Vec<_>>());

    let assemble_args = AssembleArgs {
        staging_dir: args
            .staging_dir
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STAGING_DIR)),
        pod_version: require(args.pod_version, "--pod-version"),
        framework_info_file: require(args.framework_info_file, "--framework-info-file"),
        public_headers_dir: require(args.public_headers_dir, "--public-headers-dir"),
        framework_dir: require(args.framework_dir, "--framework-dir"),
        variant: require(args.variant, "--variant"),
    };

    let repo_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

    match assemble_c_pod_package(&repo_root, &assemble_args) {
        Ok(pod) => {
            log::info!("Assembled the {} pod package", pod.name);
            println!("{}", pod.podspec.display());
        }
        Err(e) => {
            log::error!("Failed to assemble the C/C++ pod package.");
            log::error!("{}", e);
            exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_option_set() {
        let args = Args::parse_args_default(&[
            "--staging-dir",
            "/tmp/staging",
            "--pod-version",
            "1.2.3",
            "--framework-info-file",
            "/tmp/framework_info.json",
            "--public-headers-dir",
            "/tmp/headers",
            "--framework-dir",
            "/tmp/ort.framework",
            "--variant",
            "Training",
        ])
        .unwrap();

        assert_eq!(args.staging_dir, Some(PathBuf::from("/tmp/staging")));
        assert_eq!(args.pod_version.as_deref(), Some("1.2.3"));
        assert_eq!(args.variant, Some(PackageVariant::Training));
    }

    #[test]
    fn staging_dir_is_optional() {
        let args = Args::parse_args_default(&["--pod-version", "1.2.3"]).unwrap();
        assert_eq!(args.staging_dir, None);
    }

    #[test]
    fn unknown_variant_fails_at_parse_time() {
        let err = Args::parse_args_default(&["--variant", "Mobile"]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Full, Training"), "unexpected message: {}", message);
    }
}
