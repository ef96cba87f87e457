use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::path::{Path, PathBuf};

/// rbx-tracker: watch Roblox client versions and exploit status
///
/// Polls the WEAO API, keeps the last seen listing and version snapshot, and
/// re-renders only when the upstream data actually changed. Optionally serves
/// CORS-enabled pass-through routes for browser frontends.
#[derive(Debug, Parser, Clone)]
#[command(about, long_about, version)]
pub struct Cli {
    /// Path to configuration file.
    ///
    /// When omitted, defaults and `RBX_TRACKER_*` environment variables are used.
    #[arg(short, long, value_parser = validate_file)]
    pub conffile: Option<PathBuf>,

    /// Category shown first, e.g. `windows`. Overrides the config file.
    #[arg(long)]
    pub category: Option<String>,

    /// Run a single synchronization, print the view and exit.
    #[arg(long)]
    pub once: bool,

    /// Do not start the pass-through proxy server.
    #[arg(long)]
    pub no_proxy: bool,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    pub print_config: bool,

    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,
}

/// Check if the file exists.
#[inline(always)]
fn validate_file(file: &str) -> Result<PathBuf, String> {
    let path = Path::new(file);
    if path.is_file() {
        Ok(path.to_owned())
    } else {
        Err(format!("File not found: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from(["rbx-tracker", "--once", "--no-proxy", "--category", "mac"])
            .unwrap();
        assert!(cli.once);
        assert!(cli.no_proxy);
        assert!(!cli.print_config);
        assert_eq!(cli.category.as_deref(), Some("mac"));
        assert!(cli.conffile.is_none());
    }

    #[test]
    fn rejects_missing_conffile() {
        let err = Cli::try_parse_from(["rbx-tracker", "-c", "/definitely/not/here.toml"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
