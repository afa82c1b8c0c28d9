//! Command-line argument definition and processing.

use std::path::PathBuf;

use clap::Parser;

use crate::theme::Settings;

/// shopfront - A fast terminal storefront with shareable filter links
#[derive(Parser, Debug)]
#[command(name = "shopfront")]
#[command(version)]
#[command(about = "A fast terminal storefront for browsing a shop catalog with shareable filter links", long_about = None)]
pub struct Args {
    /// Link to open, e.g. `/shop/phones?page=2&brand=acme_globex`
    #[arg(short, long)]
    pub link: Option<String>,

    /// Base URL of the catalog API (overrides `api_url` in settings.conf)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Browse the built-in demo catalog instead of the API
    #[arg(long)]
    pub offline: bool,

    /// Browse a JSON catalog fixture (implies --offline)
    #[arg(long, value_name = "PATH")]
    pub fixture: Option<PathBuf>,

    /// Items per page (overrides `page_size` in settings.conf)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub page_size: Option<u32>,

    /// Resolve the link once, print the listing as JSON and exit
    #[arg(long)]
    pub dump: bool,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// What: Fold command-line overrides into file settings.
    ///
    /// Inputs:
    /// - `settings`: Values loaded from `settings.conf`
    ///
    /// Output:
    /// - `settings` with every flag that was given applied on top.
    #[must_use]
    pub fn apply_to(&self, mut settings: Settings) -> Settings {
        if let Some(url) = &self.api_url {
            settings.api_url.clone_from(url);
        }
        if self.offline || self.fixture.is_some() {
            settings.offline = true;
        }
        if let Some(n) = self.page_size {
            settings.page_size = n;
        }
        settings
    }

    /// What: Log level to initialize tracing with.
    ///
    /// Details:
    /// - `--verbose` overrides `--log-level`.
    #[must_use]
    pub fn log_level(&self) -> &str {
        if self.verbose {
            "debug"
        } else {
            &self.log_level
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Flags parse and override file settings
    ///
    /// - Input: `--link /shop/phones --api-url http://x/api --page-size 24 -v`
    /// - Output: Link kept; API URL and page size replaced; debug level
    fn flags_override_settings() {
        let args = Args::try_parse_from([
            "shopfront",
            "--link",
            "/shop/phones",
            "--api-url",
            "http://x/api",
            "--page-size",
            "24",
            "-v",
        ])
        .expect("valid args");
        assert_eq!(args.link.as_deref(), Some("/shop/phones"));
        assert_eq!(args.log_level(), "debug");
        let s = args.apply_to(Settings::default());
        assert_eq!(s.api_url, "http://x/api");
        assert_eq!(s.page_size, 24);
        assert!(!s.offline);
    }

    #[test]
    /// What: A fixture path switches to offline browsing
    ///
    /// - Input: `--fixture shop.json --dump`
    /// - Output: offline, dump, default log level
    fn fixture_implies_offline() {
        let args = Args::try_parse_from(["shopfront", "--fixture", "shop.json", "--dump"])
            .expect("valid args");
        assert!(args.dump);
        assert_eq!(args.log_level(), "info");
        assert!(args.apply_to(Settings::default()).offline);
    }

    #[test]
    /// What: Page size outside 1..=100 is rejected by the parser
    ///
    /// - Input: `--page-size 0`
    /// - Output: Err
    fn rejects_zero_page_size() {
        assert!(Args::try_parse_from(["shopfront", "--page-size", "0"]).is_err());
    }
}
