//! Capture command - screenshot a markdown document in the preview tool

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use tracing::info;

use docshot_capture::{BrowserSettings, CaptureSession, ChromiumPage};
use docshot_core::config::{
    DEFAULT_BROWSER_TIMEOUT_SECS, DEFAULT_PREVIEW_URL, DEFAULT_SCREENSHOTS_DIR,
};
use docshot_core::CaptureConfig;

use crate::cli::{output, Cli};
use crate::exit_codes;

/// Capture a preview screenshot
#[derive(Debug, Args)]
pub struct CaptureCommand {
    /// Markdown document to preview
    pub file: PathBuf,

    /// Directory the screenshot is written to
    #[arg(long, default_value = DEFAULT_SCREENSHOTS_DIR)]
    pub output_dir: PathBuf,

    /// Preview tool URL
    #[arg(long, default_value = DEFAULT_PREVIEW_URL)]
    pub url: String,

    /// Browser executable (detected on PATH when omitted)
    #[arg(long, env = "CHROME")]
    pub chrome: Option<PathBuf>,

    /// Disable the browser sandbox (needed in most containers)
    #[arg(
        long,
        env = "DOCSHOT_NO_SANDBOX",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub no_sandbox: bool,

    /// Timeout for each browser request, in seconds
    #[arg(long, default_value_t = DEFAULT_BROWSER_TIMEOUT_SECS)]
    pub timeout: u64,
}

impl CaptureCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<i32> {
        info!(file = %self.file.display(), "executing capture command");
        let runtime = super::runtime()?;
        runtime.block_on(self.execute_async(cli))
    }

    async fn execute_async(&self, cli: &Cli) -> anyhow::Result<i32> {
        let config = self.config()?;

        let page = ChromiumPage::launch(&self.browser_settings(&config)).await?;
        let outcome = CaptureSession::new(page).run(&config).await;

        match outcome.error {
            None => {
                if !cli.quiet {
                    output::success(&self.file.display().to_string());
                }
                Ok(exit_codes::SUCCESS)
            }
            Some(error) => {
                output::error(&format!("{}: {}", self.file.display(), error));
                Ok(exit_codes::ERROR)
            }
        }
    }

    fn config(&self) -> anyhow::Result<CaptureConfig> {
        Ok(CaptureConfig::new(&self.file)?
            .with_output_dir(&self.output_dir)
            .with_preview_url(&self.url)?
            .with_timeout(Duration::from_secs(self.timeout)))
    }

    fn browser_settings(&self, config: &CaptureConfig) -> BrowserSettings {
        let settings = BrowserSettings::default()
            .with_timeout(config.timeout)
            .with_sandbox(!self.no_sandbox);

        match &self.chrome {
            Some(path) => settings.with_executable(path),
            None => settings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> CaptureCommand {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            crate::cli::Commands::Capture(cmd) => cmd,
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_flags_build_config() {
        let cmd = parse(&[
            "docshot",
            "capture",
            "docs/r/widget.md",
            "--output-dir",
            "out",
            "--url",
            "http://localhost:3000/preview",
            "--timeout",
            "15",
        ]);

        let config = cmd.config().unwrap();
        assert_eq!(config.screenshot_path().unwrap(), PathBuf::from("out/widget.png"));
        assert_eq!(config.preview_url.as_str(), "http://localhost:3000/preview");
        assert_eq!(config.timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let cmd = parse(&["docshot", "capture", "a.md", "--url", "ftp://example.com"]);
        assert!(cmd.config().is_err());
    }

    #[test]
    fn test_browser_settings() {
        let cmd = parse(&[
            "docshot",
            "capture",
            "a.md",
            "--no-sandbox",
            "--chrome",
            "/usr/bin/chromium",
            "--timeout",
            "30",
        ]);

        let settings = cmd.browser_settings(&cmd.config().unwrap());
        assert!(!settings.sandbox);
        assert_eq!(settings.executable, Some(PathBuf::from("/usr/bin/chromium")));
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
    }
}
