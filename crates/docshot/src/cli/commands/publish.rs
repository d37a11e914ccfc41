//! Publish command - upload screenshots and print their URLs

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use docshot_core::config::env;
use docshot_core::{find_images, PublishConfig, PublishSettings};
use docshot_stores::{PublishEvent, Publisher, S3Store};

use crate::cli::{output, Cli};
use crate::exit_codes;

/// Upload screenshots to S3
#[derive(Debug, Args)]
pub struct PublishCommand {
    /// Target bucket
    #[arg(long, env = env::BUCKET)]
    pub bucket: Option<String>,

    /// Key prefix inside the bucket
    #[arg(long, env = env::PREFIX)]
    pub prefix: Option<String>,

    /// Repository identifier (owner/repo)
    #[arg(long, env = env::REPOSITORY)]
    pub repository: Option<String>,

    /// CI run identifier
    #[arg(long, env = env::RUN_ID)]
    pub run_id: Option<String>,

    /// Signed URL validity in seconds [default: 3600]
    #[arg(long, env = env::EXPIRES_IN)]
    pub expires_in: Option<String>,

    /// Directory scanned for screenshots [default: screenshots]
    #[arg(long, env = env::SCREENSHOTS_DIR)]
    pub screenshots_dir: Option<PathBuf>,

    /// Set to "true" for public URLs instead of signed ones
    #[arg(long, env = env::USE_PUBLIC_URL)]
    pub use_public_url: Option<String>,

    /// Storage region [default: us-east-1]
    #[arg(long, env = env::REGION)]
    pub region: Option<String>,

    /// Fallback region
    #[arg(long, env = env::DEFAULT_REGION, hide = true)]
    pub default_region: Option<String>,
}

impl PublishCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<i32> {
        info!("executing publish command");

        let config = match PublishConfig::try_from(self.settings()) {
            Ok(config) => config,
            Err(e) => {
                output::fatal(&e.to_string());
                return Ok(exit_codes::ERROR);
            }
        };

        if let Err(e) = config.ensure_screenshots_dir() {
            output::fatal(&e.to_string());
            return Ok(exit_codes::ERROR);
        }

        let runtime = super::runtime()?;
        runtime.block_on(Self::publish(config, cli))
    }

    fn settings(&self) -> PublishSettings {
        PublishSettings {
            bucket: self.bucket.clone(),
            prefix: self.prefix.clone(),
            repository: self.repository.clone(),
            run_id: self.run_id.clone(),
            expires_in: self.expires_in.clone(),
            screenshots_dir: self.screenshots_dir.clone(),
            use_public_url: self.use_public_url.clone(),
            region: self.region.clone(),
            default_region: self.default_region.clone(),
        }
    }

    async fn publish(config: PublishConfig, cli: &Cli) -> anyhow::Result<i32> {
        let files = find_images(&config.screenshots_dir)?;

        if files.is_empty() {
            if !cli.quiet {
                output::info("No PNG files found in screenshots directory");
            }
            println!("[]");
            return Ok(exit_codes::SUCCESS);
        }

        if !cli.quiet {
            output::info(&format!("Found {} PNG file(s) to upload", files.len()));
        }

        let store = S3Store::from_config(&config).await;
        let publisher = Publisher::new(store, config);

        let report = publisher
            .publish(&files, |event| match event {
                PublishEvent::Uploaded { relative_path } => {
                    if !cli.quiet {
                        output::success(&format!("Uploaded: {}", relative_path));
                    }
                }
                PublishEvent::Failed { path, error } => {
                    output::error(&format!("Failed to upload {}: {}", path.display(), error));
                }
            })
            .await;

        if !cli.quiet {
            output::line("");
            output::line(&format!("Generated {} URLs:", report.mode.label()));
            for url in report.url_strings() {
                output::line(&format!("  {}", url));
            }
        }

        println!("{}", report.to_json()?);

        info!(
            uploaded = report.urls.len(),
            failed = report.failures.len(),
            "publish finished"
        );

        Ok(if report.is_success() {
            exit_codes::SUCCESS
        } else {
            exit_codes::ERROR
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> PublishCommand {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            crate::cli::Commands::Publish(cmd) => cmd,
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_flags_map_to_settings() {
        let cmd = parse(&[
            "docshot",
            "publish",
            "--bucket",
            "previews",
            "--prefix",
            "docs",
            "--repository",
            "acme/widgets",
            "--run-id",
            "99",
            "--expires-in",
            "600",
            "--screenshots-dir",
            "out",
            "--use-public-url",
            "true",
            "--region",
            "eu-west-2",
        ]);

        let config = PublishConfig::try_from(cmd.settings()).unwrap();
        assert_eq!(config.target.key_for("a.png").as_str(), "docs/acme/widgets/99/a.png");
        assert_eq!(config.screenshots_dir, PathBuf::from("out"));
        assert_eq!(config.region, "eu-west-2");
        assert_eq!(config.url_mode.label(), "public");
    }

    #[test]
    fn test_missing_config_fails_before_any_io() {
        let temp = tempfile::TempDir::new().unwrap();
        let cli = Cli::try_parse_from([
            "docshot",
            "publish",
            "--bucket",
            "",
            "--screenshots-dir",
            temp.path().to_str().unwrap(),
        ])
        .unwrap();

        assert_eq!(cli.execute().unwrap(), exit_codes::ERROR);
    }

    #[test]
    fn test_missing_directory_fails() {
        let temp = tempfile::TempDir::new().unwrap();
        let missing = temp.path().join("missing");
        let cli = Cli::try_parse_from([
            "docshot",
            "publish",
            "--bucket",
            "previews",
            "--prefix",
            "docs",
            "--repository",
            "acme/widgets",
            "--run-id",
            "1",
            "--screenshots-dir",
            missing.to_str().unwrap(),
        ])
        .unwrap();

        assert_eq!(cli.execute().unwrap(), exit_codes::ERROR);
    }

    #[test]
    fn test_file_as_screenshots_dir_fails() {
        let temp = tempfile::TempDir::new().unwrap();
        let file = temp.path().join("shot.png");
        std::fs::write(&file, b"\x89PNG").unwrap();
        let cli = Cli::try_parse_from([
            "docshot",
            "publish",
            "--bucket",
            "previews",
            "--prefix",
            "docs",
            "--repository",
            "acme/widgets",
            "--run-id",
            "1",
            "--screenshots-dir",
            file.to_str().unwrap(),
        ])
        .unwrap();

        assert_eq!(cli.execute().unwrap(), exit_codes::ERROR);
    }
}
