//! Command-line argument definitions using clap.

use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use crate::api::Parent;
use crate::config::{parse_collection_id, parse_post_id, Config};
use crate::download::RunOptions;
use crate::error::Result;

/// CivitAI collection and post downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "civitai-downloader",
    version,
    about = "Download images, videos, and metadata from CivitAI collections and posts.",
    long_about = "Download images, videos, and metadata from CivitAI collections and posts.\n\n\
                  IDs may be given as numbers or as civitai.com collection/post URLs."
)]
#[command(group(ArgGroup::new("target").required(true).args(["collection", "post"])))]
pub struct Args {
    /// Collection ID(s) to download. Can specify multiple IDs.
    #[arg(short, long, num_args = 1.., value_name = "ID")]
    pub collection: Option<Vec<String>>,

    /// Post ID(s) to download. Can specify multiple IDs.
    #[arg(short, long, num_args = 1.., value_name = "ID")]
    pub post: Option<Vec<String>>,

    /// Override default download location.
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Skip metadata generation.
    #[arg(long)]
    pub no_metadata: bool,

    /// Show what would be downloaded without downloading.
    #[arg(long)]
    pub dry_run: bool,

    /// Path to configuration file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// CivitAI API key.
    #[arg(long, env = "CIVITAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

impl Args {
    /// Configuration file to use.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Parse the requested collection or post IDs, one result per argument.
    ///
    /// A malformed ID fails only its own entry.
    pub fn parents(&self) -> Vec<Result<Parent>> {
        if let Some(ids) = &self.collection {
            ids.iter()
                .map(|id| parse_collection_id(id).map(Parent::Collection))
                .collect()
        } else if let Some(ids) = &self.post {
            ids.iter()
                .map(|id| parse_post_id(id).map(Parent::Post))
                .collect()
        } else {
            Vec::new()
        }
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            dry_run: self.dry_run,
            skip_metadata: self.no_metadata,
        }
    }

    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(dir) = &self.output {
            config.download_dir = dir.clone();
        }

        if let Some(key) = self.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            config.api_key = key.trim().to_string();
        }

        if self.verbose {
            config.log_level = "debug".to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_multiple_collections() {
        let args = Args::try_parse_from(["civitai-downloader", "-c", "1", "2", "--dry-run"]).unwrap();
        let parents: Vec<Parent> = args.parents().into_iter().map(Result::unwrap).collect();
        assert_eq!(parents, vec![Parent::Collection(1), Parent::Collection(2)]);
        assert!(args.run_options().dry_run);
        assert!(!args.run_options().skip_metadata);
    }

    #[test]
    fn test_post_urls() {
        let args = Args::try_parse_from([
            "civitai-downloader",
            "--post",
            "https://civitai.com/posts/77",
            "--no-metadata",
        ])
        .unwrap();
        let parents = args.parents();
        assert_eq!(parents.len(), 1);
        assert_eq!(*parents[0].as_ref().unwrap(), Parent::Post(77));
        assert!(args.run_options().skip_metadata);
    }

    #[test]
    fn test_collection_and_post_are_exclusive() {
        assert!(Args::try_parse_from(["civitai-downloader", "-c", "1", "-p", "2"]).is_err());
        assert!(Args::try_parse_from(["civitai-downloader", "-v"]).is_err());
    }

    #[test]
    fn test_invalid_id_fails_only_its_entry() {
        let args = Args::try_parse_from(["civitai-downloader", "-c", "1", "abc"]).unwrap();
        let parents = args.parents();
        assert_eq!(parents.len(), 2);
        assert_eq!(*parents[0].as_ref().unwrap(), Parent::Collection(1));
        assert!(matches!(parents[1], Err(Error::InvalidId { .. })));
    }

    #[test]
    fn test_merge_into_config() {
        let args = Args::try_parse_from([
            "civitai-downloader",
            "-p",
            "5",
            "-o",
            "/tmp/out",
            "-v",
            "--api-key",
            "abc123",
        ])
        .unwrap();
        let mut config = Config::default();
        args.merge_into_config(&mut config);
        assert_eq!(config.download_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.api_key, "abc123");
        assert_eq!(config.log_level, "debug");
    }
}
