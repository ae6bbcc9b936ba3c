//! Command line / environment configuration.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "batch-chain")]
#[command(about = "Submit interdependent jobs to AWS Batch in dependency order", long_about = None)]
pub struct Cli {
    /// Log filter (e.g. "info", "batch_chain=debug"). RUST_LOG wins when set.
    #[arg(long, global = true, env = "BATCH_CHAIN_LOG", default_value = "info")]
    pub log_level: String,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve and submit every job in the request.
    Submit {
        #[command(flatten)]
        input: RequestArgs,

        #[command(flatten)]
        aws: AwsArgs,

        /// Issue local ids instead of calling AWS Batch.
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the submission order without submitting anything.
    Plan {
        #[command(flatten)]
        input: RequestArgs,

        #[command(flatten)]
        aws: AwsArgs,
    },
}

#[derive(Args)]
pub struct RequestArgs {
    /// Request document ({"jobs": [...]} or {"s3_path": "..."}); "-" reads stdin.
    #[arg(long, short = 'r')]
    pub request: PathBuf,
}

#[derive(Args, Clone)]
pub struct AwsArgs {
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Endpoint override for Batch and S3 (e.g. LocalStack).
    #[arg(long, env = "BATCH_CHAIN_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_dry_run_submit() {
        let cli = Cli::try_parse_from([
            "batch-chain",
            "--log-format",
            "json",
            "submit",
            "--request",
            "batch.json",
            "--dry-run",
            "--region",
            "eu-west-1",
        ])
        .unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
        match cli.cmd {
            Commands::Submit { input, aws, dry_run } => {
                assert!(dry_run);
                assert_eq!(input.request, PathBuf::from("batch.json"));
                assert_eq!(aws.region.as_deref(), Some("eu-west-1"));
            }
            Commands::Plan { .. } => panic!("expected submit"),
        }
    }
}
