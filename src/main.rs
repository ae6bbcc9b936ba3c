use anyhow::Context;
use clap::Parser;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, info_span};

mod config;
mod error;
mod pipeline;
mod report;
mod scheduler;
mod source;
mod spec;
mod submit;
mod telemetry;

use config::{AwsArgs, Cli, Commands};

pub type Result<T> = anyhow::Result<T>;

fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(&cli.log_level, cli.log_format)?;

    let runtime = Arc::new(
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("start async runtime")?,
    );

    match cli.cmd {
        Commands::Plan { input, aws } => {
            // 1) Read + validate the request, fetch and resolve.
            let request = read_request(&input.request)?;
            let sdk_config = load_aws_config(&runtime, &aws);
            let source = spec_source(&runtime, &sdk_config, &aws);
            let span = info_span!("plan");
            let order = pipeline::Pipeline::new(&source, span).plan(request)?;

            // 2) Print the order.
            print!("{}", report::render_plan(&order));
        }
        Commands::Submit {
            input,
            aws,
            dry_run,
        } => {
            let request = read_request(&input.request)?;
            let sdk_config = load_aws_config(&runtime, &aws);
            let source = spec_source(&runtime, &sdk_config, &aws);
            let span = info_span!("submit", dry_run);

            let dry_scheduler;
            let batch_scheduler;
            let scheduler: &dyn scheduler::Scheduler = if dry_run {
                dry_scheduler = scheduler::DryRunScheduler;
                &dry_scheduler
            } else {
                batch_scheduler = scheduler::BatchScheduler::new(&sdk_config, Arc::clone(&runtime));
                &batch_scheduler
            };

            match pipeline::Pipeline::new(&source, span).run(request, scheduler) {
                Ok(record) => {
                    info!(jobs = record.len(), "all jobs submitted");
                    let response = report::render_success(&record);
                    println!("{}", serde_json::to_string_pretty(&response)?);
                }
                Err(err) => {
                    let rendered = report::render_failure(&err);
                    error!(structural = err.is_structural(), "{}", rendered);
                    return Err(anyhow::Error::new(err).context(rendered));
                }
            }
        }
    }

    Ok(())
}

fn read_request(path: &Path) -> Result<spec::Request> {
    let bytes = if path == Path::new("-") {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("read request from stdin")?;
        buf
    } else {
        std::fs::read(path).with_context(|| format!("read request file {}", path.display()))?
    };
    Ok(spec::Request::from_slice(&bytes)?)
}

fn spec_source(
    runtime: &Arc<tokio::runtime::Runtime>,
    sdk_config: &aws_config::SdkConfig,
    aws: &AwsArgs,
) -> source::SpecStore {
    // Local S3 stand-ins only route path-style requests.
    let s3_config = aws_sdk_s3::config::Builder::from(sdk_config)
        .force_path_style(aws.endpoint_url.is_some())
        .build();
    source::SpecStore::new(Arc::clone(runtime), aws_sdk_s3::Client::from_conf(s3_config))
}

fn load_aws_config(runtime: &tokio::runtime::Runtime, aws: &AwsArgs) -> aws_config::SdkConfig {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
    if let Some(region) = &aws.region {
        loader = loader.region(aws_sdk_batch::config::Region::new(region.clone()));
    }
    if let Some(endpoint) = &aws.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }
    runtime.block_on(loader.load())
}
