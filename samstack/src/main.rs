//! SamStack - Lambda build path resolution
//!
//! Works out where a Lambda function's sources and build output live and how
//! they map onto `/var/task`, and renders configured resource tag filters.
//! Results are printed as JSON on stdout; logs go to stderr.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use commands::{Context, ModuleSelection};
use samstack_core::SamError;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "samstack")]
#[command(about = "Lambda build path resolution", long_about = None)]
struct Args {
    /// Configuration file (defaults to ./samstack.toml when present)
    #[arg(long, global = true, env = "SAMSTACK_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn", env = "SAMSTACK_LOG_LEVEL")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct ModuleArgs {
    /// Module content root; repeat for several (overrides configuration)
    #[arg(long = "content-root")]
    content_roots: Vec<PathBuf>,

    /// Build output root (defaults to <first content root>/.aws-sam/build)
    #[arg(long)]
    build_root: Option<PathBuf>,
}

impl ModuleArgs {
    fn selection(&self) -> ModuleSelection<'_> {
        ModuleSelection {
            content_roots: &self.content_roots,
            build_root: self.build_root.as_deref(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find the directory holding the handler's dependency manifest
    BaseDir {
        /// Handler source file
        #[arg(long)]
        handler: PathBuf,

        /// Lambda runtime of the function
        #[arg(long, default_value = "nodejs20.x")]
        runtime: String,

        #[command(flatten)]
        module: ModuleArgs,
    },

    /// Print the build directory of a template function
    BuildDir {
        /// Logical id of the function in the template
        #[arg(long)]
        logical_id: String,

        #[command(flatten)]
        module: ModuleArgs,
    },

    /// Print the default debugger path mappings of a template function
    PathMappings {
        /// SAM template
        #[arg(long, default_value = "template.yaml")]
        template: PathBuf,

        /// Logical id of the function in the template
        #[arg(long)]
        logical_id: String,

        /// Build directory (defaults to the module's build root)
        #[arg(long)]
        build_dir: Option<PathBuf>,

        /// Runtime override (defaults to the template's)
        #[arg(long)]
        runtime: Option<String>,

        #[command(flatten)]
        module: ModuleArgs,
    },

    /// Print the active tag filters in tagging API form
    TagFilters,

    /// List known tag keys, optionally filtered by prefix
    TagKeys {
        #[arg(long, default_value = "")]
        prefix: String,
    },
}

async fn run(args: &Args, ctx: &Context<'_>) -> Result<serde_json::Value, SamError> {
    match &args.command {
        Command::BaseDir {
            handler,
            runtime,
            module,
        } => commands::base_dir(ctx, handler, runtime, &module.selection()),
        Command::BuildDir { logical_id, module } => {
            commands::build_dir(ctx, logical_id, &module.selection())
        }
        Command::PathMappings {
            template,
            logical_id,
            build_dir,
            runtime,
            module,
        } => commands::path_mappings(
            ctx,
            template,
            logical_id,
            build_dir.as_deref(),
            runtime.as_deref(),
            &module.selection(),
        ),
        Command::TagFilters => Ok(commands::tag_filters(ctx)),
        Command::TagKeys { prefix } => Ok(commands::tag_keys(ctx, prefix).await),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "samstack={level},samstack_lambda={level},samstack_tags={level}",
                    level = args.log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = config::Config::load(args.config.as_deref())?;
    debug!(?config, "Loaded configuration");

    let ctx = Context {
        config: &config,
        cwd: std::env::current_dir()?,
    };

    match run(&args, &ctx).await {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e.to_json());
            std::process::exit(e.code.exit_code());
        }
    }
}
