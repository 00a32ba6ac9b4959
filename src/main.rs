use anyhow::Result;
use clap::{Parser, Subcommand};
use repo_mirror::commands::validators;
use repo_mirror::git::SystemGit;
use repo_mirror::{commands::*, config::MirrorConfig, config::MirrorJob, constants};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "repo-mirror")]
#[command(about = "Mirror git repositories, with all branches and tags, to a new remote")]
#[command(version)]
struct Cli {
    /// Show every git invocation and its output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Git executable to run
    #[arg(long, global = true, env = constants::git::PROGRAM_ENV, default_value_t = constants::git::DEFAULT_PROGRAM.to_string())]
    git: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mirror every job listed in a JSON batch file
    Batch {
        /// Batch file path
        #[arg(short, long, default_value_t = constants::config::DEFAULT_CONFIG_FILE.to_string())]
        config: String,

        /// Stop at the first failed job
        #[arg(long)]
        fail_fast: bool,
    },

    /// Mirror a single repository
    Mirror {
        /// Source repository URL
        #[arg(long)]
        from: String,

        /// Destination repository URL
        #[arg(long)]
        to: String,

        /// Directory to clone into (default: a temporary directory removed afterwards)
        #[arg(long)]
        cwd: Option<PathBuf>,
    },

    /// Create a batch file from Git repositories below the current directory
    Init {
        /// Output file name
        #[arg(short, long, default_value_t = constants::config::DEFAULT_CONFIG_FILE.to_string())]
        output: String,

        /// Overwrite existing file if it exists
        #[arg(long)]
        overwrite: bool,

        /// Base URL destinations are derived from
        #[arg(long)]
        destination_base: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "repo_mirror=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let git = Arc::new(SystemGit::new(cli.git));
    tracing::debug!(program = git.program(), "Using git executable");

    match cli.command {
        Commands::Batch { config, fail_fast } => {
            validators::validate_config_path(&config)?;
            let config = MirrorConfig::load(&config)?;

            let context = CommandContext {
                config,
                git,
                fail_fast,
            };
            MirrorCommand.execute(&context).await?;
        }
        Commands::Mirror { from, to, cwd } => {
            validators::validate_mirror_args(&from, &to)?;
            validators::validate_working_directory(&cwd)?;

            let cwd = cwd.map(std::path::absolute).transpose()?;
            let config = MirrorConfig::single(MirrorJob::new(from, to, cwd));
            config.validate()?;

            let context = CommandContext {
                config,
                git,
                fail_fast: true,
            };
            MirrorCommand.execute(&context).await?;
        }
        Commands::Init {
            output,
            overwrite,
            destination_base,
        } => {
            validators::validate_destination_base(&destination_base)?;

            // Init command doesn't need config since it creates one
            let context = CommandContext {
                config: MirrorConfig::new(),
                git,
                fail_fast: false,
            };
            InitCommand {
                output,
                overwrite,
                destination_base,
            }
            .execute(&context)
            .await?;
        }
    }

    Ok(())
}
