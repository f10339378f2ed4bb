mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dockgen", about = "Generate Dockerfiles and images for Next.js and React repositories")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clone a repository, generate its Dockerfile and build the image
    Generate {
        /// Repository location (scheme optional, https assumed)
        repository: String,
        /// Access token for the repository (defaults to GITHUB_PAT)
        #[arg(long)]
        token: Option<String>,
        /// Stop after the Dockerfile has been validated
        #[arg(long)]
        no_build: bool,
        /// Image tag (overrides dockgen.toml)
        #[arg(long, short = 't')]
        tag: Option<String>,
        /// Keep the staging directory instead of removing it
        #[arg(long)]
        keep_workspace: bool,
        /// Write the Dockerfile to this path instead of printing it
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// Detect the stack and package manager of a local project
    Detect {
        /// Project directory
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// Render the built-in Dockerfile template for a local project
    Render {
        /// Project directory
        #[arg(default_value = ".")]
        dir: PathBuf,
        /// Write Dockerfile (and support files) into the project
        #[arg(long)]
        write: bool,
        /// Overwrite an existing Dockerfile
        #[arg(long, requires = "write")]
        force: bool,
    },
    /// Check that every file a Dockerfile copies exists in the build context
    Validate {
        /// Build context directory
        #[arg(default_value = ".")]
        dir: PathBuf,
        /// Dockerfile to check (defaults to <dir>/Dockerfile)
        #[arg(long, short = 'f')]
        dockerfile: Option<PathBuf>,
    },
    /// Check git, Docker and credential setup
    Doctor,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            repository,
            token,
            no_build,
            tag,
            keep_workspace,
            output,
        } => {
            commands::generate(commands::GenerateArgs {
                repository,
                token,
                no_build,
                tag,
                keep_workspace,
                output,
            })
            .await?
        }
        Commands::Detect { dir } => commands::detect(&dir)?,
        Commands::Render { dir, write, force } => commands::render(&dir, write, force)?,
        Commands::Validate { dir, dockerfile } => commands::validate(&dir, dockerfile)?,
        Commands::Doctor => commands::doctor().await?,
    }

    Ok(())
}
