use std::path::{Path, PathBuf};

use anyhow::Context;
use dockgen_core::{Credentials, DockgenConfig};
use dockgen_exec::git::display_location;
use dockgen_exec::{GenerationRequest, Pipeline};
use secrecy::SecretString;

pub struct GenerateArgs {
    pub repository: String,
    pub token: Option<String>,
    pub no_build: bool,
    pub tag: Option<String>,
    pub keep_workspace: bool,
    pub output: Option<PathBuf>,
}

/// Execute the full generation pipeline for one repository.
pub async fn generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut config = DockgenConfig::load(Path::new("."))?;
    if let Some(tag) = args.tag {
        config.build.image_tag = tag;
    }
    let credentials = Credentials::from_env();
    let pipeline = Pipeline::from_config(&config, &credentials);

    let request = GenerationRequest {
        credential: args.token.map(SecretString::from),
        skip_build: args.no_build,
        keep_workspace: args.keep_workspace,
        ..GenerationRequest::new(args.repository)
    };

    let repository = display_location(&request.repository);
    println!("Generating Dockerfile for {repository}...");
    let report = match pipeline.run(&request).await {
        Ok(report) => report,
        Err(e) => {
            let kind = e.kind();
            tracing::error!(%repository, kind = %kind, error = %e, "generation failed");
            return Err(anyhow::Error::new(e).context(format!("generation failed ({kind})")));
        }
    };

    tracing::info!(
        %repository,
        stack = %report.stack,
        origin = %report.origin(),
        built = report.built.is_some(),
        "generation finished",
    );

    println!("Stack:           {}", report.stack);
    println!("Package manager: {}", report.package_manager);
    println!("Dockerfile:      {}", report.origin());
    match &report.built {
        Some(built) => println!("Image:           {}", built.image_tag),
        None => println!("Image:           skipped (--no-build)"),
    }
    if let Some(workspace) = &report.workspace {
        println!("Workspace kept:  {}", workspace.display());
    }

    match args.output {
        Some(path) => {
            std::fs::write(&path, report.dockerfile.as_str())
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Dockerfile written to {}", path.display());
        }
        None => {
            println!();
            print!("{}", report.dockerfile.as_str());
        }
    }

    Ok(())
}
