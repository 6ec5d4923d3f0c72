//! Pages Publisher CLI
//!
//! Styleguide publishing assistant for git hosting branches

use anyhow::Result;
use clap::{Parser, Subcommand};
use pages_publisher::{
    CONFIG_FILENAME, ConfigLoadOptions, ConfigLoader, DeployConfig, DeploySequencer, DocsConfig,
    GitPagesPublisher, ProjectConfig, PublishOptionsConfig, SiteValidator,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::process;

/// Styleguide publishing assistant
#[derive(Parser)]
#[command(name = "pages-publisher")]
#[command(version = "0.1.0")]
#[command(about = "Publish a styleguide to a git hosting branch", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish docs and README to the hosting branch
    Deploy {
        /// Project path (defaults to current directory)
        #[arg(value_name = "PROJECT_PATH")]
        project_path: Option<PathBuf>,

        /// Git remote to push to
        #[arg(long)]
        remote: Option<String>,

        /// Hosting branch
        #[arg(short, long)]
        branch: Option<String>,

        /// Documentation directory
        #[arg(long)]
        docs_dir: Option<String>,

        /// List matched files without committing or pushing
        #[arg(long)]
        dry_run: bool,

        /// Commit locally but do not push
        #[arg(long)]
        no_push: bool,
    },

    /// Check that the styleguide layout is ready to publish
    Check {
        /// Project path (defaults to current directory)
        #[arg(value_name = "PROJECT_PATH")]
        project_path: Option<PathBuf>,
    },

    /// Initialize pages-publisher configuration
    Init {
        /// Project path (defaults to current directory)
        #[arg(value_name = "PROJECT_PATH")]
        project_path: Option<PathBuf>,

        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() {
    let result = run().await;

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("\n❌ Error");
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Deploy {
            project_path,
            remote,
            branch,
            docs_dir,
            dry_run,
            no_push,
        } => {
            let path = project_path.unwrap_or_else(|| PathBuf::from("."));
            deploy_command(path, remote, branch, docs_dir, dry_run, no_push).await
        }
        Commands::Check { project_path } => {
            let path = project_path.unwrap_or_else(|| PathBuf::from("."));
            check_command(path).await
        }
        Commands::Init {
            project_path,
            force,
        } => {
            let path = project_path.unwrap_or_else(|| PathBuf::from("."));
            init_command(path, force).await
        }
    }
}

/// Build the highest-priority config layer from CLI flags
fn cli_config(
    remote: Option<String>,
    branch: Option<String>,
    docs_dir: Option<String>,
    dry_run: bool,
    no_push: bool,
) -> Option<DeployConfig> {
    if remote.is_none() && branch.is_none() && docs_dir.is_none() && !dry_run && !no_push {
        return None;
    }

    let mut config = DeployConfig {
        version: String::new(),
        ..Default::default()
    };

    if remote.is_some() || branch.is_some() {
        config.project = Some(ProjectConfig {
            name: None,
            remote,
            branch,
        });
    }

    if let Some(dir) = docs_dir {
        config.docs = Some(DocsConfig {
            dir: Some(dir),
            ..Default::default()
        });
    }

    if dry_run || no_push {
        config.publish = Some(PublishOptionsConfig {
            push: if no_push { Some(false) } else { None },
            dry_run: if dry_run { Some(true) } else { None },
        });
    }

    Some(config)
}

async fn deploy_command(
    project_path: PathBuf,
    remote: Option<String>,
    branch: Option<String>,
    docs_dir: Option<String>,
    dry_run: bool,
    no_push: bool,
) -> Result<i32> {
    println!("\n📦 pages-publisher\n");

    let options = ConfigLoadOptions {
        cli_args: cli_config(remote, branch, docs_dir, dry_run, no_push),
        env: std::env::vars().collect::<HashMap<_, _>>(),
    };

    let config = ConfigLoader::load(&project_path, options).await?;

    let validation = ConfigLoader::validate(&config);
    if !validation.valid {
        eprintln!("{}", ConfigLoader::format_validation_result(&validation));
        return Ok(1);
    }

    let plan = config.resolve(&project_path)?;

    println!(
        "Target: {} → {}/{}{}\n",
        plan.project_path.display(),
        plan.remote,
        plan.branch,
        if plan.dry_run { " (dry-run)" } else { "" }
    );

    let publisher = GitPagesPublisher::new(&plan.project_path, &plan.remote, &plan.branch, plan.push)?;
    let sequencer = DeploySequencer::new(Box::new(publisher));

    let report = sequencer.deploy(&plan).await?;

    if report.success {
        println!("\n✅ Deploy completed successfully! ({} ms)", report.duration_ms);
        Ok(0)
    } else {
        println!("\n❌ Deploy failed");
        for step in &report.steps {
            if let Some(error) = &step.error {
                eprintln!("  - {}", error);
            }
        }
        Ok(1)
    }
}

async fn check_command(project_path: PathBuf) -> Result<i32> {
    println!("\n🔍 Styleguide Check\n");

    let options = ConfigLoadOptions {
        cli_args: None,
        env: std::env::vars().collect::<HashMap<_, _>>(),
    };

    let config = ConfigLoader::load(&project_path, options).await?;

    let config_validation = ConfigLoader::validate(&config);
    println!("{}", ConfigLoader::format_validation_result(&config_validation));
    if !config_validation.valid {
        return Ok(1);
    }

    let plan = config.resolve(&project_path)?;

    println!("\n📦 Layout:");
    let result = SiteValidator::new().validate(&plan).await;
    println!("{}", SiteValidator::format_result(&result));

    println!();
    Ok(if result.valid { 0 } else { 1 })
}

/// Default configuration written by `init`
const DEFAULT_CONFIG: &str = "\
# pages-publisher configuration
version: \"1.0\"

project:
  remote: origin
  branch: gh-pages

docs:
  dir: docs
  entry: index.html

readme:
  file: README.md

publish:
  push: true
";

async fn init_command(project_path: PathBuf, force: bool) -> Result<i32> {
    println!("\n🎯 Initialize pages-publisher\n");

    let config_path = project_path.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        eprintln!(
            "⚠️  {} already exists (use --force to overwrite)",
            config_path.display()
        );
        return Ok(1);
    }

    tokio::fs::write(&config_path, DEFAULT_CONFIG).await?;

    println!("✅ Wrote {}", config_path.display());
    Ok(0)
}
