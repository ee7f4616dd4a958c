use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use keepachangelog_manager::cli::{run_workflow, WorkflowArgs};
use keepachangelog_manager::clock::SystemClock;
use keepachangelog_manager::config;
use keepachangelog_manager::domain::BumpOptions;
use keepachangelog_manager::git::Git2Repository;
use keepachangelog_manager::ui;

#[derive(clap::Parser)]
#[command(
    name = "keepachangelog-manager",
    version,
    about = "Turn the Unreleased section of a Keep a Changelog CHANGELOG.md into a new release",
    override_usage = "keepachangelog-manager <ONLY ONE of the version options>"
)]
struct Args {
    #[arg(long, value_name = "VERSION", help = "Upgrade major version to VERSION")]
    major: Option<u64>,

    #[arg(long, value_name = "VERSION", help = "Upgrade minor version to VERSION")]
    minor: Option<u64>,

    #[arg(long, value_name = "VERSION", help = "Upgrade patch version to VERSION")]
    patch: Option<u64>,

    #[arg(long, help = "Increment major version")]
    increment_major: bool,

    #[arg(long, help = "Increment minor version")]
    increment_minor: bool,

    #[arg(long, help = "Increment patch version")]
    increment_patch: bool,

    #[arg(long, help = "Create an empty changelog if none exists")]
    init: bool,

    #[arg(long, requires = "init", help = "With --init, overwrite an existing changelog")]
    force: bool,

    #[arg(long, help = "Print the updated changelog instead of writing it")]
    dry_run: bool,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity (-v, -vv, -vvv)")]
    verbose: u8,
}

impl Args {
    fn bump_options(&self) -> BumpOptions {
        BumpOptions {
            increment_patch: self.increment_patch,
            increment_minor: self.increment_minor,
            increment_major: self.increment_major,
            patch: self.patch,
            minor: self.minor,
            major: self.major,
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "keepachangelog_manager=info".to_string(),
            2 => "keepachangelog_manager=debug".to_string(),
            _ => "keepachangelog_manager=trace".to_string(),
        },
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let bump = args.bump_options();
    if bump.is_empty() && !args.init {
        let _ = Args::command().print_help();
        std::process::exit(1);
    }

    if let Err(e) = run(&args, bump) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: &Args, bump: BumpOptions) -> Result<()> {
    let config =
        config::load_config(args.config.as_deref()).context("Error loading config")?;

    let repo = Git2Repository::open(".").context("Git repository error")?;

    let workflow_args = WorkflowArgs {
        bump,
        init: args.init,
        force: args.force,
        dry_run: args.dry_run,
    };
    let result = run_workflow(&workflow_args, &config, &repo, &SystemClock)?;

    if result.created {
        ui::display_success(&format!("Created {}", result.path.display()));
    } else if args.init && !args.dry_run {
        ui::display_status(&format!(
            "{} already exists (use --force to overwrite)",
            result.path.display()
        ));
    }

    if let Some(release) = result.release {
        let version = release.version.to_string();
        let previous = release.previous.map(|v| v.to_string());
        match release.preview {
            Some(text) => {
                ui::display_status("Dry run: changelog not written");
                ui::display_version(&version);
                print!("{}", text);
            }
            None => {
                ui::display_release(previous.as_deref(), &version, &result.path);
                ui::display_version(&version);
            }
        }
    }

    Ok(())
}
