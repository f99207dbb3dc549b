use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use relkit::config::{self, Config};
use relkit::domain::branch::{release_branch, version_from_release_branch};
use relkit::domain::requirements::build_requirements;
use relkit::domain::transform::{extra_tags_for_version, milestone_name, next_versions};
use relkit::domain::version::{
    is_enterprise_version, is_pre_release_version, is_valid_commit_hash, is_valid_version_string,
    version_type,
};
use relkit::tags::{
    get_last_release_tag, get_next_patch_version, sdk_version_from_release_branch_name,
    GithubTagSource, ReleaseFilter, TagSource,
};
use relkit::ui;

#[derive(Parser)]
#[command(
    name = "relkit",
    about = "Inspect release version strings and resolve release tags"
)]
struct Cli {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct RemoteArgs {
    #[arg(long, help = "GitHub repository owner (overrides config)")]
    owner: Option<String>,

    #[arg(long, help = "GitHub repository name (overrides config)")]
    repo: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a version string and show its classification
    Check {
        version: String,

        #[arg(long, help = "Also validate a full commit hash")]
        commit: Option<String>,
    },

    /// Print the release branch for a version
    Branch { version: String },

    /// Print the version a release branch tracks
    FromBranch { branch: String },

    /// Print the candidate versions that follow a release
    Next { version: String },

    /// Print the next patch version for a major release line
    NextPatch {
        major: u32,

        #[command(flatten)]
        remote: RemoteArgs,
    },

    /// Print the floating tags to move for a release
    Tags { version: String },

    /// Print the milestone name for a version
    Milestone { version: String },

    /// Print the build requirements for a version
    Requirements { version: String },

    /// Print the latest release tag
    LastRelease {
        #[arg(long, help = "Scope to the major version of this version string")]
        version: Option<String>,

        #[arg(long, help = "Exclude patch releases")]
        ignore_patches: bool,

        #[arg(long, help = "Exclude rc/alpha/beta releases")]
        ignore_prereleases: bool,

        #[command(flatten)]
        remote: RemoteArgs,
    },

    /// Print the embedding sdk version shipped from a release branch
    SdkVersion {
        branch: String,

        #[command(flatten)]
        remote: RemoteArgs,
    },
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    match cli.command {
        Command::Check { version, commit } => check(&version, commit.as_deref()),
        Command::Branch { version } => {
            println!("{}", release_branch(&version)?);
            Ok(())
        }
        Command::FromBranch { branch } => {
            println!("{}", version_from_release_branch(&branch)?);
            Ok(())
        }
        Command::Next { version } => {
            let candidates = next_versions(&version)?;
            if candidates.is_empty() {
                ui::display_status("No next versions (patch or pre-release)");
            }
            for candidate in candidates {
                println!("{}", candidate);
            }
            Ok(())
        }
        Command::NextPatch { major, remote } => {
            let (owner, repo) = repo_coords(&config, &remote)?;
            let source = github_source(&config)?;
            println!("{}", get_next_patch_version(&source, &owner, &repo, major)?);
            Ok(())
        }
        Command::Tags { version } => {
            for tag in extra_tags_for_version(&version)? {
                println!("{}", tag);
            }
            Ok(())
        }
        Command::Milestone { version } => {
            println!("{}", milestone_name(&version)?);
            Ok(())
        }
        Command::Requirements { version } => {
            let found = build_requirements(&version)?;
            ui::display_field("java", &found.java.to_string());
            ui::display_field("node", &found.node.to_string());
            ui::display_field("platforms", found.platforms);
            Ok(())
        }
        Command::LastRelease {
            version,
            ignore_patches,
            ignore_prereleases,
            remote,
        } => {
            let (owner, repo) = repo_coords(&config, &remote)?;
            let source = github_source(&config)?;
            let filter = ReleaseFilter {
                ignore_patches,
                ignore_pre_releases: ignore_prereleases,
            };

            match get_last_release_tag(&source, &owner, &repo, version.as_deref(), filter)? {
                Some(tag) => println!("{}", tag),
                None => {
                    ui::display_warning("No matching release tags found");
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Command::SdkVersion { branch, remote } => {
            let (owner, repo) = repo_coords(&config, &remote)?;
            let source = github_source(&config)?;
            println!(
                "{}",
                sdk_version_from_release_branch_name(&source, &owner, &repo, &branch)?
            );
            Ok(())
        }
    }
}

fn check(version: &str, commit: Option<&str>) -> Result<()> {
    if let Some(hash) = commit {
        if is_valid_commit_hash(hash) {
            ui::display_success(&format!("{} is a valid commit hash", hash));
        } else {
            ui::display_error(&format!("Invalid commit hash: {}", hash));
            std::process::exit(1);
        }
    }

    if !is_valid_version_string(version) {
        ui::display_error(&format!("Invalid version string: {}", version));
        std::process::exit(1);
    }

    ui::display_success(&format!("{} is a valid version string", version));
    ui::display_field(
        "edition",
        if is_enterprise_version(version) {
            "ee"
        } else {
            "oss"
        },
    );
    ui::display_field("type", &version_type(version)?.to_string());
    ui::display_field(
        "pre-release",
        if is_pre_release_version(version) {
            "yes"
        } else {
            "no"
        },
    );
    ui::display_field("branch", &release_branch(version)?);
    ui::display_field("milestone", &milestone_name(version)?);

    Ok(())
}

fn repo_coords(config: &Config, remote: &RemoteArgs) -> Result<(String, String)> {
    let owner = remote
        .owner
        .clone()
        .unwrap_or_else(|| config.github.owner.clone());
    let repo = remote
        .repo
        .clone()
        .unwrap_or_else(|| config.github.repo.clone());

    if owner.is_empty() || repo.is_empty() {
        anyhow::bail!(
            "GitHub owner/repo not configured; set [github] in relkit.toml or pass --owner/--repo"
        );
    }

    Ok((owner, repo))
}

fn github_source(config: &Config) -> Result<impl TagSource> {
    Ok(GithubTagSource::with_base_url(
        config.github.api_base_url.as_str(),
        Config::github_token(),
    )?)
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("relkit=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
