mod backend;
mod cmd;
mod output;
mod prompt;
mod root;

use alchemist_core::Mode;
use anyhow::Context;
use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use prompt::Prompter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "alchemist",
    about = "Git-Alchemist: AI-powered git and GitHub operations",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .alchemist/ or .git/)
    #[arg(long, global = true, env = "ALCHEMIST_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Model tier: fast (Gemma) or smart (Gemini)
    #[arg(long, global = true, default_value = "fast", value_parser = parse_mode)]
    mode: Mode,

    /// Answer yes to every confirmation prompt
    #[arg(long, short = 'y', global = true, env = "ALCHEMIST_NO_CONFIRM")]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a project structure in a temporary workspace
    Scaffold {
        /// What to build (e.g. "A Flask app with Docker")
        instruction: String,
    },

    /// Rewrite a file according to an instruction
    Fix {
        /// Path to the file to fix
        file: PathBuf,
        /// What to change
        instruction: String,
    },

    /// Explain code or a concept
    Explain {
        /// The code or concept to explain
        text: String,
    },

    /// Suggest semantic commit messages for the staged diff
    Commit,

    /// Commit pending work and open a pull request
    Forge,

    /// Score the repository against community standards
    Audit {
        /// GitHub owner (default: authenticated user)
        #[arg(long)]
        user: Option<String>,
        /// Repository name (default: repository of the working tree)
        #[arg(long)]
        repo: Option<String>,
        /// Only inspect local files, never call gh
        #[arg(long)]
        offline: bool,
    },

    /// Add search-friendly topics to public repositories
    Topics {
        #[arg(long)]
        user: Option<String>,
    },

    /// Write descriptions for public repositories missing one
    Describe {
        #[arg(long)]
        user: Option<String>,
    },

    /// Turn an idea into a draft GitHub issue
    Issue {
        /// The idea to draft
        idea: String,
    },

    /// Ask a question about the codebase
    Sage {
        /// The question to answer
        question: String,
    },

    /// Inspect and validate .alchemist/config.yaml
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn parse_mode(s: &str) -> Result<Mode, String> {
    s.parse::<Mode>().map_err(|e| e.to_string())
}

fn main() {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Audit { .. } | Commands::Config { .. } => tracing::Level::WARN,
        _ => tracing::Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    let prompter = Prompter::new(cli.yes);
    let mode = cli.mode;

    let result = match cli.command {
        Commands::Scaffold { instruction } => std::env::current_dir()
            .context("failed to read the current directory")
            .and_then(|cwd| cmd::scaffold::run(&root, &cwd, mode, &prompter, &instruction)),
        Commands::Fix { file, instruction } => {
            cmd::fix::run(&root, mode, &prompter, &file, &instruction)
        }
        Commands::Explain { text } => cmd::explain::run(&root, mode, &text, cli.json),
        Commands::Commit => cmd::commit::run(&root, mode, &prompter, cli.json),
        Commands::Forge => cmd::forge::run(&root, mode, &prompter),
        Commands::Audit {
            user,
            repo,
            offline,
        } => cmd::audit::run(&root, user.as_deref(), repo.as_deref(), offline, cli.json),
        Commands::Topics { user } => cmd::topics::run(&root, mode, user.as_deref()),
        Commands::Describe { user } => cmd::describe::run(&root, mode, user.as_deref()),
        Commands::Issue { idea } => cmd::issue::run(&root, mode, &idea, cli.json),
        Commands::Sage { question } => cmd::sage::run(&root, mode, &question, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
