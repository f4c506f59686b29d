use clap::{Parser, Subcommand};
use gitlet::areas::repository::Repository;
use gitlet::artifacts::core::{PagerWriter, should_page};
use gitlet::errors::RepositoryError;
use minus::Pager;
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `GITLET_LOG=gitlet=debug`
const LOG_FILTER_ENV: &str = "GITLET_LOG";

#[derive(Parser)]
#[command(
    name = "gitlet",
    version = "0.1.0",
    about = "A minimal version-control system",
    long_about = "A minimal version-control system with content-addressed snapshots, \
    branches and three-way merges, stored under .gitlet in the working tree.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Create a new repository in the current directory",
        long_about = "This command creates the .gitlet directory, the initial commit and the main branch."
    )]
    Init,
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "commit",
        about = "Record the staged files as a new commit",
        long_about = "This command creates a commit from the current commit's snapshot \
        overlaid with the staged additions and removals."
    )]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(name = "rm", about = "Unstage a file or stage it for removal")]
    Rm {
        #[arg(index = 1)]
        file: String,
    },
    #[command(name = "log", about = "Show the history of the current branch")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of commits with the given message")]
    Find {
        #[arg(index = 1)]
        message: String,
    },
    #[command(name = "status", about = "Show branches, staged files and working tree changes")]
    Status,
    #[command(name = "branch", about = "Create a branch at the current commit")]
    Branch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch pointer")]
    RmBranch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(
        name = "checkout",
        about = "Restore a file or switch branches",
        long_about = "checkout -- <file> restores a file from the current commit, \
        checkout <commit> -- <file> restores it from the given commit, \
        checkout <branch> switches to the branch."
    )]
    Checkout {
        #[arg(index = 1, help = "A commit id when a file is given, otherwise a branch name")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "The file to restore")]
        file: Option<String>,
    },
    #[command(name = "reset", about = "Move the current branch to a commit and check it out")]
    Reset {
        #[arg(index = 1)]
        commit: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
}

impl Commands {
    fn pages_output(&self) -> bool {
        matches!(self, Commands::Log | Commands::GlobalLog)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match run(&cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => match RepositoryError::find(&error) {
            Some(repository_error) => {
                println!("{}", repository_error);
                ExitCode::SUCCESS
            }
            None => {
                eprintln!("error: {:#}", error);
                ExitCode::FAILURE
            }
        },
    }
}

fn run(command: &Commands) -> anyhow::Result<()> {
    let pager = (command.pages_output() && should_page()).then(Pager::new);
    let writer: Box<dyn Write> = match &pager {
        Some(pager) => Box::new(PagerWriter::new(pager.clone())),
        None => Box::new(std::io::stdout()),
    };

    let mut repository = Repository::new(".", writer)?;

    if !matches!(command, Commands::Init) && !repository.is_initialized()? {
        return Err(RepositoryError::NotInitialized.into());
    }

    tracing::debug!(path = ?repository.path(), "opened repository");

    match command {
        Commands::Init => repository.init()?,
        Commands::Add { file } => repository.add(file)?,
        Commands::Commit { message } => {
            repository.commit(message)?;
        }
        Commands::Rm { file } => repository.rm(file)?,
        Commands::Log => repository.log()?,
        Commands::GlobalLog => repository.global_log()?,
        Commands::Find { message } => repository.find(message)?,
        Commands::Status => repository.status()?,
        Commands::Branch { name } => repository.branch(name)?,
        Commands::RmBranch { name } => repository.rm_branch(name)?,
        Commands::Checkout { target, file } => match (target, file) {
            (None, Some(file)) => repository.checkout_file(file)?,
            (Some(commit), Some(file)) => repository.checkout_file_from(commit, file)?,
            (Some(branch), None) => repository.checkout_branch(branch)?,
            (None, None) => writeln!(repository.writer(), "Incorrect operands.")?,
        },
        Commands::Reset { commit } => repository.reset(commit)?,
        Commands::Merge { branch } => {
            repository.merge(branch)?;
        }
    }

    repository.writer().flush()?;

    if let Some(pager) = pager {
        minus::page_all(pager)?;
    }

    Ok(())
}
