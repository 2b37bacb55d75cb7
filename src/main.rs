//! chronofs CLI - snapshot-based version control for a working directory

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use chronofs::{fsops, ops, Hash, Repository};

#[derive(Parser)]
#[command(name = "chronofs")]
#[command(about = "snapshot-based version control with a content-addressed store")]
#[command(version)]
struct Cli {
    /// repository root
    #[arg(short = 'C', long, default_value = ".")]
    repo: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// initialize a repository in the root directory
    Init,

    /// stage files for the next commit
    Add {
        /// relative paths to stage
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// record the staged state as a new commit
    Commit {
        /// commit message
        #[arg(short, long)]
        message: String,

        /// author name
        #[arg(short, long)]
        author: Option<String>,
    },

    /// restore the working tree to a commit
    Checkout {
        /// commit hash to restore
        hash: String,
    },

    /// classify working-tree paths against the staging set
    Status,

    /// show commit history
    Log {
        /// maximum number of commits to show
        #[arg(short = 'n', long)]
        max_count: Option<usize>,
    },

    /// compare two states (WORKING, INDEX, HEAD, or a commit hash)
    Diff {
        /// left side
        left: String,

        /// right side
        right: String,
    },

    /// verify object-store integrity
    Fsck,

    /// create an empty file
    FsTouch { path: PathBuf },

    /// create a directory and parents
    FsMkdirs { path: PathBuf },

    /// remove a file or directory tree
    FsRemove { path: PathBuf },

    /// rename a file or directory
    FsMove { from: PathBuf, to: PathBuf },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run(cli: Cli) -> chronofs::Result<()> {
    match cli.command {
        Commands::Init => {
            let repo = Repository::init(&cli.repo)?;
            println!(
                "initialized chronofs repository at {}",
                repo.dot_dir().display()
            );
        }

        Commands::Add { paths } => {
            let repo = Repository::open(&cli.repo)?;
            for path in &paths {
                ops::add(&repo, path)?;
            }
        }

        Commands::Commit { message, author } => {
            if message.trim().is_empty() {
                return Err(chronofs::Error::EmptyMessage);
            }
            let repo = Repository::open(&cli.repo)?;
            let hash = ops::commit(&repo, &message, author.as_deref())?;
            println!("{}", hash);
        }

        Commands::Checkout { hash } => {
            let repo = Repository::open(&cli.repo)?;
            let hash = Hash::from_hex(&hash)?;
            ops::checkout(&repo, &hash)?;
            println!("restored {}", hash);
        }

        Commands::Status => {
            let repo = Repository::open(&cli.repo)?;
            for entry in ops::status(&repo)? {
                if entry.path.is_empty() {
                    println!("{}", entry.state);
                } else {
                    println!("{}\t{}", entry.state, entry.path);
                }
            }
        }

        Commands::Log { max_count } => {
            let repo = Repository::open(&cli.repo)?;
            let entries = ops::log(&repo, max_count)?;
            print!("{}", ops::render_log(&entries));
        }

        Commands::Diff { left, right } => {
            let repo = Repository::open(&cli.repo)?;
            print!("{}", ops::diff(&repo, &left, &right)?);
        }

        Commands::Fsck => {
            let repo = Repository::open(&cli.repo)?;
            let report = ops::fsck(&repo)?;

            println!("objects checked: {}", report.objects_checked);
            if report.dangling > 0 {
                println!("dangling objects: {}", report.dangling);
            }
            for problem in &report.problems {
                println!("  {}", problem);
            }
            if report.is_ok() {
                println!("repository is healthy");
            } else {
                return Err(chronofs::Error::StoreCorrupt(format!(
                    "{} problems found",
                    report.problems.len()
                )));
            }
        }

        Commands::FsTouch { path } => fsops::touch(&cli.repo.join(path))?,
        Commands::FsMkdirs { path } => fsops::mkdirs(&cli.repo.join(path))?,
        Commands::FsRemove { path } => fsops::remove_path(&cli.repo.join(path))?,
        Commands::FsMove { from, to } => {
            fsops::move_path(&cli.repo.join(from), &cli.repo.join(to))?
        }
    }

    Ok(())
}
