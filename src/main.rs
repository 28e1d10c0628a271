#![allow(dead_code)]

use crate::areas::repository::Repository;
use crate::artifacts::log::HistoryBounds;
use crate::artifacts::transport::monitor::NullProgressMonitor;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

mod areas;
mod artifacts;
mod commands;
mod errors;

#[derive(Parser)]
#[command(
    name = "sgit",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A simple high-level git porcelain",
    long_about = "sgit exposes the familiar version-control operations (init, clone, \
    fetch, push, checkout, add, commit, status, ls-files, rev-list, whatchanged) \
    over a content-addressed object database in the Git on-disk format.",
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
    #[command(name = "init", about = "Initialize a new repository")]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(name = "clone", about = "Clone a repository from a local uri")]
    Clone {
        #[arg(index = 1, help = "The uri to clone from (file:// or plain path)")]
        uri: String,
        #[arg(index = 2, help = "The directory to clone into")]
        path: Option<String>,
        #[arg(long, default_value = "origin", help = "Name for the new remote")]
        origin: String,
        #[arg(long, default_value = "master", help = "Branch to set upstream for")]
        branch: String,
    },
    #[command(name = "fetch", about = "Fetch objects and refs from a remote")]
    Fetch {
        #[arg(index = 1, default_value = "origin", help = "Remote name or uri")]
        remote: String,
        #[arg(long = "want", help = "Restrict the fetch to these refs")]
        want: Vec<String>,
    },
    #[command(name = "push", about = "Push commits to a remote")]
    Push {
        #[arg(index = 1, default_value = "origin", help = "Remote name or uri")]
        remote: String,
        #[arg(index = 2, help = "Local branch to push (defaults to the current branch)")]
        local_branch: Option<String>,
        #[arg(index = 3, help = "Remote branch to update (defaults to the local branch)")]
        remote_branch: Option<String>,
        #[arg(long, help = "Push all local branches")]
        all: bool,
        #[arg(long, help = "Push tags as well")]
        tags: bool,
        #[arg(long = "receive-pack", help = "Path to the remote receive-pack")]
        receive_pack: Option<String>,
    },
    #[command(name = "checkout", about = "Check out a branch or ref")]
    Checkout {
        #[arg(index = 1, help = "Branch name or refspec")]
        target: String,
    },
    #[command(name = "add", about = "Add files or directories to the index")]
    Add {
        #[arg(index = 1, help = "The files or directories to add to the index")]
        paths: Vec<String>,
        #[arg(
            short = 'A',
            long = "all",
            help = "Also remove index entries whose files are gone"
        )]
        all: bool,
    },
    #[command(name = "commit", about = "Create a new commit from the staged index")]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "status", about = "Show the working tree status")]
    Status {
        #[arg(short = 'a', long = "all", help = "Also list unchanged files")]
        all: bool,
        #[arg(long, help = "Skip unclassifiable records instead of failing")]
        lenient: bool,
    },
    #[command(name = "ls-files", about = "List index and working tree files")]
    LsFiles,
    #[command(name = "rev-list", about = "List commit ids in reverse chronological order")]
    RevList {
        #[arg(long, help = "Exclusive lower bound revision")]
        from: Option<String>,
        #[arg(long, help = "Revision to start from (defaults to HEAD)")]
        to: Option<String>,
        #[arg(long, help = "Only commits at or after this RFC 3339 instant")]
        since: Option<String>,
        #[arg(long, help = "Only commits at or before this RFC 3339 instant")]
        until: Option<String>,
        #[arg(
            short = 'n',
            long = "max-count",
            default_value_t = -1,
            help = "Stop after this many commits (-1 for unbounded)"
        )]
        max_count: i64,
    },
    #[command(name = "whatchanged", about = "Show commits and the files they changed")]
    Whatchanged {
        #[arg(long, help = "Exclusive lower bound revision")]
        from: Option<String>,
        #[arg(long, help = "Revision to start from (defaults to HEAD)")]
        to: Option<String>,
        #[arg(long, help = "Only commits at or after this RFC 3339 instant")]
        since: Option<String>,
        #[arg(long, help = "Only commits at or before this RFC 3339 instant")]
        until: Option<String>,
        #[arg(
            short = 'n',
            long = "max-count",
            default_value_t = -1,
            help = "Stop after this many commits (-1 for unbounded)"
        )]
        max_count: i64,
    },
    #[command(name = "cat-file", about = "Print the content of an object")]
    CatFile {
        #[arg(short = 'p', long, help = "The object SHA to print")]
        sha: String,
    },
    #[command(name = "hash-object", about = "Hash a file as a blob")]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the database")]
        write: bool,
        #[arg(index = 1)]
        file: String,
    },
    #[command(name = "ls-tree", about = "List the contents of a tree object")]
    LsTree {
        #[arg(short, long, help = "Recurse into subtrees")]
        recursive: bool,
        #[arg(index = 1, default_value = "HEAD", help = "The tree-ish to list")]
        revspec: String,
    },
}

fn open_repository() -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    Repository::open(&pwd, Box::new(std::io::stdout()))
}

fn parse_instant(
    value: Option<String>,
) -> Result<Option<chrono::DateTime<chrono::FixedOffset>>> {
    value
        .map(|raw| chrono::DateTime::parse_from_rfc3339(&raw))
        .transpose()
        .map_err(Into::into)
}

fn history_bounds(
    from: Option<String>,
    to: Option<String>,
    since: Option<String>,
    until: Option<String>,
) -> Result<HistoryBounds> {
    Ok(HistoryBounds {
        from_rev: from,
        to_rev: to,
        from_date: parse_instant(since)?,
        to_date: parse_instant(until)?,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { path } => {
            let work_dir = match path {
                Some(path) => PathBuf::from(path),
                None => std::env::current_dir()?,
            };
            Repository::init_command(&work_dir, Box::new(std::io::stdout()))?;
        }
        Commands::Clone {
            uri,
            path,
            origin,
            branch,
        } => {
            let work_dir = match path {
                Some(path) => PathBuf::from(path),
                None => {
                    let name = Path::new(uri.trim_end_matches('/'))
                        .file_name()
                        .map(|name| name.to_string_lossy().to_string())
                        .unwrap_or_else(|| "repository".to_string());
                    std::env::current_dir()?.join(name)
                }
            };

            let mut monitor = NullProgressMonitor;
            Repository::clone_from(
                &work_dir,
                &origin,
                &uri,
                &branch,
                &mut monitor,
                Box::new(std::io::stdout()),
            )
            .await?;
        }
        Commands::Fetch { remote, want } => {
            let repository = open_repository()?;
            let mut monitor = NullProgressMonitor;
            repository
                .fetch(&remote, want.into_iter().collect::<HashSet<_>>(), &mut monitor)
                .await?;
        }
        Commands::Push {
            remote,
            local_branch,
            remote_branch,
            all,
            tags,
            receive_pack,
        } => {
            let repository = open_repository()?;
            let local_branch = match local_branch {
                Some(branch) => branch,
                None => repository.get_branch()?.to_string(),
            };
            let remote_branch = remote_branch.unwrap_or_else(|| local_branch.clone());

            let mut monitor = NullProgressMonitor;
            let pushed = repository
                .push(
                    &mut monitor,
                    &remote,
                    &local_branch,
                    &remote_branch,
                    all,
                    tags,
                    receive_pack,
                )
                .await?;

            if !pushed {
                anyhow::bail!("push rejected by the remote");
            }
        }
        Commands::Checkout { target } => {
            let repository = open_repository()?;
            let mut monitor = NullProgressMonitor;
            repository.checkout(&target, &mut monitor).await?;
        }
        Commands::Add { paths, all } => {
            let repository = open_repository()?;
            repository.add(&paths, all).await?;
        }
        Commands::Commit { message } => {
            let repository = open_repository()?;
            repository.commit(None, None, &message).await?;
        }
        Commands::Status { all, lenient } => {
            let repository = open_repository()?;
            repository.status(all, lenient).await?;
        }
        Commands::LsFiles => {
            let repository = open_repository()?;
            repository.ls_files().await?;
        }
        Commands::RevList {
            from,
            to,
            since,
            until,
            max_count,
        } => {
            let repository = open_repository()?;
            let bounds = history_bounds(from, to, since, until)?;
            repository.rev_list(None, &bounds, max_count).await?;
        }
        Commands::Whatchanged {
            from,
            to,
            since,
            until,
            max_count,
        } => {
            let repository = open_repository()?;
            let bounds = history_bounds(from, to, since, until)?;
            repository.whatchanged(None, &bounds, max_count).await?;
        }
        Commands::CatFile { sha } => {
            let repository = open_repository()?;
            repository.cat_file(&sha)?;
        }
        Commands::HashObject { write, file } => {
            let repository = open_repository()?;
            repository.hash_object(&file, write)?;
        }
        Commands::LsTree { recursive, revspec } => {
            let repository = open_repository()?;
            repository.ls_tree(&revspec, recursive)?;
        }
    }

    Ok(())
}
