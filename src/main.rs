mod cat_file;
mod hash_object;
mod interface;

use camino::{Utf8Path, Utf8PathBuf};
use color_eyre::eyre::{eyre, Context};
use color_eyre::Result;

use kettle::Repo;

use crate::interface::*;

use clap::Parser;
use once_cell::sync::Lazy;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

static ARGS: Lazy<Opt> = Lazy::new(Opt::parse);

fn main() -> Result<()> {
    color_eyre::install()?;

    Lazy::force(&ARGS);

    let filter = if ARGS.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();

    let cwd = match ARGS.path {
        Some(ref path) => path.clone(),
        None => Utf8PathBuf::try_from(std::env::current_dir()?)
            .wrap_err("Current directory is not valid unicode")?,
    };

    match &ARGS.command {
        Command::Init { path } => {
            let repo = Repo::init(cwd.join(path))?;
            println!(
                "Initialized empty Git repository in {}",
                repo.git_dir().root()
            );
        }
        Command::CatFile { kind, object } => {
            let repo = open_repo(&cwd)?;
            cat_file::handle(&repo, *kind, object, std::io::stdout().lock())?;
        }
        Command::HashObject { kind, write, path } => {
            let repo = if *write { Some(open_repo(&cwd)?) } else { None };
            let oid = hash_object::handle(repo.as_ref(), *kind, &cwd.join(path))?;
            println!("{oid}");
        }
    }
    Ok(())
}

fn open_repo(cwd: &Utf8Path) -> Result<Repo> {
    Repo::discover(cwd, true)?.ok_or_else(|| eyre!("Not a git repository: {cwd}"))
}
