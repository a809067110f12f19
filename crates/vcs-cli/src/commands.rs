use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use colored::Colorize;
use vcs_crypto::ContentHasher;
use vcs_repo::{Head, Repository};
use vcs_store::{ObjectStore, StoreError};
use vcs_types::{ObjectId, ObjectKind};

use crate::cli::*;

const CAT_FILE_USAGE: &str = "usage: vcs cat-file (-p | -t | -s | -e) <object-id>";

/// Run a parsed command, writing its normal output to `out`.
///
/// Returns the process exit status for commands that signal through it
/// (`cat-file -e`); every error is returned as `Err`.
pub fn run_command(cli: Cli, out: &mut impl Write) -> anyhow::Result<u8> {
    let cwd = match cli.dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    match cli.command {
        Command::Init(args) => cmd_init(&cwd, args, out),
        Command::Add(args) => cmd_add(&cwd, args, out),
        Command::Status(_) => cmd_status(&cwd, out),
        Command::CatFile(args) => cmd_cat_file(&cwd, args, out),
        Command::HashObject(args) => cmd_hash_object(&cwd, args, out),
    }
}

fn resolve(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

fn cmd_init(cwd: &Path, args: InitArgs, out: &mut impl Write) -> anyhow::Result<u8> {
    let target = args.path.map_or_else(|| cwd.to_path_buf(), |p| resolve(cwd, &p));
    let outcome = Repository::init(&target, args.initial_branch.as_deref())
        .with_context(|| format!("cannot initialize repository in {}", target.display()))?;
    let verb = if outcome.reinitialized { "Reinitialized existing" } else { "Initialized empty" };
    writeln!(
        out,
        "{} {} vcs repository in {}",
        "✓".green().bold(),
        verb,
        outcome.repo.vcs_dir().display().to_string().bold()
    )?;
    Ok(0)
}

fn cmd_add(cwd: &Path, args: AddArgs, out: &mut impl Write) -> anyhow::Result<u8> {
    let repo = Repository::discover(cwd)?;
    let store = repo.store()?;

    // Check every path before writing anything.
    let paths: Vec<PathBuf> = args.paths.iter().map(|p| resolve(cwd, p)).collect();
    for (path, shown) in paths.iter().zip(&args.paths) {
        let meta = fs::metadata(path)
            .with_context(|| format!("pathspec '{}' did not match any file", shown.display()))?;
        if !meta.is_file() {
            bail!("pathspec '{}' is not a regular file", shown.display());
        }
    }

    for (path, shown) in paths.iter().zip(&args.paths) {
        let content =
            fs::read(path).with_context(|| format!("cannot read {}", shown.display()))?;
        let id = store
            .put(ObjectKind::Blob, &content)
            .with_context(|| format!("cannot store {}", shown.display()))?;
        writeln!(out, "{id} {}", shown.display())?;
    }
    Ok(0)
}

fn cmd_status(cwd: &Path, out: &mut impl Write) -> anyhow::Result<u8> {
    let repo = Repository::discover(cwd)?;
    match repo.head()? {
        Head::Symbolic(branch) => writeln!(out, "On branch {}", branch.yellow().bold())?,
        Head::Detached(id) => writeln!(out, "HEAD detached at {}", id.short_hex().yellow())?,
    }
    writeln!(out, "\nNo index yet; working tree changes are not tracked.")?;
    Ok(0)
}

fn cmd_cat_file(cwd: &Path, args: CatFileArgs, out: &mut impl Write) -> anyhow::Result<u8> {
    let id = ObjectId::from_hex(&args.object)
        .map_err(StoreError::InvalidObjectId)
        .with_context(|| format!("'{}' is not a valid object id\n{CAT_FILE_USAGE}", args.object))?;
    let repo = Repository::discover(cwd)?;
    let store = repo.store()?;

    if args.exists {
        return Ok(if store.exists(&id)? { 0 } else { 1 });
    }

    let object = store
        .get(&id)
        .with_context(|| format!("cannot read object {}", args.object))?;
    if args.pretty {
        out.write_all(&object.data)?;
    } else if args.kind {
        writeln!(out, "{}", object.kind)?;
    } else if args.size {
        writeln!(out, "{}", object.size())?;
    }
    out.flush()?;
    Ok(0)
}

fn cmd_hash_object(cwd: &Path, args: HashObjectArgs, out: &mut impl Write) -> anyhow::Result<u8> {
    let path = resolve(cwd, &args.path);
    let content =
        fs::read(&path).with_context(|| format!("cannot read {}", args.path.display()))?;
    let id = if args.write {
        let repo = Repository::discover(cwd)?;
        repo.store()?
            .put(args.kind, &content)
            .with_context(|| format!("cannot store {}", args.path.display()))?
    } else {
        ContentHasher::hash_object(args.kind, &content)
    };
    writeln!(out, "{id}")?;
    Ok(0)
}
