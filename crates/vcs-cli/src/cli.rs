use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};
use vcs_types::ObjectKind;

#[derive(Parser)]
#[command(
    name = "vcs",
    about = "A minimal content-addressed version control tool",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log store activity to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run as if started in this directory
    #[arg(short = 'C', global = true, value_name = "PATH")]
    pub dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Initialize a new vcs repository
    Init(InitArgs),
    /// Add file contents to the object store
    Add(AddArgs),
    /// Show the working tree status
    Status(StatusArgs),
    /// Provide content, type or size of repository objects
    CatFile(CatFileArgs),
    /// Compute the object id of a file, optionally storing it
    HashObject(HashObjectArgs),
}

#[derive(Args)]
pub struct InitArgs {
    pub path: Option<PathBuf>,
    /// Branch HEAD points to in the new repository
    #[arg(short = 'b', long)]
    pub initial_branch: Option<String>,
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

#[derive(Args)]
pub struct StatusArgs {}

#[derive(Args)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["pretty", "kind", "size", "exists"]),
))]
pub struct CatFileArgs {
    /// Print the object's payload
    #[arg(short = 'p')]
    pub pretty: bool,
    /// Print the object's kind
    #[arg(short = 't')]
    pub kind: bool,
    /// Print the object's payload size in bytes
    #[arg(short = 's')]
    pub size: bool,
    /// Exit 0 if the object exists, 1 otherwise
    #[arg(short = 'e')]
    pub exists: bool,
    pub object: String,
}

#[derive(Args)]
pub struct HashObjectArgs {
    /// Also write the object into the repository
    #[arg(short = 'w')]
    pub write: bool,
    #[arg(short = 't', long = "type", default_value = "blob")]
    pub kind: ObjectKind,
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_init() {
        let cli = Cli::try_parse_from(["vcs", "init"]).unwrap();
        assert!(matches!(cli.command, Command::Init(_)));
    }

    #[test]
    fn parse_init_with_branch() {
        let cli = Cli::try_parse_from(["vcs", "init", "-b", "trunk", "/tmp/x"]).unwrap();
        if let Command::Init(args) = cli.command {
            assert_eq!(args.initial_branch, Some("trunk".into()));
            assert_eq!(args.path, Some(PathBuf::from("/tmp/x")));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_add_many() {
        let cli = Cli::try_parse_from(["vcs", "add", "a.txt", "b.txt"]).unwrap();
        if let Command::Add(args) = cli.command {
            assert_eq!(args.paths.len(), 2);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn add_requires_a_path() {
        assert!(Cli::try_parse_from(["vcs", "add"]).is_err());
    }

    #[test]
    fn parse_cat_file_pretty() {
        let cli = Cli::try_parse_from(["vcs", "cat-file", "-p", "abc"]).unwrap();
        if let Command::CatFile(args) = cli.command {
            assert!(args.pretty);
            assert_eq!(args.object, "abc");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn cat_file_requires_a_mode() {
        assert!(Cli::try_parse_from(["vcs", "cat-file", "abc"]).is_err());
    }

    #[test]
    fn cat_file_modes_are_exclusive() {
        assert!(Cli::try_parse_from(["vcs", "cat-file", "-p", "-t", "abc"]).is_err());
    }

    #[test]
    fn cat_file_requires_an_object() {
        assert!(Cli::try_parse_from(["vcs", "cat-file", "-p"]).is_err());
    }

    #[test]
    fn parse_hash_object_defaults() {
        let cli = Cli::try_parse_from(["vcs", "hash-object", "file.txt"]).unwrap();
        if let Command::HashObject(args) = cli.command {
            assert!(!args.write);
            assert_eq!(args.kind, ObjectKind::Blob);
            assert_eq!(args.path, PathBuf::from("file.txt"));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn hash_object_rejects_unknown_type() {
        assert!(Cli::try_parse_from(["vcs", "hash-object", "-t", "tree", "f"]).is_err());
    }

    #[test]
    fn parse_status() {
        let cli = Cli::try_parse_from(["vcs", "status"]).unwrap();
        assert!(matches!(cli.command, Command::Status(_)));
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::try_parse_from(["vcs", "status", "--verbose", "-C", "/repo"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.dir, Some(PathBuf::from("/repo")));
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(Cli::try_parse_from(["vcs", "commit"]).is_err());
    }
}
