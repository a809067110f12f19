use std::fmt;

use vcs_types::ObjectId;

use crate::error::{RepoError, RepoResult};

const REF_PREFIX: &str = "ref: ";
const HEADS_PREFIX: &str = "refs/heads/";

/// The state of HEAD: either symbolic (pointing to a branch) or detached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Head {
    /// HEAD points to a branch by name.
    Symbolic(String),
    /// HEAD is detached, pointing directly at an object.
    Detached(ObjectId),
}

impl Head {
    /// Parse the contents of a HEAD file.
    pub fn parse(contents: &str) -> RepoResult<Self> {
        let line = contents.trim_end_matches(['\n', '\r']);
        if let Some(target) = line.strip_prefix(REF_PREFIX) {
            let branch = target
                .strip_prefix(HEADS_PREFIX)
                .ok_or_else(|| RepoError::InvalidHead(format!("not a branch ref: {target:?}")))?;
            if branch.is_empty() {
                return Err(RepoError::InvalidHead("empty branch name".into()));
            }
            return Ok(Self::Symbolic(branch.to_string()));
        }
        ObjectId::from_hex(line)
            .map(Self::Detached)
            .map_err(|e| RepoError::InvalidHead(e.to_string()))
    }
}

/// Renders the on-disk form, newline-terminated.
impl fmt::Display for Head {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symbolic(name) => writeln!(f, "{REF_PREFIX}{HEADS_PREFIX}{name}"),
            Self::Detached(id) => writeln!(f, "{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_symbolic() {
        let head = Head::parse("ref: refs/heads/main\n").unwrap();
        assert_eq!(head, Head::Symbolic("main".into()));
    }

    #[test]
    fn parse_nested_branch() {
        let head = Head::parse("ref: refs/heads/feature/x").unwrap();
        assert_eq!(head, Head::Symbolic("feature/x".into()));
    }

    #[test]
    fn parse_detached() {
        let id = ObjectId::from_hash([7; 32]);
        let head = Head::parse(&format!("{id}\n")).unwrap();
        assert_eq!(head, Head::Detached(id));
    }

    #[test]
    fn render_matches_init_format() {
        assert_eq!(
            Head::Symbolic("main".into()).to_string(),
            "ref: refs/heads/main\n"
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(Head::parse("").is_err());
        assert!(Head::parse("ref: refs/tags/v1").is_err());
        assert!(Head::parse("ref: refs/heads/").is_err());
        assert!(Head::parse("nonsense").is_err());
    }
}
