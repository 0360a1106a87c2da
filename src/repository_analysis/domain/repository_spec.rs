use crate::shared::error::OrchestratorError;
use crate::shared::Result;
use std::fmt;

/// RepositorySpec is a parsed `url[@branch]` argument
///
/// The branch separator is the last `@` that sits inside the URL path, so
/// scp-style remotes (`git@github.com:org/repo.git`) keep their user part
/// and `https://host/org/repo.git@release/1.0` checks out `release/1.0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySpec {
    url: String,
    branch: Option<String>,
    name: String,
}

impl RepositorySpec {
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(invalid(input, "repository URL is required"));
        }
        if input.contains("@@") {
            return Err(invalid(input, "'@@' is not a valid branch separator"));
        }

        let path_start = path_offset(input);
        let (url, branch) = match input[path_start..].rfind('@') {
            Some(idx) => {
                let split = path_start + idx;
                (&input[..split], Some(&input[split + 1..]))
            }
            None => (input, None),
        };

        if let Some(branch) = branch {
            if branch.is_empty() {
                return Err(invalid(input, "branch name after '@' is empty"));
            }
        }

        let name = repository_name(url);
        if name.is_empty() {
            return Err(invalid(input, "cannot derive a repository name from the URL"));
        }

        Ok(Self {
            url: url.to_string(),
            branch: branch.map(str::to_string),
            name,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    /// Last path segment without `.git`, used as the clone directory name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RepositorySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.branch {
            Some(branch) => write!(f, "{}@{}", self.url, branch),
            None => write!(f, "{}", self.url),
        }
    }
}

fn invalid(input: &str, reason: &str) -> anyhow::Error {
    OrchestratorError::InvalidRepositorySpec {
        input: input.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

/// Byte offset where the repository path begins (after scheme, user and host)
fn path_offset(input: &str) -> usize {
    if let Some(scheme_end) = input.find("://") {
        let after_scheme = scheme_end + 3;
        return input[after_scheme..]
            .find('/')
            .map_or(input.len(), |idx| after_scheme + idx);
    }
    // scp-like `user@host:path`
    match input.find(':') {
        Some(idx) if !input[..idx].contains('/') => idx + 1,
        _ => 0,
    }
}

fn repository_name(url: &str) -> String {
    let last = url
        .trim_end_matches('/')
        .rsplit(['/', ':'])
        .next()
        .unwrap_or_default();
    last.strip_suffix(".git").unwrap_or(last).to_string()
}
