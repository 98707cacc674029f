use crate::error::{HealthError, Result};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Owner and repository name on the hosting platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoIdentity {
    pub owner: String,
    pub repo: String,
}

impl RepoIdentity {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for RepoIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Reference forms that name a host: https, `ssh://`, scp-style and bare
/// `host/owner/repo`. Each captures host, owner and repository.
fn host_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        vec![
            Regex::new(r"^https?://(?:www\.)?([^/\s]+)/([^/\s?#]+)/([^/\s?#]+)")
                .expect("valid regex"),
            Regex::new(r"^ssh://(?:[^@/\s]+@)?([^/:\s]+)[:/]([^/\s?#]+)/([^/\s?#]+)")
                .expect("valid regex"),
            Regex::new(r"^[^@/\s]+@([^/:\s]+):([^/\s?#]+)/([^/\s?#]+)").expect("valid regex"),
            Regex::new(r"^([^/\s:@]+)/([^/\s?#]+)/([^/\s?#]+)").expect("valid regex"),
        ]
    })
}

fn shorthand_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([A-Za-z0-9][A-Za-z0-9_.-]*)/([A-Za-z0-9_.-]+)$").expect("valid regex")
    })
}

fn is_host(candidate: &str, host: &str) -> bool {
    candidate.eq_ignore_ascii_case(host)
        || candidate
            .strip_prefix("www.")
            .is_some_and(|rest| rest.eq_ignore_ascii_case(host))
}

/// Extracts `(owner, repo)` from a repository reference on `host`.
///
/// Accepts `https://host/owner/repo`, `git@host:owner/repo`,
/// `ssh://git@host/owner/repo`, `host/owner/repo` and the `owner/repo`
/// shorthand. A query string, fragment, trailing slash or `.git` suffix is
/// ignored, as are extra path segments after the repository name.
pub fn parse_repository_url(input: &str, host: &str) -> Option<RepoIdentity> {
    let trimmed = input.trim();
    let trimmed = trimmed.split(['?', '#']).next().unwrap_or(trimmed);
    let trimmed = trimmed.trim_end_matches('/');
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);
    if trimmed.is_empty() {
        return None;
    }

    let (owner, repo) = match host_patterns()
        .iter()
        .find_map(|pattern| pattern.captures(trimmed))
    {
        Some(captures) => {
            if !is_host(captures.get(1)?.as_str(), host) {
                return None;
            }
            (captures.get(2)?.as_str(), captures.get(3)?.as_str())
        }
        None => {
            let captures = shorthand_pattern().captures(trimmed)?;
            let owner = captures.get(1)?.as_str();
            if is_host(owner, host) {
                return None;
            }
            (owner, captures.get(2)?.as_str())
        }
    };

    let repo = repo.strip_suffix(".git").unwrap_or(repo);
    if owner.is_empty() || repo.is_empty() || owner.contains(':') {
        return None;
    }
    Some(RepoIdentity {
        owner: owner.to_string(),
        repo: repo.to_string(),
    })
}

pub fn require_identity(input: &str, host: &str) -> Result<RepoIdentity> {
    parse_repository_url(input, host).ok_or_else(|| {
        HealthError::IdentityInvalid(format!(
            "'{input}'. Use a form like https://{host}/owner/repo"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Option<(String, String)> {
        parse_repository_url(input, "github.com").map(|id| (id.owner, id.repo))
    }

    fn pair(owner: &str, repo: &str) -> Option<(String, String)> {
        Some((owner.to_string(), repo.to_string()))
    }

    #[test]
    fn parses_https_urls_with_suffixes() {
        assert_eq!(parse("https://github.com/rust-lang/rust"), pair("rust-lang", "rust"));
        assert_eq!(parse("https://github.com/rust-lang/rust/"), pair("rust-lang", "rust"));
        assert_eq!(parse("https://github.com/rust-lang/rust.git"), pair("rust-lang", "rust"));
        assert_eq!(
            parse("https://github.com/rust-lang/rust/tree/master/src"),
            pair("rust-lang", "rust")
        );
        assert_eq!(
            parse("https://github.com/rust-lang/rust?tab=readme-ov-file"),
            pair("rust-lang", "rust")
        );
        assert_eq!(parse("https://github.com/rust-lang/rust#readme"), pair("rust-lang", "rust"));
    }

    #[test]
    fn parses_ssh_forms() {
        assert_eq!(parse("git@github.com:tokio-rs/tokio.git"), pair("tokio-rs", "tokio"));
        assert_eq!(parse("ssh://git@github.com/tokio-rs/tokio"), pair("tokio-rs", "tokio"));
    }

    #[test]
    fn parses_bare_host_and_shorthand() {
        assert_eq!(parse("github.com/serde-rs/serde"), pair("serde-rs", "serde"));
        assert_eq!(parse("serde-rs/serde"), pair("serde-rs", "serde"));
    }

    #[test]
    fn does_not_mangle_names_ending_in_git_letters() {
        assert_eq!(parse("https://github.com/owner/digit"), pair("owner", "digit"));
    }

    #[test]
    fn rejects_other_hosts_and_garbage() {
        assert_eq!(parse("https://gitlab.com/owner/repo"), None);
        assert_eq!(parse("https://github.com/owner"), None);
        assert_eq!(parse("github.com/torvalds"), None);
        assert_eq!(parse("www.github.com/torvalds"), None);
        assert_eq!(parse("gitlab.com/owner/repo"), None);
        assert_eq!(parse("git@gitlab.com:owner/repo.git"), None);
        assert_eq!(parse("not a url"), None);
        assert_eq!(parse(""), None);
    }

    #[test]
    fn honours_custom_host() {
        let id = parse_repository_url("https://ghe.example.com/team/app", "ghe.example.com")
            .expect("custom host should parse");
        assert_eq!(id.full_name(), "team/app");
    }

    #[test]
    fn require_identity_returns_typed_error() {
        let error = require_identity("nope", "github.com").expect_err("should fail");
        assert!(matches!(error, HealthError::IdentityInvalid(_)));
    }
}
