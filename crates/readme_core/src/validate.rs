use std::fmt;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use url::Url;

pub const INVALID_URL_MESSAGE: &str = "Please enter a valid GitHub repository URL";

pub const EXAMPLE_URLS: [&str; 3] = [
    "https://github.com/facebook/react",
    "https://github.com/vercel/next.js",
    "https://github.com/vuejs/vue",
];

// ASCII-only case folding: with Unicode on, `s` and `k` also match U+017F
// and U+212A.
static GITHUB_REPO_URL: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"^https?://(www\.)?github\.com/[A-Za-z0-9_-]+/[A-Za-z0-9_.-]+/?$")
        .case_insensitive(true)
        .unicode(false)
        .build()
        .expect("github url pattern compiles")
});

/// True for `http(s)://[www.]github.com/<owner>/<repo>[/]`.
///
/// Input is matched as-is; callers trim user input first.
pub fn is_valid_github_url(input: &str) -> bool {
    GITHUB_REPO_URL.is_match(input)
}

/// Owner and repository name of a validated GitHub URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub repo: String,
}

impl RepoSlug {
    pub fn parse(input: &str) -> Option<Self> {
        if !is_valid_github_url(input) {
            return None;
        }
        let url = Url::parse(input).ok()?;
        let mut segments = url.path_segments()?.filter(|segment| !segment.is_empty());
        let owner = segments.next()?.to_string();
        let repo = segments.next()?.to_string();
        Some(Self { owner, repo })
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
