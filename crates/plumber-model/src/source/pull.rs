use serde::{Deserialize, Serialize};

#[cfg(feature = "schema")]
use schemars::JsonSchema;

/// A pull request as it was at one point in time.
///
/// Fields are read-only once the value is built: a newer state of the same
/// pull request is a new `Pull`, never an update of this one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Pull {
    number: u64,
    author: String,
    sha: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    title: String,
    /// Checkout target for the change, e.g. `pull/123/head` or `refs/changes/00/123/1`.
    #[serde(rename = "ref", default, skip_serializing_if = "String::is_empty")]
    git_ref: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    link: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    commit_link: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    author_link: String,
}

impl Pull {
    /// Create a snapshot with the required fields.
    pub fn new(number: u64, author: impl Into<String>, sha: impl Into<String>) -> Self {
        Self {
            number,
            author: author.into(),
            sha: sha.into(),
            title: String::new(),
            git_ref: String::new(),
            link: String::new(),
            commit_link: String::new(),
            author_link: String::new(),
        }
    }

    /// Builder-style title setter.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Builder-style checkout ref setter.
    pub fn with_ref(mut self, git_ref: impl Into<String>) -> Self {
        self.git_ref = git_ref.into();
        self
    }

    /// Builder-style setter for the pull, commit and author links.
    pub fn with_links(
        mut self,
        link: impl Into<String>,
        commit_link: impl Into<String>,
        author_link: impl Into<String>,
    ) -> Self {
        self.link = link.into();
        self.commit_link = commit_link.into();
        self.author_link = author_link.into();
        self
    }

    /// Pull request number.
    pub fn number(&self) -> u64 {
        self.number
    }

    /// Login of the author.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Head commit SHA.
    pub fn sha(&self) -> &str {
        &self.sha
    }

    /// Title, if recorded.
    pub fn title(&self) -> Option<&str> {
        non_empty(&self.title)
    }

    /// Checkout ref, if recorded.
    pub fn git_ref(&self) -> Option<&str> {
        non_empty(&self.git_ref)
    }

    /// Link to the pull request, if recorded.
    pub fn link(&self) -> Option<&str> {
        non_empty(&self.link)
    }

    /// Link to the head commit, if recorded.
    pub fn commit_link(&self) -> Option<&str> {
        non_empty(&self.commit_link)
    }

    /// Link to the author's profile, if recorded.
    pub fn author_link(&self) -> Option<&str> {
        non_empty(&self.author_link)
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}
