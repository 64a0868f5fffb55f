use serde::{Deserialize, Serialize};

#[cfg(feature = "schema")]
use schemars::JsonSchema;

use super::Pull;

/// Code under test: one repository, a base revision and zero or more pull requests.
///
/// An empty `pulls` list is valid: postsubmit and periodic runs carry no pull
/// context. Pull SHAs are not checked against the repository here; the
/// checkout step does that.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Refs {
    /// Organization, e.g. `kubernetes`.
    pub org: String,
    /// Repository within the organization, e.g. `test-infra`.
    pub repo: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub repo_link: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub base_ref: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub base_sha: String,
    /// Link to the commit named by `base_sha`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub base_link: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pulls: Vec<Pull>,

    /// Clone location relative to the source root; see [`Refs::path_alias_or_default`].
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path_alias: String,
    /// Clone URI override; see [`Refs::clone_uri_or_default`].
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub clone_uri: String,
    /// Whether submodules are left out of the checkout.
    ///
    /// Callers document `true` as the default but it is not applied on decode:
    /// an absent field reads as `false`.
    #[serde(default, skip_serializing_if = "is_false")]
    pub skip_submodules: bool,
    /// Clone depth; `0` means a full clone.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub clone_depth: u32,
}

fn is_false(b: &bool) -> bool {
    !*b
}

fn is_zero(n: &u32) -> bool {
    *n == 0
}

impl Refs {
    /// Create refs for `org/repo` with no base revision and no pulls.
    pub fn new(org: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            org: org.into(),
            repo: repo.into(),
            ..Default::default()
        }
    }

    /// Builder-style base revision setter.
    pub fn with_base(mut self, base_ref: impl Into<String>, base_sha: impl Into<String>) -> Self {
        self.base_ref = base_ref.into();
        self.base_sha = base_sha.into();
        self
    }

    /// Builder-style pull append.
    pub fn with_pull(mut self, pull: Pull) -> Self {
        self.pulls.push(pull);
        self
    }

    /// Check if any pull request is under test.
    pub fn has_pulls(&self) -> bool {
        !self.pulls.is_empty()
    }

    /// `org/repo`.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.org, self.repo)
    }

    /// Clone URI, falling back to `https://github.com/<org>/<repo>.git`.
    pub fn clone_uri_or_default(&self) -> String {
        if self.clone_uri.is_empty() {
            format!("https://github.com/{}.git", self.full_name())
        } else {
            self.clone_uri.clone()
        }
    }

    /// Clone path under the source root, falling back to `github.com/<org>/<repo>`.
    pub fn path_alias_or_default(&self) -> String {
        if self.path_alias.is_empty() {
            format!("github.com/{}", self.full_name())
        } else {
            self.path_alias.clone()
        }
    }

    /// Check if the whole history is cloned.
    pub fn is_full_clone(&self) -> bool {
        self.clone_depth == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pulls_is_valid_and_omitted() {
        let refs: Refs = serde_json::from_str(r#"{"org":"acme","repo":"widgets"}"#).unwrap();
        assert!(!refs.has_pulls());
        assert!(!refs.skip_submodules);
        assert!(refs.is_full_clone());

        let json = serde_json::to_string(&refs).unwrap();
        assert_eq!(json, r#"{"org":"acme","repo":"widgets"}"#);
    }

    #[test]
    fn org_and_repo_are_required() {
        assert!(serde_json::from_str::<Refs>(r#"{"repo":"widgets"}"#).is_err());
        assert!(serde_json::from_str::<Refs>(r#"{"org":"acme"}"#).is_err());
    }

    #[test]
    fn defaults_for_clone_location() {
        let refs = Refs::new("acme", "widgets");
        assert_eq!(refs.full_name(), "acme/widgets");
        assert_eq!(refs.clone_uri_or_default(), "https://github.com/acme/widgets.git");
        assert_eq!(refs.path_alias_or_default(), "github.com/acme/widgets");

        let refs = Refs {
            clone_uri: "git@git.example.com:acme/widgets.git".into(),
            path_alias: "example.com/widgets".into(),
            ..Refs::new("acme", "widgets")
        };
        assert_eq!(refs.clone_uri_or_default(), "git@git.example.com:acme/widgets.git");
        assert_eq!(refs.path_alias_or_default(), "example.com/widgets");
    }

    #[test]
    fn pulls_keep_their_order() {
        let json = r#"{
            "org": "acme",
            "repo": "widgets",
            "base_ref": "main",
            "base_sha": "aaa",
            "pulls": [
                {"number": 2, "author": "x", "sha": "bbb"},
                {"number": 1, "author": "y", "sha": "ccc"}
            ],
            "skip_submodules": true,
            "clone_depth": 50
        }"#;
        let refs: Refs = serde_json::from_str(json).unwrap();
        let numbers: Vec<_> = refs.pulls.iter().map(Pull::number).collect();
        assert_eq!(numbers, vec![2, 1]);
        assert!(refs.skip_submodules);
        assert_eq!(refs.clone_depth, 50);
        assert!(!refs.is_full_clone());
    }

    #[test]
    fn builders_compose() {
        let refs = Refs::new("acme", "widgets")
            .with_base("main", "aaa")
            .with_pull(Pull::new(9, "dev", "bbb"));
        assert_eq!(refs.base_ref, "main");
        assert_eq!(refs.base_sha, "aaa");
        assert_eq!(refs.pulls.len(), 1);
    }

    #[test]
    fn negative_clone_depth_is_rejected() {
        let json = r#"{"org":"acme","repo":"widgets","clone_depth":-1}"#;
        assert!(serde_json::from_str::<Refs>(json).is_err());
    }
}
