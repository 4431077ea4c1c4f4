//! Derives `classes`, `roles` and `profiles` tags from the classes applied
//! during a run and stores them in the report's userdata.

use serde::{Deserialize, Serialize};

use crate::config::TaggerConfig;
use crate::keys::tags;
use crate::types::Report;

/// Tags derived from one run's applied classes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedTags {
    /// Every applied class, sorted ascending by byte order
    pub classes: Vec<String>,
    /// Sorted subset of `classes` carrying the role prefix
    pub roles: Vec<String>,
    /// Sorted subset of `classes` carrying the profile prefix
    pub profiles: Vec<String>,
}

impl DerivedTags {
    /// Sorts `applied` and partitions it by prefix.
    ///
    /// Both prefix checks run against the full sorted list, so a class
    /// matching both prefixes lands in both subsets.
    #[must_use]
    pub fn derive<S: AsRef<str>>(applied: &[S], role_prefix: &str, profile_prefix: &str) -> Self {
        let mut classes: Vec<String> = applied.iter().map(|c| c.as_ref().to_owned()).collect();
        classes.sort();

        let with_prefix = |p: &str| -> Vec<String> {
            classes.iter().filter(|c| c.starts_with(p)).cloned().collect()
        };
        let roles = with_prefix(role_prefix);
        let profiles = with_prefix(profile_prefix);

        Self {
            classes,
            roles,
            profiles,
        }
    }
}

/// Writes derived class tags into report userdata.
#[derive(Debug, Clone, Default)]
pub struct ClassTagger {
    config: TaggerConfig,
}

impl ClassTagger {
    #[must_use]
    pub fn new(config: TaggerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &TaggerConfig {
        &self.config
    }

    /// Computes tags for `applied` under this tagger's prefixes.
    #[must_use]
    pub fn derive<S: AsRef<str>>(&self, applied: &[S]) -> DerivedTags {
        DerivedTags::derive(applied, &self.config.role_prefix, &self.config.profile_prefix)
    }

    /// Stores `classes`, `roles` and `profiles` in the report's userdata.
    ///
    /// Only those three keys are written; anything else a caller put in
    /// userdata is left alone. Tagging again with the same input produces
    /// the same userdata.
    pub fn tag_report<S: AsRef<str>>(&self, report: &mut Report, applied: &[S]) -> DerivedTags {
        let derived = self.derive(applied);
        let userdata = report.userdata_mut();
        userdata.set_string_list(tags::CLASSES, &derived.classes);
        userdata.set_string_list(tags::ROLES, &derived.roles);
        userdata.set_string_list(tags::PROFILES, &derived.profiles);
        tracing::debug!(
            host = %report.host,
            classes = derived.classes.len(),
            roles = derived.roles.len(),
            profiles = derived.profiles.len(),
            "tagged report with applied classes",
        );
        derived
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tag(applied: &[&str]) -> Report {
        let mut report = Report::new("node1");
        ClassTagger::default().tag_report(&mut report, applied);
        report
    }

    #[test]
    fn empty_input_yields_empty_lists() {
        let report = tag(&[]);
        let ud = report.userdata();
        assert_eq!(ud.get("classes"), Some(&json!([])));
        assert_eq!(ud.get("roles"), Some(&json!([])));
        assert_eq!(ud.get("profiles"), Some(&json!([])));
    }

    #[test]
    fn sorts_and_partitions() {
        let report = tag(&["role::web", "profile::base", "ntp", "role::db"]);
        let ud = report.userdata();
        assert_eq!(
            ud.string_list("classes").unwrap(),
            vec!["ntp", "profile::base", "role::db", "role::web"]
        );
        assert_eq!(ud.string_list("roles").unwrap(), vec!["role::db", "role::web"]);
        assert_eq!(ud.string_list("profiles").unwrap(), vec!["profile::base"]);
    }

    #[test]
    fn sort_is_byte_order() {
        let tags = DerivedTags::derive(&["b", "B", "a", "_"], "role::", "profile::");
        assert_eq!(tags.classes, vec!["B", "_", "a", "b"]);
    }

    #[test]
    fn prefix_match_is_case_sensitive_and_exact() {
        let tags = DerivedTags::derive(
            &["Role::web", "role:web", "roles::x", "role::"],
            "role::",
            "profile::",
        );
        assert_eq!(tags.roles, vec!["role::"]);
    }

    #[test]
    fn duplicates_are_kept() {
        let tags = DerivedTags::derive(&["role::db", "role::db"], "role::", "profile::");
        assert_eq!(tags.classes, vec!["role::db", "role::db"]);
        assert_eq!(tags.roles, vec!["role::db", "role::db"]);
    }

    #[test]
    fn overlapping_prefixes_are_checked_independently() {
        let tags = DerivedTags::derive(&["x::a", "y"], "x::", "x::");
        assert_eq!(tags.roles, vec!["x::a"]);
        assert_eq!(tags.profiles, vec!["x::a"]);
    }

    #[test]
    fn custom_prefixes_from_config() {
        let tagger = ClassTagger::new(TaggerConfig {
            role_prefix: "roles::".to_string(),
            ..TaggerConfig::default()
        });
        let tags = tagger.derive(&["roles::web", "role::db"]);
        assert_eq!(tags.roles, vec!["roles::web"]);
    }

    #[test]
    fn retagging_overwrites_previous_tags() {
        let tagger = ClassTagger::default();
        let mut report = Report::new("node1");
        tagger.tag_report(&mut report, &["role::old"]);
        tagger.tag_report(&mut report, &["role::new"]);
        assert_eq!(report.userdata().string_list("roles").unwrap(), vec!["role::new"]);
    }

    #[test]
    fn caller_keys_survive_tagging() {
        let mut report = Report::new("node1");
        report.userdata_mut().insert("note", "x");
        ClassTagger::default().tag_report(&mut report, &["ntp"]);
        assert_eq!(report.userdata().get("note"), Some(&json!("x")));
        assert_eq!(report.userdata().len(), 4);
    }

    #[test]
    fn returned_tags_match_stored_tags() {
        let mut report = Report::new("node1");
        let tags = ClassTagger::default().tag_report(&mut report, &["profile::base"]);
        assert_eq!(tags.profiles, vec!["profile::base"]);
        assert_eq!(
            report.userdata().string_list("profiles").unwrap(),
            vec!["profile::base"]
        );
    }
}
