/// Top-level key the userdata map is serialized under in a report
pub const USERDATA: &str = "userdata";

/// Top-level report keys backed by typed fields. Extra host fields may not
/// reuse these.
pub const REPORT_FIELDS: &[&str] = &[
    "host",
    "time",
    "status",
    "configuration_version",
    "environment",
    "transaction_uuid",
    USERDATA,
];

/// Userdata keys written by the class tagger
pub mod tags {
    /// Every applied class, sorted
    /// Value: JSON array of strings
    pub const CLASSES: &str = "classes";

    /// Applied classes carrying the role prefix, sorted
    /// Value: JSON array of strings
    pub const ROLES: &str = "roles";

    /// Applied classes carrying the profile prefix, sorted
    /// Value: JSON array of strings
    pub const PROFILES: &str = "profiles";

    /// All keys owned by the tagger. Anything else in userdata belongs to callers.
    pub const ALL: &[&str] = &[CLASSES, ROLES, PROFILES];
}

/// Naming-convention prefixes for applied classes
pub mod prefix {
    /// Default prefix identifying a role class, e.g. `role::web`
    pub const ROLE: &str = "role::";

    /// Default prefix identifying a profile class, e.g. `profile::base`
    pub const PROFILE: &str = "profile::";
}
