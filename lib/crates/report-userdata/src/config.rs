use serde::Deserialize;

use crate::keys::prefix;

/// Class tagger configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaggerConfig {
    /// Master switch (default: true). When off, run completion leaves
    /// the report's userdata untouched.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Prefix selecting role classes (default: "role::")
    #[serde(default = "default_role_prefix")]
    pub role_prefix: String,

    /// Prefix selecting profile classes (default: "profile::")
    #[serde(default = "default_profile_prefix")]
    pub profile_prefix: String,
}

fn default_enabled() -> bool {
    true
}

fn default_role_prefix() -> String {
    prefix::ROLE.to_string()
}

fn default_profile_prefix() -> String {
    prefix::PROFILE.to_string()
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            role_prefix: default_role_prefix(),
            profile_prefix: default_profile_prefix(),
        }
    }
}
