use serde::{Deserialize, Serialize};

pub const DEFAULT_GRANTOR_ID: &str = "user-grantor-1";
pub const DEFAULT_GRANTOR_NAME: &str = "سعود العتيبي";
pub const DEFAULT_DELEGATE_ID: &str = "user-delegate-1";

/// The signed-in user, as seen from both sides of a delegation.
///
/// There is no authentication; the identity is fixed per session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Identity {
    pub grantor_id: String,
    pub grantor_name: String,
    pub delegate_id: String,
}

impl Default for Identity {
    fn default() -> Self {
        Self {
            grantor_id: DEFAULT_GRANTOR_ID.to_string(),
            grantor_name: DEFAULT_GRANTOR_NAME.to_string(),
            delegate_id: DEFAULT_DELEGATE_ID.to_string(),
        }
    }
}
