use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The user record as the backend returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Backend-specific attributes, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub(super) struct UserProfileResponse {
    pub(super) user: UserProfile,
}

/// Fields a client may change on its own profile. Unset fields are left alone.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// Error body shape: `{ "message": ... }` or `{ "error": ... }`.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorBody {
    pub(super) message: Option<String>,
    pub(super) error: Option<String>,
}

impl ErrorBody {
    pub(super) fn into_message(self) -> Option<String> {
        self.message.or(self.error).filter(|m| !m.is_empty())
    }
}
