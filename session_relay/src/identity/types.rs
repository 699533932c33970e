use serde::Serialize;

/// User attributes read from a credential payload, for display only.
///
/// Built fresh from the cookie on every request and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayIdentity {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl DisplayIdentity {
    /// Name to greet the user with: first name when known, else the email.
    pub fn greeting_name(&self) -> &str {
        self.first_name.as_deref().unwrap_or(&self.email)
    }
}
