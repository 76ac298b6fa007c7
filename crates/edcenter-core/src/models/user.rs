use serde::{Deserialize, Serialize};

/// The signed-in dashboard account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: String,
}

/// Token payload returned by login, register and refresh.
///
/// Refresh responses usually omit `user` and may omit `refresh_token`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_login_response() {
        let json = r#"{"access_token":"abc","refresh_token":"def","token_type":"bearer","expires_in":3600,"user":{"id":"1","name":"Admin","email":"admin@example.com","role":"admin"}}"#;
        let parsed: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.access_token, "abc");
        assert_eq!(parsed.refresh_token.as_deref(), Some("def"));
        assert_eq!(parsed.user.unwrap().role, "admin");
    }

    #[test]
    fn test_parse_refresh_response() {
        let parsed: AuthResponse = serde_json::from_str(r#"{"access_token":"new"}"#).unwrap();
        assert_eq!(parsed.access_token, "new");
        assert!(parsed.refresh_token.is_none());
        assert!(parsed.user.is_none());
    }
}
