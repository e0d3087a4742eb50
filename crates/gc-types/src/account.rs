use serde::{Deserialize, Serialize};

/// The signed-in user as returned by `/auth/me`. This endpoint speaks
/// snake_case, unlike most of the API.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub is_admin: Option<bool>,
    #[serde(default)]
    pub is_driver: Option<bool>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.is_admin.unwrap_or(false)
    }

    pub fn is_driver(&self) -> bool {
        self.is_driver.unwrap_or(false)
    }

    /// A pickup can only be booked once a non-blank home address is saved.
    pub fn has_address(&self) -> bool {
        self.address
            .as_deref()
            .is_some_and(|address| !address.trim().is_empty())
    }

    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }

    /// Where this user lands after signing in.
    pub fn home_path(&self) -> &'static str {
        if self.is_admin() {
            "/admin"
        } else if self.is_driver() {
            "/driver"
        } else {
            "/wallet"
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

/// Login response. The backend sends `access_token`; mocks and older
/// deployments send `accessToken`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct TokenResponse {
    #[serde(default, alias = "accessToken")]
    pub access_token: Option<String>,
    #[serde(default, alias = "tokenType")]
    pub token_type: Option<String>,
}

impl TokenResponse {
    pub fn token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_path_prefers_admin_over_driver() {
        let mut user = User {
            id: 1,
            email: "a@b.ie".into(),
            ..Default::default()
        };
        assert_eq!(user.home_path(), "/wallet");

        user.is_driver = Some(true);
        assert_eq!(user.home_path(), "/driver");

        user.is_admin = Some(true);
        assert_eq!(user.home_path(), "/admin");
    }

    #[test]
    fn blank_address_does_not_count() {
        let mut user = User::default();
        assert!(!user.has_address());
        user.address = Some("   ".into());
        assert!(!user.has_address());
        user.address = Some("1 Main St, Dublin".into());
        assert!(user.has_address());
    }

    #[test]
    fn token_response_accepts_both_spellings() {
        let snake: TokenResponse =
            serde_json::from_str(r#"{"access_token":"abc","token_type":"bearer"}"#).unwrap();
        assert_eq!(snake.token(), Some("abc"));

        let camel: TokenResponse = serde_json::from_str(r#"{"accessToken":"xyz"}"#).unwrap();
        assert_eq!(camel.token(), Some("xyz"));

        let missing: TokenResponse = serde_json::from_str(r#"{"token_type":"bearer"}"#).unwrap();
        assert_eq!(missing.token(), None);
    }

    #[test]
    fn user_tolerates_missing_flags() {
        let user: User =
            serde_json::from_str(r#"{"id":7,"email":"x@y.ie","full_name":null}"#).unwrap();
        assert!(!user.is_admin());
        assert!(!user.is_driver());
        assert_eq!(user.display_name(), "x@y.ie");
    }
}
