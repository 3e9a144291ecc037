//! Signed-in state passed explicitly to views that personalize content
//!
//! Authentication itself (sign-up, sign-in, session retrieval) belongs to the
//! external provider. This module only models what views branch on.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const DEFAULT_USERNAME: &str = "GamerTag";
const DEFAULT_DISPLAY_NAME: &str = "Gaming Enthusiast";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl UserProfile {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Default::default()
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn username_or_default(&self) -> &str {
        non_blank(self.username.as_deref()).unwrap_or(DEFAULT_USERNAME)
    }

    pub fn display_name_or_default(&self) -> &str {
        non_blank(self.display_name.as_deref()).unwrap_or(DEFAULT_DISPLAY_NAME)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "user", rename_all = "snake_case")]
pub enum Session {
    #[default]
    Anonymous,
    SignedIn(UserProfile),
}

impl Session {
    pub fn signed_in(user: UserProfile) -> Self {
        Session::SignedIn(user)
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, Session::SignedIn(_))
    }

    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            Session::Anonymous => None,
            Session::SignedIn(user) => Some(user),
        }
    }
}

/// What the user typed into the "email or username" sign-in field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInIdentifier {
    Email(String),
    /// Must be resolved to an email by the auth provider before sign-in
    Username(String),
}

impl SignInIdentifier {
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(Error::EmptyIdentifier);
        }
        if trimmed.contains('@') {
            Ok(SignInIdentifier::Email(trimmed.to_string()))
        } else {
            Ok(SignInIdentifier::Username(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SignInIdentifier::Email(s) | SignInIdentifier::Username(s) => s,
        }
    }
}

/// Profile for a session opened with this identifier. An email is only an
/// account key, so it leaves the username unset.
impl From<SignInIdentifier> for UserProfile {
    fn from(identifier: SignInIdentifier) -> Self {
        match identifier {
            SignInIdentifier::Email(email) => UserProfile::new(email),
            SignInIdentifier::Username(name) => UserProfile::new(name.clone()).with_username(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_by_default() {
        let session = Session::default();
        assert!(!session.is_signed_in());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_signed_in_user() {
        let session = Session::signed_in(UserProfile::new("u-1").with_username("night_city"));
        assert!(session.is_signed_in());
        assert_eq!(session.user().unwrap().username_or_default(), "night_city");
    }

    #[test]
    fn test_profile_fallbacks() {
        let profile = UserProfile::new("u-2").with_display_name("  ");
        assert_eq!(profile.username_or_default(), "GamerTag");
        assert_eq!(profile.display_name_or_default(), "Gaming Enthusiast");
    }

    #[test]
    fn test_parse_identifier() {
        assert_eq!(
            SignInIdentifier::parse(" v@nightcity.net ").unwrap(),
            SignInIdentifier::Email("v@nightcity.net".to_string())
        );
        assert_eq!(
            SignInIdentifier::parse("johnny").unwrap(),
            SignInIdentifier::Username("johnny".to_string())
        );
        assert!(matches!(SignInIdentifier::parse("   "), Err(Error::EmptyIdentifier)));
    }

    #[test]
    fn test_profile_from_identifier() {
        let by_email = UserProfile::from(SignInIdentifier::parse("v@nightcity.net").unwrap());
        assert_eq!(by_email.user_id, "v@nightcity.net");
        assert_eq!(by_email.username, None);
        assert_eq!(by_email.username_or_default(), "GamerTag");

        let by_name = UserProfile::from(SignInIdentifier::parse(" johnny ").unwrap());
        assert_eq!(by_name.user_id, "johnny");
        assert_eq!(by_name.username_or_default(), "johnny");
    }

    #[test]
    fn test_session_serde() {
        let session = Session::signed_in(UserProfile::new("u-3"));
        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("\"state\":\"signed_in\""));
        assert_eq!(serde_json::from_str::<Session>(&json).unwrap(), session);
    }
}
