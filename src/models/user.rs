use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::auth::LOGIN_HISTORY_LIMIT;
use crate::entities::users;

/// One successful authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginEvent {
    pub date_time: DateTime<Utc>,
    pub user_agent: String,
}

impl LoginEvent {
    #[must_use]
    pub fn now(user_agent: impl Into<String>) -> Self {
        Self {
            date_time: Utc::now(),
            user_agent: user_agent.into(),
        }
    }
}

/// User data handed to callers (without the password hash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_name: String,
    pub email: String,
    pub login_history: Vec<LoginEvent>,
}

impl TryFrom<users::Model> for User {
    type Error = serde_json::Error;

    fn try_from(model: users::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            login_history: parse_login_history(&model.login_history)?,
            user_name: model.user_name,
            email: model.email,
        })
    }
}

/// Registration form as submitted by a caller.
#[derive(Clone, Deserialize)]
pub struct NewUser {
    pub user_name: String,
    pub password: String,
    pub confirm_password: String,
    pub email: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("user_name", &self.user_name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl NewUser {
    /// Returns the first required field left blank, if any.
    #[must_use]
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.user_name.trim().is_empty() {
            Some("user_name")
        } else if self.password.is_empty() {
            Some("password")
        } else if self.email.trim().is_empty() {
            Some("email")
        } else {
            None
        }
    }
}

/// Prepends `event` and drops the oldest entries beyond [`LOGIN_HISTORY_LIMIT`].
pub fn record_login(history: &mut Vec<LoginEvent>, event: LoginEvent) {
    history.insert(0, event);
    history.truncate(LOGIN_HISTORY_LIMIT);
}

pub fn parse_login_history(raw: &str) -> Result<Vec<LoginEvent>, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(agent: &str) -> LoginEvent {
        LoginEvent::now(agent)
    }

    #[test]
    fn test_record_login_prepends() {
        let mut history = vec![event("old")];
        record_login(&mut history, event("new"));

        let agents: Vec<_> = history.iter().map(|e| e.user_agent.as_str()).collect();
        assert_eq!(agents, vec!["new", "old"]);
    }

    #[test]
    fn test_record_login_drops_oldest_beyond_limit() {
        let mut history = Vec::new();
        for i in 0..12 {
            record_login(&mut history, event(&format!("agent-{i}")));
        }

        assert_eq!(history.len(), LOGIN_HISTORY_LIMIT);
        assert_eq!(history[0].user_agent, "agent-11");
        assert_eq!(history[LOGIN_HISTORY_LIMIT - 1].user_agent, "agent-4");
    }

    #[test]
    fn test_parse_empty_history() {
        assert!(parse_login_history("").unwrap().is_empty());
        assert!(parse_login_history("[]").unwrap().is_empty());
    }

    #[test]
    fn test_missing_field() {
        let mut user = NewUser {
            user_name: "alice".to_string(),
            password: "p1".to_string(),
            confirm_password: "p1".to_string(),
            email: "a@x.com".to_string(),
        };
        assert_eq!(user.missing_field(), None);

        user.email = "  ".to_string();
        assert_eq!(user.missing_field(), Some("email"));

        user.user_name = String::new();
        assert_eq!(user.missing_field(), Some("user_name"));
    }

    #[test]
    fn test_debug_hides_passwords() {
        let user = NewUser {
            user_name: "alice".to_string(),
            password: "secret-one".to_string(),
            confirm_password: "secret-one".to_string(),
            email: "a@x.com".to_string(),
        };
        let printed = format!("{user:?}");
        assert!(printed.contains("alice"));
        assert!(!printed.contains("secret-one"));
    }
}
