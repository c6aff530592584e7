//! Deployment target type.

use crate::error::SshError;
use std::fmt;
use std::str::FromStr;

/// An SSH destination: `host` or `user@host`.
///
/// The host part may be an alias from `~/.ssh/config`; it is passed to the
/// `ssh` client untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    user: Option<String>,
    host: String,
}

impl Target {
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

impl FromStr for Target {
    type Err = SshError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| SshError::InvalidTarget {
            target: s.to_string(),
            reason,
        };

        if s.is_empty() {
            return Err(invalid("target is empty"));
        }
        if s.chars().any(char::is_whitespace) {
            return Err(invalid("target contains whitespace"));
        }
        if s.starts_with('-') {
            return Err(invalid("target must not start with '-'"));
        }

        // ssh splits on the last '@', user names may contain one
        match s.rsplit_once('@') {
            Some(("", _)) => Err(invalid("user is empty")),
            Some((_, "")) => Err(invalid("host is empty")),
            Some((user, host)) => Ok(Target {
                user: Some(user.to_string()),
                host: host.to_string(),
            }),
            None => Ok(Target {
                user: None,
                host: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.user {
            Some(user) => write!(f, "{user}@{}", self.host),
            None => write!(f, "{}", self.host),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_and_host() {
        let target: Target = "deploy@bot.example.org".parse().unwrap();
        assert_eq!(target.user(), Some("deploy"));
        assert_eq!(target.host(), "bot.example.org");
        assert_eq!(target.to_string(), "deploy@bot.example.org");
    }

    #[test]
    fn test_parse_alias_without_user() {
        let target: Target = "thoth-host".parse().unwrap();
        assert_eq!(target.user(), None);
        assert_eq!(target.host(), "thoth-host");
        assert_eq!(target.to_string(), "thoth-host");
    }

    #[test]
    fn test_parse_splits_on_last_at() {
        let target: Target = "me@corp@jump".parse().unwrap();
        assert_eq!(target.user(), Some("me@corp"));
        assert_eq!(target.host(), "jump");
    }

    #[test]
    fn test_parse_rejects_empty() {
        let result: Result<Target, _> = "".parse();
        assert!(matches!(result, Err(SshError::InvalidTarget { .. })));
    }

    #[test]
    fn test_parse_rejects_whitespace() {
        assert!("user@ host".parse::<Target>().is_err());
        assert!("   ".parse::<Target>().is_err());
    }

    #[test]
    fn test_parse_rejects_option_like_target() {
        assert!("-oProxyCommand=evil".parse::<Target>().is_err());
    }

    #[test]
    fn test_parse_rejects_missing_parts() {
        assert!("@host".parse::<Target>().is_err());
        assert!("user@".parse::<Target>().is_err());
    }
}
