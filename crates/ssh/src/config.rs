use crate::error::SshError;
use crate::target::Target;
use ssh2_config::{ParseRule, SshConfig};
use std::fmt;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 22;

/// Where `ssh` will actually connect for a given target, after applying
/// `~/.ssh/config`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub user: Option<String>,
    pub host_name: String,
    pub port: u16,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(user) = &self.user {
            write!(f, "{user}@")?;
        }
        write!(f, "{}:{}", self.host_name, self.port)
    }
}

impl From<&Target> for Endpoint {
    fn from(target: &Target) -> Self {
        Endpoint {
            user: target.user().map(str::to_string),
            host_name: target.host().to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Returns the default SSH config file path (~/.ssh/config).
fn ssh_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".ssh").join("config"))
}

/// Resolves a target against an already parsed SSH config.
///
/// A user given in the target wins over a `User` directive, as with `ssh`.
fn lookup_in(config: &SshConfig, target: &Target) -> Endpoint {
    let params = config.query(target.host());

    Endpoint {
        user: target.user().map(str::to_string).or(params.user),
        host_name: params
            .host_name
            .unwrap_or_else(|| target.host().to_string()),
        port: params.port.unwrap_or(DEFAULT_PORT),
    }
}

/// Resolves a target against `~/.ssh/config`.
///
/// Returns the target unchanged if the SSH config file doesn't exist.
///
/// # Errors
///
/// Returns `SshError::ConfigParse` if the SSH config file exists but is malformed.
pub fn lookup(target: &Target) -> Result<Endpoint, SshError> {
    let Some(path) = ssh_config_path() else {
        return Ok(Endpoint::from(target));
    };

    if !path.exists() {
        return Ok(Endpoint::from(target));
    }

    let config = SshConfig::parse_default_file(ParseRule::ALLOW_UNKNOWN_FIELDS)
        .map_err(|e| SshError::ConfigParse(e.to_string()))?;

    Ok(lookup_in(&config, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufReader;

    fn config_from_str(s: &str) -> SshConfig {
        let mut reader = BufReader::new(s.as_bytes());
        SshConfig::default()
            .parse(&mut reader, ParseRule::ALLOW_UNKNOWN_FIELDS)
            .unwrap()
    }

    const CONFIG: &str = "\
Host thoth
    HostName 203.0.113.7
    User bot
    Port 2222

Host *.internal
    User ops
";

    #[test]
    fn test_lookup_alias() {
        let config = config_from_str(CONFIG);
        let target: Target = "thoth".parse().unwrap();
        let endpoint = lookup_in(&config, &target);
        assert_eq!(endpoint.user.as_deref(), Some("bot"));
        assert_eq!(endpoint.host_name, "203.0.113.7");
        assert_eq!(endpoint.port, 2222);
        assert_eq!(endpoint.to_string(), "bot@203.0.113.7:2222");
    }

    #[test]
    fn test_lookup_explicit_user_wins() {
        let config = config_from_str(CONFIG);
        let target: Target = "root@thoth".parse().unwrap();
        let endpoint = lookup_in(&config, &target);
        assert_eq!(endpoint.user.as_deref(), Some("root"));
        assert_eq!(endpoint.host_name, "203.0.113.7");
    }

    #[test]
    fn test_lookup_wildcard_pattern() {
        let config = config_from_str(CONFIG);
        let target: Target = "db.internal".parse().unwrap();
        let endpoint = lookup_in(&config, &target);
        assert_eq!(endpoint.user.as_deref(), Some("ops"));
        assert_eq!(endpoint.host_name, "db.internal");
        assert_eq!(endpoint.port, 22);
    }

    #[test]
    fn test_lookup_unknown_host_is_unchanged() {
        let config = config_from_str(CONFIG);
        let target: Target = "user@elsewhere".parse().unwrap();
        assert_eq!(lookup_in(&config, &target), Endpoint::from(&target));
    }

    #[test]
    fn test_endpoint_display_without_user() {
        let target: Target = "host".parse().unwrap();
        assert_eq!(Endpoint::from(&target).to_string(), "host:22");
    }
}
