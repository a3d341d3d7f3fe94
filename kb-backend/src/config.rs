use std::env;
use std::path::PathBuf;

/// Environment variable names - single source of truth
pub mod env_vars {
    /// Root directory of the knowledge base (holds projects/, journals/, concepts/)
    pub const KB_ROOT: &str = "KB_ROOT";
    pub const HOST: &str = "HOST";
    pub const PORT: &str = "PORT";
}

/// Default values
pub mod defaults {
    pub const HOST: &str = "127.0.0.1";
    pub const PORT: u16 = 8080;
    /// Root directory name, relative to $HOME
    pub const KB_DIR: &str = "knowledge-base";
}

#[derive(Clone, Debug)]
pub struct Config {
    pub root: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let root = lookup(env_vars::KB_ROOT)
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| default_root(lookup("HOME").as_deref()));

        let host = lookup(env_vars::HOST)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| defaults::HOST.to_string());

        let port = lookup(env_vars::PORT)
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults::PORT);

        Self { root, host, port }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Default knowledge-base root: `$HOME/knowledge-base`, or `./knowledge-base` without a home
pub fn default_root(home: Option<&str>) -> PathBuf {
    match home {
        Some(h) if !h.is_empty() => PathBuf::from(h).join(defaults::KB_DIR),
        _ => PathBuf::from(".").join(defaults::KB_DIR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[("HOME", "/home/alice")]));
        assert_eq!(config.root, PathBuf::from("/home/alice/knowledge-base"));
        assert_eq!(config.port, defaults::PORT);
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("HOME", "/home/alice"),
            (env_vars::KB_ROOT, "/srv/notes"),
            (env_vars::PORT, "9000"),
            (env_vars::HOST, "0.0.0.0"),
        ]));
        assert_eq!(config.root, PathBuf::from("/srv/notes"));
        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
    }

    #[test]
    fn test_bad_port_and_missing_home() {
        let config = Config::from_lookup(lookup_from(&[(env_vars::PORT, "not-a-port")]));
        assert_eq!(config.port, defaults::PORT);
        assert_eq!(config.root, PathBuf::from("./knowledge-base"));
    }
}
