use std::env;
use std::path::PathBuf;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "PORT";
    pub const BIND_HOST: &str = "NOTES_BIND_HOST";
    /// Path of the JSON document holding every note
    pub const DATA_FILE: &str = "NOTES_DATA_FILE";
    /// Directory served at `/` when it exists
    pub const PUBLIC_DIR: &str = "NOTES_PUBLIC_DIR";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 3000;
    pub const BIND_HOST: &str = "0.0.0.0";
    pub const DATA_FILE: &str = "data.json";
    pub const PUBLIC_DIR: &str = "public";
}

/// Returns the absolute path to the notes-backend directory.
/// Uses CARGO_MANIFEST_DIR at compile time, so relative defaults resolve
/// the same way regardless of the working directory at runtime.
pub fn backend_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub bind_host: String,
    pub data_file: PathBuf,
    pub public_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup (the environment in production)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup(env_vars::PORT)
            .unwrap_or_else(|| defaults::PORT.to_string())
            .parse()
            .expect("PORT must be a valid number");

        Self {
            port,
            bind_host: lookup(env_vars::BIND_HOST)
                .unwrap_or_else(|| defaults::BIND_HOST.to_string()),
            data_file: lookup(env_vars::DATA_FILE)
                .map(PathBuf::from)
                .unwrap_or_else(|| backend_dir().join(defaults::DATA_FILE)),
            public_dir: lookup(env_vars::PUBLIC_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|| backend_dir().join(defaults::PUBLIC_DIR)),
        }
    }

    /// Config rooted in a scratch directory, for handler tests
    #[cfg(test)]
    pub fn for_data_dir(dir: &std::path::Path) -> Self {
        Self {
            port: 0,
            bind_host: "127.0.0.1".to_string(),
            data_file: dir.join(defaults::DATA_FILE),
            public_dir: dir.join(defaults::PUBLIC_DIR),
        }
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
        let config = Config::from_lookup(lookup_from(&[]));
        assert_eq!(config.port, 3000);
        assert_eq!(config.bind_host, "0.0.0.0");
        assert_eq!(config.data_file, backend_dir().join("data.json"));
        assert_eq!(config.public_dir, backend_dir().join("public"));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "8081"),
            ("NOTES_BIND_HOST", "127.0.0.1"),
            ("NOTES_DATA_FILE", "/tmp/notes/data.json"),
            ("NOTES_PUBLIC_DIR", "/srv/notes"),
        ]));
        assert_eq!(config.port, 8081);
        assert_eq!(config.bind_host, "127.0.0.1");
        assert_eq!(config.data_file, PathBuf::from("/tmp/notes/data.json"));
        assert_eq!(config.public_dir, PathBuf::from("/srv/notes"));
    }

    #[test]
    #[should_panic(expected = "PORT must be a valid number")]
    fn test_invalid_port_panics() {
        Config::from_lookup(lookup_from(&[("PORT", "not-a-port")]));
    }
}
