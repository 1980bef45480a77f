use std::fs::read_to_string;

use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` overrides `env_filter`.
pub fn set_log(env_filter: String) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new(env_filter)))
        .compact()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Reads `<name>.toml` (or `path`), then `/etc/codecpref/<name>.toml`.
///
/// A missing file gives the defaults; a file that does not parse is logged and
/// also gives the defaults.
pub fn load<T>(name: String, path: Option<String>) -> T
where
    T: serde::de::DeserializeOwned + std::default::Default,
{
    let path = path.unwrap_or(format!("{name}.toml"));
    let result = read_to_string(&path)
        .or(read_to_string(format!("/etc/codecpref/{name}.toml")))
        .unwrap_or_else(|_| {
            debug!("no config found at {}, using defaults", path);
            "".to_string()
        });
    match toml::from_str(result.as_str()) {
        Ok(cfg) => cfg,
        Err(err) => {
            error!("config load error: {}", err);
            Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde::Deserialize;

    use super::load;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Sample {
        #[serde(default)]
        level: String,
        #[serde(default)]
        ids: Vec<String>,
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "level = \"debug\"\nids = [\"a\", \"b\"]").unwrap();
        let cfg: Sample = load(
            "sample".to_string(),
            Some(file.path().to_str().unwrap().to_string()),
        );
        assert_eq!(cfg.level, "debug");
        assert_eq!(cfg.ids, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_load_invalid_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "level = [").unwrap();
        let cfg: Sample = load(
            "sample".to_string(),
            Some(file.path().to_str().unwrap().to_string()),
        );
        assert_eq!(cfg, Sample::default());
    }

    #[test]
    fn test_load_missing_file() {
        let cfg: Sample = load(
            "codecpref-missing".to_string(),
            Some("/nonexistent/codecpref-missing.toml".to_string()),
        );
        assert_eq!(cfg, Sample::default());
    }
}
