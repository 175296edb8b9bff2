use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

/// Environment variables read from `.env` files.
#[derive(Debug, Default)]
pub(crate) struct EnvFile {
    envs: HashMap<String, String>,
    failures: Vec<(PathBuf, dotenvy::Error)>,
}

impl EnvFile {
    /// Reads `.env` and then `.env.local` from `dir`.
    ///
    /// Later files override earlier ones, variables already set in the process are never
    /// overridden.
    pub fn load<P>(dir: P) -> Self
    where
        P: AsRef<Path>,
    {
        let dir = dir.as_ref();
        let mut loaded = Self::default();

        for env_name in [".env", ".env.local"] {
            let path = dir.join(env_name);
            if !path.exists() {
                continue;
            }

            if let Err(e) = dotenvy::from_path_iter(&path).and_then(|m| {
                for i in m {
                    let (k, v) = i?;
                    if env::var_os(&k).is_some() {
                        // environment variables inherited from current process have a higher
                        // priority.
                        continue;
                    }

                    loaded.envs.insert(k, v);
                }

                Ok(())
            }) {
                loaded.failures.push((path, e));
            }
        }

        loaded
    }

    #[cfg(test)]
    fn get(&self, key: &str) -> Option<&str> {
        self.envs.get(key).map(String::as_str)
    }

    /// Exports the loaded variables into the current process.
    pub fn apply(&self) {
        for (k, v) in self.envs.iter() {
            env::set_var(k, v);
        }
    }

    /// Logs files that failed to load.
    ///
    /// Loading happens before tracing is initialised, so failures are kept until now.
    pub fn report(&self) {
        for (path, e) in self.failures.iter() {
            tracing::warn!(path = %path.display(), reason = ?e, "failed to load environment file");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_local_overrides() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(".env"),
            "TIMECHECK_TEST_ENV_A=base\nTIMECHECK_TEST_ENV_B=base\n",
        )
        .unwrap();
        fs::write(dir.path().join(".env.local"), "TIMECHECK_TEST_ENV_B=local\n").unwrap();

        let loaded = EnvFile::load(dir.path());

        assert_eq!(loaded.get("TIMECHECK_TEST_ENV_A"), Some("base"));
        assert_eq!(loaded.get("TIMECHECK_TEST_ENV_B"), Some("local"));
        assert!(loaded.failures.is_empty());
    }

    #[test]
    fn test_process_env_wins() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".env"), "PATH=/nowhere\n").unwrap();

        let loaded = EnvFile::load(dir.path());

        assert_eq!(loaded.get("PATH"), None);
    }

    #[test]
    fn test_failures_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".env"), "NOT A VALID LINE\n").unwrap();

        let loaded = EnvFile::load(dir.path());

        assert_eq!(loaded.failures.len(), 1);
    }

    #[test]
    fn test_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = EnvFile::load(dir.path());

        assert!(loaded.envs.is_empty());
        assert!(loaded.failures.is_empty());
    }
}
