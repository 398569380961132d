// src/env/flows.rs

//! Interactive sub-flows of the `--env` step.
//!
//! Collecting answers and writing them are separate: `collect` talks to the
//! [`Prompter`] and returns a value object, `apply` upserts it into the env
//! file.

use std::path::Path;

use crate::config::ProviderConfig;
use crate::env::file::upsert_env_var;
use crate::errors::Result;
use crate::fs::FileSystem;
use crate::types::DatabaseKind;
use crate::ui::{ask_or_default, Prompter};

/// Database connection settings chosen by the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseSettings {
    Postgres {
        host: String,
        port: String,
        user: String,
        password: String,
        name: String,
    },
    Sqlite {
        file: String,
    },
}

impl DatabaseSettings {
    pub async fn collect(prompter: &dyn Prompter) -> Result<Self> {
        let kind: DatabaseKind = ask_or_default(prompter, "Database type (postgres/sqlite)", "postgres")
            .await?
            .parse()
            .unwrap_or(DatabaseKind::Postgres);

        match kind {
            DatabaseKind::Postgres => Ok(DatabaseSettings::Postgres {
                host: ask_or_default(prompter, "Database host", "localhost").await?,
                port: ask_or_default(prompter, "Database port", "5432").await?,
                user: ask_or_default(prompter, "Database user", "postgres").await?,
                password: ask_or_default(prompter, "Database password", "changeme").await?,
                name: ask_or_default(prompter, "Database name", "gpuproxy").await?,
            }),
            DatabaseKind::Sqlite => Ok(DatabaseSettings::Sqlite {
                file: ask_or_default(prompter, "SQLite database file", "./gpuproxy.db").await?,
            }),
        }
    }

    pub fn kind(&self) -> DatabaseKind {
        match self {
            DatabaseSettings::Postgres { .. } => DatabaseKind::Postgres,
            DatabaseSettings::Sqlite { .. } => DatabaseKind::Sqlite,
        }
    }

    /// Keys written for this choice, in write order.
    pub fn env_pairs(&self) -> Vec<(&'static str, String)> {
        let kind = self.kind().as_str().to_string();
        match self {
            DatabaseSettings::Postgres {
                host,
                port,
                user,
                password,
                name,
            } => vec![
                ("DB_TYPE", kind),
                ("DB_HOST", host.clone()),
                ("DB_PORT", port.clone()),
                ("DB_USER", user.clone()),
                ("DB_PASSWORD", password.clone()),
                ("DB_NAME", name.clone()),
            ],
            DatabaseSettings::Sqlite { file } => vec![("DB_TYPE", kind), ("DB_NAME", file.clone())],
        }
    }

    /// Upsert each key separately; every key is its own full rewrite.
    pub fn apply(&self, fs: &dyn FileSystem, env_path: &Path) -> Result<()> {
        for (key, value) in self.env_pairs() {
            upsert_env_var(fs, env_path, key, &value)?;
        }
        Ok(())
    }
}

/// Provider API keys entered by the operator. Skipped providers are absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProviderKeys {
    pub entries: Vec<(String, String)>,
}

impl ProviderKeys {
    pub async fn collect(prompter: &dyn Prompter, providers: &[ProviderConfig]) -> Result<Self> {
        let mut entries = Vec::new();
        for provider in providers {
            let value = prompter.ask(&format!("{} API key: ", provider.label)).await?;
            let value = value.trim();
            if !value.is_empty() {
                entries.push((provider.env_key.clone(), value.to_string()));
            }
        }
        Ok(Self { entries })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn apply(&self, fs: &dyn FileSystem, env_path: &Path) -> Result<()> {
        for (key, value) in &self.entries {
            upsert_env_var(fs, env_path, key, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::default_providers;
    use crate::fs::mock::MockFileSystem;
    use crate::ui::test_support::answers;

    #[tokio::test]
    async fn postgres_defaults_fill_empty_answers() {
        let settings = DatabaseSettings::collect(&answers(&["", "", "6543", "", "", ""]))
            .await
            .unwrap();
        assert_eq!(
            settings,
            DatabaseSettings::Postgres {
                host: "localhost".into(),
                port: "6543".into(),
                user: "postgres".into(),
                password: "changeme".into(),
                name: "gpuproxy".into(),
            }
        );
        let keys: Vec<_> = settings.env_pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["DB_TYPE", "DB_HOST", "DB_PORT", "DB_USER", "DB_PASSWORD", "DB_NAME"]);
    }

    #[tokio::test]
    async fn sqlite_writes_exactly_two_keys() {
        let fs = MockFileSystem::new();
        let path = Path::new("/p/.env");
        fs.add_file(path, "DB_TYPE=postgres\nDB_HOST=localhost\n");

        let settings = DatabaseSettings::collect(&answers(&["sqlite", ""])).await.unwrap();
        settings.apply(&fs, path).unwrap();

        assert_eq!(
            fs.contents(path).unwrap(),
            "DB_TYPE=sqlite\nDB_HOST=localhost\nDB_NAME=./gpuproxy.db\n"
        );
        assert_eq!(fs.writes_to(path), 2);
    }

    #[tokio::test]
    async fn blank_provider_key_leaves_existing_value() {
        let fs = MockFileSystem::new();
        let path = Path::new("/p/.env");
        fs.add_file(path, "VASTAI_API_KEY=keep-me\n");

        let keys = ProviderKeys::collect(&answers(&["", "io-123"]), &default_providers())
            .await
            .unwrap();
        assert_eq!(keys.entries, vec![("IONET_API_KEY".to_string(), "io-123".to_string())]);

        keys.apply(&fs, path).unwrap();
        assert_eq!(
            fs.contents(path).unwrap(),
            "VASTAI_API_KEY=keep-me\nIONET_API_KEY=io-123\n"
        );
    }
}
