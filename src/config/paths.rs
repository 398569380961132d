// src/config/paths.rs

use std::path::{Path, PathBuf};

use crate::config::model::Settings;
use crate::types::TargetKind;

/// Absolute locations of everything the tool manages. Resolved once at
/// startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub env_file: PathBuf,
    pub env_template: PathBuf,
    pub bin_dir: PathBuf,
}

impl ProjectPaths {
    pub fn resolve(root: impl AsRef<Path>, settings: &Settings) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            env_file: root.join(&settings.project.env_file),
            env_template: root.join(&settings.project.env_template),
            bin_dir: root.join(&settings.project.bin_dir),
            root,
        }
    }

    pub fn binary(&self, settings: &Settings, kind: TargetKind) -> PathBuf {
        self.bin_dir.join(&settings.build.target(kind).binary)
    }

    /// The three build targets in build order.
    pub fn build_targets(&self, settings: &Settings) -> Vec<BuildTarget> {
        TargetKind::ALL
            .iter()
            .map(|&kind| {
                let cfg = settings.build.target(kind);
                BuildTarget {
                    kind,
                    name: cfg.binary.clone(),
                    source: cfg.source.clone(),
                    output: self.bin_dir.join(&cfg.binary),
                }
            })
            .collect()
    }
}

/// One compiler invocation: what to build and where to put it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTarget {
    pub kind: TargetKind,
    pub name: String,
    pub source: String,
    pub output: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_relative_to_root() {
        let paths = ProjectPaths::resolve("/srv/proxy", &Settings::default());
        assert_eq!(paths.env_file, PathBuf::from("/srv/proxy/.env"));
        assert_eq!(paths.env_template, PathBuf::from("/srv/proxy/.env.example"));
        assert_eq!(
            paths.binary(&Settings::default(), TargetKind::Admin),
            PathBuf::from("/srv/proxy/bin/aiserve-gpuproxy-admin")
        );
    }

    #[test]
    fn targets_come_out_server_client_admin() {
        let paths = ProjectPaths::resolve("/p", &Settings::default());
        let kinds: Vec<_> = paths
            .build_targets(&Settings::default())
            .into_iter()
            .map(|t| t.kind)
            .collect();
        assert_eq!(kinds, TargetKind::ALL.to_vec());
    }
}
