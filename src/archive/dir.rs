use super::reader::ArchiveReader;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads an export that has been extracted to a directory on disk.
///
/// Member names are paths relative to the root, so nested layouts like
/// `Takeout/Fitbit/Global Export Data/steps-2024-01-01.json` work as-is.
pub struct DirReader {
    root: PathBuf,
    members: Vec<String>,
}

impl DirReader {
    /// Scans `root` recursively and records every file as a member.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let mut members = Vec::new();
        collect_members(&root, &root, &mut members)
            .with_context(|| format!("scanning export directory {}", root.display()))?;
        members.sort();
        Ok(Self { root, members })
    }
}

fn collect_members(root: &Path, dir: &Path, out: &mut Vec<String>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_members(root, &path, out)?;
        } else if let Ok(rel) = path.strip_prefix(root) {
            out.push(rel.to_string_lossy().into_owned());
        }
    }
    Ok(())
}

#[async_trait]
impl ArchiveReader for DirReader {
    fn member_names(&self) -> Vec<String> {
        self.members.clone()
    }

    async fn read_text(&self, name: &str) -> Result<String> {
        let path = self.root.join(name);
        tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("reading {}", path.display()))
    }
}
