use super::reader::ArchiveReader;
use anyhow::{Result, bail};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// An export held entirely in memory. Used by tests and by callers that
/// unpack their container format themselves.
#[derive(Default)]
pub struct MemoryReader {
    members: BTreeMap<String, String>,
}

impl MemoryReader {
    pub fn new<N, C, I>(members: I) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: Into<String>,
    {
        Self {
            members: members
                .into_iter()
                .map(|(n, c)| (n.into(), c.into()))
                .collect(),
        }
    }
}

#[async_trait]
impl ArchiveReader for MemoryReader {
    fn member_names(&self) -> Vec<String> {
        self.members.keys().cloned().collect()
    }

    async fn read_text(&self, name: &str) -> Result<String> {
        match self.members.get(name) {
            Some(content) => Ok(content.clone()),
            None => bail!("no such member: {name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_known_member_round_trips() {
        let reader = MemoryReader::new([("steps-2024-01-01.json", "[]")]);
        assert_eq!(reader.member_names(), vec!["steps-2024-01-01.json"]);
        assert_eq!(reader.read_text("steps-2024-01-01.json").await.unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_unknown_member_is_an_error() {
        let reader = MemoryReader::new([("steps-2024-01-01.json", "[]")]);
        assert!(reader.read_text("steps-2024-01-02.json").await.is_err());
    }
}
