use anyhow::Result;
use async_trait::async_trait;

/// Access to the members of an export bundle.
///
/// The pipeline only needs a member-name listing and text retrieval by
/// name; how the bundle is stored (extracted directory, zip, remote
/// object store) is the caller's concern.
#[async_trait]
pub trait ArchiveReader: Send + Sync {
    /// Names of all members in the bundle.
    fn member_names(&self) -> Vec<String>;

    /// Retrieves one member's content as text. Single attempt, no retry.
    async fn read_text(&self, name: &str) -> Result<String>;
}
