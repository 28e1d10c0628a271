use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::SymRefName;
use crate::artifacts::transport::monitor::ProgressMonitor;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// `clone`: init + add remote + fetch + checkout of the detected
    /// head. When the detected head is a branch, HEAD is left symbolic on
    /// it; a bare advertised HEAD produces a detached checkout.
    pub async fn clone_from(
        work_dir: &Path,
        remote_name: &str,
        uri: &str,
        branch: &str,
        monitor: &mut dyn ProgressMonitor,
        writer: Box<dyn std::io::Write>,
    ) -> anyhow::Result<Self> {
        let repository = Self::init_at(work_dir, writer)?;

        repository.add_remote(remote_name, uri, branch, true, &[])?;

        let head = repository
            .fetch_and_detect_head(remote_name, monitor)
            .await?;

        if let Some(head) = head {
            if head.name.starts_with("refs/") {
                repository
                    .refs()
                    .write_symref(&SymRefName::head(), &SymRefName::new(head.name.clone()))?;
            }
            repository.checkout_commit(&head.oid, monitor).await?;
        }

        writeln!(
            repository.writer(),
            "Cloned {} into {}",
            uri,
            repository.path().display()
        )?;

        Ok(repository)
    }
}
