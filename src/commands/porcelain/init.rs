use crate::areas::repository::Repository;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// `init`: create the repository and report where it landed.
    pub fn init_command(
        work_dir: &Path,
        writer: Box<dyn std::io::Write>,
    ) -> anyhow::Result<Self> {
        let repository = Self::init_at(work_dir, writer)?;

        writeln!(
            repository.writer(),
            "Initialized empty Git repository in {}",
            repository.git_dir().display()
        )?;

        Ok(repository)
    }
}
