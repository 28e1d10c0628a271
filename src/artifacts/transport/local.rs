//! Local transport (file URIs and plain paths)
//!
//! Talks to another repository on the same filesystem: refs are read from
//! its ref files, objects are copied loose-to-loose in their compressed
//! form, and pushed refs are written under the remote's lock discipline.

use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::artifacts::index::lockfile::{LockError, Lockfile};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::transport::monitor::ProgressMonitor;
use crate::artifacts::transport::{FetchResult, RemoteRef, RemoteRefUpdateStatus};
use crate::errors::GitError;
use std::collections::HashSet;
use std::path::Path;

const GIT_DIR: &str = ".git";

pub struct LocalTransport {
    remote_database: Database,
    remote_refs: Refs,
}

impl LocalTransport {
    pub fn open(remote_work_dir: &Path) -> anyhow::Result<Self> {
        let git_dir = remote_work_dir.join(GIT_DIR);
        if !git_dir.exists() {
            return Err(GitError::TransportFailure(format!(
                "{} is not a git repository",
                remote_work_dir.display()
            ))
            .into());
        }

        Ok(LocalTransport {
            remote_database: Database::new(git_dir.join("objects").into_boxed_path()),
            remote_refs: Refs::new(git_dir.into_boxed_path()),
        })
    }

    /// HEAD plus all branch heads, branch refs sorted by name.
    pub fn advertised_refs(&self) -> anyhow::Result<Vec<RemoteRef>> {
        let mut advertised = Vec::new();

        if let Some(head_oid) = self.remote_refs.read_head()? {
            advertised.push(RemoteRef::new("HEAD".to_string(), head_oid));
        }

        for (name, oid) in self.remote_refs.list_heads()? {
            advertised.push(RemoteRef::new(name.as_ref_path().to_string(), oid));
        }

        Ok(advertised)
    }

    /// Copy all objects reachable from the wanted tips (all advertised
    /// refs when `want` is empty) into `local` and report the advertised
    /// refs.
    pub fn fetch(
        &self,
        local: &Database,
        monitor: &mut dyn ProgressMonitor,
        want: &HashSet<String>,
    ) -> anyhow::Result<FetchResult> {
        let advertised = self.advertised_refs()?;

        let tips = advertised
            .iter()
            .filter(|remote_ref| want.is_empty() || want.contains(&remote_ref.name))
            .map(|remote_ref| remote_ref.oid.clone())
            .collect::<Vec<_>>();

        self.copy_objects(&self.remote_database, local, &tips, monitor)?;

        Ok(FetchResult::new(advertised))
    }

    /// Update one remote ref, fast-forward only. The remote's `.lock`
    /// discipline guards against concurrent receivers; a ref that moved
    /// between read and lock is reported as `RejectedRemoteChanged`.
    pub fn push_ref(
        &self,
        local: &Database,
        monitor: &mut dyn ProgressMonitor,
        new_oid: Option<&ObjectId>,
        remote_name: &str,
    ) -> anyhow::Result<RemoteRefUpdateStatus> {
        let new_oid = match new_oid {
            // the local transport refuses deletion requests
            None => return Ok(RemoteRefUpdateStatus::RejectedNoDelete),
            Some(oid) => oid,
        };

        let old_oid = self.remote_refs.read_ref(remote_name)?;

        if old_oid.as_ref() == Some(new_oid) {
            return Ok(RemoteRefUpdateStatus::UpToDate);
        }

        // ship the objects first so the ancestry check below sees the new
        // commit on the remote side
        self.copy_objects(
            local,
            &self.remote_database,
            std::slice::from_ref(new_oid),
            monitor,
        )?;

        if let Some(old) = &old_oid
            && !Self::is_ancestor(&self.remote_database, old, new_oid)?
        {
            return Ok(RemoteRefUpdateStatus::RejectedNonFastForward);
        }

        let ref_path = self.remote_refs.heads_path().join(
            remote_name
                .strip_prefix("refs/heads/")
                .unwrap_or(remote_name),
        );

        let mut lock = match Lockfile::acquire(&ref_path) {
            Ok(lock) => lock,
            Err(LockError::Held(_)) => return Ok(RemoteRefUpdateStatus::RejectedOtherReason),
            Err(LockError::Io(err)) => {
                return Err(GitError::TransportFailure(err.to_string()).into());
            }
        };

        // re-read under the lock: the ref may have moved since we decided
        if self.remote_refs.read_ref(remote_name)? != old_oid {
            return Ok(RemoteRefUpdateStatus::RejectedRemoteChanged);
        }

        lock.write_all(new_oid.as_ref().as_bytes())?;
        lock.write_all(b"\n")?;
        lock.commit()?;

        Ok(RemoteRefUpdateStatus::Ok)
    }

    fn copy_objects(
        &self,
        from: &Database,
        to: &Database,
        tips: &[ObjectId],
        monitor: &mut dyn ProgressMonitor,
    ) -> anyhow::Result<()> {
        let closure = from.reachable_closure(tips)?;

        monitor.begin_task("Copying objects", closure.len());

        for (completed, oid) in closure.iter().enumerate() {
            if monitor.is_cancelled() {
                return Err(GitError::TransportFailure("cancelled".to_string()).into());
            }

            if !to.contains(oid) {
                to.write_raw(oid, from.read_raw(oid)?)?;
            }
            monitor.update(completed + 1);
        }

        monitor.end_task();

        Ok(())
    }

    /// Walk `tip`'s parent chains looking for `ancestor`.
    fn is_ancestor(
        database: &Database,
        ancestor: &ObjectId,
        tip: &ObjectId,
    ) -> anyhow::Result<bool> {
        let mut seen = HashSet::new();
        let mut queue = vec![tip.clone()];

        while let Some(oid) = queue.pop() {
            if &oid == ancestor {
                return Ok(true);
            }
            if !seen.insert(oid.clone()) {
                continue;
            }

            match database.parse_object_as_commit(&oid)? {
                Some(commit) => queue.extend(commit.parents().iter().cloned()),
                // the old remote tip is not even a commit we know
                None => return Ok(false),
            }
        }

        Ok(false)
    }
}
