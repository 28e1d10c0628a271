//! Transport: moving objects and refs between repositories
//!
//! The porcelain consumes transports through the small surface in this
//! module. The one implementation shipped here is the local transport,
//! which serves `file://` URIs and plain filesystem paths; network
//! protocols would slot in next to it.

pub mod local;
pub mod monitor;
pub mod refspec;

use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::transport::local::LocalTransport;
use crate::artifacts::transport::monitor::ProgressMonitor;
use crate::errors::GitError;
use derive_new::new;
use std::collections::HashSet;

/// A ref as advertised by the remote side.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct RemoteRef {
    pub name: String,
    pub oid: ObjectId,
}

/// Everything a fetch learned about the remote.
#[derive(Debug, Clone, Default)]
pub struct FetchResult {
    advertised: Vec<RemoteRef>,
}

impl FetchResult {
    pub fn new(advertised: Vec<RemoteRef>) -> Self {
        FetchResult { advertised }
    }

    pub fn advertised_ref(&self, name: &str) -> Option<&RemoteRef> {
        self.advertised.iter().find(|r| r.name == name)
    }

    pub fn advertised(&self) -> &[RemoteRef] {
        &self.advertised
    }
}

/// Outcome of pushing one ref.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteRefUpdateStatus {
    NotAttempted,
    UpToDate,
    Ok,
    RejectedNoDelete,
    RejectedNonFastForward,
    RejectedRemoteChanged,
    RejectedOtherReason,
}

impl RemoteRefUpdateStatus {
    pub fn is_rejected(&self) -> bool {
        matches!(
            self,
            RemoteRefUpdateStatus::RejectedNoDelete
                | RemoteRefUpdateStatus::RejectedNonFastForward
                | RemoteRefUpdateStatus::RejectedRemoteChanged
                | RemoteRefUpdateStatus::RejectedOtherReason
        )
    }
}

/// One requested ref update and its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRefUpdate {
    /// Local object to push, `None` for a deletion request
    pub new_oid: Option<ObjectId>,
    /// Full name of the ref on the remote side
    pub remote_name: String,
    pub status: RemoteRefUpdateStatus,
}

#[derive(Debug, Clone, Default)]
pub struct PushResult {
    pub updates: Vec<RemoteRefUpdate>,
}

impl PushResult {
    /// A push succeeds iff no per-ref update was rejected.
    pub fn is_successful(&self) -> bool {
        !self.updates.iter().any(|update| update.status.is_rejected())
    }
}

/// A connection to one remote repository.
pub struct Transport {
    local: LocalTransport,
    /// Recorded for parity with the wire protocols; the local transport
    /// spawns no receive-pack process.
    receive_pack_path: Option<String>,
}

impl Transport {
    /// Open a transport for `target`: a configured remote name, a
    /// `file://` URI or a plain filesystem path.
    pub fn open(repository: &Repository, target: &str) -> anyhow::Result<Self> {
        if target.is_empty() {
            return Err(
                GitError::PreconditionFailed("transport target must not be empty".into()).into(),
            );
        }

        let url = repository
            .config()
            .get_string("remote", Some(target), "url")
            .map(str::to_string)
            .unwrap_or_else(|| target.to_string());

        let path = url.strip_prefix("file://").unwrap_or(&url);

        Ok(Transport {
            local: LocalTransport::open(std::path::Path::new(path))?,
            receive_pack_path: None,
        })
    }

    pub fn set_option_receive_pack(&mut self, path: String) {
        self.receive_pack_path = Some(path);
    }

    /// Fetch objects for the wanted refs (all advertised heads when the
    /// want set is empty) into the repository's object database.
    pub fn fetch(
        &self,
        repository: &Repository,
        monitor: &mut dyn ProgressMonitor,
        want: &HashSet<String>,
    ) -> anyhow::Result<FetchResult> {
        self.local.fetch(repository.database(), monitor, want)
    }

    /// Push one local object to one remote ref and report the outcome.
    pub fn push_ref(
        &self,
        repository: &Repository,
        monitor: &mut dyn ProgressMonitor,
        new_oid: Option<ObjectId>,
        remote_name: &str,
    ) -> anyhow::Result<RemoteRefUpdate> {
        let status =
            self.local
                .push_ref(repository.database(), monitor, new_oid.as_ref(), remote_name)?;

        Ok(RemoteRefUpdate {
            new_oid,
            remote_name: remote_name.to_string(),
            status,
        })
    }

    /// Release the connection. The local transport holds no resources;
    /// kept so callers treat every transport uniformly.
    pub fn close(self) {}
}
