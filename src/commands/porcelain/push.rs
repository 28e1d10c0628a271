use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::SymRefName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::transport::monitor::ProgressMonitor;
use crate::artifacts::transport::refspec::RefSpec;
use crate::artifacts::transport::{PushResult, Transport};
use crate::errors::GitError;
use std::io::Write;

impl Repository {
    /// `push`: send commits to a remote and move its refs.
    ///
    /// Returns `false` iff at least one per-ref update was rejected
    /// (non-fast-forward, denied deletion, a remote that moved, or any
    /// other refusal); `true` otherwise.
    #[allow(clippy::too_many_arguments)]
    pub async fn push(
        &self,
        monitor: &mut dyn ProgressMonitor,
        target: &str,
        local_branch: &str,
        remote_branch: &str,
        push_all_branches: bool,
        _push_tags: bool,
        receive_pack_path: Option<String>,
    ) -> anyhow::Result<bool> {
        let mut transport = Transport::open(self, target)?;
        if let Some(path) = receive_pack_path {
            transport.set_option_receive_pack(path);
        }

        let mut requested: Vec<(Option<ObjectId>, String)> = Vec::new();

        if push_all_branches {
            for (name, oid) in self.refs().list_heads()? {
                requested.push((Some(oid), name.as_ref_path().to_string()));
            }
        } else {
            let local_oid = self
                .resolve(local_branch)?
                .ok_or_else(|| GitError::RefNotResolvable(local_branch.to_string()))?;
            let destination = if remote_branch.starts_with("refs/") {
                remote_branch.to_string()
            } else {
                format!("refs/heads/{}", remote_branch)
            };
            requested.push((Some(local_oid), destination));
        }

        let mut result = PushResult::default();
        for (new_oid, remote_name) in requested {
            let update = transport.push_ref(self, monitor, new_oid, &remote_name)?;

            writeln!(
                self.writer(),
                "{} -> {:?}",
                update.remote_name,
                update.status
            )?;

            result.updates.push(update);
        }
        transport.close();

        self.update_tracking_refs(target, &result)?;

        Ok(result.is_successful())
    }

    /// After a successful per-ref update the matching tracking ref under
    /// `refs/remotes/<target>/` follows, mirroring what a fetch would see.
    fn update_tracking_refs(&self, target: &str, result: &PushResult) -> anyhow::Result<()> {
        let specs = self
            .config()
            .get_all("remote", Some(target), "fetch")
            .iter()
            .map(|raw| RefSpec::parse(raw))
            .collect::<anyhow::Result<Vec<_>>>()?;

        for update in &result.updates {
            if update.status.is_rejected() {
                continue;
            }
            let Some(new_oid) = &update.new_oid else {
                continue;
            };

            for spec in &specs {
                if let Some(tracking) = spec.expand_from_source(&update.remote_name) {
                    self.refs()
                        .update_ref(SymRefName::new(tracking))
                        .set_new_object_id(new_oid.clone())
                        .force_update()?;
                }
            }
        }

        Ok(())
    }
}
