use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::SymRefName;
use crate::artifacts::transport::monitor::ProgressMonitor;
use crate::artifacts::transport::refspec::RefSpec;
use crate::artifacts::transport::{FetchResult, RemoteRef, Transport};
use crate::errors::GitError;
use std::collections::HashSet;

impl Repository {
    /// `remote add` half of clone: record the remote's url, its fetch
    /// refspec(s) and the upstream configuration for `branch_name`.
    pub fn add_remote(
        &self,
        remote_name: &str,
        uri: &str,
        branch_name: &str,
        all_selected: bool,
        selected_branches: &[String],
    ) -> anyhow::Result<()> {
        if branch_name.is_empty() {
            return Err(
                GitError::PreconditionFailed("branch name must not be empty".into()).into(),
            );
        }

        let wildcard = RefSpec::wildcard_for_remote(remote_name);

        {
            let mut config = self.config_mut();
            config.set_string("remote", Some(remote_name), "url", uri);

            if all_selected {
                config.add_string(
                    "remote",
                    Some(remote_name),
                    "fetch",
                    &wildcard.to_string(),
                );
            } else {
                for branch in selected_branches {
                    let source = format!("refs/heads/{}", branch);
                    if let Some(destination) = wildcard.expand_from_source(&source) {
                        let expanded = RefSpec::new(true, source, destination);
                        config.add_string(
                            "remote",
                            Some(remote_name),
                            "fetch",
                            &expanded.to_string(),
                        );
                    }
                }
            }
            config.save()?;

            config.set_string("branch", Some(branch_name), "remote", remote_name);
            config.set_string(
                "branch",
                Some(branch_name),
                "merge",
                &format!("refs/heads/{}", branch_name),
            );
            config.save()?;
        }

        Ok(())
    }

    /// `fetch`: pull missing objects from a remote (by configured name or
    /// uri) and update the tracking refs its fetch refspecs name.
    pub async fn fetch(
        &self,
        target: &str,
        want: HashSet<String>,
        monitor: &mut dyn ProgressMonitor,
    ) -> anyhow::Result<FetchResult> {
        if target.is_empty() {
            return Err(
                GitError::PreconditionFailed("fetch target must not be empty".into()).into(),
            );
        }

        let transport = Transport::open(self, target)?;
        let result = transport.fetch(self, monitor, &want);
        transport.close();
        let result = result?;

        self.apply_fetch_refspecs(target, &result)?;

        Ok(result)
    }

    /// Map every advertised ref through the remote's fetch refspecs and
    /// force-update the local tracking refs.
    fn apply_fetch_refspecs(&self, remote_name: &str, result: &FetchResult) -> anyhow::Result<()> {
        let specs = self
            .config()
            .get_all("remote", Some(remote_name), "fetch")
            .iter()
            .map(|raw| RefSpec::parse(raw))
            .collect::<anyhow::Result<Vec<_>>>()?;

        for advertised in result.advertised() {
            for spec in &specs {
                if let Some(destination) = spec.expand_from_source(&advertised.name) {
                    self.refs()
                        .update_ref(SymRefName::new(destination))
                        .set_new_object_id(advertised.oid.clone())
                        .force_update()?;
                }
            }
        }

        Ok(())
    }

    /// Fetch from `remote_name` and detect the remote's head, for clone.
    pub(crate) async fn fetch_and_detect_head(
        &self,
        remote_name: &str,
        monitor: &mut dyn ProgressMonitor,
    ) -> anyhow::Result<Option<RemoteRef>> {
        let result = self.fetch(remote_name, HashSet::new(), monitor).await?;
        Ok(guess_head(&result))
    }
}

/// Prefer the advertised HEAD when a branch under `refs/heads/` carries
/// the same object; fall back to the advertised HEAD as-is. Candidate
/// branches are considered in stable ref-name order.
fn guess_head(result: &FetchResult) -> Option<RemoteRef> {
    let id_head = result.advertised_ref("HEAD");

    let mut available_refs = result
        .advertised()
        .iter()
        .filter(|advertised| advertised.name.starts_with("refs/heads/"))
        .collect::<Vec<_>>();
    available_refs.sort_by(|a, b| a.name.cmp(&b.name));

    let mut head = None;
    for advertised in available_refs {
        if let Some(id_head) = id_head
            && head.is_none()
            && advertised.oid == id_head.oid
        {
            head = Some(advertised.clone());
        }
    }

    match (id_head, head) {
        (_, Some(head)) => Some(head),
        (Some(id_head), None) => Some(id_head.clone()),
        (None, None) => None,
    }
}
