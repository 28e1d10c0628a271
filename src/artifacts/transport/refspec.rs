//! Refspecs: mapping source refs to destination refs for fetch and push
//!
//! `+refs/heads/*:refs/remotes/origin/*` — the optional leading `+` forces
//! the update, a trailing `*` on both sides makes the spec a wildcard.

use anyhow::Context;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefSpec {
    force: bool,
    source: String,
    destination: String,
}

impl RefSpec {
    pub fn new(force: bool, source: impl Into<String>, destination: impl Into<String>) -> Self {
        RefSpec {
            force,
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// The forced wildcard spec used for a freshly added remote.
    pub fn wildcard_for_remote(remote_name: &str) -> Self {
        RefSpec::new(
            true,
            "refs/heads/*",
            format!("refs/remotes/{}/*", remote_name),
        )
    }

    pub fn parse(spec: &str) -> anyhow::Result<Self> {
        let (force, spec) = match spec.strip_prefix('+') {
            Some(rest) => (true, rest),
            None => (false, spec),
        };

        let (source, destination) = spec
            .split_once(':')
            .with_context(|| format!("malformed refspec: {}", spec))?;

        let wildcard_sides = [source, destination]
            .iter()
            .filter(|side| side.ends_with("/*"))
            .count();
        if wildcard_sides == 1 {
            anyhow::bail!("refspec must be wildcard on both sides or neither: {}", spec);
        }

        Ok(RefSpec::new(force, source, destination))
    }

    pub fn is_forced(&self) -> bool {
        self.force
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn matches_source(&self, ref_name: &str) -> bool {
        match self.source.strip_suffix('*') {
            Some(prefix) => ref_name.starts_with(prefix),
            None => ref_name == self.source,
        }
    }

    /// Map a concrete source ref through the spec, expanding wildcards.
    pub fn expand_from_source(&self, ref_name: &str) -> Option<String> {
        if !self.matches_source(ref_name) {
            return None;
        }

        match self.source.strip_suffix('*') {
            Some(prefix) => {
                let suffix = &ref_name[prefix.len()..];
                Some(format!(
                    "{}{}",
                    self.destination.trim_end_matches('*'),
                    suffix
                ))
            }
            None => Some(self.destination.clone()),
        }
    }
}

impl std::fmt::Display for RefSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let force = if self.force { "+" } else { "" };
        write!(f, "{}{}:{}", force, self.source, self.destination)
    }
}
