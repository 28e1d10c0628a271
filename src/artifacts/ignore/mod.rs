//! Ignore rules (`.gitignore`)
//!
//! A layered matcher: starting from the directory containing the path
//! under test, every `.gitignore` up to the work-tree root is consulted.
//! Within one file, later lines override earlier ones; a `!` pattern
//! flips a match back to "included". The first level that produces a
//! verdict wins.
//!
//! Supported pattern grammar per line:
//! - blank lines and `#` comments match nothing;
//! - a leading `!` negates the pattern;
//! - a leading `/` anchors the pattern to the file's containing directory;
//! - a pattern containing `/` is likewise matched against the path
//!   relative to the containing directory;
//! - any other pattern is matched against the basename or any directory
//!   segment of the path;
//! - shell globs `*`, `?` and `[...]` are honoured (`*` and `?` never
//!   match a `/`);
//! - a trailing `/` restricts the pattern to directories.
//!
//! TODO: honour `.git/info/exclude` and `core.excludesfile` as additional,
//! lower-precedence layers.

use crate::errors::GitError;
use std::path::Path;

const GITIGNORE_FILE: &str = ".gitignore";

/// One parsed `.gitignore` line.
#[derive(Debug, Clone)]
struct Pattern {
    negated: bool,
    anchored: bool,
    dir_only: bool,
    matcher: regex::Regex,
}

impl Pattern {
    /// Parse a single line; comments and blank lines yield `None`.
    fn parse(line: &str) -> anyhow::Result<Option<Self>> {
        let mut pattern = line.trim();

        if pattern.is_empty() || pattern.starts_with('#') {
            return Ok(None);
        }

        let negated = pattern.starts_with('!');
        if negated {
            pattern = &pattern[1..];
        }

        let dir_only = pattern.ends_with('/');
        if dir_only {
            pattern = pattern.trim_end_matches('/');
        }

        let anchored = pattern.starts_with('/');
        if anchored {
            pattern = &pattern[1..];
        }
        // an embedded slash anchors the pattern to the containing directory
        let anchored = anchored || pattern.contains('/');

        if pattern.is_empty() {
            return Ok(None);
        }

        Ok(Some(Pattern {
            negated,
            anchored,
            dir_only,
            matcher: Self::translate_glob(pattern)?,
        }))
    }

    /// Translate the glob into an anchored regex. `*` and `?` stop at path
    /// separators; `[...]` classes pass through.
    fn translate_glob(glob: &str) -> anyhow::Result<regex::Regex> {
        let mut translated = String::with_capacity(glob.len() + 8);
        translated.push('^');

        let mut chars = glob.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '*' => translated.push_str("[^/]*"),
                '?' => translated.push_str("[^/]"),
                '[' => {
                    translated.push('[');
                    if chars.peek() == Some(&'!') {
                        chars.next();
                        translated.push('^');
                    }
                    for inner in chars.by_ref() {
                        if inner == ']' {
                            break;
                        }
                        if regex_syntax_char(inner) {
                            translated.push('\\');
                        }
                        translated.push(inner);
                    }
                    translated.push(']');
                }
                c if regex_syntax_char(c) => {
                    translated.push('\\');
                    translated.push(c);
                }
                c => translated.push(c),
            }
        }

        translated.push('$');
        regex::Regex::new(&translated)
            .map_err(|err| anyhow::anyhow!("invalid ignore pattern '{}': {}", glob, err))
    }

    /// Test against `relative`, the path of the candidate relative to the
    /// directory containing the `.gitignore` file. A matched directory
    /// covers everything underneath it.
    fn matches(&self, relative: &Path, is_dir: bool) -> bool {
        let segments = relative
            .components()
            .filter_map(|component| component.as_os_str().to_str())
            .collect::<Vec<_>>();

        if self.anchored {
            // try every component-boundary prefix: a proper prefix is a
            // directory by construction
            let mut prefix = String::new();
            for (i, segment) in segments.iter().enumerate() {
                if i > 0 {
                    prefix.push('/');
                }
                prefix.push_str(segment);

                if self.matcher.is_match(&prefix) {
                    let is_last = i == segments.len() - 1;
                    if !is_last || !self.dir_only || is_dir {
                        return true;
                    }
                }
            }
            return false;
        }

        // unanchored: the basename, or any directory segment along the path
        segments.iter().enumerate().any(|(i, segment)| {
            let is_last = i == segments.len() - 1;
            self.matcher.is_match(segment) && (!is_last || !self.dir_only || is_dir)
        })
    }
}

fn regex_syntax_char(c: char) -> bool {
    matches!(
        c,
        '.' | '+' | '(' | ')' | '|' | '^' | '$' | '{' | '}' | '\\'
    )
}

/// Layered ignore matcher for one work tree.
#[derive(Debug)]
pub struct IgnoreRules {
    work_dir: Box<Path>,
}

impl IgnoreRules {
    pub fn new(work_dir: Box<Path>) -> Self {
        IgnoreRules { work_dir }
    }

    /// Decide whether the absolute path `to_check_for` is ignored by any
    /// `.gitignore` between its directory and the work-tree root.
    pub fn is_ignored(&self, to_check_for: &Path) -> anyhow::Result<bool> {
        if !to_check_for.starts_with(self.work_dir.as_ref()) {
            return Err(GitError::PreconditionFailed(format!(
                "{} is outside the working directory",
                to_check_for.display()
            ))
            .into());
        }

        let is_dir = to_check_for.is_dir();

        let mut containing_dir = to_check_for.parent();
        while let Some(current_dir) = containing_dir {
            let gitignore = current_dir.join(GITIGNORE_FILE);
            if gitignore.exists() {
                let relative = to_check_for
                    .strip_prefix(current_dir)
                    .expect("candidate is below its containing directory");

                if let Some(verdict) = Self::parse_gitignore(&gitignore, relative, is_dir)? {
                    return Ok(verdict);
                }
            }

            if current_dir == self.work_dir.as_ref() {
                break;
            }
            containing_dir = current_dir.parent();
        }

        Ok(false)
    }

    /// Evaluate one `.gitignore`; the last matching line wins. `None`
    /// when no line matches.
    fn parse_gitignore(
        gitignore: &Path,
        relative: &Path,
        is_dir: bool,
    ) -> anyhow::Result<Option<bool>> {
        let content = std::fs::read_to_string(gitignore)?;

        let mut verdict = None;
        for line in content.lines() {
            if let Some(pattern) = Pattern::parse(line)?
                && pattern.matches(relative, is_dir)
            {
                verdict = Some(!pattern.negated);
            }
        }

        Ok(verdict)
    }
}
