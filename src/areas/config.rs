//! Repository configuration (`.git/config`)
//!
//! A deliberately small reader/writer for the git config file format,
//! covering the keys the porcelain needs: `core.bare`,
//! `remote.<name>.url`, `remote.<name>.fetch`, `branch.<name>.remote` and
//! `branch.<name>.merge`. Writes follow a save-after-set discipline:
//! mutate in memory, then persist the whole file.

use anyhow::Context;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Section {
    name: String,
    subsection: Option<String>,
    entries: Vec<(String, String)>,
}

impl Section {
    fn header(&self) -> String {
        match &self.subsection {
            Some(subsection) => format!("[{} \"{}\"]", self.name, subsection),
            None => format!("[{}]", self.name),
        }
    }
}

#[derive(Debug)]
pub struct Config {
    path: Box<Path>,
    sections: Vec<Section>,
}

impl Config {
    /// Section header: `[name]` or `[name "subsection"]`
    const SECTION_REGEX: &'static str = r#"^\[([a-zA-Z0-9-]+)(?:\s+"([^"]*)")?\]$"#;

    pub fn load(path: Box<Path>) -> anyhow::Result<Self> {
        let mut config = Config {
            path,
            sections: Vec::new(),
        };

        if !config.path.exists() {
            return Ok(config);
        }

        let section_re = regex::Regex::new(Self::SECTION_REGEX)?;
        let content = std::fs::read_to_string(&config.path)
            .with_context(|| format!("unable to read config {}", config.path.display()))?;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(captures) = section_re.captures(line) {
                config.sections.push(Section {
                    name: captures[1].to_lowercase(),
                    subsection: captures.get(2).map(|m| m.as_str().to_string()),
                    entries: Vec::new(),
                });
                continue;
            }

            let (key, value) = line
                .split_once('=')
                .ok_or_else(|| anyhow::anyhow!("malformed config line: {}", line))?;
            let section = config
                .sections
                .last_mut()
                .ok_or_else(|| anyhow::anyhow!("config entry before any section: {}", line))?;
            section
                .entries
                .push((key.trim().to_lowercase(), value.trim().to_string()));
        }

        Ok(config)
    }

    fn section_mut(&mut self, name: &str, subsection: Option<&str>) -> &mut Section {
        let position = self.sections.iter().position(|section| {
            section.name == name && section.subsection.as_deref() == subsection
        });

        match position {
            Some(idx) => &mut self.sections[idx],
            None => {
                self.sections.push(Section {
                    name: name.to_string(),
                    subsection: subsection.map(str::to_string),
                    entries: Vec::new(),
                });
                self.sections.last_mut().unwrap()
            }
        }
    }

    fn section(&self, name: &str, subsection: Option<&str>) -> Option<&Section> {
        self.sections.iter().find(|section| {
            section.name == name && section.subsection.as_deref() == subsection
        })
    }

    /// Set a single-valued key, replacing any previous values.
    pub fn set_string(
        &mut self,
        section: &str,
        subsection: Option<&str>,
        key: &str,
        value: &str,
    ) {
        let section = self.section_mut(section, subsection);
        section.entries.retain(|(k, _)| k != key);
        section.entries.push((key.to_string(), value.to_string()));
    }

    /// Append another value for a multi-valued key (e.g. fetch refspecs).
    pub fn add_string(
        &mut self,
        section: &str,
        subsection: Option<&str>,
        key: &str,
        value: &str,
    ) {
        let section = self.section_mut(section, subsection);
        section.entries.push((key.to_string(), value.to_string()));
    }

    pub fn set_bool(&mut self, section: &str, subsection: Option<&str>, key: &str, value: bool) {
        self.set_string(section, subsection, key, if value { "true" } else { "false" });
    }

    pub fn get_string(
        &self,
        section: &str,
        subsection: Option<&str>,
        key: &str,
    ) -> Option<&str> {
        self.section(section, subsection)?
            .entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all(&self, section: &str, subsection: Option<&str>, key: &str) -> Vec<&str> {
        self.section(section, subsection)
            .map(|section| {
                section
                    .entries
                    .iter()
                    .filter(|(k, _)| k == key)
                    .map(|(_, v)| v.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn get_bool(&self, section: &str, subsection: Option<&str>, key: &str) -> Option<bool> {
        self.get_string(section, subsection, key)
            .map(|value| matches!(value, "true" | "yes" | "on" | "1"))
    }

    /// Persist the whole file.
    pub fn save(&self) -> anyhow::Result<()> {
        let mut content = Vec::new();
        for section in &self.sections {
            writeln!(content, "{}", section.header())?;
            for (key, value) in &section.entries {
                writeln!(content, "\t{} = {}", key, value)?;
            }
        }

        std::fs::write(&self.path, content)
            .with_context(|| format!("unable to write config {}", self.path.display()))?;

        Ok(())
    }
}
