//! The INI-style `.git/config` file.
//!
//! ## Example
//! ```text
//! [core]
//! repositoryformatversion = 0
//! filemode = false
//! bare = false
//!
//! [remote "origin"]
//! url = https://example.com/repo.git
//! ```

use std::fmt::Display;

use once_cell::sync::Lazy;
use regex::Regex;

/// The only `core.repositoryformatversion` this crate understands.
pub const FORMAT_VERSION: i64 = 0;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    sections: Vec<Section>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Section {
    name: String,
    /// `origin` in `[remote "origin"]`. Unlike the section name this is case sensitive.
    subsection: Option<String>,
    entries: Vec<(String, String)>,
}

impl Section {
    fn new(name: &str, subsection: Option<&str>) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            subsection: subsection.map(str::to_owned),
            entries: Vec::new(),
        }
    }

    fn is(&self, name: &str, subsection: Option<&str>) -> bool {
        self.name.eq_ignore_ascii_case(name) && self.subsection.as_deref() == subsection
    }
}

impl Config {
    /// The configuration written by `init`.
    pub fn initial() -> Self {
        let mut config = Self::default();
        config.set("core", "repositoryformatversion", &FORMAT_VERSION.to_string());
        config.set("core", "filemode", "false");
        config.set("core", "bare", "false");
        config
    }

    /// Parse a config file. The error is a human readable reason.
    pub fn parse(text: &str) -> Result<Self, String> {
        static SECTION_REGEX: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r#"^\[\s*([A-Za-z0-9.-]+)(?:\s+"((?:[^"\\]|\\.)*)")?\s*\]$"#).unwrap()
        });
        static ENTRY_REGEX: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9-]*)\s*(?:=\s*(.*))?$").unwrap());

        let mut config = Self::default();

        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(groups) = SECTION_REGEX.captures(line) {
                let subsection = groups.get(2).map(|sub| unescape(sub.as_str()));
                config
                    .sections
                    .push(Section::new(&groups[1], subsection.as_deref()));
            } else if let Some(groups) = ENTRY_REGEX.captures(line) {
                let section = config
                    .sections
                    .last_mut()
                    .ok_or_else(|| format!("line {}: key outside of a section", idx + 1))?;
                // A bare key is shorthand for `key = true`.
                let value = groups.get(2).map_or("true", |v| v.as_str().trim());
                section
                    .entries
                    .push((groups[1].to_ascii_lowercase(), value.to_owned()));
            } else {
                return Err(format!("line {}: cannot parse {line:?}", idx + 1));
            }
        }

        Ok(config)
    }

    /// Look up `section.key`. The last occurrence wins.
    ///
    /// Only sections without a subsection are searched; see [`Config::get_subsection`].
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.lookup(section, None, key)
    }

    /// Look up `section.subsection.key`, e.g. `remote.origin.url`.
    pub fn get_subsection(&self, section: &str, subsection: &str, key: &str) -> Option<&str> {
        self.lookup(section, Some(subsection), key)
    }

    fn lookup(&self, section: &str, subsection: Option<&str>, key: &str) -> Option<&str> {
        self.sections
            .iter()
            .filter(|s| s.is(section, subsection))
            .flat_map(|s| s.entries.iter())
            .filter(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
            .last()
    }

    pub fn get_bool(&self, section: &str, key: &str) -> Option<bool> {
        match self.get(section, key)?.to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" | "" => Some(false),
            _ => None,
        }
    }

    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        let idx = match self.sections.iter().position(|s| s.is(section, None)) {
            Some(idx) => idx,
            None => {
                self.sections.push(Section::new(section, None));
                self.sections.len() - 1
            }
        };
        let section = &mut self.sections[idx];

        match section
            .entries
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
        {
            Some((_, v)) => *v = value.to_owned(),
            None => section
                .entries
                .push((key.to_ascii_lowercase(), value.to_owned())),
        }
    }

    pub fn format_version(&self) -> Option<&str> {
        self.get("core", "repositoryformatversion")
    }

    /// Whether the executable bit is tracked. Git defaults this to true.
    pub fn filemode(&self) -> bool {
        self.get_bool("core", "filemode").unwrap_or(true)
    }

    pub fn bare(&self) -> bool {
        self.get_bool("core", "bare").unwrap_or(false)
    }
}

/// Undo the `\"` and `\\` escapes allowed in a subsection name.
fn unescape(sub: &str) -> String {
    let mut out = String::with_capacity(sub.len());
    let mut chars = sub.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.extend(chars.next()),
            c => out.push(c),
        }
    }
    out
}

impl Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for section in &self.sections {
            match &section.subsection {
                Some(sub) => {
                    let sub = sub.replace('\\', "\\\\").replace('"', "\\\"");
                    writeln!(f, "[{} \"{sub}\"]", section.name)?
                }
                None => writeln!(f, "[{}]", section.name)?,
            }
            for (key, value) in &section.entries {
                writeln!(f, "{key} = {value}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
