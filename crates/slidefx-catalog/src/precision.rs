//! Precision preamble policy
//!
//! GLSL ES requires a default float precision in fragment programs while
//! desktop GLSL 1.10/1.20 compilers reject `precision` statements. The
//! bundled programs are authored for ES; this policy rewrites the
//! preamble for other targets.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

const GUARD_OPEN: &str = "#ifdef GL_ES";
const GUARD_CLOSE: &str = "#endif";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrecisionPolicy {
    /// Program text exactly as bundled
    #[default]
    AsAuthored,
    /// Bare precision statements wrapped in `#ifdef GL_ES`
    Guarded,
    /// Precision statements and emptied `GL_ES` guards removed
    Stripped,
}

impl PrecisionPolicy {
    pub const ALL: [PrecisionPolicy; 3] = [Self::AsAuthored, Self::Guarded, Self::Stripped];

    pub fn name(self) -> &'static str {
        match self {
            Self::AsAuthored => "as-authored",
            Self::Guarded => "guarded",
            Self::Stripped => "stripped",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Rewrite `source` under this policy
    ///
    /// Returns the input borrowed when nothing changes.
    pub fn apply(self, source: &str) -> Cow<'_, str> {
        match self {
            Self::AsAuthored => Cow::Borrowed(source),
            Self::Guarded => guard(source),
            Self::Stripped => strip(source),
        }
    }
}

fn is_precision_statement(line: &str) -> bool {
    let line = line.trim();
    line.starts_with("precision ") && line.ends_with(';')
}

fn join(lines: &[&str], source: &str) -> String {
    let mut out = lines.join("\n");
    if source.ends_with('\n') {
        out.push('\n');
    }
    out
}

fn guard(source: &str) -> Cow<'_, str> {
    let mut lines = Vec::new();
    let mut in_guard = false;
    let mut changed = false;

    for line in source.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with(GUARD_OPEN) {
            in_guard = true;
        } else if trimmed.starts_with(GUARD_CLOSE) {
            in_guard = false;
        }

        if !in_guard && is_precision_statement(line) {
            lines.extend([GUARD_OPEN, line, GUARD_CLOSE]);
            changed = true;
        } else {
            lines.push(line);
        }
    }

    if changed {
        Cow::Owned(join(&lines, source))
    } else {
        Cow::Borrowed(source)
    }
}

fn strip(source: &str) -> Cow<'_, str> {
    let kept: Vec<&str> = source
        .lines()
        .filter(|line| !is_precision_statement(line))
        .collect();
    if kept.len() == source.lines().count() {
        return Cow::Borrowed(source);
    }

    // drop `#ifdef GL_ES` blocks left with nothing but blank lines
    let mut lines = Vec::with_capacity(kept.len());
    let mut i = 0;
    while i < kept.len() {
        if kept[i].trim().starts_with(GUARD_OPEN) {
            let mut j = i + 1;
            while j < kept.len() && kept[j].trim().is_empty() {
                j += 1;
            }
            if j < kept.len() && kept[j].trim().starts_with(GUARD_CLOSE) {
                i = j + 1;
                continue;
            }
        }
        lines.push(kept[i]);
        i += 1;
    }

    // a leading blank line is all the empty guard leaves behind
    while lines.first().is_some_and(|l| l.trim().is_empty()) {
        lines.remove(0);
    }

    Cow::Owned(join(&lines, source))
}
