//! Top-level declaration scanner for GLSL ES 1.00 source
//!
//! Only what the binding contract needs is extracted: `attribute`,
//! `uniform` and `varying` declarations at global scope. Syntax errors
//! are not detected here; compiling the program is the host's job.

use std::fmt;

/// Storage qualifier of a global declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Storage {
    Attribute,
    Uniform,
    Varying,
}

impl Storage {
    fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "attribute" => Some(Self::Attribute),
            "uniform" => Some(Self::Uniform),
            "varying" => Some(Self::Varying),
            _ => None,
        }
    }
}

impl fmt::Display for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Storage::Attribute => write!(f, "attribute"),
            Storage::Uniform => write!(f, "uniform"),
            Storage::Varying => write!(f, "varying"),
        }
    }
}

/// One declared global name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub storage: Storage,
    /// GLSL type, e.g. `vec2` or `sampler2D`
    pub ty: String,
    pub name: String,
}

const PRECISION_QUALIFIERS: &[&str] = &["lowp", "mediump", "highp"];

/// Scan a program for its global `attribute`/`uniform`/`varying` declarations
///
/// Comments and preprocessor lines are ignored. Multiple names in one
/// statement (`uniform float A, B;`) yield one declaration each, array
/// suffixes are dropped from the name.
pub fn scan(source: &str) -> Vec<Declaration> {
    let code = strip_comments(source);
    let mut declarations = Vec::new();

    for statement in global_statements(&code) {
        let statement = strip_array_sizes(&statement);
        let tokens: Vec<&str> = statement
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .collect();

        let Some((first, rest)) = tokens.split_first() else {
            continue;
        };
        let Some(storage) = Storage::from_keyword(first) else {
            continue;
        };

        let mut rest = rest.iter().copied().skip_while(|t| PRECISION_QUALIFIERS.contains(t));
        let Some(ty) = rest.next() else {
            continue;
        };

        for name in rest {
            declarations.push(Declaration {
                storage,
                ty: ty.to_string(),
                name: name.to_string(),
            });
        }
    }

    declarations
}

/// Remove `//` and `/* */` comments and preprocessor lines
fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut at_line_start = true;

    while let Some(c) = chars.next() {
        match c {
            '/' if chars.peek() == Some(&'/') => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        at_line_start = true;
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    if next == '\n' {
                        out.push('\n');
                    }
                    prev = next;
                }
                out.push(' ');
            }
            '#' if at_line_start => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '\n' => {
                out.push('\n');
                at_line_start = true;
            }
            c if c.is_whitespace() => out.push(c),
            c => {
                out.push(c);
                at_line_start = false;
            }
        }
    }

    out
}

/// Drop `[...]` array sizes, whatever spacing sits inside or before them
fn strip_array_sizes(statement: &str) -> String {
    let mut out = String::with_capacity(statement.len());
    let mut depth = 0usize;
    for c in statement.chars() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

/// Split code into statements that sit at brace depth zero
///
/// Function bodies are skipped entirely, so locals never look like
/// globals.
fn global_statements(code: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for c in code.chars() {
        match c {
            '{' => {
                depth += 1;
                current.clear();
            }
            '}' => {
                depth = depth.saturating_sub(1);
                current.clear();
            }
            ';' if depth == 0 => {
                statements.push(std::mem::take(&mut current));
            }
            _ if depth == 0 => current.push(c),
            _ => {}
        }
    }

    statements
}
