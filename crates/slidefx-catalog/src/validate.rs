//! Descriptor validation
//!
//! Checks that the declared names of both programs and the descriptor's
//! name lists agree, so a host binding by name never hits a missing or
//! ambiguous location.

use std::collections::{HashMap, HashSet};
use std::fmt;

use thiserror::Error;

use crate::descriptor::EffectDescriptor;
use crate::scanner::{Declaration, Storage, scan};

/// Program stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Vertex => write!(f, "vertex"),
            Stage::Fragment => write!(f, "fragment"),
        }
    }
}

/// One broken descriptor invariant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("attribute '{0}' is listed more than once")]
    DuplicateAttribute(String),

    #[error("uniform '{0}' is listed more than once")]
    DuplicateUniform(String),

    #[error("'{0}' is listed as both an attribute and a uniform")]
    NameCollision(String),

    #[error("{stage} program declares attribute '{name}' which is not listed")]
    UndeclaredAttribute { name: String, stage: Stage },

    #[error("{stage} program declares uniform '{name}' which is not listed")]
    UndeclaredUniform { name: String, stage: Stage },

    #[error("'{0}' is listed but declared by neither program")]
    UnusedName(String),

    #[error("fragment program declares attribute '{0}'")]
    AttributeInFragment(String),

    #[error("uniform '{name}' is {vertex} in the vertex program but {fragment} in the fragment program")]
    UniformTypeMismatch {
        name: String,
        vertex: String,
        fragment: String,
    },

    #[error("fragment program reads varying '{0}' the vertex program never writes")]
    UnmatchedVarying(String),
}

/// Check every descriptor invariant, collecting all violations
pub fn validate(descriptor: &EffectDescriptor) -> Result<(), Vec<Violation>> {
    let vertex = scan(descriptor.vertex_program());
    let fragment = scan(descriptor.fragment_program());
    let mut violations = Vec::new();

    let attributes = unique_names(
        descriptor.attribute_names(),
        Violation::DuplicateAttribute,
        &mut violations,
    );
    let uniforms = unique_names(
        descriptor.uniform_names(),
        Violation::DuplicateUniform,
        &mut violations,
    );

    for name in descriptor.attribute_names() {
        if uniforms.contains(name.as_str()) && !violations.contains(&Violation::NameCollision(name.clone())) {
            violations.push(Violation::NameCollision(name.clone()));
        }
    }

    for (stage, decls) in [(Stage::Vertex, &vertex), (Stage::Fragment, &fragment)] {
        for decl in decls.iter() {
            match decl.storage {
                Storage::Attribute => {
                    if stage == Stage::Fragment {
                        violations.push(Violation::AttributeInFragment(decl.name.clone()));
                    } else if !attributes.contains(decl.name.as_str()) {
                        violations.push(Violation::UndeclaredAttribute {
                            name: decl.name.clone(),
                            stage,
                        });
                    }
                }
                Storage::Uniform => {
                    if !uniforms.contains(decl.name.as_str()) {
                        violations.push(Violation::UndeclaredUniform {
                            name: decl.name.clone(),
                            stage,
                        });
                    }
                }
                Storage::Varying => {}
            }
        }
    }

    let declared: HashSet<&str> = vertex
        .iter()
        .chain(fragment.iter())
        .filter(|d| d.storage != Storage::Varying)
        .map(|d| d.name.as_str())
        .collect();
    let mut reported = HashSet::new();
    for name in descriptor
        .attribute_names()
        .iter()
        .chain(descriptor.uniform_names())
    {
        if !declared.contains(name.as_str()) && reported.insert(name.as_str()) {
            violations.push(Violation::UnusedName(name.clone()));
        }
    }

    let vertex_uniforms = types_of(&vertex, Storage::Uniform);
    for (name, fragment_ty) in types_of(&fragment, Storage::Uniform) {
        if let Some(vertex_ty) = vertex_uniforms.get(name) {
            if *vertex_ty != fragment_ty {
                violations.push(Violation::UniformTypeMismatch {
                    name: name.to_string(),
                    vertex: vertex_ty.to_string(),
                    fragment: fragment_ty.to_string(),
                });
            }
        }
    }

    let vertex_varyings = types_of(&vertex, Storage::Varying);
    for decl in fragment.iter().filter(|d| d.storage == Storage::Varying) {
        if !vertex_varyings.contains_key(decl.name.as_str()) {
            violations.push(Violation::UnmatchedVarying(decl.name.clone()));
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn unique_names<'a>(
    names: &'a [String],
    duplicate: fn(String) -> Violation,
    violations: &mut Vec<Violation>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for name in names {
        if !seen.insert(name.as_str()) && reported.insert(name.as_str()) {
            violations.push(duplicate(name.clone()));
        }
    }
    seen
}

fn types_of(decls: &[Declaration], storage: Storage) -> HashMap<&str, &str> {
    decls
        .iter()
        .filter(|d| d.storage == storage)
        .map(|d| (d.name.as_str(), d.ty.as_str()))
        .collect()
}
