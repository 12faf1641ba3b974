//! Effect descriptor - the binding contract of one effect

use std::borrow::Cow;

use serde::Serialize;

use crate::precision::PrecisionPolicy;

/// Attribute names, uniform names and the program pair of one effect
///
/// Descriptors are immutable once built. Name order only matters for the
/// host's buffer layout; lookups are by exact, case-sensitive name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectDescriptor {
    attribute_names: Vec<String>,
    uniform_names: Vec<String>,
    vertex_program: Cow<'static, str>,
    fragment_program: Cow<'static, str>,
}

impl EffectDescriptor {
    pub fn new<A, U, SA, SU>(
        attribute_names: A,
        uniform_names: U,
        vertex_program: impl Into<Cow<'static, str>>,
        fragment_program: impl Into<Cow<'static, str>>,
    ) -> Self
    where
        A: IntoIterator<Item = SA>,
        U: IntoIterator<Item = SU>,
        SA: Into<String>,
        SU: Into<String>,
    {
        Self {
            attribute_names: attribute_names.into_iter().map(Into::into).collect(),
            uniform_names: uniform_names.into_iter().map(Into::into).collect(),
            vertex_program: vertex_program.into(),
            fragment_program: fragment_program.into(),
        }
    }

    pub fn attribute_names(&self) -> &[String] {
        &self.attribute_names
    }

    pub fn uniform_names(&self) -> &[String] {
        &self.uniform_names
    }

    pub fn vertex_program(&self) -> &str {
        &self.vertex_program
    }

    pub fn fragment_program(&self) -> &str {
        &self.fragment_program
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute_names.iter().any(|n| n == name)
    }

    pub fn has_uniform(&self, name: &str) -> bool {
        self.uniform_names.iter().any(|n| n == name)
    }

    /// Copy of this descriptor with the precision policy applied to both programs
    ///
    /// Borrowed program text stays borrowed when the policy leaves it
    /// untouched.
    pub fn with_precision(&self, policy: PrecisionPolicy) -> Self {
        Self {
            attribute_names: self.attribute_names.clone(),
            uniform_names: self.uniform_names.clone(),
            vertex_program: apply_to(&self.vertex_program, policy),
            fragment_program: apply_to(&self.fragment_program, policy),
        }
    }
}

fn apply_to(program: &Cow<'static, str>, policy: PrecisionPolicy) -> Cow<'static, str> {
    match policy.apply(program) {
        Cow::Borrowed(_) => program.clone(),
        Cow::Owned(text) => Cow::Owned(text),
    }
}
