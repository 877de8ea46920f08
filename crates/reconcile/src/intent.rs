//! Caller intent - operations, attribute values, and their resolution
//!
//! Raw caller input is a pair of string-keyed maps (identity and desired
//! attributes). Resolution validates both against a [`ResourceSchema`] and
//! produces immutable, schema-ordered records, so everything downstream of
//! this module works with known-good data and rendering stays infallible.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::schema::{AttrKind, AttrSpec, ResourceSchema};

/// The mutating operation requested by the caller.
///
/// Parsed from the declarative target state: `present` creates, `absent`
/// deletes, `update` modifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Delete,
    Modify,
}

impl Operation {
    /// Map a declarative target state to an operation.
    pub fn from_state(state: &str) -> Option<Self> {
        match state {
            "present" => Some(Self::Create),
            "absent" => Some(Self::Delete),
            "update" => Some(Self::Modify),
            _ => None,
        }
    }

    /// Short name used in messages and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Delete => "delete",
            Self::Modify => "modify",
        }
    }

    /// The schema verb for this operation, or a configuration error when
    /// the resource type does not support it.
    pub fn verb(&self, schema: &ResourceSchema) -> Result<&'static str> {
        let verb = match self {
            Self::Create => schema.verbs.create,
            Self::Delete => schema.verbs.delete,
            Self::Modify => schema.verbs.modify,
        };
        verb.ok_or(Error::UnsupportedOperation {
            kind: schema.kind,
            op: self.name(),
        })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One attribute value supplied by the caller.
///
/// Absence is modeled by the key not being present in the input map, so
/// booleans are effectively three-valued: absent, true, false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Str(String),
}

impl AttrValue {
    fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "a boolean",
            Self::Str(_) => "a string",
        }
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

/// Raw caller input for one side of a request.
pub type AttrMap = BTreeMap<String, AttrValue>;

fn expect_str(schema: &ResourceSchema, spec: &AttrSpec, value: &AttrValue) -> Result<String> {
    match value {
        AttrValue::Str(s) => Ok(s.clone()),
        AttrValue::Bool(_) => Err(Error::TypeMismatch {
            kind: schema.kind,
            attr: spec.name,
            expected: "a string",
        }),
    }
}

fn check_choice(spec: &AttrSpec, value: &str) -> Result<()> {
    if let AttrKind::Choice { values, .. } = spec.kind
        && !values.iter().any(|v| *v == value)
    {
        return Err(Error::InvalidChoice {
            attr: spec.name,
            value: value.to_string(),
            allowed: values.join(", "),
        });
    }
    Ok(())
}

/// The resolved identity of a resource: the attribute subset that uniquely
/// names it on the device.
///
/// Ordered as the schema declares, immutable once built. Empty for
/// switch-wide singletons.
#[derive(Debug, Clone)]
pub struct Identity<'s> {
    pairs: Vec<(&'s AttrSpec, String)>,
}

impl<'s> Identity<'s> {
    /// Resolve caller identity input against a schema.
    ///
    /// Every declared identity attribute is required; unknown keys and
    /// enumerated-value violations are configuration errors.
    pub fn resolve(schema: &'s ResourceSchema, input: &AttrMap) -> Result<Self> {
        for key in input.keys() {
            if schema.identity_attr(key).is_none() {
                return Err(Error::UnknownAttribute {
                    kind: schema.kind,
                    attr: key.clone(),
                });
            }
        }

        let mut pairs = Vec::with_capacity(schema.identity.len());
        for spec in schema.identity {
            let value = input.get(spec.name).ok_or(Error::MissingIdentity {
                kind: schema.kind,
                attr: spec.name,
            })?;
            let value = expect_str(schema, spec, value)?;
            check_choice(spec, &value)?;
            pairs.push((spec, value));
        }
        Ok(Self { pairs })
    }

    /// Value of one identity attribute.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(spec, _)| spec.name == name)
            .map(|(_, v)| v.as_str())
    }

    /// Schema-ordered `(spec, value)` pairs.
    pub fn pairs(&self) -> &[(&'s AttrSpec, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// The resolved non-identity desired state for a resource.
///
/// Holds only the attributes the caller actually supplied, in schema
/// declaration order - never input-map order - so rendering is
/// deterministic.
#[derive(Debug, Clone)]
pub struct DesiredState<'s> {
    pairs: Vec<(&'s AttrSpec, AttrValue)>,
}

impl<'s> DesiredState<'s> {
    /// Resolve caller attribute input against a schema.
    pub fn resolve(schema: &'s ResourceSchema, input: &AttrMap) -> Result<Self> {
        for key in input.keys() {
            if schema.attr(key).is_none() {
                return Err(Error::UnknownAttribute {
                    kind: schema.kind,
                    attr: key.clone(),
                });
            }
        }

        let mut pairs = Vec::with_capacity(input.len());
        for spec in schema.attrs {
            let Some(value) = input.get(spec.name) else {
                continue;
            };
            match spec.kind {
                AttrKind::Flag { .. } => {
                    if !matches!(value, AttrValue::Bool(_)) {
                        return Err(Error::TypeMismatch {
                            kind: schema.kind,
                            attr: spec.name,
                            expected: "a boolean",
                        });
                    }
                }
                AttrKind::Choice { .. } => {
                    let s = expect_str(schema, spec, value)?;
                    check_choice(spec, &s)?;
                }
                AttrKind::Text { .. } => {
                    expect_str(schema, spec, value)?;
                }
            }
            pairs.push((spec, value.clone()));
        }
        Ok(Self { pairs })
    }

    /// A desired state with no attributes (delete requests).
    pub fn empty() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Schema-ordered `(spec, value)` pairs.
    pub fn pairs(&self) -> &[(&'s AttrSpec, AttrValue)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
