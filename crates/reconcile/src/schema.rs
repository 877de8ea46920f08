//! Resource schemas - static per-type descriptions of device resources
//!
//! A [`ResourceSchema`] is the data object that replaces per-resource
//! control flow: everything that varies between resource types (attribute
//! names and ordering, boolean token pairs, enumerated choices, identity
//! fields, verbs, the existence query) lives here, and the engine is generic
//! over it.

/// How one attribute renders into command tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrKind {
    /// Boolean toggle rendering as exactly one of two mutually exclusive
    /// tokens. An absent value renders neither; "not specified" is never
    /// collapsed into the off token.
    Flag {
        on: &'static str,
        off: &'static str,
    },
    /// Enumerated choice rendering as `token value`, validated against the
    /// declared set.
    Choice {
        token: &'static str,
        values: &'static [&'static str],
    },
    /// Free-form string rendering as `token value`. Sensitive values are
    /// masked in audit and log output.
    Text {
        token: &'static str,
        sensitive: bool,
    },
}

/// One declared attribute of a resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrSpec {
    /// Caller-facing attribute name, e.g. `"scope"`
    pub name: &'static str,
    pub kind: AttrKind,
}

impl AttrSpec {
    /// A boolean toggle with its on/off token pair.
    pub const fn flag(name: &'static str, on: &'static str, off: &'static str) -> Self {
        Self {
            name,
            kind: AttrKind::Flag { on, off },
        }
    }

    /// An enumerated attribute with a fixed choice set.
    pub const fn choice(
        name: &'static str,
        token: &'static str,
        values: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            kind: AttrKind::Choice { token, values },
        }
    }

    /// A free-form string attribute.
    pub const fn text(name: &'static str, token: &'static str) -> Self {
        Self {
            name,
            kind: AttrKind::Text {
                token,
                sensitive: false,
            },
        }
    }

    /// A free-form string attribute whose value must never be echoed.
    pub const fn secret(name: &'static str, token: &'static str) -> Self {
        Self {
            name,
            kind: AttrKind::Text {
                token,
                sensitive: true,
            },
        }
    }

    /// Whether values of this attribute must be masked in audit output.
    pub fn is_sensitive(&self) -> bool {
        matches!(self.kind, AttrKind::Text { sensitive: true, .. })
    }

    /// Every CLI token this attribute can emit, for uniqueness checks.
    pub fn emitted_tokens(&self) -> Vec<&'static str> {
        match self.kind {
            AttrKind::Flag { on, off } => vec![on, off],
            AttrKind::Choice { token, .. } | AttrKind::Text { token, .. } => vec![token],
        }
    }
}

/// The mutating verbs a resource type supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verbs {
    pub create: Option<&'static str>,
    pub delete: Option<&'static str>,
    pub modify: Option<&'static str>,
}

impl Verbs {
    /// Resource supports create, delete and modify.
    pub const fn full(
        create: &'static str,
        delete: &'static str,
        modify: &'static str,
    ) -> Self {
        Self {
            create: Some(create),
            delete: Some(delete),
            modify: Some(modify),
        }
    }

    /// Resource supports only create and delete (no in-place modify).
    pub const fn create_delete(create: &'static str, delete: &'static str) -> Self {
        Self {
            create: Some(create),
            delete: Some(delete),
            modify: None,
        }
    }

    /// Singleton resource mutated only through modify.
    pub const fn modify_only(modify: &'static str) -> Self {
        Self {
            create: None,
            delete: None,
            modify: Some(modify),
        }
    }
}

/// The read-only listing query used for existence checks.
///
/// The rendered query is `<command> [<filter token> <value>]... format
/// <match token> no-show-headers`: leading identity attributes narrow the
/// listing, and membership of the `match_on` attribute's value in the output
/// decides existence. Compound identities are therefore checked in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowQuery {
    /// Listing verb, e.g. `"role-show"`
    pub command: &'static str,
    /// Identity attribute names rendered as filters ahead of the format
    /// clause (empty for single-field identities)
    pub filter_by: &'static [&'static str],
    /// Identity attribute whose token is requested and whose value is
    /// membership-tested
    pub match_on: &'static str,
}

impl ShowQuery {
    /// A query matching a single identity field with no filters.
    pub const fn on(command: &'static str, match_on: &'static str) -> Self {
        Self {
            command,
            filter_by: &[],
            match_on,
        }
    }

    /// A query filtered by leading identity fields.
    pub const fn scoped(
        command: &'static str,
        filter_by: &'static [&'static str],
        match_on: &'static str,
    ) -> Self {
        Self {
            command,
            filter_by,
            match_on,
        }
    }
}

/// Static description of one resource type.
#[derive(Debug, Clone, Copy)]
pub struct ResourceSchema {
    /// Machine name used in requests and config files, e.g. `"role"`
    pub kind: &'static str,
    /// Display name used in messages, e.g. `"Role"`
    pub label: &'static str,
    /// Ordered identity attributes; rendered first, and the only attributes
    /// rendered for delete. Empty for switch-wide singletons.
    pub identity: &'static [AttrSpec],
    /// Ordered non-identity attributes
    pub attrs: &'static [AttrSpec],
    pub verbs: Verbs,
    /// Existence query; `None` for resources that are never checked
    /// (modify-only singletons)
    pub show: Option<ShowQuery>,
    /// Identity-scoped modify semantics: run the existence check before a
    /// modify (propagating query failures) but never skip the modify
    pub modify_verifies: bool,
}

impl ResourceSchema {
    /// Look up a non-identity attribute by caller-facing name.
    pub fn attr(&self, name: &str) -> Option<&AttrSpec> {
        self.attrs.iter().find(|a| a.name == name)
    }

    /// Look up an identity attribute by caller-facing name.
    pub fn identity_attr(&self, name: &str) -> Option<&AttrSpec> {
        self.identity.iter().find(|a| a.name == name)
    }

    /// Check schema invariants; returns a description of the first
    /// violation found.
    ///
    /// Intended for catalog tests - every shipped schema must pass.
    pub fn validate(&self) -> Result<(), String> {
        let mut seen_names: Vec<&str> = Vec::new();
        let mut seen_tokens: Vec<&str> = Vec::new();

        for spec in self.identity.iter().chain(self.attrs.iter()) {
            if seen_names.contains(&spec.name) {
                return Err(format!("{}: duplicate attribute `{}`", self.kind, spec.name));
            }
            seen_names.push(spec.name);

            for token in spec.emitted_tokens() {
                if seen_tokens.contains(&token) {
                    return Err(format!(
                        "{}: attribute `{}` reuses token `{}`",
                        self.kind, spec.name, token
                    ));
                }
                seen_tokens.push(token);
            }
        }

        for spec in self.identity {
            if matches!(spec.kind, AttrKind::Flag { .. }) {
                return Err(format!(
                    "{}: identity attribute `{}` cannot be a flag",
                    self.kind, spec.name
                ));
            }
        }

        if let Some(show) = &self.show {
            if self.identity_attr(show.match_on).is_none() {
                return Err(format!(
                    "{}: show match field `{}` is not an identity attribute",
                    self.kind, show.match_on
                ));
            }
            for &field in show.filter_by {
                if self.identity_attr(field).is_none() {
                    return Err(format!(
                        "{}: show filter field `{}` is not an identity attribute",
                        self.kind, field
                    ));
                }
            }
        }

        if (self.verbs.create.is_some() || self.verbs.delete.is_some())
            && self.identity.is_empty()
        {
            return Err(format!(
                "{}: create/delete requires at least one identity attribute",
                self.kind
            ));
        }

        Ok(())
    }
}
