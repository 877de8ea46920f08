//! Roles and user accounts.

use reconcile::{AttrSpec, ResourceSchema, ShowQuery, Verbs};

/// User role: named, local- or fabric-scoped, with shell/sudo toggles.
pub static ROLE: ResourceSchema = ResourceSchema {
    kind: "role",
    label: "Role",
    identity: &[AttrSpec::text("name", "name")],
    attrs: &[
        AttrSpec::choice("scope", "scope", &["local", "fabric"]),
        AttrSpec::choice("access", "access", &["read-only", "read-write"]),
        AttrSpec::flag("shell", "shell", "no-shell"),
        AttrSpec::flag("sudo", "sudo", "no-sudo"),
        AttrSpec::flag("running-config", "running-config", "no-running-config"),
        AttrSpec::text("delete-from-users", "delete-from-users"),
    ],
    verbs: Verbs::full("role-create", "role-delete", "role-modify"),
    show: Some(ShowQuery::on("role-show", "name")),
    modify_verifies: false,
};

/// Switch user account. The password never reaches logs or audit output.
pub static USER: ResourceSchema = ResourceSchema {
    kind: "user",
    label: "User",
    identity: &[AttrSpec::text("name", "name")],
    attrs: &[
        AttrSpec::choice("scope", "scope", &["local", "fabric"]),
        AttrSpec::text("initial-role", "initial-role"),
        AttrSpec::secret("password", "password"),
    ],
    verbs: Verbs::full("user-create", "user-delete", "user-modify"),
    show: Some(ShowQuery::on("user-show", "name")),
    modify_verifies: false,
};
