//! SNMP entities: v1 communities, v3 users, VACM views, trap sinks.

use reconcile::{AttrSpec, ResourceSchema, ShowQuery, Verbs};

/// SNMPv1 community string.
pub static SNMP_COMMUNITY: ResourceSchema = ResourceSchema {
    kind: "snmp-community",
    label: "snmp-community",
    identity: &[AttrSpec::text("community-string", "community-string")],
    attrs: &[AttrSpec::choice(
        "community-type",
        "community-type",
        &["read-only", "read-write"],
    )],
    verbs: Verbs::full(
        "snmp-community-create",
        "snmp-community-delete",
        "snmp-community-modify",
    ),
    show: Some(ShowQuery::on("snmp-community-show", "community-string")),
    modify_verifies: false,
};

/// SNMPv3 user. Auth and privacy passwords are sensitive.
pub static SNMP_USER: ResourceSchema = ResourceSchema {
    kind: "snmp-user",
    label: "snmp-user",
    identity: &[AttrSpec::text("user-name", "user-name")],
    attrs: &[
        AttrSpec::secret("auth-password", "auth-password"),
        AttrSpec::secret("priv-password", "priv-password"),
        AttrSpec::choice("auth-hash", "auth-hash", &["md5", "sha"]),
        AttrSpec::flag("auth", "auth", "no-auth"),
        AttrSpec::flag("priv", "priv", "no-priv"),
    ],
    verbs: Verbs::full("snmp-user-create", "snmp-user-delete", "snmp-user-modify"),
    show: Some(ShowQuery::on("snmp-user-show", "user-name")),
    modify_verifies: false,
};

/// View-based access control entry for an SNMP user.
pub static SNMP_VACM: ResourceSchema = ResourceSchema {
    kind: "snmp-vacm",
    label: "snmp-vacm",
    identity: &[AttrSpec::text("user-name", "user-name")],
    attrs: &[
        AttrSpec::text("oid-restrict", "oid-restrict"),
        AttrSpec::flag("priv", "priv", "no-priv"),
        AttrSpec::flag("auth", "auth", "no-auth"),
        AttrSpec::choice("user-type", "user-type", &["rouser", "rwuser"]),
    ],
    verbs: Verbs::full("snmp-vacm-create", "snmp-vacm-delete", "snmp-vacm-modify"),
    show: Some(ShowQuery::on("snmp-vacm-show", "user-name")),
    modify_verifies: false,
};

/// Trap sink: where the switch sends SNMP traps. Identified by trap type,
/// as the device lists sinks by type.
pub static SNMP_TRAP_SINK: ResourceSchema = ResourceSchema {
    kind: "snmp-trap-sink",
    label: "snmp-trap-sink",
    identity: &[AttrSpec::choice(
        "type",
        "type",
        &["TRAP_TYPE_V1_TRAP", "TRAP_TYPE_V2C_TRAP", "TRAP_TYPE_V2_INFORM"],
    )],
    attrs: &[
        AttrSpec::text("dest-host", "dest-host"),
        AttrSpec::text("community", "community"),
        AttrSpec::text("dest-port", "dest-port"),
    ],
    verbs: Verbs::create_delete("snmp-trap-sink-create", "snmp-trap-sink-delete"),
    show: Some(ShowQuery::on("snmp-trap-sink-show", "type")),
    modify_verifies: false,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snmp_secrets_are_marked() {
        assert!(SNMP_USER.attr("auth-password").unwrap().is_sensitive());
        assert!(SNMP_USER.attr("priv-password").unwrap().is_sensitive());
        assert!(!SNMP_VACM.attr("oid-restrict").unwrap().is_sensitive());
    }

    #[test]
    fn test_trap_sink_has_no_modify() {
        assert!(SNMP_TRAP_SINK.verbs.modify.is_none());
    }
}
