//! Switch administration: services, syslog sinks, session timeout.

use reconcile::{AttrSpec, ResourceSchema, ShowQuery, Verbs};

/// Switch-wide service toggles. A singleton: no identity, modify only.
pub static ADMIN_SERVICE: ResourceSchema = ResourceSchema {
    kind: "admin-service",
    label: "admin service",
    identity: &[],
    attrs: &[
        AttrSpec::flag("web", "web", "no-web"),
        AttrSpec::flag("web-ssl", "web-ssl", "no-web-ssl"),
        AttrSpec::text("web-ssl-port", "web-ssl-port"),
        AttrSpec::text("web-port", "web-port"),
        AttrSpec::flag("web-log", "web-log", "no-web-log"),
        AttrSpec::flag("snmp", "snmp", "no-snmp"),
        AttrSpec::flag("net-api", "net-api", "no-net-api"),
        AttrSpec::flag("icmp", "icmp", "no-icmp"),
        AttrSpec::flag("nfs", "nfs", "no-nfs"),
        AttrSpec::flag("ssh", "ssh", "no-ssh"),
        AttrSpec::text("if", "if"),
    ],
    verbs: Verbs::modify_only("admin-service-modify"),
    show: None,
    modify_verifies: false,
};

/// Named syslog export target.
pub static ADMIN_SYSLOG: ResourceSchema = ResourceSchema {
    kind: "admin-syslog",
    label: "admin-syslog",
    identity: &[AttrSpec::text("name", "name")],
    attrs: &[
        AttrSpec::choice("scope", "scope", &["local", "fabric"]),
        AttrSpec::text("host", "host"),
        AttrSpec::text("port", "port"),
        AttrSpec::choice("transport", "transport", &["tcp-tls", "udp"]),
        AttrSpec::choice("message-format", "message-format", &["structured", "legacy"]),
    ],
    verbs: Verbs::full(
        "admin-syslog-create",
        "admin-syslog-delete",
        "admin-syslog-modify",
    ),
    show: Some(ShowQuery::on("admin-syslog-show", "name")),
    modify_verifies: false,
};

/// Idle timeout for management sessions. Singleton.
pub static ADMIN_SESSION_TIMEOUT: ResourceSchema = ResourceSchema {
    kind: "admin-session-timeout",
    label: "admin session timeout",
    identity: &[],
    attrs: &[AttrSpec::text("timeout", "timeout")],
    verbs: Verbs::modify_only("admin-session-timeout-modify"),
    show: None,
    modify_verifies: false,
};
