//! Resource catalog - one schema per supported configuration entity
//!
//! Every resource type the reconciler can manage is described here as
//! static data: attribute order, boolean token pairs, enumerated choices,
//! identity fields, verbs, and the existence query. The engine is generic;
//! only this catalog knows the Netvisor CLI's vocabulary.

pub mod access;
pub mod admin;
pub mod auth;
pub mod ports;
pub mod snmp;

use reconcile::ResourceSchema;

/// Every schema in the catalog, in listing order.
pub static ALL: &[&ResourceSchema] = &[
    &auth::ROLE,
    &auth::USER,
    &snmp::SNMP_COMMUNITY,
    &snmp::SNMP_USER,
    &snmp::SNMP_VACM,
    &snmp::SNMP_TRAP_SINK,
    &access::ACCESS_LIST,
    &access::ACCESS_LIST_IP,
    &access::DHCP_FILTER,
    &access::DSCP_MAP,
    &access::DSCP_MAP_PRI_MAP,
    &admin::ADMIN_SERVICE,
    &admin::ADMIN_SYSLOG,
    &admin::ADMIN_SESSION_TIMEOUT,
    &ports::STP,
    &ports::STP_PORT,
    &ports::PORT_CONFIG,
    &ports::PORT_COS_BW,
    &ports::VFLOW_TABLE_PROFILE,
];

/// Find a schema by its machine name, e.g. `"role"` or `"snmp-community"`.
pub fn lookup(kind: &str) -> Option<&'static ResourceSchema> {
    ALL.iter().find(|schema| schema.kind == kind).copied()
}
