//! Access lists, DHCP filters and DSCP maps.

use reconcile::{AttrSpec, ResourceSchema, ShowQuery, Verbs};

/// Named access list.
pub static ACCESS_LIST: ResourceSchema = ResourceSchema {
    kind: "access-list",
    label: "access-list",
    identity: &[AttrSpec::text("name", "name")],
    attrs: &[AttrSpec::choice("scope", "scope", &["local", "fabric"])],
    verbs: Verbs::create_delete("access-list-create", "access-list-delete"),
    show: Some(ShowQuery::on("access-list-show", "name")),
    modify_verifies: false,
};

/// One ip entry inside a named access list. Compound identity: the
/// existence query lists the ips of the named list and matches the ip, so
/// the same ip in a different list does not count as present.
pub static ACCESS_LIST_IP: ResourceSchema = ResourceSchema {
    kind: "access-list-ip",
    label: "access-list entry",
    identity: &[
        AttrSpec::text("name", "name"),
        AttrSpec::text("ip", "ip"),
    ],
    attrs: &[],
    verbs: Verbs::create_delete("access-list-ip-add", "access-list-ip-remove"),
    show: Some(ShowQuery::scoped("access-list-ip-show", &["name"], "ip")),
    modify_verifies: false,
};

/// DHCP filter with its trusted port list.
pub static DHCP_FILTER: ResourceSchema = ResourceSchema {
    kind: "dhcp-filter",
    label: "dhcp-filter",
    identity: &[AttrSpec::text("name", "name")],
    attrs: &[AttrSpec::text("trusted-ports", "trusted-ports")],
    verbs: Verbs::full("dhcp-filter-create", "dhcp-filter-delete", "dhcp-filter-modify"),
    show: Some(ShowQuery::on("dhcp-filter-show", "name")),
    modify_verifies: false,
};

/// Named DSCP map. The device lists maps per name, so the existence query
/// is scoped to the name it matches.
pub static DSCP_MAP: ResourceSchema = ResourceSchema {
    kind: "dscp-map",
    label: "dscp-map",
    identity: &[AttrSpec::text("name", "name")],
    attrs: &[AttrSpec::choice("scope", "scope", &["local", "fabric"])],
    verbs: Verbs::create_delete("dscp-map-create", "dscp-map-delete"),
    show: Some(ShowQuery::scoped("dscp-map-show", &["name"], "name")),
    modify_verifies: false,
};

/// Priority mapping row of a DSCP map; addressed by map name and priority.
pub static DSCP_MAP_PRI_MAP: ResourceSchema = ResourceSchema {
    kind: "dscp-map-pri-map",
    label: "dscp-map priority mapping",
    identity: &[
        AttrSpec::text("name", "name"),
        AttrSpec::text("pri", "pri"),
    ],
    attrs: &[AttrSpec::text("dsmap", "dsmap")],
    verbs: Verbs::modify_only("dscp-map-pri-map-modify"),
    show: None,
    modify_verifies: false,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_list_ip_checks_full_compound_key() {
        let show = ACCESS_LIST_IP.show.unwrap();
        assert_eq!(show.filter_by, ["name"]);
        assert_eq!(show.match_on, "ip");
    }

    #[test]
    fn test_access_list_ip_has_no_modify() {
        assert!(ACCESS_LIST_IP.verbs.modify.is_none());
    }

    #[test]
    fn test_dscp_map_query_is_name_scoped() {
        let show = DSCP_MAP.show.unwrap();
        assert_eq!(show.filter_by, ["name"]);
        assert_eq!(show.match_on, "name");
    }
}
