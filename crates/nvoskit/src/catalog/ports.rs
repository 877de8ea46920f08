//! Spanning tree, per-port configuration, CoS bandwidth and vflow tables.

use reconcile::{AttrSpec, ResourceSchema, Verbs};

/// Switch-wide spanning-tree settings. Singleton.
pub static STP: ResourceSchema = ResourceSchema {
    kind: "stp",
    label: "STP settings",
    identity: &[],
    attrs: &[
        AttrSpec::flag("enable", "enable", "disable"),
        AttrSpec::choice("stp-mode", "stp-mode", &["rstp", "mstp"]),
        AttrSpec::text("hello-time", "hello-time"),
        AttrSpec::text("forwarding-delay", "forwarding-delay"),
        AttrSpec::text("max-age", "max-age"),
        AttrSpec::text("bridge-id", "bridge-id"),
        AttrSpec::text("bridge-priority", "bridge-priority"),
        AttrSpec::text("root-guard-wait-time", "root-guard-wait-time"),
        AttrSpec::flag(
            "bpdus-bridge-ports",
            "bpdus-bridge-ports",
            "no-bpdus-bridge-ports",
        ),
        AttrSpec::text("mst-max-hops", "mst-max-hops"),
        AttrSpec::text("mst-config-name", "mst-config-name"),
    ],
    verbs: Verbs::modify_only("stp-modify"),
    show: None,
    modify_verifies: false,
};

/// Spanning-tree settings of one port.
pub static STP_PORT: ResourceSchema = ResourceSchema {
    kind: "stp-port",
    label: "STP port settings",
    identity: &[AttrSpec::text("port", "port")],
    attrs: &[
        AttrSpec::text("priority", "priority"),
        AttrSpec::text("cost", "cost"),
        AttrSpec::flag("root-guard", "root-guard", "no-root-guard"),
        AttrSpec::flag("filter", "filter", "no-filter"),
        AttrSpec::flag("edge", "edge", "no-edge"),
        AttrSpec::flag("bpdu-guard", "bpdu-guard", "no-bpdu-guard"),
        AttrSpec::flag("block", "block", "no-block"),
    ],
    verbs: Verbs::modify_only("stp-port-modify"),
    show: None,
    modify_verifies: false,
};

/// Physical port configuration.
pub static PORT_CONFIG: ResourceSchema = ResourceSchema {
    kind: "port-config",
    label: "port configuration",
    identity: &[AttrSpec::text("port", "port")],
    attrs: &[
        AttrSpec::text("intf", "intf"),
        AttrSpec::flag("crc-check-enable", "crc-check-enable", "no-crc-check-enable"),
        AttrSpec::text("dscp-map", "dscp-map"),
        AttrSpec::flag("autoneg", "autoneg", "no-autoneg"),
        AttrSpec::choice(
            "speed",
            "speed",
            &[
                "disable", "10m", "100m", "1g", "2.5g", "10g", "25g", "40g", "50g", "100g",
            ],
        ),
        AttrSpec::flag("vxlan-termination", "vxlan-termination", "no-vxlan-termination"),
        AttrSpec::flag("pause", "pause", "no-pause"),
        AttrSpec::flag("fec", "fec", "no-fec"),
        AttrSpec::flag("loopback", "loopback", "no-loopback"),
        AttrSpec::text("loop-vlans", "loop-vlans"),
        AttrSpec::flag("routing", "routing", "no-routing"),
        AttrSpec::flag("edge-switch", "edge-switch", "no-edge-switch"),
        AttrSpec::flag("enable", "enable", "disable"),
        AttrSpec::text("description", "description"),
        AttrSpec::flag("host-enable", "host-enable", "no-host-enable"),
        AttrSpec::choice("allowed-tpid", "allowed-tpid", &["vlan", "q-in-q", "q-in-q-old"]),
        AttrSpec::flag("mirror-only", "mirror-only", "no-mirror-only"),
        AttrSpec::flag("reflect", "reflect", "no-reflect"),
        AttrSpec::flag("jumbo", "jumbo", "no-jumbo"),
        AttrSpec::text("egress-rate-limit", "egress-rate-limit"),
        AttrSpec::choice(
            "eth-mode",
            "eth-mode",
            &["1000base-x", "sgmii", "disabled", "GMII"],
        ),
        AttrSpec::flag("fabric-guard", "fabric-guard", "no-fabric-guard"),
        AttrSpec::text("lacp-priority", "lacp-priority"),
        AttrSpec::flag("defer-bringup", "defer-bringup", "no-defer-bringup"),
    ],
    verbs: Verbs::modify_only("port-config-modify"),
    show: None,
    modify_verifies: false,
};

/// Bandwidth settings for one CoS queue of one port.
pub static PORT_COS_BW: ResourceSchema = ResourceSchema {
    kind: "port-cos-bw",
    label: "port CoS bandwidth",
    identity: &[
        AttrSpec::text("cos", "cos"),
        AttrSpec::text("port", "port"),
    ],
    attrs: &[
        AttrSpec::text("min-bw-guarantee", "min-bw-guarantee"),
        AttrSpec::text("max-bw-limit", "max-bw-limit"),
        AttrSpec::choice("weight", "weight", &["priority", "no-priority"]),
    ],
    verbs: Verbs::modify_only("port-cos-bw-modify"),
    show: None,
    modify_verifies: false,
};

/// Hardware vflow table profile selection.
pub static VFLOW_TABLE_PROFILE: ResourceSchema = ResourceSchema {
    kind: "vflow-table-profile",
    label: "vflow table profile",
    identity: &[
        AttrSpec::choice("profile", "profile", &["application", "ipv6", "qos"]),
        AttrSpec::choice(
            "hw-tbl",
            "hw-tbl",
            &["switch-main", "switch-hash", "npu-main", "npu-hash"],
        ),
    ],
    attrs: &[AttrSpec::flag("enable", "enable", "disable")],
    verbs: Verbs::modify_only("vflow-table-profile-modify"),
    show: None,
    modify_verifies: false,
};
