//! Intent file loading and resolution
//!
//! The intent file is the declarative input: an optional target switch and a
//! list of resources, each with a type, a target state, an identity table
//! and a table of attribute values to set. Values are coerced here into the
//! engine's attribute values; everything else (ordering, choice sets,
//! unknown attributes) is the engine's validation.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use reconcile::{AttrMap, AttrValue, Operation, ResourceSchema};

#[derive(Debug, Deserialize)]
pub struct IntentFile {
    /// Fabric member to target; local switch when absent
    #[serde(default)]
    pub switch: Option<String>,

    #[serde(default)]
    pub resources: Vec<ResourceEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ResourceEntry {
    #[serde(rename = "type")]
    pub kind: String,

    /// Target state: `present`, `absent` or `update`
    pub state: String,

    #[serde(default)]
    pub identity: toml::Table,

    #[serde(default)]
    pub set: toml::Table,
}

/// One intent entry resolved against the catalog.
#[derive(Debug)]
pub struct PlannedResource {
    pub schema: &'static ResourceSchema,
    pub op: Operation,
    pub identity: AttrMap,
    pub set: AttrMap,
}

impl PlannedResource {
    /// Short display handle, e.g. `role netadmin` or `stp`.
    pub fn display_id(&self) -> String {
        match self
            .schema
            .identity
            .first()
            .and_then(|spec| self.identity.get(spec.name))
        {
            Some(AttrValue::Str(value)) => format!("{} {}", self.schema.kind, value),
            _ => self.schema.kind.to_string(),
        }
    }
}

/// Default intent file location.
pub fn default_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("nvctl").join("intent.toml"))
}

/// Load and parse the intent file.
pub fn load(path: Option<&str>) -> Result<(PathBuf, IntentFile)> {
    let path = match path {
        Some(p) => PathBuf::from(shellexpand::tilde(p).as_ref()),
        None => default_path()?,
    };
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Could not read {}", path.display()))?;
    let file = parse(&content).with_context(|| format!("Invalid intent file {}", path.display()))?;
    Ok((path, file))
}

/// Parse intent file content.
pub fn parse(content: &str) -> Result<IntentFile> {
    Ok(toml::from_str(content)?)
}

/// Resolve intent entries against the resource catalog.
pub fn plan_resources(file: &IntentFile) -> Result<Vec<PlannedResource>> {
    file.resources
        .iter()
        .map(|entry| {
            let schema = nvoskit::catalog::lookup(&entry.kind).with_context(|| {
                format!(
                    "unknown resource type `{}` (see `nvctl types`)",
                    entry.kind
                )
            })?;
            let op = Operation::from_state(&entry.state).with_context(|| {
                format!(
                    "invalid state `{}` for {}: expected present, absent or update",
                    entry.state, entry.kind
                )
            })?;
            Ok(PlannedResource {
                schema,
                op,
                identity: attr_map(&entry.identity)?,
                set: attr_map(&entry.set)?,
            })
        })
        .collect()
}

fn attr_map(table: &toml::Table) -> Result<AttrMap> {
    table
        .iter()
        .map(|(key, value)| Ok((key.clone(), attr_value(key, value)?)))
        .collect()
}

fn attr_value(key: &str, value: &toml::Value) -> Result<AttrValue> {
    match value {
        toml::Value::Boolean(b) => Ok(AttrValue::Bool(*b)),
        toml::Value::String(s) => Ok(AttrValue::Str(s.clone())),
        // Ports, timeouts and priorities read naturally as numbers; the
        // device CLI takes them as strings
        toml::Value::Integer(i) => Ok(AttrValue::Str(i.to_string())),
        other => bail!(
            "attribute `{}` has unsupported type {}",
            key,
            other.type_str()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
switch = "leaf-01"

[[resources]]
type = "role"
state = "present"
identity = { name = "netadmin" }
set = { scope = "local", shell = true }

[[resources]]
type = "admin-session-timeout"
state = "update"
set = { timeout = 3600 }
"#;

    #[test]
    fn test_parse_sample() {
        let file = parse(SAMPLE).unwrap();
        assert_eq!(file.switch.as_deref(), Some("leaf-01"));
        assert_eq!(file.resources.len(), 2);
        assert_eq!(file.resources[0].kind, "role");
        assert_eq!(file.resources[0].state, "present");
    }

    #[test]
    fn test_plan_resolves_catalog_and_operations() {
        let file = parse(SAMPLE).unwrap();
        let planned = plan_resources(&file).unwrap();

        assert_eq!(planned[0].schema.kind, "role");
        assert_eq!(planned[0].op, Operation::Create);
        assert_eq!(planned[0].display_id(), "role netadmin");
        assert_eq!(
            planned[0].set.get("shell"),
            Some(&AttrValue::Bool(true))
        );

        assert_eq!(planned[1].op, Operation::Modify);
        assert_eq!(planned[1].display_id(), "admin-session-timeout");
        // Integers coerce to the strings the device CLI expects
        assert_eq!(
            planned[1].set.get("timeout"),
            Some(&AttrValue::Str("3600".into()))
        );
    }

    #[test]
    fn test_unknown_type_is_an_error() {
        let file = parse(
            r#"
[[resources]]
type = "flux-capacitor"
state = "present"
"#,
        )
        .unwrap();
        let err = plan_resources(&file).unwrap_err();
        assert!(err.to_string().contains("flux-capacitor"));
    }

    #[test]
    fn test_invalid_state_is_an_error() {
        let file = parse(
            r#"
[[resources]]
type = "role"
state = "ensure"
"#,
        )
        .unwrap();
        let err = plan_resources(&file).unwrap_err();
        assert!(err.to_string().contains("ensure"));
    }

    #[test]
    fn test_load_expands_tilde_free_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("intent.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let (loaded_path, file) = load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(loaded_path, path);
        assert_eq!(file.resources.len(), 2);
    }

    #[test]
    fn test_load_missing_file_names_the_path() {
        let err = load(Some("/nonexistent/intent.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/intent.toml"));
    }

    #[test]
    fn test_float_attribute_rejected() {
        let file = parse(
            r#"
[[resources]]
type = "role"
state = "present"
set = { scope = 1.5 }
"#,
        )
        .unwrap();
        assert!(plan_resources(&file).is_err());
    }
}
