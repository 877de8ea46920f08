//! Catalog listing - `nvctl types`

use anyhow::Result;
use colored::Colorize;

use crate::ui;

pub fn run() -> Result<()> {
    ui::header("Supported resource types");

    for schema in nvoskit::catalog::ALL {
        let mut verbs = Vec::new();
        if schema.verbs.create.is_some() {
            verbs.push("create");
        }
        if schema.verbs.delete.is_some() {
            verbs.push("delete");
        }
        if schema.verbs.modify.is_some() {
            verbs.push("modify");
        }

        let identity = if schema.identity.is_empty() {
            "switch-wide".to_string()
        } else {
            schema
                .identity
                .iter()
                .map(|spec| spec.name)
                .collect::<Vec<_>>()
                .join(", ")
        };

        println!(
            "  {:<24} {:<24} {}",
            schema.kind.bold(),
            verbs.join(" "),
            identity.dimmed()
        );
    }

    println!();
    ui::dim("States: present (create), absent (delete), update (modify)");
    Ok(())
}
