use std::process::Command;

use anyhow::{Context, Result};

/// Crates whose optional features must compile in every combination.
const PACKAGES: &[&str] = &["lexintake-infra", "lexintake-app"];

const FEATURE_COMBINATIONS: &[&[&str]] = &[
    &[], // default
    &["email"],
];

/// Check that all required feature combinations compile successfully.
pub fn test_feature_matrix() -> Result<()> {
    let total = PACKAGES.len() * FEATURE_COMBINATIONS.len();
    println!("Testing {total} feature combinations...");

    let mut step = 0;
    for package in PACKAGES {
        for features in FEATURE_COMBINATIONS {
            step += 1;
            let joined = features.join(",");
            let is_default = features.is_empty();
            let display_label =
                if is_default { format!("{package} default") } else { format!("{package} {joined}") };
            let feature_arg = if is_default { None } else { Some(joined) };

            println!(
                "\n[{step}/{total}] cargo check -p {package} --all-targets{}",
                feature_arg.as_ref().map(|arg| format!(" --features {arg}")).unwrap_or_default()
            );

            let mut command = Command::new("cargo");
            command.arg("check").arg("-p").arg(package).arg("--all-targets");

            if let Some(feature_list) = feature_arg.as_ref() {
                command.arg("--features").arg(feature_list.as_str());
            }

            let status = command
                .status()
                .with_context(|| format!("Failed to run cargo check for '{display_label}'"))?;

            if !status.success() {
                anyhow::bail!("Feature combination '{display_label}' failed to compile");
            }

            println!("✅ '{display_label}' compiled successfully");
        }
    }

    println!("\n✅ All {total} feature combinations compile successfully!");

    Ok(())
}
