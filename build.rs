use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;
use toml::Value;

/// Collects `APP_METADATA_*` constants: package name and version plus every
/// string under `[package.metadata]`.
fn metadata_entries(manifest: &Value) -> Vec<(String, String)> {
    let mut entries = vec![
        ("NAME".to_string(), env::var("CARGO_PKG_NAME").unwrap_or_else(|_| "tomato".to_string())),
        ("VERSION".to_string(), env::var("CARGO_PKG_VERSION").unwrap_or_default()),
    ];

    let table = manifest
        .get("package")
        .and_then(|package| package.get("metadata"))
        .and_then(Value::as_table);
    if let Some(table) = table {
        entries.extend(
            table
                .iter()
                .filter_map(|(key, value)| value.as_str().map(|v| (key.to_uppercase(), v.to_string()))),
        );
    }
    entries
}

fn main() -> io::Result<()> {
    println!("cargo:rerun-if-changed=Cargo.toml");

    let manifest: Value = toml::from_str(&fs::read_to_string("Cargo.toml")?).map_err(io::Error::other)?;

    let source: String = metadata_entries(&manifest)
        .into_iter()
        .map(|(key, value)| format!("#[allow(unused)]\npub const APP_METADATA_{}: &str = {:?};\n", key, value))
        .collect();

    let out_dir = PathBuf::from(env::var("OUT_DIR").map_err(io::Error::other)?);
    fs::write(out_dir.join("app_metadata.rs"), source)
}
