//! Developer tasks (schema generation, fixture conformance).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));

    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(manifest_dir)
    } else {
        manifest_dir
    }
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_policy_schema() -> schemars::Schema {
    schema_for!(ampelgen_types::AmpelPolicy)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(ampelgen_settings::AmpelgenConfigV1)
}

const POLICY_SCHEMA: &str = "ampel.policy.json";
const CONFIG_SCHEMA: &str = "ampelgen.config.v1.json";

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: POLICY_SCHEMA,
            generate: generate_policy_schema,
        },
        SchemaSpec {
            filename: CONFIG_SCHEMA,
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

/// Check that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    for name in &missing {
        eprintln!("Missing schema: {}", name);
    }
    for name in &mismatched {
        eprintln!("Schema out of date: {}", name);
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

fn compile(spec_filename: &str) -> anyhow::Result<jsonschema::Validator> {
    let spec = schema_specs()
        .into_iter()
        .find(|s| s.filename == spec_filename)
        .with_context(|| format!("unknown schema: {spec_filename}"))?;
    let value = serde_json::to_value((spec.generate)()).context("schema to JSON")?;
    jsonschema::validator_for(&value)
        .map_err(|e| anyhow::anyhow!("Failed to compile {spec_filename}: {e}"))
}

fn collect_errors(
    validator: &jsonschema::Validator,
    instance: &serde_json::Value,
    label: &str,
    errors: &mut Vec<String>,
) {
    for e in validator.iter_errors(instance) {
        errors.push(format!("{label}: {e}"));
    }
}

/// Validate golden fixtures: expected policies against the output schema and
/// fixture configs against the config schema.
fn conform() -> anyhow::Result<()> {
    let policy = compile(POLICY_SCHEMA)?;
    let config = compile(CONFIG_SCHEMA)?;

    let mut dirs: Vec<PathBuf> = fs::read_dir(fixtures_dir())
        .context("read tests/fixtures")?
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();

    let mut errors = Vec::new();
    let mut checked = 0usize;

    for dir in &dirs {
        let expected = dir.join("expected.policy.json");
        if expected.exists() {
            let text = fs::read_to_string(&expected)
                .with_context(|| format!("read {}", expected.display()))?;
            let value: serde_json::Value = serde_json::from_str(&text)
                .with_context(|| format!("parse {}", expected.display()))?;
            collect_errors(&policy, &value, &expected.display().to_string(), &mut errors);
            checked += 1;
        }

        let cfg = dir.join("ampelgen.toml");
        if cfg.exists() {
            let text =
                fs::read_to_string(&cfg).with_context(|| format!("read {}", cfg.display()))?;
            let value: serde_json::Value =
                toml::from_str(&text).with_context(|| format!("parse {}", cfg.display()))?;
            collect_errors(&config, &value, &cfg.display().to_string(), &mut errors);
            checked += 1;
        }
    }

    if errors.is_empty() {
        println!("{} fixture documents conform.", checked);
        return Ok(());
    }

    for e in &errors {
        eprintln!("  - {}", e);
    }
    bail!("Conformance failed with {} errors", errors.len())
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  conform           Validate fixture outputs and configs against the schemas");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
