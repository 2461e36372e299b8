//! Generates Rust modules from the schemas under `fixtures/`.

use anyhow::Context;
use avrogen_codegen::{GenConfig, generate_from_file};
use std::path::PathBuf;
use std::{env, fs};

/// Schema file, module name, encoder helpers.
const FIXTURES: [(&str, &str, bool); 4] = [
    ("golden.avsc", "golden", false),
    ("linked_list.avsc", "linked_list", false),
    ("two_records.avsc", "two_records", false),
    ("events.avsc", "events", true),
];

fn main() -> anyhow::Result<()> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);

    for (file, module, encoders) in FIXTURES {
        let path = manifest_dir.join("fixtures").join(file);
        println!("cargo:rerun-if-changed={}", path.display());

        let config = GenConfig::new(module).encoders(encoders);
        let code = generate_from_file(&path, &config)
            .with_context(|| format!("generating {}", path.display()))?;

        let target = out_dir.join(format!("{module}.rs"));
        fs::write(&target, code).with_context(|| format!("writing {}", target.display()))?;
    }

    Ok(())
}
