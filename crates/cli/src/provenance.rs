use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What produced a report: its parameters and the files it read.
pub struct Payload {
    pub params: Value,
    pub inputs: Vec<String>,
}

impl Payload {
    pub fn new(params: Value) -> Self {
        Self {
            params,
            inputs: Vec::new(),
        }
    }

    pub fn with_input(mut self, input: impl AsRef<Path>) -> Self {
        self.inputs
            .push(input.as_ref().to_string_lossy().into_owned());
        self
    }
}

/// Write `<report>.provenance.json` next to `report`: tool version, code
/// revision, callsite, params, inputs and outputs.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(report: P, payload: Payload) -> Result<PathBuf> {
    let report = report.as_ref();
    let sidecar = sidecar_path(report);
    if let Some(parent) = sidecar.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }

    let callsite = Location::caller();
    let doc = json!({
        "tool": "stowage",
        "version": stowage::VERSION,
        "code_rev": code_rev(),
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "params": payload.params,
        "inputs": payload.inputs,
        "outputs": [report.to_string_lossy()]
    });
    fs::write(&sidecar, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", sidecar.display()))?;
    Ok(sidecar)
}

fn sidecar_path(report: &Path) -> PathBuf {
    let mut name = report
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("report"));
    name.push(".provenance.json");
    report.with_file_name(name)
}

/// Revision stamped into reports. First non-blank of: `STOWAGE_REV` at run
/// time, `GIT_COMMIT` baked in at build time, the checkout's `HEAD`.
pub fn code_rev() -> String {
    let overrides = [
        std::env::var("STOWAGE_REV").ok(),
        option_env!("GIT_COMMIT").map(str::to_owned),
    ];
    first_rev(overrides)
        .or_else(checkout_head)
        .unwrap_or_else(|| "unknown".to_owned())
}

fn first_rev(candidates: impl IntoIterator<Item = Option<String>>) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .map(|rev| rev.trim().to_owned())
        .find(|rev| !rev.is_empty())
}

fn checkout_head() -> Option<String> {
    let out = Command::new("git")
        .args(["rev-parse", "--short=12", "HEAD"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    first_rev([String::from_utf8(out.stdout).ok()])
}
