//! Build script for tactus-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates midi.toml at compile time, with the `toml` crate and with
//!   the firmware's own parser

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Keys accepted in the `[midi]` table
const KNOWN_KEYS: &[&str] = &["baudrate", "running_status", "rx_channel", "tx_channel", "thru"];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate midi.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=midi.toml");

    let config_path = Path::new("midi.toml");

    if !config_path.exists() {
        fail(
            "midi.toml not found",
            &["The firmware embeds midi.toml from the tactus-firmware directory".to_string()],
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read midi.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            let lines: Vec<String> = e.to_string().lines().map(str::to_string).collect();
            fail("Invalid TOML syntax in midi.toml", &lines);
        }
    };

    let errors = validate_midi(&config);
    if !errors.is_empty() {
        fail("Invalid [midi] configuration", &errors);
    }

    // The firmware reads the file with its own line parser, which only
    // understands a subset of TOML
    if let Err(e) = tactus_protocol::MidiConfig::from_toml(&content) {
        fail(
            "midi.toml is not readable by the firmware",
            &[format!("{:?}", e)],
        );
    }

    println!("cargo:warning=midi.toml validated successfully");
}

/// Check the `[midi]` table against what the firmware parser accepts
fn validate_midi(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let Some(table) = config.as_table() else {
        return vec!["top level must be a table".to_string()];
    };

    for key in table.keys() {
        if key != "midi" {
            errors.push(format!("unknown section [{}]", key));
        }
    }

    let midi = match table.get("midi") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[midi] must be a table".to_string());
            return errors;
        }
        None => {
            errors.push("missing [midi] section".to_string());
            return errors;
        }
    };

    for key in midi.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            errors.push(format!("[midi] unknown key '{}'", key));
        }
    }

    match midi.get("baudrate") {
        Some(toml::Value::Integer(baud)) if *baud <= 0 || *baud > u32::MAX as i64 => {
            errors.push("[midi] baudrate must be a positive 32-bit integer".to_string());
        }
        Some(toml::Value::Integer(baud)) if *baud != 31_250 => {
            println!(
                "cargo:warning=midi.toml: baudrate {} is not the MIDI standard 31250",
                baud
            );
        }
        Some(toml::Value::Integer(_)) | None => {}
        Some(_) => errors.push("[midi] baudrate must be an integer".to_string()),
    }

    for key in ["running_status", "thru"] {
        if let Some(value) = midi.get(key) {
            if !value.is_bool() {
                errors.push(format!("[midi] {} must be true or false", key));
            }
        }
    }

    match midi.get("rx_channel") {
        Some(toml::Value::String(s)) if s == "omni" => {}
        Some(value) => check_channel("rx_channel", value, &mut errors),
        None => {}
    }

    if let Some(value) = midi.get("tx_channel") {
        check_channel("tx_channel", value, &mut errors);
    }

    errors
}

fn check_channel(key: &str, value: &toml::Value, errors: &mut Vec<String>) {
    match value {
        toml::Value::Integer(ch) if (1..=16).contains(ch) => {}
        _ => errors.push(format!("[midi] {} must be 1-16", key)),
    }
}

/// Abort the build with a boxed error report
fn fail(title: &str, lines: &[String]) -> ! {
    let body = lines
        .iter()
        .map(|line| {
            let truncated = if line.len() > 62 {
                format!("{}...", &line[..59])
            } else {
                line.clone()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}
