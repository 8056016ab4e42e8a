//! Build script for powerctl-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates power.toml at compile time
//! - Generates the output constants the firmware is built around

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use powerctl_core::config::{parse_outputs, NamedOutput};
use powerctl_core::DriveCapability;

/// GPIOs usable on RP2040
const RP2040_GPIO_COUNT: u8 = 30;

fn main() {
    setup_linker();
    let output = validate_config();
    generate_output(&output);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate power.toml and return the single configured output
fn validate_config() -> NamedOutput {
    // Re-run if power.toml changes
    println!("cargo:rerun-if-changed=power.toml");

    let config_path = Path::new("power.toml");

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            fail(
                "Failed to read power.toml",
                &[format!("Error: {}", e), "Create power.toml next to Cargo.toml".to_string()],
            );
        }
    };

    // Syntax first, for a readable error with line information
    if let Err(e) = toml::from_str::<toml::Value>(&config_content) {
        let lines: Vec<String> = e.to_string().lines().map(str::to_string).collect();
        fail("Invalid TOML syntax in power.toml", &lines);
    }

    let outputs = match parse_outputs(&config_content) {
        Ok(outputs) => outputs,
        Err(e) => fail("Invalid output in power.toml", &[e.to_string()]),
    };

    if outputs.len() != 1 {
        fail(
            "power.toml must declare exactly one output",
            &[format!("Found {} [output.*] tables", outputs.len())],
        );
    }

    let output = outputs.outputs[0].clone();
    if output.config.pin.0 >= RP2040_GPIO_COUNT {
        fail(
            "Output pin not available on RP2040",
            &[format!(
                "[output.{}] uses {}, valid pins are gpio0-gpio{}",
                output.name,
                output.config.pin,
                RP2040_GPIO_COUNT - 1
            )],
        );
    }

    println!("cargo:warning=power.toml validated successfully");
    output
}

/// Write the output constants and the pin-taking macro
fn generate_output(output: &NamedOutput) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let config = &output.config;

    let drive = match output.drive {
        Some(strength) => format!("Some(DriveCapability::{})", drive_variant(strength)),
        None => "None".to_string(),
    };

    let source = format!(
        "// Generated from power.toml by build.rs\n\
         pub const OUTPUT_NAME: &str = {name:?};\n\
         pub const OUTPUT: PowerConfig = PowerConfig {{ pin: PinNumber({pin}), inverted: {inverted}, initial_on: {initial_on} }};\n\
         pub const OUTPUT_DRIVE: Option<DriveCapability> = {drive};\n\
         macro_rules! take_output_pin {{\n\
         \x20   ($p:expr) => {{ powerctl_hal_rp2040::take_pin!($p, {pin}) }};\n\
         }}\n",
        name = output.name.as_str(),
        pin = config.pin.0,
        inverted = config.inverted,
        initial_on = config.initial_on,
        drive = drive,
    );

    fs::write(out_dir.join("power_output.rs"), source).unwrap();
}

fn drive_variant(strength: DriveCapability) -> &'static str {
    match strength {
        DriveCapability::Weakest => "Weakest",
        DriveCapability::Weak => "Weak",
        DriveCapability::Medium => "Medium",
        DriveCapability::Strongest => "Strongest",
    }
}

/// Abort the build with a boxed error message
fn fail(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        format_error_lines(lines)
    );
}

/// Format error message lines with box drawing
fn format_error_lines(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.clone()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
