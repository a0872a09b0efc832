//! Build script for everlcd-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml and turns it into a `LcdConfig` constant

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use everlcd_core::config::LcdConfig;

fn main() {
    setup_linker();
    let config = load_config();
    generate_config(&config);
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

/// Read, parse and validate board.toml
fn load_config() -> LcdConfig {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a board.toml configuration file.          ║\n\
            ║  Please create one in the everlcd-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read board.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let value: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail("Invalid TOML syntax in board.toml", &e.to_string()),
    };

    check_unknown_keys(&value);

    let config: LcdConfig = match value.try_into() {
        Ok(config) => config,
        Err(e) => fail("Invalid value in board.toml", &e.to_string()),
    };

    if let Err(e) = config.validate() {
        fail("Invalid board configuration", &format!("{:?}", e));
    }

    println!("cargo:warning=board.toml validated successfully");
    config
}

/// Reject keys the config types would silently ignore
fn check_unknown_keys(value: &toml::Value) {
    const SECTIONS: &[(&str, &[&str])] = &[
        ("timing", &["setup_ns", "write_pulse_ns", "access_ns"]),
        (
            "layout",
            &[
                "text_home",
                "text_columns",
                "text_rows",
                "graphic_home",
                "graphic_columns",
                "graphic_lines",
                "cgram_base",
                "ram_size",
            ],
        ),
        ("serial", &["baudrate", "resync_timeout_ms"]),
    ];
    const TOP_LEVEL: &[&str] = &["poll_limit", "auto_poll_limit", "cursor_lines"];

    let Some(root) = value.as_table() else {
        return;
    };

    let mut errors = Vec::new();

    for (key, entry) in root {
        match SECTIONS.iter().find(|(name, _)| name == key) {
            Some((section, known)) => match entry.as_table() {
                Some(table) => {
                    for field in table.keys() {
                        if !known.contains(&field.as_str()) {
                            errors.push(format!("[{}] unknown key '{}'", section, field));
                        }
                    }
                }
                None => errors.push(format!("[{}] must be a table", section)),
            },
            None if TOP_LEVEL.contains(&key.as_str()) => {}
            None => errors.push(format!("unknown key '{}'", key)),
        }
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Unknown keys in board.toml                               ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }
}

/// Write `lcd_config.rs` into OUT_DIR
fn generate_config(config: &LcdConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let t = &config.timing;
    let l = &config.layout;
    let s = &config.serial;

    let source = format!(
        "pub const LCD_CONFIG: LcdConfig = LcdConfig {{\n\
        \x20   timing: BusTiming {{ setup_ns: {}, write_pulse_ns: {}, access_ns: {} }},\n\
        \x20   poll_limit: {},\n\
        \x20   auto_poll_limit: {},\n\
        \x20   layout: MemoryLayout {{\n\
        \x20       text_home: {:#06x},\n\
        \x20       text_columns: {},\n\
        \x20       text_rows: {},\n\
        \x20       graphic_home: {:#06x},\n\
        \x20       graphic_columns: {},\n\
        \x20       graphic_lines: {},\n\
        \x20       cgram_base: {:#06x},\n\
        \x20       ram_size: {:#x},\n\
        \x20   }},\n\
        \x20   cursor_lines: {},\n\
        \x20   serial: SerialConfig {{ baudrate: {}, resync_timeout_ms: {} }},\n\
        }};\n",
        t.setup_ns,
        t.write_pulse_ns,
        t.access_ns,
        config.poll_limit,
        config.auto_poll_limit,
        l.text_home,
        l.text_columns,
        l.text_rows,
        l.graphic_home,
        l.graphic_columns,
        l.graphic_lines,
        l.cgram_base,
        l.ram_size,
        config.cursor_lines,
        s.baudrate,
        s.resync_timeout_ms,
    );

    fs::write(out_dir.join("lcd_config.rs"), source).unwrap();
}

/// Abort the build with a boxed error message
fn fail(title: &str, detail: &str) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        ║                                                                  ║\n\
        {}\n\
        ║                                                                  ║\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        format_error_lines(detail)
    );
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
