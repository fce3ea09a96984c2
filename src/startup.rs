// Startup module - displays banner and module loading status
//
// This module provides a professional startup experience showing:
// - Version info and branding
// - Configuration loaded from file
// - Module loading status with checkmarks

use crate::config::{Config, VERSION};
use sha2::{Digest, Sha256};

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const MAGENTA: &str = "\x1b[35m";
}

/// Module loading result for display
pub struct ModuleStatus {
    pub name: &'static str,
    pub enabled: bool,
    pub description: &'static str,
}

/// Short fingerprint of a credential, safe for banners and logs
///
/// SHA-256 hex prefix; never print the actual key.
pub fn key_fingerprint(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    let hash = hasher.finalize();
    format!("{:x}", hash)[..16].to_string()
}

/// Print the startup banner and module loading status
pub fn print_startup(config: &Config) {
    use colors::*;

    // Banner
    println!();
    println!("  {BOLD}{CYAN}poegate{RESET} {DIM}v{VERSION}{RESET}");
    println!("  {DIM}OpenAI-compatible gateway for Poe bots{RESET}");
    println!();

    // Config file status
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("  {DIM}Config:{RESET} {GREEN}✓{RESET} {}", path.display());
        } else {
            println!("  {DIM}Config:{RESET} {DIM}(using defaults){RESET}");
        }
    }
    println!();

    // Module loading
    println!("  {DIM}Loading modules...{RESET}");

    let modules = get_module_status(config);
    for module in &modules {
        print_module_status(module);
    }

    println!();

    // Gateway info
    println!(
        "  {MAGENTA}▸{RESET} Gateway listening on {BOLD}{}{RESET}",
        config.bind_addr
    );
    println!(
        "  {MAGENTA}▸{RESET} Upstream {BOLD}{}{RESET}",
        config.api_url
    );
    if config.default_api_key.is_empty() {
        println!(
            "  {YELLOW}▸{RESET} {YELLOW}No default API key{RESET} {DIM}(requests must carry their own){RESET}"
        );
    } else {
        println!(
            "  {MAGENTA}▸{RESET} Default API key {DIM}(sha256:{}…){RESET}",
            key_fingerprint(&config.default_api_key)
        );
    }
    println!();
}

/// Get status of all modules based on config
fn get_module_status(config: &Config) -> Vec<ModuleStatus> {
    vec![
        ModuleStatus {
            name: "gateway",
            enabled: true, // Core, always on
            description: "HTTP endpoints",
        },
        ModuleStatus {
            name: "upstream",
            enabled: true, // Core, always on
            description: "Poe bot protocol",
        },
        ModuleStatus {
            name: "default-key",
            enabled: !config.default_api_key.is_empty(),
            description: "Fallback credential",
        },
        ModuleStatus {
            name: "file-log",
            enabled: config.logging.file_enabled,
            description: "JSON log files",
        },
    ]
}

/// Print a single module's status
fn print_module_status(module: &ModuleStatus) {
    use colors::*;

    let (icon, style) = if module.enabled {
        (format!("{GREEN}✓{RESET}"), "")
    } else {
        (format!("{DIM}○{RESET}"), DIM)
    };

    println!(
        "    {icon} {style}{:<12}{RESET} {DIM}{}{RESET}",
        module.name, module.description
    );
}

/// Print startup messages through tracing so they land in file logs too
pub fn log_startup(config: &Config) {
    tracing::info!("═══════════════════════════════════");
    tracing::info!("  poegate v{}", VERSION);
    tracing::info!("═══════════════════════════════════");

    let modules = get_module_status(config);
    for module in &modules {
        let icon = if module.enabled { "✓" } else { "○" };
        tracing::info!("  {} {} - {}", icon, module.name, module.description);
    }

    tracing::info!("▸ Listening on {}", config.bind_addr);
    tracing::info!("▸ Upstream {}", config.api_url);
    if !config.default_api_key.is_empty() {
        tracing::info!(
            "▸ Default API key sha256:{}…",
            key_fingerprint(&config.default_api_key)
        );
    }

    tracing::info!("Ready. Waiting for requests...");
}
