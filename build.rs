use std::env;

/// Build-time configuration defaults.
///
/// The access-point credentials and control port can be overridden without
/// touching source by exporting environment variables before building:
///
/// ```sh
/// WIFI_AP_SSID=MyPlane WIFI_AP_PASSWORD=secret123 cargo build --release
/// ```
fn main() {
    emit_env("WIFI_AP_SSID", "PicoW-RCPlane");
    emit_env("WIFI_AP_PASSWORD", "rcplane123");
    emit_env("WIFI_AP_CHANNEL", "5");
    emit_env("RCLINK_PORT", "4444");

    // Embedded builds pick up memory.x from the crate root.
    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os == "none" {
        let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
        println!("cargo:rustc-link-search={manifest_dir}");
        println!("cargo:rerun-if-changed=memory.x");
    }
}

fn emit_env(key: &str, default: &str) {
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    println!("cargo:rustc-env={key}={value}");
    println!("cargo:rerun-if-env-changed={key}");
}
