/// Example showing different logging configurations
///
/// Run with: cargo run --example logging_config
use log::LevelFilter;
use scribble::logging::{LogConfig, LogFeatures};
use std::path::PathBuf;

fn main() {
    println!("=== Scribble Logging Configuration Examples ===\n");

    // Example 1: Default configuration
    println!("1. Default configuration:");
    let default = LogConfig::default();
    println!("   enabled: {}", default.enabled);
    println!("   level: {:?}", default.level);
    println!("   clear_on_startup: {}", default.clear_on_startup);
    println!("   log_file: {:?}\n", default.log_file);

    // Example 2: Verbose logging (all features)
    println!("2. Verbose logging (all features):");
    let verbose = LogConfig::verbose();
    println!("   level: {:?}", verbose.level);
    println!("   features.api_calls: {}", verbose.features.api_calls);
    println!("   features.key_events: {}\n", verbose.features.key_events);

    // Example 3: Custom configuration
    println!("3. Custom configuration (API calls only, appending):");
    let custom = LogConfig {
        enabled: true,
        log_file: PathBuf::from("custom_debug.log"),
        clear_on_startup: false, // Append to existing log
        features: LogFeatures {
            api_calls: true,
            key_events: false,
            general: false,
        },
        level: LevelFilter::Debug,
    };
    println!("   log_file: {:?}", custom.log_file);
    println!("   features.api_calls: {}", custom.features.api_calls);
    println!("   features.general: {}\n", custom.features.general);

    println!("To use any of these configurations in the client:");
    println!("  let log_config = logging::LogConfig::default(); // or verbose()");
    println!("  logging::init_logging(&log_config)?;");
}
