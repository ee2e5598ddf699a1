use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::StaticConfig;

static CONFIG: OnceLock<ArcSwap<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Returns an Arc pointer to the configuration, which is cheap to clone
/// and doesn't hold any locks.
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG
        .get()
        .expect("Config not initialized. Call init_config_from() first.")
        .load_full()
}

/// Initialize the global configuration from a TOML path, `config.toml` when `None`.
///
/// Only the first call has an effect.
///
/// # Examples
/// ```no_run
/// use shortly::config::init_config_from;
/// init_config_from(Some("/etc/shortly/config.toml"));
/// ```
pub fn init_config_from(path: Option<&str>) {
    CONFIG.get_or_init(|| ArcSwap::from_pointee(StaticConfig::load(path)));
}
