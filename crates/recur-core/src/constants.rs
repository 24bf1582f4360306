/// Prefix for environment variables read by the configuration loader.
pub const ENV_PREFIX: &str = "RECUR";

/// Default configuration file looked up in the working directory.
pub const CONFIG_FILE_STEM: &str = "config";
pub const CONFIG_FILE_NAME: &str = const_str::concat!(CONFIG_FILE_STEM, ".toml");

/// Zone used when none is configured.
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Number of occurrences listed when the caller does not ask for a specific amount.
pub const DEFAULT_AMOUNT: usize = 10;

/// Upper bound on occurrences a single request may ask for.
pub const MAX_AMOUNT: usize = 10_000;

pub const DEFAULT_LOG_LEVEL: &str = "info";
