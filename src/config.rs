use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_INTERVAL_MS: u64 = 800;
pub const ENV_INTERVAL_MS: &str = "MATE_REPLAY_INTERVAL_MS";
pub const ENV_ASCII: &str = "MATE_REPLAY_ASCII";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemoConfig {
    /// Delay between autoplay moves.
    pub interval: Duration,
    /// Draw pieces as FEN letters instead of Unicode glyphs.
    pub ascii: bool,
    /// Optional JSON scenario list replacing the built-ins.
    pub scenario_file: Option<PathBuf>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self { interval: Duration::from_millis(DEFAULT_INTERVAL_MS), ascii: false, scenario_file: None }
    }
}

fn env_parse_u64(name: &str) -> Option<u64> { std::env::var(name).ok().and_then(|s| s.parse().ok()) }

fn env_parse_bool(name: &str) -> Option<bool> {
    std::env::var(name).ok().and_then(|s| match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    })
}

impl DemoConfig {
    /// Defaults with `MATE_REPLAY_*` environment overrides applied.
    /// Unparseable values are ignored.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(ms) = env_parse_u64(ENV_INTERVAL_MS) { cfg.interval = Duration::from_millis(ms); }
        if let Some(ascii) = env_parse_bool(ENV_ASCII) { cfg.ascii = ascii; }
        cfg
    }

    /// Layer explicit command line values over this config.
    pub fn with_overrides(mut self, interval_ms: Option<u64>, ascii: bool, scenario_file: Option<PathBuf>) -> Self {
        if let Some(ms) = interval_ms { self.interval = Duration::from_millis(ms); }
        if ascii { self.ascii = true; }
        if scenario_file.is_some() { self.scenario_file = scenario_file; }
        self
    }
}
