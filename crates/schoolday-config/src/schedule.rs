use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Which built-in period table stands in when the backend sends none.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FallbackCatalog {
    /// Ten periods, 07:00 to 17:15.
    #[default]
    Standard,
    /// Nine periods, 08:00 to 16:15.
    Compact,
}

impl FallbackCatalog {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Compact => "compact",
        }
    }
}

impl fmt::Display for FallbackCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FallbackCatalog {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "compact" => Ok(Self::Compact),
            other => Err(format!("unknown fallback catalog: {other}")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleConfig {
    pub fallback: FallbackCatalog,
    /// Synthesize "Nghỉ giữa giờ" slots for gaps the catalog leaves open.
    pub insert_breaks: bool,
    pub clock_tick: Duration,
}

impl ScheduleConfig {
    pub fn from_env() -> Self {
        let fallback = env::var("FALLBACK_PERIODS")
            .ok()
            .and_then(|s| match s.parse() {
                Ok(catalog) => Some(catalog),
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring FALLBACK_PERIODS");
                    None
                }
            })
            .unwrap_or_default();

        let insert_breaks = env::var("INSERT_BREAKS")
            .ok()
            .and_then(|s| parse_bool(&s))
            .unwrap_or(true);

        let tick_seconds = env::var("CLOCK_TICK_SECONDS")
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|s| *s > 0)
            .unwrap_or(1);

        Self {
            fallback,
            insert_breaks,
            clock_tick: Duration::from_secs(tick_seconds),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            fallback: FallbackCatalog::Standard,
            insert_breaks: true,
            clock_tick: Duration::from_secs(1),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
