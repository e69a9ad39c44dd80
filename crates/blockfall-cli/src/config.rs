use std::{fs::File, io::BufReader, ops::RangeInclusive, path::Path};

use anyhow::{Context as _, ensure};
use blockfall_engine::{DropSchedule, PieceSeed};
use serde::{Deserialize, Serialize};

/// Accepted logical tick rates (Hz).
pub(crate) const TICK_RATE_RANGE: RangeInclusive<f64> = 1.0..=1000.0;

/// Play settings, loaded from an optional JSON file.
///
/// Missing fields take their default values:
///
/// ```json
/// {
///   "tick_rate": 25.0,
///   "start_drop_ticks": 12,
///   "final_drop_ticks": 2,
///   "auto_restart": true,
///   "seed": null
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct PlayConfig {
    /// Logical ticks per second.
    pub(crate) tick_rate: f64,
    pub(crate) start_drop_ticks: u64,
    pub(crate) final_drop_ticks: u64,
    pub(crate) auto_restart: bool,
    pub(crate) seed: Option<PieceSeed>,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            tick_rate: DropSchedule::DEFAULT_TICK_RATE,
            start_drop_ticks: DropSchedule::DEFAULT_START_TICKS,
            final_drop_ticks: DropSchedule::DEFAULT_FINAL_TICKS,
            auto_restart: true,
            seed: None,
        }
    }
}

impl PlayConfig {
    pub(crate) fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let config: Self = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub(crate) fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            TICK_RATE_RANGE.contains(&self.tick_rate),
            "tick rate must be between {} and {} Hz, got {}",
            TICK_RATE_RANGE.start(),
            TICK_RATE_RANGE.end(),
            self.tick_rate
        );
        Ok(())
    }

    pub(crate) fn schedule(&self) -> DropSchedule {
        DropSchedule::new(self.start_drop_ticks, self.final_drop_ticks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PlayConfig = serde_json::from_str(r#"{ "tick_rate": 50.0 }"#).unwrap();
        assert_eq!(
            config,
            PlayConfig {
                tick_rate: 50.0,
                ..PlayConfig::default()
            }
        );
        assert_eq!(config.schedule(), DropSchedule::default());
    }

    #[test]
    fn test_seed_field() {
        let json = r#"{ "seed": "000102030405060708090a0b0c0d0e0f", "auto_restart": false }"#;
        let config: PlayConfig = serde_json::from_str(json).unwrap();
        assert_eq!(
            config.seed,
            Some(PieceSeed::from_bytes([
                0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15
            ]))
        );
        assert!(!config.auto_restart);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!(serde_json::from_str::<PlayConfig>(r#"{ "speed": 3 }"#).is_err());
    }

    #[test]
    fn test_validate_tick_rate() {
        for tick_rate in [0.0, -1.0, 0.5, 1e-300, 1000.5, 1e300, f64::NAN, f64::INFINITY] {
            let config = PlayConfig {
                tick_rate,
                ..PlayConfig::default()
            };
            assert!(config.validate().is_err());
        }
        for tick_rate in [*TICK_RATE_RANGE.start(), 25.0, *TICK_RATE_RANGE.end()] {
            let config = PlayConfig {
                tick_rate,
                ..PlayConfig::default()
            };
            assert!(config.validate().is_ok(), "{tick_rate}");
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = PlayConfig::load(Path::new("/nonexistent/blockfall.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to open config file"));
    }
}
