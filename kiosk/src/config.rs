//! Environment-driven configuration, read once at startup.

use std::path::PathBuf;

use epaper::DisplayProfile;
use layout_engine::EcLevel;

/// Default TTF used for label text.
const DEFAULT_FONT_PATH: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

/// Which driver implementation backs the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverChoice {
    /// Logged, lifecycle-checked stand-in with optional PNG frame dumps.
    Sim,
    /// Accepts everything silently.
    Noop,
}

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub server_port: u16,
    /// Connected panel, from `DISPLAY_TYPE`.
    pub profile: DisplayProfile,
    pub display_driver: DriverChoice,
    /// When set, the simulator dumps each frame as PNG here.
    pub sim_output_dir: Option<PathBuf>,
    pub font_path: PathBuf,
    pub error_correction: EcLevel,
    pub ruler_width_cm: u32,
    /// Draw the boot splash on startup.
    pub splash: bool,
    /// Bound on one full display refresh cycle.
    pub transfer_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: 8080,
            profile: DisplayProfile::EPD_1IN54,
            display_driver: DriverChoice::Sim,
            sim_output_dir: None,
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
            error_correction: EcLevel::H,
            ruler_width_cm: 2,
            splash: true,
            transfer_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self, anyhow::Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from a key lookup.
    ///
    /// Malformed values fall back to their defaults with a warning; an
    /// unknown panel type or correction level is a startup error.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, anyhow::Error> {
        let g = |key: &str| get(key).unwrap_or_default();

        let type_id = {
            let t = g("DISPLAY_TYPE");
            if t.is_empty() { "1.54".to_owned() } else { t }
        };
        let Some(profile) = DisplayProfile::from_type_id(&type_id) else {
            anyhow::bail!("unknown DISPLAY_TYPE {type_id:?} (expected 1.54 or 2.9)");
        };

        let ec = g("ERROR_CORRECTION");
        let error_correction = if ec.is_empty() {
            EcLevel::H
        } else {
            EcLevel::parse(&ec).ok_or_else(|| {
                anyhow::anyhow!("unknown ERROR_CORRECTION {ec:?} (expected L, M, Q or H)")
            })?
        };

        let display_driver = match g("DISPLAY_DRIVER").as_str() {
            "" | "sim" => DriverChoice::Sim,
            "noop" => DriverChoice::Noop,
            other => {
                tracing::warn!(value = other, "Unknown DISPLAY_DRIVER, using sim");
                DriverChoice::Sim
            }
        };

        let sim_output_dir = {
            let d = g("SIM_OUTPUT_DIR");
            if d.is_empty() { None } else { Some(PathBuf::from(d)) }
        };
        let font_path = {
            let p = g("FONT_PATH");
            if p.is_empty() {
                PathBuf::from(DEFAULT_FONT_PATH)
            } else {
                PathBuf::from(p)
            }
        };

        Ok(Self {
            server_port: parse_u16("SERVER_PORT", &g("SERVER_PORT"), 8080),
            profile,
            display_driver,
            sim_output_dir,
            font_path,
            error_correction,
            ruler_width_cm: parse_u32("RULER_WIDTH_CM", &g("RULER_WIDTH_CM"), 2).max(1),
            splash: parse_bool("SPLASH", &g("SPLASH"), true),
            transfer_timeout_secs: parse_u64(
                "TRANSFER_TIMEOUT_SECS",
                &g("TRANSFER_TIMEOUT_SECS"),
                30,
            ),
        })
    }
}

fn parse_u16(key: &str, value: &str, default: u16) -> u16 {
    if value.is_empty() {
        return default;
    }
    value.parse().unwrap_or_else(|_| {
        tracing::warn!(key, value, "Invalid value, using {default}");
        default
    })
}

fn parse_u32(key: &str, value: &str, default: u32) -> u32 {
    if value.is_empty() {
        return default;
    }
    value.parse().unwrap_or_else(|_| {
        tracing::warn!(key, value, "Invalid value, using {default}");
        default
    })
}

fn parse_u64(key: &str, value: &str, default: u64) -> u64 {
    if value.is_empty() {
        return default;
    }
    value.parse().unwrap_or_else(|_| {
        tracing::warn!(key, value, "Invalid value, using {default}");
        default
    })
}

fn parse_bool(key: &str, value: &str, default: bool) -> bool {
    match value {
        "" => default,
        "true" => true,
        "false" => false,
        _ => {
            tracing::warn!(key, value, "Invalid value, using {default}");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_owned())
        }
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn values_are_read_from_the_lookup() {
        let config = AppConfig::from_lookup(lookup(&[
            ("SERVER_PORT", "9090"),
            ("DISPLAY_TYPE", "2.9"),
            ("DISPLAY_DRIVER", "noop"),
            ("SIM_OUTPUT_DIR", "/tmp/frames"),
            ("FONT_PATH", "/tmp/font.ttf"),
            ("ERROR_CORRECTION", "l"),
            ("RULER_WIDTH_CM", "4"),
            ("SPLASH", "false"),
            ("TRANSFER_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.server_port, 9090);
        assert_eq!(config.profile, DisplayProfile::EPD_2IN9);
        assert_eq!(config.display_driver, DriverChoice::Noop);
        assert_eq!(config.sim_output_dir, Some(PathBuf::from("/tmp/frames")));
        assert_eq!(config.font_path, PathBuf::from("/tmp/font.ttf"));
        assert_eq!(config.error_correction, EcLevel::L);
        assert_eq!(config.ruler_width_cm, 4);
        assert!(!config.splash);
        assert_eq!(config.transfer_timeout_secs, 5);
    }

    #[test]
    fn malformed_numbers_fall_back() {
        let config = AppConfig::from_lookup(lookup(&[
            ("SERVER_PORT", "not-a-port"),
            ("TRANSFER_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.transfer_timeout_secs, 30);
    }

    #[test]
    fn zero_ruler_width_is_clamped() {
        let config = AppConfig::from_lookup(lookup(&[("RULER_WIDTH_CM", "0")])).unwrap();
        assert_eq!(config.ruler_width_cm, 1);
    }

    #[test]
    fn unknown_display_type_is_a_startup_error() {
        assert!(AppConfig::from_lookup(lookup(&[("DISPLAY_TYPE", "7.5")])).is_err());
    }

    #[test]
    fn unknown_error_correction_is_a_startup_error() {
        assert!(AppConfig::from_lookup(lookup(&[("ERROR_CORRECTION", "X")])).is_err());
    }

    #[test]
    fn unknown_driver_falls_back_to_sim() {
        let config = AppConfig::from_lookup(lookup(&[("DISPLAY_DRIVER", "spi")])).unwrap();
        assert_eq!(config.display_driver, DriverChoice::Sim);
    }
}
