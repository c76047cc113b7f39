//! Tunables for a backdrop session, loaded from JSON.
//!
//! Every field has a default, so `{}` is a complete configuration.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::animation::ease::Ease;
use crate::effects::blur::BlurPass;
use crate::foundation::core::Rgb8;
use crate::foundation::error::{BackdropError, BackdropResult};
use crate::render::surface::PowerPreference;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackdropConfig {
    pub scheduler: SchedulerConfig,
    pub crossfade: CrossfadeConfig,
    pub scroll: ScrollConfig,
    pub surface: SurfaceConfig,
    pub filters: FilterConfig,
    pub host: HostConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchedulerConfig {
    /// Maximum motion updates per second.
    pub target_fps: f64,
    /// Scales the per-tick motion step.
    pub speed_factor: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            target_fps: 15.0,
            speed_factor: 0.75,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CrossfadeConfig {
    pub duration_ms: f64,
    pub ease: Ease,
}

impl Default for CrossfadeConfig {
    fn default() -> Self {
        Self {
            duration_ms: crate::scene::crossfade::DEFAULT_DURATION_MS,
            ease: Ease::SmoothStep,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollConfig {
    pub throttle_ms: f64,
    /// Vertical tie window for anchor selection, CSS pixels.
    pub tie_epsilon_px: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            throttle_ms: crate::scene::selector::DEFAULT_SCROLL_THROTTLE_MS,
            tie_epsilon_px: crate::scene::selector::DEFAULT_TIE_EPSILON_PX,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SurfaceConfig {
    /// Backing-store pixels per device pixel.
    pub render_scale: f64,
    pub power_preference: PowerPreference,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            render_scale: 0.25,
            power_preference: PowerPreference::LowPower,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TwistConfig {
    pub angle_deg: f64,
    /// CSS pixels.
    pub radius: f64,
}

impl Default for TwistConfig {
    fn default() -> Self {
        Self {
            angle_deg: -3.5,
            radius: 900.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    pub brightness: f64,
    pub contrast: f64,
    pub twist: TwistConfig,
    /// Applied in order.
    pub blur: Vec<BlurPass>,
    pub saturation: f64,
    pub tint: Rgb8,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            brightness: 1.0,
            contrast: 1.15,
            twist: TwistConfig::default(),
            blur: vec![
                BlurPass {
                    quality: 2,
                    strength: 10.0,
                },
                BlurPass {
                    quality: 2,
                    strength: 30.0,
                },
                BlurPass {
                    quality: 2,
                    strength: 40.0,
                },
                BlurPass {
                    quality: 3,
                    strength: 60.0,
                },
            ],
            saturation: 4.0,
            tint: Rgb8(255, 217, 179),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    /// Simulated display refresh rate.
    pub refresh_hz: f64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self { refresh_hz: 60.0 }
    }
}

impl BackdropConfig {
    /// Parse a configuration from JSON.
    pub fn from_reader<R: std::io::Read>(r: R) -> BackdropResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| BackdropError::serde(format!("parse backdrop config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> BackdropResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            BackdropError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> BackdropResult<()> {
        positive("scheduler.target_fps", self.scheduler.target_fps)?;
        non_negative("scheduler.speed_factor", self.scheduler.speed_factor)?;
        positive("crossfade.duration_ms", self.crossfade.duration_ms)?;
        non_negative("scroll.throttle_ms", self.scroll.throttle_ms)?;
        non_negative("scroll.tie_epsilon_px", self.scroll.tie_epsilon_px)?;
        positive("surface.render_scale", self.surface.render_scale)?;
        non_negative("filters.brightness", self.filters.brightness)?;
        non_negative("filters.contrast", self.filters.contrast)?;
        finite("filters.twist.angle_deg", self.filters.twist.angle_deg)?;
        non_negative("filters.twist.radius", self.filters.twist.radius)?;
        for pass in &self.filters.blur {
            pass.validate()?;
        }
        finite("filters.saturation", self.filters.saturation)?;
        positive("host.refresh_hz", self.host.refresh_hz)?;
        Ok(())
    }
}

fn finite(name: &str, v: f64) -> BackdropResult<()> {
    if !v.is_finite() {
        return Err(BackdropError::validation(format!("{name} must be finite")));
    }
    Ok(())
}

fn positive(name: &str, v: f64) -> BackdropResult<()> {
    finite(name, v)?;
    if v <= 0.0 {
        return Err(BackdropError::validation(format!("{name} must be > 0")));
    }
    Ok(())
}

fn non_negative(name: &str, v: f64) -> BackdropResult<()> {
    finite(name, v)?;
    if v < 0.0 {
        return Err(BackdropError::validation(format!("{name} must be >= 0")));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
