use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use crate::carousel::{CarouselOptions, SurfaceOptions};
use crate::carousel::timer::DEFAULT_INTERVAL;

pub use banner_model::{ContentMode, IndicatorAlignment, IndicatorConfig, Rgb, ViewportSize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Configuration {
    /// Directory scanned recursively for banner images.
    pub image_library_path: PathBuf,
    /// Explicit image list; when non-empty the library scan is skipped.
    pub images: Vec<PathBuf>,
    /// Time each banner stays put before the carousel advances.
    #[serde(with = "humantime_serde")]
    pub auto_advance_interval: Duration,
    /// Duration of programmatic and release scroll animations.
    #[serde(with = "humantime_serde")]
    pub scroll_animation: Duration,
    /// Release velocity (px/s) above which a swipe moves to the neighbouring banner.
    pub fling_velocity: f32,
    /// Initial viewport; the host may resize it later.
    pub viewport: ViewportSize,
    /// How images are fitted into their slot.
    pub content_mode: ContentMode,
    /// Page indicator placement and tints.
    pub indicator: IndicatorConfig,
}

impl Configuration {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&s)?)
    }

    /// Validate runtime invariants that cannot be expressed via serde defaults alone.
    pub fn validated(self) -> Result<Self> {
        ensure!(
            !self.auto_advance_interval.is_zero(),
            "auto-advance-interval must be greater than zero"
        );
        ensure!(
            !self.scroll_animation.is_zero(),
            "scroll-animation must be greater than zero"
        );
        ensure!(
            self.scroll_animation < self.auto_advance_interval,
            "scroll-animation must be shorter than auto-advance-interval"
        );
        ensure!(
            self.fling_velocity.is_finite() && self.fling_velocity > 0.0,
            "fling-velocity must be positive"
        );
        self.viewport
            .validate()
            .context("invalid viewport configuration")?;
        Ok(self)
    }

    pub fn carousel_options(&self) -> CarouselOptions {
        CarouselOptions {
            auto_advance_interval: self.auto_advance_interval,
            surface: SurfaceOptions {
                animation: self.scroll_animation,
                fling_velocity: self.fling_velocity,
            },
            viewport: self.viewport,
            content_mode: self.content_mode,
            indicator_alignment: self.indicator.alignment,
            current_page_tint: self.indicator.current_page_tint,
            page_tint: self.indicator.page_tint,
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        let surface = SurfaceOptions::default();
        Self {
            image_library_path: PathBuf::from("banners"),
            images: Vec::new(),
            auto_advance_interval: DEFAULT_INTERVAL,
            scroll_animation: surface.animation,
            fling_velocity: surface.fling_velocity,
            viewport: ViewportSize::default(),
            content_mode: ContentMode::default(),
            indicator: IndicatorConfig::default(),
        }
    }
}
