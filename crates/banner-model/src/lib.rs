use anyhow::{Result, ensure};
use serde::Deserialize;

pub use indicator::{
    HorizontalAnchor, IndicatorAlignment, IndicatorConfig, IndicatorPlacement, Rgb,
};
pub use viewport::{ContentMode, ViewportSize};

mod indicator {
    use super::*;

    /// Where the page indicator sits along the bottom edge of the banner.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
    #[serde(rename_all = "kebab-case")]
    pub enum IndicatorAlignment {
        Start,
        Center,
        #[default]
        End,
        /// The indicator is never attached.
        Hidden,
    }

    impl IndicatorAlignment {
        const EDGE_INSET: f32 = 10.0;
        const BOTTOM_INSET: f32 = 4.0;
        const HEIGHT: f32 = 14.0;

        /// Resolves the alignment into concrete placement, or `None` when the
        /// indicator should stay detached.
        pub fn placement(self) -> Option<IndicatorPlacement> {
            let horizontal = match self {
                IndicatorAlignment::Start => HorizontalAnchor::Leading(Self::EDGE_INSET),
                IndicatorAlignment::Center => HorizontalAnchor::Center,
                IndicatorAlignment::End => HorizontalAnchor::Trailing(Self::EDGE_INSET),
                IndicatorAlignment::Hidden => return None,
            };
            Some(IndicatorPlacement {
                horizontal,
                bottom_inset: Self::BOTTOM_INSET,
                height: Self::HEIGHT,
            })
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum HorizontalAnchor {
        /// Inset from the leading edge.
        Leading(f32),
        Center,
        /// Inset from the trailing edge.
        Trailing(f32),
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct IndicatorPlacement {
        pub horizontal: HorizontalAnchor,
        pub bottom_inset: f32,
        pub height: f32,
    }

    impl IndicatorPlacement {
        /// Left edge of an indicator `indicator_width` wide inside a banner
        /// `banner_width` wide.
        pub fn origin_x(&self, banner_width: f32, indicator_width: f32) -> f32 {
            match self.horizontal {
                HorizontalAnchor::Leading(inset) => inset,
                HorizontalAnchor::Center => (banner_width - indicator_width) / 2.0,
                HorizontalAnchor::Trailing(inset) => banner_width - inset - indicator_width,
            }
        }

        /// Top edge inside a banner `banner_height` tall.
        pub fn origin_y(&self, banner_height: f32) -> f32 {
            banner_height - self.bottom_inset - self.height
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
    pub struct Rgb(pub u8, pub u8, pub u8);

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
    pub struct IndicatorConfig {
        pub alignment: IndicatorAlignment,
        pub current_page_tint: Rgb,
        pub page_tint: Rgb,
    }

    impl Default for IndicatorConfig {
        fn default() -> Self {
            Self {
                alignment: IndicatorAlignment::default(),
                current_page_tint: Rgb(0, 180, 255),
                page_tint: Rgb(255, 255, 255),
            }
        }
    }
}

mod viewport {
    use super::*;

    /// How a slot's image is fitted into the slot frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
    #[serde(rename_all = "kebab-case")]
    pub enum ContentMode {
        Fill,
        AspectFit,
        #[default]
        AspectFill,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
    #[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
    pub struct ViewportSize {
        pub width: f32,
        pub height: f32,
    }

    impl ViewportSize {
        pub const fn new(width: f32, height: f32) -> Self {
            Self { width, height }
        }

        /// Layout can only happen once the width is known and positive.
        pub fn is_laid_out(&self) -> bool {
            self.width.is_finite() && self.width > 0.0
        }

        pub fn validate(&self) -> Result<()> {
            ensure!(
                self.width.is_finite() && self.height.is_finite(),
                "viewport dimensions must be finite"
            );
            ensure!(
                self.width >= 0.0 && self.height >= 0.0,
                "viewport dimensions must not be negative"
            );
            Ok(())
        }
    }

    impl Default for ViewportSize {
        fn default() -> Self {
            Self::new(375.0, 200.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alignment_defaults_to_end() {
        assert_eq!(IndicatorAlignment::default(), IndicatorAlignment::End);
    }

    #[test]
    fn hidden_alignment_has_no_placement() {
        assert!(IndicatorAlignment::Hidden.placement().is_none());
    }

    #[test]
    fn placement_offsets_follow_alignment() {
        let start = IndicatorAlignment::Start.placement().unwrap();
        assert_eq!(start.origin_x(300.0, 60.0), 10.0);

        let center = IndicatorAlignment::Center.placement().unwrap();
        assert_eq!(center.origin_x(300.0, 60.0), 120.0);

        let end = IndicatorAlignment::End.placement().unwrap();
        assert_eq!(end.origin_x(300.0, 60.0), 230.0);
        assert_eq!(end.origin_y(200.0), 182.0);
    }

    #[test]
    fn parse_indicator_block() {
        let yaml = r#"
alignment: center
current-page-tint: [1, 2, 3]
"#;
        let cfg: IndicatorConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.alignment, IndicatorAlignment::Center);
        assert_eq!(cfg.current_page_tint, Rgb(1, 2, 3));
        assert_eq!(cfg.page_tint, Rgb(255, 255, 255));
    }

    #[test]
    fn negative_viewport_rejected() {
        assert!(ViewportSize::new(-1.0, 10.0).validate().is_err());
        assert!(ViewportSize::new(0.0, 10.0).validate().is_ok());
        assert!(!ViewportSize::new(0.0, 10.0).is_laid_out());
    }
}
