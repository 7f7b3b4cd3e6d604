use banner_model::{IndicatorPlacement, Rgb};
use tracing::debug;

/// Page-dot indicator collaborator. Rendering is up to the implementor; the
/// carousel only keeps it in sync. Taps on a dot come back in through
/// [`CarouselController::indicator_selected`](super::CarouselController::indicator_selected).
pub trait PageIndicator {
    fn set_page_count(&mut self, count: usize);
    fn set_current_page(&mut self, page: usize);
    /// `None` detaches the indicator from the banner.
    fn set_placement(&mut self, placement: Option<IndicatorPlacement>);
    fn set_tints(&mut self, _current: Rgb, _other: Rgb) {}
}

/// Indicator state as a renderer would need it.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorModel {
    pub page_count: usize,
    pub current_page: usize,
    pub placement: Option<IndicatorPlacement>,
    pub current_tint: Rgb,
    pub page_tint: Rgb,
}

impl IndicatorModel {
    /// Dots are hidden for a single page, like a lone dot would be noise.
    pub fn is_visible(&self) -> bool {
        self.placement.is_some() && self.page_count > 1
    }
}

impl Default for IndicatorModel {
    fn default() -> Self {
        Self {
            page_count: 0,
            current_page: 0,
            placement: None,
            current_tint: Rgb(0, 180, 255),
            page_tint: Rgb(255, 255, 255),
        }
    }
}

impl PageIndicator for IndicatorModel {
    fn set_page_count(&mut self, count: usize) {
        self.page_count = count;
        self.current_page = self.current_page.min(count.saturating_sub(1));
    }

    fn set_current_page(&mut self, page: usize) {
        self.current_page = page;
    }

    fn set_placement(&mut self, placement: Option<IndicatorPlacement>) {
        self.placement = placement;
    }

    fn set_tints(&mut self, current: Rgb, other: Rgb) {
        self.current_tint = current;
        self.page_tint = other;
    }
}

/// Headless indicator that only logs what it would draw.
#[derive(Debug, Default)]
pub struct TracingIndicator {
    model: IndicatorModel,
}

impl PageIndicator for TracingIndicator {
    fn set_page_count(&mut self, count: usize) {
        self.model.set_page_count(count);
        debug!(count, visible = self.model.is_visible(), "indicator page count");
    }

    fn set_current_page(&mut self, page: usize) {
        self.model.set_current_page(page);
        debug!(page, "indicator current page");
    }

    fn set_placement(&mut self, placement: Option<IndicatorPlacement>) {
        self.model.set_placement(placement);
        debug!(?placement, "indicator placement");
    }

    fn set_tints(&mut self, current: Rgb, other: Rgb) {
        self.model.set_tints(current, other);
    }
}
