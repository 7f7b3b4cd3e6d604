use std::time::{Duration, Instant};

use banner_model::{ContentMode, IndicatorAlignment, Rgb, ViewportSize};
use tracing::{debug, info, warn};

use super::indicator::PageIndicator;
use super::loop_buffer;
use super::render::SlotRenderer;
use super::surface::{PagingSurface, SurfaceEvent, SurfaceOptions};
use super::timer::{AutoAdvanceTimer, DEFAULT_INTERVAL};
use crate::events::{CarouselNotice, ImageHandle};

/// Redraw cadence while the surface is animating.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Clone)]
pub struct CarouselOptions {
    pub auto_advance_interval: Duration,
    pub surface: SurfaceOptions,
    pub viewport: ViewportSize,
    pub content_mode: ContentMode,
    pub indicator_alignment: IndicatorAlignment,
    pub current_page_tint: Rgb,
    pub page_tint: Rgb,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            auto_advance_interval: DEFAULT_INTERVAL,
            surface: SurfaceOptions::default(),
            viewport: ViewportSize::new(0.0, 0.0),
            content_mode: ContentMode::default(),
            indicator_alignment: IndicatorAlignment::default(),
            current_page_tint: Rgb(0, 180, 255),
            page_tint: Rgb(255, 255, 255),
        }
    }
}

/// Ties the loop buffer, paging surface, auto-advance timer and page
/// indicator together.
///
/// Rules:
/// - The logical page only changes when the surface reports a settle; ticks
///   and indicator taps just request scrolls.
/// - A settle on a buffer slot is answered with an instant jump to the real
///   copy of the same item.
/// - Dragging pauses the timer, releasing resumes it.
/// - Surface events are drained in a loop, so the settle caused by a rewrap is
///   handled after the settle that requested it.
pub struct CarouselController<P> {
    items: Vec<ImageHandle>,
    current_page: usize,
    viewport: ViewportSize,
    interval: Duration,
    content_mode: ContentMode,
    alignment: IndicatorAlignment,
    surface: PagingSurface,
    timer: AutoAdvanceTimer,
    indicator: P,
    renderer: SlotRenderer,
    notices: Vec<CarouselNotice>,
    torn_down: bool,
}

impl<P: PageIndicator> CarouselController<P> {
    pub fn new(options: CarouselOptions, mut indicator: P) -> Self {
        let placement = options.indicator_alignment.placement();
        indicator.set_tints(options.current_page_tint, options.page_tint);
        indicator.set_placement(placement);
        indicator.set_page_count(0);
        Self {
            items: Vec::new(),
            current_page: 0,
            viewport: options.viewport,
            interval: options.auto_advance_interval,
            content_mode: options.content_mode,
            alignment: options.indicator_alignment,
            surface: PagingSurface::new(options.surface),
            timer: AutoAdvanceTimer::new(options.auto_advance_interval),
            indicator,
            renderer: SlotRenderer::new(),
            notices: vec![CarouselNotice::IndicatorPlaced(placement)],
            torn_down: false,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[ImageHandle] {
        &self.items
    }

    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    pub fn alignment(&self) -> IndicatorAlignment {
        self.alignment
    }

    pub fn surface(&self) -> &PagingSurface {
        &self.surface
    }

    pub fn timer(&self) -> &AutoAdvanceTimer {
        &self.timer
    }

    pub fn indicator(&self) -> &P {
        &self.indicator
    }

    pub fn renderer(&self) -> &SlotRenderer {
        &self.renderer
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn take_notices(&mut self) -> Vec<CarouselNotice> {
        std::mem::take(&mut self.notices)
    }

    /// Replaces the item list and resets to the first page.
    pub fn set_items(&mut self, items: Vec<ImageHandle>, now: Instant) {
        if self.torn_down {
            warn!("set_items after teardown ignored");
            return;
        }
        let count = items.len();
        self.items = items;
        // A scroll requested against the old list must not settle on the new one.
        self.surface.cancel_animation();
        self.relayout();

        self.current_page = 0;
        if self.viewport.is_laid_out() && count > 0 {
            self.surface
                .scroll_to_slot(loop_buffer::slot_of_page(0, count), false, now);
        }
        self.indicator.set_page_count(count);
        self.indicator.set_current_page(0);
        self.notices.push(CarouselNotice::CurrentPageChanged(0));

        if count > 0 {
            self.restart_timer(now);
        } else {
            self.timer.stop();
        }
        info!(
            items = count,
            looping = loop_buffer::looping(count),
            interval_ms = self.interval.as_millis() as u64,
            "carousel items set"
        );
        self.drain_surface(now);
    }

    pub fn viewport_resized(&mut self, width: f32, height: f32, now: Instant) {
        let sanitize = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        let viewport = ViewportSize::new(sanitize(width), sanitize(height));
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.relayout();

        let count = self.items.len();
        if self.viewport.is_laid_out() && count > 0 && self.surface.settled_slot().is_none() {
            // First positive width after a deferred layout.
            let slot = loop_buffer::slot_of_page(self.current_page, count);
            self.surface.scroll_to_slot(slot, false, now);
        }
        self.drain_surface(now);
    }

    /// Changes the auto-advance interval and restarts the countdown.
    pub fn set_auto_advance_interval(&mut self, interval: Duration, now: Instant) {
        if interval.is_zero() {
            warn!("auto-advance interval must be positive; keeping current");
            return;
        }
        self.interval = interval;
        if !self.items.is_empty() && !self.torn_down {
            self.restart_timer(now);
        }
        debug!(interval_ms = interval.as_millis() as u64, "auto-advance reconfigured");
    }

    /// Only moves the indicator; paging is unaffected.
    pub fn set_indicator_alignment(&mut self, alignment: IndicatorAlignment) {
        if alignment == self.alignment {
            return;
        }
        self.alignment = alignment;
        let placement = alignment.placement();
        self.indicator.set_placement(placement);
        self.notices.push(CarouselNotice::IndicatorPlaced(placement));
    }

    /// Refits every painted slot; paging is unaffected.
    pub fn set_content_mode(&mut self, content_mode: ContentMode) {
        if content_mode == self.content_mode {
            return;
        }
        self.content_mode = content_mode;
        self.relayout();
    }

    pub fn drag_begin(&mut self, now: Instant) {
        self.surface.drag_begin(now);
        self.drain_surface(now);
    }

    pub fn drag_move(&mut self, dx: f32) {
        self.surface.drag_move(dx);
    }

    pub fn drag_end(&mut self, velocity: f32, now: Instant) {
        self.surface.drag_end(velocity, now);
        self.drain_surface(now);
    }

    /// A dot on the indicator was tapped.
    pub fn indicator_selected(&mut self, page: usize, now: Instant) {
        let count = self.items.len();
        if count == 0 {
            return;
        }
        if page >= count {
            warn!(page, pages = count, "indicator selection out of range; clamping");
        }
        let slot = loop_buffer::slot_of_page(page.min(count - 1), count);
        self.surface.scroll_to_slot(slot, true, now);
        self.drain_surface(now);
    }

    /// Steps the surface animation and fires a due auto-advance tick.
    pub fn advance(&mut self, now: Instant) {
        self.surface.advance(now);
        self.drain_surface(now);
        if self.timer.poll(now) {
            self.on_tick(now);
        }
    }

    /// Earliest instant at which [`advance`](Self::advance) has work to do.
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        let frame = self.surface.is_animating().then(|| now + FRAME_INTERVAL);
        match (frame, self.timer.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn on_tick(&mut self, now: Instant) {
        debug_assert!(!self.torn_down, "auto-advance tick after teardown");
        if self.torn_down {
            return;
        }
        let count = self.items.len();
        if !loop_buffer::looping(count) {
            return;
        }
        // The slot after the current real one; from the last page that is
        // the trailing buffer slot, which rewraps to the first page.
        let next = loop_buffer::slot_of_page(self.current_page, count) + 1;
        debug!(from = self.current_page, slot = next, "auto-advance tick");
        self.surface.scroll_to_slot(next, true, now);
        self.drain_surface(now);
    }

    fn on_settled(&mut self, slot: usize, now: Instant) {
        let count = self.items.len();
        if count == 0 {
            return;
        }
        let resolved = loop_buffer::real_page_of(slot, count);
        if resolved.page != self.current_page {
            self.current_page = resolved.page;
            self.indicator.set_current_page(resolved.page);
            self.notices
                .push(CarouselNotice::CurrentPageChanged(resolved.page));
        }
        debug!(slot, page = resolved.page, "surface settled");
        if let Some(target) = resolved.rewrap {
            debug!(from = slot, to = target, "rewrap");
            self.surface.scroll_to_slot(target, false, now);
        }
    }

    fn drain_surface(&mut self, now: Instant) {
        while let Some(event) = self.surface.next_event() {
            match event {
                SurfaceEvent::DragBegin => self.timer.pause(now),
                SurfaceEvent::DragEnd => self.timer.resume(now),
                SurfaceEvent::Settled(slot) => self.on_settled(slot, now),
            }
        }
    }

    /// Full interval from `now`; held paused while a drag is in progress.
    fn restart_timer(&mut self, now: Instant) {
        self.timer.start(self.interval, now);
        if self.surface.is_dragging() {
            self.timer.pause(now);
        }
    }

    fn relayout(&mut self) {
        let count = self.items.len();
        let slots = loop_buffer::layout(count, self.viewport.width);
        if !self.viewport.is_laid_out() && count > 0 {
            warn!(
                width = self.viewport.width,
                "viewport width not positive; layout deferred"
            );
        }
        self.surface
            .configure(loop_buffer::slot_count(count), self.viewport.width);
        let updates = self
            .renderer
            .sync(&slots, &self.items, self.viewport, self.content_mode);
        if !updates.is_empty() {
            self.notices.push(CarouselNotice::SlotsRepainted(updates));
        }
    }

    /// Stops the timer for good. Must run before the controller is dropped
    /// by whoever drives it.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.timer.stop();
        self.torn_down = true;
        info!("carousel torn down");
    }
}
