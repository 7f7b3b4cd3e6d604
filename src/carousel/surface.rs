//! Horizontally paging viewport over a row of fixed-width slots.
//!
//! The surface owns the scroll offset. It only ever comes to rest on a whole
//! slot boundary and reports each rest exactly once through
//! [`SurfaceEvent::Settled`]. A new programmatic scroll supersedes an
//! animation that is still running; the superseded target is never reported.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

/// Fraction of a slot a released drag must cross to move on to the next slot.
const SNAP_THRESHOLD: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    DragBegin,
    DragEnd,
    Settled(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceOptions {
    /// Duration of programmatic and release animations.
    pub animation: Duration,
    /// Release velocity (px/s) above which a drag flings to the neighbouring slot.
    pub fling_velocity: f32,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            animation: Duration::from_millis(300),
            fling_velocity: 400.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Animation {
    from: f32,
    target: usize,
    started: Instant,
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    origin_slot: usize,
}

#[derive(Debug)]
pub struct PagingSurface {
    options: SurfaceOptions,
    slot_count: usize,
    viewport_width: f32,
    offset: f32,
    settled_slot: Option<usize>,
    animation: Option<Animation>,
    drag: Option<Drag>,
    events: VecDeque<SurfaceEvent>,
}

impl PagingSurface {
    pub fn new(options: SurfaceOptions) -> Self {
        Self {
            options,
            slot_count: 0,
            viewport_width: 0.0,
            offset: 0.0,
            settled_slot: None,
            animation: None,
            drag: None,
            events: VecDeque::new(),
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    /// Content extent, `slot_count * viewport_width`.
    pub fn content_width(&self) -> f32 {
        self.slot_count as f32 * self.viewport_width
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn settled_slot(&self) -> Option<usize> {
        self.settled_slot
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    fn laid_out(&self) -> bool {
        self.slot_count > 0 && self.viewport_width > 0.0
    }

    fn max_offset(&self) -> f32 {
        self.slot_count.saturating_sub(1) as f32 * self.viewport_width
    }

    fn clamp_slot(&self, slot: usize) -> usize {
        slot.min(self.slot_count.saturating_sub(1))
    }

    fn nearest_slot(&self) -> usize {
        if self.viewport_width <= 0.0 {
            return 0;
        }
        let slot = (self.offset / self.viewport_width).round().max(0.0);
        self.clamp_slot(slot as usize)
    }

    /// Resizes the content. The logical slot is kept and re-expressed at the
    /// new width; an animation still in flight finishes on its target. A drag
    /// in progress keeps its fractional position and settles on release.
    pub fn configure(&mut self, slot_count: usize, viewport_width: f32) {
        let previous_width = self.viewport_width;
        let keep = match self.animation.take() {
            Some(animation) => Some(animation.target),
            None => self.settled_slot,
        };
        let finished_animation = keep.is_some() && self.settled_slot != keep;

        self.slot_count = slot_count;
        self.viewport_width = if viewport_width.is_finite() {
            viewport_width.max(0.0)
        } else {
            0.0
        };

        if !self.laid_out() {
            debug!(slot_count, viewport_width, "surface layout deferred");
            self.offset = 0.0;
            self.settled_slot = None;
            self.drag = None;
            return;
        }

        if let Some(drag) = self.drag {
            let position = if previous_width > 0.0 {
                self.offset / previous_width
            } else {
                keep.unwrap_or(drag.origin_slot) as f32
            };
            self.offset = (position * self.viewport_width).clamp(0.0, self.max_offset());
            self.drag = Some(Drag {
                origin_slot: self.clamp_slot(drag.origin_slot),
            });
            // The rest slot is decided by the release.
            self.settled_slot = None;
        } else {
            match keep {
                Some(slot) => {
                    let slot = self.clamp_slot(slot);
                    self.offset = slot as f32 * self.viewport_width;
                    if finished_animation {
                        self.settle(slot);
                    } else {
                        self.settled_slot = Some(slot);
                    }
                }
                None => {
                    self.offset = 0.0;
                    self.settled_slot = None;
                }
            }
        }
        trace!(
            slot_count,
            viewport_width = self.viewport_width,
            offset = self.offset,
            "surface configured"
        );
    }

    /// Moves to `slot`. Without animation the move is instant and settles
    /// immediately; with animation it settles once [`advance`](Self::advance)
    /// observes the end of the transition.
    pub fn scroll_to_slot(&mut self, slot: usize, animated: bool, now: Instant) {
        if !self.laid_out() {
            return;
        }
        if self.drag.is_some() {
            debug!(slot, "programmatic scroll ignored during drag");
            return;
        }
        let slot = self.clamp_slot(slot);

        if let Some(animation) = self.animation {
            if animated && animation.target == slot {
                return;
            }
            // Freeze at the current position; the old target will not settle.
            self.offset = self.animated_offset(&animation, now).0;
            self.animation = None;
        } else if self.settled_slot == Some(slot) {
            return;
        }

        if animated {
            self.animation = Some(Animation {
                from: self.offset,
                target: slot,
                started: now,
            });
        } else {
            self.offset = slot as f32 * self.viewport_width;
            self.settle(slot);
        }
    }

    /// Drops an in-flight animation without settling on its target.
    pub fn cancel_animation(&mut self) {
        if self.animation.take().is_some() {
            if let Some(slot) = self.settled_slot {
                self.offset = slot as f32 * self.viewport_width;
            }
        }
    }

    pub fn drag_begin(&mut self, now: Instant) {
        if self.drag.is_some() {
            return;
        }
        if let Some(animation) = self.animation.take() {
            let (offset, done) = self.animated_offset(&animation, now);
            if done {
                self.offset = animation.target as f32 * self.viewport_width;
                self.settle(animation.target);
            } else {
                self.offset = offset;
            }
        }
        self.drag = Some(Drag {
            origin_slot: self.nearest_slot(),
        });
        self.events.push_back(SurfaceEvent::DragBegin);
    }

    /// Applies a finger movement of `dx` pixels. Positive `dx` drags the
    /// content right, revealing the previous slot.
    pub fn drag_move(&mut self, dx: f32) {
        if self.drag.is_none() || !self.laid_out() || !dx.is_finite() {
            return;
        }
        self.offset = (self.offset - dx).clamp(0.0, self.max_offset());
    }

    /// Releases the drag with the finger's horizontal `velocity` in px/s.
    pub fn drag_end(&mut self, velocity: f32, now: Instant) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        self.events.push_back(SurfaceEvent::DragEnd);
        if !self.laid_out() {
            return;
        }

        let target = self.release_target(drag, velocity);
        let rest = target as f32 * self.viewport_width;
        if (self.offset - rest).abs() < f32::EPSILON {
            self.offset = rest;
            if self.settled_slot != Some(target) {
                self.settle(target);
            }
            return;
        }
        self.animation = Some(Animation {
            from: self.offset,
            target,
            started: now,
        });
    }

    fn release_target(&self, drag: Drag, velocity: f32) -> usize {
        let fling = self.options.fling_velocity;
        if velocity.is_finite() && velocity.abs() >= fling {
            let target = if velocity < 0.0 {
                drag.origin_slot + 1
            } else {
                drag.origin_slot.saturating_sub(1)
            };
            return self.clamp_slot(target);
        }

        let position = self.offset / self.viewport_width;
        let base = position.floor();
        let target = if position - base >= SNAP_THRESHOLD {
            base + 1.0
        } else {
            base
        };
        self.clamp_slot(target.max(0.0) as usize)
    }

    /// Steps a running animation; settles when it has run its course.
    pub fn advance(&mut self, now: Instant) {
        let Some(animation) = self.animation else {
            return;
        };
        let (offset, done) = self.animated_offset(&animation, now);
        if done {
            self.animation = None;
            self.offset = animation.target as f32 * self.viewport_width;
            self.settle(animation.target);
        } else {
            self.offset = offset;
        }
    }

    fn animated_offset(&self, animation: &Animation, now: Instant) -> (f32, bool) {
        let to = animation.target as f32 * self.viewport_width;
        let elapsed = now.saturating_duration_since(animation.started);
        let duration = self.options.animation;
        if duration.is_zero() || elapsed >= duration {
            return (to, true);
        }
        let t = elapsed.as_secs_f32() / duration.as_secs_f32();
        let eased = 1.0 - (1.0 - t).powi(3);
        (animation.from + (to - animation.from) * eased, false)
    }

    fn settle(&mut self, slot: usize) {
        self.settled_slot = Some(slot);
        self.events.push_back(SurfaceEvent::Settled(slot));
    }

    pub fn next_event(&mut self) -> Option<SurfaceEvent> {
        self.events.pop_front()
    }

    #[cfg(test)]
    fn drain(&mut self) -> Vec<SurfaceEvent> {
        self.events.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(slots: usize, width: f32) -> PagingSurface {
        let mut surface = PagingSurface::new(SurfaceOptions::default());
        surface.configure(slots, width);
        surface
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn instant_jump_settles_once() {
        let t0 = Instant::now();
        let mut s = surface(5, 100.0);
        s.scroll_to_slot(1, false, t0);
        assert_eq!(s.offset(), 100.0);
        assert_eq!(s.drain(), vec![SurfaceEvent::Settled(1)]);

        s.scroll_to_slot(1, false, t0);
        assert!(s.drain().is_empty(), "no transition, no settle");
    }

    #[test]
    fn animated_scroll_settles_after_duration() {
        let t0 = Instant::now();
        let mut s = surface(5, 100.0);
        s.scroll_to_slot(1, false, t0);
        s.drain();

        s.scroll_to_slot(2, true, t0);
        s.advance(t0 + ms(100));
        assert!(s.is_animating());
        assert!(s.offset() > 100.0 && s.offset() < 200.0);
        assert!(s.drain().is_empty());

        s.advance(t0 + ms(300));
        assert!(!s.is_animating());
        assert_eq!(s.offset(), 200.0);
        assert_eq!(s.drain(), vec![SurfaceEvent::Settled(2)]);
    }

    #[test]
    fn superseded_animation_never_settles() {
        let t0 = Instant::now();
        let mut s = surface(6, 100.0);
        s.scroll_to_slot(1, false, t0);
        s.drain();

        s.scroll_to_slot(2, true, t0);
        s.scroll_to_slot(3, true, t0 + ms(50));
        s.advance(t0 + ms(1000));
        assert_eq!(s.drain(), vec![SurfaceEvent::Settled(3)]);
    }

    #[test]
    fn instant_jump_supersedes_animation() {
        let t0 = Instant::now();
        let mut s = surface(6, 100.0);
        s.scroll_to_slot(1, false, t0);
        s.drain();

        s.scroll_to_slot(4, true, t0);
        s.scroll_to_slot(2, false, t0 + ms(10));
        s.advance(t0 + ms(1000));
        assert_eq!(s.drain(), vec![SurfaceEvent::Settled(2)]);
        assert_eq!(s.offset(), 200.0);
    }

    #[test]
    fn slow_release_snaps_to_nearest() {
        let t0 = Instant::now();
        let mut s = surface(5, 100.0);
        s.scroll_to_slot(2, false, t0);
        s.drain();

        s.drag_begin(t0);
        s.drag_move(-40.0);
        s.drag_end(0.0, t0);
        s.advance(t0 + ms(500));
        assert_eq!(
            s.drain(),
            vec![
                SurfaceEvent::DragBegin,
                SurfaceEvent::DragEnd,
                SurfaceEvent::Settled(2)
            ]
        );

        s.drag_begin(t0);
        s.drag_move(-60.0);
        s.drag_end(0.0, t0);
        s.advance(t0 + ms(500));
        assert_eq!(s.settled_slot(), Some(3));
    }

    #[test]
    fn fling_moves_one_slot() {
        let t0 = Instant::now();
        let mut s = surface(5, 100.0);
        s.scroll_to_slot(2, false, t0);
        s.drain();

        s.drag_begin(t0);
        s.drag_move(10.0);
        s.drag_end(900.0, t0);
        s.advance(t0 + ms(500));
        assert_eq!(s.settled_slot(), Some(1));
        assert_eq!(s.offset(), 100.0);
    }

    #[test]
    fn drag_clamps_to_content() {
        let t0 = Instant::now();
        let mut s = surface(3, 100.0);
        s.scroll_to_slot(0, false, t0);
        s.drag_begin(t0);
        s.drag_move(500.0);
        assert_eq!(s.offset(), 0.0);
        s.drag_move(-5000.0);
        assert_eq!(s.offset(), 200.0);
    }

    #[test]
    fn drag_interrupts_animation_without_settle() {
        let t0 = Instant::now();
        let mut s = surface(5, 100.0);
        s.scroll_to_slot(1, false, t0);
        s.drain();

        s.scroll_to_slot(3, true, t0);
        s.drag_begin(t0 + ms(100));
        assert!(!s.is_animating());
        assert_eq!(s.drain(), vec![SurfaceEvent::DragBegin]);

        s.scroll_to_slot(4, true, t0 + ms(110));
        assert!(!s.is_animating(), "programmatic scroll ignored while dragging");
    }

    #[test]
    fn configure_preserves_slot_at_new_width() {
        let t0 = Instant::now();
        let mut s = surface(5, 100.0);
        s.scroll_to_slot(3, false, t0);
        s.drain();

        s.configure(5, 250.0);
        assert_eq!(s.offset(), 750.0);
        assert_eq!(s.settled_slot(), Some(3));
        assert!(s.drain().is_empty());
        assert_eq!(s.content_width(), 1250.0);
    }

    #[test]
    fn configure_during_drag_keeps_finger_position() {
        let t0 = Instant::now();
        let mut s = surface(5, 128.0);
        s.scroll_to_slot(2, false, t0);
        s.drain();

        s.drag_begin(t0);
        s.drag_move(-32.0);
        assert_eq!(s.offset(), 288.0);

        s.configure(5, 256.0);
        assert_eq!(s.offset(), 576.0);
        assert!(s.is_dragging());
        assert_eq!(s.settled_slot(), None);

        s.drag_move(-32.0);
        assert_eq!(s.offset(), 608.0);
        s.drag_end(0.0, t0);
        s.advance(t0 + ms(300));
        assert_eq!(
            s.drain(),
            vec![
                SurfaceEvent::DragBegin,
                SurfaceEvent::DragEnd,
                SurfaceEvent::Settled(2)
            ]
        );
        assert_eq!(s.offset(), 512.0);
    }

    #[test]
    fn configure_finishes_inflight_animation() {
        let t0 = Instant::now();
        let mut s = surface(5, 100.0);
        s.scroll_to_slot(1, false, t0);
        s.drain();

        s.scroll_to_slot(2, true, t0);
        s.configure(5, 200.0);
        assert_eq!(s.drain(), vec![SurfaceEvent::Settled(2)]);
        assert_eq!(s.offset(), 400.0);
    }

    #[test]
    fn cancelled_animation_returns_to_settled_slot() {
        let t0 = Instant::now();
        let mut s = surface(5, 100.0);
        s.scroll_to_slot(1, false, t0);
        s.drain();

        s.scroll_to_slot(3, true, t0);
        s.advance(t0 + ms(100));
        s.cancel_animation();
        s.advance(t0 + ms(1000));
        assert!(s.drain().is_empty());
        assert_eq!(s.offset(), 100.0);
    }

    #[test]
    fn zero_width_defers_layout() {
        let t0 = Instant::now();
        let mut s = surface(5, 0.0);
        s.scroll_to_slot(2, false, t0);
        assert!(s.drain().is_empty());
        assert_eq!(s.settled_slot(), None);
    }
}
