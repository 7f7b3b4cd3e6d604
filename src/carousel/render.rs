//! Slot repaint bookkeeping.
//!
//! Remembers what each slot last showed and where, so a layout pass only
//! yields work for slots whose image or frame actually changed.

use banner_model::{ContentMode, ViewportSize};

use super::loop_buffer::Slot;
use crate::events::ImageHandle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotFrame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlotPaint {
    pub slot: usize,
    pub image: ImageHandle,
    pub frame: SlotFrame,
    pub content_mode: ContentMode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderUpdate {
    Paint(SlotPaint),
    Remove(usize),
}

#[derive(Debug, Default)]
pub struct SlotRenderer {
    painted: Vec<SlotPaint>,
}

impl SlotRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn painted(&self) -> &[SlotPaint] {
        &self.painted
    }

    /// Diffs the wanted slot contents against what was painted last time.
    pub fn sync(
        &mut self,
        slots: &[Slot],
        items: &[ImageHandle],
        viewport: ViewportSize,
        content_mode: ContentMode,
    ) -> Vec<RenderUpdate> {
        let wanted: Vec<SlotPaint> = slots
            .iter()
            .filter_map(|slot| {
                let image = items.get(slot.source)?.clone();
                Some(SlotPaint {
                    slot: slot.index,
                    image,
                    frame: SlotFrame {
                        x: slot.origin_x(viewport.width),
                        y: 0.0,
                        width: viewport.width,
                        height: viewport.height,
                    },
                    content_mode,
                })
            })
            .collect();

        let mut updates = Vec::new();
        for paint in &wanted {
            if self.painted.get(paint.slot) != Some(paint) {
                updates.push(RenderUpdate::Paint(paint.clone()));
            }
        }
        for stale in wanted.len()..self.painted.len() {
            updates.push(RenderUpdate::Remove(stale));
        }
        self.painted = wanted;
        updates
    }
}
