//! Slot layout for the infinite-loop illusion.
//!
//! With `n >= 2` items the surface holds `n + 2` slots: slot 0 duplicates the
//! last item, slots `1..=n` are the real items and slot `n + 1` duplicates the
//! first. Settling on either duplicate is resolved to the real page it shows
//! together with the real slot the surface must silently jump to.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub index: usize,
    /// Index into the item list whose image this slot shows.
    pub source: usize,
}

impl Slot {
    pub fn is_buffer(&self, item_count: usize) -> bool {
        looping(item_count) && (self.index == 0 || self.index == item_count + 1)
    }

    /// Left edge of the slot in surface coordinates.
    pub fn origin_x(&self, viewport_width: f32) -> f32 {
        self.index as f32 * viewport_width
    }
}

/// Logical page for a settled slot, plus the slot to re-center on when the
/// settle landed on a buffer slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub page: usize,
    pub rewrap: Option<usize>,
}

/// Looping needs at least two items; one item (or none) is shown statically.
pub fn looping(item_count: usize) -> bool {
    item_count >= 2
}

pub fn slot_count(item_count: usize) -> usize {
    if looping(item_count) {
        item_count + 2
    } else {
        item_count
    }
}

/// Builds the padded slot sequence. The viewport width only matters for
/// whether layout can happen at all: nothing is laid out until it is positive.
pub fn layout(item_count: usize, viewport_width: f32) -> Vec<Slot> {
    if viewport_width.is_nan() || viewport_width <= 0.0 || item_count == 0 {
        return Vec::new();
    }
    if !looping(item_count) {
        return vec![Slot {
            index: 0,
            source: 0,
        }];
    }

    let mut slots = Vec::with_capacity(item_count + 2);
    slots.push(Slot {
        index: 0,
        source: item_count - 1,
    });
    slots.extend((0..item_count).map(|source| Slot {
        index: source + 1,
        source,
    }));
    slots.push(Slot {
        index: item_count + 1,
        source: 0,
    });
    slots
}

/// Slot showing the real copy of `page`. Out-of-range pages are clamped.
pub fn slot_of_page(page: usize, item_count: usize) -> usize {
    if !looping(item_count) {
        return 0;
    }
    page.min(item_count - 1) + 1
}

pub fn real_page_of(slot: usize, item_count: usize) -> Resolved {
    if !looping(item_count) {
        return Resolved {
            page: 0,
            rewrap: None,
        };
    }
    if slot >= item_count + 1 {
        Resolved {
            page: 0,
            rewrap: Some(1),
        }
    } else if slot == 0 {
        Resolved {
            page: item_count - 1,
            rewrap: Some(item_count),
        }
    } else {
        Resolved {
            page: slot - 1,
            rewrap: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_layout_wraps_both_ends() {
        for n in 2..8 {
            let slots = layout(n, 320.0);
            assert_eq!(slots.len(), n + 2);
            assert_eq!(slots[0].source, n - 1);
            assert_eq!(slots[n + 1].source, 0);
            for (i, slot) in slots.iter().enumerate() {
                assert_eq!(slot.index, i);
            }
            assert!(slots[0].is_buffer(n));
            assert!(slots[n + 1].is_buffer(n));
            assert!(!slots[1].is_buffer(n));
        }
    }

    #[test]
    fn short_lists_are_not_padded() {
        assert!(layout(0, 320.0).is_empty());
        assert_eq!(layout(1, 320.0), vec![Slot { index: 0, source: 0 }]);
        assert_eq!(slot_count(1), 1);
        assert_eq!(slot_count(0), 0);
    }

    #[test]
    fn layout_deferred_without_width() {
        assert!(layout(3, 0.0).is_empty());
        assert!(layout(3, -5.0).is_empty());
        assert!(layout(3, f32::NAN).is_empty());
    }

    #[test]
    fn pages_resolve_back_to_themselves() {
        let n = 5;
        for page in 0..n {
            let resolved = real_page_of(slot_of_page(page, n), n);
            assert_eq!(resolved.page, page);
            assert_eq!(resolved.rewrap, None);
        }
    }

    #[test]
    fn buffer_slots_rewrap() {
        let n = 4;
        assert_eq!(
            real_page_of(n + 1, n),
            Resolved {
                page: 0,
                rewrap: Some(1)
            }
        );
        assert_eq!(
            real_page_of(0, n),
            Resolved {
                page: n - 1,
                rewrap: Some(n)
            }
        );
    }

    #[test]
    fn out_of_range_page_clamps() {
        assert_eq!(slot_of_page(99, 3), 3);
        assert_eq!(slot_of_page(2, 1), 0);
    }
}
