use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use banner_model::{ContentMode, IndicatorAlignment, IndicatorPlacement};

use crate::carousel::render::RenderUpdate;

/// Opaque, cheaply clonable reference to a banner image. Decoding is left to
/// whoever paints the slots.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ImageHandle(Arc<PathBuf>);

impl ImageHandle {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageHandle({})", self.0.display())
    }
}

impl From<PathBuf> for ImageHandle {
    fn from(path: PathBuf) -> Self {
        Self(Arc::new(path))
    }
}

impl From<&str> for ImageHandle {
    fn from(path: &str) -> Self {
        Self(Arc::new(PathBuf::from(path)))
    }
}

/// Host -> carousel.
#[derive(Debug, Clone, PartialEq)]
pub enum CarouselCommand {
    SetItems(Vec<ImageHandle>),
    SetAutoAdvanceInterval(Duration),
    SetIndicatorAlignment(IndicatorAlignment),
    SetContentMode(ContentMode),
    ViewportResized { width: f32, height: f32 },
    DragBegin,
    DragMove(f32),
    DragEnd { velocity: f32 },
    IndicatorSelected(usize),
}

/// Carousel -> host.
#[derive(Debug, Clone, PartialEq)]
pub enum CarouselNotice {
    CurrentPageChanged(usize),
    SlotsRepainted(Vec<RenderUpdate>),
    IndicatorPlaced(Option<IndicatorPlacement>),
}
