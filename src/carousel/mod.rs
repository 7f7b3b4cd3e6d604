//! Infinite auto-scrolling image banner.
//!
//! [`CarouselController`] is the entry point; the other modules are its parts
//! and can be driven on their own.

pub mod controller;
pub mod indicator;
pub mod loop_buffer;
pub mod render;
pub mod surface;
pub mod timer;

pub use controller::{CarouselController, CarouselOptions};
pub use indicator::{IndicatorModel, PageIndicator, TracingIndicator};
pub use surface::{PagingSurface, SurfaceEvent, SurfaceOptions};
pub use timer::AutoAdvanceTimer;
