use std::time::Instant;

use anyhow::Result;
use tokio::select;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio::time::{self, sleep_until};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::carousel::{CarouselController, CarouselOptions, PageIndicator};
use crate::events::{CarouselCommand, CarouselNotice, ImageHandle};

/// Owns the carousel for its whole lifetime on a single task.
///
/// Rules:
/// - Commands, timer ticks and animation frames are handled one at a time.
/// - Sleeps until the controller's next deadline (timer tick or animation frame).
/// - Exits on cancellation or when the command channel closes; either way the
///   controller is torn down before returning so no tick can fire afterwards.
pub async fn run<P: PageIndicator>(
    options: CarouselOptions,
    indicator: P,
    items: Vec<ImageHandle>,
    mut commands: Receiver<CarouselCommand>,
    notices: Sender<CarouselNotice>,
    cancel: CancellationToken,
) -> Result<()> {
    let mut controller = CarouselController::new(options, indicator);
    if !items.is_empty() {
        controller.set_items(items, now());
    }
    info!(items = controller.item_count(), "carousel task started");

    let result = drive(&mut controller, &mut commands, &notices, &cancel).await;
    controller.teardown();
    info!("carousel task stopped");
    result
}

async fn drive<P: PageIndicator>(
    controller: &mut CarouselController<P>,
    commands: &mut Receiver<CarouselCommand>,
    notices: &Sender<CarouselNotice>,
    cancel: &CancellationToken,
) -> Result<()> {
    loop {
        for notice in controller.take_notices() {
            if notices.send(notice).await.is_err() {
                warn!("notice channel closed");
                // Break rather than drive a carousel nobody is watching.
                return Ok(());
            }
        }

        let deadline = controller.next_deadline(now());
        let wake = deadline
            .map(time::Instant::from_std)
            .unwrap_or_else(time::Instant::now);

        select! {
            _ = cancel.cancelled() => break,

            maybe_cmd = commands.recv() => match maybe_cmd {
                Some(cmd) => apply(controller, cmd),
                None => {
                    debug!("command channel closed");
                    break;
                }
            },

            _ = sleep_until(wake), if deadline.is_some() => {
                controller.advance(now());
            }
        }
    }
    Ok(())
}

fn apply<P: PageIndicator>(controller: &mut CarouselController<P>, cmd: CarouselCommand) {
    let now = now();
    debug!(?cmd, "carousel command");
    match cmd {
        CarouselCommand::SetItems(items) => controller.set_items(items, now),
        CarouselCommand::SetAutoAdvanceInterval(interval) => {
            controller.set_auto_advance_interval(interval, now)
        }
        CarouselCommand::SetIndicatorAlignment(alignment) => {
            controller.set_indicator_alignment(alignment)
        }
        CarouselCommand::SetContentMode(mode) => controller.set_content_mode(mode),
        CarouselCommand::ViewportResized { width, height } => {
            controller.viewport_resized(width, height, now)
        }
        CarouselCommand::DragBegin => controller.drag_begin(now),
        CarouselCommand::DragMove(dx) => controller.drag_move(dx),
        CarouselCommand::DragEnd { velocity } => controller.drag_end(velocity, now),
        CarouselCommand::IndicatorSelected(page) => controller.indicator_selected(page, now),
    }
}

/// Reads tokio's clock so paused-time tests drive the carousel too.
fn now() -> Instant {
    time::Instant::now().into_std()
}
