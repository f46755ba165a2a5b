use std::time::Instant;

use anyhow::Result;
use tokio::sync::{mpsc, watch};
use tracing::info;

use dragscroll_core::{
    CarouselBuilder, CarouselConfig, CarouselRuntime, MemorySurface, Notification, Size, Surface,
};

/// Autoplay interval used when neither the config nor the flag sets one
const DEFAULT_INTERVAL_SECS: f64 = 2.0;

/// Run a demo carousel in real time, printing each slide change
pub async fn run(
    mut config: CarouselConfig,
    slides: usize,
    interval: Option<f64>,
    ticks: Option<u64>,
) -> Result<()> {
    if let Some(interval) = interval {
        config.auto_play = interval;
    } else if !config.autoplay_enabled() {
        config.auto_play = DEFAULT_INTERVAL_SECS;
    }

    let surface = MemorySurface::new(1024.0, slides, Size::new(320.0, 180.0));
    let (tx, rx) = mpsc::unbounded_channel();
    let carousel = CarouselBuilder::new(config)
        .observer(tx)
        .build(surface, Instant::now())?;

    println!(
        "Playing {} slides every {}s (Ctrl-C to stop)\n",
        slides,
        carousel.config().auto_play
    );

    let (runtime, _commands) = CarouselRuntime::new(carousel);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut printer = tokio::spawn(print_changes(rx, ticks));

    let mut task = tokio::spawn(runtime.run(shutdown_rx));

    let carousel = tokio::select! {
        result = &mut task => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl-C, stopping");
            let _ = shutdown_tx.send(true);
            task.await?
        }
        _ = &mut printer => {
            let _ = shutdown_tx.send(true);
            task.await?
        }
    };

    let axis = carousel.geometry().axis;
    println!(
        "\nStopped on slide {} (offset {}px)",
        carousel.current_slide() + 1,
        carousel.surface().scroll_offset(axis)
    );
    Ok(())
}

/// Print slide changes until `limit` of them have been seen
async fn print_changes(mut rx: mpsc::UnboundedReceiver<Notification>, limit: Option<u64>) {
    let mut seen = 0;
    let mut last = None;

    while let Some(notification) = rx.recv().await {
        let Notification::Change(change) = notification else {
            continue;
        };
        if last == Some(change.current_slide) {
            continue;
        }
        last = Some(change.current_slide);

        let dots: String = change
            .dots
            .iter()
            .map(|dot| if dot.active { '●' } else { '○' })
            .collect();
        println!(
            "  {}  slide {:>2}  {:>5.1}%",
            dots,
            change.current_slide + 1,
            change.progress
        );

        seen += 1;
        if limit.is_some_and(|limit| seen >= limit) {
            break;
        }
    }
}
