//! Tokio driver for a single carousel
//!
//! The engine itself never sleeps. `CarouselRuntime` owns it, applies
//! commands as they arrive and wakes up at the engine's next deadline to
//! deliver a frame tick stamped with the current time.

use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::config::CarouselUpdate;
use crate::engine::{Carousel, CarouselEvent};
use crate::surface::Surface;

/// Requests accepted by a running carousel
#[derive(Debug, Clone)]
pub enum Command {
    ScrollTo(isize),
    Navigate(usize),
    Next,
    Prev,
    Update(CarouselUpdate),
    /// Forward a host event as-is
    Event(CarouselEvent),
    Destroy,
}

pub struct CarouselRuntime<S> {
    carousel: Carousel<S>,
    commands: mpsc::UnboundedReceiver<Command>,
}

impl<S: Surface> CarouselRuntime<S> {
    /// Wrap a carousel; the sender is the only way to reach it afterwards
    pub fn new(carousel: Carousel<S>) -> (Self, mpsc::UnboundedSender<Command>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                carousel,
                commands: rx,
            },
            tx,
        )
    }

    /// Run until shutdown, or until the command channel is closed and no
    /// timer is pending. Returns the carousel in its final state.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> Carousel<S> {
        if *shutdown.borrow() {
            return self.carousel;
        }
        info!(
            id = %self.carousel.config().id,
            autoplay = self.carousel.config().auto_play,
            "Carousel runtime started"
        );

        let mut commands_open = true;
        loop {
            let deadline = self.carousel.next_deadline().map(Instant::from_std);
            if !commands_open && deadline.is_none() {
                debug!("Command channel closed and nothing scheduled");
                break;
            }

            tokio::select! {
                result = shutdown.changed() => {
                    if result.is_err() || *shutdown.borrow() {
                        info!("Carousel runtime received shutdown signal");
                        break;
                    }
                }

                command = self.commands.recv(), if commands_open => {
                    match command {
                        Some(command) => self.dispatch(command),
                        None => commands_open = false,
                    }
                }

                _ = wait_until(deadline) => {
                    let at = Instant::now().into_std();
                    self.carousel.handle(CarouselEvent::FrameTick { at });
                }
            }
        }

        info!("Carousel runtime stopped");
        self.carousel
    }

    /// Apply a command, stamped with the time it was received
    fn dispatch(&mut self, command: Command) {
        debug!(?command, "Carousel command");
        let now = Instant::now().into_std();
        match command {
            Command::ScrollTo(slide) => self.carousel.scroll_to(slide, now),
            Command::Navigate(slide) => self.carousel.navigate(slide, now),
            Command::Next => self.carousel.next(now),
            Command::Prev => self.carousel.prev(now),
            Command::Update(update) => {
                if let Err(e) = self.carousel.update(update, now) {
                    error!("Carousel update rejected: {}", e);
                }
            }
            Command::Event(event) => {
                self.carousel.handle(event);
            }
            Command::Destroy => self.carousel.destroy(),
        }
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}
