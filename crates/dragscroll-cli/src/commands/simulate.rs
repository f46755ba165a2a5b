use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{debug, info};

use dragscroll_core::device::UserAgentPolicy;
use dragscroll_core::{
    Carousel, CarouselBuilder, CarouselConfig, CarouselEvent, CarouselUpdate, MemorySurface,
    Notification, Point, Surface,
};

/// A recorded session: a container and the host events fed into it
#[derive(Debug, Deserialize)]
struct Script {
    surface: MemorySurface,
    /// Overrides the config file when present
    #[serde(default)]
    config: Option<CarouselConfig>,
    /// Drag is disabled for mobile user agents
    #[serde(default)]
    user_agent: Option<String>,
    steps: Vec<Step>,
    /// Keep the clock running this long after the last step
    #[serde(default = "default_tail_ms")]
    tail_ms: u64,
}

fn default_tail_ms() -> u64 {
    1500
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct Step {
    at_ms: u64,
    #[serde(flatten)]
    action: Action,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum Action {
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        target: Option<usize>,
        #[serde(default = "default_true")]
        primary: bool,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp {
        x: f64,
        y: f64,
    },
    PointerEnter,
    PointerLeave,
    Resize {
        width: f64,
    },
    /// Scroll the container from outside the engine
    Scroll {
        offset: f64,
    },
    ScrollTo {
        slide: isize,
    },
    Navigate {
        slide: usize,
    },
    Next,
    Prev,
    Update {
        update: CarouselUpdate,
    },
    Destroy,
}

/// Drives a carousel on a virtual clock, writing one JSON line per notification
struct Simulator<W> {
    carousel: Carousel<MemorySurface>,
    notifications: mpsc::UnboundedReceiver<Notification>,
    start: Instant,
    now_ms: u64,
    out: W,
}

impl<W: Write> Simulator<W> {
    fn new(
        config: CarouselConfig,
        surface: MemorySurface,
        user_agent: Option<&str>,
        out: W,
    ) -> Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        let start = Instant::now();

        let mut builder = CarouselBuilder::new(config).observer(tx);
        if let Some(user_agent) = user_agent {
            builder = builder.drag_policy(UserAgentPolicy::new(user_agent)?);
        }
        let carousel = builder.build(surface, start)?;

        let mut simulator = Self {
            carousel,
            notifications: rx,
            start,
            now_ms: 0,
            out,
        };
        simulator.flush()?;
        Ok(simulator)
    }

    fn at(&self, ms: u64) -> Instant {
        self.start + Duration::from_millis(ms)
    }

    /// Deliver every timer that falls due up to `until_ms`
    fn run_until(&mut self, until_ms: u64) -> Result<()> {
        while let Some(deadline) = self.carousel.next_deadline() {
            let at_ms = deadline.saturating_duration_since(self.start).as_millis() as u64;
            if at_ms > until_ms {
                break;
            }
            self.now_ms = self.now_ms.max(at_ms);
            self.carousel.handle(CarouselEvent::FrameTick { at: deadline });
            self.flush()?;
        }
        self.now_ms = self.now_ms.max(until_ms);
        Ok(())
    }

    fn apply(&mut self, action: Action) -> Result<()> {
        let at = self.at(self.now_ms);
        debug!(at_ms = self.now_ms, ?action, "Simulated step");

        match action {
            Action::PointerDown {
                x,
                y,
                target,
                primary,
            } => {
                self.carousel.handle(CarouselEvent::PointerDown {
                    at,
                    position: Point::new(x, y),
                    target,
                    primary,
                });
            }
            Action::PointerMove { x, y } => {
                self.carousel.handle(CarouselEvent::PointerMove {
                    at,
                    position: Point::new(x, y),
                });
            }
            Action::PointerUp { x, y } => {
                self.carousel.handle(CarouselEvent::PointerUp {
                    at,
                    position: Point::new(x, y),
                });
            }
            Action::PointerEnter => {
                self.carousel.handle(CarouselEvent::PointerEnter { at });
            }
            Action::PointerLeave => {
                self.carousel.handle(CarouselEvent::PointerLeave { at });
            }
            Action::Resize { width } => {
                self.carousel.surface_mut().set_viewport_width(width);
                self.carousel.handle(CarouselEvent::Resize { at });
            }
            Action::Scroll { offset } => {
                let axis = self.carousel.geometry().axis;
                self.carousel.surface_mut().set_scroll_offset(axis, offset);
                self.carousel.handle(CarouselEvent::Scroll { at });
            }
            Action::ScrollTo { slide } => self.carousel.scroll_to(slide, at),
            Action::Navigate { slide } => self.carousel.navigate(slide, at),
            Action::Next => self.carousel.next(at),
            Action::Prev => self.carousel.prev(at),
            Action::Update { update } => self.carousel.update(update, at)?,
            Action::Destroy => self.carousel.destroy(),
        }
        self.flush()
    }

    fn flush(&mut self) -> Result<()> {
        while let Ok(notification) = self.notifications.try_recv() {
            let line = serde_json::json!({
                "at_ms": self.now_ms,
                "notification": notification,
            });
            writeln!(self.out, "{}", line)?;
        }
        Ok(())
    }
}

fn play_script<W: Write>(script: Script, config: CarouselConfig, out: W) -> Result<Carousel<MemorySurface>> {
    let Script {
        surface,
        config: script_config,
        user_agent,
        mut steps,
        tail_ms,
    } = script;
    steps.sort_by_key(|step| step.at_ms);

    let config = script_config.unwrap_or(config);
    let mut simulator = Simulator::new(config, surface, user_agent.as_deref(), out)?;
    let mut last_ms = 0;
    for step in steps {
        simulator.run_until(step.at_ms)?;
        simulator.apply(step.action)?;
        last_ms = step.at_ms;
    }
    simulator.run_until(last_ms + tail_ms)?;
    Ok(simulator.carousel)
}

pub fn run(config: CarouselConfig, script_path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(script_path)
        .with_context(|| format!("Failed to read script {}", script_path.display()))?;
    let script: Script = serde_json::from_str(&content)
        .with_context(|| format!("Invalid script {}", script_path.display()))?;

    let stdout = std::io::stdout();
    let carousel = play_script(script, config, stdout.lock())?;

    let axis = carousel.geometry().axis;
    info!(
        current_slide = carousel.current_slide(),
        offset = carousel.surface().scroll_offset(axis),
        "Simulation finished"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SWIPE: &str = r#"{
        "surface": { "viewport_width": 1024, "slides": 5, "slide": { "width": 100, "height": 60 } },
        "steps": [
            { "at_ms": 0, "action": "pointer_down", "x": 400, "y": 30 },
            { "at_ms": 300, "action": "pointer_move", "x": 340, "y": 30 },
            { "at_ms": 600, "action": "pointer_up", "x": 340, "y": 30 }
        ]
    }"#;

    fn lines(out: &[u8]) -> Vec<serde_json::Value> {
        String::from_utf8_lossy(out)
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_swipe_advances_one_slide() {
        let script: Script = serde_json::from_str(SWIPE).unwrap();
        let mut out = Vec::new();
        let carousel = play_script(script, CarouselConfig::default(), &mut out).unwrap();
        assert_eq!(carousel.current_slide(), 1);

        let lines = lines(&out);
        assert_eq!(lines[0]["notification"]["type"], "init");
        let last = lines.last().unwrap();
        assert_eq!(last["notification"]["type"], "change");
        assert_eq!(last["notification"]["payload"]["currentSlide"], 1);
        assert!(last["at_ms"].as_u64().unwrap() > 600);
    }

    #[test]
    fn test_mobile_user_agent_ignores_drag() {
        let mut script: Script = serde_json::from_str(SWIPE).unwrap();
        script.user_agent = Some("Mozilla/5.0 (Linux; Android 14)".to_string());
        let carousel = play_script(script, CarouselConfig::default(), Vec::new()).unwrap();
        assert_eq!(carousel.current_slide(), 0);
        assert!(!carousel.drag_enabled());
    }

    #[test]
    fn test_steps_are_replayed_in_time_order() {
        let script: Script = serde_json::from_str(
            r#"{
                "surface": { "viewport_width": 800, "slides": 4, "slide": { "width": 100, "height": 60 } },
                "steps": [
                    { "at_ms": 2000, "action": "prev" },
                    { "at_ms": 0, "action": "navigate", "slide": 3 }
                ],
                "tail_ms": 2000
            }"#,
        )
        .unwrap();
        let carousel = play_script(script, CarouselConfig::default(), Vec::new()).unwrap();
        assert_eq!(carousel.current_slide(), 2);
    }

    #[test]
    fn test_navigate_after_quiet_gap_waits_for_settle() {
        let script: Script = serde_json::from_str(
            r#"{
                "surface": { "viewport_width": 1024, "slides": 5, "slide": { "width": 100, "height": 60 } },
                "steps": [ { "at_ms": 5000, "action": "navigate", "slide": 2 } ],
                "tail_ms": 1200
            }"#,
        )
        .unwrap();
        let mut out = Vec::new();
        play_script(script, CarouselConfig::default(), &mut out).unwrap();

        let last = lines(&out).pop().unwrap();
        assert_eq!(last["notification"]["payload"]["currentSlide"], 2);
        assert!(last["at_ms"].as_u64().unwrap() >= 6010);
    }
}
