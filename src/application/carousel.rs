//! Timing for the testimonial carousel.
//!
//! Each open view gets its own [`CarouselDriver`] task. The task owns the state
//! machine, the auto-advance deadline, and the transition deadline; visitors talk
//! to it through a command channel and observe it through a frame channel.

use std::sync::Arc;

use axum::response::sse::Event;
use dashmap::DashMap;
use datastar::prelude::ElementPatchMode;
use metrics::gauge;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::debug;
use uuid::Uuid;

use crate::application::error::HttpError;
use crate::application::stream::{patch_event, signals_event};
use crate::config::CarouselSettings;
use crate::domain::carousel::{
    Carousel, CarouselInput, CarouselState, Direction, Transition,
};
use crate::domain::content::Testimonial;
use crate::domain::error::DomainError;
use crate::presentation::views::{
    IndicatorView, TestimonialSlidePartial, TestimonialSlideView, render_fragment,
};

pub const SLIDE_SELECTOR: &str = "#testimonial-slide";
const SESSIONS_METRIC: &str = "vantage_carousel_sessions_active";
const COMMAND_BUFFER: usize = 8;
const FRAME_BUFFER: usize = 16;

/// Manual input from the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselCommand {
    Next,
    Previous,
    Select(usize),
}

impl From<CarouselCommand> for CarouselInput {
    fn from(command: CarouselCommand) -> Self {
        match command {
            CarouselCommand::Next => CarouselInput::Next,
            CarouselCommand::Previous => CarouselInput::Previous,
            CarouselCommand::Select(index) => CarouselInput::Select(index),
        }
    }
}

/// Snapshot emitted after every state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CarouselFrame {
    pub state: CarouselState,
    pub manual: bool,
}

pub struct CarouselDriver {
    carousel: Carousel,
    settings: CarouselSettings,
    commands: mpsc::Receiver<CarouselCommand>,
    frames: mpsc::Sender<CarouselFrame>,
}

impl CarouselDriver {
    /// Spawn a driver for `len` slides. The first automatic advance happens one
    /// interval after this call.
    pub fn spawn(
        len: usize,
        settings: CarouselSettings,
    ) -> Result<(CarouselHandle, mpsc::Receiver<CarouselFrame>), DomainError> {
        let carousel = Carousel::new(len)?;
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (frame_tx, frame_rx) = mpsc::channel(FRAME_BUFFER);

        let driver = Self {
            carousel,
            settings,
            commands: command_rx,
            frames: frame_tx,
        };
        let task = tokio::spawn(driver.run());

        Ok((
            CarouselHandle {
                commands: command_tx,
                task,
            },
            frame_rx,
        ))
    }

    async fn run(mut self) {
        let interval = self.settings.interval;
        let mut next_tick = Instant::now() + interval;
        let mut settle_at: Option<Instant> = None;

        loop {
            let input = tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => {
                        // Every press restarts the countdown, even one the machine drops.
                        next_tick = Instant::now() + interval;
                        CarouselInput::from(command)
                    }
                    None => break,
                },
                _ = sleep_until(next_tick) => {
                    next_tick = Instant::now() + interval;
                    CarouselInput::Tick
                }
                _ = wait_for(settle_at) => {
                    settle_at = None;
                    CarouselInput::TransitionComplete
                }
                _ = self.frames.closed() => break,
            };

            match self.carousel.apply(input) {
                Transition::Ignored => continue,
                Transition::Started { .. } => {
                    settle_at = Some(Instant::now() + self.settings.transition);
                }
                Transition::Settled { .. } => {}
            }

            let frame = CarouselFrame {
                state: self.carousel.state(),
                manual: input.is_manual(),
            };
            if self.frames.send(frame).await.is_err() {
                break;
            }
        }

        debug!(target = "vantage::carousel", "carousel driver stopped");
    }
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Owns the driver task; dropping it stops every timer.
pub struct CarouselHandle {
    commands: mpsc::Sender<CarouselCommand>,
    task: JoinHandle<()>,
}

impl CarouselHandle {
    pub fn commands(&self) -> mpsc::Sender<CarouselCommand> {
        self.commands.clone()
    }

    /// Returns `false` once the driver has stopped.
    pub async fn send(&self, command: CarouselCommand) -> bool {
        self.commands.send(command).await.is_ok()
    }
}

impl Drop for CarouselHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Registry of live carousel sessions, one per open page.
pub struct CarouselHub {
    settings: CarouselSettings,
    testimonials: Arc<[Testimonial]>,
    sessions: DashMap<Uuid, mpsc::Sender<CarouselCommand>>,
}

impl CarouselHub {
    pub fn new(settings: CarouselSettings, testimonials: Vec<Testimonial>) -> Self {
        Self {
            settings,
            testimonials: testimonials.into(),
            sessions: DashMap::new(),
        }
    }

    pub fn open(self: &Arc<Self>) -> Result<CarouselSession, DomainError> {
        let (handle, frames) = CarouselDriver::spawn(self.testimonials.len(), self.settings)?;
        let id = Uuid::new_v4();
        self.sessions.insert(id, handle.commands());
        gauge!(SESSIONS_METRIC).increment(1.0);
        debug!(target = "vantage::carousel", session = %id, "carousel session opened");

        Ok(CarouselSession {
            id,
            hub: Arc::clone(self),
            frames,
            _handle: handle,
        })
    }

    pub async fn dispatch(&self, id: Uuid, command: CarouselCommand) -> Result<(), DomainError> {
        let sender = self
            .sessions
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| DomainError::not_found("carousel session"))?;

        sender
            .send(command)
            .await
            .map_err(|_| DomainError::not_found("carousel session"))
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.testimonials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.testimonials.is_empty()
    }

    pub fn slide_view(&self, state: CarouselState) -> TestimonialSlideView {
        slide_view(&self.testimonials, state)
    }

    pub fn render_slide(&self, state: CarouselState) -> Result<String, HttpError> {
        render_fragment(TestimonialSlidePartial {
            slide: self.slide_view(state),
        })
    }

    /// SSE patch replacing the visible slide.
    pub fn frame_event(&self, frame: &CarouselFrame) -> Result<Event, HttpError> {
        let html = self.render_slide(frame.state)?;
        Ok(patch_event(html, SLIDE_SELECTOR, ElementPatchMode::Outer))
    }

    fn close(&self, id: &Uuid) {
        if self.sessions.remove(id).is_some() {
            gauge!(SESSIONS_METRIC).decrement(1.0);
            debug!(target = "vantage::carousel", session = %id, "carousel session closed");
        }
    }
}

/// A registered session; dropping it unregisters the id and stops the driver.
pub struct CarouselSession {
    id: Uuid,
    hub: Arc<CarouselHub>,
    frames: mpsc::Receiver<CarouselFrame>,
    _handle: CarouselHandle,
}

impl CarouselSession {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub async fn next_frame(&mut self) -> Option<CarouselFrame> {
        self.frames.recv().await
    }

    /// Signal patch telling the page which session its buttons address.
    pub fn session_event(&self) -> Event {
        let payload = serde_json::json!({ "carouselSession": self.id.to_string() });
        signals_event(&payload.to_string())
    }
}

impl Drop for CarouselSession {
    fn drop(&mut self) {
        self.hub.close(&self.id);
    }
}

fn slide_view(testimonials: &[Testimonial], state: CarouselState) -> TestimonialSlideView {
    let (transitioning, direction) = match state {
        CarouselState::Idle { .. } => (false, Direction::Forward),
        CarouselState::Transitioning { direction, .. } => (true, direction),
    };
    let total = testimonials.len();
    let index = state.visible_index().min(total.saturating_sub(1));

    let indicators = (0..total)
        .map(|position| IndicatorView {
            index: position,
            position: position + 1,
            is_active: position == index,
        })
        .collect();

    let (quote, name, role, company) = testimonials
        .get(index)
        .map(|item| (item.quote, item.name, item.role, item.company))
        .unwrap_or_default();

    TestimonialSlideView {
        index,
        position: index + 1,
        total,
        quote: quote.to_string(),
        name: name.to_string(),
        role: role.to_string(),
        company: company.to_string(),
        direction: match direction {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
        },
        transitioning,
        indicators,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn settings() -> CarouselSettings {
        CarouselSettings {
            interval: Duration::from_secs(8),
            transition: Duration::from_millis(700),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn auto_advance_fires_after_interval() {
        let start = Instant::now();
        let (_handle, mut frames) = CarouselDriver::spawn(3, settings()).expect("driver");

        let started = frames.recv().await.expect("frame");
        assert_eq!(start.elapsed(), Duration::from_secs(8));
        assert_eq!(
            started.state,
            CarouselState::Transitioning {
                from: 0,
                to: 1,
                direction: Direction::Forward
            }
        );
        assert!(!started.manual);

        let settled = frames.recv().await.expect("frame");
        assert_eq!(start.elapsed(), Duration::from_millis(8_700));
        assert_eq!(settled.state, CarouselState::Idle { index: 1 });
    }

    #[tokio::test(start_paused = true)]
    async fn manual_press_resets_the_countdown() {
        let start = Instant::now();
        let (handle, mut frames) = CarouselDriver::spawn(3, settings()).expect("driver");

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(handle.send(CarouselCommand::Next).await);

        let started = frames.recv().await.expect("frame");
        assert!(started.manual);
        assert_eq!(start.elapsed(), Duration::from_secs(5));

        let settled = frames.recv().await.expect("frame");
        assert_eq!(settled.state, CarouselState::Idle { index: 1 });
        assert_eq!(start.elapsed(), Duration::from_millis(5_700));

        let auto = frames.recv().await.expect("frame");
        assert!(!auto.manual);
        assert_eq!(start.elapsed(), Duration::from_secs(13));
        assert_eq!(auto.state.visible_index(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn presses_during_transition_are_dropped() {
        let (handle, mut frames) = CarouselDriver::spawn(4, settings()).expect("driver");

        assert!(handle.send(CarouselCommand::Next).await);
        let started = frames.recv().await.expect("frame");
        assert_eq!(started.state.visible_index(), 1);

        assert!(handle.send(CarouselCommand::Select(3)).await);
        let settled = frames.recv().await.expect("frame");
        assert_eq!(settled.state, CarouselState::Idle { index: 1 });
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_handle_stops_timers() {
        let (handle, mut frames) = CarouselDriver::spawn(3, settings()).expect("driver");
        drop(handle);
        assert!(frames.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn hub_unregisters_dropped_sessions() {
        let hub = Arc::new(CarouselHub::new(
            settings(),
            crate::domain::data::testimonials(),
        ));
        let session = hub.open().expect("session");
        let id = session.id();
        assert_eq!(hub.active_sessions(), 1);
        hub.dispatch(id, CarouselCommand::Previous)
            .await
            .expect("known session");

        drop(session);
        assert_eq!(hub.active_sessions(), 0);
        assert!(hub.dispatch(id, CarouselCommand::Next).await.is_err());
    }

    #[test]
    fn slide_view_marks_the_active_indicator() {
        let testimonials = crate::domain::data::testimonials();
        let view = slide_view(
            &testimonials,
            CarouselState::Transitioning {
                from: 0,
                to: 2,
                direction: Direction::Backward,
            },
        );
        assert_eq!(view.position, 3);
        assert!(view.transitioning);
        assert_eq!(view.direction, "backward");
        let active: Vec<usize> = view
            .indicators
            .iter()
            .filter(|indicator| indicator.is_active)
            .map(|indicator| indicator.index)
            .collect();
        assert_eq!(active, vec![2]);
    }
}
