use std::collections::VecDeque;

use crate::config::ChartConfig;
use crate::domain::{
    chart::{ChartState, Transition},
    errors::AppError,
    events::ChartEvent,
    logging::{LogComponent, get_logger},
};
use crate::infrastructure::rendering::{CandleRenderer, DrawSurface, FrameStats};
use crate::{log_debug, log_error};

/// Owns the chart state and serialises every change through one queue.
///
/// Events are cheap to dispatch; `process` folds everything queued so far
/// into the state and paints at most once.
pub struct ChartCoordinator<S: DrawSurface> {
    state: ChartState,
    surface: Option<S>,
    renderer: CandleRenderer,
    pending: VecDeque<ChartEvent>,
    repaints: u64,
    last_frame: Option<FrameStats>,
}

impl<S: DrawSurface> ChartCoordinator<S> {
    pub fn new(state: ChartState, renderer: CandleRenderer) -> Self {
        get_logger().info(LogComponent::Application("ChartCoordinator"), "Creating new chart coordinator");

        Self { state, surface: None, renderer, pending: VecDeque::new(), repaints: 0, last_frame: None }
    }

    pub fn from_config(config: &ChartConfig) -> Result<Self, AppError> {
        config.validate()?;
        let state = ChartState::new(config.initial_viewport()?, config.autoscale, config.scroll_policy);
        Ok(Self::new(state, CandleRenderer::new(config.style.clone())))
    }

    pub fn state(&self) -> &ChartState {
        &self.state
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    /// Number of repaints actually issued to a surface.
    pub fn repaint_count(&self) -> u64 {
        self.repaints
    }

    pub fn last_frame(&self) -> Option<&FrameStats> {
        self.last_frame.as_ref()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Queue an event; nothing changes until the next `process`.
    pub fn dispatch(&mut self, event: ChartEvent) {
        log_debug!(LogComponent::Application("ChartCoordinator"), "queued {}", event.event_type());
        self.pending.push_back(event);
    }

    /// Bind a surface and return the previous one, if any.
    pub fn attach_surface(&mut self, surface: S) -> Option<S> {
        get_logger().info(LogComponent::Application("ChartCoordinator"), "Surface attached");
        self.surface.replace(surface)
    }

    pub fn detach_surface(&mut self) -> Option<S> {
        let surface = self.surface.take();
        if surface.is_some() {
            get_logger().info(LogComponent::Application("ChartCoordinator"), "Surface detached");
        }
        surface
    }

    /// Apply every queued event in order, then repaint once if any of them
    /// asked for it and a surface is bound.
    ///
    /// Returns whether a repaint was issued. Render failures are logged and
    /// never roll back the state.
    pub fn process(&mut self) -> bool {
        let mut transition = Transition::NONE;
        while let Some(event) = self.pending.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (next, step) = state.apply(event);
            self.state = next;
            transition = transition.merge(step);
        }

        if !transition.repaint {
            return false;
        }
        self.repaint()
    }

    /// Paint the current state. A missing surface is a no-op.
    pub fn repaint(&mut self) -> bool {
        let Some(surface) = self.surface.as_mut() else {
            log_debug!(LogComponent::Application("ChartCoordinator"), "repaint skipped: no surface");
            return false;
        };

        match self.renderer.render(surface, &self.state) {
            Ok(frame) => {
                self.repaints += 1;
                self.last_frame = Some(frame);
                true
            }
            Err(err) => {
                log_error!(LogComponent::Application("ChartCoordinator"), "repaint failed: {}", err);
                false
            }
        }
    }
}
