//! Scoped DOM event listeners.
//!
//! A listener stays attached exactly as long as its `ListenerGuard` lives.

use crate::domain::errors::{AppError, RenderingResult};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Event, EventTarget};

#[derive(Clone, Debug)]
pub struct EventOptions {
    pub passive: bool,
    pub capture: bool,
}

impl Default for EventOptions {
    fn default() -> Self {
        Self { passive: true, capture: false }
    }
}

impl EventOptions {
    /// Needed for handlers that call `preventDefault` (wheel, touch).
    pub fn active() -> Self {
        Self { passive: false, ..Self::default() }
    }
}

/// Detaches its listener when dropped.
pub struct ListenerGuard {
    target: EventTarget,
    event_name: String,
    callback: Closure<dyn FnMut(Event)>,
    capture: bool,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback_and_bool(
            &self.event_name,
            self.callback.as_ref().unchecked_ref(),
            self.capture,
        );
    }
}

/// Attach `cb` for `event_name` on `target` and return the guard owning it.
pub fn listen<E>(
    target: &EventTarget,
    event_name: &str,
    options: &EventOptions,
    mut cb: impl FnMut(E) + 'static,
) -> RenderingResult<ListenerGuard>
where
    E: JsCast,
{
    let opts = AddEventListenerOptions::new();
    opts.set_passive(options.passive);
    opts.set_capture(options.capture);

    let callback = Closure::wrap(Box::new(move |ev: Event| {
        cb(ev.unchecked_into::<E>());
    }) as Box<dyn FnMut(Event)>);

    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            event_name,
            callback.as_ref().unchecked_ref(),
            &opts,
        )
        .map_err(|e| AppError::Rendering(format!("failed to attach {} listener: {:?}", event_name, e)))?;

    Ok(ListenerGuard { target: target.clone(), event_name: event_name.to_string(), callback, capture: options.capture })
}
