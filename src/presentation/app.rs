use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::html::Canvas;
use leptos::*;
use web_sys::{EventTarget, HtmlCanvasElement, WheelEvent};

use crate::application::{ChartCoordinator, Lifetime, LoadOutcome, load_bars};
use crate::config::ChartConfig;
use crate::domain::{
    chart::{ChartState, SurfaceSize},
    events::ChartEvent,
    logging::{LogComponent, get_logger},
};
use crate::infrastructure::{
    ForexTesterClient,
    dom::{EventOptions, ListenerGuard, listen},
    rendering::{CandleRenderer, CanvasSurface},
};
use crate::{log_error, log_info, log_warn};

/// Shared between the component, its listeners and the fetch task.
struct ChartHandle {
    coordinator: RefCell<ChartCoordinator<CanvasSurface>>,
    listeners: RefCell<Vec<ListenerGuard>>,
    frame_requested: Cell<bool>,
}

impl ChartHandle {
    fn new(coordinator: ChartCoordinator<CanvasSurface>) -> Rc<Self> {
        Rc::new(Self {
            coordinator: RefCell::new(coordinator),
            listeners: RefCell::new(Vec::new()),
            frame_requested: Cell::new(false),
        })
    }

    /// Queue an event and make sure a flush is coming on the next frame.
    fn dispatch(self: &Rc<Self>, event: ChartEvent) {
        self.coordinator.borrow_mut().dispatch(event);
        self.schedule_flush();
    }

    fn schedule_flush(self: &Rc<Self>) {
        if self.frame_requested.replace(true) {
            return;
        }
        let handle = Rc::clone(self);
        request_animation_frame(move || {
            handle.frame_requested.set(false);
            handle.flush();
        });
    }

    fn flush(&self) {
        match self.coordinator.try_borrow_mut() {
            Ok(mut coordinator) => {
                coordinator.process();
            }
            Err(_) => get_logger().warn(LogComponent::Presentation("ChartApp"), "flush skipped: coordinator busy"),
        }
    }

    /// Bind to a freshly mounted canvas: surface, wheel and resize listeners.
    fn mount(self: &Rc<Self>, canvas: HtmlCanvasElement) {
        if self.coordinator.borrow().surface().is_some_and(|s| s.is_backed_by(&canvas)) {
            return;
        }
        self.unmount();

        let surface = match CanvasSurface::new(canvas.clone()) {
            Ok(surface) => surface,
            Err(err) => {
                log_error!(LogComponent::Presentation("ChartApp"), "canvas unusable: {}", err);
                return;
            }
        };
        self.coordinator.borrow_mut().attach_surface(surface);

        let wheel_target: &EventTarget = &canvas;
        let handle = Rc::clone(self);
        let wheel = listen(wheel_target, "wheel", &EventOptions::active(), move |ev: WheelEvent| {
            ev.prevent_default();
            handle.dispatch(ChartEvent::Scrolled { delta_y: ev.delta_y() });
        });

        let window = window();
        let resize_target: &EventTarget = &window;
        let handle = Rc::clone(self);
        let resize = listen(resize_target, "resize", &EventOptions::default(), move |_: web_sys::Event| {
            handle.dispatch(ChartEvent::Resized(window_size()));
        });

        for guard in [wheel, resize] {
            match guard {
                Ok(guard) => self.listeners.borrow_mut().push(guard),
                Err(err) => get_logger().error(LogComponent::Presentation("ChartApp"), &err.to_string()),
            }
        }

        self.dispatch(ChartEvent::Resized(window_size()));
        self.dispatch(ChartEvent::Invalidated);
    }

    /// Drop listeners and the surface; later repaints become no-ops.
    fn unmount(&self) {
        self.listeners.borrow_mut().clear();
        self.coordinator.borrow_mut().detach_surface();
    }
}

fn window_size() -> SurfaceSize {
    let window = window();
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    SurfaceSize::from_css(width, height)
}

/// Full-window candlestick chart fed by the configured bar source.
#[component]
pub fn ChartApp(config: ChartConfig) -> impl IntoView {
    let coordinator = ChartCoordinator::from_config(&config).unwrap_or_else(|err| {
        log_error!(LogComponent::Presentation("ChartApp"), "{}, using defaults", err);
        ChartCoordinator::new(ChartState::default(), CandleRenderer::default())
    });
    let handle = ChartHandle::new(coordinator);
    let canvas_ref = create_node_ref::<Canvas>();

    {
        let handle = Rc::clone(&handle);
        create_effect(move |_| match canvas_ref.get() {
            Some(el) => {
                let canvas: &HtmlCanvasElement = &el;
                handle.mount(canvas.clone());
            }
            None => handle.unmount(),
        });
    }

    let lifetime = Lifetime::new();
    {
        let watcher = lifetime.watcher();
        let handle = Rc::clone(&handle);
        let client = ForexTesterClient::new(config.source.clone());
        wasm_bindgen_futures::spawn_local(async move {
            match load_bars(&client, &watcher, |event| handle.dispatch(event)).await {
                LoadOutcome::Loaded { bars } => {
                    log_info!(LogComponent::Presentation("ChartApp"), "✅ Chart ready with {} bars", bars);
                }
                LoadOutcome::Failed(err) => {
                    log_warn!(LogComponent::Presentation("ChartApp"), "showing failure: {}", err.kind());
                }
                LoadOutcome::Discarded => {}
            }
        });
    }

    on_cleanup(move || {
        drop(lifetime);
        handle.unmount();
    });

    view! {
        <canvas node_ref=canvas_ref style="display: block;" />
    }
}
