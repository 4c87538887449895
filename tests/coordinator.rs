use fx_chart_wasm::application::ChartCoordinator;
use fx_chart_wasm::config::ChartConfig;
use fx_chart_wasm::domain::chart::{LoadStatus, SurfaceSize};
use fx_chart_wasm::domain::events::ChartEvent;
use fx_chart_wasm::domain::logging::{LogLevel, MemoryLogger, init_logger};
use fx_chart_wasm::domain::market_data::{Bar, BarSeries};
use fx_chart_wasm::infrastructure::rendering::{DrawCommand, DrawSurface, RecordingSurface};
use std::sync::OnceLock;

fn logger() -> &'static MemoryLogger {
    static LOGGER: OnceLock<&'static MemoryLogger> = OnceLock::new();
    LOGGER.get_or_init(|| {
        let logger: &'static MemoryLogger = Box::leak(Box::new(MemoryLogger::new()));
        init_logger(Box::new(logger));
        logger
    })
}

fn series(n: usize) -> BarSeries {
    BarSeries::new(
        (0..n)
            .map(|i| {
                let base = 1.1 + i as f64 * 0.001;
                Bar::from_values(i as i64 * 60_000, base, base + 0.002, base - 0.002, base + 0.001)
            })
            .collect(),
    )
}

fn mounted() -> ChartCoordinator<RecordingSurface> {
    let mut coordinator = ChartCoordinator::from_config(&ChartConfig::default()).unwrap();
    coordinator.attach_surface(RecordingSurface::new(SurfaceSize::new(200, 100)));
    coordinator.dispatch(ChartEvent::Resized(SurfaceSize::new(200, 100)));
    coordinator.process();
    coordinator
}

fn surface_repaints(coordinator: &ChartCoordinator<RecordingSurface>) -> usize {
    coordinator.surface().map(RecordingSurface::repaint_count).unwrap_or(0)
}

#[test]
fn reload_repaints_once_and_keeps_offset() {
    let mut coordinator = mounted();
    coordinator.dispatch(ChartEvent::BarsLoaded(series(50)));
    coordinator.process();
    for _ in 0..3 {
        coordinator.dispatch(ChartEvent::Scrolled { delta_y: 100.0 });
    }
    coordinator.process();
    let before = surface_repaints(&coordinator);

    coordinator.dispatch(ChartEvent::BarsLoaded(series(60)));
    assert!(coordinator.process());

    assert_eq!(surface_repaints(&coordinator), before + 1);
    assert_eq!(coordinator.state().viewport.scroll_offset, 3);
    assert_eq!(coordinator.state().bars.len(), 60);
    assert_eq!(coordinator.last_frame().map(|f| f.range.as_range()), Some(3..23));
}

#[test]
fn burst_of_events_coalesces_into_one_repaint() {
    let mut coordinator = mounted();
    let before = coordinator.repaint_count();

    coordinator.dispatch(ChartEvent::BarsLoaded(series(10)));
    for _ in 0..25 {
        coordinator.dispatch(ChartEvent::Scrolled { delta_y: -1.0 });
    }
    coordinator.dispatch(ChartEvent::Resized(SurfaceSize::new(300, 120)));
    assert!(coordinator.process());

    assert_eq!(coordinator.repaint_count(), before + 1);
    assert_eq!(coordinator.state().viewport.scroll_offset, -25);
    assert_eq!(coordinator.surface().map(|s| s.commands().last().is_some()), Some(true));
}

#[test]
fn nothing_queued_means_no_repaint() {
    let mut coordinator = mounted();
    let before = coordinator.repaint_count();
    assert!(!coordinator.process());
    coordinator.dispatch(ChartEvent::BarWidthChanged { bar_width: 0.0 });
    assert!(!coordinator.process());
    assert_eq!(coordinator.repaint_count(), before);
}

#[test]
fn repaint_without_surface_is_a_no_op() {
    let mut coordinator: ChartCoordinator<RecordingSurface> =
        ChartCoordinator::from_config(&ChartConfig::default()).unwrap();
    coordinator.dispatch(ChartEvent::BarsLoaded(series(5)));
    assert!(!coordinator.process());
    assert!(!coordinator.repaint());
    assert_eq!(coordinator.repaint_count(), 0);
    assert_eq!(coordinator.state().status, LoadStatus::Ready { bars: 5 });
}

#[test]
fn detached_surface_stops_receiving_frames() {
    let mut coordinator = mounted();
    let surface = coordinator.detach_surface().unwrap();
    let painted = surface.repaint_count();

    coordinator.dispatch(ChartEvent::Scrolled { delta_y: 1.0 });
    assert!(!coordinator.process());
    assert!(!coordinator.has_surface());
    assert_eq!(surface.repaint_count(), painted);
    assert_eq!(coordinator.state().viewport.scroll_offset, 1);
}

#[test]
fn reattached_surface_is_resized_to_container() {
    let mut coordinator = mounted();
    coordinator.detach_surface();
    coordinator.attach_surface(RecordingSurface::new(SurfaceSize::new(1, 1)));
    coordinator.dispatch(ChartEvent::Invalidated);
    coordinator.process();

    let surface = coordinator.surface().unwrap();
    assert_eq!(surface.size(), SurfaceSize::new(200, 100));
    assert_eq!(surface.commands()[1], DrawCommand::Resize(SurfaceSize::new(200, 100)));
}

#[test]
fn rejected_bar_width_is_logged_and_skips_repaint() {
    let logger = logger();
    let mut coordinator = mounted();
    let before = surface_repaints(&coordinator);

    coordinator.dispatch(ChartEvent::BarWidthChanged { bar_width: -2.0 });
    assert!(!coordinator.process());

    assert_eq!(surface_repaints(&coordinator), before);
    assert_eq!(coordinator.state().viewport.bar_width, ChartConfig::default().bar_width);
    assert!(logger.contains(LogLevel::Warn, "bar width must be positive, got -2"));
}
