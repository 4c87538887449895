use fx_chart_wasm::domain::chart::{ChartState, ScrollPolicy, SurfaceSize, ViewportState, VisibleRange};
use fx_chart_wasm::domain::events::ChartEvent;
use fx_chart_wasm::domain::market_data::{Bar, BarSeries};
use quickcheck_macros::quickcheck;

fn series(n: usize) -> BarSeries {
    BarSeries::new((0..n).map(|i| Bar::from_values(i as i64 * 60_000, 1.1, 1.2, 1.0, 1.15)).collect())
}

#[quickcheck]
fn scroll_moves_one_step_by_sign(start: i32, delta_y: f64) -> bool {
    let view = ViewportState::default().with_scroll_offset(start as i64);
    let expected = if delta_y > 0.0 { start as i64 + 1 } else { start as i64 - 1 };
    view.handle_scroll(delta_y).scroll_offset == expected
}

#[quickcheck]
fn visible_range_stays_inside_series(offset: i16, total: u8, width: u16) -> bool {
    let total = total as usize;
    let view = ViewportState::default().with_scroll_offset(offset as i64);
    let range = view.visible_range(total, width as u32);
    let capacity = (width / 10) as usize;

    range.start == offset.max(0) as usize
        && (range.is_empty() || range.end <= total)
        && range.len() <= capacity
        && (range.start >= total || range.len() == capacity.min(total - range.start))
}

#[test]
fn magnitude_of_delta_is_ignored() {
    let view = ViewportState::default();
    assert_eq!(view.handle_scroll(0.01).scroll_offset, 1);
    assert_eq!(view.handle_scroll(480.0).scroll_offset, 1);
    assert_eq!(view.handle_scroll(-480.0).scroll_offset, -1);
}

#[test]
fn unbounded_scroll_can_leave_the_series() {
    let state = ChartState::default().with_container(SurfaceSize::new(200, 100));
    let (mut state, _) = state.apply(ChartEvent::BarsLoaded(series(3)));
    for _ in 0..5 {
        state = state.apply(ChartEvent::Scrolled { delta_y: 1.0 }).0;
    }
    assert_eq!(state.viewport.scroll_offset, 5);
    assert!(state.visible_range().is_empty());
    assert!(state.visible_bars().is_empty());

    for _ in 0..8 {
        state = state.apply(ChartEvent::Scrolled { delta_y: -1.0 }).0;
    }
    assert_eq!(state.viewport.scroll_offset, -3);
    assert_eq!(state.visible_range(), VisibleRange::new(0, 3));
}

#[test]
fn clamped_scroll_stops_at_last_bar() {
    let state = ChartState::new(ViewportState::default(), Default::default(), ScrollPolicy::Clamped)
        .with_container(SurfaceSize::new(200, 100));
    let (mut state, _) = state.apply(ChartEvent::BarsLoaded(series(3)));
    for _ in 0..5 {
        state = state.apply(ChartEvent::Scrolled { delta_y: 1.0 }).0;
    }
    assert_eq!(state.viewport.scroll_offset, 2);
    assert_eq!(state.visible_range(), VisibleRange::new(2, 3));

    let (state, _) = state.apply(ChartEvent::BarsLoaded(series(1)));
    assert_eq!(state.viewport.scroll_offset, 0);
}

#[test]
fn every_scroll_requests_a_repaint() {
    let (_, transition) = ChartState::default().apply(ChartEvent::Scrolled { delta_y: 0.0 });
    assert!(transition.repaint);
}

#[test]
fn narrow_surface_shows_nothing() {
    let view = ViewportState::default();
    assert!(view.visible_range(10, 9).is_empty());
    assert_eq!(view.visible_range(10, 10), VisibleRange::new(0, 1));
}
