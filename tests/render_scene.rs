use fx_chart_wasm::config::ChartStyle;
use fx_chart_wasm::domain::chart::{ChartState, LoadStatus, SurfaceSize};
use fx_chart_wasm::domain::events::ChartEvent;
use fx_chart_wasm::domain::market_data::{Bar, BarSeries};
use fx_chart_wasm::infrastructure::rendering::{CandleRenderer, DrawCommand, RecordingSurface};

fn loaded(bars: Vec<Bar>, width: u32, height: u32) -> ChartState {
    let state = ChartState::default().with_container(SurfaceSize::new(width, height));
    state.apply(ChartEvent::BarsLoaded(BarSeries::new(bars))).0
}

fn render(state: &ChartState) -> (RecordingSurface, fx_chart_wasm::infrastructure::rendering::FrameStats) {
    let mut surface = RecordingSurface::new(state.container);
    let stats = CandleRenderer::default().render(&mut surface, state).unwrap();
    (surface, stats)
}

fn coordinates(command: &DrawCommand) -> Vec<f64> {
    match command {
        DrawCommand::Clear { x, y, width, height } => vec![*x, *y, *width, *height],
        DrawCommand::Resize(_) => vec![],
        DrawCommand::Line { from, to, .. } => vec![from.0, from.1, to.0, to.1],
        DrawCommand::FillRect { x, y, width, height, .. } => vec![*x, *y, *width, *height],
        DrawCommand::Text { x, y, .. } => vec![*x, *y],
    }
}

#[test]
fn two_bar_scene() {
    let state = loaded(
        vec![Bar::from_values(0, 1.1, 1.2, 1.0, 1.15), Bar::from_values(60_000, 1.15, 1.18, 1.1, 1.05)],
        200,
        100,
    );
    let (surface, stats) = render(&state);

    assert_eq!(stats.range.as_range(), 0..2);
    assert_eq!(stats.candles, 2);

    let scale = stats.scale.unwrap();
    assert_eq!(scale.price_to_y(1.2), 0.0);
    assert_eq!(scale.price_to_y(1.0), 100.0);

    let commands = surface.commands();
    assert!(matches!(commands[0], DrawCommand::Clear { .. }));
    assert_eq!(commands[1], DrawCommand::Resize(SurfaceSize::new(200, 100)));
    assert_eq!(
        commands[2],
        DrawCommand::Line { from: (5.0, 0.0), to: (5.0, 100.0), color: "black".into() }
    );
    match (&commands[3], &commands[5]) {
        (
            DrawCommand::FillRect { x: x0, width: w0, color: c0, .. },
            DrawCommand::FillRect { x: x1, width: w1, color: c1, .. },
        ) => {
            assert_eq!((*x0, *w0, c0.as_str()), (0.0, 10.0, "green"));
            assert_eq!((*x1, *w1, c1.as_str()), (10.0, 10.0, "red"));
        }
        other => panic!("expected two bodies, got {:?}", other),
    }

    let texts: Vec<&str> = surface.texts().collect();
    assert_eq!(texts, ["Forex Market Chart - EURUSD", "1.00", "1.04", "1.08", "1.12", "1.16", "1.20"]);
}

#[test]
fn single_bearish_candle_transcript() {
    let state = loaded(vec![Bar::from_values(0, 6.0, 8.0, 0.0, 2.0)], 20, 100);
    let (surface, _) = render(&state);

    insta::assert_snapshot!(surface.transcript(), @r#"
    clear 0.0,0.0 20.0x100.0
    resize 20x100
    line 5.0,0.0 -> 5.0,100.0 black
    rect 0.0,25.0 10.0x50.0 red
    text "Forex Market Chart - EURUSD" 10.0,40.0 20px Arial black
    text "0.00" 10.0,100.0 16px Arial black
    text "1.60" 10.0,80.0 16px Arial black
    text "3.20" 10.0,60.0 16px Arial black
    text "4.80" 10.0,40.0 16px Arial black
    text "6.40" 10.0,20.0 16px Arial black
    text "8.00" 10.0,0.0 16px Arial black
    "#);
}

#[test]
fn flat_candle_is_painted_down() {
    let state = loaded(vec![Bar::from_values(0, 1.1, 1.3, 1.0, 1.1)], 100, 100);
    let (surface, _) = render(&state);
    let colors: Vec<&str> = surface
        .rects()
        .filter_map(|c| match c {
            DrawCommand::FillRect { color, height, .. } => {
                assert_eq!(*height, 0.0);
                Some(color.as_str())
            }
            _ => None,
        })
        .collect();
    assert_eq!(colors, ["red"]);
}

#[test]
fn empty_series_paints_chrome_without_candles() {
    let state = ChartState::default().with_container(SurfaceSize::new(200, 100));
    let (surface, stats) = render(&state);

    assert_eq!(stats.candles, 0);
    assert!(stats.scale.is_none());
    assert_eq!(surface.rects().count(), 0);
    assert!(!surface.commands().iter().any(|c| matches!(c, DrawCommand::Line { .. })));
    assert_eq!(
        surface.texts().collect::<Vec<_>>(),
        ["Forex Market Chart - EURUSD", "0.00", "0.00", "0.00", "0.00", "0.00", "0.00", "Loading bars..."]
    );
    assert!(surface.commands().iter().flat_map(coordinates).all(f64::is_finite));

    let label_ys: Vec<f64> = surface
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { text, y, .. } if text == "0.00" => Some(*y),
            _ => None,
        })
        .collect();
    assert_eq!(label_ys, [50.0; 6]);
}

#[test]
fn status_line_reports_failure() {
    let state = ChartState::default().with_container(SurfaceSize::new(200, 100));
    let (state, _) = state.apply(ChartEvent::LoadFailed { reason: "HTTP error! status: 503".into() });
    assert!(matches!(state.status, LoadStatus::Failed { .. }));

    let (surface, _) = render(&state);
    let status = surface.commands().iter().find_map(|c| match c {
        DrawCommand::Text { text, y, .. } if text.starts_with("Failed") => Some((text.clone(), *y)),
        _ => None,
    });
    assert_eq!(status, Some(("Failed to load bars: HTTP error! status: 503".to_string(), 70.0)));
}

#[test]
fn flat_market_stays_finite() {
    let bars = (0..4).map(|i| Bar::from_values(i * 60_000, 1.5, 1.5, 1.5, 1.5)).collect();
    let state = loaded(bars, 100, 80);
    let (surface, stats) = render(&state);

    assert_eq!(stats.candles, 4);
    assert!(surface.commands().iter().flat_map(coordinates).all(f64::is_finite));
    assert!(surface.rects().all(|c| matches!(c, DrawCommand::FillRect { y, .. } if *y == 40.0)));
}

#[test]
fn scrolled_past_end_keeps_chrome() {
    let state = loaded(vec![Bar::from_values(0, 1.1, 1.2, 1.0, 1.15)], 200, 100);
    let (state, _) = state.apply(ChartEvent::Scrolled { delta_y: 1.0 });
    let (state, _) = state.apply(ChartEvent::Scrolled { delta_y: 1.0 });
    let (surface, stats) = render(&state);

    assert!(stats.range.is_empty());
    assert_eq!(surface.rects().count(), 0);
    assert_eq!(surface.texts().count(), 7);
}

#[test]
fn custom_style_colours_are_used() {
    let style = ChartStyle { up_color: "#26a69a".into(), down_color: "#ef5350".into(), ..ChartStyle::default() };
    let state = loaded(vec![Bar::from_values(0, 1.0, 2.0, 0.5, 1.5)], 50, 50);
    let mut surface = RecordingSurface::new(state.container);
    CandleRenderer::new(style).render(&mut surface, &state).unwrap();
    assert!(surface.rects().any(|c| matches!(c, DrawCommand::FillRect { color, .. } if color == "#26a69a")));
}

#[test]
fn every_repaint_starts_from_a_clear() {
    let state = loaded(vec![Bar::from_values(0, 1.0, 2.0, 0.5, 1.5)], 50, 50);
    let mut surface = RecordingSurface::new(SurfaceSize::new(10, 10));
    let renderer = CandleRenderer::default();
    renderer.render(&mut surface, &state).unwrap();
    renderer.render(&mut surface, &state).unwrap();

    assert_eq!(surface.repaint_count(), 2);
    let clears: Vec<&DrawCommand> =
        surface.commands().iter().filter(|c| matches!(c, DrawCommand::Clear { .. })).collect();
    assert_eq!(*clears[0], DrawCommand::Clear { x: 0.0, y: 0.0, width: 10.0, height: 10.0 });
    assert_eq!(*clears[1], DrawCommand::Clear { x: 0.0, y: 0.0, width: 50.0, height: 50.0 });
}
