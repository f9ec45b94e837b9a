//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine, Points};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Cell, Chart, Dataset, Gauge, GraphType,
    Paragraph, Row, Table, Tabs, Wrap,
};

use super::runtime::{App, ChargingView, Tab};
use super::style;
use crate::charging::StationStatus;
use crate::charging::profile::{CHART_MAX_KW, HOUR_GRID_STEP, HOURS, Period};
use crate::metrics::alert;
use crate::metrics::efficiency::GaugeReading;
use crate::metrics::flow::Stage;
use crate::metrics::weather::{OverlayIntensity, WeatherImpact};
use crate::view::topology;

/// Overlay base colors (heat, wind, solar).
const HEAT_RGB: (u8, u8, u8) = (255, 90, 40);
const WIND_RGB: (u8, u8, u8) = (80, 170, 255);
const SOLAR_RGB: (u8, u8, u8) = (255, 210, 60);

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(3), // quick stats
            Constraint::Length(3), // tabs
            Constraint::Min(12),   // body
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_quick_stats(frame, app, chunks[1]);
    render_tabs(frame, app, chunks[2]);
    match app.tab {
        Tab::Overview => render_overview(frame, app, chunks[3]),
        Tab::PowerFlow => render_power_flow(frame, app, chunks[3]),
        Tab::Efficiency => render_efficiency(frame, app, chunks[3]),
        Tab::Weather => render_weather(frame, app, chunks[3]),
        Tab::Charging => render_charging(frame, app, chunks[3]),
    }
    render_footer(frame, app, chunks[4]);
}

/// Header bar: title, alert badge, refresh state, last-updated clock.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let d = &app.dashboard;
    let mut spans = vec![
        Span::styled(
            " GRIDVIEW ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Power Distribution Monitor "),
    ];

    if let Some(badge) = alert::badge(&d.current().alerts) {
        spans.push(Span::styled(
            format!(" {badge} "),
            Style::default()
                .fg(Color::White)
                .bg(style::ALERT)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" "));
    }

    let (icon, label, color) = if d.is_real_time() {
        ("▶", "LIVE", style::LIVE)
    } else {
        ("‖", "PAUSED", style::PAUSED)
    };
    spans.push(Span::styled(
        format!("{icon} {label}"),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::raw(format!(
        " │ Last updated {} UTC",
        d.current().time_label()
    )));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// The four headline cards.
fn render_quick_stats(frame: &mut Frame, app: &App, area: Rect) {
    let q = app.dashboard.quick_stats();
    let cards = [
        ("Total Generation", format!("{:.1} kW", q.total_generation_kw)),
        ("System Efficiency", format!("{:.1}%", q.system_efficiency_pct)),
        ("Weather Impact", format!("{:.1}°C", q.temperature_c)),
        ("Active Loads", q.active_loads.to_string()),
    ];

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for ((title, value), chunk) in cards.into_iter().zip(chunks.iter()) {
        let card = Paragraph::new(Line::from(Span::styled(
            value,
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .block(
            Block::default()
                .title(format!(" {title} "))
                .borders(Borders::ALL),
        );
        frame.render_widget(card, *chunk);
    }
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{} {}", i + 1, t.title()));
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL))
        .select(app.tab.index())
        .highlight_style(
            Style::default()
                .fg(style::FLOW_LINE)
                .add_modifier(Modifier::BOLD),
        )
        .divider("│");
    frame.render_widget(tabs, area);
}

fn render_overview(frame: &mut Frame, app: &App, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(6)])
        .split(cols[1]);

    render_flow_diagram(frame, app, cols[0], false);
    render_gauge(
        frame,
        app.dashboard.current().efficiency.system_gauge(),
        right[0],
    );
    render_system_3d(frame, app, right[1]);
}

fn render_power_flow(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(7)])
        .split(area);
    render_flow_diagram(frame, app, rows[0], true);
    render_stage_table(frame, app, rows[1]);
}

/// Left-to-right pipeline of the four stages with per-link losses.
fn render_flow_diagram(frame: &mut Frame, app: &App, area: Rect, detailed: bool) {
    let snapshot = app.dashboard.current();
    let flow = &snapshot.power_flow;
    let nodes = topology::flow_nodes(flow);
    let overall = snapshot.efficiency.overall_pct;

    let to_x = |frac: f64| 10.0 + frac * 80.0;
    let node_y = 25.0;

    let canvas = Canvas::default()
        .block(
            Block::default()
                .title(" Power Flow ")
                .borders(Borders::ALL),
        )
        .marker(symbols::Marker::Braille)
        .x_bounds([0.0, 100.0])
        .y_bounds([0.0, 50.0])
        .paint(|ctx| {
            for pair in nodes.windows(2) {
                ctx.draw(&CanvasLine::new(
                    to_x(pair[0].x),
                    node_y,
                    to_x(pair[1].x),
                    node_y,
                    style::FLOW_LINE,
                ));
            }
            for node in &nodes {
                ctx.draw(&Circle {
                    x: to_x(node.x),
                    y: node_y,
                    radius: 4.0,
                    color: style::intensity_color(node.intensity),
                });
            }
            ctx.layer();
            for node in &nodes {
                let x = to_x(node.x) - 6.0;
                ctx.print(x, node_y + 10.0, node.stage.label());
                ctx.print(x, node_y - 10.0, format!("{:.1} kW", node.value_kw));
            }
            if detailed {
                for pair in nodes.windows(2) {
                    let mid = (to_x(pair[0].x) + to_x(pair[1].x)) / 2.0 - 4.0;
                    ctx.print(
                        mid,
                        node_y + 3.0,
                        Span::styled(
                            format!("-{:.2}", flow.loss_kw(pair[0].stage)),
                            Style::default().fg(style::WARNING),
                        ),
                    );
                }
                ctx.print(
                    2.0,
                    3.0,
                    format!("Overall efficiency: {overall:.1}%"),
                );
            }
        });
    frame.render_widget(canvas, area);
}

fn render_stage_table(frame: &mut Frame, app: &App, area: Rect) {
    let flow = &app.dashboard.current().power_flow;
    let generation = flow.generation_kw;
    let rows = Stage::ALL.iter().map(|&stage| {
        let value = flow.value(stage);
        let share = if generation > 0.0 {
            value / generation * 100.0
        } else {
            0.0
        };
        Row::new(vec![
            Cell::from(stage.label()),
            Cell::from(format!("{value:>8.2}")),
            Cell::from(format!("{:>6.2}", flow.loss_kw(stage))),
            Cell::from(format!("{share:>6.1}%")),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Length(14),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(12),
        ],
    )
    .header(
        Row::new(vec!["Stage", "Power kW", "Loss kW", "Of gen."])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().title(" Stages ").borders(Borders::ALL));
    frame.render_widget(table, area);
}

/// Five-component system projected through the app camera.
fn render_system_3d(frame: &mut Frame, app: &App, area: Rect) {
    let components = topology::components(&app.dashboard.current().power_flow);
    let links = topology::links(&components);
    let cam = app.camera;

    let canvas = Canvas::default()
        .block(
            Block::default()
                .title(format!(" System View (zoom {:.1}x) ", cam.zoom))
                .borders(Borders::ALL),
        )
        .marker(symbols::Marker::Braille)
        .x_bounds([-200.0, 200.0])
        .y_bounds([-130.0, 130.0])
        .paint(|ctx| {
            for (a, b) in &links {
                let pa = cam.project(a.position);
                let pb = cam.project(b.position);
                ctx.draw(&CanvasLine::new(
                    pa.x,
                    -pa.y,
                    pb.x,
                    -pb.y,
                    style::GRID,
                ));
            }
            for c in &components {
                let p = cam.project(c.position);
                ctx.draw(&Circle {
                    x: p.x,
                    y: -p.y,
                    radius: c.size * p.scale,
                    color: style::intensity_color(c.intensity),
                });
            }
            ctx.layer();
            for c in &components {
                let p = cam.project(c.position);
                ctx.print(p.x - 20.0, -p.y - c.size * p.scale - 12.0, c.name);
            }
        });
    frame.render_widget(canvas, area);
}

fn render_gauge(frame: &mut Frame, reading: GaugeReading, area: Rect) {
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(format!(" {} ", reading.label))
                .borders(Borders::ALL),
        )
        .gauge_style(Style::default().fg(style::band_color(reading.band())))
        .ratio(reading.fraction())
        .label(format!("{:.1}%", reading.value_pct));
    frame.render_widget(gauge, area);
}

fn render_efficiency(frame: &mut Frame, app: &App, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
        ])
        .split(cols[0]);

    let gauges = app.dashboard.current().efficiency.gauges();
    for (reading, chunk) in gauges.iter().zip(left.iter()) {
        render_gauge(frame, *reading, *chunk);
    }
    render_efficiency_trend(frame, app, left[3]);

    let bars: Vec<Bar> = gauges
        .iter()
        .map(|g| {
            Bar::default()
                .value(g.value_pct.clamp(0.0, 100.0).round() as u64)
                .text_value(format!("{:.1}%", g.value_pct))
                .label(Line::from(g.label))
                .style(Style::default().fg(style::band_color(g.band())))
        })
        .collect();
    let chart = BarChart::default()
        .block(Block::default().title(" Efficiency ").borders(Borders::ALL))
        .data(BarGroup::default().bars(&bars))
        .bar_width(12)
        .bar_gap(3)
        .max(100);
    frame.render_widget(chart, cols[1]);
}

/// Overall efficiency across the retained history.
fn render_efficiency_trend(frame: &mut Frame, app: &App, area: Rect) {
    let data: Vec<(f64, f64)> = app
        .dashboard
        .history()
        .iter()
        .map(|s| (s.seq as f64, f64::from(s.efficiency.overall_pct)))
        .collect();
    let y_bounds = style::auto_bounds_y(&data);
    let x_lo = data.first().map_or(0.0, |p| p.0);
    let x_hi = data.last().map_or(1.0, |p| p.0).max(x_lo + 1.0);

    let datasets = vec![
        Dataset::default()
            .name("Overall")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(style::FLOW_LINE))
            .data(&data),
    ];
    let chart = Chart::new(datasets)
        .block(Block::default().title(" Trend ").borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .title("refresh")
                .bounds([x_lo, x_hi])
                .labels(vec![format!("{x_lo:.0}"), format!("{x_hi:.0}")]),
        )
        .y_axis(
            Axis::default()
                .title("%")
                .bounds(y_bounds)
                .labels(vec![
                    format!("{:.1}", y_bounds[0]),
                    format!("{:.1}", y_bounds[1]),
                ]),
        );
    frame.render_widget(chart, area);
}

fn render_weather(frame: &mut Frame, app: &App, area: Rect) {
    let snapshot = app.dashboard.current();
    let weather = &snapshot.weather;
    let overlay = OverlayIntensity::from_weather(weather);
    let impact = WeatherImpact::assess(weather);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(cols[0]);

    // heat tint as a dot grid behind the stations
    let tint: Vec<(f64, f64)> = (0..=20)
        .flat_map(|i| (0..=10).map(move |j| (f64::from(i) / 20.0, f64::from(j) / 10.0)))
        .collect();
    let heat_color = style::overlay_color(HEAT_RGB, overlay.heat);
    let stations = &snapshot.weather_stations;

    let map = Canvas::default()
        .block(
            Block::default()
                .title(" Weather Overlay ")
                .borders(Borders::ALL),
        )
        .marker(symbols::Marker::Dot)
        .x_bounds([0.0, 1.0])
        .y_bounds([0.0, 1.0])
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &tint,
                color: heat_color,
            });
            ctx.layer();
            for s in stations {
                let x = f64::from(s.x);
                let y = 1.0 - f64::from(s.y);
                ctx.draw(&Circle {
                    x,
                    y,
                    radius: 0.04,
                    color: Color::White,
                });
                ctx.print(
                    x - 0.05,
                    y + 0.08,
                    format!("{} {:.1}°C", s.name, s.temperature_c),
                );
            }
        });
    frame.render_widget(map, left[0]);

    let layers = [
        ("Heat", overlay.heat, HEAT_RGB),
        ("Wind", overlay.wind, WIND_RGB),
        ("Solar", overlay.solar, SOLAR_RGB),
    ];
    for ((label, value, rgb), chunk) in layers.into_iter().zip(left[1..].iter()) {
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title(format!(" {label} overlay "))
                    .borders(Borders::ALL),
            )
            .gauge_style(Style::default().fg(style::overlay_color(rgb, 1.0)))
            .ratio(f64::from(value))
            .label(format!("{:.0}%", value * 100.0));
        frame.render_widget(gauge, *chunk);
    }

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(5)])
        .split(cols[1]);

    let metrics = Paragraph::new(vec![
        Line::from(format!("Temperature:  {:.1} °C", weather.temperature_c)),
        Line::from(format!("Wind speed:   {:.1} m/s", weather.wind_speed_ms)),
        Line::from(format!("Irradiance:   {:.0} W/m²", weather.solar_irradiance_wm2)),
        Line::from(format!("Humidity:     {:.0} %", weather.humidity_pct)),
    ])
    .block(Block::default().title(" Conditions ").borders(Borders::ALL));
    frame.render_widget(metrics, right[0]);

    let flag = |on: bool| {
        if on {
            Style::default().fg(style::WARNING)
        } else {
            Style::default()
        }
    };
    let impact_lines = vec![
        Line::from(vec![
            Span::raw("Solar generation:  "),
            Span::styled(impact.solar_label(), flag(!impact.solar_optimal)),
        ]),
        Line::from(vec![
            Span::raw("Wind generation:   "),
            Span::styled(impact.wind_label(), flag(impact.wind_high)),
        ]),
        Line::from(vec![
            Span::raw("Cooling demand:    "),
            Span::styled(impact.cooling_label(), flag(impact.cooling_increased)),
        ]),
    ];
    let impact_widget = Paragraph::new(impact_lines)
        .block(Block::default().title(" Grid Impact ").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(impact_widget, right[1]);
}

fn render_charging(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(8)])
        .split(area);

    let s = app.dashboard.fleet_summary();
    let summary = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("{} stations", s.station_count),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" │ "),
        Span::styled(
            format!("{} charging", s.active),
            Style::default().fg(style::status_color(StationStatus::Charging)),
        ),
        Span::raw(format!(
            " │ {} available │ {} offline │ {:.1} kW │ {:.0}% utilized",
            s.available, s.offline, s.total_power_kw, s.station_utilization_pct
        )),
    ]))
    .block(
        Block::default()
            .title(format!(" EV Charging: {} (v) ", app.charging_view.title()))
            .borders(Borders::ALL),
    );
    frame.render_widget(summary, rows[0]);

    match app.charging_view {
        ChargingView::DemandProfile => render_demand_profile(frame, app, rows[1]),
        ChargingView::Stations => render_station_table(frame, app, rows[1]),
        ChargingView::Analytics => render_analytics(frame, app, rows[1]),
    }
}

/// 24-hour demand curve with commute peaks marked.
fn render_demand_profile(frame: &mut Frame, app: &App, area: Rect) {
    let profile = app.dashboard.profile();
    let data = profile.points();
    let peaks: Vec<(f64, f64)> = data
        .iter()
        .copied()
        .filter(|&(h, _)| Period::of_hour(h as usize) == Period::Peak)
        .collect();

    let datasets = vec![
        Dataset::default()
            .name("Demand")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(style::FLOW_LINE))
            .data(&data),
        Dataset::default()
            .name("Peak hours")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(style::WARNING))
            .data(&peaks),
    ];

    let x_labels: Vec<String> = (0..=HOURS)
        .step_by(HOUR_GRID_STEP)
        .map(|h| format!("{h:02}:00"))
        .collect();
    let y_labels: Vec<String> = (0..=4)
        .map(|i| format!("{:.0}", CHART_MAX_KW * f64::from(i) / 4.0))
        .collect();

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(format!(
                    " 24h Demand (peak {:02}:00, {:.1} MWh/day) ",
                    profile.peak_hour(),
                    profile.daily_energy_kwh() / 1000.0
                ))
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title("hour")
                .style(Style::default().fg(style::GRID))
                .bounds([0.0, HOURS as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("kW")
                .style(Style::default().fg(style::GRID))
                .bounds([0.0, CHART_MAX_KW])
                .labels(y_labels),
        );
    frame.render_widget(chart, area);
}

fn render_station_table(frame: &mut Frame, app: &App, area: Rect) {
    let rows = app.dashboard.fleet().stations().iter().map(|st| {
        let charging = st.is_charging();
        let dash = || Cell::from("-");
        Row::new(vec![
            Cell::from(st.id.clone()),
            Cell::from(st.name.clone()),
            Cell::from(st.status.label())
                .style(Style::default().fg(style::status_color(st.status))),
            if charging {
                Cell::from(st.vehicle.name())
            } else {
                dash()
            },
            if charging {
                Cell::from(format!("{:>5.1}%", st.charge_level_pct))
            } else {
                dash()
            },
            Cell::from(format!(
                "{:>5.1} / {:.0} kW",
                st.current_power_kw, st.max_power_kw
            )),
            if charging {
                Cell::from(st.time_remaining_label())
            } else {
                dash()
            },
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(11),
            Constraint::Length(10),
            Constraint::Length(14),
            Constraint::Length(8),
            Constraint::Length(16),
            Constraint::Length(8),
        ],
    )
    .header(
        Row::new(vec![
            "ID", "Name", "Status", "Vehicle", "Charge", "Power", "Left",
        ])
        .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().title(" Stations ").borders(Borders::ALL));
    frame.render_widget(table, area);
}

fn render_analytics(frame: &mut Frame, app: &App, area: Rect) {
    let s = app.dashboard.fleet_summary();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let lines = vec![
        Line::from(format!("Total power:           {:.1} kW", s.total_power_kw)),
        Line::from(format!("Projected daily:       {:.2} MWh", s.projected_daily_mwh)),
        Line::from(format!("Peak demand (est.):    {:.1} kW", s.peak_demand_kw)),
        Line::from(format!("Off-peak demand (est.): {:.1} kW", s.off_peak_demand_kw)),
        Line::from(format!("Average charge level:  {:.1}%", s.average_charge_pct)),
        Line::from(format!("Average session:       {:.1} h", s.average_session_hours)),
    ];
    let text = Paragraph::new(lines)
        .block(Block::default().title(" Analytics ").borders(Borders::ALL));
    frame.render_widget(text, cols[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)])
        .split(cols[1]);
    for (label, pct, chunk) in [
        ("Station utilization", s.station_utilization_pct, right[0]),
        ("Power utilization", s.power_utilization_pct, right[1]),
    ] {
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title(format!(" {label} "))
                    .borders(Borders::ALL),
            )
            .gauge_style(Style::default().fg(style::FLOW_LINE))
            .ratio(f64::from(pct.clamp(0.0, 100.0)) / 100.0)
            .label(format!("{pct:.1}%"));
        frame.render_widget(gauge, chunk);
    }
}

/// Footer with refresh settings and keybinding hints.
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let d = &app.dashboard;
    let settings = match d.next_refresh_in_ms() {
        Some(remaining) => format!(
            " Update interval {}s (next in {}s) │",
            d.interval_ms() / 1000,
            remaining.div_ceil(1000)
        ),
        None => " Real-time off │".to_string(),
    };
    let footer = Paragraph::new(Line::from(vec![
        Span::raw(settings),
        Span::styled(
            " q:Quit  Tab/1-5:Tabs  Space:Live  r:Refresh  +/-:Interval  wasd/z/x/0:View  v:Sub-view",
            Style::default().fg(style::FOOTER_FG),
        ),
    ]));
    frame.render_widget(footer, area);
}
