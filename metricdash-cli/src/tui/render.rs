use metricdash_core::{
    Banner, ChartView, ConnectionState, DashboardView, DiagnosticStrip, LoadingView,
    SummaryCards, View, WAITING_SUBTITLE, WAITING_TITLE,
};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Wrap};
use ratatui::Frame;

const CPU_COLOR: Color = Color::Rgb(0x66, 0x7e, 0xea);
const MEMORY_COLOR: Color = Color::Rgb(0x38, 0xef, 0x7d);
const BANNER_COLOR: Color = Color::Yellow;

pub fn draw(frame: &mut Frame, view: &View) {
    match view {
        View::Loading(loading) => draw_loading(frame, loading),
        View::Dashboard(dashboard) => draw_dashboard(frame, dashboard),
    }
}

fn draw_loading(frame: &mut Frame, loading: &LoadingView) {
    let area = frame.size();
    let top = area.height.saturating_sub(2) / 2;
    let text = vec![
        Line::from(Span::styled(
            format!("🚀 {}", loading.title),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(loading.subtitle),
    ];
    let centered = Rect {
        y: area.y + top,
        height: area.height.saturating_sub(top),
        ..area
    };
    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center),
        centered,
    );
}

fn draw_dashboard(frame: &mut Frame, view: &DashboardView) {
    let mut constraints = vec![Constraint::Length(1)];
    if view.banner.is_some() {
        constraints.push(Constraint::Length(5));
    }
    constraints.extend([
        Constraint::Length(5),
        Constraint::Min(8),
        Constraint::Length(3),
    ]);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.size());
    let mut chunks = chunks.iter().copied();
    let mut next = || chunks.next().unwrap_or_default();

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                "📊 System Metrics Dashboard",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled("  (q to quit)", Style::default().fg(Color::DarkGray)),
        ])),
        next(),
    );
    if let Some(banner) = &view.banner {
        draw_banner(frame, next(), banner);
    }
    draw_cards(frame, next(), &view.cards);
    draw_chart(frame, next(), &view.chart);
    draw_diagnostics(frame, next(), &view.diagnostics);
}

fn draw_banner(frame: &mut Frame, area: Rect, banner: &Banner) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BANNER_COLOR))
        .title(Span::styled(
            format!("⚠ {}", banner.title),
            Style::default().fg(BANNER_COLOR).add_modifier(Modifier::BOLD),
        ));
    let text = vec![
        Line::from(banner.message.as_str()),
        Line::from(Span::styled(
            banner.note.as_str(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_cards(frame: &mut Frame, area: Rect, cards: &SummaryCards) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let footer = |text: String| Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)));

    let cpu = vec![
        Line::from(Span::styled(
            cards.cpu.as_str(),
            Style::default().fg(CPU_COLOR).add_modifier(Modifier::BOLD),
        )),
        footer("Live processor load".into()),
    ];
    let mut memory = vec![Line::from(Span::styled(
        cards.memory.as_str(),
        Style::default().fg(MEMORY_COLOR).add_modifier(Modifier::BOLD),
    ))];
    if let Some(total) = &cards.total_memory {
        memory.push(footer(format!("Total: {total}")));
    }

    frame.render_widget(
        Paragraph::new(cpu).block(card_block("🖥 CPU Usage", CPU_COLOR)),
        halves[0],
    );
    frame.render_widget(
        Paragraph::new(memory).block(card_block("💾 Memory Usage", MEMORY_COLOR)),
        halves[1],
    );
}

fn card_block(title: &str, color: Color) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title)
}

fn draw_chart(frame: &mut Frame, area: Rect, chart: &ChartView) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("📈 Live Performance");

    if chart.is_empty() {
        let text = vec![
            Line::from(Span::styled(
                WAITING_TITLE,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(WAITING_SUBTITLE),
        ];
        frame.render_widget(
            Paragraph::new(text).alignment(Alignment::Center).block(block),
            area,
        );
        return;
    }

    let datasets = vec![
        Dataset::default()
            .name("CPU %")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(CPU_COLOR))
            .data(&chart.cpu),
        Dataset::default()
            .name("Memory GB")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(MEMORY_COLOR))
            .data(&chart.memory),
    ];

    let x_max = chart.labels.len().saturating_sub(1).max(1) as f64;
    let axis_style = Style::default().fg(Color::Gray);
    let widget = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(axis_style)
                .bounds([0.0, x_max])
                .labels(x_labels(&chart.labels)),
        )
        .y_axis(
            Axis::default()
                .style(axis_style)
                .bounds([0.0, chart.y_max])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format!("{:.0}", chart.y_max / 2.0)),
                    Span::raw(format!("{:.0}", chart.y_max)),
                ]),
        );
    frame.render_widget(widget, area);
}

/// First, middle and last time labels.
fn x_labels(labels: &[String]) -> Vec<Span<'_>> {
    match labels {
        [] => Vec::new(),
        [only] => vec![Span::raw(only.as_str())],
        [first, last] => vec![Span::raw(first.as_str()), Span::raw(last.as_str())],
        [first, .., last] => {
            let middle = &labels[labels.len() / 2];
            vec![
                Span::raw(first.as_str()),
                Span::raw(middle.as_str()),
                Span::raw(last.as_str()),
            ]
        }
    }
}

fn draw_diagnostics(frame: &mut Frame, area: Rect, strip: &DiagnosticStrip) {
    let key = |k: &'static str| Span::styled(k, Style::default().add_modifier(Modifier::BOLD));
    let sep = || Span::styled("  │  ", Style::default().fg(Color::DarkGray));
    let status_style = match strip.connection {
        ConnectionState::Live => Style::default().fg(Color::Green),
        ConnectionState::Demo | ConnectionState::Loading => Style::default().fg(Color::Red),
    };

    let line = Line::from(vec![
        key("Status: "),
        Span::styled(strip.status, status_style),
        sep(),
        key("Data Points: "),
        Span::raw(strip.data_points.to_string()),
        sep(),
        key("Last Update: "),
        Span::raw(strip.last_update.as_str()),
        sep(),
        key("Backend: "),
        Span::styled(
            strip.endpoint.as_str(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .title("🔍 System Info"),
        ),
        area,
    );
}
