// services/fabric-dash/src/ui.rs
//
// Drawing code for the dashboard page
// Header, selector, pipeline control, KPIs, weekly trend, Power BI report.
//

use ratatui::backend::TestBackend;
use ratatui::{
    prelude::*,
    widgets::*,
};

use svckit::BusinessCase;

use crate::view::{
    DashboardView, PipelinePanel, ReportPanel, Section, DESCRIPTION, REPORT_PLACEHOLDER,
    REPORT_PLACEHOLDER_DETAIL, TITLE,
};

// Fabric palette: Teal, Slate, Amber
mod colors {
    use ratatui::style::Color;

    pub const TEAL: Color = Color::Rgb(17, 124, 114);
    pub const LIGHT_TEAL: Color = Color::Rgb(79, 196, 180);
    pub const WHITE: Color = Color::Rgb(240, 244, 246);
    pub const SLATE: Color = Color::Rgb(140, 152, 164);
    pub const AMBER: Color = Color::Rgb(242, 169, 0);
    pub const INFO: Color = Color::Rgb(86, 156, 214);
    pub const BG_DARK: Color = Color::Rgb(12, 20, 28);
    pub const BG_PANEL: Color = Color::Rgb(22, 32, 42);
    pub const SUCCESS: Color = Color::Rgb(106, 168, 79);
    pub const ERROR: Color = Color::Rgb(220, 50, 47);
}

pub fn draw(frame: &mut Frame, view: &DashboardView) {
    let area = frame.area();

    frame.render_widget(
        Block::default().style(Style::default().bg(colors::BG_DARK)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),  // Header
            Constraint::Length(3),  // Business case selector
            Constraint::Length(3),  // Pipeline control
            Constraint::Length(5),  // KPIs
            Constraint::Min(9),     // Weekly trend
            Constraint::Length(6),  // Power BI report
            Constraint::Length(2),  // Footer
        ])
        .split(area);

    draw_header(frame, chunks[0]);
    draw_selector(frame, chunks[1], view.selected);
    draw_pipeline(frame, chunks[2], &view.pipeline);
    draw_kpis(frame, chunks[3], &view.kpis_title, &view.kpis);
    draw_trend(frame, chunks[4], &view.trend);
    draw_report(frame, chunks[5], &view.report);
    draw_footer(frame, chunks[6]);
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(colors::LIGHT_TEAL).bold(),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::SLATE))
        .border_type(BorderType::Rounded)
        .style(Style::default().bg(colors::BG_PANEL))
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            format!(" {} ", TITLE),
            Style::default().fg(colors::WHITE).bg(colors::TEAL).bold(),
        )),
        Line::from(Span::styled(DESCRIPTION, Style::default().fg(colors::SLATE))),
    ];

    let header = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(colors::TEAL))
                .style(Style::default().bg(colors::BG_DARK)),
        );

    frame.render_widget(header, area);
}

fn draw_selector(frame: &mut Frame, area: Rect, selected: BusinessCase) {
    let tabs = Tabs::new(BusinessCase::ALL.iter().map(|c| c.as_str()))
        .select(selected.index())
        .style(Style::default().fg(colors::SLATE))
        .highlight_style(Style::default().fg(colors::BG_DARK).bg(colors::LIGHT_TEAL).bold())
        .divider(Span::styled("|", Style::default().fg(colors::SLATE)))
        .block(panel("Select Business Case"));

    frame.render_widget(tabs, area);
}

fn draw_pipeline(frame: &mut Frame, area: Rect, pipeline: &PipelinePanel) {
    let button = Span::styled(
        " [ENTER] Run Fabric Pipeline ",
        Style::default().fg(colors::WHITE).bg(colors::TEAL).bold(),
    );

    let status = match pipeline {
        PipelinePanel::Idle => Span::raw(""),
        PipelinePanel::Running { spinner, business_case } => Span::styled(
            format!("{} Running pipeline for {}...", spinner, business_case),
            Style::default().fg(colors::AMBER),
        ),
        PipelinePanel::Notice(notice) => Span::styled(
            format!("✓ {}", notice),
            Style::default().fg(colors::SUCCESS).bold(),
        ),
        PipelinePanel::Error(reason) => Span::styled(
            format!("✗ {}", reason),
            Style::default().fg(colors::ERROR).bold(),
        ),
    };

    let line = Line::from(vec![button, Span::raw("  "), status]);
    frame.render_widget(Paragraph::new(line).block(panel("Pipeline Control")), area);
}

fn draw_kpis(frame: &mut Frame, area: Rect, title: &str, kpis: &Section<Vec<(String, String)>>) {
    let block = panel(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let kpis = match kpis {
        Section::Ready(kpis) => kpis,
        Section::Error(reason) => {
            draw_error(frame, inner, reason);
            return;
        }
    };
    if kpis.is_empty() {
        return;
    }

    let constraints = vec![Constraint::Ratio(1, kpis.len() as u32); kpis.len()];
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(inner);

    for ((label, value), column) in kpis.iter().zip(columns.iter()) {
        draw_metric(frame, *column, label, value);
    }
}

fn draw_metric(frame: &mut Frame, area: Rect, label: &str, value: &str) {
    let text = vec![
        Line::from(Span::styled(
            label,
            Style::default().fg(colors::SLATE).add_modifier(Modifier::DIM),
        )),
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default().fg(colors::WHITE).add_modifier(Modifier::BOLD),
        )),
    ];

    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

fn draw_trend(frame: &mut Frame, area: Rect, trend: &Section<Vec<(String, u64)>>) {
    let block = panel("Weekly Trend");

    let points = match trend {
        Section::Ready(points) => points,
        Section::Error(reason) => {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            draw_error(frame, inner, reason);
            return;
        }
    };

    // Series order, never sorted
    let bars: Vec<Bar> = points
        .iter()
        .map(|(day, value)| {
            Bar::default()
                .label(Line::from(day.as_str()))
                .value(*value)
                .text_value(value.to_string())
                .style(Style::default().fg(colors::LIGHT_TEAL))
                .value_style(Style::default().fg(colors::BG_DARK).bg(colors::LIGHT_TEAL))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .label_style(Style::default().fg(colors::WHITE))
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

fn draw_report(frame: &mut Frame, area: Rect, report: &ReportPanel) {
    let block = panel("Power BI Report");

    let text = match report {
        ReportPanel::Embedded { url } => vec![
            Line::from(Span::styled("Embedded report", Style::default().fg(colors::LIGHT_TEAL).bold())),
            Line::from(Span::styled(url.as_str(), Style::default().fg(colors::WHITE).underlined())),
        ],
        ReportPanel::Placeholder => vec![
            Line::from(Span::styled(
                format!("📊 {}", REPORT_PLACEHOLDER),
                Style::default().fg(colors::INFO).bold(),
            )),
            Line::from(""),
            Line::from(Span::styled(REPORT_PLACEHOLDER_DETAIL, Style::default().fg(colors::SLATE))),
        ],
        ReportPanel::Error(reason) => {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            draw_error(frame, inner, reason);
            return;
        }
    };

    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }).block(block), area);
}

fn draw_error(frame: &mut Frame, area: Rect, reason: &str) {
    let line = Line::from(Span::styled(
        format!("✗ {}", reason),
        Style::default().fg(colors::ERROR).bold(),
    ));
    frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), area);
}

fn draw_footer(frame: &mut Frame, area: Rect) {
    let help = Line::from(vec![
        Span::styled(" [Q] ", Style::default().fg(colors::BG_DARK).bg(colors::ERROR)),
        Span::styled(" Quit ", Style::default().fg(colors::SLATE)),
        Span::raw("  "),
        Span::styled(" [←/→] ", Style::default().fg(colors::BG_DARK).bg(colors::LIGHT_TEAL)),
        Span::styled(" Business Case ", Style::default().fg(colors::SLATE)),
        Span::raw("  "),
        Span::styled(" [1-3] ", Style::default().fg(colors::BG_DARK).bg(colors::SLATE)),
        Span::styled(" Jump ", Style::default().fg(colors::SLATE)),
        Span::raw("  "),
        Span::styled(" [ENTER/P] ", Style::default().fg(colors::BG_DARK).bg(colors::AMBER)),
        Span::styled(" Run Pipeline ", Style::default().fg(colors::SLATE)),
    ]);

    let footer = Paragraph::new(help)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(colors::TEAL))
                .style(Style::default().bg(colors::BG_DARK)),
        );

    frame.render_widget(footer, area);
}

/// Render one pass off-screen and return the frame as plain text
pub fn render_to_string(view: &DashboardView, width: u16, height: u16) -> std::io::Result<String> {
    let mut terminal = Terminal::new(TestBackend::new(width, height))?;
    terminal.draw(|frame| draw(frame, view))?;

    let buffer = terminal.backend().buffer();
    let lines: Vec<String> = buffer
        .content()
        .chunks(width.max(1) as usize)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>().trim_end().to_string())
        .collect();
    Ok(lines.join("\n"))
}
