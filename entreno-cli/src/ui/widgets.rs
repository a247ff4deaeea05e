use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, List, ListItem, Paragraph, Widget},
};

use super::app::QUICK_ACTIONS;
use crate::services::stats::{ConstancyPoint, DashboardStats, TARGET_SCORE};

fn panel(title: &str, is_selected: bool) -> Block<'_> {
    let border_style = if is_selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style)
}

/// Greeting plus session totals
pub fn render_summary(
    area: Rect,
    buf: &mut Buffer,
    user_name: &str,
    stats: &DashboardStats,
    is_selected: bool,
) {
    let block = panel(" 🏋 Resumen ", is_selected);
    let inner = block.inner(area);
    block.render(area, buf);

    let label = Style::default().fg(Color::Gray);
    let lines = vec![
        Line::from(Span::styled(
            format!("¡Hola, {}!", user_name),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Entrenamientos totales: ", label),
            Span::styled(
                stats.total_sessions.to_string(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Días entrenados esta semana: ", label),
            Span::styled(
                format!("{}/7", stats.weekly_sessions),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    Paragraph::new(lines).render(inner, buf);
}

fn bar(point: &ConstancyPoint) -> Bar<'static> {
    let color = if point.meets_target() {
        Color::Green
    } else {
        Color::Yellow
    };

    Bar::default()
        .value(u64::from(point.score))
        .label(Line::from(point.label))
        .style(Style::default().fg(color))
        .value_style(Style::default().fg(Color::Black).bg(color))
}

/// Eight-day constancy trend
pub fn render_constancy_chart(
    area: Rect,
    buf: &mut Buffer,
    stats: &DashboardStats,
    is_selected: bool,
) {
    let title = format!(" 📈 Constancia (objetivo {}) ", TARGET_SCORE);
    let block = panel(&title, is_selected);
    let inner = block.inner(area);
    block.render(area, buf);

    let bars: Vec<Bar> = stats.constancy.iter().map(bar).collect();
    BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .max(100)
        .bar_width(5)
        .bar_gap(1)
        .render(inner, buf);
}

/// Render quick actions panel
pub fn render_quick_actions(area: Rect, buf: &mut Buffer, selected_index: usize, is_selected: bool) {
    let block = panel(" ⚡ Accesos rápidos ", is_selected);
    let inner = block.inner(area);
    block.render(area, buf);

    let items: Vec<ListItem> = QUICK_ACTIONS
        .iter()
        .enumerate()
        .map(|(idx, (key, label, _))| {
            let style = if is_selected && idx == selected_index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::REVERSED)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(Span::styled(
                format!("  [{}] {}", key.to_ascii_uppercase(), label),
                style,
            )))
        })
        .collect();

    List::new(items).render(inner, buf);
}

/// Render help overlay
pub fn render_help_overlay(area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" ❓ Ayuda ")
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(area);
    block.render(area, buf);

    let heading = Style::default().fg(Color::Cyan);
    let mut help_text = vec![
        Line::from(Span::styled(
            "Atajos de teclado",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Navegación:", heading)),
        Line::from("  Tab / →     - Panel siguiente"),
        Line::from("  Shift+Tab / ← - Panel anterior"),
        Line::from("  ↑/k ↓/j     - Mover selección"),
        Line::from("  Enter       - Abrir acceso rápido"),
        Line::from(""),
        Line::from(Span::styled("Accesos rápidos:", heading)),
    ];
    help_text.extend(
        QUICK_ACTIONS
            .iter()
            .map(|(key, label, _)| Line::from(format!("  {}           - {}", key, label))),
    );
    help_text.extend([
        Line::from(""),
        Line::from(Span::styled("Otros:", heading)),
        Line::from("  r           - Recargar datos"),
        Line::from("  ?           - Mostrar/ocultar ayuda"),
        Line::from("  q / Esc     - Salir"),
        Line::from(""),
        Line::from(Span::styled(
            "Pulsa ? o Esc para cerrar",
            Style::default().fg(Color::DarkGray),
        )),
    ]);

    Paragraph::new(help_text).render(inner, buf);
}

/// Render status bar at bottom
pub fn render_status_bar(area: Rect, buf: &mut Buffer, refreshing: bool) {
    let status = if refreshing {
        Span::styled(
            " ⏳ Actualizando... ",
            Style::default().fg(Color::Yellow).bg(Color::DarkGray),
        )
    } else {
        Span::styled(
            " ✓ Al día ",
            Style::default().fg(Color::Green).bg(Color::DarkGray),
        )
    };

    let help_hint = Span::styled(
        " Pulsa ? para ayuda ",
        Style::default().fg(Color::Gray).bg(Color::DarkGray),
    );

    Paragraph::new(Line::from(vec![status, help_hint])).render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn stats() -> DashboardStats {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        DashboardStats {
            total_sessions: 12,
            weekly_sessions: 3,
            constancy: vec![ConstancyPoint {
                date,
                label: "lun",
                score: 65,
            }],
        }
    }

    fn text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_summary_shows_totals() {
        let area = Rect::new(0, 0, 50, 8);
        let mut buf = Buffer::empty(area);
        render_summary(area, &mut buf, "Ana", &stats(), false);

        let rendered = text(&buf);
        assert!(rendered.contains("Ana"));
        assert!(rendered.contains("12"));
        assert!(rendered.contains("3/7"));
    }

    #[test]
    fn test_chart_labels_days() {
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        render_constancy_chart(area, &mut buf, &stats(), true);

        assert!(text(&buf).contains("lun"));
    }
}
