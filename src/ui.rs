//! TUI rendering for farefinder.
//!
//! One screen: the search form on the left, the results pane on the right
//! (a status message or a stack of flight cards) and a key help bar.

use crate::app::{App, Field, ResultsView};
use crate::models::{FlightCard, NOT_AVAILABLE, UNKNOWN_AIRLINE};
use ratatui::{
    prelude::*,
    widgets::{block::Title, *},
};

/// Rows taken by one card, borders included.
const CARD_HEIGHT: u16 = 4;

/// Renders one frame of the TUI based on current application state.
pub fn render(f: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.size());

    let title = Paragraph::new(" farefinder ")
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    f.render_widget(title, rows[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(rows[1]);

    render_form(f, app, body[0]);
    render_results(f, app, body[1]);

    let help = Paragraph::new(
        " Tab/↑↓ move   Space toggle round trip   Enter search   PgUp/PgDn scroll   Esc quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, rows[2]);
}

/// Search form: one line per field, the focused one highlighted.
fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let focused = Style::default()
        .fg(Color::Cyan)
        .bg(Color::Rgb(30, 30, 60))
        .add_modifier(Modifier::BOLD);

    let mut lines = Vec::with_capacity(Field::ALL.len() * 2);
    for field in Field::ALL {
        let is_focused = field == app.focus;
        let label_style = if is_focused { focused } else { Style::default() };

        let value = match field {
            Field::RoundTrip => String::from(if app.form.round_trip { "[x]" } else { "[ ]" }),
            _ => {
                let cursor = if is_focused && app.tick_count % 6 < 3 { "_" } else { " " };
                format!("{}{}", app.field_value(field), cursor)
            }
        };

        // Return date is only sent on round trips.
        let value_style = if field == Field::ReturnDate && !app.form.round_trip {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Yellow)
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {:<12}", field.label()), label_style),
            Span::styled(value, value_style),
        ]));
        lines.push(Line::from(""));
    }

    let form = Paragraph::new(lines).block(
        Block::default()
            .title(" Search ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .padding(Padding::new(1, 1, 1, 0)),
    );
    f.render_widget(form, area);
}

/// Results pane: a status message or the card stack starting at `app.scroll`.
fn render_results(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Results ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    let cards = match &app.results {
        ResultsView::Cards(cards) => cards,
        other => {
            let color = match other {
                ResultsView::Invalid(_) => Color::Yellow,
                ResultsView::Failed => Color::Red,
                _ => Color::DarkGray,
            };
            let msg = Paragraph::new(other.message().unwrap_or_default())
                .style(Style::default().fg(color))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block.padding(Padding::new(1, 1, 1, 0)));
            f.render_widget(msg, area);
            return;
        }
    };

    let inner = block.inner(area);
    f.render_widget(
        block.title(Title::from(format!(" {} flights ", cards.len())).alignment(Alignment::Right)),
        area,
    );

    let visible = (inner.height / CARD_HEIGHT).max(1) as usize;
    let mut y = inner.y;
    for card in cards.iter().skip(app.scroll).take(visible) {
        let slot = Rect::new(inner.x, y, inner.width, CARD_HEIGHT.min(inner.bottom().saturating_sub(y)));
        render_card(f, card, slot);
        y += CARD_HEIGHT;
    }
}

fn render_card(f: &mut Frame, card: &FlightCard, area: Rect) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled(
            card.airline.as_str(),
            bold.fg(get_airline_color(&card.airline)),
        )),
        Line::from(vec![
            Span::styled("Departs ", bold),
            Span::raw(card.departure.as_str()),
            Span::raw("  →  "),
            Span::styled("Arrives ", bold),
            Span::raw(card.arrival.as_str()),
            Span::raw("  │  "),
            Span::styled(card.price.as_str(), Style::default().fg(Color::Green)),
        ]),
    ];

    let p = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(1)),
    );
    f.render_widget(p, area);
}

/// Brand-style color for well known airlines, matched by substring.
fn get_airline_color(airline: &str) -> Color {
    if airline == NOT_AVAILABLE || airline == UNKNOWN_AIRLINE {
        return Color::DarkGray;
    }

    let name = airline.to_lowercase();
    if name.contains("indigo") {
        Color::Blue
    } else if name.contains("air india") {
        Color::Red
    } else if name.contains("vistara") {
        Color::Magenta
    } else if name.contains("spicejet") {
        Color::Rgb(220, 60, 40)
    } else if name.contains("american") {
        Color::Cyan
    } else if name.contains("united") {
        Color::Rgb(0, 90, 170)
    } else if name.contains("delta") {
        Color::Rgb(180, 20, 40)
    } else {
        Color::White
    }
}
