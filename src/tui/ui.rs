//! UI rendering functions for the TUI.
//!
//! Draws the title, the question input, the loading/answer region and a
//! shortcut bar. Rendering is a pure function of `App` state.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::app::App;
use crate::form::FormView;

const TITLE: &str = "RAG Document Q&A";
const PLACEHOLDER: &str = "Ask a question about the documents...";

/// Main rendering function for the TUI.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = screen_layout(frame.area());

    render_title(frame, chunks[0]);
    render_query_input(frame, app, chunks[1]);
    render_body(frame, app, chunks[2]);
    render_shortcut_bar(frame, app, chunks[3]);
}

fn screen_layout(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Question input
            Constraint::Min(0),    // Loading indicator / answer
            Constraint::Length(1), // Shortcut bar
        ])
        .split(area)
}

/// Returns the largest useful answer scroll offset for a screen of `area`.
///
/// This is the wrapped answer height minus the rows visible inside the
/// answer panel, or 0 when no answer is shown.
pub fn max_answer_scroll(app: &App, area: Rect) -> u16 {
    let FormView::Answered(answer) = app.view() else {
        return 0;
    };

    let body = screen_layout(area)[2];
    let inner_width = body.width.saturating_sub(2);
    let inner_height = body.height.saturating_sub(2);
    if inner_width == 0 {
        return 0;
    }

    let total_lines = Paragraph::new(answer)
        .wrap(Wrap { trim: false })
        .line_count(inner_width);
    let total_lines = u16::try_from(total_lines).unwrap_or(u16::MAX);
    total_lines.saturating_sub(inner_height)
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Span::styled(
        TITLE,
        Style::default().add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);

    frame.render_widget(title, area);
}

/// Renders the question input with a cursor indicator.
///
/// Shows the placeholder when the query is empty. The border dims while a
/// request is in flight to signal that Enter is disabled.
fn render_query_input(frame: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.form().can_submit() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Question")
        .border_style(border_style);

    let query = app.form().query();
    if query.is_empty() {
        let line = Line::from(vec![
            Span::raw("█"),
            Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(line).block(block), area);
        return;
    }

    // Keep the cursor in view by showing the tail of a long query.
    let line = Line::from(vec![Span::raw(query), Span::raw("█")]);
    let inner_width = usize::from(area.width.saturating_sub(2));
    let overflow = line.width().saturating_sub(inner_width);
    let offset = u16::try_from(overflow).unwrap_or(u16::MAX);

    frame.render_widget(Paragraph::new(line).block(block).scroll((0, offset)), area);
}

/// Renders the loading indicator, the answer panel, or nothing.
fn render_body(frame: &mut Frame, app: &App, area: Rect) {
    let scroll = app.answer_scroll().min(max_answer_scroll(app, frame.area()));

    match app.view() {
        FormView::Idle => {}
        FormView::Loading => {
            let loading = Paragraph::new("Loading...").alignment(Alignment::Center);
            frame.render_widget(loading, area);
        }
        FormView::Answered(answer) => {
            let block = Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    "Answer:",
                    Style::default().add_modifier(Modifier::BOLD),
                ));

            let paragraph = Paragraph::new(answer)
                .block(block)
                .wrap(Wrap { trim: false })
                .scroll((scroll, 0));

            frame.render_widget(paragraph, area);
        }
    }
}

/// Renders the shortcut bar at the bottom of the screen.
///
/// Format: `Key: action | Key: action` with keys highlighted in cyan.
fn render_shortcut_bar(frame: &mut Frame, app: &App, area: Rect) {
    let key_style = Style::default().fg(Color::Cyan);
    let sep_style = Style::default().fg(Color::DarkGray);

    let submit = if app.form().can_submit() {
        vec![Span::styled("Enter", key_style), Span::raw(": ask")]
    } else {
        vec![Span::styled("Enter: waiting for answer", sep_style)]
    };

    let mut spans = submit;
    spans.extend([
        Span::styled(" | ", sep_style),
        Span::styled("Ctrl+U", key_style),
        Span::raw(": clear"),
        Span::styled(" | ", sep_style),
        Span::styled("↑/↓", key_style),
        Span::raw(": scroll"),
        Span::styled(" | ", sep_style),
        Span::styled("Esc", key_style),
        Span::raw(": quit"),
    ]);

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
