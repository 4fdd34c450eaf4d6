//! UI rendering
//!
//! Pure rendering functions that transform state into terminal frames.
//! What to show is decided by the view models in `libpostboard::view`;
//! this module only decides how it looks.

pub mod form;

use libpostboard::view::{MainPanel, PostDetail, PostRow, UserPicker};
use libpostboard::AppState;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::app::{Focus, UiState};
use self::form::FormEditor;

/// Screen regions, shared by rendering and mouse hit-testing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub area: Rect,
    pub header: Rect,
    /// The picker button inside the header
    pub picker: Rect,
    pub main: Rect,
    /// Present while a post is open
    pub sidebar: Option<Rect>,
    pub status: Rect,
}

impl AppLayout {
    pub fn new(area: Rect, detail_open: bool) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(3),    // Body
                Constraint::Length(3), // Status bar
            ])
            .split(area);

        let header = rows[0];
        let picker = Rect {
            width: header.width.min(40),
            ..header
        };

        let (main, sidebar) = if detail_open {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(rows[1]);
            (columns[0], Some(columns[1]))
        } else {
            (rows[1], None)
        };

        Self {
            area,
            header,
            picker,
            main,
            sidebar,
            status: rows[2],
        }
    }

    /// Dropdown list under the picker, one row per user plus borders
    pub fn dropdown(&self, user_count: usize) -> Rect {
        let top = self.picker.bottom();
        let wanted = u16::try_from(user_count).unwrap_or(u16::MAX).saturating_add(2);
        Rect {
            x: self.picker.x,
            y: top,
            width: self.picker.width,
            height: wanted.min(self.area.bottom().saturating_sub(top)),
        }
    }
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

/// Render the application UI
///
/// `editor` must have been prepared for this frame (see
/// [`FormEditor::prepare`]).
pub fn render(frame: &mut Frame, app: &AppState, ui: &UiState, editor: &FormEditor) {
    let area = frame.area();
    let layout = AppLayout::new(area, app.selected_post_id.is_some());

    render_header(frame, &layout, app, ui);
    render_main(frame, layout.main, app, ui);

    if let Some(sidebar) = layout.sidebar {
        if let Some(detail) = PostDetail::from_state(app, ui.form_open_for) {
            render_detail(frame, sidebar, &detail, ui, editor);
        }
    }

    render_status_bar(frame, layout.status, ui);

    if ui.picker.is_open {
        render_dropdown(frame, layout.dropdown(app.users.len()), app, ui);
    }

    if ui.help_visible {
        render_help_overlay(frame, area);
    }
}

fn render_header(frame: &mut Frame, layout: &AppLayout, app: &AppState, ui: &UiState) {
    let arrow = if ui.picker.is_open { "▲" } else { "▼" };
    let label = UserPicker::label(app.selected_user());
    let label_style = if app.selected_user_id.is_some() {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let picker = Paragraph::new(Line::from(vec![
        Span::styled(label, label_style),
        Span::raw(" "),
        Span::raw(arrow),
    ]))
    .block(
        Block::default()
            .title(" User (u) ")
            .borders(Borders::ALL)
            .border_style(focus_style(ui.picker.is_open)),
    );
    frame.render_widget(picker, layout.picker);

    let rest = Rect {
        x: layout.picker.right(),
        width: layout.header.width.saturating_sub(layout.picker.width),
        ..layout.header
    };
    let title = Paragraph::new(Span::styled(
        " Postboard ",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Right)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, rest);
}

fn render_main(frame: &mut Frame, area: Rect, app: &AppState, ui: &UiState) {
    let panel = MainPanel::from_state(app);

    let block = Block::default()
        .title(" Posts ")
        .borders(Borders::ALL)
        .border_style(focus_style(ui.focus == Focus::Posts && !ui.picker.is_open));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let banner_height = u16::from(panel.error_banner.is_some());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(banner_height), Constraint::Min(0)])
        .split(inner);

    if let Some(error) = &panel.error_banner {
        let banner = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
        frame.render_widget(banner, chunks[0]);
    }

    let message = if panel.no_user_selected {
        Some(("No user selected", Color::Gray))
    } else if panel.show_loader {
        Some(("Loading...", Color::Yellow))
    } else if panel.no_posts_yet {
        Some(("No posts yet", Color::Gray))
    } else {
        None
    };

    if let Some((text, color)) = message {
        frame.render_widget(Paragraph::new(text).style(Style::default().fg(color)), chunks[1]);
    } else if panel.show_posts {
        render_posts_table(frame, chunks[1], app, ui);
    }
}

fn render_posts_table(frame: &mut Frame, area: Rect, app: &AppState, ui: &UiState) {
    let rows: Vec<Row> = PostRow::rows(app)
        .into_iter()
        .map(|row| {
            let style = if row.is_open {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(row.id.to_string()),
                Cell::from(row.title.clone()),
                Cell::from(format!("[{}]", row.button_label())),
            ])
            .style(style)
        })
        .collect();

    let highlight = if ui.focus == Focus::Posts {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let table = Table::new(
        rows,
        [Constraint::Length(4), Constraint::Min(10), Constraint::Length(8)],
    )
    .header(
        Row::new(vec!["#", "Title", ""]).style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .row_highlight_style(highlight);

    let mut table_state = TableState::default().with_selected(Some(ui.post_cursor));
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn render_detail(frame: &mut Frame, area: Rect, detail: &PostDetail, ui: &UiState, editor: &FormEditor) {
    let block = Block::default()
        .title(format!(" {} ", detail.title))
        .borders(Borders::ALL)
        .border_style(focus_style(ui.focus == Focus::Comments));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let form_height = if detail.show_form { 10 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),           // Post body
            Constraint::Min(3),              // Comments
            Constraint::Length(form_height), // Form
        ])
        .split(inner);

    let body = Paragraph::new(detail.body.as_str()).wrap(Wrap { trim: true });
    frame.render_widget(body, chunks[0]);

    let mut lines: Vec<Line> = Vec::new();
    if detail.show_loader {
        lines.push(Line::styled("Loading...", Style::default().fg(Color::Yellow)));
    }
    if let Some(error) = &detail.error_banner {
        lines.push(Line::styled(
            error.as_str(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }
    if detail.no_comments_yet {
        lines.push(Line::styled("No comments yet", Style::default().fg(Color::Gray)));
    }
    for (index, comment) in detail.comments.iter().enumerate() {
        let selected = ui.focus == Focus::Comments && index == ui.comment_cursor;
        let marker = if selected { "> " } else { "  " };
        let header_style = if selected {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(comment.name.as_str(), header_style),
            Span::styled(format!(" <{}>", comment.email), Style::default().fg(Color::Blue)),
        ]));
        lines.push(Line::from(format!("  {}", comment.body)));
    }
    if let Some(pending) = &detail.pending {
        let dim = Style::default().fg(Color::DarkGray);
        lines.push(Line::styled(format!("  {} <{}> (sending...)", pending.name, pending.email), dim));
        lines.push(Line::styled(format!("  {}", pending.body), dim));
    }
    if detail.show_write_button {
        lines.push(Line::from(""));
        lines.push(Line::styled("[w] Write a comment", Style::default().fg(Color::Cyan)));
    }

    let comments = Paragraph::new(lines)
        .block(Block::default().title(" Comments ").borders(Borders::TOP))
        .wrap(Wrap { trim: false });
    frame.render_widget(comments, chunks[1]);

    if detail.show_form {
        editor.render(frame, chunks[2], ui.submitting);
    }
}

fn render_dropdown(frame: &mut Frame, area: Rect, app: &AppState, ui: &UiState) {
    let items: Vec<ListItem> = app
        .users
        .iter()
        .map(|user| {
            let marker = if app.selected_user_id == Some(user.id) { "• " } else { "  " };
            ListItem::new(format!("{marker}{}", user.name))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut list_state = ListState::default().with_selected(Some(ui.picker.highlighted));
    frame.render_widget(Clear, area);
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Render status bar with the last request status and key hints
fn render_status_bar(frame: &mut Frame, area: Rect, ui: &UiState) {
    let hints = match ui.focus {
        Focus::Form => "Tab: Next field | Ctrl+S: Add | Ctrl+R: Clear | Esc: Close form",
        Focus::Comments => "↑↓: Move | d: Delete | w: Write | Tab: Focus | u: Users | F1: Help | q: Quit",
        Focus::Posts => "↑↓: Move | Enter: Open/Close | w: Write | Tab: Focus | u: Users | F1: Help | q: Quit",
    };
    let mouse = if ui.mouse_enabled { "mouse on" } else { "mouse off" };

    let lines = vec![
        Line::from(vec![
            Span::raw(ui.status.message.as_deref().unwrap_or("Ready")),
            Span::raw(" | "),
            Span::styled(mouse, Style::default().fg(Color::Gray)),
        ]),
        Line::from(Span::styled(hints, Style::default().fg(Color::Gray))),
    ];

    let status = Paragraph::new(lines).block(Block::default().borders(Borders::TOP));
    frame.render_widget(status, area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = vec![
        Line::from(Span::styled("Keyboard Shortcuts", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from("Global:"),
        Line::from("  q        - Quit"),
        Line::from("  F1       - Toggle help"),
        Line::from("  m        - Toggle mouse"),
        Line::from("  u        - Choose a user"),
        Line::from("  Tab      - Switch pane"),
        Line::from(""),
        Line::from("Posts and comments:"),
        Line::from("  ↑/↓      - Move"),
        Line::from("  Enter    - Open/Close post"),
        Line::from("  w        - Write a comment"),
        Line::from("  d        - Delete comment"),
        Line::from(""),
        Line::from("Comment form:"),
        Line::from("  Tab      - Next field"),
        Line::from("  Ctrl+S   - Add comment"),
        Line::from("  Ctrl+R   - Clear"),
        Line::from("  Esc      - Close form"),
        Line::from(""),
        Line::from("Press Esc or F1 to close"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, popup_area);
    frame.render_widget(help, popup_area);
}

/// Helper to create centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
