use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::render::Row;

use super::app::{Focus, UiState};
use super::form::{FormFieldId, FIELDS};

const ID_WIDTH: usize = 6;
const HELP_KEY_WIDTH: usize = 14;
const COLOR_TEXT: Color = Color::Rgb(234, 236, 239);
const COLOR_MUTED: Color = Color::Rgb(160, 165, 172);
const COLOR_MUTED_DARK: Color = Color::Rgb(118, 124, 130);
const COLOR_BG_MUTED: Color = Color::Rgb(52, 56, 60);
const COLOR_INFO: Color = Color::Rgb(116, 198, 219);
const COLOR_WARNING: Color = Color::Rgb(244, 200, 98);
const COLOR_ERROR: Color = Color::Rgb(255, 107, 107);
const COLOR_SUCCESS: Color = Color::Rgb(126, 210, 146);
const COLOR_ACCENT: Color = Color::Rgb(122, 170, 255);
const COLOR_BORDER_LIST: Color = Color::Rgb(92, 126, 166);
const COLOR_BORDER_FORM: Color = Color::Rgb(180, 156, 92);

pub fn render(frame: &mut Frame, state: &UiState) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(2),
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(area);

    render_header(frame, state, chunks[0]);
    render_form(frame, state, chunks[1]);
    render_list(frame, state, chunks[2]);
    render_footer(frame, state, chunks[3]);

    if let Some(message) = state.warning() {
        render_warning_modal(frame, area, message);
    }
}

fn render_header(frame: &mut Frame, state: &UiState, area: Rect) {
    let text = format!("Tasks ({})", state.rows().len());
    let widget = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default()
            .fg(COLOR_INFO)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    )))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(COLOR_BG_MUTED)),
    );
    frame.render_widget(widget, area);
}

fn render_form(frame: &mut Frame, state: &UiState, area: Rect) {
    let focused = state.focus == Focus::Form;
    let content_width = area.width.saturating_sub(2) as usize;
    let lines: Vec<Line<'static>> = FIELDS
        .iter()
        .map(|id| {
            let active = focused && state.form.active_field() == *id;
            form_field_line(*id, state.form.value(*id), active, content_width)
        })
        .collect();

    let border = if focused {
        COLOR_BORDER_FORM
    } else {
        COLOR_MUTED_DARK
    };
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title("New Task"),
    );
    frame.render_widget(widget, area);
}

fn form_field_line(id: FormFieldId, value: &str, active: bool, width: usize) -> Line<'static> {
    let label = pad_text(&format!("{}:", id.label()), 7);
    let value_width = width.saturating_sub(label.len() + 1);
    let mut spans = vec![
        Span::styled(label, Style::default().fg(COLOR_MUTED_DARK)),
        Span::raw(" "),
    ];
    if value.is_empty() && !active {
        spans.push(Span::styled(
            id.placeholder().to_string(),
            Style::default().fg(COLOR_BG_MUTED),
        ));
    } else {
        spans.push(Span::styled(
            truncate_text(value, value_width.saturating_sub(1)),
            Style::default().fg(COLOR_TEXT),
        ));
    }
    if active {
        spans.push(Span::styled(
            " ",
            Style::default().add_modifier(Modifier::REVERSED),
        ));
    }
    Line::from(spans)
}

fn render_list(frame: &mut Frame, state: &UiState, area: Rect) {
    let content_width = area.width.saturating_sub(2) as usize;
    let mut lines = Vec::new();
    let help_lines = if state.show_help {
        build_help_lines(content_width)
    } else {
        Vec::new()
    };

    let rows = state.rows();
    if rows.is_empty() {
        lines.push(Line::from(Span::styled(
            "No tasks",
            Style::default().fg(COLOR_MUTED),
        )));
    } else {
        let reserved = if help_lines.is_empty() {
            0
        } else {
            help_lines.len() + 1
        };
        let height = (area.height as usize)
            .saturating_sub(2)
            .saturating_sub(reserved);
        let (start, end) = list_window(rows.len(), state.selected, height);
        let list_focused = state.focus == Focus::List;
        let completed_class = state.app.options().completed_class.as_str();
        for (idx, row) in rows.iter().enumerate().take(end).skip(start) {
            let selected = list_focused && state.selected == Some(idx);
            lines.push(render_row(row, completed_class, selected, content_width));
        }
    }

    if !help_lines.is_empty() {
        lines.push(Line::from(""));
        lines.extend(help_lines);
    }

    let border = if state.focus == Focus::List {
        COLOR_BORDER_LIST
    } else {
        COLOR_MUTED_DARK
    };
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title("Tasks"),
    );
    frame.render_widget(widget, area);
}

fn render_row(row: &Row, completed_class: &str, selected: bool, width: usize) -> Line<'static> {
    let completed = row.has_class(completed_class);
    let id_text = pad_text(&format!("#{}", row.task_id), ID_WIDTH);
    let controls: String = row
        .controls
        .iter()
        .map(|control| format!(" [{}]", control.label))
        .collect();
    let text_width = width.saturating_sub(ID_WIDTH + 2 + controls.chars().count());
    let text = truncate_text(&row.text, text_width);

    let text_style = if completed {
        Style::default()
            .fg(COLOR_MUTED_DARK)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(COLOR_TEXT)
    };
    let marker = if completed { "x" } else { " " };
    let mut spans = vec![
        Span::styled(marker, Style::default().fg(COLOR_SUCCESS)),
        Span::raw(" "),
        Span::styled(
            id_text,
            Style::default()
                .fg(COLOR_MUTED)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(text, text_style),
        Span::styled(controls, Style::default().fg(COLOR_ACCENT)),
    ];

    if selected {
        for span in &mut spans {
            span.style = span.style.add_modifier(Modifier::REVERSED);
        }
    }

    Line::from(spans)
}

fn render_footer(frame: &mut Frame, state: &UiState, area: Rect) {
    let hint_span = Span::styled(state.footer_hint(), Style::default().fg(COLOR_INFO));
    let line = match state.info_message.as_ref() {
        Some(info) => Line::from(vec![
            hint_span,
            Span::raw("  |  "),
            Span::styled(info.clone(), Style::default().fg(COLOR_WARNING)),
        ]),
        None => Line::from(hint_span),
    };
    let counts_line = Line::from(Span::styled(
        state.task_count_summary(),
        Style::default().fg(COLOR_ACCENT),
    ));
    let widget = Paragraph::new(vec![line, counts_line])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(COLOR_BORDER_LIST)),
        );
    frame.render_widget(widget, area);
}

fn render_warning_modal(frame: &mut Frame, area: Rect, message: &str) {
    let content_width = area.width.saturating_sub(8).min(56);
    let height = 7u16.min(area.height.saturating_sub(2));
    let modal = centered_rect(content_width, height, area);
    frame.render_widget(Clear, modal);

    let lines = vec![
        Line::from(Span::styled(
            message.to_string(),
            Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "enter/esc dismiss",
            Style::default().fg(COLOR_MUTED_DARK),
        )),
    ];
    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Warning"))
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, modal);
}

fn build_help_lines(width: usize) -> Vec<Line<'static>> {
    vec![
        help_header("More commands"),
        help_line("j/k or up/down", "move selection", width),
        help_line("g/G", "first or last task", width),
        help_line("c/space/enter", "complete or undo task", width),
        help_line("d/delete", "delete task", width),
        help_line("n/tab", "edit the new task form", width),
        help_line("ctrl+u", "clear field in the form", width),
        help_line("q/esc", "quit", width),
        help_line("?", "hide help", width),
    ]
}

fn help_header(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(COLOR_INFO).add_modifier(Modifier::BOLD),
    ))
}

fn help_line(keys: &str, desc: &str, width: usize) -> Line<'static> {
    let key_text = pad_text(keys, HELP_KEY_WIDTH.min(width));
    let desc_width = width.saturating_sub(HELP_KEY_WIDTH + 1);
    let desc_text = truncate_text(desc, desc_width);
    Line::from(vec![
        Span::styled(
            key_text,
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(desc_text, Style::default().fg(COLOR_MUTED)),
    ])
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn list_window(total: usize, selected: Option<usize>, height: usize) -> (usize, usize) {
    if height == 0 || total <= height {
        return (0, total);
    }
    let selected = selected.unwrap_or(0).min(total - 1);
    let start = selected.saturating_sub(height - 1);
    (start, (start + height).min(total))
}

fn pad_text(value: &str, width: usize) -> String {
    let mut text = value.to_string();
    if text.chars().count() > width {
        text = truncate_text(&text, width);
    }
    format!("{text:width$}")
}

fn truncate_text(value: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= max {
        return value.to_string();
    }
    if max <= 3 {
        return chars[..max].iter().collect();
    }
    let mut out: String = chars[..(max - 3)].iter().collect();
    out.push_str("...");
    out
}
