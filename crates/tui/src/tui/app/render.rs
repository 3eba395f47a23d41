use std::cmp::min;

use chrono::Local;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use crate::core::format::format_clock;
use crate::core::{KeyValueStore, Row};
use crate::tui::buffer::TextBuffer;
use crate::tui::constants::APP_VERSION;
use crate::tui::helpers::{
    accent_title, build_help_lines, caret_spans, centered_rect, checkbox, BG_ACCENT, BG_BASE,
    BG_PANEL, BG_REVEAL,
};

use super::{AddField, App, InputMode};

impl<S: KeyValueStore> App<S> {
    pub(crate) fn draw(&mut self, f: &mut Frame<'_>) {
        let size = f.size();
        f.render_widget(Clear, size);
        f.render_widget(Block::default().style(Style::default().bg(BG_BASE)), size);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(1),
                Constraint::Length(2),
            ])
            .split(size);

        self.draw_header(f, chunks[0]);
        self.draw_tasks(f, chunks[1]);
        self.draw_summary(f, chunks[2]);
        self.draw_footer(f, chunks[3]);

        match self.input_mode {
            InputMode::Add => self.draw_add_overlay(f, size),
            InputMode::Help => self.draw_help_overlay(f, size),
            InputMode::Normal | InputMode::Edit => {}
        }
    }

    fn draw_header(&self, f: &mut Frame<'_>, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(area);

        let left = Line::from(vec![
            Span::styled(
                format!(" taskdeck v{} ✨ ", APP_VERSION),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("💾 {}", self.storage_label),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        f.render_widget(
            Paragraph::new(left).style(Style::default().bg(BG_BASE)),
            cols[0],
        );

        let clock = Line::from(vec![Span::styled(
            format!("{} ", format_clock(&Local::now())),
            Style::default().fg(Color::Gray),
        )]);
        f.render_widget(
            Paragraph::new(clock)
                .alignment(Alignment::Right)
                .style(Style::default().bg(BG_BASE)),
            cols[1],
        );
    }

    fn draw_tasks(&mut self, f: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("Tasks"))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));

        if self.board.listing().is_empty() {
            let inner = block.inner(area);
            f.render_widget(block, area);
            if inner.width == 0 || inner.height == 0 {
                return;
            }
            let lines = empty_state_lines(&self.board.listing().summary);
            let height = (lines.len() as u16).min(inner.height);
            let content_area = centered_rect(inner.width.min(70), height, inner);
            f.render_widget(
                Paragraph::new(lines)
                    .wrap(Wrap { trim: true })
                    .alignment(Alignment::Center)
                    .style(Style::default().bg(BG_PANEL)),
                content_area,
            );
            return;
        }

        let reveal = self.reveal_active();
        let items: Vec<ListItem> = self
            .board
            .listing()
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                let item = row_item(row, &self.edit_input);
                if reveal && idx == 0 {
                    item.style(Style::default().bg(BG_REVEAL))
                } else {
                    item
                }
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(BG_ACCENT).add_modifier(Modifier::BOLD))
            .highlight_symbol("▶ ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn draw_summary(&self, f: &mut Frame<'_>, area: Rect) {
        let line = Line::from(vec![Span::styled(
            format!(" {}", self.board.listing().summary),
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::BOLD),
        )]);
        f.render_widget(
            Paragraph::new(line).style(Style::default().bg(BG_BASE)),
            area,
        );
    }

    fn draw_footer(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.style())])
        } else {
            Line::from(vec![Span::raw("Ready")])
        };
        f.render_widget(Paragraph::new(status_line), lines[0]);

        let help = match self.input_mode {
            InputMode::Normal => {
                "j/k move | a add ✚ | space toggle ✅ | e edit ✏️ | x delete 🗑️ | c clear completed | h help ❔ | q quit"
            }
            InputMode::Add => "Tab switch field • Enter to add ✍️ • Esc to cancel",
            InputMode::Edit => "Enter to save ✏️ • Esc to cancel • empty text deletes",
            InputMode::Help => "Enter/Esc to close ❔",
        };
        let help_line = Line::from(vec![Span::styled(
            help,
            Style::default().fg(Color::DarkGray),
        )]);
        f.render_widget(Paragraph::new(help_line), lines[1]);
    }

    fn draw_add_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let width = min(area.width.saturating_sub(10), 70);
        let popup_area = centered_rect(width, 8, area);
        f.render_widget(Clear, popup_area);

        let outer = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("➕ Add Task"))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let inner = outer.inner(popup_area);
        f.render_widget(outer, popup_area);

        let fields = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(3)])
            .split(inner);

        self.draw_field(
            f,
            fields[0],
            "Task",
            &self.text_input,
            self.add_field == AddField::Text,
        );
        self.draw_field(
            f,
            fields[1],
            "Due (HH:MM, optional)",
            &self.due_input,
            self.add_field == AddField::Due,
        );
    }

    fn draw_field(
        &self,
        f: &mut Frame<'_>,
        area: Rect,
        title: &str,
        buffer: &TextBuffer,
        focused: bool,
    ) {
        let border = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title.to_string())
            .border_style(border)
            .style(Style::default().bg(BG_PANEL));
        let line = if focused {
            let (before, after) = buffer.split_at_cursor();
            Line::from(caret_spans(before, after, Style::default().fg(Color::White)))
        } else {
            Line::from(buffer.as_str().to_string())
        };
        f.render_widget(Paragraph::new(line).block(block), area);
    }

    fn draw_help_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let entries = build_help_lines();
        let width = min(area.width.saturating_sub(6), 64);
        let height = (entries.len() as u16).saturating_add(2);
        let popup_area = centered_rect(width, height, area);
        f.render_widget(Clear, popup_area);

        let key_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let lines: Vec<Line> = entries
            .into_iter()
            .map(|(keys, description)| {
                Line::from(vec![
                    Span::styled(format!("{:<24}", keys), key_style),
                    Span::raw(description),
                ])
            })
            .collect();

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(accent_title("❔ Keys"))
                .border_style(Style::default().fg(Color::DarkGray))
                .style(Style::default().bg(BG_PANEL)),
        );
        f.render_widget(paragraph, popup_area);
    }
}

fn row_item<'a>(row: &'a Row, edit_input: &'a TextBuffer) -> ListItem<'a> {
    match row {
        Row::View(row) => {
            let check_style = if row.completed {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Gray)
            };
            let text_style = if row.completed {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(checkbox(row.completed), check_style),
                    Span::raw(" "),
                    Span::styled(row.text.as_str(), text_style),
                ]),
                Line::from(vec![Span::styled(
                    format!("    {}", row.meta),
                    Style::default().fg(Color::DarkGray),
                )]),
            ])
        }
        Row::Edit(row) => {
            let mut spans = vec![
                Span::styled(checkbox(row.completed), Style::default().fg(Color::Gray)),
                Span::raw(" ✏️ "),
            ];
            let (before, after) = edit_input.split_at_cursor();
            spans.extend(caret_spans(
                before,
                after,
                Style::default().fg(Color::Yellow),
            ));
            ListItem::new(vec![
                Line::from(spans),
                Line::from(vec![Span::styled(
                    format!(
                        "    {}/{} • Enter save • Esc cancel",
                        edit_input.as_str().chars().count(),
                        row.max_chars
                    ),
                    Style::default().fg(Color::DarkGray),
                )]),
            ])
        }
    }
}

fn empty_state_lines(summary: &str) -> Vec<Line<'static>> {
    let hint_style = Style::default()
        .fg(Color::Gray)
        .add_modifier(Modifier::BOLD);
    vec![
        Line::from(vec![Span::styled(
            summary.to_string(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::default(),
        Line::from(vec![Span::styled("Press 'a' to add a task.", hint_style)]),
        Line::from(vec![Span::styled(
            "Give it a due time with Tab while adding.",
            hint_style,
        )]),
        Line::from(vec![Span::styled("Press 'h' for every key.", hint_style)]),
    ]
}
