use crate::model::StatusCode;
use crate::navigator::Navigator;
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

pub struct UiState {
    pub navigator: Navigator,
    pub selected: usize, // Row index into registry.records()
    pub show_help: bool,
}

impl UiState {
    pub fn new(navigator: Navigator) -> Self {
        Self {
            navigator,
            selected: 0,
            show_help: false,
        }
    }

    pub fn row_count(&self) -> usize {
        self.navigator.registry().records().len()
    }

    pub fn selected_code(&self) -> Option<StatusCode> {
        self.navigator
            .registry()
            .records()
            .get(self.selected)
            .map(|r| r.code.clone())
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.row_count() {
            self.selected += 1;
        }
    }

    /// Keep the selection inside the table after rows were added.
    pub fn clamp_selection(&mut self) {
        let rows = self.row_count();
        if rows == 0 {
            self.selected = 0;
        } else if self.selected >= rows {
            self.selected = rows - 1;
        }
    }
}

pub fn key_hint(key: &str, label: &str) -> Vec<Span<'static>> {
    vec![
        Span::styled(key.to_string(), Style::default().fg(Color::Magenta)),
        Span::raw(format!(" {label}   ")),
    ]
}

pub fn kv_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::Gray)),
        Span::raw(value.to_string()),
    ])
}
