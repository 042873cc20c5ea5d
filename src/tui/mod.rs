mod help;
mod state;

use crate::banner::{Banner, BannerKind};
use crate::cli::Cli;
use crate::error::NavigatorError;
use crate::model::{StatusCode, StatusRecord, ALLOWED_NAMES};
use crate::navigator::{FormState, Navigator, View, ViewKind};
use crate::text_summary::format_retired_at;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Terminal,
};
use state::{key_hint, kv_line, UiState};
use std::{io, time::Duration, time::Instant};

pub fn run(args: Cli) -> Result<()> {
    let mut state = UiState::new(crate::cli::build_navigator(&args));

    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    // Restore the terminal before the panic message is printed.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));

    tracing::info!("status admin started");
    let res = event_loop(&mut terminal, &mut state);

    restore_terminal();
    res
}

fn restore_terminal() {
    disable_raw_mode().ok();
    execute!(io::stdout(), LeaveAlternateScreen).ok();
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut UiState,
) -> Result<()> {
    let tick_rate = Duration::from_millis(100);

    loop {
        state.navigator.expire_banner(Instant::now());
        terminal
            .draw(|f| draw(f.area(), f, &*state))
            .context("draw frame")?;

        // Poll with the tick rate as timeout so banners expire without input.
        if event::poll(tick_rate).context("poll input")? {
            if let Event::Key(k) = event::read().context("read input")? {
                if handle_key(state, k) {
                    return Ok(());
                }
            }
        }
    }
}

/// Apply one key press. Returns true when the user asked to quit.
fn handle_key(state: &mut UiState, k: KeyEvent) -> bool {
    if k.kind != KeyEventKind::Press {
        return false;
    }
    if k.modifiers.contains(KeyModifiers::CONTROL) {
        return k.code == KeyCode::Char('c');
    }
    if state.show_help {
        if matches!(k.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
            state.show_help = false;
        }
        return false;
    }

    let res = match state.navigator.view().kind() {
        ViewKind::List => match k.code {
            KeyCode::Char('q') => return true,
            KeyCode::Up | KeyCode::Char('k') => {
                state.select_prev();
                Ok(())
            }
            KeyCode::Down | KeyCode::Char('j') => {
                state.select_next();
                Ok(())
            }
            KeyCode::Char('?') => {
                state.show_help = true;
                Ok(())
            }
            KeyCode::Char('a') => state.navigator.start_add(),
            KeyCode::Char('e') | KeyCode::Enter => with_selected(state, Navigator::start_edit),
            KeyCode::Char('d') => with_selected(state, Navigator::start_retire),
            _ => Ok(()),
        },
        ViewKind::AddForm | ViewKind::EditForm => match k.code {
            KeyCode::Enter => state.navigator.submit(),
            KeyCode::Esc => state.navigator.cancel(),
            KeyCode::Backspace => state.navigator.pop_char(),
            KeyCode::Char(c) => state.navigator.push_char(c),
            _ => Ok(()),
        },
        ViewKind::ConfirmRetire => match k.code {
            KeyCode::Enter | KeyCode::Char('y') => state.navigator.confirm_retire(),
            KeyCode::Esc | KeyCode::Char('n') => state.navigator.cancel(),
            _ => Ok(()),
        },
        ViewKind::AddSuccess
        | ViewKind::EditSuccess
        | ViewKind::RetireSuccess
        | ViewKind::RetireCancelled => match k.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => state.navigator.acknowledge(),
            _ => Ok(()),
        },
    };

    if let Err(e) = res {
        report(state, e);
    }
    state.clamp_selection();
    false
}

fn with_selected(
    state: &mut UiState,
    action: impl FnOnce(&mut Navigator, &StatusCode) -> Result<(), NavigatorError>,
) -> Result<(), NavigatorError> {
    match state.selected_code() {
        Some(code) => action(&mut state.navigator, &code),
        None => Ok(()),
    }
}

fn report(state: &mut UiState, e: NavigatorError) {
    match e {
        NavigatorError::Registry(err) => {
            state.navigator.notify(BannerKind::Info, err.user_message())
        }
        other @ NavigatorError::NotAvailable { .. } => tracing::debug!("ignored key: {other}"),
    }
}

fn draw(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let banner_height = if state.navigator.banner().is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(banner_height),
                Constraint::Min(0),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            "Project status administration",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "   {} active / {} total",
            state.navigator.registry().active_count(),
            state.navigator.registry().records().len()
        )),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("project-status-admin"),
    );
    f.render_widget(title, chunks[0]);

    if let Some(banner) = state.navigator.banner() {
        draw_banner(chunks[1], f, banner);
    }

    match state.navigator.view() {
        View::List => draw_list(chunks[2], f, state),
        View::AddForm(form) => draw_add_form(chunks[2], f, form),
        View::EditForm { target, form } => draw_edit_form(chunks[2], f, target, form),
        View::ConfirmRetire { target, error } => {
            draw_confirm_retire(chunks[2], f, target, error.as_deref())
        }
        View::AddSuccess { created } => draw_outcome(
            chunks[2],
            f,
            "Operation successful",
            Color::Green,
            vec![
                Line::from("Status created successfully!"),
                kv_line("Code", created.code.as_str()),
                kv_line("Name", &created.name),
            ],
        ),
        View::EditSuccess { renamed } => draw_outcome(
            chunks[2],
            f,
            "Operation successful",
            Color::Green,
            vec![
                Line::from("Status renamed successfully!"),
                kv_line("Code", renamed.code.as_str()),
                kv_line("Name", &renamed.name),
            ],
        ),
        View::RetireSuccess { retired } => draw_outcome(
            chunks[2],
            f,
            "Operation successful",
            Color::Green,
            vec![
                Line::from("Status retired successfully!"),
                kv_line("Code", retired.code.as_str()),
                kv_line("Name", &retired.name),
                kv_line("Retired", &retired_label(retired)),
            ],
        ),
        View::RetireCancelled => draw_outcome(
            chunks[2],
            f,
            "Operation cancelled",
            Color::Yellow,
            vec![Line::from("Operation cancelled. The status was not retired.")],
        ),
    }

    draw_footer(chunks[3], f, state.navigator.view().kind());

    if state.show_help {
        help::draw_help(centered(area, 70, 80), f);
    }
}

fn draw_banner(area: Rect, f: &mut ratatui::Frame, banner: &Banner) {
    let color = match banner.kind {
        BannerKind::Success => Color::Green,
        BannerKind::Error => Color::Red,
        BannerKind::Info => Color::Blue,
        BannerKind::Warning => Color::Yellow,
    };
    let p = Paragraph::new(Span::styled(
        banner.message.clone(),
        Style::default().fg(color),
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );
    f.render_widget(p, area);
}

fn retired_label(record: &StatusRecord) -> String {
    format_retired_at(record.retired_at).unwrap_or_else(|_| "?".to_string())
}

fn draw_list(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let registry = state.navigator.registry();
    let rows: Vec<Row> = registry
        .records()
        .iter()
        .map(|r| {
            let style = if r.is_active() {
                Style::default()
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let in_use = if registry.is_referenced(&r.code) { "yes" } else { "" };
            Row::new(vec![
                Cell::from(r.code.to_string()),
                Cell::from(r.name.clone()),
                Cell::from(retired_label(r)),
                Cell::from(in_use),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Min(20),
            Constraint::Length(14),
            Constraint::Length(8),
        ],
    )
    .header(
        Row::new(vec!["Code", "Status name", "Retired", "In use"])
            .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL).title("Statuses"))
    .row_highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    .highlight_symbol("> ");

    let mut table_state = TableState::default().with_selected(Some(state.selected));
    f.render_stateful_widget(table, area, &mut table_state);
}

fn input_lines(form: &FormState, placeholder: &str) -> Vec<Line<'static>> {
    let input = if form.input.is_empty() {
        Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(form.input.clone())
    };
    let mut lines = vec![Line::from(vec![
        Span::styled("Name: ", Style::default().fg(Color::Gray)),
        input,
        Span::styled("▏", Style::default().fg(Color::Yellow)),
    ])];
    if let Some(err) = form.error.as_deref() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("⚠ {err}"),
            Style::default().fg(Color::Red),
        )));
    }
    lines
}

fn draw_add_form(area: Rect, f: &mut ratatui::Frame, form: &FormState) {
    let mut lines = vec![
        Line::from("Enter the name of the new status."),
        Line::from(""),
    ];
    lines.extend(input_lines(form, ""));
    lines.push(Line::from(""));
    lines.push(kv_line("Allowed names", &ALLOWED_NAMES.join(", ")));

    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Add status"));
    f.render_widget(p, centered(area, 70, 60));
}

fn draw_edit_form(area: Rect, f: &mut ratatui::Frame, target: &StatusRecord, form: &FormState) {
    let mut lines = vec![
        kv_line("Code", target.code.as_str()),
        Line::from(""),
        Line::from("Enter the new name (letters and spaces only)."),
        Line::from(""),
    ];
    lines.extend(input_lines(form, &format!("Current name: {}", target.name)));

    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Edit status"));
    f.render_widget(p, centered(area, 70, 60));
}

fn draw_confirm_retire(
    area: Rect,
    f: &mut ratatui::Frame,
    target: &StatusRecord,
    error: Option<&str>,
) {
    let mut lines = vec![
        Line::from("Retire the selected project status?"),
        Line::from(""),
        kv_line("Code", target.code.as_str()),
        kv_line("Name", &target.name),
    ];
    if let Some(err) = error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("⚠ {err}"),
            Style::default().fg(Color::Red),
        )));
    }

    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title("Confirm retirement"),
    );
    f.render_widget(p, centered(area, 60, 50));
}

fn draw_outcome(
    area: Rect,
    f: &mut ratatui::Frame,
    title: &str,
    color: Color,
    lines: Vec<Line<'static>>,
) {
    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(Span::styled(title.to_string(), Style::default().fg(color))),
    );
    f.render_widget(p, centered(area, 60, 40));
}

fn footer_hints(view: ViewKind) -> Vec<(&'static str, &'static str)> {
    match view {
        ViewKind::List => vec![
            ("a", "Add"),
            ("e", "Edit"),
            ("d", "Retire"),
            ("↑/↓", "Select"),
            ("?", "Help"),
            ("q", "Quit"),
        ],
        ViewKind::AddForm => vec![("Enter", "Add status"), ("Esc", "Back")],
        ViewKind::EditForm => vec![("Enter", "Edit status"), ("Esc", "Back")],
        ViewKind::ConfirmRetire => vec![("Enter", "Confirm"), ("Esc", "Cancel")],
        ViewKind::AddSuccess
        | ViewKind::EditSuccess
        | ViewKind::RetireSuccess
        | ViewKind::RetireCancelled => {
            vec![("Enter/Space", "New operation"), ("Esc", "Back to list")]
        }
    }
}

fn draw_footer(area: Rect, f: &mut ratatui::Frame, view: ViewKind) {
    let spans: Vec<Span> = footer_hints(view)
        .into_iter()
        .flat_map(|(key, label)| key_hint(key, label))
        .collect();
    let p = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(p, area);
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(vertical[1])[1]
}
