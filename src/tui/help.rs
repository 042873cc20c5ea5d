use ratatui::{
    layout::Rect,
    style::Color,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

fn bind(key: &'static str, pad: &'static str, label: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(key, Style::default().fg(Color::Magenta)),
        Span::raw(pad),
        Span::raw(label),
    ])
}

pub fn draw_help(area: Rect, f: &mut Frame) {
    let p = Paragraph::new(vec![
        Line::from("Status list:"),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("↑/↓", Style::default().fg(Color::Magenta)),
            Span::raw(" or "),
            Span::styled("j/k", Style::default().fg(Color::Magenta)),
            Span::raw("  Select status"),
        ]),
        bind("a", "           ", "Add status"),
        bind("e", " / Enter   ", "Edit selected status"),
        bind("d", "           ", "Retire selected status"),
        bind("?", "           ", "Toggle this help"),
        bind("q", " / Ctrl-C  ", "Quit"),
        Line::from(""),
        Line::from("Forms:"),
        bind("Enter", "       ", "Submit"),
        bind("Esc", "         ", "Back to the list"),
        bind("Backspace", "   ", "Delete last character"),
        Line::from(""),
        Line::from("Confirm retire:"),
        bind("Enter", " / y   ", "Confirm"),
        bind("Esc", " / n     ", "Cancel"),
        Line::from(""),
        Line::from("Result screens:"),
        bind("Enter", " / Esc / Space   ", "New operation"),
        Line::from(""),
        Line::from("Retired statuses stay in the list with their retirement date."),
        Line::from("Only active statuses can be edited or retired."),
    ])
    .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(Clear, area);
    f.render_widget(p, area);
}
