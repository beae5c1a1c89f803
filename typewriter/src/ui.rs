use platen::{Snapshot, Status, TypingSession};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span, ToLine, ToSpan},
    widgets::{Block, BorderType, Cell, Padding, Paragraph, Row, Table, Wrap},
};

use crate::config::{Settings, Theme};

/// A block with a rounded border
pub const ROUNDED_BLOCK: Block = Block::bordered().border_type(BorderType::Rounded);

pub fn center(area: Rect, horizontal: Constraint, vertical: Constraint) -> Rect {
    let [area_horizontal] = Layout::horizontal([horizontal])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([vertical])
        .flex(Flex::Center)
        .areas(area_horizontal);
    area
}

/// Draws the next frame
pub fn draw(frame: &mut Frame, session: &TypingSession, settings: &Settings) {
    let snapshot = session.snapshot();

    let block = ROUNDED_BLOCK
        .padding(Padding::new(1, 1, 0, 0))
        .title_top("TYPEWRITER".to_line().bold().centered())
        .title_top("<CTRL-Q> to exit".to_line().right_aligned())
        .title_top(header(&snapshot))
        .title_bottom(footer(&session.config().extend_presets));

    let area = frame.area();
    let content = block.inner(area);
    frame.render_widget(block, area);

    if snapshot.session_state.is_active {
        render_text(frame, content, session, &settings.theme);
    } else {
        render_results(frame, content, &snapshot, &settings.theme);
    }
}

fn header(snapshot: &Snapshot) -> Line<'static> {
    let remaining = snapshot.session_state.time_remaining;
    Line::raw(format!(
        "{}:{:0>2} | WPM: {} | ACC: {}%",
        remaining / 60,
        remaining % 60,
        snapshot.stats.words_per_minute,
        snapshot.stats.accuracy()
    ))
}

fn footer(extend_presets: &[u32]) -> Line<'static> {
    let mut hints: Vec<String> = extend_presets
        .iter()
        .enumerate()
        .map(|(index, seconds)| format!("<F{}> +{seconds}s", index + 1))
        .collect();
    hints.push("<CTRL-R> restart".to_string());

    Line::raw(hints.join("  ")).centered()
}

/// Colour each character of the target by its status, and mark the character under the
/// cursor.
pub fn text_spans(session: &TypingSession, theme: &Theme) -> Vec<Span<'static>> {
    let cursor = session.cursor_offset();

    session
        .statuses()
        .iter()
        .enumerate()
        .map(|(index, character)| {
            let mut style = match character.status {
                Status::Correct => Style::new().fg(theme.correct),
                Status::Incorrect if character.character == ' ' => Style::new().bg(theme.incorrect),
                Status::Incorrect => Style::new().fg(theme.incorrect),
                Status::Untyped => Style::new().fg(theme.untyped),
            };

            if index == cursor {
                style = style
                    .bg(theme.cursor)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }

            Span::styled(character.character.to_string(), style)
        })
        .collect()
}

fn render_text(frame: &mut Frame, area: Rect, session: &TypingSession, theme: &Theme) {
    let area = center(area, Constraint::Percentage(80), Constraint::Percentage(80));

    let paragraph = Paragraph::new(Line::from(text_spans(session, theme)))
        .wrap(Wrap { trim: false })
        .block(Block::new().padding(Padding::top(area.height / 3)));

    frame.render_widget(paragraph, area);
}

fn render_results(frame: &mut Frame, area: Rect, snapshot: &Snapshot, theme: &Theme) {
    let area = center(area, Constraint::Percentage(60), Constraint::Percentage(90));
    let [summary_area, table_area] =
        Layout::vertical([Constraint::Length(7), Constraint::Fill(1)]).areas(area);

    let stats = snapshot.stats;
    let typed_letters = stats.typed_letters();
    let summary = Paragraph::new(vec![
        Line::from(vec!["WPM: ".bold(), stats.words_per_minute.to_span()]),
        Line::from(vec!["Accuracy: ".bold(), format!("{}%", stats.accuracy()).into()]),
        Line::from(vec!["Characters: ".bold(), typed_letters.to_span()]),
        Line::from(vec![
            "Correct letters: ".bold(),
            stats.correct_letters.to_span().fg(theme.correct),
        ]),
        Line::from(vec![
            "Incorrect letters: ".bold(),
            stats.incorrect_letters.to_span().fg(theme.incorrect),
        ]),
    ])
    .block(ROUNDED_BLOCK.title("Time's up!".to_span().bold()));

    frame.render_widget(summary, summary_area);

    let tally = snapshot.keystroke_tally;
    let mut rows: Vec<Row> = tally
        .rows()
        .into_iter()
        .map(|row| {
            let character = match row.character {
                ' ' => "space".to_string(),
                other => other.to_string(),
            };
            Row::new([
                Cell::from(character),
                Cell::from(row.asserts.to_string()).fg(theme.correct),
                Cell::from(row.fails.to_string()).fg(theme.incorrect),
            ])
        })
        .collect();
    rows.push(
        Row::new([
            Cell::from("total"),
            Cell::from(tally.total_asserts().to_string()).fg(theme.correct),
            Cell::from(tally.total_fails().to_string()).fg(theme.incorrect),
        ])
        .bold(),
    );

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Fill(1),
            Constraint::Fill(1),
        ],
    )
    .header(Row::new(["Key", "Hits", "Misses"]).bold().fg(theme.highlight))
    .block(ROUNDED_BLOCK.title("Keystrokes".to_span().bold()));

    frame.render_widget(table, table_area);
}
