use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Pane};
use crate::parser::{Match, MatchStatus};
use crate::session::is_watchable;
use crate::start_time::StartTime;

const ACCENT: Color = Color::Rgb(255, 64, 64);
const LIVE_RED: Color = Color::Rgb(230, 30, 30);
const BRIGHT: Color = Color::White;
const DIM: Color = Color::Rgb(150, 150, 150);

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

// Category column sized to content, within sane bounds
fn category_column_width(categories: &[String]) -> u16 {
    categories
        .iter()
        .map(|c| c.len() as u16 + 5)
        .max()
        .unwrap_or(22)
        .max(22)
        .min(40)
}

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(6), // Now-playing panel
            Constraint::Min(5),    // Match browser
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_player_panel(f, app, chunks[1]);

    if let Some(err) = app.feed_error.clone() {
        render_feed_error(f, &err, chunks[2]);
    } else if app.snapshot.is_none() {
        render_initial_loading(f, app, chunks[2]);
    } else {
        render_browser(f, app, chunks[2]);
    }

    render_footer(f, app, chunks[3]);

    if app.show_help {
        render_help_popup(f, f.area());
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let spinner = if app.loading {
        format!(" {} refreshing", SPINNER[(app.loading_tick / 2 % 4) as usize])
    } else {
        String::new()
    };

    let title = Line::from(vec![
        Span::styled(
            " FANCAST ",
            Style::default()
                .fg(ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("live match streams", Style::default().fg(DIM)),
        Span::styled(spinner, Style::default().fg(Color::Yellow)),
    ]);

    let filter = Line::from(vec![
        Span::styled("Filter: ", Style::default().fg(DIM)),
        Span::styled(
            app.status_filter.label(),
            Style::default().fg(BRIGHT).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Category: ", Style::default().fg(DIM)),
        Span::styled(
            app.active_category().unwrap_or("All"),
            Style::default().fg(BRIGHT),
        ),
    ]);

    let header = Paragraph::new(vec![title, filter]).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(DIM)),
    );
    f.render_widget(header, area);
}

fn render_player_panel(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Player ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if app.now_playing.is_some() {
            ACCENT
        } else {
            DIM
        }));

    let lines: Vec<Line> = if let Some(err) = &app.player_error {
        vec![
            Line::from(Span::styled(
                "Playback failed",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(err.as_str(), Style::default().fg(DIM))),
        ]
    } else if let (Some(title), Some(m)) = (&app.now_playing, app.session.current()) {
        vec![
            Line::from(vec![
                Span::styled("▶ ", Style::default().fg(LIVE_RED)),
                Span::styled(
                    title.as_str(),
                    Style::default().fg(BRIGHT).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(m.event_name.as_str(), Style::default().fg(DIM))),
            Line::from(Span::styled(
                "s: stop playback",
                Style::default().fg(DIM),
            )),
        ]
    } else if !app.player_available {
        vec![
            Line::from(Span::styled(
                crate::setup::install_hint(&app.config.player_command),
                Style::default().fg(Color::Yellow),
            )),
            Line::from(Span::styled(
                "Browsing still works; playback is disabled.",
                Style::default().fg(DIM),
            )),
        ]
    } else {
        vec![
            Line::from(Span::styled("Live Player", Style::default().fg(BRIGHT))),
            Line::from(Span::styled(
                "Select a LIVE match and press Enter to start streaming.",
                Style::default().fg(DIM),
            )),
        ]
    };

    let panel = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(panel, area);
}

fn render_browser(f: &mut Frame, app: &mut App, area: Rect) {
    let cat_width = category_column_width(&app.categories);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(cat_width), Constraint::Min(40)])
        .split(area);

    render_categories(f, app, columns[0]);
    render_matches(f, app, columns[1]);
}

fn render_categories(f: &mut Frame, app: &mut App, area: Rect) {
    let mut items: Vec<ListItem> = Vec::with_capacity(app.categories.len() + 1);
    items.push(ListItem::new("All Categories"));
    for c in &app.categories {
        items.push(ListItem::new(c.as_str()));
    }

    let focused = app.active_pane == Pane::Categories;
    let list = List::new(items)
        .block(
            Block::default()
                .title(" Categories ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(if focused { ACCENT } else { DIM })),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(if focused { ACCENT } else { DIM })
                .add_modifier(Modifier::BOLD),
        );

    f.render_stateful_widget(list, area, &mut app.category_list_state);
}

fn render_matches(f: &mut Frame, app: &mut App, area: Rect) {
    let display_tz = app.config.display_tz();
    let now_ms = chrono::Utc::now().timestamp_millis();

    let items: Vec<ListItem> = app
        .visible
        .iter()
        .map(|m| match_item(m, display_tz, now_ms))
        .collect();

    let focused = app.active_pane == Pane::Matches;
    let title = format!(" Matches ({}) ", app.visible.len());

    if items.is_empty() {
        let empty = Paragraph::new("No matches found. Try adjusting your filters, or press 'r' to refresh.")
            .style(Style::default().fg(DIM))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(if focused { ACCENT } else { DIM })),
            );
        f.render_widget(empty, area);
        return;
    }

    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(if focused { ACCENT } else { DIM })),
        )
        .highlight_symbol("» ")
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    f.render_stateful_widget(list, area, &mut app.match_list_state);
}

fn match_item(m: &Match, display_tz: chrono_tz::Tz, now_ms: i64) -> ListItem<'static> {
    let badge = match &m.status {
        MatchStatus::Live => Span::styled(
            "● LIVE ",
            Style::default().fg(LIVE_RED).add_modifier(Modifier::BOLD),
        ),
        _ => Span::styled(
            format!("{:<7}", starts_label(m.start_time, now_ms)),
            Style::default().fg(Color::Yellow),
        ),
    };

    let mut first = vec![
        badge,
        Span::styled(
            m.display_title().to_string(),
            Style::default().fg(BRIGHT).add_modifier(Modifier::BOLD),
        ),
    ];
    if m.status == MatchStatus::Live && !is_watchable(m) {
        first.push(Span::styled(" (no stream)", Style::default().fg(DIM)));
    }

    let mut detail: Vec<Span> = Vec::new();
    detail.push(Span::raw("        "));
    if m.has_teams() {
        detail.push(Span::styled(
            format!("{} vs {}", m.team_a, m.team_b),
            Style::default().fg(DIM),
        ));
        detail.push(Span::raw("  "));
    }
    if let Some(category) = &m.category {
        detail.push(Span::styled(
            format!("[{}]", category),
            Style::default().fg(Color::Cyan),
        ));
    }
    if let Some(when) = m.start_time.format_in(display_tz) {
        detail.push(Span::styled(
            format!("  {}", when),
            Style::default().fg(DIM),
        ));
    }

    ListItem::new(vec![Line::from(first), Line::from(detail)])
}

/// Short countdown label for non-live matches: "in 2h05m", "soon", "TBA".
fn starts_label(start: StartTime, now_ms: i64) -> String {
    match start {
        StartTime::Unknown => "TBA".to_string(),
        StartTime::At(ms) => {
            let delta_min = (ms - now_ms) / 60_000;
            if delta_min <= 0 {
                "soon".to_string()
            } else if delta_min < 60 {
                format!("in {}m", delta_min)
            } else if delta_min < 48 * 60 {
                format!("in {}h{:02}m", delta_min / 60, delta_min % 60)
            } else {
                format!("in {}d", delta_min / (24 * 60))
            }
        }
    }
}

fn render_feed_error(f: &mut Frame, err: &str, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Could not load match data",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];
    for l in err.lines() {
        lines.push(Line::from(Span::styled(
            l.to_string(),
            Style::default().fg(DIM),
        )));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Press 'r' to retry.",
        Style::default().fg(BRIGHT),
    )));

    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(panel, area);
}

fn render_initial_loading(f: &mut Frame, app: &App, area: Rect) {
    let spinner = SPINNER[(app.loading_tick / 2 % 4) as usize];
    let panel = Paragraph::new(format!("{} Loading matches…", spinner))
        .style(Style::default().fg(ACCENT))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(DIM)),
        );
    f.render_widget(panel, area);
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let legend = Line::from(vec![
        Span::styled("↑↓", Style::default().fg(ACCENT)),
        Span::styled(" navigate  ", Style::default().fg(DIM)),
        Span::styled("Tab", Style::default().fg(ACCENT)),
        Span::styled(" pane  ", Style::default().fg(DIM)),
        Span::styled("Enter", Style::default().fg(ACCENT)),
        Span::styled(" watch  ", Style::default().fg(DIM)),
        Span::styled("f", Style::default().fg(ACCENT)),
        Span::styled(" filter  ", Style::default().fg(DIM)),
        Span::styled("r", Style::default().fg(ACCENT)),
        Span::styled(" refresh  ", Style::default().fg(DIM)),
        Span::styled("?", Style::default().fg(ACCENT)),
        Span::styled(" help  ", Style::default().fg(DIM)),
        Span::styled("q", Style::default().fg(ACCENT)),
        Span::styled(" quit", Style::default().fg(DIM)),
    ]);

    let updated = app
        .snapshot
        .as_ref()
        .map(|s| {
            format!(
                "Last updated: {}",
                s.last_updated_at
                    .with_timezone(&app.config.display_tz())
                    .format("%b %-d, %Y %-I:%M %p")
            )
        })
        .unwrap_or_else(|| "Last updated: N/A".to_string());

    let footer = Paragraph::new(vec![
        legend,
        Line::from(Span::styled(updated, Style::default().fg(DIM))),
    ])
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(DIM)),
    );
    f.render_widget(footer, area);
}

fn render_help_popup(f: &mut Frame, area: Rect) {
    let popup = centered_rect(50, 60, area);
    f.render_widget(Clear, popup);

    let lines = vec![
        Line::from(Span::styled(
            "Keys",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from("  ↑/k ↓/j     move selection"),
        Line::from("  Tab ←/→     switch pane"),
        Line::from("  Enter       watch selected LIVE match"),
        Line::from("  s           stop playback"),
        Line::from("  f           cycle status filter (All/LIVE/Upcoming)"),
        Line::from("  r           refresh the feed"),
        Line::from("  ?           toggle this help"),
        Line::from("  q / Esc     quit"),
        Line::default(),
        Line::from(Span::styled(
            "Upcoming matches show a countdown instead of a play action.",
            Style::default().fg(DIM),
        )),
    ];

    let help = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ACCENT)),
    );
    f.render_widget(help, popup);
}

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
