//! Rendering for the terminal UI.

use super::app::App;
use crate::game::{MAP_HEIGHT, MAP_WIDTH, Phase, Player, Position};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Draws the whole screen for the current phase.
pub fn draw(f: &mut Frame, app: &App) {
    if app.session().phase() == Phase::CharacterSelect {
        render_class_select(f, f.area(), app);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(MAP_HEIGHT as u16 + 2),
            Constraint::Length(3),
        ])
        .split(f.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);

    render_status(f, rows[0], app);
    render_map(f, columns[0], app);
    render_side_panel(f, columns[1], app);
    render_status_line(f, rows[2], app);
}

fn render_class_select(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Legends of Nusantara",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (i, class) in app.classes().iter().enumerate() {
        let def = class.definition();
        let mut extras = String::new();
        if let Some(mana) = def.mana {
            extras.push_str(&format!("  Mana {mana}"));
        }
        if let Some(crit) = def.crit {
            extras.push_str(&format!("  Crit {:.0}%", crit * 100.0));
        }
        if let Some(dodge) = def.dodge {
            extras.push_str(&format!("  Dodge {:.0}%", dodge * 100.0));
        }
        let text = format!(
            "{} - HP {}  ATK {}  DEF {}{extras}",
            def.name, def.hp, def.atk, def.def
        );
        let style = if i == app.cursor() {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(text, style)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(app.status_message().to_string()));

    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Choose a class"));
    f.render_widget(panel, center_rect(area, 60, 12));
}

fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let text = match app.session().player() {
        Some(player) => player_summary(player),
        None => vec![Line::from("No character")],
    };
    let panel = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(panel, area);
}

fn player_summary(player: &Player) -> Vec<Line<'static>> {
    let mut first = format!(
        "{}  Lv {}  EXP {}/{}",
        player.class,
        player.level,
        player.exp,
        player.exp_to_next()
    );
    if let Some(mana) = player.mana {
        first.push_str(&format!("  Mana {mana}"));
    }
    let second = format!("HP {}  ATK {}  DEF {}", player.hp, player.atk, player.def);
    let inventory = if player.inventory.is_empty() {
        "Inventory: empty".to_string()
    } else {
        format!(
            "Inventory: {}",
            player.inventory.iter().cloned().collect::<Vec<_>>().join(", ")
        )
    };
    vec![Line::from(first), Line::from(format!("{second}  {inventory}"))]
}

fn render_map(f: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let mut lines = Vec::with_capacity(MAP_HEIGHT as usize);
    for y in 0..MAP_HEIGHT {
        let mut spans = Vec::with_capacity(MAP_WIDTH as usize * 2);
        for x in 0..MAP_WIDTH {
            let cell = Position { x, y };
            let span = if cell == session.position() {
                Span::styled("@", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            } else if session.visited().contains(&cell) {
                Span::styled("o", Style::default().fg(Color::Green))
            } else {
                Span::styled(".", Style::default().fg(Color::DarkGray))
            };
            spans.push(span);
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }
    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Map"));
    f.render_widget(panel, area);
}

fn render_side_panel(f: &mut Frame, area: Rect, app: &App) {
    let halves = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(area);

    let battle_text = match app.session().enemy() {
        Some(enemy) => vec![
            Line::from(format!("{}  HP {}", enemy.name, enemy.hp)),
            Line::from(""),
            Line::from("a: attack  m: magic  d: defend  f: flee"),
        ],
        None => vec![Line::from("No battle. Explore the map to find enemies.")],
    };
    let battle = Paragraph::new(battle_text)
        .block(Block::default().borders(Borders::ALL).title("Battle"));
    f.render_widget(battle, halves[0]);

    // Most recent entries first, as many as fit.
    let visible = halves[1].height.saturating_sub(2) as usize;
    let entries: Vec<String> = app.session().log().iter().map(str::to_string).collect();
    let lines: Vec<Line> = entries
        .iter()
        .rev()
        .take(visible)
        .map(|e| Line::from(e.clone()))
        .collect();
    let log = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Log"));
    f.render_widget(log, halves[1]);
}

fn render_status_line(f: &mut Frame, area: Rect, app: &App) {
    let line = Paragraph::new(app.status_message().to_string())
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(line, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
