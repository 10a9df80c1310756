use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine, Rectangle};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph};
use volley::{MenuOption, Mode, Paddle, Scene, SceneController};

use crate::stats::FrameStats;

pub fn render(frame: &mut Frame, scenes: &SceneController, stats: &FrameStats, target_rate: u32) {
    let area = frame.area();

    let block = Block::default()
        .title(" Volley ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(0)])
        .split(area)[0];

    match scenes.scene() {
        Scene::Menu => render_menu(frame, inner, scenes),
        Scene::Connecting | Scene::WaitingForOpponent => render_lobby(frame, inner, scenes),
        Scene::InMatch => render_match(frame, inner, scenes, stats, target_rate),
        Scene::Disconnected => render_disconnected(frame, inner, scenes),
    }
}

fn render_menu(frame: &mut Frame, area: Rect, scenes: &SceneController) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area);

    let title = r#"
 __   __    _ _
 \ \ / /__ | | | ___ _   _
  \ V / _ \| | |/ _ \ | | |
   \_/\___/|_|_|\___/\__, |
                     |___/ "#;

    let title_widget = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);
    frame.render_widget(title_widget, chunks[0]);

    let status = Paragraph::new(scenes.status())
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center);
    frame.render_widget(status, chunks[2]);

    let selected = scenes.menu().selected();
    let menu_items: Vec<ListItem> = MenuOption::all()
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let item = ListItem::new(format!("  {}", option.label()));
            if i == selected {
                item.style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                item.style(Style::default().fg(Color::White))
            }
        })
        .collect();

    let menu = List::new(menu_items).block(
        Block::default()
            .title(" Menu ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    let menu_area = centered_rect(40, 5, chunks[3]);
    frame.render_widget(menu, menu_area);

    let help = Paragraph::new("↑↓ Navigate  Enter Select  Q Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);
}

fn render_lobby(frame: &mut Frame, area: Rect, scenes: &SceneController) {
    let dialog_area = centered_rect(54, 9, area);
    frame.render_widget(Clear, dialog_area);

    let (title, color) = match scenes.scene() {
        Scene::Connecting => (" Connecting ", Color::Yellow),
        _ => (" Waiting ", Color::Green),
    };
    let dialog = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    frame.render_widget(dialog, dialog_area);

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(dialog_area);

    let mut lines = vec![Line::from(Span::styled(
        scenes.status().to_string(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ))];

    if let Some(session) = scenes.session() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("{} ({:?})", session.connection().address(), session.connection_state()),
            Style::default().fg(Color::Cyan),
        )));

        let stats = session.connection().stats();
        lines.push(Line::from(Span::styled(
            format!(
                "Messages: {} sent / {} recv / {} dropped",
                stats.messages_sent, stats.messages_received, stats.messages_dropped
            ),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let info = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(info, inner[0]);

    let help = Paragraph::new("Esc Cancel")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, inner[1]);
}

fn render_match(
    frame: &mut Frame,
    area: Rect,
    scenes: &SceneController,
    stats: &FrameStats,
    target_rate: u32,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let state = scenes.match_state();

    let mode = match scenes.mode() {
        Some(Mode::SinglePlayer(_)) => "single player".to_string(),
        Some(Mode::Multiplayer { session, .. }) => match session.role() {
            Some(role) => format!("playing {}", role),
            None => "multiplayer".to_string(),
        },
        None => String::new(),
    };
    let header = Line::from(vec![
        Span::styled(
            format!("{}", state.score),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("   {}", mode), Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(
        Paragraph::new(header).alignment(Alignment::Center),
        chunks[0],
    );

    let width = state.arena.width as f64;
    let height = state.arena.height as f64;
    let field = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            ctx.draw(&CanvasLine {
                x1: width / 2.0,
                y1: 0.0,
                x2: width / 2.0,
                y2: height,
                color: Color::DarkGray,
            });

            for paddle in [&state.left, &state.right] {
                ctx.draw(&paddle_shape(paddle, height));
            }

            ctx.draw(&Circle {
                x: state.ball.position.x as f64,
                y: height - state.ball.position.y as f64,
                radius: state.ball.radius() as f64,
                color: Color::White,
            });
        });
    frame.render_widget(field, chunks[1]);

    let help = Paragraph::new(format!(
        "W/S or ↑↓ Move  Esc Leave    {:.0} fps  {:.0}/{} ticks/s",
        stats.fps(),
        stats.tick_rate(),
        target_rate
    ))
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    frame.render_widget(help, chunks[2]);
}

/// Canvas y grows upwards; field y grows downwards.
fn paddle_shape(paddle: &Paddle, field_height: f64) -> Rectangle {
    Rectangle {
        x: paddle.left() as f64,
        y: field_height - paddle.bottom() as f64,
        width: paddle.width as f64,
        height: paddle.height as f64,
        color: if paddle.highlighted {
            Color::Yellow
        } else {
            Color::White
        },
    }
}

fn render_disconnected(frame: &mut Frame, area: Rect, scenes: &SceneController) {
    let dialog_area = centered_rect(44, 8, area);
    frame.render_widget(Clear, dialog_area);

    let dialog = Block::default()
        .title(" Match Over ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    frame.render_widget(dialog, dialog_area);

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(dialog_area);

    let message = Paragraph::new(scenes.status())
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(message, inner[0]);

    if let Some(remaining) = scenes.pending_return() {
        let countdown = Paragraph::new(format!("Returning to menu in {:.0}s", remaining.ceil()))
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center);
        frame.render_widget(countdown, inner[1]);
    }

    let help = Paragraph::new("Enter Menu")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, inner[2]);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
