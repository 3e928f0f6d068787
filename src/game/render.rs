//! Rendering — a pure read of the [`Session`].
//!
//! Layout: room view + side panel (HUD or inventory), message area,
//! help bar. Menu and narrative scenes are full-screen replacements.
//! During the blackout window the room view is withheld entirely.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;
use crate::widgets::ClickableList;

use super::items::Location;
use super::map::{Tile, ROOM_HEIGHT, ROOM_WIDTH};
use super::state::{item_info, Scene, Session, MENU_OPTIONS};
use super::{MENU_CHOICE_BASE, NARRATIVE_CONTINUE, NARRATIVE_SKIP};

const TITLE_BANNER: &[&str] = &[
    r" ____  ____  __   __ _  ____     ___  _  _   __   _  _  ____  ____  ____ ",
    r"/ ___)(_  _)/  \ (  ( \(  __)   / __)/ )( \ / _\ ( \/ )(  _ \(  __)(  _ \",
    r"\___ \  )( (  O )/    / ) _)   ( (__ ) __ (/    \/ \/ \ ) _ ( ) _)  )   /",
    r"(____/ (__) \__/ \_)__)(____)   \___)\_)(_/\_/\_/\_)(_/(____/(____)(__\_)",
];

const INTRO_TEXT: &[&[&str]] = &[
    &[
        "You wake up on a cold stone floor.",
        "",
        "Your head is pounding and your mouth tastes of dust. The last",
        "thing you remember is the rumble of stone somewhere above you.",
    ],
    &[
        "Torchlight flickers along the walls of a single chamber.",
        "",
        "Two doors. One of heavy stone with a strange hole bored into it,",
        "one of wood with a sturdy lock. Neither will budge.",
    ],
    &[
        "Someone worked in this room once. Tables, vials, a burner.",
        "",
        "Whatever they were doing here, their leftovers are your way out.",
    ],
];

const OUTRO_TEXT: &[&[&str]] = &[
    &[
        "The wooden door swings open onto a narrow passage.",
        "",
        "Cool air moves against your face for the first time in days.",
    ],
    &[
        "You climb toward the grey light at the end of the passage.",
        "",
        "Out. Free. You don't look back at the chamber.",
    ],
];

pub fn render(
    s: &Session,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    match s.scene {
        Scene::MainMenu => render_main_menu(s, f, area, click_state),
        Scene::Intro(step) => render_narrative(
            f,
            area,
            click_state,
            " STONE CHAMBER ",
            INTRO_TEXT.get(step as usize).copied().unwrap_or(&[]),
            step as usize + 1 == INTRO_TEXT.len(),
        ),
        Scene::Controls => render_controls(f, area, click_state),
        Scene::Play => render_play(s, f, area),
        Scene::Outro(step) => render_narrative(
            f,
            area,
            click_state,
            " ESCAPE ",
            OUTRO_TEXT.get(step as usize).copied().unwrap_or(&[]),
            step as usize + 1 == OUTRO_TEXT.len(),
        ),
        Scene::Quit => render_quit(f, area),
    }
}

// ── Main menu ─────────────────────────────────────────────────

fn render_main_menu(
    s: &Session,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TITLE_BANNER.len() as u16 + 3),
            Constraint::Min(6),
        ])
        .split(area);

    let mut banner: Vec<Line> = vec![Line::from("")];
    for row in TITLE_BANNER {
        banner.push(Line::from(Span::styled(
            *row,
            Style::default().fg(Color::Rgb(139, 163, 139)),
        )));
    }
    f.render_widget(Paragraph::new(banner).alignment(Alignment::Center), chunks[0]);

    let mut cl = ClickableList::new();
    cl.push(Line::from(""));
    for (i, option) in MENU_OPTIONS.iter().enumerate() {
        let style = if i == s.menu_selected {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if i == s.menu_selected { "> " } else { "  " };
        cl.push_clickable(
            Line::from(Span::styled(format!("  {}{}", marker, option), style)),
            MENU_CHOICE_BASE + i as u16,
        );
    }
    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        "  [W/S] select   [Enter] confirm",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let mut cs = click_state.borrow_mut();
    cl.register_targets(chunks[1], &mut cs, 1, 1);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), chunks[1]);
}

// ── Narrative screens (intro / outro) ─────────────────────────

fn render_narrative(
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
    title: &str,
    page: &[&str],
    last_page: bool,
) {
    let mut text: Vec<Line> = vec![Line::from("")];
    for row in page {
        text.push(Line::from(Span::styled(
            format!("  {}", row),
            Style::default().fg(Color::White),
        )));
    }

    let mut cl = ClickableList::new();
    cl.push(Line::from(""));
    let continue_label = if last_page { "  [Enter] begin" } else { "  [Enter] continue" };
    cl.push_clickable(
        Line::from(Span::styled(
            continue_label,
            Style::default().fg(Color::Yellow),
        )),
        NARRATIVE_CONTINUE,
    );
    cl.push_clickable(
        Line::from(Span::styled("  [Space] skip", Style::default().fg(Color::DarkGray))),
        NARRATIVE_SKIP,
    );

    let choices_height = cl.visual_height(area.width.saturating_sub(2)) + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(choices_height)])
        .split(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(title, Style::default().fg(Color::DarkGray)));
    f.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
        chunks[0],
    );

    let choice_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let mut cs = click_state.borrow_mut();
    cl.register_targets(chunks[1], &mut cs, 1, 1);
    f.render_widget(Paragraph::new(cl.into_lines()).block(choice_block), chunks[1]);
}

// ── Controls ──────────────────────────────────────────────────

fn render_controls(f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let rows = [
        ("W / A / S / D", "move, aim a pending verb"),
        ("P", "pick up (then a direction)"),
        ("I", "interact (then a direction)"),
        ("O", "inspect (then a direction)"),
        ("U", "use the selected item (then a direction)"),
        ("B", "open and close the inventory"),
        ("C", "mark items to combine (in the inventory)"),
        ("D", "drop the selected item (in the inventory)"),
        ("Q", "back to the title"),
    ];

    let mut cl = ClickableList::new();
    cl.push(Line::from(""));
    for (key, what) in rows {
        cl.push(Line::from(vec![
            Span::styled(
                format!("  {:<14}", key),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(what, Style::default().fg(Color::Gray)),
        ]));
    }
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled("  [Enter] back", Style::default().fg(Color::Yellow))),
        NARRATIVE_CONTINUE,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(" CONTROLS ", Style::default().fg(Color::DarkGray)));
    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

// ── Play ──────────────────────────────────────────────────────

fn render_play(s: &Session, f: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(ROOM_HEIGHT as u16 + 2),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(ROOM_WIDTH as u16 + 2),
            Constraint::Min(20),
        ])
        .split(chunks[0]);

    render_room(s, f, top[0]);
    if s.player.inventory_open {
        render_inventory(s, f, top[1]);
    } else {
        render_hud(s, f, top[1]);
    }
    render_message(s, f, chunks[1]);

    let help = if s.player.inventory_open {
        " [W/S] select  [C] combine  [D] drop  [B] close"
    } else {
        " [WASD] move  [P]ick up  [I]nteract  [O] inspect  [U]se  [B]ag  [Q]uit"
    };
    f.render_widget(
        Paragraph::new(Span::styled(help, Style::default().fg(Color::DarkGray))),
        chunks[2],
    );
}

/// Stone, wood and metal each get their own hue; the torches burn yellow.
fn tile_color(tile: Tile) -> Color {
    match tile {
        Tile::Stone | Tile::Floor => Color::Rgb(139, 163, 139),
        Tile::Bookshelf
        | Tile::Crate
        | Tile::SmallCrate
        | Tile::Table
        | Tile::Chair
        | Tile::OpenChest
        | Tile::WoodenDoorClosed
        | Tile::WoodenDoorOpen => Color::Rgb(160, 82, 45),
        Tile::StoneDoorClosed | Tile::StoneDoorOpen | Tile::Chain => Color::Rgb(199, 199, 199),
        Tile::Torch => Color::Yellow,
        Tile::Ash => Color::DarkGray,
    }
}

fn render_room(s: &Session, f: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    if s.render_suppressed() {
        // The blackout swallows the whole room view.
        let dark = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Pitch black.",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "  The torches are out. You hold still and",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                "  wait for them to catch again.",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        f.render_widget(Paragraph::new(dark).block(block), area);
        return;
    }

    let mut lines: Vec<Line> = Vec::with_capacity(ROOM_HEIGHT as usize);
    for y in 0..ROOM_HEIGHT {
        let mut spans: Vec<Span> = Vec::with_capacity(ROOM_WIDTH as usize);
        for x in 0..ROOM_WIDTH {
            if (x, y) == (s.player.x, s.player.y) {
                spans.push(Span::styled(
                    "@",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ));
            } else if let Some(item) = s.items.ground_item_at(x, y) {
                spans.push(Span::styled(
                    item_info(item.kind).glyph.to_string(),
                    Style::default().fg(Color::White),
                ));
            } else {
                let tile = s.map.tile_at(x, y);
                spans.push(Span::styled(
                    tile.glyph().to_string(),
                    Style::default().fg(tile_color(tile)),
                ));
            }
        }
        lines.push(Line::from(spans));
    }
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_hud(s: &Session, f: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  Turn: {}", s.player.turn),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("  Carrying {} item(s)", s.items.inventory_count()),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    if s.stone_door.is_open() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  The stone door stands open.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_inventory(s: &Session, f: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    for (idx, item) in s.items.inventory().iter().enumerate() {
        let label = (b'a' + idx as u8) as char;
        let name = item_info(item.kind).name;
        let style = if idx == s.player.inventory_cursor {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else if s.player.combine_first == Some(idx) {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Gray)
        };
        debug_assert!(matches!(item.location, Location::Inventory { .. }));
        lines.push(Line::from(Span::styled(
            format!(" {}: {}", label, name),
            style,
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(Span::styled(" Inventory ", Style::default().fg(Color::Magenta)));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_message(s: &Session, f: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    for (i, row) in s.message.lines().enumerate() {
        let prefix = if i == 0 { "> " } else { "" };
        lines.push(Line::from(Span::styled(
            format!("{}{}", prefix, row),
            Style::default().fg(Color::White),
        )));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

// ── Quit ──────────────────────────────────────────────────────

fn render_quit(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Thanks for playing.",
            Style::default().fg(Color::Gray),
        )),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
