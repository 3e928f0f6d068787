mod game;
mod input;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use game::ChamberGame;
use input::{pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

/// Query the grid container's bounding rect and convert pixel coordinates
/// to a terminal cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let click_x = mouse_x as f64 - rect.left();
    let click_y = mouse_y as f64 - rect.top();

    let col = pixel_x_to_col(click_x, rect.width(), cs.terminal_cols)?;
    let row = pixel_y_to_row(click_y, rect.height(), cs.terminal_rows)?;
    Some((col, row))
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let game = Rc::new(RefCell::new(ChamberGame::new()));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    // A display surface that can't host the grid fails here, before any
    // game state exists.
    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    // Mouse/touch handler.
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.kind != MouseEventKind::ButtonDown(MouseButton::Left) {
                return;
            }

            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }
            let (col, row) = (mouse_event.col, mouse_event.row);
            let matched = cs.hit_test(col, row);
            web_sys::console::log_1(
                &format!(
                    "click: cell=({}, {}), action={:?}, targets={}",
                    col,
                    row,
                    matched,
                    cs.targets.len()
                )
                .into(),
            );
            drop(cs);

            if let Some(action_id) = matched {
                game.borrow_mut().handle_input(&InputEvent::Click(action_id));
            }
        }
    });

    // Keyboard handler. Enter is normalized to '\n'; everything the game
    // doesn't know is dropped inside `handle_input`.
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            let ch = match key_event.code {
                KeyCode::Char(c) => Some(c),
                KeyCode::Enter => Some('\n'),
                _ => None,
            };
            if let Some(ch) = ch {
                game.borrow_mut().handle_input(&InputEvent::Key(ch));
            }
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let size = f.area();
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }
            game.borrow().render(f, size, &click_state);
        }
    });

    Ok(())
}
