//! Stone Chamber — a single-room escape adventure.
//!
//! The engine consumes one discrete [`Input`](state::Input) symbol per
//! tick; this module owns the key/click → symbol mapping and hands the
//! symbol to `logic`. Keys outside the alphabet are dropped here and
//! never reach the engine.

pub mod events;
pub mod items;
pub mod logic;
pub mod map;
pub mod puzzles;
pub mod render;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent};

use state::{Input, Scene, Session, MENU_OPTIONS};

// ── Click action ids ──────────────────────────────────────────

/// Menu rows: +index into [`MENU_OPTIONS`].
pub const MENU_CHOICE_BASE: u16 = 10;
/// Continue / back on narrative screens.
pub const NARRATIVE_CONTINUE: u16 = 20;
pub const NARRATIVE_SKIP: u16 = 21;

// ── Game shell ────────────────────────────────────────────────

pub struct ChamberGame {
    pub session: Session,
}

impl ChamberGame {
    pub fn new() -> Self {
        Self {
            session: Session::new(),
        }
    }

    /// Handle one input event. Returns true if it was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(ch) => {
                let Some(input) = map_key(*ch) else {
                    return false;
                };
                logic::handle_input(&mut self.session, input);
                true
            }
            InputEvent::Click(id) => self.handle_click(*id),
        }
    }

    fn handle_click(&mut self, id: u16) -> bool {
        match self.session.scene {
            Scene::MainMenu => {
                let range = MENU_CHOICE_BASE..MENU_CHOICE_BASE + MENU_OPTIONS.len() as u16;
                if range.contains(&id) {
                    self.session.menu_selected = (id - MENU_CHOICE_BASE) as usize;
                    logic::handle_input(&mut self.session, Input::Confirm);
                    return true;
                }
                false
            }
            Scene::Intro(_) | Scene::Controls | Scene::Outro(_) => match id {
                NARRATIVE_CONTINUE => {
                    logic::handle_input(&mut self.session, Input::Confirm);
                    true
                }
                NARRATIVE_SKIP => {
                    logic::handle_input(&mut self.session, Input::Skip);
                    true
                }
                _ => false,
            },
            // Play is keyboard-only; clicks fall through.
            Scene::Play | Scene::Quit => false,
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.session, f, area, click_state);
    }
}

impl Default for ChamberGame {
    fn default() -> Self {
        Self::new()
    }
}

/// The fixed key → symbol alphabet. Everything else is ignored.
pub fn map_key(ch: char) -> Option<Input> {
    match ch {
        'w' | 'W' => Some(Input::Up),
        's' | 'S' => Some(Input::Down),
        'a' | 'A' => Some(Input::Left),
        'd' | 'D' => Some(Input::Right),
        'b' | 'B' => Some(Input::ToggleInventory),
        'c' | 'C' => Some(Input::Combine),
        'p' | 'P' => Some(Input::PickUp),
        'i' | 'I' => Some(Input::Interact),
        'o' | 'O' => Some(Input::Inspect),
        'u' | 'U' => Some(Input::UseItem),
        'q' | 'Q' => Some(Input::Quit),
        '\n' | '\r' => Some(Input::Confirm),
        ' ' => Some(Input::Skip),
        _ => None,
    }
}

// ── Tests ─────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::items::ItemId;
    use super::map::Tile;
    use super::state::ItemKind;
    use super::*;

    fn key(game: &mut ChamberGame, ch: char) -> bool {
        game.handle_input(&InputEvent::Key(ch))
    }

    fn keys(game: &mut ChamberGame, sequence: &str) {
        for ch in sequence.chars() {
            key(game, ch);
        }
    }

    fn start_playing(game: &mut ChamberGame) {
        key(game, '\n'); // menu → intro
        key(game, ' '); // skip intro
        assert_eq!(game.session.scene, Scene::Play);
    }

    fn held_kinds(game: &ChamberGame) -> Vec<ItemKind> {
        game.session
            .items
            .inventory()
            .iter()
            .map(|i| i.kind)
            .collect()
    }

    /// Walk the cursor onto the named item, then press a key.
    fn select_then(game: &mut ChamberGame, kind: ItemKind, ch: char) {
        let target = game
            .session
            .items
            .inventory()
            .iter()
            .position(|i| i.kind == kind)
            .unwrap_or_else(|| panic!("not holding {:?}", kind));
        while game.session.player.inventory_cursor != target {
            key(game, 's');
        }
        key(game, ch);
    }

    fn combine(game: &mut ChamberGame, a: ItemKind, b: ItemKind) {
        if !game.session.player.inventory_open {
            key(game, 'b');
        }
        select_then(game, a, 'c');
        select_then(game, b, 'c');
    }

    /// Use the named inventory item one step in the given direction.
    fn use_item(game: &mut ChamberGame, kind: ItemKind, dir: char) {
        if game.session.player.inventory_open {
            key(game, 'b');
        }
        let target = game
            .session
            .items
            .inventory()
            .iter()
            .position(|i| i.kind == kind)
            .unwrap_or_else(|| panic!("not holding {:?}", kind));
        game.session.player.inventory_cursor = target;
        keys(game, &format!("u{}", dir));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut game = ChamberGame::new();
        assert!(!key(&mut game, 'z'));
        assert!(!key(&mut game, '7'));
        assert_eq!(game.session.scene, Scene::MainMenu);
    }

    #[test]
    fn case_insensitive_movement_keys() {
        let mut game = ChamberGame::new();
        start_playing(&mut game);
        let y = game.session.player.y;
        key(&mut game, 'S');
        assert_eq!(game.session.player.y, y + 1);
    }

    #[test]
    fn menu_click_selects_and_confirms() {
        let mut game = ChamberGame::new();
        assert!(game.handle_input(&InputEvent::Click(MENU_CHOICE_BASE + 1)));
        assert_eq!(game.session.scene, Scene::Controls);
    }

    #[test]
    fn narrative_click_continues() {
        let mut game = ChamberGame::new();
        key(&mut game, '\n');
        assert_eq!(game.session.scene, Scene::Intro(0));
        assert!(game.handle_input(&InputEvent::Click(NARRATIVE_CONTINUE)));
        assert_eq!(game.session.scene, Scene::Intro(1));
        assert!(game.handle_input(&InputEvent::Click(NARRATIVE_SKIP)));
        assert_eq!(game.session.scene, Scene::Play);
    }

    #[test]
    fn clicks_do_nothing_in_play() {
        let mut game = ChamberGame::new();
        start_playing(&mut game);
        assert!(!game.handle_input(&InputEvent::Click(MENU_CHOICE_BASE)));
    }

    /// The full game, played through the public input path: gather
    /// everything, open the stone door, wait out the blackout, forge the
    /// key, open the wooden door and walk out.
    #[test]
    fn full_playthrough() {
        let mut game = ChamberGame::new();
        start_playing(&mut game);

        // Start at (3, 6). Search the south-west bookshelf for the knife.
        keys(&mut game, "d"); // (4, 6)
        keys(&mut game, "is"); // search (4, 7)
        assert_eq!(held_kinds(&game), vec![ItemKind::Knife]);

        // South alcove: water, cupric ore powder, tin ore powder.
        keys(&mut game, "ddsd"); // (7, 7)
        keys(&mut game, "is"); // water x3 from (7, 8)
        keys(&mut game, "d"); // (8, 7)
        keys(&mut game, "is"); // cupric ore powder
        keys(&mut game, "d"); // (9, 7)
        keys(&mut game, "is"); // tin ore powder
        assert!(game.session.message.contains("Tin Ore Powder"));

        // North alcove: gypsum and cupric sulfate.
        keys(&mut game, "wwwww"); // (9, 2)
        keys(&mut game, "iw"); // gypsum from (9, 1)
        keys(&mut game, "a"); // (8, 2)
        keys(&mut game, "iw"); // cupric sulfate from (8, 1)

        // The spade and the burner lie out on the tables.
        keys(&mut game, "ddddds"); // (13, 3)
        keys(&mut game, "ps"); // spade from (13, 4)
        assert!(game.session.message.contains("Metal Spade"));
        keys(&mut game, "wddssssaaa"); // around the table to (12, 6)
        keys(&mut game, "pw"); // burner from (12, 5)

        // The tin hides in the north-east crate.
        keys(&mut game, "ddddddwdww"); // (19, 3)
        keys(&mut game, "iw"); // tin from (19, 2)
        assert_eq!(game.session.items.inventory_count(), 11);

        // Burn the handle off the spade.
        combine(&mut game, ItemKind::MetalSpade, ItemKind::BunsenBurner);
        assert!(held_kinds(&game).contains(&ItemKind::SpadeNoHandle));

        // Stone door: spade, sulfate, solvent, then pull.
        key(&mut game, 'b');
        keys(&mut game, "sd"); // (20, 4)
        use_item(&mut game, ItemKind::SpadeNoHandle, 'd');
        use_item(&mut game, ItemKind::CupricSulfate, 'd');
        use_item(&mut game, ItemKind::DihydrogenMonoxide, 'd');
        assert_eq!(game.session.player.x, 19, "the reaction pushes you back");
        keys(&mut game, "d"); // back to (20, 4)
        keys(&mut game, "id"); // pull the spade
        assert!(game.session.stone_door.is_open());
        assert_eq!(game.session.map.tile_at(21, 4), Tile::Floor);
        assert!(game.session.ambient.is_some());

        // Wait out the blackout in place.
        let mut went_dark = false;
        let mut guard = 0;
        while game.session.ambient.is_some() {
            keys(&mut game, "ow");
            went_dark |= game.session.render_suppressed();
            guard += 1;
            assert!(guard < 50, "blackout never cleared");
        }
        assert!(went_dark);
        assert!(!game.session.render_suppressed());

        // Mix the mould and press it against the chained key at (2, 4).
        combine(&mut game, ItemKind::Tin, ItemKind::DihydrogenMonoxide);
        combine(&mut game, ItemKind::Tin, ItemKind::Gypsum);
        key(&mut game, 'b');
        keys(&mut game, "aaaaassaaasaaaaawaawwa"); // long way round to (3, 4)
        assert_eq!((game.session.player.x, game.session.player.y), (3, 4));
        use_item(&mut game, ItemKind::Tin, 'a');
        assert!(game.session.wooden_door.imprint_made);

        // Fill the imprint, forge, pry.
        combine(&mut game, ItemKind::Tin, ItemKind::CupricOrePowder);
        combine(&mut game, ItemKind::Tin, ItemKind::TinOrePowder);
        combine(&mut game, ItemKind::Tin, ItemKind::BunsenBurner);
        combine(&mut game, ItemKind::Tin, ItemKind::Knife);
        assert!(held_kinds(&game).contains(&ItemKind::BronzeKey));

        // Back across the room and through the stone doorway to (22, 4).
        key(&mut game, 'b');
        keys(&mut game, "dssddsdddddwdddwwdddddddd");
        assert_eq!((game.session.player.x, game.session.player.y), (22, 4));

        use_item(&mut game, ItemKind::BronzeKey, 'd');
        assert!(game.session.wooden_door.key_inserted);
        keys(&mut game, "id");
        assert_eq!(game.session.map.tile_at(23, 4), Tile::WoodenDoorOpen);

        // Step into the doorway and out of the game.
        key(&mut game, 'd');
        assert_eq!(game.session.scene, Scene::Outro(0));

        keys(&mut game, "\n\n");
        assert_eq!(game.session.scene, Scene::MainMenu);
        assert_eq!(
            game.session.items.ground_item_at(13, 4).unwrap().id,
            ItemId(1),
            "the reset restarts the id sequence"
        );
    }
}
