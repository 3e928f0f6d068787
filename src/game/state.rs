//! All game data structures and static catalogues — no verb logic.
//!
//! Everything mutable lives inside the [`Session`] aggregate, which is
//! passed by exclusive reference into the verb handlers in `logic.rs`.
//! Rendering only ever reads it.

use super::events::AmbientEvent;
use super::items::{ItemStore, Searchable};
use super::map::{RoomMap, PLAYER_START};
use super::puzzles::{StoneDoor, WoodenDoor};

// ── Item catalogue ────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    MetalSpade,
    SpadeNoHandle,
    Knife,
    EmptyVial,
    DihydrogenMonoxide,
    CupricOrePowder,
    TinOrePowder,
    Tin,
    SodiumChloride,
    Gypsum,
    CupricSulfate,
    AceticAcid,
    Magnet,
    BunsenBurner,
    BronzeKey,
}

#[cfg(test)]
pub const ALL_ITEM_KINDS: &[ItemKind] = &[
    ItemKind::MetalSpade,
    ItemKind::SpadeNoHandle,
    ItemKind::Knife,
    ItemKind::EmptyVial,
    ItemKind::DihydrogenMonoxide,
    ItemKind::CupricOrePowder,
    ItemKind::TinOrePowder,
    ItemKind::Tin,
    ItemKind::SodiumChloride,
    ItemKind::Gypsum,
    ItemKind::CupricSulfate,
    ItemKind::AceticAcid,
    ItemKind::Magnet,
    ItemKind::BunsenBurner,
    ItemKind::BronzeKey,
];

pub struct ItemInfo {
    pub name: &'static str,
    pub glyph: char,
}

pub fn item_info(kind: ItemKind) -> ItemInfo {
    match kind {
        ItemKind::MetalSpade => ItemInfo { name: "Metal Spade", glyph: 'S' },
        ItemKind::SpadeNoHandle => ItemInfo { name: "Metal Spade (No Handle)", glyph: 's' },
        ItemKind::Knife => ItemInfo { name: "Knife", glyph: 'I' },
        ItemKind::EmptyVial => ItemInfo { name: "Empty Vial", glyph: '!' },
        ItemKind::DihydrogenMonoxide => ItemInfo { name: "Dihydrogen Monoxide", glyph: '!' },
        ItemKind::CupricOrePowder => ItemInfo { name: "Cupric Ore Powder", glyph: '!' },
        ItemKind::TinOrePowder => ItemInfo { name: "Tin Ore Powder", glyph: '!' },
        ItemKind::Tin => ItemInfo { name: "Tin", glyph: '}' },
        ItemKind::SodiumChloride => ItemInfo { name: "Sodium Chloride", glyph: '!' },
        ItemKind::Gypsum => ItemInfo { name: "Gypsum", glyph: '!' },
        ItemKind::CupricSulfate => ItemInfo { name: "Cupric Sulfate", glyph: '!' },
        ItemKind::AceticAcid => ItemInfo { name: "Acetic Acid", glyph: '!' },
        ItemKind::Magnet => ItemInfo { name: "Magnet", glyph: ']' },
        ItemKind::BunsenBurner => ItemInfo { name: "Bunsen Burner", glyph: '^' },
        ItemKind::BronzeKey => ItemInfo { name: "Bronze Key", glyph: '=' },
    }
}

// ── Input symbols ─────────────────────────────────────────────

/// The discrete per-tick input alphabet the engine consumes. Raw key and
/// click decoding happens in the shell; anything outside this alphabet is
/// dropped before it reaches the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Up,
    Down,
    Left,
    Right,
    ToggleInventory,
    Combine,
    PickUp,
    Interact,
    Inspect,
    UseItem,
    Quit,
    Confirm,
    Skip,
}

/// A verb armed on one tick and resolved by the next input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verb {
    UseItem,
    PickUp,
    Interact,
    Inspect,
}

// ── Scenes ────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scene {
    MainMenu,
    Intro(u8),
    Play,
    Controls,
    Outro(u8),
    /// Terminal; only reachable from the main menu's Exit entry.
    Quit,
}

pub const MENU_OPTIONS: &[&str] = &["Play", "Controls", "Exit"];
pub const INTRO_PAGES: u8 = 3;
pub const OUTRO_PAGES: u8 = 2;

// ── Player ────────────────────────────────────────────────────

pub struct Player {
    pub x: i32,
    pub y: i32,
    /// Counts completed movements and resolved verbs.
    pub turn: u32,
    pub pending: Option<Verb>,
    pub inventory_open: bool,
    pub inventory_cursor: usize,
    /// First slot marked for a combination, awaiting the second.
    pub combine_first: Option<usize>,
}

impl Player {
    pub fn new() -> Self {
        let (x, y) = PLAYER_START;
        Self {
            x,
            y,
            turn: 0,
            pending: None,
            inventory_open: false,
            inventory_cursor: 0,
            combine_first: None,
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

// ── Session ───────────────────────────────────────────────────

/// The whole game in one owned aggregate. `Session::new()` is also the
/// world reset: fresh ids from 1, cleared flags, closed doors, no ash.
pub struct Session {
    pub scene: Scene,
    pub menu_selected: usize,
    pub map: RoomMap,
    pub items: ItemStore,
    pub searchables: Vec<Searchable>,
    pub stone_door: StoneDoor,
    pub wooden_door: WoodenDoor,
    pub ambient: Option<AmbientEvent>,
    pub player: Player,
    pub message: String,
}

impl Session {
    pub fn new() -> Self {
        let map = RoomMap::new();
        let mut items = ItemStore::new();

        // The three items lying out on the tables. The arena is empty, so
        // none of these can fail.
        let _ = items.spawn(ItemKind::MetalSpade, 13, 4);
        let _ = items.spawn(ItemKind::BunsenBurner, 12, 5);
        let _ = items.spawn(ItemKind::EmptyVial, 10, 4);

        let searchables = vec![
            Searchable::new(4, 7, &[ItemKind::Knife]),
            Searchable::new(
                7,
                8,
                &[
                    ItemKind::DihydrogenMonoxide,
                    ItemKind::DihydrogenMonoxide,
                    ItemKind::DihydrogenMonoxide,
                ],
            ),
            Searchable::new(8, 8, &[ItemKind::CupricOrePowder]),
            Searchable::new(9, 8, &[ItemKind::TinOrePowder]),
            Searchable::new(11, 8, &[ItemKind::EmptyVial]),
            Searchable::new(19, 2, &[ItemKind::Tin]),
            Searchable::new(14, 1, &[ItemKind::SodiumChloride]),
            Searchable::new(9, 1, &[ItemKind::Gypsum]),
            Searchable::new(8, 1, &[ItemKind::CupricSulfate]),
            Searchable::new(
                7,
                1,
                &[ItemKind::DihydrogenMonoxide, ItemKind::AceticAcid],
            ),
            Searchable::new(3, 2, &[ItemKind::Magnet]),
        ];

        Self {
            scene: Scene::MainMenu,
            menu_selected: 0,
            map,
            items,
            searchables,
            stone_door: StoneDoor::new(),
            wooden_door: WoodenDoor::new(),
            ambient: None,
            player: Player::new(),
            message: String::new(),
        }
    }

    pub fn set_message(&mut self, text: impl Into<String>) {
        self.message = text.into();
    }

    /// Flag consumed by the renderer: true while the blackout window is
    /// active and the room view should not be drawn.
    pub fn render_suppressed(&self) -> bool {
        self.ambient.map_or(false, |e| e.suppresses_render())
    }

    pub fn searchable_index_at(&self, x: i32, y: i32) -> Option<usize> {
        self.searchables
            .iter()
            .position(|s| s.x == x && s.y == y)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────
