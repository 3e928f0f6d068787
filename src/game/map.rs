//! The chamber itself — a fixed 24×10 tile grid and its mutation ops.
//!
//! The layout never changes shape at runtime; the only tile mutations are
//! the two doors opening and furniture burning to ash, both driven by the
//! interaction engine.

pub const ROOM_WIDTH: i32 = 24;
pub const ROOM_HEIGHT: i32 = 10;

/// Where the closed stone door sits, and where its slab ends up once it
/// slides open (the doorway itself becomes floor).
pub const STONE_DOOR_POS: (i32, i32) = (21, 4);
pub const STONE_DOOR_SLIDE_POS: (i32, i32) = (20, 4);

/// The wooden door doubles as the escape tile once it stands open.
pub const WOODEN_DOOR_POS: (i32, i32) = (23, 4);
pub const ESCAPE_POS: (i32, i32) = WOODEN_DOOR_POS;

pub const PLAYER_START: (i32, i32) = (3, 6);

// ── Tiles ─────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    Stone,
    Floor,
    Bookshelf,
    Crate,
    SmallCrate,
    StoneDoorClosed,
    StoneDoorOpen,
    WoodenDoorClosed,
    WoodenDoorOpen,
    OpenChest,
    Table,
    Chair,
    Torch,
    Chain,
    Ash,
}

#[cfg(test)]
pub const ALL_TILES: &[Tile] = &[
    Tile::Stone,
    Tile::Floor,
    Tile::Bookshelf,
    Tile::Crate,
    Tile::SmallCrate,
    Tile::StoneDoorClosed,
    Tile::StoneDoorOpen,
    Tile::WoodenDoorClosed,
    Tile::WoodenDoorOpen,
    Tile::OpenChest,
    Tile::Table,
    Tile::Chair,
    Tile::Torch,
    Tile::Chain,
    Tile::Ash,
];

impl Tile {
    pub fn glyph(self) -> char {
        match self {
            Tile::Stone => '#',
            Tile::Floor => '.',
            Tile::Bookshelf => 'B',
            Tile::Crate => 'X',
            Tile::SmallCrate => 'x',
            Tile::StoneDoorClosed => '|',
            Tile::StoneDoorOpen => '_',
            Tile::WoodenDoorClosed => '+',
            Tile::WoodenDoorOpen => '/',
            Tile::OpenChest => 'C',
            Tile::Table => 'T',
            Tile::Chair => 'L',
            Tile::Torch => 'i',
            Tile::Chain => '~',
            Tile::Ash => ',',
        }
    }

    /// Only open floor and opened doorways can be walked on.
    pub fn is_traversable(self) -> bool {
        matches!(self, Tile::Floor | Tile::StoneDoorOpen | Tile::WoodenDoorOpen)
    }

    /// A short noun for message text ("You search the {noun} again..").
    pub fn noun(self) -> &'static str {
        match self {
            Tile::Stone => "wall",
            Tile::Floor => "floor",
            Tile::Bookshelf => "bookshelf",
            Tile::Crate => "crate",
            Tile::SmallCrate => "small crate",
            Tile::StoneDoorClosed | Tile::StoneDoorOpen => "stone door",
            Tile::WoodenDoorClosed | Tile::WoodenDoorOpen => "wooden door",
            Tile::OpenChest => "chest",
            Tile::Table => "table",
            Tile::Chair => "chair",
            Tile::Torch => "torch",
            Tile::Chain => "chain",
            Tile::Ash => "pile of ash",
        }
    }
}

// ── Room grid ─────────────────────────────────────────────────

pub struct RoomMap {
    tiles: [[Tile; ROOM_WIDTH as usize]; ROOM_HEIGHT as usize],
}

impl RoomMap {
    /// Build the chamber layout. Solid stone, a carved-out floor area,
    /// furniture along the walls, two doors in the east wall section and
    /// the chained key mounted on the west wall.
    pub fn new() -> Self {
        let mut tiles = [[Tile::Stone; ROOM_WIDTH as usize]; ROOM_HEIGHT as usize];

        for row in tiles.iter_mut().take(8).skip(2) {
            for tile in row.iter_mut().take(21).skip(3) {
                *tile = Tile::Floor;
            }
        }

        let mut map = RoomMap { tiles };

        // Alcoves in the north and south walls, and the passage east.
        for &(x, y) in &[
            (7, 1),
            (8, 1),
            (9, 1),
            (13, 1),
            (14, 1),
            (15, 1),
            (16, 1),
            (6, 8),
            (7, 8),
            (8, 8),
            (9, 8),
            (10, 8),
            (11, 8),
            (12, 8),
            (13, 8),
            (20, 4),
            (21, 4),
            (22, 4),
        ] {
            map.set_tile(x, y, Tile::Floor);
        }

        for &(x, y) in &[
            (7, 1),
            (8, 1),
            (9, 1),
            (14, 1),
            (3, 2),
            (4, 2),
            (4, 7),
            (5, 7),
            (7, 8),
            (8, 8),
            (9, 8),
            (11, 8),
        ] {
            map.set_tile(x, y, Tile::Bookshelf);
        }

        for &(x, y) in &[(19, 2), (20, 2), (20, 6), (19, 7), (20, 7)] {
            map.set_tile(x, y, Tile::Crate);
        }
        map.set_tile(18, 2, Tile::SmallCrate);
        map.set_tile(19, 6, Tile::SmallCrate);

        for &(x, y) in &[
            (10, 4),
            (11, 4),
            (12, 4),
            (13, 4),
            (10, 5),
            (11, 5),
            (12, 5),
            (13, 5),
        ] {
            map.set_tile(x, y, Tile::Table);
        }
        map.set_tile(11, 3, Tile::Chair);
        map.set_tile(10, 6, Tile::Chair);
        map.set_tile(14, 3, Tile::Chair);

        map.set_tile(20, 3, Tile::OpenChest);
        map.set_tile(3, 5, Tile::Torch);
        map.set_tile(16, 7, Tile::Torch);
        map.set_tile(2, 4, Tile::Chain);

        let (sx, sy) = STONE_DOOR_POS;
        map.set_tile(sx, sy, Tile::StoneDoorClosed);
        let (wx, wy) = WOODEN_DOOR_POS;
        map.set_tile(wx, wy, Tile::WoodenDoorClosed);

        map
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        (0..ROOM_WIDTH).contains(&x) && (0..ROOM_HEIGHT).contains(&y)
    }

    /// Panics on out-of-bounds coordinates: every caller derives the target
    /// from the player's position, which movement keeps inside the room.
    pub fn tile_at(&self, x: i32, y: i32) -> Tile {
        self.tiles[y as usize][x as usize]
    }

    pub fn set_tile(&mut self, x: i32, y: i32, tile: Tile) {
        self.tiles[y as usize][x as usize] = tile;
    }
}

impl Default for RoomMap {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────
