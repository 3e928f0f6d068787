//! Verb handlers and the scene/turn controller.
//!
//! Every handler takes the [`Session`] by exclusive reference, mutates it,
//! and leaves a message behind. Failed preconditions never produce errors:
//! the world always answers with flavor text and stays valid.

use super::events::{advance, AmbientEvent};
use super::items::ItemId;
use super::map::{
    Tile, ESCAPE_POS, STONE_DOOR_POS, STONE_DOOR_SLIDE_POS, WOODEN_DOOR_POS,
};
use super::puzzles::{ForgeStep, ForgeTrigger, StonePry, StoneUse};
use super::state::{
    item_info, Input, ItemKind, Scene, Session, Verb, INTRO_PAGES, MENU_OPTIONS, OUTRO_PAGES,
};

const MSG_NOTHING: &str = "Nothing interesting happens.";
const MSG_NO_REASON: &str = "You don't have a reason to do that.";

// ── Top-level dispatch ────────────────────────────────────────

pub fn handle_input(s: &mut Session, input: Input) {
    match s.scene {
        Scene::MainMenu => main_menu_input(s, input),
        Scene::Intro(step) => intro_input(s, step, input),
        Scene::Play => play_input(s, input),
        Scene::Controls => controls_input(s, input),
        Scene::Outro(step) => outro_input(s, step, input),
        Scene::Quit => {}
    }
}

// ── Menu / narrative scenes ───────────────────────────────────

fn main_menu_input(s: &mut Session, input: Input) {
    match input {
        Input::Up => s.menu_selected = s.menu_selected.saturating_sub(1),
        Input::Down => {
            s.menu_selected = (s.menu_selected + 1).min(MENU_OPTIONS.len() - 1);
        }
        Input::Confirm => match s.menu_selected {
            0 => s.scene = Scene::Intro(0),
            1 => s.scene = Scene::Controls,
            _ => s.scene = Scene::Quit,
        },
        _ => {}
    }
}

fn intro_input(s: &mut Session, step: u8, input: Input) {
    match input {
        Input::Confirm => {
            if step + 1 >= INTRO_PAGES {
                s.scene = Scene::Play;
            } else {
                s.scene = Scene::Intro(step + 1);
            }
        }
        Input::Skip => s.scene = Scene::Play,
        _ => {}
    }
}

fn controls_input(s: &mut Session, input: Input) {
    if matches!(input, Input::Confirm | Input::Skip) {
        s.scene = Scene::MainMenu;
    }
}

fn outro_input(s: &mut Session, step: u8, input: Input) {
    match input {
        Input::Confirm if step + 1 < OUTRO_PAGES => s.scene = Scene::Outro(step + 1),
        Input::Confirm | Input::Skip => *s = Session::new(),
        _ => {}
    }
}

// ── Play ──────────────────────────────────────────────────────

fn play_input(s: &mut Session, input: Input) {
    if input == Input::Quit {
        // Back to the title with a full world reset.
        *s = Session::new();
        return;
    }

    s.message.clear();

    if s.player.inventory_open {
        inventory_input(s, input);
    } else if let Some(verb) = s.player.pending.take() {
        resolve_verb(s, verb, input);
        s.player.turn += 1;
    } else {
        explore_input(s, input);
    }

    advance(&mut s.ambient);

    if (s.player.x, s.player.y) == ESCAPE_POS {
        s.scene = Scene::Outro(0);
    }
}

fn explore_input(s: &mut Session, input: Input) {
    match input {
        Input::Up => try_move(s, 0, -1),
        Input::Down => try_move(s, 0, 1),
        Input::Left => try_move(s, -1, 0),
        Input::Right => try_move(s, 1, 0),
        Input::UseItem => {
            if s.items.inventory_count() == 0 {
                s.set_message("You don't have anything to use.");
            } else {
                s.set_message("Where do you want to use the item?");
                s.player.pending = Some(Verb::UseItem);
            }
        }
        Input::PickUp => {
            s.set_message("What do you want to pick up?");
            s.player.pending = Some(Verb::PickUp);
        }
        Input::Interact => {
            s.set_message("What do you want to interact with?");
            s.player.pending = Some(Verb::Interact);
        }
        Input::Inspect => {
            s.set_message("What do you want to inspect?");
            s.player.pending = Some(Verb::Inspect);
        }
        Input::ToggleInventory => {
            if s.items.inventory_count() == 0 {
                s.set_message("You aren't carrying anything.");
            } else {
                s.player.inventory_open = true;
                s.player.inventory_cursor = 0;
            }
        }
        Input::Combine | Input::Confirm | Input::Skip | Input::Quit => {}
    }
}

fn try_move(s: &mut Session, dx: i32, dy: i32) {
    let nx = s.player.x + dx;
    let ny = s.player.y + dy;
    if s.map.contains(nx, ny) && s.map.tile_at(nx, ny).is_traversable() {
        s.player.x = nx;
        s.player.y = ny;
        s.player.turn += 1;
    }
}

// ── Inventory mode ────────────────────────────────────────────

fn inventory_input(s: &mut Session, input: Input) {
    let count = s.items.inventory_count();
    match input {
        Input::ToggleInventory => {
            s.player.inventory_open = false;
            s.player.inventory_cursor = 0;
            s.player.combine_first = None;
        }
        Input::Up => {
            s.player.inventory_cursor = if s.player.inventory_cursor == 0 {
                count - 1
            } else {
                s.player.inventory_cursor - 1
            };
        }
        Input::Down => {
            s.player.inventory_cursor = if s.player.inventory_cursor + 1 >= count {
                0
            } else {
                s.player.inventory_cursor + 1
            };
        }
        Input::Right => drop_selected(s),
        Input::Combine => combine_select(s),
        _ => {}
    }
}

fn drop_selected(s: &mut Session) {
    let slot = s.player.inventory_cursor;
    let Some(item) = s.items.item_in_slot(slot) else {
        return;
    };
    let (id, kind) = (item.id, item.kind);
    s.items.drop_at(id, s.player.x, s.player.y);
    s.set_message(format!("You drop the {}.", item_info(kind).name));

    s.player.combine_first = None;
    let count = s.items.inventory_count();
    if count == 0 {
        s.player.inventory_open = false;
        s.player.inventory_cursor = 0;
    } else if s.player.inventory_cursor >= count {
        s.player.inventory_cursor = count - 1;
    }
}

fn combine_select(s: &mut Session) {
    let cursor = s.player.inventory_cursor;
    match s.player.combine_first {
        None => s.player.combine_first = Some(cursor),
        Some(first) if first == cursor => {
            // Combining an item with itself never does anything.
            s.set_message(MSG_NOTHING);
            s.player.combine_first = None;
        }
        Some(first) => {
            s.player.combine_first = None;
            combine(s, first, cursor);
        }
    }
}

/// Pairwise recipe lookup, symmetric in its two inputs. A successful
/// recipe consumes exactly what it names; everything else is a no-op.
fn combine(s: &mut Session, slot_a: usize, slot_b: usize) {
    let (Some(a), Some(b)) = (s.items.item_in_slot(slot_a), s.items.item_in_slot(slot_b))
    else {
        s.set_message(MSG_NOTHING);
        return;
    };
    let (id_a, ka) = (a.id, a.kind);
    let (id_b, kb) = (b.id, b.kind);

    let pair = |x: ItemKind, y: ItemKind| (ka == x && kb == y) || (ka == y && kb == x);
    let id_of = |kind: ItemKind| -> ItemId {
        if ka == kind {
            id_a
        } else {
            id_b
        }
    };

    if pair(ItemKind::MetalSpade, ItemKind::BunsenBurner) {
        s.set_message(
            "You use the bunsen burner to burn the handle away from the spade..\n  \
             You are left with a metal spade that has no handle.",
        );
        s.items.remove(id_of(ItemKind::MetalSpade));
        let _ = s.items.spawn_in_inventory(ItemKind::SpadeNoHandle);
    } else if pair(ItemKind::Tin, ItemKind::DihydrogenMonoxide) {
        match s.wooden_door.apply(ForgeTrigger::PourWater) {
            ForgeStep::WaterPoured { mixture_formed } => {
                if mixture_formed {
                    s.set_message(
                        "You pour the dihydrogen monoxide in the tin..\n  \
                         The result is a lumpy white mixture.",
                    );
                } else {
                    s.set_message("You pour the dihydrogen monoxide in the tin..");
                }
                s.items.remove(id_of(ItemKind::DihydrogenMonoxide));
            }
            ForgeStep::WaterAlreadyPresent => {
                s.set_message("There's already some dihydrogen monoxide in the tin.");
            }
            _ => s.set_message(MSG_NOTHING),
        }
    } else if pair(ItemKind::Tin, ItemKind::Gypsum) {
        match s.wooden_door.apply(ForgeTrigger::PourGypsum) {
            ForgeStep::GypsumPoured { mixture_formed } => {
                if mixture_formed {
                    s.set_message(
                        "You pour the gypsum in the tin..\n  \
                         The result is a lumpy white mixture.",
                    );
                } else {
                    s.set_message("You pour the gypsum in the tin.");
                }
                s.items.remove(id_of(ItemKind::Gypsum));
            }
            _ => s.set_message(MSG_NOTHING),
        }
    } else if pair(ItemKind::Tin, ItemKind::CupricOrePowder) {
        match s.wooden_door.apply(ForgeTrigger::PourCupricPowder) {
            ForgeStep::CupricPoured => {
                s.set_message("You pour the cupric ore powder into the impression of the key.");
                s.items.remove(id_of(ItemKind::CupricOrePowder));
            }
            _ => s.set_message(MSG_NOTHING),
        }
    } else if pair(ItemKind::Tin, ItemKind::TinOrePowder) {
        match s.wooden_door.apply(ForgeTrigger::PourTinPowder) {
            ForgeStep::TinPowderPoured => {
                s.set_message("You pour the tin ore powder into the impression of the key.");
                s.items.remove(id_of(ItemKind::TinOrePowder));
            }
            _ => s.set_message(MSG_NOTHING),
        }
    } else if pair(ItemKind::Tin, ItemKind::BunsenBurner) {
        match s.wooden_door.apply(ForgeTrigger::HeatOres) {
            ForgeStep::KeyForged => {
                s.set_message(
                    "You heat the two powdered ores together in the tin..\n  \
                     You make a duplicate of the key in bronze.\n  \
                     Now you need to pry it out of the tin somehow.",
                );
            }
            _ => s.set_message(MSG_NOTHING),
        }
    } else if pair(ItemKind::Tin, ItemKind::Knife) {
        match s.wooden_door.apply(ForgeTrigger::PryKey) {
            ForgeStep::KeyPried => {
                s.set_message("You pry the duplicate bronze key out of the tin.");
                let _ = s.items.spawn_in_inventory(ItemKind::BronzeKey);
            }
            _ => s.set_message(MSG_NOTHING),
        }
    } else {
        s.set_message(MSG_NOTHING);
    }
}

// ── Verb resolution ───────────────────────────────────────────

fn resolve_verb(s: &mut Session, verb: Verb, input: Input) {
    // A non-directional input resolves on the player's own tile.
    let (dx, dy) = match input {
        Input::Up => (0, -1),
        Input::Down => (0, 1),
        Input::Left => (-1, 0),
        Input::Right => (1, 0),
        _ => (0, 0),
    };
    let (tx, ty) = (s.player.x + dx, s.player.y + dy);

    match verb {
        Verb::PickUp => pick_up(s, tx, ty),
        Verb::Interact => interact(s, tx, ty),
        Verb::Inspect => inspect(s, tx, ty),
        Verb::UseItem => use_item(s, tx, ty),
    }
}

fn pick_up(s: &mut Session, x: i32, y: i32) {
    if let Some(item) = s.items.ground_item_at(x, y) {
        let (id, kind) = (item.id, item.kind);
        s.set_message(format!("You pick up the {}.", item_info(kind).name));
        s.items.move_to_inventory(id);
        return;
    }

    let text = match s.map.tile_at(x, y) {
        Tile::Stone => "Perhaps if I were Hercules..",
        Tile::Floor => "There's nothing there to pick up.",
        Tile::Bookshelf => "It would probably break and collapse on me if I moved it too much.",
        Tile::Crate | Tile::SmallCrate | Tile::OpenChest => {
            "Might be a good workout but hardly a priority."
        }
        Tile::StoneDoorClosed | Tile::WoodenDoorClosed => "If only it was that simple..",
        _ => "You don't see any reason to pick that up.",
    };
    s.set_message(text);
}

fn interact(s: &mut Session, x: i32, y: i32) {
    if let Some(idx) = s.searchable_index_at(x, y) {
        if s.searchables[idx].searched {
            let noun = s.map.tile_at(x, y).noun();
            s.set_message(format!(
                "You search the {} again..\n  You don't find anything interesting.",
                noun
            ));
        } else {
            search(s, idx);
        }
        return;
    }

    match s.map.tile_at(x, y) {
        Tile::StoneDoorClosed => match s.stone_door.pry() {
            StonePry::Opens => {
                s.set_message(
                    "You pull on the spade..\n  \
                     It doesn't seem to budge so you pull hard on it..\n  \
                     The door slowly opens, then every torch in the room gutters out!",
                );
                let (gx, gy) = STONE_DOOR_SLIDE_POS;
                s.map.set_tile(gx, gy, Tile::StoneDoorOpen);
                let (dx, dy) = STONE_DOOR_POS;
                s.map.set_tile(dx, dy, Tile::Floor);
                s.player.x -= 1;
                s.ambient = Some(AmbientEvent::blackout());
            }
            StonePry::DisturbIngredients => {
                s.set_message("Probably shouldn't move the spade because of the ingredients on it.");
            }
            StonePry::SpadeFallsOut => {
                s.set_message(
                    "You try to open the door using the spade as leverage..\n  \
                     The spade falls out since there's nothing actually holding it in place.",
                );
                let _ = s.items.spawn_in_inventory(ItemKind::SpadeNoHandle);
            }
            StonePry::WontBudge => s.set_message("The door won't budge."),
            StonePry::AlreadyOpen => s.set_message("You already opened it."),
        },
        Tile::WoodenDoorClosed => match s.wooden_door.apply(ForgeTrigger::OpenDoor) {
            ForgeStep::DoorOpened => {
                s.set_message(
                    "You twist the bronze key in the lock..\n  \
                     The door becomes unlocked and you open it.",
                );
                let (wx, wy) = WOODEN_DOOR_POS;
                s.map.set_tile(wx, wy, Tile::WoodenDoorOpen);
            }
            _ => s.set_message("The door won't budge."),
        },
        Tile::Bookshelf => {
            s.set_message("You search the bookshelf..\n  you find nothing useful.");
        }
        Tile::Crate => s.set_message("You search the crate..\n  you find nothing useful."),
        Tile::SmallCrate => {
            s.set_message("You search the small crate..\n  you find nothing useful.");
        }
        Tile::OpenChest => s.set_message("There's nothing in there."),
        Tile::Table => {
            s.set_message(
                "You look under the table..\n  \
                 nothing but rocks, dust and worms crawling around.",
            );
        }
        Tile::Chair => {
            s.set_message("Just an ordinary chair, except it looks old as hell and beat up.");
        }
        Tile::Chain => {
            s.set_message("You don't see a way of getting the key because of the chain.");
        }
        Tile::StoneDoorOpen | Tile::WoodenDoorOpen => s.set_message("You already opened it."),
        _ => s.set_message("You don't see anything to do here."),
    }
}

fn search(s: &mut Session, idx: usize) {
    let kinds = s.searchables[idx].loot_kinds();
    s.searchables[idx].searched = true;

    for &kind in &kinds {
        // A full arena silently yields nothing, never an error.
        let _ = s.items.spawn_in_inventory(kind);
    }

    let names: Vec<&str> = kinds.iter().map(|&k| item_info(k).name).collect();
    let text = match names.len() {
        1 => format!(
            "You start searching..\n  you find something:\n  {}.",
            names[0]
        ),
        2 => format!(
            "You start searching..\n  you find a couple things:\n  {},\n  {}.",
            names[0], names[1]
        ),
        _ => format!(
            "You start searching..\n  you find multiple things:\n  {},\n  {},\n  {}.",
            names[0], names[1], names[2]
        ),
    };
    s.set_message(text);
}

fn inspect(s: &mut Session, x: i32, y: i32) {
    if let Some(item) = s.items.ground_item_at(x, y) {
        let text = item_description(s, item.kind);
        s.set_message(text);
        return;
    }

    let text = match s.map.tile_at(x, y) {
        Tile::Stone => "A stone surface, looks old and covered in moss.".to_string(),
        Tile::Floor => "An uneven stone floor.".to_string(),
        Tile::Bookshelf => {
            "A tall old bookshelf with some haphazardly placed books in it.".to_string()
        }
        Tile::Crate => "A large wooden crate.".to_string(),
        Tile::SmallCrate => "A small wooden crate.".to_string(),
        Tile::OpenChest => {
            "A wooden chest that's already open, it's completely empty.".to_string()
        }
        Tile::Table => {
            "A worn down rickety table with text and markings all over it.".to_string()
        }
        Tile::Chair => {
            "A chair exactly like the other ones in this room..\n  \
             Some are missing their legs."
                .to_string()
        }
        Tile::Torch => "A torch on the wall, it burns very dimly.".to_string(),
        Tile::Chain => {
            "A stone surface with a big chain hanging from it all the way down to the ground..\n  \
             There's a bronze key at the end of the chain."
                .to_string()
        }
        Tile::Ash => "A pile of ash, still faintly warm.".to_string(),
        Tile::StoneDoorOpen => "It's the stone door but it's wide open this time.".to_string(),
        Tile::WoodenDoorOpen => "It's the wooden door but it's wide open this time.".to_string(),
        Tile::WoodenDoorClosed => {
            if s.wooden_door.key_inserted {
                "A door made out of wood..\n  It's got a bronze key inserted.".to_string()
            } else {
                "A door made out of wood..\n  It's got a lock on it with a keyhole.".to_string()
            }
        }
        Tile::StoneDoorClosed => {
            use super::puzzles::StoneDoorState::*;
            match s.stone_door.state() {
                SolventAdded | Open => "The spade is warm and has slightly expanded.".to_string(),
                SulfateAdded => "The spade has cupric sulfate on it.".to_string(),
                SpadeInserted => "The spade is sticking out of the hole in the door.".to_string(),
                Untouched => {
                    "A door but it's thick and made out of stone!\n  \
                     It seems to have a hole in it that doesn't fully go through."
                        .to_string()
                }
            }
        }
    };
    s.set_message(text);
}

fn item_description(s: &Session, kind: ItemKind) -> String {
    match kind {
        ItemKind::MetalSpade => "A metal spade, it's got a wooden handle to it.".to_string(),
        ItemKind::SpadeNoHandle => "A metal spade, it has no handle to it.".to_string(),
        ItemKind::Knife => {
            "A rugged looking knife, I wonder what I could do with this.".to_string()
        }
        ItemKind::Magnet => "A curved magnet.".to_string(),
        ItemKind::BunsenBurner => "A bunsen burner, good for combusting things.".to_string(),
        ItemKind::BronzeKey => "A bronze key, still a little warm.".to_string(),
        ItemKind::Tin => tin_description(s),
        ItemKind::EmptyVial => "It's a glass vial but it's empty.".to_string(),
        ItemKind::DihydrogenMonoxide => {
            "A vial filled with clear blue liquid.\n  \
             It has a label that says \"Dihydrogen Monoxide\"."
                .to_string()
        }
        ItemKind::CupricOrePowder => {
            "A vial filled with orange liquid.\n  \
             It has a label that says \"Powdered Cupric Ore\"."
                .to_string()
        }
        ItemKind::TinOrePowder => {
            "A vial filled with dark liquid.\n  \
             It has a label that says \"Powdered Tin Ore\"."
                .to_string()
        }
        ItemKind::SodiumChloride => {
            "A vial filled with white substance.\n  \
             It has a label that says \"Sodium Chloride\"."
                .to_string()
        }
        ItemKind::Gypsum => {
            "A vial filled with gray liquid.\n  It has a label that says \"Gypsum\".".to_string()
        }
        ItemKind::CupricSulfate => {
            "A vial filled with white substance.\n  \
             It has a label that says \"Cupric Sulfate\"."
                .to_string()
        }
        ItemKind::AceticAcid => {
            "A vial filled with liquid that's dark green.\n  \
             It has a label that says \"Acetic Acid\"."
                .to_string()
        }
    }
}

/// The tin container's description tracks the key-forging progress.
fn tin_description(s: &Session) -> String {
    let d = &s.wooden_door;
    let tail = if d.key_complete {
        "There's a bronze key in the imprint."
    } else if d.cupric_added && d.tin_powder_added {
        "The key imprint has cupric and tin ore powder in it."
    } else if d.cupric_added {
        "The key imprint has cupric ore powder in it."
    } else if d.tin_powder_added {
        "The key imprint has tin ore powder in it."
    } else if d.imprint_made {
        "It's filled with a lumpy white mixture that has an imprint of a key."
    } else if d.gypsum_added && d.water_added {
        "It's filled with a lumpy white mixture."
    } else if d.gypsum_added {
        "It has gypsum in it."
    } else if d.water_added {
        "It has dihydrogen monoxide in it."
    } else {
        return "A round container made out of tin.".to_string();
    };
    format!("A round container made out of tin..\n  {}", tail)
}

fn use_item(s: &mut Session, x: i32, y: i32) {
    let slot = s.player.inventory_cursor;
    let Some(item) = s.items.item_in_slot(slot) else {
        s.set_message("There's nothing to use in that inventory slot.");
        return;
    };
    let (id, kind) = (item.id, item.kind);

    match s.map.tile_at(x, y) {
        Tile::StoneDoorClosed | Tile::StoneDoorOpen => match s.stone_door.apply_item(kind) {
            StoneUse::SpadeSeated => {
                s.set_message(
                    "You push the other end of the spade in the hole..\n  It fits quite nicely.",
                );
                s.items.remove(id);
            }
            StoneUse::SulfatePoured => {
                s.set_message("You pour the cupric sulfate onto the flat part of the spade.");
                s.items.remove(id);
            }
            StoneUse::SolventPoured => {
                s.set_message(
                    "You pour the dihydrogen monoxide onto the cupric sulfate..\n  \
                     There's a reaction, you step back..\n  \
                     The spade gets hotter and expands a little.",
                );
                s.items.remove(id);
                s.player.x -= 1;
            }
            StoneUse::NoEffect => s.set_message(MSG_NO_REASON),
        },
        Tile::Chain => {
            if kind == ItemKind::Tin {
                match s.wooden_door.apply(ForgeTrigger::PressImprint) {
                    ForgeStep::ImprintPressed => {
                        s.set_message(
                            "You make an impression of the key in the white mixture \
                             as it hardens.",
                        );
                    }
                    ForgeStep::ImprintAlreadyMade => {
                        s.set_message("You already made an imprint of the key.");
                    }
                    _ => s.set_message(MSG_NO_REASON),
                }
            } else {
                s.set_message(MSG_NO_REASON);
            }
        }
        Tile::WoodenDoorClosed => {
            if kind == ItemKind::BronzeKey {
                match s.wooden_door.apply(ForgeTrigger::InsertKey) {
                    ForgeStep::KeyInserted => {
                        s.set_message(
                            "You insert the duplicate key and twist it..\n  \
                             You hear a loud click and the door is unlocked.",
                        );
                        s.items.remove(id);
                    }
                    _ => s.set_message(MSG_NOTHING),
                }
            } else {
                s.set_message(MSG_NOTHING);
            }
        }
        Tile::Chair if kind == ItemKind::BunsenBurner => burn_tile(s, x, y, "chair"),
        Tile::OpenChest if kind == ItemKind::BunsenBurner => burn_tile(s, x, y, "chest"),
        Tile::Table if kind == ItemKind::BunsenBurner => {
            if s.items.ground_item_at(x, y).is_some() {
                s.set_message("There's something sitting on the table.. better not set it alight.");
            } else {
                burn_tile(s, x, y, "table");
            }
        }
        Tile::Bookshelf | Tile::Crate | Tile::SmallCrate if kind == ItemKind::BunsenBurner => {
            s.set_message(
                "The fire would spread to the whole room in no time..\n  \
                 you don't want to risk it.",
            );
        }
        _ => s.set_message(MSG_NOTHING),
    }
}

fn burn_tile(s: &mut Session, x: i32, y: i32, noun: &str) {
    s.set_message(format!(
        "You hold the burner's flame against the {}..\n  \
         the dry wood catches and burns down to a pile of ash.",
        noun
    ));
    s.map.set_tile(x, y, Tile::Ash);
}

// ── Tests ─────────────────────────────────────────────────────
