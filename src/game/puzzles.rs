//! The two door puzzles as explicit state machines.
//!
//! Every transition is gated on the exact current state; anything that
//! doesn't match falls through to a no-effect result, which the verb
//! handlers translate into a neutral message. No step can be skipped and
//! nothing is accepted out of order.

use super::state::ItemKind;

// ── Stone door ────────────────────────────────────────────────

/// Strictly ordered. The only regression in the whole game is
/// [`StonePry::SpadeFallsOut`]: prying with just the spade seated drops
/// the machine back to `Untouched` (the caller returns a handle-less
/// spade to the inventory).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum StoneDoorState {
    Untouched,
    SpadeInserted,
    SulfateAdded,
    SolventAdded,
    Open,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoneUse {
    SpadeSeated,
    SulfatePoured,
    /// The reaction also pushes the player one step back from the door.
    SolventPoured,
    NoEffect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StonePry {
    /// Door opens: tile change, blackout, player steps back.
    Opens,
    /// The regression: state reverts to `Untouched`.
    SpadeFallsOut,
    DisturbIngredients,
    WontBudge,
    AlreadyOpen,
}

#[derive(Clone, Copy, Debug)]
pub struct StoneDoor {
    state: StoneDoorState,
}

impl StoneDoor {
    pub fn new() -> Self {
        Self {
            state: StoneDoorState::Untouched,
        }
    }

    pub fn state(&self) -> StoneDoorState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == StoneDoorState::Open
    }

    /// Apply an item to the door. Either spade variant seats in the hole.
    pub fn apply_item(&mut self, kind: ItemKind) -> StoneUse {
        use StoneDoorState::*;
        match (self.state, kind) {
            (Untouched, ItemKind::MetalSpade | ItemKind::SpadeNoHandle) => {
                self.state = SpadeInserted;
                StoneUse::SpadeSeated
            }
            (SpadeInserted, ItemKind::CupricSulfate) => {
                self.state = SulfateAdded;
                StoneUse::SulfatePoured
            }
            (SulfateAdded, ItemKind::DihydrogenMonoxide) => {
                self.state = SolventAdded;
                StoneUse::SolventPoured
            }
            _ => StoneUse::NoEffect,
        }
    }

    /// Pull on the seated spade.
    pub fn pry(&mut self) -> StonePry {
        use StoneDoorState::*;
        match self.state {
            SolventAdded => {
                self.state = Open;
                StonePry::Opens
            }
            SulfateAdded => StonePry::DisturbIngredients,
            SpadeInserted => {
                self.state = Untouched;
                StonePry::SpadeFallsOut
            }
            Untouched => StonePry::WontBudge,
            Open => StonePry::AlreadyOpen,
        }
    }
}

impl Default for StoneDoor {
    fn default() -> Self {
        Self::new()
    }
}

// ── Wooden door (key forging) ─────────────────────────────────

/// Triggers come from the combine recipes (pouring into the tin), from
/// using the tin on the chained key, and from using/interacting with the
/// door itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForgeTrigger {
    PourWater,
    PourGypsum,
    PressImprint,
    PourCupricPowder,
    PourTinPowder,
    HeatOres,
    PryKey,
    InsertKey,
    OpenDoor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForgeStep {
    WaterPoured { mixture_formed: bool },
    /// Special-cased refusal: nothing changes and nothing is consumed.
    WaterAlreadyPresent,
    GypsumPoured { mixture_formed: bool },
    ImprintPressed,
    ImprintAlreadyMade,
    CupricPoured,
    TinPowderPoured,
    KeyForged,
    KeyPried,
    KeyInserted,
    DoorOpened,
    NoEffect,
}

/// Partially ordered: water and gypsum accumulate in either order, as do
/// the two ore powders once the imprint exists. Everything else is a
/// strict chain. All flags are monotone.
#[derive(Clone, Copy, Debug, Default)]
pub struct WoodenDoor {
    pub water_added: bool,
    pub gypsum_added: bool,
    pub imprint_made: bool,
    pub cupric_added: bool,
    pub tin_powder_added: bool,
    pub key_complete: bool,
    pub key_pried: bool,
    pub key_inserted: bool,
    pub open: bool,
}

impl WoodenDoor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, trigger: ForgeTrigger) -> ForgeStep {
        use ForgeTrigger::*;
        match trigger {
            PourWater if self.water_added => ForgeStep::WaterAlreadyPresent,
            PourWater => {
                self.water_added = true;
                ForgeStep::WaterPoured {
                    mixture_formed: self.gypsum_added,
                }
            }
            PourGypsum if !self.gypsum_added => {
                self.gypsum_added = true;
                ForgeStep::GypsumPoured {
                    mixture_formed: self.water_added,
                }
            }
            PressImprint if self.imprint_made => ForgeStep::ImprintAlreadyMade,
            PressImprint if self.water_added && self.gypsum_added => {
                self.imprint_made = true;
                ForgeStep::ImprintPressed
            }
            PourCupricPowder if self.imprint_made && !self.cupric_added => {
                self.cupric_added = true;
                ForgeStep::CupricPoured
            }
            PourTinPowder if self.imprint_made && !self.tin_powder_added => {
                self.tin_powder_added = true;
                ForgeStep::TinPowderPoured
            }
            HeatOres if self.cupric_added && self.tin_powder_added && !self.key_complete => {
                self.key_complete = true;
                ForgeStep::KeyForged
            }
            PryKey if self.key_complete && !self.key_pried => {
                self.key_pried = true;
                ForgeStep::KeyPried
            }
            InsertKey if self.key_pried && !self.key_inserted => {
                self.key_inserted = true;
                ForgeStep::KeyInserted
            }
            OpenDoor if self.key_inserted && !self.open => {
                self.open = true;
                ForgeStep::DoorOpened
            }
            _ => ForgeStep::NoEffect,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // Stone door

    #[test]
    fn stone_door_happy_path() {
        let mut door = StoneDoor::new();
        assert_eq!(
            door.apply_item(ItemKind::MetalSpade),
            StoneUse::SpadeSeated
        );
        assert_eq!(
            door.apply_item(ItemKind::CupricSulfate),
            StoneUse::SulfatePoured
        );
        assert_eq!(
            door.apply_item(ItemKind::DihydrogenMonoxide),
            StoneUse::SolventPoured
        );
        assert_eq!(door.pry(), StonePry::Opens);
        assert!(door.is_open());
    }

    #[test]
    fn handleless_spade_also_seats() {
        let mut door = StoneDoor::new();
        assert_eq!(
            door.apply_item(ItemKind::SpadeNoHandle),
            StoneUse::SpadeSeated
        );
    }

    #[test]
    fn stone_door_rejects_every_out_of_order_application() {
        // Advance the door 0, 1 or 2 legitimate stages, then try every
        // later-stage ingredient: each must refuse and leave the state put.
        let stages = [
            ItemKind::MetalSpade,
            ItemKind::CupricSulfate,
            ItemKind::DihydrogenMonoxide,
        ];
        for advanced in 0..stages.len() {
            let mut door = StoneDoor::new();
            for &kind in stages.iter().take(advanced) {
                assert_ne!(door.apply_item(kind), StoneUse::NoEffect);
            }
            let before = door.state();
            for &kind in stages.iter().skip(advanced + 1) {
                assert_eq!(door.apply_item(kind), StoneUse::NoEffect);
                assert_eq!(door.state(), before);
            }
        }
    }

    #[test]
    fn unrelated_items_never_advance_the_stone_door() {
        let mut door = StoneDoor::new();
        for kind in [ItemKind::Knife, ItemKind::Magnet, ItemKind::SodiumChloride] {
            assert_eq!(door.apply_item(kind), StoneUse::NoEffect);
            assert_eq!(door.state(), StoneDoorState::Untouched);
        }
    }

    #[test]
    fn prying_with_only_the_spade_regresses() {
        let mut door = StoneDoor::new();
        door.apply_item(ItemKind::MetalSpade);
        assert_eq!(door.pry(), StonePry::SpadeFallsOut);
        assert_eq!(door.state(), StoneDoorState::Untouched);
        // The spade can be seated again afterwards.
        assert_eq!(
            door.apply_item(ItemKind::SpadeNoHandle),
            StoneUse::SpadeSeated
        );
    }

    #[test]
    fn prying_refusals_by_state() {
        let mut door = StoneDoor::new();
        assert_eq!(door.pry(), StonePry::WontBudge);

        door.apply_item(ItemKind::MetalSpade);
        door.apply_item(ItemKind::CupricSulfate);
        assert_eq!(door.pry(), StonePry::DisturbIngredients);
        assert_eq!(door.state(), StoneDoorState::SulfateAdded);

        door.apply_item(ItemKind::DihydrogenMonoxide);
        assert_eq!(door.pry(), StonePry::Opens);
        assert_eq!(door.pry(), StonePry::AlreadyOpen);
    }

    // Wooden door

    fn forged_to_imprint() -> WoodenDoor {
        let mut door = WoodenDoor::new();
        door.apply(ForgeTrigger::PourWater);
        door.apply(ForgeTrigger::PourGypsum);
        door.apply(ForgeTrigger::PressImprint);
        door
    }

    #[test]
    fn precursors_accumulate_in_either_order() {
        let mut a = WoodenDoor::new();
        assert_eq!(
            a.apply(ForgeTrigger::PourWater),
            ForgeStep::WaterPoured {
                mixture_formed: false
            }
        );
        assert_eq!(
            a.apply(ForgeTrigger::PourGypsum),
            ForgeStep::GypsumPoured {
                mixture_formed: true
            }
        );

        let mut b = WoodenDoor::new();
        assert_eq!(
            b.apply(ForgeTrigger::PourGypsum),
            ForgeStep::GypsumPoured {
                mixture_formed: false
            }
        );
        assert_eq!(
            b.apply(ForgeTrigger::PourWater),
            ForgeStep::WaterPoured {
                mixture_formed: true
            }
        );

        for door in [&mut a, &mut b] {
            assert_eq!(door.apply(ForgeTrigger::PressImprint), ForgeStep::ImprintPressed);
        }
    }

    #[test]
    fn water_twice_is_a_dedicated_refusal() {
        let mut door = WoodenDoor::new();
        door.apply(ForgeTrigger::PourWater);
        assert_eq!(
            door.apply(ForgeTrigger::PourWater),
            ForgeStep::WaterAlreadyPresent
        );
    }

    #[test]
    fn imprint_requires_both_precursors() {
        let mut door = WoodenDoor::new();
        assert_eq!(door.apply(ForgeTrigger::PressImprint), ForgeStep::NoEffect);
        door.apply(ForgeTrigger::PourWater);
        assert_eq!(door.apply(ForgeTrigger::PressImprint), ForgeStep::NoEffect);
        door.apply(ForgeTrigger::PourGypsum);
        assert_eq!(door.apply(ForgeTrigger::PressImprint), ForgeStep::ImprintPressed);
        assert_eq!(
            door.apply(ForgeTrigger::PressImprint),
            ForgeStep::ImprintAlreadyMade
        );
    }

    #[test]
    fn powders_require_the_imprint() {
        let mut door = WoodenDoor::new();
        assert_eq!(door.apply(ForgeTrigger::PourCupricPowder), ForgeStep::NoEffect);
        assert_eq!(door.apply(ForgeTrigger::PourTinPowder), ForgeStep::NoEffect);

        let mut door = forged_to_imprint();
        assert_eq!(
            door.apply(ForgeTrigger::PourTinPowder),
            ForgeStep::TinPowderPoured
        );
        assert_eq!(
            door.apply(ForgeTrigger::PourCupricPowder),
            ForgeStep::CupricPoured
        );
    }

    #[test]
    fn heating_requires_both_powders() {
        let mut door = forged_to_imprint();
        assert_eq!(door.apply(ForgeTrigger::HeatOres), ForgeStep::NoEffect);
        door.apply(ForgeTrigger::PourCupricPowder);
        assert_eq!(door.apply(ForgeTrigger::HeatOres), ForgeStep::NoEffect);
        door.apply(ForgeTrigger::PourTinPowder);
        assert_eq!(door.apply(ForgeTrigger::HeatOres), ForgeStep::KeyForged);
        // Heating again does nothing further.
        assert_eq!(door.apply(ForgeTrigger::HeatOres), ForgeStep::NoEffect);
    }

    #[test]
    fn key_chain_to_open_door() {
        let mut door = forged_to_imprint();
        door.apply(ForgeTrigger::PourCupricPowder);
        door.apply(ForgeTrigger::PourTinPowder);

        // Prying and inserting are refused until their preconditions hold.
        assert_eq!(door.apply(ForgeTrigger::PryKey), ForgeStep::NoEffect);
        assert_eq!(door.apply(ForgeTrigger::InsertKey), ForgeStep::NoEffect);
        assert_eq!(door.apply(ForgeTrigger::OpenDoor), ForgeStep::NoEffect);

        door.apply(ForgeTrigger::HeatOres);
        assert_eq!(door.apply(ForgeTrigger::PryKey), ForgeStep::KeyPried);
        assert_eq!(door.apply(ForgeTrigger::InsertKey), ForgeStep::KeyInserted);
        assert_eq!(door.apply(ForgeTrigger::InsertKey), ForgeStep::NoEffect);
        assert_eq!(door.apply(ForgeTrigger::OpenDoor), ForgeStep::DoorOpened);
        assert!(door.open);
    }
}
