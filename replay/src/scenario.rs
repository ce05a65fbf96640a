use containers::Slot;

/// One replay run: the state at `start_slot` followed by `count` slots.
///
/// Slots past `u64::MAX` do not exist, so a range reaching it is cut short.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scenario {
    pub title: &'static str,
    pub summary: &'static str,
    pub start_slot: Slot,
    pub count: u64,
}

impl Scenario {
    pub const fn new(title: &'static str, summary: &'static str, start_slot: u64, count: u64) -> Self {
        Self {
            title,
            summary,
            start_slot: Slot(start_slot),
            count,
        }
    }

    /// Slots whose blocks are applied, in order.
    pub fn slots(&self) -> impl Iterator<Item = Slot> {
        let start = self.start_slot.0;
        (1..=self.count).map_while(move |offset| start.checked_add(offset).map(Slot))
    }

    pub fn last_slot(&self) -> Slot {
        Slot(self.start_slot.0.saturating_add(self.count))
    }
}

pub const USECASES: [Scenario; 4] = [
    Scenario::new(
        "phase0 blocks",
        "phase0 state with phase0 blocks, never reaching the fork",
        320,
        64,
    ),
    Scenario::new(
        "phase0 to altair",
        "last phase0 state, the upgrade at the fork slot, then altair blocks",
        2_375_679,
        64,
    ),
    Scenario::new(
        "altair from the fork slot",
        "altair state loaded at the first altair slot with altair blocks",
        2_375_680,
        64,
    ),
    Scenario::new(
        "altair blocks",
        "altair state well after the fork with altair blocks",
        2_880_000,
        64,
    ),
];
