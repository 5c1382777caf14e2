use super::Item;
use super::ItemId;
use super::ItemTable;

/// A solved assignment of start offsets to items, together with the width it was reported to
/// use.
///
/// Positions are stored in the order of the [`ItemTable`] the placement was extracted for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    positions: Vec<(ItemId, Option<u32>)>,
    used_width: u32,
}

impl Placement {
    pub fn new(positions: Vec<(ItemId, Option<u32>)>, used_width: u32) -> Placement {
        crate::planner_assert_simple!(
            positions.windows(2).all(|pair| pair[0].0 < pair[1].0),
            "Positions must be ordered by item id."
        );

        Placement {
            positions,
            used_width,
        }
    }

    /// The number of leading slots which are not disabled by the capacity bound.
    pub fn used_width(&self) -> u32 {
        self.used_width
    }

    pub fn position_of(&self, id: ItemId) -> Option<u32> {
        self.positions
            .binary_search_by_key(&id, |&(item_id, _)| item_id)
            .ok()
            .and_then(|index| self.positions[index].1)
    }

    pub fn positions(&self) -> impl Iterator<Item = (ItemId, Option<u32>)> + '_ {
        self.positions.iter().copied()
    }

    /// Whether every item received an offset.
    pub fn is_complete(&self) -> bool {
        self.positions.iter().all(|(_, position)| position.is_some())
    }

    /// The highest slot boundary actually covered by any item, which never exceeds
    /// [`Placement::used_width`].
    pub fn occupied_width(&self, items: &ItemTable) -> u32 {
        self.placed_items(items)
            .map(|(item, position)| position + item.width)
            .max()
            .unwrap_or(0)
    }

    /// The placed items paired with their offsets.
    pub fn placed_items<'a>(
        &'a self,
        items: &'a ItemTable,
    ) -> impl Iterator<Item = (&'a Item, u32)> + 'a {
        items
            .items()
            .iter()
            .filter_map(move |item| self.position_of(item.id).map(|position| (item, position)))
    }
}
