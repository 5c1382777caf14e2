//! Independent verification of solved placements. The checks work directly on item positions and
//! do not look at the propositional model, so they catch mistakes in the encoding as well as in
//! solution extraction.

use itertools::Itertools;
use thiserror::Error;

use crate::basic_types::ItemId;
use crate::basic_types::ItemTable;
use crate::basic_types::Placement;

/// The first property a placement was found to violate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementViolation {
    #[error("item {0} has no position")]
    Unplaced(ItemId),

    #[error("the placement does not cover item {0}")]
    UnknownItem(ItemId),

    #[error("item {item} at position {position} with width {width} exceeds capacity {capacity}")]
    OutOfBounds {
        item: ItemId,
        position: u32,
        width: u32,
        capacity: u32,
    },

    #[error("items {first} and {second} overlap")]
    Overlap { first: ItemId, second: ItemId },

    #[error("items {first} and {second} share a category but are adjacent")]
    Adjacent { first: ItemId, second: ItemId },

    #[error("the items occupy {occupied} slots but the reported used width is {used}")]
    WidthMismatch { occupied: u32, used: u32 },
}

/// Check that `placement` positions every item of `items` within `capacity` slots, with no two
/// items overlapping and same-category items at least one slot apart on every shared day.
pub fn verify_placement(
    items: &ItemTable,
    capacity: u32,
    placement: &Placement,
) -> Result<(), PlacementViolation> {
    let mut placed = Vec::with_capacity(items.len());

    for item in items.items() {
        if !placement.positions().any(|(id, _)| id == item.id) {
            return Err(PlacementViolation::UnknownItem(item.id));
        }

        let position = placement
            .position_of(item.id)
            .ok_or(PlacementViolation::Unplaced(item.id))?;

        if position + item.width > capacity {
            return Err(PlacementViolation::OutOfBounds {
                item: item.id,
                position,
                width: item.width,
                capacity,
            });
        }

        placed.push((item, position));
    }

    for (&(first, first_position), &(second, second_position)) in
        placed.iter().tuple_combinations()
    {
        if !first.overlaps_in_time(second) {
            continue;
        }

        let first_end = first_position + first.width;
        let second_end = second_position + second.width;

        if first_position < second_end && second_position < first_end {
            return Err(PlacementViolation::Overlap {
                first: first.id,
                second: second.id,
            });
        }

        if first.category == second.category
            && (first_end == second_position || second_end == first_position)
        {
            return Err(PlacementViolation::Adjacent {
                first: first.id,
                second: second.id,
            });
        }
    }

    let occupied = placement.occupied_width(items);
    if occupied > placement.used_width() {
        return Err(PlacementViolation::WidthMismatch {
            occupied,
            used: placement.used_width(),
        });
    }

    Ok(())
}
