use log::debug;

use super::at_most_one;
use super::exactly_one;
use super::ClauseEmitter;
use crate::basic_types::Category;
use crate::basic_types::ClauseSink;
use crate::basic_types::Item;
use crate::basic_types::ItemTable;
use crate::basic_types::Literal;
use crate::basic_types::Placement;
use crate::basic_types::VariableAllocator;
use crate::engine::EngineError;
use crate::engine::SatEngine;
use crate::result::PlanResult;

/// The propositional model of a storage planning problem.
///
/// For every item there is one placement literal per start offset, of which exactly one holds.
/// On top of that, the model has a chain of `capacity` limit literals in which `limit[i]` implies
/// `limit[i + 1]`; a true `limit[i]` disables slot `i` and, through the chain, every slot above
/// it. Every (day, slot) cell may be claimed by at most one of: the limit literal of the slot and
/// the placement literals of items covering the cell. Items sharing a category additionally
/// claim the slot directly after their block, which keeps them one slot apart.
///
/// The clauses are emitted in a fixed order (items by ascending id, then days, then slots), so
/// the same input always yields the same numbering and the same clause sequence.
#[derive(Debug)]
pub struct StorageModel {
    capacity: u32,
    placements: Vec<Vec<Literal>>,
    limits: Vec<Literal>,
    allocator: VariableAllocator,
    num_clauses: usize,
}

impl StorageModel {
    /// Validate `items` against `capacity` and emit the full model into `sink`. Nothing is
    /// allocated or emitted when the input is malformed.
    pub fn encode<Sink: ClauseSink>(
        items: &ItemTable,
        capacity: u32,
        sink: &mut Sink,
    ) -> PlanResult<StorageModel> {
        items.validate(capacity)?;

        let mut allocator = VariableAllocator::default();
        let mut emitter = ClauseEmitter::new(sink, &mut allocator);

        let placements = place_each_item(&mut emitter, items, capacity)?;
        let limits = limit_storage(&mut emitter, capacity)?;
        no_overlap(&mut emitter, items, capacity, &placements, &limits)?;

        for category in items.categories() {
            separate_same_category(&mut emitter, items, capacity, &placements, category)?;
        }

        let num_clauses = emitter.num_clauses_added();
        debug!(
            "Encoded {} items with capacity {capacity} into {} variables and {num_clauses} clauses",
            items.len(),
            allocator.num_variables(),
        );

        Ok(StorageModel {
            capacity,
            placements,
            limits,
            allocator,
            num_clauses,
        })
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn num_variables(&self) -> u32 {
        self.allocator.num_variables()
    }

    /// The number of clauses emitted so far, including the ones added by tightening.
    pub fn num_clauses(&self) -> usize {
        self.num_clauses
    }

    /// The literal which holds when the item at `item_index` (in item table order) starts at
    /// `offset`.
    pub fn placement_literal(&self, item_index: usize, offset: u32) -> Option<Literal> {
        self.placements
            .get(item_index)
            .and_then(|literals| literals.get(offset as usize))
            .copied()
    }

    /// The literal which disables `slot`, and through the chain every slot above it. Only the
    /// slots `0 .. capacity` have one.
    pub fn limit_literal(&self, slot: u32) -> Literal {
        crate::planner_assert_simple!(
            slot < self.capacity,
            "There is no limit literal for slot {slot} at capacity {}.",
            self.capacity
        );

        self.limits[slot as usize]
    }

    /// The literal which restricts the used width to at most `width`, or `None` if `width`
    /// does not restrict anything.
    pub fn width_bound_literal(&self, width: u32) -> Option<Literal> {
        (width < self.capacity).then(|| self.limit_literal(width))
    }

    /// Forbid, permanently, every placement which uses `used_width` slots or more, by asserting
    /// the limit literals from `used_width - 1` up to the last one.
    pub fn tighten_below<Sink: ClauseSink>(
        &mut self,
        used_width: u32,
        sink: &mut Sink,
    ) -> Result<(), EngineError> {
        crate::planner_assert_simple!(
            (1..=self.capacity).contains(&used_width),
            "The width to tighten below must lie within the capacity."
        );

        for &limit in &self.limits[used_width as usize - 1..] {
            sink.add_clause(&[limit])?;
            self.num_clauses += 1;
        }

        Ok(())
    }

    /// Read the placement out of the engine's latest satisfying assignment. The used width is
    /// the capacity minus the number of disabled slots.
    pub fn extract_placement<Engine: SatEngine>(
        &self,
        engine: &Engine,
        items: &ItemTable,
    ) -> Result<Placement, EngineError> {
        let mut positions = Vec::with_capacity(items.len());

        for (item, literals) in items.items().iter().zip(&self.placements) {
            let mut position = None;
            for (offset, &literal) in literals.iter().enumerate() {
                if engine.value(literal)? {
                    position = Some(offset as u32);
                    break;
                }
            }

            positions.push((item.id, position));
        }

        let mut num_disabled = 0;
        for &limit in &self.limits {
            if engine.value(limit)? {
                num_disabled += 1;
            }
        }

        Ok(Placement::new(positions, self.capacity - num_disabled))
    }
}

fn place_each_item<Sink: ClauseSink>(
    emitter: &mut ClauseEmitter<'_, Sink>,
    items: &ItemTable,
    capacity: u32,
) -> Result<Vec<Vec<Literal>>, EngineError> {
    let mut placements = Vec::with_capacity(items.len());

    for item in items.items() {
        let item_placements = emitter.new_literals(item.num_offsets(capacity) as usize);
        exactly_one(emitter, &item_placements)?;
        placements.push(item_placements);
    }

    Ok(placements)
}

fn limit_storage<Sink: ClauseSink>(
    emitter: &mut ClauseEmitter<'_, Sink>,
    capacity: u32,
) -> Result<Vec<Literal>, EngineError> {
    let limits = emitter.new_literals(capacity as usize);

    for pair in limits.windows(2) {
        emitter.add_clause(&[!pair[0], pair[1]])?;
    }

    Ok(limits)
}

fn no_overlap<Sink: ClauseSink>(
    emitter: &mut ClauseEmitter<'_, Sink>,
    items: &ItemTable,
    capacity: u32,
    placements: &[Vec<Literal>],
    limits: &[Literal],
) -> Result<(), EngineError> {
    let mut grid = OccupancyGrid::new(items, capacity, |slot| vec![limits[slot]]);

    for (item, literals) in items.items().iter().zip(placements) {
        grid.claim(item, literals, item.width);
    }

    grid.forbid_shared_cells(emitter)
}

fn separate_same_category<Sink: ClauseSink>(
    emitter: &mut ClauseEmitter<'_, Sink>,
    items: &ItemTable,
    capacity: u32,
    placements: &[Vec<Literal>],
    category: Category,
) -> Result<(), EngineError> {
    let mut grid = OccupancyGrid::new(items, capacity, |_| vec![]);

    for (item, literals) in items.items().iter().zip(placements) {
        if item.category == category {
            grid.claim(item, literals, item.width + 1);
        }
    }

    grid.forbid_shared_cells(emitter)
}

/// For every (day, slot) cell in the planning horizon, the literals which claim that cell.
struct OccupancyGrid {
    first_day: u32,
    capacity: u32,
    cells: Vec<Vec<Vec<Literal>>>,
}

impl OccupancyGrid {
    fn new(items: &ItemTable, capacity: u32, initial: impl Fn(usize) -> Vec<Literal>) -> Self {
        // Days outside the horizon hold no item, so their cells could never conflict.
        let first_day = items.first_day().unwrap_or(0);
        let num_days = items.last_day().map_or(0, |last_day| last_day - first_day + 1);

        let cells = (0..num_days)
            .map(|_| (0..capacity as usize).map(&initial).collect())
            .collect();

        OccupancyGrid {
            first_day,
            capacity,
            cells,
        }
    }

    /// Let every placement literal of `item` claim `footprint` slots from its offset onwards.
    /// Slots beyond the capacity are not tracked: the only placements reaching past it are the
    /// widened footprints at the last offset, and any two of those already share the last slot.
    fn claim(&mut self, item: &Item, literals: &[Literal], footprint: u32) {
        for day in item.days() {
            let day_cells = &mut self.cells[(day - self.first_day) as usize];

            for (offset, &literal) in literals.iter().enumerate() {
                let offset = offset as u32;
                let end = (offset + footprint).min(self.capacity);

                for slot in offset..end {
                    day_cells[slot as usize].push(literal);
                }
            }
        }
    }

    fn forbid_shared_cells<Sink: ClauseSink>(
        &self,
        emitter: &mut ClauseEmitter<'_, Sink>,
    ) -> Result<(), EngineError> {
        for day_cells in &self.cells {
            for claimants in day_cells {
                at_most_one(emitter, claimants)?;
            }
        }

        Ok(())
    }
}
