use std::ops::RangeInclusive;

use thiserror::Error;

/// The identifier of an item, taken verbatim from the `item_id` column of the input table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(pub u64);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The tag which partitions items for the separation constraint.
pub type Category = i64;

/// An item which needs `width` contiguous slots on every day from `begin` up to and including
/// `end`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub begin: u32,
    pub end: u32,
    pub width: u32,
    pub category: Category,
}

impl Item {
    pub fn days(&self) -> RangeInclusive<u32> {
        self.begin..=self.end
    }

    /// Whether there is at least one day on which both items are stored.
    pub fn overlaps_in_time(&self, other: &Item) -> bool {
        self.begin <= other.end && other.begin <= self.end
    }

    /// The number of start offsets at which the item fits within `capacity` slots. The width
    /// must not exceed `capacity`.
    pub fn num_offsets(&self, capacity: u32) -> u32 {
        capacity - self.width + 1
    }
}

/// Reasons for which an input table cannot be turned into a model.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("the item table contains no items")]
    EmptyTable,

    #[error("the capacity must be at least one slot")]
    ZeroCapacity,

    #[error("item {0} occurs more than once")]
    DuplicateItem(ItemId),

    #[error("item {item} begins on day {begin} but ends on day {end}")]
    BeginAfterEnd { item: ItemId, begin: u32, end: u32 },

    #[error("item {0} has a width of zero")]
    ZeroWidth(ItemId),

    #[error("item {item} has width {width}, which exceeds the capacity of {capacity}")]
    WidthExceedsCapacity {
        item: ItemId,
        width: u32,
        capacity: u32,
    },
}

/// The header an item table was read with: the column names in their original order, and the
/// name under which the category was given.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnLayout {
    columns: Vec<String>,
    category_column: String,
}

impl ColumnLayout {
    pub(crate) fn new(columns: Vec<String>, category_column: String) -> ColumnLayout {
        crate::planner_assert_simple!(
            columns.contains(&category_column),
            "The category column must be part of the layout."
        );

        ColumnLayout {
            columns,
            category_column,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn category_column(&self) -> &str {
        &self.category_column
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        ColumnLayout {
            columns: ["item_id", "begin", "end", "width", "category"]
                .map(str::to_owned)
                .to_vec(),
            category_column: "category".to_owned(),
        }
    }
}

/// The immutable set of items to place, ordered by ascending [`ItemId`].
///
/// The layout of the input table is retained, as are the values of columns which are not needed
/// for planning, so that the table can be written back as it was read.
#[derive(Clone, Debug, Default)]
pub struct ItemTable {
    items: Vec<Item>,
    layout: ColumnLayout,
    extra_columns: Vec<String>,
    extra_values: Vec<Vec<String>>,
}

impl ItemTable {
    pub fn new(items: Vec<Item>) -> Result<ItemTable, InputError> {
        let num_items = items.len();
        ItemTable::with_layout(
            items,
            ColumnLayout::default(),
            vec![],
            vec![vec![]; num_items],
        )
    }

    /// `extra_columns` names the uninterpreted columns in layout order, and every row of
    /// `extra_values` holds their values in that order.
    pub(crate) fn with_layout(
        items: Vec<Item>,
        layout: ColumnLayout,
        extra_columns: Vec<String>,
        extra_values: Vec<Vec<String>>,
    ) -> Result<ItemTable, InputError> {
        crate::planner_assert_eq_simple!(items.len(), extra_values.len());

        let mut rows = items.into_iter().zip(extra_values).collect::<Vec<_>>();
        rows.sort_by_key(|(item, _)| item.id);

        if let Some(pair) = rows.windows(2).find(|pair| pair[0].0.id == pair[1].0.id) {
            return Err(InputError::DuplicateItem(pair[0].0.id));
        }

        let (items, extra_values): (Vec<Item>, Vec<Vec<String>>) = rows.into_iter().unzip();

        Ok(ItemTable {
            items,
            layout,
            extra_columns,
            extra_values,
        })
    }

    /// Checks every item against the capacity. This happens before any variable is allocated,
    /// and the first offending item is reported.
    pub fn validate(&self, capacity: u32) -> Result<(), InputError> {
        if self.items.is_empty() {
            return Err(InputError::EmptyTable);
        }

        if capacity == 0 {
            return Err(InputError::ZeroCapacity);
        }

        for item in &self.items {
            if item.begin > item.end {
                return Err(InputError::BeginAfterEnd {
                    item: item.id,
                    begin: item.begin,
                    end: item.end,
                });
            }

            if item.width == 0 {
                return Err(InputError::ZeroWidth(item.id));
            }

            if item.width > capacity {
                return Err(InputError::WidthExceedsCapacity {
                    item: item.id,
                    width: item.width,
                    capacity,
                });
            }
        }

        Ok(())
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.binary_search_by_key(&id, |item| item.id).ok()
    }

    pub fn first_day(&self) -> Option<u32> {
        self.items.iter().map(|item| item.begin).min()
    }

    pub fn last_day(&self) -> Option<u32> {
        self.items.iter().map(|item| item.end).max()
    }

    /// The distinct categories, in ascending order.
    pub fn categories(&self) -> Vec<Category> {
        let mut categories = self
            .items
            .iter()
            .map(|item| item.category)
            .collect::<Vec<_>>();
        categories.sort_unstable();
        categories.dedup();
        categories
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    pub fn extra_columns(&self) -> &[String] {
        &self.extra_columns
    }

    pub(crate) fn extra_values(&self, index: usize) -> &[String] {
        &self.extra_values[index]
    }
}
