//! The table format has a header line naming the columns, followed by one line per item. The
//! columns `item_id`, `begin`, `end` and `width` are required, as is `category` (which may also be
//! called `type`). Any other column is carried through to the output unchanged, except for a
//! `position` column, which is replaced by the solved one. The output keeps the header names and
//! column order of the input, with `position` appended as the last column.
//!
//! Fields are separated by commas and are not quoted.

use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;
use std::io::Write;
use std::str::FromStr;

use fnv::FnvHashMap;
use thiserror::Error;

use crate::basic_types::ColumnLayout;
use crate::basic_types::InputError;
use crate::basic_types::Item;
use crate::basic_types::ItemId;
use crate::basic_types::ItemTable;
use crate::basic_types::Placement;

const ITEM_ID: &str = "item_id";
const BEGIN: &str = "begin";
const END: &str = "end";
const WIDTH: &str = "width";
const CATEGORY: &str = "category";
const CATEGORY_ALIAS: &str = "type";
const POSITION: &str = "position";

#[derive(Debug, Error)]
pub enum ItemTableError {
    #[error("failed to read the item table: {0}")]
    Io(#[from] std::io::Error),

    #[error("the item table has no header line")]
    MissingHeader,

    #[error("the item table has no '{0}' column")]
    MissingColumn(&'static str),

    #[error("the column '{0}' occurs more than once")]
    DuplicateColumn(String),

    #[error("line {line} has {found} fields, expected {expected}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: '{value}' is not a valid value for column '{column}'")]
    InvalidInteger {
        line: usize,
        column: &'static str,
        value: String,
    },

    #[error(transparent)]
    Input(#[from] InputError),
}

/// Where the required columns are found in each line.
#[derive(Debug)]
struct Columns {
    item_id: usize,
    begin: usize,
    end: usize,
    width: usize,
    category: usize,
    category_name: &'static str,
    extra: Vec<usize>,
}

impl Columns {
    fn from_header(header: &[&str]) -> Result<Columns, ItemTableError> {
        let mut indices = FnvHashMap::default();
        for (index, &name) in header.iter().enumerate() {
            if indices.insert(name, index).is_some() {
                return Err(ItemTableError::DuplicateColumn(name.to_owned()));
            }
        }

        let find = |name: &'static str| {
            indices
                .get(name)
                .copied()
                .ok_or(ItemTableError::MissingColumn(name))
        };

        let (category, category_name) = match indices.get(CATEGORY) {
            Some(&index) => (index, CATEGORY),
            None => indices
                .get(CATEGORY_ALIAS)
                .map(|&index| (index, CATEGORY_ALIAS))
                .ok_or(ItemTableError::MissingColumn(CATEGORY))?,
        };

        let mut columns = Columns {
            item_id: find(ITEM_ID)?,
            begin: find(BEGIN)?,
            end: find(END)?,
            width: find(WIDTH)?,
            category,
            category_name,
            extra: vec![],
        };

        let required = [
            columns.item_id,
            columns.begin,
            columns.end,
            columns.width,
            columns.category,
        ];
        columns.extra = header
            .iter()
            .enumerate()
            .filter(|&(index, &name)| !required.contains(&index) && name != POSITION)
            .map(|(index, _)| index)
            .collect();

        Ok(columns)
    }
}

/// Read an item table. The items are validated for structural consistency (unique ids); checks
/// against the capacity happen when the model is encoded.
pub fn read_item_table(source: impl Read) -> Result<ItemTable, ItemTableError> {
    let mut lines = BufReader::new(source).lines().enumerate();

    let header_line = loop {
        match lines.next() {
            Some((_, line)) => {
                let line = line?;
                if !line.trim().is_empty() {
                    break line;
                }
            }
            None => return Err(ItemTableError::MissingHeader),
        }
    };
    let header = split_fields(&header_line);
    let columns = Columns::from_header(&header)?;
    let layout = ColumnLayout::new(
        header
            .iter()
            .filter(|&&name| name != POSITION)
            .map(|&name| name.to_owned())
            .collect(),
        columns.category_name.to_owned(),
    );
    let extra_columns = columns
        .extra
        .iter()
        .map(|&index| header[index].to_owned())
        .collect();

    let mut items = vec![];
    let mut extra_values = vec![];

    for (index, line) in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let line_number = index + 1;
        let fields = split_fields(&line);
        if fields.len() != header.len() {
            return Err(ItemTableError::FieldCount {
                line: line_number,
                expected: header.len(),
                found: fields.len(),
            });
        }

        items.push(Item {
            id: ItemId(parse_field(&fields, line_number, ITEM_ID, columns.item_id)?),
            begin: parse_field(&fields, line_number, BEGIN, columns.begin)?,
            end: parse_field(&fields, line_number, END, columns.end)?,
            width: parse_field(&fields, line_number, WIDTH, columns.width)?,
            category: parse_field(&fields, line_number, CATEGORY, columns.category)?,
        });
        extra_values.push(
            columns
                .extra
                .iter()
                .map(|&index| fields[index].to_owned())
                .collect(),
        );
    }

    Ok(ItemTable::with_layout(
        items,
        layout,
        extra_columns,
        extra_values,
    )?)
}

/// Write `items` with their solved positions, in ascending id order, using the column layout the
/// table was read with. Items without a position are written with position `-1`.
pub fn write_placement(
    mut sink: impl Write,
    items: &ItemTable,
    placement: &Placement,
) -> std::io::Result<()> {
    let layout = items.layout();
    for column in layout.columns() {
        write!(sink, "{column},")?;
    }
    writeln!(sink, "{POSITION}")?;

    for (index, item) in items.items().iter().enumerate() {
        let mut extra_values = items.extra_values(index).iter();
        for column in layout.columns() {
            match column.as_str() {
                ITEM_ID => write!(sink, "{},", item.id)?,
                BEGIN => write!(sink, "{},", item.begin)?,
                END => write!(sink, "{},", item.end)?,
                WIDTH => write!(sink, "{},", item.width)?,
                name if name == layout.category_column() => write!(sink, "{},", item.category)?,
                _ => write!(sink, "{},", extra_values.next().map_or("", String::as_str))?,
            }
        }

        let position = placement.position_of(item.id).map_or(-1, i64::from);
        writeln!(sink, "{position}")?;
    }

    sink.flush()
}

fn split_fields(line: &str) -> Vec<&str> {
    line.trim_end_matches('\r')
        .split(',')
        .map(str::trim)
        .collect()
}

fn parse_field<Value: FromStr>(
    fields: &[&str],
    line: usize,
    column: &'static str,
    index: usize,
) -> Result<Value, ItemTableError> {
    fields[index]
        .parse()
        .map_err(|_| ItemTableError::InvalidInteger {
            line,
            column,
            value: fields[index].to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(source: &str) -> Result<ItemTable, ItemTableError> {
        read_item_table(source.as_bytes())
    }

    #[test]
    fn generated_schedule_is_read() {
        let table = read("item_id,begin,end,width,type\n1,4,9,2,3\n0,0,3,1,0\n").unwrap();

        assert_eq!(
            &[
                Item {
                    id: ItemId(0),
                    begin: 0,
                    end: 3,
                    width: 1,
                    category: 0
                },
                Item {
                    id: ItemId(1),
                    begin: 4,
                    end: 9,
                    width: 2,
                    category: 3
                }
            ],
            table.items()
        );
        assert!(table.extra_columns().is_empty());
    }

    #[test]
    fn column_order_is_free_and_extra_columns_are_kept() {
        let table = read("width,label,category,end,begin,item_id\r\n3,crate,1,5,2,7\r\n").unwrap();

        assert_eq!(
            Item {
                id: ItemId(7),
                begin: 2,
                end: 5,
                width: 3,
                category: 1
            },
            table.items()[0]
        );
        assert_eq!(&["label".to_owned()], table.extra_columns());
        assert_eq!(&["crate".to_owned()], table.extra_values(0));
    }

    #[test]
    fn previous_positions_are_dropped() {
        let table = read("item_id,begin,end,width,category,position\n0,0,0,1,0,5\n").unwrap();

        assert!(table.extra_columns().is_empty());
    }

    #[test]
    fn blank_lines_are_ignored() {
        let table = read("\nitem_id,begin,end,width,category\n\n0,0,0,1,0\n\n").unwrap();

        assert_eq!(1, table.len());
    }

    #[test]
    fn missing_columns_are_reported() {
        assert!(matches!(
            read("item_id,begin,end,category\n0,0,0,0\n"),
            Err(ItemTableError::MissingColumn(WIDTH))
        ));
        assert!(matches!(
            read("item_id,begin,end,width\n0,0,0,1\n"),
            Err(ItemTableError::MissingColumn(CATEGORY))
        ));
        assert!(matches!(read(""), Err(ItemTableError::MissingHeader)));
    }

    #[test]
    fn malformed_rows_are_reported_with_their_line() {
        assert!(matches!(
            read("item_id,begin,end,width,category\n0,0,0,1\n"),
            Err(ItemTableError::FieldCount {
                line: 2,
                expected: 5,
                found: 4
            })
        ));
        assert!(matches!(
            read("item_id,begin,end,width,category\n0,0,0,1,0\n1,-2,0,1,0\n"),
            Err(ItemTableError::InvalidInteger {
                line: 3,
                column: BEGIN,
                ..
            })
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        assert!(matches!(
            read("item_id,begin,end,width,category\n3,0,0,1,0\n3,1,1,1,0\n"),
            Err(ItemTableError::Input(InputError::DuplicateItem(ItemId(3))))
        ));
        assert!(matches!(
            read("item_id,begin,end,width,category,width\n"),
            Err(ItemTableError::DuplicateColumn(_))
        ));
    }

    #[test]
    fn placement_is_written_in_id_order() {
        let table = read("item_id,begin,end,width,type,label\n2,0,1,1,0,b\n1,0,1,2,0,a\n").unwrap();
        let placement = Placement::new(vec![(ItemId(1), Some(0)), (ItemId(2), None)], 3);

        let mut output = vec![];
        write_placement(&mut output, &table, &placement).unwrap();

        assert_eq!(
            "item_id,begin,end,width,type,label,position\n\
             1,0,1,2,0,a,0\n\
             2,0,1,1,0,b,-1\n",
            String::from_utf8(output).unwrap()
        );
    }

    fn written(source: &str, positions: Vec<(ItemId, Option<u32>)>) -> String {
        let table = read(source).unwrap();
        let placement = Placement::new(positions, 3);

        let mut output = vec![];
        write_placement(&mut output, &table, &placement).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn category_header_is_written_back_under_its_own_name() {
        assert_eq!(
            "item_id,begin,end,width,category,position\n0,0,1,2,4,1\n",
            written(
                "item_id,begin,end,width,category\n0,0,1,2,4\n",
                vec![(ItemId(0), Some(1))]
            )
        );
    }

    #[test]
    fn both_category_headers_keep_their_values() {
        assert_eq!(
            "item_id,type,begin,end,width,category,position\n0,shelf,0,1,2,4,1\n",
            written(
                "item_id,type,begin,end,width,category\n0,shelf,0,1,2,4\n",
                vec![(ItemId(0), Some(1))]
            )
        );
    }

    #[test]
    fn column_order_is_written_back_unchanged() {
        assert_eq!(
            "width,label,category,end,begin,item_id,position\n\
             1,b,0,1,0,2,0\n\
             3,crate,1,5,2,7,-1\n",
            written(
                "width,label,category,end,begin,item_id\n3,crate,1,5,2,7\n1,b,0,1,0,2\n",
                vec![(ItemId(2), Some(0)), (ItemId(7), None)]
            )
        );
    }

    #[test]
    fn previous_position_column_is_replaced_at_the_end() {
        assert_eq!(
            "item_id,begin,end,width,type,note,position\n0,0,0,1,0,x,2\n",
            written(
                "item_id,position,begin,end,width,type,note\n0,9,0,0,1,0,x\n",
                vec![(ItemId(0), Some(2))]
            )
        );
    }
}
