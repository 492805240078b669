//! Tables of single-line text cells, styled with spreadsheet-like range commands.
//!
//! Cells are addressed as `(column, row)`. Negative coordinates count back from the
//! end, so `(-1, -1)` is always the bottom right cell, and a range includes both of
//! its corners:
//!
//! ```
//! use invoice_gen::flow::{CellRange, Table, TableCommand, TableStyle};
//! use invoice_gen::colours;
//! use invoice_gen::Pt;
//!
//! let table = Table::new(
//!     vec![
//!         vec!["Item".to_string(), "Amount".to_string()],
//!         vec!["Widget".to_string(), "10.00".to_string()],
//!     ],
//!     vec![Pt(100.0), Pt(50.0)],
//! )
//! .with_style(TableStyle::new().with(TableCommand::LineAbove {
//!     range: CellRange::new((0, -1), (-1, -1)),
//!     width: Pt(1.0),
//!     colour: colours::BLACK,
//! }));
//!
//! let resolved = table.resolve().unwrap();
//! assert_eq!(resolved.rows[1].lines_above.len(), 1);
//! assert!(resolved.rows[0].lines_above.is_empty());
//! ```

use super::style::Alignment;
use crate::colour::Colour;
use crate::fonts::DEFAULT_FONT;
use crate::units::Pt;
use crate::PDFError;
use std::ops::RangeInclusive;

/// Space between a cell's edges and its text, left and right
pub const CELL_PADDING_X: Pt = Pt(6.0);
/// Space between a cell's edges and its text, top and bottom
pub const CELL_PADDING_Y: Pt = Pt(3.0);
pub const DEFAULT_CELL_FONT_SIZE: Pt = Pt(10.0);
pub const DEFAULT_CELL_LEADING: Pt = Pt(12.0);

/// A cell coordinate; negative values count back from the last column / row
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CellRef {
    pub col: isize,
    pub row: isize,
}

impl CellRef {
    pub fn new(col: isize, row: isize) -> CellRef {
        CellRef { col, row }
    }
}

impl From<(isize, isize)> for CellRef {
    fn from((col, row): (isize, isize)) -> Self {
        CellRef { col, row }
    }
}

/// A rectangular, inclusive range of cells
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CellRange {
    pub start: CellRef,
    pub end: CellRef,
}

fn normalise(index: isize, len: usize) -> isize {
    if index < 0 {
        index + len as isize
    } else {
        index
    }
}

fn clamp_range(start: isize, end: isize, len: usize) -> Option<RangeInclusive<usize>> {
    let start = normalise(start, len).max(0);
    let end = normalise(end, len).min(len as isize - 1);
    if len == 0 || start > end {
        None
    } else {
        Some(start as usize..=end as usize)
    }
}

impl CellRange {
    pub fn new(start: (isize, isize), end: (isize, isize)) -> CellRange {
        CellRange {
            start: start.into(),
            end: end.into(),
        }
    }

    /// The range covering every cell of the table
    pub fn all() -> CellRange {
        CellRange::new((0, 0), (-1, -1))
    }

    /// Resolve the range against a table's dimensions, returning the columns and rows
    /// it covers. Ranges that end before they start, or lie outside the table, cover
    /// nothing.
    pub fn resolve(
        &self,
        cols: usize,
        rows: usize,
    ) -> Option<(RangeInclusive<usize>, RangeInclusive<usize>)> {
        let cols = clamp_range(self.start.col, self.end.col, cols)?;
        let rows = clamp_range(self.start.row, self.end.row, rows)?;
        Some((cols, rows))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableCommand {
    /// Set the font (and optionally size) of every cell in the range
    Font {
        range: CellRange,
        name: String,
        size: Option<Pt>,
    },
    /// Rule along the top edge of every row in the range
    LineAbove {
        range: CellRange,
        width: Pt,
        colour: Colour,
    },
    /// Rule along the bottom edge of every row in the range
    LineBelow {
        range: CellRange,
        width: Pt,
        colour: Colour,
    },
    Align {
        range: CellRange,
        alignment: Alignment,
    },
    /// Merge the range into a single cell showing the top left cell's text. Only
    /// horizontal merges are supported; every row of the range is merged separately.
    Span { range: CellRange },
}

/// An ordered list of commands; later commands override earlier ones
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableStyle {
    pub commands: Vec<TableCommand>,
}

impl TableStyle {
    pub fn new() -> TableStyle {
        TableStyle::default()
    }

    pub fn with(mut self, command: TableCommand) -> Self {
        self.commands.push(command);
        self
    }
}

impl FromIterator<TableCommand> for TableStyle {
    fn from_iter<I: IntoIterator<Item = TableCommand>>(iter: I) -> Self {
        TableStyle {
            commands: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
    pub col_widths: Vec<Pt>,
    pub style: TableStyle,
}

/// A horizontal rule spanning columns `cols` of a row
#[derive(Debug, Clone, PartialEq)]
pub struct RowRule {
    pub cols: RangeInclusive<usize>,
    pub width: Pt,
    pub colour: Colour,
}

/// A visible cell after spans have been applied
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCell {
    pub text: String,
    pub cols: RangeInclusive<usize>,
    pub font_name: String,
    pub font_size: Pt,
    pub alignment: Alignment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRow {
    pub cells: Vec<ResolvedCell>,
    pub height: Pt,
    pub lines_above: Vec<RowRule>,
    pub lines_below: Vec<RowRule>,
}

/// A table with its style applied to every cell, ready to be split across pages
/// and drawn
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTable {
    pub col_widths: Vec<Pt>,
    pub rows: Vec<ResolvedRow>,
}

impl ResolvedTable {
    pub fn width(&self) -> Pt {
        self.col_widths.iter().copied().sum()
    }

    /// Offset of the left edge of column `col` from the left edge of the table
    pub fn col_offset(&self, col: usize) -> Pt {
        self.col_widths.iter().take(col).copied().sum()
    }

    pub fn cols_width(&self, cols: &RangeInclusive<usize>) -> Pt {
        self.col_widths
            .iter()
            .skip(*cols.start())
            .take(cols.end() + 1 - cols.start())
            .copied()
            .sum()
    }
}

#[derive(Clone)]
struct CellStyle {
    font_name: String,
    font_size: Pt,
    alignment: Alignment,
}

impl Table {
    pub fn new<W: Into<Pt>>(rows: Vec<Vec<String>>, col_widths: Vec<W>) -> Table {
        Table {
            rows,
            col_widths: col_widths.into_iter().map(Into::into).collect(),
            style: TableStyle::default(),
        }
    }

    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.col_widths.len()
    }

    /// Check that the table has content and every row has one cell per column
    pub fn validate(&self) -> Result<(), PDFError> {
        if self.rows.is_empty() || self.col_widths.is_empty() {
            return Err(PDFError::EmptyTable);
        }
        for (row, cells) in self.rows.iter().enumerate() {
            if cells.len() != self.col_widths.len() {
                return Err(PDFError::MalformedTable {
                    row,
                    expected: self.col_widths.len(),
                    found: cells.len(),
                });
            }
        }
        Ok(())
    }

    /// Apply the table style to every cell. Commands are resolved against the whole
    /// table, so negative coordinates keep their meaning if the table is later split.
    pub fn resolve(&self) -> Result<ResolvedTable, PDFError> {
        self.validate()?;

        let cols = self.col_count();
        let rows = self.row_count();

        let mut styles: Vec<Vec<CellStyle>> = vec![
            vec![
                CellStyle {
                    font_name: DEFAULT_FONT.to_string(),
                    font_size: DEFAULT_CELL_FONT_SIZE,
                    alignment: Alignment::Left,
                };
                cols
            ];
            rows
        ];
        let mut lines_above: Vec<Vec<RowRule>> = vec![Vec::new(); rows];
        let mut lines_below: Vec<Vec<RowRule>> = vec![Vec::new(); rows];
        // per row, the column ranges merged into one cell
        let mut spans: Vec<Vec<RangeInclusive<usize>>> = vec![Vec::new(); rows];

        for command in self.style.commands.iter() {
            match command {
                TableCommand::Font { range, name, size } => {
                    if let Some((cs, rs)) = range.resolve(cols, rows) {
                        for r in rs {
                            for c in cs.clone() {
                                styles[r][c].font_name = name.clone();
                                if let Some(size) = size {
                                    styles[r][c].font_size = *size;
                                }
                            }
                        }
                    }
                }
                TableCommand::LineAbove {
                    range,
                    width,
                    colour,
                } => {
                    if let Some((cs, rs)) = range.resolve(cols, rows) {
                        for r in rs {
                            lines_above[r].push(RowRule {
                                cols: cs.clone(),
                                width: *width,
                                colour: *colour,
                            });
                        }
                    }
                }
                TableCommand::LineBelow {
                    range,
                    width,
                    colour,
                } => {
                    if let Some((cs, rs)) = range.resolve(cols, rows) {
                        for r in rs {
                            lines_below[r].push(RowRule {
                                cols: cs.clone(),
                                width: *width,
                                colour: *colour,
                            });
                        }
                    }
                }
                TableCommand::Align { range, alignment } => {
                    if let Some((cs, rs)) = range.resolve(cols, rows) {
                        for r in rs {
                            for c in cs.clone() {
                                styles[r][c].alignment = *alignment;
                            }
                        }
                    }
                }
                TableCommand::Span { range } => {
                    if let Some((cs, rs)) = range.resolve(cols, rows) {
                        for r in rs {
                            // a new span replaces any span it overlaps
                            spans[r].retain(|s| s.end() < cs.start() || s.start() > cs.end());
                            spans[r].push(cs.clone());
                        }
                    }
                }
            }
        }

        let mut resolved_rows = Vec::with_capacity(rows);
        for (r, cells) in self.rows.iter().enumerate() {
            let mut resolved_cells = Vec::with_capacity(cols);
            let mut c = 0;
            while c < cols {
                let cover = spans[r]
                    .iter()
                    .find(|s| *s.start() == c)
                    .cloned()
                    .unwrap_or(c..=c);
                let style = &styles[r][c];
                resolved_cells.push(ResolvedCell {
                    text: cells[c].clone(),
                    cols: cover.clone(),
                    font_name: style.font_name.clone(),
                    font_size: style.font_size,
                    alignment: style.alignment,
                });
                c = cover.end() + 1;
            }

            let largest = resolved_cells
                .iter()
                .map(|cell| cell.font_size)
                .fold(DEFAULT_CELL_FONT_SIZE, Pt::max);
            let height = DEFAULT_CELL_LEADING.max(largest * 1.2) + CELL_PADDING_Y * 2.0;

            resolved_rows.push(ResolvedRow {
                cells: resolved_cells,
                height,
                lines_above: std::mem::take(&mut lines_above[r]),
                lines_below: std::mem::take(&mut lines_below[r]),
            });
        }

        Ok(ResolvedTable {
            col_widths: self.col_widths.clone(),
            rows: resolved_rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colours;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn negative_references_count_from_the_end() {
        let range = CellRange::new((0, 2), (-1, -2));
        assert_eq!(range.resolve(3, 5), Some((0..=2, 2..=3)));
        // with only a header and a total row there are no rows in between
        assert_eq!(range.resolve(3, 2), None);
        assert_eq!(CellRange::new((-1, 0), (-1, -1)).resolve(3, 4), Some((2..=2, 0..=3)));
    }

    #[test]
    fn malformed_rows_are_rejected() {
        let table = Table::new(rows(&[&["a", "b"], &["c"]]), vec![Pt(10.0), Pt(10.0)]);
        match table.validate() {
            Err(PDFError::MalformedTable {
                row,
                expected,
                found,
            }) => {
                assert_eq!((row, expected, found), (1, 2, 1));
            }
            other => panic!("unexpected: {other:?}"),
        }

        let empty = Table::new(Vec::new(), vec![Pt(10.0)]);
        assert!(matches!(empty.resolve(), Err(PDFError::EmptyTable)));
    }

    #[test]
    fn spans_merge_cells_and_keep_the_first_cells_style() {
        let table = Table::new(
            rows(&[&["", "Item", "Amount"], &["Total:", "", "35.50"]]),
            vec![Pt(10.0), Pt(100.0), Pt(30.0)],
        )
        .with_style(
            TableStyle::new()
                .with(TableCommand::Align {
                    range: CellRange::new((0, -1), (0, -1)),
                    alignment: Alignment::Right,
                })
                .with(TableCommand::Span {
                    range: CellRange::new((0, -1), (-2, -1)),
                }),
        );

        let resolved = table.resolve().unwrap();
        assert_eq!(resolved.rows[0].cells.len(), 3);
        let total = &resolved.rows[1];
        assert_eq!(total.cells.len(), 2);
        assert_eq!(total.cells[0].text, "Total:");
        assert_eq!(total.cells[0].cols, 0..=1);
        assert_eq!(total.cells[0].alignment, Alignment::Right);
        assert_eq!(resolved.cols_width(&total.cells[0].cols), Pt(110.0));
        assert_eq!(resolved.col_offset(2), Pt(110.0));
    }

    #[test]
    fn fonts_change_row_heights() {
        let table = Table::new(rows(&[&["a"], &["b"]]), vec![Pt(10.0)]).with_style(
            TableStyle::new().with(TableCommand::Font {
                range: CellRange::new((0, 1), (0, 1)),
                name: "Other".to_string(),
                size: Some(Pt(20.0)),
            }),
        );
        let resolved = table.resolve().unwrap();
        assert!((*resolved.rows[0].height - 18.0).abs() < 1e-4);
        assert_eq!(resolved.rows[0].cells[0].font_name, DEFAULT_FONT);
        assert_eq!(resolved.rows[1].cells[0].font_name, "Other");
        assert!(resolved.rows[1].height > resolved.rows[0].height);
    }

    #[test]
    fn lines_below_attach_to_rows() {
        let table = Table::new(rows(&[&[""]]), vec![Pt(100.0)]).with_style(
            [TableCommand::LineBelow {
                range: CellRange::new((0, 0), (0, 0)),
                width: Pt(1.0),
                colour: colours::BLACK,
            }]
            .into_iter()
            .collect(),
        );
        let resolved = table.resolve().unwrap();
        assert_eq!(resolved.rows[0].lines_below.len(), 1);
        assert_eq!(resolved.rows[0].lines_below[0].cols, 0..=0);
    }
}
