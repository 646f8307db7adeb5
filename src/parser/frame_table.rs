//! Frame layout table parser.
//!
//! Layout tables are CSV exports from GraphicsGale with a single header row
//! and seven columns:
//!
//! ```text
//! Name,Delay(1/60),File Name,X,Y,Width,Height
//! 01,5,walk.png,0,0,16,16
//! 02,5,walk.png,16,0,16,16
//! ```
//!
//! GraphicsGale writes the wrong dimensions for every frame but the first, so
//! the first row's `Width` and `Height` are copied onto every row before any
//! numbers are parsed.

use std::io;

use crate::error::{Result, SpriteError};
use crate::types::FrameRecord;

/// Columns of a layout table, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    Delay,
    FileName,
    X,
    Y,
    Width,
    Height,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Name,
        Column::Delay,
        Column::FileName,
        Column::X,
        Column::Y,
        Column::Width,
        Column::Height,
    ];

    /// Header text GraphicsGale uses for this column.
    pub const fn header(self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::Delay => "Delay(1/60)",
            Column::FileName => "File Name",
            Column::X => "X",
            Column::Y => "Y",
            Column::Width => "Width",
            Column::Height => "Height",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// A data row with its fields still as text.
#[derive(Debug, Clone)]
struct RawRow {
    line: u64,
    fields: [String; 7],
}

impl RawRow {
    fn from_record(record: &csv::StringRecord, line: u64) -> Result<Self> {
        if record.len() < Column::ALL.len() {
            return Err(SpriteError::MalformedTable {
                line,
                message: format!(
                    "expected {} fields, found {}",
                    Column::ALL.len(),
                    record.len()
                ),
                help: Some(format!("Columns are: {}", header_line())),
            });
        }

        let fields = Column::ALL.map(|col| record[col.index()].to_string());
        Ok(Self { line, fields })
    }

    fn get(&self, column: Column) -> &str {
        &self.fields[column.index()]
    }

    fn number(&self, column: Column) -> Result<u32> {
        let value = self.get(column);
        value.trim().parse().map_err(|_| SpriteError::MalformedTable {
            line: self.line,
            message: format!("{} '{}' is not a non-negative integer", column.header(), value),
            help: None,
        })
    }

    fn into_record(self) -> Result<FrameRecord> {
        Ok(FrameRecord {
            delay: self.number(Column::Delay)?,
            delay_text: self.fields[Column::Delay.index()].clone(),
            x: self.number(Column::X)?,
            y: self.number(Column::Y)?,
            width: self.number(Column::Width)?,
            height: self.number(Column::Height)?,
            frame_name: self.fields[Column::Name.index()].clone(),
            sprite_name: self.fields[Column::FileName.index()].clone(),
        })
    }
}

fn header_line() -> String {
    Column::ALL.map(Column::header).join(",")
}

fn csv_error(e: csv::Error) -> SpriteError {
    SpriteError::MalformedTable {
        line: e.position().map_or(0, |p| p.line()),
        message: e.to_string(),
        help: None,
    }
}

/// Load frame records from CSV text.
pub fn parse_frame_table(source: &str) -> Result<Vec<FrameRecord>> {
    load_frame_table(source.as_bytes())
}

/// Load frame records from a CSV stream.
///
/// The first row is always discarded as a header. Every record in the result
/// carries the first row's width and height.
pub fn load_frame_table<R: io::Read>(reader: R) -> Result<Vec<FrameRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = reader.records();

    match records.next() {
        Some(header) => {
            header.map_err(csv_error)?;
        }
        None => {
            return Err(SpriteError::MalformedTable {
                line: 1,
                message: "table is empty".to_string(),
                help: Some(format!("Expected a header row: {}", header_line())),
            });
        }
    }

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(csv_error)?;
        let line = record.position().map_or(0, |p| p.line());
        rows.push(RawRow::from_record(&record, line)?);
    }

    fix_frame_size(&mut rows)?;

    rows.into_iter().map(RawRow::into_record).collect()
}

/// Copy the first row's dimensions onto every row.
fn fix_frame_size(rows: &mut [RawRow]) -> Result<()> {
    let first = rows.first().ok_or_else(|| SpriteError::MalformedTable {
        line: 2,
        message: "table has a header but no frames".to_string(),
        help: None,
    })?;

    let width = first.get(Column::Width).to_string();
    let height = first.get(Column::Height).to_string();

    for row in rows.iter_mut() {
        row.fields[Column::Width.index()] = width.clone();
        row.fields[Column::Height.index()] = height.clone();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Name,Delay(1/60),File Name,X,Y,Width,Height\n";

    fn table(rows: &str) -> String {
        format!("{}{}", HEADER, rows)
    }

    #[test]
    fn test_parse_single_frame() {
        let frames = parse_frame_table(&table("01,5,walk.png,0,0,16,16\n")).unwrap();

        assert_eq!(
            frames,
            vec![FrameRecord {
                frame_name: "01".to_string(),
                delay: 5,
                delay_text: "5".to_string(),
                sprite_name: "walk.png".to_string(),
                x: 0,
                y: 0,
                width: 16,
                height: 16,
            }]
        );
    }

    #[test]
    fn test_header_is_never_data() {
        // A header that happens to look numeric is still skipped
        let frames = parse_frame_table("a,1,b.png,0,0,8,8\nc,2,d.png,8,0,8,8\n").unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].frame_name, "c");
    }

    #[test]
    fn test_row_count_preserved_in_order() {
        let frames = parse_frame_table(&table(
            "01,5,walk.png,0,0,16,16\n02,6,walk.png,16,0,16,16\n03,7,walk.png,32,0,16,16\n",
        ))
        .unwrap();

        let names: Vec<&str> = frames.iter().map(|f| f.frame_name.as_str()).collect();
        assert_eq!(names, ["01", "02", "03"]);
        assert_eq!(frames[2].x, 32);
        assert_eq!(frames[2].delay, 7);
    }

    #[test]
    fn test_dimensions_forced_to_first_row() {
        let frames = parse_frame_table(&table(
            "01,5,walk.png,0,0,12,10\n02,5,walk.png,12,0,48,30\n03,5,walk.png,24,0,1,1\n",
        ))
        .unwrap();

        for f in &frames {
            assert_eq!((f.width, f.height), (12, 10));
        }
        // Positions stay per-row
        assert_eq!(frames[1].x, 12);
        assert_eq!(frames[2].x, 24);
    }

    #[test]
    fn test_junk_dimensions_after_first_row_ignored() {
        let frames =
            parse_frame_table(&table("01,5,walk.png,0,0,8,8\n02,5,walk.png,8,0,,oops\n")).unwrap();
        assert_eq!((frames[1].width, frames[1].height), (8, 8));
    }

    #[test]
    fn test_empty_table_fails() {
        let err = parse_frame_table("").unwrap_err();
        assert!(matches!(err, SpriteError::MalformedTable { .. }));
    }

    #[test]
    fn test_header_only_fails() {
        let err = parse_frame_table(HEADER).unwrap_err();
        assert!(matches!(err, SpriteError::MalformedTable { .. }));
    }

    #[test]
    fn test_short_row_fails_with_line() {
        let err = parse_frame_table(&table("01,5,walk.png,0,0,8,8\n02,5,walk.png,8\n")).unwrap_err();
        match err {
            SpriteError::MalformedTable { line, message, .. } => {
                assert_eq!(line, 3);
                assert!(message.contains("found 4"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_extra_fields_ignored() {
        let frames = parse_frame_table(&table("01,5,walk.png,0,0,8,8,extra,more\n")).unwrap();
        assert_eq!(frames[0].height, 8);
    }

    #[test]
    fn test_quoted_fields() {
        let frames =
            parse_frame_table(&table("\"run, fast\",3,\"hero.png\",0,8,8,8\n")).unwrap();
        assert_eq!(frames[0].frame_name, "run, fast");
        assert_eq!(frames[0].y, 8);
    }

    #[test]
    fn test_numbers_tolerate_whitespace() {
        let frames = parse_frame_table(&table("01, 5 ,walk.png, 4,2 ,8,8\n")).unwrap();
        assert_eq!((frames[0].delay, frames[0].x, frames[0].y), (5, 4, 2));
    }

    #[test]
    fn test_non_numeric_position_fails() {
        let err = parse_frame_table(&table("01,5,walk.png,left,0,8,8\n")).unwrap_err();
        match err {
            SpriteError::MalformedTable { message, .. } => assert!(message.contains("X 'left'")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_zero_dimensions_load() {
        let frames = parse_frame_table(&table("01,5,walk.png,0,0,0,8\n02,5,walk.png,8,0,8,8\n")).unwrap();
        assert_eq!(frames.len(), 2);
        for f in &frames {
            assert_eq!((f.width, f.height), (0, 8));
        }
    }

    #[test]
    fn test_delay_text_kept_verbatim() {
        let frames = parse_frame_table(&table("01,05,walk.png,0,0,8,8\n")).unwrap();
        assert_eq!(frames[0].delay, 5);
        assert_eq!(frames[0].delay_text, "05");
    }

    #[test]
    fn test_load_from_reader() {
        let source = table("idle,10,hero.png,0,0,8,8\n");
        let frames = load_frame_table(std::io::Cursor::new(source)).unwrap();
        assert_eq!(frames[0].sprite_name, "hero.png");
    }
}
