use std::fs::{File, OpenOptions};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use rust_decimal::Decimal;

use crate::errors::YarikuriError;

use super::{Category, Ledger, Month, MonthRecord, MONTHS_RETAINED};

pub const LEDGER_FILE: &str = "expenses.csv";

const MONTH_COLUMN: &str = "Month";

/// Result of reading the ledger file.
#[derive(Debug, PartialEq)]
pub enum LoadOutcome {
    Loaded(Ledger),
    /// No ledger file exists yet. Not the same as a file with no data rows.
    Missing,
}

/// Reads the ledger file. Columns are matched by header name, the month
/// column by its `Month` header. A row with a non-numeric field aborts the
/// whole load; an incomplete ledger is worse than none.
pub fn load(path: &Path) -> Result<LoadOutcome, YarikuriError> {
    if !path.exists() {
        return Ok(LoadOutcome::Missing);
    }

    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader.headers()?.clone();
    let (month_idx, category_cols) = column_layout(&headers)?;

    let mut ledger = Ledger::new();
    for result in reader.records() {
        let row = result?;
        let month = parse_month(&row, month_idx)?;

        let mut record = MonthRecord::new();
        for &(idx, category) in &category_cols {
            let field = field(&row, idx)?;
            let amount: Decimal = field.parse().map_err(|_| {
                YarikuriError::Parse(format!("invalid amount for {category}: {field:?}"))
            })?;
            record.set(category, amount);
        }
        ledger.insert_first(month, record);
    }

    Ok(LoadOutcome::Loaded(ledger))
}

/// Appends one month to the ledger file, creating it (header included) on
/// first use. The retention cap is checked against the file as it is before
/// the append; when it is exceeded the oldest data row is dropped first.
///
/// The eviction rewrite and the append are separate file operations, so a
/// failure in between can leave the rewrite in place.
pub fn save(path: &Path, month: Month, record: &MonthRecord) -> Result<(), YarikuriError> {
    let file_exists = path.exists();
    if file_exists {
        drop_oldest_if_full(path)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = WriterBuilder::new().from_writer(file);
    if !file_exists {
        writer.write_record(header_row())?;
    }

    let mut row = vec![month.value().to_string()];
    row.extend(record.entries().map(|(_, amount)| amount.to_string()));
    writer.write_record(&row)?;
    writer.flush()?;
    Ok(())
}

fn header_row() -> Vec<&'static str> {
    let mut row = vec![MONTH_COLUMN];
    row.extend(Category::ALL.iter().map(|c| c.label()));
    row
}

/// Maps the header row to the month column index and the category behind
/// every other column. Unknown columns are refused.
fn column_layout(
    headers: &StringRecord,
) -> Result<(usize, Vec<(usize, Category)>), YarikuriError> {
    let mut month_idx = None;
    let mut category_cols = Vec::new();
    for (idx, name) in headers.iter().enumerate() {
        if name == MONTH_COLUMN {
            month_idx = Some(idx);
        } else if let Some(category) = Category::from_label(name) {
            category_cols.push((idx, category));
        } else {
            return Err(YarikuriError::Parse(format!("unknown column: {name:?}")));
        }
    }
    let month_idx = month_idx
        .ok_or_else(|| YarikuriError::Parse(format!("missing {MONTH_COLUMN} column")))?;
    Ok((month_idx, category_cols))
}

fn parse_month(row: &StringRecord, month_idx: usize) -> Result<Month, YarikuriError> {
    let field = field(row, month_idx)?;
    let value: u8 = field
        .parse()
        .map_err(|_| YarikuriError::Parse(format!("invalid month: {field:?}")))?;
    Month::new(value)
}

fn field(row: &StringRecord, idx: usize) -> Result<&str, YarikuriError> {
    row.get(idx)
        .ok_or_else(|| YarikuriError::Parse(format!("row too short: {row:?}")))
}

/// The retention check counts raw rows, header included, exactly as the
/// file holds them: once there are more than `MONTHS_RETAINED` rows in
/// total, the row right after the header is the oldest and gets dropped.
fn drop_oldest_if_full(path: &Path) -> Result<(), YarikuriError> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new().has_headers(false).from_reader(file);
    let rows: Vec<StringRecord> = reader.records().collect::<Result<_, _>>()?;
    drop(reader);

    if rows.len() <= MONTHS_RETAINED {
        return Ok(());
    }

    println!("A full year of data found. Dropping the oldest month...");
    let mut writer = WriterBuilder::new().from_path(path)?;
    for (idx, row) in rows.iter().enumerate() {
        if idx == 1 {
            continue;
        }
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
