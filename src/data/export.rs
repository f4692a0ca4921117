use std::path::Path;

use anyhow::{Context, Result};

use super::model::Record;

const HEADER: [&str; 6] = ["age", "sex", "bmi", "smoker", "region", "charges"];

/// Write `records` as CSV in a layout the CSV loader reads back.
/// The header is written even when there are no rows.
pub fn write_csv<'a, I>(path: &Path, records: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(HEADER).context("writing CSV header")?;

    let mut written = 0;
    for record in records {
        writer
            .serialize(record)
            .with_context(|| format!("writing row {written}"))?;
        written += 1;
    }
    writer.flush().context("flushing CSV")?;
    Ok(written)
}
