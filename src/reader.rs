use std::io::Read;
use std::path::Path;

use crate::error::Result;
use crate::models::RawTable;

/// Read an uploaded CSV with a header row. Every cell stays text; typing is
/// the pipeline's exclusive responsibility.
pub fn read_csv(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path)?;
    from_reader(std::io::BufReader::new(file))
}

pub fn from_reader<R: Read>(reader: R) -> Result<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let mut row: Vec<String> = record.iter().map(|c| c.to_string()).collect();
        // Ragged rows are padded/truncated to one cell per header.
        row.truncate(headers.len());
        row.resize(headers.len(), String::new());
        rows.push(row);
    }

    Ok(RawTable { headers, rows })
}
