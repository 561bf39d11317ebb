//! CSV dialect: comma, double quote, doubled-quote escaping, every field quoted, LF.

use std::io::Write;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::record::{OutputRecord, COLUMNS};

/// Writes the header row and one row per record to `out`.
pub fn write_csv<W: Write>(out: W, records: &[OutputRecord]) -> csv::Result<()> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .delimiter(b',')
        .quote(b'"')
        .double_quote(true)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out);

    wtr.write_record(COLUMNS)?;
    for record in records {
        wtr.write_record(record.fields())?;
    }
    wtr.flush()?;
    Ok(())
}
