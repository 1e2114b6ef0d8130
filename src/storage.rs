use crate::models::CountryDetail;
use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Spreadsheet apps evaluate cells starting with these as formulas.
fn formula_safe(cell: &str) -> String {
    match cell.chars().next() {
        Some('=' | '+' | '-' | '@' | '\t' | '\r') => format!("'{cell}"),
        _ => cell.to_string(),
    }
}

/// Save the population series of a country as CSV with header, one row per
/// sample as received (missing values stay empty).
pub fn save_csv<P: AsRef<Path>>(detail: &CountryDetail, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    wtr.serialize(("country_code", "country_name", "year", "value"))?;
    let code = formula_safe(&detail.code);
    let name = formula_safe(&detail.name);
    for s in &detail.population {
        wtr.serialize((&code, &name, s.year, s.value))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save the whole detail record (borders included) as pretty JSON, using the
/// API's field names.
pub fn save_json<P: AsRef<Path>>(detail: &CountryDetail, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let s = serde_json::to_string_pretty(detail)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
