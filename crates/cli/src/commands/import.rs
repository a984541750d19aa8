//! Catalog bulk import.
//!
//! Reads a plain `sku,name,brand,category,price` file, submits the whole
//! batch in one request, and records the outcome in the upload log so a
//! later `import` of the same file is visible as a re-run.

use chrono::Utc;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use partsgrid_core::{CurrencyCode, Price};
use partsgrid_client::models::ImportRow;
use partsgrid_client::services::products::ProductsService;
use partsgrid_client::upload_log::{UploadEntry, UploadLog};

use super::{CliContext, CliError};

/// Run the import and record it.
pub async fn run(ctx: &CliContext, file: &str) -> Result<(), CliError> {
    let path = Path::new(file);
    let contents = std::fs::read_to_string(path)
        .map_err(|e| CliError::InvalidArgument(format!("cannot read {file}: {e}")))?;

    let rows = parse_rows(&contents)?;
    if rows.is_empty() {
        return Err(CliError::InvalidArgument(format!("{file} has no rows")));
    }

    let summary = ProductsService::new(&ctx.client).import(&rows).await?;
    println!(
        "Imported {}/{} rows ({} failed)",
        summary.imported, summary.total, summary.failed
    );

    let log_path = upload_log_path();
    let mut log = UploadLog::load(&log_path).map_err(|e| CliError::InvalidArgument(e.to_string()))?;
    log.record(
        &format!("{}-{}", Utc::now().format("%Y-%m-%dT%H:%M:%S"), file),
        UploadEntry {
            file: file.to_string(),
            total_rows: summary.total,
            imported: summary.imported,
            failed: summary.failed,
            completed_at: Utc::now(),
        },
    );
    log.save(&log_path)
        .map_err(|e| CliError::InvalidArgument(e.to_string()))?;

    Ok(())
}

fn parse_rows(contents: &str) -> Result<Vec<ImportRow>, CliError> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(parse_row)
        .collect()
}

fn parse_row(line: &str) -> Result<ImportRow, CliError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let [sku, name, brand, category, price] = fields.as_slice() else {
        return Err(CliError::InvalidArgument(format!(
            "expected 5 comma-separated fields, got {}: {line}",
            fields.len()
        )));
    };
    let amount = Decimal::from_str(price)
        .map_err(|e| CliError::InvalidArgument(format!("bad price in '{line}': {e}")))?;
    Ok(ImportRow {
        sku: (*sku).to_string(),
        name: (*name).to_string(),
        brand: (*brand).to_string(),
        category: (*category).to_string(),
        price: Price::new(amount, CurrencyCode::INR),
    })
}

fn upload_log_path() -> PathBuf {
    std::env::var("HOME").map_or_else(
        |_| PathBuf::from(".partsgrid-uploads.json"),
        |home| PathBuf::from(home).join(".partsgrid").join("uploads.json"),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rows_skips_blanks_and_comments() {
        let contents = "\
# sku,name,brand,category,price
BP-100, Brake pad set, Brembo, brakes, 1499.00

OF-220, Oil filter, Bosch, filters, 349.50
";
        let rows = parse_rows(contents).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sku, "BP-100");
        assert_eq!(rows[1].price.amount, Decimal::new(34950, 2));
    }

    #[test]
    fn test_parse_row_rejects_short_lines() {
        assert!(parse_rows("just,three,fields").is_err());
    }

    #[test]
    fn test_parse_row_rejects_bad_price() {
        assert!(parse_rows("a,b,c,d,not-a-price").is_err());
    }
}
