//! Batch item import from CSV.
//!
//! Columns: `name,type,length,width,height` and optionally `location_id`.
//! Every row goes through `Warehouse::create_item`, so it is validated and
//! fit-checked like a single create. Rows that fail are reported, not fatal.

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Serialize;
use std::path::Path;
use stowage::model::{ItemId, LocationId, NewItem};
use stowage::service::{ItemStore, LocationStore, Warehouse};

/// One parsed CSV row. Missing cells become empty strings / NaN and are
/// caught by payload validation.
#[derive(Clone, Debug)]
pub struct ImportRow {
    pub row: usize,
    pub location_id: Option<LocationId>,
    pub item: NewItem,
}

#[derive(Clone, Debug, Serialize)]
pub struct RowOutcome {
    pub row: usize,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<ItemId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<LocationId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ImportReport {
    pub rows: usize,
    pub accepted: Vec<RowOutcome>,
    pub rejected: Vec<RowOutcome>,
}

pub fn read_rows(path: &Path) -> Result<Vec<ImportRow>> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening {}", path.display()))?
        .collect()
        .with_context(|| format!("reading {}", path.display()))?;
    tracing::debug!(rows = df.height(), cols = df.width(), "import_csv_shape");

    let names = string_column(&df, "name")?;
    let kinds = string_column(&df, "type")?;
    let lengths = float_column(&df, "length")?;
    let widths = float_column(&df, "width")?;
    let heights = float_column(&df, "height")?;
    let locations = match df.column("location_id") {
        Ok(_) => Some(int_column(&df, "location_id")?),
        Err(_) => None,
    };

    let rows = (0..df.height())
        .map(|i| ImportRow {
            row: i + 1,
            location_id: locations
                .as_ref()
                .and_then(|col| col[i])
                .map(LocationId),
            item: NewItem {
                name: names[i].clone().unwrap_or_default(),
                kind: kinds[i].clone().unwrap_or_default(),
                length: lengths[i].unwrap_or(f64::NAN),
                width: widths[i].unwrap_or(f64::NAN),
                height: heights[i].unwrap_or(f64::NAN),
            },
        })
        .collect();
    Ok(rows)
}

/// Create every row; a row's own `location_id` wins over `default_location`.
pub fn import_rows<S: LocationStore + ItemStore>(
    warehouse: &mut Warehouse<S>,
    rows: Vec<ImportRow>,
    default_location: Option<LocationId>,
) -> ImportReport {
    let mut report = ImportReport {
        rows: rows.len(),
        ..ImportReport::default()
    };
    for ImportRow {
        row,
        location_id,
        item,
    } in rows
    {
        let name = item.name.clone();
        let Some(location_id) = location_id.or(default_location) else {
            report.rejected.push(RowOutcome {
                row,
                name,
                item_id: None,
                location_id: None,
                code: Some("validation"),
                message: Some("row has no location_id and no --location was given".into()),
            });
            continue;
        };
        match warehouse.create_item(location_id, item) {
            Ok(created) => report.accepted.push(RowOutcome {
                row,
                name,
                item_id: Some(created.id),
                location_id: Some(location_id),
                code: None,
                message: None,
            }),
            Err(err) => {
                tracing::warn!(row, code = err.code(), error = %err, "import_row_rejected");
                report.rejected.push(RowOutcome {
                    row,
                    name,
                    item_id: None,
                    location_id: Some(location_id),
                    code: Some(err.code()),
                    message: Some(err.detail().unwrap_or_else(|| err.to_string())),
                });
            }
        }
    }
    report
}

fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series> {
    df.column(name)
        .with_context(|| format!("missing column `{name}`"))
}

fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let s = column(df, name)?.cast(&DataType::String)?;
    Ok(s.str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

fn float_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let s = column(df, name)?.cast(&DataType::Float64)?;
    Ok(s.f64()?.into_iter().collect())
}

fn int_column(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    let s = column(df, name)?.cast(&DataType::Int64)?;
    Ok(s.i64()?.into_iter().collect())
}
