//! Reading reward tables (CSV) and token catalogs (JSON) from disk.
//!
//! Table layout: the first column holds the hero id, `DifficultyScore` holds
//! the cost, every other column is a token type with the per-play yield.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::domain::catalog::TokenCatalog;
use crate::domain::table::{HeroRecord, RewardTable};
use crate::error::{DataError, Result};

pub const COST_COLUMN: &str = "DifficultyScore";

pub fn load_table(path: impl AsRef<Path>) -> Result<RewardTable> {
    let file = File::open(path.as_ref())?;
    let table = read_table(BufReader::new(file))?;
    log::info!(
        "Loaded {} heroes and {} token types from {}",
        table.len(),
        table.tokens().len(),
        path.as_ref().display()
    );
    Ok(table)
}

pub fn read_table<R: Read>(reader: R) -> Result<RewardTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let cost_idx = headers
        .iter()
        .position(|h| h == COST_COLUMN)
        .filter(|&idx| idx > 0)
        .ok_or_else(|| DataError::MissingColumn(COST_COLUMN.to_string()))?;

    let mut seen = HashSet::new();
    let mut token_columns = Vec::new();
    for (idx, name) in headers.iter().enumerate() {
        if idx == 0 || idx == cost_idx {
            continue;
        }
        if !seen.insert(name) {
            return Err(DataError::DuplicateToken(name.to_string()).into());
        }
        token_columns.push((idx, name));
    }

    let mut records = Vec::new();
    for (line, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row = line + 1;

        let id = record.get(0).unwrap_or_default();
        if id.is_empty() {
            return Err(DataError::EmptyHeroId { row }.into());
        }

        let cost = match record.get(cost_idx).unwrap_or_default() {
            "" => {
                return Err(DataError::InvalidNumber {
                    row,
                    column: COST_COLUMN.to_string(),
                    value: String::new(),
                }
                .into())
            }
            value => parse_number(row, COST_COLUMN, value)?,
        };

        let mut hero = HeroRecord::new(id, cost);
        for &(idx, token) in &token_columns {
            let amount = match record.get(idx).unwrap_or_default() {
                "" => 0.0,
                value => parse_number(row, token, value)?,
            };
            hero = hero.with_yield(token, amount);
        }
        records.push(hero);
    }

    Ok(RewardTable::new(records)?)
}

fn parse_number(row: usize, column: &str, value: &str) -> std::result::Result<f64, DataError> {
    value.parse::<f64>().map_err(|_| DataError::InvalidNumber {
        row,
        column: column.to_string(),
        value: value.to_string(),
    })
}

pub fn load_catalog(path: impl AsRef<Path>) -> Result<TokenCatalog> {
    let file = File::open(path.as_ref())?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Load the act catalog if the file exists, otherwise derive a single act
/// from the table. Catalog tokens missing from the table are reported.
pub fn load_catalog_or_default(path: impl AsRef<Path>, table: &RewardTable) -> Result<TokenCatalog> {
    if !path.as_ref().exists() {
        log::info!(
            "No act catalog at {}, using every table column",
            path.as_ref().display()
        );
        return Ok(TokenCatalog::from_table(table));
    }

    let catalog = load_catalog(path)?;
    for act in catalog.acts() {
        for token in act.tokens.iter().filter(|t| !table.has_token(t)) {
            log::warn!("Act {} lists token {} which is not a table column", act.name, token);
        }
    }
    Ok(catalog)
}
