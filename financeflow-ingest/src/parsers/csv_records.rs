//! CSV exports of parsed transactions.
//!
//! Header row required; column names are matched case-insensitively:
//!   date,description,amount,type,payee,category,confidence
//! Unknown columns are ignored, missing ones become absent fields.

use std::io::Read;

use anyhow::{Context, Result};
use financeflow_core::RawTransaction;
use serde_json::Value;

#[derive(Debug, Clone, Copy)]
enum Column {
    Date,
    Description,
    Amount,
    Kind,
    Payee,
    Category,
    Confidence,
}

fn column_for(header: &str) -> Option<Column> {
    match header.trim().to_lowercase().as_str() {
        "date" | "transaction date" | "txn date" => Some(Column::Date),
        "description" | "narration" | "details" => Some(Column::Description),
        "amount" => Some(Column::Amount),
        "type" | "kind" => Some(Column::Kind),
        "payee" => Some(Column::Payee),
        "category" => Some(Column::Category),
        "confidence" => Some(Column::Confidence),
        _ => None,
    }
}

pub fn parse_csv_records<R: Read>(reader: R) -> Result<Vec<RawTransaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns: Vec<Option<Column>> = rdr
        .headers()
        .context("read CSV header")?
        .iter()
        .map(column_for)
        .collect();

    let mut out = Vec::new();
    for (index, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {}", index + 2))?;
        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }

        let mut raw = RawTransaction::default();
        for (cell, column) in record.iter().zip(&columns) {
            let Some(column) = column else { continue };
            if cell.is_empty() {
                continue;
            }
            let value = Some(Value::String(cell.to_string()));
            match column {
                Column::Date => raw.date = value,
                Column::Description => raw.description = value,
                Column::Amount => raw.amount = value,
                Column::Kind => raw.kind = value,
                Column::Payee => raw.payee = value,
                Column::Category => raw.category = value,
                Column::Confidence => raw.confidence = value,
            }
        }
        out.push(raw);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use financeflow_core::TransactionType;
    use serde_json::json;

    #[test]
    fn test_parse_basic_csv() {
        let data = "\
Date,Description,Amount,Type,Notes
2024-03-15,UPI Payment to Zomato,\"1,450.00\",debit,lunch
2024-03-16,Salary,50000,credit,
,,,,
";
        let records = parse_csv_records(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].amount, Some(json!("1,450.00")));
        assert_eq!(records[0].coerce().amount, 1450.0);
        assert_eq!(records[1].coerce().kind, TransactionType::Income);
        assert!(records[1].payee.is_none());
    }

    #[test]
    fn test_short_rows_are_tolerated() {
        let data = "description,amount,category\nNetflix\n";
        let records = parse_csv_records(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].amount.is_none());
        assert_eq!(records[0].coerce().description, "Netflix");
    }
}
