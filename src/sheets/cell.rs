use google_sheets4::api::{CellData, CellFormat, ExtendedValue, NumberFormat};
use thiserror::Error;

use crate::domain::record::MemorizationRecord;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContractViolation {
    #[error("cannot build a date cell for a record without a date")]
    UndatedRecord,
}

/// The cell roles the grid uses. The set is closed and the format mapping
/// below is exhaustive, so an unknown cell type cannot exist at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Date,
    Duration,
}

impl CellKind {
    pub fn number_format(&self) -> NumberFormat {
        let (type_, pattern) = match self {
            CellKind::Date => ("DATE", "dd/mm/yyyy"),
            CellKind::Duration => ("TIME", "[m]:ss"),
        };
        NumberFormat {
            type_: Some(type_.to_string()),
            pattern: Some(pattern.to_string()),
        }
    }
}

pub trait CellDataFactory: Sized {
    /// Date cell carrying the record's serial date. The caller must have
    /// filtered out records without a date beforehand.
    fn date_cell(record: &MemorizationRecord) -> Result<Self, ContractViolation>;
    fn duration_cell(record: &MemorizationRecord) -> Self;
    fn header_cell(label: &str) -> Self;
}

impl CellDataFactory for CellData {
    fn date_cell(record: &MemorizationRecord) -> Result<Self, ContractViolation> {
        let serial_date = record
            .serial_date()
            .ok_or(ContractViolation::UndatedRecord)?;
        Ok(number_cell(serial_date as f64, CellKind::Date))
    }

    fn duration_cell(record: &MemorizationRecord) -> Self {
        number_cell(record.serial_duration(), CellKind::Duration)
    }

    fn header_cell(label: &str) -> Self {
        CellData {
            user_entered_value: Some(ExtendedValue {
                string_value: Some(label.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}

fn number_cell(value: f64, kind: CellKind) -> CellData {
    CellData {
        user_entered_value: Some(ExtendedValue {
            number_value: Some(value),
            ..Default::default()
        }),
        user_entered_format: Some(CellFormat {
            number_format: Some(kind.number_format()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::MemorizationRecord;

    fn number_format_of(cell: &CellData) -> NumberFormat {
        cell.user_entered_format
            .clone()
            .unwrap()
            .number_format
            .unwrap()
    }

    #[test]
    fn test_date_cell_value_and_format() {
        let record = MemorizationRecord::parse("2023-01-15", "03:45").unwrap();
        let cell = CellData::date_cell(&record).unwrap();
        assert_eq!(
            cell.user_entered_value.clone().unwrap().number_value,
            Some(record.serial_date().unwrap() as f64)
        );
        let format = number_format_of(&cell);
        assert_eq!(format.type_.as_deref(), Some("DATE"));
        assert_eq!(format.pattern.as_deref(), Some("dd/mm/yyyy"));
    }

    #[test]
    fn test_date_cell_for_undated_record_is_a_contract_violation() {
        let record = MemorizationRecord::parse("", "03:45").unwrap();
        assert_eq!(
            CellData::date_cell(&record).unwrap_err(),
            ContractViolation::UndatedRecord
        );
    }

    #[test]
    fn test_duration_cell_value_and_format() {
        let record = MemorizationRecord::parse("", "125:07").unwrap();
        let cell = CellData::duration_cell(&record);
        assert_eq!(
            cell.user_entered_value.clone().unwrap().number_value,
            Some(0.086886574)
        );
        let format = number_format_of(&cell);
        assert_eq!(format.type_.as_deref(), Some("TIME"));
        assert_eq!(format.pattern.as_deref(), Some("[m]:ss"));
    }

    #[test]
    fn test_header_cell_has_no_number_format() {
        let cell = CellData::header_cell("Date");
        assert_eq!(
            cell.user_entered_value.unwrap().string_value.as_deref(),
            Some("Date")
        );
        assert!(cell.user_entered_format.is_none());
    }
}
