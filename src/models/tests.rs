use super::{CanonicalField, Chunk, Frame};
use crate::types::{CreditDebit, Timestamp};
use anyhow::Result;
use rust_decimal::Decimal;
use std::str::FromStr;

fn text_row(values: &[&str]) -> Vec<Option<String>> {
    values.iter().map(|value| Some(value.to_string())).collect()
}

fn create_frame(headers: &[&str], rows: &[&[&str]]) -> Frame {
    let headers = headers.iter().map(|header| header.to_string()).collect();
    let rows = rows.iter().map(|row| text_row(row)).collect();

    Frame::from_chunk(Chunk::new(headers, rows))
}

#[test]
fn test_frame_pads_short_rows_and_drops_empty_cells() {
    let frame = create_frame(&["A", "B", "C"], &[&["1", "", "3"], &["4"]]);

    assert_eq!(frame.row_count(), 2);
    assert_eq!(frame.text("A", 1).as_deref(), Some("4"));
    assert_eq!(frame.text("B", 0), None);
    assert_eq!(frame.text("C", 1), None);
    assert_eq!(frame.text("Missing", 0), None);
}

#[test]
fn test_frame_renames_only_known_columns() {
    let mut frame = create_frame(&["NETAMT", "EXTRA"], &[&["10", "x"]]);

    frame.rename_columns(|name| (name == "NETAMT").then_some(CanonicalField::PayableMerchant.name()));

    let headers: Vec<&str> = frame.headers().collect();

    assert_eq!(headers, vec!["Payable_Merchant", "EXTRA"]);
}

#[test]
fn test_frame_coerces_amount_columns_in_place() -> Result<()> {
    let mut frame = create_frame(&["Amount"], &[&["1,234.50"], &["abc"], &[""]]);

    assert!(frame.coerce_amounts("Amount"));
    assert!(!frame.coerce_amounts("Absent"));

    assert_eq!(frame.amount("Amount", 0), Some(Decimal::from_str("1234.50")?));
    assert_eq!(frame.amount("Amount", 1), None);
    assert_eq!(frame.amount("Amount", 2), None);

    Ok(())
}

#[test]
fn test_frame_marks_unparseable_dates_as_not_a_time() {
    let mut frame = create_frame(&["When"], &[&["2024-01-15"], &["someday"]]);

    assert!(frame.coerce_dates("When"));

    assert!(matches!(frame.timestamp("When", 0), Some(Timestamp::At(_))));
    assert_eq!(frame.timestamp("When", 1), Some(Timestamp::NotATime));
    assert_eq!(frame.timestamp("Absent", 0), None);
}

#[test]
fn test_frame_derives_direction_from_filled_amounts() -> Result<()> {
    let mut frame = create_frame(&["Net"], &[&["-50.00"], &["50.00"], &["0.00"], &["bad"]]);

    frame.coerce_amounts("Net");
    frame.fill_missing_amounts("Net", Decimal::ZERO);
    frame.derive_direction("Net", "Direction");

    assert_eq!(frame.direction("Direction", 0), Some(CreditDebit::Debit));
    assert_eq!(frame.direction("Direction", 1), Some(CreditDebit::Credit));
    assert_eq!(frame.direction("Direction", 2), None);
    assert_eq!(frame.direction("Direction", 3), None);
    assert_eq!(frame.amount("Net", 3), Some(Decimal::ZERO));

    Ok(())
}

#[test]
fn test_canonical_field_groups_and_names() {
    assert!(CanonicalField::AMOUNTS.contains(&CanonicalField::PayableMerchant));
    assert!(CanonicalField::DATES.contains(&CanonicalField::SettlementDate));
    assert!(!CanonicalField::AMOUNTS.contains(&CanonicalField::Mid));
    assert!(!CanonicalField::DATES.contains(&CanonicalField::Mid));
    assert_eq!(CanonicalField::BankRefId.name(), "Bank_Ref_id");
}

#[test]
fn test_frame_keeps_file_position_of_first_row() {
    let frame = Frame::from_chunk(Chunk::new(vec!["A".to_string()], vec![vec![Some("1".to_string())]]).with_position(3, 150));

    assert_eq!(frame.first_row(), 150);
}
