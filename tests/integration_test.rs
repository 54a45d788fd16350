use std::collections::HashMap;
use std::path::Path;
use std::process::{Command, Output};
use anyhow::{anyhow, Result};

fn run_binary(sample: &str, bank: &str, transaction_type: &str) -> Result<Output> {
    let binary_path = env!("CARGO_BIN_EXE_settlement-recon");
    let sample_path = Path::new("samples").join(sample);

    let output = Command::new(binary_path)
        .arg(sample_path)
        .args(["--bank", bank])
        .args(["--transaction-type", transaction_type])
        .args(["--merchant", "IRCTC"])
        .args(["--max-retries", "0"])
        .args(["--log-level", "error"])
        .output()?;

    Ok(output)
}

fn parse_records(stdout: &[u8]) -> Result<Vec<HashMap<String, String>>> {
    let mut reader = csv::Reader::from_reader(stdout);
    let headers = reader.headers()?.clone();
    let mut records = Vec::new();

    for row in reader.records() {
        let row = row?;
        records.push(headers.iter().zip(row.iter()).map(|(header, value)| (header.to_string(), value.to_string())).collect());
    }

    Ok(records)
}

fn field<'a>(record: &'a HashMap<String, String>, name: &str) -> Result<&'a str> {
    record.get(name).map(String::as_str).ok_or_else(|| anyhow!("column {name} missing from output"))
}

#[test]
fn test_cli_exports_karur_vysya_booking_records() -> Result<()> {
    let output = run_binary("karur_vysya_booking.csv", "karur_vysya", "booking")?;

    assert!(output.status.success());

    let records = parse_records(&output.stdout)?;

    assert_eq!(records.len(), 3);

    let first = &records[0];

    assert_eq!(field(first, "Transaction_type")?, "booking");
    assert_eq!(field(first, "Bank_Name")?, "karur_vysya");
    assert_eq!(field(first, "Merchant_Name")?, "IRCTC");
    assert_eq!(field(first, "MID")?, "40");
    assert_eq!(field(first, "Order_Id")?, "100012345");
    assert_eq!(field(first, "Bank_Ref_id")?, "KVB0001");
    assert_eq!(field(first, "Payable_Merchant")?, "1234.50");
    assert_eq!(field(first, "Transaction_Date")?, "2024-01-15T00:00:00");
    assert_eq!(field(first, "Settlement_Date")?, "2024-01-16T00:00:00");
    assert_eq!(field(first, "Credit_Debit_Amount")?, "");

    assert_eq!(field(&records[2], "Payable_Merchant")?, "");

    Ok(())
}

#[test]
fn test_cli_derives_direction_from_signed_settlement() -> Result<()> {
    let output = run_binary("icici_settlement.csv", "icici", "refund")?;

    assert!(output.status.success());

    let records = parse_records(&output.stdout)?;
    let directions: Vec<&str> = records.iter()
        .map(|record| field(record, "Credit_Debit_Amount"))
        .collect::<Result<_>>()?;

    assert_eq!(directions, vec!["DEBIT", "CREDIT", ""]);
    assert_eq!(field(&records[0], "MID")?, "ICI900");
    assert_eq!(field(&records[0], "Transaction_Id")?, "FT0001");
    assert_eq!(field(&records[2], "MID")?, "ICI901");
    assert_eq!(field(&records[0], "Transaction_Date")?, "2024-01-15T10:15:00");

    Ok(())
}

#[test]
fn test_cli_reads_workbook_upload() -> Result<()> {
    let output = run_binary("karur_vysya_booking.xlsx", "karur_vysya", "booking")?;

    assert!(output.status.success());

    let records = parse_records(&output.stdout)?;

    assert_eq!(records.len(), 2);
    assert_eq!(field(&records[0], "Order_Id")?, "100012345");
    assert_eq!(field(&records[0], "Payable_Merchant")?, "1234.5");
    assert_eq!(field(&records[0], "Transaction_Date")?, "2024-01-15T00:00:00");
    assert_eq!(field(&records[1], "Payable_Merchant")?, "");

    Ok(())
}

#[test]
fn test_cli_skips_file_with_missing_columns() -> Result<()> {
    let output = run_binary("karur_vysya_renamed_header.csv", "karur_vysya", "booking")?;

    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    Ok(())
}

#[test]
fn test_cli_rejects_empty_upload() -> Result<()> {
    let output = run_binary("empty.csv", "karur_vysya", "booking")?;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    Ok(())
}
