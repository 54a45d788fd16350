use std::collections::{BTreeSet, HashMap, HashSet};
use std::str::FromStr;

use crate::models::CanonicalField;
use crate::schema::errors::SchemaError;
use crate::schema::normalize;
use crate::types::{BankCode, TransactionType};

/// Which upload type a schema applies to. `Both` serves booking and refund files alike.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum SchemaVariant {
    Booking,
    Refund,
    Both
}

impl From<TransactionType> for SchemaVariant {
    fn from(transaction_type: TransactionType) -> Self {
        match transaction_type {
            TransactionType::Booking => SchemaVariant::Booking,
            TransactionType::Refund => SchemaVariant::Refund,
            TransactionType::Both => SchemaVariant::Both
        }
    }
}

struct SchemaRow {
    bank: &'static str,
    variant: SchemaVariant,
    columns: &'static [&'static str],
    mapping: &'static [(&'static str, CanonicalField)]
}

const BANK_CODES: [(&str, BankCode); 3] = [
    ("hdfc", 101),
    ("icici", 102),
    ("karur_vysya", 40),
];

const OWN_MID_BANKS: [&str; 3] = ["hdfc", "icici", "indus"];

const SIGNED_SETTLEMENT_BANKS: [&str; 1] = ["icici"];

const SCHEMA_TABLE: [SchemaRow; 3] = [
    SchemaRow {
        bank: "karur_vysya",
        variant: SchemaVariant::Booking,
        columns: &["TXN DATE", "IRCTC ORDER NO.", "BANK BOOKING REF.NO.", "BOOKING AMOUNT", "CREDITED ON"],
        mapping: &[
            ("IRCTCORDERNO", CanonicalField::OrderId),
            ("BANKBOOKINGREFNO", CanonicalField::BankRefId),
            ("BOOKINGAMOUNT", CanonicalField::PayableMerchant),
            ("TXNDATE", CanonicalField::TransactionDate),
            ("CREDITEDON", CanonicalField::SettlementDate),
        ]
    },
    SchemaRow {
        bank: "karur_vysya",
        variant: SchemaVariant::Refund,
        columns: &["REFUND DATE", "IRCTC ORDER NO.", "BANK BOOKING REF.NO.", "BANK REFUND REF.NO.", "REFUND AMOUNT", "DEBITED ON"],
        mapping: &[
            ("IRCTCORDERNO", CanonicalField::OrderId),
            ("REFUNDAMOUNT", CanonicalField::PayableMerchant),
            ("DEBITEDON", CanonicalField::SettlementDate),
            ("REFUNDDATE", CanonicalField::TransactionDate),
            ("BANKBOOKINGREFNO", CanonicalField::BankRefId),
            ("BANKREFUNDREFNO", CanonicalField::RefundOrderId),
        ]
    },
    SchemaRow {
        bank: "icici",
        variant: SchemaVariant::Both,
        columns: &["POST DATE", "FT NO.", "SESSION ID [ASPD]", "ARN NO", "MID", "TRANSACTION DATE", "NET AMT", "CARD NUMBER", "CARD TYPE", "TID"],
        mapping: &[
            ("TRANSACTIONDATE", CanonicalField::TransactionDate),
            ("SESSIONID", CanonicalField::OrderId),
            ("FTNO", CanonicalField::TransactionId),
            ("ARNNO", CanonicalField::ArnNo),
            ("MID", CanonicalField::Mid),
            ("POSTDATE", CanonicalField::SettlementDate),
            ("NETAMT", CanonicalField::PayableMerchant),
            ("CARDNUMBER", CanonicalField::CardNo),
            ("CARDTYPE", CanonicalField::CardType),
            ("TID", CanonicalField::Tid),
        ]
    },
];

/// Column layout of one bank report variant.
#[derive(Debug, Clone)]
pub struct BankSchema {
    pub bank: String,
    pub variant: SchemaVariant,
    expected_headers: BTreeSet<String>,
    rename_map: HashMap<String, CanonicalField>
}

impl BankSchema {
    /// Builds a schema from raw report column names, normalizing both the expected columns
    /// and the rename keys so they compare against normalized file headers.
    pub fn new(bank: &str, variant: SchemaVariant, columns: &[&str], mapping: &[(&str, CanonicalField)]) -> Self {
        Self {
            bank: bank.to_string(),
            variant,
            expected_headers: columns.iter().map(|column| normalize(column)).collect(),
            rename_map: mapping.iter().map(|(header, field)| (normalize(header), *field)).collect()
        }
    }

    /// Expected headers that do not appear among `present`.
    pub fn missing_headers<'a, I>(&self, present: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let present: HashSet<&str> = present.into_iter().collect();

        self.expected_headers.iter()
            .filter(|header| !present.contains(header.as_str()))
            .cloned()
            .collect()
    }

    /// Canonical field a normalized header is renamed to, if any.
    pub fn target(&self, header: &str) -> Option<CanonicalField> {
        self.rename_map.get(header).copied()
    }
}

/// Lookup tables for every bank the pipeline understands.
///
/// Banks are data, not code: supporting a new one means adding rows to the tables.
#[derive(Debug, Clone, Default)]
pub struct BankSchemaRegistry {
    schemas: HashMap<(String, SchemaVariant), BankSchema>,
    bank_codes: HashMap<String, BankCode>,
    own_mid_banks: HashSet<String>,
    signed_settlement_banks: HashSet<String>
}

impl BankSchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry populated with the built-in bank tables.
    pub fn builtin() -> Self {
        let registry = SCHEMA_TABLE.iter().fold(Self::new(), |registry, row| {
            registry.with_schema(BankSchema::new(row.bank, row.variant, row.columns, row.mapping))
        });

        let registry = BANK_CODES.iter()
            .fold(registry, |registry, (bank, code)| registry.with_bank_code(bank, *code));

        let registry = OWN_MID_BANKS.iter()
            .fold(registry, |registry, bank| registry.with_own_mid_bank(bank));

        SIGNED_SETTLEMENT_BANKS.iter()
            .fold(registry, |registry, bank| registry.with_signed_settlement_bank(bank))
    }

    pub fn with_schema(mut self, schema: BankSchema) -> Self {
        self.schemas.insert((schema.bank.clone(), schema.variant), schema);
        self
    }

    pub fn with_bank_code(mut self, bank: &str, code: BankCode) -> Self {
        self.bank_codes.insert(bank.to_string(), code);
        self
    }

    pub fn with_own_mid_bank(mut self, bank: &str) -> Self {
        self.own_mid_banks.insert(bank.to_string());
        self
    }

    pub fn with_signed_settlement_bank(mut self, bank: &str) -> Self {
        self.signed_settlement_banks.insert(bank.to_string());
        self
    }

    /// Finds the schema for a bank and upload type.
    ///
    /// The exact variant wins, otherwise the bank's `Both` schema applies.
    ///
    /// # Errors
    /// Returns `SchemaError::NotFound` when the bank has neither.
    pub fn resolve(&self, bank: &str, transaction_type: &str) -> Result<&BankSchema, SchemaError> {
        let exact = TransactionType::from_str(transaction_type).ok()
            .and_then(|transaction_type| self.schemas.get(&(bank.to_string(), SchemaVariant::from(transaction_type))));

        exact.or_else(|| self.schemas.get(&(bank.to_string(), SchemaVariant::Both)))
            .ok_or_else(|| SchemaError::NotFound {
                bank: bank.to_string(),
                transaction_type: transaction_type.to_string()
            })
    }

    /// Numeric code substituted as MID for banks that do not report their own.
    pub fn bank_id(&self, bank: &str) -> Result<BankCode, SchemaError> {
        self.bank_codes.get(bank).copied()
            .ok_or_else(|| SchemaError::UnknownBank(bank.to_string()))
    }

    pub fn reports_own_mid(&self, bank: &str) -> bool {
        self.own_mid_banks.contains(bank)
    }

    /// Banks whose net settlement amount carries a sign that encodes credit or debit.
    pub fn reports_signed_settlement(&self, bank: &str) -> bool {
        self.signed_settlement_banks.contains(bank)
    }
}
