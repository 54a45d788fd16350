use std::str::FromStr;

use chrono::NaiveDateTime;
use tracing::{error, warn};

use crate::engine::errors::RowError;
use crate::models::{CanonicalField, Frame, TransactionRecord};
use crate::schema::BankSchemaRegistry;
use crate::types::{Timestamp, TransactionType};

/// Records ready for commit plus the rows that could not be built.
#[derive(Debug, Default)]
pub struct MaterializedBatch {
    pub records: Vec<TransactionRecord>,
    pub failures: Vec<RowError>
}

/// Turns coerced frame rows into canonical transaction records.
pub struct Materializer<'a> {
    registry: &'a BankSchemaRegistry
}

impl<'a> Materializer<'a> {
    pub fn new(registry: &'a BankSchemaRegistry) -> Self {
        Self { registry }
    }

    /// Builds one record per row in file order. Failing rows are logged and counted, the rest
    /// of the frame is still materialized.
    pub fn materialize(&self, frame: &mut Frame, bank: &str, transaction_type: &str, merchant: &str) -> MaterializedBatch {
        //NOTE: Money and date columns that the chunk processor did not already coerce are coerced here
        for field in CanonicalField::AMOUNTS {
            frame.coerce_amounts(field.name());
        }

        for field in CanonicalField::DATES {
            frame.coerce_dates(field.name());
        }

        let mut batch = MaterializedBatch {
            records: Vec::with_capacity(frame.row_count()),
            failures: Vec::new()
        };

        for row in 0..frame.row_count() {
            match self.materialize_row(frame, row, bank, transaction_type, merchant) {
                Ok(record) => batch.records.push(record),
                Err(error) => {
                    error!("{error}. Skipping.");
                    batch.failures.push(error);
                }
            }
        }

        batch
    }

    fn materialize_row(&self, frame: &Frame, row: usize, bank: &str, transaction_type: &str, merchant: &str) -> Result<TransactionRecord, RowError> {
        let position = frame.first_row() + row;

        let transaction_type = TransactionType::from_str(transaction_type)
            .map_err(|_| RowError::InvalidTransactionType { row: position, transaction_type: transaction_type.to_string() })?;

        let mid = if self.registry.reports_own_mid(bank) {
            frame.text(CanonicalField::Mid.name(), row)
        } else {
            let code = self.registry.bank_id(bank)
                .map_err(|_| RowError::UnknownBankCode { row: position, bank: bank.to_string() })?;
            Some(code.to_string())
        };

        let text = |field: CanonicalField| frame.text(field.name(), row);
        let amount = |field: CanonicalField| frame.amount(field.name(), row);

        let mut record = TransactionRecord::new(transaction_type, bank, merchant);

        record.mid = mid;
        record.transaction_id = text(CanonicalField::TransactionId);
        record.order_id = text(CanonicalField::OrderId);
        record.refund_order_id = text(CanonicalField::RefundOrderId);
        record.bank_ref_id = text(CanonicalField::BankRefId);
        record.arn_no = text(CanonicalField::ArnNo);
        record.acq_id = text(CanonicalField::AcqId);
        record.tid = text(CanonicalField::Tid);
        record.card_no = text(CanonicalField::CardNo);
        record.card_type = text(CanonicalField::CardType);
        record.approve_code = text(CanonicalField::ApproveCode);
        record.bank_name_receive_funds = text(CanonicalField::BankNameReceiveFunds);
        record.nodal_account_no = text(CanonicalField::NodalAccountNo);
        record.aggregator_name = text(CanonicalField::AggregatorName);
        record.acquirer_name = text(CanonicalField::AcquirerName);
        record.refund_flag = text(CanonicalField::RefundFlag);
        record.payments_type = text(CanonicalField::PaymentsType);
        record.mop_type = text(CanonicalField::MopType);
        record.remarks = text(CanonicalField::Remarks);
        record.user_name = text(CanonicalField::UserName);
        record.recon_status = text(CanonicalField::ReconStatus);
        record.mpr_summary_trans = text(CanonicalField::MprSummaryTrans);
        record.merchant_code = text(CanonicalField::MerchantCode);
        record.rec_fmt = text(CanonicalField::RecFmt);
        record.gst_number = text(CanonicalField::GstNumber);

        record.payable_merchant = amount(CanonicalField::PayableMerchant);
        record.gross_amount = amount(CanonicalField::GrossAmount);
        record.aggregator_com = amount(CanonicalField::AggregatorCom);
        record.acquirer_comm = amount(CanonicalField::AcquirerComm);
        record.payout_from_nodal = amount(CanonicalField::PayoutFromNodal);
        record.intl_amount = amount(CanonicalField::IntlAmount);
        record.domestic_amount = amount(CanonicalField::DomesticAmount);

        record.credit_debit_amount = frame.direction(CanonicalField::CreditDebitAmount.name(), row);

        let [transaction_date, settlement_date, refund_request_date, credit_debit_date, file_upload_date] =
            CanonicalField::DATES.map(|field| clear_not_a_time(field, frame.timestamp(field.name(), row), record.transaction_id.as_deref()));

        record.transaction_date = transaction_date;
        record.settlement_date = settlement_date;
        record.refund_request_date = refund_request_date;
        record.credit_debit_date = credit_debit_date;
        record.file_upload_date = file_upload_date;

        Ok(record)
    }
}

/// Rewrites the not-a-time marker to a missing value. Records never carry a default date.
fn clear_not_a_time(field: CanonicalField, timestamp: Option<Timestamp>, transaction_id: Option<&str>) -> Option<NaiveDateTime> {
    match timestamp? {
        Timestamp::At(datetime) => Some(datetime),
        Timestamp::NotATime => {
            warn!(
                "Encountered NaT in {}, setting to None for transaction ID: {}",
                field.name(),
                transaction_id.unwrap_or("Unknown")
            );
            None
        }
    }
}
