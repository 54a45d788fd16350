use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::{CreditDebit, TransactionType};

/// A settlement row expressed in the canonical transaction schema.
///
/// Records only live between materialization and the batch commit. Serialized field names
/// follow the canonical column names so exports line up with the persistent schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRecord {
    #[serde(rename = "Transaction_type")]
    pub transaction_type: TransactionType,
    #[serde(rename = "Merchant_Name")]
    pub merchant_name: String,
    #[serde(rename = "Bank_Name")]
    pub bank_name: String,
    #[serde(rename = "MID")]
    pub mid: Option<String>,
    #[serde(rename = "Transaction_Id")]
    pub transaction_id: Option<String>,
    #[serde(rename = "Order_Id")]
    pub order_id: Option<String>,
    #[serde(rename = "Refund_Order_Id")]
    pub refund_order_id: Option<String>,
    #[serde(rename = "Bank_Ref_id")]
    pub bank_ref_id: Option<String>,
    #[serde(rename = "Arn_No")]
    pub arn_no: Option<String>,
    #[serde(rename = "Acq_Id")]
    pub acq_id: Option<String>,
    #[serde(rename = "Tid")]
    pub tid: Option<String>,
    #[serde(rename = "Card_No")]
    pub card_no: Option<String>,
    #[serde(rename = "Card_type")]
    pub card_type: Option<String>,
    #[serde(rename = "Approve_code")]
    pub approve_code: Option<String>,
    #[serde(rename = "Transaction_Date")]
    pub transaction_date: Option<NaiveDateTime>,
    #[serde(rename = "Settlement_Date")]
    pub settlement_date: Option<NaiveDateTime>,
    #[serde(rename = "Refund_Request_Date")]
    pub refund_request_date: Option<NaiveDateTime>,
    #[serde(rename = "Credit_Debit_Date")]
    pub credit_debit_date: Option<NaiveDateTime>,
    #[serde(rename = "File_upload_Date")]
    pub file_upload_date: Option<NaiveDateTime>,
    #[serde(rename = "Payable_Merchant")]
    pub payable_merchant: Option<Decimal>,
    #[serde(rename = "Gross_Amount")]
    pub gross_amount: Option<Decimal>,
    #[serde(rename = "Aggregator_Com")]
    pub aggregator_com: Option<Decimal>,
    #[serde(rename = "Acquirer_Comm")]
    pub acquirer_comm: Option<Decimal>,
    #[serde(rename = "Payout_from_Nodal")]
    pub payout_from_nodal: Option<Decimal>,
    #[serde(rename = "Intl_Amount")]
    pub intl_amount: Option<Decimal>,
    #[serde(rename = "Domestic_Amount")]
    pub domestic_amount: Option<Decimal>,
    #[serde(rename = "Credit_Debit_Amount")]
    pub credit_debit_amount: Option<CreditDebit>,
    #[serde(rename = "Recon_Status")]
    pub recon_status: Option<String>,
    #[serde(rename = "BankName_Receive_Funds")]
    pub bank_name_receive_funds: Option<String>,
    #[serde(rename = "Nodal_Account_No")]
    pub nodal_account_no: Option<String>,
    #[serde(rename = "Aggregator_Name")]
    pub aggregator_name: Option<String>,
    #[serde(rename = "Acquirer_Name")]
    pub acquirer_name: Option<String>,
    #[serde(rename = "Refund_Flag")]
    pub refund_flag: Option<String>,
    #[serde(rename = "Payments_Type")]
    pub payments_type: Option<String>,
    #[serde(rename = "MOP_Type")]
    pub mop_type: Option<String>,
    #[serde(rename = "Remarks")]
    pub remarks: Option<String>,
    #[serde(rename = "User_name")]
    pub user_name: Option<String>,
    #[serde(rename = "Mpr_Summary_Trans")]
    pub mpr_summary_trans: Option<String>,
    #[serde(rename = "Merchant_code")]
    pub merchant_code: Option<String>,
    #[serde(rename = "Rec_Fmt")]
    pub rec_fmt: Option<String>,
    #[serde(rename = "GST_Number")]
    pub gst_number: Option<String>,
    #[serde(rename = "UDF1")]
    pub udf1: Option<String>,
    #[serde(rename = "UDF2")]
    pub udf2: Option<String>,
    #[serde(rename = "UDF3")]
    pub udf3: Option<String>,
    #[serde(rename = "UDF4")]
    pub udf4: Option<String>,
    #[serde(rename = "UDF5")]
    pub udf5: Option<String>,
    #[serde(rename = "UDF6")]
    pub udf6: Option<String>
}

impl TransactionRecord {
    /// Creates a record with every sourced field missing.
    pub fn new(transaction_type: TransactionType, bank_name: &str, merchant_name: &str) -> Self {
        Self {
            transaction_type,
            merchant_name: merchant_name.to_string(),
            bank_name: bank_name.to_string(),
            mid: None,
            transaction_id: None,
            order_id: None,
            refund_order_id: None,
            bank_ref_id: None,
            arn_no: None,
            acq_id: None,
            tid: None,
            card_no: None,
            card_type: None,
            approve_code: None,
            transaction_date: None,
            settlement_date: None,
            refund_request_date: None,
            credit_debit_date: None,
            file_upload_date: None,
            payable_merchant: None,
            gross_amount: None,
            aggregator_com: None,
            acquirer_comm: None,
            payout_from_nodal: None,
            intl_amount: None,
            domestic_amount: None,
            credit_debit_amount: None,
            recon_status: None,
            bank_name_receive_funds: None,
            nodal_account_no: None,
            aggregator_name: None,
            acquirer_name: None,
            refund_flag: None,
            payments_type: None,
            mop_type: None,
            remarks: None,
            user_name: None,
            mpr_summary_trans: None,
            merchant_code: None,
            rec_fmt: None,
            gst_number: None,
            udf1: None,
            udf2: None,
            udf3: None,
            udf4: None,
            udf5: None,
            udf6: None
        }
    }
}
