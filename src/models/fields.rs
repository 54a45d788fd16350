/// Members of the bank-agnostic transaction schema that can be sourced from a file column.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum CanonicalField {
    TransactionId,
    OrderId,
    RefundOrderId,
    BankRefId,
    ArnNo,
    Mid,
    AcqId,
    Tid,
    CardNo,
    CardType,
    ApproveCode,
    BankNameReceiveFunds,
    NodalAccountNo,
    AggregatorName,
    AcquirerName,
    RefundFlag,
    PaymentsType,
    MopType,
    Remarks,
    UserName,
    ReconStatus,
    MprSummaryTrans,
    MerchantCode,
    RecFmt,
    GstNumber,
    PayableMerchant,
    GrossAmount,
    AggregatorCom,
    AcquirerComm,
    PayoutFromNodal,
    IntlAmount,
    DomesticAmount,
    TransactionDate,
    SettlementDate,
    RefundRequestDate,
    CreditDebitDate,
    FileUploadDate,
    CreditDebitAmount
}

impl CanonicalField {
    pub const AMOUNTS: [CanonicalField; 7] = [
        CanonicalField::PayableMerchant,
        CanonicalField::GrossAmount,
        CanonicalField::AggregatorCom,
        CanonicalField::AcquirerComm,
        CanonicalField::PayoutFromNodal,
        CanonicalField::IntlAmount,
        CanonicalField::DomesticAmount
    ];

    pub const DATES: [CanonicalField; 5] = [
        CanonicalField::TransactionDate,
        CanonicalField::SettlementDate,
        CanonicalField::RefundRequestDate,
        CanonicalField::CreditDebitDate,
        CanonicalField::FileUploadDate
    ];

    /// Column name of the field in the canonical schema.
    pub fn name(&self) -> &'static str {
        match self {
            CanonicalField::TransactionId => "Transaction_Id",
            CanonicalField::OrderId => "Order_Id",
            CanonicalField::RefundOrderId => "Refund_Order_Id",
            CanonicalField::BankRefId => "Bank_Ref_id",
            CanonicalField::ArnNo => "Arn_No",
            CanonicalField::Mid => "MID",
            CanonicalField::AcqId => "Acq_Id",
            CanonicalField::Tid => "Tid",
            CanonicalField::CardNo => "Card_No",
            CanonicalField::CardType => "Card_type",
            CanonicalField::ApproveCode => "Approve_code",
            CanonicalField::BankNameReceiveFunds => "BankName_Receive_Funds",
            CanonicalField::NodalAccountNo => "Nodal_Account_No",
            CanonicalField::AggregatorName => "Aggregator_Name",
            CanonicalField::AcquirerName => "Acquirer_Name",
            CanonicalField::RefundFlag => "Refund_Flag",
            CanonicalField::PaymentsType => "Payments_Type",
            CanonicalField::MopType => "MOP_Type",
            CanonicalField::Remarks => "Remarks",
            CanonicalField::UserName => "User_name",
            CanonicalField::ReconStatus => "Recon_Status",
            CanonicalField::MprSummaryTrans => "Mpr_Summary_Trans",
            CanonicalField::MerchantCode => "Merchant_code",
            CanonicalField::RecFmt => "Rec_Fmt",
            CanonicalField::GstNumber => "GST_Number",
            CanonicalField::PayableMerchant => "Payable_Merchant",
            CanonicalField::GrossAmount => "Gross_Amount",
            CanonicalField::AggregatorCom => "Aggregator_Com",
            CanonicalField::AcquirerComm => "Acquirer_Comm",
            CanonicalField::PayoutFromNodal => "Payout_from_Nodal",
            CanonicalField::IntlAmount => "Intl_Amount",
            CanonicalField::DomesticAmount => "Domestic_Amount",
            CanonicalField::TransactionDate => "Transaction_Date",
            CanonicalField::SettlementDate => "Settlement_Date",
            CanonicalField::RefundRequestDate => "Refund_Request_Date",
            CanonicalField::CreditDebitDate => "Credit_Debit_Date",
            CanonicalField::FileUploadDate => "File_upload_Date",
            CanonicalField::CreditDebitAmount => "Credit_Debit_Amount"
        }
    }
}
