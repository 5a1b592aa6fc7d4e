//! Loan detail models
//!
//! Money and rate fields are exact decimals.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Response of `GET /v1/loans/{loanId}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    /// Core loan facts
    pub loan: LoanDetails,
    /// Loan originator section, kept as returned
    pub originator: Value,
    /// Borrower section, kept as returned
    pub borrower: Value,
    /// Repayment schedule section, kept as returned
    pub schedule: Value,
    /// Pledge section, kept as returned
    pub pledge: Value,
}

/// Core facts about a loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanDetails {
    #[serde(deserialize_with = "string_or_number")]
    pub loan_id: String,
    pub country_id: i64,
    pub country_iso: String,
    /// Originator name (the API spells the key `loanOrignator`)
    #[serde(rename = "loanOrignator")]
    pub loan_originator: String,
    pub originator_id: i64,
    pub issued_date: NaiveDate,
    pub final_payment_date: NaiveDate,
    /// e.g. `BUSINESS`
    pub term_type: String,
    pub status: String,
    pub interest_rate: Decimal,
    pub loan_amount: Decimal,
    pub assigned_amount: Decimal,
    pub available_to_invest: Decimal,
    pub minimum_investment_amount: Decimal,
    pub invested_amount: Decimal,
    pub currency_sign: String,
    pub buyback: bool,
    pub sellback: bool,
    pub days: i64,
    #[serde(rename = "order_position")]
    pub order_position: i64,
}

/// Accept an id sent either as a JSON string or a JSON number
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, found {other}"
        ))),
    }
}
