use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::charge::Charge;
use crate::correction::Correction;
use crate::entity::{entity_conversions, DocType, Record};
use crate::error::{TypeError, TypeResult};
use crate::keys;
use crate::status::SettlementStatus;

/// Currency used when a settlement does not name one.
pub const DEFAULT_CURRENCY: &str = "USD";

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// Periodic bilateral financial summary: what the payor (home agency) owes
/// the payee (away agency) for one period.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    #[serde(rename = "settlementID", default)]
    pub settlement_id: String,
    #[serde(rename = "payorAgencyID", default)]
    pub payor_agency_id: String,
    #[serde(rename = "payeeAgencyID", default)]
    pub payee_agency_id: String,
    #[serde(default, deserialize_with = "crate::blank::optional")]
    pub period_start: Option<NaiveDate>,
    #[serde(default, deserialize_with = "crate::blank::optional")]
    pub period_end: Option<NaiveDate>,
    #[serde(default)]
    pub charge_count: u32,
    #[serde(default)]
    pub correction_count: u32,
    #[serde(default)]
    pub gross_amount: Decimal,
    #[serde(default)]
    pub fee_amount: Decimal,
    /// Net effect of corrections; may be negative.
    #[serde(default)]
    pub correction_amount: Decimal,
    #[serde(default)]
    pub net_amount: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default, deserialize_with = "crate::blank::optional")]
    pub status: Option<SettlementStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Settlement {
    /// `gross - fees + corrections`, the value `net_amount` must equal.
    /// `None` if the result is not representable.
    pub fn expected_net(&self) -> Option<Decimal> {
        self.gross_amount
            .checked_sub(self.fee_amount)?
            .checked_add(self.correction_amount)
    }
}

impl Record for Settlement {
    const DOC_TYPE: DocType = DocType::Settlement;

    fn key(&self) -> String {
        keys::settlement_key(&self.settlement_id)
    }

    fn partition_name(&self) -> Option<String> {
        Some(keys::settlement_partition(
            &self.payor_agency_id,
            &self.payee_agency_id,
        ))
    }

    fn stamp_created(&mut self, at: DateTime<Utc>) {
        self.created_at = Some(at);
        self.updated_at = Some(at);
    }

    fn stamp_updated(&mut self, at: DateTime<Utc>) {
        self.updated_at = Some(at);
    }

    entity_conversions!(Settlement);
}

/// Totals computed from the charge activity of one agency pair.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementTotals {
    #[serde(rename = "payorAgencyID")]
    pub payor_agency_id: String,
    #[serde(rename = "payeeAgencyID")]
    pub payee_agency_id: String,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub charge_count: u32,
    pub correction_count: u32,
    pub gross_amount: Decimal,
    pub fee_amount: Decimal,
    pub correction_amount: Decimal,
    pub net_amount: Decimal,
}

impl SettlementTotals {
    /// Aggregate billable charges the payor (home) owes the payee (away)
    /// whose exit date falls in `[start, end)`.
    ///
    /// Only the latest correction of each included charge counts; its
    /// contribution is the change in net amount relative to the charge.
    /// Fails with [`TypeError::Overflow`] naming the total that no longer
    /// fits.
    pub fn aggregate(
        payor: &str,
        payee: &str,
        start: NaiveDate,
        end: NaiveDate,
        charges: &[Charge],
        corrections: &[Correction],
    ) -> TypeResult<Self> {
        let mut totals = Self {
            payor_agency_id: payor.to_string(),
            payee_agency_id: payee.to_string(),
            period_start: Some(start),
            period_end: Some(end),
            ..Default::default()
        };

        let mut included: BTreeMap<&str, &Charge> = BTreeMap::new();
        for charge in charges {
            if charge.home_agency_id != payor || charge.away_agency_id != payee {
                continue;
            }
            if !charge.status.is_some_and(|status| status.is_billable()) {
                continue;
            }
            let Some(exit) = charge.exit_date_time.map(|t| t.date_naive()) else {
                continue;
            };
            if exit < start || exit >= end {
                continue;
            }
            totals.charge_count += 1;
            let amount = charge.amount.unwrap_or_default();
            totals.gross_amount = add("grossAmount", totals.gross_amount, amount)?;
            totals.fee_amount = add("feeAmount", totals.fee_amount, charge.fee)?;
            included.insert(charge.charge_id.as_str(), charge);
        }

        let mut latest: BTreeMap<&str, &Correction> = BTreeMap::new();
        for correction in corrections {
            if !included.contains_key(correction.original_charge_id.as_str()) {
                continue;
            }
            latest
                .entry(correction.original_charge_id.as_str())
                .and_modify(|current| {
                    if correction.correction_seq_no > current.correction_seq_no {
                        *current = correction;
                    }
                })
                .or_insert(correction);
        }

        for (charge_id, correction) in latest {
            let charge = included[charge_id];
            let overflow = || TypeError::Overflow {
                field: "correctionAmount",
            };
            let corrected = correction
                .amount
                .unwrap_or_default()
                .checked_sub(correction.fee)
                .ok_or_else(overflow)?;
            let original = charge
                .amount
                .unwrap_or_default()
                .checked_sub(charge.fee)
                .ok_or_else(overflow)?;
            let delta = corrected.checked_sub(original).ok_or_else(overflow)?;
            totals.correction_count += 1;
            totals.correction_amount = add("correctionAmount", totals.correction_amount, delta)?;
        }

        totals.net_amount = totals
            .gross_amount
            .checked_sub(totals.fee_amount)
            .and_then(|net| net.checked_add(totals.correction_amount))
            .ok_or(TypeError::Overflow { field: "netAmount" })?;
        Ok(totals)
    }
}

fn add(field: &'static str, total: Decimal, value: Decimal) -> TypeResult<Decimal> {
    total
        .checked_add(value)
        .ok_or(TypeError::Overflow { field })
}
