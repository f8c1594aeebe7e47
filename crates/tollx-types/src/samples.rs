//! Minimal valid records for tests and demos.
//!
//! Each constructor returns a record that passes every validation rule, so
//! callers only need to change the fields under test.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::acknowledgement::Acknowledgement;
use crate::agency::Agency;
use crate::charge::Charge;
use crate::correction::Correction;
use crate::reconciliation::Reconciliation;
use crate::settlement::{Settlement, DEFAULT_CURRENCY};
use crate::status::{AgencyRole, AgencyStatus, ChargeStatus, SettlementStatus, TagStatus};
use crate::tag::{PlateDetail, Tag};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, 0))
        .map(|naive| naive.and_utc())
}

pub fn agency(agency_id: &str) -> Agency {
    Agency {
        agency_id: agency_id.into(),
        name: format!("Agency {agency_id}"),
        consortium_id: "WEST".into(),
        state: "CA".into(),
        role: Some(AgencyRole::Both),
        status: Some(AgencyStatus::Active),
        created_at: None,
        updated_at: None,
    }
}

pub fn tag(tag_agency_id: &str, serial: &str) -> Tag {
    Tag {
        tag_serial_number: serial.into(),
        tag_agency_id: tag_agency_id.into(),
        home_agency_id: tag_agency_id.into(),
        account_id: String::new(),
        tag_class: 2,
        tag_status: Some(TagStatus::Valid),
        plate_info: None,
        discount_plans: Vec::new(),
        created_at: None,
        updated_at: None,
    }
}

/// A pending tag-based charge of 4.75 with a 0.05 fee, exiting on
/// 2026-05-10.
pub fn charge(charge_id: &str, away: &str, home: &str) -> Charge {
    Charge {
        charge_id: charge_id.into(),
        record_type: "TB01".into(),
        away_agency_id: away.into(),
        home_agency_id: home.into(),
        tag_serial_number: "0012345678".into(),
        tag_agency_id: home.into(),
        plate_info: Some(PlateDetail::new("US", "CA", "7ABC123")),
        facility_id: "F1".into(),
        entry_plaza: String::new(),
        entry_date_time: None,
        exit_plaza: "P9".into(),
        exit_lane: "L3".into(),
        exit_date_time: at(2026, 5, 10, 8, 30),
        vehicle_class: 2,
        amount: Some(Decimal::new(475, 2)),
        fee: Decimal::new(5, 2),
        discount_plan_id: String::new(),
        status: Some(ChargeStatus::Pending),
        created_at: None,
        updated_at: None,
    }
}

pub fn correction(original_charge_id: &str, seq_no: u32, away: &str, home: &str) -> Correction {
    Correction {
        original_charge_id: original_charge_id.into(),
        correction_seq_no: seq_no,
        away_agency_id: away.into(),
        home_agency_id: home.into(),
        record_type: "TB01A".into(),
        correction_reason: "I".into(),
        reason_detail: String::new(),
        vehicle_class: 0,
        amount: Some(Decimal::new(350, 2)),
        fee: Decimal::new(5, 2),
        created_at: None,
        updated_at: None,
    }
}

/// A non-posted (`D`) reconciliation with no posting detail.
pub fn reconciliation(charge_id: &str, away: &str, home: &str) -> Reconciliation {
    Reconciliation {
        charge_id: charge_id.into(),
        away_agency_id: away.into(),
        home_agency_id: home.into(),
        posting_disposition: "D".into(),
        posted_amount: None,
        posted_date_time: None,
        adjustment_count: 0,
        resubmit_count: 0,
        created_at: None,
        updated_at: None,
    }
}

pub fn acknowledgement(acknowledgement_id: &str, from: &str, to: &str) -> Acknowledgement {
    Acknowledgement {
        acknowledgement_id: acknowledgement_id.into(),
        submission_type: "STRAN".into(),
        submission_id: format!("{from}-{to}-0001"),
        from_agency_id: from.into(),
        to_agency_id: to.into(),
        return_code: "00".into(),
        return_message: String::new(),
        record_count: 1,
        submission_date_time: at(2026, 5, 11, 0, 0),
        created_at: None,
        updated_at: None,
    }
}

/// A draft May 2026 settlement whose totals are internally consistent.
pub fn settlement(settlement_id: &str, payor: &str, payee: &str) -> Settlement {
    Settlement {
        settlement_id: settlement_id.into(),
        payor_agency_id: payor.into(),
        payee_agency_id: payee.into(),
        period_start: NaiveDate::from_ymd_opt(2026, 5, 1),
        period_end: NaiveDate::from_ymd_opt(2026, 6, 1),
        charge_count: 2,
        correction_count: 0,
        gross_amount: Decimal::new(950, 2),
        fee_amount: Decimal::new(10, 2),
        correction_amount: Decimal::ZERO,
        net_amount: Decimal::new(940, 2),
        currency: DEFAULT_CURRENCY.into(),
        status: Some(SettlementStatus::Draft),
        created_at: None,
        updated_at: None,
    }
}
