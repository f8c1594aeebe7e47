//! Lifecycle status values for entities that carry a status field.
//!
//! The allowed moves between these values live in the rule engine's
//! transition tables; this module only names them.

closed_set! {
    /// Participation status of a network agency.
    pub enum AgencyStatus as "agency status" {
        Active => "active",
        Suspended => "suspended",
        Inactive => "inactive",
    }
}

closed_set! {
    /// Which side(s) of the exchange an agency takes part in.
    pub enum AgencyRole as "agency role" {
        Home => "home",
        Away => "away",
        Both => "both",
    }
}

closed_set! {
    /// Validity of a tag credential.
    pub enum TagStatus as "tag status" {
        Valid => "valid",
        Invalid => "invalid",
        Inactive => "inactive",
        Lost => "lost",
        Stolen => "stolen",
    }
}

closed_set! {
    /// Processing state of a charge.
    pub enum ChargeStatus as "charge status" {
        Pending => "pending",
        Posted => "posted",
        Rejected => "rejected",
        Settled => "settled",
        Disputed => "disputed",
    }
}

impl ChargeStatus {
    /// Charges that count toward a settlement.
    pub fn is_billable(&self) -> bool {
        matches!(self, Self::Posted | Self::Settled)
    }
}

closed_set! {
    /// Approval state of a settlement.
    pub enum SettlementStatus as "settlement status" {
        Draft => "draft",
        Submitted => "submitted",
        Accepted => "accepted",
        Disputed => "disputed",
        Cancelled => "cancelled",
        Paid => "paid",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_form_is_lowercase() {
        assert_eq!(ChargeStatus::Pending.to_string(), "pending");
        assert_eq!("stolen".parse::<TagStatus>().unwrap(), TagStatus::Stolen);
        assert!("Pending".parse::<ChargeStatus>().is_err());
    }

    #[test]
    fn unknown_status_in_payload_fails_to_parse() {
        let err = serde_json::from_str::<SettlementStatus>("\"closed\"").unwrap_err();
        assert!(err.to_string().contains("unrecognized settlement status 'closed'"));
    }

    #[test]
    fn billable_charge_statuses() {
        let billable: Vec<_> = ChargeStatus::ALL
            .iter()
            .filter(|s| s.is_billable())
            .collect();
        assert_eq!(billable, vec![&ChargeStatus::Posted, &ChargeStatus::Settled]);
    }
}
