//! Deterministic storage keys and bilateral partition names.
//!
//! Keys follow `<PREFIX>_<component>[_<component>...]` where the prefix is
//! the uppercase entity tag. Numeric ordinals are zero-padded to a fixed
//! width so lexicographic order matches numeric order.
//!
//! Partition names follow `<domain>_<partyLow>_<partyHigh>`. The two party
//! identifiers are sorted byte-wise first, so the name does not depend on
//! which party is passed first.

pub const AGENCY_PREFIX: &str = "AGENCY";
pub const TAG_PREFIX: &str = "TAG";
pub const CHARGE_PREFIX: &str = "CHARGE";
pub const CORRECTION_PREFIX: &str = "CORR";
pub const RECONCILIATION_PREFIX: &str = "RECON";
pub const ACKNOWLEDGEMENT_PREFIX: &str = "ACK";
pub const SETTLEMENT_PREFIX: &str = "SETTLE";

/// Domain prefix of the partition holding charges, corrections and
/// reconciliations for an agency pair.
pub const CHARGE_DOMAIN: &str = "charges";

/// Domain prefix of the partition holding settlements for an agency pair.
pub const SETTLEMENT_DOMAIN: &str = "settlements";

/// Separator between key and partition components.
pub const SEPARATOR: char = '_';

/// Width of zero-padded correction sequence numbers.
pub const CORRECTION_SEQ_WIDTH: usize = 3;

/// Largest correction sequence number representable at
/// [`CORRECTION_SEQ_WIDTH`].
pub const MAX_CORRECTION_SEQ: u32 = 999;

/// Join a prefix and identity components into a key.
pub fn compose_key(prefix: &str, components: &[&str]) -> String {
    let mut key = String::with_capacity(
        prefix.len() + components.iter().map(|c| c.len() + 1).sum::<usize>(),
    );
    key.push_str(prefix);
    for component in components {
        key.push(SEPARATOR);
        key.push_str(component);
    }
    key
}

/// Zero-pad a numeric ordinal to `width` digits.
pub fn padded_ordinal(value: u32, width: usize) -> String {
    format!("{value:0width$}")
}

/// Canonical name of the partition shared by two parties.
///
/// # Examples
///
/// ```
/// use tollx_types::keys::partition_name;
///
/// assert_eq!(partition_name("A2", "A1", "charges"), "charges_A1_A2");
/// assert_eq!(partition_name("A1", "A2", "charges"), "charges_A1_A2");
/// ```
pub fn partition_name(party_a: &str, party_b: &str, domain: &str) -> String {
    let (low, high) = if party_a.as_bytes() <= party_b.as_bytes() {
        (party_a, party_b)
    } else {
        (party_b, party_a)
    };
    compose_key(domain, &[low, high])
}

pub fn agency_key(agency_id: &str) -> String {
    compose_key(AGENCY_PREFIX, &[agency_id])
}

pub fn tag_key(tag_agency_id: &str, tag_serial_number: &str) -> String {
    compose_key(TAG_PREFIX, &[tag_agency_id, tag_serial_number])
}

pub fn charge_key(charge_id: &str) -> String {
    compose_key(CHARGE_PREFIX, &[charge_id])
}

pub fn correction_key(original_charge_id: &str, seq_no: u32) -> String {
    let seq = padded_ordinal(seq_no, CORRECTION_SEQ_WIDTH);
    compose_key(CORRECTION_PREFIX, &[original_charge_id, &seq])
}

pub fn reconciliation_key(charge_id: &str) -> String {
    compose_key(RECONCILIATION_PREFIX, &[charge_id])
}

pub fn acknowledgement_key(acknowledgement_id: &str) -> String {
    compose_key(ACKNOWLEDGEMENT_PREFIX, &[acknowledgement_id])
}

pub fn settlement_key(settlement_id: &str) -> String {
    compose_key(SETTLEMENT_PREFIX, &[settlement_id])
}

/// Partition holding charge traffic between two agencies.
pub fn charge_partition(away_agency_id: &str, home_agency_id: &str) -> String {
    partition_name(away_agency_id, home_agency_id, CHARGE_DOMAIN)
}

/// Partition holding settlements between two agencies.
pub fn settlement_partition(payor_agency_id: &str, payee_agency_id: &str) -> String {
    partition_name(payor_agency_id, payee_agency_id, SETTLEMENT_DOMAIN)
}
