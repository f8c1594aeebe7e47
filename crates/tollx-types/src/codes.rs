//! Closed wire-code enumerations shared by the interoperability partners.
//!
//! Entities carry these codes as raw strings so an unrecognized code
//! surfaces as a validation failure rather than a payload parse failure.
//! The rule engine parses them with [`std::str::FromStr`]; matching is
//! exact and case-sensitive.

use std::fmt;
use std::str::FromStr;

use crate::error::TypeError;

closed_set! {
    /// Posting result reported by the home agency for a charge.
    pub enum DispositionCode as "disposition code" {
        /// Charge posted to the customer account.
        Posted => "P",
        /// Charge already received.
        Duplicate => "D",
        /// Tag or plate not valid for posting.
        Invalid => "I",
        /// Tag or plate not on file.
        NotOnFile => "N",
        /// Account suspended.
        Suspended => "S",
        /// Transaction too old to post.
        TooOld => "T",
        /// Account closed.
        Closed => "C",
        /// Any other posting failure.
        Other => "O",
    }
}

impl DispositionCode {
    /// Only `P` moves money to the away agency.
    pub fn is_posted(&self) -> bool {
        matches!(self, Self::Posted)
    }
}

closed_set! {
    /// Reason an away agency adjusts a previously submitted charge.
    pub enum CorrectionReason as "correction reason" {
        /// Vehicle class adjustment.
        ClassAdjustment => "C",
        /// Incorrect toll amount.
        IncorrectAmount => "I",
        /// Late-arriving transaction detail.
        LateDetail => "L",
        /// Tag or plate identity corrected.
        IdentityCorrection => "T",
        /// Other reason, described in free text.
        Other => "O",
    }
}

impl CorrectionReason {
    /// `O` must be accompanied by a free-text explanation.
    pub fn requires_detail(&self) -> bool {
        matches!(self, Self::Other)
    }
}

closed_set! {
    /// Kind of batch a submission acknowledgement refers to.
    pub enum SubmissionType as "submission type" {
        /// Tag validation list.
        TagValidationList => "STVL",
        /// Toll transactions.
        Transactions => "STRAN",
        /// Corrections.
        Corrections => "SCORR",
        /// Reconciliations.
        Reconciliations => "SRECON",
        /// Settlement reports.
        Settlements => "SSETL",
    }
}

closed_set! {
    /// Batch acknowledgement return codes.
    pub enum ReturnCode as "return code" {
        Success => "00",
        IncorrectFromAgency => "01",
        IncorrectToAgency => "02",
        InvalidSubmissionType => "03",
        InvalidSubmissionDate => "04",
        DuplicateSubmission => "05",
        InvalidRecordCount => "06",
        InvalidRecordDetail => "07",
        UnsupportedVersion => "08",
        InvalidHeader => "09",
        InvalidTrailer => "10",
        SizeLimitExceeded => "11",
        ProcessingTimeout => "12",
        SystemError => "13",
    }
}

impl ReturnCode {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

closed_set! {
    /// Base transaction kinds defined by the protocol.
    pub enum RecordKind as "record type" {
        /// Tag-based, single point.
        TagSinglePoint => "TB01",
        /// Tag-based, closed system with entry detail.
        TagClosedEntry => "TC01",
        /// Tag-based, closed system exit only.
        TagClosedExit => "TC02",
        /// Plate-based, single point.
        VideoSinglePoint => "VB01",
        /// Plate-based, closed system with entry detail.
        VideoClosedEntry => "VC01",
        /// Plate-based, closed system exit only.
        VideoClosedExit => "VC02",
    }
}

impl RecordKind {
    pub fn is_tag_based(&self) -> bool {
        matches!(
            self,
            Self::TagSinglePoint | Self::TagClosedEntry | Self::TagClosedExit
        )
    }

    pub fn is_video(&self) -> bool {
        !self.is_tag_based()
    }

    /// Closed-system records that carry entry plaza and time.
    pub fn requires_entry(&self) -> bool {
        matches!(self, Self::TagClosedEntry | Self::VideoClosedEntry)
    }
}

/// Suffix marking the adjustment variant of a record type.
pub const ADJUSTMENT_SUFFIX: char = 'A';

/// A record-type code: a base [`RecordKind`] optionally marked as an
/// adjustment (`TB01` vs `TB01A`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RecordType {
    pub kind: RecordKind,
    pub adjustment: bool,
}

impl RecordType {
    pub fn base(kind: RecordKind) -> Self {
        Self {
            kind,
            adjustment: false,
        }
    }

    pub fn adjustment(kind: RecordKind) -> Self {
        Self {
            kind,
            adjustment: true,
        }
    }
}

impl FromStr for RecordType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (code, adjustment) = match s.strip_suffix(ADJUSTMENT_SUFFIX) {
            Some(code) => (code, true),
            None => (s, false),
        };
        let kind = code.parse::<RecordKind>().map_err(|_| TypeError::UnknownCode {
            kind: "record type",
            value: s.to_string(),
        })?;
        Ok(Self { kind, adjustment })
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.adjustment {
            write!(f, "{}{}", self.kind, ADJUSTMENT_SUFFIX)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}
