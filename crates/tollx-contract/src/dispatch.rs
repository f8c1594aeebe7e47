//! Name-plus-arguments invocation surface.
//!
//! An invocation is a function name and positional string arguments. Create
//! functions take one JSON payload; the rest take identifiers. Results are
//! JSON: a record with its `docType`, an array of records, or a totals
//! object.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use tollx_ledger::Ledger;
use tollx_types::{Entity, Record};

use crate::contract::{parse_payload, Contract};
use crate::error::{ContractError, ContractResult};

macro_rules! writes {
    (write) => {
        true
    };
    (read) => {
        false
    };
}

macro_rules! functions {
    ($( $access:ident $variant:ident($($arg:literal),*) ),+ $(,)?) => {
        /// Every invocable function.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum Function {
            $( $variant ),+
        }

        impl Function {
            pub const ALL: &'static [Function] = &[$(Function::$variant),+];

            pub fn name(&self) -> &'static str {
                match self {
                    $( Function::$variant => stringify!($variant) ),+
                }
            }

            /// Names of the positional arguments.
            pub fn params(&self) -> &'static [&'static str] {
                match self {
                    $( Function::$variant => &[$($arg),*] ),+
                }
            }

            /// `true` for functions that may write to the ledger.
            pub fn is_write(&self) -> bool {
                match self {
                    $( Function::$variant => writes!($access) ),+
                }
            }
        }
    };
}

functions! {
    write CreateAgency("payload"),
    read GetAgency("agencyID"),
    write UpdateAgencyStatus("agencyID", "status"),
    read QueryAgenciesByStatus("status"),
    write CreateTag("payload"),
    read GetTag("tagAgencyID", "tagSerialNumber"),
    write UpdateTagStatus("tagAgencyID", "tagSerialNumber", "status"),
    read QueryTagsByAgency("tagAgencyID"),
    read QueryTagsByStatus("tagAgencyID", "status"),
    write CreateCharge("payload"),
    read GetCharge("awayAgencyID", "homeAgencyID", "chargeID"),
    write UpdateChargeStatus("awayAgencyID", "homeAgencyID", "chargeID", "status"),
    read QueryChargesByStatus("awayAgencyID", "homeAgencyID", "status"),
    read QueryChargesByTag("awayAgencyID", "homeAgencyID", "tagAgencyID", "tagSerialNumber"),
    write CreateCorrection("payload"),
    read GetCorrection("awayAgencyID", "homeAgencyID", "originalChargeID", "correctionSeqNo"),
    read QueryCorrectionsByCharge("awayAgencyID", "homeAgencyID", "originalChargeID"),
    write CreateReconciliation("payload"),
    read GetReconciliation("awayAgencyID", "homeAgencyID", "chargeID"),
    read QueryReconciliationsByDisposition("awayAgencyID", "homeAgencyID", "postingDisposition"),
    write CreateAcknowledgement("payload"),
    read GetAcknowledgement("acknowledgementID"),
    read QueryAcknowledgementsBySender("fromAgencyID"),
    write CreateSettlement("payload"),
    read GetSettlement("payorAgencyID", "payeeAgencyID", "settlementID"),
    write UpdateSettlementStatus("payorAgencyID", "payeeAgencyID", "settlementID", "status"),
    read QuerySettlementsByStatus("payorAgencyID", "payeeAgencyID", "status"),
    read CalculateSettlementTotals("payorAgencyID", "payeeAgencyID", "periodStart", "periodEnd"),
}

impl Function {
    pub fn arity(&self) -> usize {
        self.params().len()
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Function {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Function::ALL
            .iter()
            .copied()
            .find(|function| function.name() == s)
            .ok_or_else(|| ContractError::UnknownFunction(s.to_string()))
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> ContractResult<String> {
    serde_json::to_string(value).map_err(|e| ContractError::Parse(e.to_string()))
}

fn render<R: Record>(record: R) -> ContractResult<String> {
    to_json(&record.into_entity())
}

fn render_all<R: Record>(records: Vec<R>) -> ContractResult<String> {
    let entities: Vec<Entity> = records.into_iter().map(Record::into_entity).collect();
    to_json(&entities)
}

fn seq_no(raw: &str) -> ContractResult<u32> {
    raw.parse()
        .map_err(|_| ContractError::Parse(format!("correctionSeqNo '{raw}' is not a number")))
}

fn date(name: &str, raw: &str) -> ContractResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| ContractError::Parse(format!("{name} '{raw}': {e}")))
}

impl<L: Ledger> Contract<L> {
    /// Run `function` with positional `args` and render the result as JSON.
    pub fn invoke<S: AsRef<str>>(&self, function: &str, args: &[S]) -> ContractResult<String> {
        let function: Function = match function.parse() {
            Ok(function) => function,
            Err(err) => {
                warn!(%function, "unknown function");
                return Err(err);
            }
        };
        debug!(%function, args = args.len(), "invoke");
        let result = self.dispatch(function, args);
        if let Err(err) = &result {
            warn!(%function, kind = err.kind(), error = %err, "invocation rejected");
        }
        result
    }

    fn dispatch<S: AsRef<str>>(&self, function: Function, args: &[S]) -> ContractResult<String> {
        if args.len() != function.arity() {
            return Err(ContractError::Arguments {
                function: function.name().to_string(),
                expected: function.arity(),
                got: args.len(),
            });
        }
        let arg = |i: usize| args[i].as_ref();

        use Function::*;
        match function {
            CreateAgency => render(self.create_agency(parse_payload(arg(0))?)?),
            GetAgency => render(self.get_agency(arg(0))?),
            UpdateAgencyStatus => render(self.update_agency_status(arg(0), arg(1))?),
            QueryAgenciesByStatus => render_all(self.query_agencies_by_status(arg(0))?),

            CreateTag => render(self.create_tag(parse_payload(arg(0))?)?),
            GetTag => render(self.get_tag(arg(0), arg(1))?),
            UpdateTagStatus => render(self.update_tag_status(arg(0), arg(1), arg(2))?),
            QueryTagsByAgency => render_all(self.query_tags_by_agency(arg(0))?),
            QueryTagsByStatus => render_all(self.query_tags_by_status(arg(0), arg(1))?),

            CreateCharge => render(self.create_charge(parse_payload(arg(0))?)?),
            GetCharge => render(self.get_charge(arg(0), arg(1), arg(2))?),
            UpdateChargeStatus => {
                render(self.update_charge_status(arg(0), arg(1), arg(2), arg(3))?)
            }
            QueryChargesByStatus => {
                render_all(self.query_charges_by_status(arg(0), arg(1), arg(2))?)
            }
            QueryChargesByTag => {
                render_all(self.query_charges_by_tag(arg(0), arg(1), arg(2), arg(3))?)
            }

            CreateCorrection => render(self.create_correction(parse_payload(arg(0))?)?),
            GetCorrection => {
                render(self.get_correction(arg(0), arg(1), arg(2), seq_no(arg(3))?)?)
            }
            QueryCorrectionsByCharge => {
                render_all(self.query_corrections_by_charge(arg(0), arg(1), arg(2))?)
            }

            CreateReconciliation => render(self.create_reconciliation(parse_payload(arg(0))?)?),
            GetReconciliation => render(self.get_reconciliation(arg(0), arg(1), arg(2))?),
            QueryReconciliationsByDisposition => render_all(
                self.query_reconciliations_by_disposition(arg(0), arg(1), arg(2))?,
            ),

            CreateAcknowledgement => {
                render(self.create_acknowledgement(parse_payload(arg(0))?)?)
            }
            GetAcknowledgement => render(self.get_acknowledgement(arg(0))?),
            QueryAcknowledgementsBySender => {
                render_all(self.query_acknowledgements_by_sender(arg(0))?)
            }

            CreateSettlement => render(self.create_settlement(parse_payload(arg(0))?)?),
            GetSettlement => render(self.get_settlement(arg(0), arg(1), arg(2))?),
            UpdateSettlementStatus => {
                render(self.update_settlement_status(arg(0), arg(1), arg(2), arg(3))?)
            }
            QuerySettlementsByStatus => {
                render_all(self.query_settlements_by_status(arg(0), arg(1), arg(2))?)
            }
            CalculateSettlementTotals => {
                let start = date("periodStart", arg(2))?;
                let end = date("periodEnd", arg(3))?;
                to_json(&self.calculate_settlement_totals(arg(0), arg(1), start, end)?)
            }
        }
    }
}
