use tollx_ledger::{Ledger, Scope, Selector};
use tollx_rules::{Lifecycle, Validate};
use tollx_types::{keys, Tag};

use crate::contract::{parse_status, Contract};
use crate::error::ContractResult;

impl<L: Ledger> Contract<L> {
    pub fn create_tag(&self, tag: Tag) -> ContractResult<Tag> {
        tag.validate()?;
        self.insert(tag, |tag| {
            self.require_agency(&tag.tag_agency_id)?;
            if tag.home_agency_id != tag.tag_agency_id {
                self.require_agency(&tag.home_agency_id)?;
            }
            Ok(())
        })
    }

    pub fn get_tag(&self, tag_agency_id: &str, tag_serial_number: &str) -> ContractResult<Tag> {
        self.fetch(
            &Scope::Shared,
            &keys::tag_key(tag_agency_id, tag_serial_number),
        )
    }

    pub fn update_tag_status(
        &self,
        tag_agency_id: &str,
        tag_serial_number: &str,
        status: &str,
    ) -> ContractResult<Tag> {
        self.transition(
            &Scope::Shared,
            &keys::tag_key(tag_agency_id, tag_serial_number),
            status,
        )
    }

    pub fn query_tags_by_agency(&self, tag_agency_id: &str) -> ContractResult<Vec<Tag>> {
        self.query(
            Scope::Shared,
            Selector::new().with("tagAgencyID", tag_agency_id),
        )
    }

    pub fn query_tags_by_status(&self, tag_agency_id: &str, status: &str) -> ContractResult<Vec<Tag>> {
        let status = parse_status::<Tag>(status)?;
        self.query(
            Scope::Shared,
            Selector::new()
                .with("tagAgencyID", tag_agency_id)
                .with(Tag::STATUS_FIELD, status.as_str()),
        )
    }
}
