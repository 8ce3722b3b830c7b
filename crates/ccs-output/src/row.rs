//! Plain data row types written by output backends.

use ccs_contact::Contact;

/// One contact's final outcome.
///
/// `handling_time` is `None` for contacts that never materialised a
/// handling (missed, or still waiting at loop exit); `patience` is `None`
/// when the contact had infinite patience.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactOutcomeRow {
    pub contact_id:             String,
    pub contact_type:           String,
    pub status:                 String,
    pub arrival:                f64,
    pub waiting_time:           f64,
    pub handling_time:          Option<f64>,
    pub patience:               Option<f64>,
    pub concurrency_at_arrival: Option<u32>,
}

impl From<&Contact> for ContactOutcomeRow {
    fn from(contact: &Contact) -> Self {
        Self {
            contact_id:             contact.id.to_string(),
            contact_type:           contact.contact_type.clone(),
            status:                 contact.status.as_str().to_owned(),
            arrival:                contact.arrival.0,
            waiting_time:           contact.waiting_time,
            handling_time:          contact.handling_time,
            patience:               contact.patience.is_finite().then_some(contact.patience),
            concurrency_at_arrival: contact.concurrency_at_arrival,
        }
    }
}
