//! A single service line.

use ccs_core::ContactId;

use crate::AgentError;

/// One of an agent's service slots.
///
/// `open` tracks whether the owning agent is in service (closed lines accept
/// no *new* work; a contact already on a closed line runs to completion).
/// Occupancy and the bound contact are mutual: the line holds a contact id
/// iff it is occupied, so the pair is kept behind accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Contact types this line can service.
    pub contact_types: Vec<String>,

    /// Dispatch rank; lower is preferred.
    pub priority: i32,

    /// Occupancy ceiling: the line may not be taken while its agent already
    /// holds this many occupied lines.  `None` = no per-line cap.
    pub max_occ: Option<u32>,

    /// Whether the line may accept new work.
    pub open: bool,

    contact: Option<ContactId>,
}

impl Line {
    pub fn new(contact_types: Vec<String>, priority: i32, max_occ: Option<u32>) -> Self {
        Self {
            contact_types,
            priority,
            max_occ,
            open: false,
            contact: None,
        }
    }

    /// The contact currently bound to this line, if any.
    #[inline]
    pub fn contact(&self) -> Option<ContactId> {
        self.contact
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.contact.is_some()
    }

    /// Does this line service the given contact type?
    #[inline]
    pub fn accepts(&self, contact_type: &str) -> bool {
        self.contact_types.iter().any(|t| t == contact_type)
    }

    /// Bind a contact to this line.
    pub fn occupy(&mut self, contact: ContactId, contact_type: &str) -> Result<(), AgentError> {
        if self.is_occupied() {
            return Err(AgentError::AlreadyOccupied);
        }
        if !self.accepts(contact_type) {
            return Err(AgentError::InvalidContactType(contact_type.to_owned()));
        }
        self.contact = Some(contact);
        Ok(())
    }

    /// Release the bound contact, returning it.
    pub fn solve(&mut self) -> Result<ContactId, AgentError> {
        self.contact.take().ok_or(AgentError::NotOccupied)
    }

    /// Open the line for new work.
    #[inline]
    pub fn enable(&mut self) {
        self.open = true;
    }

    /// Close the line to new work.  Any in-flight contact keeps running.
    #[inline]
    pub fn disable(&mut self) {
        self.open = false;
    }
}
