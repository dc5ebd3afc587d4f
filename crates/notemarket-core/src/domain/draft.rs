//! Note draft entity
//!
//! Holds the raw form input for a new note. The draft lives in memory only:
//! it is created when the user opens the flow, mutated by form input, and
//! consumed exactly once by metadata creation. Once the backend has assigned
//! a note identifier the draft is frozen (enforced by [`super::flow::PublishFlow`]).

use super::errors::PublishError;
use super::newtypes::{CourseId, NicheId};
use crate::ports::marketplace::CreateNotePayload;

/// Raw form input for a note, as typed by the user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteDraft {
    /// Note title; required, trimmed before submission
    pub title: String,
    /// Optional free-text description
    pub description: String,
    /// Price as entered; must parse to a finite non-negative number
    pub price: String,
    /// Comma-separated tag input
    pub tags: String,
    /// Selected niche identifier; required
    pub niche_id: String,
    /// Optional course identifier
    pub course_id: String,
}

impl NoteDraft {
    /// Splits comma-separated tag input, trimming entries and discarding
    /// empty ones
    pub fn parse_tags(input: &str) -> Vec<String> {
        input
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Parses the price field into a finite non-negative number
    ///
    /// An empty field counts as zero (free note).
    pub fn parsed_price(&self) -> Result<f64, PublishError> {
        let raw = self.price.trim();
        if raw.is_empty() {
            return Ok(0.0);
        }
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
            _ => Err(PublishError::Validation(
                "Price must be a non-negative number.".to_string(),
            )),
        }
    }

    /// Validates the draft without contacting the backend
    pub fn validate(&self) -> Result<(), PublishError> {
        self.parsed_price()?;
        if self.title.trim().is_empty() || self.niche_id.trim().is_empty() {
            return Err(PublishError::Validation(
                "Please fill required fields: title, niche, price.".to_string(),
            ));
        }
        Ok(())
    }

    /// Validates the draft and builds the metadata-creation payload
    pub fn to_payload(&self) -> Result<CreateNotePayload, PublishError> {
        self.validate()?;

        let description = match self.description.trim() {
            "" => None,
            text => Some(text.to_string()),
        };
        let course_id = match self.course_id.trim() {
            "" => None,
            id => Some(CourseId::new(id)?),
        };

        Ok(CreateNotePayload {
            title: self.title.trim().to_string(),
            description,
            price: self.parsed_price()?,
            tags: Self::parse_tags(&self.tags),
            niche_id: NicheId::new(self.niche_id.trim())?,
            course_id,
        })
    }

    /// Clears all fields back to the empty draft
    pub fn clear(&mut self) {
        *self = NoteDraft::default();
    }
}
