//! Testimonial records and the submission draft.

use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use folio_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Store collection holding testimonials.
pub const COLLECTION: &str = "testimonials";
/// Child field the feed is ordered by.
pub const ORDER_BY: &str = "createdAt";
/// Number of most recent testimonials the feed mirrors.
pub const FEED_LIMIT: usize = 10;
/// Avatar assigned to every submitted testimonial.
pub const PLACEHOLDER_AVATAR: &str = "/placeholder-user.jpg";
/// Rating a fresh draft starts with.
pub const DEFAULT_RATING: u8 = 5;
/// Accepted ratings.
pub const RATING_RANGE: RangeInclusive<u8> = 1..=5;

/// Payload stored under a testimonial id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialRecord {
    /// Display name of the reviewer.
    pub author: String,
    /// Role or affiliation of the reviewer.
    pub role: String,
    /// Star rating.
    pub rating: u8,
    /// Review body.
    pub text: String,
    /// Avatar image reference.
    pub avatar: String,
    /// Submission time, taken from the submitting client.
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

/// A testimonial as mirrored into the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    /// Store-assigned identifier.
    pub id: String,
    /// Display name of the reviewer.
    pub author: String,
    /// Role or affiliation of the reviewer.
    pub role: String,
    /// Star rating.
    pub rating: u8,
    /// Review body.
    pub text: String,
    /// Avatar image reference.
    pub avatar: String,
    /// Submission time.
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl Testimonial {
    /// Merges a store id into its record.
    #[must_use]
    pub fn from_record(id: String, record: TestimonialRecord) -> Self {
        Self {
            id,
            author: record.author,
            role: record.role,
            rating: record.rating,
            text: record.text,
            avatar: record.avatar,
            created_at: record.created_at,
        }
    }
}

/// The review form's input, owned by the caller between submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestimonialDraft {
    /// Display name of the reviewer.
    pub author: String,
    /// Role or affiliation of the reviewer.
    pub role: String,
    /// Star rating.
    pub rating: u8,
    /// Review body.
    pub text: String,
}

impl Default for TestimonialDraft {
    fn default() -> Self {
        Self {
            author: String::new(),
            role: String::new(),
            rating: DEFAULT_RATING,
            text: String::new(),
        }
    }
}

impl TestimonialDraft {
    /// Creates a draft from form input.
    #[must_use]
    pub fn new(
        author: impl Into<String>,
        role: impl Into<String>,
        rating: u8,
        text: impl Into<String>,
    ) -> Self {
        Self {
            author: author.into(),
            role: role.into(),
            rating,
            text: text.into(),
        }
    }

    /// Checks that every text field is filled in and the rating is in range.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` describing the first problem found.
    pub fn validate(&self) -> Result<(), DomainError> {
        let blank = [&self.author, &self.role, &self.text]
            .iter()
            .any(|field| field.trim().is_empty());
        if blank {
            return Err(DomainError::Validation("Please fill in all fields".to_owned()));
        }
        if !RATING_RANGE.contains(&self.rating) {
            return Err(DomainError::Validation(format!(
                "rating must be between {} and {}, got {}",
                RATING_RANGE.start(),
                RATING_RANGE.end(),
                self.rating
            )));
        }
        Ok(())
    }

    /// Builds the store payload for this draft.
    #[must_use]
    pub fn to_record(&self, created_at: DateTime<Utc>) -> TestimonialRecord {
        TestimonialRecord {
            author: self.author.clone(),
            role: self.role.clone(),
            rating: self.rating,
            text: self.text.clone(),
            avatar: PLACEHOLDER_AVATAR.to_owned(),
            created_at,
        }
    }

    /// Clears the draft back to its defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// ISO-8601 with millisecond precision and a `Z` suffix, so that string
/// order in the store matches chronological order.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
