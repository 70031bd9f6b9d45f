//! Person records held by the upstream directory.
//!
//! The gateway never stores these; every value is decoded from a fresh
//! upstream response and discarded once the GraphQL response is written.

use std::fmt;

use uuid::Uuid;

/// Validation errors for [`PersonId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersonIdValidationError {
    /// The identifier was empty once trimmed of whitespace.
    #[error("person id must not be empty")]
    Empty,
}

/// Opaque person identifier.
///
/// ## Invariants
/// - Never empty or whitespace-only.
///
/// # Examples
/// ```
/// use person_gateway::domain::PersonId;
///
/// let id = PersonId::new("1").expect("valid id");
/// assert_eq!(id.as_str(), "1");
/// assert!(PersonId::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PersonId(String);

impl PersonId {
    /// Validate and wrap an identifier.
    pub fn new(value: impl Into<String>) -> Result<Self, PersonIdValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(PersonIdValidationError::Empty);
        }
        Ok(Self(value))
    }

    /// Generate a fresh collision-resistant identifier for a new person.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PersonId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// A person in the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    /// Upstream identifier, immutable after creation.
    pub id: PersonId,
    /// Display name; unique across the directory.
    pub name: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Street part of the postal address.
    pub street: String,
    /// City part of the postal address; the upstream may omit it.
    pub city: Option<String>,
}

impl Person {
    /// Whether the person carries a usable phone number.
    ///
    /// Empty strings count as "no phone".
    ///
    /// # Examples
    /// ```
    /// use person_gateway::domain::{Person, PersonId};
    ///
    /// let mut person = Person {
    ///     id: PersonId::new("1").expect("valid id"),
    ///     name: "David".into(),
    ///     phone: Some(String::new()),
    ///     street: "siempre viva".into(),
    ///     city: Some("Barcelona".into()),
    /// };
    /// assert!(!person.has_phone());
    /// person.phone = Some("034-123557".into());
    /// assert!(person.has_phone());
    /// ```
    pub fn has_phone(&self) -> bool {
        self.phone.as_deref().is_some_and(|phone| !phone.is_empty())
    }

    /// Project the flat street/city fields into an [`Address`].
    pub fn address(&self) -> Address {
        Address {
            street: self.street.clone(),
            city: self.city.clone(),
        }
    }
}

/// Postal address derived from a [`Person`]; it has no identity of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    /// Street line.
    pub street: String,
    /// City name, absent when the upstream record has none.
    pub city: Option<String>,
}

/// Filter applied to the person listing by phone presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneFilter {
    /// Keep persons that have a phone number.
    WithPhone,
    /// Keep persons without a phone number.
    WithoutPhone,
}

impl PhoneFilter {
    /// Whether `person` passes this filter.
    pub fn matches(self, person: &Person) -> bool {
        match self {
            Self::WithPhone => person.has_phone(),
            Self::WithoutPhone => !person.has_phone(),
        }
    }
}

/// Input for creating a person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddPersonRequest {
    pub name: String,
    pub phone: Option<String>,
    pub street: String,
    pub city: String,
}

impl AddPersonRequest {
    /// Build the record to send upstream under a freshly assigned id.
    pub fn into_person(self, id: PersonId) -> Person {
        Person {
            id,
            name: self.name,
            phone: self.phone,
            street: self.street,
            city: Some(self.city),
        }
    }
}
