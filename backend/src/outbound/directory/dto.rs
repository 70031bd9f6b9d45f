//! DTOs for the upstream person JSON.
//!
//! The adapter decodes into these transport DTOs first and then maps into
//! domain [`Person`] records, so upstream quirks (numeric ids, absent phones or cities)
//! stay out of the domain.

use serde::{Deserialize, Serialize};

use crate::domain::{Person, PersonId};

/// Upstream ids are usually strings but numeric ids are accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum PersonIdDto {
    Text(String),
    Number(i64),
}

#[derive(Debug, Deserialize)]
pub(super) struct PersonDto {
    pub(super) id: PersonIdDto,
    pub(super) name: String,
    #[serde(default)]
    pub(super) phone: Option<String>,
    pub(super) street: String,
    #[serde(default)]
    pub(super) city: Option<String>,
}

impl PersonDto {
    pub(super) fn into_domain(self) -> Result<Person, String> {
        let raw_id = match self.id {
            PersonIdDto::Text(text) => text,
            PersonIdDto::Number(number) => number.to_string(),
        };
        let id = PersonId::new(raw_id)
            .map_err(|error| format!("person {:?} has an invalid id: {error}", self.name))?;
        Ok(Person {
            id,
            name: self.name,
            phone: self.phone,
            street: self.street,
            city: self.city,
        })
    }
}

/// Body of `POST /persons`.
#[derive(Debug, Serialize)]
pub(super) struct NewPersonDto<'a> {
    pub(super) id: &'a str,
    pub(super) name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) phone: Option<&'a str>,
    pub(super) street: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) city: Option<&'a str>,
}

impl<'a> From<&'a Person> for NewPersonDto<'a> {
    fn from(person: &'a Person) -> Self {
        Self {
            id: person.id.as_str(),
            name: person.name.as_str(),
            phone: person.phone.as_deref(),
            street: person.street.as_str(),
            city: person.city.as_deref(),
        }
    }
}

/// Body of `PATCH /persons/{id}`.
#[derive(Debug, Serialize)]
pub(super) struct PhonePatchDto<'a> {
    pub(super) phone: &'a str,
}
