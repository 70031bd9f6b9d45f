//! GraphQL output and argument types.

use async_graphql::{Enum, ID, Object, SimpleObject};

use crate::domain::{Address, Person, PhoneFilter};

/// `YesNo` argument selecting persons by phone presence.
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum YesNo {
    Yes,
    No,
}

impl From<YesNo> for PhoneFilter {
    fn from(value: YesNo) -> Self {
        match value {
            YesNo::Yes => Self::WithPhone,
            YesNo::No => Self::WithoutPhone,
        }
    }
}

/// GraphQL view of a [`Person`].
pub struct PersonObject(Person);

impl From<Person> for PersonObject {
    fn from(person: Person) -> Self {
        Self(person)
    }
}

#[Object(name = "Person")]
impl PersonObject {
    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn phone(&self) -> Option<&str> {
        self.0.phone.as_deref()
    }

    /// Postal address projected from the person's street and city.
    async fn address(&self) -> AddressObject {
        self.0.address().into()
    }

    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }
}

/// GraphQL view of an [`Address`].
#[derive(SimpleObject, Debug, Clone, PartialEq, Eq)]
#[graphql(name = "Address")]
pub struct AddressObject {
    street: String,
    city: Option<String>,
}

impl From<Address> for AddressObject {
    fn from(address: Address) -> Self {
        Self {
            street: address.street,
            city: address.city,
        }
    }
}
