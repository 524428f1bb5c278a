//! Shared fixtures: a small domain model and its transfer shapes.

#![allow(dead_code)]

use projector::{Projectable, Projection};

// =============================================================================
// Domain model (sources)
// =============================================================================

#[derive(Debug, Clone, Default, Projectable)]
pub struct Address {
    pub street: String,
    pub housenumber: String,
    pub city: String,
    pub zip: String,
}

#[derive(Debug, Clone, Default, Projectable)]
pub struct RealEstate {
    pub name: String,
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Default, Projectable)]
pub struct Person {
    pub id: u64,
    pub login: String,
    pub password: String,
    pub name: String,
    pub address: Option<Address>,
    pub married_to: Option<Box<Person>>,
    pub children: Vec<Person>,
    pub homes: Vec<RealEstate>,
}

impl Person {
    pub fn with_id(id: u64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn named(id: u64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            ..Self::default()
        }
    }
}

// =============================================================================
// Transfer shapes (targets)
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Projection)]
pub struct AddressDto {
    #[no_projection]
    pub street_and_number: String,
    pub city: String,
    pub zip: String,
}

#[derive(Debug, Clone, Default, PartialEq, Projection)]
pub struct RealEstateDto {
    pub name: String,
    #[projection(nested)]
    pub address: Option<AddressDto>,
}

#[derive(Debug, Clone, Default, PartialEq, Projection)]
pub struct PersonDto {
    pub id: u64,
    #[projection(source = "login")]
    pub email: String,
    pub name: String,
    #[projection(nested)]
    pub address: Option<AddressDto>,
    #[projection(reference, source = "married_to")]
    pub husband_or_wife_id: u64,
    #[projection(each_reference, source = "children")]
    pub children_ids: Vec<u64>,
    #[projection(each_nested)]
    pub homes: Vec<RealEstateDto>,
}

// =============================================================================
// Test data
// =============================================================================

pub fn leipzig() -> Address {
    Address {
        street: "teststreet".to_string(),
        housenumber: "123".to_string(),
        city: "Leipzig".to_string(),
        zip: "012345".to_string(),
    }
}

pub fn sample_person() -> Person {
    Person {
        id: 1,
        login: "test@test.de".to_string(),
        password: "test1234".to_string(),
        name: "Test Person".to_string(),
        address: Some(Address {
            city: "Testcity".to_string(),
            ..leipzig()
        }),
        married_to: Some(Box::new(Person::with_id(34))),
        children: vec![Person::named(2131, "Child 1"), Person::named(2931, "Child 2")],
        homes: vec![RealEstate {
            name: "Home 1".to_string(),
            address: Some(leipzig()),
        }],
    }
}
