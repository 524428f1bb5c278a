//! Property-based tests for the projection laws.
//!
//! - Default copy: an unruled property equals the source property of the same name
//! - Exclusion: an excluded property keeps its default whatever the source holds
//! - Reference: an absent reference leaves the default, a present one yields its key
//! - Nested projection: a nested property equals the projection of the nested source
//! - Elementwise order: elementwise results follow the source order and length
//! - Idempotence: projecting twice yields equal results

mod common;

use common::{Address, AddressDto, Person, PersonDto, RealEstate, RealEstateDto};
use projector::{Projection, project};
use proptest::prelude::*;

#[derive(Debug, Default, PartialEq, Projection)]
struct Snapshot {
    id: u64,
    login: String,
    name: String,
}

#[derive(Debug, Default, PartialEq, Projection)]
struct Redacted {
    #[no_projection]
    id: u64,
    #[no_projection]
    #[projection(source = "name")]
    login: String,
    name: String,
}

fn address_strategy() -> impl Strategy<Value = Address> {
    ("[a-z]{1,12}", "[0-9]{1,4}", "[A-Z][a-z]{1,10}", "[0-9]{5}").prop_map(
        |(street, housenumber, city, zip)| Address {
            street,
            housenumber,
            city,
            zip,
        },
    )
}

fn real_estate_strategy() -> impl Strategy<Value = RealEstate> {
    ("[A-Za-z ]{0,16}", prop::option::of(address_strategy()))
        .prop_map(|(name, address)| RealEstate { name, address })
}

fn leaf_person_strategy() -> impl Strategy<Value = Person> {
    (any::<u64>(), "[a-z]{1,8}@[a-z]{1,8}\\.de", "[A-Za-z ]{0,16}").prop_map(
        |(id, login, name)| Person {
            id,
            login,
            name,
            ..Person::default()
        },
    )
}

fn person_strategy() -> impl Strategy<Value = Person> {
    (
        leaf_person_strategy(),
        prop::option::of(address_strategy()),
        prop::option::of(leaf_person_strategy()),
        prop::collection::vec(leaf_person_strategy(), 0..8),
        prop::collection::vec(real_estate_strategy(), 0..4),
    )
        .prop_map(|(person, address, married_to, children, homes)| Person {
            address,
            married_to: married_to.map(Box::new),
            children,
            homes,
            ..person
        })
}

fn address_dto(address: &Address) -> AddressDto {
    AddressDto {
        street_and_number: String::new(),
        city: address.city.clone(),
        zip: address.zip.clone(),
    }
}

// =============================================================================
// Default Copy Law
// =============================================================================

proptest! {
    /// Properties without a rule are copied from the same-named source property.
    #[test]
    fn prop_default_copy_law(person in person_strategy()) {
        let snapshot: Snapshot = project(&person).unwrap();

        prop_assert_eq!(snapshot.id, person.id);
        prop_assert_eq!(&snapshot.login, &person.login);
        prop_assert_eq!(&snapshot.name, &person.name);
    }
}

// =============================================================================
// Exclusion Law
// =============================================================================

proptest! {
    /// Excluded properties keep their default value.
    #[test]
    fn prop_exclusion_law(person in person_strategy()) {
        let redacted: Redacted = project(&person).unwrap();

        prop_assert_eq!(redacted.id, 0);
        prop_assert!(redacted.login.is_empty());
        prop_assert_eq!(&redacted.name, &person.name);
    }

    /// Excluded nested properties keep their default value.
    #[test]
    fn prop_excluded_nested_property_law(address in address_strategy()) {
        let dto: AddressDto = project(&address).unwrap();

        prop_assert!(dto.street_and_number.is_empty());
    }
}

// =============================================================================
// Reference Law
// =============================================================================

proptest! {
    /// The reference key of a present reference is assigned, an absent one leaves the default.
    #[test]
    fn prop_reference_law(person in person_strategy()) {
        let dto: PersonDto = project(&person).unwrap();

        let expected = person.married_to.as_ref().map_or(0, |partner| partner.id);
        prop_assert_eq!(dto.husband_or_wife_id, expected);
    }
}

// =============================================================================
// Nested Projection Law
// =============================================================================

proptest! {
    /// A nested property equals the projection of the nested source, and is absent iff it is.
    #[test]
    fn prop_nested_projection_law(person in person_strategy()) {
        let dto: PersonDto = project(&person).unwrap();

        let expected = person
            .address
            .as_ref()
            .map(|address| project::<AddressDto>(address).unwrap());
        prop_assert_eq!(&dto.address, &expected);
        prop_assert_eq!(dto.address, person.address.as_ref().map(address_dto));
    }
}

// =============================================================================
// Elementwise Order Law
// =============================================================================

proptest! {
    /// Elementwise references follow the source order element for element.
    #[test]
    fn prop_elementwise_reference_order_law(person in person_strategy()) {
        let dto: PersonDto = project(&person).unwrap();

        let expected: Vec<u64> = person.children.iter().map(|child| child.id).collect();
        prop_assert_eq!(dto.children_ids, expected);
    }

    /// Elementwise projections follow the source order element for element.
    #[test]
    fn prop_elementwise_projection_order_law(person in person_strategy()) {
        let dto: PersonDto = project(&person).unwrap();

        prop_assert_eq!(dto.homes.len(), person.homes.len());
        for (home, estate) in dto.homes.iter().zip(&person.homes) {
            let expected = RealEstateDto {
                name: estate.name.clone(),
                address: estate.address.as_ref().map(address_dto),
            };
            prop_assert_eq!(home, &expected);
        }
    }
}

// =============================================================================
// Idempotence Law
// =============================================================================

proptest! {
    /// Projecting the same source twice yields equal results.
    #[test]
    fn prop_idempotence_law(person in person_strategy()) {
        let first: PersonDto = project(&person).unwrap();
        let second: PersonDto = project(&person).unwrap();

        prop_assert_eq!(first, second);
    }
}
