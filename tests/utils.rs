mod common;

use common::{Dog, Person, Team, dog, open_db, person, seeded_db, team};
use critq::prelude::*;

#[test]
fn find_by_is_a_prefiltered_query() {
    let db = seeded_db();
    let bob = db.find_by(person::NAME, "Bob").single().unwrap();
    assert_eq!(bob.id, 2);
}

#[test]
fn functional_query_form_builds_and_runs() {
    let db = seeded_db();
    let adults: Vec<Person> = db
        .list::<Person>(|q: Select<Person>| q.gt(person::AGE, 18i64).asc(person::NAME))
        .unwrap();
    assert_eq!(adults.len(), 3);
    assert_eq!(adults[0].name, "Alice");

    let query = db.query::<Person>(|q: Select<Person>| q.has(person::NAME, "Carol"));
    assert_eq!(query.single().unwrap().id, 3);
}

#[test]
fn grouped_lookup_groups_by_the_selected_attribute() {
    let db = seeded_db();
    let by_owner = db
        .grouped([1i64, 3i64], dog::OWNER_ID, dog::OWNER_ID)
        .unwrap();

    assert_eq!(by_owner.len(), 2);
    let alice_dogs: Vec<&str> = by_owner[&1].iter().map(|d| d.name.as_str()).collect();
    assert_eq!(alice_dogs.len(), 2);
    assert!(alice_dogs.contains(&"Rex") && alice_dogs.contains(&"Spot"));
    assert_eq!(by_owner[&3].len(), 1);
    assert_eq!(by_owner[&3][0].name, "Fido");
}

#[test]
fn grouped_lookup_with_unmatched_keys_is_just_smaller() {
    let db = seeded_db();
    let by_owner = db
        .grouped([2i64, 99i64], dog::OWNER_ID, dog::OWNER_ID)
        .unwrap();
    assert!(by_owner.is_empty());
}

#[test]
fn rjoin_by_pairs_every_input_in_order() {
    let db = seeded_db();
    let people: Vec<Person> = db.find::<Person>().asc(person::ID).list().unwrap();
    assert_eq!(people.len(), 4);

    let pairs = db
        .rjoin_by(
            people,
            team::ID,
            |p: &Person| p.team_id.unwrap_or(0),
            |t: &Team| t.id,
        )
        .unwrap();

    assert_eq!(pairs.len(), 4);
    assert_eq!(pairs[0].0.name, "Alice");
    assert_eq!(pairs[0].1.as_ref().unwrap().name, "Falcons");
    assert_eq!(pairs[1].0.name, "Bob");
    assert_eq!(pairs[1].1.as_ref().unwrap().name, "Falcons");
    assert_eq!(pairs[2].0.name, "Carol");
    assert_eq!(pairs[2].1.as_ref().unwrap().name, "Otters");
    // Dave has no team; an unmatched source is a partial result, not an error.
    assert_eq!(pairs[3].0.name, "Dave");
    assert!(pairs[3].1.is_none());
}

#[test]
fn rjoin_rejects_ambiguous_target_keys() {
    let db = seeded_db();
    let alice = vec![db.find_by(person::NAME, "Alice").single().unwrap()];

    // Every dog is a candidate and Alice owns two, so keying candidates by
    // owner collides.
    let err = db
        .rjoin(
            alice,
            |p: &Person| p.id,
            |d: &Dog| d.owner_id,
            |root: &Root<Dog>| gt(root.get(dog::ID), param(0i64)),
        )
        .unwrap_err();
    assert!(matches!(err, Error::AmbiguousKey(_)));
}

#[test]
fn rjoin_with_empty_input_issues_no_query() {
    // No tables exist here; a query would fail loudly.
    let db = Db::new(Connection::open_in_memory().unwrap());
    let pairs = db
        .rjoin(
            Vec::<Person>::new(),
            |p: &Person| p.id,
            |d: &Dog| d.owner_id,
            |root: &Root<Dog>| gt(root.get(dog::ID), param(0i64)),
        )
        .unwrap();
    assert!(pairs.is_empty());
}

#[test]
fn persist_round_trips_the_entity() {
    let db = open_db();
    let stored = db
        .persist(Team {
            id: 7,
            name: "Herons".into(),
            city: "Delft".into(),
        })
        .unwrap();
    assert_eq!(stored.name, "Herons");

    let reloaded = db.find_by(team::ID, 7i64).single().unwrap();
    assert_eq!(reloaded, stored);
}
