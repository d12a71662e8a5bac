#![allow(dead_code)]

//! Shared fixture schema for the integration tests: a small club roster with
//! teams, people, their dogs, and undirected friendships.

use critq::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub city: String,
}

impl Table for Team {
    const NAME: &'static str = "team";
    const PRIMARY_KEY: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &["id", "name", "city"];
}

impl TryFrom<&rusqlite::Row<'_>> for Team {
    type Error = rusqlite::Error;

    fn try_from(row: &rusqlite::Row<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            city: row.get("city")?,
        })
    }
}

impl ToRow for Team {
    fn values(&self) -> Vec<SqliteValue> {
        vec![
            self.id.into(),
            self.name.clone().into(),
            self.city.clone().into(),
        ]
    }
}

pub mod team {
    use super::Team;
    use critq::prelude::*;

    pub const ID: Column<Team, i64> = Column::new("id");
    pub const NAME: Column<Team, String> = Column::new("name");
    pub const CITY: Column<Team, String> = Column::new("city");
}

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub age: Option<i64>,
    pub team_id: Option<i64>,
}

impl Table for Person {
    const NAME: &'static str = "person";
    const PRIMARY_KEY: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &["id", "name", "age", "team_id"];
}

impl TryFrom<&rusqlite::Row<'_>> for Person {
    type Error = rusqlite::Error;

    fn try_from(row: &rusqlite::Row<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            age: row.get("age")?,
            team_id: row.get("team_id")?,
        })
    }
}

impl ToRow for Person {
    fn values(&self) -> Vec<SqliteValue> {
        vec![
            self.id.into(),
            self.name.clone().into(),
            self.age.into(),
            self.team_id.into(),
        ]
    }
}

pub mod person {
    use super::{Dog, Person, Team};
    use critq::prelude::*;

    pub const ID: Column<Person, i64> = Column::new("id");
    pub const NAME: Column<Person, String> = Column::new("name");
    pub const AGE: Column<Person, Option<i64>> = Column::new("age");
    pub const TEAM_ID: Column<Person, Option<i64>> = Column::new("team_id");
    pub const TEAM: Relation<Person, Team> = Relation::new("team_id");
    pub const DOGS: ListRelation<Person, Dog> = ListRelation::new("owner_id");
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dog {
    pub id: i64,
    pub name: String,
    pub owner_id: i64,
}

impl Table for Dog {
    const NAME: &'static str = "dog";
    const PRIMARY_KEY: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &["id", "name", "owner_id"];
}

impl TryFrom<&rusqlite::Row<'_>> for Dog {
    type Error = rusqlite::Error;

    fn try_from(row: &rusqlite::Row<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            owner_id: row.get("owner_id")?,
        })
    }
}

impl ToRow for Dog {
    fn values(&self) -> Vec<SqliteValue> {
        vec![
            self.id.into(),
            self.name.clone().into(),
            self.owner_id.into(),
        ]
    }
}

pub mod dog {
    use super::{Dog, Person};
    use critq::prelude::*;

    pub const ID: Column<Dog, i64> = Column::new("id");
    pub const NAME: Column<Dog, String> = Column::new("name");
    pub const OWNER_ID: Column<Dog, i64> = Column::new("owner_id");
    pub const OWNER: Relation<Dog, Person> = Relation::new("owner_id");
}

#[derive(Debug, Clone, PartialEq)]
pub struct Friendship {
    pub id: i64,
    pub a_id: i64,
    pub b_id: i64,
}

impl Table for Friendship {
    const NAME: &'static str = "friendship";
    const PRIMARY_KEY: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &["id", "a_id", "b_id"];
}

impl TryFrom<&rusqlite::Row<'_>> for Friendship {
    type Error = rusqlite::Error;

    fn try_from(row: &rusqlite::Row<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.get("id")?,
            a_id: row.get("a_id")?,
            b_id: row.get("b_id")?,
        })
    }
}

impl ToRow for Friendship {
    fn values(&self) -> Vec<SqliteValue> {
        vec![self.id.into(), self.a_id.into(), self.b_id.into()]
    }
}

pub mod friendship {
    use super::{Friendship, Person};
    use critq::prelude::*;

    pub const ID: Column<Friendship, i64> = Column::new("id");
    pub const A_ID: Column<Friendship, i64> = Column::new("a_id");
    pub const B_ID: Column<Friendship, i64> = Column::new("b_id");
    pub const A: Relation<Friendship, Person> = Relation::new("a_id");
    pub const B: Relation<Friendship, Person> = Relation::new("b_id");
}

/// An empty in-memory database with the fixture schema applied.
pub fn open_db() -> Db {
    let conn = Connection::open_in_memory().expect("open in-memory database");
    conn.execute_batch(
        r#"
        CREATE TABLE team (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            city TEXT NOT NULL
        );
        CREATE TABLE person (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            age INTEGER,
            team_id INTEGER REFERENCES team(id)
        );
        CREATE TABLE dog (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            owner_id INTEGER NOT NULL REFERENCES person(id)
        );
        CREATE TABLE friendship (
            id INTEGER PRIMARY KEY,
            a_id INTEGER NOT NULL REFERENCES person(id),
            b_id INTEGER NOT NULL REFERENCES person(id)
        );
        "#,
    )
    .expect("create fixture schema");
    Db::new(conn)
}

/// The standard roster most tests run against.
pub fn seeded_db() -> Db {
    let db = open_db();
    for team in [
        Team {
            id: 1,
            name: "Falcons".into(),
            city: "Utrecht".into(),
        },
        Team {
            id: 2,
            name: "Otters".into(),
            city: "Leiden".into(),
        },
    ] {
        db.persist(team).expect("seed team");
    }
    for person in [
        Person {
            id: 1,
            name: "Alice".into(),
            age: Some(34),
            team_id: Some(1),
        },
        Person {
            id: 2,
            name: "Bob".into(),
            age: Some(19),
            team_id: Some(1),
        },
        Person {
            id: 3,
            name: "Carol".into(),
            age: None,
            team_id: Some(2),
        },
        Person {
            id: 4,
            name: "Dave".into(),
            age: Some(40),
            team_id: None,
        },
    ] {
        db.persist(person).expect("seed person");
    }
    for dog in [
        Dog {
            id: 1,
            name: "Rex".into(),
            owner_id: 1,
        },
        Dog {
            id: 2,
            name: "Spot".into(),
            owner_id: 1,
        },
        Dog {
            id: 3,
            name: "Fido".into(),
            owner_id: 3,
        },
    ] {
        db.persist(dog).expect("seed dog");
    }
    for friendship in [
        Friendship {
            id: 1,
            a_id: 1,
            b_id: 2,
        },
        Friendship {
            id: 2,
            a_id: 3,
            b_id: 1,
        },
    ] {
        db.persist(friendship).expect("seed friendship");
    }
    db
}
