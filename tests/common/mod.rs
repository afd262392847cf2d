//! Shared fixture: four related tables seeded the same way for every test.

use vela_orm::{ConnectionConfig, Database};

pub fn connect(debug: bool) -> Database {
    let db = Database::new();
    db.connect(ConnectionConfig::sqlite(":memory:").debug(debug))
        .expect("in-memory connect");
    db
}

pub fn fixture() -> Database {
    let db = connect(true);
    seed(&db);
    db
}

pub fn seed(db: &Database) {
    db.execute(
        "CREATE TABLE users (
            id INTEGER PRIMARY KEY,
            firstname VARCHAR(255),
            lastname VARCHAR(255),
            age INTEGER,
            country VARCHAR(255),
            created_at DATETIME
        )",
        &[],
    )
    .unwrap();

    db.execute(
        "CREATE TABLE user_professions (
            id INTEGER PRIMARY KEY,
            user_id INTEGER,
            title VARCHAR(255)
        )",
        &[],
    )
    .unwrap();

    db.execute(
        "CREATE TABLE events (
            id INTEGER PRIMARY KEY,
            title VARCHAR(255),
            country VARCHAR(255),
            started_at DATETIME
        )",
        &[],
    )
    .unwrap();

    db.execute(
        "CREATE TABLE user_events (
            id INTEGER PRIMARY KEY,
            user_id INTEGER,
            event_id INTEGER,
            created_at DATETIME
        )",
        &[],
    )
    .unwrap();

    db.execute(
        "INSERT INTO users (firstname, lastname, age, country, created_at) VALUES
            ('John', 'Doe', 45, 'Ireland', '2020-01-04 20:28:33'),
            ('Jane', 'Du', 35, 'England', '2020-02-14 10:15:12')",
        &[],
    )
    .unwrap();

    db.execute(
        "INSERT INTO user_professions (user_id, title) VALUES
            (1, 'Writer'),
            (2, 'Singer')",
        &[],
    )
    .unwrap();

    db.execute(
        "INSERT INTO events (title, country, started_at) VALUES
            ('Dance', 'New Zealand', '2019-01-04 20:28:33'),
            ('Music', 'England', '2019-09-14 10:15:12'),
            ('Design', 'Ireland', '2020-02-14 10:15:12'),
            ('Music', 'Ireland', '2019-09-14 10:15:12'),
            ('Film', 'Ireland', '2040-02-14 10:15:12'),
            ('Art', 'Island', '2050-02-14 10:15:12'),
            ('Music', 'Island', '2030-02-14 10:15:12')",
        &[],
    )
    .unwrap();

    db.execute(
        "INSERT INTO user_events (user_id, event_id, created_at) VALUES
            (1, 1, '2020-01-04 20:28:33'),
            (1, 2, '2020-02-19 05:15:12'),
            (1, 4, '2020-02-22 11:15:15'),
            (2, 2, '2020-03-10 02:17:12'),
            (2, 3, '2020-04-17 12:25:18'),
            (2, 5, '2020-04-15 11:10:12'),
            (100, 200, '2020-04-15 11:10:12'),
            (110, 220, '2020-04-15 11:10:12')",
        &[],
    )
    .unwrap();
}
