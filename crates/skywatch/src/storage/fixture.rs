//! Throwaway sightings databases for tests.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};

/// One seeded sighting row.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixtureSighting {
    pub lat: f64,
    pub lon: f64,
    pub year: i32,
    pub country: &'static str,
    pub shape: &'static str,
}

const fn sighting(
    lat: f64,
    lon: f64,
    year: i32,
    country: &'static str,
    shape: &'static str,
) -> FixtureSighting {
    FixtureSighting {
        lat,
        lon,
        year,
        country,
        shape,
    }
}

/// A database file in the temp directory, deleted on drop.
#[derive(Debug)]
pub(crate) struct FixtureDb {
    path: PathBuf,
}

impl FixtureDb {
    pub const SIGHTINGS: [FixtureSighting; 7] = [
        sighting(36.1, -115.2, 1985, "us", "triangle"),
        sighting(40.7, -74.0, 1995, "us", "disk"),
        sighting(51.5, -0.1, 2000, "gb", "light"),
        sighting(33.4, -112.1, 1997, "us", "triangle"),
        sighting(47.6, -122.3, 2012, "us", "disk"),
        sighting(-33.9, 151.2, 2005, "au", "triangle"),
        sighting(34.0, -118.2, 1991, "us", "light"),
    ];

    pub const MOVIE_QUALITY: [(i32, i64, f64); 5] = [
        (1985, 40, 5.5),
        (1995, 120, 6.0),
        (2000, 210, 6.8),
        (2010, 180, 7.0),
        (2014, 90, 6.2),
    ];

    pub const MILITARY_TECH: [(i32, &'static str); 4] = [
        (1988, "F-117 Nighthawk"),
        (1995, "SR-71 Blackbird"),
        (2009, "RQ-170 Sentinel"),
        (2013, "SR-72"),
    ];

    /// An existing database file with no tables.
    pub fn empty(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "skywatch_test_{}_{name}.db",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        let conn = Connection::open(&path).expect("failed to create fixture database");
        conn.execute_batch("PRAGMA user_version = 1;")
            .expect("failed to initialize fixture database");
        Self { path }
    }

    /// A database with all three tables and the seed rows above.
    pub fn seeded(name: &str) -> Self {
        let db = Self::empty(name);
        let conn = db.connect();
        conn.execute_batch(
            r"
            CREATE TABLE sightings (
                latitude REAL,
                longitude REAL,
                year INTEGER,
                country TEXT,
                refined_shape TEXT,
                duration_seconds REAL
            );
            CREATE TABLE movie_quality (
                Year INTEGER,
                sighting_count INTEGER,
                imdb_rating REAL
            );
            CREATE TABLE military_tech (
                Year INTEGER,
                Aircraft TEXT
            );
            ",
        )
        .expect("failed to create fixture tables");

        for s in &Self::SIGHTINGS {
            conn.execute(
                "INSERT INTO sightings (latitude, longitude, year, country, refined_shape) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![s.lat, s.lon, s.year, s.country, s.shape],
            )
            .expect("failed to seed sightings");
        }
        for (year, count, rating) in Self::MOVIE_QUALITY {
            conn.execute(
                "INSERT INTO movie_quality (Year, sighting_count, imdb_rating) VALUES (?1, ?2, ?3)",
                params![year, count, rating],
            )
            .expect("failed to seed movie_quality");
        }
        for (year, aircraft) in Self::MILITARY_TECH {
            conn.execute(
                "INSERT INTO military_tech (Year, Aircraft) VALUES (?1, ?2)",
                params![year, aircraft],
            )
            .expect("failed to seed military_tech");
        }
        db
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run a statement against the fixture with a writable connection.
    pub fn execute(&self, sql: &str) {
        self.connect()
            .execute_batch(sql)
            .expect("fixture statement failed");
    }

    fn connect(&self) -> Connection {
        Connection::open(&self.path).expect("failed to open fixture database")
    }
}

impl Drop for FixtureDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}
