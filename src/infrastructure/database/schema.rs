//! Opt-in first-run schema.
//!
//! Normal operation never touches the schema. This is only run when the user
//! asks for it with `--bootstrap-schema`.

use tracing::info;

use crate::domain::entities::Statement;
use crate::domain::errors::DatabaseError;
use crate::domain::ports::DatabasePort;

const TABLES: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS Client (
        SSN INTEGER PRIMARY KEY,
        Fname TEXT,
        Middle TEXT,
        Lname TEXT,
        Address TEXT,
        Phone_num TEXT
    )",
    "CREATE TABLE IF NOT EXISTS Branch (
        Branchno INTEGER PRIMARY KEY,
        Blocation TEXT,
        License_no TEXT
    )",
    "CREATE TABLE IF NOT EXISTS Garage (
        Garageno INTEGER PRIMARY KEY,
        Capacity INTEGER,
        Glocation TEXT,
        Branch_no INTEGER
    )",
    "CREATE TABLE IF NOT EXISTS Car (
        MotorID INTEGER PRIMARY KEY,
        License_no TEXT,
        Year_Model INTEGER,
        CName TEXT,
        Shade_num INTEGER,
        Color_name TEXT,
        Garage_no INTEGER,
        ClientID INTEGER
    )",
    "CREATE TABLE IF NOT EXISTS Booking (
        BookingID INTEGER PRIMARY KEY,
        Booking_Date TEXT,
        Booking_time TEXT,
        BranchID INTEGER,
        ClientID INTEGER
    )",
    "CREATE TABLE IF NOT EXISTS Service (
        ServiceID INTEGER PRIMARY KEY,
        SName TEXT,
        Cost REAL
    )",
];

/// Creates the six business tables if they are missing.
///
/// # Errors
/// Returns the first failing statement's error.
pub async fn bootstrap(database: &dyn DatabasePort) -> Result<(), DatabaseError> {
    for ddl in TABLES {
        database.execute(&Statement::raw(*ddl)).await?;
    }
    info!(tables = TABLES.len(), "Schema bootstrapped");
    Ok(())
}
