//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `migrations/` exactly; `diesel print-schema` regenerates it
//! from a live database.

diesel::table! {
    /// User accounts. `email` carries the `users_email_key` unique
    /// constraint.
    users (id) {
        id -> Int8,
        name -> Text,
        email -> Text,
        age -> Int4,
    }
}
