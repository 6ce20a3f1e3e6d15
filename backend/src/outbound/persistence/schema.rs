//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `migrations/` exactly. `diesel print-schema` regenerates this
//! file from a migrated database.

diesel::table! {
    /// Rentable rooms.
    ///
    /// `id` is a storage surrogate used for ordering; `code` is the room's
    /// identity outside the database.
    room (id) {
        id -> Int4,
        /// Hyphenated UUID.
        #[max_length = 36]
        code -> Varchar,
        size -> Nullable<Int4>,
        price -> Nullable<Int4>,
        longitude -> Nullable<Float8>,
        latitude -> Nullable<Float8>,
    }
}
