//! Diesel table definitions.
//!
//! Must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered users.
    users (id) {
        /// Nine character URL-safe identifier.
        id -> Text,
        /// Not unique at the storage level.
        username -> Text,
        /// Drives listing order.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Logged exercises, one row per entry in a user's log.
    exercises (user_id, position) {
        user_id -> Text,
        /// Zero-based index in the user's log.
        position -> Int4,
        description -> Text,
        /// Minutes.
        duration -> Float8,
        date -> Timestamptz,
    }
}

diesel::joinable!(exercises -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(users, exercises);
