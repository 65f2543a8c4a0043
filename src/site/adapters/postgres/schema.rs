//! Diesel schema for monitored site persistence.

diesel::table! {
    /// Monitored site records.
    sites (id) {
        /// Store-assigned identifier.
        id -> Int4,
        /// Unique probe target.
        #[max_length = 2048]
        url -> Varchar,
        /// Optional free-text description.
        description -> Nullable<Text>,
        /// Last HTTP status, `-1` when unreachable, `NULL` when unchecked.
        status -> Nullable<Int4>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Creation or latest status write timestamp.
        updated_at -> Timestamptz,
    }
}
