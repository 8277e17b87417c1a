//! Diesel schema for board persistence.

diesel::table! {
    /// Board columns.
    columns (id) {
        /// Column identifier.
        id -> Uuid,
        /// Column title.
        title -> Text,
        /// Dense position within the board.
        position -> Int4,
    }
}

diesel::table! {
    /// Tasks owned by columns.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        title -> Text,
        /// Task description, possibly empty.
        description -> Text,
        /// Owning column.
        column_id -> Uuid,
        /// Dense position within the owning column.
        position -> Int4,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(tasks -> columns (column_id));
diesel::allow_tables_to_appear_in_same_query!(columns, tasks);
