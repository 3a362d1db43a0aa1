//! Diesel schema for task persistence.

diesel::table! {
    /// Task records, active and archived.
    todo_tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Display title.
        #[max_length = 255]
        content -> Varchar,
        /// Goal description.
        goal -> Text,
        /// Priority level (1 to 3).
        priority -> Int2,
        /// Completion flag.
        is_done -> Bool,
        /// Reminder enabled flag.
        notification_enabled -> Bool,
        /// Reminder hour of day.
        notification_hour -> Int2,
        /// Reminder minute of hour.
        notification_minute -> Int2,
        /// Completion rating (1 to 5), set once done.
        rating -> Nullable<Int2>,
        /// Completion reflection, set once done.
        reflection -> Nullable<Text>,
        /// Completion timestamp, set once done.
        completed_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
