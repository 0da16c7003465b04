//! Diesel schema for board persistence.

diesel::table! {
    /// Project boards.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 500]
        name -> Varchar,
        /// Free-text description.
        #[max_length = 1000]
        description -> Varchar,
    }
}

diesel::table! {
    /// Columns ordered by `position` within their project.
    board_columns (id) {
        /// Column identifier.
        id -> Uuid,
        /// Display name, unique within the project.
        #[max_length = 255]
        name -> Varchar,
        /// 1-based index among the project's columns.
        position -> Int4,
        /// Owning project.
        project_id -> Uuid,
    }
}

diesel::table! {
    /// Tasks ordered by `position` within their column.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 500]
        name -> Varchar,
        /// Free-text description.
        #[max_length = 5000]
        description -> Varchar,
        /// 1-based index among the column's tasks.
        position -> Int4,
        /// Owning column.
        column_id -> Uuid,
    }
}

diesel::table! {
    /// Comments attached to tasks.
    comments (id) {
        /// Comment identifier.
        id -> Uuid,
        /// Comment text.
        #[max_length = 5000]
        body -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Task the comment belongs to.
        task_id -> Uuid,
    }
}

diesel::joinable!(board_columns -> projects (project_id));
diesel::joinable!(tasks -> board_columns (column_id));
diesel::joinable!(comments -> tasks (task_id));

diesel::allow_tables_to_appear_in_same_query!(projects, board_columns, tasks, comments);
