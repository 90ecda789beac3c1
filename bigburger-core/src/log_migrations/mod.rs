//! Log database migrations - embedded SQL files
//!
//! Each migration is a `(name, sql)` pair compiled in with `include_str!`
//! and applied in order by `LoggingService`.

/// All log migrations, in application order
///
/// New migrations get the next `NNN_description.sql` name and an entry at
/// the end of this list.
pub const LOG_MIGRATIONS: &[(&str, &str)] = &[
    ("000_migrations.sql", include_str!("000_migrations.sql")),
    (
        "001_initial_schema.sql",
        include_str!("001_initial_schema.sql"),
    ),
];
