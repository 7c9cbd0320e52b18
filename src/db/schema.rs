pub const SCHEMA_VERSION: i32 = 1;

/// V1: the four contact book tables.
/// Foreign keys are declared for documentation only; enforcement stays off so
/// references may dangle and `prefix_id` can default to the home prefix.
pub const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS contact_group (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR(255) NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS contact (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name VARCHAR(60),
    last_name VARCHAR(60),
    date_of_birth DATE,
    group_id INTEGER,
    street VARCHAR(60),
    house_number INTEGER,
    city VARCHAR(60),
    FOREIGN KEY (group_id) REFERENCES contact_group(id)
);

CREATE TABLE IF NOT EXISTS prefix (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    prefix INTEGER NOT NULL UNIQUE,
    state VARCHAR(255) NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS phone_number (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    prefix_id INTEGER NOT NULL DEFAULT 420,
    number INTEGER NOT NULL,
    contact_id INTEGER,
    FOREIGN KEY (prefix_id) REFERENCES prefix(id),
    FOREIGN KEY (contact_id) REFERENCES contact(id)
);

CREATE INDEX IF NOT EXISTS idx_contact_group ON contact(group_id);
CREATE INDEX IF NOT EXISTS idx_phone_contact ON phone_number(contact_id);
CREATE INDEX IF NOT EXISTS idx_phone_prefix ON phone_number(prefix_id);
"#;
