use anyhow::Result;
use rusqlite::params;

use super::Database;
use crate::models::{Contact, PhoneNumber, Prefix, DEFAULT_PREFIX_ID};

impl Database {
    // ==================== GROUP ====================

    /// Insert a group and return its generated id
    pub fn insert_group(&self, name: &str) -> Result<i64> {
        self.conn
            .execute("INSERT INTO contact_group (name) VALUES (?)", [name])?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn delete_group(&self, id: i64) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM contact_group WHERE id = ?", [id])?;
        Ok(rows > 0)
    }

    // ==================== PREFIX ====================

    pub fn insert_prefix(&self, prefix: &Prefix) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO prefix (prefix, state) VALUES (?, ?)",
            params![prefix.prefix, prefix.state],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    // ==================== CONTACT ====================

    pub fn insert_contact(&self, contact: &Contact) -> Result<i64> {
        self.conn.execute(
            r#"INSERT INTO contact (
                first_name, last_name, date_of_birth, group_id, street, house_number, city
            ) VALUES (?, ?, ?, ?, ?, ?, ?)"#,
            params![
                contact.first_name,
                contact.last_name,
                contact
                    .date_of_birth
                    .map(|d| d.format("%Y-%m-%d").to_string()),
                contact.group_id,
                contact.street,
                contact.house_number,
                contact.city,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    // ==================== PHONE NUMBER ====================

    /// Insert a phone number; a missing prefix falls back to the home prefix
    pub fn insert_phone_number(&self, phone: &PhoneNumber) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO phone_number (prefix_id, number, contact_id) VALUES (?, ?, ?)",
            params![
                phone.prefix_id.unwrap_or(DEFAULT_PREFIX_ID),
                phone.number,
                phone.contact_id,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }
}
