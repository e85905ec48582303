//! Declarative field schemas for the museum resources.
//!
//! Every writable resource declares its JSON fields once: the column each one
//! maps to, the expected type, whether it is required and which row it must
//! reference. Request bodies go through [`ResourceSchema::validate`] before any
//! statement is built.

pub mod definitions;
pub mod validation;

use crate::backend::{quote_ident, SqlValue};
use crate::error::AppResult;
use serde_json::Value;

pub use validation::MISSING_FIELDS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Any whole number
    Integer,
    /// A positive whole number naming a row
    Identifier,
    Decimal,
    Text,
    /// Calendar date, `YYYY-MM-DD`
    Date,
}

impl FieldKind {
    pub fn describe(&self) -> &'static str {
        match self {
            FieldKind::Integer => "an integer",
            FieldKind::Identifier => "a positive integer",
            FieldKind::Decimal => "a number",
            FieldKind::Text => "a string",
            FieldKind::Date => "a date (YYYY-MM-DD)",
        }
    }
}

/// A foreign key that must point at an existing row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    pub table: &'static str,
    pub column: &'static str,
    /// Human readable name used in error messages
    pub label: &'static str,
}

impl Reference {
    pub fn exists_sql(&self) -> String {
        format!(
            "SELECT 1 AS found FROM {} WHERE {} = ? LIMIT 1",
            quote_ident(self.table),
            quote_ident(self.column)
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// JSON key in the request body
    pub name: &'static str,
    /// Other accepted JSON keys
    pub aliases: &'static [&'static str],
    pub column: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub references: Option<Reference>,
}

impl FieldSpec {
    pub const fn required(name: &'static str, column: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            aliases: &[],
            column,
            kind,
            required: true,
            references: None,
        }
    }

    pub const fn optional(name: &'static str, column: &'static str, kind: FieldKind) -> Self {
        Self {
            required: false,
            ..Self::required(name, column, kind)
        }
    }

    pub const fn aliases(self, aliases: &'static [&'static str]) -> Self {
        Self { aliases, ..self }
    }

    pub const fn references(self, reference: Reference) -> Self {
        Self {
            references: Some(reference),
            ..self
        }
    }
}

#[derive(Debug)]
pub struct ResourceSchema {
    pub name: &'static str,
    pub table: &'static str,
    /// Column whose value is reported back as `insertedId`
    pub key_column: &'static str,
    pub fields: &'static [FieldSpec],
}

/// Output of a successful validation: bind values in field order plus the
/// references that have to exist before inserting.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRecord {
    pub values: Vec<SqlValue>,
    pub references: Vec<(Reference, i64)>,
}

impl ResourceSchema {
    pub fn insert_sql(&self) -> String {
        let columns: Vec<String> = self.fields.iter().map(|f| quote_ident(f.column)).collect();
        let placeholders = vec!["?"; self.fields.len()].join(", ");

        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote_ident(self.table),
            columns.join(", "),
            placeholders
        )
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn validate(&self, body: &Value) -> AppResult<ValidatedRecord> {
        validation::validate_record(self, body)
    }
}
