//! Field Schema
//!
//! Static per-type metadata describing a request object's fields and their
//! human-readable labels. Validators and the exception mapper look labels
//! up here by field name instead of inspecting the type at runtime.

/// A single field of a [`Schema`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    name: &'static str,
    label: Option<&'static str>,
}

impl FieldSchema {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn label(&self) -> Option<&'static str> {
        self.label
    }
}

/// Field metadata for one request type
///
/// Usage:
/// ```
/// use kernel::schema::Schema;
///
/// let schema = Schema::new("ScheduleRequest")
///     .field("start_date", "Start date")
///     .unlabelled("note");
///
/// assert_eq!(schema.label_of("start_date"), "Start date");
/// assert_eq!(schema.label_of("note"), "note");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    name: &'static str,
    fields: Vec<FieldSchema>,
}

impl Schema {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    /// Declare a labelled field
    pub fn field(mut self, name: &'static str, label: &'static str) -> Self {
        self.fields.push(FieldSchema {
            name,
            label: Some(label),
        });
        self
    }

    /// Declare a field without a label
    pub fn unlabelled(mut self, name: &'static str) -> Self {
        self.fields.push(FieldSchema { name, label: None });
        self
    }

    /// Type name the schema describes
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn get(&self, field: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == field)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Declared label, if any
    pub fn label(&self, field: &str) -> Option<&'static str> {
        self.get(field).and_then(FieldSchema::label)
    }

    /// Declared label, falling back to the raw field name
    pub fn label_of<'a>(&self, field: &'a str) -> &'a str {
        self.label(field).unwrap_or(field)
    }
}
