//! Small record type for exercising the generic query layer in tests

use crate::core::entity::{EntitySchema, Record};
use crate::core::field::FieldValue;
use chrono::{DateTime, Duration, TimeZone, Utc};

const KINDS: &[&str] = &["backlog", "todo", "done"];

static NOTE_SCHEMA: EntitySchema = EntitySchema {
    entity_type: "note",
    plural: "notes",
    fields: &["id", "title", "body", "kind", "createdAt", "updatedAt"],
    searchable: &["title", "body", "id"],
    enum_fields: &["kind"],
    unique: &["title"],
};

#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub body: Option<String>,
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    pub fn new(id: &str, title: &str, body: Option<&str>, kind: &str) -> Self {
        let at = base_time();
        Self {
            id: id.to_string(),
            title: title.to_string(),
            body: body.map(str::to_string),
            kind: kind.to_string(),
            created_at: at,
            updated_at: at,
        }
    }

    pub fn at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = created_at;
        self
    }
}

impl Record for Note {
    fn schema() -> &'static EntitySchema {
        &NOTE_SCHEMA
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(self.id.as_str().into()),
            "title" => Some(self.title.as_str().into()),
            "body" => Some(self.body.clone().into()),
            "kind" => Some(
                KINDS
                    .iter()
                    .position(|k| *k == self.kind)
                    .map_or(FieldValue::Null, |ordinal| FieldValue::Enum {
                        value: KINDS[ordinal],
                        ordinal,
                    }),
            ),
            "createdAt" => Some(self.created_at.into()),
            "updatedAt" => Some(self.updated_at.into()),
            _ => None,
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Twelve notes; every fourth one is "done", the rest "todo"
///
/// Creation times are shuffled so that insertion order and chronological
/// order differ.
pub fn notes() -> Vec<Note> {
    (1..=12)
        .map(|i| {
            let kind = if i % 4 == 0 { "done" } else { "todo" };
            let body = (i % 2 == 0).then(|| format!("body of note {i}"));
            let offset = (i * 7) % 12;
            Note::new(&format!("note-{i:02}"), &format!("Note {i}"), body.as_deref(), kind)
                .at(base_time() + Duration::hours(offset))
        })
        .collect()
}
