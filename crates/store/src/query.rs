use crate::Document;
use serde_json::Value;

/// A single filter condition.
///
/// All matching is a case-insensitive substring test. Terms are matched
/// literally: pattern metacharacters carry no special meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// `field` contains `term`.
    FieldContains { field: String, term: String },
    /// At least one of `fields` contains `term`.
    ContainsAnyOf { fields: Vec<String>, term: String },
}

impl Clause {
    pub fn field_contains(field: impl Into<String>, term: impl Into<String>) -> Self {
        Clause::FieldContains {
            field: field.into(),
            term: term.into(),
        }
    }

    pub fn contains_any_of<I, S>(fields: I, term: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Clause::ContainsAnyOf {
            fields: fields.into_iter().map(Into::into).collect(),
            term: term.into(),
        }
    }

    fn matches(&self, doc: &Document) -> bool {
        match self {
            Clause::FieldContains { field, term } => field_contains(doc, field, term),
            Clause::ContainsAnyOf { fields, term } => {
                fields.iter().any(|field| field_contains(doc, field, term))
            }
        }
    }
}

/// Conjunction of [`Clause`]s. An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    clauses: Vec<Clause>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter matching every document.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Evaluate the filter against a document in process.
    pub fn matches(&self, doc: &Document) -> bool {
        self.clauses.iter().all(|clause| clause.matches(doc))
    }
}

fn field_contains(doc: &Document, field: &str, term: &str) -> bool {
    let needle = term.to_lowercase();
    match doc.get(field) {
        Some(Value::String(s)) => s.to_lowercase().contains(&needle),
        // Array fields match when any string element does.
        Some(Value::Array(items)) => items
            .iter()
            .any(|item| matches!(item, Value::String(s) if s.to_lowercase().contains(&needle))),
        _ => false,
    }
}

#[cfg(feature = "backend-mongo")]
mod mongo {
    use super::{Clause, Filter};
    use mongodb::bson::{doc, Document};

    fn regex_contains(field: &str, term: &str) -> Document {
        let mut out = Document::new();
        out.insert(
            field,
            doc! { "$regex": regex::escape(term), "$options": "i" },
        );
        out
    }

    impl Clause {
        /// Translate into a MongoDB filter document.
        pub fn to_mongo(&self) -> Document {
            match self {
                Clause::FieldContains { field, term } => regex_contains(field, term),
                Clause::ContainsAnyOf { fields, term } => {
                    let any: Vec<Document> = fields
                        .iter()
                        .map(|field| regex_contains(field, term))
                        .collect();
                    doc! { "$or": any }
                }
            }
        }
    }

    impl Filter {
        /// Translate into a MongoDB filter document: `{}` for no clauses, the
        /// clause itself for one, `$and` of all clauses otherwise.
        pub fn to_mongo(&self) -> Document {
            let mut parts: Vec<Document> = self.clauses.iter().map(Clause::to_mongo).collect();
            match parts.len() {
                0 => Document::new(),
                1 => parts.remove(0),
                _ => doc! { "$and": parts },
            }
        }
    }
}
