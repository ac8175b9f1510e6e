use crate::domain::model::Student;
use crate::utils::error::Result;
use serde_json::{Map, Value};

const STUDENTS_FIELD: &str = "students";

/// Top-level JSON object holding the `students` array plus any other
/// fields the file carried, which are written back untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentDocument {
    root: Map<String, Value>,
}

impl StudentDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty input or a non-object root yields an empty document.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        if data.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(Self::new());
        }

        let value: Value = serde_json::from_slice(data)?;
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => {
                tracing::warn!(
                    "Document root is not an object ({}), starting from an empty document",
                    json_kind(&other)
                );
                Ok(Self::new())
            }
        }
    }

    pub fn to_vec_pretty(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(&self.root)?)
    }

    /// Deserializes each entry on its own so one bad record does not hide the rest.
    pub fn students(&self) -> Vec<Student> {
        let Some(Value::Array(entries)) = self.root.get(STUDENTS_FIELD) else {
            return Vec::new();
        };

        entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                match serde_json::from_value::<Student>(entry.clone()) {
                    Ok(student) => Some(student),
                    Err(e) => {
                        tracing::warn!("Skipping malformed student entry #{}: {}", index, e);
                        None
                    }
                }
            })
            .collect()
    }

    pub fn set_students(&mut self, students: &[Student]) -> Result<()> {
        let entries = students
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        self.root
            .insert(STUDENTS_FIELD.to_string(), Value::Array(entries));
        Ok(())
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.root.get(field)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
