//! Student service request and response types.
//!
//! These types model the `/student-management-service/students` REST resource.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A student identifier, assigned by the backend.
///
/// The service may hand out numeric or textual identifiers, so the value is
/// kept opaque and compared as its string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StudentId(String);

impl StudentId {
    /// Create an identifier from its string form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StudentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<i32> for StudentId {
    fn from(id: i32) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for StudentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = lenient_string(deserializer)?;
        if id.is_empty() {
            return Err(serde::de::Error::custom("student id cannot be empty"));
        }
        Ok(Self(id))
    }
}

/// A student record.
///
/// Returned by `GET /students` (as an array) and `GET /students/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Server-assigned identifier.
    pub id: StudentId,
    /// Given name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub first_name: String,
    /// Middle name. An empty string means the student has none.
    #[serde(default, deserialize_with = "lenient_string")]
    pub middle_name: String,
    /// Family name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub last_name: String,
    /// Age in years, if known.
    #[serde(default)]
    pub age: Option<i32>,
    /// National identity card number.
    #[serde(default, deserialize_with = "lenient_string")]
    pub nic: String,
    /// Phone number, kept as text.
    #[serde(default, deserialize_with = "lenient_string")]
    pub tel: String,
}

impl Student {
    /// Full display name: first, optional middle, last.
    pub fn display_name(&self) -> String {
        if self.middle_name.is_empty() {
            format!("{} {}", self.first_name, self.last_name)
        } else {
            format!("{} {} {}", self.first_name, self.middle_name, self.last_name)
        }
    }

    /// Age as display text, empty when unknown.
    pub fn age_text(&self) -> String {
        self.age.map(|age| age.to_string()).unwrap_or_default()
    }

    /// Check whether this record matches a search term.
    ///
    /// Names and NIC are compared case-insensitively. Age, phone and id are
    /// plain substring matches against their text form. Any one field
    /// matching is enough; an empty term matches everything.
    pub fn matches_search(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.first_name.to_lowercase().contains(&needle)
            || self.last_name.to_lowercase().contains(&needle)
            || self.nic.to_lowercase().contains(&needle)
            || self
                .age
                .is_some_and(|age| age.to_string().contains(term))
            || self.tel.contains(term)
            || self.id.as_str().contains(term)
    }
}

/// Filter a collection down to the records matching `term`, in order.
pub fn filter_students<'a>(students: &'a [Student], term: &str) -> Vec<&'a Student> {
    students
        .iter()
        .filter(|student| student.matches_search(term))
        .collect()
}

/// Request body for `POST /students` and `PUT /students/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPayload {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    /// Serialized as `null` when absent.
    pub age: Option<i32>,
    pub nic: String,
    pub tel: String,
}

/// Parse the leading integer of a text value.
///
/// Skips leading whitespace, accepts an optional sign, then reads decimal
/// digits up to the first non-digit. `"20"`, `" 20 "` and `"20abc"` all
/// yield 20. Returns `None` when no digits lead the text or the value does
/// not fit in an `i32`.
pub fn parse_leading_int(text: &str) -> Option<i32> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if digits.is_empty() {
        return None;
    }

    let magnitude: i64 = digits.parse().ok()?;
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).ok()
}

/// Deserialize a scalar as text: strings pass through, numbers and booleans
/// use their JSON text, `null` becomes an empty string.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number, found {}",
            other
        ))),
    }
}
