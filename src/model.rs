use serde::{Deserialize, Deserializer, Serialize};

/// Opaque, already-authenticated identity of whoever issued a mutating call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerId(pub i64);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hole {
    pub id: i64,
    pub tee_box_id: i64,
    pub number: i64,
    pub distance: i64,
    pub par: i64,
    pub hcp_index: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeeBox {
    pub id: i64,
    pub course_id: i64,
    pub name: String,
    pub holes: Vec<Hole>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub active: bool,
    pub tee_boxes: Vec<TeeBox>,
}

/// A course row without its tee boxes, as returned by listing and flag updates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub active: bool,
}

// Candidate shapes. Missing or null values decode as their zero value so they
// fail the positivity and presence checks instead of failing the whole document.

fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

/// A null list reads as empty and a null element as an all-zero entry.
fn list_or_null<'de, D, T>(de: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let items = Option::<Vec<Option<T>>>::deserialize(de)?.unwrap_or_default();
    Ok(items.into_iter().map(Option::unwrap_or_default).collect())
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HoleDraft {
    #[serde(default, deserialize_with = "null_as_default")]
    pub number: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub distance: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub par: i64,
    #[serde(default, alias = "hcpIndex", deserialize_with = "null_as_default")]
    pub hcp_index: i64,
}

impl HoleDraft {
    pub fn is_positive(&self) -> bool {
        self.number >= 1 && self.distance >= 1 && self.par >= 1 && self.hcp_index >= 1
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TeeBoxDraft {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "list_or_null")]
    pub holes: Vec<HoleDraft>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CourseDraft {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(
        default,
        rename = "teeBoxes",
        alias = "tee_boxes",
        deserialize_with = "list_or_null"
    )]
    pub tee_boxes: Vec<TeeBoxDraft>,
}

impl CourseDraft {
    pub fn location(&self) -> Option<&str> {
        non_empty(self.location.as_deref())
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(self.description.as_deref())
    }
}

fn non_empty(v: Option<&str>) -> Option<&str> {
    v.filter(|s| !s.is_empty())
}
