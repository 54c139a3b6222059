use serde::Deserialize;

/// Fields for a movie that is not stored yet.
#[derive(Clone, Debug, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub description: String,
    pub rating: Option<f64>,
    pub review: Option<String>,
    pub img_url: String,
}

/// A partial update. `None` leaves the stored value alone.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MoviePatch {
    pub rating: Option<f64>,
    pub review: Option<String>,
}

impl MoviePatch {
    pub fn is_empty(&self) -> bool {
        self.rating.is_none() && self.review.is_none()
    }
}

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct EditForm {
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub review: String,
    #[serde(default)]
    pub csrf_token: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct AddForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub review: String,
    #[serde(default)]
    pub csrf_token: String,
}

/// Query of `/select`: the chosen TMDB id plus the rating and review typed
/// on the add form, carried through the selection links.
#[derive(Debug, Deserialize)]
pub struct SelectQuery {
    pub id: i64,
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub review: String,
}

/// Parses an optional rating field. Blank means no rating.
pub fn parse_rating(raw: &str) -> Result<Option<f64>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(format!("\"{raw}\" is not a number")),
    }
}

/// Trims a free-text field, mapping blank input to `None`.
pub fn non_blank(raw: &str) -> Option<String> {
    let raw = raw.trim();
    (!raw.is_empty()).then(|| raw.to_string())
}
