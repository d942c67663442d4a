use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entities::{sets, themes};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub id: i32,
    pub name: String,
}

impl From<themes::Model> for Theme {
    fn from(model: themes::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

/// A catalog set with its theme joined in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegoSet {
    pub set_num: String,
    pub name: String,
    pub year: i32,
    pub num_parts: i32,
    pub theme_id: Option<i32>,
    pub img_url: String,
    pub theme: Option<Theme>,
}

impl From<(sets::Model, Option<themes::Model>)> for LegoSet {
    fn from((set, theme): (sets::Model, Option<themes::Model>)) -> Self {
        Self {
            set_num: set.set_num,
            name: set.name,
            year: set.year,
            num_parts: set.num_parts,
            theme_id: set.theme_id,
            img_url: set.img_url,
            theme: theme.map(Theme::from),
        }
    }
}

/// Input for inserting a set. The set number is the natural key and is never generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSet {
    pub set_num: String,
    pub name: String,
    pub year: i32,
    pub num_parts: i32,
    pub theme_id: Option<i32>,
    #[serde(default)]
    pub img_url: String,
}

impl NewSet {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();
        if self.set_num.trim().is_empty() {
            errors.push("set_num cannot be empty".to_string());
        }
        errors.extend(field_errors(&self.name, self.year, self.num_parts));
        ValidationErrors::check(errors)
    }

    #[must_use]
    pub fn changes(&self) -> SetChanges {
        SetChanges {
            name: self.name.clone(),
            year: self.year,
            num_parts: self.num_parts,
            theme_id: self.theme_id,
            img_url: self.img_url.clone(),
        }
    }
}

/// Replacement values for an existing set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetChanges {
    pub name: String,
    pub year: i32,
    pub num_parts: i32,
    pub theme_id: Option<i32>,
    #[serde(default)]
    pub img_url: String,
}

impl SetChanges {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        ValidationErrors::check(field_errors(&self.name, self.year, self.num_parts))
    }
}

fn field_errors(name: &str, year: i32, num_parts: i32) -> Vec<String> {
    let mut errors = Vec::new();
    if name.trim().is_empty() {
        errors.push("name cannot be empty".to_string());
    }
    if year <= 0 {
        errors.push(format!("year must be positive, got {year}"));
    }
    if num_parts < 0 {
        errors.push(format!("num_parts cannot be negative, got {num_parts}"));
    }
    errors
}

/// Every message produced while validating a write, in the order produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    #[must_use]
    pub fn single(message: impl Into<String>) -> Self {
        Self(vec![message.into()])
    }

    fn check(messages: Vec<String>) -> Result<(), Self> {
        if messages.is_empty() {
            Ok(())
        } else {
            Err(Self(messages))
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }
}

impl From<Vec<String>> for ValidationErrors {
    fn from(messages: Vec<String>) -> Self {
        Self(messages)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_set() -> NewSet {
        NewSet {
            set_num: "75192-1".to_string(),
            name: "Millennium Falcon".to_string(),
            year: 2017,
            num_parts: 7541,
            theme_id: Some(158),
            img_url: "https://cdn.rebrickable.com/media/sets/75192-1.jpg".to_string(),
        }
    }

    #[test]
    fn test_valid_set_passes() {
        assert!(new_set().validate().is_ok());
    }

    #[test]
    fn test_validation_collects_every_message() {
        let mut set = new_set();
        set.set_num = " ".to_string();
        set.name = String::new();
        set.num_parts = -1;

        let errors = set.validate().unwrap_err();
        assert_eq!(errors.messages().len(), 3);
        assert_eq!(errors.first(), Some("set_num cannot be empty"));
        assert!(errors.to_string().contains("num_parts cannot be negative"));
    }

    #[test]
    fn test_changes_skip_set_num_check() {
        let changes = new_set().changes();
        assert!(changes.validate().is_ok());

        let bad = SetChanges {
            year: 0,
            ..changes
        };
        assert_eq!(
            bad.validate().unwrap_err().first(),
            Some("year must be positive, got 0")
        );
    }

    #[test]
    fn test_join_maps_theme() {
        let set = sets::Model {
            set_num: "10497-1".to_string(),
            name: "Galaxy Explorer".to_string(),
            year: 2022,
            num_parts: 1254,
            theme_id: Some(9),
            img_url: String::new(),
        };
        let theme = themes::Model {
            id: 9,
            name: "Space".to_string(),
        };

        let joined = LegoSet::from((set, Some(theme)));
        assert_eq!(joined.theme.map(|t| t.name), Some("Space".to_string()));
        assert_eq!(joined.theme_id, Some(9));
    }
}
