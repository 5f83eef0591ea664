use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of whatever lives at a config path.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    /// A container of named children.
    Group,
    /// A leaf holding a loadable value.
    Config,
    NotFound,
}

impl ObjectType {
    /// Whether an entry of this type passes an optional `list` filter.
    pub fn matches(self, filter: Option<ObjectType>) -> bool {
        match filter {
            None => self != ObjectType::NotFound,
            Some(wanted) => self == wanted,
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ObjectType::Group => "GROUP",
            ObjectType::Config => "CONFIG",
            ObjectType::NotFound => "NOT_FOUND",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_matching() {
        assert!(ObjectType::Group.matches(None));
        assert!(ObjectType::Config.matches(None));
        assert!(!ObjectType::NotFound.matches(None));
        assert!(ObjectType::Group.matches(Some(ObjectType::Group)));
        assert!(!ObjectType::Group.matches(Some(ObjectType::Config)));
    }

    #[test]
    fn display_and_serde() {
        assert_eq!(ObjectType::NotFound.to_string(), "NOT_FOUND");
        let json = serde_json::to_string(&ObjectType::Group).unwrap();
        assert_eq!(json, "\"group\"");
        let back: ObjectType = serde_json::from_str("\"config\"").unwrap();
        assert_eq!(back, ObjectType::Config);
    }
}
