use serde::{Deserialize, Serialize};

/// Identifies which covenant field a text-change event targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CovenantField {
    UserName,
    TargetName,
}

impl CovenantField {
    /// Stable key for host event payloads (e.g., "user_name").
    pub fn key(&self) -> &'static str {
        match self {
            Self::UserName => "user_name",
            Self::TargetName => "target_name",
        }
    }
}

/// The pair of names bound during the covenant phase.
///
/// Both must be non-empty before the session auto-advances; the pair then
/// persists unchanged through navigation and resonance, and resets to empty
/// on restart.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CovenantInput {
    pub user_name: String,
    pub target_name: String,
}

impl CovenantInput {
    pub fn set(&mut self, field: CovenantField, value: String) {
        match field {
            CovenantField::UserName => self.user_name = value,
            CovenantField::TargetName => self.target_name = value,
        }
    }

    pub fn get(&self, field: CovenantField) -> &str {
        match field {
            CovenantField::UserName => &self.user_name,
            CovenantField::TargetName => &self.target_name,
        }
    }

    /// True when both names have been supplied.
    pub fn is_complete(&self) -> bool {
        !self.user_name.is_empty() && !self.target_name.is_empty()
    }

    pub fn clear(&mut self) {
        self.user_name.clear();
        self.target_name.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_incomplete() {
        assert!(!CovenantInput::default().is_complete());
    }

    #[test]
    fn set_and_get_by_field() {
        let mut input = CovenantInput::default();
        input.set(CovenantField::UserName, "Ash".to_string());
        assert_eq!(input.get(CovenantField::UserName), "Ash");
        assert_eq!(input.get(CovenantField::TargetName), "");
    }

    #[test]
    fn complete_requires_both_names() {
        let mut input = CovenantInput::default();
        input.set(CovenantField::UserName, "Ash".to_string());
        assert!(!input.is_complete());
        input.set(CovenantField::TargetName, "Vale".to_string());
        assert!(input.is_complete());
    }

    #[test]
    fn overwriting_with_empty_revokes_completion() {
        let mut input = CovenantInput {
            user_name: "Ash".to_string(),
            target_name: "Vale".to_string(),
        };
        input.set(CovenantField::TargetName, String::new());
        assert!(!input.is_complete());
    }

    #[test]
    fn clear_resets_both() {
        let mut input = CovenantInput {
            user_name: "Ash".to_string(),
            target_name: "Vale".to_string(),
        };
        input.clear();
        assert_eq!(input, CovenantInput::default());
    }

    #[test]
    fn field_keys() {
        assert_eq!(CovenantField::UserName.key(), "user_name");
        assert_eq!(CovenantField::TargetName.key(), "target_name");
    }
}
