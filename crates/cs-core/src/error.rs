//! Error types for sheet loading and derivation.

/// Errors that can occur while turning a raw sheet into a character model.
///
/// Every variant aborts the load: no partial model is ever produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SheetError {
    /// A required field is missing or holds an invalid value.
    #[error("malformed sheet: '{field}' {reason}")]
    MalformedSheet {
        /// Path of the offending field (e.g. `hp.hit dice used`).
        field: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A proficiency list or the ability-score map names a skill or ability
    /// that the rule tables do not know.
    #[error("malformed sheet: '{list}' references unknown skill or ability \"{name}\"")]
    UnrecognizedSkillOrAbility {
        /// The list or group the name was found in.
        list: String,
        /// The unrecognized name as written in the sheet.
        name: String,
    },
}

impl SheetError {
    /// Shorthand for a [`SheetError::MalformedSheet`].
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedSheet {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`SheetError::UnrecognizedSkillOrAbility`].
    pub fn unrecognized(list: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnrecognizedSkillOrAbility {
            list: list.into(),
            name: name.into(),
        }
    }

    /// The sheet field the error was reported against.
    pub fn field(&self) -> &str {
        match self {
            Self::MalformedSheet { field, .. } => field,
            Self::UnrecognizedSkillOrAbility { list, .. } => list,
        }
    }
}

/// Convenience result type for sheet operations.
pub type SheetResult<T> = Result<T, SheetError>;
