//! Gender code type.

use serde::{Deserialize, Serialize};

/// Error returned when a stored gender code is not recognized.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unknown gender code: {0:?}")]
pub struct GenderError(pub char);

/// A customer's gender, stored as a single-letter code.
///
/// Maps to the one-character `gender` column: `M`, `F`, or `U`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unspecified,
}

impl Gender {
    /// The single-letter storage code for this value.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Male => 'M',
            Self::Female => 'F',
            Self::Unspecified => 'U',
        }
    }

    /// Parse a storage code back into a `Gender`.
    ///
    /// # Errors
    ///
    /// Returns [`GenderError`] for any code other than `M`, `F`, or `U`.
    pub const fn from_code(code: char) -> Result<Self, GenderError> {
        match code {
            'M' => Ok(Self::Male),
            'F' => Ok(Self::Female),
            'U' => Ok(Self::Unspecified),
            other => Err(GenderError(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_code() {
        for gender in [Gender::Male, Gender::Female, Gender::Unspecified] {
            assert_eq!(Gender::from_code(gender.code()), Ok(gender));
        }
    }

    #[test]
    fn rejects_unknown_code() {
        assert_eq!(Gender::from_code('x'), Err(GenderError('x')));
    }
}
