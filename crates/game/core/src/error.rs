//! Reasons the simulation refuses an action.
//!
//! A [`Rejection`] is an ordinary outcome, not a bug: the client is expected
//! to withdraw whatever speculative feedback it showed for the action. The
//! [`ErrorSeverity`] classification lets callers tell "try something else"
//! apart from "the client's view of the world is out of date".
use crate::{Cell, CreatureId, PartTarget, Stat};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The action is illegal right now; another action may succeed.
    Recoverable,
    /// The action references something that does not exist.
    Validation,
    /// The caller is acting on stale information.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rejection {
    #[error("{0} does not exist")]
    UnknownCreature(CreatureId),

    #[error("{0} does not exist")]
    UnknownPart(PartTarget),

    #[error("{cell} is outside the board")]
    OutOfBounds { cell: Cell },

    #[error("{cell} is blocked")]
    Blocked { cell: Cell },

    #[error("{creature} needs {required} {stat} but has {available}")]
    Insufficient {
        creature: CreatureId,
        stat: Stat,
        required: i32,
        available: i32,
    },

    #[error("{target} is out of reach")]
    OutOfReach { target: PartTarget },

    #[error("{creature} cannot target an ally")]
    FriendlyTarget { creature: CreatureId },

    #[error("resolution for revision {expected} is stale (now {actual})")]
    Stale { expected: u64, actual: u64 },
}

impl Rejection {
    pub const fn severity(&self) -> ErrorSeverity {
        match self {
            Rejection::UnknownCreature(_) | Rejection::UnknownPart(_) => ErrorSeverity::Validation,
            Rejection::Stale { .. } => ErrorSeverity::Internal,
            _ => ErrorSeverity::Recoverable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classifies_rejections() {
        assert!(Rejection::Blocked { cell: Cell::ORIGIN }.severity().is_recoverable());
        assert_eq!(
            Rejection::UnknownCreature(CreatureId(9)).severity(),
            ErrorSeverity::Validation
        );
        assert_eq!(
            Rejection::Stale {
                expected: 1,
                actual: 2
            }
            .severity()
            .as_str(),
            "internal"
        );
    }

    #[test]
    fn messages_name_the_offender() {
        let rejection = Rejection::Insufficient {
            creature: CreatureId(2),
            stat: Stat::ActionPoints,
            required: 3,
            available: 1,
        };
        assert_eq!(rejection.to_string(), "creature#2 needs 3 AP but has 1");
    }
}
