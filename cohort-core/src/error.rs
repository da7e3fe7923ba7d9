//! Error types for the cohort core library.
//!
//! Defines the error enum exposed by the public API and a convenient result alias.

use std::fmt;

use thiserror::Error;

use crate::{group::GroupId, person::PersonId};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced by [`crate::Roster`] mutation or lookup operations.
///
/// Every variant describes an expected failure mode (bad identifier, illegal
/// edge); none indicates an internal inconsistency. Operations that return one
/// of these perform no partial mutation.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum RosterError {
    /// The referenced person is not registered in this roster.
    #[error("person {id} is not registered")]
    UnknownPerson {
        /// Identifier that failed to resolve.
        id: PersonId,
    },
    /// A person cannot coach themselves.
    #[error("person {id} cannot coach themselves")]
    SelfLoop {
        /// The person supplied as both coach and pupil.
        id: PersonId,
    },
    /// The coach/pupil edge already exists in this direction.
    #[error("person {coach} already coaches person {pupil}")]
    DuplicateEdge {
        /// Coaching endpoint of the rejected edge.
        coach: PersonId,
        /// Coached endpoint of the rejected edge.
        pupil: PersonId,
    },
    /// The coach/pupil edge to remove does not exist.
    #[error("person {coach} does not coach person {pupil}")]
    MissingEdge {
        /// Coaching endpoint of the absent edge.
        coach: PersonId,
        /// Coached endpoint of the absent edge.
        pupil: PersonId,
    },
    /// The referenced group has no live members in this roster.
    #[error("group {id} does not exist")]
    UnknownGroup {
        /// Identifier that failed to resolve.
        id: GroupId,
    },
}

define_error_codes! {
    /// Stable codes describing [`RosterError`] variants.
    enum RosterErrorCode for RosterError {
        /// The referenced person is not registered in this roster.
        UnknownPerson => UnknownPerson { .. } => "ROSTER_UNKNOWN_PERSON",
        /// A person cannot coach themselves.
        SelfLoop => SelfLoop { .. } => "ROSTER_SELF_LOOP",
        /// The coach/pupil edge already exists in this direction.
        DuplicateEdge => DuplicateEdge { .. } => "ROSTER_DUPLICATE_EDGE",
        /// The coach/pupil edge to remove does not exist.
        MissingEdge => MissingEdge { .. } => "ROSTER_MISSING_EDGE",
        /// The referenced group has no live members in this roster.
        UnknownGroup => UnknownGroup { .. } => "ROSTER_UNKNOWN_GROUP",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, RosterError>;
