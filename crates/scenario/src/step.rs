//! Step descriptors.
//!
//! An [`Action`] names one flair operation with its arguments, an
//! [`Expectation`] is the predicate the operation's [`Observation`] must
//! satisfy. Community, user and token are not part of a step; the runner
//! supplies them from its context so the same scenario works for every
//! variant.

use std::fmt;

use flaircheck_core::types::{Flair, Reachability};

/// A flair operation to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Liveness probe of the service root.
    Probe,
    /// List community flairs, optionally the moderator listing.
    ListFlairs { mod_only: bool },
    /// Create or update a flair.
    UpsertFlair(Flair),
    /// Delete the named flair.
    DeleteFlair { name: String },
    /// Read the user's current flair.
    GetUserFlair,
    /// Assign the named flair to the user.
    AssignUserFlair { flair_name: String },
    /// Remove the user's flair assignment.
    UnassignUserFlair,
    /// List communities that have flairs enabled.
    ListCommunities,
}

impl Action {
    /// Whether the action changes service state and therefore carries a token.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::UpsertFlair(_)
                | Self::DeleteFlair { .. }
                | Self::AssignUserFlair { .. }
                | Self::UnassignUserFlair
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Probe => write!(f, "probe"),
            Self::ListFlairs { mod_only } => write!(f, "list flairs (mod_only={mod_only})"),
            Self::UpsertFlair(flair) => write!(f, "upsert flair {flair}"),
            Self::DeleteFlair { name } => write!(f, "delete flair {name}"),
            Self::GetUserFlair => write!(f, "get user flair"),
            Self::AssignUserFlair { flair_name } => write!(f, "assign flair {flair_name}"),
            Self::UnassignUserFlair => write!(f, "unassign flair"),
            Self::ListCommunities => write!(f, "list communities"),
        }
    }
}

/// What an action produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    Reachability(Reachability),
    Flairs(Vec<Flair>),
    /// Verdict of a mutation (`true` for a 2xx answer).
    Accepted(bool),
    UserFlair(Option<Flair>),
    Communities(Vec<String>),
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reachability(reachability) => write!(f, "service {reachability}"),
            Self::Flairs(flairs) => {
                let names: Vec<&str> = flairs.iter().map(|flair| flair.name.as_str()).collect();
                write!(f, "{} flair(s) [{}]", flairs.len(), names.join(", "))
            }
            Self::Accepted(true) => write!(f, "accepted"),
            Self::Accepted(false) => write!(f, "rejected"),
            Self::UserFlair(Some(flair)) => write!(f, "user has {flair}"),
            Self::UserFlair(None) => write!(f, "user is unflaired"),
            Self::Communities(ids) => write!(f, "{} communities", ids.len()),
        }
    }
}

/// Predicate over an [`Observation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    /// The probe reported the service online.
    Online,
    /// The mutation was accepted.
    Accepted,
    /// The listing has exactly this many entries.
    FlairCount(usize),
    /// The listing holds `name` with this display name, exactly once.
    FlairDisplayName { name: String, display_name: String },
    /// The listing contains `name`.
    IncludesFlair(String),
    /// The listing does not contain `name`.
    ExcludesFlair(String),
    /// The user's flair is `name`.
    UserFlair(String),
    /// The user has no flair.
    Unflaired,
    /// The discovery listing contains the context community.
    CommunityListed,
}

impl Expectation {
    /// Check `observation`, naming the mismatch on failure.
    ///
    /// `community` is the actor id the scenario runs against.
    pub fn check(&self, observation: &Observation, community: &str) -> Result<(), String> {
        match (self, observation) {
            (Self::Online, Observation::Reachability(reachability)) => {
                ensure(reachability.is_online(), || format!("service {reachability}"))
            }
            (Self::Accepted, Observation::Accepted(accepted)) => {
                ensure(*accepted, || "service rejected the request".to_owned())
            }
            (Self::FlairCount(expected), Observation::Flairs(flairs)) => {
                ensure(flairs.len() == *expected, || {
                    format!("expected {expected} flair(s), got {observation}")
                })
            }
            (Self::FlairDisplayName { name, display_name }, Observation::Flairs(flairs)) => {
                let matching: Vec<&Flair> = flairs.iter().filter(|f| &f.name == name).collect();
                match matching.as_slice() {
                    [flair] if &flair.display_name == display_name => Ok(()),
                    [flair] => Err(format!(
                        "flair {name} shows '{}', expected '{display_name}'",
                        flair.display_name
                    )),
                    [] => Err(format!("flair {name} missing from {observation}")),
                    many => Err(format!("flair {name} listed {} times", many.len())),
                }
            }
            (Self::IncludesFlair(name), Observation::Flairs(flairs)) => {
                ensure(flairs.iter().any(|f| &f.name == name), || {
                    format!("flair {name} missing from {observation}")
                })
            }
            (Self::ExcludesFlair(name), Observation::Flairs(flairs)) => {
                ensure(!flairs.iter().any(|f| &f.name == name), || {
                    format!("flair {name} unexpectedly present in {observation}")
                })
            }
            (Self::UserFlair(name), Observation::UserFlair(flair)) => match flair {
                Some(flair) if &flair.name == name => Ok(()),
                _ => Err(format!("expected user flair {name}, {observation}")),
            },
            (Self::Unflaired, Observation::UserFlair(flair)) => {
                ensure(flair.is_none(), || format!("expected no flair, {observation}"))
            }
            (Self::CommunityListed, Observation::Communities(ids)) => {
                ensure(ids.iter().any(|id| id == community), || {
                    format!("{community} not among {observation}")
                })
            }
            (expectation, observation) => Err(format!(
                "expectation {expectation:?} cannot be checked against {observation}"
            )),
        }
    }
}

fn ensure(condition: bool, detail: impl FnOnce() -> String) -> Result<(), String> {
    if condition { Ok(()) } else { Err(detail()) }
}

/// One labeled assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub label: String,
    pub action: Action,
    pub expect: Expectation,
}

impl Step {
    pub fn new(label: impl Into<String>, action: Action, expect: Expectation) -> Self {
        Self {
            label: label.into(),
            action,
            expect,
        }
    }
}

/// Ordered steps plus the cleanup that restores the initial state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scenario {
    pub steps: Vec<Step>,
    pub cleanup: Vec<Action>,
}
