//! The flair lifecycle scenario.
//!
//! Starting from a community without flairs and an unflaired user, it walks
//! through creation, update, mod-only visibility, assignment, reassignment
//! and deletion of an assigned flair. Each step relies on the state the
//! previous steps left behind.

use flaircheck_core::types::Flair;

use crate::step::{Action, Expectation, Scenario, Step};

/// Public flair created and then renamed by the scenario.
pub const PUBLIC_FLAIR: &str = "auth";
/// Mod-only flair created by the scenario.
pub const MOD_FLAIR: &str = "based";

/// Text printed before the first step of a run.
pub const WELCOME: &str = "Welcome to the \"flair\" testing script. \
The script assumes the database to be empty before execution.\n\
If the first test fails you might have to start the flair service.\n\
If the 2nd or 3rd tests fail you might have to reset the service's database.\n";

/// Scenario flairs carry an empty icon path.
fn flair(name: &str, display_name: &str, mod_only: bool) -> Flair {
    Flair::new(name, display_name, mod_only).with_path("")
}

fn delete(name: &str) -> Action {
    Action::DeleteFlair {
        name: name.to_owned(),
    }
}

fn assign(name: &str) -> Action {
    Action::AssignUserFlair {
        flair_name: name.to_owned(),
    }
}

/// Build the lifecycle scenario.
pub fn flair_lifecycle() -> Scenario {
    let all = Action::ListFlairs { mod_only: true };
    let public = Action::ListFlairs { mod_only: false };

    let steps = vec![
        Step::new("server is online", Action::Probe, Expectation::Online),
        Step::new(
            "no saved flairs on startup",
            all.clone(),
            Expectation::FlairCount(0),
        ),
        Step::new(
            "user doesn't have a flair on startup",
            Action::GetUserFlair,
            Expectation::Unflaired,
        ),
        Step::new(
            "add user flair",
            Action::UpsertFlair(flair(PUBLIC_FLAIR, "TEMP", false)),
            Expectation::Accepted,
        ),
        Step::new("flair got added", public.clone(), Expectation::FlairCount(1)),
        Step::new(
            "community listed with flairs enabled",
            Action::ListCommunities,
            Expectation::CommunityListed,
        ),
        Step::new(
            "update existing user flair",
            Action::UpsertFlair(flair(PUBLIC_FLAIR, "AuthCenter", false)),
            Expectation::Accepted,
        ),
        Step::new(
            "existing flair got updated",
            public.clone(),
            Expectation::FlairDisplayName {
                name: PUBLIC_FLAIR.to_owned(),
                display_name: "AuthCenter".to_owned(),
            },
        ),
        Step::new(
            "update did not duplicate the flair",
            public.clone(),
            Expectation::FlairCount(1),
        ),
        Step::new(
            "add mod only user flair",
            Action::UpsertFlair(flair(MOD_FLAIR, "Based", true)),
            Expectation::Accepted,
        ),
        Step::new("mod flair got added", all.clone(), Expectation::FlairCount(2)),
        Step::new(
            "mod flair listed for moderators",
            all.clone(),
            Expectation::IncludesFlair(MOD_FLAIR.to_owned()),
        ),
        Step::new(
            "mod flair hidden from public listing",
            public,
            Expectation::ExcludesFlair(MOD_FLAIR.to_owned()),
        ),
        Step::new(
            "assign flair to user",
            assign(PUBLIC_FLAIR),
            Expectation::Accepted,
        ),
        Step::new(
            "flair got assigned",
            Action::GetUserFlair,
            Expectation::UserFlair(PUBLIC_FLAIR.to_owned()),
        ),
        Step::new(
            "remove flair from user",
            Action::UnassignUserFlair,
            Expectation::Accepted,
        ),
        Step::new(
            "user is now unflaired",
            Action::GetUserFlair,
            Expectation::Unflaired,
        ),
        Step::new(
            "reassign flair to user",
            assign(PUBLIC_FLAIR),
            Expectation::Accepted,
        ),
        Step::new("change flair", assign(MOD_FLAIR), Expectation::Accepted),
        Step::new(
            "flair got changed",
            Action::GetUserFlair,
            Expectation::UserFlair(MOD_FLAIR.to_owned()),
        ),
        Step::new(
            "delete flair while it's assigned to user",
            delete(MOD_FLAIR),
            Expectation::Accepted,
        ),
        Step::new("flair got removed", all, Expectation::FlairCount(1)),
        Step::new(
            "user is now unflaired",
            Action::GetUserFlair,
            Expectation::Unflaired,
        ),
    ];

    let cleanup = vec![
        Action::UnassignUserFlair,
        delete(PUBLIC_FLAIR),
        delete(MOD_FLAIR),
    ];

    Scenario { steps, cleanup }
}
