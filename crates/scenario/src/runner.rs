//! Sequential scenario runner.
//!
//! Steps execute strictly in order, one awaited call at a time, since every
//! step depends on the side effects of the ones before it. A failing step
//! never stops the run, and cleanup always follows the last step.

use tracing::{debug, info, warn};

use flaircheck_client::{ClientError, FlairApi};
use flaircheck_core::types::{AuthToken, Variant};

use crate::report::{CleanupRecord, RunReport, StepObserver, StepRecord, Tally};
use crate::step::{Action, Observation, Scenario};

/// Targets and credentials a scenario runs with.
#[derive(Debug, Clone)]
pub struct ScenarioContext {
    /// Community actor id.
    pub community: String,
    /// User actor id.
    pub user: String,
    pub token: Option<AuthToken>,
    pub variant: Variant,
}

impl ScenarioContext {
    /// Token to send with `action`: only mutations of the authenticated variant carry one.
    fn token_for(&self, action: &Action) -> Option<&AuthToken> {
        match self.variant {
            Variant::Authenticated if action.is_mutation() => self.token.as_ref(),
            _ => None,
        }
    }
}

/// Interprets a [`Scenario`] against a [`FlairApi`].
pub struct Runner<A> {
    api: A,
    context: ScenarioContext,
}

impl<A: FlairApi> Runner<A> {
    pub fn new(api: A, context: ScenarioContext) -> Self {
        Self { api, context }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn context(&self) -> &ScenarioContext {
        &self.context
    }

    /// Run `scenario` once.
    pub async fn run<O>(&self, scenario: &Scenario, observer: &mut O) -> RunReport
    where
        O: StepObserver + ?Sized,
    {
        self.run_iteration(scenario, 1, observer).await
    }

    /// Run `scenario`, labelling the report with `iteration`.
    ///
    /// The runner holds no state between calls, so the same runner can
    /// execute any number of iterations.
    pub async fn run_iteration<O>(
        &self,
        scenario: &Scenario,
        iteration: u32,
        observer: &mut O,
    ) -> RunReport
    where
        O: StepObserver + ?Sized,
    {
        let variant = self.context.variant;
        info!(
            %variant,
            iteration,
            community = %self.context.community,
            steps = scenario.steps.len(),
            "scenario started"
        );
        observer.on_run_start(variant, iteration);

        let mut tally = Tally::default();
        let mut steps = Vec::with_capacity(scenario.steps.len());

        for (position, step) in scenario.steps.iter().enumerate() {
            let index = position + 1;
            let outcome = match self.perform(&step.action).await {
                Ok(observation) => step.expect.check(&observation, &self.context.community),
                Err(error) => Err(format!("{} failed: {error}", step.action)),
            };

            let record = StepRecord {
                index,
                label: step.label.clone(),
                passed: outcome.is_ok(),
                detail: outcome.err(),
            };
            match &record.detail {
                None => info!(step = index, label = %record.label, passed = true, "step passed"),
                Some(detail) => {
                    warn!(step = index, label = %record.label, passed = false, %detail, "step failed")
                }
            }

            tally.record(record.passed);
            observer.on_step(&record);
            steps.push(record);
        }

        let cleanup = self.cleanup(&scenario.cleanup, observer).await;

        info!(
            %variant,
            iteration,
            passed = tally.passed,
            failed = tally.failed,
            total = tally.total,
            "scenario finished"
        );

        RunReport {
            variant,
            iteration,
            steps,
            cleanup,
            tally,
        }
    }

    async fn cleanup<O>(&self, actions: &[Action], observer: &mut O) -> Vec<CleanupRecord>
    where
        O: StepObserver + ?Sized,
    {
        let mut records = Vec::with_capacity(actions.len());
        for action in actions {
            // A rejected cleanup usually means there was nothing left to remove.
            let (succeeded, detail) = match self.perform(action).await {
                Ok(Observation::Accepted(false)) => {
                    debug!(%action, "cleanup action rejected");
                    (false, Some("service rejected the request".to_owned()))
                }
                Ok(_) => {
                    debug!(%action, "cleanup action succeeded");
                    (true, None)
                }
                Err(error) => {
                    warn!(%action, %error, "cleanup action failed");
                    (false, Some(error.to_string()))
                }
            };

            let record = CleanupRecord {
                action: action.to_string(),
                succeeded,
                detail,
            };
            observer.on_cleanup(&record);
            records.push(record);
        }
        records
    }

    async fn perform(&self, action: &Action) -> Result<Observation, ClientError> {
        let community = self.context.community.as_str();
        let user = self.context.user.as_str();
        let token = self.context.token_for(action);

        let observation = match action {
            Action::Probe => Observation::Reachability(self.api.probe().await),
            Action::ListFlairs { mod_only } => {
                Observation::Flairs(self.api.list_flairs(community, *mod_only).await?)
            }
            Action::UpsertFlair(flair) => {
                Observation::Accepted(self.api.upsert_flair(community, flair, token).await?)
            }
            Action::DeleteFlair { name } => {
                Observation::Accepted(self.api.delete_flair(community, name, token).await?)
            }
            Action::GetUserFlair => {
                Observation::UserFlair(self.api.user_flair(community, user).await?)
            }
            Action::AssignUserFlair { flair_name } => Observation::Accepted(
                self.api
                    .assign_user_flair(community, user, flair_name, token)
                    .await?,
            ),
            Action::UnassignUserFlair => Observation::Accepted(
                self.api.unassign_user_flair(community, user, token).await?,
            ),
            Action::ListCommunities => Observation::Communities(self.api.list_communities().await?),
        };
        debug!(%action, %observation, "action performed");
        Ok(observation)
    }
}
