//! `flaircheck run` command handler
//!
//! Runs the flair lifecycle scenario once per selected variant and
//! repetition. In text mode each step is streamed as it completes and a
//! summary follows; in JSON mode a single document carries every run.

use std::io::Write;

use serde::Serialize;
use tracing::info;

use flaircheck_client::{FlairApi, HttpFlairClient, HttpTransport};
use flaircheck_core::config::FlairCheckConfig;
use flaircheck_core::types::Variant;
use flaircheck_scenario::{
    NoopObserver, RunReport, Runner, ScenarioContext, StepObserver, StepRecord, Tally, WELCOME,
    flair_lifecycle,
};

use crate::cli::RunArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `run` command.
///
/// # Errors
///
/// Returns `CliError::AssertionsFailed` when any step failed, and
/// `CliError::Config` when the selected variants cannot run with the
/// configured credentials.
pub async fn execute(
    args: RunArgs,
    config: &FlairCheckConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let plan = RunPlan::resolve(&args, config)?;
    let client = HttpFlairClient::new(HttpTransport::new()?)
        .with_instance_domain(config.scenario.instance_domain.clone());
    info!(
        endpoint = %client.transport().base_url(),
        runs = plan.total_runs(),
        "running flair lifecycle"
    );

    let report = if writer.is_text() {
        let mut console = ConsoleObserver::new(std::io::stdout(), plan.total_runs() > 1);
        console.banner();
        let report = run_suite(&client, &plan, &mut console).await;
        console.finish()?;
        report
    } else {
        run_suite(&client, &plan, &mut NoopObserver).await
    };

    writer.render(&report)?;

    if report.tally.all_passed() {
        Ok(())
    } else {
        Err(CliError::AssertionsFailed {
            failed: report.tally.failed,
            total: report.tally.total,
        })
    }
}

/// Variants and repetitions to execute.
#[derive(Debug)]
struct RunPlan {
    contexts: Vec<ScenarioContext>,
    repeat: u32,
}

impl RunPlan {
    fn resolve(args: &RunArgs, config: &FlairCheckConfig) -> Result<Self, CliError> {
        let variants = match args.variant {
            Some(variant) => vec![variant],
            None => config.scenario.variants.clone(),
        };
        let token = config.auth.token();
        if token.is_none() && variants.contains(&Variant::Authenticated) {
            return Err(CliError::Config(
                "the authenticated variant requires auth.token".to_owned(),
            ));
        }

        let contexts = variants
            .into_iter()
            .map(|variant| ScenarioContext {
                community: config.scenario.community_actor_id.clone(),
                user: config.scenario.user_actor_id.clone(),
                token: token.clone(),
                variant,
            })
            .collect();

        Ok(Self {
            contexts,
            repeat: args.repeat.unwrap_or(config.scenario.repeat).max(1),
        })
    }

    fn total_runs(&self) -> usize {
        self.contexts.len() * self.repeat as usize
    }
}

/// Run every planned iteration, one after another.
async fn run_suite<A, O>(api: &A, plan: &RunPlan, observer: &mut O) -> SuiteReport
where
    A: FlairApi + Clone,
    O: StepObserver,
{
    let scenario = flair_lifecycle();
    let mut runs = Vec::with_capacity(plan.total_runs());
    let mut tally = Tally::default();

    for context in &plan.contexts {
        let runner = Runner::new(api.clone(), context.clone());
        for iteration in 1..=plan.repeat {
            let report = runner.run_iteration(&scenario, iteration, &mut *observer).await;
            tally.merge(&report.tally);
            runs.push(report);
        }
    }

    SuiteReport { runs, tally }
}

/// Every run of one invocation plus the combined tally.
#[derive(Serialize)]
pub struct SuiteReport {
    pub runs: Vec<RunReport>,
    pub tally: Tally,
}

impl Render for SuiteReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        let Tally {
            total,
            passed,
            failed,
        } = self.tally;
        writeln!(w)?;
        writeln!(w, "Tests over:")?;
        writeln!(w, "\t✅ - Passed {passed}/{total} ")?;
        writeln!(w, "\t❌ - Failed {failed}/{total}")
    }
}

/// Streams each step to a writer as soon as it is evaluated.
struct ConsoleObserver<W: Write> {
    out: W,
    show_run_headers: bool,
    error: Option<std::io::Error>,
}

impl<W: Write> ConsoleObserver<W> {
    fn new(out: W, show_run_headers: bool) -> Self {
        Self {
            out,
            show_run_headers,
            error: None,
        }
    }

    fn banner(&mut self) {
        self.write(|out| writeln!(out, "{WELCOME}"));
    }

    /// Surface the first write error, if any.
    fn finish(mut self) -> std::io::Result<()> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }
        self.out.flush()
    }

    fn write(&mut self, f: impl FnOnce(&mut W) -> std::io::Result<()>) {
        if self.error.is_some() {
            return;
        }
        if let Err(error) = f(&mut self.out) {
            self.error = Some(error);
        }
    }
}

impl<W: Write> StepObserver for ConsoleObserver<W> {
    fn on_run_start(&mut self, variant: Variant, iteration: u32) {
        use colored::Colorize;

        if self.show_run_headers {
            let header = format!("== {variant} run {iteration} ==");
            self.write(|out| writeln!(out, "\n{}", header.bold()));
        }
    }

    fn on_step(&mut self, record: &StepRecord) {
        use colored::Colorize;

        self.write(|out| {
            writeln!(out, "Test: {}", record.label)?;
            if record.passed {
                writeln!(out, "┕━━━ ✅ - Passed")
            } else {
                writeln!(out, "┕━━━ ❌ - Failed")?;
                match &record.detail {
                    Some(detail) => writeln!(out, "     {}", detail.dimmed()),
                    None => Ok(()),
                }
            }
        });
    }
}
