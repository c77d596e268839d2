use crate::infra::policy_assistant;
use admission_helpdesk::config::AppConfig;
use admission_helpdesk::error::AppError;
use admission_helpdesk::telemetry::{self, LogTarget};
use admission_helpdesk::workflows::admission::{Application, EligibilityPipeline, PipelineOutcome};
use clap::Args;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ApplyArgs {
    /// Student name used in the admission notification
    #[arg(long, default_value = "")]
    pub(crate) name: String,
    /// Grade percentage (0-100)
    #[arg(long, default_value_t = 0.0)]
    pub(crate) grade: f64,
    /// ID proof submitted
    #[arg(long)]
    pub(crate) id_proof: bool,
    /// Transcript submitted
    #[arg(long)]
    pub(crate) transcript: bool,
    /// Photo submitted
    #[arg(long)]
    pub(crate) photo: bool,
    /// Apply for a student loan
    #[arg(long)]
    pub(crate) loan: bool,
    /// Requested loan amount
    #[arg(long, default_value_t = 0.0)]
    pub(crate) loan_amount: f64,
}

impl ApplyArgs {
    pub(crate) fn into_application(self) -> Application {
        Application {
            student_name: self.name,
            grade: self.grade,
            id_proof_submitted: self.id_proof,
            transcript_submitted: self.transcript,
            photo_submitted: self.photo,
            loan_requested: self.loan,
            loan_amount: self.loan_amount,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct AskArgs {
    /// Question about the admission process
    #[arg(required = true, num_args = 1..)]
    pub(crate) question: Vec<String>,
    /// Override the configured policy document path
    #[arg(long)]
    pub(crate) policy: Option<PathBuf>,
}

impl AskArgs {
    pub(crate) fn question(&self) -> String {
        self.question.join(" ")
    }
}

pub(crate) fn run_apply(args: ApplyArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init_with_target(&config.telemetry, LogTarget::Stderr)?;

    let application = args.into_application();
    application.validate_form_ranges()?;

    let pipeline = EligibilityPipeline::new(config.admission);
    let outcome = pipeline.run(&application);

    let stdout = io::stdout();
    render_outcome(&mut stdout.lock(), &application, &outcome)?;
    Ok(())
}

pub(crate) async fn run_ask(args: AskArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(path) = args.policy.clone() {
        config.policy.document_path = path;
    }
    telemetry::init_with_target(&config.telemetry, LogTarget::Stderr)?;

    let assistant = policy_assistant(&config);
    let answer = assistant.answer(&args.question()).await?;

    println!("{answer}");
    Ok(())
}

pub(crate) fn render_outcome<W: Write>(
    out: &mut W,
    application: &Application,
    outcome: &PipelineOutcome,
) -> io::Result<()> {
    writeln!(out, "Automated Admission Helpdesk")?;
    if !application.student_name.is_empty() {
        writeln!(out, "Applicant: {}", application.student_name)?;
    }

    for record in outcome.records() {
        writeln!(out, "\n{}", record.stage.label())?;
        writeln!(out, "- {}", record.result.message)?;
    }

    Ok(())
}
