//! Onboarding wizard orchestration
//!
//! Walks the user through the onboarding steps in order. Each step is
//! mounted as a [`StepController`]; answers are typed into its draft, which
//! autosaves to the draft store, and submitting hands the typed step to the
//! answer repository.

use std::sync::{Arc, Mutex, PoisonError};

use serde_json::{Map, Value};
use tracing::{info, warn};
use uuid::Uuid;

use crate::activity::{ActivityAction, ActivityEntry, ActivityLogger};
use crate::config::Settings;
use crate::error::{WizardError, WizardResult};
use crate::form::{StepController, StepDraft, StepOptions, SubmitOutcome};
use crate::steps::{
    Ancestry, Education, Family, FieldKind, FieldSpec, GeneralInfo, Money, OnboardingStep,
    StepKind, Work,
};
use crate::storage::{AnswerRepository, DraftStore};

use super::input::{display_value, parse_choice, parse_command, parse_list, parse_yes_no, Command};
use super::prompt::Prompter;

/// How a wizard run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardOutcome {
    /// Every step from the starting one onwards was submitted
    Completed,
    /// The user quit; drafts are kept for the next run
    Quit { at: StepKind },
}

/// Where the user went after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepExit {
    Next,
    Back,
    Quit,
}

impl StepExit {
    fn action(self) -> ActivityAction {
        match self {
            StepExit::Next => ActivityAction::Submitted,
            StepExit::Back => ActivityAction::WentBack,
            StepExit::Quit => ActivityAction::Abandoned,
        }
    }
}

/// One line of user input
enum Input {
    Blank,
    Text(String),
    Command(Command),
}

/// The interactive onboarding wizard
pub struct OnboardingWizard {
    drafts: Arc<dyn DraftStore>,
    answers: Arc<AnswerRepository>,
    activity: Option<ActivityLogger>,
    session_id: Uuid,
}

impl OnboardingWizard {
    /// Create a wizard over a draft store and the answer repository
    pub fn new(drafts: Arc<dyn DraftStore>, answers: Arc<AnswerRepository>) -> Self {
        Self {
            drafts,
            answers,
            activity: None,
            session_id: Uuid::new_v4(),
        }
    }

    /// Record step activity to `logger`
    pub fn with_activity_log(mut self, logger: ActivityLogger) -> Self {
        self.activity = Some(logger);
        self
    }

    /// Identifier of this wizard run in the activity log
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// The first step without submitted answers, or the first step if every
    /// step has been answered
    pub fn first_unanswered(&self) -> WizardResult<StepKind> {
        let done = self.answers.completed_steps()?;
        Ok(StepKind::ALL
            .iter()
            .copied()
            .find(|step| !done.iter().any(|key| key == step.key()))
            .unwrap_or(StepKind::GeneralInfo))
    }

    /// Run the wizard from `start`.
    ///
    /// On completion `settings.onboarding_completed` is set; saving the
    /// settings is left to the caller.
    pub async fn run(
        &self,
        prompter: &mut dyn Prompter,
        settings: &mut Settings,
        start: StepKind,
    ) -> WizardResult<WizardOutcome> {
        prompter.say("")?;
        prompter.say("===========================================")?;
        prompter.say("  Relocation onboarding")?;
        prompter.say("===========================================")?;
        prompter.say("Press enter to keep the answer in [brackets].")?;
        prompter.say("Type '<' to go back a step or ':q' to stop; drafts are kept.")?;

        info!(session = %self.session_id, start = %start, "Wizard started");

        let mut current = start;
        loop {
            let exit = match current {
                StepKind::GeneralInfo => self.run_step::<GeneralInfo>(prompter, settings).await?,
                StepKind::Family => self.run_step::<Family>(prompter, settings).await?,
                StepKind::Education => self.run_step::<Education>(prompter, settings).await?,
                StepKind::Work => self.run_step::<Work>(prompter, settings).await?,
                StepKind::Money => self.run_step::<Money>(prompter, settings).await?,
                StepKind::Ancestry => self.run_step::<Ancestry>(prompter, settings).await?,
            };

            match exit {
                StepExit::Next => match current.next() {
                    Some(next) => current = next,
                    None => break,
                },
                StepExit::Back => match current.previous() {
                    Some(previous) => current = previous,
                    None => prompter.say("This is the first step.")?,
                },
                StepExit::Quit => {
                    prompter.say("")?;
                    prompter.say("Stopped. Your answers so far are kept as drafts.")?;
                    info!(session = %self.session_id, at = %current, "Wizard quit");
                    return Ok(WizardOutcome::Quit { at: current });
                }
            }
        }

        settings.onboarding_completed = true;
        prompter.say("")?;
        prompter.say("All steps complete. Thank you!")?;
        info!(session = %self.session_id, "Wizard completed");
        Ok(WizardOutcome::Completed)
    }

    async fn run_step<S: OnboardingStep>(
        &self,
        prompter: &mut dyn Prompter,
        settings: &Settings,
    ) -> WizardResult<StepExit> {
        let initial = match self.answers.get_step(S::KEY)? {
            Some(stored) => stored.answers.to_data::<S>().unwrap_or_else(|e| {
                warn!(step = S::KEY, error = %e, "Stored answers no longer fit the step");
                S::default()
            }),
            None => S::default(),
        };

        let navigation: Arc<Mutex<Option<StepExit>>> = Arc::new(Mutex::new(None));
        let options = StepOptions::new(answer_saver::<S>(Arc::clone(&self.answers)))
            .label(S::KEY)
            .validator(S::validate)
            .persist(Arc::clone(&self.drafts), settings.draft_key(S::KEY))
            .with_settings(settings)
            .on_next(navigate(&navigation, StepExit::Next))
            .on_previous(navigate(&navigation, StepExit::Back));

        let controller = StepController::new(initial, options)?;

        let kind = S::KEY.parse::<StepKind>()?;
        prompter.say("")?;
        prompter.say(&format!(
            "Step {} of {}: {}",
            kind.index() + 1,
            StepKind::ALL.len(),
            S::TITLE
        ))?;

        let result = self.drive_step::<S>(prompter, &controller, &navigation).await;
        controller.unmount();

        let exit = result?;
        self.record(S::KEY, exit, &controller);
        Ok(exit)
    }

    /// Prompt for fields and submit until the step is left
    async fn drive_step<S: OnboardingStep>(
        &self,
        prompter: &mut dyn Prompter,
        controller: &StepController<S>,
        navigation: &Mutex<Option<StepExit>>,
    ) -> WizardResult<StepExit> {
        let mut pending: Vec<&FieldSpec> = S::fields().iter().collect();

        'step: loop {
            if let Some(exit) = navigation
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take()
            {
                return Ok(exit);
            }

            for field in &pending {
                if !S::is_asked(field.name, &controller.draft()) {
                    continue;
                }
                match ask_field(prompter, controller, field)? {
                    None => {}
                    Some(Command::Back) => {
                        controller.previous();
                        continue 'step;
                    }
                    Some(Command::Quit) => return Ok(StepExit::Quit),
                }
            }

            match controller.submit().await {
                Ok(SubmitOutcome::Completed) => {
                    // on_next has recorded where to go
                }
                Ok(SubmitOutcome::Invalid(errors)) => {
                    prompter.say("Please fix the following:")?;
                    for field in S::fields() {
                        if let Some(message) = controller.visible_error(field.name) {
                            prompter.say(&format!("  - {}: {}", field.label, message))?;
                        }
                    }
                    pending = S::fields()
                        .iter()
                        .filter(|field| errors.get(field.name).is_some())
                        .collect();
                }
                Ok(SubmitOutcome::AlreadySubmitting) => {
                    pending.clear();
                    tokio::task::yield_now().await;
                }
                Err(e) if e.is_save() => {
                    prompter.say(&format!("Could not save your answers: {}", e))?;
                    match read_input(prompter, "Try again? (yes/no) [yes]: ")? {
                        Input::Blank => pending.clear(),
                        Input::Text(text) if parse_yes_no(&text) != Some(false) => pending.clear(),
                        _ => return Ok(StepExit::Quit),
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn record<S: OnboardingStep>(&self, step: &str, exit: StepExit, controller: &StepController<S>) {
        let Some(logger) = &self.activity else {
            return;
        };
        let entry = ActivityEntry::new(self.session_id, step, exit.action(), controller.time_spent());
        if let Err(e) = logger.log(&entry) {
            warn!(step, error = %e, "Failed to write activity log");
        }
    }
}

/// Save operation writing a submitted step to the answer repository
fn answer_saver<S: OnboardingStep>(
    answers: Arc<AnswerRepository>,
) -> impl Fn(S) -> std::future::Ready<WizardResult<()>> + Send + Sync {
    move |data: S| {
        let result = StepDraft::from_data(&data)
            .and_then(|draft| answers.commit_step(S::KEY, draft))
            .map_err(|e| WizardError::save(S::KEY, e.to_string()));
        std::future::ready(result)
    }
}

fn navigate(
    navigation: &Arc<Mutex<Option<StepExit>>>,
    exit: StepExit,
) -> impl Fn() + Send + Sync + 'static {
    let navigation = Arc::clone(navigation);
    move || {
        *navigation.lock().unwrap_or_else(PoisonError::into_inner) = Some(exit);
    }
}

fn read_input(prompter: &mut dyn Prompter, prompt: &str) -> WizardResult<Input> {
    let Some(line) = prompter.ask(prompt)? else {
        return Ok(Input::Command(Command::Quit));
    };
    if let Some(command) = parse_command(&line) {
        return Ok(Input::Command(command));
    }
    let line = line.trim();
    if line.is_empty() {
        Ok(Input::Blank)
    } else {
        Ok(Input::Text(line.to_string()))
    }
}

/// Ask for one field until it gets a usable answer. Returns a navigation
/// command if the user typed one.
fn ask_field<S: OnboardingStep>(
    prompter: &mut dyn Prompter,
    controller: &StepController<S>,
    field: &FieldSpec,
) -> WizardResult<Option<Command>> {
    if let FieldKind::List(sub_fields) = field.kind {
        return ask_list(prompter, controller, field, sub_fields);
    }

    if let FieldKind::Choice(options) = field.kind {
        for (i, option) in options.iter().enumerate() {
            prompter.say(&format!("  {}. {}", i + 1, option))?;
        }
    }

    loop {
        let current = controller
            .draft()
            .get(field.name)
            .map(display_value)
            .unwrap_or_default();
        let prompt = match field.kind {
            FieldKind::YesNo | FieldKind::Flag => format!("{} (yes/no) [{}]: ", field.label, current),
            FieldKind::MultiSelect => {
                format!("{}, comma-separated, '-' for none [{}]: ", field.label, current)
            }
            _ => format!("{} [{}]: ", field.label, current),
        };

        let text = match read_input(prompter, &prompt)? {
            Input::Command(command) => return Ok(Some(command)),
            Input::Blank => return Ok(None),
            Input::Text(text) => text,
        };

        let accepted = match field.kind {
            FieldKind::Text | FieldKind::Number => {
                controller.set_field(field.name, text);
                true
            }
            FieldKind::Choice(options) => match parse_choice(&text, options) {
                Some(option) => {
                    controller.set_field(field.name, option);
                    true
                }
                None => {
                    prompter.say(&format!("Please choose 1-{}.", options.len()))?;
                    false
                }
            },
            FieldKind::YesNo | FieldKind::Flag => match parse_yes_no(&text) {
                Some(answer) if field.kind == FieldKind::Flag => {
                    controller.set_field(field.name, answer);
                    true
                }
                Some(answer) => {
                    controller.set_field(field.name, if answer { "Yes" } else { "No" });
                    true
                }
                None => {
                    prompter.say("Please answer yes or no.")?;
                    false
                }
            },
            FieldKind::MultiSelect => {
                controller.set_array_field(field.name, parse_list(&text));
                true
            }
            FieldKind::List(_) => true,
        };

        if !accepted {
            continue;
        }
        match controller.validate_field(field.name) {
            Some(message) => prompter.say(&format!("  {}", message))?,
            None => return Ok(None),
        }
    }
}

/// Edit a list-of-records field through an add / remove menu
fn ask_list<S: OnboardingStep>(
    prompter: &mut dyn Prompter,
    controller: &StepController<S>,
    field: &FieldSpec,
    sub_fields: &[&str],
) -> WizardResult<Option<Command>> {
    loop {
        let draft = controller.draft();
        let entries = draft.array(field.name).cloned().unwrap_or_default();
        prompter.say(&format!("{}:", field.label))?;
        if entries.is_empty() {
            prompter.say("  (none)")?;
        }
        for (i, entry) in entries.iter().enumerate() {
            let parts: Vec<String> = sub_fields
                .iter()
                .map(|sub| {
                    let value = entry.get(*sub).map(display_value).unwrap_or_default();
                    format!("{}: {}", sub, value)
                })
                .collect();
            prompter.say(&format!("  {}. {}", i + 1, parts.join(", ")))?;
        }

        let text = match read_input(prompter, "(a)dd, (r)emove N, (d)one [d]: ")? {
            Input::Command(command) => return Ok(Some(command)),
            Input::Blank => return Ok(None),
            Input::Text(text) => text,
        };

        let mut words = text.split_whitespace();
        match (words.next(), words.next()) {
            (Some("d" | "done"), None) => return Ok(None),
            (Some("a" | "add"), None) => {
                let mut entry = Map::new();
                for sub in sub_fields {
                    let value = match read_input(prompter, &format!("  {}: ", sub))? {
                        Input::Command(command) => return Ok(Some(command)),
                        Input::Blank => String::new(),
                        Input::Text(text) => text,
                    };
                    entry.insert(sub.to_string(), Value::String(value));
                }
                controller.add_array_item(field.name, Value::Object(entry));
            }
            (Some("r" | "remove"), Some(n)) => {
                let removed = n
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .is_some_and(|index| controller.remove_array_item(field.name, index));
                if !removed {
                    prompter.say(&format!("No entry {}.", n))?;
                }
            }
            _ => prompter.say("Type 'a', 'r N' or 'd'.")?,
        }
    }
}
