use crate::core::speaker::{sanitize_name, Gender, Role, Roster};
use crate::core::style::Style;
use crate::core::validate::{
    validate_description, validate_step1, ValidationErrors,
};
use crate::services::gateway::GeneratePayload;
use log::debug;

/// Wizard steps, in order. Forward movement out of a step is gated by
/// that step's validator; backward movement is always allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    Style,
    Speakers,
    Text,
    Review,
}

impl Step {
    fn next(self) -> Option<Step> {
        match self {
            Step::Style => Some(Step::Speakers),
            Step::Speakers => Some(Step::Text),
            Step::Text => Some(Step::Review),
            Step::Review => None,
        }
    }

    fn prev(self) -> Option<Step> {
        match self {
            Step::Style => None,
            Step::Speakers => Some(Step::Style),
            Step::Text => Some(Step::Speakers),
            Step::Review => Some(Step::Text),
        }
    }
}

/// All state for one create session. Transient: dropped when the user
/// navigates away; drafts live on the backend.
#[derive(Debug, Default)]
pub struct WizardSession {
    step_index: usize,
    style: Option<Style>,
    speaker_count: Option<usize>,
    roster: Roster,
    description: String,
    errors: ValidationErrors,
}

const STEPS: [Step; 4] = [Step::Style, Step::Speakers, Step::Text, Step::Review];

impl WizardSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        STEPS[self.step_index]
    }

    pub fn style(&self) -> Option<Style> {
        self.style
    }

    pub fn speaker_count(&self) -> Option<usize> {
        self.speaker_count
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn errors_mut(&mut self) -> &mut ValidationErrors {
        &mut self.errors
    }

    /// Selecting a style resets the speaker count and roster.
    pub fn set_style(&mut self, style: Style) {
        debug!("style selected: {}", style);
        self.style = Some(style);
        self.speaker_count = None;
        self.roster = Roster::default();
        self.errors.clear_field(crate::core::validate::field::SPEAKER_NAMES);
    }

    /// Selecting a count rebuilds the roster, preserving previously
    /// entered speakers by index.
    pub fn set_speaker_count(&mut self, count: usize) {
        self.speaker_count = Some(count);
        if let Some(style) = self.style {
            self.roster.rebuild(style, count);
        }
        self.errors.clear_field(crate::core::validate::field::SPEAKER_NAMES);
    }

    /// Live name input: sanitized on every keystroke, not just on
    /// validation.
    pub fn set_speaker_name(&mut self, index: usize, raw: &str) {
        if let Some(speaker) = self.roster.0.get_mut(index) {
            speaker.name = sanitize_name(raw);
        }
    }

    pub fn set_speaker_gender(&mut self, index: usize, gender: Gender) {
        if let Some(speaker) = self.roster.0.get_mut(index) {
            speaker.gender = gender;
        }
    }

    pub fn set_speaker_role(&mut self, index: usize, role: Role) {
        if let Some(speaker) = self.roster.0.get_mut(index) {
            speaker.role = role;
        }
    }

    pub fn set_speaker_voice(&mut self, index: usize, voice_id: Option<String>) {
        if let Some(speaker) = self.roster.0.get_mut(index) {
            speaker.voice_id = voice_id;
        }
    }

    pub fn set_description(&mut self, text: String) {
        self.description = text;
    }

    fn validate_current(&self) -> ValidationErrors {
        match self.step() {
            // Count and roster do not exist yet on the style step; only
            // the selection itself is required.
            Step::Style => {
                let mut errs = ValidationErrors::new();
                if self.style.is_none() {
                    errs.add(&crate::core::validate::ErrorKind::MissingStyle);
                }
                errs
            }
            Step::Speakers => validate_step1(self.style, self.speaker_count, &self.roster),
            Step::Text => validate_description(&self.description),
            Step::Review => ValidationErrors::new(),
        }
    }

    /// Try to move forward. Returns true on success; on failure the
    /// gate's errors are retained for display.
    pub fn advance(&mut self) -> bool {
        self.errors = self.validate_current();
        if !self.errors.is_empty() {
            debug!("step {:?} blocked: {:?}", self.step(), self.errors);
            return false;
        }
        if let Some(next) = self.step().next() {
            self.step_index = STEPS.iter().position(|s| *s == next).unwrap_or(0);
            true
        } else {
            false
        }
    }

    /// Move back one step. Always allowed, clears nothing.
    pub fn back(&mut self) -> bool {
        match self.step().prev() {
            Some(prev) => {
                self.step_index = STEPS.iter().position(|s| *s == prev).unwrap_or(0);
                true
            }
            None => false,
        }
    }

    /// Final gate before submission: every step's validator must pass.
    pub fn validate_all(&mut self) -> bool {
        let mut errs = validate_step1(self.style, self.speaker_count, &self.roster);
        errs.merge(validate_description(&self.description));
        let ok = errs.is_empty();
        self.errors = errs;
        ok
    }

    /// The submission body, shaped exactly as validated. Only available
    /// once every gate has passed.
    pub fn payload(&mut self) -> Option<GeneratePayload> {
        if !self.validate_all() {
            return None;
        }
        Some(GeneratePayload {
            script_style: self.style?,
            speakers: self.speaker_count?,
            speakers_info: self.roster.clone(),
            description: self.description.clone(),
        })
    }
}
