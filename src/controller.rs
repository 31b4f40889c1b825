//! View state and the logic that updates it.
//!
//! The UI never touches [`ViewState`] directly: it turns widget events into
//! [`Action`]s, hands them to [`Controller::dispatch`] and draws whatever
//! state comes out. The delayed roll runs from [`Controller::tick`].

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use log::debug;
use rand::Rng;
use zeroize::Zeroize;

use crate::charset::{GenerationOptions, build_charset};
use crate::complexity::{ComplexityScorer, CrackTimeEstimate, Indicator};
use crate::fingerprint::{FingerprintPanel, FingerprintRequest, Fingerprints};
use crate::password::generate_password_with;
use crate::scheduler::RollScheduler;
use crate::settings::Settings;
use crate::speller::spell_password;

pub const COPY_NOTICE: &str = "After clicking \"OK\", all you have to do is press Ctrl + C!";

/// What the password field should do with keyboard focus on the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusRequest {
    #[default]
    None,
    Focus,
    Blur,
    /// Focus and select the whole value
    SelectAll,
}

/// Everything the UI displays.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub password: String,
    pub masked: bool,
    pub read_only: bool,

    /// Checkbox state plus the length field
    pub options: GenerationOptions,
    pub spell_password: bool,
    pub fingerprint_request: FingerprintRequest,

    /// Spelled password; `None` hides the speller panel
    pub spelling: Option<String>,
    pub fingerprints: FingerprintPanel,
    pub indicator: Indicator,
    pub crack_time: String,

    pub focus: FocusRequest,
    /// Blocking messages, oldest first
    pub notifications: VecDeque<String>,
}

impl ViewState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            password: String::new(),
            masked: true,
            read_only: false,
            options: settings.options,
            spell_password: settings.spell_password,
            fingerprint_request: FingerprintRequest {
                qr: settings.qr_hash,
                visual: settings.visual_hash,
            },
            spelling: None,
            fingerprints: FingerprintPanel::default(),
            indicator: Indicator::default(),
            crack_time: String::new(),
            focus: FocusRequest::Focus,
            notifications: VecDeque::new(),
        }
    }

    fn replace_password(&mut self, password: String) {
        self.password.zeroize();
        self.password = password;
    }

    /// Message the UI should block on, if any
    pub fn notification(&self) -> Option<&str> {
        self.notifications.front().map(String::as_str)
    }
}

impl Drop for ViewState {
    fn drop(&mut self) {
        self.password.zeroize();
        if let Some(ref mut spelling) = self.spelling {
            spelling.zeroize();
        }
    }
}

/// User intents coming from the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The password field now holds this value
    Edit(String),
    Generate,
    Clear,
    ToggleMask,
    ToggleReadOnly,
    CopyAssist,
    SetOptions(GenerationOptions),
    SetSpelling(bool),
    SetFingerprints(FingerprintRequest),
    DismissNotification,
}

/// What has to happen after a state update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    ScheduleRoll,
}

/// Apply `action` to `state`.
///
/// Only generation consumes randomness; everything else is a plain state
/// flip. Derived views are left alone until the roll.
pub fn reduce<R: Rng>(state: &mut ViewState, action: Action, rng: &mut R) -> Effect {
    match action {
        Action::Edit(value) => {
            state.replace_password(value);
            Effect::ScheduleRoll
        }
        Action::Generate => {
            let charset = build_charset(&state.options);
            let password = generate_password_with(&charset, state.options.length(), rng);
            state.replace_password(password);
            state.focus = FocusRequest::Blur;
            Effect::ScheduleRoll
        }
        Action::Clear => {
            state.replace_password(String::new());
            state.focus = FocusRequest::Focus;
            Effect::ScheduleRoll
        }
        Action::ToggleMask => {
            state.masked = !state.masked;
            Effect::None
        }
        Action::ToggleReadOnly => {
            state.read_only = !state.read_only;
            Effect::None
        }
        Action::CopyAssist => {
            state.notifications.push_back(COPY_NOTICE.to_owned());
            state.masked = false;
            state.focus = FocusRequest::SelectAll;
            Effect::None
        }
        Action::SetOptions(options) => {
            state.options = options;
            Effect::None
        }
        Action::SetSpelling(enabled) => {
            state.spell_password = enabled;
            Effect::ScheduleRoll
        }
        Action::SetFingerprints(request) => {
            state.fingerprint_request = request;
            Effect::ScheduleRoll
        }
        Action::DismissNotification => {
            state.notifications.pop_front();
            Effect::None
        }
    }
}

/// Owns the view state and the collaborators a roll needs.
pub struct Controller {
    state: ViewState,
    scheduler: RollScheduler,
    scorer: Box<dyn ComplexityScorer>,
    fingerprints: Fingerprints,
    default_length: usize,
    nodes: u32,
    guesses_per_node: f64,
}

impl Controller {
    pub fn new(settings: &Settings, canvas_supported: bool) -> Self {
        let scorer = settings
            .scorer
            .build(settings.minimum_chars, settings.strength_scale_factor);
        let fingerprints = Fingerprints::new(settings.fingerprint_size, canvas_supported);
        Self::with_parts(settings, scorer, fingerprints)
    }

    pub fn with_parts(
        settings: &Settings,
        scorer: Box<dyn ComplexityScorer>,
        fingerprints: Fingerprints,
    ) -> Self {
        let mut controller = Self {
            state: ViewState::new(settings),
            scheduler: RollScheduler::new(settings.roll_delay()),
            scorer,
            fingerprints,
            default_length: settings.default_length,
            nodes: settings.nodes,
            guesses_per_node: settings.guesses_per_node,
        };
        controller.measure();
        controller
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action, now: Instant) {
        self.dispatch_with_rng(action, now, &mut rand::rng());
    }

    pub fn dispatch_with_rng<R: Rng>(&mut self, action: Action, now: Instant, rng: &mut R) {
        if reduce(&mut self.state, action, rng) == Effect::ScheduleRoll {
            self.scheduler.schedule(now);
        }
    }

    /// Run the pending roll if its delay has elapsed. Returns true if it ran.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.scheduler.take_due(now) {
            self.roll();
            return true;
        }
        false
    }

    /// Time until the pending roll, for repaint scheduling
    pub fn next_roll_in(&self, now: Instant) -> Option<Duration> {
        self.scheduler.remaining(now)
    }

    /// Hand the focus request to the UI, once.
    pub fn take_focus(&mut self) -> FocusRequest {
        std::mem::take(&mut self.state.focus)
    }

    /// Refresh every view derived from the password.
    pub fn roll(&mut self) {
        let state = &mut self.state;
        let length = state.password.chars().count();
        debug!("roll for a {length} char password");

        state.options.length = if length > 0 {
            length as i64
        } else {
            self.default_length as i64
        };

        let failures = self.fingerprints.refresh(
            &mut state.fingerprints,
            &state.password,
            state.fingerprint_request,
        );
        state
            .notifications
            .extend(failures.into_iter().map(|failure| failure.to_string()));

        if let Some(ref mut old) = state.spelling {
            old.zeroize();
        }
        state.spelling = if state.spell_password && length > 0 {
            Some(spell_password(&state.password))
        } else {
            None
        };

        self.measure();
    }

    fn measure(&mut self) {
        let password = &self.state.password;
        self.state.indicator = Indicator::from_complexity(self.scorer.score(password));
        self.state.crack_time =
            CrackTimeEstimate::new(password, self.nodes, self.guesses_per_node).describe();
    }
}
