//! School onboarding wizard

use std::collections::BTreeSet;

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingStep {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub is_complete: bool,
}

/// What the server reports about a school's onboarding
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnboardingStatus {
    pub is_admin: bool,
    pub onboarding_complete: bool,
    pub steps: Vec<OnboardingStep>,
    /// The welcome screen was already shown for this school
    pub intro_seen: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardState {
    #[default]
    Hidden,
    Loading,
    Welcome,
    Steps,
    /// Hidden for the rest of the session
    Dismissed,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnboardingEvent {
    Load,
    Loaded(OnboardingStatus),
    Start,
    Dismiss,
    MarkStep(String),
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    pub percentage: u32,
    pub all_complete: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Onboarding {
    state: WizardState,
    status: Option<OnboardingStatus>,
    manual: BTreeSet<String>,
}

impl Onboarding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.state, WizardState::Welcome | WizardState::Steps)
    }

    /// Server flag, or completed during this session
    pub fn is_complete(&self) -> bool {
        self.state == WizardState::Completed
            || self.status.as_ref().is_some_and(|s| s.onboarding_complete)
    }

    /// Steps with manual marks merged in
    pub fn steps(&self) -> Vec<OnboardingStep> {
        self.status
            .iter()
            .flat_map(|s| s.steps.iter())
            .map(|step| OnboardingStep {
                is_complete: step.is_complete || self.manual.contains(&step.id),
                ..step.clone()
            })
            .collect()
    }

    pub fn progress(&self) -> Progress {
        let steps = self.steps();
        let total = steps.len();
        let completed = steps.iter().filter(|s| s.is_complete).count();
        let percentage = if total == 0 {
            100
        } else {
            ((completed as f64 / total as f64) * 100.0).round() as u32
        };
        Progress {
            completed,
            total,
            percentage,
            all_complete: completed == total,
        }
    }

    /// Apply an event; returns whether it had any effect
    pub fn handle(&mut self, event: OnboardingEvent) -> bool {
        use WizardState::*;

        let before = self.state;
        match event {
            OnboardingEvent::Load => {
                if before == Hidden {
                    self.state = Loading;
                }
            }
            OnboardingEvent::Loaded(status) => {
                if !matches!(before, Dismissed | Completed) {
                    self.state = if !status.is_admin || status.onboarding_complete {
                        Hidden
                    } else if status.intro_seen {
                        Steps
                    } else {
                        Welcome
                    };
                }
                self.status = Some(status);
                return true;
            }
            OnboardingEvent::Start => {
                if before == Welcome {
                    self.state = Steps;
                }
            }
            OnboardingEvent::Dismiss => {
                if self.is_visible() {
                    self.state = Dismissed;
                }
            }
            OnboardingEvent::MarkStep(id) => {
                let known = self.status.as_ref().is_some_and(|s| s.steps.iter().any(|st| st.id == id));
                return known && self.manual.insert(id);
            }
            OnboardingEvent::Complete => {
                if before == Steps && self.progress().all_complete {
                    self.state = Completed;
                }
            }
        }
        self.state != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(id: &str, done: bool) -> OnboardingStep {
        OnboardingStep {
            id: id.to_string(),
            title: id.to_uppercase(),
            is_complete: done,
        }
    }

    fn admin_status(intro_seen: bool) -> OnboardingStatus {
        OnboardingStatus {
            is_admin: true,
            onboarding_complete: false,
            steps: vec![step("classes", true), step("students", false), step("fees", false)],
            intro_seen,
        }
    }

    #[test]
    fn test_welcome_then_steps() {
        let mut ob = Onboarding::new();
        assert!(ob.handle(OnboardingEvent::Load));
        assert_eq!(ob.state(), WizardState::Loading);
        ob.handle(OnboardingEvent::Loaded(admin_status(false)));
        assert_eq!(ob.state(), WizardState::Welcome);
        assert!(ob.handle(OnboardingEvent::Start));
        assert_eq!(ob.state(), WizardState::Steps);
    }

    #[test]
    fn test_intro_seen_skips_welcome() {
        let mut ob = Onboarding::new();
        ob.handle(OnboardingEvent::Loaded(admin_status(true)));
        assert_eq!(ob.state(), WizardState::Steps);
    }

    #[test]
    fn test_hidden_for_non_admins_and_finished_schools() {
        let mut ob = Onboarding::new();
        ob.handle(OnboardingEvent::Loaded(OnboardingStatus {
            is_admin: false,
            ..admin_status(false)
        }));
        assert_eq!(ob.state(), WizardState::Hidden);

        let mut ob = Onboarding::new();
        ob.handle(OnboardingEvent::Loaded(OnboardingStatus {
            onboarding_complete: true,
            ..admin_status(false)
        }));
        assert_eq!(ob.state(), WizardState::Hidden);
        assert!(ob.is_complete());
    }

    #[test]
    fn test_manual_marks_count_towards_progress() {
        let mut ob = Onboarding::new();
        ob.handle(OnboardingEvent::Loaded(admin_status(true)));
        assert_eq!(ob.progress().completed, 1);
        assert_eq!(ob.progress().percentage, 33);

        assert!(ob.handle(OnboardingEvent::MarkStep("students".to_string())));
        assert!(!ob.handle(OnboardingEvent::MarkStep("students".to_string())));
        assert!(!ob.handle(OnboardingEvent::MarkStep("unknown".to_string())));
        assert_eq!(ob.progress().completed, 2);
        assert_eq!(ob.progress().percentage, 67);
    }

    #[test]
    fn test_complete_requires_all_steps() {
        let mut ob = Onboarding::new();
        ob.handle(OnboardingEvent::Loaded(admin_status(true)));
        assert!(!ob.handle(OnboardingEvent::Complete));

        ob.handle(OnboardingEvent::MarkStep("students".to_string()));
        ob.handle(OnboardingEvent::MarkStep("fees".to_string()));
        assert!(ob.progress().all_complete);
        assert!(ob.handle(OnboardingEvent::Complete));
        assert_eq!(ob.state(), WizardState::Completed);
        assert!(ob.is_complete());

        // Terminal
        ob.handle(OnboardingEvent::Loaded(admin_status(false)));
        assert_eq!(ob.state(), WizardState::Completed);
    }

    #[test]
    fn test_dismiss_sticks_for_session() {
        let mut ob = Onboarding::new();
        ob.handle(OnboardingEvent::Loaded(admin_status(false)));
        assert!(ob.handle(OnboardingEvent::Dismiss));
        assert!(!ob.is_visible());
        ob.handle(OnboardingEvent::Loaded(admin_status(false)));
        assert_eq!(ob.state(), WizardState::Dismissed);
    }

    #[test]
    fn test_no_steps_is_fully_complete() {
        let ob = Onboarding::new();
        let p = ob.progress();
        assert_eq!((p.completed, p.total, p.percentage), (0, 0, 100));
        assert!(p.all_complete);
    }
}
