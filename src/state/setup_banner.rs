//! Academic-year setup banner
//!
//! Derived entirely from the school's academic years and the current time.
//! The *active* year is the one an admin selected; the *running* year is the
//! one whose date range contains today. They differ while an admin prepares
//! next year ahead of time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Height of the banner strip when shown
pub const BANNER_HEIGHT: u32 = 40;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearCounts {
    #[serde(default)]
    pub students: u32,
    #[serde(default)]
    pub classes: u32,
    #[serde(default, rename = "FeeStructures")]
    pub fee_structures: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicYear {
    pub id: String,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub setup_complete: bool,
    #[serde(default)]
    pub students_promoted: bool,
    #[serde(default)]
    pub fees_configured: bool,
    #[serde(default)]
    pub classes_configured: bool,
    #[serde(default)]
    pub timetable_configured: bool,
    #[serde(default)]
    pub subjects_configured: bool,
    #[serde(default, rename = "_count")]
    pub count: YearCounts,
}

impl AcademicYear {
    pub fn contains(&self, now: DateTime<Utc>) -> bool {
        self.start_date <= now && now <= self.end_date
    }

    pub fn status(&self, now: DateTime<Utc>) -> YearStatus {
        if now < self.start_date {
            YearStatus::PreStart
        } else if now > self.end_date {
            YearStatus::Ended
        } else {
            YearStatus::Running
        }
    }

    fn has_data(&self) -> bool {
        self.count.students > 0 || self.count.classes > 0 || self.count.fee_structures > 0
    }

    /// Setup not marked complete and nothing entered yet
    pub fn needs_setup(&self) -> bool {
        !self.setup_complete && !self.has_data()
    }

    /// Unfinished setup steps, in display order
    pub fn incomplete_steps(&self) -> Vec<SetupStep> {
        if self.setup_complete {
            return vec![];
        }
        [
            (SetupStep::Students, self.students_promoted),
            (SetupStep::Fees, self.fees_configured),
            (SetupStep::Classes, self.classes_configured),
            (SetupStep::Timetable, self.timetable_configured),
            (SetupStep::Subjects, self.subjects_configured),
        ]
        .into_iter()
        .filter(|(_, done)| !done)
        .map(|(step, _)| step)
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum YearStatus {
    PreStart,
    Running,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SetupStep {
    Students,
    Fees,
    Classes,
    Timetable,
    Subjects,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BannerType {
    /// Active year is in the future while another year is running
    ConfigMode,
    PreStart,
    SetupNeeded,
}

/// Conditions outside the year data that gate the banner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BannerGate {
    pub mounted: bool,
    pub is_admin: bool,
    pub loading: bool,
    pub onboarding_complete: bool,
    /// The onboarding wizard is on screen and takes precedence
    pub wizard_visible: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetupBanner {
    pub active_year: Option<AcademicYear>,
    pub running_year: Option<AcademicYear>,
    pub year_status: Option<YearStatus>,
    pub banner: Option<BannerType>,
    pub incomplete_steps: Vec<SetupStep>,
}

impl SetupBanner {
    pub fn compute(years: &[AcademicYear], now: DateTime<Utc>, gate: BannerGate) -> Self {
        let active = years.iter().find(|y| y.is_active).cloned();
        let running = years.iter().find(|y| y.contains(now)).cloned();
        let year_status = active.as_ref().map(|y| y.status(now));
        let incomplete_steps = active
            .as_ref()
            .map(AcademicYear::incomplete_steps)
            .unwrap_or_default();

        let mut banner = None;
        if let Some(active_year) = &active {
            let eligible =
                gate.mounted && gate.is_admin && !gate.loading && gate.onboarding_complete;
            let years_differ = running.as_ref().is_some_and(|r| r.id != active_year.id);
            let only_year = years.len() == 1;
            let pre_start = year_status == Some(YearStatus::PreStart);

            if eligible {
                if years_differ && pre_start {
                    banner = Some(BannerType::ConfigMode);
                } else if pre_start && !only_year {
                    banner = Some(BannerType::PreStart);
                } else if active_year.needs_setup() && !only_year {
                    banner = Some(BannerType::SetupNeeded);
                }
            }
        }
        if gate.wizard_visible {
            banner = None;
        }

        Self {
            active_year: active,
            running_year: running,
            year_status,
            banner,
            incomplete_steps,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.banner.is_some()
    }

    /// Layout offset the rest of the page reserves for the banner
    pub fn height(&self) -> u32 {
        if self.is_visible() {
            BANNER_HEIGHT
        } else {
            0
        }
    }
}
