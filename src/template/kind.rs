//! Template kinds and their fixed per-kind configuration

use serde::{Deserialize, Serialize};

use crate::layout::{CanvasSize, Orientation, TemplateStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Certificate,
    IdCard,
    AdmitCard,
}

impl TemplateKind {
    pub fn all() -> [TemplateKind; 3] {
        [
            TemplateKind::Certificate,
            TemplateKind::IdCard,
            TemplateKind::AdmitCard,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Certificate => "certificate",
            TemplateKind::IdCard => "idcard",
            TemplateKind::AdmitCard => "admitcard",
        }
    }

    /// Path segment under `/api/documents/{schoolId}/`
    pub fn api_endpoint(&self) -> &'static str {
        match self {
            TemplateKind::Certificate => "certificate-templates",
            TemplateKind::IdCard => "idcard-templates",
            TemplateKind::AdmitCard => "admitcard-templates",
        }
    }

    /// Whether templates of this kind carry a free-form element list
    pub fn use_drag_drop(&self) -> bool {
        matches!(self, TemplateKind::AdmitCard)
    }

    /// Printed page size in CSS pixels
    pub fn page_size(&self) -> CanvasSize {
        let (width, height) = match self {
            TemplateKind::Certificate => (1123, 794),
            TemplateKind::IdCard => (638, 1011),
            TemplateKind::AdmitCard => (794, 1123),
        };
        CanvasSize { width, height }
    }

    pub fn subtypes(&self) -> &'static [&'static str] {
        match self {
            TemplateKind::Certificate => &[
                "character",
                "bonafide",
                "transfer",
                "completion",
                "participation",
                "achievement",
            ],
            TemplateKind::IdCard => &["student", "teacher", "staff", "visitor"],
            TemplateKind::AdmitCard => &["midterm", "final", "quarterly", "annual", "entrance"],
        }
    }

    pub fn default_subtype(&self) -> &'static str {
        self.subtypes()[0]
    }

    /// Starting style for a new template of this kind
    pub fn default_style(&self) -> TemplateStyle {
        let base = TemplateStyle::default();
        match self {
            TemplateKind::Certificate => TemplateStyle {
                orientation: Orientation::Landscape,
                ..base
            },
            TemplateKind::IdCard => TemplateStyle {
                include_photo: true,
                ..base
            },
            TemplateKind::AdmitCard => TemplateStyle {
                orientation: Orientation::Landscape,
                include_qr_code: true,
                include_photo: true,
                ..base
            },
        }
    }
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TemplateKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "certificate" => Ok(TemplateKind::Certificate),
            "idcard" | "id-card" => Ok(TemplateKind::IdCard),
            "admitcard" | "admit-card" => Ok(TemplateKind::AdmitCard),
            other => Err(format!("unknown template kind: {}", other)),
        }
    }
}
