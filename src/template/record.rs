//! Template records and the draft a user edits before saving one

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::editor::Editor;
use crate::error::ValidationError;
use crate::layout::{AssetSlot, CanvasSize, LayoutDocument, TemplateStyle};
use crate::upload::{uploaded_url, UploadError, UploadResult};

use super::kind::TemplateKind;
use super::store::{SaveError, TemplateStore};

/// Shortest accepted template name, in characters
pub const MIN_NAME_LEN: usize = 3;

/// Body of a create request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTemplate {
    pub name: String,
    pub description: String,
    /// Subtype within the kind, e.g. `midterm`
    #[serde(rename = "type")]
    pub subtype: String,
    pub is_default: bool,
    pub layout_config: LayoutDocument,
    pub created_by_id: String,
}

/// A template as stored and returned by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRecord {
    pub id: String,
    #[serde(default)]
    pub school_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub subtype: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub layout_config: LayoutDocument,
    #[serde(default)]
    pub created_by_id: String,
}

impl TemplateRecord {
    pub(crate) fn from_request(id: String, school_id: &str, request: &NewTemplate) -> Self {
        Self {
            id,
            school_id: school_id.to_string(),
            name: request.name.clone(),
            description: request.description.clone(),
            subtype: request.subtype.clone(),
            is_default: request.is_default,
            layout_config: request.layout_config.clone(),
            created_by_id: request.created_by_id.clone(),
        }
    }
}

/// Everything the create or edit form holds before submit
#[derive(Debug)]
pub struct TemplateDraft {
    pub kind: TemplateKind,
    /// The stored record being edited; `None` for a new template
    pub record_id: Option<String>,
    pub name: String,
    pub description: String,
    pub subtype: String,
    pub is_default: bool,
    pub style: TemplateStyle,
    pub canvas_size: Option<CanvasSize>,
    /// Canvas state, present for kinds edited by drag and drop
    pub editor: Option<Editor>,
}

impl TemplateDraft {
    /// A blank draft with the kind's default subtype and style. Admit cards
    /// start from the seed layout.
    pub fn new(kind: TemplateKind) -> Self {
        Self {
            kind,
            record_id: None,
            name: String::new(),
            description: String::new(),
            subtype: kind.default_subtype().to_string(),
            is_default: false,
            style: kind.default_style(),
            canvas_size: None,
            editor: kind.use_drag_drop().then(Editor::admit_card),
        }
    }

    /// Reopen a stored template for editing. The canvas starts from the
    /// record's elements with a single history entry.
    pub fn from_record(kind: TemplateKind, record: &TemplateRecord) -> Self {
        let layout = &record.layout_config;
        Self {
            kind,
            record_id: Some(record.id.clone()),
            name: record.name.clone(),
            description: record.description.clone(),
            subtype: record.subtype.clone(),
            is_default: record.is_default,
            style: layout.style.clone(),
            canvas_size: layout.canvas_size,
            editor: kind
                .use_drag_drop()
                .then(|| Editor::new(layout.elements().to_vec())),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = subtype.into();
        self
    }

    pub fn with_default(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    /// Write a finished upload into one of the template's asset slots.
    ///
    /// A failed upload, or one without a url, leaves the slot as it was.
    pub fn apply_asset_upload(
        &mut self,
        slot: AssetSlot,
        upload: Result<UploadResult, UploadError>,
    ) -> Result<(), UploadError> {
        let url = uploaded_url(upload)?;
        debug!("{:?} asset set to {}", slot, url);
        self.style.set_asset(slot, url);
        Ok(())
    }

    /// The layout document this draft would persist
    pub fn layout(&self) -> LayoutDocument {
        let mut layout = match &self.editor {
            Some(editor) => editor.document(&self.style),
            None => LayoutDocument::with_style(self.style.clone()),
        };
        layout.canvas_size = self.canvas_size;
        layout
    }

    /// Validate the form and build the create request
    pub fn to_request(&self, created_by: &str) -> Result<NewTemplate, ValidationError> {
        if self.name.chars().count() < MIN_NAME_LEN {
            return Err(ValidationError::NameTooShort { min: MIN_NAME_LEN });
        }
        self.style.validate()?;

        Ok(NewTemplate {
            name: self.name.clone(),
            description: self.description.clone(),
            subtype: self.subtype.clone(),
            is_default: self.is_default,
            layout_config: self.layout(),
            created_by_id: created_by.to_string(),
        })
    }

    /// Persist the draft, creating a record or updating the one it was
    /// opened from. On failure the draft, including its canvas, is left
    /// exactly as it was.
    pub fn submit(
        &self,
        store: &dyn TemplateStore,
        school_id: &str,
        created_by: &str,
    ) -> Result<TemplateRecord, SaveError> {
        let request = self.to_request(created_by)?;
        let record = match &self.record_id {
            Some(id) => {
                let record = store.update(school_id, self.kind, id, &request)?;
                info!("updated {} template {} ({})", self.kind, record.id, record.name);
                record
            }
            None => {
                let record = store.create(school_id, self.kind, &request)?;
                info!("created {} template {} ({})", self.kind, record.id, record.name);
                record
            }
        };
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{ElementType, Orientation};
    use crate::template::MemoryTemplateStore;

    #[test]
    fn test_new_admit_card_draft_has_seed() {
        let draft = TemplateDraft::new(TemplateKind::AdmitCard);
        assert_eq!(draft.subtype, "midterm");
        assert_eq!(draft.layout().elements().len(), 11);
    }

    #[test]
    fn test_certificate_draft_has_no_elements() {
        let draft = TemplateDraft::new(TemplateKind::Certificate);
        let layout = draft.layout();
        assert!(!layout.uses_canvas());
        assert_eq!(layout.style.orientation, Orientation::Landscape);
    }

    #[test]
    fn test_name_too_short() {
        let draft = TemplateDraft::new(TemplateKind::IdCard).with_name("ab");
        assert_eq!(
            draft.to_request("u1"),
            Err(ValidationError::NameTooShort { min: 3 })
        );
        assert!(TemplateDraft::new(TemplateKind::IdCard)
            .with_name("abc")
            .to_request("u1")
            .is_ok());
    }

    #[test]
    fn test_style_out_of_range() {
        let mut draft = TemplateDraft::new(TemplateKind::IdCard).with_name("Staff card");
        draft.style.font_size = 7;
        assert!(matches!(
            draft.to_request("u1"),
            Err(ValidationError::OutOfRange { field: "fontSize", .. })
        ));
    }

    #[test]
    fn test_request_json_shape() {
        let draft = TemplateDraft::new(TemplateKind::Certificate)
            .with_name("Bonafide")
            .with_subtype("bonafide")
            .with_default(true);
        let json = serde_json::to_value(draft.to_request("user-9").unwrap()).unwrap();
        assert_eq!(json["type"], "bonafide");
        assert_eq!(json["isDefault"], true);
        assert_eq!(json["createdById"], "user-9");
        assert_eq!(json["layoutConfig"]["orientation"], "landscape");
        assert!(json["layoutConfig"].get("elements").is_none());
    }

    #[test]
    fn test_submit_carries_edited_canvas() {
        let mut draft = TemplateDraft::new(TemplateKind::AdmitCard).with_name("Midterm 2026");
        if let Some(editor) = draft.editor.as_mut() {
            editor.add_element(ElementType::Text);
        }
        let store = MemoryTemplateStore::new();
        let record = draft.submit(&store, "school-1", "user-1").unwrap();
        assert_eq!(record.school_id, "school-1");
        assert_eq!(record.layout_config.elements().len(), 12);
    }

    #[test]
    fn test_failed_submit_keeps_draft() {
        let mut draft = TemplateDraft::new(TemplateKind::AdmitCard).with_name("no");
        if let Some(editor) = draft.editor.as_mut() {
            editor.add_element(ElementType::Image);
        }
        let store = MemoryTemplateStore::new();
        assert!(matches!(
            draft.submit(&store, "school-1", "user-1"),
            Err(SaveError::Invalid(_))
        ));
        let editor = draft.editor.as_ref().unwrap();
        assert_eq!(editor.elements().len(), 12);
        assert!(editor.can_undo());
        assert!(store.is_empty());
    }

    #[test]
    fn test_asset_upload() {
        let mut draft = TemplateDraft::new(TemplateKind::Certificate);
        let ok = UploadResult {
            url: "https://cdn/seal.png".to_string(),
            ufs_url: "https://ufs/seal.png".to_string(),
        };
        assert_eq!(draft.apply_asset_upload(AssetSlot::Stamp, Ok(ok)), Ok(()));
        assert_eq!(draft.style.asset(AssetSlot::Stamp), Some("https://cdn/seal.png"));

        let empty = UploadResult {
            url: String::new(),
            ufs_url: "https://ufs/other.png".to_string(),
        };
        assert_eq!(
            draft.apply_asset_upload(AssetSlot::Stamp, Ok(empty)),
            Err(UploadError::NoUrl)
        );
        assert_eq!(
            draft.apply_asset_upload(AssetSlot::Logo, Err(UploadError::Io("reset".to_string()))),
            Err(UploadError::Io("reset".to_string()))
        );
        assert_eq!(draft.style.asset(AssetSlot::Stamp), Some("https://cdn/seal.png"));
        assert_eq!(draft.style.asset(AssetSlot::Logo), None);
    }

    #[test]
    fn test_from_record_keeps_canvas_size() {
        let mut layout = LayoutDocument::with_style(TemplateStyle::default());
        layout.canvas_size = Some(CanvasSize {
            width: 800,
            height: 600,
        });
        let record = TemplateRecord {
            id: "tpl-4".to_string(),
            school_id: "s1".to_string(),
            name: "Merit".to_string(),
            description: String::new(),
            subtype: "merit".to_string(),
            is_default: false,
            layout_config: layout.clone(),
            created_by_id: "u1".to_string(),
        };
        let draft = TemplateDraft::from_record(TemplateKind::Certificate, &record);
        assert_eq!(draft.record_id.as_deref(), Some("tpl-4"));
        assert!(draft.editor.is_none());
        assert_eq!(draft.layout(), layout);
    }
}
