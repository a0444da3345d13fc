//! Element canvas editor
//!
//! Owns the live element list of one layout document together with its
//! undo/redo history, the current selection and an in-progress drag.
//! Every mutation is in-memory; nothing is persisted until the template is
//! submitted.
//!
//! Operations that name an element id which does not exist are silent
//! no-ops. Ids can go stale between a user action and its handling, and
//! dropping the action is the established behavior.

pub mod ids;

use log::debug;

use crate::layout::{
    seed, CanvasConfig, Element, ElementKind, ElementPatch, ElementType, History, LayoutDocument,
    Point, TemplateStyle,
};
use crate::upload::{uploaded_url, UploadError, UploadResult};

pub use ids::{Clock, FixedClock, SystemClock};

/// An in-progress drag gesture
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub id: String,
    /// Pointer position relative to the element origin when the drag began
    pub offset: Point,
}

#[derive(Debug)]
pub struct Editor {
    elements: Vec<Element>,
    history: History<Vec<Element>>,
    selected: Option<String>,
    drag: Option<DragState>,
    config: CanvasConfig,
    clock: Box<dyn Clock>,
}

impl Editor {
    /// Start editing `seed` on the default canvas
    pub fn new(seed: Vec<Element>) -> Self {
        Self::with_config(seed, CanvasConfig::default())
    }

    pub fn with_config(seed: Vec<Element>, config: CanvasConfig) -> Self {
        Self {
            history: History::new(seed.clone()),
            elements: seed,
            selected: None,
            drag: None,
            config,
            clock: Box::new(SystemClock),
        }
    }

    /// An editor seeded with the built-in admit-card layout
    pub fn admit_card() -> Self {
        Self::new(seed::default_admit_card())
    }

    /// Replace the clock used for fresh ids
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_element(&self) -> Option<&Element> {
        self.selected.as_deref().and_then(|id| self.element(id))
    }

    /// Select an element, or clear the selection with `None`.
    /// Unknown ids clear the selection.
    pub fn select(&mut self, id: Option<&str>) {
        self.selected = id.filter(|id| self.element(id).is_some()).map(str::to_string);
    }

    pub fn history(&self) -> &History<Vec<Element>> {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    fn snapshot(&mut self) {
        self.history.push(self.elements.clone());
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    /// Append a new element with default attributes, select it and return its id
    pub fn add_element(&mut self, element_type: ElementType) -> String {
        let id = ids::fresh_id(element_type, self.clock.as_ref(), &self.elements);
        let element = Element::with_defaults(id.clone(), element_type, self.config.spawn_position);
        debug!("add {} element {}", element_type.as_str(), id);
        self.elements.push(element);
        self.snapshot();
        self.selected = Some(id.clone());
        id
    }

    /// Merge `patch` into an element without recording history.
    /// Used for intermediate states such as drag positions.
    pub fn update_element(&mut self, id: &str, patch: &ElementPatch) -> bool {
        match self.position(id) {
            Some(index) => {
                patch.apply(&mut self.elements[index]);
                true
            }
            None => {
                debug!("ignoring update for unknown element {}", id);
                false
            }
        }
    }

    /// Merge `patch` into an element and record a history snapshot
    pub fn commit_update(&mut self, id: &str, patch: &ElementPatch) -> bool {
        let applied = self.update_element(id, patch);
        if applied {
            self.snapshot();
        }
        applied
    }

    /// Remove an element, clearing the selection if it was selected
    pub fn delete_element(&mut self, id: &str) -> bool {
        let Some(index) = self.position(id) else {
            debug!("ignoring delete for unknown element {}", id);
            return false;
        };
        self.elements.remove(index);
        self.snapshot();
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        if self.drag.as_ref().is_some_and(|d| d.id == id) {
            self.drag = None;
        }
        debug!("deleted element {}", id);
        true
    }

    /// Copy an element under a fresh id, offset diagonally, and select the copy
    pub fn duplicate_element(&mut self, id: &str) -> Option<String> {
        let Some(source) = self.element(id) else {
            debug!("ignoring duplicate for unknown element {}", id);
            return None;
        };
        let mut copy = source.clone();
        copy.id = ids::fresh_id(copy.element_type(), self.clock.as_ref(), &self.elements);
        copy.x = copy.x.saturating_add(self.config.duplicate_offset);
        copy.y = copy.y.saturating_add(self.config.duplicate_offset);
        let new_id = copy.id.clone();
        debug!("duplicated {} as {}", id, new_id);
        self.elements.push(copy);
        self.snapshot();
        self.selected = Some(new_id.clone());
        Some(new_id)
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.elements = snapshot.clone();
                self.drag = None;
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.elements = snapshot.clone();
                self.drag = None;
                true
            }
            None => false,
        }
    }

    /// Start dragging `id` with the pointer at canvas coordinates `pointer`
    pub fn begin_drag(&mut self, id: &str, pointer: Point) -> bool {
        let Some(origin) = self.element(id).map(Element::origin) else {
            return false;
        };
        self.drag = Some(DragState {
            id: id.to_string(),
            offset: Point::new(pointer.x - origin.x, pointer.y - origin.y),
        });
        self.selected = Some(id.to_string());
        true
    }

    /// Move the dragged element to follow `pointer`, clamped to the canvas.
    /// Returns the new origin, or `None` when no drag is active.
    pub fn pointer_move(&mut self, pointer: Point) -> Option<Point> {
        let drag = self.drag.clone()?;
        let target = self.config.clamp(Point::new(
            pointer.x.saturating_sub(drag.offset.x),
            pointer.y.saturating_sub(drag.offset.y),
        ));
        if self.update_element(&drag.id, &ElementPatch::position(target.x, target.y)) {
            Some(target)
        } else {
            self.drag = None;
            None
        }
    }

    /// Finish the drag, recording one snapshot of the final position
    pub fn end_drag(&mut self) -> bool {
        match self.drag.take() {
            Some(drag) => {
                debug!("drag of {} finished", drag.id);
                self.snapshot();
                true
            }
            None => false,
        }
    }

    /// Write a finished upload into an image element's url.
    ///
    /// A failed upload, or one that came back without a url, leaves the
    /// element unchanged and hands the error back for the caller to report.
    pub fn apply_upload(
        &mut self,
        id: &str,
        upload: Result<UploadResult, UploadError>,
    ) -> Result<bool, UploadError> {
        let url = uploaded_url(upload)?;
        let is_image = self
            .element(id)
            .is_some_and(|e| matches!(e.kind, ElementKind::Image(_)));
        if !is_image {
            return Ok(false);
        }
        Ok(self.commit_update(id, &ElementPatch::url(url)))
    }

    /// Export the live elements as a layout document with `style`
    pub fn document(&self, style: &TemplateStyle) -> LayoutDocument {
        LayoutDocument::with_elements(style.clone(), self.elements.clone())
    }

    /// Consume the editor, yielding the live element list
    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }
}
