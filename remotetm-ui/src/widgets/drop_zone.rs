//! File drop target.

use std::sync::{Arc, Mutex};

use remotetm_lib::UploadFile;
use tmdom::{NodeId, Surface, element};

use super::lock;
use crate::error::WidgetError;

/// Text shown while no file is staged.
pub const DROP_HINT: &str = "Drop file here";

/// Area that holds the files a user dropped or picked.
///
/// The host forwards drop and file-picker events through
/// [`DropZone::stage`] or [`DropZone::set_files`]; the zone shows the staged
/// names.
#[derive(Clone)]
pub struct DropZone {
    surface: Arc<dyn Surface>,
    node: NodeId,
    files: Arc<Mutex<Vec<UploadFile>>>,
}

impl DropZone {
    pub fn new(surface: Arc<dyn Surface>, container: NodeId) -> Result<Self, WidgetError> {
        let node = element(surface.as_ref(), "div", &["dropZone"]);
        surface.set_text(node, DROP_HINT);
        surface.append_child(container, node)?;
        Ok(Self {
            surface,
            node,
            files: Arc::new(Mutex::new(Vec::new())),
        })
    }

    pub fn stage(&self, file: UploadFile) {
        let mut files = lock(&self.files);
        files.push(file);
        self.render(&files);
    }

    /// Replace the staged files.
    pub fn set_files(&self, new_files: Vec<UploadFile>) {
        let mut files = lock(&self.files);
        *files = new_files;
        self.render(&files);
    }

    /// Staged files in the order they were added.
    pub fn files(&self) -> Vec<UploadFile> {
        lock(&self.files).clone()
    }

    pub fn clear(&self) {
        self.set_files(Vec::new());
    }

    pub fn len(&self) -> usize {
        lock(&self.files).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    fn render(&self, files: &[UploadFile]) {
        if files.is_empty() {
            self.surface.set_text(self.node, DROP_HINT);
        } else {
            let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
            self.surface.set_text(self.node, &names.join(", "));
        }
    }
}
