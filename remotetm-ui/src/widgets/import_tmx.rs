//! Import TMX dialog.

use std::sync::{Arc, Weak};

use remotetm_lib::TmxUploader;
use tmdom::{NodeId, Surface, handler};

use super::{Dialog, DropZone};
use crate::error::{ImportError, WidgetError};
use crate::layering::DialogStack;
use crate::toast::Messenger;

pub const IMPORT_DIALOG_WIDTH: i32 = 400;

/// Message shown when the import button is pressed with nothing staged.
pub const NO_FILE_MESSAGE: &str = "Select file";

/// How an import attempt ended, when it produced no error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// Nothing was staged; no request was sent.
    NoFile,
    /// The server accepted the file; the dialog was closed.
    Imported { file: Option<String> },
    /// The server refused the file; its reason was shown to the user.
    Rejected { reason: String },
    /// The dialog was closed before the response arrived; it was discarded.
    Dismissed,
}

struct ImportTmxInner {
    dialog: Dialog,
    drop_zone: DropZone,
    button: NodeId,
    messenger: Arc<dyn Messenger>,
    uploader: Arc<dyn TmxUploader>,
}

/// Dialog for uploading a TMX file to the server.
///
/// Only the first staged file is sent. Success closes the dialog without a
/// message; a refusal shows the server's reason and keeps the dialog open.
#[derive(Clone)]
pub struct ImportTmx {
    inner: Arc<ImportTmxInner>,
}

impl ImportTmx {
    pub fn new(
        surface: Arc<dyn Surface>,
        stack: DialogStack,
        messenger: Arc<dyn Messenger>,
        uploader: Arc<dyn TmxUploader>,
    ) -> Result<Self, WidgetError> {
        let dialog = Dialog::new(surface.clone(), stack, IMPORT_DIALOG_WIDTH)?;
        dialog.set_title("Import TMX");

        let drop_zone = DropZone::new(surface.clone(), dialog.content_area())?;

        let button = surface.create_element("button");
        surface.set_text(button, "Import TMX");
        dialog.add_button(button)?;

        let inner = Arc::new(ImportTmxInner {
            dialog,
            drop_zone,
            button,
            messenger,
            uploader,
        });
        surface.on_click(button, import_handler(Arc::downgrade(&inner)));

        Ok(Self { inner })
    }

    pub fn open(&self) -> Result<(), WidgetError> {
        self.inner.dialog.open()
    }

    pub fn close(&self) -> Result<(), WidgetError> {
        self.inner.dialog.close()
    }

    pub fn dialog(&self) -> &Dialog {
        &self.inner.dialog
    }

    pub fn drop_zone(&self) -> &DropZone {
        &self.inner.drop_zone
    }

    pub fn import_button(&self) -> NodeId {
        self.inner.button
    }

    /// Upload the first staged file. A `.zip` file is sent as a raw archive.
    ///
    /// Server refusals are reported to the user and returned as
    /// [`ImportOutcome::Rejected`]. Transport failures are returned as
    /// [`ImportError::Upload`] and left to the caller to report.
    pub async fn import_tmx(&self) -> Result<ImportOutcome, ImportError> {
        let inner = &self.inner;
        let files = inner.drop_zone.files();
        let Some(file) = files.first() else {
            inner.messenger.show(NO_FILE_MESSAGE);
            return Ok(ImportOutcome::NoFile);
        };
        if files.len() > 1 {
            log::debug!("Importing {}, ignoring {} more", file.name, files.len() - 1);
        }

        let generation = inner.dialog.generation();
        let result = if file.is_zip() {
            inner.uploader.upload_tmx_archive(file).await
        } else {
            inner.uploader.upload_tmx(file).await
        };

        if !inner.dialog.is_current(generation) {
            match &result {
                Ok(response) => log::debug!("Discarding upload response {response:?}"),
                Err(e) => log::warn!("Discarding upload failure: {e}"),
            }
            return Ok(ImportOutcome::Dismissed);
        }

        let response = result.inspect_err(|e| log::error!("TMX upload failed: {e}"))?;
        log::debug!("Upload response: {response:?}");

        if response.is_ok() {
            if !inner.dialog.close_if_generation(generation)? {
                log::debug!("Dialog changed before the import completed");
                return Ok(ImportOutcome::Dismissed);
            }
            Ok(ImportOutcome::Imported {
                file: response.file,
            })
        } else {
            let reason = response.reason.unwrap_or_default();
            inner.messenger.show(&reason);
            Ok(ImportOutcome::Rejected { reason })
        }
    }
}

fn import_handler(inner: Weak<ImportTmxInner>) -> tmdom::ClickHandler {
    handler(move |_| {
        let Some(inner) = inner.upgrade() else {
            return;
        };
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            log::error!("Import TMX clicked outside of a tokio runtime");
            return;
        };
        let import = ImportTmx { inner };
        runtime.spawn(async move {
            // Nobody awaits this task, so failures go to the user directly.
            if let Err(e) = import.import_tmx().await {
                import.inner.messenger.show(&e.to_string());
            }
        });
    })
}
