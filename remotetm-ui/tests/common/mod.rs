//! Shared fakes for widget tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use simplelog::{Config, LevelFilter, TestLogger};
use tokio::sync::Notify;

use remotetm_lib::error::{ApiError, Error};
use remotetm_lib::{TmxUploader, UploadFile, UploadResponse};
use remotetm_ui::Messenger;
use tmdom::{Document, Viewport};

pub fn init_logging() {
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
}

pub fn document() -> Arc<Document> {
    init_logging();
    Arc::new(Document::new(Viewport::new(1280, 800)))
}

/// Messenger that records every message instead of rendering it.
#[derive(Default)]
pub struct RecordingMessenger {
    messages: Mutex<Vec<String>>,
}

impl RecordingMessenger {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Messenger for RecordingMessenger {
    fn show(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

pub enum Reply {
    Response(UploadResponse),
    Timeout,
}

/// Uploader answering from a queue of canned replies.
#[derive(Default)]
pub struct FakeUploader {
    replies: Mutex<VecDeque<Reply>>,
    uploads: Mutex<Vec<String>>,
    archives: Mutex<Vec<String>>,
    gate: Option<Notify>,
}

impl FakeUploader {
    pub fn replying(reply: Reply) -> Self {
        let uploader = Self::default();
        uploader.replies.lock().unwrap().push_back(reply);
        uploader
    }

    /// Like [`FakeUploader::replying`], but each upload waits for
    /// [`FakeUploader::release`].
    pub fn gated(reply: Reply) -> Self {
        Self {
            gate: Some(Notify::new()),
            ..Self::replying(reply)
        }
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    /// Names of the files sent as multipart uploads so far.
    pub fn uploads(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }

    /// Names of the files sent as raw archives so far.
    pub fn archives(&self) -> Vec<String> {
        self.archives.lock().unwrap().clone()
    }

    async fn reply(&self) -> Result<UploadResponse, Error> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("no reply queued");
        match reply {
            Reply::Response(response) => Ok(response),
            Reply::Timeout => Err(ApiError::Timeout(Duration::from_secs(5)).into()),
        }
    }
}

#[async_trait]
impl TmxUploader for FakeUploader {
    async fn upload_tmx(&self, file: &UploadFile) -> Result<UploadResponse, Error> {
        self.uploads.lock().unwrap().push(file.name.clone());
        self.reply().await
    }

    async fn upload_tmx_archive(&self, file: &UploadFile) -> Result<UploadResponse, Error> {
        self.archives.lock().unwrap().push(file.name.clone());
        self.reply().await
    }
}

/// Yield to spawned tasks until `done` holds.
pub async fn wait_until(done: impl Fn() -> bool) {
    for _ in 0..100 {
        if done() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}
