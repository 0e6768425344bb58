#![allow(dead_code)]

use async_trait::async_trait;
use axum::{extract::Query, routing::get, Json, Router};
use serde_json::{json, Value};
use std::{
    collections::HashMap,
    path::Path,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};
use tokio::net::TcpListener;
use twilio::RecordingResource;
use voicemail::{
    archive::{ObjectUploader, RecordingLister},
    ArchiveError,
};

pub const ACCOUNT_SID: &str = "ACtest";
pub const AUTH_TOKEN: &str = "test-token";
pub const AUDIO: &[u8] = b"ID3...audio...";

/// Serve `router` on a random local port, returning its base url.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{addr}")
}

pub fn recording_json(sid: &str, call_sid: &str) -> Value {
    json!({
        "sid": sid,
        "call_sid": call_sid,
        "uri": format!("/2010-04-01/Accounts/{ACCOUNT_SID}/Recordings/{sid}.json"),
        "date_created": "Fri, 14 Oct 2016 21:56:34 +0000",
        "duration": "7",
        "status": "completed"
    })
}

/// A stand-in for the Twilio API listing `recordings` and serving
/// `AUDIO` for every recording media url. The listing honours the
/// `CallSid` and `PageSize` filters.
pub async fn start_twilio_stub(recordings: Vec<Value>) -> String {
    let router = Router::new()
        .route(
            &format!("/2010-04-01/Accounts/{ACCOUNT_SID}/Recordings.json"),
            get(move |Query(params): Query<HashMap<String, String>>| {
                let recordings = recordings.clone();
                async move {
                    let page_size = params
                        .get("PageSize")
                        .and_then(|p| p.parse().ok())
                        .unwrap_or(50);
                    let listed: Vec<Value> = recordings
                        .into_iter()
                        .filter(|r| {
                            params
                                .get("CallSid")
                                .map_or(true, |sid| r["call_sid"] == sid.as_str())
                        })
                        .take(page_size)
                        .collect();

                    Json(json!({ "recordings": listed, "page": 0 }))
                }
            }),
        )
        .route(
            &format!("/2010-04-01/Accounts/{ACCOUNT_SID}/Recordings/:file"),
            get(|| async { AUDIO }),
        );

    serve(router).await
}

/// Keeps every upload in memory.
#[derive(Default)]
pub struct MemoryUploader {
    pub uploads: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MemoryUploader {
    pub fn uploads(&self) -> Vec<(String, Vec<u8>)> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectUploader for MemoryUploader {
    async fn put_object(&self, key: &str, path: &Path) -> Result<(), ArchiveError> {
        let bytes = tokio::fs::read(path).await?;
        self.uploads.lock().unwrap().push((key.to_owned(), bytes));
        Ok(())
    }
}

/// Takes `delay` per upload and tracks how many run at the same time.
pub struct SlowUploader {
    delay: Duration,
    active: AtomicUsize,
    peak: AtomicUsize,
    completed: AtomicUsize,
}

impl SlowUploader {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            active: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        }
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectUploader for SlowUploader {
    async fn put_object(&self, _key: &str, _path: &Path) -> Result<(), ArchiveError> {
        let running = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(running, Ordering::SeqCst);

        tokio::time::sleep(self.delay).await;

        self.active.fetch_sub(1, Ordering::SeqCst);
        self.completed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub struct FailingUploader;

#[async_trait]
impl ObjectUploader for FailingUploader {
    async fn put_object(&self, key: &str, _path: &Path) -> Result<(), ArchiveError> {
        Err(ArchiveError::Upload {
            key: key.to_owned(),
            message: "access denied".to_owned(),
        })
    }
}

/// Lists a fixed set of recordings without any HTTP.
pub struct StaticLister {
    pub recordings: Vec<RecordingResource>,
    pub media_host: String,
}

#[async_trait]
impl RecordingLister for StaticLister {
    async fn list_recordings(
        &self,
        call_sid: Option<&str>,
    ) -> Result<Vec<RecordingResource>, ArchiveError> {
        Ok(self
            .recordings
            .iter()
            .filter(|r| call_sid.map_or(true, |sid| r.call_sid == sid))
            .cloned()
            .collect())
    }

    fn media_url(&self, recording: &RecordingResource) -> String {
        twilio::media_url(&self.media_host, &recording.uri)
    }
}
