use crate::error::ArchiveError;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;
use twilio::RecordingResource;

mod fetch;
mod lister;
mod publish;

pub use fetch::MediaFetcher;
pub use lister::RecordingLister;
pub use publish::{object_key, publish, ObjectUploader, S3Uploader};

/// Outcome of a successful archival run.
#[derive(Debug, Clone)]
pub struct ArchivedVoicemail {
    pub recording_sid: String,
    pub media_url: String,
    pub local_path: PathBuf,
    pub object_key: String,
}

/// Moves the latest voicemail from Twilio into the object store.
pub struct Archiver {
    lister: Arc<dyn RecordingLister>,
    fetcher: MediaFetcher,
    uploader: Arc<dyn ObjectUploader>,
    // Every run writes the same local file
    lock: Mutex<()>,
}

impl Archiver {
    pub fn new(
        lister: Arc<dyn RecordingLister>,
        fetcher: MediaFetcher,
        uploader: Arc<dyn ObjectUploader>,
    ) -> Self {
        Self {
            lister,
            fetcher,
            uploader,
            lock: Mutex::new(()),
        }
    }

    /// Lists the recordings of `call_sid` (or all of them when it has none
    /// yet), picks one, downloads its mp3 and uploads it.
    pub async fn archive_latest(
        &self,
        call_sid: Option<&str>,
    ) -> Result<ArchivedVoicemail, ArchiveError> {
        let _guard = self.lock.lock().await;

        let mut recordings = self.lister.list_recordings(call_sid).await?;
        if recordings.is_empty() && call_sid.is_some() {
            // Not indexed under the call yet, fall back to the newest
            log::debug!("No recording listed for call {call_sid:?}, using the newest");
            recordings = self.lister.list_recordings(None).await?;
        }
        let recording = select_recording(&recordings, call_sid)?;
        log::debug!(
            "Selected recording {} of call {}",
            recording.sid,
            recording.call_sid
        );

        let media_url = self.lister.media_url(recording);
        let local_path = self.fetcher.fetch(&media_url).await?;
        log::info!("Downloaded {media_url}");

        let object_key = publish(self.uploader.as_ref(), &local_path).await?;
        log::info!("Uploaded voicemail as {object_key}");

        Ok(ArchivedVoicemail {
            recording_sid: recording.sid.clone(),
            media_url,
            local_path,
            object_key,
        })
    }
}

/// Picks the recording belonging to `call_sid` when the list has one,
/// otherwise the first (newest) entry.
pub fn select_recording<'a>(
    recordings: &'a [RecordingResource],
    call_sid: Option<&str>,
) -> Result<&'a RecordingResource, ArchiveError> {
    call_sid
        .and_then(|sid| recordings.iter().find(|r| r.call_sid == sid))
        .or_else(|| recordings.first())
        .ok_or(ArchiveError::NoRecordingFound)
}

/// Background task spawned at the end of a call. Failures are logged, the
/// caller has already been hung up on.
pub async fn archive_voicemail(archiver: Arc<Archiver>, call_sid: Option<String>) {
    match archiver.archive_latest(call_sid.as_deref()).await {
        Ok(archived) => log::info!(
            "Archived recording {} to {}",
            archived.recording_sid,
            archived.object_key
        ),
        Err(e) => log::error!(
            "Failed to archive voicemail for call {}: {e}",
            call_sid.as_deref().unwrap_or("<unknown>")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording(sid: &str, call_sid: &str) -> RecordingResource {
        RecordingResource {
            sid: sid.to_owned(),
            call_sid: call_sid.to_owned(),
            uri: format!("/2010-04-01/Accounts/AC1/Recordings/{sid}.json"),
            date_created: None,
            duration: None,
            status: None,
        }
    }

    #[test]
    fn empty_list_is_no_recording() {
        assert!(matches!(
            select_recording(&[], None),
            Err(ArchiveError::NoRecordingFound)
        ));
        assert!(matches!(
            select_recording(&[], Some("CA1")),
            Err(ArchiveError::NoRecordingFound)
        ));
    }

    #[test]
    fn newest_is_picked_without_call_sid() {
        let recordings = [recording("RE2", "CA2"), recording("RE1", "CA1")];
        assert_eq!(select_recording(&recordings, None).unwrap().sid, "RE2");
    }

    #[test]
    fn matching_call_wins_over_newest() {
        let recordings = [recording("RE2", "CA2"), recording("RE1", "CA1")];
        assert_eq!(
            select_recording(&recordings, Some("CA1")).unwrap().sid,
            "RE1"
        );
    }

    #[test]
    fn unknown_call_falls_back_to_newest() {
        let recordings = [recording("RE2", "CA2"), recording("RE1", "CA1")];
        assert_eq!(
            select_recording(&recordings, Some("CA9")).unwrap().sid,
            "RE2"
        );
    }
}
