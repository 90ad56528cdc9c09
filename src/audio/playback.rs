use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use rodio::{OutputStream, Sink, Source};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{
    audio::{
        error::AudioError,
        progress::TrackProgress,
        traits::PlaybackControl,
        util::{decode, format_hint},
    },
    http::ResourceClient,
    playlist::Track,
};

/// rodio-backed engine. Audio is fetched and decoded on a background task and
/// appended to a paused sink.
pub struct PlaybackEngine {
    sink: Arc<Sink>,
    progress: Arc<TrackProgress>,
    append_lock: Arc<Mutex<()>>,
    fetcher: ResourceClient,
    loader: Mutex<Option<JoinHandle<()>>>,
}

impl PlaybackEngine {
    pub fn new(output: &OutputStream, fetcher: ResourceClient) -> Self {
        let sink = Sink::connect_new(output.mixer());
        sink.pause();

        Self {
            sink: Arc::new(sink),
            progress: Arc::new(TrackProgress::new()),
            append_lock: Arc::new(Mutex::new(())),
            fetcher,
            loader: Mutex::new(None),
        }
    }

    fn clear(&self) -> u64 {
        let _guard = lock(&self.append_lock);
        let generation = self.progress.reset();
        self.sink.clear();
        generation
    }

    fn replace_loader(&self, task: Option<JoinHandle<()>>) {
        if let Some(previous) = std::mem::replace(&mut *lock(&self.loader), task) {
            previous.abort();
        }
    }
}

impl PlaybackControl for PlaybackEngine {
    fn load(&self, track: &Track) {
        let generation = self.clear();

        let url = track.audio_url.clone();
        let title = track.title.clone();
        let fetcher = self.fetcher.clone();
        let sink = self.sink.clone();
        let progress = self.progress.clone();
        let append_lock = self.append_lock.clone();

        let task = tokio::spawn(async move {
            let bytes = match fetcher.fetch(&url).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!("{}", AudioError::FetchError(e.to_string()));
                    return;
                }
            };

            let hint = format_hint(&url);
            let decoded = tokio::task::spawn_blocking(move || decode(bytes, hint.as_deref())).await;
            let source = match decoded {
                Ok(Ok(source)) => source,
                Ok(Err(e)) => {
                    warn!("'{title}': {e}");
                    return;
                }
                Err(e) => {
                    warn!("'{title}': decoder task failed: {e}");
                    return;
                }
            };
            let total = source.total_duration();

            let _guard = lock(&append_lock);
            if !progress.is_current(generation) {
                debug!("discarding audio for '{title}', track changed while loading");
                return;
            }
            sink.append(source);
            progress.finish_load(generation, total);
            info!("loaded '{title}' ({total:?})");
        });

        self.replace_loader(Some(task));
    }

    fn play(&self) {
        self.sink.play();
    }

    fn pause(&self) {
        self.sink.pause();
    }

    fn stop(&self) {
        self.replace_loader(None);
        self.clear();
    }

    fn seek(&self, position: Duration) -> Result<(), AudioError> {
        if !self.progress.is_loaded() {
            return Err(AudioError::NotLoaded);
        }
        self.sink
            .try_seek(position)
            .map_err(|e| AudioError::SeekError(e.to_string()))
    }

    fn set_volume(&self, volume: f32) {
        self.sink.set_volume(volume.clamp(0.0, 1.0));
    }

    fn position(&self) -> Duration {
        if self.progress.is_loaded() {
            self.sink.get_pos()
        } else {
            Duration::ZERO
        }
    }

    fn duration(&self) -> Option<Duration> {
        self.progress.total_duration()
    }

    fn is_finished(&self) -> bool {
        self.progress.is_loaded() && self.sink.empty()
    }
}

impl Drop for PlaybackEngine {
    fn drop(&mut self) {
        self.replace_loader(None);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
