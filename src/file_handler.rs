//! Loading of images dropped onto the window.
//!
//! Decoding runs off the UI thread: on native each file gets a worker thread,
//! on the web a local future. Results come back over a oneshot channel and are
//! collected by [`ImageLoader::poll`] once per frame.

use std::sync::Arc;

use egui::{ColorImage, DroppedFile};
use futures::channel::oneshot;

use crate::error::{CanvasError, CanvasResult};

/// A decoded bitmap ready to become an image element
#[derive(Clone)]
pub struct DecodedImage {
    pub name: String,
    pub pixels: Arc<ColorImage>,
}

impl std::fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedImage")
            .field("name", &self.name)
            .field("size", &self.pixels.size)
            .finish()
    }
}

/// Outcome of one finished decode job
#[derive(Debug)]
pub struct DecodeOutcome {
    pub name: String,
    pub result: CanvasResult<DecodedImage>,
}

/// Decode encoded image bytes (PNG, JPEG, GIF, BMP, WebP) into RGBA pixels
pub fn decode_image(name: &str, bytes: &[u8]) -> CanvasResult<DecodedImage> {
    let failure = |reason: String| CanvasError::DecodeFailure {
        name: name.to_owned(),
        reason,
    };

    let decoded = image::load_from_memory(bytes).map_err(|err| failure(err.to_string()))?;
    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    if size[0] == 0 || size[1] == 0 {
        return Err(failure("image has no pixels".to_owned()));
    }

    Ok(DecodedImage {
        name: name.to_owned(),
        pixels: Arc::new(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw())),
    })
}

enum FileSource {
    Bytes(Arc<[u8]>),
    #[cfg(not(target_arch = "wasm32"))]
    Path(std::path::PathBuf),
}

impl FileSource {
    fn read(self, name: &str) -> CanvasResult<Arc<[u8]>> {
        match self {
            FileSource::Bytes(bytes) => Ok(bytes),
            #[cfg(not(target_arch = "wasm32"))]
            FileSource::Path(path) => std::fs::read(&path)
                .map(Arc::from)
                .map_err(|err| CanvasError::DecodeFailure {
                    name: name.to_owned(),
                    reason: err.to_string(),
                }),
        }
    }
}

fn run_decode(name: &str, source: FileSource) -> CanvasResult<DecodedImage> {
    let bytes = source.read(name)?;
    decode_image(name, &bytes)
}

struct PendingDecode {
    name: String,
    receiver: oneshot::Receiver<CanvasResult<DecodedImage>>,
}

/// Tracks decode jobs for dropped files
#[derive(Default)]
pub struct ImageLoader {
    pending: Vec<PendingDecode>,
    repaint: Option<egui::Context>,
}

impl std::fmt::Debug for ImageLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageLoader")
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl ImageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a repaint on `ctx` whenever a job finishes
    pub fn with_repaint(ctx: egui::Context) -> Self {
        Self {
            pending: Vec::new(),
            repaint: Some(ctx),
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Take any files dropped this frame and start decoding them
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> usize {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        for file in &dropped {
            self.load_dropped_file(file);
        }
        dropped.len()
    }

    pub fn load_dropped_file(&mut self, file: &DroppedFile) {
        let name = display_name(file);
        let source = match (&file.bytes, &file.path) {
            (Some(bytes), _) => FileSource::Bytes(bytes.clone()),
            #[cfg(not(target_arch = "wasm32"))]
            (None, Some(path)) => FileSource::Path(path.clone()),
            _ => {
                log::warn!("Dropped file `{}` has neither contents nor a path", name);
                return;
            }
        };
        self.spawn(name, source);
    }

    /// Start decoding in-memory bytes
    pub fn load_bytes(&mut self, name: impl Into<String>, bytes: Arc<[u8]>) {
        self.spawn(name.into(), FileSource::Bytes(bytes));
    }

    fn spawn(&mut self, name: String, source: FileSource) {
        log::info!("Decoding `{}`", name);
        let (sender, receiver) = oneshot::channel();
        let repaint = self.repaint.clone();
        let job_name = name.clone();

        let job = move || {
            let result = run_decode(&job_name, source);
            // The receiver is gone if the app shut down meanwhile
            let _ = sender.send(result);
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        };

        #[cfg(not(target_arch = "wasm32"))]
        std::thread::spawn(job);

        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(async move { job() });

        self.pending.push(PendingDecode { name, receiver });
    }

    /// Collect every job that finished since the last call, in submission order
    pub fn poll(&mut self) -> Vec<DecodeOutcome> {
        let mut finished = Vec::new();
        self.pending.retain_mut(|job| match job.receiver.try_recv() {
            Ok(None) => true,
            Ok(Some(result)) => {
                finished.push(DecodeOutcome {
                    name: job.name.clone(),
                    result,
                });
                false
            }
            Err(oneshot::Canceled) => {
                finished.push(DecodeOutcome {
                    name: job.name.clone(),
                    result: Err(CanvasError::DecodeCancelled),
                });
                false
            }
        });
        finished
    }
}

fn display_name(file: &DroppedFile) -> String {
    if !file.name.is_empty() {
        return file.name.clone();
    }
    file.path
        .as_ref()
        .and_then(|path| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unnamed".to_owned())
}
