use std::path::{Path, PathBuf};

use crate::backend::BackendId;
use crate::capture::VideoCapture;
use crate::params::{CaptureParameters, WriterParameters};
use crate::writer::{VideoWriter, WriterConfig};

/// Where a capture reads its frames from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Locator {
    /// A file, URL or pipeline description.
    Path(PathBuf),
    /// A camera device index.
    Device(i32),
}

impl From<&str> for Locator {
    fn from(path: &str) -> Self {
        Locator::Path(PathBuf::from(path))
    }
}

impl From<PathBuf> for Locator {
    fn from(path: PathBuf) -> Self {
        Locator::Path(path)
    }
}

impl From<&Path> for Locator {
    fn from(path: &Path) -> Self {
        Locator::Path(path.to_path_buf())
    }
}

impl From<i32> for Locator {
    fn from(index: i32) -> Self {
        Locator::Device(index)
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Locator::Path(path) => write!(f, "{}", path.display()),
            Locator::Device(index) => write!(f, "device {index}"),
        }
    }
}

/// Opens a capture on a file, URL or pipeline.
pub type FileCaptureFn =
    dyn Fn(&Path, &CaptureParameters) -> Option<Box<dyn VideoCapture>> + Send + Sync;

/// Opens a capture on a camera index.
pub type CameraCaptureFn =
    dyn Fn(i32, &CaptureParameters) -> Option<Box<dyn VideoCapture>> + Send + Sync;

/// Opens a writer on a file, URL or pipeline.
pub type WriterFn = dyn Fn(&Path, &WriterConfig, &WriterParameters) -> Option<Box<dyn VideoWriter>>
    + Send
    + Sync;

/// The entry points of a single backend.
///
/// A backend provides any subset of file capture, camera capture and writing.
/// Every entry point returns `None` both when the backend cannot handle the
/// request and when opening failed.
pub struct BackendFactory {
    id: BackendId,
    file_capture: Option<Box<FileCaptureFn>>,
    camera_capture: Option<Box<CameraCaptureFn>>,
    writer: Option<Box<WriterFn>>,
}

impl BackendFactory {
    /// Create a factory for `id` with no entry points.
    pub fn new(id: BackendId) -> Self {
        Self {
            id,
            file_capture: None,
            camera_capture: None,
            writer: None,
        }
    }

    /// Set the file capture entry point.
    pub fn with_file_capture<F>(mut self, f: F) -> Self
    where
        F: Fn(&Path, &CaptureParameters) -> Option<Box<dyn VideoCapture>> + Send + Sync + 'static,
    {
        self.file_capture = Some(Box::new(f));
        self
    }

    /// Set the camera capture entry point.
    pub fn with_camera_capture<F>(mut self, f: F) -> Self
    where
        F: Fn(i32, &CaptureParameters) -> Option<Box<dyn VideoCapture>> + Send + Sync + 'static,
    {
        self.camera_capture = Some(Box::new(f));
        self
    }

    /// Set the writer entry point.
    pub fn with_writer<F>(mut self, f: F) -> Self
    where
        F: Fn(&Path, &WriterConfig, &WriterParameters) -> Option<Box<dyn VideoWriter>>
            + Send
            + Sync
            + 'static,
    {
        self.writer = Some(Box::new(f));
        self
    }

    /// The backend this factory builds.
    #[inline]
    pub fn id(&self) -> BackendId {
        self.id
    }

    /// Whether the factory can open a capture on `locator`.
    pub fn supports_capture(&self, locator: &Locator) -> bool {
        match locator {
            Locator::Path(_) => self.file_capture.is_some(),
            Locator::Device(_) => self.camera_capture.is_some(),
        }
    }

    /// Whether the factory can open a writer.
    pub fn supports_writer(&self) -> bool {
        self.writer.is_some()
    }
}

/// Maps backend identifiers to their factories.
///
/// The registry is filled once at start-up and then queried by identifier.
/// Choosing which backend to use for a given file or device is left to the
/// caller. Backends are listed in registration order.
///
/// After a successful open the registry logs the parameters the backend did
/// not read, see [`crate::ParameterSet::warn_unused_parameters`].
#[derive(Default)]
pub struct BackendRegistry {
    factories: Vec<BackendFactory>,
}

impl BackendRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a backend, replacing any previous factory with the same identifier.
    pub fn register(&mut self, factory: BackendFactory) {
        match self.factories.iter_mut().find(|f| f.id == factory.id) {
            Some(slot) => {
                log::warn!("Backend {} registered twice, replacing it.", factory.id);
                *slot = factory;
            }
            None => {
                log::debug!("Registered backend {}.", factory.id);
                self.factories.push(factory);
            }
        }
    }

    /// Builder-style variant of [`BackendRegistry::register`].
    pub fn with(mut self, factory: BackendFactory) -> Self {
        self.register(factory);
        self
    }

    /// The registered backend identifiers in registration order.
    pub fn backends(&self) -> Vec<BackendId> {
        self.factories.iter().map(|f| f.id).collect()
    }

    /// The factory registered for `id`.
    pub fn get(&self, id: BackendId) -> Option<&BackendFactory> {
        self.factories.iter().find(|f| f.id == id)
    }

    /// Whether a factory is registered for `id`.
    pub fn contains(&self, id: BackendId) -> bool {
        self.get(id).is_some()
    }

    /// Open a capture on `locator` with backend `id`.
    ///
    /// Returns `None` if the backend is not registered, does not handle this
    /// kind of locator, fails to open, or returns a handle that is not opened.
    pub fn open_capture(
        &self,
        id: BackendId,
        locator: &Locator,
        params: &CaptureParameters,
    ) -> Option<Box<dyn VideoCapture>> {
        let Some(factory) = self.get(id) else {
            log::debug!("Backend {id} is not registered.");
            return None;
        };

        let capture = match locator {
            Locator::Path(path) => factory
                .file_capture
                .as_ref()
                .and_then(|f| f(path.as_path(), params)),
            Locator::Device(index) => factory
                .camera_capture
                .as_ref()
                .and_then(|f| f(*index, params)),
        };

        match capture {
            Some(capture) if capture.is_opened() => {
                params.warn_unused_parameters();
                Some(capture)
            }
            Some(_) => {
                log::debug!("Backend {id} returned a closed capture for {locator}.");
                None
            }
            None => {
                log::debug!("Backend {id} can't open {locator}.");
                None
            }
        }
    }

    /// Open a writer on `path` with backend `id`.
    ///
    /// Returns `None` if the backend is not registered, cannot write, fails to
    /// open, or returns a handle that is not opened.
    pub fn open_writer(
        &self,
        id: BackendId,
        path: impl AsRef<Path>,
        config: &WriterConfig,
        params: &WriterParameters,
    ) -> Option<Box<dyn VideoWriter>> {
        let path = path.as_ref();
        let Some(factory) = self.get(id) else {
            log::debug!("Backend {id} is not registered.");
            return None;
        };

        match factory.writer.as_ref().and_then(|f| f(path, config, params)) {
            Some(writer) if writer.is_opened() => {
                params.warn_unused_parameters();
                Some(writer)
            }
            Some(_) => {
                log::debug!(
                    "Backend {id} returned a closed writer for {}.",
                    path.display()
                );
                None
            }
            None => {
                log::debug!("Backend {id} can't write {}.", path.display());
                None
            }
        }
    }
}
