use crate::params::ParameterValue;

/// Identifies the backend that produced a capture or writer handle.
///
/// Backends are tagged with a small integer so that callers can take
/// backend-specific decisions without knowing the concrete type behind a
/// `dyn VideoCapture` or `dyn VideoWriter`. Values outside the named constants
/// are allowed for out-of-tree backends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BackendId(pub i32);

impl BackendId {
    /// Any backend; the default when a backend does not report itself.
    pub const ANY: BackendId = BackendId(0);
    /// Video4Linux2.
    pub const V4L2: BackendId = BackendId(200);
    /// IEEE 1394 cameras through libdc1394.
    pub const FIREWIRE: BackendId = BackendId(300);
    /// DirectShow.
    pub const DSHOW: BackendId = BackendId(700);
    /// Prosilica GigE SDK.
    pub const PVAPI: BackendId = BackendId(800);
    /// OpenNI depth sensors.
    pub const OPENNI: BackendId = BackendId(900);
    /// Android camera and media NDK.
    pub const ANDROID: BackendId = BackendId(1000);
    /// XIMEA camera API.
    pub const XIAPI: BackendId = BackendId(1100);
    /// AVFoundation.
    pub const AVFOUNDATION: BackendId = BackendId(1200);
    /// Microsoft Media Foundation.
    pub const MSMF: BackendId = BackendId(1400);
    /// Windows Runtime media capture.
    pub const WINRT: BackendId = BackendId(1410);
    /// Intel RealSense.
    pub const REALSENSE: BackendId = BackendId(1500);
    /// OpenNI2 depth sensors.
    pub const OPENNI2: BackendId = BackendId(1600);
    /// gPhoto2 still cameras.
    pub const GPHOTO2: BackendId = BackendId(1700);
    /// GStreamer pipelines.
    pub const GSTREAMER: BackendId = BackendId(1800);
    /// FFmpeg containers and codecs.
    pub const FFMPEG: BackendId = BackendId(1900);
    /// Numbered image sequences.
    pub const IMAGES: BackendId = BackendId(2000);
    /// Aravis GenICam cameras.
    pub const ARAVIS: BackendId = BackendId(2100);
    /// Built-in Motion JPEG container.
    pub const MJPEG: BackendId = BackendId(2200);
    /// Intel Media SDK.
    pub const INTEL_MFX: BackendId = BackendId(2300);
    /// XINE engine.
    pub const XINE: BackendId = BackendId(2400);
    /// IDS uEye cameras.
    pub const UEYE: BackendId = BackendId(2500);

    #[rustfmt::skip]
    const NAMES: [(BackendId, &'static str); 22] = [
        (Self::ANY, "ANY"),
        (Self::V4L2, "V4L2"),
        (Self::FIREWIRE, "FIREWIRE"),
        (Self::DSHOW, "DSHOW"),
        (Self::PVAPI, "PVAPI"),
        (Self::OPENNI, "OPENNI"),
        (Self::ANDROID, "ANDROID"),
        (Self::XIAPI, "XIMEA"),
        (Self::AVFOUNDATION, "AVFOUNDATION"),
        (Self::MSMF, "MSMF"),
        (Self::WINRT, "WINRT"),
        (Self::REALSENSE, "INTEL_REALSENSE"),
        (Self::OPENNI2, "OPENNI2"),
        (Self::GPHOTO2, "GPHOTO2"),
        (Self::GSTREAMER, "GSTREAMER"),
        (Self::FFMPEG, "FFMPEG"),
        (Self::IMAGES, "CV_IMAGES"),
        (Self::ARAVIS, "ARAVIS"),
        (Self::MJPEG, "CV_MJPEG"),
        (Self::INTEL_MFX, "INTEL_MFX"),
        (Self::XINE, "XINE"),
        (Self::UEYE, "UEYE"),
    ];

    /// The display name of a known backend.
    pub fn name(&self) -> Option<&'static str> {
        Self::NAMES
            .iter()
            .find(|(id, _)| id == self)
            .map(|(_, name)| *name)
    }
}

impl std::fmt::Display for BackendId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "UNKNOWN({})", self.0),
        }
    }
}

impl From<i32> for BackendId {
    fn from(id: i32) -> Self {
        BackendId(id)
    }
}

impl From<BackendId> for i32 {
    fn from(id: BackendId) -> Self {
        id.0
    }
}

/// Hardware acceleration requested through the parameter set.
///
/// Only the value is carried here; backends decide how to honour it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VideoAccelerationType {
    /// Software decoding and encoding only.
    #[default]
    None,
    /// Prefer any available acceleration.
    Any,
    /// Direct3D 11.
    D3d11,
    /// VA-API.
    Vaapi,
    /// Intel Media SDK.
    Mfx,
    /// A value this crate does not know.
    Unknown(u32),
}

impl VideoAccelerationType {
    /// Decode the raw parameter value.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => VideoAccelerationType::None,
            1 => VideoAccelerationType::Any,
            2 => VideoAccelerationType::D3d11,
            3 => VideoAccelerationType::Vaapi,
            4 => VideoAccelerationType::Mfx,
            other => VideoAccelerationType::Unknown(other),
        }
    }

    /// The raw parameter value.
    pub fn raw(&self) -> u32 {
        match self {
            VideoAccelerationType::None => 0,
            VideoAccelerationType::Any => 1,
            VideoAccelerationType::D3d11 => 2,
            VideoAccelerationType::Vaapi => 3,
            VideoAccelerationType::Mfx => 4,
            VideoAccelerationType::Unknown(raw) => *raw,
        }
    }
}

impl ParameterValue for VideoAccelerationType {
    fn decode(raw: i32) -> Self {
        VideoAccelerationType::from_raw(raw as u32)
    }
}

impl std::fmt::Display for VideoAccelerationType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            VideoAccelerationType::None => write!(f, "NONE"),
            VideoAccelerationType::Any => write!(f, "ANY"),
            VideoAccelerationType::D3d11 => write!(f, "D3D11"),
            VideoAccelerationType::Vaapi => write!(f, "VAAPI"),
            VideoAccelerationType::Mfx => write!(f, "MFX"),
            VideoAccelerationType::Unknown(raw) => write!(f, "UNKNOWN(0x{raw:x})"),
        }
    }
}
