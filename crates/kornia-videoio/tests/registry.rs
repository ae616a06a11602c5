use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use kornia_videoio::capture::grab_each;
use kornia_videoio::legacy::{
    LegacyCapture, LegacyCaptureSource, LegacyWriter, LegacyWriterSink, RasterOrigin, RawImage,
};
use kornia_videoio::{
    BackendFactory, BackendId, BackendRegistry, CaptureParameters, Image, ImageSize, Locator,
    PixelDepth, VideoCapture, VideoWriter, WriterConfig, WriterParameters,
};

const FRAME_COUNT: i32 = 1000;
const FRAME_WIDTH: i32 = 1001;
const REQUIRED_SERIAL: i32 = 1002;

/// A camera producing gray frames whose value is the frame number.
struct SyntheticCamera {
    width: usize,
    remaining: usize,
    grabbed: Option<u8>,
    next: u8,
}

impl SyntheticCamera {
    fn open(_index: i32, params: &CaptureParameters) -> Option<Box<dyn VideoCapture>> {
        Some(Box::new(Self {
            width: params.get_or(FRAME_WIDTH, 4),
            remaining: params.get_or(FRAME_COUNT, 3),
            grabbed: None,
            next: 0,
        }))
    }
}

impl VideoCapture for SyntheticCamera {
    fn property(&self, prop_id: i32) -> f64 {
        match prop_id {
            FRAME_WIDTH => self.width as f64,
            _ => 0.0,
        }
    }

    fn grab_frame(&mut self) -> bool {
        if self.remaining == 0 {
            self.grabbed = None;
            return false;
        }
        self.remaining -= 1;
        self.grabbed = Some(self.next);
        self.next = self.next.wrapping_add(1);
        true
    }

    fn retrieve_frame(&mut self, _stream_idx: i32, image: &mut Image) -> bool {
        let Some(value) = self.grabbed else {
            image.release();
            return false;
        };
        let size = ImageSize {
            width: self.width,
            height: 2,
        };
        image.reallocate(size, 1, PixelDepth::U8);
        image.as_slice_mut().fill(value);
        true
    }

    fn is_opened(&self) -> bool {
        true
    }

    fn backend_id(&self) -> BackendId {
        BackendId::V4L2
    }
}

/// A legacy file reader serving one bottom-left image per grab.
struct BottomUpReader {
    frame: RawImage,
    released: Arc<AtomicUsize>,
}

impl LegacyCaptureSource for BottomUpReader {
    fn retrieve_frame(&mut self, channel: i32) -> Option<&RawImage> {
        (channel == 0).then_some(&self.frame)
    }

    fn capture_domain(&self) -> BackendId {
        BackendId::MJPEG
    }
}

impl Drop for BottomUpReader {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

struct RecordingSink {
    frames: Arc<Mutex<Vec<RawImage>>>,
}

impl LegacyWriterSink for RecordingSink {
    fn write_frame(&mut self, image: &RawImage) -> bool {
        self.frames.lock().unwrap().push(image.clone());
        true
    }

    fn capture_domain(&self) -> BackendId {
        BackendId::MJPEG
    }
}

fn bottom_up_frame() -> RawImage {
    RawImage::new(
        [2, 3].into(),
        1,
        PixelDepth::U8,
        RasterOrigin::BottomLeft,
        4,
        vec![1, 2, 0, 0, 3, 4, 0, 0, 5, 6, 0, 0],
    )
}

fn legacy_reader(path: &Path, released: &Arc<AtomicUsize>) -> Box<dyn VideoCapture> {
    // the legacy backend hands back a shell when the open fails
    let source: Option<Box<dyn LegacyCaptureSource>> =
        path.extension().is_some_and(|ext| ext == "avi").then(|| {
            let reader = BottomUpReader {
                frame: bottom_up_frame(),
                released: released.clone(),
            };
            Box::new(reader) as Box<dyn LegacyCaptureSource>
        });
    Box::new(LegacyCapture::new(source))
}

fn legacy_writer(frames: &Arc<Mutex<Vec<RawImage>>>) -> Box<dyn VideoWriter> {
    let sink = RecordingSink {
        frames: frames.clone(),
    };
    Box::new(LegacyWriter::new(Some(Box::new(sink))))
}

fn registry(
    released: Arc<AtomicUsize>,
    written: Arc<Mutex<Vec<RawImage>>>,
) -> BackendRegistry {
    let mjpeg = BackendFactory::new(BackendId::MJPEG)
        .with_file_capture(move |path: &Path, _params: &CaptureParameters| {
            Some(legacy_reader(path, &released))
        })
        .with_writer(
            move |_path: &Path, _config: &WriterConfig, _params: &WriterParameters| {
                Some(legacy_writer(&written))
            },
        );

    let gstreamer = BackendFactory::new(BackendId::GSTREAMER).with_camera_capture(
        |index: i32, params: &CaptureParameters| {
            let serial = params.get::<i32>(REQUIRED_SERIAL).ok()?;
            let params = CaptureParameters::from_pairs(&[(FRAME_COUNT, serial)]);
            SyntheticCamera::open(index, &params)
        },
    );

    BackendRegistry::new()
        .with(BackendFactory::new(BackendId::V4L2).with_camera_capture(SyntheticCamera::open))
        .with(mjpeg)
        .with(gstreamer)
}

fn default_registry() -> BackendRegistry {
    registry(Arc::new(AtomicUsize::new(0)), Arc::new(Mutex::new(Vec::new())))
}

#[test]
fn open_camera_and_read() {
    let _ = env_logger::builder().is_test(true).try_init();

    let registry = default_registry();
    let params = CaptureParameters::from_flat(&[FRAME_COUNT, 2, FRAME_WIDTH, 5, 77, 1])
        .expect("even length");

    let mut capture = registry
        .open_capture(BackendId::V4L2, &Locator::Device(0), &params)
        .expect("synthetic camera opens");

    // the typo'd key is the only one the backend did not read
    assert_eq!(params.unused(), vec![77]);

    assert!(capture.is_opened());
    assert_eq!(capture.backend_id(), BackendId::V4L2);
    assert_eq!(capture.property(FRAME_WIDTH), 5.0);

    let mut image = Image::default();
    assert!(capture.read(&mut image));
    assert_eq!(image.size(), ImageSize { width: 5, height: 2 });
    assert!(image.as_slice().iter().all(|&v| v == 0));
    assert!(capture.read(&mut image));
    assert!(image.as_slice().iter().all(|&v| v == 1));
    assert!(!capture.read(&mut image));
    assert!(image.is_empty());
}

#[test]
fn open_legacy_file_flips_rows() {
    let released = Arc::new(AtomicUsize::new(0));
    let registry = registry(released.clone(), Arc::new(Mutex::new(Vec::new())));

    let mut capture = registry
        .open_capture(
            BackendId::MJPEG,
            &Locator::from("clip.avi"),
            &CaptureParameters::new(),
        )
        .expect("legacy reader opens");
    assert_eq!(capture.backend_id(), BackendId::MJPEG);

    let mut image = Image::default();
    assert!(capture.grab_frame());
    assert!(capture.retrieve_frame(0, &mut image));
    assert_eq!(image.as_slice(), &[5, 6, 3, 4, 1, 2]);
    assert!(!capture.retrieve_frame(1, &mut image));
    assert!(image.is_empty());

    drop(capture);
    assert_eq!(released.load(Ordering::SeqCst), 1);
}

#[test]
fn closed_handles_are_discarded() {
    let registry = default_registry();
    let capture = registry.open_capture(
        BackendId::MJPEG,
        &Locator::from("clip.mkv"),
        &CaptureParameters::new(),
    );
    assert!(capture.is_none());
}

#[test]
fn unsupported_requests_return_none() {
    let registry = default_registry();
    let params = CaptureParameters::new();

    // not registered
    assert!(registry
        .open_capture(BackendId::FFMPEG, &Locator::Device(0), &params)
        .is_none());
    // registered, but only for cameras
    assert!(registry
        .open_capture(BackendId::V4L2, &Locator::from("clip.avi"), &params)
        .is_none());
    // registered, but only for files
    assert!(registry
        .open_capture(BackendId::MJPEG, &Locator::Device(1), &params)
        .is_none());
    // no writer entry point
    assert!(registry
        .open_writer(
            BackendId::V4L2,
            "out.avi",
            &WriterConfig::default(),
            &WriterParameters::new()
        )
        .is_none());
}

#[test]
fn missing_required_parameter_fails_open() {
    let registry = default_registry();

    let params = CaptureParameters::new();
    assert!(registry
        .open_capture(BackendId::GSTREAMER, &Locator::Device(0), &params)
        .is_none());

    let params = CaptureParameters::from_pairs(&[(REQUIRED_SERIAL, 1)]);
    let mut capture = registry
        .open_capture(BackendId::GSTREAMER, &Locator::Device(0), &params)
        .expect("serial supplied");
    assert!(params.unused().is_empty());

    let mut image = Image::default();
    assert!(capture.read(&mut image));
    assert!(!capture.read(&mut image));
}

#[test]
fn open_legacy_writer() {
    let written = Arc::new(Mutex::new(Vec::new()));
    let registry = registry(Arc::new(AtomicUsize::new(0)), written.clone());

    let config = WriterConfig {
        size: ImageSize {
            width: 2,
            height: 1,
        },
        ..Default::default()
    };
    let params = WriterParameters::from_pairs(&[(WriterParameters::QUALITY, 90)]);
    let mut writer = registry
        .open_writer(BackendId::MJPEG, "out.avi", &config, &params)
        .expect("legacy writer opens");
    assert_eq!(params.unused(), vec![WriterParameters::QUALITY]);

    assert!(writer.is_opened());
    assert!(!writer.set_property(WriterParameters::QUALITY, 50.0));
    assert_eq!(writer.backend_id(), BackendId::MJPEG);

    let image = Image::new(config.size, 3, PixelDepth::U8, vec![9; 6]).expect("valid image");
    assert!(writer.write(&image));
    assert!(writer.write(&image));

    let written = written.lock().unwrap();
    assert_eq!(written.len(), 2);
    assert_eq!(written[1].as_slice(), &[9; 6]);
    assert_eq!(written[1].origin(), RasterOrigin::TopLeft);
}

#[test]
fn grab_each_over_registry_handles() {
    let registry = default_registry();
    let mut captures = [1, 3]
        .into_iter()
        .filter_map(|count| {
            let params = CaptureParameters::from_pairs(&[(FRAME_COUNT, count)]);
            registry.open_capture(BackendId::V4L2, &Locator::Device(0), &params)
        })
        .collect::<Vec<_>>();
    assert_eq!(captures.len(), 2);

    assert_eq!(grab_each(&mut captures), vec![0, 1]);
    assert_eq!(grab_each(&mut captures), vec![1]);

    let mut image = Image::default();
    assert!(!captures[0].retrieve_frame(0, &mut image));
    assert!(captures[1].retrieve_frame(0, &mut image));
    assert!(image.as_slice().iter().all(|&v| v == 1));
}
