use std::cell::Cell;
use std::ops::{Deref, DerefMut};

use crate::backend::VideoAccelerationType;
use crate::error::VideoIoError;

/// Decode a raw integer parameter value into a typed value.
///
/// Numeric types use a plain `as` cast. `bool` is `true` for any nonzero value.
pub trait ParameterValue: Sized {
    /// Decode the raw value.
    fn decode(raw: i32) -> Self;
}

macro_rules! impl_numeric_parameter_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl ParameterValue for $t {
                #[inline]
                fn decode(raw: i32) -> Self {
                    raw as $t
                }
            }
        )*
    };
}

impl_numeric_parameter_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl ParameterValue for bool {
    #[inline]
    fn decode(raw: i32) -> Self {
        raw != 0
    }
}

/// A single key-value entry of a [`ParameterSet`].
///
/// Equality compares the key and value only; whether the entry was read is
/// bookkeeping and does not take part.
#[derive(Clone, Debug)]
pub struct Parameter {
    key: i32,
    value: i32,
    consumed: Cell<bool>,
}

impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.value == other.value
    }
}

impl Eq for Parameter {}

impl Parameter {
    fn new(key: i32, value: i32) -> Self {
        Self {
            key,
            value,
            consumed: Cell::new(false),
        }
    }

    /// The parameter key.
    #[inline]
    pub fn key(&self) -> i32 {
        self.key
    }

    /// The raw parameter value.
    #[inline]
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Whether a lookup has read this parameter.
    #[inline]
    pub fn is_consumed(&self) -> bool {
        self.consumed.get()
    }
}

/// An ordered list of integer key-value parameters handed to a backend on open.
///
/// Insertion order is preserved and duplicate keys are allowed; lookups resolve
/// to the first entry with a matching key. Every successful lookup marks the
/// entry as consumed so that options the backend never read can be reported
/// with [`ParameterSet::warn_unused_parameters`].
///
/// The consumed flags are updated through `&self`, so a set is meant to be
/// read by one thread while a backend is being constructed and then dropped.
/// It is not `Sync`.
///
/// # Examples
///
/// ```
/// use kornia_videoio::ParameterSet;
///
/// let params = ParameterSet::from_flat(&[1, 640, 2, 0]).unwrap();
///
/// assert_eq!(params.get::<u32>(1).unwrap(), 640);
/// assert!(!params.get_or::<bool>(2, true));
/// assert!(params.unused().is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParameterSet {
    params: Vec<Parameter>,
}

impl ParameterSet {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parameter set from interleaved `key, value` integers.
    ///
    /// # Errors
    ///
    /// Returns [`VideoIoError::OddParameterCount`] if `flat` has an odd length.
    pub fn from_flat(flat: &[i32]) -> Result<Self, VideoIoError> {
        if flat.len() % 2 != 0 {
            return Err(VideoIoError::OddParameterCount(flat.len()));
        }

        let mut set = Self {
            params: Vec::with_capacity(flat.len() / 2),
        };
        for pair in flat.chunks_exact(2) {
            set.add(pair[0], pair[1]);
        }

        Ok(set)
    }

    /// Create a parameter set from `(key, value)` pairs.
    pub fn from_pairs(pairs: &[(i32, i32)]) -> Self {
        pairs.iter().copied().collect()
    }

    /// Append a parameter. Existing entries with the same key are kept.
    pub fn add(&mut self, key: i32, value: i32) {
        self.params.push(Parameter::new(key, value));
    }

    /// Whether any parameter uses `key`.
    pub fn has(&self, key: i32) -> bool {
        self.find(key).is_some()
    }

    /// Look up `key` and decode its value.
    ///
    /// # Errors
    ///
    /// Returns [`VideoIoError::MissingParameter`] if no parameter uses `key`.
    pub fn get<T: ParameterValue>(&self, key: i32) -> Result<T, VideoIoError> {
        self.consume(key).ok_or(VideoIoError::MissingParameter(key))
    }

    /// Look up `key` and decode its value, falling back to `default`.
    pub fn get_or<T: ParameterValue>(&self, key: i32, default: T) -> T {
        self.consume(key).unwrap_or(default)
    }

    /// Keys of the parameters no lookup has read, in insertion order.
    pub fn unused(&self) -> Vec<i32> {
        self.params
            .iter()
            .filter(|p| !p.is_consumed())
            .map(|p| p.key)
            .collect()
    }

    /// The parameters as interleaved `key, value` integers in insertion order.
    pub fn int_vector(&self) -> Vec<i32> {
        self.params.iter().flat_map(|p| [p.key, p.value]).collect()
    }

    /// Iterate over the parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter()
    }

    /// Number of parameters, duplicates included.
    #[inline]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether the set holds no parameters.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Log every parameter no lookup has read.
    ///
    /// Emits one `info` record per unused parameter with its value in decimal
    /// and hexadecimal. Returns whether any unused parameter was found.
    pub fn warn_unused_parameters(&self) -> bool {
        let mut found = false;
        for param in self.params.iter().filter(|p| !p.is_consumed()) {
            found = true;
            let value = param.value as i64;
            log::info!(
                "VIDEOIO: unused parameter: [{}]={} / 0x{:016x}",
                param.key,
                value,
                value
            );
        }
        found
    }

    fn find(&self, key: i32) -> Option<&Parameter> {
        self.params.iter().find(|p| p.key == key)
    }

    fn consume<T: ParameterValue>(&self, key: i32) -> Option<T> {
        self.find(key).map(|param| {
            param.consumed.set(true);
            T::decode(param.value)
        })
    }
}

impl FromIterator<(i32, i32)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (i32, i32)>>(iter: I) -> Self {
        let mut set = ParameterSet::new();
        for (key, value) in iter {
            set.add(key, value);
        }
        set
    }
}

macro_rules! parameter_set_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq)]
        pub struct $name(pub ParameterSet);

        impl $name {
            /// Create an empty parameter set.
            pub fn new() -> Self {
                Self::default()
            }

            /// Create a parameter set from interleaved `key, value` integers.
            ///
            /// # Errors
            ///
            /// Returns [`VideoIoError::OddParameterCount`] if `flat` has an odd length.
            pub fn from_flat(flat: &[i32]) -> Result<Self, VideoIoError> {
                ParameterSet::from_flat(flat).map(Self)
            }

            /// Create a parameter set from `(key, value)` pairs.
            pub fn from_pairs(pairs: &[(i32, i32)]) -> Self {
                Self(ParameterSet::from_pairs(pairs))
            }
        }

        impl From<ParameterSet> for $name {
            fn from(params: ParameterSet) -> Self {
                Self(params)
            }
        }

        impl Deref for $name {
            type Target = ParameterSet;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }
    };
}

parameter_set_newtype!(
    /// Parameters handed to a capture backend on open.
    CaptureParameters
);

parameter_set_newtype!(
    /// Parameters handed to a writer backend on open.
    WriterParameters
);

impl CaptureParameters {
    /// Requested hardware acceleration, a [`VideoAccelerationType`] value.
    pub const HW_ACCELERATION: i32 = 50;
    /// Index of the hardware device used for acceleration, `-1` for the default.
    pub const HW_DEVICE: i32 = 51;
    /// Timeout for opening the stream, in milliseconds.
    pub const OPEN_TIMEOUT_MSEC: i32 = 53;
    /// Timeout for reading a frame, in milliseconds.
    pub const READ_TIMEOUT_MSEC: i32 = 54;

    /// The requested acceleration type, [`VideoAccelerationType::None`] when unset.
    pub fn acceleration(&self) -> VideoAccelerationType {
        self.get_or(Self::HW_ACCELERATION, VideoAccelerationType::None)
    }

    /// The requested acceleration device, `-1` when unset.
    pub fn acceleration_device(&self) -> i32 {
        self.get_or(Self::HW_DEVICE, -1)
    }
}

impl WriterParameters {
    /// Encoding quality, backend-specific scale.
    pub const QUALITY: i32 = 1;
    /// Whether frames are color (nonzero) or grayscale (zero).
    pub const IS_COLOR: i32 = 4;
    /// Requested hardware acceleration, a [`VideoAccelerationType`] value.
    pub const HW_ACCELERATION: i32 = 6;
    /// Index of the hardware device used for acceleration, `-1` for the default.
    pub const HW_DEVICE: i32 = 7;

    /// Whether the writer expects color frames, `true` when unset.
    pub fn is_color(&self) -> bool {
        self.get_or(Self::IS_COLOR, true)
    }

    /// The requested acceleration type, [`VideoAccelerationType::None`] when unset.
    pub fn acceleration(&self) -> VideoAccelerationType {
        self.get_or(Self::HW_ACCELERATION, VideoAccelerationType::None)
    }

    /// The requested acceleration device, `-1` when unset.
    pub fn acceleration_device(&self) -> i32 {
        self.get_or(Self::HW_DEVICE, -1)
    }
}
