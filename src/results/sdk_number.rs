//! Android SDK numbering scheme.

use semver::{Identifier, Version};
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Android SDK number representation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SdkNumber {
    /// API version 1.
    Api1,
    /// API version 2.
    Api2,
    /// API version 3.
    Api3,
    /// API version 4.
    Api4,
    /// API version 5.
    Api5,
    /// API version 6.
    Api6,
    /// API version 7.
    Api7,
    /// API version 8.
    Api8,
    /// API version 9.
    Api9,
    /// API version 10.
    Api10,
    /// API version 11.
    Api11,
    /// API version 12.
    Api12,
    /// API version 13.
    Api13,
    /// API version 14.
    Api14,
    /// API version 15.
    Api15,
    /// API version 16.
    Api16,
    /// API version 17.
    Api17,
    /// API version 18.
    Api18,
    /// API version 19.
    Api19,
    /// API version 20.
    Api20,
    /// API version 21.
    Api21,
    /// API version 22.
    Api22,
    /// API version 23.
    Api23,
    /// API version 24.
    Api24,
    /// API version 25.
    Api25,
    /// API version 26.
    Api26,
    /// API version 27.
    Api27,
    /// API version 28.
    Api28,

    /// Development API version.
    Development,
    /// Unknown API version.
    Unknown(u32),
}

/// Known API levels, in order.
const KNOWN: [SdkNumber; 28] = [
    SdkNumber::Api1,
    SdkNumber::Api2,
    SdkNumber::Api3,
    SdkNumber::Api4,
    SdkNumber::Api5,
    SdkNumber::Api6,
    SdkNumber::Api7,
    SdkNumber::Api8,
    SdkNumber::Api9,
    SdkNumber::Api10,
    SdkNumber::Api11,
    SdkNumber::Api12,
    SdkNumber::Api13,
    SdkNumber::Api14,
    SdkNumber::Api15,
    SdkNumber::Api16,
    SdkNumber::Api17,
    SdkNumber::Api18,
    SdkNumber::Api19,
    SdkNumber::Api20,
    SdkNumber::Api21,
    SdkNumber::Api22,
    SdkNumber::Api23,
    SdkNumber::Api24,
    SdkNumber::Api25,
    SdkNumber::Api26,
    SdkNumber::Api27,
    SdkNumber::Api28,
];

fn release(major: u64, minor: u64, patch: u64) -> Option<Version> {
    Some(Version {
        major,
        minor,
        patch,
        pre: vec![],
        build: vec![],
    })
}

/// Main implementation of the SDK numbers.
///
/// As per: <https://developer.android.com/reference/android/os/Build.VERSION_CODES.html>
impl SdkNumber {
    /// Gets the SDK API version number.
    pub fn number(self) -> u32 {
        match self {
            SdkNumber::Development => 10_000,
            SdkNumber::Unknown(v) => v,
            known => KNOWN
                .iter()
                .position(|&sdk| sdk == known)
                .map_or(0, |i| i as u32 + 1),
        }
    }

    /// Gets the Android version number.
    pub fn version(self) -> Option<Version> {
        match self {
            SdkNumber::Api1 => release(1, 0, 0),
            SdkNumber::Api2 => release(1, 1, 0),
            SdkNumber::Api3 => release(1, 5, 0),
            SdkNumber::Api4 => release(1, 6, 0),
            SdkNumber::Api5 => release(2, 0, 0),
            SdkNumber::Api6 => release(2, 0, 1),
            SdkNumber::Api7 => release(2, 1, 0),
            SdkNumber::Api8 => release(2, 2, 0),
            SdkNumber::Api9 => release(2, 3, 0),
            SdkNumber::Api10 => release(2, 3, 3),
            SdkNumber::Api11 => release(3, 0, 0),
            SdkNumber::Api12 => release(3, 1, 0),
            SdkNumber::Api13 => release(3, 2, 0),
            SdkNumber::Api14 => release(4, 0, 0),
            SdkNumber::Api15 => release(4, 0, 3),
            SdkNumber::Api16 => release(4, 1, 0),
            SdkNumber::Api17 => release(4, 2, 0),
            SdkNumber::Api18 => release(4, 3, 0),
            SdkNumber::Api19 => release(4, 4, 0),
            SdkNumber::Api20 => Some(Version {
                major: 4,
                minor: 4,
                patch: 0,
                pre: vec![],
                build: vec![Identifier::AlphaNumeric("W".to_owned())],
            }),
            SdkNumber::Api21 => release(5, 0, 0),
            SdkNumber::Api22 => release(5, 1, 0),
            SdkNumber::Api23 => release(6, 0, 0),
            SdkNumber::Api24 => release(7, 0, 0),
            SdkNumber::Api25 => release(7, 1, 0),
            SdkNumber::Api26 => release(8, 0, 0),
            SdkNumber::Api27 => release(8, 1, 0),
            SdkNumber::Api28 => release(9, 0, 0),

            SdkNumber::Development | SdkNumber::Unknown(_) => None,
        }
    }

    /// Gets the name of the Android release.
    pub fn name(self) -> &'static str {
        match self {
            SdkNumber::Api1 | SdkNumber::Api2 => "Base",
            SdkNumber::Api3 => "Cupcake",
            SdkNumber::Api4 => "Donut",
            SdkNumber::Api5 | SdkNumber::Api6 => "Eclair",
            SdkNumber::Api7 => "Eclair MR1",
            SdkNumber::Api8 => "Froyo",
            SdkNumber::Api9 => "Gingerbread",
            SdkNumber::Api10 => "Gingerbread MR1",
            SdkNumber::Api11 => "Honeycomb",
            SdkNumber::Api12 => "Honeycomb MR1",
            SdkNumber::Api13 => "Honeycomb MR2",
            SdkNumber::Api14 => "Ice Cream Sandwich",
            SdkNumber::Api15 => "Ice Cream Sandwich MR1",
            SdkNumber::Api16 => "Jelly Bean",
            SdkNumber::Api17 => "Jelly Bean MR1",
            SdkNumber::Api18 => "Jelly Bean MR2",
            SdkNumber::Api19 => "KitKat",
            SdkNumber::Api20 => "KitKat Watch",
            SdkNumber::Api21 => "Lollipop",
            SdkNumber::Api22 => "Lollipop MR1",
            SdkNumber::Api23 => "Marshmallow",
            SdkNumber::Api24 => "Nougat",
            SdkNumber::Api25 => "Nougat MR1",
            SdkNumber::Api26 => "Oreo",
            SdkNumber::Api27 => "Oreo MR1",
            SdkNumber::Api28 => "Pie",

            SdkNumber::Development => "Development",
            SdkNumber::Unknown(_) => "Unknown",
        }
    }

    /// Gets the official Android version string, if the API level has been released.
    pub fn pretty_version(self) -> Option<String> {
        self.version().map(|version| prettify_android_version(&version))
    }

    /// Checks if the API level shipped on phones and tablets.
    ///
    /// API 20 was only released for wearables.
    pub fn is_handset_release(self) -> bool {
        self != SdkNumber::Api20 && self.version().is_some()
    }
}

impl Serialize for SdkNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut ser_struct = serializer.serialize_struct("SdkNumber", 3)?;
        ser_struct.serialize_field("api", &self.number())?;
        ser_struct.serialize_field("name", self.name())?;
        ser_struct.serialize_field("version", &self.pretty_version())?;
        ser_struct.end()
    }
}

impl From<u32> for SdkNumber {
    fn from(version: u32) -> Self {
        match version {
            1..=28 => KNOWN[version as usize - 1],
            10_000 => SdkNumber::Development,
            t => SdkNumber::Unknown(t),
        }
    }
}

/// Prettifies the android version number so that it's shown as the official version.
pub fn prettify_android_version(version: &Version) -> String {
    format!(
        "{}.{}{}{}",
        version.major,
        version.minor,
        if version.patch == 0 {
            String::new()
        } else {
            format!(".{}", version.patch)
        },
        if let Some(b) = version.build.get(0) {
            format!("{}", b)
        } else {
            String::new()
        }
    )
}
