//! Standard EXIF tag definitions.
//!
//! Tables of the tags defined by TIFF 6.0 and EXIF 2.32 for each IFD of the
//! standard tree. The thumbnail IFD (IFD1) shares the root table.

use crate::format::tiff::FieldType;

use super::paths::{TAG_EXIF_IFD_POINTER, TAG_GPS_IFD_POINTER, TAG_INTEROP_IFD_POINTER};

/// A tag as defined by the standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardTag {
    pub ifd_path: &'static str,
    pub id: u16,
    pub name: &'static str,
    pub types: &'static [FieldType],
}

const fn tag(
    ifd_path: &'static str,
    id: u16,
    name: &'static str,
    types: &'static [FieldType],
) -> StandardTag {
    StandardTag {
        ifd_path,
        id,
        name,
        types,
    }
}

const BYTE: &[FieldType] = &[FieldType::Byte];
const ASCII: &[FieldType] = &[FieldType::Ascii];
const SHORT: &[FieldType] = &[FieldType::Short];
const LONG: &[FieldType] = &[FieldType::Long];
const SHORT_OR_LONG: &[FieldType] = &[FieldType::Short, FieldType::Long];
const RATIONAL: &[FieldType] = &[FieldType::Rational];
const SRATIONAL: &[FieldType] = &[FieldType::SRational];
const UNDEFINED: &[FieldType] = &[FieldType::Undefined];

const IFD: &str = "IFD";
const EXIF: &str = "IFD/Exif";
const GPS: &str = "IFD/GPS";
const IOP: &str = "IFD/Exif/Iop";

/// Every standard tag, grouped by IFD.
pub static STANDARD_TAGS: &[StandardTag] = &[
    // -------------------------------------------------------------------------
    // Root IFD (IFD0) and thumbnail IFD (IFD1)
    // -------------------------------------------------------------------------
    tag(IFD, 0x000B, "ProcessingSoftware", ASCII),
    tag(IFD, 0x00FE, "NewSubfileType", LONG),
    tag(IFD, 0x00FF, "SubfileType", SHORT),
    tag(IFD, 0x0100, "ImageWidth", SHORT_OR_LONG),
    tag(IFD, 0x0101, "ImageLength", SHORT_OR_LONG),
    tag(IFD, 0x0102, "BitsPerSample", SHORT),
    tag(IFD, 0x0103, "Compression", SHORT),
    tag(IFD, 0x0106, "PhotometricInterpretation", SHORT),
    tag(IFD, 0x010D, "DocumentName", ASCII),
    tag(IFD, 0x010E, "ImageDescription", ASCII),
    tag(IFD, 0x010F, "Make", ASCII),
    tag(IFD, 0x0110, "Model", ASCII),
    tag(IFD, 0x0111, "StripOffsets", SHORT_OR_LONG),
    tag(IFD, 0x0112, "Orientation", SHORT),
    tag(IFD, 0x0115, "SamplesPerPixel", SHORT),
    tag(IFD, 0x0116, "RowsPerStrip", SHORT_OR_LONG),
    tag(IFD, 0x0117, "StripByteCounts", SHORT_OR_LONG),
    tag(IFD, 0x011A, "XResolution", RATIONAL),
    tag(IFD, 0x011B, "YResolution", RATIONAL),
    tag(IFD, 0x011C, "PlanarConfiguration", SHORT),
    tag(IFD, 0x0128, "ResolutionUnit", SHORT),
    tag(IFD, 0x012D, "TransferFunction", SHORT),
    tag(IFD, 0x0131, "Software", ASCII),
    tag(IFD, 0x0132, "DateTime", ASCII),
    tag(IFD, 0x013B, "Artist", ASCII),
    tag(IFD, 0x013C, "HostComputer", ASCII),
    tag(IFD, 0x013E, "WhitePoint", RATIONAL),
    tag(IFD, 0x013F, "PrimaryChromaticities", RATIONAL),
    tag(IFD, 0x0201, "JPEGInterchangeFormat", LONG),
    tag(IFD, 0x0202, "JPEGInterchangeFormatLength", LONG),
    tag(IFD, 0x0211, "YCbCrCoefficients", RATIONAL),
    tag(IFD, 0x0212, "YCbCrSubSampling", SHORT),
    tag(IFD, 0x0213, "YCbCrPositioning", SHORT),
    tag(IFD, 0x0214, "ReferenceBlackWhite", RATIONAL),
    tag(IFD, 0x02BC, "XMLPacket", BYTE),
    tag(IFD, 0x4746, "Rating", SHORT),
    tag(IFD, 0x4749, "RatingPercent", SHORT),
    tag(IFD, 0x8298, "Copyright", ASCII),
    tag(IFD, TAG_EXIF_IFD_POINTER, "ExifTag", LONG),
    tag(IFD, TAG_GPS_IFD_POINTER, "GPSTag", LONG),
    tag(IFD, 0x9C9B, "XPTitle", BYTE),
    tag(IFD, 0x9C9C, "XPComment", BYTE),
    tag(IFD, 0x9C9D, "XPAuthor", BYTE),
    tag(IFD, 0x9C9E, "XPKeywords", BYTE),
    tag(IFD, 0x9C9F, "XPSubject", BYTE),
    // -------------------------------------------------------------------------
    // Exif sub-IFD
    // -------------------------------------------------------------------------
    tag(EXIF, 0x829A, "ExposureTime", RATIONAL),
    tag(EXIF, 0x829D, "FNumber", RATIONAL),
    tag(EXIF, 0x8822, "ExposureProgram", SHORT),
    tag(EXIF, 0x8824, "SpectralSensitivity", ASCII),
    tag(EXIF, 0x8827, "ISOSpeedRatings", SHORT),
    tag(EXIF, 0x8828, "OECF", UNDEFINED),
    tag(EXIF, 0x8830, "SensitivityType", SHORT),
    tag(EXIF, 0x8831, "StandardOutputSensitivity", LONG),
    tag(EXIF, 0x8832, "RecommendedExposureIndex", LONG),
    tag(EXIF, 0x8833, "ISOSpeed", LONG),
    tag(EXIF, 0x9000, "ExifVersion", UNDEFINED),
    tag(EXIF, 0x9003, "DateTimeOriginal", ASCII),
    tag(EXIF, 0x9004, "DateTimeDigitized", ASCII),
    tag(EXIF, 0x9010, "OffsetTime", ASCII),
    tag(EXIF, 0x9011, "OffsetTimeOriginal", ASCII),
    tag(EXIF, 0x9012, "OffsetTimeDigitized", ASCII),
    tag(EXIF, 0x9101, "ComponentsConfiguration", UNDEFINED),
    tag(EXIF, 0x9102, "CompressedBitsPerPixel", RATIONAL),
    tag(EXIF, 0x9201, "ShutterSpeedValue", SRATIONAL),
    tag(EXIF, 0x9202, "ApertureValue", RATIONAL),
    tag(EXIF, 0x9203, "BrightnessValue", SRATIONAL),
    tag(EXIF, 0x9204, "ExposureBiasValue", SRATIONAL),
    tag(EXIF, 0x9205, "MaxApertureValue", RATIONAL),
    tag(EXIF, 0x9206, "SubjectDistance", RATIONAL),
    tag(EXIF, 0x9207, "MeteringMode", SHORT),
    tag(EXIF, 0x9208, "LightSource", SHORT),
    tag(EXIF, 0x9209, "Flash", SHORT),
    tag(EXIF, 0x920A, "FocalLength", RATIONAL),
    tag(EXIF, 0x9214, "SubjectArea", SHORT),
    tag(EXIF, 0x927C, "MakerNote", UNDEFINED),
    tag(EXIF, 0x9286, "UserComment", UNDEFINED),
    tag(EXIF, 0x9290, "SubSecTime", ASCII),
    tag(EXIF, 0x9291, "SubSecTimeOriginal", ASCII),
    tag(EXIF, 0x9292, "SubSecTimeDigitized", ASCII),
    tag(EXIF, 0xA000, "FlashpixVersion", UNDEFINED),
    tag(EXIF, 0xA001, "ColorSpace", SHORT),
    tag(EXIF, 0xA002, "PixelXDimension", SHORT_OR_LONG),
    tag(EXIF, 0xA003, "PixelYDimension", SHORT_OR_LONG),
    tag(EXIF, 0xA004, "RelatedSoundFile", ASCII),
    tag(EXIF, TAG_INTEROP_IFD_POINTER, "InteroperabilityTag", LONG),
    tag(EXIF, 0xA20B, "FlashEnergy", RATIONAL),
    tag(EXIF, 0xA20E, "FocalPlaneXResolution", RATIONAL),
    tag(EXIF, 0xA20F, "FocalPlaneYResolution", RATIONAL),
    tag(EXIF, 0xA210, "FocalPlaneResolutionUnit", SHORT),
    tag(EXIF, 0xA214, "SubjectLocation", SHORT),
    tag(EXIF, 0xA215, "ExposureIndex", RATIONAL),
    tag(EXIF, 0xA217, "SensingMethod", SHORT),
    tag(EXIF, 0xA300, "FileSource", UNDEFINED),
    tag(EXIF, 0xA301, "SceneType", UNDEFINED),
    tag(EXIF, 0xA302, "CFAPattern", UNDEFINED),
    tag(EXIF, 0xA401, "CustomRendered", SHORT),
    tag(EXIF, 0xA402, "ExposureMode", SHORT),
    tag(EXIF, 0xA403, "WhiteBalance", SHORT),
    tag(EXIF, 0xA404, "DigitalZoomRatio", RATIONAL),
    tag(EXIF, 0xA405, "FocalLengthIn35mmFilm", SHORT),
    tag(EXIF, 0xA406, "SceneCaptureType", SHORT),
    tag(EXIF, 0xA407, "GainControl", SHORT),
    tag(EXIF, 0xA408, "Contrast", SHORT),
    tag(EXIF, 0xA409, "Saturation", SHORT),
    tag(EXIF, 0xA40A, "Sharpness", SHORT),
    tag(EXIF, 0xA40B, "DeviceSettingDescription", UNDEFINED),
    tag(EXIF, 0xA40C, "SubjectDistanceRange", SHORT),
    tag(EXIF, 0xA420, "ImageUniqueID", ASCII),
    tag(EXIF, 0xA430, "CameraOwnerName", ASCII),
    tag(EXIF, 0xA431, "BodySerialNumber", ASCII),
    tag(EXIF, 0xA432, "LensSpecification", RATIONAL),
    tag(EXIF, 0xA433, "LensMake", ASCII),
    tag(EXIF, 0xA434, "LensModel", ASCII),
    tag(EXIF, 0xA435, "LensSerialNumber", ASCII),
    tag(EXIF, 0xA500, "Gamma", RATIONAL),
    // -------------------------------------------------------------------------
    // GPS sub-IFD
    // -------------------------------------------------------------------------
    tag(GPS, 0x0000, "GPSVersionID", BYTE),
    tag(GPS, 0x0001, "GPSLatitudeRef", ASCII),
    tag(GPS, 0x0002, "GPSLatitude", RATIONAL),
    tag(GPS, 0x0003, "GPSLongitudeRef", ASCII),
    tag(GPS, 0x0004, "GPSLongitude", RATIONAL),
    tag(GPS, 0x0005, "GPSAltitudeRef", BYTE),
    tag(GPS, 0x0006, "GPSAltitude", RATIONAL),
    tag(GPS, 0x0007, "GPSTimeStamp", RATIONAL),
    tag(GPS, 0x0008, "GPSSatellites", ASCII),
    tag(GPS, 0x0009, "GPSStatus", ASCII),
    tag(GPS, 0x000A, "GPSMeasureMode", ASCII),
    tag(GPS, 0x000B, "GPSDOP", RATIONAL),
    tag(GPS, 0x000C, "GPSSpeedRef", ASCII),
    tag(GPS, 0x000D, "GPSSpeed", RATIONAL),
    tag(GPS, 0x000E, "GPSTrackRef", ASCII),
    tag(GPS, 0x000F, "GPSTrack", RATIONAL),
    tag(GPS, 0x0010, "GPSImgDirectionRef", ASCII),
    tag(GPS, 0x0011, "GPSImgDirection", RATIONAL),
    tag(GPS, 0x0012, "GPSMapDatum", ASCII),
    tag(GPS, 0x0013, "GPSDestLatitudeRef", ASCII),
    tag(GPS, 0x0014, "GPSDestLatitude", RATIONAL),
    tag(GPS, 0x0015, "GPSDestLongitudeRef", ASCII),
    tag(GPS, 0x0016, "GPSDestLongitude", RATIONAL),
    tag(GPS, 0x0017, "GPSDestBearingRef", ASCII),
    tag(GPS, 0x0018, "GPSDestBearing", RATIONAL),
    tag(GPS, 0x0019, "GPSDestDistanceRef", ASCII),
    tag(GPS, 0x001A, "GPSDestDistance", RATIONAL),
    tag(GPS, 0x001B, "GPSProcessingMethod", UNDEFINED),
    tag(GPS, 0x001C, "GPSAreaInformation", UNDEFINED),
    tag(GPS, 0x001D, "GPSDateStamp", ASCII),
    tag(GPS, 0x001E, "GPSDifferential", SHORT),
    tag(GPS, 0x001F, "GPSHPositioningError", RATIONAL),
    // -------------------------------------------------------------------------
    // Interoperability sub-IFD
    // -------------------------------------------------------------------------
    tag(IOP, 0x0001, "InteroperabilityIndex", ASCII),
    tag(IOP, 0x0002, "InteroperabilityVersion", UNDEFINED),
    tag(IOP, 0x1000, "RelatedImageFileFormat", ASCII),
    tag(IOP, 0x1001, "RelatedImageWidth", SHORT_OR_LONG),
    tag(IOP, 0x1002, "RelatedImageLength", SHORT_OR_LONG),
];
