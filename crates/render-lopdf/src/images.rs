use crate::assets::{EmbeddableImage, ImageEncoding, JpegColor};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

/// Adds `image` to `doc` as an image XObject, with a soft mask when it
/// carries alpha.
pub(crate) fn embed_image(doc: &mut Document, image: &EmbeddableImage) -> ObjectId {
    let width = image.width as i64;
    let height = image.height as i64;
    match &image.encoding {
        ImageEncoding::Jpeg { data, color } => {
            let color_space = match color {
                JpegColor::Gray => "DeviceGray",
                JpegColor::Rgb => "DeviceRGB",
                JpegColor::Cmyk { .. } => "DeviceCMYK",
            };
            let mut dict = dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width,
                "Height" => height,
                "ColorSpace" => color_space,
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            };
            if let JpegColor::Cmyk { inverted: true } = color {
                let decode: Vec<Object> = [1, 0, 1, 0, 1, 0, 1, 0].into_iter().map(Object::from).collect();
                dict.set("Decode", decode);
            }
            doc.add_object(Stream::new(dict, data.clone()))
        }
        ImageEncoding::Raster { rgb, alpha } => {
            let mut dict = dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width,
                "Height" => height,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "FlateDecode",
            };
            if let Some(alpha) = alpha {
                let mask = dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => width,
                    "Height" => height,
                    "ColorSpace" => "DeviceGray",
                    "BitsPerComponent" => 8,
                    "Filter" => "FlateDecode",
                };
                let mask_id = doc.add_object(Stream::new(mask, alpha.clone()));
                dict.set("SMask", mask_id);
            }
            doc.add_object(Stream::new(dict, rgb.clone()))
        }
    }
}
