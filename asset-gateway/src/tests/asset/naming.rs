use crate::core::asset::naming::object_key;
use crate::core::asset::{AssetError, ImageExtension};
use assert_matches::assert_matches;
use rstest::rstest;

#[rstest]
#[case(None, ImageExtension::Jpg)]
#[case(Some("photo.PNG"), ImageExtension::Png)]
#[case(Some("photo.jpeg"), ImageExtension::Jpeg)]
#[case(Some("archive.v2.gif"), ImageExtension::Gif)]
#[case(Some("no-extension"), ImageExtension::Jpg)]
#[case(Some("trailing-dot."), ImageExtension::Jpg)]
#[case(Some("photo. "), ImageExtension::Jpg)]
#[case(Some("photo.\t"), ImageExtension::Jpg)]
#[case(Some(""), ImageExtension::Jpg)]
#[case(Some("dir.v2/picture"), ImageExtension::Jpg)]
#[case(Some("C:\\Users\\me\\cat.Gif"), ImageExtension::Gif)]
fn extension_is_derived_from_the_file_name(#[case] filename: Option<&str>, #[case] expected: ImageExtension) {
    assert_eq!(ImageExtension::from_filename(filename).unwrap(), expected);
}

#[rstest]
#[case(Some("scan.pdf"), ".pdf")]
#[case(Some("photo.JPG.bmp"), ".bmp")]
fn unknown_extensions_are_rejected(#[case] filename: Option<&str>, #[case] rejected: &str) {
    assert_matches!(
        ImageExtension::from_filename(filename),
        Err(AssetError::UnsupportedExtension(extension)) if extension == rejected
    );
}

#[rstest]
#[case(ImageExtension::Jpg, "image/jpeg")]
#[case(ImageExtension::Jpeg, "image/jpeg")]
#[case(ImageExtension::Png, "image/png")]
#[case(ImageExtension::Gif, "image/gif")]
fn content_type_follows_the_extension(#[case] extension: ImageExtension, #[case] content_type: &str) {
    assert_eq!(extension.content_type(), content_type);
}

#[rstest]
#[case("png", ImageExtension::Png)]
#[case(".PNG", ImageExtension::Png)]
#[case(" .jpeg ", ImageExtension::Jpeg)]
fn extensions_parse_with_or_without_the_dot(#[case] raw: &str, #[case] expected: ImageExtension) {
    assert_eq!(raw.parse::<ImageExtension>().unwrap(), expected);
}

#[test]
fn object_keys_follow_the_item_naming_convention() {
    assert_eq!(object_key(42, ImageExtension::Png), "item-42.png");
    assert_eq!(object_key(0, ImageExtension::Jpeg), "item-0.jpeg");
}

#[test]
fn default_probe_order_is_jpg_jpeg_png_gif() {
    let order: Vec<&str> = ImageExtension::ALL.iter().map(ImageExtension::as_str).collect();
    assert_eq!(order, vec![".jpg", ".jpeg", ".png", ".gif"]);
}
