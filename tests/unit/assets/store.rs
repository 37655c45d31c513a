use std::io::Cursor;

use super::*;

fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn normalize_rel_path_cleans_separators_and_dots() {
    assert_eq!(normalize_rel_path("a/./b//c.png").unwrap(), "a/b/c.png");
    assert_eq!(normalize_rel_path("a\\b\\c.png").unwrap(), "a/b/c.png");
}

#[test]
fn normalize_rel_path_rejects_escapes() {
    assert!(normalize_rel_path("/abs/path.png").is_err());
    assert!(normalize_rel_path("a/../b.png").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn path_keys_normalize_and_inline_keys_hash_content() {
    let a = ImageRef::Path("a/./b.png".to_string());
    let b = ImageRef::Path("a/b.png".to_string());
    assert_eq!(a.key().unwrap(), b.key().unwrap());

    let x = ImageRef::Inline(vec![1, 2, 3]);
    let y = ImageRef::Inline(vec![1, 2, 3]);
    let z = ImageRef::Inline(vec![1, 2, 4]);
    assert_eq!(x.key().unwrap(), y.key().unwrap());
    assert_ne!(x.key().unwrap(), z.key().unwrap());
}

#[test]
fn prepare_decodes_inline_refs() {
    let garment = ImageRef::Inline(png_bytes(2, 3, [255, 0, 0, 255]));
    let store = PreparedImageStore::prepare([&garment], "assets").unwrap();

    let prepared = store.get(&garment).unwrap();
    assert_eq!((prepared.width, prepared.height), (2, 3));
    assert_eq!(prepared.rgba8_premul.len(), 2 * 3 * 4);
}

#[test]
fn prepare_resolves_paths_against_the_root() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("models")).unwrap();
    std::fs::write(
        dir.path().join("models/female.png"),
        png_bytes(4, 4, [0, 0, 255, 255]),
    )
    .unwrap();

    let model = ImageRef::Path("models/female.png".to_string());
    let store = PreparedImageStore::prepare([&model], dir.path()).unwrap();
    assert_eq!(store.root(), dir.path());
    assert_eq!(store.get(&model).unwrap().width, 4);
}

#[test]
fn prepare_fails_atomically_on_a_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = ImageRef::Path("models/nope.png".to_string());
    let err = PreparedImageStore::prepare([&missing], dir.path()).unwrap_err();
    assert!(matches!(err, StudioError::Decode(_)));
}

#[test]
fn unprepared_refs_are_a_validation_error() {
    let prepared_ref = ImageRef::Inline(png_bytes(1, 1, [1, 2, 3, 255]));
    let store = PreparedImageStore::prepare([&prepared_ref], "assets").unwrap();

    let other = ImageRef::Inline(vec![9, 9, 9]);
    assert!(matches!(
        store.get(&other).unwrap_err(),
        StudioError::Validation(_)
    ));
}
