//! Originals and thumbnails persisted through filesystem storage.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbImage};
use thumbkit::{
    Error, FileSystemStorage, ImageWithThumbsField, Storage, TargetSize, ThumbnailConfig,
    delete_with_thumbnails, process_directory_to_path, regenerate_thumbnails, save_with_thumbnails,
    thumbnail_file_to_path,
};

fn sample(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| image::Rgb([x as u8, y as u8, 128]));
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img).write_to(&mut out, format).unwrap();
    out.into_inner()
}

fn sizes() -> Vec<TargetSize> {
    vec![TargetSize::new(125, 125).unwrap(), TargetSize::new(300, 200).unwrap()]
}

fn dims(path: &Path) -> (u32, u32) {
    let img = image::open(path).unwrap();
    (img.width(), img.height())
}

#[test]
fn field_saves_and_deletes_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileSystemStorage::new(dir.path(), "/media/");
    let field = ImageWithThumbsField::new(sizes());

    let mut file = field.bind(&storage, None);
    let stored = file.save("images/photo.jpg", &sample(640, 480, ImageFormat::Jpeg)).unwrap();
    assert_eq!(stored, "images/photo.jpg");

    let root = dir.path().join("images");
    assert_eq!(dims(&root.join("photo.125x125.jpg")), (125, 125));
    assert_eq!(dims(&root.join("photo.300x200.jpg")), (300, 200));
    assert_eq!(
        file.thumbnail_url(TargetSize::new(300, 200).unwrap()).unwrap().as_deref(),
        Some("/media/images/photo.300x200.jpg")
    );

    file.delete().unwrap();
    assert!(!root.join("photo.jpg").exists());
    assert!(!root.join("photo.125x125.jpg").exists());
    assert!(!root.join("photo.300x200.jpg").exists());
}

#[test]
fn second_upload_gets_suffixed_names() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileSystemStorage::new(dir.path(), "/media/");
    let field = ImageWithThumbsField::new(sizes());
    let content = sample(320, 240, ImageFormat::Png);

    field.bind(&storage, None).save("photo.png", &content).unwrap();
    let mut second = field.bind(&storage, None);
    assert_eq!(second.save("photo.png", &content).unwrap(), "photo_.png");
    assert!(storage.exists("photo_.125x125.png").unwrap());
    assert!(storage.exists("photo_.300x200.png").unwrap());
}

#[test]
fn occupied_thumbnail_name_fails_the_save() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileSystemStorage::new(dir.path(), "/media/");
    std::fs::write(dir.path().join("photo.125x125.png"), b"left over").unwrap();

    let field = ImageWithThumbsField::new(sizes());
    let mut file = field.bind(&storage, None);
    let err = file.save("photo.png", &sample(200, 200, ImageFormat::Png)).unwrap_err();
    assert!(matches!(err, Error::NamingCollision { name } if name == "photo.125x125.png"));
    assert_eq!(std::fs::read(dir.path().join("photo.125x125.png")).unwrap(), b"left over");
}

#[test]
fn api_round_trip_save_regenerate_delete() {
    let src = tempfile::tempdir().unwrap();
    let media = tempfile::tempdir().unwrap();
    let input = src.path().join("cat.gif");
    std::fs::write(&input, sample(90, 60, ImageFormat::Gif)).unwrap();

    let config = ThumbnailConfig {
        sizes: sizes(),
        ..ThumbnailConfig::default()
    };
    let saved = save_with_thumbnails(&input, media.path(), &config).unwrap();
    assert_eq!(saved.original, "cat.gif");
    assert_eq!(saved.url, "/media/cat.gif");
    assert_eq!(saved.thumbnails, vec!["cat.125x125.gif", "cat.300x200.gif"]);
    assert_eq!(saved.thumbnail_urls[0], "/media/cat.125x125.gif");

    std::fs::remove_file(media.path().join("cat.300x200.gif")).unwrap();
    let written = regenerate_thumbnails("cat.gif", media.path(), &config).unwrap();
    assert_eq!(written.len(), 2);
    assert_eq!(dims(&media.path().join("cat.300x200.gif")), (300, 200));

    std::fs::remove_file(media.path().join("cat.125x125.gif")).unwrap();
    delete_with_thumbnails("cat.gif", media.path(), &config).unwrap();
    assert_eq!(std::fs::read_dir(media.path()).unwrap().count(), 0);
}

#[test]
fn single_thumbnail_to_path_follows_extension() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    std::fs::write(&input, sample(100, 100, ImageFormat::Png)).unwrap();
    let output = dir.path().join("out/thumb.JPG");

    thumbnail_file_to_path(&input, &output, TargetSize::new(40, 30).unwrap(), &Default::default())
        .unwrap();
    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
    assert_eq!(dims(&output), (40, 30));
}

#[test]
fn batch_counts_processed_skipped_and_errors() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    std::fs::write(input.path().join("a.png"), sample(64, 64, ImageFormat::Png)).unwrap();
    std::fs::write(input.path().join("b.jpg"), sample(64, 48, ImageFormat::Jpeg)).unwrap();
    std::fs::write(input.path().join("broken.png"), b"nope").unwrap();
    std::fs::write(input.path().join("notes.txt"), b"hello").unwrap();
    std::fs::create_dir(input.path().join("nested")).unwrap();

    let config = ThumbnailConfig {
        sizes: vec![TargetSize::new(32, 32).unwrap()],
        ..ThumbnailConfig::default()
    };
    let report = process_directory_to_path(input.path(), output.path(), &config, true).unwrap();
    assert_eq!((report.processed, report.skipped, report.errors), (2, 1, 1));
    assert!(output.path().join("a.32x32.png").is_file());
    assert!(output.path().join("b.32x32.jpg").is_file());
    assert!(!output.path().join("broken.png").exists());

    let fresh = tempfile::tempdir().unwrap();
    assert!(process_directory_to_path(input.path(), fresh.path(), &config, false).is_err());
}
