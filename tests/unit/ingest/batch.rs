use super::*;

fn png(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([0, 0, 255, 255]));
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

fn file(name: &str, w: u32, h: u32) -> IngestFile {
    IngestFile::new(name, png(w, h))
}

#[test]
fn first_batch_needs_two_images() {
    let err = ingest_batch(&[file("a.png", 2, 2)], &[], 0).unwrap_err();
    assert_eq!(err.user_message(), "Please upload at least two images to merge.");
}

#[test]
fn accepts_matching_batch_in_upload_order() {
    let files = [file("a.png", 3, 2), file("b.png", 3, 2), file("c.png", 3, 2)];
    let out = ingest_batch(&files, &[], 10).unwrap();
    let names: Vec<_> = out.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["a.png", "b.png", "c.png"]);
    assert!(out[0].id.starts_with("img-10-"));
    assert!(out[2].id.starts_with("img-12-"));
}

#[test]
fn later_batch_is_checked_against_first_image() {
    let first = ingest_batch(&[file("a.png", 3, 2), file("b.png", 3, 2)], &[], 0).unwrap();

    let one_more = ingest_batch(&[file("c.png", 3, 2)], &first, 2).unwrap();
    assert_eq!(one_more.len(), 1);

    let err = ingest_batch(&[file("c.png", 3, 2), file("d.png", 5, 5)], &first, 2).unwrap_err();
    assert!(matches!(err, FadeError::Ingest(_)));
    assert_eq!(
        err.user_message(),
        "All images must have the same dimensions. Expected 3x2px, but found 5x5px."
    );
}

#[test]
fn mismatch_within_first_batch_is_rejected() {
    let err = ingest_batch(&[file("a.png", 3, 2), file("b.png", 2, 3)], &[], 0).unwrap_err();
    assert_eq!(
        err.user_message(),
        "All images must have the same dimensions. Expected 3x2px, but found 2x3px."
    );
}

#[test]
fn undecodable_file_names_the_file() {
    let files = [file("a.png", 2, 2), IngestFile::new("notes.txt", b"hello".to_vec())];
    let err = ingest_batch(&files, &[], 0).unwrap_err();
    assert_eq!(err.user_message(), "Could not load image: notes.txt");
}
