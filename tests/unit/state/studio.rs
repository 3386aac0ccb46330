use super::*;
use crate::animation::clock::ManualScheduler;
use crate::config::model::OutputTarget;

fn png(w: u32, h: u32, shade: u8) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([shade, shade, shade, 255]));
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

fn files(n: usize, w: u32, h: u32) -> Vec<IngestFile> {
    (0..n)
        .map(|i| IngestFile::new(format!("{i}.png"), png(w, h, i as u8 * 40)))
        .collect()
}

fn studio_with(n: usize) -> Studio<ManualScheduler> {
    let mut studio = Studio::new(ManualScheduler::new());
    studio.add_images(&files(n, 3, 2)).unwrap();
    studio
}

fn fire(studio: &mut Studio<ManualScheduler>, ts: f64) -> Option<f64> {
    let handle = studio.scheduler_mut().take_next()?;
    studio.on_frame(handle, ts)
}

#[test]
fn first_batch_of_one_is_rejected() {
    let mut studio = Studio::new(ManualScheduler::new());
    assert!(studio.add_images(&files(1, 3, 2)).is_err());
    assert!(studio.images().is_empty());
    assert_eq!(studio.error(), Some("Please upload at least two images to merge."));
}

#[test]
fn mismatched_batch_leaves_sequence_untouched() {
    let mut studio = studio_with(2);
    let before: Vec<_> = studio.images().iter().map(|i| i.id.clone()).collect();

    let mut batch = files(1, 3, 2);
    batch.push(IngestFile::new("big.png", png(5, 5, 9)));
    assert!(studio.add_images(&batch).is_err());

    let after: Vec<_> = studio.images().iter().map(|i| i.id.clone()).collect();
    assert_eq!(before, after);
    assert_eq!(
        studio.error(),
        Some("All images must have the same dimensions. Expected 3x2px, but found 5x5px.")
    );
    assert_eq!(studio.config().milestones, vec!["100"]);
}

#[test]
fn adding_images_resets_milestones_and_clears_error() {
    let mut studio = Studio::new(ManualScheduler::new());
    let _ = studio.add_images(&files(1, 3, 2));
    studio.add_images(&files(3, 3, 2)).unwrap();
    assert_eq!(studio.config().milestones, vec!["50", "100"]);
    assert_eq!(studio.error(), None);

    studio.add_images(&files(1, 3, 2)).unwrap();
    assert_eq!(studio.images().len(), 4);
    assert_eq!(studio.config().milestones, vec!["33", "67", "100"]);
}

#[test]
fn ids_stay_unique_across_batches() {
    let mut studio = studio_with(2);
    studio.add_images(&files(2, 3, 2)).unwrap();
    let mut ids: Vec<_> = studio.images().iter().map(|i| i.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 4);
}

#[test]
fn removing_below_two_images_resets_everything() {
    let mut studio = studio_with(3);
    studio.set_slider(40.0).unwrap();

    let id = studio.images()[0].id.clone();
    assert!(studio.remove_image(&id));
    assert_eq!(studio.images().len(), 2);
    assert_eq!(studio.config().milestones, vec!["100"]);
    assert!(!studio.remove_image("missing"));

    let id = studio.images()[0].id.clone();
    studio.remove_image(&id);
    assert!(studio.images().is_empty());
    assert_eq!(studio.config(), &AnimationConfig::default());
    assert_eq!(studio.slider_value(), 0.0);
}

#[test]
fn reorder_moves_one_entry() {
    let mut studio = studio_with(3);
    let names = |s: &Studio<ManualScheduler>| {
        s.images().iter().map(|i| i.name.clone()).collect::<Vec<_>>()
    };
    studio.reorder_images(0, 2).unwrap();
    assert_eq!(names(&studio), ["1.png", "2.png", "0.png"]);
    studio.reorder_images(2, 0).unwrap();
    assert_eq!(names(&studio), ["0.png", "1.png", "2.png"]);
    assert!(studio.reorder_images(0, 3).is_err());
}

#[test]
fn time_mode_switch_and_edit_keep_lists_in_step() {
    let mut studio = studio_with(3);
    studio.set_milestone_mode(MilestoneMode::Time);
    assert_eq!(studio.config().time_milestone_inputs, vec!["30s", "1m"]);

    studio.set_time_milestone(0, "15s").unwrap();
    assert_eq!(studio.config().milestones, vec!["25", "100"]);

    studio.set_time_milestone(0, "soon").unwrap();
    assert_eq!(studio.config().time_milestone_inputs[0], "soon");
    assert_eq!(studio.config().milestones, vec!["25", "100"]);

    assert!(studio.set_time_milestone(5, "1s").is_err());
}

#[test]
fn slider_label_follows_position() {
    let mut studio = Studio::new(ManualScheduler::new());
    assert_eq!(studio.slider_label(), "Image 1");

    studio.add_images(&files(3, 3, 2)).unwrap();
    assert_eq!(studio.slider_label(), "Showing Image 1");
    studio.set_slider(25.0).unwrap();
    assert_eq!(studio.slider_label(), "Merging Image 1 and Image 2 (50%)");
    studio.set_slider(150.0).unwrap();
    assert_eq!(studio.slider_value(), 100.0);
    assert_eq!(studio.slider_label(), "Showing Image 3");
}

#[test]
fn clock_drives_preview_and_blocks_scrubbing() {
    let mut studio = studio_with(2);
    let mut cfg = studio.config().clone();
    cfg.duration = "10s".to_owned();
    studio.set_config(cfg);

    assert!(studio.toggle_animation().unwrap());
    assert!(studio.set_slider(10.0).is_err());

    assert_eq!(fire(&mut studio, 1_000.0), Some(0.0));
    assert_eq!(fire(&mut studio, 6_000.0), Some(50.0));
    assert_eq!(studio.slider_value(), 50.0);
    let state = studio.blend_state();
    assert_eq!((state.lower_index, state.upper_index), (0, 1));
    assert_eq!(state.fade, 0.5);

    assert!(!studio.toggle_animation().unwrap());
    assert!(studio.scheduler().pending().is_empty());
    assert_eq!(studio.slider_value(), 50.0);
    studio.set_slider(10.0).unwrap();
}

#[test]
fn invalid_config_keeps_clock_disarmed() {
    let mut studio = studio_with(2);
    let mut cfg = studio.config().clone();
    cfg.duration = "soon".to_owned();
    studio.set_config(cfg);

    assert!(studio.start_animation().is_err());
    assert!(!studio.is_animating());
    assert!(studio.scheduler().pending().is_empty());
    assert!(studio.error().is_some());
}

#[test]
fn animation_needs_two_images() {
    let mut studio = Studio::new(ManualScheduler::new());
    assert!(matches!(studio.start_animation(), Err(FadeError::Animation(_))));
}

#[test]
fn generate_code_commits_valid_config_only() {
    let mut studio = studio_with(2);

    let bad = AnimationConfig {
        milestones: vec!["0".to_owned()],
        ..studio.config().clone()
    };
    assert!(matches!(studio.generate_code(bad), Err(FadeError::Validation(_))));
    assert_eq!(studio.config().milestones, vec!["100"]);
    assert_eq!(studio.generated(), None);

    let good = AnimationConfig {
        output_target: OutputTarget::Svelte,
        class_name: "hero".to_owned(),
        ..studio.config().clone()
    };
    let code = studio.generate_code(good).unwrap();
    assert!(code.contains("export let className = \"hero\";"));
    assert!(code.contains("\"/images/slider-1.png\""));
    assert_eq!(studio.generated(), Some(code.as_str()));
    assert_eq!(studio.config().output_target, OutputTarget::Svelte);
}

#[test]
fn generation_without_images_is_refused() {
    let mut studio = Studio::new(ManualScheduler::new());
    let err = studio.generate_code(AnimationConfig::default()).unwrap_err();
    assert!(matches!(err, FadeError::Emission(_)));
    assert!(studio.generation_error().is_some());
}
