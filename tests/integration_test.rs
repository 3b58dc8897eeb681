// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Integration tests for the public analyzer API

use image::Rgb;
use ndarray::{array, Array3};
use video_analyzer::io::parse_detections;
use video_analyzer::{
    AnalyzerError, Annotator, BgrImage, BoundingBoxAnnotator, Color, ColorLookup, ColorPalette,
    Detections, ExtraValue, LabelAnnotator, Position,
};

fn sample() -> Detections {
    Detections::new(array![
        [0.0, 0.0, 10.0, 10.0],
        [20.0, 20.0, 40.0, 30.0],
        [5.0, 5.0, 15.0, 25.0],
    ])
    .with_confidence(array![0.9, 0.3, 0.6])
    .with_class_id(array![0, 1, 0])
    .with_track_id(array![7, 8, 9])
    .with_data(
        "class_name",
        vec![
            ExtraValue::from("person"),
            ExtraValue::from("car"),
            ExtraValue::from("person"),
        ],
    )
}

#[test]
fn test_subset_keeps_columns_aligned() {
    let detections = sample();
    let picked = detections.subset(vec![2_usize, 0]).unwrap();

    assert_eq!(picked.len(), 2);
    assert_eq!(picked.xyxy.row(0).to_vec(), vec![5.0, 5.0, 15.0, 25.0]);
    assert_eq!(picked.track_id, Some(array![9, 7]));
    assert_eq!(picked.confidence, Some(array![0.6, 0.9]));
    assert_eq!(
        picked.field("class_name").and_then(|c| c.display_row(1)),
        Some("person".to_string())
    );
    picked.validate().unwrap();

    // list-backed data fields only take positional indices
    assert!(matches!(
        detections.subset(vec![false, true, false]),
        Err(AnalyzerError::InvalidArgument(_))
    ));
    let mut columns_only = detections.clone();
    columns_only.data.clear();
    let masked = columns_only.subset(vec![false, true, false]).unwrap();
    assert_eq!(masked.class_id, Some(array![1]));

    assert!(matches!(
        detections.subset(5_usize),
        Err(AnalyzerError::OutOfBounds { index: 5, len: 3 })
    ));
}

#[test]
fn test_anchor_coordinates() {
    let detections = sample();
    let centers = detections.anchor_coordinates(Position::Center).unwrap();
    assert_eq!(centers.row(1).to_vec(), vec![30.0, 25.0]);

    let bottom = detections.anchor_coordinates(Position::BottomCenter).unwrap();
    assert_eq!(bottom.row(0).to_vec(), vec![5.0, 10.0]);

    assert!(matches!(
        detections.anchor_coordinates(Position::CenterOfMass),
        Err(AnalyzerError::MissingField(_))
    ));

    let mut mask = Array3::from_elem((1, 4, 4), false);
    mask[[0, 1, 1]] = true;
    let with_mask = Detections::new(array![[0.0, 0.0, 4.0, 4.0]]).with_mask(mask);
    let com = with_mask.anchor_coordinates(Position::CenterOfMass).unwrap();
    assert_eq!(com.row(0).to_vec(), vec![1.0, 1.0]);
}

#[test]
fn test_palette_wraps() {
    let palette = ColorPalette::default_palette();
    assert_eq!(palette.by_idx(0).unwrap(), palette.by_idx(palette.len() as i64).unwrap());
    assert!(palette.by_idx(-1).is_err());
    assert_eq!(Color::from_hex("#ff0000").unwrap(), Color::RED);
}

#[test]
fn test_annotators_on_empty_set_are_noops() {
    let mut frame = BgrImage::from_pixel(16, 16, Rgb([9, 9, 9]));
    let before = frame.clone();
    let empty = Detections::empty();

    BoundingBoxAnnotator::new().annotate(&mut frame, &empty, None).unwrap();
    LabelAnnotator::new().annotate(&mut frame, &empty, None).unwrap();
    assert_eq!(frame, before);
}

#[test]
fn test_track_lookup_requires_track_ids() {
    let detections = Detections::new(array![[1.0, 1.0, 5.0, 5.0]]).with_class_id(array![0]);
    let mut frame = BgrImage::new(8, 8);
    let err = BoundingBoxAnnotator::new()
        .with_color_lookup(ColorLookup::Track)
        .annotate(&mut frame, &detections, None)
        .unwrap_err();
    assert!(matches!(err, AnalyzerError::MissingField(_)));
}

#[test]
fn test_parsed_file_draws() {
    let detections = parse_detections("2 2 12 12 0.8 3 1\n").unwrap();
    let mut frame = BgrImage::new(16, 16);
    BoundingBoxAnnotator::new()
        .with_thickness(1)
        .with_color(Color::new(255, 0, 0))
        .annotate(&mut frame, &detections, None)
        .unwrap();
    assert_eq!(frame.get_pixel(2, 2).0, [0, 0, 255]);
}
