//! Integration tests for `background-size` parsing and resolution.

use backdrop_css::{BackgroundSize, PxScale, SizeValue};

const ID: PxScale = PxScale::IDENTITY;

fn resolve(input: &str, container: (f32, f32), image: (f32, f32)) -> Option<(f32, f32)> {
    BackgroundSize::parse(input).resolve(container, image, ID)
}

#[test]
fn test_keywords() {
    assert_eq!(BackgroundSize::parse("contain"), BackgroundSize::Contain);
    assert_eq!(BackgroundSize::parse(" cover "), BackgroundSize::Cover);
}

#[test]
fn test_single_value_leaves_height_auto() {
    assert_eq!(
        BackgroundSize::parse("10px"),
        BackgroundSize::Explicit {
            width: SizeValue::Px(10.0),
            height: SizeValue::Auto,
        }
    );
    assert_eq!(
        BackgroundSize::parse("50% auto"),
        BackgroundSize::Explicit {
            width: SizeValue::Percent(0.5),
            height: SizeValue::Auto,
        }
    );
}

#[test]
fn test_bad_axis_resets_only_that_axis() {
    assert_eq!(
        BackgroundSize::parse("abc 30px"),
        BackgroundSize::Explicit {
            width: SizeValue::Auto,
            height: SizeValue::Px(30.0),
        }
    );
    assert_eq!(
        BackgroundSize::parse("40px 3x%"),
        BackgroundSize::Explicit {
            width: SizeValue::Px(40.0),
            height: SizeValue::Auto,
        }
    );
}

#[test]
fn test_contain_and_cover() {
    assert_eq!(resolve("contain", (200.0, 100.0), (50.0, 50.0)), Some((100.0, 100.0)));
    assert_eq!(resolve("cover", (200.0, 100.0), (50.0, 50.0)), Some((200.0, 200.0)));
}

#[test]
fn test_auto_keeps_intrinsic_size() {
    assert_eq!(resolve("auto", (200.0, 100.0), (40.0, 20.0)), Some((40.0, 20.0)));
    assert_eq!(resolve("auto auto", (200.0, 100.0), (40.0, 20.0)), Some((40.0, 20.0)));
}

#[test]
fn test_auto_axis_keeps_aspect_ratio() {
    assert_eq!(resolve("80px", (200.0, 100.0), (40.0, 20.0)), Some((80.0, 40.0)));
    assert_eq!(resolve("50%", (200.0, 100.0), (40.0, 20.0)), Some((100.0, 50.0)));
    assert_eq!(resolve("auto 50%", (200.0, 100.0), (40.0, 20.0)), Some((100.0, 50.0)));
    assert_eq!(resolve("abc 30px", (200.0, 100.0), (40.0, 20.0)), Some((60.0, 30.0)));
}

#[test]
fn test_explicit_both_axes() {
    assert_eq!(resolve("10px 50%", (200.0, 100.0), (40.0, 20.0)), Some((10.0, 50.0)));
    assert_eq!(BackgroundSize::STRETCH.resolve((200.0, 100.0), (40.0, 20.0), ID), Some((200.0, 100.0)));
}

#[test]
fn test_px_is_scaled() {
    let size = BackgroundSize::parse("10px 20px");
    assert_eq!(size.resolve((200.0, 100.0), (1.0, 1.0), PxScale(2.0)), Some((20.0, 40.0)));
}

#[test]
fn test_unresolvable_sizes() {
    assert_eq!(resolve("contain", (200.0, 100.0), (0.0, 50.0)), None);
    assert_eq!(resolve("contain", (0.0, 100.0), (50.0, 50.0)), None);
    assert_eq!(resolve("auto", (200.0, 100.0), (50.0, -1.0)), None);
}
