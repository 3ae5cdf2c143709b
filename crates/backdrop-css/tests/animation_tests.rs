//! Integration tests for property animations driving a compositor.

use backdrop_css::{
    AnimatedProperty, AnimatedValue, BackgroundCompositor, BackgroundImage, ColorValue, Edge,
    Interpolation, Point, PropertyAnimation, Rect,
};

#[test]
fn test_background_color_interpolates_per_channel() {
    let mut compositor = BackgroundCompositor::default();
    let animation = PropertyAnimation::new(
        AnimatedProperty::BackgroundColor,
        AnimatedValue::Color(ColorValue::BLACK),
        AnimatedValue::Color(ColorValue::rgba(255, 255, 255, 0)),
        Interpolation::Linear,
    );
    animation.apply(&mut compositor, 0.5);
    assert_eq!(compositor.background_color(), ColorValue::rgba(128, 128, 128, 128));
    assert!(compositor.take_redraw_request());

    animation.apply(&mut compositor, 1.0);
    assert_eq!(compositor.background_color(), ColorValue::rgba(255, 255, 255, 0));
}

#[test]
fn test_progress_is_clamped() {
    let animation = PropertyAnimation::new(
        AnimatedProperty::Opacity,
        AnimatedValue::Alpha(0),
        AnimatedValue::Alpha(200),
        Interpolation::Linear,
    );
    assert_eq!(animation.value_at(-1.0), AnimatedValue::Alpha(0));
    assert_eq!(animation.value_at(3.0), AnimatedValue::Alpha(200));
    assert_eq!(animation.value_at(f32::NAN), AnimatedValue::Alpha(0));
}

#[test]
fn test_opacity_and_border_width() {
    let mut compositor = BackgroundCompositor::default();
    PropertyAnimation::new(
        AnimatedProperty::Opacity,
        AnimatedValue::Alpha(255),
        AnimatedValue::Alpha(55),
        Interpolation::Linear,
    )
    .apply(&mut compositor, 0.5);
    assert_eq!(compositor.alpha(), 155);

    PropertyAnimation::new(
        AnimatedProperty::BorderWidth(Edge::Left),
        AnimatedValue::Length(0.0),
        AnimatedValue::Length(8.0),
        Interpolation::Linear,
    )
    .apply(&mut compositor, 0.25);
    assert!((compositor.border_width(Edge::Left) - 2.0).abs() < 1e-6);
}

#[test]
fn test_border_color_on_one_edge() {
    let mut compositor = BackgroundCompositor::default();
    compositor.set_border_color(Edge::All, "blue");
    let red = ColorValue::rgb(255, 0, 0);
    PropertyAnimation::new(
        AnimatedProperty::BorderColor(Edge::Top),
        AnimatedValue::Color(red),
        AnimatedValue::Color(red),
        Interpolation::Ease,
    )
    .apply(&mut compositor, 0.3);
    assert_eq!(compositor.border_color(Edge::Top), red);
    assert_eq!(compositor.border_color(Edge::Left), ColorValue::rgb(0, 0, 255));
}

#[test]
fn test_position_animates_from_current() {
    let mut compositor = BackgroundCompositor::default();
    compositor.set_background_image(Some(BackgroundImage::new("a.png", 50, 50)));
    compositor.set_background_position("right 10px bottom 20px");
    let bounds = Rect::new(0.0, 0.0, 200.0, 100.0);
    let _ = compositor.draw(bounds);

    let animation = PropertyAnimation::from_current(
        &compositor,
        AnimatedProperty::BackgroundPosition,
        AnimatedValue::Point(Point::new(0.0, 0.0)),
        Interpolation::Linear,
    );
    assert_eq!(animation.start, AnimatedValue::Point(Point::new(140.0, 30.0)));

    animation.apply(&mut compositor, 0.5);
    let _ = compositor.draw(bounds);
    assert_eq!(compositor.background_position_px(), (70, 15));
}

#[test]
fn test_capture_reads_resolved_values() {
    let mut compositor = BackgroundCompositor::default();
    compositor.set_border_width(Edge::All, "3px");
    compositor.set_alpha(40);
    assert_eq!(
        AnimatedValue::capture(&compositor, AnimatedProperty::BorderWidth(Edge::Bottom)),
        AnimatedValue::Length(3.0)
    );
    assert_eq!(
        AnimatedValue::capture(&compositor, AnimatedProperty::Opacity),
        AnimatedValue::Alpha(40)
    );
    assert_eq!(
        AnimatedValue::capture(&compositor, AnimatedProperty::BackgroundColor),
        AnimatedValue::Color(ColorValue::TRANSPARENT)
    );
}

#[test]
fn test_mismatched_values_snap_at_midpoint() {
    let start = AnimatedValue::Length(1.0);
    let end = AnimatedValue::Alpha(9);
    assert_eq!(start.interpolate(end, 0.49), start);
    assert_eq!(start.interpolate(end, 0.5), end);
}

#[test]
fn test_mismatched_property_is_ignored() {
    let mut compositor = BackgroundCompositor::default();
    PropertyAnimation::new(
        AnimatedProperty::Opacity,
        AnimatedValue::Length(0.0),
        AnimatedValue::Length(1.0),
        Interpolation::Linear,
    )
    .apply(&mut compositor, 1.0);
    assert_eq!(compositor.alpha(), 255);
    assert!(!compositor.take_redraw_request());
}

#[test]
fn test_easing_shapes_progress() {
    let animation = PropertyAnimation::new(
        AnimatedProperty::BorderWidth(Edge::All),
        AnimatedValue::Length(0.0),
        AnimatedValue::Length(100.0),
        Interpolation::Steps(2),
    );
    assert_eq!(animation.value_at(0.4), AnimatedValue::Length(0.0));
    assert_eq!(animation.value_at(0.6), AnimatedValue::Length(50.0));

    let eased = PropertyAnimation {
        interpolation: Interpolation::EaseIn,
        ..animation
    };
    let AnimatedValue::Length(value) = eased.value_at(0.5) else {
        panic!("expected a length");
    };
    assert!(value < 50.0);
}
