//! Integration tests for the tiny-skia raster backend.

use backdrop_common::LoadedImage;
use backdrop_css::paint::{AffineTransform, DashPattern, Path};
use backdrop_css::gradient::ResolvedStop;
use backdrop_css::{
    BackgroundCompositor, ColorValue, DisplayCommand, DisplayList, Edge, Point, Rect, RepeatMode,
    TileMode,
};
use backdrop_render::{ImageStore, RenderError, Renderer, decode_image, load_image};

const RED: ColorValue = ColorValue::rgb(255, 0, 0);
const GREEN: ColorValue = ColorValue::rgb(0, 255, 0);
const BLUE: ColorValue = ColorValue::rgb(0, 0, 255);

fn render(width: u32, height: u32, commands: Vec<DisplayCommand>, images: &ImageStore) -> Renderer {
    let mut list = DisplayList::new();
    for command in commands {
        list.push(command);
    }
    let mut renderer = Renderer::new(width, height).expect("canvas");
    renderer.render(&list, images);
    renderer
}

fn pixel(renderer: &Renderer, x: u32, y: u32) -> ColorValue {
    renderer.pixel(x, y).expect("pixel inside canvas")
}

fn fill(rect: Rect, color: ColorValue) -> DisplayCommand {
    DisplayCommand::FillRect { rect, color }
}

fn clip(rect: Rect) -> DisplayCommand {
    DisplayCommand::PushClip {
        path: Path::rect(&rect),
    }
}

fn green_tile_store() -> ImageStore {
    let mut images = ImageStore::new();
    images
        .insert("tile", LoadedImage::solid(2, 2, [0, 255, 0, 255]))
        .expect("store tile");
    images
}

fn image(area: Rect, repeat: RepeatMode, opacity: u8) -> DisplayCommand {
    DisplayCommand::DrawImage {
        src: "tile".to_string(),
        area,
        transform: AffineTransform::IDENTITY,
        repeat,
        opacity,
    }
}

fn gradient(end_x: f32, tile_mode: TileMode) -> DisplayCommand {
    DisplayCommand::FillLinearGradient {
        path: Path::rect(&Rect::new(0.0, 0.0, 100.0, 10.0)),
        start: Point::new(0.0, 0.0),
        end: Point::new(end_x, 0.0),
        stops: vec![
            ResolvedStop {
                color: RED,
                position: 0.0,
            },
            ResolvedStop {
                color: BLUE,
                position: 1.0,
            },
        ],
        tile_mode,
    }
}

#[test]
fn test_zero_sized_canvas_is_rejected() {
    assert!(matches!(
        Renderer::new(0, 10),
        Err(RenderError::InvalidSize {
            width: 0,
            height: 10
        })
    ));
}

#[test]
fn test_fill_rect_paints_only_its_area() {
    let renderer = render(
        20,
        20,
        vec![fill(Rect::new(0.0, 0.0, 10.0, 10.0), RED)],
        &ImageStore::new(),
    );
    assert_eq!(pixel(&renderer, 5, 5), RED);
    assert_eq!(pixel(&renderer, 15, 15), ColorValue::TRANSPARENT);
}

#[test]
fn test_clip_limits_fill_until_popped() {
    let renderer = render(
        20,
        20,
        vec![
            clip(Rect::new(0.0, 0.0, 10.0, 20.0)),
            fill(Rect::new(0.0, 0.0, 20.0, 20.0), RED),
            DisplayCommand::PopClip,
            fill(Rect::new(0.0, 10.0, 20.0, 10.0), BLUE),
        ],
        &ImageStore::new(),
    );
    assert_eq!(pixel(&renderer, 5, 5), RED);
    assert_eq!(pixel(&renderer, 15, 5), ColorValue::TRANSPARENT);
    assert_eq!(pixel(&renderer, 15, 15), BLUE);
}

#[test]
fn test_nested_clips_intersect() {
    let renderer = render(
        20,
        20,
        vec![
            clip(Rect::new(0.0, 0.0, 10.0, 20.0)),
            clip(Rect::new(5.0, 0.0, 15.0, 20.0)),
            fill(Rect::new(0.0, 0.0, 20.0, 20.0), RED),
            DisplayCommand::PopClip,
            DisplayCommand::PopClip,
        ],
        &ImageStore::new(),
    );
    assert_eq!(pixel(&renderer, 2, 5), ColorValue::TRANSPARENT);
    assert_eq!(pixel(&renderer, 7, 5), RED);
    assert_eq!(pixel(&renderer, 12, 5), ColorValue::TRANSPARENT);
}

#[test]
fn test_unbalanced_pop_is_ignored() {
    let renderer = render(
        10,
        10,
        vec![
            DisplayCommand::PopClip,
            fill(Rect::new(0.0, 0.0, 10.0, 10.0), GREEN),
        ],
        &ImageStore::new(),
    );
    assert_eq!(pixel(&renderer, 5, 5), GREEN);
}

#[test]
fn test_dashed_stroke_leaves_gaps() {
    let line = Path::line(Point::new(0.0, 5.5), Point::new(100.0, 5.5));
    let stroke = |dash| DisplayCommand::StrokePath {
        path: line.clone(),
        color: RED,
        width: 4.0,
        dash,
    };

    let solid = render(100, 10, vec![stroke(None)], &ImageStore::new());
    assert_eq!(pixel(&solid, 15, 5), RED);

    let dashed = render(
        100,
        10,
        vec![stroke(Some(DashPattern {
            on: 10.0,
            off: 10.0,
        }))],
        &ImageStore::new(),
    );
    assert_eq!(pixel(&dashed, 5, 5), RED);
    assert_eq!(pixel(&dashed, 15, 5), ColorValue::TRANSPARENT);
    assert_eq!(pixel(&dashed, 25, 5), RED);
}

#[test]
fn test_gradient_runs_from_start_to_end() {
    let renderer = render(100, 10, vec![gradient(100.0, TileMode::Clamp)], &ImageStore::new());
    let left = pixel(&renderer, 1, 5);
    let right = pixel(&renderer, 98, 5);
    assert!(left.r > 240 && left.b < 15, "{left:?}");
    assert!(right.b > 240 && right.r < 15, "{right:?}");
}

#[test]
fn test_gradient_tile_modes_beyond_end() {
    let clamped = render(100, 10, vec![gradient(10.0, TileMode::Clamp)], &ImageStore::new());
    let past_end = pixel(&clamped, 51, 5);
    assert!(past_end.b > 250 && past_end.r < 5, "{past_end:?}");

    let repeated = render(100, 10, vec![gradient(10.0, TileMode::Repeat)], &ImageStore::new());
    let first = pixel(&repeated, 1, 5);
    let sixth = pixel(&repeated, 51, 5);
    assert!(sixth.r > 200, "{sixth:?}");
    assert!(first.r.abs_diff(sixth.r) <= 2, "{first:?} vs {sixth:?}");
}

#[test]
fn test_repeated_image_covers_area() {
    let renderer = render(
        20,
        20,
        vec![image(Rect::new(0.0, 0.0, 20.0, 20.0), RepeatMode::Repeat, 255)],
        &green_tile_store(),
    );
    assert_eq!(pixel(&renderer, 1, 1), GREEN);
    assert_eq!(pixel(&renderer, 15, 15), GREEN);
}

#[test]
fn test_unrepeated_image_stays_in_area() {
    let renderer = render(
        20,
        20,
        vec![image(Rect::new(0.0, 0.0, 2.0, 2.0), RepeatMode::NoRepeat, 255)],
        &green_tile_store(),
    );
    assert_eq!(pixel(&renderer, 1, 1), GREEN);
    assert_eq!(pixel(&renderer, 15, 15), ColorValue::TRANSPARENT);
}

#[test]
fn test_image_opacity() {
    let half = render(
        10,
        10,
        vec![image(Rect::new(0.0, 0.0, 10.0, 10.0), RepeatMode::Repeat, 128)],
        &green_tile_store(),
    );
    let color = pixel(&half, 5, 5);
    assert!((126..=130).contains(&color.a), "{color:?}");
    assert!(color.g > 250, "{color:?}");

    let hidden = render(
        10,
        10,
        vec![image(Rect::new(0.0, 0.0, 10.0, 10.0), RepeatMode::Repeat, 0)],
        &green_tile_store(),
    );
    assert_eq!(pixel(&hidden, 5, 5), ColorValue::TRANSPARENT);
}

#[test]
fn test_missing_image_is_skipped() {
    let renderer = render(
        10,
        10,
        vec![
            image(Rect::new(0.0, 0.0, 10.0, 10.0), RepeatMode::Repeat, 255),
            fill(Rect::new(0.0, 0.0, 5.0, 5.0), RED),
        ],
        &ImageStore::new(),
    );
    assert_eq!(pixel(&renderer, 2, 2), RED);
    assert_eq!(pixel(&renderer, 7, 7), ColorValue::TRANSPARENT);
}

#[test]
fn test_compositor_output_rasterizes() {
    let mut compositor = BackgroundCompositor::default();
    compositor.set_background_color("#00ff00");
    compositor.set_border_width(Edge::All, "4px");
    compositor.set_border_color(Edge::All, "red");
    let list = compositor.draw(Rect::new(0.0, 0.0, 40.0, 40.0));

    let mut renderer = Renderer::new(40, 40).expect("canvas");
    renderer.render(&list, &ImageStore::new());
    assert_eq!(pixel(&renderer, 20, 20), GREEN);
    assert_eq!(pixel(&renderer, 1, 20), RED);
    assert_eq!(pixel(&renderer, 20, 38), RED);
}

#[test]
fn test_rounded_compositor_output_clears_corners() {
    let mut compositor = BackgroundCompositor::default();
    compositor.set_background_color("#00ff00");
    compositor.set_border_radius("20px");
    let list = compositor.draw(Rect::new(0.0, 0.0, 40.0, 40.0));

    let mut renderer = Renderer::new(40, 40).expect("canvas");
    renderer.render(&list, &ImageStore::new());
    assert_eq!(pixel(&renderer, 0, 0), ColorValue::TRANSPARENT);
    assert_eq!(pixel(&renderer, 39, 39), ColorValue::TRANSPARENT);
    assert_eq!(pixel(&renderer, 20, 20), GREEN);
}

#[test]
fn test_clear_fills_canvas() {
    let mut renderer = Renderer::new(4, 4).expect("canvas");
    renderer.clear(ColorValue::WHITE);
    assert_eq!(pixel(&renderer, 3, 3), ColorValue::WHITE);
    assert!(renderer.pixel(4, 0).is_none());
}

#[test]
fn test_store_describes_images_for_compositor() {
    let images = green_tile_store();
    assert_eq!(images.len(), 1);
    let background = images.background_image("tile").expect("registered");
    assert_eq!((background.width, background.height), (2, 2));
    assert!(images.background_image("other").is_none());
}

#[test]
fn test_empty_image_is_rejected_by_store() {
    let mut images = ImageStore::new();
    let empty = LoadedImage::new(0, 0, Vec::new()).expect("zero-length buffer");
    assert!(images.insert("empty", empty).is_err());
    assert!(images.is_empty());
}

#[test]
fn test_decode_rejects_garbage() {
    assert!(matches!(
        decode_image(b"not an image"),
        Err(RenderError::Decode(_))
    ));
}

#[test]
fn test_png_round_trip() {
    let renderer = render(
        6,
        4,
        vec![fill(Rect::new(0.0, 0.0, 3.0, 4.0), BLUE)],
        &ImageStore::new(),
    );
    let path = std::env::temp_dir().join(format!("backdrop-render-{}.png", std::process::id()));
    renderer.save_png(&path).expect("write png");

    let loaded = load_image(&path).expect("read png");
    let _ = std::fs::remove_file(&path);
    assert_eq!((loaded.width(), loaded.height()), (6, 4));
    assert_eq!(&loaded.rgba_data()[..4], &[0, 0, 255, 255]);
    assert_eq!(&loaded.rgba_data()[20..24], &[0, 0, 0, 0]);
}

#[test]
fn test_load_missing_file_fails_with_context() {
    let error = load_image(std::path::Path::new("/nonexistent/backdrop.png"))
        .expect_err("missing file");
    assert!(error.to_string().contains("/nonexistent/backdrop.png"));
}
