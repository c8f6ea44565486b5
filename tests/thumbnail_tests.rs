use base64::Engine;
use gcodethumb::{
    encode_png, generate_png, generate_png_async, render_geometry_thumbnail, render_thumbnail,
    to_data_url, Category, Color, ColorPolicy, GeometryModel, ThumbnailConfig, DATA_URL_PREFIX,
};
use image::GenericImageView;
use tempfile::TempDir;

const DEMO: &str = include_str!("../demos/illerminaty.nc");

fn demo_colors() -> ColorPolicy {
    ThumbnailConfig::default().colors
}

#[test]
fn test_demo_png_decodes_to_requested_size() {
    let surface = render_thumbnail(DEMO, Some(&demo_colors()), 250, 200).unwrap();
    let png = encode_png(&surface).unwrap();
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!(decoded.dimensions(), (250, 200));

    let rgba = decoded.to_rgba8();
    // Bottom edge of the triangle
    assert_eq!(rgba.get_pixel(115, 199).0, [0, 0, 0, 255]);
    // Far corner stays background
    assert_eq!(rgba.get_pixel(249, 0).0, [255, 255, 255, 255]);
}

#[test]
fn test_arcs_only_policy() {
    let arcs = ColorPolicy::new().with(Category::G2G3, Color::rgb(255, 0, 0));
    let surface = render_thumbnail(DEMO, Some(&arcs), 250, 200).unwrap();
    // Triangle edges are not drawn
    assert_eq!(surface.pixel(115, 199), Some(Color::WHITE));
    // Something red was drawn
    let red_pixels = surface
        .to_rgba8()
        .chunks(4)
        .filter(|px| px[0] > 200 && px[1] < 80 && px[2] < 80)
        .count();
    assert!(red_pixels > 0);
}

#[test]
fn test_no_colors_leaves_transparent_png() {
    let surface = render_thumbnail(DEMO, None, 20, 10).unwrap();
    let decoded = image::load_from_memory(&encode_png(&surface).unwrap()).unwrap();
    assert!(decoded.to_rgba8().pixels().all(|p| p.0[3] == 0));
}

#[test]
fn test_data_url_roundtrip() {
    let surface = render_thumbnail(DEMO, Some(&demo_colors()), 40, 30).unwrap();
    let url = to_data_url(&surface).unwrap();
    let payload = url.strip_prefix(DATA_URL_PREFIX).unwrap();
    let png = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .unwrap();
    assert_eq!(png, encode_png(&surface).unwrap());
}

#[test]
fn test_geometry_json_matches_gcode() {
    let model = gcodethumb_geometry::parse(DEMO).unwrap();
    let json = model.to_json().unwrap();
    let reloaded = GeometryModel::from_json(&json).unwrap();

    let from_gcode = render_thumbnail(DEMO, Some(&demo_colors()), 60, 50).unwrap();
    let from_json = render_geometry_thumbnail(&reloaded, Some(&demo_colors()), 60, 50).unwrap();
    assert_eq!(from_gcode.to_rgba8(), from_json.to_rgba8());
}

#[test]
fn test_generate_png_writes_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("demo.png");
    generate_png(&path, DEMO, Some(&demo_colors()), 250, 200).unwrap();
    let decoded = image::open(&path).unwrap();
    assert_eq!(decoded.dimensions(), (250, 200));
}

#[tokio::test]
async fn test_generate_png_async_writes_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("demo.png");
    generate_png_async(&path, DEMO, Some(&demo_colors()), 100, 80)
        .await
        .unwrap();
    let bytes = tokio::fs::read(&path).await.unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!(decoded.dimensions(), (100, 80));
}

#[test]
fn test_generate_png_reports_missing_directory() {
    let err = generate_png(
        "/nonexistent/dir/demo.png",
        DEMO,
        Some(&demo_colors()),
        10,
        10,
    )
    .unwrap_err();
    assert!(matches!(err, gcodethumb::ThumbnailError::Io(_)));
}
