//! Image export to disk.

use gridmapper_core::{Cell, ElementContent, Footprint, HexColor, ShapeKind};
use gridmapper_designer::export::{file_name, PDF_NOTICE};
use gridmapper_designer::occupancy::PlacementRequest;
use gridmapper_designer::{export, Canvas, ColorSpace, ExportFormat, ExportOptions};

fn canvas_with_tree() -> Canvas {
    let mut canvas = Canvas::default();
    canvas.place(PlacementRequest {
        cell: Cell::new(2, 2),
        sub: None,
        content: ElementContent::Shape(ShapeKind::Tree),
        color: HexColor::from_rgb(0x22, 0x8b, 0x22),
        footprint: Footprint::square(2),
    });
    canvas
}

#[test]
fn test_png_export_has_full_grid_size() {
    let dir = tempfile::tempdir().unwrap();
    let canvas = canvas_with_tree();

    let report = export(&canvas, "Forest", &ExportOptions::new(ExportFormat::Png, dir.path())).unwrap();
    assert_eq!(report.path, dir.path().join("Forest.png"));
    assert_eq!(report.written_format, ExportFormat::Png);
    assert!(report.notice.is_none());

    let image = image::open(&report.path).unwrap();
    assert_eq!((image.width(), image.height()), (1200, 800));
}

#[test]
fn test_jpeg_export() {
    let dir = tempfile::tempdir().unwrap();
    let mut options = ExportOptions::new(ExportFormat::Jpeg, dir.path().join("out"));
    options.color_space = ColorSpace::Cmyk;

    let report = export(&canvas_with_tree(), "Forest", &options).unwrap();
    assert_eq!(report.path, dir.path().join("out").join("Forest.jpeg"));
    assert_eq!(report.written_format, ExportFormat::Jpeg);

    let image = image::open(&report.path).unwrap();
    assert_eq!(image.width(), 1200);
}

#[test]
fn test_pdf_request_writes_png_with_notice() {
    let dir = tempfile::tempdir().unwrap();
    let report = export(
        &Canvas::default(),
        "Handout",
        &ExportOptions::new(ExportFormat::Pdf, dir.path()),
    )
    .unwrap();

    assert_eq!(report.path.file_name().unwrap(), "Handout.png");
    assert_eq!(report.notice.as_deref(), Some(PDF_NOTICE));
    assert_eq!(file_name("Handout", ExportFormat::Pdf), "Handout.pdf");
}
