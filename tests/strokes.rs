use egui::{Color32, PointerButton};
use pixel_paint::surface::BACKGROUND;
use pixel_paint::{
    Canvas, Document, PixelPos, StrokeRenderer, Surface, ToolConfig, ToolKind, ToolSelection,
    UiUpdatePort,
};

struct NullPort;

impl UiUpdatePort for NullPort {
    fn set_status_text(&mut self, _text: &str) {}
    fn set_tool_text(&mut self, _text: &str) {}
}

fn canvas(width: u32, height: u32) -> Canvas {
    Canvas::with_renderer(
        Document::new(Surface::new(width, height)),
        ToolConfig::default(),
        StrokeRenderer::seeded(42),
    )
}

#[test]
fn test_pencil_path_is_continuous() {
    let mut canvas = canvas(100, 100);
    let path = [
        PixelPos::new(10, 10),
        PixelPos::new(30, 15),
        PixelPos::new(50, 60),
        PixelPos::new(20, 80),
        PixelPos::new(90, 90),
    ];

    canvas.on_pointer_down(path[0], PointerButton::Primary);
    for &pos in &path[1..] {
        let before = canvas.stroke().last_position();
        canvas.on_pointer_move(pos, true, &mut NullPort);
        // The next segment starts where this one ended
        assert_ne!(before, Some(pos));
        assert_eq!(canvas.stroke().last_position(), Some(pos));
    }
    canvas.on_pointer_up(path[4], PointerButton::Primary);

    let surface = canvas.document().surface();
    for &p in &path {
        assert_eq!(surface.pixel(p), Some(Color32::BLACK), "{p:?}");
    }
}

#[test]
fn test_brush_segments_have_no_gaps() {
    let mut canvas = canvas(120, 40);
    canvas.select_tool(ToolSelection::new(ToolKind::Brush, 2), &mut NullPort);

    canvas.on_pointer_down(PixelPos::new(5, 20), PointerButton::Primary);
    for x in (15..=115).step_by(10) {
        canvas.on_pointer_move(PixelPos::new(x, 20), true, &mut NullPort);
    }

    let surface = canvas.document().surface();
    for x in 5..=115 {
        assert_eq!(surface.pixel(PixelPos::new(x, 20)), Some(Color32::BLACK), "x = {x}");
    }
}

#[test]
fn test_moves_after_release_do_not_draw() {
    let mut canvas = canvas(50, 50);
    canvas.on_pointer_down(PixelPos::new(5, 5), PointerButton::Primary);
    canvas.on_pointer_up(PixelPos::new(5, 5), PointerButton::Primary);
    canvas.on_pointer_move(PixelPos::new(40, 40), true, &mut NullPort);
    assert_eq!(canvas.document().surface().pixel(PixelPos::new(40, 40)), Some(BACKGROUND));
    assert!(!canvas.document().is_dirty());
}

#[test]
fn test_eraser_clears_square_regardless_of_history() {
    let mut canvas = canvas(60, 60);
    canvas.document_mut().surface_mut().clear(Color32::RED);
    canvas.select_tool(ToolSelection::new(ToolKind::Eraser, 2), &mut NullPort); // 8px

    let p = PixelPos::new(30, 40);
    canvas.on_pointer_down(PixelPos::new(0, 0), PointerButton::Primary);
    canvas.on_pointer_move(p, true, &mut NullPort);

    let surface = canvas.document().surface();
    for y in 0..60 {
        for x in 0..60 {
            let inside = (30..38).contains(&x) && (40..48).contains(&y);
            let expected = if inside { BACKGROUND } else { Color32::RED };
            assert_eq!(surface.pixel(PixelPos::new(x, y)), Some(expected), "({x}, {y})");
        }
    }
}

#[test]
fn test_spray_draws_only_around_pointer() {
    let mut canvas = canvas(300, 300);
    canvas.select_tool(ToolSelection::new(ToolKind::Spray, 4), &mut NullPort); // 8px
    canvas.set_color(Color32::from_rgb(200, 0, 0), &mut NullPort);

    canvas.on_pointer_down(PixelPos::new(10, 10), PointerButton::Primary);
    canvas.on_pointer_move(PixelPos::new(150, 150), true, &mut NullPort);

    let surface = canvas.document().surface();
    let painted: Vec<(u32, u32)> = surface
        .buffer()
        .enumerate_pixels()
        .filter(|(_, _, p)| p.0 == [200, 0, 0, 255])
        .map(|(x, y, _)| (x, y))
        .collect();

    assert!(!painted.is_empty() && painted.len() <= 16);
    // 16 particles, sigma 16 horizontally and 8 vertically
    for (x, y) in painted {
        assert!((x as i32 - 150).abs() < 16 * 8, "x = {x}");
        assert!((y as i32 - 150).abs() < 8 * 8, "y = {y}");
    }
    assert_eq!(surface.pixel(PixelPos::new(80, 80)), Some(BACKGROUND));
}

#[test]
fn test_resize_keeps_requested_dimensions() {
    let mut canvas = canvas(400, 400);
    canvas.on_pointer_down(PixelPos::new(0, 0), PointerButton::Primary);
    canvas.on_pointer_move(PixelPos::new(399, 399), true, &mut NullPort);

    canvas.resize(640, 480);
    assert_eq!(canvas.document().surface().size(), [640, 480]);
    canvas.resize(400, 400);
    assert_eq!(canvas.document().surface().size(), [400, 400]);
}
