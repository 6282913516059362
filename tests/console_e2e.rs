// tests/console_e2e.rs

//! End-to-end console flows: feed bytes through a PlainScreen, composite
//! onto a surface, and verify what a backend would have been asked to show.

use raster_console::{
    BackendEvent, CellAttrs, Config, Console, DisplayBackend, FlushMode, HeadlessBackend,
    PixelFormat, PixelSurface, PlainScreen, TermSource,
};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// An 80x24 console with its surface and backend, initial damage consumed.
fn console_80x24() -> (Console<PlainScreen>, PixelSurface, HeadlessBackend) {
    let mut console = Console::from_config(&Config::default());
    let (w, h) = console.pixel_size();
    assert_eq!((w, h), (640, 384));
    let mut surface = PixelSurface::new(PixelFormat::Argb8888, w, h).unwrap();
    let mut backend = HeadlessBackend::new();
    console
        .redraw(&mut surface, 0, 0, FlushMode::Surface, &mut backend)
        .unwrap();
    (console, surface, backend)
}

#[test]
fn eighty_one_bytes_wrap_scroll_free_then_redraw_clean() {
    init_logs();
    let (mut console, mut surface, mut backend) = console_80x24();

    // 80 printables fill row 0; the last one wraps the cursor.
    console.feed(&[b'A'; 80]);
    let (col, row) = console.source().cursor();
    assert_eq!(row, 1, "row advanced exactly once");
    assert_eq!(col, 0, "column wrapped to 0");
    assert_eq!(console.source().cell(0, 0).ch, 'A', "no scroll happened");
    assert_eq!(console.source().cell(79, 0).ch, 'A');

    // The 81st byte is the newline.
    console.feed(b"\n");
    assert_eq!(console.source().cursor(), (0, 2));

    console
        .redraw(&mut surface, 0, 0, FlushMode::Present, &mut backend)
        .unwrap();
    assert!(
        console.source().damage().is_empty(),
        "redraw-then-reset leaves no damage"
    );
}

#[test]
fn present_covers_the_damaged_rows_in_pixels() {
    init_logs();
    let (mut console, mut surface, mut backend) = console_80x24();

    console.feed(&[b'A'; 80]);
    console.feed(b"\n");
    console
        .redraw(&mut surface, 0, 0, FlushMode::Present, &mut backend)
        .unwrap();

    // Writes touched rows 0..3 (row 0 text, cursor through rows 1 and 2),
    // all 80 columns: 640x48 pixels at the origin.
    let rects = backend.presented();
    assert_eq!(rects.len(), 1);
    let r = rects[0];
    assert_eq!((r.x, r.y, r.width, r.height), (0, 0, 640, 48));
}

#[test]
fn bottom_scroll_presents_the_whole_grid() {
    init_logs();
    let (mut console, mut surface, mut backend) = console_80x24();

    console.feed(b"top\n");
    for _ in 0..22 {
        console.feed(b"\n");
    }
    assert_eq!(console.source().cursor(), (0, 23));
    console
        .redraw(&mut surface, 0, 0, FlushMode::Surface, &mut backend)
        .unwrap();

    // One more line feed scrolls; conservative invalidation covers the grid.
    console.feed(b"\n");
    assert_eq!(console.source().cell(0, 0).ch, ' ', "\"top\" scrolled away");
    console
        .redraw(&mut surface, 0, 0, FlushMode::Present, &mut backend)
        .unwrap();
    let r = *backend.presented().last().unwrap();
    assert_eq!((r.x, r.y, r.width, r.height), (0, 0, 640, 384));
}

#[test]
fn rotation_change_repaints_fully_without_presenting() {
    init_logs();
    let (mut console, mut surface, mut backend) = console_80x24();
    console.feed(b"spin");
    console
        .redraw(&mut surface, 0, 0, FlushMode::Surface, &mut backend)
        .unwrap();

    // An angle change invalidates every pixel: clear, then full repaint.
    console.set_rotation(90);
    surface.clear();
    console
        .redraw(&mut surface, 0, 0, FlushMode::FullRepaint, &mut backend)
        .unwrap();

    assert!(backend.presented().is_empty(), "full repaint never presents");
    assert!(console.source().damage().is_empty());
    // Rotation about the origin maps the grid's top scanline onto surface
    // column 0; everything else clips away and stays cleared.
    let cyan = PixelFormat::Argb8888.pack(0x00, 0xAA, 0xAA);
    assert_eq!(surface.read(0, 50), cyan, "rotated scanline lands on column 0");
    assert_eq!(surface.read(100, 50), surface.bg(), "clipped area stays cleared");
}

#[test]
fn backend_input_drives_the_console() {
    init_logs();
    let (mut console, mut surface, mut backend) = console_80x24();
    backend.push_input(BackendEvent::Key(b'h'));
    backend.push_input(BackendEvent::Key(b'i'));
    backend.push_input(BackendEvent::Quit);

    let mut saw_quit = false;
    while let Some(event) = backend.poll_input() {
        match event {
            BackendEvent::Key(byte) => console.feed(&[byte]),
            BackendEvent::Quit => {
                saw_quit = true;
                break;
            }
        }
    }
    assert!(saw_quit);
    assert_eq!(console.source().cell(0, 0).ch, 'h');
    assert_eq!(console.source().cell(1, 0).ch, 'i');

    console
        .redraw(&mut surface, 0, 0, FlushMode::Present, &mut backend)
        .unwrap();
    assert_eq!(backend.presented().len(), 1);
}

#[test]
fn explicit_cell_colors_reach_the_surface() {
    init_logs();
    let (mut console, mut surface, mut backend) = console_80x24();

    // Red on black: fg palette 4, bg palette 0.
    console.source_mut().set_attrs(CellAttrs {
        fg: Some(4),
        bg: Some(0),
        ..Default::default()
    });
    console.feed(b"X");
    console.source_mut().set_cursor_visible(false);
    console
        .redraw(&mut surface, 0, 0, FlushMode::Surface, &mut backend)
        .unwrap();

    let red = PixelFormat::Argb8888.pack(0xAA, 0x00, 0x00);
    let black = PixelFormat::Argb8888.pack(0x00, 0x00, 0x00);
    let cell: Vec<u32> = (0..16)
        .flat_map(|y| (0..8).map(move |x| (x, y)))
        .map(|(x, y)| surface.read(x, y))
        .collect();
    assert!(cell.contains(&red), "glyph ink uses the cell foreground");
    assert!(cell.contains(&black), "cell background painted");
    assert!(
        cell.iter().all(|&p| p == red || p == black),
        "opaque cell carries only its two colors"
    );
}
