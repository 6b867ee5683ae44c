use glam::Vec2;
use terrain_sketch::prelude::*;
use terrain_sketch_demos::{draw_site_markers, init_tracing, save_png, MarkerStyle};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let canvas = Vec2::new(512.0, 384.0);
    let mut editor = Editor::try_new(EditorConfig::new(canvas).with_cell_scale(2.0))?;

    // Open sea in the north-west, placed one click at a time.
    editor.begin_creation(CreationMode::Repeat);
    for p in [
        Vec2::new(40.0, 40.0),
        Vec2::new(200.0, 30.0),
        Vec2::new(30.0, 220.0),
    ] {
        editor.click(p);
        editor.set_selected_ocean(true);
    }
    editor.cancel();

    // Land with a hard ridge running south-east.
    let land = [
        (Vec2::new(180.0, 170.0), 0.7),
        (Vec2::new(300.0, 120.0), 0.55),
        (Vec2::new(420.0, 90.0), 0.4),
        (Vec2::new(260.0, 260.0), 0.25),
        (Vec2::new(380.0, 300.0), 0.2),
        (Vec2::new(130.0, 330.0), 0.6),
        (Vec2::new(470.0, 220.0), 0.35),
    ];
    for (p, erodibility) in land {
        editor.begin_creation(CreationMode::Single);
        editor.click(p);
        editor.set_selected_ocean(false);
        editor.set_selected_erodibility(erodibility);
    }

    // Pull the last site inland and select the ridge crest.
    editor.move_site(editor.sites().len() - 1, Vec2::new(440.0, 250.0));
    editor.click(Vec2::new(182.0, 168.0));

    let mut view = editor.render();
    draw_site_markers(
        &mut view,
        editor.sites().as_slice(),
        canvas,
        editor.selection(),
        &MarkerStyle::default(),
    );
    save_png(&view, "editor-coastline-map.png")?;
    save_png(&editor.export_raster(1024), "editor-coastline-map-1024.png")?;

    std::fs::write("editor-coastline-map.json", editor.export_json()?)?;
    Ok(())
}
