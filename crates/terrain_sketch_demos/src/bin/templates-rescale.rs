use glam::Vec2;
use terrain_sketch::prelude::*;
use terrain_sketch_demos::{draw_site_markers, init_tracing, save_png, MarkerStyle};
use tracing::info;

/// Presets authored against an older, wider erodibility slider.
const LEGACY_RANGE: (f32, f32) = (0.1, 1.5);

const PRESETS: [(&str, &str); 2] = [
    (
        "bay",
        r#"[
            {"x": 128.0, "y": 20.0, "erodibility": 0.8, "is_ocean": true},
            {"x": 60.0, "y": 120.0, "erodibility": 1.4, "is_ocean": false},
            {"x": 196.0, "y": 120.0, "erodibility": 1.2, "is_ocean": false},
            {"x": 128.0, "y": 200.0, "erodibility": 0.3, "is_ocean": false}
        ]"#,
    ),
    (
        "strait",
        r#"[
            {"x": 128.0, "y": 64.0, "erodibility": 0.8, "is_ocean": true},
            {"x": 128.0, "y": 192.0, "erodibility": 0.8, "is_ocean": true},
            {"x": 30.0, "y": 128.0, "erodibility": 0.2, "is_ocean": false},
            {"x": 226.0, "y": 128.0, "erodibility": 1.5, "is_ocean": false}
        ]"#,
    ),
];

fn main() -> anyhow::Result<()> {
    init_tracing();
    let legacy = ErodibilityRange::try_new(LEGACY_RANGE.0, LEGACY_RANGE.1)?;
    let current = ErodibilityRange::default();

    let mut templates = TemplateRegistry::new();
    for (name, json) in PRESETS {
        let mut sites = sites_from_json(json, &legacy)?;
        rescale_erodibility(&mut sites, &legacy, &current);
        templates.register(name, sites);
    }

    let canvas = Vec2::new(256.0, 256.0);
    let mut editor = Editor::try_new(EditorConfig::new(canvas))?;
    let names: Vec<String> = templates.names().map(str::to_owned).collect();
    for name in names {
        editor.load_template(&templates, &name)?;
        let mut view = editor.export_raster(512);
        draw_site_markers(
            &mut view,
            editor.sites().as_slice(),
            canvas,
            None,
            &MarkerStyle::default(),
        );
        save_png(&view, format!("templates-{name}.png"))?;
        info!("Template '{}' rescaled to {:?}.", name, current);
    }
    Ok(())
}
