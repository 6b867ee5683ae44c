use glam::Vec2;
use mint::Vector2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use terrain_sketch::prelude::*;
use terrain_sketch_demos::{init_tracing, save_png};
use tracing::info;

/// Stand-in for an erosion engine: altitude grows with distance from the nearest outlet and
/// with rock hardness, interpolated over the prepared nodes.
struct ToyEngine;

struct ToySurface {
    nodes: Vec<Site>,
    outlets: Vec<Vec2>,
    uplift: f32,
}

impl AltitudeSampler for ToySurface {
    fn sample_altitude(&self, p: Vector2<f32>) -> Option<f32> {
        let p = Vec2::from(p);
        let node = &self.nodes[nearest_site(&self.nodes, p)?];
        if node.is_ocean {
            return Some(0.0);
        }
        let to_sea = self
            .outlets
            .iter()
            .map(|o| o.distance(p))
            .fold(f32::INFINITY, f32::min);
        let hardness = 1.0 - node.erodibility;
        Some((to_sea * self.uplift * 1e-4 * hardness).min(2500.0))
    }
}

impl TerrainSynthesizer for ToyEngine {
    fn synthesize(&self, request: &TerrainRequest) -> Result<Box<dyn AltitudeSampler>> {
        if request.outlets.is_empty() {
            return Err(Error::Terrain("no ocean nodes to drain into".into()));
        }
        let outlets = request
            .outlets
            .iter()
            .map(|&i| request.nodes[i].position)
            .collect();
        let mut nodes = request.seeds.clone();
        nodes.extend_from_slice(&request.nodes);
        Ok(Box::new(ToySurface {
            nodes,
            outlets,
            uplift: request.uplift_rate,
        }))
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let canvas = Vec2::new(400.0, 300.0);
    let mut editor = Editor::try_new(EditorConfig::new(canvas))?;
    editor.load_sites(vec![
        Site::new(Vec2::new(20.0, 20.0), 0.5, true),
        Site::new(Vec2::new(380.0, 280.0), 0.5, true),
        Site::new(Vec2::new(150.0, 120.0), 0.25, false),
        Site::new(Vec2::new(250.0, 170.0), 0.3, false),
        Site::new(Vec2::new(320.0, 60.0), 0.7, false),
        Site::new(Vec2::new(90.0, 240.0), 0.65, false),
    ])?;

    let options = TerrainOptions::default().with_node_count_hint(4_000);
    let mut rng = StdRng::seed_from_u64(2024);
    let surface = editor.synthesize_terrain(&ToyEngine, &options, &mut rng)?;
    info!("Synthesized terrain over a {}x{} canvas.", canvas.x, canvas.y);

    let colormap = Colormap::terrain();
    let shaded = compose_relief(
        &surface,
        surface.canvas_extent(),
        &colormap,
        &ReliefOptions::default().with_seed(1),
        (800, 600),
    );
    save_png(&shaded, "relief-toy-engine.png")?;

    let flat = compose_relief(
        &surface,
        surface.canvas_extent(),
        &colormap,
        &ReliefOptions::default().with_shading(false),
        (800, 600),
    );
    save_png(&flat, "relief-toy-engine-flat.png")?;
    Ok(())
}
