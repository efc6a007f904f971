//! Example: Generate a walkable layout
//!
//! Runs one full pass and prints what a renderer would receive.
//! Set `RUST_LOG=info` (or `debug`) to follow the pipeline stages.

use voronoi_layout::*;

fn main() {
    env_logger::init();

    println!("Voronoi Layout Generation Example");
    println!("=================================\n");

    let config = LayoutConfigBuilder::new()
        .resolution(150)
        .origin(Vec2::new(-500.0, -500.0))
        .elevation(50.0)
        .unwrap()
        .cube_size(20.0)
        .unwrap()
        .path_width(60.0)
        .unwrap()
        .seed(42)
        .build()
        .expect("valid configuration");

    println!("Configuration:");
    println!("  Resolution: {}", config.resolution);
    println!("  Bounds: {} .. {}", config.bounds().min, config.bounds().max);
    println!("  Cube size: {}", config.cube_size);
    println!("  Path width: {}", config.path_width);
    println!();

    let pass = match LayoutGenerator::new(config).generate() {
        Ok(pass) => pass,
        Err(err) => {
            eprintln!("Generation failed: {}", err);
            std::process::exit(1);
        }
    };

    let mst = pass.mst();
    println!("Statistics:");
    println!("  Triangles: {}", pass.triangles().len());
    println!("  Regions: {}", pass.regions().len());
    println!("  Graph vertices: {}", pass.graph().vertex_count());
    println!("  Tree edges: {} (spanning: {})", mst.edges.len(), mst.is_spanning());
    println!("  Total tree length: {:.1}", mst.total_weight());
    println!("  Path cells: {}", pass.path().len());
    println!();

    println!("Sample path cells:");
    for position in pass.world_path_positions().iter().take(5) {
        println!("  ({:.2}, {:.2}, {:.2})", position.x, position.y, position.z);
    }

    println!("\nGeneration complete!");
}
