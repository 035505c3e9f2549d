//! Bakes a grid over a random obstacle field and prints the cheapest route
//! between two corners as ASCII.
//!
//! Run with `RUST_LOG=debug` to see the bake details.

use rand::{RngExt, SeedableRng};
use waymesh_core::{Cell, GridConfig, GridMesh, NavMesh, NodeId, Vec2};
use waymesh_paths::PathFinder;

const SIZE: f32 = 24.0;
const OBSTACLE_CHANCE: f64 = 0.25;

fn main() {
    env_logger::init();

    // Seeded so repeated runs print the same map.
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    let width = SIZE as usize;
    let blocked: Vec<bool> = (0..width * width)
        .map(|_| rng.random::<f64>() < OBSTACLE_CHANCE)
        .collect();
    let mesh = GridMesh::bake(
        GridConfig {
            dimensions: Vec2::new(SIZE, SIZE),
            node_radius: 0.5,
            ..GridConfig::default()
        },
        |center, _| {
            let x = center.x as usize;
            let y = center.y as usize;
            !blocked[y * width + x]
        },
    );

    let start = mesh.node_from_position(Vec2::new(0.5, 0.5));
    let end = mesh.node_from_position(Vec2::new(SIZE - 0.5, SIZE - 0.5));

    let mut finder = PathFinder::new();
    match finder.find_path(&mesh, start, end) {
        Ok(Some(path)) => {
            println!("route of {} nodes, cost {}:", path.len(), path.cost);
            render(&mesh, &path.nodes);
        }
        Ok(None) => println!("no route through this map, try another seed"),
        Err(e) => eprintln!("refused: {e}"),
    }
}

fn render(mesh: &GridMesh, route: &[NodeId]) {
    for y in 0..mesh.height() {
        let mut line = String::with_capacity(mesh.width());
        for x in 0..mesh.width() {
            let id = mesh.id_at(Cell::new(x as i32, y as i32)).unwrap();
            let ch = if route.contains(&id) {
                'o'
            } else if mesh.is_available(id) {
                '.'
            } else {
                '#'
            };
            line.push(ch);
        }
        println!("{line}");
    }
}
