//! Campus tour demo
//!
//! Headless driver for the tour engine: builds a procedural campus, feeds a
//! scripted sequence of pointer and list input through the frame loop at a
//! synthetic 60 Hz clock and logs what the viewer would show.
//!
//! Usage: `campus_tour [config.toml|config.ron] [metadata.ron|metadata.toml]`

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use tour_engine::foundation::logging;
use tour_engine::foundation::time::FrameClock;
use tour_engine::foundation::math::{Vec3, Vec4};
use tour_engine::prelude::*;

const WINDOW: (u32, u32) = (1280, 720);
const FRAME_DT: f64 = 1.0 / 60.0;
const DUCK_COUNT: usize = 8;
const TREE_COUNT: usize = 24;

/// Buildings of the demo campus: name, footprint center, half extents
const BUILDINGS: [(&str, [f32; 3], [f32; 3]); 5] = [
    ("行政大樓", [0.0, 0.0, 0.0], [12.0, 15.0, 8.0]),
    ("圖書館", [-45.0, 0.0, -20.0], [10.0, 9.0, 10.0]),
    ("體育館", [50.0, 0.0, -25.0], [14.0, 7.0, 12.0]),
    ("學生宿舍", [40.0, 0.0, 35.0], [6.0, 18.0, 6.0]),
    ("理學院", [-40.0, 0.0, 30.0], [9.0, 11.0, 7.0]),
];

/// Demo failures
#[derive(Debug, Error)]
enum DemoError {
    /// Engine setup or API misuse
    #[error("Tour error: {0}")]
    Tour(#[from] TourError),

    /// Config or metadata file could not be read
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A scripted step did not find what it expected
    #[error("Script error: {0}")]
    Script(String),
}

fn main() -> Result<(), DemoError> {
    logging::init();
    log::info!("Starting campus tour demo");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            log::info!("Loading config from {}", path);
            TourConfig::load_from_file(&path)?
        }
        None => TourConfig::default(),
    };
    let metadata = match args.next() {
        Some(path) => {
            log::info!("Loading metadata from {}", path);
            MetadataTable::load_from_file(&path)?
        }
        None => builtin_metadata(),
    };

    let scene = build_campus(config.flock.seed);
    log::info!("Campus scene built with {} nodes", scene.len());

    let mut demo = Demo {
        tour: CampusTour::new(config, scene, metadata, HeadlessUi::new(), WINDOW, 0.0)?,
        now: 0.0,
    };

    let clock = FrameClock::new();
    match demo.run_script() {
        Ok(()) => {
            log::info!(
                "Campus tour demo completed successfully ({:.1}s simulated in {:.1} ms)",
                demo.now,
                clock.now() * 1000.0
            );
            Ok(())
        }
        Err(e) => {
            log::error!("Campus tour demo failed: {:?}", e);
            Err(e)
        }
    }
}

/// Procedural campus: buildings with nested meshes, trees, a pond and ducks
fn build_campus(seed: u64) -> SceneGraph {
    let mut scene = SceneGraph::new();
    let mut rng = StdRng::seed_from_u64(seed);

    for (index, (name, center, half)) in BUILDINGS.into_iter().enumerate() {
        let half = Vec3::from(half);
        let building = scene.add_root(name, Transform::from_position(Vec3::from(center)), None);
        // Walls and roof as separate meshes, like an exported model
        let walls = scene.add_child(
            building,
            format!("Walls.{index:03}"),
            Transform::identity(),
            Some(Geometry::Box(AABB::from_center_extents(Vec3::new(0.0, half.y, 0.0), half))),
        );
        if let Some(walls) = walls {
            scene.add_child(
                walls,
                format!("Roof.{index:03}"),
                Transform::from_position(Vec3::new(0.0, half.y * 2.0, 0.0)),
                Some(Geometry::Box(AABB::from_center_extents(
                    Vec3::new(0.0, 1.0, 0.0),
                    Vec3::new(half.x * 1.1, 1.0, half.z * 1.1),
                ))),
            );
        }
    }

    for index in 0..TREE_COUNT {
        let position = Vec3::new(rng.gen_range(-90.0..90.0), 0.0, rng.gen_range(-90.0..90.0));
        scene.add_root(
            format!("Tree.{index:03}"),
            Transform::from_position(position),
            Some(Geometry::Box(AABB::from_center_extents(Vec3::new(0.0, 4.0, 0.0), Vec3::new(1.5, 4.0, 1.5)))),
        );
    }

    scene.add_root(
        "pond",
        Transform::from_position(Vec3::new(0.0, -0.5, 70.0)),
        Some(Geometry::Box(AABB::from_center_extents(Vec3::zeros(), Vec3::new(35.0, 0.5, 25.0)))),
    );
    for index in 0..DUCK_COUNT {
        scene.add_root(format!("duck_{index}"), Transform::identity(), None);
    }

    scene
}

fn builtin_metadata() -> MetadataTable {
    let mut table = MetadataTable::new();
    table.insert(
        "行政大樓",
        BuildingInfo {
            display_name: "Administration Building".to_string(),
            description: "Home of the president's office and student services.".to_string(),
            camera_offset: Some(Vec3::new(0.0, 30.0, 60.0)),
        },
    );
    table.insert(
        "圖書館",
        BuildingInfo {
            display_name: "Main Library".to_string(),
            description: "Five floors of stacks and a rooftop reading garden.".to_string(),
            camera_offset: Some(Vec3::new(-20.0, 25.0, 35.0)),
        },
    );
    table
}

/// Scripted session over a synthetic clock
struct Demo {
    tour: CampusTour<HeadlessUi>,
    now: f64,
}

impl Demo {
    fn run_script(&mut self) -> Result<(), DemoError> {
        self.advance(0.5);

        // Hover across the overview, then click the administration building
        let target = self.screen_position("行政大樓")?;
        log::info!("Hover at screen center -> {:?}", self.tour.on_pointer_move(640.0, 360.0));
        log::info!("Hover over sky -> {:?}", self.tour.on_pointer_move(640.0, 5.0));
        let clicked = self
            .tour
            .on_click(target.0, target.1, self.now)
            .ok_or_else(|| DemoError::Script("click on 行政大樓 missed".to_string()))?;
        log::info!("Clicked {}", clicked);
        self.settle();
        self.report();

        // Picking is disarmed until the user returns
        log::info!("Hover while focused -> {:?}", self.tour.on_pointer_move(target.0, target.1));
        self.tour.return_to_default(self.now);
        self.settle();
        self.report();

        // Rapid list selection: each request supersedes the previous one
        let list: Vec<String> = self
            .tour
            .ui()
            .list
            .iter()
            .map(|entry| entry.id.to_string())
            .collect();
        log::info!("Building list: {:?}", list);
        for id in list.iter().take(3) {
            self.tour.select_by_id(id, self.now)?;
            self.advance(0.4);
        }
        self.settle();
        self.report();

        self.tour.on_drag(120.0, -30.0);
        self.advance(1.0);
        log::info!("After drag the camera is at {:?}", self.tour.camera().position);

        self.tour.return_to_default(self.now);
        self.settle();
        self.report();
        Ok(())
    }

    /// Run frames for `seconds` of synthetic time
    fn advance(&mut self, seconds: f64) {
        let end = self.now + seconds;
        while self.now < end {
            self.now += FRAME_DT;
            let snapshot = self.tour.frame(self.now);
            if let Some(kind) = snapshot.completed {
                log::info!("Transition completed at t={:.2}s: {:?}", self.now, kind);
            }
        }
    }

    /// Run frames until no transition is in flight
    fn settle(&mut self) {
        while self.tour.session().is_transitioning() {
            self.advance(FRAME_DT);
        }
    }

    /// Pixel position of a building's center as seen by the current camera
    fn screen_position(&self, name: &str) -> Result<(f64, f64), DemoError> {
        let scene = self.tour.scene();
        let node = scene
            .find_by_name(name)
            .ok_or_else(|| DemoError::Script(format!("no node named {name}")))?;
        let center = scene
            .world_bounds(node)
            .map(|bounds| bounds.center())
            .ok_or_else(|| DemoError::Script(format!("{name} has no geometry")))?;

        let clip = self.tour.camera().get_view_projection_matrix() * Vec4::new(center.x, center.y, center.z, 1.0);
        if clip.w <= 0.0 {
            return Err(DemoError::Script(format!("{name} is behind the camera")));
        }
        let (ndc_x, ndc_y) = (clip.x / clip.w, clip.y / clip.w);
        let x = (f64::from(ndc_x) + 1.0) / 2.0 * f64::from(WINDOW.0);
        let y = (1.0 - f64::from(ndc_y)) / 2.0 * f64::from(WINDOW.1);
        Ok((x, y))
    }

    fn report(&self) {
        let ui = self.tour.ui();
        let camera = self.tour.camera();
        match &ui.panel {
            Some((title, body)) => log::info!("Panel '{}': {}", title, body.replace('\n', " ")),
            None => log::info!("Panel hidden"),
        }
        log::info!(
            "t={:.2}s camera {:?} -> {:?}, overlay {:.2}, return button {}, orbit {}",
            self.now,
            camera.position,
            camera.target,
            ui.overlay_opacity,
            if ui.return_visible { "shown" } else { "hidden" },
            if self.tour.orbit().is_enabled() { "enabled" } else { "disabled" },
        );
        for agent in self.tour.simulator().agents() {
            log::debug!("{} at {:?} heading {:.2}", agent.id, agent.position, agent.heading);
        }
    }
}
