//! scribble CLI - run the contour-to-solid pipeline on a recorded scene.
//!
//! A scene file describes the viewport, a camera over a tracked floor and a
//! detected contour. The CLI acquires the detection corners, maps the contour
//! into the scene, and optionally extrudes it to STL.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use scribble_extrude::{drop_transform, extrude_scene_path, face_placement, face_quad};
use scribble_math::Point3;
use scribble_path::ScenePath;
use scribble_quad::{ContourFrame, QuadCorners, QuadError, QuadMapper, RayCaster};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod scene;
mod stl;

use scene::{RunConfig, SceneFile};

#[derive(Parser)]
#[command(name = "scribble")]
#[command(about = "Lift a detected drawing onto the floor and extrude it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum FrameArg {
    /// Contour y grows downward
    TopLeft,
    /// Contour y grows upward
    BottomLeft,
}

impl From<FrameArg> for ContourFrame {
    fn from(f: FrameArg) -> Self {
        match f {
            FrameArg::TopLeft => ContourFrame::TopLeft,
            FrameArg::BottomLeft => ContourFrame::BottomLeft,
        }
    }
}

#[derive(clap::Args)]
struct CommonArgs {
    /// Scene description (.json)
    #[arg(long)]
    scene: PathBuf,
    /// Optional settings file (.toml)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the geometry scale
    #[arg(long)]
    scale: Option<f64>,
    /// Override the contour frame
    #[arg(long, value_enum)]
    frame: Option<FrameArg>,
}

#[derive(Subcommand)]
enum Commands {
    /// Acquire corners and map the contour into the scene
    Map {
        #[command(flatten)]
        common: CommonArgs,
        /// Write the result here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Map the contour and extrude it into a solid
    Extrude {
        #[command(flatten)]
        common: CommonArgs,
        /// Binary STL output
        #[arg(long)]
        stl: PathBuf,
        /// Also write the textured face quad as STL
        #[arg(long)]
        face_stl: Option<PathBuf>,
    },
    /// Summarise a scene file
    Info {
        /// Scene description (.json)
        #[arg(long)]
        scene: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Map { common, out } => run_map(&common, out.as_deref()),
        Commands::Extrude {
            common,
            stl,
            face_stl,
        } => run_extrude(&common, &stl, face_stl.as_deref()),
        Commands::Info { scene } => show_info(&scene),
    }
}

fn load(common: &CommonArgs) -> Result<(SceneFile, RunConfig)> {
    let scene = SceneFile::load(&common.scene)?;
    let mut config = RunConfig::load(common.config.as_deref())?;
    if let Some(scale) = common.scale {
        config.mapper.geometry_scale = scale;
    }
    if let Some(frame) = common.frame {
        config.mapper.frame = frame.into();
    }
    config.sync_scale();
    Ok((scene, config))
}

/// Run one mapping cycle, turning tracking loss into a user-facing hint.
fn map_scene(
    scene: &SceneFile,
    config: &RunConfig,
) -> Result<(QuadMapper, QuadCorners, ScenePath)> {
    let mut mapper = QuadMapper::new(config.mapper).context("invalid mapper settings")?;

    let corners = match mapper.begin_cycle(&scene.tracking, &scene.region) {
        Ok(corners) => corners,
        Err(QuadError::InsufficientTrackingData { missing }) => {
            anyhow::bail!(
                "could not find the floor under {} corner(s) {:?}; move the device around and try again",
                missing.len(),
                missing
            );
        }
        Err(e) => return Err(e).context("acquiring detection corners"),
    };

    let path = mapper.map_path(&scene.contour).context("mapping contour")?;
    tracing::info!(
        elements = path.len(),
        outlines = path.outlines().len(),
        "mapped contour"
    );
    Ok((mapper, corners, path))
}

#[derive(Serialize)]
struct MapOutput<'a> {
    corners: &'a QuadCorners,
    origin: Point3,
    geometry_scale: f64,
    path: &'a ScenePath,
}

fn run_map(common: &CommonArgs, out: Option<&Path>) -> Result<()> {
    let (scene, config) = load(common)?;
    let (_, corners, path) = map_scene(&scene, &config)?;

    let output = MapOutput {
        corners: &corners,
        origin: corners.centroid(),
        geometry_scale: config.mapper.geometry_scale,
        path: &path,
    };
    let json = serde_json::to_string_pretty(&output)?;

    match out {
        Some(out) => {
            fs::write(out, json).with_context(|| format!("writing {}", out.display()))?;
            println!("Wrote mapped path to {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn run_extrude(common: &CommonArgs, stl_path: &Path, face_path: Option<&Path>) -> Result<()> {
    let (scene, config) = load(common)?;
    let (mapper, _, path) = map_scene(&scene, &config)?;

    let shape = extrude_scene_path(&path, &config.extrude).context("extruding path")?;
    let mesh = shape.world_mesh();
    fs::write(stl_path, stl::stl_bytes(&mesh))
        .with_context(|| format!("writing {}", stl_path.display()))?;
    println!(
        "Exported STL to {} ({} triangles)",
        stl_path.display(),
        mesh.num_triangles()
    );

    if let Some(face_path) = face_path {
        if let Some(corners) = mapper.active() {
            let face = face_quad(corners).transformed(&face_placement(config.extrude.depth));
            fs::write(face_path, stl::stl_bytes(&face))
                .with_context(|| format!("writing {}", face_path.display()))?;
            println!("Exported face quad to {}", face_path.display());
        }
    }

    if let Some(proxy) = shape.physics_proxy() {
        println!(
            "Collider box: {:.4} x {:.4} x {:.4} m",
            proxy.width, proxy.height, proxy.length
        );
    }

    let drop_point = scene.region.drop_point(config.drop_offset);
    match scene.tracking.cast(drop_point) {
        Some(hit) => {
            let at = drop_transform(hit, config.extrude.drop_height).translation_part();
            println!("Drop position: ({:.4}, {:.4}, {:.4})", at.x, at.y, at.z);
        }
        None => tracing::warn!(?drop_point, "no floor under the drop point"),
    }

    Ok(())
}

fn show_info(path: &Path) -> Result<()> {
    let scene = SceneFile::load(path)?;

    println!("scribble scene: {}", path.display());
    println!(
        "  Viewport: {} x {}",
        scene.region.viewport_width, scene.region.viewport_height
    );
    println!("  Detection square: {} pt", scene.region.size);
    for (corner, p) in scribble_quad::Corner::ALL
        .iter()
        .zip(scene.region.corner_points())
    {
        let hit = scene
            .tracking
            .cast(p)
            .map(|h| format!("({:.3}, {:.3}, {:.3})", h.x, h.y, h.z))
            .unwrap_or_else(|| "no hit".to_string());
        println!("    {:?} ({:.1}, {:.1}) -> {}", corner, p.x, p.y, hit);
    }

    println!("\nContour:");
    println!("  Elements: {}", scene.contour.len());
    println!("  Subpaths: {}", scene.contour.subpaths().len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribble_math::Point2;
    use scribble_path::ContourPath;
    use scribble_quad::{DetectionRegion, PinholeCamera, PlaneRayCaster};
    use std::f64::consts::FRAC_PI_2;

    fn overhead_scene(half_extent: Option<f64>) -> SceneFile {
        SceneFile {
            region: DetectionRegion::new(640.0, 480.0),
            tracking: PlaneRayCaster {
                camera: PinholeCamera {
                    position: Point3::new(0.0, 1.0, 0.0),
                    yaw: 0.0,
                    pitch: -FRAC_PI_2,
                    focal_length: 500.0,
                    viewport_width: 640.0,
                    viewport_height: 480.0,
                },
                plane_y: 0.0,
                half_extent,
            },
            contour: ContourPath::polygon(&[
                Point2::new(0.2, 0.2),
                Point2::new(0.8, 0.2),
                Point2::new(0.5, 0.8),
            ]),
        }
    }

    #[test]
    fn test_map_scene_on_tracked_floor() {
        let (mapper, _, path) = map_scene(&overhead_scene(None), &RunConfig::default()).unwrap();
        assert!(mapper.active().is_some());
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn test_lost_tracking_asks_to_move_device() {
        // Corners fall 0.32 m off-centre, past the 0.3 m floor patch
        let err = map_scene(&overhead_scene(Some(0.3)), &RunConfig::default()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("4 corner(s)"), "{msg}");
        assert!(msg.contains("move the device around and try again"), "{msg}");
    }
}
