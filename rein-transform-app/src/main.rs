//! Small animated hierarchy: a sun, an orbiting planet with a moon, and a
//! camera riding on the planet. Logs what a renderer and a camera would read
//! each frame.

use glam::{DQuat, DVec3};
use log::{info, warn};
use rein_transform::{
    extract_model_uniforms, transform_system, Preserve, TransformBuilder, TransformTree,
};

/// Demo loop configuration.
struct DemoConfig {
    /// Simulated frame interval (seconds). Default: 1/60.
    frame_time: f64,
    /// Number of frames to simulate. Default: 240.
    frames: u32,
    /// Log every n-th frame. Default: 60.
    log_interval: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            frame_time: 1.0 / 60.0,
            frames: 240,
            log_interval: 60,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = DemoConfig::default();
    let mut tree = TransformTree::new();

    let sun = TransformBuilder::new()
        .with_scale(DVec3::splat(3.0))
        .build(&mut tree)?;
    let orbit = TransformBuilder::new().with_parent(sun).build(&mut tree)?;
    let planet = TransformBuilder::new()
        .with_parent(orbit)
        .with_position(DVec3::new(4.0, 0.0, 0.0))
        .with_scale(DVec3::new(0.4, 0.3, 0.4))
        .with_skew(DVec3::new(0.2, 0.0, 0.0))
        .build(&mut tree)?;
    let moon = TransformBuilder::new()
        .with_parent(planet)
        .with_position(DVec3::new(0.0, 0.0, 3.0))
        .with_scale(DVec3::splat(0.5))
        .build(&mut tree)?;
    let camera = TransformBuilder::new()
        .with_parent(planet)
        .with_position(DVec3::new(0.0, 4.0, 0.0))
        .build(&mut tree)?;

    let mut elapsed = 0.0;
    for frame in 0..config.frames {
        elapsed += config.frame_time;
        tree.set_local_rotation(orbit, DQuat::from_rotation_y(elapsed * 0.5))?;
        tree.set_local_rotation(planet, DQuat::from_rotation_y(elapsed * 2.0))?;

        // camera input: bob along its own up axis
        let up = tree.up(camera)?;
        let local = tree.local_position(camera)?;
        tree.set_local_position(camera, local + up * (elapsed * 4.0).sin() * 0.01)?;

        transform_system(&mut tree);

        if frame % config.log_interval == 0 {
            info!(
                "frame {}: planet at {:.3}, moon at {:.3}",
                frame,
                tree.position(planet)?,
                tree.position(moon)?
            );
            info!(
                "camera at {:.3} looking {:.3}",
                tree.position(camera)?,
                tree.forward(camera)?
            );
        }
    }

    // Move the moon to the sun without it jumping.
    let before = tree.position(moon)?;
    tree.set_parent(moon, Some(sun), Preserve::World)?;
    info!(
        "moon reparented to sun: {:.3} -> {:.3}",
        before,
        tree.position(moon)?
    );

    if let Err(err) = tree.set_parent(sun, Some(moon), Preserve::World) {
        warn!("Rejected reparent: {}", err);
    }

    // Removing the orbit detaches the planet in place.
    tree.despawn(orbit)?;
    info!(
        "orbit removed, planet is now a root at {:.3}",
        tree.position(planet)?
    );

    let uniforms = extract_model_uniforms(&mut tree);
    info!("{} model uniforms ready for upload", uniforms.len());
    Ok(())
}
