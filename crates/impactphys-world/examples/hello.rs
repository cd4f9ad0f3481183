use impactphys_core::{hex32, BodyId};
use impactphys_world::{build_scene, ScenarioDesc};

fn main() -> anyhow::Result<()> {
    let mut scene = build_scene(&ScenarioDesc::showcase())?;
    let dt = 1.0 / 60.0;
    for i in 0..120 {
        let stats = scene.step(dt);
        if let Some(a) = scene.body(BodyId(0)) {
            if i % 10 == 0 || stats.contacts > 0 {
                println!("tick {:3}  contacts {}  a.pos = {:?}  a.vel = {:?}",
                    scene.tick_index(), stats.contacts, a.position, a.linear_velocity);
            }
        }
    }
    println!("hash = {}", hex32(&scene.step_hash()));
    Ok(())
}
