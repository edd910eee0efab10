use rope_sim::*;
use std::thread;
use std::time::Duration;

fn print_snapshot(snapshot: &Snapshot) {
    println!(
        "[{}/{}] {} ticks={} paused={} rate={:.1}Hz grabbed={:?}",
        snapshot.topology_index + 1,
        snapshot.topology_count,
        snapshot.topology_name,
        snapshot.ticks,
        snapshot.is_paused(),
        snapshot.ticks_per_second(),
        snapshot.grabbed,
    );
    if let Some(tail) = snapshot.particles.last() {
        println!("  tail particle at {:?}", tail.position);
    }
}

fn main() -> Result<(), SimulationError> {
    let engine = RopeEngine::with_builtin_topologies(SimulationConfig::default())?;
    print_snapshot(&engine.snapshot());

    engine.toggle_pause();
    thread::sleep(Duration::from_millis(500));
    print_snapshot(&engine.snapshot());

    // Drag the Up rope's pin sideways, then let go.
    engine.next_topology();
    engine.set_paused(false);
    if engine.begin_grab(Vec2::new(400.0, 300.0)).is_some() {
        for step in 0..30 {
            engine.set_pointer(Vec2::new(400.0 + step as f32 * 5.0, 300.0));
            thread::sleep(Duration::from_millis(16));
        }
        engine.end_grab();
    }
    print_snapshot(&engine.snapshot());

    while engine.next_topology() {
        engine.set_paused(false);
        thread::sleep(Duration::from_millis(250));
        print_snapshot(&engine.snapshot());
    }

    engine.shutdown();
    Ok(())
}
