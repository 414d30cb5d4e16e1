//! # Frame Simulation
//!
//! Headless run of a 30Hz simulation under a 120Hz render loop:
//! - 8x8 region map, every region visible
//! - 200 walkers crossing region edges
//! - a projectile that respawns every second (never blended)
//! - a camera following the first walker
//!
//! Usage: `frame_sim [config.toml]`

use std::time::{Duration, Instant};

use tickframe::{FrameStats, InterpolationConfig, TickClock, ViewOutcome, WorldInterpolator};
use tickframe_core::{GameWorld, ObjectSlotId, RegionMap, WorldPoint3d, HALF_CIRCLE, WORLD_ONE};

const GRID: u16 = 8;
const WALKERS: usize = 200;
const FRAME_RATE: u64 = 120;
const SECONDS: u64 = 10;

struct Walker {
    slot: ObjectSlotId,
    velocity: (i16, i16),
}

fn load_config() -> InterpolationConfig {
    let Some(path) = std::env::args().nth(1) else {
        return InterpolationConfig::default();
    };

    let source = match std::fs::read_to_string(&path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("cannot read {path}: {err}");
            std::process::exit(1);
        }
    };
    match InterpolationConfig::from_toml_str(&source) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{path}: {err}");
            std::process::exit(1);
        }
    }
}

fn spawn_walkers(world: &mut GameWorld) -> Vec<Walker> {
    let extent = i32::from(GRID) * i32::from(WORLD_ONE);
    (0..WALKERS)
        .filter_map(|i| {
            let i = i32::try_from(i).ok()?;
            let x = i16::try_from((i * 787 + 300) % extent).ok()?;
            let y = i16::try_from((i * 1_433 + 500) % extent).ok()?;
            let velocity = (i16::try_from(i % 7 - 3).ok()? * 40, i16::try_from(i % 5 - 2).ok()? * 40);
            let slot = world.spawn_object(WorldPoint3d::new(x, y, 0))?;
            Some(Walker { slot, velocity })
        })
        .collect()
}

/// One simulation tick: walkers step and bounce off the map edge.
fn step(world: &mut GameWorld, walkers: &mut [Walker]) {
    for walker in walkers.iter_mut() {
        let Some(location) = world.objects.get(walker.slot).map(|object| object.location) else {
            continue;
        };
        let next = WorldPoint3d::new(
            location.x.saturating_add(walker.velocity.0),
            location.y.saturating_add(walker.velocity.1),
            location.z,
        );
        if !world.teleport_object(walker.slot, next) {
            walker.velocity = (-walker.velocity.0, -walker.velocity.1);
        }
    }
}

fn follow(world: &mut GameWorld, slot: ObjectSlotId, tick: u64) {
    if let Some(object) = world.objects.get(slot) {
        let (origin, region) = (object.location, object.region);
        world.view.origin = WorldPoint3d::new(origin.x, origin.y, WORLD_ONE / 2);
        world.view.origin_region = region;
    }
    // Half a turn every two seconds, wrapping through zero.
    let yaw = (tick % 60) * u64::from(HALF_CIRCLE.unsigned_abs()) / 30;
    world.view.look(i16::try_from(yaw).unwrap_or(0), 0);
}

fn main() {
    let config = load_config();

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║              TICKFRAME - FRAME INTERPOLATION SIM                 ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();
    println!("┌─ CONFIGURATION ─────────────────────────────────────────────────┐");
    println!("│ Interpolation:      {}", if config.enabled { "enabled" } else { "disabled" });
    println!("│ Speed Limit:        {} world units / tick", config.speed_limit);
    println!("│ Tick Rate:          {} Hz", config.tick_rate);
    println!("│ Frame Rate:         {FRAME_RATE} Hz");
    println!("│ Walkers:            {WALKERS}");
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();

    let mut world = GameWorld::new(RegionMap::grid(GRID, GRID, WORLD_ONE), tickframe_core::MAXIMUM_OBJECTS_PER_MAP);
    world.map.set_all_visible(true);

    let mut walkers = spawn_walkers(&mut world);
    let Some(followed) = walkers.first().map(|walker| walker.slot) else {
        eprintln!("no walkers spawned");
        std::process::exit(1);
    };
    let mut projectile: Option<ObjectSlotId> = None;
    follow(&mut world, followed, 0);

    let mut interpolator = WorldInterpolator::new(config);
    interpolator.initialize(&world);
    let mut clock = TickClock::from_config(&config);

    let frame_time = Duration::from_micros(1_000_000 / FRAME_RATE);
    let mut totals = FrameStats::default();
    let mut view_outcomes = [0u64; 4];
    let mut tick: u64 = 0;
    let start = Instant::now();

    for _ in 0..FRAME_RATE * SECONDS {
        clock.advance(frame_time);

        for _ in 0..clock.drain_ticks() {
            interpolator.restore(&mut world);

            step(&mut world, &mut walkers);
            tick += 1;
            if tick % u64::from(config.tick_rate) == 0 {
                if let Some(slot) = projectile.take() {
                    world.despawn_object(slot);
                }
                projectile = world.spawn_object(WorldPoint3d::new(100, 100, 0));
            } else if let Some(slot) = projectile {
                // Crosses the map in a few ticks: too fast to blend.
                let x = i16::try_from(tick % 30 * 250 % 8000 + 100).unwrap_or(100);
                world.teleport_object(slot, WorldPoint3d::new(x, 100, 0));
            }
            follow(&mut world, followed, tick);

            interpolator.rotate(&world);
            interpolator.request_view_capture();
        }

        let t = clock.heartbeat_fraction();
        let stats = interpolator.interpolate_objects(&mut world, t);
        totals.blended += stats.blended;
        totals.skipped_unused += stats.skipped_unused;
        totals.skipped_invisible += stats.skipped_invisible;
        totals.skipped_too_fast += stats.skipped_too_fast;
        totals.relinked += stats.relinked;
        totals.snapped += stats.snapped;

        let index = match interpolator.interpolate_view(&mut world, t) {
            ViewOutcome::Skipped => 0,
            ViewOutcome::Blended => 1,
            ViewOutcome::Relinked(_) => 2,
            ViewOutcome::Snapped => 3,
        };
        view_outcomes[index] += 1;
    }

    let elapsed = start.elapsed();
    let frames = FRAME_RATE * SECONDS;
    let clock_stats = clock.stats();

    println!("┌─ RESULTS ───────────────────────────────────────────────────────┐");
    println!("│ Frames:             {frames}");
    println!("│ Ticks:              {}", clock.tick_count());
    println!("│ Catch-up frames:    {}", clock_stats.catch_up_frames);
    println!("│ Objects blended:    {}", totals.blended);
    println!("│ Skipped (unused):   {}", totals.skipped_unused);
    println!("│ Skipped (hidden):   {}", totals.skipped_invisible);
    println!("│ Skipped (too fast): {}", totals.skipped_too_fast);
    println!("│ Relinked:           {}", totals.relinked);
    println!("│ Snapped:            {}", totals.snapped);
    println!(
        "│ View:               {} blended, {} relinked, {} snapped, {} skipped",
        view_outcomes[1], view_outcomes[2], view_outcomes[3], view_outcomes[0]
    );
    println!(
        "│ Wall time:          {:.2} ms ({} us / frame)",
        elapsed.as_secs_f64() * 1000.0,
        elapsed.as_micros() / u128::from(frames)
    );
    println!("└──────────────────────────────────────────────────────────────────┘");

    interpolator.teardown();
}
