use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use glam::Vec2;
use log::{debug, info};

use tile_scene::config::SceneConfig;
use tile_scene::engine::assets::{SpriteAtlas, TileGrid, TileSet};
use tile_scene::engine::game_loop::GameLoop;
use tile_scene::engine::renderer::{DrawList, View};
use tile_scene::game::characters::{Actor, ActorStats, AnimationSet, Mob, Sprite};
use tile_scene::game::level::{Layer, Level, LevelLoader};

/// Demo room size in tiles
const ROOM_COLS: usize = 20;
const ROOM_ROWS: usize = 12;
const ROOM_TILE: u32 = 16;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut args = env::args().skip(1);
    let level_path = args.next();
    let config_path = args.next();

    let config = match &config_path {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("Failed to load configuration {}", path))?,
        None => SceneConfig::default(),
    };

    let level = match &config.seed {
        Some(seed) => Level::with_seed(*seed),
        None => Level::new(),
    };

    let mut level = match &level_path {
        Some(path) => {
            let tilesets = config
                .build_tilesets()
                .context("Failed to build tilesets")?;
            LevelLoader::new(&tilesets)
                .with_prefix(&config.resource_prefix)
                .with_scale(config.scale)
                .load_file(path, level)
                .with_context(|| format!("Failed to load level {}", path))?
        }
        None => {
            info!("No level given, building demo room");
            demo_room(level)
        }
    };

    spawn_mobs(&mut level, &config)?;

    let mut view = View::new(config.view.width, config.view.height).with_debug(config.view.debug);
    view.centre_on(Vec2::ZERO);

    run(&mut level, &view, &config)
}

/// Place every configured MOB; the demo room gets a pair of slimes when
/// nothing is configured
fn spawn_mobs(level: &mut Level, config: &SceneConfig) -> Result<()> {
    for template in &config.mobs {
        for n in 0..template.count {
            let position = level.spawn_point(&template.spawn, Vec2::ZERO);
            let mut mob = template
                .build(position, config.wander)
                .with_context(|| format!("Failed to build mob {}", template.name))?;
            mob.wander(level.rng());
            level.mobs_mut().insert(&format!("{}#{}", template.name, n), mob);
        }
    }

    if config.mobs.is_empty() && level.mobs().is_empty() {
        for n in 0..2 {
            let position = level.spawn_point("slime", Vec2::ZERO);
            let mut mob = slime(position, config);
            mob.wander(level.rng());
            level.mobs_mut().insert(&format!("slime#{}", n), mob);
        }
    }

    info!("Spawned {} mobs", level.mobs().len());
    Ok(())
}

/// Step the level through the configured number of frames
fn run(level: &mut Level, view: &View, config: &SceneConfig) -> Result<()> {
    let mut game_loop = GameLoop::with_timestep(config.fixed_timestep);
    let frame_time = Duration::from_secs_f32(game_loop.fixed_timestep());
    let mut target = DrawList::new();

    for frame in 0..config.frames {
        let steps = game_loop.advance(frame_time);
        for _ in 0..steps {
            level.update(view, game_loop.fixed_timestep());
        }

        target.clear();
        level.render(view, &mut target);

        if frame % 60 == 0 {
            debug!("frame {}: {} draw calls", frame, target.len());
        }
    }

    info!(
        "Ran {} frames ({} updates, {:.1}s simulated), last frame drew {} calls",
        game_loop.frame_count(),
        game_loop.update_count(),
        game_loop.elapsed().as_secs_f32(),
        target.len()
    );
    for (name, mob) in level.mobs().iter() {
        info!(
            "{} at {:?}, {:?} heading {:?}",
            name,
            mob.actor.position(),
            mob.action(),
            mob.heading()
        );
    }
    if view.debug {
        info!("Debug overlay: {} shapes", level.debug(view).len());
    }

    Ok(())
}

/// A walled room centred on the origin
fn demo_room(mut level: Level) -> Level {
    let size = ROOM_TILE * 4;
    level.add_tileset(
        "terrain.tsx",
        TileSet::new(SpriteAtlas::with_cell("terrain", size, size, ROOM_TILE))
            .with_animation(2, vec![2, 3], 0.5),
        1,
    );

    let mut floor = Vec::with_capacity(ROOM_COLS * ROOM_ROWS);
    let mut walls = Vec::with_capacity(ROOM_COLS * ROOM_ROWS);
    for row in 0..ROOM_ROWS {
        for col in 0..ROOM_COLS {
            let edge = row == 0 || col == 0 || row == ROOM_ROWS - 1 || col == ROOM_COLS - 1;
            floor.push(if edge { 0 } else { 3 });
            walls.push(if edge { 1 } else { 0 });
        }
    }

    level.push_layer(Layer::tiles("floor", TileGrid::new(ROOM_COLS, floor), Vec2::ZERO));
    level.push_layer(Layer::colliders("walls", TileGrid::new(ROOM_COLS, walls), Vec2::ZERO));
    level.push_layer(Layer::objects());

    level.offset = Vec2::new(
        (ROOM_COLS as u32 * ROOM_TILE) as f32 / 2.0,
        (ROOM_ROWS as u32 * ROOM_TILE) as f32 / 2.0,
    );
    level.add_spawn_point("slime", Vec2::new(-48.0, -16.0));
    level.add_spawn_point("slime", Vec2::new(40.0, 24.0));
    level
}

fn slime(position: Vec2, config: &SceneConfig) -> Mob {
    let sprite = Sprite::new(SpriteAtlas::with_cell("slime", 64, 64, 16), position);
    let animation = AnimationSet::from_centiseconds(15.0)
        .with_idle(vec![0])
        .with_moves(vec![4, 5], vec![0, 1], vec![8, 9], vec![12, 13]);
    let actor = Actor::new(sprite, ActorStats::with_speed(40.0), animation);
    Mob::new(actor, config.wander)
}
