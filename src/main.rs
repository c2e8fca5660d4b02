use ggez::{self, conf, event, graphics, timer, Context, ContextBuilder, GameError, GameResult};
use ggez::event::{KeyCode, KeyMods};
use specs::prelude::*;
use std::env;

use flocking::components::{Playing, Swarm};
use flocking::systems::{DrawSystem, FlockSystem};
use flocking::{Config, Flock, Rgb};


struct Game {
    world: World,
    updater: Dispatcher<'static, 'static>,
    fps: u32,
    background: Rgb,
}

fn title(playing: bool) -> &'static str {
    if playing { "Playing" } else { "Paused" }
}

impl Game {
    fn new(_ctx: &mut Context, config: &Config) -> GameResult<Self> {
        let mut world = World::new();
        let mut updater = DispatcherBuilder::new()
            .with(
                FlockSystem,
                "FlockSystem",
                &[]
            )
            .build();
        updater.setup(&mut world);
        world.insert(Playing(false));

        let seed = config.seed.unwrap_or_else(rand::random);
        log::info!("Seeding flocks from {}", seed);
        let params = config.params();
        for (i, spec) in config.flocks.iter().enumerate() {
            let flock = Flock::spawn(spec.color, spec.size, params, seed.wrapping_add(i as u64))
                .map_err(|e| GameError::ConfigError(e.to_string()))?;
            world.create_entity()
                .with(Swarm(flock))
                .build();
        }
        log::info!(
            "{} flocks, {} boids, {:?} update",
            config.flocks.len(),
            config.flocks.iter().map(|f| f.size).sum::<usize>(),
            params.simulation.update_mode
        );

        Ok(
            Self {world, updater, fps: config.fps, background: config.background}
        )
    }

    fn toggle(&mut self, ctx: &mut Context) {
        let playing = {
            let mut playing = self.world.write_resource::<Playing>();
            playing.0 = !playing.0;
            playing.0
        };
        log::info!("{}", title(playing));
        graphics::set_window_title(ctx, title(playing));
    }
}

impl event::EventHandler for Game {
    fn update(&mut self, ctx: &mut Context) -> GameResult {
        while timer::check_update_time(ctx, self.fps) {
            self.updater.dispatch(&self.world);
            self.world.maintain();
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult {
        let Rgb(r, g, b) = self.background;
        graphics::clear(ctx, graphics::Color::from_rgb(r, g, b));
        {
            let mut drawer = DrawSystem::new(ctx);
            drawer.run_now(&self.world);
            drawer.finish()?;
        }
        graphics::present(ctx)?;
        Ok(())
    }

    fn key_down_event(&mut self, ctx: &mut Context, keycode: KeyCode, _keymods: KeyMods, repeat: bool) {
        match keycode {
            KeyCode::Space if !repeat => self.toggle(ctx),
            KeyCode::Escape => event::quit(ctx),
            _ => {}
        }
    }
}

fn main() -> GameResult {
    env_logger::init();

    // optional first argument: a TOML config file
    let config = match env::args().nth(1) {
        Some(path) => Config::load(&path),
        None => Ok(Config::default()),
    }
    .map_err(|e| GameError::ConfigError(e.to_string()))?;

    let cb = ContextBuilder::new("flocking", "ggez")
        .window_setup(
            conf::WindowSetup::default()
                .title(title(false))
        )
        .window_mode(
            conf::WindowMode::default()
                .dimensions(config.bounds.width as f32, config.bounds.height as f32)
        );
    let (ctx, event_loop) = &mut cb.build()?;

    let state = &mut Game::new(ctx, &config)?;
    event::run(ctx, event_loop, state)
}
