use specs::prelude::*;

use crate::components::*;

pub struct FlockSystem;
impl<'a> System<'a> for FlockSystem {
	type SystemData = (
		ReadExpect<'a, Playing>,
		Write<'a, Ticks>,
		WriteStorage<'a, Swarm>,
	);

	fn run(&mut self, (playing, mut ticks, mut swarms): Self::SystemData) {
		if !playing.0 {
			return;
		}
		// flocks never see each other, so they can step side by side
		(&mut swarms).par_join()
			.for_each(|swarm| swarm.0.update());
		ticks.0 += 1;
	}
}

#[cfg(feature = "window")]
pub use self::draw::DrawSystem;

#[cfg(feature = "window")]
mod draw {
	use ggez::{Context, GameResult, graphics::*};
	use specs::prelude::*;
	use crate::components::*;

	/// Tessellates every agent of every flock into one mesh and draws it.
	/// Errors are kept until `finish` since `System::run` cannot return them.
	pub struct DrawSystem<'draw> {
		ctx: &'draw mut Context,
		result: GameResult,
	}

	impl<'draw> DrawSystem<'draw> {
		pub fn new(ctx: &'draw mut Context) -> Self {
			Self { ctx, result: Ok(()) }
		}

		pub fn finish(self) -> GameResult {
			self.result
		}

		fn draw_swarms(&mut self, swarms: &ReadStorage<Swarm>) -> GameResult {
			let mut mesh = MeshBuilder::new();
			let mut triangles = 0;
			for swarm in swarms.join() {
				let boid = swarm.0.params().boid;
				for agent in swarm.0.agents() {
					let c = agent.color();
					let points: Vec<[f32; 2]> = agent
						.silhouette(boid.length, boid.width)
						.iter()
						.map(|p| [p.x as f32, p.y as f32])
						.collect();
					mesh.polygon(DrawMode::fill(), &points, Color::from_rgb(c.0, c.1, c.2))?;
					triangles += 1;
				}
			}
			// an empty builder has nothing to tessellate
			if triangles == 0 {
				return Ok(());
			}
			let mesh = mesh.build(self.ctx)?;
			draw(self.ctx, &mesh, DrawParam::default())
		}
	}

	impl<'draw, 'world> System<'world> for DrawSystem<'draw> {
		type SystemData = ReadStorage<'world, Swarm>;

		fn run(&mut self, swarms: Self::SystemData) {
			self.result = self.draw_swarms(&swarms);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::{Params, Rgb};
	use crate::flock::Flock;

	fn world(playing: bool) -> (World, Dispatcher<'static, 'static>) {
		let mut world = World::new();
		let mut updater = DispatcherBuilder::new()
			.with(FlockSystem, "FlockSystem", &[])
			.build();
		updater.setup(&mut world);
		world.insert(Playing(playing));
		for seed in 0..3 {
			world.create_entity()
				.with(Swarm(Flock::spawn(Rgb(200, 0, 0), 10, Params::default(), seed).unwrap()))
				.build();
		}
		(world, updater)
	}

	fn positions(world: &World) -> Vec<(f64, f64)> {
		let swarms = world.read_storage::<Swarm>();
		(&swarms).join()
			.flat_map(|swarm| swarm.0.agents().iter().map(|a| (a.position.x, a.position.y)).collect::<Vec<_>>())
			.collect()
	}

	#[test]
	fn paused_world_stands_still() {
		let (world, mut updater) = world(false);
		let before = positions(&world);
		updater.dispatch(&world);
		assert_eq!(positions(&world), before);
		assert_eq!(world.read_resource::<Ticks>().0, 0);
	}

	#[test]
	fn playing_world_steps_every_flock() {
		let (mut world, mut updater) = world(true);
		updater.dispatch(&world);
		updater.dispatch(&world);
		world.maintain();
		assert_eq!(world.read_resource::<Ticks>().0, 2);
		let swarms = world.read_storage::<Swarm>();
		assert!((&swarms).join().all(|swarm| swarm.0.ticks() == 2));
	}

	#[test]
	fn pausing_stops_the_clock() {
		let (mut world, mut updater) = world(true);
		updater.dispatch(&world);
		world.insert(Playing(false));
		let before = positions(&world);
		updater.dispatch(&world);
		assert_eq!(positions(&world), before);
		assert_eq!(world.read_resource::<Ticks>().0, 1);
		world.maintain();
	}
}
