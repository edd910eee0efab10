use approx::assert_relative_eq;
use rope_sim::{
    catalog, Integrator, InteractionController, Link, Particle, ParticleStore, RelaxationSolver,
    SimulationConfig, SimulationState, TopologyCatalog, Vec2,
};

const DT: f32 = 0.016_67;

fn link_error(particles: &[Particle], links: &[Link]) -> f32 {
    links.iter().map(|link| link.error(particles).abs()).sum()
}

#[test]
fn up_rope_sags_while_relaxation_pulls_links_toward_rest_length() {
    let topology = catalog::up().unwrap();
    let config = SimulationConfig::default();
    let mut store = ParticleStore::from_topology(&topology);
    let integrator = Integrator::from_config(&config);
    let interaction = InteractionController::new(config.grab_radius);
    let solver = RelaxationSolver::new(config.solver_iterations);

    for tick in 0..60 {
        let gravity = store.gravity();
        integrator.step(store.particles_mut(), gravity, DT);
        interaction.apply(store.particles_mut());
        let before = link_error(store.particles(), store.links());

        let (particles, links) = store.split_mut();
        solver.solve(particles, links, interaction.grabbed());
        let after = link_error(store.particles(), store.links());

        assert_eq!(store.particles()[0].position, Vec2::new(400.0, 300.0));
        assert!(
            after < before,
            "tick {}: relaxation did not help ({} -> {})",
            tick,
            before,
            after
        );
    }

    for (initial, current) in topology.particles().iter().zip(store.particles()).skip(1) {
        assert!(
            current.position.y > initial.position.y,
            "particle should have moved down: {:?} -> {:?}",
            initial.position,
            current.position
        );
        assert_relative_eq!(current.position.x, 400.0, epsilon = 1e-3);
    }
}

#[test]
fn state_tick_matches_the_manual_pipeline() {
    let catalog = TopologyCatalog::builtin().unwrap();
    let config = SimulationConfig::default();
    let mut state = SimulationState::new(catalog, config);
    state.select_topology(0);

    let topology = catalog::lague().unwrap();
    let mut store = ParticleStore::from_topology(&topology);
    let integrator = Integrator::from_config(&config);
    let solver = RelaxationSolver::new(config.solver_iterations);

    for _ in 0..20 {
        state.tick(DT);

        let gravity = store.gravity();
        integrator.step(store.particles_mut(), gravity, DT);
        let (particles, links) = store.split_mut();
        solver.solve(particles, links, None);
    }

    assert_eq!(state.particles(), store.particles());
    assert_eq!(state.tick_count(), 20);
}

#[test]
fn balloon_floats_upward() {
    let topology = catalog::balloon().unwrap();
    let catalog = TopologyCatalog::new(vec![topology.clone()]).unwrap();
    let mut state = SimulationState::new(catalog, SimulationConfig::default());

    for _ in 0..60 {
        state.tick(DT);
    }

    assert_eq!(state.particles()[0].position, Vec2::new(400.0, 300.0));
    for (initial, current) in topology.particles().iter().zip(state.particles()).skip(1) {
        assert!(current.position.y < initial.position.y);
    }
}

#[test]
fn zero_dt_tick_keeps_a_resting_rope_still() {
    let catalog = TopologyCatalog::builtin().unwrap();
    let mut state = SimulationState::new(catalog, SimulationConfig::default());
    let before = state.particles().to_vec();

    state.tick(0.0);

    assert_eq!(state.particles(), before.as_slice());
}
