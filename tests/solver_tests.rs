use approx::assert_relative_eq;
use rope_sim::{
    dynamics::solver::{LinkOutcome, RelaxationSolver},
    Link, Particle, Vec2,
};

fn squared_error(particles: &[Particle], links: &[Link]) -> f32 {
    links
        .iter()
        .map(|link| {
            let error = link.error(particles);
            error * error
        })
        .sum()
}

#[test]
fn free_pair_splits_correction_evenly() {
    let mut particles = vec![
        Particle::free(Vec2::new(0.0, 0.0)),
        Particle::free(Vec2::new(100.0, 0.0)),
    ];
    let links = [Link::new(0, 1, 80.0)];

    RelaxationSolver::relax_once(&mut particles, &links, None);

    assert_relative_eq!(particles[0].position.x, 10.0, epsilon = 1e-4);
    assert_relative_eq!(particles[1].position.x, 90.0, epsilon = 1e-4);
    assert_eq!(particles[0].position.y, 0.0);
    assert_eq!(particles[1].position.y, 0.0);
}

#[test]
fn free_pair_split_along_a_diagonal() {
    let mut particles = vec![
        Particle::free(Vec2::new(0.0, 0.0)),
        Particle::free(Vec2::new(60.0, 80.0)),
    ];
    let links = [Link::new(0, 1, 80.0)];

    RelaxationSolver::relax_once(&mut particles, &links, None);

    // each end moves 10 units toward the other along the 3-4-5 direction
    assert_relative_eq!(particles[0].position.x, 6.0, epsilon = 1e-4);
    assert_relative_eq!(particles[0].position.y, 8.0, epsilon = 1e-4);
    assert_relative_eq!(particles[1].position.x, 54.0, epsilon = 1e-4);
    assert_relative_eq!(particles[1].position.y, 72.0, epsilon = 1e-4);
}

#[test]
fn link_at_rest_length_is_left_alone() {
    let mut particles = vec![
        Particle::free(Vec2::new(0.0, 0.0)),
        Particle::free(Vec2::new(30.0, 40.0)),
    ];
    let before = particles.clone();
    let link = Link::new(0, 1, 50.0);

    let outcome = RelaxationSolver::resolve_link(&mut particles, &link, None);

    assert_eq!(outcome, LinkOutcome::AtRest);
    assert_eq!(particles, before);
}

#[test]
fn relaxation_reduces_squared_error_every_pass() {
    let mut particles = vec![
        Particle::free(Vec2::new(0.0, 0.0)),
        Particle::free(Vec2::new(60.0, 10.0)),
        Particle::free(Vec2::new(110.0, -20.0)),
        Particle::free(Vec2::new(170.0, 5.0)),
        Particle::free(Vec2::new(215.0, 40.0)),
    ];
    let links: Vec<Link> = (0..4).map(|i| Link::new(i, i + 1, 50.0)).collect();

    let mut previous = squared_error(&particles, &links);
    for pass in 0..5 {
        RelaxationSolver::relax_once(&mut particles, &links, None);
        let current = squared_error(&particles, &links);
        assert!(
            current < previous,
            "pass {} did not reduce error: {} -> {}",
            pass,
            previous,
            current
        );
        previous = current;
    }
}

#[test]
fn links_are_processed_in_definition_order() {
    // Particle 1 is shared; the later link sees the earlier correction.
    let mut particles = vec![
        Particle::locked(Vec2::new(0.0, 0.0)),
        Particle::free(Vec2::new(20.0, 0.0)),
        Particle::locked(Vec2::new(30.0, 0.0)),
    ];
    let links = [Link::new(0, 1, 10.0), Link::new(1, 2, 5.0)];

    RelaxationSolver::relax_once(&mut particles, &links, None);

    // first link pulls 1 to x=10, second pushes it to 5 units from 2
    assert_relative_eq!(particles[1].position.x, 25.0, epsilon = 1e-4);
}

#[test]
fn over_constrained_links_do_not_move_pins() {
    let mut particles = vec![
        Particle::locked(Vec2::new(0.0, 0.0)),
        Particle::locked(Vec2::new(100.0, 0.0)),
    ];
    let links = [Link::new(0, 1, 10.0)];

    let metrics = RelaxationSolver::new(5).solve(&mut particles, &links, None);

    assert_eq!(metrics.links_fixed, 5);
    assert_eq!(particles[1].position, Vec2::new(100.0, 0.0));
}
