//! Whole-grid behavior of the three passes
//!
//! These drive `Grid::run_pass` and `Grid::step` end to end, so they exercise
//! scan order, the visited flags and the systems together.

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use thermosand_core::MaterialKind;
use thermosand_core::simulation::Pass;
use thermosand_core::world::{FrameStats, Grid, NoopStats, Region, Seed, SimRng, seeding};

/// Scripted entropy: a fixed scan draw and a fixed coin
struct TestRng {
    scan: f32,
    coin: bool,
}

impl TestRng {
    fn forward() -> Self {
        Self {
            scan: 0.0,
            coin: false,
        }
    }

    fn reversed() -> Self {
        Self {
            scan: 0.9,
            coin: false,
        }
    }
}

impl SimRng for TestRng {
    fn gen_bool(&mut self) -> bool {
        self.coin
    }

    fn gen_f32(&mut self) -> f32 {
        self.scan
    }
}

const NO_SEEDS: [Seed; 0] = [];

fn set(grid: &mut Grid, row: usize, col: usize, kind: MaterialKind, pressure: f32, t: f32) {
    grid.cell_mut(row, col).expect("in bounds").set_material(kind, pressure, t);
}

fn region(kind: MaterialKind, rows: (usize, usize), cols: (usize, usize), density: f32) -> Region {
    Region {
        kind,
        row_min: rows.0,
        row_max: rows.1,
        col_min: cols.0,
        col_max: cols.1,
        density,
    }
}

fn scenario_grid(seed: u64) -> Grid {
    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
    let regions = [
        region(MaterialKind::Sand, (1, 4), (5, 46), 0.7),
        region(MaterialKind::Steam, (10, 14), (6, 49), 1.0),
        region(MaterialKind::Plutonium, (0, 0), (0, 49), 1.0),
        region(MaterialKind::Heatsink, (19, 19), (0, 49), 1.0),
    ];
    let seeds = seeding::fill_regions(&regions, &mut rng).expect("valid regions");
    Grid::new(20, 50, seeds).expect("valid grid")
}

// ============================================================================
// Topology
// ============================================================================

#[test]
fn test_topology_is_symmetric() {
    let grid = Grid::new(5, 7, NO_SEEDS).expect("valid grid");

    for (index, cell) in grid.cells().iter().enumerate() {
        for (dir, neighbor) in cell.neighbors() {
            assert_eq!(
                grid.cells()[neighbor].neighbor(dir.opposite()),
                Some(index),
                "cell {:?} -> {}",
                cell.coords(),
                dir.label()
            );
        }
    }
}

#[test]
fn test_neighbor_coordinates_match_direction() {
    let grid = Grid::new(4, 4, NO_SEEDS).expect("valid grid");
    let cell = grid.cell(1, 2).expect("in bounds");

    for (dir, neighbor) in cell.neighbors() {
        let (dr, dc) = dir.offset();
        let expected = ((1 + dr) as usize, (2 + dc) as usize);
        assert_eq!(grid.cells()[neighbor].coords(), expected);
    }
}

// ============================================================================
// Temperature
// ============================================================================

#[test]
fn test_temperature_pass_conserves_heat() {
    // Molten sand everywhere: uniform conductance, no passive heat, no transitions
    let mut grid = Grid::new(4, 5, NO_SEEDS).expect("valid grid");
    for row in 0..4 {
        for col in 0..5 {
            let t = 500.0 + (row * 37 + col * 53) as f32 % 300.0;
            set(&mut grid, row, col, MaterialKind::MoltenSand, 1.0, t);
        }
    }
    let before = grid.total_temperature();
    let mut rng = Xoshiro256StarStar::seed_from_u64(11);

    for _ in 0..5 {
        grid.run_pass(Pass::Temperature, &mut rng, &mut NoopStats);
    }

    assert!((grid.total_temperature() - before).abs() < 0.05);
    assert_eq!(grid.count_of(MaterialKind::MoltenSand), 20);
}

#[test]
fn test_temperature_pass_boils_water() {
    // Water at 99 receives exactly +2 from plutonium at 107
    let mut grid = Grid::new(1, 2, NO_SEEDS).expect("valid grid");
    set(&mut grid, 0, 0, MaterialKind::Water, 1.0, 99.0);
    set(&mut grid, 0, 1, MaterialKind::Plutonium, 1.0, 107.0);
    let mut stats = FrameStats::default();

    let report = grid.run_pass(Pass::Temperature, &mut TestRng::forward(), &mut stats);

    let steam = grid.cell(0, 0).expect("in bounds");
    assert_eq!(steam.material(), MaterialKind::Steam);
    assert_eq!(steam.raw_pressure(), 4.0);
    assert_eq!(steam.temperature(), 101.0);

    // Plutonium was touched as a neighbor, so it never self-heated this pass
    assert_eq!(grid.cell(0, 1).map(|c| c.temperature()), Some(105.0));
    assert_eq!(report.updates, 1);
    assert_eq!(report.cells_visited, 2);
    assert_eq!(stats.state_changes, 1);
}

#[test]
fn test_pass_report_tracks_scan_temperature() {
    let mut grid = Grid::new(2, 2, [Seed::new(0, 0, MaterialKind::Barrier)]).expect("valid grid");

    let report = grid.run_pass(Pass::Temperature, &mut TestRng::reversed(), &mut NoopStats);

    assert!(report.reversed);
    assert_eq!(report.cells_scanned, 4);
    assert_eq!(report.average_temperature(), 20.0);
    assert_eq!(report.updates, 0);
    assert_eq!(report.cells_visited, 0);
}

// ============================================================================
// Pressure
// ============================================================================

#[test]
fn test_pressure_deficit_merge() {
    let mut grid = Grid::new(1, 2, NO_SEEDS).expect("valid grid");
    set(&mut grid, 0, 0, MaterialKind::Water, 0.4, 20.0);
    set(&mut grid, 0, 1, MaterialKind::Water, 0.4, 20.0);

    grid.run_pass(Pass::Pressure, &mut TestRng::forward(), &mut NoopStats);

    assert_eq!(grid.material_at(0, 0), Some(MaterialKind::Air));
    let merged = grid.cell(0, 1).expect("in bounds");
    assert_eq!(merged.material(), MaterialKind::Water);
    assert!((merged.raw_pressure() - 0.8).abs() < 1e-6);
    assert_eq!(merged.temperature(), 40.0);
}

#[test]
fn test_reversed_scan_processes_right_column_first() {
    let mut grid = Grid::new(1, 2, NO_SEEDS).expect("valid grid");
    set(&mut grid, 0, 0, MaterialKind::Water, 0.4, 20.0);
    set(&mut grid, 0, 1, MaterialKind::Water, 0.4, 20.0);

    let report = grid.run_pass(Pass::Pressure, &mut TestRng::reversed(), &mut NoopStats);

    assert!(report.reversed);
    assert_eq!(grid.material_at(0, 1), Some(MaterialKind::Air));
    assert_eq!(grid.material_at(0, 0), Some(MaterialKind::Water));
}

#[test]
fn test_equilibrium_pressure_is_untouched_but_visited() {
    let mut grid = Grid::new(1, 2, NO_SEEDS).expect("valid grid");
    set(&mut grid, 0, 0, MaterialKind::Sand, 1.0, 37.5);
    let mut stats = FrameStats::default();

    let report = grid.run_pass(Pass::Pressure, &mut TestRng::forward(), &mut stats);

    let cell = grid.cell(0, 0).expect("in bounds");
    assert_eq!(cell.material(), MaterialKind::Sand);
    assert_eq!(cell.raw_pressure(), 1.0);
    assert_eq!(cell.temperature(), 37.5);
    assert!(cell.is_updated());

    assert_eq!(grid.material_at(0, 1), Some(MaterialKind::Air));
    assert!(!grid.cell(0, 1).expect("in bounds").is_updated());
    assert_eq!(report.updates, 0);
    assert_eq!(report.cells_visited, 1);
    assert_eq!(stats.pressure_exchanges, 0);
}

#[test]
fn test_vented_cells_are_not_processed_again() {
    // Steam at p=3 vents into both neighbors; they are marked and skipped
    let mut grid = Grid::new(1, 3, NO_SEEDS).expect("valid grid");
    set(&mut grid, 0, 1, MaterialKind::Steam, 3.0, 150.0);
    let mut stats = FrameStats::default();

    let report = grid.run_pass(Pass::Pressure, &mut TestRng::forward(), &mut stats);

    assert_eq!(grid.count_of(MaterialKind::Steam), 3);
    for col in 0..3 {
        let cell = grid.cell(0, col).expect("in bounds");
        assert_eq!(cell.raw_pressure(), 1.0);
    }
    assert_eq!(report.updates, 1);
    assert_eq!(stats.pressure_exchanges, 1);
}

// ============================================================================
// Movement
// ============================================================================

#[test]
fn test_sand_falls_through_air() {
    let mut grid = Grid::new(2, 1, [Seed::new(1, 0, MaterialKind::Sand)]).expect("valid grid");
    let mut stats = FrameStats::default();

    grid.run_pass(Pass::Movement, &mut TestRng::forward(), &mut stats);

    assert_eq!(grid.material_at(0, 0), Some(MaterialKind::Sand));
    assert_eq!(grid.material_at(1, 0), Some(MaterialKind::Air));
    assert_eq!(stats.cells_moved, 1);
}

#[test]
fn test_moved_cell_is_not_moved_twice() {
    // A sand column over air: the scan meets row 1 first, drops it to row 0,
    // then row 2 drops into the vacated row 1 and nothing moves further
    let mut grid = Grid::new(
        3,
        1,
        [
            Seed::new(1, 0, MaterialKind::Sand),
            Seed::new(2, 0, MaterialKind::Sand),
        ],
    )
    .expect("valid grid");
    let mut stats = FrameStats::default();

    grid.run_pass(Pass::Movement, &mut TestRng::forward(), &mut stats);

    assert_eq!(grid.material_at(0, 0), Some(MaterialKind::Sand));
    assert_eq!(grid.material_at(1, 0), Some(MaterialKind::Sand));
    assert_eq!(grid.material_at(2, 0), Some(MaterialKind::Air));
    assert_eq!(stats.cells_moved, 2);
}

#[test]
fn test_occluded_diagonal_is_never_chosen() {
    //  ul  %  ur
    //  .   ~  %
    //  .   .  .
    let seeds = [
        Seed::new(1, 1, MaterialKind::Steam),
        Seed::new(2, 1, MaterialKind::Barrier),
        Seed::new(1, 2, MaterialKind::Barrier),
    ];

    for seed in 0..20 {
        let mut grid = Grid::new(3, 3, seeds).expect("valid grid");
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);

        grid.run_pass(Pass::Movement, &mut rng, &mut NoopStats);

        // ur would weigh 5 like ul, but both its cardinals are sealed
        assert_eq!(grid.material_at(2, 2), Some(MaterialKind::Air));
        assert_eq!(grid.material_at(2, 0), Some(MaterialKind::Steam));
    }
}

// ============================================================================
// Full frames
// ============================================================================

#[test]
fn test_step_runs_passes_in_order() {
    let mut grid = Grid::new(1, 2, NO_SEEDS).expect("valid grid");
    set(&mut grid, 0, 0, MaterialKind::Water, 1.0, 20.0);

    let report = grid.step(&mut TestRng::forward(), &mut NoopStats);

    assert_eq!(report.temperature.pass, Pass::Temperature);
    assert_eq!(report.pressure.pass, Pass::Pressure);
    assert_eq!(report.movement.pass, Pass::Movement);
}

#[test]
fn test_default_scenario_keeps_floor_and_ceiling() {
    let mut grid = scenario_grid(42);
    let mut rng = Xoshiro256StarStar::seed_from_u64(42);
    let mut stats = FrameStats::default();

    assert_eq!(grid.count_of(MaterialKind::Plutonium), 50);
    assert_eq!(grid.count_of(MaterialKind::Heatsink), 50);
    assert_eq!(grid.count_of(MaterialKind::Steam), 5 * 44);

    for _ in 0..30 {
        grid.step(&mut rng, &mut stats);
    }

    // Neither row can be displaced: every move into them weighs below zero
    assert_eq!(grid.count_of(MaterialKind::Plutonium), 50);
    assert_eq!(grid.count_of(MaterialKind::Heatsink), 50);
    for col in 0..50 {
        assert_eq!(grid.material_at(0, col), Some(MaterialKind::Plutonium));
        assert_eq!(grid.material_at(19, col), Some(MaterialKind::Heatsink));
    }

    assert!(grid.cells().iter().all(|c| c.temperature().is_finite()));
    assert!(stats.cells_moved > 0);
    assert!(stats.state_changes > 0);
}

#[test]
fn test_same_seed_same_outcome() {
    let run = |seed: u64| {
        let mut grid = scenario_grid(seed);
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        for _ in 0..10 {
            grid.step(&mut rng, &mut NoopStats);
        }
        (0..grid.rows())
            .flat_map(|row| (0..grid.cols()).map(move |col| (row, col)))
            .map(|(row, col)| grid.material_at(row, col))
            .collect::<Vec<_>>()
    };

    assert_eq!(run(7), run(7));
}
