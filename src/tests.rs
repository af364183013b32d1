#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::num::NonZero;

    use itertools::Itertools;
    use proptest::prelude::*;
    use unordered_pair::UnorderedPair;
    use varisat::{Lit, Var};

    use crate::builder::{BuilderInvalidReason, GridBuilder};
    use crate::cell::CellKind;
    use crate::encoder::{AtMostOne, Family, SolveOptions};
    use crate::engine::{BruteForceEngine, SatEngine, SolverFailure, Verdict};
    use crate::grid::{Grid, GridError, MalformedReason};
    use crate::location::Location;
    use crate::puzzle::{to_text, PuzzleFile};
    use crate::solution::Solution;
    use crate::solver::{GridSolver, Outcome, SolveError};
    use crate::step::SquareStep;
    use crate::validate::{Violation, VisiblePair};

    // the sample puzzle shipped with the original command-line program
    const DEMO: &[&[i64]] = &[
        &[-1, -1, -1, -1, -1, 3, -1, -1, -1, -1],
        &[-1, -1, -1, -1, 2, -1, 2, -1, -2, 1],
        &[-1, -1, -1, -1, -2, -1, -1, -1, -1, -1],
        &[0, -1, -1, 3, -1, -2, -1, -1, -1, 2],
        &[-2, -1, -1, -1, -1, -1, -1, -2, -1, -1],
        &[-1, -1, 0, -1, -1, -1, -1, -1, -1, -2],
        &[1, -1, -1, -1, 1, -1, 3, -1, -1, 1],
        &[-1, -1, -1, -1, -1, 1, -1, -1, -1, -1],
        &[-2, 0, -1, 1, -1, 2, -1, -1, -1, -1],
        &[-1, -1, -1, -1, 2, -1, -1, -1, -1, -1],
    ];

    fn dims(rows: usize, cols: usize) -> (NonZero<usize>, NonZero<usize>) {
        (NonZero::new(rows).unwrap(), NonZero::new(cols).unwrap())
    }

    fn lights_of(outcome: &Outcome) -> Vec<Location> {
        outcome.solution().expect("expected a solution").lights()
    }

    /// Try every placement of lights, judging each by the validator alone.
    fn exhaustively_solvable(grid: &Grid) -> bool {
        let whites = grid.white_cells().collect_vec();
        (0..1u32 << whites.len()).any(|bits| {
            let lights = whites.iter()
                .enumerate()
                .filter(|(i, _)| (bits >> i) & 1 == 1)
                .map(|(_, location)| *location)
                .collect_vec();
            Solution::from_lights(grid.clone(), &lights).unwrap().validate().is_ok()
        })
    }

    struct FaultyEngine(usize);

    impl SatEngine for FaultyEngine {
        fn add_var(&mut self) -> Var {
            self.0 += 1;
            Var::from_index(self.0 - 1)
        }

        fn add_clause(&mut self, _clause: &[Lit]) {}

        fn solve(&mut self) -> Result<Verdict, SolverFailure> {
            Err(SolverFailure::Fault("out of memory".to_string()))
        }
    }

    /// Claims every variable is true, whatever the clauses say.
    struct LyingEngine(usize);

    impl SatEngine for LyingEngine {
        fn add_var(&mut self) -> Var {
            self.0 += 1;
            Var::from_index(self.0 - 1)
        }

        fn add_clause(&mut self, _clause: &[Lit]) {}

        fn solve(&mut self) -> Result<Verdict, SolverFailure> {
            Ok(Verdict::Satisfiable(vec![true; self.0]))
        }
    }

    /// Answers with a model one variable short.
    struct ForgetfulEngine(usize);

    impl SatEngine for ForgetfulEngine {
        fn add_var(&mut self) -> Var {
            self.0 += 1;
            Var::from_index(self.0 - 1)
        }

        fn add_clause(&mut self, _clause: &[Lit]) {}

        fn solve(&mut self) -> Result<Verdict, SolverFailure> {
            Ok(Verdict::Satisfiable(vec![false; self.0.saturating_sub(1)]))
        }
    }

    #[test]
    fn reject_malformed_grids() {
        assert_eq!(Grid::from_rows(vec![]), Err(GridError::Malformed(MalformedReason::Empty)));
        assert_eq!(Grid::from_rows(vec![vec![]]), Err(GridError::Malformed(MalformedReason::Empty)));
        assert_eq!(
            Grid::from_codes(&[&[-1, -1], &[-1]]),
            Err(GridError::Malformed(MalformedReason::Ragged { row: 1, expected: 2, found: 1 }))
        );
        assert_eq!(
            Grid::from_codes(&[&[-1, 5]]),
            Err(GridError::Malformed(MalformedReason::UnknownCode { location: Location(0, 1), code: 5 }))
        );
        assert_eq!(
            Grid::from_codes(&[&[-3]]),
            Err(GridError::Malformed(MalformedReason::UnknownCode { location: Location(0, 0), code: -3 }))
        );
    }

    #[test]
    fn cell_kinds_and_bounds() {
        let grid = Grid::from_codes(&[&[-1, -2], &[0, 4]]).unwrap();
        assert_eq!(grid.dims(), (2, 2));
        assert_eq!(grid.cell_kind(Location(0, 0)), Ok(CellKind::White));
        assert_eq!(grid.cell_kind(Location(0, 1)), Ok(CellKind::BlackBlank));
        assert_eq!(grid.cell_kind(Location(1, 0)), Ok(CellKind::BlackClued(0)));
        assert_eq!(grid.cell_kind(Location(1, 1)), Ok(CellKind::BlackClued(4)));
        assert_eq!(
            grid.cell_kind(Location(2, 0)),
            Err(GridError::OutOfBounds { location: Location(2, 0), rows: 2, cols: 2 })
        );
        assert!(grid.cell_kind(Location(0, usize::MAX)).is_err());
        assert_eq!(CellKind::BlackClued(3).code(), 3);
        assert_eq!(CellKind::try_from(-2i64), Ok(CellKind::BlackBlank));
    }

    #[test]
    fn neighbors_in_canonical_order() {
        let grid = Grid::from_codes(&[&[-1, -1, -1], &[-1, -1, -1], &[-1, -1, -1]]).unwrap();
        assert_eq!(
            grid.cardinal_neighbors(Location(1, 1)).collect_vec(),
            vec![Location(0, 1), Location(2, 1), Location(1, 0), Location(1, 2)]
        );
        assert_eq!(grid.cardinal_neighbors(Location(0, 0)).collect_vec(), vec![Location(1, 0), Location(0, 1)]);
        assert_eq!(grid.cardinal_neighbors(Location(2, 2)).collect_vec(), vec![Location(1, 2), Location(2, 1)]);
    }

    #[test]
    fn steps() {
        assert_eq!(SquareStep::direction_to(Location(1, 1), Location(0, 1)), Some(SquareStep::Up));
        assert_eq!(SquareStep::direction_to(Location(1, 1), Location(1, 2)), Some(SquareStep::Right));
        assert_eq!(SquareStep::direction_to(Location(1, 1), Location(2, 2)), None);
        assert_eq!(SquareStep::Left.invert(), SquareStep::Right);
        assert!(SquareStep::Left.is_horizontal());
        assert!(!SquareStep::Down.is_horizontal());
    }

    #[test]
    fn white_cells_row_major() {
        let grid = Grid::from_codes(&[&[-2, -1], &[-1, 1]]).unwrap();
        assert_eq!(grid.white_cells().collect_vec(), vec![Location(0, 1), Location(1, 0)]);
        assert_eq!(grid.clued_cells().collect_vec(), vec![(Location(1, 1), 1)]);
    }

    #[test]
    fn corridors_split_at_black() {
        let grid = Grid::from_codes(&[&[-1, -1, -2, -1]]).unwrap();
        let corridors = grid.corridors();

        assert_eq!(corridors.len(), 5);
        assert!(!corridors.is_empty());
        assert_eq!(
            corridors.iter().map(<[Location]>::to_vec).collect_vec(),
            vec![
                vec![Location(0, 0), Location(0, 1)],
                vec![Location(0, 3)],
                vec![Location(0, 0)],
                vec![Location(0, 1)],
                vec![Location(0, 3)],
            ]
        );
        assert!(corridors.through(Location(0, 2)).is_none());
        let (horizontal, vertical) = corridors.through(Location(0, 1)).unwrap();
        assert_eq!(horizontal, &[Location(0, 0), Location(0, 1)]);
        assert_eq!(vertical, &[Location(0, 1)]);

        assert!(Grid::from_codes(&[&[-2, 0]]).unwrap().corridors().is_empty());
    }

    #[test]
    fn illumination_stops_at_opaque() {
        let grid = Grid::from_codes(&[&[-1, -1, -1], &[-2, 1, -1], &[-1, -1, -1]]).unwrap();
        assert_eq!(
            grid.illumination(Location(0, 2)),
            vec![Location(0, 0), Location(0, 1), Location(0, 2), Location(1, 2), Location(2, 2)]
        );
        assert_eq!(grid.illumination(Location(0, 1)), vec![Location(0, 0), Location(0, 1), Location(0, 2)]);
        assert!(grid.illumination(Location(1, 1)).is_empty());
    }

    #[test]
    fn build_matches_codes() {
        let built = GridBuilder::with_dims(dims(3, 3))
            .add_clue(Location(1, 1), 4)
            .blacken(Location(0, 0))
            .whiten(Location(0, 0))
            .build()
            .unwrap();

        assert_eq!(built, Grid::from_codes(&[&[-1, -1, -1], &[-1, 4, -1], &[-1, -1, -1]]).unwrap());
    }

    #[test]
    fn builder_invalid_states() {
        let mut builder = GridBuilder::with_dims(dims(2, 2));
        builder.blacken(Location(2, 0));
        assert_eq!(builder.is_valid(), Some(&vec![BuilderInvalidReason::FeatureOutOfBounds(Location(2, 0))]));
        // further calls do nothing once invalid
        builder.add_clue(Location(0, 0), 9);
        assert_eq!(builder.build().unwrap_err().len(), 1);

        let mut builder = GridBuilder::with_dims(dims(2, 2));
        builder.add_clue(Location(0, 0), 5);
        assert_eq!(builder.build(), Err(&vec![BuilderInvalidReason::ClueOutOfRange(Location(0, 0), 5)]));

        assert!(GridBuilder::default().is_valid().is_none());
    }

    #[test]
    fn display_grid() {
        let grid = Grid::from_codes(&[&[-1, 2, -1], &[-2, -1, 0]]).unwrap();
        assert_eq!(format!("{}", grid), "□ 2 □
■ □ 0
");
    }

    #[test]
    fn flanked_clue_two() {
        let grid = Grid::from_codes(&[&[-1, 2, -1]]).unwrap();
        let constraints = GridSolver::from(&grid).encode();
        let counts = constraints.counts();
        assert_eq!(constraints.variables().len(), 2);
        assert_eq!((counts.coverage, counts.clue, counts.visibility), (2, 2, 0));

        let outcome = grid.solve().unwrap();
        assert_eq!(lights_of(&outcome), vec![Location(0, 0), Location(0, 2)]);
        assert_eq!(format!("{}", outcome.solution().unwrap()), "★ 2 ★
");
    }

    #[test]
    fn single_corridor_gets_single_light() {
        let grid = Grid::from_codes(&[&[-1, -1, -1]]).unwrap();
        for at_most_one in [AtMostOne::Pairwise, AtMostOne::Sequential] {
            let outcome = GridSolver::from(&grid)
                .with_options(SolveOptions { at_most_one })
                .solve()
                .unwrap();
            assert_eq!(lights_of(&outcome).len(), 1);
        }
    }

    #[test]
    fn clue_four_forces_all_neighbours() {
        let grid = Grid::from_codes(&[&[-1, -1, -1], &[-1, 4, -1], &[-1, -1, -1]]).unwrap();
        let outcome = grid.solve().unwrap();
        assert_eq!(lights_of(&outcome), vec![Location(0, 1), Location(1, 0), Location(1, 2), Location(2, 1)]);
    }

    #[test]
    fn clue_exceeding_neighbours_is_unsatisfiable() {
        let grid = Grid::from_codes(&[&[-1, 3, -1]]).unwrap();
        let constraints = GridSolver::from(&grid).encode();
        assert_eq!(constraints.clauses_of(Family::Clue).collect_vec(), vec![&[] as &[Lit]]);

        assert_eq!(grid.solve(), Ok(Outcome::Unsatisfiable));
        assert!(!grid.solve().unwrap().is_solved());
        assert_eq!(Grid::from_codes(&[&[1]]).unwrap().solve(), Ok(Outcome::Unsatisfiable));
    }

    #[test]
    fn vacuous_zero_clue() {
        let grid = Grid::from_codes(&[&[0]]).unwrap();
        let constraints = GridSolver::from(&grid).encode();
        assert!(constraints.is_empty());
        assert_eq!(constraints.var_count(), 0);

        let outcome = grid.solve().unwrap();
        assert!(outcome.is_solved());
        assert!(lights_of(&outcome).is_empty());
    }

    #[test]
    fn clue_ignores_black_neighbours() {
        // the clue at (1, 1) has a black cell to its left
        let mut builder = GridBuilder::with_dims(dims(3, 3));
        builder.add_clue(Location(1, 1), 1).blacken(Location(1, 0));
        let with_black = builder.build().unwrap();
        let with_white = builder.whiten(Location(1, 0)).build().unwrap();

        let clue_vars = |grid: &Grid| {
            let constraints = GridSolver::from(grid).encode();
            let vars = constraints.clauses_of(Family::Clue)
                .flat_map(|clause| clause.iter().map(|lit| lit.var()))
                .collect::<HashSet<_>>();
            let expected = grid.cardinal_neighbors(Location(1, 1))
                .filter_map(|location| constraints.variables().var(location))
                .collect::<HashSet<_>>();
            (vars, expected, constraints.counts().clue)
        };

        let (vars, expected, count) = clue_vars(&with_black);
        assert_eq!(vars, expected);
        assert_eq!(vars.len(), 3);
        // one "at least one" clause over three cells, three pairwise "at most one" clauses
        assert_eq!(count, 4);

        let (vars, expected, count) = clue_vars(&with_white);
        assert_eq!(vars, expected);
        assert_eq!(vars.len(), 4);
        assert_eq!(count, 1 + 6);

        let solved = with_black.solve().unwrap();
        assert!(solved.is_solved());
        let lit_neighbours = with_black.cardinal_neighbors(Location(1, 1))
            .filter(|location| solved.solution().unwrap().is_lit(*location))
            .count();
        assert_eq!(lit_neighbours, 1);

        assert_eq!(with_white.solve(), Ok(Outcome::Unsatisfiable));
        assert!(!exhaustively_solvable(&with_white));
    }

    #[test]
    fn encoding_is_reproducible() {
        let grid = Grid::from_codes(DEMO).unwrap();
        for at_most_one in [AtMostOne::Pairwise, AtMostOne::Sequential] {
            let solver = GridSolver::from(&grid).with_options(SolveOptions { at_most_one });
            let first = solver.encode();
            let second = solver.encode();

            assert_eq!(first.variables(), second.variables());
            assert_eq!(first.var_count(), second.var_count());
            assert_eq!(first.counts(), second.counts());
            assert_eq!(
                first.clauses().map(|(family, clause)| (family, clause.to_vec())).collect_vec(),
                second.clauses().map(|(family, clause)| (family, clause.to_vec())).collect_vec()
            );
        }
    }

    #[test]
    fn variables_follow_white_cells() {
        let grid = Grid::from_codes(DEMO).unwrap();
        let constraints = GridSolver::from(&grid).encode();
        let variables = constraints.variables();

        assert_eq!(variables.len(), grid.white_cells().count());
        for (index, location) in grid.white_cells().enumerate() {
            assert_eq!(variables.var(location), Some(Var::from_index(index)));
            assert_eq!(variables.location(Var::from_index(index)), Some(location));
        }
        assert_eq!(variables.var(Location(0, 5)), None);
        let long_corridors = grid.corridors().iter().filter(|corridor| corridor.len() > 1).count();
        assert_eq!(constraints.var_count(), variables.len() + long_corridors);
        assert_eq!(constraints.counts().coverage, variables.len());
        assert_eq!(constraints.counts().corridor, long_corridors + variables.len());
    }

    #[test]
    fn sequential_counter_shape() {
        let grid = Grid::from_codes(&[&[-1, -1, -1]]).unwrap();
        let constraints = GridSolver::from(&grid)
            .with_options(SolveOptions { at_most_one: AtMostOne::Sequential })
            .encode();

        assert_eq!(constraints.variables().len(), 3);
        // one indicator and two counter registers for the one corridor of length three
        assert_eq!(constraints.var_count(), 6);
        assert_eq!(constraints.counts().visibility, 3 * 3 - 4);
        assert_eq!(constraints.variables().location(Var::from_index(3)), None);

        let pairwise = GridSolver::from(&grid).encode();
        assert_eq!(pairwise.counts().visibility, 3);
    }

    #[test]
    fn corridor_indicators() {
        let row = Grid::from_codes(&[&[-1, -1, -1]]).unwrap();
        let constraints = GridSolver::from(&row).encode();
        let [x0, x1, x2] = [0, 1, 2].map(|index| Var::from_index(index).positive());
        let y = Var::from_index(3);

        assert_eq!(
            constraints.clauses_of(Family::Corridor).map(<[Lit]>::to_vec).collect_vec(),
            vec![
                vec![y.negative(), x0, x1, x2],
                vec![y.positive(), x0],
                vec![y.positive(), x1],
                vec![y.positive(), x2],
            ]
        );
        assert_eq!(constraints.variables().location(y), None);

        let lone = Grid::from_codes(&[&[-1, -2], &[-2, -1]]).unwrap();
        let constraints = GridSolver::from(&lone).encode();
        assert_eq!(constraints.var_count(), 2);
        assert_eq!(
            constraints.clauses_of(Family::Corridor).map(<[Lit]>::to_vec).collect_vec(),
            vec![vec![Var::from_index(0).positive()], vec![Var::from_index(1).positive()]]
        );
    }

    #[test]
    fn open_grid_solves() {
        let grid = GridBuilder::with_dims(dims(20, 20)).build().unwrap();
        let outcome = grid.solve().unwrap();
        let solution = outcome.solution().expect("an open grid is always solvable");

        assert_eq!(solution.validate(), Ok(()));
        // at most one light per row and per column, and a dark row forces a light in every column
        assert_eq!(solution.lights().len(), 20);
    }

    #[test]
    fn solve_demo() {
        let grid = Grid::from_codes(DEMO).unwrap();
        let expected = [
            (0, 4), (0, 6), (1, 0), (1, 5), (2, 1), (2, 9), (3, 2), (3, 4), (3, 7), (4, 3), (4, 9),
            (5, 0), (5, 6), (6, 5), (6, 7), (7, 2), (7, 9), (8, 4), (8, 8), (9, 0), (9, 5),
        ].map(Location::from).to_vec();

        for at_most_one in [AtMostOne::Pairwise, AtMostOne::Sequential] {
            let outcome = GridSolver::from(&grid)
                .with_options(SolveOptions { at_most_one })
                .solve()
                .unwrap();
            assert_eq!(lights_of(&outcome), expected);
            assert_eq!(outcome.solution().unwrap().validate(), Ok(()));
        }
    }

    #[test]
    fn validator_catches_each_rule() {
        let flanked = Grid::from_codes(&[&[-1, 2, -1]]).unwrap();
        let row = Grid::from_codes(&[&[-1, -1, -1]]).unwrap();
        let split = Grid::from_codes(&[&[-1, -1, -2, -1]]).unwrap();

        let check = |grid: &Grid, lights: &[(usize, usize)]| {
            let lights = lights.iter().copied().map(Location::from).collect_vec();
            Solution::from_lights(grid.clone(), &lights).unwrap().validate()
        };

        assert_eq!(check(&flanked, &[(0, 0), (0, 2)]), Ok(()));
        assert_eq!(check(&flanked, &[(0, 0), (0, 1), (0, 2)]), Err(Violation::LightOnOpaque(Location(0, 1))));
        assert_eq!(
            check(&flanked, &[(0, 0)]),
            Err(Violation::ClueMismatch { location: Location(0, 1), expected: 2, found: 1 })
        );
        assert_eq!(
            check(&row, &[(0, 0), (0, 2)]),
            Err(Violation::MutuallyVisible(VisiblePair(UnorderedPair(Location(0, 2), Location(0, 0)))))
        );
        assert_eq!(check(&split, &[(0, 0)]), Err(Violation::Unlit(Location(0, 3))));
        assert_eq!(check(&split, &[(0, 1), (0, 3)]), Ok(()));
    }

    #[test]
    fn placement_dimensions_must_match() {
        let grid = Grid::from_codes(&[&[-1, -1]]).unwrap();
        assert_eq!(
            Solution::new(grid.clone(), ndarray::Array2::from_elem((2, 2), false)),
            Err(GridError::Malformed(MalformedReason::DimensionMismatch { expected: (1, 2), found: (2, 2) }))
        );
        assert!(matches!(
            Solution::from_lights(grid, &[Location(3, 3)]),
            Err(GridError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn display_beams() {
        let grid = Grid::from_codes(&[&[-1, -1, -1], &[-2, -1, 1]]).unwrap();
        let solution = Solution::from_lights(grid, &[Location(0, 0), Location(1, 1)]).unwrap();
        assert_eq!(format!("{}", solution), "★ □ □
■ ★ 1
");
        assert_eq!(format!("{}", solution.with_beams()), "★ · ·
■ ★ 1
");
    }

    #[test]
    fn parse_puzzle_file() {
        let text = "link: https://example.org/lightup#3x3:a1a
game: 3x3

-1, -1, -1
-2,1,-1
# trailing comment
-1,-1,-1
";
        let file = PuzzleFile::parse(text).unwrap();
        assert_eq!(file.link.as_deref(), Some("https://example.org/lightup#3x3:a1a"));
        assert_eq!(file.grid, Grid::from_codes(&[&[-1, -1, -1], &[-2, 1, -1], &[-1, -1, -1]]).unwrap());
        assert_eq!(to_text(&file.grid), "-1,-1,-1\n-2,1,-1\n-1,-1,-1\n");

        let grid: Grid = to_text(&file.grid).parse().unwrap();
        assert_eq!(grid, file.grid);
        assert_eq!("-1,-1\n".parse::<PuzzleFile>().unwrap().link, None);
    }

    #[test]
    fn unlabelled_header_and_trailer_lines_are_skipped() {
        let file = PuzzleFile::parse("link: http://x\nseed 12345\n-1,-1\n-1,-1\nend\n").unwrap();
        assert_eq!(file.link.as_deref(), Some("http://x"));
        assert_eq!(file.grid, Grid::from_codes(&[&[-1, -1], &[-1, -1]]).unwrap());

        let column = PuzzleFile::parse("seed 1\n2x1:a\n-1\n0\n").unwrap();
        assert_eq!(column.grid, Grid::from_codes(&[&[-1], &[0]]).unwrap());

        // a lone integer is a one cell row, not a header
        assert_eq!(
            PuzzleFile::parse("12345\n-1\n"),
            Err(GridError::Malformed(MalformedReason::UnknownCode { location: Location(0, 0), code: 12345 }))
        );
    }

    #[test]
    fn bundled_grid_files() {
        let demo = PuzzleFile::parse(include_str!("../grids/demo_10x10.txt")).unwrap();
        assert_eq!(demo.grid, Grid::from_codes(DEMO).unwrap());
        assert!(demo.link.is_some());

        let clue_four = PuzzleFile::parse(include_str!("../grids/clue_four_3x3.txt")).unwrap();
        assert_eq!(clue_four.link, None);
        assert_eq!(lights_of(&clue_four.grid.solve().unwrap()).len(), 4);
    }

    #[test]
    fn parse_errors_name_the_line() {
        assert_eq!(
            PuzzleFile::parse("link: x\n-1,-1\n-1,x\n"),
            Err(GridError::Malformed(MalformedReason::BadToken { line: 3, token: "x".to_string() }))
        );
        assert_eq!(
            PuzzleFile::parse("-1,-1\n-1\n"),
            Err(GridError::Malformed(MalformedReason::Ragged { row: 1, expected: 2, found: 1 }))
        );
        assert_eq!(PuzzleFile::parse("link: x\n"), Err(GridError::Malformed(MalformedReason::Empty)));
        assert_eq!(
            "-1,7".parse::<Grid>(),
            Err(GridError::Malformed(MalformedReason::UnknownCode { location: Location(0, 1), code: 7 }))
        );
    }

    #[test]
    fn engine_fault_is_not_unsatisfiable() {
        let grid = Grid::from_codes(&[&[-1, -1, -1]]).unwrap();
        assert_eq!(
            GridSolver::from(&grid).solve_using(FaultyEngine(0)),
            Err(SolveError::Solver(SolverFailure::Fault("out of memory".to_string())))
        );
    }

    #[test]
    fn contradicting_model_is_encoder_mismatch() {
        let grid = Grid::from_codes(&[&[-1, -1, -1]]).unwrap();
        let result = GridSolver::from(&grid).solve_using(LyingEngine(0));
        assert!(matches!(result, Err(SolveError::EncoderMismatch(Violation::MutuallyVisible(_)))));
    }

    #[test]
    fn short_model_is_incomplete() {
        let grid = Grid::from_codes(&[&[-1, -1, -1]]).unwrap();
        // three decision variables and one corridor indicator
        assert_eq!(
            GridSolver::from(&grid).solve_using(ForgetfulEngine(0)),
            Err(SolveError::Solver(SolverFailure::IncompleteModel { variable: 3 }))
        );

        let constraints = GridSolver::from(&grid).encode();
        assert_eq!(
            Solution::decode(&grid, constraints.variables(), &[true]),
            Err(SolverFailure::IncompleteModel { variable: 1 })
        );
    }

    #[test]
    fn brute_force_engine_limits() {
        let grid = Grid::from_codes(&[&[-1, 2, -1]]).unwrap();
        let outcome = GridSolver::from(&grid).solve_using(BruteForceEngine::new()).unwrap();
        assert_eq!(lights_of(&outcome), vec![Location(0, 0), Location(0, 2)]);

        let big = GridBuilder::with_dims(dims(5, 5)).build().unwrap();
        assert_eq!(
            GridSolver::from(&big).solve_using(BruteForceEngine::new()),
            Err(SolveError::Solver(SolverFailure::TooManyVariables { count: 35, limit: BruteForceEngine::MAX_VARS }))
        );
    }

    const CODES: &[i64] = &[-1, -1, -1, -1, -2, 0, 1, 2, 3];

    fn small_grid() -> impl Strategy<Value = Grid> {
        (1usize..=3, 1usize..=4)
            .prop_flat_map(|(rows, cols)| {
                prop::collection::vec(prop::collection::vec(prop::sample::select(CODES), cols), rows)
            })
            .prop_map(|rows| Grid::from_rows(rows).unwrap())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(96))]

        /// varisat, the brute-force engine and a search over placements all agree
        #[test]
        fn verdicts_agree_with_exhaustive_search(grid in small_grid()) {
            let expected = exhaustively_solvable(&grid);

            let varisat = grid.solve().unwrap();
            prop_assert_eq!(varisat.is_solved(), expected);
            if let Some(solution) = varisat.solution() {
                prop_assert_eq!(solution.validate(), Ok(()));
            }

            let brute = GridSolver::from(&grid).solve_using(BruteForceEngine::new()).unwrap();
            prop_assert_eq!(brute.is_solved(), expected);
        }

        #[test]
        fn encodings_agree(grid in small_grid()) {
            let pairwise = GridSolver::from(&grid).solve().unwrap();
            let sequential = GridSolver::from(&grid)
                .with_options(SolveOptions { at_most_one: AtMostOne::Sequential })
                .solve()
                .unwrap();
            prop_assert_eq!(pairwise.is_solved(), sequential.is_solved());
        }
    }
}
