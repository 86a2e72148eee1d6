//! Score and traceback matrices for a single alignment call

use super::ScoringParams;

/// Which alternative produced a cell's score
///
/// Declaration order is the tie-break order: on equal scores the earlier
/// variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Stop,
    Diagonal,
    Left,
    Up,
}

/// Row-major `(|s1| + 1) x (|s2| + 1)` score matrix D and traceback matrix T
///
/// Row 0 and column 0 stay at zero / `Stop`. Built fresh for every alignment
/// and dropped with it.
pub(crate) struct DpMatrices {
    scores: Vec<i32>,
    directions: Vec<Direction>,
    rows: usize,
    cols: usize,
}

impl DpMatrices {
    /// Fill D and T bottom-up for `s1` against `s2`
    pub(crate) fn fill(s1: &[u8], s2: &[u8], scoring: &ScoringParams) -> Self {
        let rows = s1.len() + 1;
        let cols = s2.len() + 1;
        let mut scores = vec![0i32; rows * cols];
        let mut directions = vec![Direction::Stop; rows * cols];

        for i in 1..rows {
            let symbol = s1[i - 1];
            let row = i * cols;
            let prev_row = (i - 1) * cols;

            for j in 1..cols {
                let diagonal = scores[prev_row + j - 1]
                    .saturating_add(scoring.substitution(symbol, s2[j - 1]));
                let left = scores[row + j - 1].saturating_sub(scoring.gap_penalty);
                let up = scores[prev_row + j].saturating_sub(scoring.gap_penalty);

                let (score, direction) = first_max([
                    (0, Direction::Stop),
                    (diagonal, Direction::Diagonal),
                    (left, Direction::Left),
                    (up, Direction::Up),
                ]);

                scores[row + j] = score;
                directions[row + j] = direction;
            }
        }

        Self {
            scores,
            directions,
            rows,
            cols,
        }
    }

    #[inline]
    pub(crate) fn score(&self, i: usize, j: usize) -> i32 {
        self.scores[i * self.cols + j]
    }

    #[inline]
    pub(crate) fn direction(&self, i: usize, j: usize) -> Direction {
        self.directions[i * self.cols + j]
    }

    /// First cell in row-major order holding the global maximum
    pub(crate) fn best_cell(&self) -> (usize, usize) {
        let mut best = (0, 0);
        let mut best_score = self.scores[0];

        for i in 0..self.rows {
            for j in 0..self.cols {
                let score = self.score(i, j);
                if score > best_score {
                    best_score = score;
                    best = (i, j);
                }
            }
        }

        best
    }

    /// Neighbour of `(i, j)` with the highest score, checked diagonal, left, up
    ///
    /// Only valid for `i >= 1 && j >= 1`.
    pub(crate) fn best_neighbor(&self, i: usize, j: usize) -> Direction {
        first_max([
            (self.score(i - 1, j - 1), Direction::Diagonal),
            (self.score(i, j - 1), Direction::Left),
            (self.score(i - 1, j), Direction::Up),
        ])
        .1
    }
}

/// First candidate attaining the maximum score
fn first_max<const N: usize>(candidates: [(i32, Direction); N]) -> (i32, Direction) {
    let mut best = candidates[0];
    for &candidate in &candidates[1..] {
        if candidate.0 > best.0 {
            best = candidate;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(s1: &[u8], s2: &[u8]) -> DpMatrices {
        DpMatrices::fill(s1, s2, &ScoringParams::default())
    }

    #[test]
    fn test_base_row_and_column_are_zero() {
        let m = fill(b"ACGT", b"TTACG");
        for i in 0..m.rows {
            assert_eq!(m.score(i, 0), 0);
            assert_eq!(m.direction(i, 0), Direction::Stop);
        }
        for j in 0..m.cols {
            assert_eq!(m.score(0, j), 0);
            assert_eq!(m.direction(0, j), Direction::Stop);
        }
    }

    #[test]
    fn test_unrelated_sequences_stay_at_zero() {
        let m = fill(b"AAAAAAA", b"CCCCGGG");
        assert!(m.scores.iter().all(|&s| s == 0));
        assert!(m.directions.iter().all(|&d| d == Direction::Stop));
    }

    #[test]
    fn test_diagonal_run() {
        let m = fill(b"ACG", b"ACG");
        assert_eq!(m.score(1, 1), 1);
        assert_eq!(m.score(2, 2), 2);
        assert_eq!(m.score(3, 3), 3);
        assert_eq!(m.direction(3, 3), Direction::Diagonal);
        assert_eq!(m.best_cell(), (3, 3));
    }

    #[test]
    fn test_gap_direction_recorded() {
        // A cheap gap lets the left move win D[1][2]
        let scoring = ScoringParams {
            match_score: 2,
            mismatch_score: -1,
            gap_penalty: 1,
        };
        let m = DpMatrices::fill(b"AC", b"AGC", &scoring);
        // D[2][3]: diagonal 1 + 2 = 3 beats left 1 - 1 = 0 and up 0 - 1
        assert_eq!(m.score(1, 1), 2);
        assert_eq!(m.score(1, 2), 1);
        assert_eq!(m.direction(1, 2), Direction::Left);
        assert_eq!(m.score(2, 3), 3);
        assert_eq!(m.direction(2, 3), Direction::Diagonal);
    }

    #[test]
    fn test_best_cell_prefers_first_in_row_major_order() {
        // Both D[1][1] and D[2][1] score 1
        let m = fill(b"AA", b"A");
        assert_eq!(m.score(1, 1), 1);
        assert_eq!(m.score(2, 1), 1);
        assert_eq!(m.best_cell(), (1, 1));
    }

    #[test]
    fn test_best_cell_of_all_zero_matrix() {
        let m = fill(b"AAA", b"CCC");
        assert_eq!(m.best_cell(), (0, 0));
    }

    /// 2 x 2 matrix whose cell (1, 1) has the given diagonal, left and up neighbours
    fn neighbors(diagonal: i32, left: i32, up: i32) -> DpMatrices {
        DpMatrices {
            scores: vec![diagonal, up, left, 9],
            directions: vec![Direction::Stop; 4],
            rows: 2,
            cols: 2,
        }
    }

    #[test]
    fn test_best_neighbor_left_beats_up_on_tie() {
        let m = neighbors(1, 3, 3);
        assert_eq!(m.best_neighbor(1, 1), Direction::Left);
    }

    #[test]
    fn test_best_neighbor_diagonal_wins_three_way_tie() {
        let m = neighbors(2, 2, 2);
        assert_eq!(m.best_neighbor(1, 1), Direction::Diagonal);
    }

    #[test]
    fn test_best_neighbor_strict_maximum() {
        assert_eq!(neighbors(1, 0, 4).best_neighbor(1, 1), Direction::Up);
        assert_eq!(neighbors(5, 4, 4).best_neighbor(1, 1), Direction::Diagonal);
        assert_eq!(neighbors(2, 2, 1).best_neighbor(1, 1), Direction::Diagonal);
    }

    #[test]
    fn test_first_max_tie_break() {
        let picked = first_max([
            (0, Direction::Stop),
            (2, Direction::Diagonal),
            (2, Direction::Left),
            (2, Direction::Up),
        ]);
        assert_eq!(picked, (2, Direction::Diagonal));

        let picked = first_max([
            (0, Direction::Stop),
            (-1, Direction::Diagonal),
            (0, Direction::Left),
            (0, Direction::Up),
        ]);
        assert_eq!(picked, (0, Direction::Stop));
    }
}
