use proptest::prelude::*;

use brick_breaker::Level;
use brick_breaker::consts::*;
use brick_breaker::sim::{Paddle, brick_award, paddle_bounce};

fn cell() -> impl Strategy<Value = char> {
    prop::sample::select(vec!['X', 'P', 'R', 'G', 'B', 'W'])
}

proptest! {
    #[test]
    fn paddle_bounce_always_leaves_upward(offset in -PADDLE_WIDTH / 2.0..=PADDLE_WIDTH / 2.0) {
        let paddle = Paddle::default();
        let dir = paddle_bounce(paddle.pos.x + offset, &paddle);

        prop_assert!((-1.0..=1.0).contains(&dir.x));
        prop_assert!(dir.y < 0.0);
        prop_assert!((dir.length_squared() - 2.0).abs() < 1e-4);
    }

    #[test]
    fn paddle_bounce_never_nan(offset in -2000.0f32..2000.0) {
        let paddle = Paddle::default();
        let dir = paddle_bounce(paddle.pos.x + offset, &paddle);
        prop_assert!(dir.x.is_finite() && dir.y.is_finite());
        prop_assert!(dir.y <= 0.0);
    }

    #[test]
    fn award_never_grows_with_time(level in 1u32..=3, timer in 0u32..500) {
        prop_assert!(brick_award(level, timer) >= brick_award(level, timer + 1));
        prop_assert!(brick_award(level, timer) >= level as u64 * POINTS_PER_LEVEL);
    }

    #[test]
    fn early_hits_beat_late_hits(level in 1u32..=3, early in 0u32..TIME_BONUS_WINDOW, late in TIME_BONUS_WINDOW..1000) {
        prop_assert!(brick_award(level, early) > brick_award(level, late));
    }

    #[test]
    fn full_grid_maps_every_cell(cells in prop::collection::vec(cell(), BRICK_ROWS * BRICK_COLUMNS)) {
        let text: String = cells
            .chunks(BRICK_COLUMNS)
            .map(|row| row.iter().collect::<String>() + "\n")
            .collect();
        let level = Level::parse(1, "Generated", &text).unwrap();

        prop_assert!(level.validate());
        prop_assert_eq!(level.mapping().len(), BRICK_ROWS * BRICK_COLUMNS);
        let occupied = cells.iter().filter(|&&c| c != 'X').count();
        prop_assert_eq!(level.bricks().count(), occupied);
    }
}
