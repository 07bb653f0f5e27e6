use proptest::prelude::*;
use sliding_window::SlidingWindow;

proptest! {
    #[test]
    fn full_window_stays_full(
        capacity in 1usize..32,
        samples in prop::collection::vec(-1.0e6f64..1.0e6, 0..128),
    ) {
        let mut window = SlidingWindow::new(capacity).unwrap();
        let mut became_full = window.is_full();

        for (pushed, sample) in samples.into_iter().enumerate() {
            window.push(sample).unwrap();
            if pushed + 1 >= capacity - 1 {
                prop_assert!(window.is_full());
            }
            if became_full {
                prop_assert!(window.is_full());
            }
            became_full = window.is_full();
        }
    }

    #[test]
    fn snapshot_is_reversed_and_zero_padded(
        capacity in 1usize..32,
        samples in prop::collection::vec(-1.0e6f64..1.0e6, 0..32),
    ) {
        let mut window = SlidingWindow::new(capacity).unwrap();
        for &sample in &samples {
            window.push(sample).unwrap();
        }

        let kept = samples.len().min(capacity);
        let mut expected: Vec<f64> = samples.iter().rev().take(kept).copied().collect();
        expected.resize(capacity, 0.0);

        prop_assert_eq!(window.snapshot(), expected);
    }
}
