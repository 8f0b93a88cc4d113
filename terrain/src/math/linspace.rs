use crate::C;

/// Returns `n` evenly spaced values from `start` to `end`, inclusive.
#[allow(clippy::cast_precision_loss)]
pub fn linspace(start: C, end: C, n: usize) -> impl Iterator<Item = C> {
    let dy = (end - start) / (n.max(2) - 1) as C;
    (0..n).map(move |x| start + x as C * dy)
}

#[cfg(test)]
mod tests {
    use super::linspace;

    #[test]
    fn test_linspace() {
        let vals: Vec<f64> = linspace(0.0, 1.0, 5).collect();
        assert_eq!(vals, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(3.0, 7.0, 1).collect::<Vec<_>>(), vec![3.0]);
        assert_eq!(linspace(3.0, 7.0, 0).count(), 0);
    }
}
