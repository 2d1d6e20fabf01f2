/// Evenly spaced samples over a closed interval, like numpy.linspace.
pub(crate) struct Linspace {
    start: f64,
    end: f64,
    step: f64,
    index: usize,
    len: usize,
}

impl Linspace {
    pub(crate) fn new(min: f64, max: f64, n: usize) -> Self {
        let step = if n > 1 {
            // REVIEW: try_from instead of cast?
            let num_steps = (n - 1) as f64;
            (max - min) / num_steps
        } else {
            0.
        };
        Linspace {
            start: min,
            end: max,
            step,
            index: 0,
            len: n,
        }
    }
}

impl Iterator for Linspace {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            None
        } else {
            let i = self.index;
            self.index += 1;
            // Pin the last sample so accumulated error never drops the endpoint
            if self.len > 1 && i == self.len - 1 {
                return Some(self.end);
            }
            Some(self.start + self.step * i as f64)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Linspace {}

#[test]
fn test_linspace() {
    let points: Vec<_> = Linspace::new(0., 10., 11).collect();

    assert_eq!(points, vec![0., 1., 2., 3., 4., 5., 6., 7., 8., 9., 10.]);
    assert_eq!(Linspace::new(2., 2., 1).collect::<Vec<_>>(), vec![2.]);
    assert_eq!(Linspace::new(0., 1., 0).count(), 0);

    let odd: Vec<_> = Linspace::new(0.1, 0.7, 4).collect();
    assert_eq!(odd.len(), 4);
    assert_eq!(odd[3], 0.7);
}
