//! Stratified train/test split
//!
//! The test share is `ceil(test_size * n)`. Each class contributes to the
//! test set in proportion to its size; leftover slots go to the classes
//! with the largest fractional share. Everything is driven by one seeded
//! RNG so the same labels and seed always give the same split.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::error::TrainingError;

#[derive(Debug, Clone, PartialEq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

pub fn stratified_split(labels: &[usize], test_size: f64, seed: u64) -> Result<SplitIndices, TrainingError> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(TrainingError::InvalidSplit(format!(
            "test_size must be in (0, 1), got {}",
            test_size
        )));
    }

    let n = labels.len();
    let n_test = (test_size * n as f64).ceil() as usize;
    let n_train = n.saturating_sub(n_test);

    let mut by_class: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (i, &label) in labels.iter().enumerate() {
        by_class.entry(label).or_default().push(i);
    }

    if let Some((label, members)) = by_class.iter().find(|(_, m)| m.len() < 2) {
        return Err(TrainingError::InvalidSplit(format!(
            "class {} has {} member(s), need at least 2",
            label,
            members.len()
        )));
    }
    if n_test < by_class.len() || n_train < by_class.len() {
        return Err(TrainingError::InvalidSplit(format!(
            "{} train / {} test samples cannot hold {} classes",
            n_train,
            n_test,
            by_class.len()
        )));
    }

    // Proportional allocation, largest remainder first
    let mut allocation: Vec<(usize, usize, f64)> = by_class
        .iter()
        .map(|(&label, members)| {
            let exact = n_test as f64 * members.len() as f64 / n as f64;
            (label, exact.floor() as usize, exact - exact.floor())
        })
        .collect();

    let assigned: usize = allocation.iter().map(|(_, k, _)| k).sum();
    let mut order: Vec<usize> = (0..allocation.len()).collect();
    order.sort_by(|&a, &b| allocation[b].2.total_cmp(&allocation[a].2).then(a.cmp(&b)));
    for &i in order.iter().cycle().take(n_test - assigned) {
        allocation[i].1 += 1;
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::with_capacity(n_train);
    let mut test = Vec::with_capacity(n_test);

    for (label, k, _) in allocation {
        let mut members = by_class.remove(&label).unwrap_or_default();
        members.shuffle(&mut rng);
        // Keep at least one member of every class on the train side
        let k = k.clamp(1, members.len() - 1);
        test.extend_from_slice(&members[..k]);
        train.extend_from_slice(&members[k..]);
    }

    train.shuffle(&mut rng);
    test.shuffle(&mut rng);

    Ok(SplitIndices { train, test })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(negatives: usize, positives: usize) -> Vec<usize> {
        let mut y = vec![0; negatives];
        y.extend(vec![1; positives]);
        y
    }

    #[test]
    fn test_sizes_and_disjointness() {
        let y = labels(60, 40);
        let split = stratified_split(&y, 0.2, 42).unwrap();

        assert_eq!(split.test.len(), 20);
        assert_eq!(split.train.len(), 80);

        let mut all: Vec<usize> = split.train.iter().chain(split.test.iter()).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_class_proportions_preserved() {
        let y = labels(60, 40);
        let split = stratified_split(&y, 0.2, 42).unwrap();

        let test_pos = split.test.iter().filter(|&&i| y[i] == 1).count();
        let train_pos = split.train.iter().filter(|&&i| y[i] == 1).count();
        assert_eq!(test_pos, 8);
        assert_eq!(train_pos, 32);
    }

    #[test]
    fn test_remainder_goes_to_largest_fraction() {
        // 517 rows: ceil(103.4) = 104 test rows
        let y = labels(270, 247);
        let split = stratified_split(&y, 0.2, 42).unwrap();
        assert_eq!(split.test.len(), 104);

        let test_pos = split.test.iter().filter(|&&i| y[i] == 1).count();
        // 104 * 247 / 517 = 49.69 -> 49 + remainder
        assert_eq!(test_pos, 50);
    }

    #[test]
    fn test_seed_determinism() {
        let y = labels(30, 20);
        assert_eq!(stratified_split(&y, 0.2, 7).unwrap(), stratified_split(&y, 0.2, 7).unwrap());
        assert_ne!(stratified_split(&y, 0.2, 7).unwrap(), stratified_split(&y, 0.2, 8).unwrap());
    }

    #[test]
    fn test_rejects_degenerate_inputs() {
        assert!(stratified_split(&labels(10, 10), 0.0, 1).is_err());
        assert!(stratified_split(&labels(10, 10), 1.0, 1).is_err());
        assert!(stratified_split(&labels(10, 1), 0.2, 1).is_err());
        assert!(stratified_split(&labels(2, 2), 0.2, 1).is_err());
    }
}
