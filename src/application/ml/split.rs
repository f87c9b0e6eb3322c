use crate::domain::ml::StrengthLabel;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::BTreeMap;

/// Index partition of a labeled corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
    pub stratified: bool,
}

/// Seeded train/test split.
///
/// Stratifies by label when every class has at least two members, giving
/// each class at least one sample on both sides. Otherwise falls back to a
/// shuffled split of the whole corpus. Requires `labels.len() >= 2`; both
/// partitions are then non-empty.
pub fn train_test_split(labels: &[StrengthLabel], test_fraction: f64, seed: u64) -> SplitIndices {
    let mut rng = StdRng::seed_from_u64(seed);
    let test_fraction = test_fraction.clamp(0.0, 1.0);

    let mut by_class: BTreeMap<StrengthLabel, Vec<usize>> = BTreeMap::new();
    for (idx, label) in labels.iter().enumerate() {
        by_class.entry(*label).or_default().push(idx);
    }

    if by_class.values().all(|members| members.len() >= 2) {
        let mut train = Vec::with_capacity(labels.len());
        let mut test = Vec::new();
        for mut members in by_class.into_values() {
            members.shuffle(&mut rng);
            let n_test = test_size(members.len(), test_fraction);
            test.extend_from_slice(&members[..n_test]);
            train.extend_from_slice(&members[n_test..]);
        }
        train.sort_unstable();
        test.sort_unstable();
        return SplitIndices {
            train,
            test,
            stratified: true,
        };
    }

    let mut indices: Vec<usize> = (0..labels.len()).collect();
    indices.shuffle(&mut rng);
    let n_test = test_size(indices.len(), test_fraction);
    let mut test = indices[..n_test].to_vec();
    let mut train = indices[n_test..].to_vec();
    train.sort_unstable();
    test.sort_unstable();
    SplitIndices {
        train,
        test,
        stratified: false,
    }
}

/// Rounded share of `n`, kept within `[1, n - 1]` when `n >= 2`.
fn test_size(n: usize, fraction: f64) -> usize {
    if n < 2 {
        return 0;
    }
    ((n as f64 * fraction).round() as usize).clamp(1, n - 1)
}
