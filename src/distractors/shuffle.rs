use rand::Rng;
use rand::seq::SliceRandom;

/// Return a uniformly shuffled copy of `items` (Fisher–Yates).
///
/// The input is left untouched. Use this instead of sorting with a random
/// comparator, which does not produce uniform permutations.
pub fn shuffle_array<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);
    shuffled
}
