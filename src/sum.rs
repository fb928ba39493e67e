//! Sum of the integers 1..=n, three ways. Each returns `None` when the sum overflows `u64`.

/// Accumulate in a loop.
pub fn sum_to_n_iterative(n: u64) -> Option<u64> {
    (1..=n).try_fold(0u64, |acc, i| acc.checked_add(i))
}

/// Halving recursion: `sum(2m) = 2 * sum(m) + m^2`, `sum(2m + 1) = sum(2m) + 2m + 1`.
/// Depth is at most `2 * log2(n)`.
pub fn sum_to_n_recursive(n: u64) -> Option<u64> {
    if n <= 1 {
        return Some(n);
    }
    if n % 2 == 1 {
        return sum_to_n_recursive(n - 1)?.checked_add(n);
    }
    let half = n / 2;
    sum_to_n_recursive(half)?
        .checked_mul(2)?
        .checked_add(half.checked_mul(half)?)
}

/// Closed form `n(n + 1) / 2`, halving the even factor first.
pub fn sum_to_n_formula(n: u64) -> Option<u64> {
    let next = n.checked_add(1)?;
    if n % 2 == 0 {
        (n / 2).checked_mul(next)
    } else {
        n.checked_mul(next / 2)
    }
}
