/// Numbers that can become the point (and that a wager can travel to).
pub const POINT_NUMBERS: [u8; 6] = [4, 5, 6, 8, 9, 10];

/// Total that seven-outs the shooter and wins every "don't" wager with a number.
pub const SEVEN: u8 = 7;

/// Faces on a single die.
pub const DIE_FACES: u8 = 6;

/// Smallest and largest dice totals.
pub const MIN_TOTAL: u8 = 2;
pub const MAX_TOTAL: u8 = 12;

/// Returns true if `number` can be a point.
#[inline]
pub const fn is_point_number(number: u8) -> bool {
    matches!(number, 4 | 5 | 6 | 8 | 9 | 10)
}
