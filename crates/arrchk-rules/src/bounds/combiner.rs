use arrchk_core::model::Interval;

/// Moves `range` by `offset`; `None` only if the result leaves `i128`.
pub fn shift(range: Interval, offset: i128) -> Option<Interval> {
    let min = range.min.checked_add(offset)?;
    let max = range.max.checked_add(offset)?;
    Interval::new(min, max)
}

/// True iff no value of `shifted` is a valid index of `domain`.
pub fn disjoint(shifted: Interval, domain: Interval) -> bool {
    shifted.max < domain.min || shifted.min > domain.max
}
