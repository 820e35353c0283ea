use ordered_float::OrderedFloat;
use std::fmt::Debug;
use std::ops::Add;

/// Edge weight / path cost. Costs must be totally ordered and additive; Dijkstra
/// is only correct when every weight is `>= ZERO`.
pub trait Cost: Copy + Ord + Add<Output = Self> + Debug {
    const ZERO: Self;

    fn is_negative(&self) -> bool {
        *self < Self::ZERO
    }
}

macro_rules! impl_cost {
    ($($t:ty),*) => {
        $(
            impl Cost for $t {
                const ZERO: Self = 0;
            }
        )*
    };
}

impl_cost!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

// Real-valued weights (e.g. metres) need a total order to live in the heap.
impl Cost for OrderedFloat<f64> {
    const ZERO: Self = OrderedFloat(0.0);
}

impl Cost for OrderedFloat<f32> {
    const ZERO: Self = OrderedFloat(0.0);
}
