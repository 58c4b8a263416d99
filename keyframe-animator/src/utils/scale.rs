/// Trait for mapping a value from one range to another.
pub trait Scalable {
    /// Maps a value from one range to another, without clamping: a value outside
    /// `[from_low, from_high]` lands outside `[to_low, to_high]` on the same trend.
    ///
    /// # Parameters
    /// * `self`:  the value to map
    /// * `from_low`:  the low end of the originating range
    /// * `from_high`:  the high end of the originating range
    /// * `to_low`:  the low end of the target range
    /// * `to_high`:  the high end of the target range
    ///
    /// # Returns
    /// The mapped value, or `to_high` when the originating range is empty.
    fn scale(self, from_low: Self, from_high: Self, to_low: Self, to_high: Self) -> Self;
}

macro_rules! impl_scalable {
    ($($variant:ty),*) => {
        $(
            impl Scalable for $variant {
                fn scale(self, from_low: Self, from_high: Self, to_low: Self, to_high: Self) -> Self {
                    let span = from_high - from_low;
                    if span == 0.0 {
                        return to_high;
                    }
                    (self - from_low) * (to_high - to_low) / span + to_low
                }
            }
        )*
    };
}

impl_scalable!(f32, f64);
