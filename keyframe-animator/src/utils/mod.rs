pub use crate::utils::point::Point;
pub use crate::utils::scale::Scalable;

mod point;
mod scale;
