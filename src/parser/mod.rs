pub mod filter_kind;
pub mod operator;
pub mod segment;

pub use filter_kind::FilterKind;
pub use operator::Operator;
pub use segment::{split_segments, Segment};
