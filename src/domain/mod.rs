pub mod category;
pub mod narrative;
pub mod poi;
pub mod speech;
