pub mod attrs;
pub mod row;
