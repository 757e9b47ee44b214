pub mod record;
pub mod routine;
