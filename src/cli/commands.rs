pub mod initdb;
pub mod sync;
pub mod validate;

pub use initdb::init_database;
pub use sync::sync;
pub use validate::validate;
