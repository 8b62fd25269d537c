pub mod ingest;
pub mod normalize;
pub mod panels;
pub mod summary;


pub use ingest::*;
pub use normalize::*;
pub use panels::*;
pub use summary::*;
