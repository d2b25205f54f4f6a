pub mod graph;
pub mod highlight;
pub mod layout;
pub mod picking;
pub mod query;
pub mod scene;
pub mod session;
pub mod util;
