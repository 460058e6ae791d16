pub mod adapter;
pub mod errors;
pub mod factory;
pub mod options;
pub mod props;
pub mod schedule;
pub mod widget;

pub use adapter::*;
pub use errors::*;
pub use factory::*;
pub use options::*;
pub use props::*;
pub use schedule::*;
pub use widget::*;
