pub mod cascade;
pub mod forest;
pub mod ordering;
pub mod visibility;

pub use cascade::plan_cascade;
pub use forest::{build_tree, CategoryForest, Node};
pub use ordering::compare_names;
pub use visibility::{effective_visible, effective_visible_in, render_tree};
