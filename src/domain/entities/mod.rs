pub mod component;
pub mod component_group;
pub mod group_event;
pub mod group_tree;

pub use component::{Component, ComponentId, NewComponent};
pub use component_group::{ComponentGroup, GroupId, NewComponentGroup, ROOT, UNGROUPED};
pub use group_event::{GroupEvent, GroupEventKind};
pub use group_tree::GroupTree;
