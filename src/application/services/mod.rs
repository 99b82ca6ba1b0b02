pub mod group_mutation;
pub mod status_board;

pub use group_mutation::GroupMutationService;
pub use status_board::{ComponentView, GroupStatusView, StatusBoard, StatusBoardService};
