pub(super) mod detail_pane;
pub(super) mod filter_bar;
pub(super) mod popups;
pub(super) mod progress;
pub(super) mod status;
pub(super) mod task_list;
pub(super) mod util;
