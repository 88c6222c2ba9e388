pub(super) mod filter;
pub(super) mod navigation;
pub(super) mod status_picker;
