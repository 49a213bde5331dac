pub(crate) const HELP_NAME: &str = "help";
pub(crate) const HELP_SHORT: &str = "h";
pub(crate) const NONFLAG_MARKER: &str = "#nonflag";
pub(crate) const SKIP_MARKER: &str = "-";
pub(crate) const END_OF_FLAGS: &str = "--";
pub(crate) const SEQUENCE_SUFFIX: &str = "...";
