pub(crate) mod compositor;
pub(crate) mod cpu;
pub(crate) mod mosaic;
pub(crate) mod surface;

#[cfg(test)]
#[path = "../../tests/unit/support/recording.rs"]
pub(crate) mod recording;
