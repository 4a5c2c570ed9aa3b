pub(crate) mod audio;
pub(crate) mod bootstrap;
pub(crate) mod loop_runner;
pub(crate) mod render;
pub(crate) mod screen;
