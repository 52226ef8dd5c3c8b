//! Generates utility CSS from the class names actually used in a
//! project's source files, driven by a declarative `classgen.toml`.

pub mod app;
