mod containers;
mod determinism;
mod placeholders;
mod styles;
