mod common;
mod relay;
