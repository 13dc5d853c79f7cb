//! Core data types

mod sample;

pub use sample::ImuSample;
